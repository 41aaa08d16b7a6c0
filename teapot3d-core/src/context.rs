/// Render state shared between the frame driver and the display host
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Duration;

use crate::config::RendererConfig;
use crate::display::Overlay;
use crate::error::Result;
use crate::raster::Framebuffer;
use crate::state::RenderState;
use crate::stats::Stats;

/// Everything a render pass mutates
#[derive(Debug)]
pub struct RenderContext {
    pub state: RenderState,
    pub frame: Framebuffer,
    pub stats: Stats,
}

impl RenderContext {
    /// Allocates the framebuffer; failure here is fatal to the caller
    pub fn new(config: &RendererConfig) -> Result<Self> {
        Ok(Self {
            state: RenderState::new(config),
            frame: Framebuffer::new(config.width, config.height)?,
            stats: Stats::default(),
        })
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            mode: self.state.mode(),
            fps: self.stats.fps,
            polygons_drawn: self.stats.polygons_drawn,
        }
    }
}

/// Handle to the single render context behind one mutex
#[derive(Debug, Clone)]
pub struct SharedContext {
    inner: Arc<Mutex<RenderContext>>,
}

impl SharedContext {
    pub fn new(context: RenderContext) -> Self {
        Self {
            inner: Arc::new(Mutex::new(context)),
        }
    }

    /// Acquire the context, giving up after `timeout`.
    ///
    /// The lock does not poison: a panicking holder releases it and the
    /// next pass rewrites the framebuffer anyway.
    pub fn try_lock_for(&self, timeout: Duration) -> Option<MutexGuard<'_, RenderContext>> {
        self.inner.try_lock_for(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_lock_times_out_while_held() {
        let shared = SharedContext::new(RenderContext::new(&RendererConfig::default()).unwrap());
        let held = shared.try_lock_for(Duration::ZERO);
        assert!(held.is_some());

        let other = shared.clone();
        let started = Instant::now();
        assert!(other.try_lock_for(Duration::from_millis(10)).is_none());
        assert!(started.elapsed() >= Duration::from_millis(10));

        drop(held);
        assert!(other.try_lock_for(Duration::ZERO).is_some());
    }

    #[test]
    fn test_lock_across_threads() {
        let shared = SharedContext::new(RenderContext::new(&RendererConfig::default()).unwrap());
        let worker = shared.clone();
        let handle = thread::spawn(move || {
            let mut ctx = worker.try_lock_for(Duration::from_secs(1)).unwrap();
            ctx.stats.polygons_drawn = 7;
        });
        handle.join().unwrap();

        let ctx = shared.try_lock_for(Duration::from_secs(1)).unwrap();
        assert_eq!(ctx.overlay().polygons_drawn, 7);
    }

    #[test]
    fn test_lock_survives_panicking_holder() {
        let shared = SharedContext::new(RenderContext::new(&RendererConfig::default()).unwrap());
        let worker = shared.clone();
        let result = thread::spawn(move || {
            let mut ctx = worker.try_lock_for(Duration::from_secs(1)).unwrap();
            ctx.stats.polygons_drawn = 3;
            panic!("render thread died");
        })
        .join();
        assert!(result.is_err());

        let ctx = shared.try_lock_for(Duration::from_millis(10)).unwrap();
        assert_eq!(ctx.stats.polygons_drawn, 3);
    }
}
