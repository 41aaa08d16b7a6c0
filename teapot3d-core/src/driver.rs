/// The frame loop.
///
/// [`FrameDriver`] consumes input events from a bounded queue, updates the
/// shared [`RenderContext`], decides whether a new frame is due and hands the
/// finished frame to a [`Display`]. Periodic work (auto-rotate ticks, the
/// forced-refresh watchdog, the FPS window) is tracked with [`Deadline`]s
/// against a monotonic clock that callers pass in, so the loop can be
/// driven step by step from tests.
use log::{debug, info, warn};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError};
use std::thread;
use std::time::Instant;

use crate::config::RendererConfig;
use crate::context::{RenderContext, SharedContext};
use crate::display::Display;
use crate::error::Result;
use crate::geometry::Model;
use crate::math::Vec3;
use crate::pipeline::Pipeline;
use crate::schedule::Deadline;
use crate::state::{InputEvent, Mode, Transition};
use crate::stats::FpsCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Continue,
    Exit,
}

pub struct FrameDriver {
    config: RendererConfig,
    model: Model,
    pipeline: Pipeline,
    shared: SharedContext,
    events: Receiver<InputEvent>,
    /// Event taken from the queue while the context was unavailable
    pending: Option<InputEvent>,
    /// Wake-up frames still to render; the last one is at zero rotation
    wake_up_remaining: u32,
    /// A frame was rendered but the display could not be given it yet
    unpresented: bool,
    auto_rotate: Deadline,
    watchdog: Deadline,
    fps: FpsCounter,
}

impl FrameDriver {
    /// Validate `config`, allocate the framebuffer and create the event
    /// queue. The returned sender is the producer side for the host.
    pub fn new(
        config: RendererConfig,
        model: Model,
        now: Instant,
    ) -> Result<(Self, SyncSender<InputEvent>)> {
        config.validate()?;
        let context = RenderContext::new(&config)?;
        let (sender, events) = sync_channel(config.event_queue_capacity);

        info!(
            "Frame driver ready: {}x{} display, {} triangles",
            config.width,
            config.height,
            model.len()
        );

        let driver = Self {
            pipeline: Pipeline::from_config(&config),
            shared: SharedContext::new(context),
            events,
            pending: None,
            wake_up_remaining: 0,
            unpresented: false,
            auto_rotate: Deadline::new(config.auto_rotate_interval(), now),
            watchdog: Deadline::new(config.watchdog_interval(), now),
            fps: FpsCounter::new(config.fps_window(), now),
            model,
            config,
        };
        Ok((driver, sender))
    }

    pub fn shared(&self) -> SharedContext {
        self.shared.clone()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Run until an exit transition, pacing iterations with `loop_delay`
    pub fn run<D: Display>(&mut self, display: &mut D) -> std::result::Result<(), D::Error> {
        let delay = self.config.loop_delay();
        while self.step(Instant::now(), display)? == DriverStatus::Continue {
            thread::sleep(delay);
        }
        info!("Frame driver stopped");
        Ok(())
    }

    /// One loop iteration: at most one input event, timers, then a render
    /// pass and a present if the frame is stale.
    pub fn step<D: Display>(
        &mut self,
        now: Instant,
        display: &mut D,
    ) -> std::result::Result<DriverStatus, D::Error> {
        if self.pending.is_none() && self.wake_up_remaining == 0 {
            match self.events.try_recv() {
                Ok(event) => self.pending = Some(event),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    warn!("Input queue disconnected, stopping");
                    return Ok(DriverStatus::Exit);
                }
            }
        }

        let shared = self.shared.clone();
        let Some(mut ctx) = shared.try_lock_for(self.config.lock_timeout()) else {
            debug!("Render context busy, deferring tick");
            return Ok(DriverStatus::Continue);
        };

        if let Some(event) = self.pending.take() {
            if self.apply_input(&mut ctx, event, now) == Transition::Exit {
                info!("Exit requested");
                return Ok(DriverStatus::Exit);
            }
        }

        if self.wake_up_remaining > 0 {
            self.wake_up_remaining -= 1;
            let angle = self.wake_up_remaining as f32 * self.config.angle_increment;
            ctx.state.rotation = Vec3::new(0.0, angle, 0.0);
            ctx.state.render_needed = true;
        }

        if matches!(ctx.state.mode(), Mode::AutoRotating { .. }) && self.auto_rotate.poll(now) {
            ctx.state.auto_rotate_tick(self.config.auto_rotate_step);
        }

        if self.watchdog.poll(now) {
            ctx.state.render_needed = true;
        }

        if ctx.state.render_needed {
            self.render_pass(&mut ctx);
            self.unpresented = true;
        }

        self.fps.update(now, &mut ctx.stats);
        drop(ctx);

        if self.unpresented && self.present(display)? {
            self.unpresented = false;
        }
        Ok(DriverStatus::Continue)
    }

    fn apply_input(&mut self, ctx: &mut RenderContext, event: InputEvent, now: Instant) -> Transition {
        let before = ctx.state.mode();
        let transition = ctx.state.handle_input(event, &self.config);
        debug!("Input {:?} -> {:?}", event, transition);

        match transition {
            Transition::WakeUp => {
                self.wake_up_remaining = self.config.wake_up_frames + 1;
            }
            Transition::Redraw => {
                let entered_auto = !matches!(before, Mode::AutoRotating { .. })
                    && matches!(ctx.state.mode(), Mode::AutoRotating { .. });
                if entered_auto {
                    self.auto_rotate.reset(now);
                }
            }
            Transition::None | Transition::Exit => {}
        }
        transition
    }

    fn render_pass(&self, ctx: &mut RenderContext) {
        if ctx.state.mode() == Mode::TitleScreen {
            ctx.frame.clear();
            ctx.stats.polygons_drawn = 0;
        } else {
            let stats = self.pipeline.render(&self.model, &ctx.state, &mut ctx.frame);
            ctx.stats.polygons_drawn = stats.polygons_drawn;
        }
        ctx.state.render_needed = false;
        ctx.stats.record_frame();
    }

    /// Hand the current frame to the display under a fresh lock acquisition.
    /// Returns false when the context was busy.
    fn present<D: Display>(&self, display: &mut D) -> std::result::Result<bool, D::Error> {
        let Some(ctx) = self.shared.try_lock_for(self.config.lock_timeout()) else {
            debug!("Render context busy, deferring present");
            return Ok(false);
        };
        display.present(&ctx.frame, &ctx.overlay())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Overlay;
    use crate::raster::Framebuffer;
    use crate::state::{Axis, InputKind, Key};
    use std::convert::Infallible;
    use std::sync::mpsc::TrySendError;
    use std::time::Duration;
    use test_log::test;

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<(Vec<u8>, Overlay)>,
    }

    impl Display for RecordingDisplay {
        type Error = Infallible;

        fn present(&mut self, frame: &Framebuffer, overlay: &Overlay) -> std::result::Result<(), Infallible> {
            self.frames.push((frame.as_bytes().to_vec(), overlay.clone()));
            Ok(())
        }
    }

    struct Harness {
        driver: FrameDriver,
        input: SyncSender<InputEvent>,
        display: RecordingDisplay,
        start: Instant,
    }

    impl Harness {
        fn new(config: RendererConfig) -> Self {
            let start = Instant::now();
            let (driver, input) = FrameDriver::new(config, Model::teapot(), start).unwrap();
            Self {
                driver,
                input,
                display: RecordingDisplay::default(),
                start,
            }
        }

        fn at(&self, ms: u64) -> Instant {
            self.start + Duration::from_millis(ms)
        }

        fn step(&mut self, ms: u64) -> DriverStatus {
            let now = self.at(ms);
            match self.driver.step(now, &mut self.display) {
                Ok(status) => status,
                Err(never) => match never {},
            }
        }

        fn send(&self, event: InputEvent) {
            self.input.try_send(event).unwrap();
        }

        fn rotation(&self) -> Vec3 {
            let shared = self.driver.shared();
            let ctx = shared.try_lock_for(Duration::from_secs(1)).unwrap();
            ctx.state.rotation
        }

        fn mode(&self) -> Mode {
            let shared = self.driver.shared();
            let ctx = shared.try_lock_for(Duration::from_secs(1)).unwrap();
            ctx.state.mode()
        }

        /// Leave the title screen and run the whole wake-up burst at `ms`
        fn wake(&mut self, ms: u64) {
            self.send(InputEvent::press(Key::Up));
            for _ in 0..=self.driver.config().wake_up_frames {
                self.step(ms);
            }
            assert_eq!(self.mode(), Mode::Interactive);
        }
    }

    fn test_config() -> RendererConfig {
        RendererConfig {
            lock_timeout_ms: 0,
            ..RendererConfig::default()
        }
    }

    #[test]
    fn test_title_screen_presents_blank_frame() {
        let mut h = Harness::new(test_config());
        assert_eq!(h.step(0), DriverStatus::Continue);

        assert_eq!(h.display.frames.len(), 1);
        let (bytes, overlay) = &h.display.frames[0];
        assert!(overlay.is_title_screen());
        assert!(bytes.iter().all(|&b| b == 0));

        // Nothing is stale, nothing is presented
        h.step(10);
        assert_eq!(h.display.frames.len(), 1);
    }

    #[test]
    fn test_wake_up_burst_settles_at_zero() {
        let mut h = Harness::new(test_config());
        h.step(0);
        h.wake(5);

        let frames = &h.display.frames[1..];
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|(bytes, _)| bytes.iter().any(|&b| b != 0)));
        assert_ne!(frames[0].0, frames[3].0);
        assert_eq!(h.rotation(), Vec3::zeros());
    }

    #[test]
    fn test_input_during_wake_up_waits() {
        let mut h = Harness::new(test_config());
        h.send(InputEvent::press(Key::Confirm));
        h.send(InputEvent::press(Key::Right));
        for _ in 0..4 {
            h.step(0);
        }
        assert_eq!(h.rotation(), Vec3::zeros());

        h.step(1);
        let inc = h.driver.config().angle_increment;
        assert!((h.rotation() - Vec3::new(0.0, inc, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_directional_input_renders_once() {
        let mut h = Harness::new(test_config());
        h.wake(0);
        let presented = h.display.frames.len();

        h.send(InputEvent::press(Key::Left));
        h.step(10);
        assert_eq!(h.display.frames.len(), presented + 1);
        h.step(20);
        assert_eq!(h.display.frames.len(), presented + 1);

        let inc = h.driver.config().angle_increment;
        assert!((h.rotation() - Vec3::new(0.0, -inc, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_ten_ticks() {
        let config = RendererConfig {
            auto_rotate_axis: Axis::X,
            auto_rotate_step: 0.05,
            auto_rotate_interval_ms: 30,
            ..test_config()
        };
        let mut h = Harness::new(config);
        h.wake(0);

        h.send(InputEvent::new(InputKind::LongPress, Key::Confirm));
        h.step(100);
        assert_eq!(h.mode(), Mode::AutoRotating { axis: Axis::X });
        let before = h.rotation();

        for tick in 1..=10 {
            h.step(100 + tick * 30);
        }
        let after = h.rotation();
        assert!((after.x - before.x - 0.5).abs() < 1e-5);
        assert_eq!(after.y, before.y);
        assert_eq!(after.z, before.z);
    }

    #[test]
    fn test_auto_rotate_waits_for_interval() {
        let config = RendererConfig {
            auto_rotate_axis: Axis::Z,
            ..test_config()
        };
        let mut h = Harness::new(config);
        h.wake(0);
        h.send(InputEvent::new(InputKind::LongPress, Key::Confirm));
        h.step(100);

        h.step(110);
        h.step(120);
        assert_eq!(h.rotation().z, 0.0);
        h.step(130);
        assert!(h.rotation().z > 0.0);
    }

    #[test]
    fn test_watchdog_forces_refresh() {
        let mut h = Harness::new(test_config());
        h.step(0);
        h.step(500);
        assert_eq!(h.display.frames.len(), 1);

        h.step(1000);
        assert_eq!(h.display.frames.len(), 2);
    }

    #[test]
    fn test_busy_context_defers_event() {
        let mut h = Harness::new(test_config());
        h.wake(0);
        let presented = h.display.frames.len();

        let shared = h.driver.shared();
        let held = shared.try_lock_for(Duration::ZERO).unwrap();
        h.send(InputEvent::press(Key::Up));
        assert_eq!(h.step(10), DriverStatus::Continue);
        assert_eq!(h.display.frames.len(), presented);
        drop(held);

        h.step(20);
        let inc = h.driver.config().angle_increment;
        assert!((h.rotation().x - inc).abs() < 1e-6);
        assert_eq!(h.display.frames.len(), presented + 1);
    }

    #[test]
    fn test_back_exits() {
        let mut h = Harness::new(test_config());
        h.wake(0);
        h.send(InputEvent::press(Key::Back));
        assert_eq!(h.step(10), DriverStatus::Exit);
    }

    #[test]
    fn test_disconnected_queue_exits() {
        let mut h = Harness::new(test_config());
        // Replacing the only sender drops the producer side
        h.input = sync_channel(1).0;
        assert_eq!(h.step(0), DriverStatus::Exit);
    }

    #[test]
    fn test_queue_is_bounded() {
        let config = RendererConfig {
            event_queue_capacity: 2,
            ..test_config()
        };
        let h = Harness::new(config);
        h.send(InputEvent::press(Key::Up));
        h.send(InputEvent::press(Key::Up));
        assert!(matches!(
            h.input.try_send(InputEvent::press(Key::Up)),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn test_fps_and_polygons_reach_overlay() {
        let mut h = Harness::new(test_config());
        h.wake(0);
        h.step(1000);

        let (_, overlay) = h.display.frames.last().unwrap();
        assert_eq!(overlay.mode, Mode::Interactive);
        assert!(overlay.polygons_drawn > 0);
        assert!(overlay.fps > 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RendererConfig {
            width: 0,
            ..RendererConfig::default()
        };
        assert!(FrameDriver::new(config, Model::teapot(), Instant::now()).is_err());
    }
}
