/// Tunable renderer settings.
///
/// Every constant that shapes the output or the pacing of the frame loop
/// lives here so a host can load it from a JSON file instead of recompiling.
/// Missing fields fall back to the defaults tuned for a 128x64 display.
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{RenderError, Result};
use crate::math::Vec3;
use crate::state::Axis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Framebuffer width in pixels.
    pub width: usize,
    /// Framebuffer height in pixels.
    pub height: usize,
    /// Focal-length-like factor applied before the perspective divide.
    pub projection_distance: f32,
    /// Triangles with any vertex closer than this depth are dropped.
    pub near_plane: f32,
    /// Uniform model scale applied after rotation.
    pub scale: f32,
    /// Camera-space translation applied after scaling.
    pub position: [f32; 3],
    /// Radians added per directional input.
    pub angle_increment: f32,
    /// Radians added per auto-rotate tick.
    pub auto_rotate_step: f32,
    pub auto_rotate_interval_ms: u64,
    /// Axis selected when auto-rotation is switched on.
    pub auto_rotate_axis: Axis,
    /// Forced redraw interval, guarding against a stale frame.
    pub watchdog_interval_ms: u64,
    pub fps_window_ms: u64,
    /// Sleep between driver iterations.
    pub loop_delay_ms: u64,
    /// Bounded wait for the shared render context.
    pub lock_timeout_ms: u64,
    pub event_queue_capacity: usize,
    /// Forced passes at staggered Y rotations when leaving the title screen.
    pub wake_up_frames: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            projection_distance: 110.0,
            near_plane: 1.0,
            scale: 5.0,
            position: [0.0, 0.0, 30.0],
            angle_increment: 0.1,
            auto_rotate_step: 0.05,
            auto_rotate_interval_ms: 30,
            auto_rotate_axis: Axis::Y,
            watchdog_interval_ms: 1000,
            fps_window_ms: 1000,
            loop_delay_ms: 5,
            lock_timeout_ms: 100,
            event_queue_capacity: 8,
            wake_up_frames: 3,
        }
    }
}

impl RendererConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "display size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if !(self.projection_distance > 0.0) {
            return Err(RenderError::InvalidConfig(
                "projection_distance must be positive".to_string(),
            ));
        }
        if !(self.near_plane > 0.0) {
            return Err(RenderError::InvalidConfig(
                "near_plane must be positive".to_string(),
            ));
        }
        if self.event_queue_capacity == 0 {
            return Err(RenderError::InvalidConfig(
                "event_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn auto_rotate_interval(&self) -> Duration {
        Duration::from_millis(self.auto_rotate_interval_ms)
    }

    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_millis(self.watchdog_interval_ms)
    }

    pub fn fps_window(&self) -> Duration {
        Duration::from_millis(self.fps_window_ms)
    }

    pub fn loop_delay(&self) -> Duration {
        Duration::from_millis(self.loop_delay_ms)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
