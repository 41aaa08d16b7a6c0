/// Perspective projection onto the raster surface
use crate::config::RendererConfig;
use crate::math::Vec3;
use crate::raster::Point;

/// Screen geometry and focal distance for a simple pinhole projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub distance: f32,
    pub near_plane: f32,
}

impl Projection {
    pub fn new(width: usize, height: usize, distance: f32, near_plane: f32) -> Self {
        Self {
            width,
            height,
            distance,
            near_plane,
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.projection_distance,
            config.near_plane,
        )
    }

    /// True when a camera-space point is too close to project safely
    pub fn is_before_near_plane(&self, point: &Vec3) -> bool {
        point.z < self.near_plane
    }

    /// Project a camera-space point. Raster y grows downward, so model y is
    /// flipped. The caller guarantees `z` is past the near plane.
    pub fn project(&self, point: &Vec3) -> Point {
        let x = (point.x * self.distance / point.z) as i32 + (self.width / 2) as i32;
        let y = (-point.y * self.distance / point.z) as i32 + (self.height / 2) as i32;
        (x, y)
    }

    /// Coarse rejection: all three points beyond the same screen edge
    pub fn is_off_screen(&self, points: &[Point; 3]) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        points.iter().all(|p| p.0 < 0)
            || points.iter().all(|p| p.0 > w)
            || points.iter().all(|p| p.1 < 0)
            || points.iter().all(|p| p.1 > h)
    }
}
