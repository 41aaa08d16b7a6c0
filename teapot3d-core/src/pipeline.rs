/// Transform, cull and rasterize the model for one frame
use log::trace;

use crate::config::RendererConfig;
use crate::geometry::{Model, Triangle};
use crate::math::{cross, dot, subtract, Vec3};
use crate::projection::Projection;
use crate::raster::{Framebuffer, Point};
use crate::state::RenderState;
use crate::transform::ModelTransform;

/// The camera looks down -z; faces are kept when their normal opposes it.
pub const VIEW_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Result of one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub polygons_drawn: usize,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    projection: Projection,
}

impl Pipeline {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(Projection::from_config(config))
    }

    /// Transform a triangle and decide whether it is drawn.
    ///
    /// Returns the screen-space corners, or `None` when the triangle crosses
    /// the near plane, faces away (a zero normal counts as facing away) or
    /// lies entirely past one screen edge.
    pub fn project_triangle(
        &self,
        triangle: &Triangle,
        transform: &ModelTransform,
    ) -> Option<[Point; 3]> {
        let [a, b, c] = triangle.vertices.map(|v| transform.apply(&v));

        if [a, b, c]
            .iter()
            .any(|v| self.projection.is_before_near_plane(v))
        {
            return None;
        }

        let normal = cross(&subtract(&b, &a), &subtract(&c, &a));
        if !(dot(&normal, &VIEW_DIRECTION) < 0.0) {
            return None;
        }

        let points = [a, b, c].map(|v| self.projection.project(&v));
        if self.projection.is_off_screen(&points) {
            return None;
        }
        Some(points)
    }

    /// Full pass: clear, then outline every surviving triangle in model order
    pub fn render(&self, model: &Model, state: &RenderState, frame: &mut Framebuffer) -> FrameStats {
        let transform =
            ModelTransform::new(&state.rotation, state.scale, state.position, model.pivot());

        frame.clear();
        let mut stats = FrameStats::default();
        for triangle in model.triangles() {
            if let Some([p1, p2, p3]) = self.project_triangle(triangle, &transform) {
                frame.draw_triangle_outline(p1, p2, p3);
                stats.polygons_drawn += 1;
            }
        }

        trace!(
            "Rendered {}/{} triangles at rotation {:?}",
            stats.polygons_drawn,
            model.len(),
            state.rotation
        );
        stats
    }
}
