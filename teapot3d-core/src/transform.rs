/// Model-to-camera transformation
use crate::math::{rotation_x, rotation_y, rotation_z, transform_point, Mat4, Vec3};

/// Per-frame transform: recenter on the pivot, rotate X then Y then Z,
/// scale, translate into camera space.
///
/// The three rotations are applied one after another rather than folded into
/// a single matrix; the order fixes how combined rotations look on screen.
#[derive(Debug, Clone)]
pub struct ModelTransform {
    rx: Mat4,
    ry: Mat4,
    rz: Mat4,
    scale: f32,
    position: Vec3,
    pivot: Vec3,
}

impl ModelTransform {
    pub fn new(rotation: &Vec3, scale: f32, position: Vec3, pivot: Vec3) -> Self {
        Self {
            rx: rotation_x(rotation.x),
            ry: rotation_y(rotation.y),
            rz: rotation_z(rotation.z),
            scale,
            position,
            pivot,
        }
    }

    pub fn apply(&self, vertex: &Vec3) -> Vec3 {
        let centered = vertex - self.pivot;
        let rotated = transform_point(&self.rx, &centered);
        let rotated = transform_point(&self.ry, &rotated);
        let rotated = transform_point(&self.rz, &rotated);
        rotated * self.scale + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_transform() {
        let transform = ModelTransform::new(&Vec3::zeros(), 1.0, Vec3::zeros(), Vec3::zeros());
        let p = Vec3::new(0.25, -1.0, 5.0);
        assert!((transform.apply(&p) - p).norm() < 1e-6);
    }

    #[test]
    fn test_pivot_scale_and_position() {
        let pivot = Vec3::new(1.0, 1.0, 1.0);
        let transform =
            ModelTransform::new(&Vec3::zeros(), 2.0, Vec3::new(0.0, 0.0, 30.0), pivot);
        let out = transform.apply(&Vec3::new(2.0, 1.0, 1.0));
        assert!((out - Vec3::new(2.0, 0.0, 30.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_order_is_x_then_y() {
        // x first: +y -> -z, then y: -z -> +x
        let rotation = Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let transform = ModelTransform::new(&rotation, 1.0, Vec3::zeros(), Vec3::zeros());
        let out = transform.apply(&Vec3::new(0.0, 1.0, 0.0));
        assert!((out - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
    }
}
