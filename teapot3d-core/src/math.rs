/// Vector and homogeneous matrix helpers
///
/// Matrices follow the row-vector convention: a point is multiplied as
/// `out = in * M`, translation lives in row 3 and perspective terms in
/// column 3. Storage is nalgebra's, but cells are addressed explicitly so the
/// convention never depends on nalgebra's column-vector `transform_point`.
use nalgebra::{Matrix4, Vector3};

pub type Vec3 = Vector3<f32>;
pub type Mat4 = Matrix4<f32>;

pub fn identity() -> Mat4 {
    Mat4::identity()
}

/// Rotation about the X axis, built on an identity base
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = identity();
    m[(1, 1)] = cos;
    m[(1, 2)] = -sin;
    m[(2, 1)] = sin;
    m[(2, 2)] = cos;
    m
}

/// Rotation about the Y axis, built on an identity base
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = identity();
    m[(0, 0)] = cos;
    m[(0, 2)] = sin;
    m[(2, 0)] = -sin;
    m[(2, 2)] = cos;
    m
}

/// Rotation about the Z axis, built on an identity base
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = identity();
    m[(0, 0)] = cos;
    m[(0, 1)] = -sin;
    m[(1, 0)] = sin;
    m[(1, 1)] = cos;
    m
}

/// Multiply `v` (with implicit w = 1) by `m`, dividing by the resulting w
/// when it is non-zero.
pub fn transform_point(m: &Mat4, v: &Vec3) -> Vec3 {
    let x = v.x * m[(0, 0)] + v.y * m[(1, 0)] + v.z * m[(2, 0)] + m[(3, 0)];
    let y = v.x * m[(0, 1)] + v.y * m[(1, 1)] + v.z * m[(2, 1)] + m[(3, 1)];
    let z = v.x * m[(0, 2)] + v.y * m[(1, 2)] + v.z * m[(2, 2)] + m[(3, 2)];
    let w = v.x * m[(0, 3)] + v.y * m[(1, 3)] + v.z * m[(2, 3)] + m[(3, 3)];

    if w != 0.0 {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}

pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a.dot(b)
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

pub fn subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    a - b
}
