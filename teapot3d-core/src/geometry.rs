/// Geometry primitives and the compiled-in model store
use crate::math::{cross, subtract, Vec3};

/// Floats per triangle in the flat model layout (3 vertices x xyz)
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// A triangle defined by three vertices
///
/// Winding is clockwise when seen from outside the model, so
/// [`Triangle::normal`] points into the solid. The pipeline's backface test
/// relies on this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a triangle from 9 consecutive floats
    pub fn from_flat(data: &[f32; FLOATS_PER_TRIANGLE]) -> Self {
        Self::new(
            Vec3::new(data[0], data[1], data[2]),
            Vec3::new(data[3], data[4], data[5]),
            Vec3::new(data[6], data[7], data[8]),
        )
    }

    /// Unnormalised face normal, `cross(v1 - v0, v2 - v0)`.
    /// Zero-area triangles give the zero vector.
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = &self.vertices;
        cross(&subtract(v1, v0), &subtract(v2, v0))
    }
}

/// An immutable triangle soup together with its rotation pivot
#[derive(Debug, Clone)]
pub struct Model {
    triangles: Box<[Triangle]>,
    min: Vec3,
    max: Vec3,
    pivot: Vec3,
}

impl Model {
    /// Build a model, computing the pivot from the bounding box midpoint.
    /// Returns `None` for an empty triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Option<Self> {
        let first = triangles.first()?.vertices[0];
        let (min, max) = triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .fold((first, first), |(min, max), v| (min.inf(v), max.sup(v)));

        Some(Self {
            triangles: triangles.into_boxed_slice(),
            min,
            max,
            pivot: (min + max) * 0.5,
        })
    }

    /// Build a model from the flat 9-floats-per-triangle layout.
    /// Returns `None` unless the length is a positive multiple of 9.
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.is_empty() || data.len() % FLOATS_PER_TRIANGLE != 0 {
            return None;
        }
        let triangles = data
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .filter_map(|chunk| <&[f32; FLOATS_PER_TRIANGLE]>::try_from(chunk).ok())
            .map(Triangle::from_flat)
            .collect();
        Self::from_triangles(triangles)
    }

    /// The built-in "smol teapot": a boxy body with spout, handle, lid and knob
    pub fn teapot() -> Self {
        Self::from_flat(&TEAPOT).unwrap_or_else(|| unreachable!("teapot table is non-empty"))
    }

    /// Axis-aligned cube centered at the origin
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let v = Vec3::new;
        let faces = vec![
            // Front (+z)
            Triangle::new(v(-h, -h, h), v(h, h, h), v(h, -h, h)),
            Triangle::new(v(-h, -h, h), v(-h, h, h), v(h, h, h)),
            // Back (-z)
            Triangle::new(v(-h, -h, -h), v(h, h, -h), v(-h, h, -h)),
            Triangle::new(v(-h, -h, -h), v(h, -h, -h), v(h, h, -h)),
            // Top (+y)
            Triangle::new(v(-h, h, -h), v(h, h, h), v(-h, h, h)),
            Triangle::new(v(-h, h, -h), v(h, h, -h), v(h, h, h)),
            // Bottom (-y)
            Triangle::new(v(-h, -h, -h), v(h, -h, h), v(h, -h, -h)),
            Triangle::new(v(-h, -h, -h), v(-h, -h, h), v(h, -h, h)),
            // Right (+x)
            Triangle::new(v(h, -h, -h), v(h, h, h), v(h, h, -h)),
            Triangle::new(v(h, -h, -h), v(h, -h, h), v(h, h, h)),
            // Left (-x)
            Triangle::new(v(-h, -h, -h), v(-h, h, h), v(-h, -h, h)),
            Triangle::new(v(-h, -h, -h), v(-h, h, -h), v(-h, h, h)),
        ];
        Self::from_triangles(faces).unwrap_or_else(|| unreachable!("cube has faces"))
    }

    /// Replace the bounding-box pivot, e.g. for geometry already centered
    /// where it should rotate
    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box midpoint; rotation happens about this point
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }
}

const TEAPOT_TRIANGLES: usize = 36;

#[rustfmt::skip]
static TEAPOT: [f32; TEAPOT_TRIANGLES * FLOATS_PER_TRIANGLE] = [
    // Body bottom
    -1.0, 0.0, -1.0, 1.0, 0.0, 1.0, 1.0, 0.0, -1.0,
    -1.0, 0.0, -1.0, -1.0, 0.0, 1.0, 1.0, 0.0, 1.0,
    // Body sides
    -1.0, 0.0, -1.0, 1.0, 0.0, -1.0, -1.0, 1.0, -1.0,
    1.0, 0.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0,
    1.0, 0.0, -1.0, 1.0, 0.0, 1.0, 1.0, 1.0, -1.0,
    1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0,
    1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 1.0, 1.0,
    -1.0, 0.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    -1.0, 0.0, 1.0, -1.0, 0.0, -1.0, -1.0, 1.0, 1.0,
    -1.0, 0.0, -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0,
    // Body top
    -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0,
    1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
    // Spout
    1.0, 0.5, 0.0, 2.0, 0.8, 0.0, 2.0, 0.5, 0.0,
    1.0, 0.5, 0.0, 1.0, 0.8, 0.0, 2.0, 0.8, 0.0,
    // Handle
    -1.0, 0.5, 0.0, -2.0, 0.8, 0.0, -2.0, 0.5, 0.0,
    -1.0, 0.5, 0.0, -1.0, 0.8, 0.0, -2.0, 0.8, 0.0,
    // Lid sides
    -0.5, 1.0, -0.5, 0.5, 1.0, -0.5, -0.5, 1.3, -0.5,
    0.5, 1.0, -0.5, 0.5, 1.3, -0.5, -0.5, 1.3, -0.5,
    0.5, 1.0, -0.5, 0.5, 1.0, 0.5, 0.5, 1.3, -0.5,
    0.5, 1.0, 0.5, 0.5, 1.3, 0.5, 0.5, 1.3, -0.5,
    0.5, 1.0, 0.5, -0.5, 1.0, 0.5, 0.5, 1.3, 0.5,
    -0.5, 1.0, 0.5, -0.5, 1.3, 0.5, 0.5, 1.3, 0.5,
    -0.5, 1.0, 0.5, -0.5, 1.0, -0.5, -0.5, 1.3, 0.5,
    -0.5, 1.0, -0.5, -0.5, 1.3, -0.5, -0.5, 1.3, 0.5,
    // Lid top
    -0.5, 1.3, -0.5, 0.5, 1.3, -0.5, -0.5, 1.3, 0.5,
    0.5, 1.3, -0.5, 0.5, 1.3, 0.5, -0.5, 1.3, 0.5,
    // Knob sides
    -0.1, 1.3, -0.1, 0.1, 1.3, -0.1, -0.1, 1.6, -0.1,
    0.1, 1.3, -0.1, 0.1, 1.6, -0.1, -0.1, 1.6, -0.1,
    0.1, 1.3, -0.1, 0.1, 1.3, 0.1, 0.1, 1.6, -0.1,
    0.1, 1.3, 0.1, 0.1, 1.6, 0.1, 0.1, 1.6, -0.1,
    0.1, 1.3, 0.1, -0.1, 1.3, 0.1, 0.1, 1.6, 0.1,
    -0.1, 1.3, 0.1, -0.1, 1.6, 0.1, 0.1, 1.6, 0.1,
    -0.1, 1.3, 0.1, -0.1, 1.3, -0.1, -0.1, 1.6, 0.1,
    -0.1, 1.3, -0.1, -0.1, 1.6, -0.1, -0.1, 1.6, 0.1,
    // Knob top
    -0.1, 1.6, -0.1, 0.1, 1.6, -0.1, -0.1, 1.6, 0.1,
    0.1, 1.6, -0.1, 0.1, 1.6, 0.1, -0.1, 1.6, 0.1,
];
