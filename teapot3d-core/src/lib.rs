/// Teapot3D Core Library - 1-bit wireframe rendering pipeline
///
/// This library provides the renderer core: vector and matrix math, the
/// compiled-in model store, the transform/cull/project pipeline, a packed
/// monochrome framebuffer with line rasterization, the interaction state
/// machine and the frame driver that ties them to a host display.

pub mod config;
pub mod context;
pub mod display;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod transform;

// Re-export commonly used types
pub use config::RendererConfig;
pub use context::{RenderContext, SharedContext};
pub use display::{Display, Overlay};
pub use driver::{DriverStatus, FrameDriver};
pub use error::{RenderError, Result};
pub use geometry::{Model, Triangle};
pub use pipeline::{FrameStats, Pipeline};
pub use projection::Projection;
pub use raster::{Framebuffer, Point};
pub use state::{Axis, InputEvent, InputKind, Key, Mode, RenderState, Transition};
pub use stats::Stats;
pub use transform::ModelTransform;
