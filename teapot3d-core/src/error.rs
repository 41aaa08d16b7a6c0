/// Error types for renderer setup
use thiserror::Error;

/// Errors that can stop the renderer from starting.
///
/// Per-frame anomalies (degenerate triangles, near-plane hits, lock
/// timeouts) are never reported here; they are culled or deferred.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Framebuffer dimensions were zero
    #[error("invalid framebuffer dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The framebuffer could not be allocated
    #[error("failed to allocate {width}x{height} framebuffer")]
    FramebufferAlloc { width: usize, height: usize },
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`crate::RendererConfig`]
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
