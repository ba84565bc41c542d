//! Errors surfaced by rendering and frame export.
//!
//! Numeric edge cases inside the tracer never produce errors; only the
//! thread pool and output plumbing can fail.

use thiserror::Error;

/// Errors that can occur while rendering or saving a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Scanline {0} was never rendered")]
    MissingScanline(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
