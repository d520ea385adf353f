//! Error types for the canvas core
//!
//! Only construction and export can fail. Per-frame simulation and gesture
//! handling are total.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// The viewport or paint pad has no drawable area
    #[error("drawing surface is empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    /// The pixel buffer would exceed `consts::MAX_PIXELS`
    #[error("drawing surface is too large ({width}x{height})")]
    TooLarge { width: u32, height: u32 },

    /// The host could not hand out a 2D drawing context
    #[error("no 2d drawing context available")]
    NoContext,

    /// PNG encoding of the pixel buffer failed
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
