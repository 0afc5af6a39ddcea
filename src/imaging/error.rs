use super::loader::LoadError;
use thiserror::Error;

/// Largest canvas the pipeline will allocate, in pixels (16384²).
///
/// Anything larger is reported as [`ImagingError::Render`] instead of
/// aborting on allocation.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Failed to load image: {0}")]
    Load(#[from] LoadError),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Check that a `width × height` drawing surface can be created.
pub(crate) fn check_surface(width: u32, height: u32) -> Result<(), ImagingError> {
    if width == 0 || height == 0 {
        return Err(ImagingError::InvalidGeometry(format!(
            "canvas must not be empty, got {width}x{height}"
        )));
    }
    if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
        return Err(ImagingError::Render(format!(
            "canvas {width}x{height} exceeds the drawable surface limit"
        )));
    }
    Ok(())
}
