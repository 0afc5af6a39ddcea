//! Contract for external photo enhancement.
//!
//! Background replacement and garment rendering are delegated to a
//! collaborator (typically a generative model behind a network API). The
//! pipeline only sees the [`Enhancer`] trait: it hands over the current base
//! and gets back a replacement raster, which it treats as opaque. No
//! implementation ships with the crate.

use super::raster::Raster;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Enhancer unavailable: {0}")]
    Unavailable(String),
    #[error("Enhancer rejected the request: {0}")]
    Rejected(String),
}

/// An external service that can rewrite the base photo.
pub trait Enhancer: Sync {
    /// Replace whatever is behind the subject with plain white.
    fn replace_background(&self, base: &Raster) -> Result<Raster, EnhanceError>;

    /// Render the subject wearing `garment` (a free-form description such
    /// as "black suit with white shirt").
    fn dress(&self, base: &Raster, garment: &str) -> Result<Raster, EnhanceError>;
}
