//! Image processing for ID photos.
//!
//! | Stage | Crate / function |
//! |---|---|
//! | **Load** | `reqwest` (URLs), `base64` (data URLs), `image::load_from_memory` |
//! | **Crop to output** | cover-fit geometry + Lanczos3 resample onto white |
//! | **Compose** | `rayon` brightness pass + bottom-anchored overlay |
//! | **Tile** | centered grid + `imageproc` cutting guides |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Geometry**: Pure functions for rectangle and layout math (unit testable)
//! - **Parameters**: Data structures describing what to render
//! - **Draw**: Raster primitives shared by the stages
//! - **Operations**: High-level functions combining geometry + draw
//! - **Enhance**: [`Enhancer`] trait for external photo rewriting
//!
//! Every operation is a pure function of its arguments. Nothing is cached,
//! and two calls never share mutable state.

pub(crate) mod draw;
pub mod encode;
pub mod enhance;
mod error;
pub mod geometry;
pub mod loader;
pub mod operations;
mod params;
mod raster;

pub use encode::{EncodedImage, encode};
pub use enhance::{EnhanceError, Enhancer};
pub use error::{ImagingError, MAX_CANVAS_PIXELS};
pub use loader::{ImageSource, LoadError, load};
pub use operations::{
    SHEET_BORDER_COLOR, SHEET_BORDER_WIDTH, compose, crop_to_output, sheet_layout, tile,
};
pub use params::{
    Brightness, Composition, OverlayPlacement, Point, Quality, SheetSpec, Viewport,
};
pub use raster::{Raster, WHITE};
