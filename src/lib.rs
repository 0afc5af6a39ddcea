//! # idphoto
//!
//! Turn an arbitrary portrait into a print-ready 3x4 cm ID photo: frame it,
//! optionally dress it with a garment overlay, adjust brightness, and export
//! either a single high-resolution photo or a sheet of copies for a standard
//! 15x10 cm print.
//!
//! # Architecture: Stateless Pipeline
//!
//! Every stage is a function from rasters and parameters to a new raster:
//!
//! ```text
//! 1. Load      source (path / URL / data URL)  →  Raster
//! 2. Crop      Raster + Viewport                →  708x944 base
//! 3. Compose   base + brightness + overlay      →  final photo
//! 4. Tile      final photo + SheetSpec          →  1772x1181 sheet   (optional)
//! 5. Encode    Raster + quality                 →  JPEG bytes / data URL
//! ```
//!
//! No stage keeps state between calls. Callers hold whatever they need
//! (typically an [`export::EditSession`]) and re-run the stages on demand.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Loading, geometry, crop, compose, tile, encode, enhancement seam |
//! | [`export`] | Edit session and the two export artifacts (single photo, sheet) |
//! | [`config`] | `config.toml` loading, validation, merging, garment catalog |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Output Resolution Decoupled From The Viewport
//!
//! Framing is captured in viewport units (the on-screen crop frame, 300x400
//! by default) and replayed at the output resolution by a single uniform
//! scale. The same framing therefore renders identically at 708x944 or any
//! other size with the same aspect ratio.
//!
//! ## Canvas-Style Drawing
//!
//! Rasters are drawn at float rectangles snapped to whole pixels, resampled
//! with Lanczos3, and alpha-composited over an opaque white canvas. Anything
//! a rectangle does not cover stays white, so every artifact is fully opaque
//! before it reaches the JPEG encoder.

pub mod config;
pub mod export;
pub mod imaging;
pub mod output;
