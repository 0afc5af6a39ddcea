//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between callers (the CLI, [`export`](crate::export)) and the
//! pipeline stages in [`operations`](super::operations), which turn them into
//! pixels via the pure math in [`geometry`](super::geometry).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`Point`]: A 2D offset. Pixels for a [`Viewport`], percentages for an [`OverlayPlacement`].
//! - [`Viewport`]: How the source is framed inside the on-screen crop region.
//! - [`Brightness`]: Linear multiplicative brightness in percent (100 = unchanged).
//! - [`OverlayPlacement`]: Resolution-agnostic scale and offset of a garment overlay.
//! - [`Composition`]: Either a plain base or a base with an overlay *and* its placement.
//! - [`SheetSpec`]: Physical sheet and photo size, print resolution and grid shape.

use super::raster::Raster;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// A 2D offset. The consuming operation decides the unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The crop viewport as the user left it.
///
/// - `offset`: pan of the image center away from the container center, in container pixels
/// - `zoom`: multiplier on top of the cover-fit scale (1.0 = image just covers the container)
/// - `container_width` / `container_height`: on-screen size of the crop region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
    pub zoom: f64,
    pub container_width: f64,
    pub container_height: f64,
}

impl Viewport {
    /// A centered, unzoomed viewport of the given container size.
    pub fn centered(container_width: f64, container_height: f64) -> Self {
        Self {
            offset: Point::ORIGIN,
            zoom: 1.0,
            container_width,
            container_height,
        }
    }

    pub fn with_offset(self, offset: Point) -> Self {
        Self { offset, ..self }
    }

    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }
}

/// Brightness as a percentage: 100 leaves pixels untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness(f64);

impl Brightness {
    /// Lower bound of the interactive slider.
    pub const MIN_PERCENT: f64 = 50.0;
    /// Upper bound of the interactive slider.
    pub const MAX_PERCENT: f64 = 150.0;

    /// Negative percentages clamp to 0 (black); NaN and infinities mean "unchanged".
    pub fn new(percent: f64) -> Self {
        if percent.is_finite() {
            Self(percent.max(0.0))
        } else {
            Self(100.0)
        }
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    /// Multiplier applied to each color channel.
    pub fn factor(self) -> f64 {
        self.0 / 100.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 100.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(100.0)
    }
}

/// Where a garment overlay sits on the final photo.
///
/// `scale = 1.0` makes the overlay exactly as wide as the canvas. `x` and `y`
/// are signed percentages of canvas width and height, applied after the
/// overlay's bottom-center is anchored to the canvas bottom-center. Nothing
/// here refers to absolute pixels, so the same placement reproduces the same
/// composition at any output size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl OverlayPlacement {
    pub const SCALE_RANGE: (f64, f64) = (0.5, 2.0);
    pub const X_RANGE: (f64, f64) = (-50.0, 50.0);
    pub const Y_RANGE: (f64, f64) = (-20.0, 50.0);

    pub fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// What gets drawn on top of the brightness-adjusted base.
///
/// An overlay without a placement (or the reverse) is not representable:
/// it is either both or neither.
#[derive(Debug, Clone, Copy)]
pub enum Composition<'a> {
    Plain,
    Overlaid {
        overlay: &'a Raster,
        placement: OverlayPlacement,
    },
}

impl<'a> Composition<'a> {
    /// Build from optional halves; anything short of both yields [`Composition::Plain`].
    pub fn from_parts(overlay: Option<&'a Raster>, placement: Option<OverlayPlacement>) -> Self {
        match (overlay, placement) {
            (Some(overlay), Some(placement)) => Composition::Overlaid { overlay, placement },
            _ => Composition::Plain,
        }
    }
}

/// Physical print sheet description.
///
/// Sizes are centimeters, converted to pixels at `dpi`. `columns × rows`
/// copies are placed, `gap_px` apart in both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    pub sheet_width_cm: f64,
    pub sheet_height_cm: f64,
    pub photo_width_cm: f64,
    pub photo_height_cm: f64,
    pub dpi: f64,
    pub columns: u32,
    pub rows: u32,
    pub gap_px: u32,
}

impl SheetSpec {
    /// Number of copies on the sheet, saturating at `u32::MAX`.
    pub fn copies(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }
}

impl Default for SheetSpec {
    /// A 15×10 cm (6×4 in) sheet holding eight 3×4 cm photos at 300 dpi.
    fn default() -> Self {
        Self {
            sheet_width_cm: 15.0,
            sheet_height_cm: 10.0,
            photo_width_cm: 3.0,
            photo_height_cm: 4.0,
            dpi: 300.0,
            columns: 4,
            rows: 2,
            gap_px: 20,
        }
    }
}
