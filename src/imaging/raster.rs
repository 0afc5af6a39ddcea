//! The decoded pixel grid every pipeline stage passes along.

use image::{DynamicImage, Rgba, RgbaImage};

/// Opaque white, the background of every canvas the pipeline creates.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// An immutable decoded image with known natural dimensions.
///
/// Pixels are always stored as RGBA8 so overlays keep their alpha channel
/// until they are composited. There is no mutable access: every operation
/// builds a new canvas and wraps it in a fresh `Raster`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: RgbaImage,
}

impl Raster {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl From<DynamicImage> for Raster {
    fn from(img: DynamicImage) -> Self {
        Self::from_rgba(img.into_rgba8())
    }
}

impl From<RgbaImage> for Raster {
    fn from(pixels: RgbaImage) -> Self {
        Self::from_rgba(pixels)
    }
}
