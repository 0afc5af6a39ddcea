//! Raster primitives shared by the pipeline stages.
//!
//! | Primitive | Crate / function |
//! |---|---|
//! | White canvas | `RgbaImage::from_pixel` |
//! | Scaled draw at a float rectangle | `crop_imm` + `resize` (Lanczos3) + `overlay` |
//! | Brightness | per-row `rayon` pass over the raw buffer |
//! | Cell border | `imageproc::drawing::draw_hollow_rect_mut` |
//!
//! Drawing follows canvas semantics: a float rectangle is snapped to the
//! pixel grid by rounding its edges, the source is resampled to exactly that
//! size, alpha-composited over what is already there, and clipped to the
//! canvas. Only the part of the source that can land on the canvas is
//! resampled, so a heavily zoomed crop never materializes the full zoomed
//! image.

use super::error::{ImagingError, check_surface};
use super::geometry::DrawRect;
use super::params::Brightness;
use super::raster::WHITE;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use rayon::prelude::*;

/// Lanczos3 kernel radius in output pixels. Source pixels within this
/// radius of the visible region are kept so edges see real neighbours.
const RESAMPLE_MARGIN: f64 = 3.0;

/// A new canvas filled with opaque white.
pub fn white_canvas(width: u32, height: u32) -> Result<RgbaImage, ImagingError> {
    check_surface(width, height)?;
    Ok(RgbaImage::from_pixel(width, height, WHITE))
}

/// Draw `source` stretched into `rect` on `canvas`.
///
/// Parts of `rect` outside the canvas are ignored; a rectangle that misses
/// the canvas entirely draws nothing.
pub fn draw_image(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    rect: &DrawRect,
) -> Result<(), ImagingError> {
    let target = rect.snapped();
    let (canvas_w, canvas_h) = canvas.dimensions();
    if !target.touches_canvas(canvas_w, canvas_h) || source.width() == 0 || source.height() == 0
    {
        return Ok(());
    }

    let Some(x_span) = visible_span(target.x, target.width, canvas_w, source.width()) else {
        return Ok(());
    };
    let Some(y_span) = visible_span(target.y, target.height, canvas_h, source.height()) else {
        return Ok(());
    };

    let sub_rect = DrawRect {
        x: x_span.target_start,
        y: y_span.target_start,
        width: x_span.target_len,
        height: y_span.target_len,
    }
    .snapped();
    if sub_rect.is_empty() {
        return Ok(());
    }
    check_surface(sub_rect.width, sub_rect.height)?;

    let cropped = imageops::crop_imm(
        source,
        x_span.source_start,
        y_span.source_start,
        x_span.source_len,
        y_span.source_len,
    )
    .to_image();
    let layer = if cropped.dimensions() == (sub_rect.width, sub_rect.height) {
        cropped
    } else {
        imageops::resize(
            &cropped,
            sub_rect.width,
            sub_rect.height,
            FilterType::Lanczos3,
        )
    };
    imageops::overlay(canvas, &layer, sub_rect.x, sub_rect.y);
    Ok(())
}

/// One axis of the source region needed to paint the visible part of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    source_start: u32,
    source_len: u32,
    /// Where that source region lands on the canvas, in float pixels.
    target_start: f64,
    target_len: f64,
}

/// Map the visible part of a `target_len` run starting at `origin` back onto
/// a `source_len` axis. `None` when nothing of the run is on the canvas.
fn visible_span(origin: i64, target_len: u32, canvas_len: u32, source_len: u32) -> Option<Span> {
    let visible_start = origin.max(0);
    let visible_end = (origin + i64::from(target_len)).min(i64::from(canvas_len));
    if visible_start >= visible_end || target_len == 0 {
        return None;
    }

    let scale = f64::from(source_len) / f64::from(target_len);
    let margin = resample_margin(scale, canvas_len);
    let source_len = i64::from(source_len);
    let start = ((visible_start - origin) as f64 * scale).floor() as i64 - margin;
    let end = ((visible_end - origin) as f64 * scale).ceil() as i64 + margin;
    let start = start.clamp(0, source_len);
    let end = end.clamp(start, source_len);
    if start == end {
        return None;
    }

    Some(Span {
        source_start: start as u32,
        source_len: (end - start) as u32,
        target_start: origin as f64 + start as f64 / scale,
        target_len: (end - start) as f64 / scale,
    })
}

/// Source pixels to keep on each side of the visible region.
///
/// Downsampling (`scale > 1`) widens the kernel in source pixels. When
/// upsampling, the margin is capped so it never spans more than a canvas
/// length once resampled.
fn resample_margin(scale: f64, canvas_len: u32) -> i64 {
    if scale >= 1.0 {
        (RESAMPLE_MARGIN * scale).ceil() as i64
    } else {
        RESAMPLE_MARGIN.min((f64::from(canvas_len) * scale).floor()) as i64
    }
}

/// Scale every color channel by the brightness factor, truncating and
/// clamping to 0..=255. Alpha is left alone. 100% returns an exact copy.
pub fn adjust_brightness(image: &RgbaImage, brightness: Brightness) -> RgbaImage {
    if brightness.is_identity() {
        return image.clone();
    }

    let factor = brightness.factor();
    let (width, height) = image.dimensions();
    let stride = width as usize * 4;
    let mut out = image.clone().into_raw();

    if stride > 0 {
        out.par_chunks_mut(stride).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                for channel in &mut px[..3] {
                    *channel = (f64::from(*channel) * factor).clamp(0.0, 255.0) as u8;
                }
            }
        });
    }

    RgbaImage::from_raw(width, height, out).unwrap_or_else(|| RgbaImage::new(width, height))
}

/// Stroke the outline of `rect` with a line `line_width` pixels wide,
/// centered on the rectangle's edge.
pub fn stroke_rect(canvas: &mut RgbaImage, rect: &DrawRect, line_width: u32, color: Rgba<u8>) {
    let target = rect.snapped();
    let half = i64::from(line_width / 2);

    for i in 0..i64::from(line_width) {
        let inset = i - half;
        let width = i64::from(target.width) - 2 * inset;
        let height = i64::from(target.height) - 2 * inset;
        if width <= 0 || height <= 0 {
            continue;
        }
        let ring = Rect::at((target.x + inset) as i32, (target.y + inset) as i32)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, ring, color);
    }
}
