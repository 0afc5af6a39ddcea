//! High-level pipeline stages.
//!
//! These functions validate their inputs, ask [`geometry`](super::geometry)
//! where things go, and paint with [`draw`](super::draw). Each one takes every
//! input as a parameter and returns a new [`Raster`]; nothing is cached or
//! shared between calls.

use super::draw::{adjust_brightness, draw_image, stroke_rect, white_canvas};
use super::error::ImagingError;
use super::geometry::{DrawRect, SheetLayout, overlay_draw_rect, viewport_draw_rect};
use super::params::{Brightness, Composition, OverlayPlacement, SheetSpec, Viewport};
use super::raster::Raster;
use image::Rgba;
use tracing::{debug, warn};

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Color of the cutting guide stroked around each copy on a sheet.
pub const SHEET_BORDER_COLOR: Rgba<u8> = Rgba([0xe2, 0xe8, 0xf0, 0xff]);
/// Width of the cutting guide in pixels.
pub const SHEET_BORDER_WIDTH: u32 = 2;

/// Render what the crop viewport shows into a fixed-resolution image.
///
/// The output is exactly `output_width × output_height`. Offsets and zoom are
/// honored as given: a pan that drags the image away from an edge leaves that
/// part of the output white.
pub fn crop_to_output(
    source: &Raster,
    viewport: &Viewport,
    output_width: u32,
    output_height: u32,
) -> Result<Raster> {
    validate_viewport(viewport)?;
    if source.is_empty() {
        return Err(ImagingError::InvalidGeometry(
            "source image has no pixels".into(),
        ));
    }

    let mut canvas = white_canvas(output_width, output_height)?;
    let rect = viewport_draw_rect(source.dimensions(), viewport, output_width);
    debug!(
        source_w = source.width(),
        source_h = source.height(),
        zoom = viewport.zoom,
        offset_x = viewport.offset.x,
        offset_y = viewport.offset.y,
        x = rect.x,
        y = rect.y,
        w = rect.width,
        h = rect.height,
        "Mapping viewport onto output"
    );
    if !rect.covers(output_width, output_height) {
        warn!(
            output_width,
            output_height, "Source does not cover the output; uncovered area stays white"
        );
    }

    draw_image(&mut canvas, source.pixels(), &rect)?;
    Ok(Raster::from_rgba(canvas))
}

fn validate_viewport(viewport: &Viewport) -> Result<()> {
    let Viewport {
        container_width: w,
        container_height: h,
        zoom,
        offset,
    } = *viewport;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(ImagingError::InvalidGeometry(format!(
            "viewport container must have positive size, got {w}x{h}"
        )));
    }
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(ImagingError::InvalidGeometry(format!(
            "zoom must be positive, got {zoom}"
        )));
    }
    if !(offset.x.is_finite() && offset.y.is_finite()) {
        return Err(ImagingError::InvalidGeometry(format!(
            "offset must be finite, got ({}, {})",
            offset.x, offset.y
        )));
    }
    Ok(())
}

/// Merge the final photo: white background, brightness-adjusted base, and
/// for [`Composition::Overlaid`] the overlay anchored bottom-center.
///
/// The canvas is always the base's natural size.
pub fn compose(base: &Raster, brightness: Brightness, composition: &Composition) -> Result<Raster> {
    if base.is_empty() {
        return Err(ImagingError::InvalidGeometry("base image has no pixels".into()));
    }
    let (width, height) = base.dimensions();
    let mut canvas = white_canvas(width, height)?;

    let adjusted = adjust_brightness(base.pixels(), brightness);
    let full = DrawRect {
        x: 0.0,
        y: 0.0,
        width: f64::from(width),
        height: f64::from(height),
    };
    draw_image(&mut canvas, &adjusted, &full)?;

    match composition {
        Composition::Plain => {
            debug!(brightness = brightness.percent(), "Composed plain photo");
        }
        Composition::Overlaid { overlay, placement } => {
            validate_overlay(overlay, placement)?;
            let rect = overlay_draw_rect((width, height), overlay.dimensions(), placement);
            debug!(
                brightness = brightness.percent(),
                scale = placement.scale,
                x = rect.x,
                y = rect.y,
                w = rect.width,
                h = rect.height,
                "Composed photo with overlay"
            );
            draw_image(&mut canvas, overlay.pixels(), &rect)?;
        }
    }

    Ok(Raster::from_rgba(canvas))
}

fn validate_overlay(overlay: &Raster, placement: &OverlayPlacement) -> Result<()> {
    if overlay.is_empty() {
        return Err(ImagingError::InvalidGeometry(
            "overlay image has no pixels".into(),
        ));
    }
    if !(placement.scale.is_finite() && placement.scale > 0.0) {
        return Err(ImagingError::InvalidGeometry(format!(
            "overlay scale must be positive, got {}",
            placement.scale
        )));
    }
    if !(placement.x.is_finite() && placement.y.is_finite()) {
        return Err(ImagingError::InvalidGeometry(format!(
            "overlay offset must be finite, got ({}, {})",
            placement.x, placement.y
        )));
    }
    Ok(())
}

/// Lay out `columns × rows` copies of `photo` on a print sheet.
///
/// Each copy is stretched to the cell size and outlined with a thin cutting
/// guide. The canvas is the sheet's physical size at `spec.dpi`.
///
/// A grid that does not fit on the sheet is rejected with
/// [`ImagingError::InvalidGeometry`] instead of being drawn clipped.
pub fn tile(photo: &Raster, spec: &SheetSpec) -> Result<Raster> {
    let layout = sheet_layout(spec)?;
    if photo.is_empty() {
        return Err(ImagingError::InvalidGeometry("photo has no pixels".into()));
    }

    let mut canvas = white_canvas(layout.canvas_width, layout.canvas_height)?;
    let cells = layout.cells();
    debug!(
        canvas_w = layout.canvas_width,
        canvas_h = layout.canvas_height,
        cell_w = layout.photo_width,
        cell_h = layout.photo_height,
        copies = cells.len(),
        "Tiling sheet"
    );

    for cell in &cells {
        draw_image(&mut canvas, photo.pixels(), cell)?;
        stroke_rect(&mut canvas, cell, SHEET_BORDER_WIDTH, SHEET_BORDER_COLOR);
    }

    Ok(Raster::from_rgba(canvas))
}

/// Validate a sheet description and compute its pixel layout.
pub fn sheet_layout(spec: &SheetSpec) -> Result<SheetLayout> {
    let lengths = [
        ("sheet width", spec.sheet_width_cm),
        ("sheet height", spec.sheet_height_cm),
        ("photo width", spec.photo_width_cm),
        ("photo height", spec.photo_height_cm),
        ("dpi", spec.dpi),
    ];
    for (name, value) in lengths {
        if !(value.is_finite() && value > 0.0) {
            return Err(ImagingError::InvalidGeometry(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }
    if spec.columns == 0 || spec.rows == 0 {
        return Err(ImagingError::InvalidGeometry(format!(
            "sheet grid must have at least one cell, got {}x{}",
            spec.columns, spec.rows
        )));
    }

    let layout = SheetLayout::compute(spec).ok_or_else(|| {
        ImagingError::InvalidGeometry(format!(
            "{}x{} grid with a {}px gap is too large to lay out",
            spec.columns, spec.rows, spec.gap_px
        ))
    })?;
    if layout.photo_width == 0 || layout.photo_height == 0 {
        return Err(ImagingError::InvalidGeometry(format!(
            "photo of {}x{} cm is smaller than a pixel at {} dpi",
            spec.photo_width_cm, spec.photo_height_cm, spec.dpi
        )));
    }
    if !layout.fits() {
        return Err(ImagingError::InvalidGeometry(format!(
            "{}x{} grid ({}x{} px) does not fit on a {}x{} px sheet",
            layout.columns,
            layout.rows,
            layout.grid_width,
            layout.grid_height,
            layout.canvas_width,
            layout.canvas_height
        )));
    }
    Ok(layout)
}
