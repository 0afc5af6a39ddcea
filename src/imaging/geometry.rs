//! Pure geometry for the pipeline stages.
//!
//! All functions here are pure and testable without any I/O or images. They
//! answer "where does this go and how big is it"; the raster code in
//! [`draw`](super::draw) only consumes the rectangles they return.
//!
//! Inputs are assumed to be validated by the caller (see
//! [`operations`](super::operations)): dimensions are positive and finite.

use super::params::{OverlayPlacement, SheetSpec, Viewport};

const CM_PER_INCH: f64 = 2.54;

/// Tolerance for edge comparisons, far below one pixel.
const EDGE_EPSILON: f64 = 1e-6;

/// A rectangle in canvas pixels with sub-pixel precision.
///
/// May extend past any edge of the canvas, or lie entirely outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle covers the whole `width × height` canvas.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x <= EDGE_EPSILON
            && self.y <= EDGE_EPSILON
            && self.right() >= f64::from(width) - EDGE_EPSILON
            && self.bottom() >= f64::from(height) - EDGE_EPSILON
    }

    pub fn intersects(&self, other: &DrawRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Snap to whole pixels by rounding each edge.
    ///
    /// Rounding edges (not origin + size) keeps adjacent rectangles from
    /// gaining or losing a pixel between them.
    pub fn snapped(&self) -> PixelRect {
        let x0 = self.x.round() as i64;
        let y0 = self.y.round() as i64;
        let x1 = self.right().round() as i64;
        let y1 = self.bottom().round() as i64;
        PixelRect {
            x: x0,
            y: y0,
            width: (x1 - x0).clamp(0, i64::from(u32::MAX)) as u32,
            height: (y1 - y0).clamp(0, i64::from(u32::MAX)) as u32,
        }
    }
}

/// A rectangle snapped to the pixel grid. The origin may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether any pixel of the rectangle lands on a `width × height` canvas.
    pub fn touches_canvas(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.x < i64::from(width)
            && self.y < i64::from(height)
            && self.x + i64::from(self.width) > 0
            && self.y + i64::from(self.height) > 0
    }
}

/// Scale at which `source` exactly covers `container` ("cover" fit).
///
/// One axis matches the container, the other overflows it.
///
/// ```
/// # use idphoto::imaging::geometry::cover_scale;
/// // 1000×1500 into 300×400: width is the binding axis
/// assert_eq!(cover_scale((1000, 1500), (300.0, 400.0)), 0.3);
/// ```
pub fn cover_scale(source: (u32, u32), container: (f64, f64)) -> f64 {
    let (src_w, src_h) = source;
    let (cont_w, cont_h) = container;
    let scale_x = cont_w / f64::from(src_w);
    let scale_y = cont_h / f64::from(src_h);
    scale_x.max(scale_y)
}

/// Where the source image lands on the output canvas for a given viewport.
///
/// Computes the image's on-screen rectangle inside the container (cover fit ×
/// zoom, centered and then panned by `offset`) and scales it uniformly by
/// `output_width / container_width`. The output canvas is assumed to share
/// the container's aspect ratio.
pub fn viewport_draw_rect(source: (u32, u32), viewport: &Viewport, output_width: u32) -> DrawRect {
    let (src_w, src_h) = source;
    let cont = (viewport.container_width, viewport.container_height);

    let scale = cover_scale(source, cont) * viewport.zoom;
    let displayed_w = f64::from(src_w) * scale;
    let displayed_h = f64::from(src_h) * scale;

    let center_x = cont.0 / 2.0 + viewport.offset.x;
    let center_y = cont.1 / 2.0 + viewport.offset.y;

    let render_scale = f64::from(output_width) / cont.0;

    DrawRect {
        x: (center_x - displayed_w / 2.0) * render_scale,
        y: (center_y - displayed_h / 2.0) * render_scale,
        width: displayed_w * render_scale,
        height: displayed_h * render_scale,
    }
}

/// Where an overlay lands on a `canvas`-sized photo.
///
/// Width is `canvas_width × scale`, height follows the overlay's own aspect
/// ratio. The bottom-center is anchored to the canvas bottom-center, then
/// shifted by the placement's percentages. The result is not clamped.
pub fn overlay_draw_rect(
    canvas: (u32, u32),
    overlay: (u32, u32),
    placement: &OverlayPlacement,
) -> DrawRect {
    let canvas_w = f64::from(canvas.0);
    let canvas_h = f64::from(canvas.1);

    let width = canvas_w * placement.scale;
    let height = width * (f64::from(overlay.1) / f64::from(overlay.0));

    DrawRect {
        x: canvas_w / 2.0 - width / 2.0 + placement.x * canvas_w / 100.0,
        y: canvas_h - height + placement.y * canvas_h / 100.0,
        width,
        height,
    }
}

/// Convert a physical length to pixels at `dpi`, rounded to the nearest pixel.
///
/// ```
/// # use idphoto::imaging::geometry::cm_to_px;
/// assert_eq!(cm_to_px(15.0, 300.0), 1772);
/// assert_eq!(cm_to_px(3.0, 300.0), 354);
/// ```
pub fn cm_to_px(cm: f64, dpi: f64) -> u32 {
    (cm / CM_PER_INCH * dpi).round() as u32
}

/// Pixel layout of a print sheet.
///
/// The grid is centered, so `start_x`/`start_y` can land on half pixels when
/// the leftover space is odd.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub photo_width: u32,
    pub photo_height: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    pub start_x: f64,
    pub start_y: f64,
    pub columns: u32,
    pub rows: u32,
    pub gap: u32,
}

impl SheetLayout {
    /// Pixel layout for `spec`, or `None` when the grid size does not fit in
    /// a `u32`.
    pub fn compute(spec: &SheetSpec) -> Option<Self> {
        let canvas_width = cm_to_px(spec.sheet_width_cm, spec.dpi);
        let canvas_height = cm_to_px(spec.sheet_height_cm, spec.dpi);
        let photo_width = cm_to_px(spec.photo_width_cm, spec.dpi);
        let photo_height = cm_to_px(spec.photo_height_cm, spec.dpi);

        let grid_width = span(spec.columns, photo_width, spec.gap_px)?;
        let grid_height = span(spec.rows, photo_height, spec.gap_px)?;

        Some(Self {
            canvas_width,
            canvas_height,
            photo_width,
            photo_height,
            grid_width,
            grid_height,
            start_x: (f64::from(canvas_width) - f64::from(grid_width)) / 2.0,
            start_y: (f64::from(canvas_height) - f64::from(grid_height)) / 2.0,
            columns: spec.columns,
            rows: spec.rows,
            gap: spec.gap_px,
        })
    }

    /// Whether the grid fits on the canvas without clipping.
    pub fn fits(&self) -> bool {
        self.grid_width <= self.canvas_width && self.grid_height <= self.canvas_height
    }

    /// One rectangle per copy, row-major, top-left first.
    pub fn cells(&self) -> Vec<DrawRect> {
        let step_x = f64::from(self.photo_width) + f64::from(self.gap);
        let step_y = f64::from(self.photo_height) + f64::from(self.gap);

        (0..self.rows)
            .flat_map(|row| {
                (0..self.columns).map(move |col| DrawRect {
                    x: self.start_x + f64::from(col) * step_x,
                    y: self.start_y + f64::from(row) * step_y,
                    width: f64::from(self.photo_width),
                    height: f64::from(self.photo_height),
                })
            })
            .collect()
    }
}

/// Length of `count` cells of `cell` pixels with `gap` between neighbours.
fn span(count: u32, cell: u32, gap: u32) -> Option<u32> {
    if count == 0 {
        return Some(0);
    }
    count
        .checked_mul(cell)?
        .checked_add((count - 1).checked_mul(gap)?)
}
