//! CLI output formatting for every command.
//!
//! Each artifact leads with what it is and its pixel size, then shows where it
//! went and the inputs that shaped it as indented context lines:
//!
//! ```text
//! Photo 708x944 → out/photo-3x4-single.jpg
//!     Source: me.jpg
//!     Viewport: 300x400, zoom 1.20, offset (-4, 12)
//!     Size: 143.2 KB
//! ```
//!
//! ```text
//! Sheet 1772x1181 → out/photo-3x4-sheet-8.jpg
//!     Grid: 4x2 copies of 354x472, gap 20px
//!     Size: 612.9 KB
//! ```
//!
//! ```text
//! 001 Executive Black (real-suit-black)
//!     Source: https://freepngimg.com/thumb/suit/2-suit-png-image.png
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::OverlayConfig;
use crate::imaging::geometry::SheetLayout;
use crate::imaging::{Brightness, EncodedImage, OverlayPlacement, Viewport};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count.
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Trim trailing zeros so `12.0` prints as `12` and `-4.50` as `-4.5`.
fn format_number(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Header line for an encoded artifact.
///
/// ```text
/// Photo 708x944 → out/photo.jpg
/// ```
fn artifact_header(label: &str, image: &EncodedImage, destination: &Path) -> String {
    format!(
        "{} {}x{} \u{2192} {}",
        label,
        image.width,
        image.height,
        destination.display()
    )
}

fn size_line(image: &EncodedImage) -> String {
    format!("    Size: {}", format_size(image.bytes.len()))
}

fn viewport_line(viewport: &Viewport) -> String {
    format!(
        "    Viewport: {}x{}, zoom {:.2}, offset ({}, {})",
        format_number(viewport.container_width),
        format_number(viewport.container_height),
        viewport.zoom,
        format_number(viewport.offset.x),
        format_number(viewport.offset.y)
    )
}

fn adjustment_lines(
    brightness: Brightness,
    overlay: Option<(&str, &OverlayPlacement)>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "    Brightness: {}%",
        format_number(brightness.percent())
    )];
    if let Some((name, placement)) = overlay {
        lines.push(format!(
            "    Overlay: {}, scale {:.2}, x {}%, y {}%",
            name,
            placement.scale,
            format_number(placement.x),
            format_number(placement.y)
        ));
    }
    lines
}

// ============================================================================
// crop
// ============================================================================

/// Format the result of cropping a source through a viewport.
pub fn format_crop(
    source: &str,
    viewport: &Viewport,
    image: &EncodedImage,
    destination: &Path,
) -> Vec<String> {
    vec![
        artifact_header("Photo", image, destination),
        format!("    Source: {}", source),
        viewport_line(viewport),
        size_line(image),
    ]
}

pub fn print_crop(source: &str, viewport: &Viewport, image: &EncodedImage, destination: &Path) {
    print_lines(format_crop(source, viewport, image, destination));
}

// ============================================================================
// compose
// ============================================================================

/// Format the result of composing a base with brightness and an optional overlay.
///
/// `overlay` is the display name of the garment and its placement.
pub fn format_compose(
    source: &str,
    brightness: Brightness,
    overlay: Option<(&str, &OverlayPlacement)>,
    image: &EncodedImage,
    destination: &Path,
) -> Vec<String> {
    let mut lines = vec![
        artifact_header("Photo", image, destination),
        format!("    Source: {}", source),
    ];
    lines.extend(adjustment_lines(brightness, overlay));
    lines.push(size_line(image));
    lines
}

pub fn print_compose(
    source: &str,
    brightness: Brightness,
    overlay: Option<(&str, &OverlayPlacement)>,
    image: &EncodedImage,
    destination: &Path,
) {
    print_lines(format_compose(source, brightness, overlay, image, destination));
}

// ============================================================================
// sheet
// ============================================================================

/// Format the result of tiling a photo onto a print sheet.
pub fn format_sheet(layout: &SheetLayout, image: &EncodedImage, destination: &Path) -> Vec<String> {
    vec![
        artifact_header("Sheet", image, destination),
        format!(
            "    Grid: {}x{} copies of {}x{}, gap {}px",
            layout.columns, layout.rows, layout.photo_width, layout.photo_height, layout.gap
        ),
        size_line(image),
    ]
}

pub fn print_sheet(layout: &SheetLayout, image: &EncodedImage, destination: &Path) {
    print_lines(format_sheet(layout, image, destination));
}

// ============================================================================
// export
// ============================================================================

/// Format a full export: the single photo and, when produced, the sheet.
pub fn format_export(
    single: (&EncodedImage, &Path),
    sheet: Option<(&SheetLayout, &EncodedImage, &Path)>,
) -> Vec<String> {
    let (photo, photo_path) = single;
    let mut lines = vec![
        artifact_header("Photo", photo, photo_path),
        size_line(photo),
    ];
    let mut count = 1;
    if let Some((layout, image, path)) = sheet {
        lines.extend(format_sheet(layout, image, path));
        count += 1;
    }
    lines.push(String::new());
    lines.push(format!(
        "Exported {} file{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_export(
    single: (&EncodedImage, &Path),
    sheet: Option<(&SheetLayout, &EncodedImage, &Path)>,
) {
    print_lines(format_export(single, sheet));
}

// ============================================================================
// overlays
// ============================================================================

/// Format the garment catalog, one entry per overlay.
pub fn format_overlays(overlays: &[OverlayConfig]) -> Vec<String> {
    if overlays.is_empty() {
        return vec!["No overlays configured".to_string()];
    }
    let mut lines = Vec::new();
    for (i, overlay) in overlays.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            overlay.name,
            overlay.id
        ));
        lines.push(format!("    Source: {}", overlay.src));
    }
    lines
}

pub fn print_overlays(overlays: &[OverlayConfig]) {
    print_lines(format_overlays(overlays));
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{Point, SheetSpec, sheet_layout};
    use std::path::PathBuf;

    fn encoded(width: u32, height: u32, size: usize) -> EncodedImage {
        EncodedImage {
            mime: "image/jpeg",
            bytes: vec![0; size],
            width,
            height,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[test]
    fn format_number_trims_zeros() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-4.5), "-4.5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-0.0), "0");
    }

    // =========================================================================
    // Command output
    // =========================================================================

    #[test]
    fn crop_output() {
        let vp = Viewport::centered(300.0, 400.0)
            .with_zoom(1.2)
            .with_offset(Point::new(-4.0, 12.0));
        let lines = format_crop(
            "me.jpg",
            &vp,
            &encoded(708, 944, 2048),
            &PathBuf::from("out/photo.jpg"),
        );
        assert_eq!(
            lines,
            vec![
                "Photo 708x944 \u{2192} out/photo.jpg",
                "    Source: me.jpg",
                "    Viewport: 300x400, zoom 1.20, offset (-4, 12)",
                "    Size: 2.0 KB",
            ]
        );
    }

    #[test]
    fn compose_output_without_overlay() {
        let lines = format_compose(
            "base.jpg",
            Brightness::new(110.0),
            None,
            &encoded(708, 944, 100),
            &PathBuf::from("final.jpg"),
        );
        assert_eq!(lines[2], "    Brightness: 110%");
        assert!(!lines.iter().any(|l| l.contains("Overlay")));
    }

    #[test]
    fn compose_output_with_overlay() {
        let placement = OverlayPlacement::new(1.1, -2.5, 10.0);
        let lines = format_compose(
            "base.jpg",
            Brightness::default(),
            Some(("Tuxedo", &placement)),
            &encoded(708, 944, 100),
            &PathBuf::from("final.jpg"),
        );
        assert!(lines.contains(&"    Overlay: Tuxedo, scale 1.10, x -2.5%, y 10%".to_string()));
    }

    #[test]
    fn sheet_output() {
        let layout = sheet_layout(&SheetSpec::default()).unwrap();
        let lines = format_sheet(
            &layout,
            &encoded(1772, 1181, 10),
            &PathBuf::from("sheet.jpg"),
        );
        assert_eq!(lines[0], "Sheet 1772x1181 \u{2192} sheet.jpg");
        assert_eq!(lines[1], "    Grid: 4x2 copies of 354x472, gap 20px");
    }

    #[test]
    fn export_output_counts_files() {
        let photo = encoded(708, 944, 10);
        let photo_path = PathBuf::from("out/photo-3x4-single.jpg");

        let single_only = format_export((&photo, &photo_path), None);
        assert_eq!(single_only.last().unwrap(), "Exported 1 file");

        let layout = sheet_layout(&SheetSpec::default()).unwrap();
        let sheet = encoded(1772, 1181, 10);
        let sheet_path = PathBuf::from("out/photo-3x4-sheet-8.jpg");
        let both = format_export((&photo, &photo_path), Some((&layout, &sheet, &sheet_path)));
        assert_eq!(both.last().unwrap(), "Exported 2 files");
        assert!(both.iter().any(|l| l.starts_with("Sheet 1772x1181")));
    }

    #[test]
    fn overlays_output() {
        let overlays = vec![OverlayConfig {
            id: "real-suit-tux".into(),
            name: "Tuxedo".into(),
            src: "suits/tux.png".into(),
        }];
        assert_eq!(
            format_overlays(&overlays),
            vec!["001 Tuxedo (real-suit-tux)", "    Source: suits/tux.png"]
        );
        assert_eq!(format_overlays(&[]), vec!["No overlays configured"]);
    }
}
