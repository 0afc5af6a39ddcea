//! Studio configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the config directory (the
//! current directory unless `--config-dir` is given).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! width = 708               # Single-photo resolution (pixels)
//! height = 944
//! quality = 95              # JPEG quality (1-100)
//!
//! [viewport]
//! width = 300               # Crop frame the offsets and zoom refer to
//! height = 400
//!
//! [sheet]
//! width_cm = 15.0           # Print sheet size
//! height_cm = 10.0
//! photo_width_cm = 3.0      # Size of each copy
//! photo_height_cm = 4.0
//! dpi = 300.0
//! columns = 4
//! rows = 2
//! gap_px = 20               # Space between copies
//!
//! [[overlays]]              # Garment catalog (replaces the stock list)
//! id = "real-suit-black"
//! name = "Executive Black"
//! src = "https://freepngimg.com/thumb/suit/2-suit-png-image.png"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! # Print on a 10x15 portrait sheet instead
//! [sheet]
//! width_cm = 10.0
//! height_cm = 15.0
//! columns = 2
//! rows = 3
//! ```
//!
//! Tables merge key by key. Arrays, including `[[overlays]]`, replace the
//! stock value as a whole. Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, SheetSpec, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest tolerated difference between the output and viewport aspect ratios.
const ASPECT_TOLERANCE: f64 = 0.01;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Studio configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Single-photo export settings.
    pub output: OutputConfig,
    /// Crop frame used by the CLI when no container size is given.
    pub viewport: ViewportConfig,
    /// Print sheet layout.
    pub sheet: SheetConfig,
    /// Garment overlay catalog.
    pub overlays: Vec<OverlayConfig>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            viewport: ViewportConfig::default(),
            sheet: SheetConfig::default(),
            overlays: default_overlays(),
        }
    }
}

impl StudioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(ConfigError::Validation(
                "output.width and output.height must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Validation(
                "viewport.width and viewport.height must be non-zero".into(),
            ));
        }
        self.check_aspect(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )?;
        self.sheet.validate()?;
        validate_overlays(&self.overlays)
    }

    /// Output quality as the encoder expects it.
    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }

    /// A centered, unzoomed viewport of the configured size.
    pub fn default_viewport(&self) -> Viewport {
        Viewport::centered(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }

    /// A centered, unzoomed viewport of `width × height`, which must share
    /// the output's aspect ratio.
    pub fn sized_viewport(&self, width: f64, height: f64) -> Result<Viewport, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Validation(format!(
                "viewport must have positive size, got {width}x{height}"
            )));
        }
        self.check_aspect(width, height)?;
        Ok(Viewport::centered(width, height))
    }

    fn check_aspect(&self, viewport_width: f64, viewport_height: f64) -> Result<(), ConfigError> {
        let output_aspect = f64::from(self.output.width) / f64::from(self.output.height);
        let viewport_aspect = viewport_width / viewport_height;
        if ((output_aspect - viewport_aspect) / viewport_aspect).abs() > ASPECT_TOLERANCE {
            return Err(ConfigError::Validation(format!(
                "output aspect ratio {output_aspect:.4} must match viewport aspect ratio \
                 {viewport_aspect:.4}"
            )));
        }
        Ok(())
    }

    pub fn find_overlay(&self, id: &str) -> Option<&OverlayConfig> {
        self.overlays.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 708,
            height: 944,
            quality: 95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub width_cm: f64,
    pub height_cm: f64,
    pub photo_width_cm: f64,
    pub photo_height_cm: f64,
    pub dpi: f64,
    pub columns: u32,
    pub rows: u32,
    pub gap_px: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig::from(SheetSpec::default())
    }
}

impl From<SheetSpec> for SheetConfig {
    fn from(spec: SheetSpec) -> Self {
        Self {
            width_cm: spec.sheet_width_cm,
            height_cm: spec.sheet_height_cm,
            photo_width_cm: spec.photo_width_cm,
            photo_height_cm: spec.photo_height_cm,
            dpi: spec.dpi,
            columns: spec.columns,
            rows: spec.rows,
            gap_px: spec.gap_px,
        }
    }
}

impl SheetConfig {
    pub fn to_sheet_spec(&self) -> SheetSpec {
        SheetSpec {
            sheet_width_cm: self.width_cm,
            sheet_height_cm: self.height_cm,
            photo_width_cm: self.photo_width_cm,
            photo_height_cm: self.photo_height_cm,
            dpi: self.dpi,
            columns: self.columns,
            rows: self.rows,
            gap_px: self.gap_px,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("sheet.width_cm", self.width_cm),
            ("sheet.height_cm", self.height_cm),
            ("sheet.photo_width_cm", self.photo_width_cm),
            ("sheet.photo_height_cm", self.photo_height_cm),
            ("sheet.dpi", self.dpi),
        ];
        for (key, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be positive, got {value}"
                )));
            }
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Validation(
                "sheet.columns and sheet.rows must be non-zero".into(),
            ));
        }
        crate::imaging::sheet_layout(&self.to_sheet_spec())
            .map_err(|e| ConfigError::Validation(format!("[sheet] {e}")))?;
        Ok(())
    }
}

/// One garment in the overlay catalog.
///
/// `src` is anything [`ImageSource::parse`](crate::imaging::ImageSource::parse)
/// understands: a URL, a data URL, or a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    pub id: String,
    pub name: String,
    pub src: String,
}

impl OverlayConfig {
    fn new(id: &str, name: &str, src: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            src: src.to_string(),
        }
    }
}

fn default_overlays() -> Vec<OverlayConfig> {
    const BASE: &str = "https://freepngimg.com/thumb/suit";
    [
        ("real-suit-black", "Executive Black", 2),
        ("real-suit-navy", "Navy Blue", 4),
        ("real-suit-grey", "Classic Grey", 3),
        ("real-suit-red-tie", "Red Tie", 6),
        ("real-suit-blue-tie", "Blue Tie", 12),
        ("real-suit-tux", "Tuxedo", 13),
        ("real-suit-pattern", "Patterned Grey", 5),
        ("real-suit-dark", "Modern Black", 15),
    ]
    .into_iter()
    .map(|(id, name, n)| OverlayConfig::new(id, name, &format!("{BASE}/{n}-suit-png-image.png")))
    .collect()
}

fn validate_overlays(overlays: &[OverlayConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for overlay in overlays {
        if overlay.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "overlays[].id must not be empty".into(),
            ));
        }
        if overlay.src.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "overlay '{}' has an empty src",
                overlay.id
            )));
        }
        if !seen.insert(overlay.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate overlay id '{}'",
                overlay.id
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(StudioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<StudioConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match load_raw_config(dir)? {
        Some(user) => merge_toml(base, user),
        None => base,
    };
    let config: StudioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# ID Photo Studio Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Single photo
# ---------------------------------------------------------------------------
[output]
# Resolution of the cropped photo. 708x944 is a 3x4 cm photo at 600 dpi.
# The aspect ratio must match [viewport].
width = 708
height = 944

# JPEG quality (1 = worst, 100 = best).
quality = 95

# ---------------------------------------------------------------------------
# Crop frame
# ---------------------------------------------------------------------------
[viewport]
# Size of the frame that --offset-x/--offset-y/--zoom are measured in.
width = 300
height = 400

# ---------------------------------------------------------------------------
# Print sheet
# ---------------------------------------------------------------------------
[sheet]
# Physical sheet size. 15x10 cm is a standard 6x4 in photo print.
width_cm = 15.0
height_cm = 10.0

# Size of each copy on the sheet.
photo_width_cm = 3.0
photo_height_cm = 4.0

# Print resolution used to convert centimeters to pixels.
dpi = 300.0

# Grid of copies, centered on the sheet.
columns = 4
rows = 2

# Space between neighbouring copies, in pixels.
gap_px = 20

# ---------------------------------------------------------------------------
# Garment overlays
# ---------------------------------------------------------------------------
# Transparent PNGs drawn over the bottom of the photo. `src` may be a URL,
# a data URL, or a file path. Listing any overlay replaces the whole catalog.
[[overlays]]
id = "real-suit-black"
name = "Executive Black"
src = "https://freepngimg.com/thumb/suit/2-suit-png-image.png"

[[overlays]]
id = "real-suit-navy"
name = "Navy Blue"
src = "https://freepngimg.com/thumb/suit/4-suit-png-image.png"

[[overlays]]
id = "real-suit-grey"
name = "Classic Grey"
src = "https://freepngimg.com/thumb/suit/3-suit-png-image.png"

[[overlays]]
id = "real-suit-red-tie"
name = "Red Tie"
src = "https://freepngimg.com/thumb/suit/6-suit-png-image.png"

[[overlays]]
id = "real-suit-blue-tie"
name = "Blue Tie"
src = "https://freepngimg.com/thumb/suit/12-suit-png-image.png"

[[overlays]]
id = "real-suit-tux"
name = "Tuxedo"
src = "https://freepngimg.com/thumb/suit/13-suit-png-image.png"

[[overlays]]
id = "real-suit-pattern"
name = "Patterned Grey"
src = "https://freepngimg.com/thumb/suit/5-suit-png-image.png"

[[overlays]]
id = "real-suit-dark"
name = "Modern Black"
src = "https://freepngimg.com/thumb/suit/15-suit-png-image.png"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        fs::write(dir.path().join("config.toml"), content).unwrap();
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn default_config_has_output_settings() {
        let config = StudioConfig::default();
        assert_eq!(config.output.width, 708);
        assert_eq!(config.output.height, 944);
        assert_eq!(config.quality(), Quality::new(95));
    }

    #[test]
    fn default_sheet_matches_reference_layout() {
        let spec = StudioConfig::default().sheet.to_sheet_spec();
        assert_eq!(spec, SheetSpec::default());
        assert_eq!(spec.copies(), 8);
    }

    #[test]
    fn default_catalog_has_eight_garments() {
        let config = StudioConfig::default();
        assert_eq!(config.overlays.len(), 8);
        let tux = config.find_overlay("real-suit-tux").unwrap();
        assert_eq!(tux.name, "Tuxedo");
        assert_eq!(
            tux.src,
            "https://freepngimg.com/thumb/suit/13-suit-png-image.png"
        );
        assert!(config.find_overlay("missing").is_none());
    }

    #[test]
    fn default_viewport_is_centered() {
        let vp = StudioConfig::default().default_viewport();
        assert_eq!(vp, Viewport::centered(300.0, 400.0));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(StudioConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_quality_bounds() {
        let mut config = StudioConfig::default();
        config.output.quality = 100;
        assert!(config.validate().is_ok());
        config.output.quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.output.quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_aspect_mismatch() {
        let mut config = StudioConfig::default();
        config.output.width = 944;
        config.output.height = 708;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("aspect ratio"));
    }

    #[test]
    fn validate_aspect_within_tolerance() {
        let mut config = StudioConfig::default();
        // 709/944 vs 0.75 is off by ~0.1%
        config.output.width = 709;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sized_viewport_checks_output_aspect() {
        let config = StudioConfig::default();
        let viewport = config.sized_viewport(150.0, 200.0).unwrap();
        assert_eq!(viewport, Viewport::centered(150.0, 200.0));

        let err = config.sized_viewport(400.0, 300.0).unwrap_err();
        assert!(err.to_string().contains("aspect ratio"));
        assert!(matches!(
            config.sized_viewport(0.0, 400.0),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_zero_viewport() {
        let mut config = StudioConfig::default();
        config.viewport.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_sheet_values() {
        let mut config = StudioConfig::default();
        config.sheet.dpi = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = StudioConfig::default();
        config.sheet.rows = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_sheet_grid_must_fit() {
        let mut config = StudioConfig::default();
        config.sheet.columns = 6;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("does not fit"));

        let mut config = StudioConfig::default();
        config.sheet.gap_px = u32::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_duplicate_overlay_ids() {
        let mut config = StudioConfig::default();
        let first = config.overlays[0].clone();
        config.overlays.push(first);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate overlay id"));
    }

    #[test]
    fn validate_empty_overlay_id() {
        let mut config = StudioConfig::default();
        config.overlays[0].id = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let mut config = StudioConfig::default();
        config.overlays.clear();
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[sheet]\ncolumns = 4\nrows = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[sheet]\nrows = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["sheet"]["columns"].as_integer(), Some(4));
        assert_eq!(merged["sheet"]["rows"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_array_replaces() {
        let base: toml::Value =
            toml::from_str("[[overlays]]\nid = \"a\"\n[[overlays]]\nid = \"b\"").unwrap();
        let overlay: toml::Value = toml::from_str("[[overlays]]\nid = \"c\"").unwrap();
        let merged = merge_toml(base, overlay);
        let overlays = merged["overlays"].as_array().unwrap();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0]["id"].as_str(), Some("c"));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output.width, 708);
        assert_eq!(config.overlays.len(), 8);
    }

    #[test]
    fn load_config_reads_partial_file() {
        let tmp = TempDir::new().unwrap();
        write_config(
            &tmp,
            r#"
[output]
quality = 80

[sheet]
gap_px = 10
"#,
        );
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output.quality, 80);
        assert_eq!(config.output.width, 708);
        assert_eq!(config.sheet.gap_px, 10);
        assert_eq!(config.sheet.columns, 4);
    }

    #[test]
    fn load_config_accepts_integer_lengths() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[sheet]\nwidth_cm = 15\ndpi = 600\n");
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.sheet.width_cm, 15.0);
        assert_eq!(config.sheet.dpi, 600.0);
    }

    #[test]
    fn load_config_replaces_catalog() {
        let tmp = TempDir::new().unwrap();
        write_config(
            &tmp,
            r#"
[[overlays]]
id = "mine"
name = "My Suit"
src = "suits/mine.png"
"#,
        );
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.overlays.len(), 1);
        assert_eq!(config.find_overlay("mine").unwrap().src, "suits/mine.png");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[output\nwidth = 1");
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[output]\nqualty = 90\n");
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_overlay_key_rejected() {
        let tmp = TempDir::new().unwrap();
        write_config(
            &tmp,
            "[[overlays]]\nid = \"x\"\nname = \"X\"\nsrc = \"x.png\"\ncolor = \"red\"\n",
        );
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[output]\nquality = 0\n");
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: StudioConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = StudioConfig::default();
        assert_eq!(config.output.width, defaults.output.width);
        assert_eq!(config.output.quality, defaults.output.quality);
        assert_eq!(config.viewport.width, defaults.viewport.width);
        assert_eq!(config.sheet.to_sheet_spec(), defaults.sheet.to_sheet_spec());
        assert_eq!(config.overlays, defaults.overlays);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        for section in ["output", "viewport", "sheet", "overlays"] {
            assert!(value.get(section).is_some(), "missing {section}");
        }
    }
}
