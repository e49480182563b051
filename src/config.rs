//! Run configuration.
//!
//! Handles loading, validating, and merging `img2docx.toml` files. Stock
//! defaults are the base layer; a config file (the one in the input
//! directory, or one passed with `--config`) is merged on top, and CLI flags
//! are applied last by the binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [input]
//! extension = "png"          # Only files with this extension are bound (any case)
//!
//! [page]
//! width_inches = 8.0         # Usable page width
//! height_inches = 10.5       # Usable page height
//! dpi = 96.0                 # Pixels per inch assumed for source images
//! fit = "axis"               # "axis" or "contain"
//!
//! [output]
//! filename = "png_image_document.docx"
//! overwrite = true           # false = refuse to replace an existing document
//! ```
//!
//! Config files are sparse: override only what you need. Unknown keys are
//! rejected to catch typos early.

use crate::imaging::{FitMode, PageGeometry, is_readable_extension};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = "img2docx.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    pub input: InputConfig,
    pub page: PageConfig,
    pub output: OutputConfig,
}

/// Which files are picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Extension without the dot, matched case-insensitively.
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "png".to_string(),
        }
    }
}

/// Page area and fit policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: f64,
    pub fit: FitMode,
}

impl Default for PageConfig {
    fn default() -> Self {
        let geometry = PageGeometry::default();
        Self {
            width_inches: geometry.width_inches,
            height_inches: geometry.height_inches,
            dpi: geometry.dpi,
            fit: FitMode::default(),
        }
    }
}

impl PageConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width_inches: self.width_inches,
            height_inches: self.height_inches,
            dpi: self.dpi,
        }
    }
}

/// Where the document goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File name, created inside the input directory.
    pub filename: String,
    /// Replace an existing document of the same name.
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: "png_image_document.docx".to_string(),
            overwrite: true,
        }
    }
}

impl ComposeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.input.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "input.extension must be a bare extension like \"png\", got {ext:?}"
            )));
        }
        if !is_readable_extension(ext) {
            return Err(ConfigError::Validation(format!(
                "input.extension {ext:?} has no decoder (png, jpg, jpeg, tif, tiff, webp)"
            )));
        }

        for (name, value) in [
            ("page.width_inches", self.page.width_inches),
            ("page.height_inches", self.page.height_inches),
            ("page.dpi", self.page.dpi),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let name = &self.output.filename;
        if name.trim().is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::Validation(format!(
                "output.filename must be a plain file name, got {name:?}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ComposeConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
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

/// Read a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(file: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !file.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(file)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ComposeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ComposeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `img2docx.toml` from the input directory on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<ComposeConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Load a specific config file on top of stock defaults.
///
/// A missing file yields the defaults.
pub fn load_config_file(file: &Path) -> Result<ComposeConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(file)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `img2docx.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# img2docx configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as img2docx.toml inside the image folder, or pass it
# explicitly with --config. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Input selection
# ---------------------------------------------------------------------------
[input]
# Only files with this extension are added (compared case-insensitively).
# Supported: png, jpg, jpeg, tif, tiff, webp.
extension = "png"

# ---------------------------------------------------------------------------
# Page layout
# ---------------------------------------------------------------------------
[page]
# Usable area of one page, in inches (US Letter minus margins).
width_inches = 8.0
height_inches = 10.5

# Pixel density assumed for source images when converting to inches.
dpi = 96.0

# How images are scaled onto the page:
#   "axis"    - clamp only the long side; the other follows the aspect ratio.
#               Near-square portraits wider than the page can overflow it.
#   "contain" - additionally shrink until both sides fit.
fit = "axis"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Document name, written into the image folder.
filename = "png_image_document.docx"

# Replace an existing document with the same name. Set to false to refuse
# instead of overwriting.
overwrite = true
"##
}
