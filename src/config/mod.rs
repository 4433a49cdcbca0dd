//! Configuration file support for vectorpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vectorpad/config.toml`. Settings include drawing defaults,
//! the drawing surface extent, undo depth, file storage and enabled plugins.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, StorageCompression};
pub use types::{CanvasConfig, DrawingConfig, HistoryConfig, PluginsConfig, StorageConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_STROKE_WIDTH: f64 = 100.0;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_kind = "Polygon"
/// stroke_color = "blue"
/// fill_color = "#4000FF00"
/// stroke_width = 3.0
///
/// [canvas]
/// width = 1280
/// height = 720
///
/// [history]
/// max_undo = 200
///
/// [storage]
/// compress = "auto"
/// keep_backup = true
///
/// [plugins]
/// enabled = ["Trapezoid"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Shape kind and paint defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Drawing surface extent
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Drawing file storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Plugin shape kinds
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to their
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke_width`: 0.0 - 100.0
    /// - `canvas.width`, `canvas.height`: at least 1
    /// - `max_file_size_mb`, `auto_compress_threshold_kb`: at least 1
    pub fn validate_and_clamp(&mut self) {
        // Stroke width: 0.0 - 100.0
        if !(0.0..=MAX_STROKE_WIDTH).contains(&self.drawing.stroke_width) {
            warn!(
                "Invalid stroke_width {:.1}, clamping to 0.0-{MAX_STROKE_WIDTH:.1} range",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = if self.drawing.stroke_width.is_nan() {
                types::default_stroke_width()
            } else {
                self.drawing.stroke_width.clamp(0.0, MAX_STROKE_WIDTH)
            };
        }

        if self.drawing.stroke_color.to_color().is_none() {
            warn!(
                "Invalid stroke_color {:?}, falling back to the default",
                self.drawing.stroke_color
            );
            self.drawing.stroke_color = types::default_stroke_color();
        }

        if self.drawing.fill_color.to_color().is_none() {
            warn!(
                "Invalid fill_color {:?}, falling back to the default",
                self.drawing.fill_color
            );
            self.drawing.fill_color = types::default_fill_color();
        }

        if self.drawing.default_kind.trim().is_empty() {
            warn!("Empty default_kind, falling back to 'Rectangle'");
            self.drawing.default_kind = types::default_kind();
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            warn!(
                "Invalid canvas size {}x{}, using at least 1x1",
                self.canvas.width, self.canvas.height
            );
            self.canvas.width = self.canvas.width.max(1);
            self.canvas.height = self.canvas.height.max(1);
        }

        if self.storage.max_file_size_mb == 0 {
            warn!("Invalid max_file_size_mb 0, using 1");
            self.storage.max_file_size_mb = 1;
        }

        if self.storage.auto_compress_threshold_kb == 0 {
            warn!("Invalid auto_compress_threshold_kb 0, using 1");
            self.storage.auto_compress_threshold_kb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vectorpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vectorpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`, creating the
    /// parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists at the target path or it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, DEFAULT_FILL};

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.drawing.default_kind, "Rectangle");
        assert_eq!(config.drawing.stroke_width, 2.0);
        assert_eq!(config.canvas.width, 1920);
        assert_eq!(config.history.max_undo, 0);
        assert_eq!(config.storage.compress, StorageCompression::Off);
        assert_eq!(config.plugins.enabled, vec!["Trapezoid".to_string()]);
        assert_eq!(config.drawing.style().fill, DEFAULT_FILL);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            stroke_width = -4.0
            stroke_color = "chartreuse"

            [canvas]
            width = 0
            height = 600

            [storage]
            max_file_size_mb = 0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.stroke_width, 0.0);
        assert_eq!(config.drawing.stroke_color, types::default_stroke_color());
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.storage.max_file_size_mb, 1);
    }

    #[test]
    fn drawing_style_reads_all_color_forms() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            stroke_color = [0, 0, 255]
            fill_color = "#40FF0000"
            stroke_width = 5.0
            "##,
        )
        .unwrap();
        let style = config.drawing.style();
        assert_eq!(style.stroke, Color::rgb(0, 0, 255));
        assert_eq!(style.fill, Color::new(255, 0, 0, 0x40));
        assert_eq!(style.stroke_width, 5.0);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.canvas.height, 1080);
    }

    #[test]
    fn example_file_parses_and_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());

        let config = Config::load_from(&path).unwrap();
        config.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.drawing.default_kind, config.drawing.default_kind);
        assert_eq!(reloaded.storage.keep_backup, config.storage.keep_backup);
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["drawing", "canvas", "history", "storage", "plugins"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
