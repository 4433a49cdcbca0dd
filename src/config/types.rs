//! Configuration type definitions.

use super::enums::{ColorSpec, StorageCompression};
use crate::draw::color::{DEFAULT_FILL, DEFAULT_STROKE};
use crate::draw::{Color, Style};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the shape kind and paint attributes selected when the editor starts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Shape kind selected at startup (any registered kind name, e.g. "Rectangle",
    /// "Polygon" or a plugin kind)
    #[serde(default = "default_kind")]
    pub default_kind: String,

    /// Outline color - a named color, a `#AARRGGBB` hex string, or an RGB array
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Interior color - same formats as `stroke_color`; "transparent" means no fill
    #[serde(default = "default_fill_color")]
    pub fill_color: ColorSpec,

    /// Outline thickness in pixels (valid range: 0.0 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_kind: default_kind(),
            stroke_color: default_stroke_color(),
            fill_color: default_fill_color(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl DrawingConfig {
    /// Paint attributes for new shapes. Unresolvable colors fall back to the
    /// defaults.
    pub fn style(&self) -> Style {
        let stroke = self.stroke_color.to_color().unwrap_or(DEFAULT_STROKE);
        let fill = self.fill_color.to_color().unwrap_or(DEFAULT_FILL);
        Style::new(stroke, fill, self.stroke_width).unwrap_or(Style {
            stroke,
            fill,
            stroke_width: default_stroke_width(),
        })
    }
}

/// Drawing surface extent.
///
/// Pointer coordinates are clamped into `0..=width` × `0..=height` before they
/// reach a shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (minimum 1)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Surface height in pixels (minimum 1)
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept (0 = unlimited). The oldest steps are
    /// forgotten first.
    #[serde(default)]
    pub max_undo: usize,
}

/// Drawing file storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Compression for saved files: "off", "on" or "auto"
    #[serde(default)]
    pub compress: StorageCompression,

    /// Payload size in KiB from which "auto" compression kicks in
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest drawing file accepted on load or produced on save, in MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Shapes beyond this count are dropped when loading (0 = unlimited)
    #[serde(default)]
    pub max_shapes: usize,

    /// Keep the previous version of a file as `<file>.bak` when saving over it
    #[serde(default = "default_keep_backup")]
    pub keep_backup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            compress: StorageCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
            max_shapes: 0,
            keep_backup: default_keep_backup(),
        }
    }
}

/// Plugin shape kinds offered to the registry at startup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PluginsConfig {
    /// Names of built-in plugin kinds to enable (see `vectorpad kinds --all`)
    #[serde(default = "default_enabled_plugins")]
    pub enabled: Vec<String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_plugins(),
        }
    }
}

pub(super) fn default_kind() -> String {
    crate::draw::kinds::RECTANGLE.to_string()
}

fn color_spec(color: Color) -> ColorSpec {
    ColorSpec::Name(color.to_hex())
}

pub(super) fn default_stroke_color() -> ColorSpec {
    color_spec(DEFAULT_STROKE)
}

pub(super) fn default_fill_color() -> ColorSpec {
    color_spec(DEFAULT_FILL)
}

pub(super) fn default_stroke_width() -> f64 {
    2.0
}

fn default_canvas_width() -> u32 {
    1920
}

fn default_canvas_height() -> u32 {
    1080
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_keep_backup() -> bool {
    true
}

fn default_enabled_plugins() -> Vec<String> {
    vec![crate::plugins::trapezoid::NAME.to_string()]
}
