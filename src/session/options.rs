use crate::config::{StorageCompression, StorageConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for drawing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Runtime options for saving and loading drawing files.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    /// Shapes beyond this count are dropped on load (0 = unlimited)
    pub max_shapes: usize,
    /// Rotate the previous file to `<file>.bak` on save
    pub keep_backup: bool,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            compression: CompressionMode::Off,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_shapes: 0,
            keep_backup: true,
        }
    }
}

impl StorageOptions {
    /// `<file>.bak` next to the drawing.
    pub fn backup_file_path(path: &Path) -> PathBuf {
        sibling_with_suffix(path, "bak")
    }

    /// `<file>.lock` next to the drawing.
    pub fn lock_file_path(path: &Path) -> PathBuf {
        sibling_with_suffix(path, "lock")
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Build runtime storage options from configuration values.
pub fn options_from_config(storage_cfg: &StorageConfig) -> StorageOptions {
    StorageOptions {
        max_file_size_bytes: storage_cfg
            .max_file_size_mb
            .saturating_mul(1024 * 1024)
            .max(1),
        compression: match storage_cfg.compress {
            StorageCompression::Auto => CompressionMode::Auto,
            StorageCompression::On => CompressionMode::On,
            StorageCompression::Off => CompressionMode::Off,
        },
        auto_compress_threshold_bytes: storage_cfg
            .auto_compress_threshold_kb
            .saturating_mul(1024)
            .max(1),
        max_shapes: storage_cfg.max_shapes,
        keep_backup: storage_cfg.keep_backup,
    }
}
