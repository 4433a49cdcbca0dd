use super::options::{CompressionMode, StorageOptions};
use super::record::{self, ShapeRecord};
use crate::draw::Shape;
use crate::error::{DrawError, Result};
use crate::registry::ShapeRegistry;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Summary of a completed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedDrawing {
    pub shapes: usize,
    pub bytes: u64,
    pub compressed: bool,
}

/// Shapes read back from a drawing file.
#[derive(Debug)]
pub struct LoadedDrawing {
    pub shapes: Vec<Box<dyn Shape>>,
    /// Records that could not be restored
    pub skipped: usize,
    /// Shapes dropped because of the configured shape limit
    pub truncated: usize,
    pub compressed: bool,
}

/// Summary information about a drawing file for CLI reporting.
#[derive(Debug, Clone)]
pub struct DrawingInspection {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    pub backup_path: PathBuf,
    pub backup_exists: bool,
    pub compressed: bool,
    pub record_count: usize,
    /// Record count per type name
    pub kinds: BTreeMap<String, usize>,
}

/// Writes `shapes` to `path` as a record document.
///
/// The payload goes to a temporary sibling first and is renamed into place, so
/// an interrupted save never leaves a half-written drawing behind.
pub fn save_drawing<'a>(
    path: &Path,
    shapes: impl IntoIterator<Item = &'a dyn Shape>,
    options: &StorageOptions,
) -> Result<SavedDrawing> {
    let records = record::serialize(shapes);
    with_lock(path, true, || save_records(path, &records, options))
}

/// Reads the drawing at `path`, resolving kinds through `registry`.
pub fn load_drawing(
    path: &Path,
    registry: &ShapeRegistry,
    options: &StorageOptions,
) -> Result<LoadedDrawing> {
    let metadata = fs::metadata(path).map_err(|err| DrawError::io(path, err))?;
    if metadata.len() > options.max_file_size_bytes {
        return Err(DrawError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: options.max_file_size_bytes,
        });
    }

    let (records, compressed) = with_lock(path, false, || {
        read_records(path, options.max_file_size_bytes)
    })?;
    let mut decoded = record::deserialize(&records, registry);

    let mut truncated = 0;
    if options.max_shapes > 0 && decoded.shapes.len() > options.max_shapes {
        truncated = decoded.shapes.len() - options.max_shapes;
        warn!(
            "Drawing {} contains {} shapes which exceeds the limit of {}; truncating",
            path.display(),
            decoded.shapes.len(),
            options.max_shapes
        );
        decoded.shapes.truncate(options.max_shapes);
    }

    info!(
        "Drawing loaded from {} ({} shapes, {} skipped, compression={})",
        path.display(),
        decoded.shapes.len(),
        decoded.skipped,
        compressed
    );

    Ok(LoadedDrawing {
        shapes: decoded.shapes,
        skipped: decoded.skipped,
        truncated,
        compressed,
    })
}

/// Inspect a drawing file without resolving its kinds.
pub fn inspect_drawing(path: &Path, options: &StorageOptions) -> Result<DrawingInspection> {
    let metadata = fs::metadata(path).ok();
    let backup_path = StorageOptions::backup_file_path(path);

    let mut inspection = DrawingInspection {
        path: path.to_path_buf(),
        exists: metadata.is_some(),
        size_bytes: metadata.as_ref().map(|m| m.len()),
        modified: metadata.as_ref().and_then(|m| m.modified().ok()),
        backup_exists: backup_path.exists(),
        backup_path,
        compressed: false,
        record_count: 0,
        kinds: BTreeMap::new(),
    };

    if let Some(size) = inspection.size_bytes {
        if size > options.max_file_size_bytes {
            return Err(DrawError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: options.max_file_size_bytes,
            });
        }
        let (records, compressed) = with_lock(path, false, || {
            read_records(path, options.max_file_size_bytes)
        })?;
        inspection.compressed = compressed;
        inspection.record_count = records.len();
        for record in records {
            *inspection.kinds.entry(record.type_name).or_default() += 1;
        }
    }

    Ok(inspection)
}

fn with_lock<T>(path: &Path, exclusive: bool, body: impl FnOnce() -> Result<T>) -> Result<T> {
    let lock_path = StorageOptions::lock_file_path(path);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|err| DrawError::io(&lock_path, err))?;
    let locked = if exclusive {
        lock_file.lock_exclusive()
    } else {
        lock_file.lock_shared()
    };
    locked.map_err(|err| DrawError::io(&lock_path, err))?;

    let result = body();

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_records(
    path: &Path,
    records: &[ShapeRecord],
    options: &StorageOptions,
) -> Result<SavedDrawing> {
    let mut bytes = serde_json::to_vec_pretty(records).map_err(|err| DrawError::Malformed {
        path: path.to_path_buf(),
        source: err,
    })?;

    if bytes.len() as u64 > options.max_file_size_bytes {
        return Err(DrawError::TooLarge {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            limit: options.max_file_size_bytes,
        });
    }

    let compressed = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };
    if compressed {
        bytes = compress_bytes(&bytes).map_err(|err| DrawError::io(path, err))?;
    }

    let tmp_path = temp_path(path);
    write_temp(&tmp_path, |file| {
        file.write_all(&bytes)?;
        file.sync_all()
    })?;

    if path.exists() {
        if options.keep_backup {
            let backup_path = StorageOptions::backup_file_path(path);
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            if let Err(err) = fs::rename(path, &backup_path) {
                fs::remove_file(&tmp_path).ok();
                return Err(DrawError::io(&backup_path, err));
            }
            debug!("Rotated previous drawing to {}", backup_path.display());
        } else {
            fs::remove_file(path).ok();
        }
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        fs::remove_file(&tmp_path).ok();
        return Err(DrawError::io(path, err));
    }

    info!(
        "Drawing saved to {} ({} shapes, {} bytes, compression={})",
        path.display(),
        records.len(),
        bytes.len(),
        compressed
    );

    Ok(SavedDrawing {
        shapes: records.len(),
        bytes: bytes.len() as u64,
        compressed,
    })
}

/// Creates `tmp_path` and fills it through `write`.
///
/// On failure the partial file is removed before the error is returned.
pub(super) fn write_temp(
    tmp_path: &Path,
    write: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<()> {
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .map_err(|err| DrawError::io(tmp_path, err))?;
    let written = write(&mut tmp_file);
    drop(tmp_file);
    written.map_err(|err| {
        fs::remove_file(tmp_path).ok();
        DrawError::io(tmp_path, err)
    })
}

fn read_records(path: &Path, limit: u64) -> Result<(Vec<ShapeRecord>, bool)> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut file_bytes))
        .map_err(|err| DrawError::io(path, err))?;

    let compressed = is_gzip(&file_bytes);
    let payload = if compressed {
        let mut out = Vec::new();
        GzDecoder::new(&file_bytes[..])
            .take(limit.saturating_add(1))
            .read_to_end(&mut out)
            .map_err(|err| DrawError::io(path, err))?;
        if out.len() as u64 > limit {
            return Err(DrawError::TooLarge {
                path: path.to_path_buf(),
                size: out.len() as u64,
                limit,
            });
        }
        out
    } else {
        file_bytes
    };

    let records = serde_json::from_slice(&payload).map_err(|err| DrawError::Malformed {
        path: path.to_path_buf(),
        source: err,
    })?;
    Ok((records, compressed))
}

fn compress_bytes(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let base = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    let mut counter = 0u32;
    loop {
        let mut name = base.clone();
        name.push(if counter == 0 {
            ".tmp".to_string()
        } else {
            format!(".tmp{counter}")
        });
        let candidate = target.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
