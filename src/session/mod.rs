//! Drawing persistence.
//!
//! Converts the shape collection into flat records, writes them to disk with
//! locking, optional compression, and backup rotation, and rebuilds shapes from
//! a file through the shape registry.

mod options;
pub mod record;
mod storage;

pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, StorageOptions, options_from_config,
};
pub use record::{Decoded, PointRecord, ShapeRecord, deserialize, serialize};
pub use storage::{
    DrawingInspection, LoadedDrawing, SavedDrawing, inspect_drawing, load_drawing, save_drawing,
};

#[cfg(test)]
mod tests;
