//! Durable storage for the to-do collection.
//!
//! # Responsibility
//! - Encode/decode the whole collection into one self-describing document.
//! - Read and write that document at an injected, per-installation path.
//!
//! # Invariants
//! - Schema version is carried in the document and checked on decode.
//! - A save replaces the previous file atomically; readers never observe
//!   a partially written document.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod codec;
mod file;

pub use file::{load_items, save_items};

/// File name used by [`StoreConfig::in_dir`].
pub const DEFAULT_FILE_NAME: &str = "todos.json";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    UnsupportedSchemaVersion {
        found: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "I/O failure at `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode todo collection: {err}"),
            Self::Decode(err) => write!(f, "malformed todo collection: {err}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "todo file schema version {found} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Short machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
            Self::UnsupportedSchemaVersion { .. } => "unsupported_schema",
        }
    }
}

/// Storage location for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_path: PathBuf,
}

impl StoreConfig {
    /// Uses an explicit file path.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// Places the collection file under `dir` using the default file name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }
}
