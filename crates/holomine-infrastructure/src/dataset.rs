//! Loading user-selected datasets from disk.
//!
//! Mirrors the backend's upload rules so obviously unacceptable files are
//! rejected before a request is made: `.txt`, `.csv` or `.json` only, at most
//! 16 MiB, and not empty.

use holomine_core::session::DatasetInput;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest dataset the backend accepts.
pub const MAX_DATASET_BYTES: u64 = 16 * 1024 * 1024;

/// File extensions the backend accepts (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "csv", "json"];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type for {path} (expected .txt, .csv or .json)")]
    UnsupportedExtension { path: PathBuf },

    #[error("{path} is {size} bytes, larger than the 16 MiB limit")]
    TooLarge { path: PathBuf, size: u64 },

    #[error("{path} is empty")]
    Empty { path: PathBuf },

    #[error("{path} has no file name")]
    MissingFileName { path: PathBuf },

    #[error("Failed to serialize dataset: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whether `path` has one of the accepted extensions.
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Reads and validates the dataset at `path`.
pub async fn load_dataset(path: &Path) -> Result<DatasetInput, DatasetError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DatasetError::MissingFileName {
            path: path.to_path_buf(),
        })?
        .to_string();

    if !has_allowed_extension(path) {
        return Err(DatasetError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let io_error = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = tokio::fs::metadata(path).await.map_err(io_error)?.len();
    if size > MAX_DATASET_BYTES {
        return Err(DatasetError::TooLarge {
            path: path.to_path_buf(),
            size,
        });
    }

    let content = tokio::fs::read(path).await.map_err(io_error)?;
    if content.is_empty() {
        return Err(DatasetError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        file_name = %file_name,
        bytes = content.len(),
        "[Dataset] Loaded dataset"
    );
    Ok(DatasetInput::new(file_name, content))
}
