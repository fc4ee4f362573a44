//! Error types for merchimport.
//!
//! Library crates use [`MerchImportError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::ImportKind;

/// Top-level error type for all merchimport operations.
#[derive(Debug, thiserror::Error)]
pub enum MerchImportError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input validation error (unknown import kind, bad arguments, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The selected file does not carry an accepted extension.
    #[error("unsupported file {path:?}: please upload a CSV file")]
    UnsupportedFile { path: PathBuf },

    /// The selected file exceeds the upload size ceiling.
    #[error("file {path:?} is {size} bytes; file size must be less than {limit} bytes")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The pipeline produced zero items.
    #[error("no valid {} found in CSV", .kind.item_label())]
    NoValidRows { kind: ImportKind },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MerchImportError>;

impl MerchImportError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MerchImportError::config("missing [upload] section");
        assert_eq!(err.to_string(), "config error: missing [upload] section");

        let err = MerchImportError::validation("unknown import kind 'banner'");
        assert!(err.to_string().contains("'banner'"));
    }

    #[test]
    fn no_valid_rows_names_the_item_kind() {
        let err = MerchImportError::NoValidRows {
            kind: ImportKind::BestSeller,
        };
        assert_eq!(err.to_string(), "no valid products found in CSV");

        let err = MerchImportError::NoValidRows {
            kind: ImportKind::PopularCategory,
        };
        assert_eq!(err.to_string(), "no valid subcategories found in CSV");
    }
}
