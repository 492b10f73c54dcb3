//! Error types for the LibreOfficeKit bindings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error("failed to load LibreOffice library '{path}': {detail}")]
    LibraryNotFound { path: PathBuf, detail: String },

    #[error("'{0}' does not export libreofficekit_hook; not a LibreOffice program directory?")]
    HookMissing(PathBuf),

    #[error("LibreOfficeKit initialisation returned null for '{0}'")]
    InitFailed(PathBuf),

    #[error("LibreOfficeKit ABI too old: vtable size {actual} below required {required}")]
    UnsupportedAbi { actual: usize, required: usize },

    #[error("failed to load document: {0}")]
    DocumentLoad(String),

    #[error("failed to save document: {0}")]
    SaveFailed(String),

    #[error("failed to paste {size} bytes of '{mime_type}' into document")]
    PasteFailed { mime_type: String, size: usize },

    #[error("wrong document type: expected {expected:?}, got {actual:?}")]
    WrongDocumentType {
        expected: crate::document::DocumentType,
        actual: crate::document::DocumentType,
    },

    #[error("path contains an interior NUL byte: {0}")]
    InvalidPath(PathBuf),

    #[error("command string contains an interior NUL byte")]
    InteriorNul,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KitError>;
