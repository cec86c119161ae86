//! Bake error types

use std::path::PathBuf;

use fos_text::TextError;

/// Fatal baking errors.
///
/// Per-glyph skips and atlas exhaustion are not errors; they are reported
/// through [`crate::BakeReport`].
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error("Font error: {0}")]
    Font(#[from] TextError),

    #[error("Invalid font metrics: {0}")]
    InvalidMetrics(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Glyph index decoding errors
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Bad magic {0:?}, expected \"BAKE\"")]
    BadMagic([u8; 4]),

    #[error("Unexpected end of index at byte {0}")]
    Truncated(usize),

    #[error("Index length {actual} does not match {expected} bytes declared by header")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Record {0} is not in ascending codepoint order")]
    Unordered(usize),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BakeError>;
