//! Error types for the raster cache.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by grid construction, access, and serialization.
///
/// Nothing here is transient: every variant is either a malformed file or a
/// caller bug, so no operation is retried or silently recovered.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file's variant id does not match the requested grid variant.
    /// The file must not be treated as valid.
    #[error("variant id {found} does not match expected {expected}")]
    VariantMismatch { expected: u8, found: u8 },

    /// Fewer bytes were available than the header declares.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// An accessor was invoked with a key kind it does not support.
    #[error("unsupported key kind: {0}")]
    UnsupportedKey(&'static str),

    /// A save was requested but no filename is known.
    #[error("missing filename")]
    MissingFilename,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GridError {
    /// Map `read_exact` shortfall onto the truncation error; other I/O
    /// failures pass through unchanged.
    pub(crate) fn from_read(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => GridError::UnexpectedEof,
            _ => GridError::Io(err),
        }
    }
}
