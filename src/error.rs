//! Unified error types for GeoAlert adapters.
//!
//! The engine itself never fails: missing fixes and missing targets are
//! absence, not errors.  Failures only exist at the edges (preference
//! storage, replay input), and every one of them converts into this
//! single `Error` so the binary's top-level handling stays uniform.
//! All variants are `Copy`.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The preference store failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A file could not be read or written.
    Io(std::io::ErrorKind),
    /// A replay line could not be parsed (1-based line number).
    Replay { line: usize },
    /// A provider name exceeds `PROVIDER_ID_CAP` bytes.
    ProviderName,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Io(kind) => write!(f, "io: {kind}"),
            Self::Replay { line } => write!(f, "replay: malformed record on line {line}"),
            Self::ProviderName => write!(f, "provider name too long"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
