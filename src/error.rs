//! Error types for the crawl job settings and mapping resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::DocKind;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No mapping resource exists for the requested version and kind, neither
    /// in the job's own directory nor in the bundled defaults.
    #[error(
        "Mapping [{kind}] does not exist for elasticsearch version [{version}] in job or default resources"
    )]
    UnsupportedVersion { version: String, kind: DocKind },

    /// A resource exists (or should exist) but could not be read or written.
    #[error("I/O error on [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Percentage must be in [0, 100], got {0}")]
    PercentageOutOfRange(f64),

    #[error("Invalid percentage or count: '{0}'")]
    InvalidPercentage(String),

    #[error("Invalid time value: '{0}'")]
    InvalidTimeValue(String),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The job definition is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error means "this schema version is not supported" as
    /// opposed to a broken disk or a bad definition.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Error::UnsupportedVersion { .. })
    }
}
