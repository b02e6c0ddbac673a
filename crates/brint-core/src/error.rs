use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrintError {
    // Version errors
    #[error("VERSION_PARSE_ERROR: '{input}' is not a valid semantic version: {reason}")]
    ParseError { input: String, reason: String },

    // Resolution errors
    #[error("VERSION_ATTRIBUTE_MISSING: the package {package} has neither __version__ nor __VERSION__")]
    ResolutionError { package: String },

    #[error("PACKAGE_NOT_FOUND: package '{package}' could not be imported")]
    ImportError { package: String },

    #[error("CALL_SITE_INVALID: {0}")]
    InvalidCallSite(String),

    // Config errors
    #[error("CONFIG_NOT_FOUND: Brint.toml not found in parent directories of {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_INVALID: failed to parse {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl BrintError {
    pub(crate) fn parse(input: &str, err: impl std::fmt::Display) -> Self {
        BrintError::ParseError {
            input: input.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrintError>;
