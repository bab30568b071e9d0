//! Crate-wide error type.

use crate::connection::ConfigurationError;
use crate::version::PayloadError;
use thiserror::Error;

/// Result type for operations spanning several modules.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid connection configuration or DSN.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Malformed server version payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl Error {
    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Whether this is a payload error.
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Payload(_))
    }
}
