//! Server version metadata.
//!
//! The `common` service's `version` method answers with a payload such as:
//!
//! ```json
//! {
//!     "server_version": "16.0",
//!     "server_version_info": [16, 0, 0, "final", 0, ""],
//!     "server_serie": "16.0",
//!     "protocol_version": 1
//! }
//! ```
//!
//! [`ServerVersionInfo::from_payload`] reads the six positional entries of
//! `server_version_info` and `protocol_version`; other keys are ignored.
//!
//! ```rust
//! use odoo_rpc_core::ServerVersionInfo;
//! use serde_json::json;
//!
//! let version = ServerVersionInfo::from_payload(&json!({
//!     "server_version_info": [15, 0, 0, "", "", "e"],
//!     "protocol_version": 1
//! }))
//! .unwrap();
//!
//! assert_eq!(version.name(), "15.0.0+e");
//! assert_eq!(version.protocol_version(), 1);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Payload key holding the positional version entries.
pub const VERSION_INFO_KEY: &str = "server_version_info";

/// Payload key holding the RPC protocol version.
pub const PROTOCOL_VERSION_KEY: &str = "protocol_version";

const VERSION_INFO_LEN: usize = 6;

/// Errors raised while reading a version payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload is not valid JSON.
    #[error("invalid version payload: {0}")]
    Json(String),

    /// A required key is absent.
    #[error("missing key '{0}' in version payload")]
    MissingKey(&'static str),

    /// The key does not hold an array.
    #[error("key '{0}' in version payload is not a sequence")]
    NotASequence(&'static str),

    /// The version sequence is too short.
    #[error("index {index} out of range for server_version_info of length {len}")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Actual length.
        len: usize,
    },

    /// A numeric slot holds something other than a non-negative integer.
    #[error("invalid {field}: expected a non-negative integer, got {value}")]
    InvalidNumber {
        /// Field being read.
        field: &'static str,
        /// The offending value, as JSON.
        value: String,
    },
}

/// Result type for payload parsing.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Version information reported by an Odoo server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServerVersionInfo {
    major_version: u32,
    minor_version: u32,
    patch_version: u32,
    build_name: String,
    build_identifier: String,
    build_version: String,
    protocol_version: u32,
}

impl ServerVersionInfo {
    /// Create version information from its parts.
    pub fn new(
        major_version: u32,
        minor_version: u32,
        patch_version: u32,
        build_name: impl Into<String>,
        build_identifier: impl Into<String>,
        build_version: impl Into<String>,
        protocol_version: u32,
    ) -> Self {
        Self {
            major_version,
            minor_version,
            patch_version,
            build_name: build_name.into(),
            build_identifier: build_identifier.into(),
            build_version: build_version.into(),
            protocol_version,
        }
    }

    /// Read version information from a server payload.
    ///
    /// Numeric entries are taken positionally; the three build entries are
    /// converted to strings whatever their JSON type.
    pub fn from_payload(payload: &Value) -> PayloadResult<Self> {
        let infos = payload
            .get(VERSION_INFO_KEY)
            .ok_or(PayloadError::MissingKey(VERSION_INFO_KEY))?
            .as_array()
            .ok_or(PayloadError::NotASequence(VERSION_INFO_KEY))?;

        if infos.len() < VERSION_INFO_LEN {
            return Err(PayloadError::OutOfRange {
                index: infos.len(),
                len: infos.len(),
            });
        }

        let protocol = payload
            .get(PROTOCOL_VERSION_KEY)
            .ok_or(PayloadError::MissingKey(PROTOCOL_VERSION_KEY))?;

        let version = Self {
            major_version: as_number(&infos[0], "major_version")?,
            minor_version: as_number(&infos[1], "minor_version")?,
            patch_version: as_number(&infos[2], "patch_version")?,
            build_name: as_text(&infos[3]),
            build_identifier: as_text(&infos[4]),
            build_version: as_text(&infos[5]),
            protocol_version: as_number(protocol, PROTOCOL_VERSION_KEY)?,
        };

        trace!(version = %version, protocol = version.protocol_version, "Server version parsed");
        Ok(version)
    }

    /// Parse a JSON document and read it with [`Self::from_payload`].
    pub fn from_json_str(payload: &str) -> PayloadResult<Self> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| PayloadError::Json(e.to_string()))?;
        Self::from_payload(&value)
    }

    /// Human-readable version, `major.minor.patch+build_version`.
    pub fn name(&self) -> String {
        format!(
            "{}.{}.{}+{}",
            self.major_version, self.minor_version, self.patch_version, self.build_version
        )
    }

    /// Major version.
    pub fn major_version(&self) -> u32 {
        self.major_version
    }

    /// Minor version.
    pub fn minor_version(&self) -> u32 {
        self.minor_version
    }

    /// Patch version.
    pub fn patch_version(&self) -> u32 {
        self.patch_version
    }

    /// Release level, e.g. `final`.
    pub fn build_name(&self) -> &str {
        &self.build_name
    }

    /// Serial within the release level.
    pub fn build_identifier(&self) -> &str {
        &self.build_identifier
    }

    /// Edition marker, e.g. `e` for Enterprise.
    pub fn build_version(&self) -> &str {
        &self.build_version
    }

    /// RPC protocol version.
    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }
}

fn as_number(value: &Value, field: &'static str) -> PayloadResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| PayloadError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Display for ServerVersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl TryFrom<&Value> for ServerVersionInfo {
    type Error = PayloadError;

    fn try_from(payload: &Value) -> Result<Self, Self::Error> {
        Self::from_payload(payload)
    }
}
