//! RPC service names exposed by an Odoo server.

use crate::connection::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service an RPC call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcService {
    /// Authentication and server metadata (`version`, `login`).
    Common,
    /// Model methods (`execute_kw`).
    Object,
    /// Database management.
    #[serde(rename = "db")]
    Database,
}

impl RpcService {
    /// Every service.
    pub const ALL: [RpcService; 3] = [Self::Common, Self::Object, Self::Database];

    /// Wire name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Object => "object",
            Self::Database => "db",
        }
    }
}

impl fmt::Display for RpcService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpcService {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownService(s.to_string()))
    }
}
