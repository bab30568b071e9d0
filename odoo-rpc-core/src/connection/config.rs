//! Structured connection configuration.

use super::env::{EnvExpander, EnvSource};
use super::{ConfigurationError, Connection, ConnectionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Named connection parameters.
///
/// Every field is optional here; [`ConnectionConfig::build`] decides what is
/// required. Deserializes from any serde format, ignoring unknown keys.
///
/// ```rust
/// use odoo_rpc_core::ConnectionConfig;
///
/// let config: ConnectionConfig = serde_json::from_str(
///     r#"{"host": "erp.local", "username": "admin", "password": "pw", "database": "prod"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.build().unwrap().scheme(), "https");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host, optionally with a port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Plain-text password (not percent-decoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Target database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Scheme, `https` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl ConnectionConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect parameters from key/value pairs.
    ///
    /// Only `host`, `username`, `password`, `database` and `scheme` are
    /// recognized; other keys are ignored.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in entries {
            if let Some(slot) = config.slot_mut(key.as_ref()) {
                *slot = Some(value.into());
            }
        }
        config
    }

    /// Collect parameters from a JSON object.
    ///
    /// `null` counts as absent. Any other non-string value for a known key is
    /// rejected.
    pub fn from_json(value: &Value) -> ConnectionResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ConfigurationError::InvalidParameter {
                name: "<root>".to_string(),
                message: "expected a JSON object".to_string(),
            })?;

        let mut config = Self::default();
        for (key, value) in object {
            let Some(slot) = config.slot_mut(key) else {
                continue;
            };
            match value {
                Value::Null => {}
                Value::String(s) => *slot = Some(s.clone()),
                other => {
                    return Err(ConfigurationError::InvalidParameter {
                        name: key.clone(),
                        message: format!("expected a string, got {other}"),
                    });
                }
            }
        }
        Ok(config)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "host" => Some(&mut self.host),
            "username" => Some(&mut self.username),
            "password" => Some(&mut self.password),
            "database" => Some(&mut self.database),
            "scheme" => Some(&mut self.scheme),
            _ => None,
        }
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Expand environment references in every present field.
    pub fn expand_env<S: EnvSource>(&self, expander: &EnvExpander<S>) -> ConnectionResult<Self> {
        let expand = |field: &Option<String>| -> ConnectionResult<Option<String>> {
            field.as_deref().map(|v| expander.expand(v)).transpose()
        };

        let expanded = Self {
            host: expand(&self.host)?,
            username: expand(&self.username)?,
            password: expand(&self.password)?,
            database: expand(&self.database)?,
            scheme: expand(&self.scheme)?,
        };
        debug!("Environment references expanded in connection config");
        Ok(expanded)
    }

    /// Build the connection.
    pub fn build(&self) -> ConnectionResult<Connection> {
        Connection::from_config(self)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("scheme", &self.scheme)
            .finish()
    }
}
