//! Environment variable expansion for DSNs and config values.

use super::{ConfigurationError, ConnectionResult};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a variable exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment backed by a map, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add multiple variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Expands environment references in strings.
///
/// Supported syntax:
/// - `${VAR}` - required variable
/// - `${VAR:-default}` - default when unset or empty
/// - `${VAR:?message}` - required, with a custom error message
/// - `${VAR:+word}` - `word` when set and non-empty, empty otherwise
/// - `$VAR` - simple reference
#[derive(Debug, Clone)]
pub struct EnvExpander<S: EnvSource = StdEnvSource> {
    source: S,
}

impl EnvExpander<StdEnvSource> {
    /// Expander over the process environment.
    pub fn new() -> Self {
        Self {
            source: StdEnvSource,
        }
    }
}

impl Default for EnvExpander<StdEnvSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> EnvExpander<S> {
    /// Expander over a custom source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// The variable source this expander reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Expand every reference in `input`.
    ///
    /// A `$` not followed by `{`, a letter or `_` is kept literally.
    pub fn expand(&self, input: &str) -> ConnectionResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('{') => {
                    chars.next();
                    result.push_str(&self.expand_braced(&mut chars)?);
                }
                Some(&next) if next.is_alphabetic() || next == '_' => {
                    result.push_str(&self.expand_simple(&mut chars)?);
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    fn expand_braced(&self, chars: &mut Peekable<Chars<'_>>) -> ConnectionResult<String> {
        let mut name = String::new();
        let mut modifier = None;
        let mut word = String::new();
        let mut closed = false;

        while let Some(c) = chars.next() {
            match c {
                '}' => {
                    closed = true;
                    break;
                }
                _ if modifier.is_some() => word.push(c),
                ':' => match chars.next() {
                    Some('}') => {
                        closed = true;
                        break;
                    }
                    Some(m) => modifier = Some(m),
                    None => break,
                },
                _ => name.push(c),
            }
        }

        if !closed {
            return Err(ConfigurationError::InvalidEnvValue {
                name,
                message: "Unterminated variable reference".to_string(),
            });
        }
        if name.is_empty() {
            return Err(ConfigurationError::InvalidEnvValue {
                name,
                message: "Empty variable name".to_string(),
            });
        }

        let value = self.source.get(&name).filter(|v| !v.is_empty());
        match (modifier, value) {
            (Some('+'), Some(_)) => Ok(word),
            (Some('+'), None) => Ok(String::new()),
            (_, Some(value)) => Ok(value),
            (Some('-'), None) => Ok(word),
            (Some('?'), None) => Err(ConfigurationError::InvalidEnvValue {
                message: if word.is_empty() {
                    format!("Required variable '{name}' is not set")
                } else {
                    word
                },
                name,
            }),
            (_, None) => Err(ConfigurationError::EnvNotFound(name)),
        }
    }

    fn expand_simple(&self, chars: &mut Peekable<Chars<'_>>) -> ConnectionResult<String> {
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            chars.next();
        }

        self.source
            .get(&name)
            .ok_or_else(|| ConfigurationError::EnvNotFound(name))
    }

    /// Expand a DSN.
    pub fn expand_url(&self, url: &str) -> ConnectionResult<String> {
        self.expand(url)
    }

    /// Whether `input` may contain references.
    pub fn has_variables(input: &str) -> bool {
        input.contains('$')
    }
}

/// Expand references using the process environment.
pub fn expand_env(input: &str) -> ConnectionResult<String> {
    EnvExpander::new().expand(input)
}
