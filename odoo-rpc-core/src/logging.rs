//! Logging setup.
//!
//! The crate emits `tracing` events (`debug!` while building connections,
//! `trace!` while reading version payloads). Applications that already own a
//! subscriber need nothing from this module. Others can call [`init`], which
//! installs a `tracing-subscriber` layer when the `tracing-subscriber` feature
//! is enabled.
//!
//! # Environment Variables
//!
//! - `ODOO_DEBUG=true|1|yes` - enable debug logging
//! - `ODOO_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `ODOO_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! ```rust,no_run
//! use odoo_rpc_core::logging;
//!
//! logging::init();
//! ```
//!
//! Passwords are never recorded; events carry host, database and scheme only.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Whether `ODOO_DEBUG` asks for debug logging.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("ODOO_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Level from `ODOO_LOG_LEVEL`, falling back to `debug` when `ODOO_DEBUG`
/// is set and `warn` otherwise.
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    env::var("ODOO_LOG_LEVEL")
        .ok()
        .and_then(|level| parse_level(&level))
        .unwrap_or(fallback)
}

fn parse_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Format from `ODOO_LOG_FORMAT`, `json` by default.
pub fn get_log_format() -> &'static str {
    env::var("ODOO_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Install the subscriber once. Later calls are no-ops.
///
/// Does nothing unless `ODOO_DEBUG` or `ODOO_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("ODOO_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("odoo_rpc={level},odoo_rpc_core={level}"))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the host application may already own a subscriber.
            let result = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if result.is_ok() {
                tracing::info!(level = level, format = get_log_format(), "Odoo RPC logging initialized");
            }
        }
    });
}

/// Set `ODOO_LOG_LEVEL` and call [`init`].
///
/// # Notes
///
/// Modifies the process environment; call before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: documented as startup-only, before other threads exist.
    unsafe {
        env::set_var("ODOO_LOG_LEVEL", level);
    }
    init();
}

/// Set `ODOO_DEBUG=true` and call [`init`].
///
/// # Notes
///
/// Modifies the process environment; call before spawning threads.
pub fn init_debug() {
    // SAFETY: documented as startup-only, before other threads exist.
    unsafe {
        env::set_var("ODOO_DEBUG", "true");
    }
    init();
}
