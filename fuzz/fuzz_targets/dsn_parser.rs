//! Fuzz target for the DSN parser.
//!
//! Feeds arbitrary strings to `Connection::parse_dsn`, and checks that any
//! accepted DSN survives a trip through its canonical form.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_dsn_parser
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use odoo_rpc_core::{Connection, ConnectionConfig};

/// Structured input: one component per field.
#[derive(Debug, Arbitrary)]
struct FuzzDsn {
    raw: String,
    host: String,
    username: String,
    password: String,
    database: String,
    https: bool,
}

/// Drop delimiters that would move text into another component.
fn component(value: &str, delimiters: &[char]) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() && !delimiters.contains(c))
        .collect()
}

fuzz_target!(|input: FuzzDsn| {
    // The parser should never panic, only return errors
    let _ = Connection::parse_dsn(&input.raw);

    // Any accepted components must come back exactly as given.
    let host = component(&input.host, &['/', '\\', '?', '#', '@']);
    let username = component(&input.username, &['/', '\\', '?', '#', '@', ':']);
    let database = component(&input.database, &['?', '#']).trim_end().to_string();
    if host.is_empty() || username.is_empty() || input.password.is_empty() {
        return;
    }

    let Ok(conn) = ConnectionConfig::new()
        .host(host)
        .username(username)
        .password(input.password)
        .database(database)
        .scheme(if input.https { "https" } else { "http" })
        .build()
    else {
        return;
    };

    match Connection::parse_dsn(&conn.to_dsn()) {
        Ok(reparsed) => {
            assert_eq!(reparsed, conn);
            assert_eq!(reparsed.identifier(), conn.identifier());
        }
        // Only a host the URL parser refuses (or maps to nothing) may fail.
        Err(err) => assert!(matches!(err.reason(), None | Some("Missing host.")), "{err}"),
    }
});
