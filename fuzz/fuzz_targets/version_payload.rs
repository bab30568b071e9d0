//! Fuzz target for server version payloads.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_version_payload
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use odoo_rpc_core::ServerVersionInfo;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed payloads must be reported, never panic
        if let Ok(version) = ServerVersionInfo::from_json_str(input) {
            let _ = version.name();
        }
    }
});
