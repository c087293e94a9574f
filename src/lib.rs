//! # captcha-wasm
//!
//! Client-side bot-resistance core for a captcha flow, compiled to
//! WebAssembly.
//!
//! The UI layer (out of scope here) renders the captcha, wires pointer
//! events into a [`MouseTracker`], polls the environment detectors, and at
//! submission time exchanges a verification code:
//!
//! ```text
//! captcha UI (JS)
//!   ↓ obfuscate(answer, salt)          — at render time, with now() captured
//!   ↓ code + salt + timestamp          — retained by the caller
//!   ↓ validate_obfuscated(input, code, salt, timestamp)
//!   ↓ boolean verdict
//! ```
//!
//! ## What this is — and is not
//!
//! The obfuscation scheme is **deterrence, not cryptography**: rotation, XOR
//! and Base64 layers condensed by non-cryptographic hashes, all visible in
//! any client bundle. It raises the cost of naive replay; it does not resist
//! a motivated attacker. Do not "upgrade" it to real cryptography — the code
//! format is an interop contract with server-side counterparts.
//!
//! All functions are synchronous and bounded: the validation window is a
//! fixed 41-step loop, the mouse buffer caps at 200 samples, and nothing
//! here performs I/O or persists state.

use wasm_bindgen::prelude::*;

pub mod cipher;
pub mod environment;
pub mod error;
pub mod hashing;
pub mod integrity;
pub mod mouse;
pub mod protocol;
pub mod time;

pub use error::{CaptchaError, ErrorCode, Result};
pub use environment::AutomationReport;
pub use mouse::{MouseTracker, TrackerStats};
pub use protocol::AlgoCombo;

/// Initialize logging and panic reporting. Runs automatically on module
/// instantiation.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("🛡️ captcha-wasm core initialized");
}

/// Produce a verification code binding `text` to `salt` and the current
/// wall clock.
///
/// The timestamp is not returned: capture `Date.now()` immediately before
/// calling and retain it alongside the salt — `validate_obfuscated` needs it
/// as an explicit parameter.
#[wasm_bindgen]
pub fn obfuscate(text: &str, salt: &str) -> std::result::Result<String, JsValue> {
    protocol::obfuscate(text, salt).map_err(Into::into)
}

/// Check a user-supplied answer (case-insensitive) against a code issued at
/// `timestamp`, tolerating ±2s of clock skew at 100ms granularity.
#[wasm_bindgen]
pub fn validate_obfuscated(
    input: &str,
    code: &str,
    salt: &str,
    timestamp: f64,
) -> std::result::Result<bool, JsValue> {
    protocol::validate_obfuscated(input, code, salt, timestamp as u64).map_err(Into::into)
}

/// Generate a fresh session salt.
#[wasm_bindgen]
pub fn generate_salt() -> std::result::Result<String, JsValue> {
    protocol::generate_salt().map_err(Into::into)
}

/// Whether a code issued at `timestamp` has outlived `max_age_ms`
/// (default 5 minutes).
#[wasm_bindgen]
pub fn is_expired(timestamp: f64, max_age_ms: Option<f64>) -> bool {
    protocol::is_expired(timestamp as u64, max_age_ms.map(|v| v as u64))
}

/// Whether developer tools appear to be open. Re-evaluated on every call.
#[wasm_bindgen]
pub fn detect_dev_tools() -> bool {
    environment::detect_dev_tools()
}

/// Best-effort breakpoint detection by timing a `debugger;` statement.
/// Advisory only; inherently flaky.
#[wasm_bindgen]
pub fn detect_debugger_timing() -> bool {
    environment::detect_debugger_timing()
}

/// VM-environment suspicion contribution.
#[wasm_bindgen]
pub fn detect_vm() -> u32 {
    environment::detect_vm()
}

/// Additive, uncapped automation suspicion score. Callers pick their own
/// threshold.
#[wasm_bindgen]
pub fn detect_automation() -> u32 {
    environment::detect_automation()
}

/// Automation score with the list of signals that fired, as a JS object.
#[wasm_bindgen]
pub fn automation_report() -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&environment::automation_report())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Condensed canvas fingerprint; empty string when canvas is unavailable.
#[wasm_bindgen]
pub fn canvas_fingerprint() -> String {
    environment::canvas_fingerprint()
}

/// Percentage similarity (0–100) between two strings.
#[wasm_bindgen]
pub fn calculate_similarity(a: &str, b: &str) -> u32 {
    environment::calculate_similarity(a, b)
}

/// Compare two canvas fingerprints (threshold default 70). Fail-open when
/// either fingerprint is missing.
#[wasm_bindgen]
pub fn validate_fingerprint(fp1: &str, fp2: &str, threshold: Option<u32>) -> bool {
    environment::validate_fingerprint(fp1, fp2, threshold)
}

/// Advisory check that the obfuscation pipeline has not been stripped or
/// stubbed out.
#[wasm_bindgen]
pub fn check_integrity() -> bool {
    integrity::check_integrity()
}
