//! Best-effort tamper signal
//!
//! Advisory only, not a security boundary: a `false` here means the
//! obfuscation code was probably stripped or stubbed out by something in the
//! page, and the UI layer may want to refuse the session. A `true` proves
//! nothing against a motivated attacker with source access.

use crate::protocol::{derive_code, validate_obfuscated};

/// Fixed probe inputs; any timestamp works, the probe only checks that
/// derive and validate still agree.
const PROBE_TEXT: &str = "w4tchd0g";
const PROBE_SALT: &str = "self-check";
const PROBE_TS: u64 = 1_600_000_000_000;

/// Minimum plausible source length for the exported `obfuscate` binding.
const MIN_BINDING_SOURCE_LEN: usize = 100;

/// Check that the obfuscation pipeline is intact.
///
/// Always runs a behavioral probe (derive a code at a fixed timestamp and
/// validate it back, mixed-case). On WASM, additionally stringifies the
/// `obfuscate` binding if the embedding page exposed it globally and checks
/// for a minimum length and the marker substrings a trivial stub would lose.
/// Any failure or exception yields `false`.
pub fn check_integrity() -> bool {
    behavioral_probe() && binding_intact()
}

fn behavioral_probe() -> bool {
    let Ok(code) = derive_code(PROBE_TEXT, PROBE_SALT, PROBE_TS) else {
        return false;
    };
    if !code.contains(':') {
        return false;
    }
    // Validation lowercases; an uppercased probe answer must still verify
    matches!(
        validate_obfuscated("W4TCHD0G", &code, PROBE_SALT, PROBE_TS),
        Ok(true)
    )
}

#[cfg(target_arch = "wasm32")]
fn binding_intact() -> bool {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let Ok(binding) = Reflect::get(&js_sys::global(), &JsValue::from_str("obfuscate")) else {
        return false;
    };
    if !binding.is_function() {
        // Not exported into the global scope; nothing to inspect, the
        // behavioral probe already ran
        return true;
    }
    let source = String::from(js_sys::Function::from(binding).to_string());
    source.len() >= MIN_BINDING_SOURCE_LEN
        && source.contains("obfuscate")
        && source.contains("wasm")
}

#[cfg(not(target_arch = "wasm32"))]
fn binding_intact() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intact_pipeline_passes() {
        assert!(check_integrity());
    }

    #[test]
    fn probe_round_trips() {
        assert!(behavioral_probe());
    }
}
