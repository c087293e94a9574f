//! Time-windowed verification code protocol
//!
//! A captcha render produces an opaque code bound to a salt and a generation
//! timestamp: the answer text is staged through rotation, XOR and Base64
//! layers keyed off the timestamp and salt, then condensed by three hashes
//! whose seeds come from a timestamp-derived selection vector. Validation
//! re-derives the code across a ±2s window at 100ms steps, so sender and
//! verifier never need synchronized clocks or a shared nonce store.
//!
//! The code is a capability token with a validity window, not ciphertext —
//! nothing in it can or should be decoded.

use crate::cipher::{encode64, rotate, xor_stream};
use crate::error::{CaptchaError, Result};
use crate::hashing::{hash_a, hash_a_seeded, hash_b, hash_c, to_base36};
use crate::time::now_ms;

/// Validation window half-width in milliseconds.
const SKEW_WINDOW_MS: i64 = 2000;
/// Validation window granularity in milliseconds.
const SKEW_STEP_MS: i64 = 100;
/// Default code lifetime for [`is_expired`] (5 minutes).
const DEFAULT_MAX_AGE_MS: u64 = 300_000;

/// Layer-selection vector derived from a timestamp.
///
/// Recomputed on every derive/validate call, never stored. Element ranges are
/// `[0,2]`, `[0,3]`, `[0,2]`, `[0,1]`; only the first element currently seeds
/// a hash layer, the rest widen the code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgoCombo([u8; 4]);

impl AlgoCombo {
    /// Derive the combo from a millisecond timestamp.
    pub fn select(timestamp_ms: u64) -> Self {
        let seed = timestamp_ms % 1000;
        AlgoCombo([
            (seed % 3) as u8,
            (seed * 7 % 4) as u8,
            (seed * 13 % 3) as u8,
            (seed * 17 % 2) as u8,
        ])
    }

    /// Seed for the final DJB2 layer.
    pub fn hash_seed(&self) -> u32 {
        self.0[0] as u32
    }

    /// The four elements joined without separators, e.g. `"2101"`.
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| (b'0' + d) as char).collect()
    }
}

fn ensure_byte_range(name: &str, value: &str) -> Result<()> {
    if let Some(c) = value.chars().find(|&c| c as u32 > 0xFF) {
        return Err(CaptchaError::InvalidArgument(format!(
            "{} contains U+{:04X}, outside the byte-range pipeline contract",
            name, c as u32
        )));
    }
    Ok(())
}

/// Run the 5-layer pipeline at an explicit timestamp.
///
/// Shared by generation (timestamp = now) and validation (timestamp = each
/// window candidate). Deterministic: same text/salt/timestamp, same code.
pub fn derive_code(text: &str, salt: &str, timestamp_ms: u64) -> Result<String> {
    ensure_byte_range("text", text)?;
    ensure_byte_range("salt", salt)?;

    let combo = AlgoCombo::select(timestamp_ms);

    // Layer 1: bind text to salt and generation time
    let layer1 = format!("{}{}{}", text, salt, to_base36(timestamp_ms));

    // Layer 2: rotation keyed off the timestamp (shift 1..=25)
    let rot_shift = (timestamp_ms % 25) as u32 + 1;
    let layer2 = rotate(&layer1, rot_shift);

    // Layer 3: XOR stream keyed off the salt
    let xor_key = hash_a(salt) % 256;
    let layer3 = xor_stream(&layer2, xor_key);

    // Layer 4: Base64 variant
    let layer4 = encode64(&layer3);

    // Layer 5: progressive hash chain, base-36 rendered
    let h1 = to_base36(hash_a_seeded(&layer4, combo.hash_seed()) as u64);
    let h2 = to_base36(hash_b(&format!("{}{}", layer4, h1)) as u64);
    let h3 = to_base36(hash_c(&format!("{}{}", layer4, h2)) as u64);

    let h2_head: String = h2.chars().take(8).collect();
    let h3_head: String = h3.chars().take(8).collect();

    Ok(format!("{}:{}{}{}", combo.digits(), h1, h2_head, h3_head))
}

/// Produce a verification code for `text` bound to `salt` and the current
/// wall clock.
///
/// The timestamp is *not* part of the return value; the caller must capture
/// `now` itself (immediately before calling) and retain it together with the
/// salt for later validation.
pub fn obfuscate(text: &str, salt: &str) -> Result<String> {
    derive_code(text, salt, now_ms())
}

/// Check a user-supplied answer against a previously issued code.
///
/// `input` is lowercased before derivation (human-typed captcha answers are
/// case-insensitive by design; generation does not lowercase). The code is
/// re-derived at every offset in ±2s / 100ms steps around `timestamp`; the
/// first match wins. A mismatch after the whole window is a normal `false`.
pub fn validate_obfuscated(input: &str, code: &str, salt: &str, timestamp_ms: u64) -> Result<bool> {
    let normalized = input.to_lowercase();

    let mut offset = -SKEW_WINDOW_MS;
    while offset <= SKEW_WINDOW_MS {
        let test_time = timestamp_ms.saturating_add_signed(offset);
        if derive_code(&normalized, salt, test_time)? == code {
            return Ok(true);
        }
        offset += SKEW_STEP_MS;
    }

    log::debug!("🚫 verification code mismatch across ±{}ms window", SKEW_WINDOW_MS);
    Ok(false)
}

/// Generate a session salt: two 13-character random base-36 runs bridged by a
/// base-36 hash link binding them to the current time.
pub fn generate_salt() -> Result<String> {
    let run1 = random_base36(13)?;
    let run2 = random_base36(13)?;
    let link = hash_a(&format!("{}{}{}", run1, now_ms(), run2));
    Ok(format!("{}{}{}", run1, to_base36(link as u64), run2))
}

fn random_base36(len: usize) -> Result<String> {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CaptchaError::EntropyError(e.to_string()))?;
    Ok(bytes
        .iter()
        .map(|b| DIGITS[(*b % 36) as usize] as char)
        .collect())
}

/// Whether a code issued at `timestamp_ms` has outlived `max_age_ms`
/// (default 5 minutes when `None`).
pub fn is_expired(timestamp_ms: u64, max_age_ms: Option<u64>) -> bool {
    let max_age = max_age_ms.unwrap_or(DEFAULT_MAX_AGE_MS);
    now_ms().saturating_sub(timestamp_ms) > max_age
}
