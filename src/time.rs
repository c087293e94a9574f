//! Wall-clock millisecond timestamps (WASM-compatible)

/// Current timestamp in milliseconds since the Unix epoch.
///
/// Uses `Date.now()` on WASM and `SystemTime` natively, so the pure
/// obfuscation pipeline stays testable outside a browser.
pub fn now_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }

    #[test]
    fn epoch_plausible() {
        // Anything after 2020-01-01 and the clock is at least sane
        assert!(now_ms() > 1_577_836_800_000);
    }
}
