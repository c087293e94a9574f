//! Keyed text obfuscation primitives
//!
//! The middle layers of the verification pipeline: a cyclic rotation cipher,
//! a position-keyed XOR stream, and a hand-rolled Base64 encoder. These stay
//! byte-compatible with the original scheme on purpose — the output feeds a
//! hash layer that a server-side counterpart recomputes, so swapping in a
//! library encoder or "real" cipher would break every deployed verifier.
//!
//! Intermediate stages may contain unprintable code points; the only consumer
//! is the next stage, never a terminal or the DOM.

/// Rotation cipher over letters and digits.
///
/// Letters shift cyclically within `A-Z`/`a-z`, digits within `0-9`; every
/// other character passes through. Shifts larger than the alphabet wrap via
/// the modulo, so a shift of 26 is identity for letters but a shift of 6 for
/// digits.
pub fn rotate(input: &str, shift: u32) -> String {
    input
        .chars()
        .map(|c| match c {
            'A'..='Z' => rotate_in(c, 'A', 26, shift),
            'a'..='z' => rotate_in(c, 'a', 26, shift),
            '0'..='9' => rotate_in(c, '0', 10, shift),
            other => other,
        })
        .collect()
}

fn rotate_in(c: char, base: char, size: u32, shift: u32) -> char {
    let offset = (c as u32 - base as u32 + shift) % size;
    // base + offset stays within the same ASCII run
    char::from_u32(base as u32 + offset).unwrap_or(c)
}

/// Position-keyed XOR stream.
///
/// The i-th code point is XORed with `(key + i) mod 256`. One code point in,
/// one code point out; byte-range input (≤ 0xFF) stays byte-range, which the
/// pipeline relies on before Base64 encoding.
pub fn xor_stream(input: &str, key: u32) -> String {
    input
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mixed = (c as u32) ^ (key.wrapping_add(i as u32) % 256);
            // XOR of two values ≤ 0xFF is ≤ 0xFF, always a valid scalar
            char::from_u32(mixed).unwrap_or(c)
        })
        .collect()
}

const BASE64_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Hand-rolled Base64 *variant* over the code points of `input` treated as
/// bytes.
///
/// Standard alphabet and 3-bytes-to-4-chars grouping, but nonstandard
/// padding: the third sextet character is always emitted (short trailing
/// groups are zero-extended first), and the fourth character of the final
/// group is always `=` — even for a complete 3-byte group, whose last sextet
/// is dropped. So `"M"` encodes as `"TQA="` and `"Man"` as `"TWF="`, and a
/// standard decoder cannot round-trip the output. Wire compatibility demands
/// this shape; do not "fix" it toward RFC 4648.
///
/// Callers guarantee every code point is ≤ 0xFF (the earlier pipeline stages
/// only rotate/XOR byte-range text); higher code points are masked rather
/// than widened.
pub fn encode64(input: &str) -> String {
    let bytes: Vec<u32> = input.chars().map(|c| (c as u32) & 0xFF).collect();
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);

    for (n, chunk) in bytes.chunks(3).enumerate() {
        let a = chunk[0];
        let b = chunk.get(1).copied().unwrap_or(0);
        let c = chunk.get(2).copied().unwrap_or(0);
        let bitmap = (a << 16) | (b << 8) | c;
        let is_final_group = (n + 1) * 3 >= bytes.len();

        out.push(BASE64_ALPHABET[(bitmap >> 18 & 63) as usize] as char);
        out.push(BASE64_ALPHABET[(bitmap >> 12 & 63) as usize] as char);
        out.push(BASE64_ALPHABET[(bitmap >> 6 & 63) as usize] as char);
        out.push(if is_final_group {
            '='
        } else {
            BASE64_ALPHABET[(bitmap & 63) as usize] as char
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_basic() {
        assert_eq!(rotate("abc", 1), "bcd");
        assert_eq!(rotate("XYZ", 3), "ABC");
        assert_eq!(rotate("789", 3), "012");
    }

    #[test]
    fn rotate_passthrough() {
        assert_eq!(rotate("a-b c!", 5), "f-g h!");
    }

    #[test]
    fn rotate_wraps_per_alphabet() {
        // 26 is identity for letters but shifts digits by 26 % 10 = 6
        assert_eq!(rotate("Az9", 26), "Az5");
    }

    #[test]
    fn rotate_zero_is_identity() {
        let s = "Hello, World 42!";
        assert_eq!(rotate(s, 0), s);
    }

    #[test]
    fn xor_is_involutive() {
        let s = "captcha answer 123";
        for key in [0, 1, 97, 255] {
            assert_eq!(xor_stream(&xor_stream(s, key), key), s);
        }
    }

    #[test]
    fn xor_position_dependent() {
        // Same character at different positions encodes differently
        let out = xor_stream("aa", 10);
        let chars: Vec<char> = out.chars().collect();
        assert_ne!(chars[0], chars[1]);
    }

    #[test]
    fn xor_preserves_length() {
        let s = "abcdef";
        assert_eq!(xor_stream(s, 200).chars().count(), s.chars().count());
    }

    #[test]
    fn encode64_variant_vectors() {
        // Zero-extended third character, never "=="
        assert_eq!(encode64(""), "");
        assert_eq!(encode64("M"), "TQA=");
        assert_eq!(encode64("Ma"), "TWE=");
        assert_eq!(encode64("hello"), "aGVsbG8=");
    }

    #[test]
    fn encode64_final_group_drops_last_sextet() {
        // The fourth character of the final group is "=" even when the group
        // is a complete 3 bytes; standard Base64 would be "TWFu"/"YWJjZGVm"
        assert_eq!(encode64("Man"), "TWF=");
        assert_eq!(encode64("abcdef"), "YWJjZGV=");
    }

    #[test]
    fn encode64_non_final_groups_are_full() {
        // Only the final group is truncated; "hel" passes through intact
        assert!(encode64("hello").starts_with("aGVs"));
    }

    #[test]
    fn encode64_high_bytes() {
        // 0xFF 0xFE 0xFD
        let s: String = ['\u{ff}', '\u{fe}', '\u{fd}'].iter().collect();
        assert_eq!(encode64(&s), "//7=");
    }
}
