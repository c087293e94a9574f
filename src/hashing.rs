//! Non-cryptographic 32-bit string hashes
//!
//! Three independent hash functions (DJB2, SDBM and FNV-1a variants) used by
//! the obfuscation pipeline and the canvas fingerprint. All arithmetic is
//! wrapping 32-bit so results are bit-identical across any conforming
//! implementation — the server-side counterpart of the verification protocol
//! recomputes these and must agree digit for digit.
//!
//! None of these are cryptographic. They are part of a deterrence layer, not
//! a security boundary.

/// Default seed for [`hash_a`] (classic DJB2 initial value).
pub const DJB2_SEED: u32 = 5381;

/// FNV-1a 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// DJB2-variant hash with the default seed.
pub fn hash_a(input: &str) -> u32 {
    hash_a_seeded(input, DJB2_SEED)
}

/// DJB2-variant hash: `acc = acc * 33 + code`, wrapping.
///
/// The seed parameter is how the timestamp-derived combo perturbs the final
/// hash layer of the protocol.
pub fn hash_a_seeded(input: &str, seed: u32) -> u32 {
    let mut acc = seed;
    for code in input.chars().map(|c| c as u32) {
        acc = acc
            .wrapping_shl(5)
            .wrapping_add(acc)
            .wrapping_add(code);
    }
    acc
}

/// SDBM-variant hash: `acc = code + (acc << 6) + (acc << 16) - acc`, wrapping.
pub fn hash_b(input: &str) -> u32 {
    let mut acc: u32 = 0;
    for code in input.chars().map(|c| c as u32) {
        acc = code
            .wrapping_add(acc.wrapping_shl(6))
            .wrapping_add(acc.wrapping_shl(16))
            .wrapping_sub(acc);
    }
    acc
}

/// FNV-1a variant: XOR the code point in, then multiply by the FNV prime
/// expressed as shift-adds (`+= (acc<<1)+(acc<<4)+(acc<<7)+(acc<<8)+(acc<<24)`).
pub fn hash_c(input: &str) -> u32 {
    let mut acc = FNV_OFFSET_BASIS;
    for code in input.chars().map(|c| c as u32) {
        acc ^= code;
        acc = acc
            .wrapping_add(acc.wrapping_shl(1))
            .wrapping_add(acc.wrapping_shl(4))
            .wrapping_add(acc.wrapping_shl(7))
            .wrapping_add(acc.wrapping_shl(8))
            .wrapping_add(acc.wrapping_shl(24));
    }
    acc
}

/// Lowercase base-36 rendering, identical to JS `Number.prototype.toString(36)`
/// for non-negative integers.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    // DIGITS is pure ASCII
    String::from_utf8(out).unwrap_or_default()
}
