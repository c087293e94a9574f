//! Fingerprint similarity via Levenshtein distance

/// Default similarity threshold for [`validate_fingerprint`].
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 70;

/// Classic Levenshtein edit distance over scalar values, two-row DP.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Percentage similarity in `0..=100`.
///
/// `100` when equal (including both empty); `0` when exactly one side is
/// empty; otherwise `round((max_len - distance) / max_len * 100)`.
pub fn calculate_similarity(a: &str, b: &str) -> u32 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    ((max_len - distance) as f64 / max_len as f64 * 100.0).round() as u32
}

/// Compare two canvas fingerprints against a similarity threshold
/// (default 70).
///
/// Fail-open by design: a missing fingerprint on either side passes, so an
/// environment without canvas support is never blocked on this signal alone.
pub fn validate_fingerprint(fp1: &str, fp2: &str, threshold: Option<u32>) -> bool {
    if fp1.is_empty() || fp2.is_empty() {
        return true;
    }
    calculate_similarity(fp1, fp2) >= threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_100() {
        assert_eq!(calculate_similarity("abc", "abc"), 100);
        assert_eq!(calculate_similarity("", ""), 100);
    }

    #[test]
    fn one_empty_side_is_0() {
        assert_eq!(calculate_similarity("abc", ""), 0);
        assert_eq!(calculate_similarity("", "abc"), 0);
    }

    #[test]
    fn kitten_sitting() {
        // Distance 3 over max length 7 → round(4/7*100) = 57
        assert_eq!(calculate_similarity("kitten", "sitting"), 57);
    }

    #[test]
    fn symmetric() {
        assert_eq!(
            calculate_similarity("1a2b3c4d", "1a2b3x4d"),
            calculate_similarity("1a2b3x4d", "1a2b3c4d"),
        );
    }

    #[test]
    fn single_edit_on_short_fingerprint() {
        // 7 of 8 chars intact → 88
        assert_eq!(calculate_similarity("1a2b3c4d", "1a2b3x4d"), 88);
    }

    #[test]
    fn disjoint_strings_score_low() {
        assert!(calculate_similarity("aaaa", "zzzz") < 10);
    }

    #[test]
    fn fingerprint_fail_open() {
        assert!(validate_fingerprint("1a2b3c4d", "", None));
        assert!(validate_fingerprint("", "1a2b3c4d", None));
        assert!(validate_fingerprint("", "", None));
    }

    #[test]
    fn fingerprint_threshold_boundary() {
        // 88% similar: passes 70 and 88, fails 89
        assert!(validate_fingerprint("1a2b3c4d", "1a2b3x4d", None));
        assert!(validate_fingerprint("1a2b3c4d", "1a2b3x4d", Some(88)));
        assert!(!validate_fingerprint("1a2b3c4d", "1a2b3x4d", Some(89)));
    }

    #[test]
    fn fingerprint_mismatch_blocked() {
        assert!(!validate_fingerprint("aaaaaaaa", "zzzzzzzz", None));
    }
}
