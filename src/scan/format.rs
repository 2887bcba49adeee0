//! Heuristic filter against scanner misreads.
//!
//! Only all-digit reads of a typical barcode length are accepted. No check
//! digit is computed; the backend decides whether a code exists.

/// Lengths of the barcode symbologies in use (EAN/UPC, GTIN-14, SSCC and friends).
pub const ALLOWED_LENGTHS: [usize; 5] = [12, 13, 14, 15, 18];

/// Whether a raw read looks like a real product code.
pub fn is_likely_code(raw: &str) -> bool {
    let code = raw.trim();
    !code.is_empty()
        && code.bytes().all(|b| b.is_ascii_digit())
        && ALLOWED_LENGTHS.contains(&code.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_lengths() {
        assert!(is_likely_code("780123456789")); // 12
        assert!(is_likely_code("7801234567890")); // 13
        assert!(is_likely_code(" 78012345678901 ")); // 14, trimmed
        assert!(is_likely_code("780123456789012")); // 15
        assert!(is_likely_code("780123456789012345")); // 18
    }

    #[test]
    fn test_rejects_other_lengths_and_non_digits() {
        assert!(!is_likely_code(""));
        assert!(!is_likely_code("12345678")); // 8
        assert!(!is_likely_code("7801234567890123")); // 16
        assert!(!is_likely_code("78012345678A0"));
        assert!(!is_likely_code("７８０１２３４５６７８９０")); // full-width digits
    }
}
