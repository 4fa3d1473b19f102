//! Canonical key normalization.
//!
//! The same function is applied when indexing a field value and when
//! indexing a search prompt. Divergence between the two would break every
//! lookup, so the identity is pinned down by tests here and exercised
//! end-to-end in the index tests.

/// Map raw text to its canonical lookup key: trimmed and uppercased.
///
/// Deterministic and total; there are no error conditions.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases() {
        assert_eq!(normalize_key("aapl"), "AAPL");
        assert_eq!(normalize_key("Apple Inc"), "APPLE INC");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(normalize_key("  msft \t"), "MSFT");
        assert_eq!(normalize_key("\nbrk.b"), "BRK.B");
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        assert_eq!(normalize_key(" agilent  technologies "), "AGILENT  TECHNOLOGIES");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["  aApL ", "SPY", "", " \t ", "Berkshire Hathaway"] {
            let once = normalize_key(raw);
            assert_eq!(normalize_key(&once), once);
        }
    }

    #[test]
    fn test_empty_and_blank_map_to_empty_key() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("   "), "");
    }
}
