//! Name canonicalization
//!
//! Crop names and soil labels arrive in whatever case the caller typed
//! ("Rice", "rice", " Clay "). Catalog keys and query keys both pass through
//! `canonical_key` so every lookup happens in one place.

/// Canonical lookup key: trimmed and lower-cased
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_folded() {
        assert_eq!(canonical_key("Rice"), "rice");
        assert_eq!(canonical_key("  KidneyBeans "), "kidneybeans");
        assert_eq!(canonical_key("clay"), canonical_key("CLAY"));
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(canonical_key("   "), "");
    }
}
