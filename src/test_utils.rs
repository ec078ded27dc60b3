//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a package name (letters, digits, dots, underscores, hyphens)
    pub fn package_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9._-]{0,30}"
    }

    /// Generate a release tag name
    pub fn tag_name() -> impl Strategy<Value = String> {
        (0u32..10, 0u32..50, 0u32..50, any::<bool>()).prop_map(|(major, minor, patch, v)| {
            let prefix = if v { "v" } else { "" };
            format!("{prefix}{major}.{minor}.{patch}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.starts_with('#'));
            prop_assert_eq!(name.trim(), name.as_str());
        }

        #[test]
        fn test_tag_name_generator(tag in tag_name()) {
            let parts: Vec<&str> = tag.trim_start_matches('v').split('.').collect();
            prop_assert_eq!(parts.len(), 3);
        }
    }
}
