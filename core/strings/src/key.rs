/// Comparison form of a pack key: trimmed, lowercase, and every run of `-`
/// or `_` collapsed to a single `_`.
pub fn norm_key(key: &str) -> String {
    let mut normalized = String::with_capacity(key.len());
    let mut in_separator = false;
    for c in key.trim().chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                normalized.push('_');
            }
            in_separator = true;
        } else {
            in_separator = false;
            normalized.extend(c.to_lowercase());
        }
    }
    normalized
}

/// Normalized key split into its base and trailing digits,
/// e.g. `skin_black_mage19` -> (`skin_black_mage`, `19`).
pub fn key_base_and_num(key: &str) -> (String, Option<String>) {
    let normalized = norm_key(key);
    let base_len = normalized
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .len();
    if base_len == normalized.len() {
        return (normalized, None);
    }
    let digits = normalized[base_len..].to_string();
    let mut base = normalized;
    base.truncate(base_len);
    (base, Some(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_key() {
        assert_eq!(norm_key("  Skin-Black__Mage "), "skin_black_mage");
        assert_eq!(norm_key("a-_-b"), "a_b");
        assert_eq!(norm_key(""), "");
    }

    #[test]
    fn test_key_base_and_num() {
        assert_eq!(
            key_base_and_num("skin_black_mage19"),
            ("skin_black_mage".to_string(), Some("19".to_string()))
        );
        assert_eq!(key_base_and_num("Title-Screen"), ("title_screen".to_string(), None));
        assert_eq!(key_base_and_num("42"), (String::new(), Some("42".to_string())));
    }
}
