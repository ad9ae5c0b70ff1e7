//! Shared utility functions for code generation.

/// Turn an arbitrary string into a valid JavaScript identifier.
///
/// Characters outside `[A-Za-z0-9_$]` become `_`, and a leading digit is
/// prefixed with `_`.
pub fn to_js_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Whether `name` can be used verbatim as a single file name.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_js_identifier() {
        assert_eq!(to_js_identifier("get_users__id_"), "get_users__id_");
        assert_eq!(to_js_identifier("list-users"), "list_users");
        assert_eq!(to_js_identifier("2fa"), "_2fa");
        assert_eq!(to_js_identifier(""), "_");
        assert_eq!(to_js_identifier("$ref"), "$ref");
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("getTest"));
        assert!(is_plain_file_name("get_users__id_"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("users/list"));
        assert!(!is_plain_file_name("users\\list"));
        assert!(!is_plain_file_name("bad\nname"));
    }
}
