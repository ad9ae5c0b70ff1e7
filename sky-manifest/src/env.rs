//! `.env` override files and environment merging.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use thiserror::Error;

/// A malformed `.env` file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct EnvParseError {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

/// Variables parsed from a `.env` file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    vars: Vec<(String, String)>,
}

impl EnvFile {
    /// Parse `.env` content. Any malformed line fails the whole file.
    pub fn parse(content: &str) -> Result<Self, EnvParseError> {
        let mut seen = HashSet::new();
        let mut vars = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let error = |reason: String| EnvParseError {
                line: index + 1,
                reason,
            };
            let Some((key, value)) = parse_line(line).map_err(error)? else {
                continue;
            };
            if !seen.insert(key.clone()) {
                return Err(error(format!("duplicate variable '{key}'")));
            }
            vars.push((key, value));
        }

        Ok(Self { vars })
    }

    /// Read and parse a file. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>, EnvParseError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| EnvParseError {
            line: 0,
            reason: format!("failed to read: {e}"),
        })?;
        Self::parse(&content).map(Some)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.vars.into_iter().collect()
    }
}

/// Merge `overrides` over `ambient`. Overrides win on collision.
///
/// Neither input is modified, and the process environment is never touched.
pub fn merge_env(
    ambient: &BTreeMap<String, String>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = ambient.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Parse one line into a `(key, value)` pair; `None` for blanks and comments.
fn parse_line(line: &str) -> Result<Option<(String, String)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (stripped, has_export) = match trimmed.strip_prefix("export ") {
        Some(stripped) => (stripped.trim_start(), true),
        None => (trimmed, false),
    };

    let eq_index = stripped.find('=').ok_or_else(|| {
        if has_export {
            "expected KEY=VALUE after 'export'".to_string()
        } else {
            "missing '='".to_string()
        }
    })?;

    let key = stripped[..eq_index].trim_end();
    if !is_valid_key(key) {
        return Err(format!("invalid variable name '{key}'"));
    }

    let raw = stripped[eq_index + 1..].trim_start();
    let value = match raw.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let end = raw[1..]
                .find(quote)
                .ok_or_else(|| "unterminated quoted value".to_string())?;
            let rest = raw[end + 2..].trim_start();
            if !(rest.is_empty() || rest.starts_with('#')) {
                return Err("unexpected text after quoted value".to_string());
            }
            let inner = &raw[1..=end];
            if quote == '"' {
                inner.replace("\\n", "\n")
            } else {
                inner.to_string()
            }
        }
        // Unquoted: a ` #` starts a trailing comment
        _ => match raw.find(" #") {
            Some(hash) => raw[..hash].trim_end().to_string(),
            None => raw.trim_end().to_string(),
        },
    };

    Ok(Some((key.to_string(), value)))
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with(|ch: char| ch.is_ascii_digit())
        && key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_lines() {
        let env = EnvFile::parse(
            r#"
# local overrides
API_TOKEN=abc123
export REGION = eu
GREETING="hello world"
RAW='a "quoted" value'
EMPTY=
PORT=8787 # dev server
"#,
        )
        .unwrap();

        assert_eq!(env.len(), 6);
        assert_eq!(env.get("API_TOKEN"), Some("abc123"));
        assert_eq!(env.get("REGION"), Some("eu"));
        assert_eq!(env.get("GREETING"), Some("hello world"));
        assert_eq!(env.get("RAW"), Some("a \"quoted\" value"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get("PORT"), Some("8787"));
    }

    #[test]
    fn test_double_quotes_expand_newlines() {
        let env = EnvFile::parse("KEY=\"line1\\nline2\"").unwrap();
        assert_eq!(env.get("KEY"), Some("line1\nline2"));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let err = EnvFile::parse("GOOD=1\nnot a pair\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.reason, "missing '='");
    }

    #[test]
    fn test_rejects_bad_keys_and_quotes() {
        assert!(EnvFile::parse("1KEY=x").is_err());
        assert!(EnvFile::parse("MY KEY=x").is_err());
        assert!(EnvFile::parse("KEY=\"open").is_err());
        assert!(EnvFile::parse("KEY='a' b").is_err());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = EnvFile::parse("A=1\nA=2").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("duplicate"));
    }

    #[test]
    fn test_merge_override_wins() {
        let ambient = map(&[("HOME", "/root"), ("REGION", "us")]);
        let overrides = map(&[("REGION", "eu"), ("TOKEN", "t")]);

        let merged = merge_env(&ambient, &overrides);

        assert_eq!(merged, map(&[("HOME", "/root"), ("REGION", "eu"), ("TOKEN", "t")]));
        assert_eq!(ambient, map(&[("HOME", "/root"), ("REGION", "us")]));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EnvFile::read(&dir.path().join(".env")), Ok(None));
    }
}
