//! Key matching for fuzzy lookups and pattern deletes.

use regex::Regex;

use super::record::Secrets;
use crate::errors::{CachetteError, Result};

/// Build the fuzzy pattern for `key`.
///
/// Every character of `key` is a literal, and any run of characters may
/// sit between two of them: `"ab"` becomes `a.*?b`. The pattern is not
/// anchored, so it matches wherever the characters appear in order.
pub fn fuzzy_pattern(key: &str) -> Result<Regex> {
    let mut buf = [0u8; 4];
    let pieces: Vec<String> = key
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut buf)))
        .collect();

    Regex::new(&format!("(?s){}", pieces.join(".*?")))
        .map_err(|e| CachetteError::InvalidPattern(e.to_string()))
}

/// Compile a user-supplied regular expression for key matching.
pub fn key_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CachetteError::InvalidPattern(e.to_string()))
}

/// First key, in sorted order, that the fuzzy pattern for `key` matches.
pub fn first_fuzzy_match<'a>(secrets: &'a Secrets, key: &str) -> Result<Option<&'a str>> {
    let pattern = fuzzy_pattern(key)?;
    Ok(secrets
        .keys()
        .find(|candidate| pattern.is_match(candidate))
        .map(String::as_str))
}

/// Every key, in sorted order, that `pattern` finds a match in.
pub fn matching_keys(secrets: &Secrets, pattern: &Regex) -> Vec<String> {
    secrets
        .keys()
        .filter(|candidate| pattern.is_match(candidate))
        .cloned()
        .collect()
}
