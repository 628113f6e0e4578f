//! The decrypted content of a store: a flat map of string keys to string
//! values, encoded as a single JSON object.
//!
//! A `BTreeMap` keeps keys in lexicographic order, which is the order
//! listings are printed in and the order fuzzy lookups scan in.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{CachetteError, Result};

/// Key -> value mapping held in a store file.
pub type Secrets = BTreeMap<String, String>;

/// Parse decrypted store content.
///
/// Anything other than a JSON object whose values are all strings is
/// reported as `CorruptData`.
pub fn parse(plaintext: &str) -> Result<Secrets> {
    let value: Value = serde_json::from_str(plaintext)
        .map_err(|e| CachetteError::CorruptData(format!("content is not valid JSON: {e}")))?;

    let Value::Object(map) = value else {
        return Err(CachetteError::CorruptData(
            "content is not a JSON object".into(),
        ));
    };

    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            _ => Err(CachetteError::CorruptData(
                "content has a non-string value".into(),
            )),
        })
        .collect()
}

/// Encode a mapping as the JSON object stored inside the envelope.
pub fn serialize(secrets: &Secrets) -> Result<String> {
    serde_json::to_string(secrets)
        .map_err(|e| CachetteError::SerializationError(format!("secrets: {e}")))
}
