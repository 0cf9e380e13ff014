//! Serde helper functions for query-string deserialization.
//!
//! Query filters submitted with an empty value (`?firstname=`) are ignored,
//! so empty or whitespace-only strings are treated as `None`.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
