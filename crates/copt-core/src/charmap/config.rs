use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::{is_coptic, is_coptic_letter, is_free_of_coptic, to_lower};

#[derive(Deserialize)]
struct CharMapConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CharMapError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-Coptic key: {0}")]
    NonCopticKey(String),
    #[error("uppercase key: {0} (capitals are derived from lowercase entries)")]
    UppercaseKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("value for key {0} contains Coptic characters")]
    CopticValue(String),
}

/// Parse TOML text into a sorted `BTreeMap<grapheme, latin>`.
pub fn parse_charmap_toml(toml_str: &str) -> Result<BTreeMap<String, String>, CharMapError> {
    let config: CharMapConfig =
        toml::from_str(toml_str).map_err(|e| CharMapError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(CharMapError::Empty);
    }

    for (key, value) in &config.mappings {
        if key.is_empty() || !key.chars().all(is_coptic) {
            return Err(CharMapError::NonCopticKey(key.clone()));
        }
        if key
            .chars()
            .any(|c| is_coptic_letter(c) && to_lower(c) != c)
        {
            return Err(CharMapError::UppercaseKey(key.clone()));
        }
        if value.is_empty() {
            return Err(CharMapError::EmptyValue(key.clone()));
        }
        // Output must never feed back into the engine as Coptic.
        if !is_free_of_coptic(value) {
            return Err(CharMapError::CopticValue(key.clone()));
        }
    }

    Ok(config.mappings)
}
