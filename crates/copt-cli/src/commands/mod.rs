use std::fs;
use std::io;
use std::sync::Arc;

use copt_core::charmap::{CharMap, CharMapError};
use copt_core::rules::{RuleSet, RulesError};
use copt_core::settings::{self, SettingsError};
use copt_core::Transliterator;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod corpus_ops;
pub mod translit_ops;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("character map: {0}")]
    CharMap(#[from] CharMapError),
    #[error("rules: {0}")]
    Rules(#[from] RulesError),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
}

fn read_file(path: &str) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

/// Build an engine, replacing either default table with a TOML file.
pub fn load_engine(
    charmap_file: Option<&str>,
    rules_file: Option<&str>,
) -> Result<Transliterator, LoadError> {
    let charmap = match charmap_file {
        Some(path) => Arc::new(CharMap::from_toml(&read_file(path)?)?),
        None => CharMap::default_shared(),
    };
    let rules = match rules_file {
        Some(path) => Arc::new(RuleSet::from_toml(&read_file(path)?)?),
        None => RuleSet::default_shared(),
    };
    Ok(Transliterator::new(charmap, rules))
}

/// Install a settings file as the process-wide settings. Must run before
/// anything reads `settings()`.
pub fn load_settings(path: &str) -> Result<(), LoadError> {
    let content = read_file(path)?;
    settings::init_custom(content)?;
    Ok(())
}
