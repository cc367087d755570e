//! Minimal `.env` reader for the API key.
//!
//! Lines are `KEY=VALUE`, optionally prefixed with `export`. Blank lines and
//! `#` comments are skipped; one pair of matching quotes around the value is
//! removed. The process environment always wins over the file.

use std::fs;
use std::path::Path;

pub const DOTENV_FILE: &str = ".env";

/// Value of `name` in the `.env` file at `path`, if the file exists and
/// assigns a non-empty value.
pub fn lookup(path: &Path, name: &str) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    parse(&content, name)
}

fn parse(content: &str, name: &str) -> Option<String> {
    let mut found = None;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() != name {
            continue;
        }
        let value = unquote(value.trim());
        // last assignment wins
        found = (!value.is_empty()).then(|| value.to_string());
    }
    found
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Key from the process environment, else from the `.env` file at `path`.
pub fn api_key(name: &str, path: &Path) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| lookup(path, name))
}
