//! Default Latin renderings for Coptic graphemes.
//!
//! The map is a char-keyed trie built from a TOML table, so fixed digraphs
//! such as ⲟⲩ are found by longest match. Lookups never fail: anything absent
//! from the table comes back unchanged.

mod config;
mod table;
mod trie;

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

pub use config::{parse_charmap_toml, CharMapError};
pub use table::DEFAULT_TOML;
use trie::GraphemeTrie;

/// Immutable grapheme → Latin table.
pub struct CharMap {
    trie: GraphemeTrie,
    len: usize,
}

impl CharMap {
    /// Parse and validate a `[mappings]` TOML table.
    pub fn from_toml(toml_str: &str) -> Result<Self, CharMapError> {
        let map = parse_charmap_toml(toml_str)?;
        let mut trie = GraphemeTrie::new();
        for (grapheme, latin) in &map {
            trie.insert(grapheme, latin);
        }
        Ok(Self {
            trie,
            len: map.len(),
        })
    }

    /// The embedded default table, built once and shared.
    pub fn default_shared() -> Arc<CharMap> {
        static INSTANCE: OnceLock<Arc<CharMap>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Arc::new(CharMap::from_toml(DEFAULT_TOML).expect("charmap TOML must be valid"))
            })
            .clone()
    }

    /// Number of graphemes in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Default rendering of a whole grapheme; identity for unknown input.
    pub fn lookup<'a>(&'a self, grapheme: &'a str) -> Cow<'a, str> {
        let lowered: Vec<char> = grapheme.chars().map(crate::unicode::to_lower).collect();
        match self.trie.longest_match(&lowered) {
            Some((len, latin)) if len == lowered.len() => Cow::Borrowed(latin),
            _ => Cow::Borrowed(grapheme),
        }
    }

    /// Longest mapped grapheme at the head of `letters` (lowercase), as
    /// `(chars consumed, rendering)`.
    pub fn longest_match(&self, letters: &[char]) -> Option<(usize, &str)> {
        self.trie.longest_match(letters)
    }

    /// Rendering of a single non-letter character such as Coptic punctuation.
    pub fn symbol(&self, c: char) -> Option<&str> {
        match self.trie.longest_match(&[c]) {
            Some((1, latin)) => Some(latin),
            _ => None,
        }
    }
}

/// Returns the embedded default charmap TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
