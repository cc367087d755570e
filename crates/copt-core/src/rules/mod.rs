//! Contextual rules that override the default character map.
//!
//! Three kinds of rule exist:
//!
//! - **positional**: only at the start or end of a word,
//! - **combinatorial**: depending on the neighboring letters, on a
//!   supra-linear stroke, or on a fixed multi-letter pattern,
//! - **lexical**: whole-word overrides for proper nouns, nomina sacra and
//!   fixed liturgical terms.
//!
//! All rules are exclusive. The engine picks one rule per position and the
//! rule consumes its whole pattern.

mod config;
mod table;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

pub use config::{parse_rules_toml, ParsedRules, RulesError};
pub use table::DEFAULT_TOML;

use crate::unicode::{is_coptic_letter, is_consonant, is_vowel, to_lower};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Positional,
    Combinatorial,
    Lexical,
}

/// Word position a positional rule is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Initial,
    Final,
}

/// Constraint on the letter just before or after a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Neighbor {
    /// No letter: the pattern touches the word edge.
    Boundary,
    Vowel,
    Consonant,
    /// Any of the listed lowercase letters.
    AnyOf(Vec<char>),
}

impl TryFrom<String> for Neighbor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "boundary" => Ok(Self::Boundary),
            "vowel" => Ok(Self::Vowel),
            "consonant" => Ok(Self::Consonant),
            "" => Err("empty neighbor".to_string()),
            letters => {
                if letters
                    .chars()
                    .all(|c| is_coptic_letter(c) && to_lower(c) == c)
                {
                    Ok(Self::AnyOf(letters.chars().collect()))
                } else {
                    Err(format!(
                        "neighbor {letters:?} is neither a class nor lowercase Coptic letters"
                    ))
                }
            }
        }
    }
}

impl Neighbor {
    fn accepts(&self, letter: Option<char>) -> bool {
        match (self, letter) {
            (Self::Boundary, None) => true,
            (Self::Boundary, Some(_)) | (_, None) => false,
            (Self::Vowel, Some(c)) => is_vowel(c),
            (Self::Consonant, Some(c)) => is_consonant(c),
            (Self::AnyOf(set), Some(c)) => set.contains(&c),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    pub position: Option<Position>,
    /// Letter right after the pattern: the pattern occurs *before* it.
    pub before: Option<Neighbor>,
    /// Letter right before the pattern: the pattern occurs *after* it.
    pub after: Option<Neighbor>,
    /// Required presence (or absence) of a stroke on the first letter.
    pub marked: Option<bool>,
}

impl Condition {
    pub fn is_unconditional(&self) -> bool {
        self.position.is_none()
            && self.before.is_none()
            && self.after.is_none()
            && self.marked.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ContextRule {
    pub name: String,
    pub kind: RuleKind,
    /// Lowercase Coptic letters.
    pub pattern: Vec<char>,
    pub replacement: String,
    pub condition: Condition,
    pub note: Option<String>,
}

impl ContextRule {
    /// Test the rule against a word at letter index `at`.
    ///
    /// `letters` holds the lowercase letters of the word and `stroked` tells
    /// which of them carry a supra-linear stroke.
    pub fn matches_at(&self, letters: &[char], stroked: &[bool], at: usize) -> bool {
        let end = at + self.pattern.len();
        if end > letters.len() || letters[at..end] != self.pattern[..] {
            return false;
        }
        let cond = &self.condition;
        match cond.position {
            Some(Position::Initial) if at != 0 => return false,
            Some(Position::Final) if end != letters.len() => return false,
            _ => {}
        }
        if let Some(before) = &cond.before {
            if !before.accepts(letters.get(end).copied()) {
                return false;
            }
        }
        if let Some(after) = &cond.after {
            let prev = at.checked_sub(1).map(|i| letters[i]);
            if !after.accepts(prev) {
                return false;
            }
        }
        match cond.marked {
            Some(want) => stroked.get(at).copied().unwrap_or(false) == want,
            None => true,
        }
    }
}

/// Immutable, indexed rule table.
pub struct RuleSet {
    syllabic_vowel: String,
    rules: Vec<ContextRule>,
    /// Positional and combinatorial rules by first letter, longest pattern
    /// first, then file order.
    by_first: HashMap<char, Vec<usize>>,
    lexicon: HashMap<String, usize>,
}

impl RuleSet {
    pub fn new(parsed: ParsedRules) -> Self {
        let ParsedRules {
            syllabic_vowel,
            rules,
        } = parsed;

        let mut by_first: HashMap<char, Vec<usize>> = HashMap::new();
        let mut lexicon = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            if rule.kind == RuleKind::Lexical {
                lexicon.insert(rule.pattern.iter().collect::<String>(), idx);
            } else if let Some(&first) = rule.pattern.first() {
                by_first.entry(first).or_default().push(idx);
            }
        }
        for indices in by_first.values_mut() {
            // stable: equal lengths keep file order
            indices.sort_by_key(|&i| std::cmp::Reverse(rules[i].pattern.len()));
        }

        Self {
            syllabic_vowel,
            rules,
            by_first,
            lexicon,
        }
    }

    /// Parse and validate a rules TOML table.
    pub fn from_toml(toml_str: &str) -> Result<Self, RulesError> {
        parse_rules_toml(toml_str).map(Self::new)
    }

    /// The embedded default rule table, built once and shared.
    pub fn default_shared() -> Arc<RuleSet> {
        static INSTANCE: OnceLock<Arc<RuleSet>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Arc::new(RuleSet::from_toml(DEFAULT_TOML).expect("rules TOML must be valid"))
            })
            .clone()
    }

    /// Vowel inserted before a consonant that carries a stroke.
    pub fn syllabic_vowel(&self) -> &str {
        &self.syllabic_vowel
    }

    /// All rules in table order.
    pub fn rules(&self) -> &[ContextRule] {
        &self.rules
    }

    /// Whole-word override for a lowercase, mark-free word.
    pub fn exception(&self, word: &str) -> Option<&ContextRule> {
        self.lexicon.get(word).map(|&i| &self.rules[i])
    }

    /// Highest-priority positional or combinatorial rule matching at `at`.
    pub fn find(&self, letters: &[char], stroked: &[bool], at: usize) -> Option<&ContextRule> {
        let first = letters.get(at)?;
        self.by_first
            .get(first)?
            .iter()
            .map(|&i| &self.rules[i])
            .find(|rule| rule.matches_at(letters, stroked, at))
    }
}

/// Returns the embedded default rules TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
