use std::collections::HashSet;

use serde::Deserialize;

use super::{Condition, ContextRule, Neighbor, Position, RuleKind};
use crate::unicode::{is_coptic_letter, is_free_of_coptic, to_lower};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesConfig {
    syllabic: SyllabicConfig,
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SyllabicConfig {
    vowel: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    name: String,
    kind: RuleKind,
    pattern: String,
    replacement: String,
    position: Option<Position>,
    before: Option<Neighbor>,
    after: Option<Neighbor>,
    marked: Option<bool>,
    note: Option<String>,
}

/// Parsed and validated contents of a rules TOML file.
#[derive(Debug, Clone)]
pub struct ParsedRules {
    pub syllabic_vowel: String,
    pub rules: Vec<ContextRule>,
}

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("syllabic vowel must be non-empty Latin text")]
    InvalidSyllabicVowel,
    #[error("rule {0}: empty pattern")]
    EmptyPattern(String),
    #[error("rule {name}: pattern {pattern} must be lowercase Coptic letters")]
    InvalidPattern { name: String, pattern: String },
    #[error("rule {0}: replacement contains Coptic characters")]
    CopticReplacement(String),
    #[error("duplicate rule name: {0}")]
    DuplicateName(String),
    #[error("duplicate lexical pattern: {0}")]
    DuplicateLexical(String),
    #[error("rule {name}: {reason}")]
    KindMismatch { name: String, reason: String },
}

/// Parse TOML text into an ordered rule list.
pub fn parse_rules_toml(toml_str: &str) -> Result<ParsedRules, RulesError> {
    let config: RulesConfig =
        toml::from_str(toml_str).map_err(|e| RulesError::Parse(e.to_string()))?;

    let vowel = config.syllabic.vowel;
    if vowel.is_empty() || !is_free_of_coptic(&vowel) {
        return Err(RulesError::InvalidSyllabicVowel);
    }

    let mut names = HashSet::new();
    let mut lexical = HashSet::new();
    let mut rules = Vec::with_capacity(config.rules.len());

    for raw in config.rules {
        let rule = build_rule(raw)?;
        if !names.insert(rule.name.clone()) {
            return Err(RulesError::DuplicateName(rule.name));
        }
        if rule.kind == RuleKind::Lexical && !lexical.insert(rule.pattern.clone()) {
            return Err(RulesError::DuplicateLexical(rule.pattern.iter().collect()));
        }
        rules.push(rule);
    }

    Ok(ParsedRules {
        syllabic_vowel: vowel,
        rules,
    })
}

fn build_rule(raw: RawRule) -> Result<ContextRule, RulesError> {
    if raw.pattern.is_empty() {
        return Err(RulesError::EmptyPattern(raw.name));
    }
    if !raw
        .pattern
        .chars()
        .all(|c| is_coptic_letter(c) && to_lower(c) == c)
    {
        return Err(RulesError::InvalidPattern {
            name: raw.name,
            pattern: raw.pattern,
        });
    }
    if !is_free_of_coptic(&raw.replacement) {
        return Err(RulesError::CopticReplacement(raw.name));
    }

    let condition = Condition {
        position: raw.position,
        before: raw.before,
        after: raw.after,
        marked: raw.marked,
    };
    let pattern: Vec<char> = raw.pattern.chars().collect();

    let mismatch = |reason: &str| RulesError::KindMismatch {
        name: raw.name.clone(),
        reason: reason.to_string(),
    };
    match raw.kind {
        RuleKind::Positional if condition.position.is_none() => {
            return Err(mismatch("positional rule needs a position"));
        }
        RuleKind::Combinatorial if condition.position.is_some() => {
            return Err(mismatch("combinatorial rule cannot have a position"));
        }
        RuleKind::Combinatorial if condition.is_unconditional() && pattern.len() < 2 => {
            return Err(mismatch(
                "combinatorial rule needs a neighbor, a mark or a multi-letter pattern",
            ));
        }
        RuleKind::Lexical if !condition.is_unconditional() => {
            return Err(mismatch("lexical rule matches whole words and takes no conditions"));
        }
        _ => {}
    }

    Ok(ContextRule {
        name: raw.name,
        kind: raw.kind,
        pattern,
        replacement: raw.replacement,
        condition,
        note: raw.note,
    })
}
