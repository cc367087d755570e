//! Rule-based Coptic → Latin transliteration.
//!
//! Input is split into words: maximal runs of Coptic letters, each letter
//! carrying the combining marks that follow it. Everything between words is
//! copied through, except Coptic punctuation that has a map entry.
//!
//! Inside a word the order of precedence is
//!
//! 1. a lexical exception for the whole word,
//! 2. the longest positional or combinatorial rule at the current letter,
//! 3. the longest character-map entry at the current letter,
//! 4. the letter itself, unchanged, with its marks.
//!
//! A consonant carrying a jinkim or supra-linear stroke gets the syllabic
//! vowel in front of its rendering, unless the rule that renders it tests the
//! stroke itself. Marks are otherwise dropped from the output.

use std::sync::{Arc, OnceLock};

use tracing::{debug, debug_span};

use crate::charmap::CharMap;
use crate::rules::{ContextRule, RuleSet};
use crate::unicode::{is_coptic_letter, is_consonant, mark_kind, to_lower, MarkKind};

/// One Coptic letter of the input with its trailing combining marks.
struct Letter {
    lower: char,
    original: char,
    upper: bool,
    stroked: bool,
    marks: String,
}

impl Letter {
    fn new(c: char) -> Self {
        let lower = to_lower(c);
        Self {
            lower,
            original: c,
            upper: lower != c,
            stroked: false,
            marks: String::new(),
        }
    }

    fn attach(&mut self, mark: char, kind: MarkKind) {
        if kind == MarkKind::Stroke {
            self.stroked = true;
        }
        self.marks.push(mark);
    }
}

/// Character map plus rule table. Cheap to clone; both tables are shared.
#[derive(Clone)]
pub struct Transliterator {
    charmap: Arc<CharMap>,
    rules: Arc<RuleSet>,
}

impl Transliterator {
    pub fn new(charmap: Arc<CharMap>, rules: Arc<RuleSet>) -> Self {
        Self { charmap, rules }
    }

    /// Engine over the embedded default tables.
    pub fn global() -> &'static Transliterator {
        static INSTANCE: OnceLock<Transliterator> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            Transliterator::new(CharMap::default_shared(), RuleSet::default_shared())
        })
    }

    pub fn charmap(&self) -> &CharMap {
        &self.charmap
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Transliterate `text`. Total and deterministic; non-Coptic text is
    /// returned as is.
    pub fn translit(&self, text: &str) -> String {
        let _span = debug_span!("translit", bytes = text.len()).entered();

        let mut out = String::with_capacity(text.len());
        let mut word: Vec<Letter> = Vec::new();

        for c in text.chars() {
            if is_coptic_letter(c) {
                word.push(Letter::new(c));
                continue;
            }
            if let (Some(kind), Some(last)) = (mark_kind(c), word.last_mut()) {
                last.attach(c, kind);
                continue;
            }
            self.render_word(&word, &mut out);
            word.clear();
            match self.charmap.symbol(c) {
                Some(latin) => out.push_str(latin),
                None => out.push(c),
            }
        }
        self.render_word(&word, &mut out);

        out
    }

    /// Distinct Coptic letters in `text` that have no map entry of their
    /// own, in order of first appearance. These pass through untouched.
    pub fn unmapped_letters(&self, text: &str) -> Vec<char> {
        let mut found: Vec<char> = Vec::new();
        for c in text.chars().filter(|&c| is_coptic_letter(c)) {
            let known = self.charmap.longest_match(&[to_lower(c)]).is_some();
            if !known && !found.contains(&c) {
                found.push(c);
            }
        }
        found
    }

    fn render_word(&self, word: &[Letter], out: &mut String) {
        if word.is_empty() {
            return;
        }

        let letters: Vec<char> = word.iter().map(|l| l.lower).collect();
        let all_upper = word.len() > 1 && word.iter().all(|l| l.upper);

        let key: String = letters.iter().collect();
        if let Some(rule) = self.rules.exception(&key) {
            debug!(rule = %rule.name, "lexical exception");
            push_cased(out, &rule.replacement, word[0].upper, all_upper);
            return;
        }

        let stroked: Vec<bool> = word.iter().map(|l| l.stroked).collect();
        let mut chunk = String::new();
        let mut i = 0;
        while i < word.len() {
            let head = &word[i];
            chunk.clear();

            let consumed = if let Some(rule) = self.rules.find(&letters, &stroked, i) {
                debug!(rule = %rule.name, at = i, "contextual rule");
                if self.needs_syllabic_vowel(head, Some(rule)) {
                    chunk.push_str(self.rules.syllabic_vowel());
                }
                chunk.push_str(&rule.replacement);
                rule.pattern.len()
            } else if let Some((len, latin)) = self.charmap.longest_match(&letters[i..]) {
                if self.needs_syllabic_vowel(head, None) {
                    chunk.push_str(self.rules.syllabic_vowel());
                }
                chunk.push_str(latin);
                len
            } else {
                debug!(letter = %head.original, "unmapped Coptic letter");
                out.push(head.original);
                out.push_str(&head.marks);
                i += 1;
                continue;
            };

            push_cased(out, &chunk, head.upper, all_upper);
            i += consumed;
        }
    }

    fn needs_syllabic_vowel(&self, head: &Letter, rule: Option<&ContextRule>) -> bool {
        let rule_tests_stroke = rule.is_some_and(|r| r.condition.marked == Some(true));
        head.stroked && is_consonant(head.lower) && !rule_tests_stroke
    }
}

/// Transliterate with the default tables.
pub fn translit(text: &str) -> String {
    Transliterator::global().translit(text)
}

fn push_cased(out: &mut String, text: &str, capital: bool, all_upper: bool) {
    if all_upper {
        out.push_str(&text.to_uppercase());
    } else if capital {
        let mut chars = text.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(text);
    }
}
