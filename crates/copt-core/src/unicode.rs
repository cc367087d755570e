//! Character-level Unicode classification for Coptic text.

/// Any code point of the Coptic block (U+2C80..U+2CFF) or the Coptic letters
/// kept in the Greek block (U+03E2..U+03EF).
pub fn is_coptic(c: char) -> bool {
    ('\u{2C80}'..='\u{2CFF}').contains(&c) || ('\u{03E2}'..='\u{03EF}').contains(&c)
}

/// Coptic letters, both cases. Symbols (U+2CE4..U+2CEA), combining marks
/// (U+2CEF..U+2CF1) and punctuation (U+2CF9..U+2CFF) are excluded.
pub fn is_coptic_letter(c: char) -> bool {
    ('\u{2C80}'..='\u{2CE3}').contains(&c)
        || ('\u{2CEB}'..='\u{2CEE}').contains(&c)
        || ('\u{2CF2}'..='\u{2CF3}').contains(&c)
        || ('\u{03E2}'..='\u{03EF}').contains(&c)
}

/// Lowercase form of a Coptic letter. Every Coptic case pair maps to a
/// single code point, so the first char of `to_lowercase` is the whole story.
pub fn to_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Vowel letters, lowercase only.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'ⲁ' | 'ⲉ' | 'ⲏ' | 'ⲓ' | 'ⲟ' | 'ⲩ' | 'ⲱ')
}

/// Lowercase Coptic letters that are not vowels.
pub fn is_consonant(c: char) -> bool {
    is_coptic_letter(c) && !is_vowel(c)
}

/// What a combining mark means when it follows a Coptic letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Jinkim or supra-linear stroke: the letter carrying it is syllabic.
    Stroke,
    /// Accent-like marks with no effect on pronunciation.
    Drop,
}

/// Classify a combining mark that can attach to a Coptic letter.
/// Returns `None` for everything else, which ends the current word.
pub fn mark_kind(c: char) -> Option<MarkKind> {
    match c {
        // jinkim, macron, overline, double overline, macron halves
        '\u{0300}' | '\u{0304}' | '\u{0305}' | '\u{033F}' | '\u{FE24}'..='\u{FE26}' => {
            Some(MarkKind::Stroke)
        }
        '\u{0301}' | '\u{0307}' | '\u{0308}' | '\u{2CEF}'..='\u{2CF1}' => Some(MarkKind::Drop),
        _ => None,
    }
}

/// True if `s` contains no Coptic code point at all.
pub fn is_free_of_coptic(s: &str) -> bool {
    !s.chars().any(is_coptic)
}
