//! Every map entry, transliterated on its own, yields its default rendering
//! unless a contextual rule claims the isolated letter.

use crate::charmap::{parse_charmap_toml, DEFAULT_TOML};
use crate::translit::Transliterator;
use crate::unicode::is_coptic_letter;

use super::t;

#[test]
fn test_every_entry_in_isolation() {
    let rules = Transliterator::global().rules();
    let map = parse_charmap_toml(DEFAULT_TOML).unwrap();

    for (grapheme, latin) in &map {
        let letters: Vec<char> = grapheme.chars().collect();
        let stroked = vec![false; letters.len()];
        let expected = match rules.find(&letters, &stroked, 0) {
            Some(rule) if rule.pattern.len() == letters.len() => rule.replacement.as_str(),
            _ => latin.as_str(),
        };
        assert_eq!(t(grapheme), expected, "grapheme {grapheme}");
    }
}

#[test]
fn test_only_beta_is_claimed_by_a_rule_in_isolation() {
    let rules = Transliterator::global().rules();
    let map = parse_charmap_toml(DEFAULT_TOML).unwrap();

    let claimed: Vec<&str> = map
        .keys()
        .filter(|g| {
            let letters: Vec<char> = g.chars().collect();
            rules.find(&letters, &vec![false; letters.len()], 0).is_some()
        })
        .map(String::as_str)
        .collect();
    assert_eq!(claimed, vec!["ⲃ"]);
    assert_eq!(t("ⲃ"), "b");
}

#[test]
fn test_capital_letters_follow_lowercase_entries() {
    let map = parse_charmap_toml(DEFAULT_TOML).unwrap();
    for (grapheme, latin) in &map {
        let mut chars = grapheme.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            continue;
        };
        if !is_coptic_letter(c) || c == 'ⲃ' {
            continue;
        }
        let upper: String = c.to_uppercase().collect();
        if upper == *grapheme {
            // no capital form
            continue;
        }
        let mut expected = latin.clone();
        expected[..1].make_ascii_uppercase();
        assert_eq!(t(&upper), expected, "capital of {grapheme}");
    }
}
