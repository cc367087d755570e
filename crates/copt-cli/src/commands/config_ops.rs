use std::fs;

use copt_core::rules::RuleKind;
use copt_core::{charmap, rules, settings};

pub fn charmap_export() {
    print!("{}", charmap::default_toml());
}

pub fn charmap_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(charmap::parse_charmap_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn rules_export() {
    print!("{}", rules::default_toml());
}

pub fn rules_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let parsed = die!(rules::parse_rules_toml(&content), "Error: {}");
    let count = |kind: RuleKind| parsed.rules.iter().filter(|r| r.kind == kind).count();
    println!(
        "OK: {} rules (positional={}, combinatorial={}, lexical={}), syllabic vowel {:?}",
        parsed.rules.len(),
        count(RuleKind::Positional),
        count(RuleKind::Combinatorial),
        count(RuleKind::Lexical),
        parsed.syllabic_vowel
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: enhance.endpoint={}, enhance.timeout_secs={}, output.file_name={}",
        s.enhance.endpoint, s.enhance.timeout_secs, s.output.file_name
    );
}
