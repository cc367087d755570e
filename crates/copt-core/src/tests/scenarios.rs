use super::t;

#[test]
fn test_reference_words() {
    assert_eq!(t("ⲡⲛⲟⲩⲧⲉ"), "pnoute");
    assert_eq!(t("ⲧⲉⲕⲕⲗⲏⲥⲓⲁ"), "tekklesia");
    assert_eq!(t("ⲁⲅⲁⲡⲏ"), "agape");
    assert_eq!(t("ⲙⲁⲣⲓⲁ"), "maria");
}

#[test]
fn test_mixed_text_is_preserved() {
    assert_eq!(t("Hello ⲡⲛⲟⲩⲧⲉ!"), "Hello pnoute!");
    assert_eq!(t("1. ⲁⲅⲁⲡⲏ, ⲙⲁⲣⲓⲁ;\n"), "1. agape, maria;\n");
}

#[test]
fn test_empty() {
    assert_eq!(t(""), "");
}

#[test]
fn test_sentence() {
    assert_eq!(t("ⲁⲛⲟⲕ ⲟⲩⲛ ⲟⲩⲙⲁⲓⲛⲟⲩⲧⲉ"), "anok oun oumainoute");
}

#[test]
fn test_capitals() {
    assert_eq!(t("Ⲡⲛⲟⲩⲧⲉ"), "Pnoute");
    assert_eq!(t("ⲠⲚⲞⲨⲦⲈ"), "PNOUTE");
    assert_eq!(t("Ⲑⲉⲟⲧⲟⲕⲟⲥ"), "Theotokos");
    assert_eq!(t("Ϣ"), "Sh");
}

#[test]
fn test_gamma_before_velar_is_nasal() {
    assert_eq!(t("ⲁⲅⲅⲉⲗⲟⲥ"), "angelos");
    assert_eq!(t("ⲉⲩⲁⲅⲅⲉⲗⲓⲟⲛ"), "evangelion");
}

#[test]
fn test_beta_forms() {
    assert_eq!(t("ⲛⲟⲃⲓ"), "novi");
    assert_eq!(t("ⲁⲃⲣⲁⲁⲙ"), "abraam");
    assert_eq!(t("ⲓⲁⲕⲱⲃ"), "yakob");
}

#[test]
fn test_iota_glide() {
    assert_eq!(t("ⲓⲱⲁⲛⲛⲏⲥ"), "yoannes");
    assert_eq!(t("ⲁⲓⲁ"), "aya");
    // between consonant and vowel it stays a vowel
    assert_eq!(t("ⲙⲁⲣⲓⲁ"), "maria");
}

#[test]
fn test_initial_nasal_cluster_gets_vowel() {
    assert_eq!(t("ⲛⲑⲟϥ"), "enthof");
    assert_eq!(t("ⲙⲙⲟϥ"), "emmof");
    assert_eq!(t("ⲛⲧⲉ"), "ente");
}

#[test]
fn test_jinkim_on_consonant_inserts_vowel() {
    assert_eq!(t("ⲡ\u{0300}ⲟⲩⲣⲟ"), "epouro");
    assert_eq!(t("ⲛ\u{0300}ⲧⲉ"), "ente");
    assert_eq!(t("ⲙ\u{0305}ⲡⲉ"), "empe");
    assert_eq!(t("ⲡⲓⲣ\u{0300}ⲱⲙⲓ"), "pieromi");
}

#[test]
fn test_jinkim_on_vowel_is_silent() {
    assert_eq!(t("ⲁ\u{0300}ⲙⲟⲩ"), "amou");
}

#[test]
fn test_accent_marks_are_dropped() {
    assert_eq!(t("ⲁ\u{0308}ⲅⲁⲡⲏ"), "agape");
    assert_eq!(t("ⲁ\u{2CF1}ⲅⲁⲡⲏ"), "agape");
}

#[test]
fn test_final_geminate_is_simplified() {
    assert_eq!(t("ⲁⲗⲗ"), "al");
    assert_eq!(t("ⲁⲗⲗⲁ"), "alla");
    assert_eq!(t("ⲧⲉⲕⲕⲗⲏⲥⲓⲁ"), "tekklesia");
}

#[test]
fn test_upsilon_after_a_or_e() {
    assert_eq!(t("ⲁⲩⲱ"), "avo");
    assert_eq!(t("ⲕⲩⲣⲓⲟⲥ"), "kurios");
}

#[test]
fn test_lexical_exceptions() {
    assert_eq!(t("ⲓⲏⲥⲟⲩⲥ ⲡⲭⲣⲓⲥⲧⲟⲥ"), "Iesous Pikhristos");
    assert_eq!(t("ⲫⲛⲟⲩϯ"), "Efnouti");
    assert_eq!(t("ⲕⲩⲣⲓⲉ ⲉⲗⲉⲏⲥⲟⲛ"), "kyrie eleison");
    assert_eq!(t("ⲁⲗⲗⲏⲗⲟⲩⲓⲁ"), "allilouia");
}

#[test]
fn test_nomina_sacra_with_overline() {
    assert_eq!(t("ⲓ\u{0305}ⲏ\u{0305}ⲥ\u{0305}"), "Iesous");
    assert_eq!(t("ⲡ\u{0305}ⲭ\u{0305}ⲥ\u{0305}"), "Pikhristos");
}

#[test]
fn test_exception_casing() {
    assert_eq!(t("Ⲁⲙⲏⲛ"), "Amin");
    assert_eq!(t("ⲀⲘⲎⲚ"), "AMIN");
    assert_eq!(t("ⲁⲙⲏⲛ"), "amin");
}

#[test]
fn test_exception_only_matches_whole_words() {
    // ⲁⲙⲏⲛ inside a longer word is not the exception
    assert_eq!(t("ⲁⲙⲏⲛⲟⲥ"), "amenos");
}

#[test]
fn test_coptic_punctuation() {
    assert_eq!(t("ⲁⲙⲏⲛ⳾"), "amin.");
    assert_eq!(t("ⲛⲓⲙ⳺"), "nim?");
    assert_eq!(t("ⲁⲛ⳿ⲟⲕ"), "an-ok");
}

#[test]
fn test_unmapped_letters_pass_through() {
    assert_eq!(t("ⲁ\u{2CB3}"), "a\u{2CB3}");
    assert_eq!(t("\u{2CB3}\u{0305}"), "\u{2CB3}\u{0305}");
    // symbols are not letters and have no entry
    assert_eq!(t("\u{2CE5}"), "\u{2CE5}");
}

#[test]
fn test_stray_marks_pass_through() {
    assert_eq!(t("a\u{0305}"), "a\u{0305}");
    assert_eq!(t("\u{0300}ⲁ"), "\u{0300}a");
}

#[test]
fn test_greek_is_not_coptic() {
    assert_eq!(t("αγαπη"), "αγαπη");
}
