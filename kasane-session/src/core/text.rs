//! Script classification and preedit normalization

use unicode_normalization::UnicodeNormalization;

/// Script classes relevant to transliteration target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    Hiragana,
    Katakana,
    Kanji,
}

fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

fn is_katakana(c: char) -> bool {
    // Full-width katakana and half-width katakana letters.
    ('\u{30A1}'..='\u{30FA}').contains(&c) || ('\u{FF66}'..='\u{FF9D}').contains(&c)
}

fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

/// Kana punctuation and marks that belong to neither letter range:
/// prolonged sound mark, voicing marks, and iteration marks.
fn is_kana_symbol(c: char) -> bool {
    matches!(
        c,
        '\u{3099}'..='\u{309E}' | '\u{30FC}' | '\u{30FD}' | '\u{30FE}' | '\u{FF70}'
    )
}

/// True when any character of `text` belongs to `script`.
pub fn contains_script_type(text: &str, script: ScriptType) -> bool {
    text.chars().any(|c| match script {
        ScriptType::Hiragana => is_hiragana(c),
        ScriptType::Katakana => is_katakana(c),
        ScriptType::Kanji => is_kanji(c),
    })
}

/// True when `text` contains a kana symbol such as "ー" or "゛".
pub fn contains_kana_symbol(text: &str) -> bool {
    text.chars().any(is_kana_symbol)
}

/// Canonical normalization applied to preedit text before it is written
/// into a commit result.
pub fn normalize_preedit_text(text: &str) -> String {
    text.nfc().collect()
}
