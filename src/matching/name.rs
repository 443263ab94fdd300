// src/matching/name.rs - Listing name canonicalization
use once_cell::sync::Lazy;
use regex::Regex;

/// Generic lodging-category words. Removed wherever they occur, including
/// inside longer tokens ("seahotelview" -> "seaview").
pub const LODGING_WORDS: [&str; 7] = [
    "hotel",
    "resort",
    "suites",
    "apartments",
    "rooms",
    "villa",
    "pension",
];

static TRADEMARK_GLYPHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[™®©℠]|\((?:tm|r|c|sm)\)").unwrap());

static LODGING_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&LODGING_WORDS.join("|")).unwrap());

/// Canonicalizes a listing name into a comparable token string.
///
/// Lowercases, strips trademark glyphs (both the Unicode symbols and their
/// parenthesized ASCII spellings), removes lodging-category words, drops
/// everything outside `[a-z0-9 ]` and collapses whitespace. Symbol-only
/// input comes back empty.
///
/// The result is a fixed point: `normalize_name(&normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = name.to_lowercase();
    normalized = TRADEMARK_GLYPHS.replace_all(&normalized, "").into_owned();
    normalized = remove_lodging_words(normalized);

    normalized = normalized
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    // Dropping punctuation can splice a category word back together ("ho-tel").
    normalized = remove_lodging_words(normalized);

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_lodging_words(mut text: String) -> String {
    // Removal can expose a new occurrence ("hohoteltel"), so run to a fixed point.
    while LODGING_WORD_PATTERN.is_match(&text) {
        text = LODGING_WORD_PATTERN.replace_all(&text, "").into_owned();
    }
    text
}
