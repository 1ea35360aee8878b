use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Blank flap
pub const BLANK: u8 = 0;

/// Solid colour tiles
pub const RED: u8 = 63;
pub const GREEN: u8 = 66;

/// Vestaboard character codes for every glyph a text message may contain.
/// Lower-case letters share the upper-case codes; the board only has capitals.
pub static CHARACTER_CODES: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(' ', BLANK);

    // Letters
    for (idx, ch) in ('A'..='Z').enumerate() {
        map.insert(ch, idx as u8 + 1);
        map.insert(ch.to_ascii_lowercase(), idx as u8 + 1);
    }

    // Digits: 1-9 then 0
    for (idx, ch) in ('1'..='9').enumerate() {
        map.insert(ch, idx as u8 + 27);
    }
    map.insert('0', 36);

    // Punctuation
    for (ch, code) in [
        ('!', 37),
        ('@', 38),
        ('$', 40),
        ('(', 41),
        (')', 42),
        ('-', 44),
        ('+', 46),
        ('&', 47),
        ('=', 48),
        (';', 49),
        (':', 50),
        ('\'', 52),
        ('"', 53),
        ('%', 54),
        (',', 55),
        ('.', 56),
        ('/', 59),
        ('?', 60),
        ('°', 62),
    ] {
        map.insert(ch, code);
    }

    map
});

/// Look up the board code for a character
pub fn encode(ch: char) -> Option<u8> {
    CHARACTER_CODES.get(&ch).copied()
}

/// First character the board cannot show, if any
pub fn first_unsupported(text: &str) -> Option<char> {
    text.chars().find(|c| encode(*c).is_none())
}

/// Encode a word, skipping anything unsupported
pub fn encode_word(word: &str) -> Vec<u8> {
    word.chars().filter_map(encode).collect()
}
