//! Character-level Unicode classification for Japanese text.

/// Common kanji: U+4E00..=U+9FAF.
///
/// The upper bound is 龯, one past the traditional end of the CJK Unified
/// Ideographs block used by most kana converters. Extension A and the
/// supplementary planes are not treated as kanji.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FAF}').contains(&c)
}

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes ・ and ー.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

fn is_halfwidth_katakana(c: char) -> bool {
    ('\u{FF65}'..='\u{FF9F}').contains(&c)
}

/// True iff `s` is non-empty and every character is in the Katakana block.
pub fn is_katakana_str(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_katakana)
}

/// Hiragana, katakana (full or half width) or kanji.
pub fn is_japanese_script(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_halfwidth_katakana(c) || is_kanji(c)
}

/// Characters that mark the preceding text as part of a name, which keeps
/// a following honorific-like kanji from being read as a standalone word.
pub fn is_name_fragment_char(c: char) -> bool {
    is_japanese_script(c)
        || c.is_ascii_alphanumeric()
        || ('\u{FF10}'..='\u{FF19}').contains(&c)
        || ('\u{FF21}'..='\u{FF3A}').contains(&c)
        || ('\u{FF41}'..='\u{FF5A}').contains(&c)
        || matches!(c, '・' | '･' | 'ー' | 'ｰ')
}

/// Convert a katakana string to hiragana.
/// Characters without a hiragana counterpart (ー, ヷ, ASCII, etc.) pass through.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Check if a string is a valid hiragana reading.
///
/// Accepts hiragana characters and the prolonged sound mark ー, which
/// commonly appears in readings like "らーめん".
pub fn is_hiragana_reading(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_hiragana(c) || c == 'ー')
}

/// Numeric value of an ASCII or full-width decimal digit.
pub fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}
