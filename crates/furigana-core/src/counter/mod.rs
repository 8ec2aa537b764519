//! Counter normalization.
//!
//! Rewrites `<number><counter>` sequences (3人, 20日, 三日) to their
//! idiomatic irregular reading before the line reaches the oracle, which
//! tends to read them compositionally (さんじん, にじゅうにち).
//!
//! Numbers are decimal digit runs, and optionally simple kanji numerals
//! (〇 to 九 with at most one 十, so 一 to 九十九).

mod config;

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;

use crate::unicode::decimal_digit;

pub use config::{counters, default_toml, init_custom, parse_counters_toml, CounterConfigError};

/// A piece of a line after counter matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPiece<'a> {
    /// Text with no mapped counter in it.
    Text(&'a str),
    /// A matched `<digits><counter>` span and its irregular reading.
    Counter { surface: &'a str, reading: &'a str },
}

const KANJI_NUMERALS: &str = "〇一二三四五六七八九十";

/// Counter kanji → number → irregular reading, plus the pattern built from
/// the counter keys.
#[derive(Debug, Clone)]
pub struct CounterTable {
    readings: BTreeMap<char, BTreeMap<u32, String>>,
    pattern: Option<Regex>,
}

impl CounterTable {
    pub fn new(
        readings: BTreeMap<char, BTreeMap<u32, String>>,
        match_kanji_numerals: bool,
    ) -> Result<Self, CounterConfigError> {
        let pattern = if readings.is_empty() {
            None
        } else {
            let alternation: Vec<String> = readings
                .keys()
                .map(|c| regex::escape(&c.to_string()))
                .collect();
            let number = if match_kanji_numerals {
                format!(r"\d+|[{KANJI_NUMERALS}]+")
            } else {
                r"\d+".to_string()
            };
            let source = format!(r"({number})({})", alternation.join("|"));
            Some(Regex::new(&source).map_err(|e| CounterConfigError::Pattern(e.to_string()))?)
        };
        Ok(Self { readings, pattern })
    }

    /// A table that never matches.
    pub fn empty() -> Self {
        Self {
            readings: BTreeMap::new(),
            pattern: None,
        }
    }

    pub fn reading(&self, counter: char, n: u32) -> Option<&str> {
        self.readings.get(&counter)?.get(&n).map(String::as_str)
    }

    pub fn counter_count(&self) -> usize {
        self.readings.len()
    }

    pub fn entry_count(&self) -> usize {
        self.readings.values().map(BTreeMap::len).sum()
    }

    /// Split `text` at every mapped counter span. Matches with no reading
    /// (unmapped number, unparsable digits) stay inside the surrounding text.
    pub fn split<'a>(&'a self, text: &'a str) -> Vec<CounterPiece<'a>> {
        let Some(pattern) = &self.pattern else {
            return vec![CounterPiece::Text(text)];
        };

        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(digits), Some(counter)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let reading = parse_number(digits.as_str()).and_then(|n| {
                let c = counter.as_str().chars().next()?;
                self.reading(c, n)
            });
            let Some(reading) = reading else {
                continue;
            };
            if whole.start() > last {
                pieces.push(CounterPiece::Text(&text[last..whole.start()]));
            }
            pieces.push(CounterPiece::Counter {
                surface: whole.as_str(),
                reading,
            });
            last = whole.end();
        }
        if last < text.len() || pieces.is_empty() {
            pieces.push(CounterPiece::Text(&text[last..]));
        }
        pieces
    }

    /// Replace every mapped counter span with its bare reading.
    pub fn normalize<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        let pieces = self.split(text);
        if pieces
            .iter()
            .all(|p| matches!(p, CounterPiece::Text(_)))
        {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        for piece in pieces {
            match piece {
                CounterPiece::Text(s) => out.push_str(s),
                CounterPiece::Counter { reading, .. } => out.push_str(reading),
            }
        }
        Cow::Owned(out)
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if s.chars().next().is_some_and(|c| KANJI_NUMERALS.contains(c)) {
        parse_kanji_numeral(s)
    } else {
        parse_digits(s)
    }
}

/// Parse an ASCII or full-width digit run. Other decimal digits and
/// overflow yield `None`.
fn parse_digits(digits: &str) -> Option<u32> {
    digits.chars().try_fold(0u32, |acc, c| {
        let d = decimal_digit(c)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}

fn kanji_digit(c: char) -> Option<u32> {
    let d = match c {
        '〇' => 0,
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(d)
}

/// 三 = 3, 十 = 10, 十四 = 14, 二十 = 20, 二十四 = 24. Anything else
/// (二二, 十十, 〇) is not a counter number.
fn parse_kanji_numeral(s: &str) -> Option<u32> {
    let chars: Vec<char> = s.chars().collect();
    let value = match chars.iter().position(|&c| c == '十') {
        None if chars.len() == 1 => kanji_digit(chars[0])?,
        None => return None,
        Some(p) => {
            let tens = match p {
                0 => 1,
                1 => kanji_digit(chars[0])?,
                _ => return None,
            };
            let ones = match &chars[p + 1..] {
                [] => 0,
                [c] => kanji_digit(*c)?,
                _ => return None,
            };
            tens * 10 + ones
        }
    };
    (value > 0).then_some(value)
}
