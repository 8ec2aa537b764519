#![cfg(test)]

use std::collections::HashMap;

use crate::counter::{parse_counters_toml, CounterTable};
use crate::oracle::{LexiconTransliterator, OracleToken, Transliterator};
use crate::overrides::{parse_overrides_toml, PreferredReadingTable};

/// Shared lexicon for aligner tests.
///
/// Whole-word entries give the token readings; single-kanji entries give the
/// per-character guesses used when a reading has to be apportioned.
pub fn test_oracle() -> LexiconTransliterator {
    LexiconTransliterator::from_entries([
        // words
        ("三日", "みっか"),
        ("会おう", "あおう"),
        ("勉強する", "べんきょうする"),
        ("大人しい", "おとなしい"),
        ("気持ち", "きもち"),
        ("お茶", "おちゃ"),
        ("行った", "いった"),
        ("地球", "ちきゅう"),
        ("太郎", "たろう"),
        ("今日", "きょう"),
        ("また", "また"),
        ("に", "に"),
        ("で", "で"),
        ("が", "が"),
        ("は", "は"),
        // single kanji
        ("後", "ご"),
        ("会", "かい"),
        ("勉", "べん"),
        ("強", "きょう"),
        ("大", "だい"),
        ("人", "じん"),
        ("気", "き"),
        ("持", "じ"),
        ("茶", "ちゃ"),
        ("行", "こう"),
        ("君", "くん"),
        ("私", "し"),
        ("何", "か"),
    ])
}

pub fn default_counters() -> CounterTable {
    parse_counters_toml(crate::counter::default_toml()).unwrap()
}

pub fn default_overrides() -> PreferredReadingTable {
    parse_overrides_toml(crate::overrides::default_toml()).unwrap()
}

/// Oracle that returns fixed tokens for known lines and defers to
/// `test_oracle()` for everything else (including single characters).
pub struct ScriptedOracle {
    lines: HashMap<String, Vec<OracleToken>>,
    fallback: LexiconTransliterator,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            lines: HashMap::new(),
            fallback: test_oracle(),
        }
    }

    pub fn line(mut self, text: &str, tokens: &[(&str, &str)]) -> Self {
        let tokens = tokens
            .iter()
            .map(|&(orig, hira)| OracleToken::new(orig, hira))
            .collect();
        self.lines.insert(text.to_string(), tokens);
        self
    }
}

impl Transliterator for ScriptedOracle {
    fn transliterate(&self, text: &str) -> Vec<OracleToken> {
        match self.lines.get(text) {
            Some(tokens) => tokens.clone(),
            None => self.fallback.transliterate(text),
        }
    }
}

/// Units as (base, reading) pairs for compact assertions.
pub fn pairs(units: &[crate::unit::AlignmentUnit]) -> Vec<(&str, Option<&str>)> {
    units
        .iter()
        .map(|u| (u.base.as_str(), u.reading.as_deref()))
        .collect()
}
