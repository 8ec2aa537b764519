use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::unicode::{is_hiragana, is_hiragana_reading, is_kanji, is_katakana, katakana_to_hiragana};

use super::{OracleToken, Transliterator};

#[derive(Deserialize)]
struct LexiconFile {
    entries: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("empty surface in [entries]")]
    EmptySurface,
    #[error("reading for {0} must be non-empty hiragana")]
    InvalidReading(String),
}

/// Parse lexicon TOML (`[entries] "<surface>" = "<hiragana>"`).
pub fn parse_lexicon_toml(toml_str: &str) -> Result<LexiconTransliterator, LexiconError> {
    let file: LexiconFile =
        toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;
    for (surface, reading) in &file.entries {
        if surface.is_empty() {
            return Err(LexiconError::EmptySurface);
        }
        if !is_hiragana_reading(reading) {
            return Err(LexiconError::InvalidReading(surface.clone()));
        }
    }
    Ok(LexiconTransliterator::from_entries(file.entries))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Hiragana,
    Katakana,
    Kanji,
    Other,
}

fn script_of(c: char) -> Script {
    if is_hiragana(c) {
        Script::Hiragana
    } else if is_katakana(c) {
        Script::Katakana
    } else if is_kanji(c) {
        Script::Kanji
    } else {
        Script::Other
    }
}

/// Table-driven oracle: greedy longest match over a surface → reading table.
///
/// Text not covered by the table is grouped into same-script runs. Hiragana
/// reads as itself, katakana as its hiragana fold, and anything else
/// (including kanji the table does not know) as itself.
#[derive(Debug, Clone, Default)]
pub struct LexiconTransliterator {
    entries: HashMap<String, String>,
    max_len: usize,
}

impl LexiconTransliterator {
    pub fn from_entries<I, S, R>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        let entries: HashMap<String, String> = entries
            .into_iter()
            .map(|(s, r)| (s.into(), r.into()))
            .filter(|(s, _)| !s.is_empty())
            .collect();
        let max_len = entries.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        Self { entries, max_len }
    }

    pub fn open(path: &Path) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path)?;
        parse_lexicon_toml(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest table entry starting at `chars[pos..]`, as (char length, reading).
    fn longest_match(&self, chars: &[char], pos: usize) -> Option<(usize, &str)> {
        let limit = self.max_len.min(chars.len() - pos);
        let mut key = String::new();
        let mut best = None;
        for (n, &c) in chars[pos..pos + limit].iter().enumerate() {
            key.push(c);
            if let Some(reading) = self.entries.get(&key) {
                best = Some((n + 1, reading.as_str()));
            }
        }
        best
    }
}

impl Transliterator for LexiconTransliterator {
    fn transliterate(&self, text: &str) -> Vec<OracleToken> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            if let Some((len, reading)) = self.longest_match(&chars, pos) {
                tokens.push(OracleToken::new(
                    chars[pos..pos + len].iter().collect::<String>(),
                    reading,
                ));
                pos += len;
                continue;
            }

            let script = script_of(chars[pos]);
            let mut end = pos + 1;
            while end < chars.len()
                && script_of(chars[end]) == script
                && self.longest_match(&chars, end).is_none()
            {
                end += 1;
            }
            let orig: String = chars[pos..end].iter().collect();
            let hira = match script {
                Script::Katakana => katakana_to_hiragana(&orig),
                _ => orig.clone(),
            };
            if script == Script::Kanji {
                debug!(surface = %orig, "kanji not in lexicon");
            }
            tokens.push(OracleToken { orig, hira });
            pos = end;
        }

        tokens
    }
}
