//! Whole-line transliteration oracle.
//!
//! The oracle segments a line into surface tokens and gives each one a
//! hiragana reading. The aligner trusts its tokenization and only
//! apportions the readings it returns.

mod lexicon;

use serde::{Deserialize, Serialize};

use crate::aligner::AlignError;

pub use lexicon::{parse_lexicon_toml, LexiconError, LexiconTransliterator};

/// One token as segmented by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleToken {
    pub orig: String,
    pub hira: String,
}

impl OracleToken {
    pub fn new(orig: impl Into<String>, hira: impl Into<String>) -> Self {
        Self {
            orig: orig.into(),
            hira: hira.into(),
        }
    }
}

/// The oracle contract: the `orig` fields of the returned tokens concatenate
/// to `text`, no token is empty, and `hira` is hiragana (text the oracle
/// cannot read, such as Latin or punctuation, reads as itself).
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, text: &str) -> Vec<OracleToken>;

    /// Reading of a single character transliterated on its own.
    fn char_reading(&self, c: char) -> String {
        let mut buf = [0u8; 4];
        self.transliterate(c.encode_utf8(&mut buf))
            .into_iter()
            .next()
            .map(|t| t.hira)
            .unwrap_or_default()
    }
}

impl<T: Transliterator + ?Sized> Transliterator for &T {
    fn transliterate(&self, text: &str) -> Vec<OracleToken> {
        (**self).transliterate(text)
    }

    fn char_reading(&self, c: char) -> String {
        (**self).char_reading(c)
    }
}

impl<T: Transliterator + ?Sized> Transliterator for Box<T> {
    fn transliterate(&self, text: &str) -> Vec<OracleToken> {
        (**self).transliterate(text)
    }

    fn char_reading(&self, c: char) -> String {
        (**self).char_reading(c)
    }
}

/// Concatenation of the token surfaces.
pub fn token_surface(tokens: &[OracleToken]) -> String {
    tokens.iter().map(|t| t.orig.as_str()).collect()
}

/// Verify that `tokens` reconstruct `text` exactly.
pub fn check_reconstruction(text: &str, tokens: &[OracleToken]) -> Result<(), AlignError> {
    let actual = token_surface(tokens);
    if actual == text && tokens.iter().all(|t| !t.orig.is_empty()) {
        return Ok(());
    }
    Err(AlignError::OracleContractViolation {
        expected: text.to_string(),
        actual,
    })
}
