use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::{is_hiragana_reading, is_kanji};

use super::CounterTable;

pub const DEFAULT_TOML: &str = include_str!("default_counters.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Deserialize)]
struct CounterConfig {
    #[serde(default = "default_true")]
    match_kanji_numerals: bool,
    counters: BTreeMap<String, BTreeMap<String, String>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum CounterConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[counters] table is empty")]
    Empty,
    #[error("counter key must be a single kanji: {0}")]
    InvalidCounter(String),
    #[error("invalid number {number:?} under counter {counter}")]
    InvalidNumber { counter: String, number: String },
    #[error("reading for {counter}{number} must be non-empty hiragana")]
    InvalidReading { counter: String, number: u32 },
    #[error("counter pattern error: {0}")]
    Pattern(String),
    #[error("counter table already initialized")]
    AlreadyInitialized,
}

/// Parse and validate counter TOML into a ready-to-use table.
pub fn parse_counters_toml(toml_str: &str) -> Result<CounterTable, CounterConfigError> {
    let config: CounterConfig =
        toml::from_str(toml_str).map_err(|e| CounterConfigError::Parse(e.to_string()))?;

    if config.counters.is_empty() {
        return Err(CounterConfigError::Empty);
    }

    let mut readings: BTreeMap<char, BTreeMap<u32, String>> = BTreeMap::new();
    for (counter, numbers) in config.counters {
        let mut chars = counter.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) if is_kanji(c) => c,
            _ => return Err(CounterConfigError::InvalidCounter(counter)),
        };
        let mut parsed = BTreeMap::new();
        for (number, reading) in numbers {
            let n: u32 = number
                .parse()
                .map_err(|_| CounterConfigError::InvalidNumber {
                    counter: counter.clone(),
                    number: number.clone(),
                })?;
            if !is_hiragana_reading(&reading) {
                return Err(CounterConfigError::InvalidReading {
                    counter: counter.clone(),
                    number: n,
                });
            }
            parsed.insert(n, reading);
        }
        readings.insert(c, parsed);
    }

    CounterTable::new(readings, config.match_kanji_numerals)
}

/// Set custom counter TOML before first `counters()` call.
pub fn init_custom(toml_content: String) -> Result<(), CounterConfigError> {
    parse_counters_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| CounterConfigError::AlreadyInitialized)
}

/// Get or initialize the global counter table. The pattern is compiled once here.
pub fn counters() -> &'static CounterTable {
    static INSTANCE: OnceLock<CounterTable> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_TOML);
        parse_counters_toml(toml_str).expect("counter TOML must be valid")
    })
}

/// Returns the embedded default counter TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
