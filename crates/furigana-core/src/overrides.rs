//! Preferred readings applied to aligned units.
//!
//! Follows the same OnceLock pattern as the counter table:
//! - `init_custom(toml_content)` sets a custom TOML before first `overrides()` call
//! - `overrides()` returns `&'static PreferredReadingTable`
//! - Defaults are embedded via `include_str!("default_overrides.toml")`

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::unicode::{is_hiragana_reading, is_kanji, is_name_fragment_char};
use crate::unit::AlignmentUnit;

pub const DEFAULT_OVERRIDES_TOML: &str = include_str!("default_overrides.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// When a preferred reading applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingMode {
    #[default]
    Always,
    /// Only when the preceding unit does not look like part of a name.
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferredReading {
    pub reading: String,
    pub mode: ReadingMode,
}

impl PreferredReading {
    pub fn always(reading: impl Into<String>) -> Self {
        Self {
            reading: reading.into(),
            mode: ReadingMode::Always,
        }
    }

    pub fn standalone(reading: impl Into<String>) -> Self {
        Self {
            reading: reading.into(),
            mode: ReadingMode::Standalone,
        }
    }
}

// Table values may be written either as a bare reading or as an inline table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReading {
    Bare(String),
    Tagged {
        reading: String,
        #[serde(default)]
        mode: ReadingMode,
    },
}

impl From<RawReading> for PreferredReading {
    fn from(raw: RawReading) -> Self {
        match raw {
            RawReading::Bare(reading) => PreferredReading::always(reading),
            RawReading::Tagged { reading, mode } => PreferredReading { reading, mode },
        }
    }
}

#[derive(Deserialize)]
struct OverridesFile {
    readings: BTreeMap<String, RawReading>,
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("override key must be a single kanji: {0}")]
    InvalidKey(String),
    #[error("reading for {0} must be non-empty hiragana")]
    InvalidReading(String),
    #[error("override table already initialized")]
    AlreadyInitialized,
}

/// Single kanji → preferred reading.
#[derive(Debug, Clone, Default)]
pub struct PreferredReadingTable {
    entries: BTreeMap<char, PreferredReading>,
}

impl PreferredReadingTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (char, PreferredReading)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, kanji: char) -> Option<&PreferredReading> {
        self.entries.get(&kanji)
    }

    /// Entry for a unit base consisting of exactly one character.
    fn lookup(&self, base: &str) -> Option<&PreferredReading> {
        let mut chars = base.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.get(c),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replace readings of single-kanji units that have a preferred reading.
///
/// Only annotated units are touched, and only their `reading`. Returns the
/// indices of the units that were rewritten.
pub fn apply_overrides(units: &mut [AlignmentUnit], table: &PreferredReadingTable) -> Vec<usize> {
    let mut applied = Vec::new();
    if table.is_empty() {
        return applied;
    }

    for i in 0..units.len() {
        if units[i].reading.is_none() {
            continue;
        }
        let Some(preferred) = table.lookup(&units[i].base) else {
            continue;
        };
        if preferred.mode == ReadingMode::Standalone && i > 0 {
            let prev = &units[i - 1].base;
            if prev.chars().any(is_name_fragment_char) {
                debug!(base = %units[i].base, prev = %prev, "override skipped after name fragment");
                continue;
            }
        }
        units[i].reading = Some(preferred.reading.clone());
        applied.push(i);
    }

    applied
}

pub fn parse_overrides_toml(toml_str: &str) -> Result<PreferredReadingTable, OverrideConfigError> {
    let file: OverridesFile =
        toml::from_str(toml_str).map_err(|e| OverrideConfigError::Parse(e.to_string()))?;

    let mut entries = BTreeMap::new();
    for (key, raw) in file.readings {
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) if is_kanji(c) => c,
            _ => return Err(OverrideConfigError::InvalidKey(key)),
        };
        let preferred = PreferredReading::from(raw);
        if !is_hiragana_reading(&preferred.reading) {
            return Err(OverrideConfigError::InvalidReading(key));
        }
        entries.insert(c, preferred);
    }
    Ok(PreferredReadingTable { entries })
}

/// Set custom TOML before first `overrides()` call.
pub fn init_custom(toml_content: String) -> Result<(), OverrideConfigError> {
    parse_overrides_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| OverrideConfigError::AlreadyInitialized)
}

/// Get or initialize the global override table.
pub fn overrides() -> &'static PreferredReadingTable {
    static INSTANCE: OnceLock<PreferredReadingTable> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_OVERRIDES_TOML);
        parse_overrides_toml(toml_str).expect("override TOML must be valid")
    })
}

/// Returns the embedded default override TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_OVERRIDES_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kimi_table() -> PreferredReadingTable {
        PreferredReadingTable::from_entries([
            ('君', PreferredReading::standalone("きみ")),
            ('私', PreferredReading::always("わたし")),
        ])
    }

    #[test]
    fn standalone_skipped_after_name() {
        let mut units = vec![
            AlignmentUnit::annotated("太郎", "たろう"),
            AlignmentUnit::annotated("君", "くん"),
        ];
        let applied = apply_overrides(&mut units, &kimi_table());
        assert!(applied.is_empty());
        assert_eq!(units[1].reading.as_deref(), Some("くん"));
    }

    #[test]
    fn standalone_applies_at_line_start() {
        let mut units = vec![
            AlignmentUnit::annotated("君", "くん"),
            AlignmentUnit::plain("が"),
        ];
        let applied = apply_overrides(&mut units, &kimi_table());
        assert_eq!(applied, vec![0]);
        assert_eq!(units[0].reading.as_deref(), Some("きみ"));
    }

    #[test]
    fn standalone_applies_after_empty_or_punctuation() {
        let mut units = vec![
            AlignmentUnit::plain(""),
            AlignmentUnit::annotated("君", "くん"),
            AlignmentUnit::plain("、"),
            AlignmentUnit::annotated("君", "くん"),
        ];
        let applied = apply_overrides(&mut units, &kimi_table());
        assert_eq!(applied, vec![1, 3]);
    }

    #[test]
    fn standalone_skipped_after_latin_digit_interpunct_long_vowel() {
        for prev in ["Ken", "2", "・", "ー", "ｰ", "ｱ"] {
            let mut units = vec![
                AlignmentUnit::plain(prev),
                AlignmentUnit::annotated("君", "くん"),
            ];
            apply_overrides(&mut units, &kimi_table());
            assert_eq!(units[1].reading.as_deref(), Some("くん"), "prev = {prev}");
        }
    }

    #[test]
    fn always_ignores_predecessor() {
        let mut units = vec![
            AlignmentUnit::annotated("太郎", "たろう"),
            AlignmentUnit::annotated("私", "わたくし"),
        ];
        apply_overrides(&mut units, &kimi_table());
        assert_eq!(units[1].reading.as_deref(), Some("わたし"));
    }

    #[test]
    fn plain_and_multi_char_units_untouched() {
        let mut units = vec![
            AlignmentUnit::plain("君"),
            AlignmentUnit::annotated("君達", "きみたち"),
        ];
        let before = units.clone();
        let applied = apply_overrides(&mut units, &kimi_table());
        assert!(applied.is_empty());
        assert_eq!(units, before);
    }

    #[test]
    fn parse_default_toml() {
        let table = parse_overrides_toml(DEFAULT_OVERRIDES_TOML).unwrap();
        assert_eq!(table.get('君'), Some(&PreferredReading::standalone("きみ")));
        assert_eq!(table.get('私'), Some(&PreferredReading::always("わたし")));
        assert_eq!(table.get('後'), None);
    }

    #[test]
    fn parse_tagged_without_mode_defaults_to_always() {
        let toml = r#"
[readings]
"方" = { reading = "かた" }
"#;
        let table = parse_overrides_toml(toml).unwrap();
        assert_eq!(table.get('方').map(|p| p.mode), Some(ReadingMode::Always));
    }

    #[test]
    fn error_multi_char_key() {
        let toml = r#"
[readings]
"彼女" = "かのじょ"
"#;
        let err = parse_overrides_toml(toml).unwrap_err();
        assert!(matches!(err, OverrideConfigError::InvalidKey(_)));
    }

    #[test]
    fn error_bad_mode() {
        let toml = r#"
[readings]
"君" = { reading = "きみ", mode = "sometimes" }
"#;
        let err = parse_overrides_toml(toml).unwrap_err();
        assert!(matches!(err, OverrideConfigError::Parse(_)));
    }

    #[test]
    fn error_empty_reading() {
        let toml = r#"
[readings]
"君" = ""
"#;
        let err = parse_overrides_toml(toml).unwrap_err();
        assert!(matches!(err, OverrideConfigError::InvalidReading(_)));
    }
}
