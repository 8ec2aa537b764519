//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! counter and override tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::aligner::{CounterStyle, OraclePolicy};
use crate::render::RenderFormat;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub alignment: AlignmentSettings,
    pub render: RenderSettings,
    pub document: DocumentSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlignmentSettings {
    pub counter_style: CounterStyle,
    pub oracle_policy: OraclePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub format: RenderFormat,
    pub base_font_pt: u32,
    pub ruby_hps: u32,
    pub ruby_raise_pt: u32,
    pub font_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSettings {
    pub paragraph_break: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(render.base_font_pt);
    check_positive!(render.ruby_hps);
    check_positive!(render.ruby_raise_pt);

    if s.render.font_name.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "render.font_name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if s.render.font_name.contains('"') {
        return Err(SettingsError::InvalidValue {
            field: "render.font_name".to_string(),
            reason: "must not contain '\"'".to_string(),
        });
    }

    Ok(())
}
