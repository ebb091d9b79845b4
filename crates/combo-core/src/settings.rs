//! Widget settings loaded from TOML.
//!
//! - `parse_settings_toml(content)` parses and validates a full settings file
//! - `load_settings(path)` reads a file from disk and parses it
//! - `WidgetSettings::default()` uses the values embedded via
//!   `include_str!("default_settings.toml")`

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

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
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetSettings {
    pub search: SearchSettings,
    pub selection: SelectionSettings,
    pub display: DisplaySettings,
    pub timing: TimingSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSettings {
    pub min_length: usize,
    pub show_all_values: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectionSettings {
    pub autoselect: bool,
    pub multiple: bool,
    pub confirm_on_blur: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuDisplay {
    Inline,
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplaySettings {
    pub show_no_options_found: bool,
    pub menu: MenuDisplay,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingSettings {
    pub blur_commit_ms: u64,
    pub status_settle_ms: u64,
    pub input_poll_ms: u64,
}

impl TimingSettings {
    pub fn blur_commit_delay(&self) -> Duration {
        Duration::from_millis(self.blur_commit_ms)
    }

    pub fn status_settle_delay(&self) -> Duration {
        Duration::from_millis(self.status_settle_ms)
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LookupSettings {
    pub discard_stale: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<WidgetSettings, SettingsError> {
    let s: WidgetSettings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

pub fn load_settings(path: &Path) -> Result<WidgetSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings_toml(&content)
}

fn validate(s: &WidgetSettings) -> Result<(), SettingsError> {
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

    check_positive!(timing.blur_commit_ms);
    check_positive!(timing.status_settle_ms);
    check_positive!(timing.input_poll_ms);

    if s.search.show_all_values && s.search.min_length > 0 {
        return Err(SettingsError::InvalidValue {
            field: "search.min_length".to_string(),
            reason: "must be 0 when search.show_all_values is enabled".to_string(),
        });
    }

    Ok(())
}
