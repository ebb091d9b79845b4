use std::fs;
use std::process;

use combo_core::settings::{parse_settings_toml, SettingsError, WidgetSettings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", combo_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let summary = die!(validate_summary(&content), "Error: {}");
    println!("{summary}");
}

/// One-line report for a settings file that parsed and validated.
pub fn validate_summary(content: &str) -> Result<String, SettingsError> {
    let s: WidgetSettings = parse_settings_toml(content)?;
    Ok(format!(
        "OK: search.min_length={}, selection.multiple={}, timing.blur_commit_ms={}, timing.status_settle_ms={}",
        s.search.min_length, s.selection.multiple, s.timing.blur_commit_ms, s.timing.status_settle_ms
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_defaults() {
        let summary = validate_summary(combo_core::settings::default_toml()).unwrap();
        assert_eq!(
            summary,
            "OK: search.min_length=0, selection.multiple=false, timing.blur_commit_ms=200, timing.status_settle_ms=1400"
        );
    }

    #[test]
    fn summary_rejects_broken_file() {
        assert!(validate_summary("[search]\nmin_length = \"two\"").is_err());
    }
}
