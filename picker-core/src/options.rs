//! Typed picker configuration.
//!
//! Hosts hand over a loose [`PickerConfig`] (strings and booleans, usually
//! deserialized from a JS object or JSON). [`PickerConfig::validate`] is the
//! one place it gets checked, producing an immutable [`PickerOptions`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FORMAT, DEFAULT_THEME, PICKER_THEME_DARK, PICKER_THEME_LIGHT};
use crate::date_utils::is_date_valid;
use crate::error::PickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Class applied to both the anchor wrapper and the panel.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Dark => PICKER_THEME_DARK,
            Theme::Light => PICKER_THEME_LIGHT,
        }
    }
}

impl FromStr for Theme {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(PickerError::InvalidTheme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nine supported display templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `ddmmyyyy`
    Ddmmyyyy,
    /// `dd/mm/yyyy`
    DdSlashMmSlashYyyy,
    /// `mm/dd/yyyy`
    MmSlashDdSlashYyyy,
    /// `dd-mm-yyyy`
    DdDashMmDashYyyy,
    /// `mm-dd-yyyy`
    MmDashDdDashYyyy,
    /// `month dd, yyyy`
    MonthDdCommaYyyy,
    /// `month dd yyyy`
    MonthDdYyyy,
    /// `mth dd yyyy`
    MthDdYyyy,
    /// `mth dd, yyyy`
    MthDdCommaYyyy,
}

impl DateFormat {
    pub const ALL: [DateFormat; 9] = [
        DateFormat::Ddmmyyyy,
        DateFormat::DdSlashMmSlashYyyy,
        DateFormat::MmSlashDdSlashYyyy,
        DateFormat::DdDashMmDashYyyy,
        DateFormat::MmDashDdDashYyyy,
        DateFormat::MonthDdCommaYyyy,
        DateFormat::MonthDdYyyy,
        DateFormat::MthDdYyyy,
        DateFormat::MthDdCommaYyyy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Ddmmyyyy => "ddmmyyyy",
            DateFormat::DdSlashMmSlashYyyy => "dd/mm/yyyy",
            DateFormat::MmSlashDdSlashYyyy => "mm/dd/yyyy",
            DateFormat::DdDashMmDashYyyy => "dd-mm-yyyy",
            DateFormat::MmDashDdDashYyyy => "mm-dd-yyyy",
            DateFormat::MonthDdCommaYyyy => "month dd, yyyy",
            DateFormat::MonthDdYyyy => "month dd yyyy",
            DateFormat::MthDdYyyy => "mth dd yyyy",
            DateFormat::MthDdCommaYyyy => "mth dd, yyyy",
        }
    }

    /// Newline separated whitelist, used in rejection messages.
    pub fn accepted_list() -> String {
        DateFormat::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::MonthDdCommaYyyy
    }
}

impl FromStr for DateFormat {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        DateFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == lowered)
            .ok_or_else(|| PickerError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loose, host-facing configuration. Missing keys take the documented
/// defaults; callbacks are passed separately since they are not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Initial date, `None` for today
    pub start_date: Option<NaiveDate>,
    pub theme: String,
    pub format: String,
    pub close_on_select: bool,
    pub only_show_current_month: bool,
    pub align_picker_middle: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            theme: DEFAULT_THEME.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            close_on_select: false,
            only_show_current_month: false,
            align_picker_middle: false,
        }
    }
}

impl PickerConfig {
    /// Check every field once and produce the typed options record.
    pub fn validate(&self) -> Result<PickerOptions, PickerError> {
        let theme = self.theme.parse::<Theme>()?;
        let format = self.format.parse::<DateFormat>()?;

        if let Some(date) = &self.start_date {
            if !is_date_valid(date) {
                return Err(PickerError::InvalidDate(date.to_string()));
            }
        }

        Ok(PickerOptions {
            start_date: self.start_date,
            theme,
            format,
            close_on_select: self.close_on_select,
            only_show_current_month: self.only_show_current_month,
            align_picker_middle: self.align_picker_middle,
        })
    }
}

/// Validated configuration owned by a picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerOptions {
    pub start_date: Option<NaiveDate>,
    pub theme: Theme,
    pub format: DateFormat,
    pub close_on_select: bool,
    pub only_show_current_month: bool,
    pub align_picker_middle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("Light".parse::<Theme>(), Err(PickerError::InvalidTheme(_))));
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn test_format_parsing_is_case_insensitive() {
        assert_eq!("MTH DD, YYYY".parse::<DateFormat>().unwrap(), DateFormat::MthDdCommaYyyy);
        assert_eq!("dd-mm-yyyy".parse::<DateFormat>().unwrap(), DateFormat::DdDashMmDashYyyy);
        assert!("yyyy/mm/dd".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_every_format_round_trips_through_its_name() {
        for format in DateFormat::ALL {
            assert_eq!(format.as_str().parse::<DateFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_default_config_validates() {
        let options = PickerConfig::default().validate().unwrap();
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.format, DateFormat::MonthDdCommaYyyy);
        assert_eq!(options.start_date, None);
        assert!(!options.close_on_select);
        assert!(!options.only_show_current_month);
        assert!(!options.align_picker_middle);
    }

    #[test]
    fn test_config_from_json_with_partial_keys() {
        let json = r#"{
            "startDate": "2023-01-01",
            "theme": "light",
            "format": "mm/dd/yyyy",
            "closeOnSelect": true,
            "callbacks": "ignored"
        }"#;
        let config: PickerConfig = serde_json::from_str(json).unwrap();
        let options = config.validate().unwrap();

        assert_eq!(options.start_date, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.format, DateFormat::MmSlashDdSlashYyyy);
        assert!(options.close_on_select);
        assert!(!options.align_picker_middle);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PickerConfig {
            theme: "purple".to_string(),
            ..PickerConfig::default()
        };
        assert_eq!(config.validate(), Err(PickerError::InvalidTheme("purple".to_string())));

        let config = PickerConfig {
            format: "yyyy".to_string(),
            ..PickerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PickerError::InvalidFormat(_))));
    }

    #[test]
    fn test_wrong_json_types_fail_to_deserialize() {
        let result = serde_json::from_str::<PickerConfig>(r#"{ "closeOnSelect": "yes" }"#);
        assert!(result.is_err());
    }
}
