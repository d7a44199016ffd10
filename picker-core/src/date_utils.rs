//! Pure calendar arithmetic and date rendering helpers.
//!
//! Months are 1-based everywhere in this module.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::constants::MONTHS;
use crate::options::DateFormat;

/// Earliest and latest year accepted as a picker date. The upper bound keeps
/// `yyyy` a four digit token.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Get the number of days in a given month and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Day of month with its English ordinal suffix, e.g. `1st`, `12th`, `23rd`.
pub fn ordinal_suffix(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=19) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

/// Whether a date may be shown by the picker.
///
/// Any real calendar date inside `MIN_YEAR..=MAX_YEAR` qualifies, including
/// dates before 1970.
pub fn is_date_valid(date: &NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// `(year, month, day)` identity of a calendar cell.
///
/// Its text form `Y-M-D` (no zero padding) is what `data-date` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day]: [&str; 3] = parts
            .try_into()
            .map_err(|_| format!("expected Y-M-D, got \"{s}\""))?;

        let year = year.parse::<i32>().map_err(|e| format!("bad year in \"{s}\": {e}"))?;
        let month = month.parse::<u32>().map_err(|e| format!("bad month in \"{s}\": {e}"))?;
        let day = day.parse::<u32>().map_err(|e| format!("bad day in \"{s}\": {e}"))?;

        Ok(DateKey { year, month, day })
    }
}

/// Decompose a date into its key.
pub fn date_key(date: &NaiveDate) -> DateKey {
    DateKey {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

/// Parse a `Y-M-D` string (zero padding optional) back into a date.
///
/// Unlike a lenient JS `Date` constructor this never rolls over: `2023-2-30`
/// is `None`.
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    let date = s.parse::<DateKey>().ok()?.to_date()?;
    is_date_valid(&date).then_some(date)
}

/// `[year, month, day]` as the host sees it.
pub fn date_array(date: &NaiveDate) -> [i32; 3] {
    [date.year(), date.month() as i32, date.day() as i32]
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Invalid Month")
}

/// Header label, e.g. `January 2023`.
pub fn format_month_year_label(date: &NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

/// How the month token of a format template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthMode {
    /// `month`: full name, day rendered as ordinal.
    Full,
    /// `mth`: three letter name, day rendered as ordinal.
    Abbreviated,
    /// `mm`: zero padded number, day zero padded.
    Numeric,
}

impl MonthMode {
    pub fn token(self) -> &'static str {
        match self {
            MonthMode::Full => "month",
            MonthMode::Abbreviated => "mth",
            MonthMode::Numeric => "mm",
        }
    }

    fn detect(template: &str) -> Self {
        if template.contains("mm") {
            MonthMode::Numeric
        } else if template.contains("mth") {
            MonthMode::Abbreviated
        } else {
            MonthMode::Full
        }
    }
}

/// Render a date through one of the format templates.
///
/// Tokens are substituted once each in day, month, year order, so a day
/// value never gets mistaken for a month token.
pub fn format_for_display(date: &NaiveDate, format: DateFormat) -> String {
    let template = format.as_str();
    let mode = MonthMode::detect(template);

    let day = match mode {
        MonthMode::Numeric => format!("{:02}", date.day()),
        MonthMode::Full | MonthMode::Abbreviated => ordinal_suffix(date.day()),
    };
    let month = match mode {
        MonthMode::Full => month_name(date.month()).to_string(),
        MonthMode::Abbreviated => month_name(date.month())[..3].to_string(),
        MonthMode::Numeric => format!("{:02}", date.month()),
    };

    template
        .replacen("dd", &day, 1)
        .replacen(mode.token(), &month, 1)
        .replacen("yyyy", &format!("{:04}", date.year()), 1)
}

/// Largest valid day not exceeding `day` in the given month.
pub fn clamp_day_to_month(day: u32, month: u32, year: i32) -> u32 {
    day.min(days_in_month(year, month)).max(1)
}

/// Case-insensitive membership in the format whitelist.
pub fn validate_format(format: &str) -> bool {
    format.parse::<DateFormat>().is_ok()
}
