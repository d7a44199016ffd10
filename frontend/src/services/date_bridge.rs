//! Conversions between JS `Date` values and `NaiveDate`.

use chrono::{Datelike, NaiveDate};
use js_sys::Date;
use monthpicker_core::date_utils::parse_date_key;
use wasm_bindgen::{JsCast, JsValue};

/// Local calendar date of a JS `Date`, `None` for an invalid one.
pub fn from_js_date(date: &Date) -> Option<NaiveDate> {
    if date.get_time().is_nan() {
        return None;
    }
    NaiveDate::from_ymd_opt(date.get_full_year() as i32, date.get_month() + 1, date.get_date())
}

/// Year used to build a `Date` before its real year is set. The
/// `(year, month, day)` constructor reads years 0..=99 as 1900..=1999, and
/// 2000 is a leap year so every month and day is accepted.
const STAGING_YEAR: u32 = 2000;

/// Local midnight of `date`.
pub fn to_js_date(date: NaiveDate) -> Date {
    let js = Date::new_with_year_month_day(STAGING_YEAR, date.month0() as i32, date.day() as i32);
    js.set_full_year(date.year() as u32);
    js
}

pub fn today() -> NaiveDate {
    from_js_date(&Date::new_0()).unwrap_or_default()
}

/// Accept a JS `Date`, an ISO `YYYY-MM-DD` string or a `Y-M-D` key.
pub fn from_js_value(value: &JsValue) -> Option<NaiveDate> {
    if let Some(date) = value.dyn_ref::<Date>() {
        return from_js_date(date);
    }
    let text = value.as_string()?;
    text.parse::<NaiveDate>()
        .ok()
        .or_else(|| parse_date_key(&text))
}
