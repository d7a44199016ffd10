//! Fixed dimensions, timings, name tables and CSS class names.
//!
//! Every class name the picker emits lives here so styling and automation
//! have a single table to target.

/// Number of cells in the grid: six weeks of seven days.
pub const DAYS_LENGTH: usize = 42;
/// Index of a grid cell that always falls inside the rendered month.
pub const MID_MONTH: usize = 14;

pub const BASE_THROTTLE_MS: u32 = 150;
pub const BASE_DEBOUNCE_MS: u32 = 50;

pub const PICKER_HEIGHT: f64 = 278.0;
pub const PICKER_WIDTH: f64 = 272.0;
pub const POSITION_PADDING: f64 = 6.0;

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Weekday header labels, Sunday first.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tues", "Wednes", "Thurs", "Fri", "Satur"];

// Anchor input
pub const BASE_INPUT_WRAPPER_CLASS: &str = "month-picker-input-wrapper";
pub const BASE_INPUT_CLASS: &str = "month-picker-input";
pub const INPUT_WRAPPER_ACTIVE: &str = "picker-input-active";
pub const INPUT_DISABLED_CLASS: &str = "picker-input-disabled";

// Panel
pub const BASE_PICKER_CLASS: &str = "month-picker";
pub const PICKER_DISABLED_CLASS: &str = "picker-disabled";
pub const PICKER_TRANSITION_CLASS: &str = "picker-transition";
pub const PICKER_FADE_OUT_CLASS: &str = "picker-fade-out";
pub const PICKER_SLIDE_PREFIX: &str = "slide-";

pub const PICKER_HEADER_CLASS: &str = "month-picker-header";
pub const PICKER_TITLE_CLASS: &str = "month-year";
pub const PICKER_NAV_BTN_WRAPPER_CLASS: &str = "nav-btns";
pub const PICKER_NAV_BTN_PREV_CLASS: &str = "prev";
pub const PICKER_NAV_BTN_NEXT_CLASS: &str = "next";
pub const PICKER_WEEKDAYS_CLASS: &str = "weekdays";
pub const PICKER_WEEKDAY_CLASS: &str = "weekday";
pub const PICKER_DAYS_WRAPPER_CLASS: &str = "month-div";

// Day cells
pub const BASE_DAY_CLASS: &str = "day";
pub const SELECTED_CLASS: &str = "selected-day";
pub const PREV_MONTH_CLASS: &str = "prev-month";
pub const NEXT_MONTH_CLASS: &str = "next-month";
pub const DISABLED_DAY_CLASS: &str = "disabled-day";

// Themes
pub const PICKER_THEME_DARK: &str = "dark";
pub const PICKER_THEME_LIGHT: &str = "light";

pub const DEFAULT_FORMAT: &str = "month dd, yyyy";
pub const DEFAULT_THEME: &str = "dark";
