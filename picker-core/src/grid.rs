//! Grid engine: the 42 day window for a month and its reconciliation
//! against a fixed pool of day cells.

use chrono::{Datelike, Days, NaiveDate};

use crate::constants::{
    DAYS_LENGTH, DISABLED_DAY_CLASS, NEXT_MONTH_CLASS, PREV_MONTH_CLASS, SELECTED_CLASS,
};
use crate::date_utils::{clamp_day_to_month, date_key, is_date_valid, DateKey};

/// Classification of one day cell relative to the rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellClass {
    /// Day of the rendered month, not selected
    #[default]
    Plain,
    Selected,
    PrevMonth,
    NextMonth,
    /// Blank placeholder for out-of-month days when only the current month is shown
    Disabled,
}

impl CellClass {
    /// Extra class on top of the base day class, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CellClass::Plain => None,
            CellClass::Selected => Some(SELECTED_CLASS),
            CellClass::PrevMonth => Some(PREV_MONTH_CLASS),
            CellClass::NextMonth => Some(NEXT_MONTH_CLASS),
            CellClass::Disabled => Some(DISABLED_DAY_CLASS),
        }
    }

    pub fn is_interactive(self) -> bool {
        self != CellClass::Disabled
    }
}

/// One reusable cell of the grid.
///
/// The pool is created once per panel and only ever updated through this
/// trait; implementors remember the key they were last assigned.
pub trait DayCell {
    /// Key last written by [`DayCell::assign`], `None` for a fresh cell.
    fn date_key(&self) -> Option<DateKey>;

    fn class(&self) -> CellClass;

    /// Overwrite the cell's date and reset its classification.
    fn assign(&mut self, key: DateKey, class: CellClass);

    /// Toggle the selected marker without touching the date.
    fn set_selected(&mut self, selected: bool);
}

/// The 42 consecutive dates shown for `cursor`'s month, starting on the
/// Sunday on or before the 1st.
///
/// Empty if the window would leave the representable date range.
pub fn compute_grid_window(cursor: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = cursor.with_day(1) else {
        return Vec::new();
    };
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let Some(start) = first.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };

    let window: Vec<NaiveDate> = start.iter_days().take(DAYS_LENGTH).collect();
    if window.len() == DAYS_LENGTH {
        window
    } else {
        Vec::new()
    }
}

/// Classify `date` for a grid rendering `cursor`'s month.
///
/// Dates outside the supported year range are always disabled. Otherwise
/// checked in order selected, previous, next: selection only ever applies
/// inside the cursor's own month so the outcomes cannot overlap.
pub fn classify(
    date: NaiveDate,
    cursor: NaiveDate,
    selected_day: u32,
    only_show_current_month: bool,
) -> CellClass {
    let cell_month = (date.year(), date.month());
    let cursor_month = (cursor.year(), cursor.month());
    let selected_day = clamp_day_to_month(selected_day, cursor.month(), cursor.year());

    if !is_date_valid(&date) {
        CellClass::Disabled
    } else if cell_month == cursor_month && date.day() == selected_day {
        CellClass::Selected
    } else if cell_month < cursor_month {
        if only_show_current_month { CellClass::Disabled } else { CellClass::PrevMonth }
    } else if cell_month > cursor_month {
        if only_show_current_month { CellClass::Disabled } else { CellClass::NextMonth }
    } else {
        CellClass::Plain
    }
}

/// Bring `cells` in line with `window`, touching only cells whose date
/// changed. Returns how many cells were rewritten.
pub fn reconcile<C: DayCell>(
    cells: &mut [C],
    window: &[NaiveDate],
    cursor: NaiveDate,
    selected_day: u32,
    only_show_current_month: bool,
) -> usize {
    let mut updated = 0;

    for (cell, date) in cells.iter_mut().zip(window) {
        let key = date_key(date);
        if cell.date_key() == Some(key) {
            continue;
        }

        cell.assign(key, classify(*date, cursor, selected_day, only_show_current_month));
        updated += 1;
    }

    updated
}
