//! Navigation and selection state.
//!
//! [`PickerState`] is a small immutable value: every transition returns a
//! new state, so the rendered month and the selected day can never alias.

use chrono::{Datelike, Months, NaiveDate};

use crate::constants::PICKER_SLIDE_PREFIX;
use crate::date_utils::{clamp_day_to_month, is_date_valid};

/// Direction the grid slides after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Content moves left: a later month came in
    Left,
    /// Content moves right: an earlier month came in
    Right,
    None,
}

impl SlideDirection {
    /// Transient class for the header and grid, `None` for no animation.
    pub fn css_class(self) -> Option<String> {
        match self {
            SlideDirection::Left => Some(format!("{PICKER_SLIDE_PREFIX}left")),
            SlideDirection::Right => Some(format!("{PICKER_SLIDE_PREFIX}right")),
            SlideDirection::None => None,
        }
    }
}

/// Rendered month plus the user's chosen day.
///
/// `cursor` is always the 1st of the rendered month. `selected_day` is kept
/// unclamped so that walking Jan 31 -> Feb -> Mar lands on Mar 31 again;
/// [`PickerState::selected_date`] applies the clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    cursor: NaiveDate,
    selected_day: u32,
}

/// Outcome of clicking a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The clicked date is in another month: re-render with a slide
    Navigate { state: PickerState, slide: SlideDirection },
    /// Same month: only the selected marker moves
    InPlace { state: PickerState },
}

impl Transition {
    pub fn state(&self) -> PickerState {
        match self {
            Transition::Navigate { state, .. } | Transition::InPlace { state } => *state,
        }
    }
}

impl PickerState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            cursor: date.with_day(1).unwrap_or(date),
            selected_day: date.day(),
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Day of month as chosen, before clamping to the cursor's month.
    pub fn selected_day(&self) -> u32 {
        self.selected_day
    }

    /// The selected date, always inside the cursor's month.
    pub fn selected_date(&self) -> NaiveDate {
        let day = clamp_day_to_month(self.selected_day, self.cursor.month(), self.cursor.year());
        self.cursor.with_day(day).unwrap_or(self.cursor)
    }

    /// Step back one month; the selected day follows unchanged. At the
    /// first supported month the state comes back as is.
    pub fn prev_month(&self) -> Self {
        self.moved_to(self.cursor.checked_sub_months(Months::new(1)))
    }

    /// Step forward one month; the selected day follows unchanged. At the
    /// last supported month the state comes back as is.
    pub fn next_month(&self) -> Self {
        self.moved_to(self.cursor.checked_add_months(Months::new(1)))
    }

    fn moved_to(&self, cursor: Option<NaiveDate>) -> Self {
        match cursor {
            Some(cursor) if is_date_valid(&cursor) => Self { cursor, ..*self },
            _ => *self,
        }
    }

    /// Resolve a click on `clicked`.
    ///
    /// Year is compared before month, so a click on a cell from another year
    /// always navigates even when the month numbers happen to match. The
    /// comparison never looks at the day.
    pub fn select(&self, clicked: NaiveDate) -> Transition {
        let chosen = Self {
            selected_day: clicked.day(),
            ..*self
        };

        let current = (self.cursor.year(), self.cursor.month());
        let target = (clicked.year(), clicked.month());

        if target.0 != current.0 {
            return if target.0 > current.0 {
                chosen.navigate_forward()
            } else {
                chosen.navigate_back()
            };
        }

        if target.1 > current.1 {
            chosen.navigate_forward()
        } else if target.1 < current.1 {
            chosen.navigate_back()
        } else {
            Transition::InPlace { state: chosen }
        }
    }

    fn navigate_forward(&self) -> Transition {
        Transition::Navigate {
            state: self.next_month(),
            slide: SlideDirection::Left,
        }
    }

    fn navigate_back(&self) -> Transition {
        Transition::Navigate {
            state: self.prev_month(),
            slide: SlideDirection::Right,
        }
    }
}
