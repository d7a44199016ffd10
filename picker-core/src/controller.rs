//! The picker controller.
//!
//! [`MonthPicker`] composes the grid engine, the navigation state and the
//! placement calculator on top of a [`PickerDom`]. It is single threaded and
//! fully synchronous: timers come back in through [`MonthPicker::run_deferred`]
//! and user selections are handed out as a [`SelectionNotice`] for the host to
//! dispatch once it has released its own borrow of the picker.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::constants::{
    BASE_DEBOUNCE_MS, BASE_THROTTLE_MS, INPUT_DISABLED_CLASS, INPUT_WRAPPER_ACTIVE, MID_MONTH,
    PICKER_DISABLED_CLASS, PICKER_FADE_OUT_CLASS, PICKER_HEIGHT, PICKER_TRANSITION_CLASS,
    PICKER_WIDTH, POSITION_PADDING,
};
use crate::date_utils::{
    date_array, format_for_display, format_month_year_label, is_date_valid, parse_date_key,
};
use crate::dom::{AnchorView, ClickTarget, DeferredKind, DeferredTask, PanelTarget, Part, PickerDom};
use crate::error::{warn_rejected, PickerError};
use crate::grid::{compute_grid_window, reconcile, CellClass, DayCell};
use crate::navigation::{PickerState, SlideDirection, Transition};
use crate::options::{DateFormat, PickerConfig, PickerOptions, Theme};
use crate::placement::{compute_position, PanelSize};
use crate::rate_limit::{Debounce, Throttle};

/// A selection callback. Receives the selected date after the transition.
pub type DateCallback = Rc<dyn Fn(NaiveDate)>;

/// A completed selection waiting to be announced.
#[must_use = "callbacks only run when the notice is dispatched"]
pub struct SelectionNotice {
    date: NaiveDate,
    callbacks: Vec<DateCallback>,
}

impl SelectionNotice {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Invoke every callback in registration order.
    pub fn dispatch(self) {
        for callback in &self.callbacks {
            callback(self.date);
        }
    }
}

impl fmt::Debug for SelectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionNotice")
            .field("date", &self.date)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

const PANEL_SIZE: PanelSize = PanelSize {
    width: PICKER_WIDTH,
    height: PICKER_HEIGHT,
};

/// One month picker bound to one root container.
pub struct MonthPicker<D: PickerDom> {
    dom: D,
    options: PickerOptions,
    callbacks: Vec<DateCallback>,
    state: PickerState,
    cells: Vec<D::Cell>,
    is_mounted: bool,
    is_listening: bool,
    is_open: bool,
    is_destroyed: bool,
    is_disabled: bool,
    /// Bumped on every destroy so stale timers can be recognised
    epoch: u64,
    toggle_throttle: Throttle,
    panel_throttle: Throttle,
    scroll_throttle: Throttle,
    resize_debounce: Debounce,
}

impl<D: PickerDom> MonthPicker<D> {
    /// Validate `config` and mount a new picker into the DOM's root.
    pub fn new(dom: D, config: &PickerConfig, callbacks: Vec<DateCallback>) -> Result<Self, PickerError> {
        let options = config.validate()?;
        Self::with_options(dom, options, callbacks)
    }

    /// Mount a new picker from already validated options.
    pub fn with_options(dom: D, options: PickerOptions, callbacks: Vec<DateCallback>) -> Result<Self, PickerError> {
        if !D::root_is_connected(dom.root()) {
            return Err(PickerError::RootNotConnected);
        }

        let start = options.start_date.unwrap_or_else(|| dom.today());
        let mut picker = Self {
            dom,
            options,
            callbacks,
            state: PickerState::new(start),
            cells: Vec::new(),
            is_mounted: false,
            is_listening: false,
            is_open: false,
            is_destroyed: true,
            is_disabled: false,
            epoch: 0,
            toggle_throttle: Throttle::new(BASE_THROTTLE_MS),
            panel_throttle: Throttle::new(BASE_THROTTLE_MS),
            scroll_throttle: Throttle::new(BASE_THROTTLE_MS),
            resize_debounce: Debounce::new(),
        };
        picker.try_init()?;
        Ok(picker)
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[cfg(test)]
    pub(crate) fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    fn is_live(&self) -> bool {
        !self.is_destroyed && !self.is_disabled
    }

    fn has_panel(&self) -> bool {
        !self.cells.is_empty()
    }

    // ---- lifecycle ----

    /// Tear down and rebuild the whole picker. Safe to call repeatedly.
    pub fn init(&mut self) {
        if let Err(error) = self.try_init() {
            warn_rejected("init", &"rootContainer", &error);
        }
    }

    fn try_init(&mut self) -> Result<(), PickerError> {
        if !D::root_is_connected(self.dom.root()) {
            return Err(PickerError::RootNotConnected);
        }

        self.destroy();
        self.is_destroyed = false;

        let start = self.options.start_date.unwrap_or_else(|| self.dom.today());
        self.state = PickerState::new(start);

        if let Err(error) = self.mount() {
            self.destroy();
            return Err(error);
        }

        self.reposition();
        self.dom.attach_listeners();
        self.is_listening = true;

        info!(target: "monthpicker", epoch = self.epoch, date = %start, "📅 Month picker initialized");
        Ok(())
    }

    fn mount(&mut self) -> Result<(), PickerError> {
        let anchor = self.anchor_view();
        self.dom.create_anchor(self.options.theme, &anchor)?;
        self.is_mounted = true;

        if self.is_disabled {
            self.dom.add_class(Part::Wrapper, INPUT_DISABLED_CLASS);
        }

        self.build_panel()
    }

    /// Remove every node and listener. Idempotent.
    pub fn destroy(&mut self) {
        let was_live = !self.is_destroyed;

        self.is_destroyed = true;
        self.is_open = false;
        self.epoch += 1;
        self.resize_debounce.cancel();
        self.toggle_throttle.reset();
        self.panel_throttle.reset();
        self.scroll_throttle.reset();

        if self.is_listening {
            self.dom.detach_listeners();
            self.is_listening = false;
        }
        if self.is_mounted {
            self.dom.remove_all();
            self.is_mounted = false;
        }
        self.cells.clear();

        if was_live {
            debug!(target: "monthpicker", epoch = self.epoch, "Month picker destroyed");
        }
    }

    pub fn enable(&mut self) {
        if self.is_destroyed || !self.is_disabled {
            return;
        }
        self.is_disabled = false;
        self.dom.remove_class(Part::Wrapper, INPUT_DISABLED_CLASS);
    }

    pub fn disable(&mut self) {
        if self.is_destroyed || self.is_disabled {
            return;
        }
        self.is_disabled = true;
        self.dom.add_class(Part::Wrapper, INPUT_DISABLED_CLASS);
    }

    // ---- rendering ----

    fn build_panel(&mut self) -> Result<(), PickerError> {
        self.cells = self.dom.create_panel(self.options.theme)?;
        self.render_grid(SlideDirection::None);
        if self.is_open {
            self.reveal(false);
        }
        Ok(())
    }

    /// Replace the panel with a fresh one, keeping the open state.
    fn rebuild_panel(&mut self) {
        self.dom.remove_panel();
        self.cells.clear();

        if let Err(error) = self.build_panel() {
            self.cells.clear();
            self.is_open = false;
            warn_rejected("rebuild", &"panel", &error);
        }
    }

    fn anchor_view(&self) -> AnchorView {
        let selected = self.state.selected_date();
        AnchorView {
            text: format_for_display(&selected, self.options.format),
            date_value: selected.to_string(),
            format: self.options.format.as_str().to_string(),
        }
    }

    fn render_anchor(&mut self) {
        let anchor = self.anchor_view();
        self.dom.render_anchor(&anchor);
    }

    fn render_grid(&mut self, slide: SlideDirection) {
        let cursor = self.state.cursor();
        let window = compute_grid_window(cursor);
        if window.len() <= MID_MONTH {
            warn_rejected("render", &cursor, &PickerError::InvalidDate(cursor.to_string()));
            return;
        }

        if let Some(class) = slide.css_class() {
            self.dom.add_class(Part::Title, &class);
            self.dom.add_class(Part::Days, &class);
            self.schedule(BASE_THROTTLE_MS, DeferredKind::ClearSlide(slide));
        }

        self.dom.render_title(&format_month_year_label(&window[MID_MONTH]));
        self.render_anchor();

        let updated = reconcile(
            &mut self.cells,
            &window,
            cursor,
            self.state.selected_day(),
            self.options.only_show_current_month,
        );
        debug!(target: "monthpicker", %cursor, updated, "Grid rendered");
    }

    fn schedule(&mut self, delay_ms: u32, kind: DeferredKind) {
        let task = DeferredTask { epoch: self.epoch, kind };
        self.dom.schedule(delay_ms, task);
    }

    fn reposition(&mut self) {
        if let Some((anchor, viewport)) = self.dom.measure() {
            let position = compute_position(
                &anchor,
                &viewport,
                PANEL_SIZE,
                POSITION_PADDING,
                self.options.align_picker_middle,
            );
            self.dom.place_panel(&position);
        }
    }

    // ---- open / close ----

    fn reveal(&mut self, animate: bool) {
        self.reposition();
        self.dom.set_open_attr(true);
        self.dom.add_class(Part::Wrapper, INPUT_WRAPPER_ACTIVE);
        self.dom.remove_class(Part::Panel, PICKER_FADE_OUT_CLASS);
        self.dom.remove_class(Part::Panel, PICKER_DISABLED_CLASS);
        if animate {
            self.dom.add_class(Part::Panel, PICKER_TRANSITION_CLASS);
            self.schedule(BASE_THROTTLE_MS, DeferredKind::FinishOpen);
        }
        self.dom.focus(Part::Panel);
    }

    /// Place and reveal the panel.
    pub fn open(&mut self) {
        if !self.is_live() || !self.has_panel() {
            return;
        }
        if self.is_open {
            self.reposition();
            return;
        }
        self.is_open = true;
        self.reveal(true);
    }

    /// Fade the panel out; it is fully hidden one throttle interval later.
    pub fn close(&mut self) {
        if self.is_destroyed || !self.has_panel() || !self.is_open {
            return;
        }
        self.is_open = false;
        self.dom.set_open_attr(false);
        self.dom.remove_class(Part::Wrapper, INPUT_WRAPPER_ACTIVE);
        self.dom.add_class(Part::Panel, PICKER_FADE_OUT_CLASS);
        self.schedule(BASE_THROTTLE_MS, DeferredKind::FinishClose);
        self.dom.focus(Part::Wrapper);
    }

    pub fn toggle(&mut self) {
        if !self.is_live() {
            return;
        }
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    // ---- navigation and selection ----

    pub fn go_to_prev_month(&mut self) {
        if !self.is_live() || !self.has_panel() {
            return;
        }
        let state = self.state.prev_month();
        if state == self.state {
            return;
        }
        self.state = state;
        self.render_grid(SlideDirection::Right);
    }

    pub fn go_to_next_month(&mut self) {
        if !self.is_live() || !self.has_panel() {
            return;
        }
        let state = self.state.next_month();
        if state == self.state {
            return;
        }
        self.state = state;
        self.render_grid(SlideDirection::Left);
    }

    /// Select the grid cell keyed `key` (`Y-M-D`) as if it had been clicked.
    pub fn select_date(&mut self, key: &str) -> Option<SelectionNotice> {
        if self.is_disabled && !self.is_destroyed {
            return None;
        }
        match self.cell_index(key) {
            Ok(index) => self.select_cell(index),
            Err(error) => {
                warn_rejected("selectDate", &key, &error);
                None
            }
        }
    }

    /// Position of the rendered cell keyed `key`.
    fn cell_index(&self, key: &str) -> Result<usize, PickerError> {
        if self.is_destroyed || !self.is_mounted {
            return Err(PickerError::NotMounted);
        }
        let date = parse_date_key(key).ok_or_else(|| PickerError::InvalidDate(key.to_string()))?;

        self.cells
            .iter()
            .position(|cell| {
                cell.date_key()
                    .and_then(|cell_key| cell_key.to_date())
                    .is_some_and(|cell_date| cell_date == date)
            })
            .ok_or_else(|| PickerError::InvalidOption {
                name: "date",
                reason: "not on the displayed grid".to_string(),
            })
    }

    fn select_cell(&mut self, index: usize) -> Option<SelectionNotice> {
        let cell = self.cells.get(index)?;
        let class = cell.class();
        if class == CellClass::Selected || !class.is_interactive() {
            return None;
        }
        let clicked = cell.date_key()?.to_date()?;

        match self.state.select(clicked) {
            Transition::Navigate { state, slide } => {
                self.state = state;
                self.render_grid(slide);
            }
            Transition::InPlace { state } => {
                self.state = state;
                for cell in self.cells.iter_mut().filter(|cell| cell.class() == CellClass::Selected) {
                    cell.set_selected(false);
                }
                if let Some(cell) = self.cells.get_mut(index) {
                    cell.set_selected(true);
                }
                self.render_anchor();
            }
        }

        let date = self.state.selected_date();
        debug!(target: "monthpicker", %date, "Date selected");

        if self.options.close_on_select {
            self.close();
        }

        Some(SelectionNotice {
            date,
            callbacks: self.callbacks.clone(),
        })
    }

    // ---- event entry points ----

    /// A click anywhere in the document. Opens on the anchor, closes when
    /// the click lands outside an open panel.
    pub fn handle_document_click(&mut self, target: ClickTarget) {
        if !self.is_live() || !self.has_panel() {
            return;
        }
        if !self.toggle_throttle.try_fire(self.dom.now_ms()) {
            return;
        }

        let should_toggle = if self.is_open {
            !target.in_panel
        } else {
            target.in_anchor
        };
        if should_toggle {
            self.toggle();
        }
    }

    /// A click inside the panel.
    pub fn handle_panel_click(&mut self, target: PanelTarget) -> Option<SelectionNotice> {
        if !self.is_live() || !self.has_panel() {
            return None;
        }
        if !self.panel_throttle.try_fire(self.dom.now_ms()) {
            return None;
        }

        match target {
            PanelTarget::PrevMonth => {
                self.go_to_prev_month();
                None
            }
            PanelTarget::NextMonth => {
                self.go_to_next_month();
                None
            }
            PanelTarget::Day(index) => self.select_cell(index),
            PanelTarget::Other => None,
        }
    }

    /// Returns true when the key closed the panel.
    pub fn handle_keydown(&mut self, key: &str) -> bool {
        if self.is_destroyed || !self.is_open || key != "Escape" {
            return false;
        }
        self.close();
        true
    }

    pub fn handle_scroll(&mut self) {
        if self.is_destroyed || !self.scroll_throttle.try_fire(self.dom.now_ms()) {
            return;
        }
        if self.is_open {
            self.close();
        }
    }

    pub fn handle_resize(&mut self) {
        if self.is_destroyed {
            return;
        }
        let ticket = self.resize_debounce.request();
        self.schedule(BASE_DEBOUNCE_MS, DeferredKind::Reposition(ticket));
    }

    /// Entry point for timers scheduled through the DOM.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        if self.is_destroyed || task.epoch != self.epoch {
            return;
        }

        match task.kind {
            DeferredKind::ClearSlide(slide) => {
                if let Some(class) = slide.css_class() {
                    self.dom.remove_class(Part::Title, &class);
                    self.dom.remove_class(Part::Days, &class);
                }
            }
            DeferredKind::FinishOpen => {
                self.dom.remove_class(Part::Panel, PICKER_TRANSITION_CLASS);
            }
            DeferredKind::FinishClose => {
                if !self.is_open {
                    self.dom.remove_class(Part::Panel, PICKER_FADE_OUT_CLASS);
                    self.dom.add_class(Part::Panel, PICKER_DISABLED_CLASS);
                }
            }
            DeferredKind::Reposition(ticket) => {
                if self.resize_debounce.settle(ticket) && self.is_open {
                    self.reposition();
                }
            }
        }
    }

    // ---- setters ----

    pub fn set_date(&mut self, date: NaiveDate) {
        if !self.is_live() {
            return;
        }
        if !is_date_valid(&date) {
            warn_rejected("setDate", &date, &PickerError::InvalidDate(date.to_string()));
            return;
        }

        self.close();
        self.state = PickerState::new(date);
        self.render_anchor();
        self.rebuild_panel();
    }

    pub fn set_format(&mut self, format: &str) {
        if !self.is_live() {
            return;
        }
        match format.parse::<DateFormat>() {
            Ok(parsed) => {
                self.options.format = parsed;
                self.render_anchor();
            }
            Err(error) => warn_rejected("setFormat", &format, &error),
        }
    }

    pub fn set_theme(&mut self, theme: &str) {
        if !self.is_live() {
            return;
        }
        let parsed = match theme.parse::<Theme>() {
            Ok(parsed) => parsed,
            Err(error) => {
                warn_rejected("setTheme", &theme, &error);
                return;
            }
        };
        if parsed == self.options.theme {
            return;
        }

        self.close();
        self.options.theme = parsed;
        self.dom.apply_theme(parsed);
    }

    pub fn set_callbacks(&mut self, callbacks: Vec<DateCallback>) {
        if !self.is_live() {
            return;
        }
        self.callbacks = callbacks;
        self.rebuild_panel();
    }

    pub fn add_callback(&mut self, callback: DateCallback) {
        if !self.is_live() {
            return;
        }
        self.callbacks.push(callback);
        self.rebuild_panel();
    }

    pub fn set_close_on_select(&mut self, value: bool) {
        if !self.is_live() || self.options.close_on_select == value {
            return;
        }
        self.options.close_on_select = value;
        self.rebuild_panel();
    }

    pub fn set_only_show_current_month(&mut self, value: bool) {
        if !self.is_live() || self.options.only_show_current_month == value {
            return;
        }
        self.options.only_show_current_month = value;
        self.rebuild_panel();
    }

    pub fn set_align_picker_middle(&mut self, value: bool) {
        if !self.is_live() || self.options.align_picker_middle == value {
            return;
        }
        self.options.align_picker_middle = value;
        self.rebuild_panel();
    }

    /// Move the picker to another root and re-initialise it there.
    pub fn set_root_container(&mut self, root: D::Root) {
        if !self.is_live() {
            return;
        }
        if !D::root_is_connected(&root) {
            warn_rejected("setRootContainer", &"rootContainer", &PickerError::RootNotConnected);
            return;
        }
        if root == *self.dom.root() {
            return;
        }

        self.dom.set_root(root);
        self.init();
    }

    // ---- getters ----

    /// Selected date; today when destroyed or disabled.
    pub fn get_date(&self) -> NaiveDate {
        if !self.is_live() {
            return self.dom.today();
        }
        self.state.selected_date()
    }

    pub fn get_date_array(&self) -> Vec<i32> {
        if !self.is_live() {
            return Vec::new();
        }
        date_array(&self.state.selected_date()).to_vec()
    }

    pub fn get_date_formatted(&self) -> String {
        if !self.is_live() {
            return String::new();
        }
        format_for_display(&self.state.selected_date(), self.options.format)
    }

    pub fn get_theme(&self) -> Option<Theme> {
        self.is_live().then_some(self.options.theme)
    }

    pub fn get_format(&self) -> Option<DateFormat> {
        self.is_live().then_some(self.options.format)
    }

    pub fn get_callbacks(&self) -> Vec<DateCallback> {
        if !self.is_live() {
            return Vec::new();
        }
        self.callbacks.clone()
    }

    pub fn get_close_on_select(&self) -> bool {
        self.is_live() && self.options.close_on_select
    }

    pub fn get_only_show_current_month(&self) -> bool {
        self.is_live() && self.options.only_show_current_month
    }

    pub fn get_align_picker_middle(&self) -> bool {
        self.is_live() && self.options.align_picker_middle
    }

    pub fn get_instances(&self) -> D::Instances {
        if !self.is_live() {
            return D::Instances::default();
        }
        self.dom.instances()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::dom::fake::{FakeDom, FakeInstances};
    use crate::date_utils::DateKey;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn config_at(date: NaiveDate) -> PickerConfig {
        PickerConfig {
            start_date: Some(date),
            ..PickerConfig::default()
        }
    }

    fn picker_at(date: NaiveDate) -> MonthPicker<FakeDom> {
        MonthPicker::new(FakeDom::new(), &config_at(date), Vec::new()).unwrap()
    }

    fn key_of(picker: &MonthPicker<FakeDom>, index: usize) -> DateKey {
        picker.cells[index].key.unwrap()
    }

    fn selected_keys(picker: &MonthPicker<FakeDom>) -> Vec<DateKey> {
        picker
            .cells
            .iter()
            .filter(|cell| cell.class == CellClass::Selected)
            .filter_map(|cell| cell.key)
            .collect()
    }

    /// Step the fake clock past every throttle window.
    fn advance(picker: &mut MonthPicker<FakeDom>) {
        picker.dom_mut().now += f64::from(BASE_THROTTLE_MS);
    }

    fn run_all(picker: &mut MonthPicker<FakeDom>) {
        let tasks = picker.dom_mut().take_scheduled();
        for task in tasks {
            picker.run_deferred(task);
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<(u8, NaiveDate)>>>, Vec<DateCallback>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = {
            let seen = Rc::clone(&seen);
            Rc::new(move |date: NaiveDate| seen.borrow_mut().push((1, date))) as DateCallback
        };
        let second = {
            let seen = Rc::clone(&seen);
            Rc::new(move |date: NaiveDate| seen.borrow_mut().push((2, date))) as DateCallback
        };
        (seen, vec![first, second])
    }

    #[test]
    fn test_construct_and_read_back() {
        let picker = picker_at(ymd(2023, 1, 1));

        assert_eq!(picker.get_date_formatted(), "January 1st, 2023");
        assert_eq!(picker.get_date_array(), vec![2023, 1, 1]);
        assert_eq!(picker.get_date(), ymd(2023, 1, 1));
        assert_eq!(picker.get_theme(), Some(Theme::Dark));
        assert_eq!(picker.get_format(), Some(DateFormat::MonthDdCommaYyyy));
        assert_eq!(picker.dom().title, "January 2023");

        let anchor = picker.dom().anchor.clone().unwrap();
        assert_eq!(anchor.text, "January 1st, 2023");
        assert_eq!(anchor.date_value, "2023-01-01");
        assert_eq!(anchor.format, "month dd, yyyy");

        assert_eq!(picker.cells.len(), 42);
        assert_eq!(selected_keys(&picker), vec![DateKey { year: 2023, month: 1, day: 1 }]);
        assert!(!picker.is_open());
        assert!(picker.dom().position.is_some());
        assert_eq!(picker.dom().listeners_attached, 1);
    }

    #[test]
    fn test_start_date_defaults_to_today() {
        let picker = MonthPicker::new(FakeDom::new(), &PickerConfig::default(), Vec::new()).unwrap();
        assert_eq!(picker.get_date(), ymd(2024, 6, 15));
    }

    #[test]
    fn test_construction_errors() {
        let config = PickerConfig {
            theme: "blue".to_string(),
            ..PickerConfig::default()
        };
        assert!(matches!(
            MonthPicker::new(FakeDom::new(), &config, Vec::new()),
            Err(PickerError::InvalidTheme(_))
        ));

        let mut detached = FakeDom::new();
        detached.root = "detached";
        assert!(matches!(
            MonthPicker::new(detached, &PickerConfig::default(), Vec::new()),
            Err(PickerError::RootNotConnected)
        ));

        let mut failing = FakeDom::new();
        failing.fail_panel = true;
        let result = MonthPicker::new(failing, &PickerConfig::default(), Vec::new());
        assert!(matches!(result, Err(PickerError::Dom(_))));
    }

    #[test]
    fn test_next_month_navigation() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.go_to_next_month();

        assert_eq!(picker.dom().title, "February 2023");
        assert_eq!(picker.get_date(), ymd(2023, 2, 1));
        // Feb 1st 2023 is a Wednesday
        assert_eq!(key_of(&picker, 0), DateKey { year: 2023, month: 1, day: 29 });
        assert_eq!(picker.cells[0].class, CellClass::PrevMonth);
        assert_eq!(selected_keys(&picker), vec![DateKey { year: 2023, month: 2, day: 1 }]);

        assert!(picker.dom().has_class(Part::Title, "slide-left"));
        assert!(picker.dom().has_class(Part::Days, "slide-left"));
        run_all(&mut picker);
        assert!(!picker.dom().has_class(Part::Title, "slide-left"));
        assert!(!picker.dom().has_class(Part::Days, "slide-left"));
    }

    #[test]
    fn test_prev_month_rolls_year_and_slides_right() {
        let mut picker = picker_at(ymd(2023, 1, 15));
        picker.go_to_prev_month();

        assert_eq!(picker.dom().title, "December 2022");
        assert_eq!(picker.get_date(), ymd(2022, 12, 15));
        assert!(picker.dom().has_class(Part::Days, "slide-right"));
        assert_eq!(picker.dom().anchor.clone().unwrap().text, "December 15th, 2022");
    }

    #[test]
    fn test_navigation_clamps_and_restores_day() {
        let mut picker = picker_at(ymd(2023, 1, 31));
        picker.go_to_next_month();
        assert_eq!(picker.get_date(), ymd(2023, 2, 28));
        picker.go_to_next_month();
        assert_eq!(picker.get_date(), ymd(2023, 3, 31));
    }

    #[test]
    fn test_navigation_stops_at_supported_range() {
        let mut picker = picker_at(ymd(9999, 12, 15));
        let scheduled_before = picker.dom().scheduled.len();
        picker.go_to_next_month();

        assert_eq!(picker.get_date(), ymd(9999, 12, 15));
        assert_eq!(picker.get_date_formatted(), "December 15th, 9999");
        assert_eq!(picker.dom().title, "December 9999");
        assert!(!picker.dom().has_class(Part::Days, "slide-left"));
        assert_eq!(picker.dom().scheduled.len(), scheduled_before);
        assert_eq!(picker.cells[41].class, CellClass::Disabled);
        assert!(picker.select_date("10000-1-1").is_none());
        assert_eq!(picker.get_date(), ymd(9999, 12, 15));

        let mut picker = picker_at(ymd(1, 1, 10));
        picker.go_to_prev_month();
        assert_eq!(picker.get_date(), ymd(1, 1, 10));
        assert_eq!(picker.dom().title, "January 1");
        assert!(!picker.dom().has_class(Part::Days, "slide-right"));
    }

    #[test]
    fn test_day_click_in_same_month_selects_in_place() {
        let (seen, callbacks) = recorder();
        let mut picker = MonthPicker::new(FakeDom::new(), &config_at(ymd(2023, 1, 1)), callbacks).unwrap();
        let scheduled_before = picker.dom().scheduled.len();

        // Index 9 is January 10th
        let notice = picker.handle_panel_click(PanelTarget::Day(9)).unwrap();
        assert_eq!(notice.date(), ymd(2023, 1, 10));
        assert_eq!(selected_keys(&picker), vec![DateKey { year: 2023, month: 1, day: 10 }]);
        assert_eq!(picker.dom().title, "January 2023");
        assert_eq!(picker.dom().scheduled.len(), scheduled_before);
        assert_eq!(picker.dom().anchor.clone().unwrap().text, "January 10th, 2023");

        assert!(seen.borrow().is_empty());
        notice.dispatch();
        assert_eq!(
            *seen.borrow(),
            vec![(1, ymd(2023, 1, 10)), (2, ymd(2023, 1, 10))]
        );
    }

    #[test]
    fn test_clicking_selected_or_blank_cell_is_ignored() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        assert!(picker.handle_panel_click(PanelTarget::Day(0)).is_none());

        advance(&mut picker);
        assert!(picker.handle_panel_click(PanelTarget::Other).is_none());

        advance(&mut picker);
        picker.set_only_show_current_month(true);
        // Index 41 is February 11th, blanked out
        assert_eq!(picker.cells[41].class, CellClass::Disabled);
        assert!(picker.handle_panel_click(PanelTarget::Day(41)).is_none());
        assert_eq!(picker.get_date(), ymd(2023, 1, 1));
    }

    #[test]
    fn test_day_click_in_next_month_navigates() {
        let mut picker = picker_at(ymd(2023, 1, 1));

        let notice = picker.handle_panel_click(PanelTarget::Day(41)).unwrap();
        assert_eq!(notice.date(), ymd(2023, 2, 11));
        assert_eq!(picker.dom().title, "February 2023");
        assert_eq!(selected_keys(&picker), vec![DateKey { year: 2023, month: 2, day: 11 }]);
        assert!(picker.dom().has_class(Part::Days, "slide-left"));
    }

    #[test]
    fn test_day_click_across_year_navigates_once() {
        let mut picker = picker_at(ymd(2023, 1, 15));
        // January 2023 starts on a Sunday, so show December first
        picker.go_to_prev_month();
        advance(&mut picker);

        let index = picker
            .cells
            .iter()
            .position(|cell| cell.key == Some(DateKey { year: 2023, month: 1, day: 2 }))
            .unwrap();
        let notice = picker.handle_panel_click(PanelTarget::Day(index)).unwrap();

        assert_eq!(notice.date(), ymd(2023, 1, 2));
        assert_eq!(picker.dom().title, "January 2023");
    }

    #[test]
    fn test_callbacks_observe_post_transition_date() {
        let picker = Rc::new(RefCell::new(picker_at(ymd(2023, 1, 1))));
        let observed = Rc::new(RefCell::new(None));

        let callback = {
            let picker = Rc::clone(&picker);
            let observed = Rc::clone(&observed);
            Rc::new(move |_: NaiveDate| {
                *observed.borrow_mut() = Some(picker.borrow().get_date());
            }) as DateCallback
        };
        picker.borrow_mut().add_callback(callback);

        let notice = picker.borrow_mut().handle_panel_click(PanelTarget::Day(41));
        notice.unwrap().dispatch();

        assert_eq!(*observed.borrow(), Some(ymd(2023, 2, 11)));
    }

    #[test]
    fn test_panel_clicks_are_throttled() {
        let mut picker = picker_at(ymd(2023, 1, 1));

        picker.handle_panel_click(PanelTarget::NextMonth);
        picker.handle_panel_click(PanelTarget::NextMonth);
        assert_eq!(picker.dom().title, "February 2023");

        advance(&mut picker);
        picker.handle_panel_click(PanelTarget::NextMonth);
        assert_eq!(picker.dom().title, "March 2023");

        advance(&mut picker);
        picker.handle_panel_click(PanelTarget::PrevMonth);
        assert_eq!(picker.dom().title, "February 2023");
    }

    #[test]
    fn test_open_and_close_cycle() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        let placements = picker.dom().placements;

        picker.open();
        assert!(picker.is_open());
        assert_eq!(picker.dom().open_attr, Some(true));
        assert_eq!(picker.dom().placements, placements + 1);
        assert!(picker.dom().has_class(Part::Wrapper, INPUT_WRAPPER_ACTIVE));
        assert!(!picker.dom().has_class(Part::Panel, PICKER_DISABLED_CLASS));
        assert!(picker.dom().has_class(Part::Panel, PICKER_TRANSITION_CLASS));
        assert_eq!(picker.dom().focused, Some(Part::Panel));

        run_all(&mut picker);
        assert!(!picker.dom().has_class(Part::Panel, PICKER_TRANSITION_CLASS));

        picker.toggle();
        assert!(!picker.is_open());
        assert_eq!(picker.dom().open_attr, Some(false));
        assert!(picker.dom().has_class(Part::Panel, PICKER_FADE_OUT_CLASS));
        assert!(!picker.dom().has_class(Part::Wrapper, INPUT_WRAPPER_ACTIVE));
        assert_eq!(picker.dom().focused, Some(Part::Wrapper));

        run_all(&mut picker);
        assert!(!picker.dom().has_class(Part::Panel, PICKER_FADE_OUT_CLASS));
        assert!(picker.dom().has_class(Part::Panel, PICKER_DISABLED_CLASS));
    }

    #[test]
    fn test_reopen_before_fade_finishes_stays_visible() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.open();
        picker.close();
        picker.open();

        run_all(&mut picker);
        assert!(picker.is_open());
        assert!(!picker.dom().has_class(Part::Panel, PICKER_DISABLED_CLASS));
    }

    #[test]
    fn test_close_on_select() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.set_close_on_select(true);
        assert!(picker.get_close_on_select());

        picker.open();
        let notice = picker.handle_panel_click(PanelTarget::Day(5));
        assert!(notice.is_some());
        assert!(!picker.is_open());
        assert_eq!(picker.dom().open_attr, Some(false));
    }

    #[test]
    fn test_document_clicks_toggle() {
        let mut picker = picker_at(ymd(2023, 1, 1));

        picker.handle_document_click(ClickTarget::default());
        assert!(!picker.is_open());

        advance(&mut picker);
        picker.handle_document_click(ClickTarget { in_anchor: true, in_panel: false });
        assert!(picker.is_open());

        advance(&mut picker);
        picker.handle_document_click(ClickTarget { in_anchor: false, in_panel: true });
        assert!(picker.is_open());

        // Inside the throttle window the outside click is dropped
        picker.handle_document_click(ClickTarget::default());
        assert!(picker.is_open());

        advance(&mut picker);
        picker.handle_document_click(ClickTarget::default());
        assert!(!picker.is_open());

        advance(&mut picker);
        picker.handle_document_click(ClickTarget { in_anchor: true, in_panel: false });
        advance(&mut picker);
        picker.handle_document_click(ClickTarget { in_anchor: true, in_panel: false });
        assert!(!picker.is_open());
    }

    #[test]
    fn test_escape_closes() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        assert!(!picker.handle_keydown("Escape"));

        picker.open();
        assert!(!picker.handle_keydown("Enter"));
        assert!(picker.handle_keydown("Escape"));
        assert!(!picker.is_open());
        assert!(!picker.handle_keydown("Escape"));
    }

    #[test]
    fn test_scroll_closes_open_picker() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.handle_scroll();
        picker.open();

        advance(&mut picker);
        picker.handle_scroll();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.open();
        run_all(&mut picker);
        let placements = picker.dom().placements;

        picker.handle_resize();
        picker.handle_resize();
        picker.handle_resize();
        assert!(picker
            .dom()
            .scheduled
            .iter()
            .all(|(delay, _)| *delay == BASE_DEBOUNCE_MS));

        run_all(&mut picker);
        assert_eq!(picker.dom().placements, placements + 1);
    }

    #[test]
    fn test_set_theme() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.open();
        picker.set_theme("light");

        assert_eq!(picker.get_theme(), Some(Theme::Light));
        assert!(!picker.is_open());
        for part in [Part::Wrapper, Part::Panel] {
            assert!(picker.dom().has_class(part, "light"));
            assert!(!picker.dom().has_class(part, "dark"));
        }

        let ops = picker.dom().class_ops;
        picker.set_theme("light");
        assert_eq!(picker.dom().class_ops, ops);

        picker.set_theme("neon");
        assert_eq!(picker.dom().class_ops, ops);
        assert_eq!(picker.get_theme(), Some(Theme::Light));
    }

    #[test]
    fn test_set_format_renders_anchor_only() {
        let mut picker = picker_at(ymd(2023, 1, 9));
        let panels = picker.dom().panels_built;

        picker.set_format("MM/DD/YYYY");
        assert_eq!(picker.get_format(), Some(DateFormat::MmSlashDdSlashYyyy));
        assert_eq!(picker.get_date_formatted(), "01/09/2023");
        assert_eq!(picker.dom().anchor.clone().unwrap().text, "01/09/2023");
        assert_eq!(picker.dom().anchor.clone().unwrap().format, "mm/dd/yyyy");
        assert_eq!(picker.dom().panels_built, panels);

        picker.set_format("yyyy.mm.dd");
        assert_eq!(picker.get_format(), Some(DateFormat::MmSlashDdSlashYyyy));
    }

    #[test]
    fn test_set_date_rebuilds_panel() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.open();
        let panels = picker.dom().panels_built;

        picker.set_date(ymd(2023, 6, 15));
        assert_eq!(picker.dom().panels_built, panels + 1);
        assert!(!picker.is_open());
        assert_eq!(picker.dom().title, "June 2023");
        assert_eq!(picker.get_date(), ymd(2023, 6, 15));
        assert_eq!(picker.dom().anchor.clone().unwrap().text, "June 15th, 2023");

        picker.set_date(ymd(10_000, 1, 1));
        assert_eq!(picker.get_date(), ymd(2023, 6, 15));
        assert_eq!(picker.dom().panels_built, panels + 1);
    }

    #[test]
    fn test_set_callbacks_preserves_open_state() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.open();
        let panels = picker.dom().panels_built;

        let (_, callbacks) = recorder();
        picker.set_callbacks(callbacks);

        assert_eq!(picker.dom().panels_built, panels + 1);
        assert_eq!(picker.get_callbacks().len(), 2);
        assert!(picker.is_open());
        assert!(!picker.dom().has_class(Part::Panel, PICKER_DISABLED_CLASS));
    }

    #[test]
    fn test_boolean_setters_skip_unchanged_values() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        let panels = picker.dom().panels_built;

        picker.set_align_picker_middle(false);
        picker.set_only_show_current_month(false);
        picker.set_close_on_select(false);
        assert_eq!(picker.dom().panels_built, panels);

        picker.set_align_picker_middle(true);
        assert!(picker.get_align_picker_middle());
        assert_eq!(picker.dom().panels_built, panels + 1);
    }

    #[test]
    fn test_destroy_then_init() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.go_to_next_month();

        picker.destroy();
        picker.destroy();
        assert!(picker.is_destroyed());
        assert_eq!(picker.get_instances(), FakeInstances::default());
        assert_eq!(picker.dom().listeners_attached, 0);
        assert!(picker.dom().anchor.is_none());

        picker.init();
        assert!(!picker.is_destroyed());
        assert!(picker.get_instances().input_wrapper.is_some());
        assert!(picker.get_instances().month_picker.is_some());
        assert_eq!(picker.dom().listeners_attached, 1);
        assert_eq!(picker.dom().attach_calls, 2);
        assert_eq!(picker.get_date(), ymd(2023, 1, 1));
    }

    #[test]
    fn test_repeated_init_does_not_leak_listeners() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.init();
        picker.init();
        assert_eq!(picker.dom().listeners_attached, 1);
        assert_eq!(picker.dom().attach_calls, 3);
    }

    #[test]
    fn test_destroyed_picker_is_inert() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.destroy();

        picker.open();
        picker.set_theme("light");
        picker.set_date(ymd(2023, 5, 5));
        picker.go_to_next_month();
        assert!(picker.handle_panel_click(PanelTarget::Day(3)).is_none());
        assert_eq!(picker.cell_index("2023-1-5"), Err(PickerError::NotMounted));
        assert!(picker.select_date("2023-1-5").is_none());

        assert!(!picker.is_open());
        assert_eq!(picker.get_date(), ymd(2024, 6, 15));
        assert!(picker.get_date_array().is_empty());
        assert_eq!(picker.get_date_formatted(), "");
        assert_eq!(picker.get_theme(), None);
        assert_eq!(picker.get_format(), None);
        assert!(picker.get_callbacks().is_empty());
        assert!(!picker.get_close_on_select());
    }

    #[test]
    fn test_stale_deferred_tasks_are_ignored() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.go_to_next_month();
        let stale = picker.dom_mut().take_scheduled();
        assert!(!stale.is_empty());

        picker.destroy();
        picker.init();
        picker.go_to_next_month();
        picker.dom_mut().take_scheduled();

        let ops = picker.dom().class_ops;
        for task in stale {
            picker.run_deferred(task);
        }
        assert_eq!(picker.dom().class_ops, ops);
        assert!(picker.dom().has_class(Part::Days, "slide-left"));
    }

    #[test]
    fn test_disable_gates_operations() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.disable();
        assert!(picker.is_disabled());
        assert!(picker.dom().has_class(Part::Wrapper, INPUT_DISABLED_CLASS));

        picker.open();
        assert!(!picker.is_open());
        picker.set_format("dd-mm-yyyy");
        assert_eq!(picker.get_date(), ymd(2024, 6, 15));
        assert_eq!(picker.get_instances(), FakeInstances::default());

        picker.enable();
        assert!(!picker.dom().has_class(Part::Wrapper, INPUT_DISABLED_CLASS));
        assert_eq!(picker.get_format(), Some(DateFormat::MonthDdCommaYyyy));
        picker.open();
        assert!(picker.is_open());
    }

    #[test]
    fn test_disabled_state_survives_init() {
        let mut picker = picker_at(ymd(2023, 1, 1));
        picker.disable();
        picker.init();
        assert!(picker.dom().has_class(Part::Wrapper, INPUT_DISABLED_CLASS));
    }

    #[test]
    fn test_select_date_by_key() {
        let mut picker = picker_at(ymd(2023, 1, 1));

        let notice = picker.select_date("2023-1-20").unwrap();
        assert_eq!(notice.date(), ymd(2023, 1, 20));

        assert!(picker.select_date("2023-13-1").is_none());
        assert!(picker.select_date("2023-3-1").is_none());
        assert_eq!(picker.get_date(), ymd(2023, 1, 20));

        assert!(matches!(picker.cell_index("2023-13-1"), Err(PickerError::InvalidDate(_))));
        assert!(matches!(picker.cell_index("2023-3-1"), Err(PickerError::InvalidOption { name: "date", .. })));
        assert_eq!(picker.cell_index("2023-1-1"), Ok(0));
    }

    #[test]
    fn test_set_root_container() {
        let mut picker = picker_at(ymd(2023, 1, 1));

        picker.set_root_container("detached");
        assert_eq!(*picker.dom().root(), "root");

        picker.set_root_container("root");
        assert_eq!(picker.dom().attach_calls, 1);

        picker.set_root_container("other-root");
        assert_eq!(*picker.dom().root(), "other-root");
        assert_eq!(picker.dom().attach_calls, 2);
        assert_eq!(picker.dom().listeners_attached, 1);
        assert!(picker.get_instances().input.is_some());
    }
}
