use monthpicker_core::constants::{BASE_DAY_CLASS, SELECTED_CLASS};
use monthpicker_core::{CellClass, DateKey, DayCell};
use tracing::debug;
use web_sys::HtmlButtonElement;

/// A day button in the panel plus the key it currently shows.
pub struct WebDayCell {
    element: HtmlButtonElement,
    key: Option<DateKey>,
    class: CellClass,
}

impl WebDayCell {
    pub fn new(element: HtmlButtonElement) -> Self {
        Self {
            element,
            key: None,
            class: CellClass::Plain,
        }
    }

    fn write_data(&self, key: DateKey) {
        let day = key.day.to_string();
        for (name, value) in [("data-date", key.to_string()), ("data-day", day)] {
            if let Err(err) = self.element.set_attribute(name, &value) {
                debug!(target: "monthpicker", ?err, name, "day attribute rejected");
            }
        }
    }
}

impl DayCell for WebDayCell {
    fn date_key(&self) -> Option<DateKey> {
        self.key
    }

    fn class(&self) -> CellClass {
        self.class
    }

    fn assign(&mut self, key: DateKey, class: CellClass) {
        self.write_data(key);

        let class_name = match class.css_class() {
            Some(extra) => format!("{BASE_DAY_CLASS} {extra}"),
            None => BASE_DAY_CLASS.to_string(),
        };
        self.element.set_class_name(&class_name);

        // Placeholders stay blank and unfocusable
        if class.is_interactive() {
            self.element.set_text_content(Some(&key.day.to_string()));
            self.element.set_disabled(false);
        } else {
            self.element.set_text_content(None);
            self.element.set_disabled(true);
        }

        self.key = Some(key);
        self.class = class;
    }

    fn set_selected(&mut self, selected: bool) {
        let result = if selected {
            self.element.class_list().add_1(SELECTED_CLASS)
        } else {
            self.element.class_list().remove_1(SELECTED_CLASS)
        };
        if let Err(err) = result {
            debug!(target: "monthpicker", ?err, "selected class rejected");
        }
        self.class = if selected { CellClass::Selected } else { CellClass::Plain };
    }
}
