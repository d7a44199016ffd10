//! The floating panel: header with title and navigation, weekday row and
//! the fixed pool of day buttons.

use monthpicker_core::constants::{
    BASE_DAY_CLASS, BASE_PICKER_CLASS, DAYS_LENGTH, DAY_NAMES, PICKER_DAYS_WRAPPER_CLASS,
    PICKER_DISABLED_CLASS, PICKER_HEADER_CLASS, PICKER_NAV_BTN_NEXT_CLASS,
    PICKER_NAV_BTN_PREV_CLASS, PICKER_NAV_BTN_WRAPPER_CLASS, PICKER_TITLE_CLASS,
    PICKER_WEEKDAYS_CLASS, PICKER_WEEKDAY_CLASS,
};
use monthpicker_core::Theme;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use super::icons::{create_caret, CaretDirection};
use super::{create, set_attributes, JsResultExt};

pub struct PanelNodes {
    pub panel: HtmlElement,
    pub title: HtmlElement,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
    pub days: HtmlElement,
    pub cells: Vec<HtmlButtonElement>,
}

fn nav_button(document: &Document, title: &str, class: &str, direction: CaretDirection) -> anyhow::Result<HtmlButtonElement> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_type("button");
    button.class_list().add_1(class).js_context("nav class")?;
    set_attributes(&button, &[("aria-label", title), ("data-navtitle", title)])?;
    button
        .append_child(&create_caret(document, direction)?.into())
        .js_context("nav caret")?;
    Ok(button)
}

/// Build a hidden panel with `id` so the anchor can point at it.
pub fn render_panel(document: &Document, theme: Theme, id: &str) -> anyhow::Result<PanelNodes> {
    let panel: HtmlElement = create(document, "div")?;
    panel.set_id(id);
    panel
        .class_list()
        .add_3(BASE_PICKER_CLASS, theme.css_class(), PICKER_DISABLED_CLASS)
        .js_context("panel classes")?;
    panel.set_tab_index(-1);
    set_attributes(
        &panel,
        &[("data-picker-open", "false"), ("role", "dialog"), ("aria-label", "Month Picker")],
    )?;

    let header: HtmlElement = create(document, "div")?;
    header.class_list().add_1(PICKER_HEADER_CLASS).js_context("header class")?;

    let title: HtmlElement = create(document, "div")?;
    title.class_list().add_1(PICKER_TITLE_CLASS).js_context("title class")?;
    set_attributes(&title, &[("aria-live", "polite")])?;

    let nav: HtmlElement = create(document, "div")?;
    nav.class_list().add_1(PICKER_NAV_BTN_WRAPPER_CLASS).js_context("nav class")?;
    let prev = nav_button(document, "Previous Month", PICKER_NAV_BTN_PREV_CLASS, CaretDirection::Prev)?;
    let next = nav_button(document, "Next Month", PICKER_NAV_BTN_NEXT_CLASS, CaretDirection::Next)?;
    nav.append_with_node_2(&prev, &next).js_context("nav append")?;
    header.append_with_node_2(&title, &nav).js_context("header append")?;

    let weekdays: HtmlElement = create(document, "div")?;
    weekdays.class_list().add_1(PICKER_WEEKDAYS_CLASS).js_context("weekdays class")?;
    for name in DAY_NAMES {
        let weekday: HtmlElement = create(document, "span")?;
        weekday.class_list().add_1(PICKER_WEEKDAY_CLASS).js_context("weekday class")?;
        weekday.set_text_content(name.get(..1));
        let full_name = format!("{name}day");
        set_attributes(&weekday, &[("data-weekday", full_name.as_str())])?;
        weekdays.append_child(&weekday).js_context("weekday append")?;
    }

    let days: HtmlElement = create(document, "div")?;
    days.class_list().add_1(PICKER_DAYS_WRAPPER_CLASS).js_context("days class")?;

    let mut cells = Vec::with_capacity(DAYS_LENGTH);
    for _ in 0..DAYS_LENGTH {
        let cell: HtmlButtonElement = create(document, "button")?;
        cell.set_type("button");
        cell.set_class_name(BASE_DAY_CLASS);
        set_attributes(&cell, &[("aria-label", "day")])?;
        days.append_child(&cell).js_context("day append")?;
        cells.push(cell);
    }

    panel
        .append_with_node_3(&header, &weekdays, &days)
        .js_context("panel append")?;

    Ok(PanelNodes {
        panel,
        title,
        prev,
        next,
        days,
        cells,
    })
}
