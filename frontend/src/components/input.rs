//! The anchor: a themed wrapper holding the calendar icon and a read-only
//! input that shows the selected date.

use monthpicker_core::constants::{BASE_INPUT_CLASS, BASE_INPUT_WRAPPER_CLASS};
use monthpicker_core::{AnchorView, Theme};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::icons::create_calendar_svg;
use super::{create, set_attributes, JsResultExt};

pub struct AnchorNodes {
    pub wrapper: HtmlElement,
    pub input: HtmlInputElement,
}

/// Build the anchor fragment. The caller appends `wrapper` to the root.
pub fn render_anchor_input(
    document: &Document,
    theme: Theme,
    panel_id: &str,
    view: &AnchorView,
) -> anyhow::Result<AnchorNodes> {
    let wrapper: HtmlElement = create(document, "div")?;
    wrapper
        .class_list()
        .add_2(BASE_INPUT_WRAPPER_CLASS, theme.css_class())
        .js_context("wrapper classes")?;
    set_attributes(&wrapper, &[("data-picker-open", "false")])?;

    let input: HtmlInputElement = create(document, "input")?;
    input.class_list().add_1(BASE_INPUT_CLASS).js_context("input class")?;
    input.set_type("text");
    input.set_name(BASE_INPUT_CLASS);
    input.set_read_only(true);
    input.set_autocomplete("off");
    input.set_spellcheck(false);
    set_attributes(
        &input,
        &[
            ("aria-label", "Month Picker Input"),
            ("aria-haspopup", "true"),
            ("aria-controls", panel_id),
            ("aria-autocomplete", "none"),
            ("aria-readonly", "true"),
        ],
    )?;
    update_anchor_input(&input, view)?;

    let icon: HtmlElement = create(document, "span")?;
    icon.append_child(&create_calendar_svg(document)?.into())
        .js_context("icon append")?;

    wrapper
        .append_with_node_2(&icon, &input)
        .js_context("wrapper append")?;

    Ok(AnchorNodes { wrapper, input })
}

/// Show `view` in an existing input.
pub fn update_anchor_input(input: &HtmlInputElement, view: &AnchorView) -> anyhow::Result<()> {
    input.set_placeholder(&view.text);
    set_attributes(
        input,
        &[("data-date-value", view.date_value.as_str()), ("data-format", view.format.as_str())],
    )
}
