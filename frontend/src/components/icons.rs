//! Inline SVG glyphs for the anchor and the navigation buttons.

use web_sys::{Document, Element};

use super::{set_attributes, JsResultExt};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const PREV_CARET_PATH: &str = "M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12z";
const NEXT_CARET_PATH: &str = "M8.59 16.59L10 18l6-6-6-6L8.59 7.41 13.17 12z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretDirection {
    Prev,
    Next,
}

fn svg_node(document: &Document, tag: &str, attributes: &[(&str, &str)]) -> anyhow::Result<Element> {
    let node = document
        .create_element_ns(Some(SVG_NS), tag)
        .js_context("createElementNS")?;
    set_attributes(&node, attributes)?;
    Ok(node)
}

/// Chevron pointing towards `direction`.
pub fn create_caret(document: &Document, direction: CaretDirection) -> anyhow::Result<Element> {
    let path = match direction {
        CaretDirection::Prev => PREV_CARET_PATH,
        CaretDirection::Next => NEXT_CARET_PATH,
    };

    let caret = svg_node(document, "svg", &[("xmlns", SVG_NS), ("viewBox", "0 0 24 24")])?;
    caret
        .append_with_node_2(
            &svg_node(document, "path", &[("d", "M0 0h24v24H0z"), ("fill", "none")])?.into(),
            &svg_node(document, "path", &[("d", path)])?.into(),
        )
        .js_context("caret append")?;
    Ok(caret)
}

/// Calendar glyph shown inside the anchor wrapper.
pub fn create_calendar_svg(document: &Document) -> anyhow::Result<Element> {
    let svg = svg_node(
        document,
        "svg",
        &[
            ("height", "16px"),
            ("width", "16px"),
            ("shape-rendering", "geometricPrecision"),
            ("fill", "none"),
            ("stroke", "currentColor"),
            ("stroke-linecap", "round"),
            ("stroke-linejoin", "round"),
            ("stroke-width", "1"),
            ("viewBox", "0 0 24 24"),
        ],
    )?;

    let frame = svg_node(
        document,
        "rect",
        &[("x", "3"), ("y", "4"), ("width", "18"), ("height", "18"), ("rx", "2"), ("ry", "2")],
    )?;
    svg.append_with_node_4(
        &frame,
        &svg_node(document, "path", &[("d", "M16 2v4")])?.into(),
        &svg_node(document, "path", &[("d", "M8 2v4")])?.into(),
        &svg_node(document, "path", &[("d", "M3 10h18")])?.into(),
    )
    .js_context("calendar append")?;
    Ok(svg)
}
