pub mod icons;
pub mod input;
pub mod month_picker_field;
pub mod panel;

use anyhow::anyhow;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Attach a readable context to a failed web-sys call.
pub(crate) trait JsResultExt<T> {
    fn js_context(self, what: &str) -> anyhow::Result<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, what: &str) -> anyhow::Result<T> {
        self.map_err(|value| anyhow!("{what} failed: {value:?}"))
    }
}

/// Create `<tag>` and cast it to the element type the caller expects.
pub(crate) fn create<T: JsCast>(document: &Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .js_context("createElement")?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("<{tag}> is not the expected element type"))
}

pub(crate) fn set_attributes(element: &Element, attributes: &[(&str, &str)]) -> anyhow::Result<()> {
    for (name, value) in attributes {
        element.set_attribute(name, value).js_context(name)?;
    }
    Ok(())
}
