//! The `MonthPicker` class exported to JavaScript.
//!
//! `new MonthPicker(root, options)` takes the settings as one options
//! object (`startDate`, `callbacks`, `theme`, `format`, `closeOnSelect`,
//! `onlyShowCurrentMonth`, `alignPickerMiddle`). The same settings can be
//! passed positionally, in that order, through `MonthPicker.fromArgs`.
//!
//! Construction throws on malformed arguments. After that nothing
//! throws: setters take loose `JsValue`s and log a warning when the type
//! is wrong, leaving the picker untouched.

use std::rc::Rc;

use chrono::NaiveDate;
use js_sys::{Array, Function, Object, Reflect};
use monthpicker_core::error::warn_rejected;
use monthpicker_core::{DateCallback, PickerConfig, PickerError};
use serde::{Deserialize, Serialize};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::handle::PickerHandle;
use crate::services::date_bridge::{from_js_value, to_js_date};
use crate::services::logging::Logger;

/// Plain-data part of the constructor options. `startDate` and `callbacks`
/// are not serde data and are read separately.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsPickerOptions {
    theme: Option<String>,
    format: Option<String>,
    close_on_select: Option<bool>,
    only_show_current_month: Option<bool>,
    align_picker_middle: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsInstances {
    #[serde(with = "serde_wasm_bindgen::preserve")]
    input_wrapper: JsValue,
    #[serde(with = "serde_wasm_bindgen::preserve")]
    input: JsValue,
    #[serde(with = "serde_wasm_bindgen::preserve")]
    month_picker: JsValue,
}

fn construction_error(error: PickerError) -> JsError {
    JsError::new(&error.to_string())
}

fn root_element(root: JsValue) -> Result<HtmlElement, JsError> {
    root.dyn_into::<HtmlElement>()
        .map_err(|_| construction_error(PickerError::RootNotConnected))
}

fn invalid_option(name: &'static str, reason: &str) -> PickerError {
    PickerError::InvalidOption {
        name,
        reason: reason.to_string(),
    }
}

fn js_callback(function: Function) -> DateCallback {
    Rc::new(move |date: NaiveDate| {
        if let Err(err) = function.call1(&JsValue::NULL, &to_js_date(date)) {
            warn!(target: "monthpicker", ?err, "date callback threw");
        }
    })
}

/// Every element of `value` must be a function.
fn functions_from_array(value: &JsValue) -> Option<Vec<Function>> {
    let array = value.dyn_ref::<Array>()?;
    array
        .iter()
        .map(|item| item.dyn_into::<Function>().ok())
        .collect()
}

fn read_option(options: &JsValue, key: &str) -> JsValue {
    if !options.is_object() {
        return JsValue::UNDEFINED;
    }
    Reflect::get(options, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Options object holding every entry that is not `undefined`.
fn options_object(entries: &[(&str, JsValue)]) -> Result<JsValue, JsError> {
    let object = Object::new();
    for (key, value) in entries.iter().filter(|(_, value)| !value.is_undefined()) {
        Reflect::set(&object, &JsValue::from_str(key), value)
            .map_err(|err| JsError::new(&format!("Could not set option {key}: {err:?}")))?;
    }
    Ok(object.into())
}

fn parse_config(options: &JsValue) -> Result<(PickerConfig, Vec<Function>), PickerError> {
    let loose: JsPickerOptions = if options.is_undefined() || options.is_null() {
        JsPickerOptions::default()
    } else if options.is_object() {
        serde_wasm_bindgen::from_value(options.clone())
            .map_err(|err| invalid_option("options", &err.to_string()))?
    } else {
        return Err(invalid_option("options", "must be an object"));
    };

    let start = read_option(options, "startDate");
    let start_date = if start.is_undefined() || start.is_null() {
        None
    } else {
        let date = from_js_value(&start).ok_or_else(|| PickerError::InvalidDate(format!("{start:?}")))?;
        Some(date)
    };

    let callbacks = read_option(options, "callbacks");
    let callbacks = if callbacks.is_undefined() {
        Vec::new()
    } else {
        functions_from_array(&callbacks)
            .ok_or_else(|| invalid_option("callbacks", "must be an array of functions"))?
    };

    let defaults = PickerConfig::default();
    let config = PickerConfig {
        start_date,
        theme: loose.theme.unwrap_or(defaults.theme),
        format: loose.format.unwrap_or(defaults.format),
        close_on_select: loose.close_on_select.unwrap_or(defaults.close_on_select),
        only_show_current_month: loose.only_show_current_month.unwrap_or(defaults.only_show_current_month),
        align_picker_middle: loose.align_picker_middle.unwrap_or(defaults.align_picker_middle),
    };
    Ok((config, callbacks))
}

#[wasm_bindgen(js_name = MonthPicker)]
pub struct JsMonthPicker {
    handle: PickerHandle,
    functions: Vec<Function>,
}

impl JsMonthPicker {
    fn is_live(&self) -> bool {
        self.handle
            .read(|picker| !picker.is_destroyed() && !picker.is_disabled())
            .unwrap_or(false)
    }
}

#[wasm_bindgen(js_class = MonthPicker)]
impl JsMonthPicker {
    #[wasm_bindgen(constructor)]
    pub fn new(root: JsValue, options: JsValue) -> Result<JsMonthPicker, JsError> {
        Logger::init("info");

        let root = root_element(root)?;
        let (config, functions) = parse_config(&options).map_err(construction_error)?;
        let callbacks = functions.iter().cloned().map(js_callback).collect();

        let handle = PickerHandle::mount(root, &config, callbacks).map_err(construction_error)?;
        Ok(JsMonthPicker { handle, functions })
    }

    /// Positional form of the constructor. `undefined` takes the default.
    #[wasm_bindgen(js_name = fromArgs)]
    #[allow(clippy::too_many_arguments)]
    pub fn from_args(
        root: JsValue,
        start_date: JsValue,
        callbacks: JsValue,
        theme: JsValue,
        format: JsValue,
        close_on_select: JsValue,
        only_show_current_month: JsValue,
        align_picker_middle: JsValue,
    ) -> Result<JsMonthPicker, JsError> {
        let options = options_object(&[
            ("startDate", start_date),
            ("callbacks", callbacks),
            ("theme", theme),
            ("format", format),
            ("closeOnSelect", close_on_select),
            ("onlyShowCurrentMonth", only_show_current_month),
            ("alignPickerMiddle", align_picker_middle),
        ])?;
        Self::new(root, options)
    }

    /// Build from a JSON options document. Callbacks are not data, so they
    /// are added afterwards with `addCallback`.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(root: JsValue, json: &str) -> Result<JsMonthPicker, JsError> {
        Logger::init("info");

        let root = root_element(root)?;
        let config: PickerConfig =
            serde_json::from_str(json).map_err(|err| JsError::new(&format!("Invalid options JSON: {err}")))?;

        let handle = PickerHandle::mount(root, &config, Vec::new()).map_err(construction_error)?;
        Ok(JsMonthPicker {
            handle,
            functions: Vec::new(),
        })
    }

    pub fn init(&self) {
        self.handle.update(|picker| picker.init());
    }

    pub fn destroy(&self) {
        self.handle.update(|picker| picker.destroy());
    }

    pub fn open(&self) {
        self.handle.update(|picker| picker.open());
    }

    pub fn close(&self) {
        self.handle.update(|picker| picker.close());
    }

    pub fn toggle(&self) {
        self.handle.update(|picker| picker.toggle());
    }

    pub fn enable(&self) {
        self.handle.update(|picker| picker.enable());
    }

    pub fn disable(&self) {
        self.handle.update(|picker| picker.disable());
    }

    #[wasm_bindgen(js_name = setDate)]
    pub fn set_date(&self, value: JsValue) {
        match from_js_value(&value) {
            Some(date) => {
                self.handle.update(|picker| picker.set_date(date));
            }
            None => warn_rejected("setDate", &format!("{value:?}"), &PickerError::InvalidDate(format!("{value:?}"))),
        }
    }

    #[wasm_bindgen(js_name = setFormat)]
    pub fn set_format(&self, value: JsValue) {
        match value.as_string() {
            Some(format) => {
                self.handle.update(|picker| picker.set_format(&format));
            }
            None => warn_rejected("setFormat", &format!("{value:?}"), &PickerError::InvalidFormat(format!("{value:?}"))),
        }
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, value: JsValue) {
        match value.as_string() {
            Some(theme) => {
                self.handle.update(|picker| picker.set_theme(&theme));
            }
            None => warn_rejected("setTheme", &format!("{value:?}"), &PickerError::InvalidTheme(format!("{value:?}"))),
        }
    }

    #[wasm_bindgen(js_name = setCallbacks)]
    pub fn set_callbacks(&mut self, value: JsValue) {
        let Some(functions) = functions_from_array(&value) else {
            warn_rejected("setCallbacks", &format!("{value:?}"), &invalid_option("callbacks", "must be an array of functions"));
            return;
        };
        if !self.is_live() {
            return;
        }
        let callbacks = functions.iter().cloned().map(js_callback).collect();
        if self.handle.update(|picker| picker.set_callbacks(callbacks)).is_some() {
            self.functions = functions;
        }
    }

    #[wasm_bindgen(js_name = addCallback)]
    pub fn add_callback(&mut self, value: JsValue) {
        let Ok(function) = value.clone().dyn_into::<Function>() else {
            warn_rejected("addCallback", &format!("{value:?}"), &invalid_option("callback", "must be a function"));
            return;
        };
        if !self.is_live() {
            return;
        }
        let callback = js_callback(function.clone());
        if self.handle.update(|picker| picker.add_callback(callback)).is_some() {
            self.functions.push(function);
        }
    }

    #[wasm_bindgen(js_name = setCloseOnSelect)]
    pub fn set_close_on_select(&self, value: JsValue) {
        match value.as_bool() {
            Some(flag) => {
                self.handle.update(|picker| picker.set_close_on_select(flag));
            }
            None => warn_rejected("setCloseOnSelect", &format!("{value:?}"), &invalid_option("closeOnSelect", "must be a boolean")),
        }
    }

    #[wasm_bindgen(js_name = setOnlyShowCurrentMonth)]
    pub fn set_only_show_current_month(&self, value: JsValue) {
        match value.as_bool() {
            Some(flag) => {
                self.handle.update(|picker| picker.set_only_show_current_month(flag));
            }
            None => warn_rejected(
                "setOnlyShowCurrentMonth",
                &format!("{value:?}"),
                &invalid_option("onlyShowCurrentMonth", "must be a boolean"),
            ),
        }
    }

    #[wasm_bindgen(js_name = setAlignPickerMiddle)]
    pub fn set_align_picker_middle(&self, value: JsValue) {
        match value.as_bool() {
            Some(flag) => {
                self.handle.update(|picker| picker.set_align_picker_middle(flag));
            }
            None => warn_rejected(
                "setAlignPickerMiddle",
                &format!("{value:?}"),
                &invalid_option("alignPickerMiddle", "must be a boolean"),
            ),
        }
    }

    #[wasm_bindgen(js_name = setRootContainer)]
    pub fn set_root_container(&self, value: JsValue) {
        match value.dyn_into::<HtmlElement>() {
            Ok(root) => {
                self.handle.update(|picker| picker.set_root_container(root));
            }
            Err(value) => warn_rejected("setRootContainer", &format!("{value:?}"), &PickerError::RootNotConnected),
        }
    }

    /// Select the cell keyed `Y-M-D`, exactly as a click would.
    #[wasm_bindgen(js_name = selectDate)]
    pub fn select_date(&self, key: &str) {
        self.handle.select_date(key);
    }

    #[wasm_bindgen(js_name = getDate)]
    pub fn get_date(&self) -> js_sys::Date {
        match self.handle.read(|picker| picker.get_date()) {
            Some(date) => to_js_date(date),
            None => js_sys::Date::new_0(),
        }
    }

    #[wasm_bindgen(js_name = getDateArray)]
    pub fn get_date_array(&self) -> JsValue {
        let parts = self.handle.read(|picker| picker.get_date_array()).unwrap_or_default();
        serde_wasm_bindgen::to_value(&parts).unwrap_or_else(|_| Array::new().into())
    }

    #[wasm_bindgen(js_name = getDateFormatted)]
    pub fn get_date_formatted(&self) -> String {
        self.handle.read(|picker| picker.get_date_formatted()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getTheme)]
    pub fn get_theme(&self) -> String {
        self.handle
            .read(|picker| picker.get_theme())
            .flatten()
            .map(|theme| theme.as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getFormat)]
    pub fn get_format(&self) -> String {
        self.handle
            .read(|picker| picker.get_format())
            .flatten()
            .map(|format| format.as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getCallbacks)]
    pub fn get_callbacks(&self) -> Array {
        if !self.is_live() {
            return Array::new();
        }
        self.functions.iter().cloned().map(JsValue::from).collect()
    }

    #[wasm_bindgen(js_name = getCloseOnSelect)]
    pub fn get_close_on_select(&self) -> bool {
        self.handle.read(|picker| picker.get_close_on_select()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = getOnlyShowCurrentMonth)]
    pub fn get_only_show_current_month(&self) -> bool {
        self.handle.read(|picker| picker.get_only_show_current_month()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = getAlignPickerMiddle)]
    pub fn get_align_picker_middle(&self) -> bool {
        self.handle.read(|picker| picker.get_align_picker_middle()).unwrap_or(false)
    }

    /// `{ inputWrapper, input, monthPicker }`, each `null` when absent.
    #[wasm_bindgen(js_name = getInstances)]
    pub fn get_instances(&self) -> JsValue {
        let instances = self.handle.read(|picker| picker.get_instances()).unwrap_or_default();
        let or_null = |value: Option<JsValue>| value.unwrap_or(JsValue::NULL);

        let js = JsInstances {
            input_wrapper: or_null(instances.input_wrapper.map(JsValue::from)),
            input: or_null(instances.input.map(JsValue::from)),
            month_picker: or_null(instances.month_picker.map(JsValue::from)),
        };
        serde_wasm_bindgen::to_value(&js).unwrap_or_else(|_| Object::new().into())
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.handle.read(|picker| picker.is_open()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isDisabled)]
    pub fn is_disabled(&self) -> bool {
        self.handle.read(|picker| picker.is_disabled()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isDestroyed)]
    pub fn is_destroyed(&self) -> bool {
        self.handle.read(|picker| picker.is_destroyed()).unwrap_or(true)
    }
}
