//! Browser front end for the month picker.
//!
//! `dom` implements the core's `PickerDom` seam with web-sys, `bindings`
//! exports the `MonthPicker` class to JavaScript and `components` holds
//! both the raw DOM builders and the Yew wrapper component.

pub mod bindings;
pub mod components;
pub mod dom;
pub mod handle;
pub mod services;

pub use components::month_picker_field::{MonthPickerField, MonthPickerFieldProps};
pub use handle::PickerHandle;
