//! Month picker core.
//!
//! Everything here is target independent: date arithmetic, panel placement,
//! the 42 cell grid engine, the navigation state and the controller that
//! ties them together through the [`PickerDom`] seam. The browser crate
//! supplies a web-sys implementation of that seam.

pub mod constants;
pub mod controller;
pub mod date_utils;
pub mod dom;
pub mod error;
pub mod grid;
pub mod navigation;
pub mod options;
pub mod placement;
pub mod rate_limit;

pub use controller::{DateCallback, MonthPicker, SelectionNotice};
pub use date_utils::DateKey;
pub use dom::{AnchorView, ClickTarget, DeferredKind, DeferredTask, PanelTarget, Part, PickerDom};
pub use error::PickerError;
pub use grid::{CellClass, DayCell};
pub use navigation::SlideDirection;
pub use options::{DateFormat, PickerConfig, PickerOptions, Theme};
pub use placement::{AnchorGeometry, PanelPosition, Viewport};
