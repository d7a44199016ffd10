use std::cell::RefCell;
use std::rc::Rc;

use monthpicker_core::{DateCallback, PickerConfig, PickerError};
use tracing::warn;
use web_sys::HtmlElement;

use crate::dom::{PickerLink, WebDom, WebPicker};

/// Shared ownership of one mounted picker.
///
/// Cloning is cheap; every clone drives the same instance. Listener and
/// timer closures only hold weak references, so dropping the last handle
/// after `destroy` releases everything.
#[derive(Clone)]
pub struct PickerHandle {
    picker: Rc<RefCell<WebPicker>>,
}

impl PickerHandle {
    /// Build a picker inside `root` and wire its listeners back to it.
    pub fn mount(root: HtmlElement, config: &PickerConfig, callbacks: Vec<DateCallback>) -> Result<Self, PickerError> {
        let link = PickerLink::default();
        let dom = WebDom::new(root, link.clone())?;
        let picker = Rc::new(RefCell::new(WebPicker::new(dom, config, callbacks)?));
        link.bind(&picker);
        Ok(Self { picker })
    }

    /// Read from the picker. `None` if it is currently being mutated.
    pub fn read<R>(&self, f: impl FnOnce(&WebPicker) -> R) -> Option<R> {
        match self.picker.try_borrow() {
            Ok(picker) => Some(f(&picker)),
            Err(_) => {
                warn!(target: "monthpicker", "picker is busy; read skipped");
                None
            }
        }
    }

    /// Mutate the picker. `None` if it is already borrowed, which only
    /// happens when a selection callback re-enters from inside a handler.
    pub fn update<R>(&self, f: impl FnOnce(&mut WebPicker) -> R) -> Option<R> {
        match self.picker.try_borrow_mut() {
            Ok(mut picker) => Some(f(&mut picker)),
            Err(_) => {
                warn!(target: "monthpicker", "picker is busy; update skipped");
                None
            }
        }
    }

    /// Select a grid cell by key and run the callbacks after releasing the picker.
    pub fn select_date(&self, key: &str) {
        if let Some(notice) = self.update(|picker| picker.select_date(key)).flatten() {
            notice.dispatch();
        }
    }
}
