//! web-sys implementation of the picker's DOM seam.
//!
//! A [`WebDom`] holds direct references to every node it creates and never
//! queries the document, so any number of pickers can share a page. Window
//! listeners are [`gloo::events::EventListener`]s owned by the instance and
//! removed when they are dropped on detach.

mod cell;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use monthpicker_core::placement::{AnchorGeometry, PanelPosition, Viewport};
use monthpicker_core::{
    AnchorView, ClickTarget, DeferredTask, MonthPicker, PanelTarget, Part, PickerDom, PickerError,
    Theme,
};
use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, Node, Window};

use crate::components::input::{render_anchor_input, update_anchor_input, AnchorNodes};
use crate::components::panel::{render_panel, PanelNodes};
use crate::services::date_bridge;

pub use cell::WebDayCell;

pub type WebPicker = MonthPicker<WebDom>;

/// Late-bound back reference from listeners and timers to their picker.
///
/// Listeners are installed while the picker is still being constructed, so
/// they hold this shared slot and resolve it when an event arrives.
#[derive(Clone, Default)]
pub struct PickerLink(Rc<RefCell<Weak<RefCell<WebPicker>>>>);

impl PickerLink {
    pub fn bind(&self, picker: &Rc<RefCell<WebPicker>>) {
        *self.0.borrow_mut() = Rc::downgrade(picker);
    }

    /// Run `f` against the picker if it is alive and not already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut WebPicker) -> R) -> Option<R> {
        let picker = self.0.borrow().upgrade()?;
        let Ok(mut guard) = picker.try_borrow_mut() else {
            debug!(target: "monthpicker", "picker busy, event dropped");
            return None;
        };
        Some(f(&mut guard))
    }
}

/// Node references handed out by `getInstances`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebInstances {
    pub input_wrapper: Option<HtmlElement>,
    pub input: Option<HtmlInputElement>,
    pub month_picker: Option<HtmlElement>,
}

struct MountedPanel {
    nodes: PanelNodes,
    _click: EventListener,
}

pub struct WebDom {
    window: Window,
    document: Document,
    root: HtmlElement,
    panel_id: String,
    link: PickerLink,
    anchor: Option<AnchorNodes>,
    panel: Option<MountedPanel>,
    listeners: Vec<EventListener>,
}

fn event_node(event: &Event) -> Option<Node> {
    event.target()?.dyn_into::<Node>().ok()
}

fn contains(element: &Element, node: Option<&Node>) -> bool {
    node.is_some_and(|node| element.contains(Some(node)))
}

fn dom_error(error: anyhow::Error) -> PickerError {
    PickerError::Dom(format!("{error:#}"))
}

impl WebDom {
    pub fn new(root: HtmlElement, link: PickerLink) -> Result<Self, PickerError> {
        let window = web_sys::window().ok_or_else(|| PickerError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PickerError::Dom("no document".to_string()))?;

        Ok(Self {
            window,
            document,
            root,
            panel_id: format!("month-picker-{}", Uuid::new_v4()),
            link,
            anchor: None,
            panel: None,
            listeners: Vec::new(),
        })
    }

    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    /// Where a document click landed relative to this instance.
    pub fn classify_document_click(&self, node: Option<&Node>) -> ClickTarget {
        ClickTarget {
            in_anchor: self.anchor.as_ref().is_some_and(|anchor| contains(&anchor.wrapper, node)),
            in_panel: self.panel.as_ref().is_some_and(|panel| contains(&panel.nodes.panel, node)),
        }
    }

    /// What a click inside the panel hit.
    pub fn classify_panel_click(&self, node: Option<&Node>) -> PanelTarget {
        let Some(panel) = &self.panel else {
            return PanelTarget::Other;
        };
        let nodes = &panel.nodes;

        if contains(&nodes.prev, node) {
            PanelTarget::PrevMonth
        } else if contains(&nodes.next, node) {
            PanelTarget::NextMonth
        } else if let Some(index) = nodes.cells.iter().position(|cell| contains(cell, node)) {
            PanelTarget::Day(index)
        } else {
            PanelTarget::Other
        }
    }

    fn part(&self, part: Part) -> Option<&HtmlElement> {
        match part {
            Part::Wrapper => self.anchor.as_ref().map(|anchor| &anchor.wrapper),
            Part::Input => self.anchor.as_ref().map(|anchor| &*anchor.input),
            Part::Panel => self.panel.as_ref().map(|panel| &panel.nodes.panel),
            Part::Title => self.panel.as_ref().map(|panel| &panel.nodes.title),
            Part::Days => self.panel.as_ref().map(|panel| &panel.nodes.days),
        }
    }

    fn panel_click_listener(&self, panel: &HtmlElement) -> EventListener {
        let link = self.link.clone();
        EventListener::new(panel, "click", move |event| {
            let node = event_node(event);
            let notice = link
                .with(|picker| {
                    let target = picker.dom().classify_panel_click(node.as_ref());
                    picker.handle_panel_click(target)
                })
                .flatten();

            // The picker borrow is released before callbacks run
            if let Some(notice) = notice {
                notice.dispatch();
            }
        })
    }
}

impl PickerDom for WebDom {
    type Cell = WebDayCell;
    type Root = HtmlElement;
    type Instances = WebInstances;

    fn root(&self) -> &HtmlElement {
        &self.root
    }

    fn set_root(&mut self, root: HtmlElement) {
        self.root = root;
    }

    fn root_is_connected(root: &HtmlElement) -> bool {
        root.is_connected()
    }

    fn create_anchor(&mut self, theme: Theme, anchor: &AnchorView) -> Result<(), PickerError> {
        let nodes = render_anchor_input(&self.document, theme, &self.panel_id, anchor).map_err(dom_error)?;
        self.root
            .append_child(&nodes.wrapper)
            .map_err(|err| PickerError::Dom(format!("anchor append failed: {err:?}")))?;
        self.anchor = Some(nodes);
        Ok(())
    }

    fn create_panel(&mut self, theme: Theme) -> Result<Vec<WebDayCell>, PickerError> {
        let nodes = render_panel(&self.document, theme, &self.panel_id).map_err(dom_error)?;
        self.root
            .append_child(&nodes.panel)
            .map_err(|err| PickerError::Dom(format!("panel append failed: {err:?}")))?;

        let cells = nodes.cells.iter().cloned().map(WebDayCell::new).collect();
        let click = self.panel_click_listener(&nodes.panel);
        self.panel = Some(MountedPanel { nodes, _click: click });
        Ok(cells)
    }

    fn remove_panel(&mut self) {
        if let Some(panel) = self.panel.take() {
            panel.nodes.panel.remove();
        }
    }

    fn remove_all(&mut self) {
        self.remove_panel();
        if let Some(anchor) = self.anchor.take() {
            anchor.wrapper.remove();
        }
    }

    fn instances(&self) -> WebInstances {
        WebInstances {
            input_wrapper: self.anchor.as_ref().map(|anchor| anchor.wrapper.clone()),
            input: self.anchor.as_ref().map(|anchor| anchor.input.clone()),
            month_picker: self.panel.as_ref().map(|panel| panel.nodes.panel.clone()),
        }
    }

    fn render_anchor(&mut self, anchor: &AnchorView) {
        if let Some(nodes) = &self.anchor {
            if let Err(err) = update_anchor_input(&nodes.input, anchor) {
                warn!(target: "monthpicker", "anchor render failed: {err:#}");
            }
        }
    }

    fn render_title(&mut self, title: &str) {
        if let Some(panel) = &self.panel {
            panel.nodes.title.set_text_content(Some(title));
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        for part in [Part::Wrapper, Part::Panel] {
            for other in Theme::ALL {
                self.remove_class(part, other.css_class());
            }
            self.add_class(part, theme.css_class());
        }
    }

    fn set_open_attr(&mut self, open: bool) {
        let value = if open { "true" } else { "false" };
        for part in [Part::Wrapper, Part::Panel] {
            if let Some(element) = self.part(part) {
                if let Err(err) = element.set_attribute("data-picker-open", value) {
                    debug!(target: "monthpicker", ?err, "open attribute rejected");
                }
            }
        }
    }

    fn add_class(&mut self, part: Part, class: &str) {
        if let Some(element) = self.part(part) {
            if let Err(err) = element.class_list().add_1(class) {
                debug!(target: "monthpicker", ?err, class, "class add rejected");
            }
        }
    }

    fn remove_class(&mut self, part: Part, class: &str) {
        if let Some(element) = self.part(part) {
            if let Err(err) = element.class_list().remove_1(class) {
                debug!(target: "monthpicker", ?err, class, "class remove rejected");
            }
        }
    }

    fn focus(&mut self, part: Part) {
        let target = match part {
            Part::Wrapper => Part::Input,
            other => other,
        };
        if let Some(element) = self.part(target) {
            if let Err(err) = element.focus() {
                debug!(target: "monthpicker", ?err, "focus rejected");
            }
        }
    }

    fn measure(&self) -> Option<(AnchorGeometry, Viewport)> {
        let wrapper = &self.anchor.as_ref()?.wrapper;
        let bounds = wrapper.get_bounding_client_rect();

        let anchor = AnchorGeometry {
            bounds_top: bounds.top(),
            bounds_bottom: bounds.bottom(),
            bounds_left: bounds.left(),
            offset_top: f64::from(wrapper.offset_top()),
            offset_height: f64::from(wrapper.offset_height()),
            offset_width: f64::from(wrapper.offset_width()),
        };
        let viewport = Viewport {
            inner_width: self.window.inner_width().ok()?.as_f64()?,
            inner_height: self.window.inner_height().ok()?.as_f64()?,
            scroll_x: self.window.scroll_x().ok()?,
            scroll_y: self.window.scroll_y().ok()?,
        };
        Some((anchor, viewport))
    }

    fn place_panel(&mut self, position: &PanelPosition) {
        let Some(panel) = &self.panel else {
            return;
        };
        let (top, left) = position.css();
        let style = panel.nodes.panel.style();
        for (property, value) in [("top", top), ("left", left)] {
            if let Err(err) = style.set_property(property, &value) {
                debug!(target: "monthpicker", ?err, property, "style rejected");
            }
        }
    }

    fn attach_listeners(&mut self) {
        let click = {
            let link = self.link.clone();
            EventListener::new(&self.window, "click", move |event| {
                let node = event_node(event);
                link.with(|picker| {
                    let target = picker.dom().classify_document_click(node.as_ref());
                    picker.handle_document_click(target);
                });
            })
        };

        let keydown = {
            let link = self.link.clone();
            EventListener::new(&self.window, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    let key = event.key();
                    link.with(|picker| picker.handle_keydown(&key));
                }
            })
        };

        let scroll = {
            let link = self.link.clone();
            EventListener::new_with_options(
                &self.window,
                "scroll",
                EventListenerOptions::run_in_capture_phase(),
                move |_| {
                    link.with(|picker| picker.handle_scroll());
                },
            )
        };

        let resize = {
            let link = self.link.clone();
            EventListener::new(&self.window, "resize", move |_| {
                link.with(|picker| picker.handle_resize());
            })
        };

        self.listeners = vec![click, keydown, scroll, resize];
    }

    fn detach_listeners(&mut self) {
        self.listeners.clear();
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn today(&self) -> NaiveDate {
        date_bridge::today()
    }

    fn schedule(&mut self, delay_ms: u32, task: DeferredTask) {
        let link = self.link.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            link.with(|picker| picker.run_deferred(task));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthpicker_core::PickerConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_root() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn mount(config: &PickerConfig) -> Rc<RefCell<WebPicker>> {
        let link = PickerLink::default();
        let dom = WebDom::new(mount_root(), link.clone()).unwrap();
        let picker = Rc::new(RefCell::new(MonthPicker::new(dom, config, Vec::new()).unwrap()));
        link.bind(&picker);
        picker
    }

    fn january_config() -> PickerConfig {
        PickerConfig {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            ..PickerConfig::default()
        }
    }

    #[wasm_bindgen_test]
    fn test_builds_anchor_and_panel() {
        let picker = mount(&january_config());
        let picker = picker.borrow();
        let instances = picker.get_instances();

        let input = instances.input.unwrap();
        assert_eq!(input.placeholder(), "January 1st, 2023");
        assert_eq!(input.get_attribute("data-date-value").as_deref(), Some("2023-01-01"));
        assert_eq!(input.get_attribute("data-format").as_deref(), Some("month dd, yyyy"));
        assert_eq!(input.get_attribute("aria-controls").as_deref(), Some(picker.dom().panel_id()));
        assert_eq!(input.get_attribute("aria-readonly").as_deref(), Some("true"));

        let panel = instances.month_picker.unwrap();
        assert_eq!(panel.get_attribute("data-picker-open").as_deref(), Some("false"));
        assert_eq!(panel.query_selector_all(".day").unwrap().length(), 42);

        let first = panel.query_selector(".day").unwrap().unwrap();
        assert_eq!(first.get_attribute("data-date").as_deref(), Some("2023-1-1"));
        assert!(first.class_list().contains("selected-day"));
    }

    #[wasm_bindgen_test]
    fn test_open_sets_attributes_and_position() {
        let picker = mount(&january_config());
        picker.borrow_mut().open();

        let picker = picker.borrow();
        let instances = picker.get_instances();
        let wrapper = instances.input_wrapper.unwrap();
        let panel = instances.month_picker.unwrap();

        assert_eq!(wrapper.get_attribute("data-picker-open").as_deref(), Some("true"));
        assert_eq!(panel.get_attribute("data-picker-open").as_deref(), Some("true"));
        assert!(!panel.class_list().contains("picker-disabled"));
        assert!(panel.style().get_property_value("top").unwrap().ends_with("px"));
    }

    #[wasm_bindgen_test]
    fn test_panel_click_classification() {
        let picker = mount(&january_config());
        let picker = picker.borrow();
        let panel = picker.get_instances().month_picker.unwrap();

        let next = panel.query_selector(".next").unwrap().unwrap();
        let node: Node = next.unchecked_into();
        assert_eq!(picker.dom().classify_panel_click(Some(&node)), PanelTarget::NextMonth);

        let days = panel.query_selector_all(".day").unwrap();
        let tenth = days.item(9).unwrap();
        assert_eq!(picker.dom().classify_panel_click(Some(&tenth)), PanelTarget::Day(9));

        let root: &Node = picker.dom().root();
        let outside = picker.dom().classify_document_click(Some(root));
        assert_eq!(outside, ClickTarget::default());
    }

    #[wasm_bindgen_test]
    fn test_destroy_removes_nodes() {
        let picker = mount(&january_config());
        let root = picker.borrow().dom().root().clone();
        assert_eq!(root.child_element_count(), 2);

        picker.borrow_mut().destroy();
        assert_eq!(root.child_element_count(), 0);

        picker.borrow_mut().init();
        assert_eq!(root.child_element_count(), 2);
    }

    #[wasm_bindgen_test]
    fn test_two_pickers_do_not_share_nodes() {
        let first = mount(&january_config());
        let second = mount(&PickerConfig::default());
        assert_ne!(first.borrow().dom().panel_id(), second.borrow().dom().panel_id());

        first.borrow_mut().destroy();
        assert!(second.borrow().get_instances().month_picker.is_some());
    }
}
