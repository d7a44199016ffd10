//! The seam between the controller and a concrete page.
//!
//! [`PickerDom`] owns every node it creates and answers for them; the
//! controller never looks anything up by selector. The browser crate
//! implements it with web-sys, the tests below with plain data.

use chrono::NaiveDate;

use crate::error::PickerError;
use crate::grid::DayCell;
use crate::options::Theme;
use crate::placement::{AnchorGeometry, PanelPosition, Viewport};

/// Addressable pieces of the picker fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Anchor wrapper around icon and input
    Wrapper,
    Input,
    /// Floating panel
    Panel,
    /// Month/year label in the panel header
    Title,
    /// Container of the 42 day cells
    Days,
}

/// What the anchor input displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorView {
    /// Formatted date shown as the placeholder
    pub text: String,
    /// ISO date for `data-date-value`
    pub date_value: String,
    /// Lowercase template for `data-format`
    pub format: String,
}

/// Where a document level click landed, relative to this picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub in_anchor: bool,
    pub in_panel: bool,
}

/// What was clicked inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    PrevMonth,
    NextMonth,
    /// Index into the cell pool
    Day(usize),
    Other,
}

/// Work deferred by one timer interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// Drop the slide class from header and grid
    ClearSlide(crate::navigation::SlideDirection),
    /// Drop the opening transition class
    FinishOpen,
    /// Promote the fade-out class to fully hidden
    FinishClose,
    /// Debounced reposition; carries the debounce ticket
    Reposition(u64),
}

/// A deferred task tagged with the controller generation that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    pub epoch: u64,
    pub kind: DeferredKind,
}

/// Everything the controller needs from the host page.
pub trait PickerDom {
    type Cell: DayCell;
    /// Mount point handed in by the host
    type Root: PartialEq;
    /// Node references exposed through `get_instances`
    type Instances: Default;

    fn root(&self) -> &Self::Root;
    fn set_root(&mut self, root: Self::Root);
    fn root_is_connected(root: &Self::Root) -> bool;

    /// Create the anchor wrapper and its input inside the root.
    fn create_anchor(&mut self, theme: Theme, anchor: &AnchorView) -> Result<(), PickerError>;
    /// Create the hidden panel and return its fresh pool of day cells.
    fn create_panel(&mut self, theme: Theme) -> Result<Vec<Self::Cell>, PickerError>;
    fn remove_panel(&mut self);
    /// Remove every node this instance created.
    fn remove_all(&mut self);
    fn instances(&self) -> Self::Instances;

    fn render_anchor(&mut self, anchor: &AnchorView);
    fn render_title(&mut self, title: &str);
    /// Remove both theme classes from wrapper and panel and apply `theme`.
    fn apply_theme(&mut self, theme: Theme);
    /// Write `data-picker-open` on wrapper and panel.
    fn set_open_attr(&mut self, open: bool);
    fn add_class(&mut self, part: Part, class: &str);
    fn remove_class(&mut self, part: Part, class: &str);
    fn focus(&mut self, part: Part);

    fn measure(&self) -> Option<(AnchorGeometry, Viewport)>;
    fn place_panel(&mut self, position: &PanelPosition);

    /// Install the window level listeners for this instance.
    fn attach_listeners(&mut self);
    /// Remove them again; must be synchronous.
    fn detach_listeners(&mut self);

    fn now_ms(&self) -> f64;
    fn today(&self) -> NaiveDate;
    /// Fire-and-forget: hand `task` back to the controller after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, task: DeferredTask);
}
