//! Floating panel placement.
//!
//! The caller measures; this module only does arithmetic, so every edge
//! case can be exercised without a browser.

use std::fmt;

/// Measurements of the anchor wrapper.
///
/// `bounds_*` are viewport relative (`getBoundingClientRect`), `offset_*`
/// are layout offsets relative to the offset parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorGeometry {
    pub bounds_top: f64,
    pub bounds_bottom: f64,
    pub bounds_left: f64,
    pub offset_top: f64,
    pub offset_height: f64,
    pub offset_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub inner_width: f64,
    pub inner_height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

/// Resolved top/left for the panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelPosition {
    pub top: f64,
    pub left: f64,
}

impl PanelPosition {
    /// CSS values, e.g. `("12.5px", "40px")`.
    pub fn css(&self) -> (String, String) {
        (px(self.top), px(self.left))
    }
}

impl fmt::Display for PanelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (top, left) = self.css();
        write!(f, "top: {top}; left: {left}")
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn px(value: f64) -> String {
    format!("{}px", round2(value))
}

/// Compute where the panel goes.
///
/// Vertically the panel prefers the side of the anchor with more room and
/// is then pulled back inside the visible scroll region; a panel taller
/// than the viewport is pinned to the top of it. Horizontally it starts at
/// the anchor's left edge (or centred on the anchor when `center_align`),
/// then is kept off the right edge and never left of zero.
pub fn compute_position(
    anchor: &AnchorGeometry,
    viewport: &Viewport,
    panel: PanelSize,
    padding: f64,
    center_align: bool,
) -> PanelPosition {
    let space_below = viewport.inner_height - anchor.bounds_bottom;
    let space_above = anchor.bounds_top;

    let mut top = if space_below > space_above {
        anchor.offset_top + anchor.offset_height + padding
    } else {
        anchor.offset_top - panel.height - padding
    };

    // Above the visible region
    if viewport.scroll_y >= top {
        top = viewport.scroll_y + padding;
    }

    // Below the visible region
    let visible_bottom = viewport.inner_height + viewport.scroll_y;
    if top + panel.height > visible_bottom {
        let overflow = top + panel.height - visible_bottom;
        top -= overflow + anchor.offset_height;
    }

    if panel.height - padding * 2.0 >= viewport.inner_height {
        top = viewport.scroll_y + padding;
    }

    let mut left = anchor.bounds_left + viewport.scroll_x - padding;

    if left + panel.width > viewport.inner_width {
        left = viewport.inner_width - (panel.width + padding);
    }

    if center_align && panel.width != anchor.offset_width {
        let anchor_mid = anchor.bounds_left + viewport.scroll_x + anchor.offset_width / 2.0;
        left = anchor_mid - panel.width / 2.0;
    }

    if left < 0.0 {
        left = padding;
    }

    if left + panel.width >= viewport.inner_width {
        left -= round2((panel.width - anchor.offset_width) / 2.0);
    }

    PanelPosition {
        top: round2(top),
        left: round2(left),
    }
}
