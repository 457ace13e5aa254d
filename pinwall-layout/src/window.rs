//! Viewport state and the visibility window selector.
//!
//! ## Usage
//!
//! Virtualization keeps rendering cost bounded: instead of materializing
//! every laid-out slot, [`select_visible`] filters a [`Layout`] down to the
//! slots whose rectangle touches the viewport extended by a buffer margin on
//! both edges. The buffer pre-renders just-offscreen content so fast scrolling
//! does not pop blank tiles into view.

use crate::layout::{Layout, Slot};

/// Extra margin in pixels added above and below the viewport when selecting
/// visible slots.
pub const DEFAULT_BUFFER: f32 = 1000.0;

/// A snapshot of the scroll viewport, measured in the grid container's
/// coordinate frame.
///
/// The tracker that owns the live value is the only writer; every other
/// component reads a copy.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset relative to the container's top edge. Never
    /// negative.
    pub scroll_position: f32,
    /// Height of the visible viewport.
    pub viewport_height: f32,
    /// Measured inner width of the grid container.
    pub container_width: f32,
}

impl Viewport {
    /// Creates a viewport snapshot.
    pub const fn new(scroll_position: f32, viewport_height: f32, container_width: f32) -> Self {
        Self {
            scroll_position,
            viewport_height,
            container_width,
        }
    }
}

/// Filters a layout to the slots intersecting the viewport extended by
/// `buffer` on both edges.
///
/// A slot is kept iff its bottom edge reaches `scroll_position - buffer` and
/// its top edge does not pass `scroll_position + viewport_height + buffer`.
/// Selection preserves layout order; nothing is re-sorted.
pub fn select_visible(layout: &Layout, viewport: Viewport, buffer: f32) -> Vec<Slot> {
    let buffer = if buffer.is_finite() && buffer > 0.0 {
        buffer
    } else {
        0.0
    };
    let band_start = viewport.scroll_position - buffer;
    let band_end = viewport.scroll_position + viewport.viewport_height + buffer;
    layout
        .slots
        .iter()
        .copied()
        .filter(|slot| slot.rect.intersects_band(band_start, band_end))
        .collect()
}
