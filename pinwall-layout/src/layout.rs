//! Greedy shortest-column masonry packing.
//!
//! ## Usage
//!
//! Feed an ordered slice of [`Tile`]s and a measured container width to
//! [`compute_layout`] and place each returned [`Slot`] absolutely inside a
//! container of the reported height.
//!
//! The pass is deterministic: identical inputs always produce identical
//! placements, so layouts are reproducible across frames and across runs.

use smallvec::{SmallVec, smallvec};
use tracing::warn;

use crate::{breakpoints::MAX_COLUMNS, geometry::Rect, tile::Tile};

/// A placed tile: its index in the input sequence, its stable identifier and
/// the computed rectangle.
///
/// Slots are derived values. A relayout recomputes the whole sequence, there
/// is no incremental patching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Index of the source tile in the input slice.
    pub index: usize,
    /// Identifier of the source tile, used as the stable render key.
    pub id: u64,
    /// Computed position and size inside the grid container.
    pub rect: Rect,
}

/// The result of one layout pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Layout {
    /// All placed slots, in input order.
    ///
    /// Only the absolute `top`/`left` of each slot matters for rendering, so
    /// emission order is free to follow the input sequence. This keeps the
    /// visible subset in visual read order without re-sorting.
    pub slots: Vec<Slot>,
    /// Height of the tallest column without its trailing gap. Equal to the
    /// maximum of `top + height` over all slots.
    pub container_height: f32,
}

impl Layout {
    /// Returns true if the layout holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Returns the shared column width for a container.
///
/// Every column gets the same width: the container width minus the inter-column
/// gaps, divided evenly. Clamped at zero when gaps exceed the container.
pub fn column_width(container_width: f32, column_count: usize, gap: f32) -> f32 {
    let column_count = column_count.max(1);
    let gaps = gap * (column_count - 1) as f32;
    ((container_width - gaps) / column_count as f32).max(0.0)
}

/// Packs `items` into `column_count` columns of uniform width.
///
/// Items are processed in input order and each goes to the currently shortest
/// column, ties broken by the lowest column index. An item's display height
/// follows from its aspect ratio at the shared column width.
///
/// Degenerate input never panics: an empty slice or a non-positive container
/// width yields an empty layout, a zero column count is clamped to one, and
/// items with degenerate intrinsic sizes are placed with zero height rather
/// than propagating non-finite values into rendered dimensions.
#[tracing::instrument(level = "trace", skip(items), fields(item_count = items.len()))]
pub fn compute_layout<T: Tile>(
    items: &[T],
    container_width: f32,
    column_count: usize,
    gap: f32,
) -> Layout {
    if items.is_empty() || container_width <= 0.0 {
        return Layout::default();
    }

    let column_count = sanitize_column_count(column_count);
    let gap = sanitize_gap(gap);
    let width = column_width(container_width, column_count, gap);

    // Transient arena of running column heights, gone after the pass.
    let mut columns: SmallVec<[f32; MAX_COLUMNS]> = smallvec![0.0; column_count];
    let mut slots = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let column = shortest_column(&columns);
        let height = item_height(width, item.aspect_ratio());
        let rect = Rect::new(column as f32 * (width + gap), columns[column], width, height);
        slots.push(Slot {
            index,
            id: item.id(),
            rect,
        });
        columns[column] += height + gap;
    }

    Layout {
        slots,
        container_height: finalize_column_heights(&columns, gap),
    }
}

/// Display height for an item at the shared column width.
///
/// Non-finite and non-positive results collapse to zero so degenerate
/// intrinsic sizes cannot leak NaN into placements.
fn item_height(column_width: f32, aspect_ratio: f32) -> f32 {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return 0.0;
    }
    let height = column_width / aspect_ratio;
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

fn sanitize_column_count(count: usize) -> usize {
    if count == 0 {
        warn!("column count of zero clamped to one");
        1
    } else {
        count
    }
}

fn sanitize_gap(gap: f32) -> f32 {
    if gap.is_finite() && gap > 0.0 { gap } else { 0.0 }
}

fn shortest_column(columns: &[f32]) -> usize {
    let mut index = 0;
    let mut best = columns.first().copied().unwrap_or(0.0);
    for (i, height) in columns.iter().enumerate().skip(1) {
        if *height < best {
            best = *height;
            index = i;
        }
    }
    index
}

/// Tallest accumulated column height without the gap trailing its last item.
fn finalize_column_heights(columns: &[f32], gap: f32) -> f32 {
    let max = columns.iter().copied().fold(0.0_f32, f32::max);
    if max <= 0.0 { 0.0 } else { (max - gap).max(0.0) }
}
