//! The grid controller: memoized composition of layout and windowing.
//!
//! ## Usage
//!
//! [`GridController`] sits between the feed, the viewport tracker, and the
//! presentation layer. Each frame the presentation layer asks it for a
//! [`RenderPlan`]; the controller recomputes the masonry layout only when the
//! inputs of that pass actually changed, and the visible subset only when the
//! viewport moved. An ordinary scroll tick therefore touches nothing but the
//! windowing filter, which is what keeps scrolling cheap on large feeds.
//!
//! The controller owns no state of its own beyond these memoized
//! derivations; items live in the feed and the viewport lives with its
//! tracker.

use derive_setters::Setters;
use pinwall_layout::{
    DEFAULT_BUFFER, Layout, Slot, Tile, column_count_for_width, compute_layout, select_visible,
};
use tracing::debug;

use crate::viewport::ViewportHandle;

/// Default spacing between columns and between items within a column.
pub const DEFAULT_GAP: f32 = 16.0;

/// Default distance from the content bottom at which the next page load is
/// requested.
pub const DEFAULT_LOAD_MORE_THRESHOLD: f32 = 500.0;

/// Tuning knobs for the grid controller.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct GridArgs {
    /// Spacing between columns and between stacked items, in pixels.
    pub gap: f32,
    /// Overscan margin added on both viewport edges when selecting visible
    /// slots.
    pub buffer: f32,
    /// Distance from the content bottom at which [`RenderPlan`] raises its
    /// load-more signal.
    pub load_more_threshold: f32,
}

impl Default for GridArgs {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            buffer: DEFAULT_BUFFER,
            load_more_threshold: DEFAULT_LOAD_MORE_THRESHOLD,
        }
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    /// The slots to materialize, in layout order. Resolve each slot's payload
    /// by indexing the item slice the plan was derived from.
    pub visible: Vec<Slot>,
    /// Total content height, for sizing the scroll-spacer element.
    pub container_height: f32,
    /// Pass-through of the feed's in-flight flag, for a trailing spinner.
    pub loading: bool,
    /// True when the scroll position is close enough to the content bottom
    /// that the next page should be requested.
    pub should_load_more: bool,
}

impl RenderPlan {
    fn empty(loading: bool) -> Self {
        Self {
            visible: Vec::new(),
            container_height: 0.0,
            loading,
            should_load_more: false,
        }
    }
}

/// Inputs of one layout pass. Recomputation happens only when this key
/// changes; f32 inputs are compared by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    container_width: u32,
    column_count: usize,
    gap: u32,
}

/// Inputs of one windowing pass over a given layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowKey {
    layout: LayoutKey,
    scroll: u32,
    viewport_height: u32,
    buffer: u32,
}

struct LayoutCache {
    key: LayoutKey,
    layout: Layout,
}

struct WindowCache {
    key: WindowKey,
    visible: Vec<Slot>,
}

/// Derives [`RenderPlan`]s from the feed's items and the tracked viewport.
pub struct GridController {
    args: GridArgs,
    viewport: ViewportHandle,
    layout_cache: Option<LayoutCache>,
    window_cache: Option<WindowCache>,
    layout_passes: u64,
}

impl GridController {
    /// Creates a controller reading viewport state through `viewport`.
    pub fn new(args: GridArgs, viewport: ViewportHandle) -> Self {
        Self {
            args,
            viewport,
            layout_cache: None,
            window_cache: None,
            layout_passes: 0,
        }
    }

    /// The configured tuning knobs.
    pub fn args(&self) -> &GridArgs {
        &self.args
    }

    /// Number of layout passes run so far. Diagnostic: a scroll-only frame
    /// must not increase this.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Drops both caches, forcing full recomputation on the next plan.
    pub fn invalidate(&mut self) {
        self.layout_cache = None;
        self.window_cache = None;
    }

    /// Produces the render plan for the current frame.
    ///
    /// `revision` identifies the content of `items`; callers bump it whenever
    /// the sequence changes (the feed does this on every append and reset).
    /// `loading` and `has_more` are pass-throughs from the pagination
    /// collaborator and gate the load-more signal.
    pub fn plan<T: Tile>(
        &mut self,
        items: &[T],
        revision: u64,
        loading: bool,
        has_more: bool,
    ) -> RenderPlan {
        let viewport = *self.viewport.read();
        let column_count = column_count_for_width(viewport.container_width);
        let layout_key = LayoutKey {
            revision,
            container_width: viewport.container_width.to_bits(),
            column_count,
            gap: self.args.gap.to_bits(),
        };

        if self.layout_cache.as_ref().map(|c| c.key) != Some(layout_key) {
            let layout =
                compute_layout(items, viewport.container_width, column_count, self.args.gap);
            self.layout_passes += 1;
            debug!(
                slots = layout.slots.len(),
                container_height = layout.container_height,
                columns = column_count,
                "layout recomputed"
            );
            self.layout_cache = Some(LayoutCache {
                key: layout_key,
                layout,
            });
            self.window_cache = None;
        }
        let Some(layout_cache) = self.layout_cache.as_ref() else {
            return RenderPlan::empty(loading);
        };

        let window_key = WindowKey {
            layout: layout_key,
            scroll: viewport.scroll_position.to_bits(),
            viewport_height: viewport.viewport_height.to_bits(),
            buffer: self.args.buffer.to_bits(),
        };
        if self.window_cache.as_ref().map(|c| c.key) != Some(window_key) {
            let visible = select_visible(&layout_cache.layout, viewport, self.args.buffer);
            self.window_cache = Some(WindowCache {
                key: window_key,
                visible,
            });
        }

        let container_height = layout_cache.layout.container_height;
        let visible = self
            .window_cache
            .as_ref()
            .map(|c| c.visible.clone())
            .unwrap_or_default();
        let should_load_more = has_more
            && !loading
            && container_height > 0.0
            && viewport.scroll_position + viewport.viewport_height
                >= container_height - self.args.load_more_threshold;

        RenderPlan {
            visible,
            container_height,
            loading,
            should_load_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::RwLock;
    use pinwall_layout::Viewport;

    use super::*;
    use crate::photo::{Photo, PhotoSrc};

    fn photo(id: u64, width: u32, height: u32) -> Photo {
        Photo {
            id,
            width,
            height,
            url: String::new(),
            photographer: String::new(),
            photographer_url: String::new(),
            photographer_id: 0,
            avg_color: String::new(),
            src: PhotoSrc::default(),
            liked: false,
            alt: String::new(),
        }
    }

    fn squares(count: usize) -> Vec<Photo> {
        (0..count).map(|i| photo(i as u64, 1000, 1000)).collect()
    }

    fn handle(viewport: Viewport) -> ViewportHandle {
        Arc::new(RwLock::new(viewport))
    }

    #[test]
    fn test_scroll_tick_reuses_layout() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport.clone());
        let items = squares(40);

        let first = controller.plan(&items, 1, false, true);
        assert_eq!(controller.layout_passes(), 1);
        assert_eq!(first.container_height, 40.0 * 616.0 - 16.0);

        viewport.write().scroll_position = 3000.0;
        let second = controller.plan(&items, 1, false, true);
        assert_eq!(controller.layout_passes(), 1);
        assert_ne!(first.visible, second.visible);
        assert_eq!(first.container_height, second.container_height);
    }

    #[test]
    fn test_identical_frame_reuses_window() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);
        let items = squares(10);

        let first = controller.plan(&items, 1, false, true);
        let second = controller.plan(&items, 1, false, true);
        assert_eq!(first, second);
        assert_eq!(controller.layout_passes(), 1);
    }

    #[test]
    fn test_revision_bump_recomputes_layout() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);

        let ten = squares(10);
        let plan_ten = controller.plan(&ten, 1, false, true);
        let twenty = squares(20);
        let plan_twenty = controller.plan(&twenty, 2, false, true);
        assert_eq!(controller.layout_passes(), 2);
        assert!(plan_twenty.container_height > plan_ten.container_height);
    }

    #[test]
    fn test_resize_recomputes_layout_with_new_column_count() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport.clone());
        let items = squares(12);

        let narrow = controller.plan(&items, 1, false, true);

        // From one column up to five.
        viewport.write().container_width = 1300.0;
        let wide = controller.plan(&items, 1, false, true);
        assert_eq!(controller.layout_passes(), 2);
        assert!(wide.container_height < narrow.container_height);
    }

    #[test]
    fn test_load_more_threshold() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport.clone());
        let items = squares(10);
        // One 600 px column of squares: content height 10 * 616 - 16 = 6144.

        let far = controller.plan(&items, 1, false, true);
        assert!(!far.should_load_more);

        viewport.write().scroll_position = 4844.0;
        let near = controller.plan(&items, 1, false, true);
        assert!(near.should_load_more);

        viewport.write().scroll_position = 4843.0;
        let just_above = controller.plan(&items, 1, false, true);
        assert!(!just_above.should_load_more);
    }

    #[test]
    fn test_load_more_suppressed_while_loading_or_exhausted() {
        let viewport = handle(Viewport::new(6000.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);
        let items = squares(10);

        assert!(controller.plan(&items, 1, false, true).should_load_more);
        assert!(!controller.plan(&items, 1, true, true).should_load_more);
        assert!(!controller.plan(&items, 1, false, false).should_load_more);
    }

    #[test]
    fn test_empty_feed_never_requests_more() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);
        let plan = controller.plan::<Photo>(&[], 0, false, true);
        assert!(plan.visible.is_empty());
        assert_eq!(plan.container_height, 0.0);
        // The initial page request is the collaborator's call, not a
        // scroll-derived signal.
        assert!(!plan.should_load_more);
    }

    #[test]
    fn test_loading_passthrough() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);
        let items = squares(3);
        assert!(controller.plan(&items, 1, true, true).loading);
        assert!(!controller.plan(&items, 1, false, true).loading);
    }

    #[test]
    fn test_invalidate_forces_recomputation() {
        let viewport = handle(Viewport::new(0.0, 800.0, 600.0));
        let mut controller = GridController::new(GridArgs::default(), viewport);
        let items = squares(5);
        controller.plan(&items, 1, false, true);
        controller.invalidate();
        controller.plan(&items, 1, false, true);
        assert_eq!(controller.layout_passes(), 2);
    }
}
