//! Gallery components for pinwall masonry grids.
//!
//! This crate wires the pure engine from `pinwall-layout` into a scrolling
//! photo gallery:
//!
//! - [`photo`] holds the API-shaped photo record and page envelope;
//! - [`feed`] accumulates pages behind a validated pagination cursor;
//! - [`viewport`] tracks host scroll and resize signals behind an RAII
//!   subscription;
//! - [`controller`] memoizes the layout and windowing passes and hands the
//!   presentation layer one [`RenderPlan`] per frame.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use pinwall_gallery::{
//!     ContainerBox, GalleryFeed, GridArgs, GridController, SharedContainer, SignalBus,
//!     ViewportTracker,
//! };
//!
//! let bus = SignalBus::new();
//! let container = SharedContainer::new(ContainerBox {
//!     content_width: 1184.0,
//!     origin_y: 96.0,
//! });
//! let tracker = ViewportTracker::attach(&bus, Arc::new(container), 800.0);
//! let feed = GalleryFeed::new();
//! let mut controller = GridController::new(GridArgs::default(), tracker.handle());
//!
//! let plan = controller.plan(feed.photos(), feed.revision(), feed.loading(), feed.has_more());
//! assert!(plan.visible.is_empty());
//! ```

#![deny(missing_docs, clippy::unwrap_used)]

pub mod controller;
pub mod feed;
pub mod photo;
pub mod viewport;

pub use controller::{
    DEFAULT_GAP, DEFAULT_LOAD_MORE_THRESHOLD, GridArgs, GridController, RenderPlan,
};
pub use feed::{FeedError, GalleryFeed};
pub use photo::{Photo, PhotoPage, PhotoSrc};
pub use viewport::{
    ContainerBox, ContainerMetrics, HostSignal, SharedContainer, SignalBus, Subscription,
    ViewportHandle, ViewportTracker,
};
