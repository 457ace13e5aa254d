//! Masonry layout and viewport windowing for virtualized photo grids.
//!
//! This crate is the pure core of a scrolling gallery: it assigns every item
//! a column, position and size, and decides which of those placements are
//! close enough to the viewport to be worth materializing. It owns no event
//! loop and performs no I/O; hosts feed it measured widths and scroll offsets
//! and render whatever it selects.
//!
//! # Layout
//!
//! [`compute_layout`] packs an ordered slice of [`Tile`]s into columns of
//! uniform width using greedy shortest-column placement:
//!
//! ```
//! use pinwall_layout::{Size, Tile, compute_layout};
//!
//! struct Photo {
//!     id: u64,
//!     width: f32,
//!     height: f32,
//! }
//!
//! impl Tile for Photo {
//!     fn id(&self) -> u64 {
//!         self.id
//!     }
//!
//!     fn intrinsic_size(&self) -> Size {
//!         Size::new(self.width, self.height)
//!     }
//! }
//!
//! let photos = vec![
//!     Photo { id: 1, width: 1600.0, height: 900.0 },
//!     Photo { id: 2, width: 900.0, height: 1600.0 },
//! ];
//! let layout = compute_layout(&photos, 1000.0, 3, 16.0);
//! assert_eq!(layout.slots.len(), 2);
//! ```
//!
//! # Windowing
//!
//! [`select_visible`] filters a layout to the slots near the current
//! [`Viewport`], extended by a buffer margin so fast scrolling does not pop
//! blank tiles into view.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod breakpoints;
pub mod geometry;
pub mod layout;
pub mod tile;
pub mod window;

pub use breakpoints::{MAX_COLUMNS, column_count_for_width};
pub use geometry::{Rect, Size};
pub use layout::{Layout, Slot, column_width, compute_layout};
pub use tile::Tile;
pub use window::{DEFAULT_BUFFER, Viewport, select_visible};
