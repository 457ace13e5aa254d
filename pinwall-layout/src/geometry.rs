//! Floating-point geometry primitives shared by the layout engine.
//!
//! All values are CSS-style pixels with the origin at the top-left corner,
//! the x axis growing to the right and the y axis growing downward.

/// An intrinsic width/height pair, used only as an aspect ratio source.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// A zero-sized value.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size from width and height.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `width / height`.
    ///
    /// The result is not sanitized. Degenerate sizes yield a non-finite or
    /// non-positive ratio, which consumers must clamp before using it as a
    /// divisor.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// An axis-aligned rectangle positioned inside the grid container.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Horizontal offset of the left edge from the container's left edge.
    pub left: f32,
    /// Vertical offset of the top edge from the container's top edge.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Vertical offset of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Horizontal offset of the right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Returns true if the rectangle's vertical extent touches the band
    /// `[start, end]`.
    ///
    /// Both edges are inclusive so that items exactly on a band edge are
    /// still considered inside it.
    pub fn intersects_band(&self, start: f32, end: f32) -> bool {
        self.bottom() >= start && self.top <= end
    }
}
