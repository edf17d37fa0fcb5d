//! Geometry primitives in CSS pixels.
//!
//! Coordinates are `f64` throughout. Whether a value is viewport-relative or
//! document-relative is a property of where it came from, not of the type:
//! `Document::bounding_rect` yields viewport-relative rectangles, while
//! positions written back to overlays are document-relative.

use serde::{Deserialize, Serialize};

/// Margin kept between an overlay and the viewport edges, in pixels.
pub const VIEWPORT_MARGIN: f64 = 4.0;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    pub fn offset_by(self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// A translation applied as a visual transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new offset.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width (never negative for well-formed rectangles).
    pub width: f64,
    /// Height (never negative for well-formed rectangles).
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin point and a size.
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, moved by `offset`.
    pub fn translated(&self, offset: Offset) -> Self {
        Self::new(
            self.left + offset.dx,
            self.top + offset.dy,
            self.width,
            self.height,
        )
    }

    /// Whether the vertical ranges intersect. Touching edges do not count.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top < other.bottom() && self.bottom() > other.top
    }

    /// Whether the horizontal ranges intersect. Touching edges do not count.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right() && self.right() > other.left
    }

    /// Whether both ranges intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_vertically(other) && self.overlaps_horizontally(other)
    }

    /// Whether `point` lies inside the rectangle (left/top inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// Scroll position and inner size of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal scroll offset.
    #[serde(default)]
    pub scroll_x: f64,
    /// Vertical scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
    /// Inner width.
    pub width: f64,
    /// Inner height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl Viewport {
    /// Create a viewport of the given size scrolled to the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Same size, scrolled to `(x, y)`.
    pub fn scrolled_to(self, x: f64, y: f64) -> Self {
        Self {
            scroll_x: x,
            scroll_y: y,
            ..self
        }
    }

    /// Scroll offset as a translation from viewport to document coordinates.
    pub fn scroll_offset(&self) -> Offset {
        Offset::new(self.scroll_x, self.scroll_y)
    }

    /// Horizontal bounds `[lo, hi]` for the left edge of a box of `width`.
    ///
    /// `hi` may be smaller than `lo` when the box is wider than the viewport.
    pub fn horizontal_bounds(&self, width: f64) -> (f64, f64) {
        (
            self.scroll_x + VIEWPORT_MARGIN,
            self.scroll_x + self.width - width - VIEWPORT_MARGIN,
        )
    }

    /// Clamp a left edge so a box of `width` stays inside the viewport.
    pub fn clamp_left(&self, left: f64, width: f64) -> f64 {
        let (lo, hi) = self.horizontal_bounds(width);
        clamp(left, lo, hi)
    }
}

/// `max(lo, min(hi, value))`.
///
/// Unlike [`f64::clamp`] this never panics: when `hi < lo` the lower bound wins.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(value))
}
