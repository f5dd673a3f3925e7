//! Rectangles in the three coordinate systems of a workspace.
//!
//! # Overview
//!
//! - [`StackRect`] - A box's desired relative placement, in stack space (`f64`)
//! - [`GridRect`] - A box's placement on the layout grid (`i32`, half-open)
//! - [`Point`] / [`Rect`] - Screen pixels (`i32`)
//!
//! # Coordinate System
//!
//! All three systems share the screen convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A stack rectangle is split into two independent [`StackSegment`]s, one
//! per axis, which the solver turns into two [`GridSegment`]s. The grid
//! rectangle is then assembled back from those segments.

use serde::Deserialize;

use crate::segment::{GridSegment, StackSegment};

/// A box's desired placement in stack space.
///
/// Deserializes from a `[left, top, right, bottom]` array.
///
/// # Examples
///
/// ```
/// # use tilegrid_core::geometry::StackRect;
/// let rect = StackRect::new(0.0, 0.0, 0.5, 1.0);
/// assert_eq!(rect.horizontal().max(), 0.5);
/// assert_eq!(rect.vertical().max(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct StackRect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl StackRect {
    /// Creates a stack rectangle from its four sides
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle every new box starts with: `(0, 0) - (1, 1)`
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn top(self) -> f64 {
        self.top
    }

    pub fn right(self) -> f64 {
        self.right
    }

    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the horizontal extent as a stack segment
    pub fn horizontal(self) -> StackSegment {
        StackSegment::new(self.left, self.right)
    }

    /// Returns the vertical extent as a stack segment
    pub fn vertical(self) -> StackSegment {
        StackSegment::new(self.top, self.bottom)
    }

    /// Returns the smallest rectangle containing both rectangles
    pub fn united(self, other: StackRect) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Maps a grid rectangle into the unit stack rectangle.
    ///
    /// `source` is the grid area that corresponds to the whole unit rectangle.
    /// Empty source axes are treated as one cell wide.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tilegrid_core::geometry::{GridRect, StackRect};
    /// let full = GridRect::new(0, 0, 40, 20);
    /// let rect = StackRect::map_from(GridRect::new(10, 0, 30, 10), full);
    /// assert_eq!(rect, StackRect::new(0.25, 0.0, 0.75, 0.5));
    /// ```
    pub fn map_from(grid: GridRect, source: GridRect) -> Self {
        let width = f64::from(source.width().max(1));
        let height = f64::from(source.height().max(1));
        Self {
            left: f64::from(grid.left - source.left) / width,
            top: f64::from(grid.top - source.top) / height,
            right: f64::from(grid.right - source.left) / width,
            bottom: f64::from(grid.bottom - source.top) / height,
        }
    }
}

impl From<[f64; 4]> for StackRect {
    fn from([left, top, right, bottom]: [f64; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

/// A box's placement on the layout grid.
///
/// Sides are half-open: the rectangle covers columns `left..right` and rows
/// `top..bottom`, so `width = right - left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl GridRect {
    /// Creates a grid rectangle from its four sides
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Assembles a rectangle from one horizontal and one vertical grid segment
    pub fn from_segments(horizontal: GridSegment, vertical: GridSegment) -> Self {
        Self::new(
            horizontal.min(),
            vertical.min(),
            horizontal.max(),
            vertical.max(),
        )
    }

    pub fn left(self) -> i32 {
        self.left
    }

    pub fn top(self) -> i32 {
        self.top
    }

    pub fn right(self) -> i32 {
        self.right
    }

    pub fn bottom(self) -> i32 {
        self.bottom
    }

    pub fn width(self) -> i32 {
        self.right - self.left
    }

    pub fn height(self) -> i32 {
        self.bottom - self.top
    }

    pub fn horizontal(self) -> GridSegment {
        GridSegment::new(self.left, self.right)
    }

    pub fn vertical(self) -> GridSegment {
        GridSegment::new(self.top, self.bottom)
    }

    /// Returns a copy with the top side moved, keeping the bottom side
    pub fn with_top(mut self, top: i32) -> Self {
        self.top = top;
        self
    }

    /// Returns a copy with the bottom side moved, keeping the top side
    pub fn with_bottom(mut self, bottom: i32) -> Self {
        self.bottom = bottom;
        self
    }

    /// Returns a copy with the left side moved, keeping the right side
    pub fn with_left(mut self, left: i32) -> Self {
        self.left = left;
        self
    }

    /// Returns a copy with the right side moved, keeping the left side
    pub fn with_right(mut self, right: i32) -> Self {
        self.right = right;
        self
    }

    /// Moves the rectangle so its top-left corner lands on `(left, top)`, keeping its size
    pub fn translated_to(self, left: i32, top: i32) -> Self {
        Self::new(left, top, left + self.width(), top + self.height())
    }

    /// Returns the smallest rectangle containing both rectangles
    pub fn united(self, other: GridRect) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

impl std::fmt::Display for GridRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// A point in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[i32; 2]")]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// A rectangle in screen pixels, covering `x..x + width` and `y..y + height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from two opposite corners
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }

    /// The exclusive right edge
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    /// The exclusive bottom edge
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn top_left(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(self) -> Point {
        Point::new(self.right(), self.y)
    }

    pub fn bottom_left(self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn bottom_right(self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Checks whether the point lies inside the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tilegrid_core::geometry::{Point, Rect};
    /// let rect = Rect::new(10, 10, 20, 20);
    /// assert!(rect.contains(Point::new(10, 29)));
    /// assert!(!rect.contains(Point::new(30, 10)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns the rectangle shrunk by the given amount on each side
    pub fn inset(self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            self.width - left - right,
            self.height - top - bottom,
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn grid_rect_strategy() -> impl Strategy<Value = GridRect> {
        (0i32..200, 0i32..200, 1i32..100, 1i32..100)
            .prop_map(|(x, y, w, h)| GridRect::new(x, y, x + w, y + h))
    }

    /// Mapping the source area itself yields the unit rectangle.
    fn check_map_source_is_unit(source: GridRect) -> Result<(), TestCaseError> {
        let unit = StackRect::map_from(source, source);
        prop_assert!(approx_eq!(f64, unit.left(), 0.0));
        prop_assert!(approx_eq!(f64, unit.top(), 0.0));
        prop_assert!(approx_eq!(f64, unit.right(), 1.0));
        prop_assert!(approx_eq!(f64, unit.bottom(), 1.0));
        Ok(())
    }

    /// A rectangle inside the source maps inside the unit rectangle.
    fn check_map_stays_in_unit(a: GridRect, b: GridRect) -> Result<(), TestCaseError> {
        let source = a.united(b);
        let mapped = StackRect::map_from(a, source);
        prop_assert!(mapped.left() >= 0.0 && mapped.right() <= 1.0);
        prop_assert!(mapped.top() >= 0.0 && mapped.bottom() <= 1.0);
        prop_assert!(mapped.left() < mapped.right());
        prop_assert!(mapped.top() < mapped.bottom());
        Ok(())
    }

    /// Union is commutative.
    fn check_united_commutative(a: GridRect, b: GridRect) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.united(b), b.united(a));
        Ok(())
    }

    proptest! {
        #[test]
        fn map_source_is_unit(source in grid_rect_strategy()) {
            check_map_source_is_unit(source)?;
        }

        #[test]
        fn map_stays_in_unit(a in grid_rect_strategy(), b in grid_rect_strategy()) {
            check_map_stays_in_unit(a, b)?;
        }

        #[test]
        fn united_commutative(a in grid_rect_strategy(), b in grid_rect_strategy()) {
            check_united_commutative(a, b)?;
        }
    }
}
