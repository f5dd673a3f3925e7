//! One-dimensional intervals used by the layout solver.
//!
//! - [`StackSegment`] - A real-valued interval in "stack space", the relative
//!   coordinate system in which boxes express where they want to be.
//! - [`GridSegment`] - An integer interval on the laid-out grid.
//!
//! Both are half-open in spirit: a segment covers `[min, max)`, and two
//! segments touch when one's `max` coincides with the other's `min`.

use serde::{Deserialize, Serialize};

/// A real-valued interval expressing a box's desired relative position along one axis.
///
/// # Examples
///
/// ```
/// # use tilegrid_core::segment::StackSegment;
/// let segment = StackSegment::new(0.25, 0.75);
/// assert!(segment.is_valid());
/// assert_eq!(segment.length(), 0.5);
///
/// assert!(!StackSegment::new(0.5, 0.5).is_valid());
/// assert!(!StackSegment::new(f64::NAN, 1.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    min: f64,
    max: f64,
}

impl StackSegment {
    /// Creates a new stack segment. No validation is performed.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the lower end of the segment
    pub fn min(self) -> f64 {
        self.min
    }

    /// Returns the upper end of the segment
    pub fn max(self) -> f64 {
        self.max
    }

    /// Returns `max - min`
    pub fn length(self) -> f64 {
        self.max - self.min
    }

    /// A segment is valid when both ends are finite numbers and `min < max`.
    ///
    /// Infinite ends are rejected together with NaN: the solver derives its
    /// merge tolerance from the overall span, which must be finite.
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Returns true if the list is non-empty and every segment in it is valid.
pub fn all_valid(segments: &[StackSegment]) -> bool {
    !segments.is_empty() && segments.iter().all(|segment| segment.is_valid())
}

/// An integer interval on the layout grid.
///
/// # Examples
///
/// ```
/// # use tilegrid_core::segment::GridSegment;
/// let segment = GridSegment::new(4, 16);
/// assert!(segment.is_valid());
/// assert_eq!(segment.length(), 12);
///
/// assert!(!GridSegment::new(-1, 4).is_valid());
/// assert!(!GridSegment::default().is_valid());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSegment {
    min: i32,
    max: i32,
}

impl GridSegment {
    /// Creates a new grid segment. No validation is performed.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Returns the lower end of the segment
    pub fn min(self) -> i32 {
        self.min
    }

    /// Returns the upper end of the segment
    pub fn max(self) -> i32 {
        self.max
    }

    /// Returns `max - min`, which is negative for inverted segments.
    pub fn length(self) -> i32 {
        self.max.saturating_sub(self.min)
    }

    /// A grid segment is valid when it starts at or after zero and is non-empty.
    pub fn is_valid(self) -> bool {
        self.min >= 0 && self.max > self.min
    }
}

impl std::fmt::Display for GridSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
