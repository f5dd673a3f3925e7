//! Hit-testing of box edges, corners and title strips.
//!
//! Two flavours exist:
//!
//! - [`find_rect_bound`] looks at zones *inside* a single box, as seen by the
//!   box itself (edges, corners, then the title strip used for moving).
//! - [`find_joint_bound`] looks at zones *straddling* the box outline, as seen
//!   by the workspace between boxes. Neighbouring boxes share these zones,
//!   which is what allows dragging a common edge of several boxes at once.

use serde::Deserialize;

use crate::geometry::{Point, Rect};

/// The part of a box outline under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectBound {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// The title strip, which moves the box instead of resizing it.
    Title,
}

impl RectBound {
    /// Whether dragging this bound moves the top edge
    pub fn touches_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Whether dragging this bound moves the bottom edge
    pub fn touches_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// Whether dragging this bound moves the left edge
    pub fn touches_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// Whether dragging this bound moves the right edge
    pub fn touches_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    /// Whether this bound resizes the box (every bound except the title)
    pub fn is_resize(self) -> bool {
        self != Self::Title
    }
}

impl std::fmt::Display for RectBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
            Self::Title => "title",
        };
        write!(f, "{name}")
    }
}

/// Finds the bound under `point` among zones inside `rect`.
///
/// Corners are L-shaped zones of `corner_size` length and `border_size`
/// thickness; edges are `border_size` strips; the title strip spans the top
/// `title_size` pixels and is checked last.
pub fn find_rect_bound(
    rect: Rect,
    border_size: i32,
    corner_size: i32,
    title_size: i32,
    point: Point,
) -> Option<RectBound> {
    let (left, top, right, bottom) = (rect.x(), rect.y(), rect.right(), rect.bottom());
    let in_corner = |x_long: i32, y_long: i32, x_short: i32, y_short: i32| {
        Rect::new(x_long, y_long, corner_size, border_size).contains(point)
            || Rect::new(x_short, y_short, border_size, corner_size).contains(point)
    };

    if in_corner(left, top, left, top) {
        return Some(RectBound::TopLeft);
    }
    if in_corner(right - corner_size, top, right - border_size, top) {
        return Some(RectBound::TopRight);
    }
    if in_corner(
        right - corner_size,
        bottom - border_size,
        right - border_size,
        bottom - corner_size,
    ) {
        return Some(RectBound::BottomRight);
    }
    if in_corner(left, bottom - border_size, left, bottom - corner_size) {
        return Some(RectBound::BottomLeft);
    }

    let zones = [
        (Rect::new(left, top, rect.width(), border_size), RectBound::Top),
        (Rect::new(right - border_size, top, border_size, rect.height()), RectBound::Right),
        (Rect::new(left, bottom - border_size, rect.width(), border_size), RectBound::Bottom),
        (Rect::new(left, top, border_size, rect.height()), RectBound::Left),
        (Rect::new(left, top, rect.width(), title_size), RectBound::Title),
    ];
    zones
        .into_iter()
        .find(|(zone, _)| zone.contains(point))
        .map(|(_, bound)| bound)
}

/// Checks whether `point` lies in the cross-shaped zone centred on `corner`.
pub fn is_point_on_joint_corner(
    corner: Point,
    border_size: i32,
    corner_size: i32,
    point: Point,
) -> bool {
    let horizontal = Rect::new(
        corner.x() - corner_size,
        corner.y() - border_size,
        corner_size * 2,
        border_size * 2,
    );
    let vertical = Rect::new(
        corner.x() - border_size,
        corner.y() - corner_size,
        border_size * 2,
        corner_size * 2,
    );
    horizontal.contains(point) || vertical.contains(point)
}

/// Finds the bound under `point` among zones straddling the outline of `rect`.
///
/// # Examples
///
/// ```
/// # use tilegrid_core::{bound::{find_joint_bound, RectBound}, geometry::{Point, Rect}};
/// let rect = Rect::new(100, 100, 200, 100);
/// assert_eq!(find_joint_bound(rect, 8, 12, Point::new(95, 95)), Some(RectBound::TopLeft));
/// assert_eq!(find_joint_bound(rect, 8, 12, Point::new(305, 150)), Some(RectBound::Right));
/// assert_eq!(find_joint_bound(rect, 8, 12, Point::new(200, 150)), None);
/// ```
pub fn find_joint_bound(
    rect: Rect,
    border_size: i32,
    corner_size: i32,
    point: Point,
) -> Option<RectBound> {
    let corners = [
        (rect.top_left(), RectBound::TopLeft),
        (rect.top_right(), RectBound::TopRight),
        (rect.bottom_right(), RectBound::BottomRight),
        (rect.bottom_left(), RectBound::BottomLeft),
    ];
    if let Some((_, bound)) = corners
        .into_iter()
        .find(|(corner, _)| is_point_on_joint_corner(*corner, border_size, corner_size, point))
    {
        return Some(bound);
    }

    let (left, top, right, bottom) = (rect.x(), rect.y(), rect.right(), rect.bottom());
    let edges = [
        (Rect::new(left, top - border_size, rect.width(), border_size * 2), RectBound::Top),
        (Rect::new(right - border_size, top, border_size * 2, rect.height()), RectBound::Right),
        (Rect::new(left, bottom - border_size, rect.width(), border_size * 2), RectBound::Bottom),
        (Rect::new(left - border_size, top, border_size * 2, rect.height()), RectBound::Left),
    ];
    edges
        .into_iter()
        .find(|(zone, _)| zone.contains(point))
        .map(|(_, bound)| bound)
}
