//! The box workspace: boxes kept in three coordinate systems at once.
//!
//! Every box has a stack rectangle (its relative placement), a grid
//! rectangle (the solved placement in grid cells) and a screen rectangle
//! plus an inset geometry (pixels). Edits flow in two directions:
//!
//! - Container resizes and box insertion go *stack → grid → screen*: the
//!   stack rectangles are solved onto the grid, one axis at a time.
//! - Pointer edits (move, resize, edge drags) go *grid → stack*: the edited
//!   grid rectangles are mapped back into stack space so the next container
//!   resize keeps the user's proportions, then the screen rectangles follow.
//!
//! Boxes are kept in stacking order; the last box is the topmost one.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, trace};

use tilegrid_core::{
    bound::{RectBound, find_joint_bound, find_rect_bound},
    geometry::{GridRect, Point, Rect, StackRect},
    scale::GridScale,
    segment::{GridSegment, StackSegment},
};

use crate::{
    TilegridError,
    config::LayoutConfig,
    solver::{AxisLayout, Scaffold},
};

/// Identifier of a box within a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(u32);

impl BoxId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single document box.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBox {
    title: String,
    stack_rect: StackRect,
    grid_rect: GridRect,
    screen_rect: Rect,
    geometry: Rect,
    wide: bool,
}

impl DocumentBox {
    fn new(stack_rect: StackRect) -> Self {
        Self {
            title: String::new(),
            stack_rect,
            grid_rect: GridRect::default(),
            screen_rect: Rect::default(),
            geometry: Rect::default(),
            wide: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Relative placement in the unit stack rectangle
    pub fn stack_rect(&self) -> StackRect {
        self.stack_rect
    }

    /// Solved placement in grid cells
    pub fn grid_rect(&self) -> GridRect {
        self.grid_rect
    }

    /// Pixel rectangle of the grid cells the box covers
    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    /// Visible pixel rectangle: the screen rectangle minus the box spacing,
    /// or the whole container in wide mode.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn is_wide(&self) -> bool {
        self.wide
    }
}

/// One axis of the workspace: its screen scale and its solver state.
#[derive(Debug, Clone)]
pub struct Axis {
    scale: GridScale,
    requested: GridSegment,
    scaffold: Scaffold,
    layout: AxisLayout,
}

impl Axis {
    fn new(grid_size: i32) -> Self {
        Self {
            scale: GridScale::new(grid_size, 0),
            requested: GridSegment::default(),
            scaffold: Scaffold::default(),
            layout: AxisLayout::default(),
        }
    }

    pub fn scale(&self) -> &GridScale {
        &self.scale
    }

    /// Grid space last requested from the solver
    pub fn requested(&self) -> GridSegment {
        self.requested
    }

    pub fn scaffold(&self) -> &Scaffold {
        &self.scaffold
    }

    pub fn layout(&self) -> &AxisLayout {
        &self.layout
    }

    fn resolve(&mut self, segments: &[StackSegment], minimal_spacing: i32, tolerance: f64) {
        self.scaffold = Scaffold::build(segments, minimal_spacing, tolerance);
        self.layout = self.scaffold.layout(self.requested);
    }

    fn relayout(&mut self, requested: GridSegment) {
        self.requested = requested;
        self.layout = self.scaffold.layout(requested);
    }

    fn grid_segment(&self, index: usize) -> GridSegment {
        self.layout
            .grid_segments()
            .get(index)
            .copied()
            .unwrap_or_default()
    }
}

/// A pointer drag in progress, created by [`Workspace::begin_drag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drag {
    /// Moving a box by its title strip; `offset` is the grab point relative
    /// to the box geometry.
    Move { id: BoxId, offset: Point },
    /// Resizing a single box from inside its geometry.
    Resize { id: BoxId, bound: RectBound },
    /// Dragging the shared edges of one or more boxes from the gap between
    /// them. `primary` is the bound found on the topmost box.
    Edges {
        primary: RectBound,
        members: Vec<(BoxId, RectBound)>,
    },
}

/// Inclusive range of grid points an edge may be dragged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridRange {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl GridRange {
    fn intersected(self, other: GridRange) -> Self {
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    fn clamp(self, point: Point) -> Point {
        Point::new(
            bounded(self.min_x, point.x(), self.max_x),
            bounded(self.min_y, point.y(), self.max_y),
        )
    }
}

/// Clamps `value` into `[min, max]`; `min` wins when the range is empty.
fn bounded(min: i32, value: i32, max: i32) -> i32 {
    min.max(value.min(max))
}

/// Target grid interval of the occupied stack interval `[stack_min, stack_max]`.
///
/// When the proportional interval is at least `minimal` cells long it is used
/// as is. Otherwise a `minimal` long interval is centred and then shifted in
/// proportion to the free stack margins on either side.
fn occupied_target(stack_min: f64, stack_max: f64, minimal: f64, actual: f64) -> (f64, f64) {
    let supposed = (stack_max - stack_min) * actual;
    if supposed >= minimal {
        return (stack_min * actual, stack_max * actual);
    }

    let first = (actual - minimal) / 2.0;
    let second = (actual + minimal) / 2.0;
    let margins = stack_min + 1.0 - stack_max;
    let offset = if actual > minimal && margins > 0.0 {
        stack_min / margins * (actual - minimal) - first
    } else {
        0.0
    };
    (first + offset, second + offset)
}

/// Boxes laid out on a grid over a pixel container.
#[derive(Debug, Clone)]
pub struct Workspace {
    config: LayoutConfig,
    boxes: IndexMap<BoxId, DocumentBox>,
    next_id: u32,
    horizontal: Axis,
    vertical: Axis,
    drag: Option<Drag>,
}

impl Workspace {
    /// Creates an empty workspace with an empty container.
    pub fn new(config: LayoutConfig) -> Self {
        let grid_size = config.grid_size();
        Self {
            config,
            boxes: IndexMap::new(),
            next_id: 0,
            horizontal: Axis::new(grid_size),
            vertical: Axis::new(grid_size),
            drag: None,
        }
    }

    /// Sets the initial container size in pixels.
    pub fn with_container(mut self, width: i32, height: i32) -> Self {
        self.resize_container(width, height);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Container size in pixels
    pub fn container_size(&self) -> (i32, i32) {
        (
            self.horizontal.scale.screen_size(),
            self.vertical.scale.screen_size(),
        )
    }

    /// Iterates over the boxes from bottom to top
    pub fn boxes(&self) -> impl Iterator<Item = (BoxId, &DocumentBox)> {
        self.boxes.iter().map(|(id, document_box)| (*id, document_box))
    }

    pub fn get(&self, id: BoxId) -> Option<&DocumentBox> {
        self.boxes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn horizontal(&self) -> &Axis {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Axis {
        &self.vertical
    }

    /// The drag in progress, if any
    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Smallest container size, in pixels, that fits every box at its
    /// minimal size.
    pub fn minimum_size(&self) -> (i32, i32) {
        let grid_size = self.config.grid_size();
        (
            self.horizontal.scaffold.minimal_span().saturating_mul(grid_size),
            self.vertical.scaffold.minimal_span().saturating_mul(grid_size),
        )
    }

    /// Maps a screen point onto the nearest grid point.
    pub fn screen_to_grid(&self, point: Point) -> Point {
        Point::new(
            self.horizontal.scale.screen_to_grid(point.x()),
            self.vertical.scale.screen_to_grid(point.y()),
        )
    }

    /// Maps a grid point onto the screen.
    pub fn grid_to_screen(&self, point: Point) -> Point {
        Point::new(
            self.horizontal.scale.grid_to_screen(point.x()),
            self.vertical.scale.grid_to_screen(point.y()),
        )
    }

    /// Adds a box covering the whole unit stack rectangle.
    pub fn add_box(&mut self) -> BoxId {
        self.insert_box(StackRect::unit())
    }

    /// Adds a box at the given stack placement, on top of every other box.
    pub fn insert_box(&mut self, stack_rect: StackRect) -> BoxId {
        let id = BoxId(self.next_id);
        self.next_id += 1;
        self.boxes.insert(id, DocumentBox::new(stack_rect));
        info!(id:?, stack_rect:?; "Box added");

        self.resolve();
        self.build_grid_from_stack();
        self.build_screen_from_grid();
        id
    }

    /// Sets the title shown in the box header.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn set_title(&mut self, id: BoxId, title: impl Into<String>) -> Result<(), TilegridError> {
        self.box_mut(id)?.title = title.into();
        Ok(())
    }

    /// Removes a box and lays the remaining boxes out again.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn close_box(&mut self, id: BoxId) -> Result<(), TilegridError> {
        self.boxes
            .shift_remove(&id)
            .ok_or(TilegridError::UnknownBox(id))?;
        info!(id:?; "Box closed");

        self.drag = None;
        self.resolve();
        self.build_grid_from_stack();
        self.build_screen_from_grid();
        Ok(())
    }

    /// Resizes the container to `width` x `height` pixels.
    pub fn resize_container(&mut self, width: i32, height: i32) {
        self.horizontal.scale.set_screen_size(width);
        self.vertical.scale.set_screen_size(height);
        debug!(
            width,
            height,
            columns = self.horizontal.scale.grid_count(),
            rows = self.vertical.scale.grid_count();
            "Container resized"
        );

        self.build_grid_from_stack();
        self.build_screen_from_grid();
    }

    /// Moves a box so that its top-left corner lands on the grid point
    /// nearest to `point`, keeping the box inside the grid.
    ///
    /// Returns whether the box moved.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn move_box(&mut self, id: BoxId, point: Point) -> Result<bool, TilegridError> {
        let target = self.screen_to_grid(point);
        let columns = self.horizontal.scale.grid_count();
        let rows = self.vertical.scale.grid_count();

        let document_box = self.box_mut(id)?;
        let current = document_box.grid_rect;
        let moved = current.translated_to(
            bounded(0, target.x(), columns - current.width()),
            bounded(0, target.y(), rows - current.height()),
        );
        if moved == current {
            return Ok(false);
        }

        document_box.grid_rect = moved;
        trace!(id:?, grid_rect:? = moved; "Box moved");
        self.grid_edited();
        Ok(true)
    }

    /// Drags the edges of a box named by `bound` to the grid point nearest
    /// to `point`, keeping the box at least its minimal size.
    ///
    /// Returns whether the box changed. The title bound never resizes.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn resize_box(
        &mut self,
        id: BoxId,
        bound: RectBound,
        point: Point,
    ) -> Result<bool, TilegridError> {
        let target = self.screen_to_grid(point);
        let current = self
            .boxes
            .get(&id)
            .ok_or(TilegridError::UnknownBox(id))?
            .grid_rect;

        let resized = self.resized_rect(current, bound, target);
        if resized == current {
            return Ok(false);
        }

        self.box_mut(id)?.grid_rect = resized;
        trace!(id:?, bound:?, grid_rect:? = resized; "Box resized");
        self.grid_edited();
        Ok(true)
    }

    /// Flips wide mode of a box and raises it. Returns the new mode.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn toggle_wide_mode(&mut self, id: BoxId) -> Result<bool, TilegridError> {
        let document_box = self.box_mut(id)?;
        document_box.wide = !document_box.wide;
        let wide = document_box.wide;
        info!(id:?, wide; "Wide mode toggled");

        self.raise(id)?;
        self.build_screen_from_grid();
        Ok(wide)
    }

    /// Puts a box on top of every other box.
    ///
    /// # Errors
    ///
    /// Returns [`TilegridError::UnknownBox`] if the box does not exist.
    pub fn raise(&mut self, id: BoxId) -> Result<(), TilegridError> {
        let document_box = self
            .boxes
            .shift_remove(&id)
            .ok_or(TilegridError::UnknownBox(id))?;
        self.boxes.insert(id, document_box);
        // Solver output follows box order
        self.resolve();
        Ok(())
    }

    /// Finds the topmost box with an edge or corner zone under `point`.
    pub fn bound_at(&self, point: Point) -> Option<(BoxId, RectBound)> {
        self.boxes.iter().rev().find_map(|(id, document_box)| {
            self.joint_bound(document_box, point).map(|bound| (*id, bound))
        })
    }

    /// Starts a drag at `point`.
    ///
    /// Inside a box geometry the box itself handles the pointer: its title
    /// strip starts a move, its edges a resize, and the box is raised. Wide
    /// boxes ignore the pointer. Anywhere else every box edge under the point
    /// joins one edge drag, as long as its bound differs from the topmost
    /// box's.
    pub fn begin_drag(&mut self, point: Point) -> Option<&Drag> {
        self.drag = None;

        let hit = self
            .boxes
            .iter()
            .rev()
            .find(|(_, document_box)| document_box.geometry.contains(point))
            .map(|(id, document_box)| (*id, document_box.geometry, document_box.wide));

        if let Some((id, geometry, wide)) = hit {
            if wide {
                return None;
            }
            let bound = find_rect_bound(
                geometry,
                self.config.border_size(),
                self.config.corner_size(),
                self.config.title_size(),
                point,
            );
            self.raise(id).ok()?;
            self.drag = match bound {
                Some(RectBound::Title) => Some(Drag::Move {
                    id,
                    offset: Point::new(point.x() - geometry.x(), point.y() - geometry.y()),
                }),
                Some(bound) => Some(Drag::Resize { id, bound }),
                None => None,
            };
        } else {
            let mut primary = None;
            let mut members = Vec::new();
            for (id, document_box) in self.boxes.iter().rev() {
                let Some(bound) = self.joint_bound(document_box, point) else {
                    continue;
                };
                match primary {
                    None => {
                        primary = Some(bound);
                        members.push((*id, bound));
                    }
                    Some(first) if first != bound => members.push((*id, bound)),
                    Some(_) => {}
                }
            }
            self.drag = primary.map(|primary| Drag::Edges { primary, members });
        }

        debug!(drag:? = self.drag; "Drag started");
        self.drag.as_ref()
    }

    /// Continues the drag in progress to `point`. Returns whether any box
    /// changed.
    pub fn drag_to(&mut self, point: Point) -> bool {
        let Some(drag) = self.drag.clone() else {
            return false;
        };

        match drag {
            Drag::Move { id, offset } => {
                let target = Point::new(point.x() - offset.x(), point.y() - offset.y());
                matches!(self.move_box(id, target), Ok(true))
            }
            Drag::Resize { id, bound } => matches!(self.resize_box(id, bound, point), Ok(true)),
            Drag::Edges { members, .. } => self.drag_edges(&members, point),
        }
    }

    /// Ends the drag in progress and returns it.
    pub fn end_drag(&mut self) -> Option<Drag> {
        self.drag.take()
    }

    fn drag_edges(&mut self, members: &[(BoxId, RectBound)], point: Point) -> bool {
        let target = self.screen_to_grid(point);
        let range = members
            .iter()
            .filter_map(|(id, bound)| {
                let document_box = self.boxes.get(id)?;
                Some(self.resize_range(document_box.grid_rect, *bound))
            })
            .fold(self.full_range(), GridRange::intersected);
        let target = range.clamp(target);

        let mut changed = false;
        for (id, bound) in members {
            let Some(current) = self.boxes.get(id).map(|document_box| document_box.grid_rect)
            else {
                continue;
            };
            let resized = self.resized_rect(current, *bound, target);
            if resized == current {
                continue;
            }
            if let Some(document_box) = self.boxes.get_mut(id) {
                document_box.grid_rect = resized;
                changed = true;
            }
        }

        if changed {
            trace!(target:?; "Edges dragged");
            self.grid_edited();
        }
        changed
    }

    fn box_mut(&mut self, id: BoxId) -> Result<&mut DocumentBox, TilegridError> {
        self.boxes
            .get_mut(&id)
            .ok_or(TilegridError::UnknownBox(id))
    }

    fn joint_bound(&self, document_box: &DocumentBox, point: Point) -> Option<RectBound> {
        find_joint_bound(
            document_box.screen_rect,
            self.config.border_size(),
            self.config.corner_size(),
            point,
        )
    }

    fn full_range(&self) -> GridRange {
        GridRange {
            min_x: 0,
            min_y: 0,
            max_x: self.horizontal.scale.grid_count(),
            max_y: self.vertical.scale.grid_count(),
        }
    }

    /// Grid points the edges named by `bound` may move to, keeping the
    /// opposite edges at least one minimal box size away.
    fn resize_range(&self, grid_rect: GridRect, bound: RectBound) -> GridRange {
        let min_width = self.config.min_box_grid_width();
        let min_height = self.config.min_box_grid_height();
        let mut range = self.full_range();

        if bound.touches_top() {
            range.max_y = grid_rect.bottom() - min_height;
        }
        if bound.touches_bottom() {
            range.min_y = grid_rect.top() + min_height;
        }
        if bound.touches_left() {
            range.max_x = grid_rect.right() - min_width;
        }
        if bound.touches_right() {
            range.min_x = grid_rect.left() + min_width;
        }
        range
    }

    fn resized_rect(&self, grid_rect: GridRect, bound: RectBound, target: Point) -> GridRect {
        let target = self.resize_range(grid_rect, bound).clamp(target);
        let mut result = grid_rect;
        if bound.touches_top() {
            result = result.with_top(target.y());
        }
        if bound.touches_bottom() {
            result = result.with_bottom(target.y());
        }
        if bound.touches_left() {
            result = result.with_left(target.x());
        }
        if bound.touches_right() {
            result = result.with_right(target.x());
        }
        result
    }

    /// Rebuilds the solver state of both axes from the stack rectangles.
    fn resolve(&mut self) {
        let (horizontal, vertical): (Vec<_>, Vec<_>) = self
            .boxes
            .values()
            .map(|document_box| {
                (
                    document_box.stack_rect.horizontal(),
                    document_box.stack_rect.vertical(),
                )
            })
            .unzip();

        let tolerance = self.config.merge_tolerance();
        self.horizontal
            .resolve(&horizontal, self.config.min_box_grid_width(), tolerance);
        self.vertical
            .resolve(&vertical, self.config.min_box_grid_height(), tolerance);

        debug!(
            boxes = self.boxes.len(),
            minimal_columns = self.horizontal.scaffold.minimal_span(),
            minimal_rows = self.vertical.scaffold.minimal_span();
            "Stack coordinates solved"
        );
    }

    /// Applies a pointer edit of the grid rectangles.
    fn grid_edited(&mut self) {
        self.build_stack_from_grid();
        self.build_screen_from_grid();
    }

    fn build_grid_from_stack(&mut self) {
        let Some(occupied) = self
            .boxes
            .values()
            .map(|document_box| document_box.stack_rect)
            .reduce(StackRect::united)
        else {
            return;
        };

        let (first, second) = occupied_target(
            occupied.left(),
            occupied.right(),
            f64::from(self.horizontal.scaffold.minimal_span()),
            f64::from(self.horizontal.scale.grid_count()),
        );
        self.horizontal
            .relayout(GridSegment::new(first.round() as i32, second.round() as i32));

        let (first, second) = occupied_target(
            occupied.top(),
            occupied.bottom(),
            f64::from(self.vertical.scaffold.minimal_span()),
            f64::from(self.vertical.scale.grid_count()),
        );
        self.vertical
            .relayout(GridSegment::new(first.round() as i32, second.round() as i32));

        for (index, document_box) in self.boxes.values_mut().enumerate() {
            document_box.grid_rect = GridRect::from_segments(
                self.horizontal.grid_segment(index),
                self.vertical.grid_segment(index),
            );
        }

        debug!(
            horizontal:? = self.horizontal.layout.grid_space(),
            vertical:? = self.vertical.layout.grid_space();
            "Grid built from stack"
        );
    }

    fn build_stack_from_grid(&mut self) {
        let full = self
            .boxes
            .values()
            .map(|document_box| document_box.grid_rect)
            .fold(
                GridRect::new(
                    0,
                    0,
                    self.horizontal.scale.grid_count(),
                    self.vertical.scale.grid_count(),
                ),
                GridRect::united,
            );

        for document_box in self.boxes.values_mut() {
            document_box.stack_rect = StackRect::map_from(document_box.grid_rect, full);
        }
        self.resolve();
    }

    fn build_screen_from_grid(&mut self) {
        let full_spacing = self.config.box_spacing();
        let half_spacing = full_spacing / 2;
        let (width, height) = self.container_size();
        let columns = self.horizontal.scale.grid_count();
        let rows = self.vertical.scale.grid_count();

        for document_box in self.boxes.values_mut() {
            let grid = document_box.grid_rect;
            let top_left = Point::new(
                self.horizontal.scale.grid_to_screen(grid.left()),
                self.vertical.scale.grid_to_screen(grid.top()),
            );
            let bottom_right = Point::new(
                self.horizontal.scale.grid_to_screen(grid.right()),
                self.vertical.scale.grid_to_screen(grid.bottom()),
            );
            let screen_rect = Rect::from_corners(top_left, bottom_right);
            let spacing = |at_edge: bool| if at_edge { full_spacing } else { half_spacing };

            document_box.screen_rect = screen_rect;
            document_box.geometry = if document_box.wide {
                Rect::new(0, 0, width, height)
            } else {
                screen_rect.inset(
                    spacing(grid.left() <= 0),
                    spacing(grid.top() <= 0),
                    spacing(grid.right() >= columns),
                    spacing(grid.bottom() >= rows),
                )
            };
        }
    }
}
