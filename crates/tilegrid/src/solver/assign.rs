//! Grid space allocation, coordinate assignment and segment projection.

use log::{trace, warn};

use tilegrid_core::segment::GridSegment;

use super::{graph::AdjacencyGraph, vertex::VertexSet};

/// Returns the grid space actually used for a requested one.
///
/// A request that is invalid or shorter than `minimal_span` is replaced by
/// `[anchor, anchor + minimal_span)`, anchored at the requested minimum
/// (never below zero). Otherwise the request is returned unchanged.
///
/// # Examples
///
/// ```
/// # use tilegrid::solver::assign::allocate_grid_space;
/// # use tilegrid_core::segment::GridSegment;
/// assert_eq!(allocate_grid_space(GridSegment::new(0, 24), 16), GridSegment::new(0, 24));
/// assert_eq!(allocate_grid_space(GridSegment::new(4, 20), 30), GridSegment::new(4, 34));
/// assert_eq!(allocate_grid_space(GridSegment::new(5, 5), 8), GridSegment::new(5, 13));
/// ```
pub fn allocate_grid_space(requested: GridSegment, minimal_span: i32) -> GridSegment {
    if !requested.is_valid() || requested.length() < minimal_span {
        let anchor = requested.min().max(0);
        GridSegment::new(anchor, anchor.saturating_add(minimal_span))
    } else {
        requested
    }
}

/// Per-call inputs shared by the coordinate assignment steps.
pub(crate) struct Assigner<'a> {
    pub vertices: &'a VertexSet,
    pub graph: &'a AdjacencyGraph,
    pub minimal_spacing: i32,
}

impl Assigner<'_> {
    /// Assigns grid coordinates to every vertex.
    ///
    /// The scaffold path is laid out over the whole grid space first. Every
    /// vertex still unassigned afterwards is positioned by laying out its
    /// bearing path between two already-assigned vertices.
    pub fn assign(&self, grid_space: GridSegment, scaffold: &[usize]) -> Vec<Option<i32>> {
        let mut coordinates = vec![None; self.vertices.len()];
        if scaffold.len() < 2 {
            return coordinates;
        }

        self.apply(&mut coordinates, grid_space, scaffold);

        for vertex in 0..coordinates.len() {
            if coordinates[vertex].is_some() {
                continue;
            }
            let bearing = self.bearing_path(vertex, &coordinates);
            if bearing.len() < 3 {
                continue;
            }
            let (Some(first), Some(last)) = (
                coordinates[bearing[0]],
                coordinates[bearing[bearing.len() - 1]],
            ) else {
                continue;
            };
            trace!(vertex, bearing:?; "Back-filling vertex along bearing path");
            self.apply(&mut coordinates, GridSegment::new(first, last), &bearing);
        }

        coordinates
    }

    fn apply(&self, coordinates: &mut [Option<i32>], space: GridSegment, path: &[usize]) {
        for (&vertex, coordinate) in path.iter().zip(self.path_coordinates(space, path)) {
            coordinates[vertex] = Some(coordinate);
        }
    }

    /// Lays out a single path over `space`.
    ///
    /// Constrained edges get the minimal spacing and free edges collapse to
    /// zero width. Whatever space is left is then shared among the edges in
    /// proportion to the stack length each one has beyond its minimal spacing.
    /// The last vertex is pinned to `space.max()`.
    pub fn path_coordinates(&self, space: GridSegment, path: &[usize]) -> Vec<i32> {
        let mut result = Vec::with_capacity(path.len());
        let mut running = space.min();
        result.push(running);
        for edge in path.windows(2) {
            if self.graph.weight(edge[0], edge[1]).score() > 0 {
                running = running.saturating_add(self.minimal_spacing);
            }
            result.push(running);
        }

        let weight = self.graph.path_weight(path).unwrap_or(0);
        let minimal_span = i32::try_from(weight)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.minimal_spacing);
        let remaining = space.length().saturating_sub(minimal_span);
        let space_length = f64::from(space.length());

        if remaining != 0 && space_length > 0.0 {
            let stack_span =
                self.vertices.coordinate(path[path.len() - 1]) - self.vertices.coordinate(path[0]);
            let remaining_stack = stack_span * (1.0 - f64::from(minimal_span) / space_length);
            if remaining_stack > f64::EPSILON {
                let spacing_stack = f64::from(self.minimal_spacing) / space_length * stack_span;
                let ratio = f64::from(remaining) / remaining_stack;

                for index in 1..path.len() {
                    let (from, to) = (path[index - 1], path[index]);
                    let mut leftover =
                        self.vertices.coordinate(to) - self.vertices.coordinate(from);
                    if self.graph.weight(from, to).score() > 0 {
                        leftover -= spacing_stack;
                    }
                    if leftover > f64::EPSILON {
                        let last = result[result.len() - 1];
                        let share = ((leftover * ratio).round() as i32)
                            .min(space.max().saturating_sub(last));
                        for coordinate in &mut result[index..] {
                            *coordinate = coordinate.saturating_add(share);
                        }
                    }
                }
            }
        }

        if let Some(last) = result.last_mut() {
            *last = space.max();
        }
        result
    }

    /// Finds the bearing path of an unassigned vertex.
    ///
    /// For every path through `vertex`, the candidate is the contiguous
    /// stretch reaching back to the nearest assigned vertex before it and
    /// forward to the nearest assigned vertex after it. The heaviest candidate
    /// wins, the first one on ties; candidates of zero weight are ignored.
    fn bearing_path(&self, vertex: usize, coordinates: &[Option<i32>]) -> Vec<usize> {
        let mut best = Vec::new();
        let mut best_weight = 0;

        for path in self.graph.paths() {
            let Some(position) = path.iter().position(|&v| v == vertex) else {
                continue;
            };
            let start = path[..position]
                .iter()
                .rposition(|&v| coordinates[v].is_some())
                .unwrap_or(0);
            let end = path[position + 1..]
                .iter()
                .position(|&v| coordinates[v].is_some())
                .map_or(path.len() - 1, |offset| position + 1 + offset);

            let candidate = &path[start..=end];
            let weight = self.graph.path_weight(candidate).unwrap_or(0);
            if weight > best_weight {
                best_weight = weight;
                best = candidate.to_vec();
            }
        }

        best
    }
}

/// Maps vertex coordinates back onto the segments, in input order.
///
/// A vertex left without a coordinate falls back to the grid space minimum.
pub(crate) fn project(
    vertices: &VertexSet,
    coordinates: &[Option<i32>],
    grid_space: GridSegment,
) -> Vec<GridSegment> {
    let coordinate = |vertex: usize| {
        coordinates.get(vertex).copied().flatten().unwrap_or_else(|| {
            warn!(vertex; "Vertex has no grid coordinate, using grid space minimum");
            grid_space.min()
        })
    };

    vertices
        .segment_pairs()
        .map(|(min, max)| GridSegment::new(coordinate(min), coordinate(max)))
        .collect()
}
