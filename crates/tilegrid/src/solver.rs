//! Adaptive stack-to-grid coordinate solver.
//!
//! The solver turns real-valued stack segments (one per box, along one axis)
//! into integer grid segments. Segments that touch keep at least one minimal
//! spacing between their shared boundary and the next one, and whatever grid
//! space is left is shared proportionally to the stack lengths.
//!
//! The pipeline runs in two stages:
//!
//! 1. [`Scaffold::build`] reduces the segment endpoints to vertices, builds the
//!    adjacency graph and selects the scaffold path. It depends only on the
//!    segments, so it is what callers keep around to query the minimal span.
//! 2. [`Scaffold::layout`] allocates the grid space for a requested span,
//!    assigns vertex coordinates and projects them back onto the segments.
//!
//! [`solve`] runs both stages in one call. Each axis is an independent
//! problem; a two dimensional layout simply solves twice.
//!
//! # Examples
//!
//! ```
//! # use tilegrid::solver;
//! # use tilegrid_core::segment::{GridSegment, StackSegment};
//! let segments = [StackSegment::new(0.0, 0.5), StackSegment::new(0.5, 1.0)];
//! let layout = solver::solve(&segments, 8, GridSegment::new(0, 24));
//!
//! assert_eq!(layout.minimal_span(), 16);
//! assert_eq!(
//!     layout.grid_segments(),
//!     &[GridSegment::new(0, 12), GridSegment::new(12, 24)]
//! );
//! ```

pub mod assign;
pub mod graph;
pub mod path;
pub mod vertex;

use std::fmt;

use log::{debug, warn};

use tilegrid_core::segment::{self, GridSegment, StackSegment};

use assign::Assigner;
use graph::{AdjacencyGraph, EdgeWeight};
use vertex::{DEFAULT_MERGE_TOLERANCE, VertexSet};

/// Segment-dependent part of the solver: vertices, graph and scaffold path.
#[derive(Debug, Clone, Default)]
pub struct Scaffold {
    segments: Vec<StackSegment>,
    minimal_spacing: i32,
    vertices: VertexSet,
    graph: AdjacencyGraph,
    path: Vec<usize>,
    weight: u32,
    degenerate: bool,
}

impl Scaffold {
    /// Builds the scaffold for a list of stack segments.
    ///
    /// A `minimal_spacing` below one is raised to one. An empty list, or a
    /// list holding any invalid segment, produces a degenerate scaffold with
    /// no vertices and a zero minimal span.
    pub fn build(
        segments: &[StackSegment],
        minimal_spacing: i32,
        relative_tolerance: f64,
    ) -> Self {
        let minimal_spacing = minimal_spacing.max(1);

        if !segment::all_valid(segments) {
            if !segments.is_empty() {
                warn!(segments = segments.len(); "Invalid stack segment, skipping layout");
            }
            return Self {
                segments: segments.to_vec(),
                minimal_spacing,
                degenerate: true,
                ..Self::default()
            };
        }

        let vertices = VertexSet::reduce(segments, relative_tolerance);
        let graph = AdjacencyGraph::build(&vertices);
        let (path, weight) = path::select_scaffold(&graph);

        debug!(
            segments = segments.len(),
            vertices = vertices.len(),
            weight,
            minimal_spacing;
            "Scaffold selected"
        );

        Self {
            segments: segments.to_vec(),
            minimal_spacing,
            vertices,
            graph,
            path,
            weight,
            degenerate: false,
        }
    }

    /// Stack segments the scaffold was built from
    pub fn segments(&self) -> &[StackSegment] {
        &self.segments
    }

    /// Minimal spacing actually used, at least one
    pub fn minimal_spacing(&self) -> i32 {
        self.minimal_spacing
    }

    /// Smallest grid span that satisfies every constrained edge on the
    /// scaffold path: `weight * minimal_spacing`, saturating at `i32::MAX`.
    pub fn minimal_span(&self) -> i32 {
        i32::try_from(self.weight)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.minimal_spacing)
    }

    /// Number of constrained edges on the scaffold path
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// The scaffold path, as vertex indices
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Returns true when the input was empty or held an invalid segment
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Lays the segments out over a requested grid span.
    ///
    /// The requested span is enlarged when it is invalid or shorter than
    /// [`Self::minimal_span`].
    pub fn layout(&self, requested: GridSegment) -> AxisLayout {
        let minimal_span = self.minimal_span();
        let grid_space = assign::allocate_grid_space(requested, minimal_span);

        if self.degenerate {
            return AxisLayout {
                grid_segments: Vec::new(),
                minimal_span,
                grid_space,
                vertex_coordinates: Vec::new(),
            };
        }

        let assigner = Assigner {
            vertices: &self.vertices,
            graph: &self.graph,
            minimal_spacing: self.minimal_spacing,
        };
        let vertex_coordinates = assigner.assign(grid_space, &self.path);
        let grid_segments = assign::project(&self.vertices, &vertex_coordinates, grid_space);

        debug!(
            requested:? = requested,
            grid_space:? = grid_space,
            minimal_span;
            "Axis laid out"
        );

        AxisLayout {
            grid_segments,
            minimal_span,
            grid_space,
            vertex_coordinates,
        }
    }

    /// Collects a printable dump of every solver stage for `layout`.
    ///
    /// This enumerates all paths again, so it is meant for debugging only.
    pub fn diagnostics<'a>(&'a self, layout: &'a AxisLayout) -> Diagnostics<'a> {
        Diagnostics {
            scaffold: self,
            layout,
        }
    }
}

/// Result of laying out one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisLayout {
    grid_segments: Vec<GridSegment>,
    minimal_span: i32,
    grid_space: GridSegment,
    vertex_coordinates: Vec<Option<i32>>,
}

impl AxisLayout {
    /// One grid segment per input segment, in input order
    pub fn grid_segments(&self) -> &[GridSegment] {
        &self.grid_segments
    }

    /// Minimum span the container must offer along this axis
    pub fn minimal_span(&self) -> i32 {
        self.minimal_span
    }

    /// Grid span actually used: the request, or its enlargement
    pub fn grid_space(&self) -> GridSegment {
        self.grid_space
    }

    /// Grid coordinate of each vertex
    pub fn vertex_coordinates(&self) -> &[Option<i32>] {
        &self.vertex_coordinates
    }
}

/// Lays out one axis with the default merge tolerance.
///
/// # Examples
///
/// ```
/// # use tilegrid::solver;
/// # use tilegrid_core::segment::{GridSegment, StackSegment};
/// let third = 1.0 / 3.0;
/// let segments = [
///     StackSegment::new(0.0, third),
///     StackSegment::new(third, 2.0 * third),
///     StackSegment::new(2.0 * third, 1.0),
/// ];
/// let layout = solver::solve(&segments, 10, GridSegment::new(0, 20));
///
/// // Three touching segments need 30 cells, more than requested
/// assert_eq!(layout.grid_space(), GridSegment::new(0, 30));
/// ```
pub fn solve(segments: &[StackSegment], minimal_spacing: i32, requested: GridSegment) -> AxisLayout {
    Scaffold::build(segments, minimal_spacing, DEFAULT_MERGE_TOLERANCE).layout(requested)
}

/// Human-readable dump of the solver state, created by [`Scaffold::diagnostics`].
pub struct Diagnostics<'a> {
    scaffold: &'a Scaffold,
    layout: &'a AxisLayout,
}

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaffold = self.scaffold;
        let vertices = scaffold.vertices();
        let graph = scaffold.graph();

        writeln!(f, "segments:")?;
        for (index, segment) in scaffold.segments().iter().enumerate() {
            write!(f, "  {index}: [{}, {}]", segment.min(), segment.max())?;
            if index < vertices.segment_count() {
                let (min, max) = vertices.segment_vertices(index);
                write!(f, " -> v{min}..v{max}")?;
            }
            writeln!(f)?;
        }
        if scaffold.is_degenerate() {
            writeln!(f, "degenerate input")?;
        }

        writeln!(f, "vertices:")?;
        for (vertex, coordinate) in vertices.coordinates().iter().enumerate() {
            writeln!(f, "  v{vertex}: {coordinate}")?;
        }

        writeln!(f, "adjacency:")?;
        for vertex in 0..graph.len() {
            let edges: Vec<String> = graph
                .successors(vertex)
                .map(|next| match graph.weight(vertex, next) {
                    EdgeWeight::Constrained => format!("v{next}*"),
                    _ => format!("v{next}"),
                })
                .collect();
            if !edges.is_empty() {
                writeln!(f, "  v{vertex} -> {}", edges.join(" "))?;
            }
        }

        writeln!(f, "paths:")?;
        for path in graph.paths() {
            let weight = graph.path_weight(&path).unwrap_or(0);
            writeln!(f, "  {path:?} weight {weight}")?;
        }
        writeln!(
            f,
            "scaffold: {:?} weight {} (minimal span {})",
            scaffold.path(),
            scaffold.weight(),
            self.layout.minimal_span()
        )?;
        writeln!(f, "grid space: {}", self.layout.grid_space())?;

        writeln!(f, "grid coordinates:")?;
        for (vertex, coordinate) in self.layout.vertex_coordinates().iter().enumerate() {
            match coordinate {
                Some(coordinate) => writeln!(f, "  v{vertex}: {coordinate}")?,
                None => writeln!(f, "  v{vertex}: unassigned")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn segments(values: &[(f64, f64)]) -> Vec<StackSegment> {
        values
            .iter()
            .map(|&(min, max)| StackSegment::new(min, max))
            .collect()
    }

    fn grid(values: &[(i32, i32)]) -> Vec<GridSegment> {
        values
            .iter()
            .map(|&(min, max)| GridSegment::new(min, max))
            .collect()
    }

    #[test]
    fn test_single_segment_fills_request() {
        let layout = solve(&segments(&[(0.0, 1.0)]), 8, GridSegment::new(0, 16));
        assert_eq!(layout.grid_segments(), grid(&[(0, 16)]));
        assert_eq!(layout.minimal_span(), 8);
        assert_eq!(layout.grid_space(), GridSegment::new(0, 16));
    }

    #[test]
    fn test_two_abutting_segments_split_equally() {
        let scaffold = Scaffold::build(&segments(&[(0.0, 0.5), (0.5, 1.0)]), 8, DEFAULT_MERGE_TOLERANCE);
        assert_eq!(scaffold.weight(), 2);
        assert_eq!(scaffold.minimal_span(), 16);

        let layout = scaffold.layout(GridSegment::new(0, 24));
        assert_eq!(layout.grid_space(), GridSegment::new(0, 24));
        assert_eq!(layout.grid_segments(), grid(&[(0, 12), (12, 24)]));
    }

    #[test]
    fn test_three_abutting_segments_enlarge_space() {
        let third = 1.0 / 3.0;
        let layout = solve(
            &segments(&[(0.0, third), (third, 2.0 * third), (2.0 * third, 1.0)]),
            10,
            GridSegment::new(0, 20),
        );
        assert_eq!(layout.minimal_span(), 30);
        assert_eq!(layout.grid_space(), GridSegment::new(0, 30));
        assert_eq!(layout.grid_segments(), grid(&[(0, 10), (10, 20), (20, 30)]));
    }

    #[test]
    fn test_near_duplicate_boundary_touches() {
        let scaffold = Scaffold::build(
            &segments(&[(0.0, 0.49999999), (0.5, 1.0)]),
            8,
            DEFAULT_MERGE_TOLERANCE,
        );
        assert_eq!(scaffold.vertices().len(), 3);
        assert_eq!(scaffold.weight(), 2);

        let layout = scaffold.layout(GridSegment::new(0, 24));
        assert_eq!(layout.grid_segments(), grid(&[(0, 12), (12, 24)]));
    }

    #[test]
    fn test_overlapping_segments_back_fill() {
        // Scaffold [v0 v1 v3] leaves v2 (0.5) to the bearing path [v0 v2 v3]
        let layout = solve(&segments(&[(0.0, 0.5), (0.25, 1.0)]), 4, GridSegment::new(0, 40));
        assert_eq!(layout.minimal_span(), 4);
        assert_eq!(layout.grid_segments(), grid(&[(0, 20), (10, 40)]));
        assert!(layout.vertex_coordinates().iter().all(Option::is_some));
    }

    #[test]
    fn test_side_by_side_columns() {
        // Two columns, the right one split in two rows; horizontally the
        // rows share both edges
        let layout = solve(
            &segments(&[(0.0, 0.5), (0.5, 1.0), (0.5, 1.0)]),
            12,
            GridSegment::new(0, 64),
        );
        assert_eq!(layout.minimal_span(), 24);
        assert_eq!(layout.grid_segments(), grid(&[(0, 32), (32, 64), (32, 64)]));
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        let scaffold = Scaffold::build(&[], 8, DEFAULT_MERGE_TOLERANCE);
        assert!(scaffold.is_degenerate());
        assert_eq!(scaffold.minimal_span(), 0);

        let layout = scaffold.layout(GridSegment::new(0, 16));
        assert!(layout.grid_segments().is_empty());
        assert_eq!(layout.grid_space(), GridSegment::new(0, 16));
    }

    #[test]
    fn test_invalid_segment_is_degenerate() {
        for bad in [(f64::NAN, 1.0), (0.5, 0.5), (0.8, 0.2), (0.0, f64::INFINITY)] {
            let layout = solve(&segments(&[(0.0, 1.0), bad]), 8, GridSegment::new(0, 16));
            assert!(layout.grid_segments().is_empty());
            assert_eq!(layout.minimal_span(), 0);
        }
    }

    #[test]
    fn test_degenerate_invalid_request() {
        let layout = solve(&[], 8, GridSegment::new(6, 2));
        assert_eq!(layout.grid_space(), GridSegment::new(6, 6));
    }

    #[test]
    fn test_minimal_spacing_raised_to_one() {
        let scaffold = Scaffold::build(&segments(&[(0.0, 1.0)]), 0, DEFAULT_MERGE_TOLERANCE);
        assert_eq!(scaffold.minimal_spacing(), 1);
        assert_eq!(scaffold.minimal_span(), 1);
    }

    #[test]
    fn test_tiny_segment_collapses() {
        let layout = solve(
            &segments(&[(0.0, 1.0), (0.5, 0.500_000_01)]),
            8,
            GridSegment::new(0, 16),
        );
        let collapsed = layout.grid_segments()[1];
        assert_eq!(collapsed.length(), 0);
        assert_eq!(layout.grid_segments()[0], GridSegment::new(0, 16));
    }

    #[test]
    fn test_overlapping_segments_may_reorder() {
        // The segment starting at 0.65 ends up after the one starting at 0.75:
        // start order only holds when no segments overlap
        let layout = solve(
            &segments(&[(0.05, 0.75), (0.75, 0.8), (0.0, 0.1), (0.65, 1.15)]),
            15,
            GridSegment::new(0, 45),
        );
        assert_eq!(layout.minimal_span(), 30);
        assert_eq!(
            layout.grid_segments(),
            grid(&[(2, 29), (29, 44), (0, 15), (30, 45)])
        );
    }

    #[test]
    fn test_huge_spacing_saturates() {
        let scaffold = Scaffold::build(
            &segments(&[(0.0, 0.5), (0.5, 1.0)]),
            i32::MAX / 2 + 1,
            DEFAULT_MERGE_TOLERANCE,
        );
        assert_eq!(scaffold.minimal_span(), i32::MAX);

        let layout = scaffold.layout(GridSegment::new(0, 10));
        assert_eq!(layout.grid_space(), GridSegment::new(0, i32::MAX));
        assert_eq!(layout.grid_segments().len(), 2);
        assert_eq!(layout.grid_segments()[1].max(), i32::MAX);
    }

    #[test]
    fn test_requested_offset_is_kept() {
        let layout = solve(&segments(&[(0.0, 0.5), (0.5, 1.0)]), 8, GridSegment::new(4, 28));
        assert_eq!(layout.grid_segments(), grid(&[(4, 16), (16, 28)]));
    }

    #[test]
    fn test_diagnostics_dump() {
        let scaffold = Scaffold::build(&segments(&[(0.0, 0.5), (0.5, 1.0)]), 8, DEFAULT_MERGE_TOLERANCE);
        let layout = scaffold.layout(GridSegment::new(0, 24));
        let dump = scaffold.diagnostics(&layout).to_string();

        assert!(dump.contains("0: [0, 0.5] -> v0..v1"));
        assert!(dump.contains("v0 -> v1*"));
        assert!(dump.contains("[0, 1, 2] weight 2"));
        assert!(dump.contains("minimal span 16"));
        assert!(dump.contains("grid space: [0, 24]"));
        assert!(dump.contains("v1: 12"));
    }

    #[test]
    fn test_diagnostics_marks_degenerate_input() {
        let scaffold = Scaffold::build(&segments(&[(1.0, 0.0)]), 8, DEFAULT_MERGE_TOLERANCE);
        let layout = scaffold.layout(GridSegment::new(0, 24));
        assert!(scaffold.diagnostics(&layout).to_string().contains("degenerate input"));
    }

    fn arbitrary_segments() -> impl Strategy<Value = Vec<StackSegment>> {
        prop::collection::vec((0u32..=20, 1u32..=20), 1..=6).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(start, length)| {
                    StackSegment::new(f64::from(start) / 20.0, f64::from(start + length) / 20.0)
                })
                .collect()
        })
    }

    /// Abutting segments covering `[0, 1]`, in shuffled-free ascending order.
    fn partition() -> impl Strategy<Value = Vec<StackSegment>> {
        prop::collection::vec(1u32..=20, 1..=6).prop_map(|sizes| {
            let total: u32 = sizes.iter().sum();
            let mut start = 0;
            sizes
                .into_iter()
                .map(|size| {
                    let segment = StackSegment::new(
                        f64::from(start) / f64::from(total),
                        f64::from(start + size) / f64::from(total),
                    );
                    start += size;
                    segment
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_one_grid_segment_per_input(
            segments in arbitrary_segments(),
            spacing in 1i32..=16,
            length in 0i32..=200,
        ) {
            let layout = solve(&segments, spacing, GridSegment::new(0, length));
            prop_assert_eq!(layout.grid_segments().len(), segments.len());
        }

        #[test]
        fn prop_minimal_span_is_weight_times_spacing(
            segments in arbitrary_segments(),
            spacing in 1i32..=16,
        ) {
            let scaffold = Scaffold::build(&segments, spacing, DEFAULT_MERGE_TOLERANCE);
            prop_assert_eq!(scaffold.minimal_span(), scaffold.weight() as i32 * spacing);
            prop_assert!(scaffold.weight() >= 1);
        }

        #[test]
        fn prop_grid_space_is_sufficient(
            segments in arbitrary_segments(),
            spacing in 1i32..=16,
            min in -10i32..=50,
            length in -10i32..=200,
        ) {
            let layout = solve(&segments, spacing, GridSegment::new(min, min + length));
            prop_assert!(layout.grid_space().length() >= layout.minimal_span());
            prop_assert!(layout.grid_space().min() >= 0);
        }

        #[test]
        fn prop_solving_is_deterministic(
            segments in arbitrary_segments(),
            spacing in 1i32..=16,
            length in 0i32..=200,
        ) {
            let requested = GridSegment::new(0, length);
            let first = solve(&segments, spacing, requested);
            let second = solve(&segments, spacing, requested);
            prop_assert_eq!(&first, &second);

            let again = solve(&segments, spacing, first.grid_space());
            prop_assert_eq!(first.grid_segments(), again.grid_segments());
        }

        #[test]
        fn prop_partition_keeps_spacing_and_order(
            segments in partition(),
            spacing in 1i32..=16,
            length in 0i32..=200,
        ) {
            let layout = solve(&segments, spacing, GridSegment::new(0, length));
            let grid = layout.grid_segments();

            prop_assert_eq!(layout.minimal_span(), segments.len() as i32 * spacing);
            prop_assert_eq!(grid[0].min(), layout.grid_space().min());
            prop_assert_eq!(grid[grid.len() - 1].max(), layout.grid_space().max());
            for pair in grid.windows(2) {
                prop_assert_eq!(pair[0].max(), pair[1].min());
                prop_assert!(pair[0].min() <= pair[1].min());
            }
            for segment in grid {
                prop_assert!(segment.length() >= spacing);
            }
        }
    }
}
