//! Path enumeration and scaffold selection.
//!
//! The number of paths grows combinatorially with the number of overlapping
//! segments. Enumeration is therefore exposed as a lazy iterator rather than
//! a cached list, and callers are expected to keep the segment count small.

use log::trace;

use super::graph::AdjacencyGraph;

impl AdjacencyGraph {
    /// Enumerates every path starting at vertex 0.
    ///
    /// Paths are produced in depth-first order, exploring successors from the
    /// lowest vertex index up. A path ends at a vertex with no forward
    /// successor, which for a connected graph is always the last vertex.
    /// Graphs with fewer than two vertices have no paths.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tilegrid::solver::{graph::AdjacencyGraph, vertex::VertexSet};
    /// # use tilegrid_core::segment::StackSegment;
    /// let segments = [StackSegment::new(0.0, 0.5), StackSegment::new(0.25, 1.0)];
    /// let graph = AdjacencyGraph::build(&VertexSet::reduce(&segments, 1e-4));
    /// let paths: Vec<Vec<usize>> = graph.paths().collect();
    /// assert_eq!(paths, vec![vec![0, 1, 2, 3], vec![0, 1, 3], vec![0, 2, 3]]);
    /// ```
    pub fn paths(&self) -> Paths<'_> {
        let stack = if self.len() >= 2 {
            vec![Frame::new(0)]
        } else {
            Vec::new()
        };
        Paths { graph: self, stack }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next: usize,
    has_successor: bool,
}

impl Frame {
    fn new(vertex: usize) -> Self {
        Self {
            vertex,
            next: vertex + 1,
            has_successor: false,
        }
    }
}

/// Lazy depth-first iterator over the paths of an [`AdjacencyGraph`].
///
/// Created by [`AdjacencyGraph::paths`].
#[derive(Debug, Clone)]
pub struct Paths<'g> {
    graph: &'g AdjacencyGraph,
    stack: Vec<Frame>,
}

impl Iterator for Paths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let successor = (frame.next..self.graph.len())
                .find(|&next| self.graph.weight(frame.vertex, next).exists());

            match successor {
                Some(next) => {
                    frame.next = next + 1;
                    frame.has_successor = true;
                    self.stack.push(Frame::new(next));
                }
                None => {
                    let finished = !frame.has_successor;
                    let path = finished
                        .then(|| self.stack.iter().map(|frame| frame.vertex).collect());
                    self.stack.pop();
                    if path.is_some() {
                        return path;
                    }
                }
            }
        }
    }
}

/// Selects the scaffold path: the first path whose weight is strictly greater
/// than that of every path before it.
///
/// Returns the path and its weight. When no path has a positive weight (or
/// the graph has no paths), the scaffold is empty with weight zero.
pub fn select_scaffold(graph: &AdjacencyGraph) -> (Vec<usize>, u32) {
    let mut best_path = Vec::new();
    let mut best_weight = 0;

    for path in graph.paths() {
        let Some(weight) = graph.path_weight(&path) else {
            continue;
        };
        trace!(path:?, weight; "Enumerated path");
        if weight > best_weight {
            best_weight = weight;
            best_path = path;
        }
    }

    (best_path, best_weight)
}

#[cfg(test)]
mod tests {
    use tilegrid_core::segment::StackSegment;

    use super::*;
    use crate::solver::vertex::{DEFAULT_MERGE_TOLERANCE, VertexSet};

    fn graph(segments: &[(f64, f64)]) -> AdjacencyGraph {
        let segments: Vec<_> = segments
            .iter()
            .map(|&(min, max)| StackSegment::new(min, max))
            .collect();
        AdjacencyGraph::build(&VertexSet::reduce(&segments, DEFAULT_MERGE_TOLERANCE))
    }

    #[test]
    fn test_no_paths_without_two_vertices() {
        assert_eq!(graph(&[]).paths().count(), 0);
        assert_eq!(select_scaffold(&graph(&[])), (Vec::new(), 0));
    }

    #[test]
    fn test_single_segment_single_path() {
        let graph = graph(&[(0.0, 1.0)]);
        let paths: Vec<_> = graph.paths().collect();
        assert_eq!(paths, vec![vec![0, 1]]);
        assert_eq!(select_scaffold(&graph), (vec![0, 1], 1));
    }

    #[test]
    fn test_paths_follow_ascending_exploration() {
        // Vertices: 0.0, 1/3, 2/3, 1.0 with one long segment over everything
        let graph = graph(&[
            (0.0, 1.0 / 3.0),
            (1.0 / 3.0, 2.0 / 3.0),
            (2.0 / 3.0, 1.0),
            (0.0, 1.0),
        ]);
        let paths: Vec<_> = graph.paths().collect();
        assert_eq!(paths, vec![vec![0, 1, 2, 3], vec![0, 3]]);
        assert_eq!(select_scaffold(&graph), (vec![0, 1, 2, 3], 3));
    }

    #[test]
    fn test_every_path_spans_first_to_last() {
        let graph = graph(&[(0.0, 0.5), (0.25, 0.75), (0.5, 1.0), (0.0, 0.25)]);
        let last = graph.len() - 1;
        for path in graph.paths() {
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&last));
            assert!(path.windows(2).all(|edge| edge[0] < edge[1]));
            assert!(graph.path_weight(&path).is_some());
        }
    }

    #[test]
    fn test_ties_keep_first_discovered_path() {
        // Vertices: 0.0, 0.25, 0.5, 1.0
        // Paths: [0 1 2 3] w=0, [0 1 3] w=1, [0 2 3] w=1
        let graph = graph(&[(0.0, 0.5), (0.25, 1.0)]);
        assert_eq!(select_scaffold(&graph), (vec![0, 1, 3], 1));
    }

    #[test]
    fn test_heavier_later_path_wins() {
        // Vertices: 0.0, 0.25, 0.5, 0.75, 1.0
        let graph = graph(&[(0.0, 0.5), (0.25, 0.75), (0.5, 1.0)]);
        let paths: Vec<_> = graph.paths().collect();
        assert_eq!(
            paths,
            vec![
                vec![0, 1, 2, 3, 4],
                vec![0, 1, 2, 4],
                vec![0, 1, 3, 4],
                vec![0, 2, 3, 4],
                vec![0, 2, 4],
            ]
        );
        assert_eq!(select_scaffold(&graph), (vec![0, 2, 4], 2));
    }
}
