//! Adjacency graph over the reduced vertices.

use super::vertex::VertexSet;

/// Relation between two vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeWeight {
    /// No edge.
    #[default]
    None,
    /// Index-consecutive vertices with no spacing requirement.
    Free,
    /// Some segment spans exactly this vertex pair, so the two vertices must
    /// be at least one minimal spacing apart.
    Constrained,
}

impl EdgeWeight {
    /// Whether a path may follow this edge
    pub fn exists(self) -> bool {
        self != Self::None
    }

    /// Contribution of the edge to a path weight
    pub fn score(self) -> u32 {
        match self {
            Self::Constrained => 1,
            Self::None | Self::Free => 0,
        }
    }
}

/// Square, symmetric adjacency matrix over the vertices of a [`VertexSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    size: usize,
    cells: Vec<EdgeWeight>,
}

impl AdjacencyGraph {
    /// Builds the graph: consecutive vertices are joined by [`EdgeWeight::Free`]
    /// edges, then every segment's vertex pair is marked
    /// [`EdgeWeight::Constrained`], overwriting a free edge or adding a
    /// long-range one.
    ///
    /// Since every consecutive pair is joined, the first and last vertices
    /// are always connected.
    pub fn build(vertices: &VertexSet) -> Self {
        let size = vertices.len();
        let mut graph = Self {
            size,
            cells: vec![EdgeWeight::None; size * size],
        };

        for vertex in 1..size {
            graph.set(vertex - 1, vertex, EdgeWeight::Free);
        }
        for (first, second) in vertices.segment_pairs() {
            graph.set(first, second, EdgeWeight::Constrained);
        }

        graph
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Weight of the edge between two vertices; out-of-range pairs have no edge.
    pub fn weight(&self, from: usize, to: usize) -> EdgeWeight {
        if from < self.size && to < self.size {
            self.cells[from * self.size + to]
        } else {
            EdgeWeight::None
        }
    }

    /// Vertices after `vertex` that it has an edge to, ascending
    pub fn successors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        (vertex + 1..self.size).filter(move |&next| self.weight(vertex, next).exists())
    }

    /// Sum of the edge scores along `path`, or `None` if the path crosses a
    /// missing edge.
    ///
    /// Paths with fewer than two vertices weigh zero.
    pub fn path_weight(&self, path: &[usize]) -> Option<u32> {
        path.windows(2).try_fold(0, |sum, edge| {
            let weight = self.weight(edge[0], edge[1]);
            weight.exists().then(|| sum + weight.score())
        })
    }

    /// Iterates over every constrained pair `(a, b)` with `a < b`
    pub fn constrained_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |from| {
            (from + 1..self.size)
                .filter(move |&to| self.weight(from, to) == EdgeWeight::Constrained)
                .map(move |to| (from, to))
        })
    }

    fn set(&mut self, a: usize, b: usize, weight: EdgeWeight) {
        self.cells[a * self.size + b] = weight;
        self.cells[b * self.size + a] = weight;
    }
}

#[cfg(test)]
mod tests {
    use tilegrid_core::segment::StackSegment;

    use super::*;
    use crate::solver::vertex::DEFAULT_MERGE_TOLERANCE;

    fn graph(segments: &[(f64, f64)]) -> AdjacencyGraph {
        let segments: Vec<_> = segments
            .iter()
            .map(|&(min, max)| StackSegment::new(min, max))
            .collect();
        AdjacencyGraph::build(&VertexSet::reduce(&segments, DEFAULT_MERGE_TOLERANCE))
    }

    #[test]
    fn test_edge_weight_score() {
        assert_eq!(EdgeWeight::None.score(), 0);
        assert_eq!(EdgeWeight::Free.score(), 0);
        assert_eq!(EdgeWeight::Constrained.score(), 1);
        assert!(!EdgeWeight::None.exists());
        assert!(EdgeWeight::Free.exists());
    }

    #[test]
    fn test_empty_graph() {
        let graph = graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.weight(0, 1), EdgeWeight::None);
    }

    #[test]
    fn test_abutting_segments_are_constrained() {
        let graph = graph(&[(0.0, 0.5), (0.5, 1.0)]);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.weight(0, 1), EdgeWeight::Constrained);
        assert_eq!(graph.weight(1, 0), EdgeWeight::Constrained);
        assert_eq!(graph.weight(1, 2), EdgeWeight::Constrained);
        assert_eq!(graph.weight(0, 2), EdgeWeight::None);
    }

    #[test]
    fn test_overlapping_segments_add_long_range_edges() {
        // Vertices: 0.0, 0.25, 0.5, 1.0
        let graph = graph(&[(0.0, 0.5), (0.25, 1.0)]);
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.weight(0, 1), EdgeWeight::Free);
        assert_eq!(graph.weight(1, 2), EdgeWeight::Free);
        assert_eq!(graph.weight(2, 3), EdgeWeight::Free);
        assert_eq!(graph.weight(0, 2), EdgeWeight::Constrained);
        assert_eq!(graph.weight(1, 3), EdgeWeight::Constrained);
        assert_eq!(graph.weight(0, 3), EdgeWeight::None);

        let successors: Vec<_> = graph.successors(0).collect();
        assert_eq!(successors, vec![1, 2]);

        let pairs: Vec<_> = graph.constrained_pairs().collect();
        assert_eq!(pairs, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_path_weight() {
        let graph = graph(&[(0.0, 0.5), (0.25, 1.0)]);
        assert_eq!(graph.path_weight(&[0, 1, 2, 3]), Some(0));
        assert_eq!(graph.path_weight(&[0, 2, 3]), Some(1));
        assert_eq!(graph.path_weight(&[0, 1, 3]), Some(1));
        assert_eq!(graph.path_weight(&[0, 3]), None);
        assert_eq!(graph.path_weight(&[2]), Some(0));
        assert_eq!(graph.path_weight(&[]), Some(0));
    }
}
