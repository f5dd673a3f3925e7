//! Reduction of segment endpoints to canonical vertices.

use tilegrid_core::segment::StackSegment;

/// Default relative tolerance under which two endpoints are merged into one
/// vertex, as a fraction of the overall stack span.
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1.0 / 10_000.0;

/// Sorted, de-duplicated stack coordinates shared by segment endpoints.
///
/// Endpoint `2 * i` is the `min` of segment `i` and endpoint `2 * i + 1` is
/// its `max`; each endpoint is mapped to the vertex it was folded into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexSet {
    coordinates: Vec<f64>,
    endpoint_vertices: Vec<usize>,
}

impl VertexSet {
    /// Collapses all segment endpoints into canonical vertices.
    ///
    /// Endpoints are visited in ascending order. A new vertex is started
    /// whenever an endpoint lies further than `eps` from the last kept vertex,
    /// where `eps = (max - min) * relative_tolerance`; otherwise the endpoint
    /// is folded into the last kept vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tilegrid::solver::vertex::{VertexSet, DEFAULT_MERGE_TOLERANCE};
    /// # use tilegrid_core::segment::StackSegment;
    /// let segments = [StackSegment::new(0.0, 0.49999999), StackSegment::new(0.5, 1.0)];
    /// let vertices = VertexSet::reduce(&segments, DEFAULT_MERGE_TOLERANCE);
    /// assert_eq!(vertices.len(), 3);
    /// assert_eq!(vertices.segment_vertices(0), (0, 1));
    /// assert_eq!(vertices.segment_vertices(1), (1, 2));
    /// ```
    pub fn reduce(segments: &[StackSegment], relative_tolerance: f64) -> Self {
        let raw: Vec<f64> = segments
            .iter()
            .flat_map(|segment| [segment.min(), segment.max()])
            .collect();
        if raw.is_empty() {
            return Self::default();
        }

        let mut order: Vec<usize> = (0..raw.len()).collect();
        order.sort_by(|&a, &b| raw[a].total_cmp(&raw[b]));

        let min = raw[order[0]];
        let max = raw[order[order.len() - 1]];
        let eps = (max - min) * relative_tolerance;

        let mut coordinates = Vec::with_capacity(raw.len());
        let mut endpoint_vertices = vec![0; raw.len()];
        let mut last_kept = min;
        coordinates.push(last_kept);

        for &endpoint in &order[1..] {
            let value = raw[endpoint];
            if (value - last_kept).abs() > eps {
                coordinates.push(value);
                last_kept = value;
            }
            endpoint_vertices[endpoint] = coordinates.len() - 1;
        }

        Self {
            coordinates,
            endpoint_vertices,
        }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns true if there are no vertices
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Stack coordinate of a vertex
    pub fn coordinate(&self, vertex: usize) -> f64 {
        self.coordinates[vertex]
    }

    /// All vertex coordinates, strictly ascending
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Number of segments the set was reduced from
    pub fn segment_count(&self) -> usize {
        self.endpoint_vertices.len() / 2
    }

    /// Vertices of a segment's `(min, max)` endpoints
    pub fn segment_vertices(&self, segment: usize) -> (usize, usize) {
        (
            self.endpoint_vertices[segment * 2],
            self.endpoint_vertices[segment * 2 + 1],
        )
    }

    /// Iterates over every segment's `(min, max)` vertex pair, in input order
    pub fn segment_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.endpoint_vertices
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }
}
