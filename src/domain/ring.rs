/// Ordered outer boundary of a polygon, as (lon, lat) pairs in WGS84.
///
/// KML rings usually repeat the first vertex as the last to close the
/// loop explicitly; `open_points` strips that duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<(f64, f64)>,
}

impl Ring {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the ring closes explicitly (first vertex repeated as last)
    pub fn is_closed(&self) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let (fx, fy) = self.points[0];
        let (lx, ly) = self.points[self.points.len() - 1];
        (fx - lx).abs() < 1e-9 && (fy - ly).abs() < 1e-9
    }

    /// Vertices with the duplicate closing vertex dropped, if present
    pub fn open_points(&self) -> &[(f64, f64)] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// A ring needs at least 3 distinct vertices to bound an area
    pub fn is_usable(&self) -> bool {
        self.open_points().len() >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_ring_detection() {
        let closed = Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(closed.is_closed());
        assert_eq!(closed.open_points().len(), 3);

        let open = Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(!open.is_closed());
        assert_eq!(open.open_points().len(), 3);
    }

    #[test]
    fn test_usability_counts_distinct_vertices() {
        // Closed "triangle" with only two distinct vertices
        let sliver = Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(!sliver.is_usable());

        let triangle = Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(triangle.is_usable());
    }

    #[test]
    fn test_empty_ring() {
        let empty = Ring::new(Vec::new());
        assert!(empty.is_empty());
        assert!(!empty.is_closed());
        assert!(!empty.is_usable());
    }
}
