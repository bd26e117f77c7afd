use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Maximum number of user-placed midpoints on one edge.
pub const MAX_EDGE_MIDPOINTS: usize = 5;

/// One of the four card edges, in the order corners are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

#[derive(thiserror::Error, Debug)]
pub enum BoundaryError {
    #[error("corners {0} and {1} coincide")]
    CoincidentCorners(usize, usize),
    #[error("{edge:?} edge has {got} midpoints (max {MAX_EDGE_MIDPOINTS})")]
    TooManyMidpoints { edge: Edge, got: usize },
}

/// The four curves bounding the card in the source image.
///
/// Corners are stored in TL, TR, BR, BL order. Midpoint lists follow each
/// edge's parameter direction: left→right for the top and bottom edges,
/// top→bottom for the left and right edges. An edge with no midpoints is a
/// straight segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// TL, TR, BR, BL.
    pub corners: [Point2<f64>; 4],
    /// Per-edge midpoints, indexed by [`Edge`]: top, right, bottom, left.
    pub midpoints: [Vec<Point2<f64>>; 4],
}

impl Boundary {
    /// Straight-edged boundary through the four corners.
    pub fn from_corners(corners: [Point2<f64>; 4]) -> Self {
        Self {
            corners,
            midpoints: Default::default(),
        }
    }

    /// Axis-aligned rectangle `(0,0) .. (width, height)`.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::from_corners([
            Point2::new(0.0, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, height),
            Point2::new(0.0, height),
        ])
    }

    /// Replace one edge's midpoints, builder style.
    pub fn with_midpoints(mut self, edge: Edge, points: Vec<Point2<f64>>) -> Self {
        self.midpoints[edge as usize] = points;
        self
    }

    /// Check the structural invariants: corners pairwise distinct, at most
    /// [`MAX_EDGE_MIDPOINTS`] midpoints per edge.
    pub fn validate(&self) -> Result<(), BoundaryError> {
        for i in 0..4 {
            for j in (i + 1)..4 {
                if (self.corners[i] - self.corners[j]).norm_squared() < 1e-12 {
                    return Err(BoundaryError::CoincidentCorners(i, j));
                }
            }
        }
        for edge in Edge::ALL {
            let got = self.midpoints[edge as usize].len();
            if got > MAX_EDGE_MIDPOINTS {
                return Err(BoundaryError::TooManyMidpoints { edge, got });
            }
        }
        Ok(())
    }

    /// Defining points of an edge (start corner, midpoints, end corner) in
    /// its parameter direction.
    pub fn edge_points(&self, edge: Edge) -> Vec<Point2<f64>> {
        let [tl, tr, br, bl] = self.corners;
        let (start, end) = match edge {
            Edge::Top => (tl, tr),
            Edge::Right => (tr, br),
            Edge::Bottom => (bl, br),
            Edge::Left => (tl, bl),
        };

        let mids = &self.midpoints[edge as usize];
        let mut points = Vec::with_capacity(mids.len() + 2);
        points.push(start);
        points.extend_from_slice(mids);
        points.push(end);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_corners_are_in_tl_tr_br_bl_order() {
        let b = Boundary::rectangle(100.0, 50.0);
        assert_eq!(b.corners[1], Point2::new(100.0, 0.0));
        assert_eq!(b.corners[3], Point2::new(0.0, 50.0));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn coincident_corners_are_rejected() {
        let mut b = Boundary::rectangle(10.0, 10.0);
        b.corners[2] = b.corners[0];
        assert!(matches!(
            b.validate(),
            Err(BoundaryError::CoincidentCorners(0, 2))
        ));
    }

    #[test]
    fn midpoint_budget_is_enforced() {
        let b = Boundary::rectangle(10.0, 10.0)
            .with_midpoints(Edge::Top, vec![Point2::new(5.0, -1.0); 6]);
        assert!(matches!(
            b.validate(),
            Err(BoundaryError::TooManyMidpoints { edge: Edge::Top, got: 6 })
        ));
    }

    #[test]
    fn edge_points_run_in_parameter_direction() {
        let b = Boundary::rectangle(100.0, 50.0)
            .with_midpoints(Edge::Bottom, vec![Point2::new(50.0, 53.0)]);
        let pts = b.edge_points(Edge::Bottom);
        assert_eq!(pts.first().copied(), Some(Point2::new(0.0, 50.0)));
        assert_eq!(pts.last().copied(), Some(Point2::new(100.0, 50.0)));
        assert_eq!(pts.len(), 3);
    }
}
