use crate::{ArcTable, Boundary, BoundaryError, CatmullRom, Edge};
use nalgebra::{Point2, Vector2};

/// Newton iteration budget for the inverse map.
const MAX_NEWTON_ITERS: usize = 15;
/// Central-difference step in (u, v) space.
const JACOBIAN_STEP: f64 = 1e-3;
/// Newton step damping.
const DAMPING: f64 = 0.5;
/// Image-space residual below which the iteration stops, in pixels.
const RESIDUAL_TOL: f64 = 0.5;
/// Jacobian determinant magnitude treated as degenerate.
const DET_EPS: f64 = 1e-4;
/// Tolerance on the unit-square membership test after iteration.
const DOMAIN_EPS: f64 = 1e-3;

/// One boundary curve, evaluated by normalized arc length.
#[derive(Clone, Debug)]
struct EdgeCurve {
    spline: CatmullRom,
    arc: ArcTable,
}

impl EdgeCurve {
    fn build(boundary: &Boundary, edge: Edge) -> Self {
        let spline = CatmullRom::new(boundary.edge_points(edge));
        let arc = ArcTable::build(&spline);
        Self { spline, arc }
    }

    /// Point at arc-length fraction `t ∈ [0, 1]` along the edge.
    #[inline]
    fn at(&self, t: f64) -> Point2<f64> {
        self.spline.eval(self.arc.param_at(t))
    }
}

/// Coons patch over the four card-boundary curves, mapping logical grid
/// coordinates `(c, r) ∈ [0, cols] × [0, rows]` into the image plane.
///
/// Opposite edges are blended by arc-length position; without that, edges of
/// unequal length would drag interior rows sideways across the card.
#[derive(Clone, Debug)]
pub struct CoonsPatch {
    cols: usize,
    rows: usize,
    /// Top, right, bottom, left (see [`Edge`]).
    edges: [EdgeCurve; 4],
    corners: [Point2<f64>; 4],
}

impl CoonsPatch {
    /// Build the patch for a validated boundary and grid dimensions.
    pub fn new(boundary: &Boundary, cols: usize, rows: usize) -> Result<Self, BoundaryError> {
        boundary.validate()?;
        Ok(Self {
            cols: cols.max(1),
            rows: rows.max(1),
            edges: [
                EdgeCurve::build(boundary, Edge::Top),
                EdgeCurve::build(boundary, Edge::Right),
                EdgeCurve::build(boundary, Edge::Bottom),
                EdgeCurve::build(boundary, Edge::Left),
            ],
            corners: boundary.corners,
        })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Forward map: grid coordinates to image plane.
    #[inline]
    pub fn map(&self, c: f64, r: f64) -> Point2<f64> {
        self.eval_unit(c / self.cols as f64, r / self.rows as f64)
    }

    /// Coons evaluation on the unit square.
    fn eval_unit(&self, u: f64, v: f64) -> Point2<f64> {
        let [tl, tr, br, bl] = self.corners;
        let top = self.edges[Edge::Top as usize].at(u).coords;
        let right = self.edges[Edge::Right as usize].at(v).coords;
        let bottom = self.edges[Edge::Bottom as usize].at(u).coords;
        let left = self.edges[Edge::Left as usize].at(v).coords;

        let ruled = top * (1.0 - v) + bottom * v + left * (1.0 - u) + right * u;
        let corner_correction = tl.coords * ((1.0 - u) * (1.0 - v))
            + tr.coords * (u * (1.0 - v))
            + br.coords * (u * v)
            + bl.coords * ((1.0 - u) * v);

        Point2::from(ruled - corner_correction)
    }

    /// Inverse map: image point to grid coordinates.
    ///
    /// Damped Newton iteration from the patch center with a
    /// central-difference Jacobian. Returns `None` when the Jacobian
    /// degenerates or the solution lands outside the patch; callers treat
    /// either as a missed sample.
    pub fn unmap(&self, p: Point2<f64>) -> Option<Point2<f64>> {
        let target = p.coords;
        let mut u = 0.5;
        let mut v = 0.5;

        for _ in 0..MAX_NEWTON_ITERS {
            let residual = self.eval_unit(u, v).coords - target;
            if residual.norm() < RESIDUAL_TOL {
                break;
            }

            let h = JACOBIAN_STEP;
            let du: Vector2<f64> =
                (self.eval_unit(u + h, v) - self.eval_unit(u - h, v)) / (2.0 * h);
            let dv: Vector2<f64> =
                (self.eval_unit(u, v + h) - self.eval_unit(u, v - h)) / (2.0 * h);

            let det = du.x * dv.y - dv.x * du.y;
            if det.abs() < DET_EPS {
                return None;
            }

            // Solve J·step = residual for the 2×2 Jacobian.
            let step_u = (dv.y * residual.x - dv.x * residual.y) / det;
            let step_v = (du.x * residual.y - du.y * residual.x) / det;

            u -= DAMPING * step_u;
            v -= DAMPING * step_v;
        }

        let inside = (-DOMAIN_EPS..=1.0 + DOMAIN_EPS).contains(&u)
            && (-DOMAIN_EPS..=1.0 + DOMAIN_EPS).contains(&v);
        if !inside {
            return None;
        }

        Some(Point2::new(u * self.cols as f64, v * self.rows as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bowed_boundary() -> Boundary {
        Boundary::from_corners([
            Point2::new(0.0, 0.0),
            Point2::new(900.0, 0.0),
            Point2::new(900.0, 600.0),
            Point2::new(0.0, 600.0),
        ])
        .with_midpoints(Edge::Bottom, vec![Point2::new(450.0, 630.0)])
        .with_midpoints(Edge::Top, vec![Point2::new(450.0, 18.0)])
    }

    #[test]
    fn rectangle_patch_is_the_identity_scaling() {
        let patch = CoonsPatch::new(&Boundary::rectangle(640.0, 480.0), 8, 6).unwrap();
        for iu in 0..=10 {
            for iv in 0..=10 {
                let u = iu as f64 / 10.0;
                let v = iv as f64 / 10.0;
                let p = patch.map(u * 8.0, v * 6.0);
                assert_relative_eq!(p.x, u * 640.0, epsilon = 1e-6);
                assert_relative_eq!(p.y, v * 480.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn patch_corners_hit_boundary_corners() {
        let b = bowed_boundary();
        let patch = CoonsPatch::new(&b, 9, 6).unwrap();
        let tl = patch.map(0.0, 0.0);
        let br = patch.map(9.0, 6.0);
        assert_relative_eq!(tl.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(tl.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(br.x, 900.0, epsilon = 1e-9);
        assert_relative_eq!(br.y, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn unmap_round_trips_interior_points() {
        let patch = CoonsPatch::new(&bowed_boundary(), 9, 6).unwrap();
        for iu in 0..=6 {
            for iv in 0..=6 {
                let c = (0.05 + 0.15 * iu as f64) * 9.0;
                let r = (0.05 + 0.15 * iv as f64) * 6.0;
                let img = patch.map(c, r);
                let back = patch.unmap(img).expect("interior point inverts");
                assert!(
                    (back.x - c).abs() < 0.01 && (back.y - r).abs() < 0.01,
                    "({c:.3},{r:.3}) round-tripped to ({:.3},{:.3})",
                    back.x,
                    back.y
                );
            }
        }
    }

    #[test]
    fn unmap_rejects_points_far_outside() {
        let patch = CoonsPatch::new(&Boundary::rectangle(100.0, 100.0), 10, 10).unwrap();
        assert!(patch.unmap(Point2::new(-250.0, 50.0)).is_none());
        assert!(patch.unmap(Point2::new(50.0, 400.0)).is_none());
    }

    #[test]
    fn invalid_boundary_is_refused() {
        let mut b = Boundary::rectangle(10.0, 10.0);
        b.corners[1] = b.corners[0];
        assert!(CoonsPatch::new(&b, 4, 4).is_err());
    }
}
