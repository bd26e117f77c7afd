use nalgebra::{Point2, Vector2};

/// Catmull-Rom spline through a fixed set of control points with uniform
/// parameterization between them.
///
/// The global parameter `t ∈ [0, 1]` spans all segments uniformly, so the
/// spline passes through control point `k` at `t = k / (n - 1)`. Missing
/// phantom points at the ends are reflected (`p₋₁ = 2·p₀ − p₁` and the
/// symmetric construction at the far end), which keeps the endpoints C¹.
/// With fewer than three control points the curve degenerates to a straight
/// segment.
#[derive(Clone, Debug)]
pub struct CatmullRom {
    points: Vec<Point2<f64>>,
}

impl CatmullRom {
    /// `points` must hold at least the two endpoints.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        assert!(points.len() >= 2, "spline needs at least two points");
        Self { points }
    }

    #[inline]
    pub fn control_points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Evaluate at global parameter `t ∈ [0, 1]` (clamped).
    pub fn eval(&self, t: f64) -> Point2<f64> {
        let n = self.points.len();
        if n == 2 {
            let a = self.points[0].coords;
            let b = self.points[1].coords;
            return Point2::from(a + (b - a) * t.clamp(0.0, 1.0));
        }

        let segments = n - 1;
        let x = t.clamp(0.0, 1.0) * segments as f64;
        let seg = (x.floor() as usize).min(segments - 1);
        let local = x - seg as f64;

        let p1 = self.points[seg].coords;
        let p2 = self.points[seg + 1].coords;
        let p0 = if seg == 0 {
            reflect(p1, p2)
        } else {
            self.points[seg - 1].coords
        };
        let p3 = if seg + 2 >= n {
            reflect(p2, p1)
        } else {
            self.points[seg + 2].coords
        };

        Point2::from(catmull_rom_segment(p0, p1, p2, p3, local))
    }
}

/// Phantom control point: `2·a − b`.
#[inline]
fn reflect(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    a * 2.0 - b
}

/// Standard uniform Catmull-Rom segment basis on `t ∈ [0, 1]`.
#[inline]
fn catmull_rom_segment(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    t: f64,
) -> Vector2<f64> {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_points_make_a_straight_segment() {
        let s = CatmullRom::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 20.0)]);
        let mid = s.eval(0.5);
        assert_relative_eq!(mid.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolates_control_points_at_uniform_parameters() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 3.0),
            Point2::new(9.0, -1.0),
            Point2::new(12.0, 0.5),
        ];
        let s = CatmullRom::new(pts.clone());
        for (k, p) in pts.iter().enumerate() {
            let t = k as f64 / (pts.len() - 1) as f64;
            let q = s.eval(t);
            assert_relative_eq!(q.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_control_points_stay_on_the_line() {
        let s = CatmullRom::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 10.0),
        ]);
        for i in 0..=20 {
            let p = s.eval(i as f64 / 20.0);
            assert_relative_eq!(p.y, p.x, epsilon = 1e-9);
        }
    }

    #[test]
    fn parameter_is_clamped() {
        let s = CatmullRom::new(vec![Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)]);
        let before = s.eval(-0.5);
        let after = s.eval(1.5);
        assert_relative_eq!(before.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(after.x, 2.0, epsilon = 1e-12);
    }
}
