use crate::CatmullRom;

/// Number of uniform parameter samples in an arc-length table.
const ARC_SAMPLES: usize = 200;

/// Cumulative arc-length table over a spline, sampled at uniform parameters.
///
/// Opposite boundary edges generally have different lengths and different
/// control-point spacing; evaluating them by arc length instead of raw
/// parameter keeps the interpolated interior lattice from shearing.
#[derive(Clone, Debug)]
pub struct ArcTable {
    /// `cumulative[i]` is the chord length accumulated up to sample
    /// `i / (len - 1)`. Monotonic nondecreasing; last entry is the total.
    cumulative: Vec<f64>,
}

impl ArcTable {
    /// Build the table by sampling `spline` at `ARC_SAMPLES` uniform
    /// parameters and accumulating chord lengths.
    pub fn build(spline: &CatmullRom) -> Self {
        let mut cumulative = Vec::with_capacity(ARC_SAMPLES);
        cumulative.push(0.0);

        let mut prev = spline.eval(0.0);
        let mut total = 0.0;
        for i in 1..ARC_SAMPLES {
            let t = i as f64 / (ARC_SAMPLES - 1) as f64;
            let p = spline.eval(t);
            total += (p - prev).norm();
            cumulative.push(total);
            prev = p;
        }

        Self { cumulative }
    }

    /// Total chord length of the sampled curve.
    #[inline]
    pub fn total_length(&self) -> f64 {
        *self.cumulative.last().expect("table is never empty")
    }

    /// Map a normalized arc-length position `t ∈ [0, 1]` back to the spline
    /// parameter whose accumulated length is `t · total`, by binary search
    /// plus linear interpolation between table entries.
    pub fn param_at(&self, t: f64) -> f64 {
        let total = self.total_length();
        if total <= 0.0 {
            return t.clamp(0.0, 1.0);
        }

        let target = t.clamp(0.0, 1.0) * total;
        // First index whose cumulative length reaches the target.
        let hi = self.cumulative.partition_point(|&len| len < target);
        if hi == 0 {
            return 0.0;
        }
        let hi = hi.min(self.cumulative.len() - 1);
        let lo = hi - 1;

        let span = self.cumulative[hi] - self.cumulative[lo];
        let frac = if span > 0.0 {
            (target - self.cumulative[lo]) / span
        } else {
            0.0
        };

        (lo as f64 + frac) / (self.cumulative.len() - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    #[test]
    fn straight_segment_has_exact_length() {
        let s = CatmullRom::new(vec![Point2::new(0.0, 0.0), Point2::new(30.0, 40.0)]);
        let table = ArcTable::build(&s);
        assert_relative_eq!(table.total_length(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn cumulative_lengths_are_monotonic() {
        let s = CatmullRom::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 8.0),
            Point2::new(20.0, -3.0),
        ]);
        let table = ArcTable::build(&s);
        for w in table.cumulative.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn param_lookup_inverts_arc_position_on_a_line() {
        let s = CatmullRom::new(vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)]);
        let table = ArcTable::build(&s);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_relative_eq!(table.param_at(t), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn arc_midpoint_of_a_symmetric_bow_is_its_apex() {
        let s = CatmullRom::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 10.0),
            Point2::new(100.0, 0.0),
        ]);
        let table = ArcTable::build(&s);
        let halfway = s.eval(table.param_at(0.5));
        assert_relative_eq!(halfway.x, 50.0, epsilon = 0.5);
        assert_relative_eq!(halfway.y, 10.0, epsilon = 0.1);
    }
}
