use log::debug;

/// Histogram peaks smaller than this are noise.
const MIN_PEAK_VALUE: f32 = 0.01;
/// Deposit width as a fraction of the minimum separation.
const SIGMA_FACTOR: f32 = 0.3;
/// Non-maximum suppression distance as a fraction of the minimum separation.
const NMS_FACTOR: f32 = 0.5;

/// Recover `expected` strictly increasing axis positions from blob centroid
/// coordinates along one axis.
///
/// Centroids are smeared into a histogram as truncated Gaussians, local
/// maxima are ranked by height and thinned by non-maximum suppression, and
/// any positions the data could not supply are filled in by snapping the
/// survivors to ideal grid slots and interpolating the gaps. With no
/// centroids at all the result is the uniform lattice over `[0, extent]`.
pub fn fit_axis(positions: &[f32], expected: usize, extent: f32, min_separation: f32) -> Vec<f32> {
    if expected == 0 {
        return Vec::new();
    }
    let spacing = extent / expected as f32;
    if positions.is_empty() {
        return uniform_axis(expected, spacing);
    }

    let hist = build_histogram(positions, extent, min_separation);
    let mut peaks = collect_peaks(&hist);

    // Tallest first; ties broken by position so the result is deterministic.
    peaks.sort_by(|a, b| {
        b.height
            .partial_cmp(&a.height)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.position.partial_cmp(&b.position).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut accepted: Vec<f32> = Vec::with_capacity(expected);
    for peak in &peaks {
        if accepted
            .iter()
            .all(|&a| (a - peak.position).abs() >= NMS_FACTOR * min_separation)
        {
            accepted.push(peak.position);
            if accepted.len() == expected {
                break;
            }
        }
    }

    accepted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if accepted.len() < expected {
        debug!(
            "axis fit found {}/{expected} peaks, interpolating the rest",
            accepted.len()
        );
        return interpolate_gaps(&accepted, expected, spacing);
    }

    accepted
}

fn uniform_axis(expected: usize, spacing: f32) -> Vec<f32> {
    (0..expected).map(|i| (i as f32 + 0.5) * spacing).collect()
}

/// One-bin-per-pixel histogram with Gaussian deposits truncated at ±3σ.
fn build_histogram(positions: &[f32], extent: f32, min_separation: f32) -> Vec<f32> {
    let bins = (extent.ceil() as usize).max(1);
    let sigma = SIGMA_FACTOR * min_separation;
    let two_sigma_sq = (2.0 * sigma * sigma).max(f32::MIN_POSITIVE);
    let reach = 3.0 * sigma;

    let mut hist = vec![0.0f32; bins];
    for &pos in positions {
        let lo = ((pos - reach).floor().max(0.0)) as usize;
        let hi = ((pos + reach).ceil() as usize).min(bins - 1);
        for (bin, slot) in hist.iter_mut().enumerate().take(hi + 1).skip(lo) {
            let d = bin as f32 - pos;
            *slot += (-d * d / two_sigma_sq).exp();
        }
    }
    hist
}

struct Peak {
    position: f32,
    height: f32,
}

/// Local maxima (not below either neighbor) above the noise floor.
fn collect_peaks(hist: &[f32]) -> Vec<Peak> {
    let n = hist.len();
    let mut peaks = Vec::new();
    for i in 0..n {
        let curr = hist[i];
        if curr <= MIN_PEAK_VALUE {
            continue;
        }
        let prev = if i > 0 { hist[i - 1] } else { 0.0 };
        let next = if i + 1 < n { hist[i + 1] } else { 0.0 };
        if curr >= prev && curr >= next {
            peaks.push(Peak {
                position: i as f32,
                height: curr,
            });
        }
    }
    peaks
}

/// Snap detected positions to ideal grid slots and fill the missing slots:
/// linear interpolation where a gap is bracketed, extrapolation by the ideal
/// spacing off the nearest anchor, uniform placement with no anchors at all.
fn interpolate_gaps(detected: &[f32], expected: usize, spacing: f32) -> Vec<f32> {
    let mut slots: Vec<Option<f32>> = vec![None; expected];

    for &pos in detected {
        let idx = ((pos / spacing - 0.5).round().max(0.0) as usize).min(expected - 1);
        let ideal = (idx as f32 + 0.5) * spacing;
        match slots[idx] {
            Some(existing) if (existing - ideal).abs() <= (pos - ideal).abs() => {}
            _ => slots[idx] = Some(pos),
        }
    }

    let known: Vec<(usize, f32)> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|pos| (i, pos)))
        .collect();

    let mut out = Vec::with_capacity(expected);
    for i in 0..expected {
        if let Some(pos) = slots[i] {
            out.push(pos);
            continue;
        }

        let prev = known.iter().rev().find(|(k, _)| *k < i).copied();
        let next = known.iter().find(|(k, _)| *k > i).copied();
        let value = match (prev, next) {
            (Some((p, pp)), Some((n, pn))) => {
                pp + (pn - pp) * (i - p) as f32 / (n - p) as f32
            }
            (Some((p, pp)), None) => pp + (i - p) as f32 * spacing,
            (None, Some((n, pn))) => pn - (n - i) as f32 * spacing,
            (None, None) => (i as f32 + 0.5) * spacing,
        };
        out.push(value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_centroids_falls_back_to_uniform() {
        let axis = fit_axis(&[], 10, 100.0, 7.0);
        assert_eq!(axis.len(), 10);
        assert_relative_eq!(axis[0], 5.0);
        assert_relative_eq!(axis[9], 95.0);
    }

    #[test]
    fn recovers_three_well_separated_clusters() {
        let positions = [19.8, 20.1, 20.3, 49.9, 50.2, 79.7, 80.0, 80.2];
        let axis = fit_axis(&positions, 3, 100.0, 7.0);
        assert_eq!(axis.len(), 3);
        assert!((axis[0] - 20.0).abs() <= 1.0);
        assert!((axis[1] - 50.0).abs() <= 1.0);
        assert!((axis[2] - 80.0).abs() <= 1.0);
    }

    #[test]
    fn axis_is_strictly_increasing() {
        let positions = [5.0, 15.2, 24.9, 35.1, 74.8, 85.0];
        let axis = fit_axis(&positions, 10, 100.0, 7.0);
        assert_eq!(axis.len(), 10);
        for w in axis.windows(2) {
            assert!(w[1] > w[0], "axis must increase: {axis:?}");
        }
    }

    #[test]
    fn duplicate_detections_are_suppressed() {
        // Three near-coincident centroids must yield one accepted peak,
        // not three; the other cluster still gets its own position.
        let positions = [30.0, 30.6, 30.9, 70.0];
        let axis = fit_axis(&positions, 2, 100.0, 10.0);
        assert_eq!(axis.len(), 2);
        assert!((axis[0] - 30.0).abs() <= 1.5);
        assert!((axis[1] - 70.0).abs() <= 1.5);
    }

    #[test]
    fn missing_interior_position_is_interpolated() {
        let positions = [10.0, 50.0];
        let axis = fit_axis(&positions, 3, 60.0, 7.0);
        assert_eq!(axis.len(), 3);
        assert_relative_eq!(axis[1], 30.0, epsilon = 0.5);
    }

    #[test]
    fn missing_edge_positions_are_extrapolated() {
        // Only the middle column was seen; neighbors extend by the ideal
        // spacing.
        let positions = [50.0];
        let axis = fit_axis(&positions, 5, 100.0, 7.0);
        assert_eq!(axis.len(), 5);
        assert_relative_eq!(axis[2], 50.0, epsilon = 0.5);
        assert_relative_eq!(axis[1], axis[2] - 20.0, epsilon = 1e-5);
        assert_relative_eq!(axis[4], axis[2] + 40.0, epsilon = 1e-5);
    }
}
