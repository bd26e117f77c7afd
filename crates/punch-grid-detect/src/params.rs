use serde::{Deserialize, Serialize};

/// Tuning knobs of a detection run.
///
/// All fields are clamped into their documented ranges when a
/// [`crate::PunchDetector`] is constructed, so out-of-range values coming
/// from sliders or config files degrade to the nearest legal setting
/// instead of failing the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectParams {
    /// Grayscale offset below the local mean required to call a pixel
    /// foreground, in `[0, 100]`. Higher is stricter.
    pub sensitivity: f32,
    /// Radius of the local-mean window in grid-cell units, in `[1, 20]`.
    pub neighborhood_radius: f32,
    /// Expected punch area as a percentage of one cell's area, in
    /// `[5, 100]`.
    pub blob_size_percent: f32,
    /// Rectified samples per grid cell along each axis, `≥ 1`.
    pub samples_per_cell: usize,
    /// Minimum peak separation as a fraction of `samples_per_cell`.
    /// The 0.7 default is empirical.
    pub min_separation_factor: f32,
    /// Blob-to-center acceptance radius as a fraction of the average
    /// lattice spacing. The 0.6 default is empirical.
    pub assign_threshold_factor: f32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            sensitivity: 30.0,
            neighborhood_radius: 5.0,
            blob_size_percent: 50.0,
            samples_per_cell: 10,
            min_separation_factor: 0.7,
            assign_threshold_factor: 0.6,
        }
    }
}

impl DetectParams {
    /// Copy with every field forced into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            sensitivity: self.sensitivity.clamp(0.0, 100.0),
            neighborhood_radius: self.neighborhood_radius.clamp(1.0, 20.0),
            blob_size_percent: self.blob_size_percent.clamp(5.0, 100.0),
            samples_per_cell: self.samples_per_cell.max(1),
            min_separation_factor: self.min_separation_factor.max(0.0),
            assign_threshold_factor: self.assign_threshold_factor.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = DetectParams {
            sensitivity: 180.0,
            neighborhood_radius: 0.2,
            blob_size_percent: 1.0,
            samples_per_cell: 0,
            ..DetectParams::default()
        }
        .clamped();
        assert_eq!(p.sensitivity, 100.0);
        assert_eq!(p.neighborhood_radius, 1.0);
        assert_eq!(p.blob_size_percent, 5.0);
        assert_eq!(p.samples_per_cell, 1);
    }

    #[test]
    fn defaults_are_already_in_range() {
        let p = DetectParams::default();
        assert_eq!(p, p.clamped());
    }
}
