use crate::{
    adaptive_threshold, assign_blobs, filter_blobs, fit_axis, label_components, rectify, Blob,
    DetectError, DetectParams,
};
use log::debug;
use punch_grid_core::{CellGrid, PixelView};
use punch_grid_surface::{Boundary, CoonsPatch};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything a detection run produces.
///
/// The axes are in rectified pixels (cell `k` is centered near
/// `(k + 0.5) · cell_px`); `blobs` are the accepted components, kept for
/// overlay visualization.
#[derive(Clone, Debug)]
pub struct PunchDetection {
    pub grid: CellGrid,
    pub col_centers: Vec<f32>,
    pub row_centers: Vec<f32>,
    pub blobs: Vec<Blob>,
    /// Rectified pixels per cell used for this run.
    pub cell_px: usize,
}

/// The detection pipeline, configured once and run per input.
#[derive(Clone, Debug)]
pub struct PunchDetector {
    params: DetectParams,
}

impl PunchDetector {
    /// Build a detector; parameters are clamped into their documented
    /// ranges.
    pub fn new(params: DetectParams) -> Self {
        Self {
            params: params.clamped(),
        }
    }

    /// Parameters actually in effect (after clamping).
    #[inline]
    pub fn params(&self) -> &DetectParams {
        &self.params
    }

    /// Run the full pipeline: rectify, threshold, label, filter, fit the
    /// lattice, assign blobs to cells.
    ///
    /// Errors only when the run cannot start (zero grid dimensions or an
    /// invalid boundary). Every later stage degrades instead of failing:
    /// the grid may come back all-`false`, and axes the data could not
    /// supply are interpolated or uniform.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image, boundary), fields(width = image.width(), height = image.height(), cols, rows))
    )]
    pub fn detect(
        &self,
        image: &PixelView<'_>,
        boundary: &Boundary,
        cols: usize,
        rows: usize,
    ) -> Result<PunchDetection, DetectError> {
        if cols == 0 || rows == 0 {
            return Err(DetectError::InvalidGridSize { cols, rows });
        }
        let patch = CoonsPatch::new(boundary, cols, rows)?;

        let s = self.params.samples_per_cell;
        let rectified = rectify(image, &patch, s);

        let window_radius = (self.params.neighborhood_radius * s as f32).round().max(3.0) as usize;
        let mask = adaptive_threshold(&rectified, window_radius, self.params.sensitivity);
        debug!(
            "threshold: {} foreground px of {}",
            mask.foreground_count(),
            mask.data.len()
        );

        let raw_blobs = label_components(&mask);
        let blobs = filter_blobs(raw_blobs, s, self.params.blob_size_percent);

        let extent_x = (cols * s) as f32;
        let extent_y = (rows * s) as f32;
        let min_separation = self.params.min_separation_factor * s as f32;

        let xs: Vec<f32> = blobs.iter().map(|b| b.center.x).collect();
        let ys: Vec<f32> = blobs.iter().map(|b| b.center.y).collect();
        let col_centers = fit_axis(&xs, cols, extent_x, min_separation);
        let row_centers = fit_axis(&ys, rows, extent_y, min_separation);

        let grid = assign_blobs(
            &blobs,
            &col_centers,
            &row_centers,
            self.params.assign_threshold_factor,
            s as f32,
        );
        debug!(
            "assigned {} punches from {} blobs on a {cols}x{rows} grid",
            grid.punched_count(),
            blobs.len()
        );

        Ok(PunchDetection {
            grid,
            col_centers,
            row_centers,
            blobs,
            cell_px: s,
        })
    }
}
