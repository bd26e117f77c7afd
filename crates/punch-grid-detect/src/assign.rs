use crate::Blob;
use punch_grid_core::CellGrid;

/// Index of the axis position closest to `value`. The axis is sorted, so a
/// binary search narrows it to two candidates.
fn nearest_index(axis: &[f32], value: f32) -> usize {
    let hi = axis.partition_point(|&c| c < value);
    if hi == 0 {
        return 0;
    }
    if hi >= axis.len() {
        return axis.len() - 1;
    }
    if (value - axis[hi - 1]).abs() <= (axis[hi] - value).abs() {
        hi - 1
    } else {
        hi
    }
}

/// Mean gap of a sorted axis; `fallback` covers axes with fewer than two
/// entries.
fn average_spacing(axis: &[f32], fallback: f32) -> f32 {
    if axis.len() < 2 {
        return fallback;
    }
    (axis[axis.len() - 1] - axis[0]) / (axis.len() - 1) as f32
}

/// Map each blob to its nearest (row, column) lattice position and mark the
/// cell punched when the blob sits close enough to both centers.
///
/// "Close enough" is a fraction of the average lattice spacing on the
/// respective axis, so a stretched card keeps the same acceptance geometry
/// as a square one. Several blobs landing in one cell collapse to a single
/// punch.
pub fn assign_blobs(
    blobs: &[Blob],
    col_centers: &[f32],
    row_centers: &[f32],
    threshold_factor: f32,
    fallback_spacing: f32,
) -> CellGrid {
    let mut grid = CellGrid::new(col_centers.len(), row_centers.len());
    if col_centers.is_empty() || row_centers.is_empty() {
        return grid;
    }

    let col_limit = threshold_factor * average_spacing(col_centers, fallback_spacing);
    let row_limit = threshold_factor * average_spacing(row_centers, fallback_spacing);

    for blob in blobs {
        let col = nearest_index(col_centers, blob.center.x);
        let row = nearest_index(row_centers, blob.center.y);

        let dc = (blob.center.x - col_centers[col]).abs();
        let dr = (blob.center.y - row_centers[row]).abs();
        if dc < col_limit && dr < row_limit {
            grid.set(row, col, true);
        }
    }

    grid
}
