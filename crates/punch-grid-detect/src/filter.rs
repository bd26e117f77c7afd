use crate::Blob;
use log::debug;

/// Largest accepted bounding-box aspect ratio.
const MAX_ASPECT: f32 = 5.0;
/// Accepted area band around the expected punch area.
const MIN_AREA_FACTOR: f32 = 0.15;
const MAX_AREA_FACTOR: f32 = 5.0;

/// Drop blobs whose area or shape is inconsistent with a punch.
///
/// `expected` is the punch area implied by the cell size and the
/// user-supplied percentage. The area band is deliberately wide so lighting
/// variation does not starve the lattice fitter; the aspect cap is what
/// rejects cracks, scratches, and card-edge slivers.
pub fn filter_blobs(blobs: Vec<Blob>, samples_per_cell: usize, blob_size_percent: f32) -> Vec<Blob> {
    let cell_area = (samples_per_cell * samples_per_cell) as f32;
    let expected = cell_area * blob_size_percent / 100.0;

    let total = blobs.len();
    let kept: Vec<Blob> = blobs
        .into_iter()
        .filter(|b| {
            let area = b.area as f32;
            if area < MIN_AREA_FACTOR * expected || area > MAX_AREA_FACTOR * expected {
                return false;
            }
            let bw = b.bbox_width() as f32;
            let bh = b.bbox_height() as f32;
            bw.max(bh) / bw.min(bh).max(1.0) <= MAX_ASPECT
        })
        .collect();

    debug!("blob filter kept {}/{total} (expected area {expected:.1})", kept.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn blob(area: u32, w: u32, h: u32) -> Blob {
        Blob {
            center: Point2::new(0.0, 0.0),
            area,
            min_x: 0,
            max_x: w,
            min_y: 0,
            max_y: h,
        }
    }

    #[test]
    fn keeps_blob_near_expected_area() {
        // s=10, 50% => expected 50; band [7.5, 250].
        let kept = filter_blobs(vec![blob(60, 8, 8)], 10, 50.0);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn rejects_specks_and_floods() {
        let kept = filter_blobs(vec![blob(3, 1, 1), blob(600, 30, 30)], 10, 50.0);
        assert!(kept.is_empty());
    }

    #[test]
    fn rejects_elongated_scratches() {
        // Area is inside the band but the bbox is 40x2.
        let kept = filter_blobs(vec![blob(80, 40, 2)], 10, 50.0);
        assert!(kept.is_empty());
    }

    #[test]
    fn single_row_blob_uses_the_unit_floor() {
        // bbox height 0: the min side is floored to 1, aspect = width.
        let kept = filter_blobs(vec![blob(8, 4, 0)], 10, 50.0);
        assert_eq!(kept.len(), 1);
        let dropped = filter_blobs(vec![blob(8, 6, 0)], 10, 50.0);
        assert!(dropped.is_empty());
    }
}
