use punch_grid_core::{GrayImage, PixelView};
use punch_grid_surface::CoonsPatch;

/// Gray value written for samples that fall outside the source image.
const MISS_GRAY: u8 = 128;

/// Resample the source image onto a regular grid-space lattice.
///
/// The output is `cols·s × rows·s` pixels, `s` samples per cell. Each output
/// pixel `(x, y)` maps grid coordinates `(x/s, y/s)` through the patch and
/// reads the source pixel it lands on (floor). Working in this frame makes a
/// punch a roughly circular blob of known size wherever it sits on the card,
/// so one size prior serves the whole grid.
pub fn rectify(src: &PixelView<'_>, patch: &CoonsPatch, s: usize) -> GrayImage {
    let out_w = patch.cols() * s;
    let out_h = patch.rows() * s;
    let mut out = GrayImage::filled(out_w, out_h, MISS_GRAY);

    let inv_s = 1.0 / s as f64;
    for y in 0..out_h {
        let r = y as f64 * inv_s;
        for x in 0..out_w {
            let c = x as f64 * inv_s;
            let p = patch.map(c, r);
            let xi = p.x.floor() as i64;
            let yi = p.y.floor() as i64;
            if src.contains(xi, yi) {
                out.set(x, y, src.gray_at(xi as usize, yi as usize));
            }
        }
    }

    out
}
