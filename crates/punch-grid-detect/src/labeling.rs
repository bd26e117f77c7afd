use crate::BinaryMask;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A connected component of foreground pixels in the rectified frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    /// Centroid in rectified pixels.
    pub center: Point2<f32>,
    /// Pixel count.
    pub area: u32,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Blob {
    #[inline]
    pub fn bbox_width(&self) -> u32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn bbox_height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// Union-find over provisional labels. `find` uses path halving, which keeps
/// the trees flat enough without a second rank array.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Label 0 is the background and is never unioned.
        Self { parent: vec![0] }
    }

    fn make_label(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Smaller root wins so labels stay stable across merges.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Two-pass 4-connectivity connected-component labeling.
///
/// Pass 1 scans row-major, assigning provisional labels from the left and
/// up neighbors and recording label equivalences. Pass 2 resolves every
/// pixel to its root and accumulates centroid sums, area, and a tight
/// bounding box per component. Blob order follows the first pixel of each
/// component in scan order, so output is deterministic.
pub fn label_components(mask: &BinaryMask) -> Vec<Blob> {
    let w = mask.width;
    let h = mask.height;
    let mut labels = vec![0u32; w * h];
    let mut uf = UnionFind::new();

    // Pass 1: provisional labels + equivalences.
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if mask.data[idx] == 0 {
                continue;
            }

            let left = if x > 0 { labels[idx - 1] } else { 0 };
            let up = if y > 0 { labels[idx - w] } else { 0 };

            labels[idx] = match (left, up) {
                (0, 0) => uf.make_label(),
                (l, 0) => l,
                (0, u) => u,
                (l, u) if l == u => l,
                (l, u) => {
                    uf.union(l, u);
                    l
                }
            };
        }
    }

    // Pass 2: resolve roots and accumulate per-component statistics.
    struct Accum {
        sum_x: u64,
        sum_y: u64,
        area: u32,
        min_x: u32,
        max_x: u32,
        min_y: u32,
        max_y: u32,
    }

    let mut slot_of_root = vec![u32::MAX; uf.parent.len()];
    let mut accums: Vec<Accum> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]);

            let slot = if slot_of_root[root as usize] == u32::MAX {
                let slot = accums.len() as u32;
                slot_of_root[root as usize] = slot;
                accums.push(Accum {
                    sum_x: 0,
                    sum_y: 0,
                    area: 0,
                    min_x: u32::MAX,
                    max_x: 0,
                    min_y: u32::MAX,
                    max_y: 0,
                });
                slot
            } else {
                slot_of_root[root as usize]
            };

            let a = &mut accums[slot as usize];
            a.sum_x += x as u64;
            a.sum_y += y as u64;
            a.area += 1;
            a.min_x = a.min_x.min(x as u32);
            a.max_x = a.max_x.max(x as u32);
            a.min_y = a.min_y.min(y as u32);
            a.max_y = a.max_y.max(y as u32);
        }
    }

    accums
        .into_iter()
        .map(|a| Blob {
            center: Point2::new(
                a.sum_x as f32 / a.area as f32,
                a.sum_y as f32 / a.area as f32,
            ),
            area: a.area,
            min_x: a.min_x,
            max_x: a.max_x,
            min_y: a.min_y,
            max_y: a.max_y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&[u8]]) -> BinaryMask {
        let height = rows.len();
        let width = rows[0].len();
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend_from_slice(row);
        }
        BinaryMask {
            width,
            height,
            data,
        }
    }

    #[test]
    fn empty_mask_yields_no_blobs() {
        let mask = mask_from_rows(&[&[0, 0], &[0, 0]]);
        assert!(label_components(&mask).is_empty());
    }

    #[test]
    fn two_separate_components() {
        let mask = mask_from_rows(&[
            &[1, 1, 0, 0, 1],
            &[1, 1, 0, 0, 1],
            &[0, 0, 0, 0, 0],
        ]);
        let blobs = label_components(&mask);
        assert_eq!(blobs.len(), 2);

        assert_eq!(blobs[0].area, 4);
        assert_eq!(blobs[0].center, Point2::new(0.5, 0.5));
        assert_eq!((blobs[0].min_x, blobs[0].max_x), (0, 1));

        assert_eq!(blobs[1].area, 2);
        assert_eq!(blobs[1].center, Point2::new(4.0, 0.5));
    }

    #[test]
    fn u_shape_merges_into_one_component() {
        // The two arms get separate provisional labels and merge through
        // the bottom row.
        let mask = mask_from_rows(&[
            &[1, 0, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let blobs = label_components(&mask);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 7);
        assert_eq!((blobs[0].min_x, blobs[0].max_x), (0, 2));
        assert_eq!((blobs[0].min_y, blobs[0].max_y), (0, 2));
    }

    #[test]
    fn diagonal_touch_is_not_connected() {
        let mask = mask_from_rows(&[
            &[1, 0],
            &[0, 1],
        ]);
        assert_eq!(label_components(&mask).len(), 2);
    }

    #[test]
    fn single_pixel_blob_has_zero_extent_bbox() {
        let mask = mask_from_rows(&[&[0, 1], &[0, 0]]);
        let blobs = label_components(&mask);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].bbox_width(), 0);
        assert_eq!(blobs[0].bbox_height(), 0);
        assert_eq!(blobs[0].center, Point2::new(1.0, 0.0));
    }
}
