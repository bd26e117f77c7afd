use punch_grid_core::GrayImage;

/// Binary foreground mask with the same dimensions as its source raster.
/// One byte per pixel, `1` = foreground (dark mark).
#[derive(Clone, Debug)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }
}

/// Summed-area table with a zero border row/column, so any rectangle sum is
/// four lookups.
struct IntegralImage {
    width: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    fn build(src: &GrayImage) -> Self {
        let w = src.width + 1;
        let h = src.height + 1;
        let mut sums = vec![0u64; w * h];

        for y in 0..src.height {
            let mut row_sum = 0u64;
            for x in 0..src.width {
                row_sum += src.get(x, y) as u64;
                sums[(y + 1) * w + (x + 1)] = sums[y * w + (x + 1)] + row_sum;
            }
        }

        Self { width: w, sums }
    }

    /// Sum over the inclusive pixel rectangle `[x0, x1] × [y0, y1]`.
    #[inline]
    fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
        let w = self.width;
        self.sums[(y1 + 1) * w + (x1 + 1)] + self.sums[y0 * w + x0]
            - self.sums[y0 * w + (x1 + 1)]
            - self.sums[(y1 + 1) * w + x0]
    }
}

/// Binarize by comparing each pixel to the mean of a square window around
/// it, clipped to the image. A pixel is foreground iff its value is more
/// than `offset` gray levels below that local mean.
///
/// Local comparison keeps the decision stable under the smooth lighting
/// gradients a photographed card always carries; a global cutoff would trade
/// one side of the card against the other.
pub fn adaptive_threshold(src: &GrayImage, window_radius: usize, offset: f32) -> BinaryMask {
    let integral = IntegralImage::build(src);
    let mut data = vec![0u8; src.width * src.height];

    for y in 0..src.height {
        let y0 = y.saturating_sub(window_radius);
        let y1 = (y + window_radius).min(src.height - 1);
        for x in 0..src.width {
            let x0 = x.saturating_sub(window_radius);
            let x1 = (x + window_radius).min(src.width - 1);

            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let mean = integral.rect_sum(x0, y0, x1, y1) as f64 / count;

            if (src.get(x, y) as f64) < mean - offset as f64 {
                data[y * src.width + x] = 1;
            }
        }
    }

    BinaryMask {
        width: src.width,
        height: src.height,
        data,
    }
}
