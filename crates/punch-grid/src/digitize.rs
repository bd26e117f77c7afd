//! Adapters between `image`-crate buffers and the detection pipeline.

use crate::{
    Boundary, DetectError, DetectParams, PixelFormat, PixelView, PunchDetection, PunchDetector,
};

/// Wrap an `image::GrayImage` in the pipeline's borrowed view type.
pub fn gray_view(img: &image::GrayImage) -> Result<PixelView<'_>, DetectError> {
    Ok(PixelView::packed(
        img.width() as usize,
        img.height() as usize,
        PixelFormat::Gray8,
        img.as_raw(),
    )?)
}

/// Wrap an `image::RgbImage` in the pipeline's borrowed view type.
pub fn rgb_view(img: &image::RgbImage) -> Result<PixelView<'_>, DetectError> {
    Ok(PixelView::packed(
        img.width() as usize,
        img.height() as usize,
        PixelFormat::Rgb8,
        img.as_raw(),
    )?)
}

/// Straight-edged boundary covering a whole `width × height` image.
pub fn full_frame_boundary(width: u32, height: u32) -> Boundary {
    Boundary::rectangle(width.saturating_sub(1) as f64, height.saturating_sub(1) as f64)
}

/// Decode-agnostic convenience: grayscale the input and run one detection.
pub fn digitize(
    img: &image::DynamicImage,
    boundary: &Boundary,
    cols: usize,
    rows: usize,
    params: &DetectParams,
) -> Result<PunchDetection, DetectError> {
    let gray = img.to_luma8();
    let view = gray_view(&gray)?;
    PunchDetector::new(params.clone()).detect(&view, boundary, cols, rows)
}
