//! Punch detection pipeline.
//!
//! Stages, in data-flow order: rectify the card onto a regular grid-space
//! raster, binarize with an adaptive local threshold, extract connected
//! foreground blobs, filter them by size and shape, recover row/column
//! centers from the surviving centroids, and assign blobs to grid cells.
//!
//! The pipeline is a pure function of its inputs: same image, boundary,
//! dimensions, and parameters always produce the same grid. Interactive
//! hosts are expected to debounce parameter changes and cache results
//! keyed on the inputs; nothing here retains state between runs.

mod assign;
mod error;
mod filter;
mod labeling;
mod lattice;
mod params;
mod pipeline;
mod rectify;
mod threshold;

pub use assign::assign_blobs;
pub use error::DetectError;
pub use filter::filter_blobs;
pub use labeling::{label_components, Blob};
pub use lattice::fit_axis;
pub use params::DetectParams;
pub use pipeline::{PunchDetection, PunchDetector};
pub use rectify::rectify;
pub use threshold::{adaptive_threshold, BinaryMask};
