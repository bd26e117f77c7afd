//! High-level facade crate for the `punch-grid-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying pipeline crates
//! - (feature-gated) helpers that adapt `image`-crate buffers into the
//!   pipeline's borrowed pixel views and run a detection end to end.

pub use punch_grid_core as core;
pub use punch_grid_detect as detect;
pub use punch_grid_export as export;
pub use punch_grid_surface as surface;

pub use punch_grid_core::{CellGrid, GrayImage, PixelFormat, PixelView};
pub use punch_grid_detect::{Blob, DetectError, DetectParams, PunchDetection, PunchDetector};
pub use punch_grid_surface::{Boundary, CoonsPatch, Edge};

#[cfg(feature = "image")]
pub mod digitize;
