//! Core types for punched-card digitization.
//!
//! This crate is intentionally small and purely representational. It does
//! *not* depend on any concrete boundary model or detection stage.

mod grid;
mod image;

pub use grid::CellGrid;
pub use image::{GrayImage, PixelFormat, PixelView, PixelViewError};
