//! Serialization of a detected [`CellGrid`](punch_grid_core::CellGrid).
//!
//! Three formats: a plain `0`/`1` text dump, a 1-bit-per-cell PNG, and a
//! 24-bit uncompressed BMP. One output pixel per grid cell; punched cells
//! render black.

mod bmp;
mod png_out;
mod text;

pub use bmp::write_bmp;
pub use png_out::write_png;
pub use text::{grid_to_text, write_text};

/// Errors surfaced by the grid writers.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Png(#[from] png::EncodingError),
    #[error("cannot export an empty grid")]
    EmptyGrid,
}
