use punch_grid_core::PixelViewError;
use punch_grid_surface::BoundaryError;

/// Conditions under which a detection run cannot start.
///
/// Everything past these checks degrades inside the run instead of
/// failing it: a run that starts always yields a grid.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("grid dimensions must be positive (cols={cols}, rows={rows})")]
    InvalidGridSize { cols: usize, rows: usize },
    #[error(transparent)]
    Image(#[from] PixelViewError),
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}
