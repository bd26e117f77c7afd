//! Curvilinear boundary model for a photographed card.
//!
//! Four corners plus up to five midpoints per edge define four smooth
//! boundary curves; a Coons patch over those curves maps logical grid
//! coordinates into the image plane and back.

mod arclen;
mod boundary;
mod coons;
mod spline;

pub use arclen::ArcTable;
pub use boundary::{Boundary, BoundaryError, Edge, MAX_EDGE_MIDPOINTS};
pub use coons::CoonsPatch;
pub use spline::CatmullRom;
