//! Rendering geometry
//!
//! Turns published snapshots into colored triangle lists. Presenting them
//! is left to the windowing front end.

pub mod shapes;
pub mod vertex;

pub use shapes::{Frame, filled_square, frame};
pub use vertex::{Vertex, colors};
