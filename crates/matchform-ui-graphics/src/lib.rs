//! Pure math/data for drawing & units in matchform
//!
//! This crate contains geometry primitives, colors and the graphics layer
//! transform used by the draw pass.

mod color;
mod geometry;
mod layer;

pub use color::*;
pub use geometry::*;
pub use layer::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::layer::{GraphicsLayer, LayerTransform};
}
