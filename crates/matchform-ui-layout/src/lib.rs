//! Layout contracts & policies for matchform

mod alignment;
mod constraints;
mod core;
mod policies;

pub use alignment::*;
pub use constraints::*;
pub use core::*;
pub use policies::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
    pub use crate::constraints::Constraints;
    pub use crate::core::{MeasurePolicy, MeasureResult, Measurable};
    pub use crate::policies::{BoxMeasurePolicy, ColumnMeasurePolicy};
}
