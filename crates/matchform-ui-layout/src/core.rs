//! Measurement contracts shared by the layout engine and its policies.

use crate::Constraints;
use matchform_ui_graphics::{Point, Size};
use smallvec::SmallVec;

/// A child that can be measured once per pass.
///
/// The engine keeps whatever it needs to place the child later; policies only
/// see the resulting size.
pub trait Measurable {
    fn measure(&mut self, constraints: Constraints) -> Size;
}

/// Outcome of a measure policy: the parent's own size and one offset per child,
/// in the same order the children were handed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasureResult {
    pub size: Size,
    pub placements: SmallVec<[Point; 4]>,
}

impl MeasureResult {
    pub fn new(size: Size, placements: SmallVec<[Point; 4]>) -> Self {
        Self { size, placements }
    }
}

/// Strategy that measures a node's children and positions them.
pub trait MeasurePolicy {
    fn measure(
        &self,
        measurables: &mut [&mut dyn Measurable],
        constraints: Constraints,
    ) -> MeasureResult;
}
