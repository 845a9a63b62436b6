//! Built-in measure policies for stacking containers.

use crate::{Alignment, Constraints, HorizontalAlignment, MeasurePolicy, MeasureResult, Measurable};
use matchform_ui_graphics::{Point, Size};
use smallvec::SmallVec;

/// Stacks children on top of each other, aligned inside the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMeasurePolicy {
    pub alignment: Alignment,
}

impl BoxMeasurePolicy {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }
}

impl MeasurePolicy for BoxMeasurePolicy {
    fn measure(
        &self,
        measurables: &mut [&mut dyn Measurable],
        constraints: Constraints,
    ) -> MeasureResult {
        let child_constraints = constraints.loosen();
        let sizes: SmallVec<[Size; 4]> = measurables
            .iter_mut()
            .map(|child| child.measure(child_constraints))
            .collect();

        let content = sizes.iter().fold(Size::ZERO, |acc, size| {
            Size::new(acc.width.max(size.width), acc.height.max(size.height))
        });
        let size = constraints.constrain_size(content);
        let placements = sizes
            .iter()
            .map(|child| self.alignment.align(size, *child))
            .collect();

        MeasureResult::new(size, placements)
    }
}

/// Places children top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnMeasurePolicy {
    pub spacing: f32,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnMeasurePolicy {
    pub fn new(spacing: f32, horizontal_alignment: HorizontalAlignment) -> Self {
        Self {
            spacing,
            horizontal_alignment,
        }
    }
}

impl MeasurePolicy for ColumnMeasurePolicy {
    fn measure(
        &self,
        measurables: &mut [&mut dyn Measurable],
        constraints: Constraints,
    ) -> MeasureResult {
        let count = measurables.len();
        let mut remaining = constraints.max_height;
        let mut sizes: SmallVec<[Size; 4]> = SmallVec::with_capacity(count);

        for (index, child) in measurables.iter_mut().enumerate() {
            let child_constraints = Constraints::loose(constraints.max_width, remaining.max(0.0));
            let size = child.measure(child_constraints);
            remaining -= size.height;
            if index + 1 < count {
                remaining -= self.spacing;
            }
            sizes.push(size);
        }

        let spacing_total = self.spacing * count.saturating_sub(1) as f32;
        let content = Size::new(
            sizes.iter().map(|s| s.width).fold(0.0, f32::max),
            sizes.iter().map(|s| s.height).sum::<f32>() + spacing_total,
        );
        let size = constraints.constrain_size(content);

        let mut y = 0.0;
        let placements = sizes
            .iter()
            .map(|child| {
                let x = self.horizontal_alignment.align(size.width, child.width);
                let point = Point::new(x, y);
                y += child.height + self.spacing;
                point
            })
            .collect();

        MeasureResult::new(size, placements)
    }
}

#[cfg(test)]
#[path = "tests/policies_tests.rs"]
mod tests;
