use super::*;

struct MockMeasurable {
    size: Size,
    last_constraints: Option<Constraints>,
}

impl MockMeasurable {
    fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            last_constraints: None,
        }
    }
}

impl Measurable for MockMeasurable {
    fn measure(&mut self, constraints: Constraints) -> Size {
        self.last_constraints = Some(constraints);
        constraints.constrain_size(self.size)
    }
}

#[test]
fn box_policy_sizes_to_largest_child_and_aligns() {
    let mut small = MockMeasurable::new(20.0, 10.0);
    let mut large = MockMeasurable::new(60.0, 40.0);
    let policy = BoxMeasurePolicy::new(Alignment::CENTER);

    let mut children: [&mut dyn Measurable; 2] = [&mut small, &mut large];
    let result = policy.measure(&mut children, Constraints::loose(200.0, 200.0));

    assert_eq!(result.size, Size::new(60.0, 40.0));
    assert_eq!(result.placements[0], Point::new(20.0, 15.0));
    assert_eq!(result.placements[1], Point::ZERO);
}

#[test]
fn box_policy_loosens_child_constraints() {
    let mut child = MockMeasurable::new(20.0, 10.0);
    let policy = BoxMeasurePolicy::new(Alignment::BOTTOM_CENTER);

    let mut children: [&mut dyn Measurable; 1] = [&mut child];
    let result = policy.measure(&mut children, Constraints::tight(100.0, 50.0));

    assert_eq!(result.size, Size::new(100.0, 50.0));
    assert_eq!(child.last_constraints, Some(Constraints::loose(100.0, 50.0)));
    assert_eq!(result.placements[0], Point::new(40.0, 40.0));
}

#[test]
fn column_policy_stacks_with_spacing() {
    let mut first = MockMeasurable::new(50.0, 30.0);
    let mut second = MockMeasurable::new(80.0, 20.0);
    let policy = ColumnMeasurePolicy::new(5.0, HorizontalAlignment::CenterHorizontally);

    let mut children: [&mut dyn Measurable; 2] = [&mut first, &mut second];
    let result = policy.measure(&mut children, Constraints::loose(300.0, 300.0));

    assert_eq!(result.size, Size::new(80.0, 55.0));
    assert_eq!(result.placements[0], Point::new(15.0, 0.0));
    assert_eq!(result.placements[1], Point::new(0.0, 35.0));
    assert_eq!(
        second.last_constraints.map(|c| c.max_height),
        Some(300.0 - 30.0 - 5.0)
    );
}

#[test]
fn empty_column_takes_minimum_size() {
    let policy = ColumnMeasurePolicy::new(8.0, HorizontalAlignment::Start);
    let result = policy.measure(&mut [], Constraints::loose(100.0, 100.0));
    assert_eq!(result.size, Size::ZERO);
    assert!(result.placements.is_empty());
}
