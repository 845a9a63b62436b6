use std::cell::RefCell;
use std::rc::Rc;

use matchform_testing::TestHost;
use matchform_ui::{observe_size, ColumnSpec, Modifier, MutableState, Node, Size, SizeSlot};

#[test]
fn observed_sizes_follow_layout_changes() {
    let mut test = TestHost::new(Size::new(300.0, 200.0));
    let slot: SizeSlot = MutableState::new(None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let _subscription = slot.subscribe(move |size| log.borrow_mut().push(*size));

    let tree = |padding: f32| {
        Node::column(
            ColumnSpec::new(),
            [observe_size(
                Node::leaf("label", Size::new(100.0, 20.0)).modifier(Modifier::empty().padding(padding)),
                &slot,
            )],
        )
    };

    test.set_content(tree(0.0)).unwrap();
    test.pump().unwrap();
    test.set_content(tree(0.0)).unwrap();
    test.set_content(tree(10.0)).unwrap();
    test.pump().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            Some(Size::new(100.0, 20.0)),
            Some(Size::new(120.0, 40.0)),
        ]
    );
}

#[test]
fn observed_size_respects_parent_constraints() {
    let mut test = TestHost::new(Size::new(50.0, 200.0));
    let slot: SizeSlot = MutableState::new(None);
    test.set_content(Node::leaf("wide", Size::new(100.0, 20.0)).observe_size(&slot))
        .unwrap();
    assert_eq!(slot.get(), Some(Size::new(50.0, 20.0)));
}

#[test]
fn replacing_the_slot_of_an_unchanged_view_fills_the_new_slot() {
    let mut test = TestHost::new(Size::new(300.0, 200.0));
    let first: SizeSlot = MutableState::new(None);
    let second: SizeSlot = MutableState::new(None);
    let tree = |slot: &SizeSlot| Node::leaf("label", Size::new(100.0, 20.0)).observe_size(slot);

    test.set_content(tree(&first)).unwrap();
    test.pump().unwrap();
    assert_eq!(first.get(), Some(Size::new(100.0, 20.0)));

    test.set_content(tree(&second)).unwrap();
    test.pump().unwrap();
    assert_eq!(second.get(), Some(Size::new(100.0, 20.0)));
}
