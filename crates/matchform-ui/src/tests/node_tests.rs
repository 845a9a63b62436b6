use super::*;
use crate::modifier::Modifier;

#[test]
fn wrap_puts_elements_outside_and_modifier_inside() {
    let node = Node::leaf("a", Size::new(10.0, 10.0))
        .modifier(Modifier::empty().padding(1.0))
        .wrap(Modifier::empty().fixed_size())
        .modifier(Modifier::empty().scale(2.0));
    assert_eq!(
        node.modifiers().describe(),
        vec!["fixedSize", "padding", "graphicsLayer"]
    );
}

#[test]
fn explicit_key_replaces_the_structural_index() {
    let a = Node::leaf("a", Size::ZERO).key("bubble1");
    let b = Node::leaf("b", Size::ZERO).key("bubble2");

    assert_ne!(
        child_identity(ROOT_SEED, 0, a.view_key()),
        child_identity(ROOT_SEED, 0, b.view_key())
    );
    assert_eq!(
        child_identity(ROOT_SEED, 0, a.view_key()),
        child_identity(ROOT_SEED, 3, a.view_key())
    );
    assert_ne!(
        child_identity(ROOT_SEED, 0, None),
        child_identity(ROOT_SEED, 1, None)
    );
}

#[test]
fn unkeyed_views_in_the_same_slot_share_identity() {
    let first = Node::leaf("a", Size::ZERO);
    let second = Node::leaf("b", Size::ZERO);
    assert_eq!(root_identity(&first), root_identity(&second));
}

#[test]
fn exiting_identity_differs_from_the_original() {
    let identity = root_identity(&Node::leaf("a", Size::ZERO).key(1));
    assert_ne!(exiting_identity(identity), identity);
}

#[test]
fn color_only_applies_to_leaves() {
    let leaf = Node::leaf("a", Size::ZERO).color(Color::BLUE);
    assert!(matches!(leaf.kind(), NodeKind::Leaf { color, .. } if *color == Color::BLUE));

    let container = Node::column(ColumnSpec::new().spacing(4.0), [leaf]).color(Color::GREEN);
    assert!(matches!(container.kind(), NodeKind::Column(spec) if spec.spacing == 4.0));
    assert_eq!(container.children().len(), 1);
    assert_eq!(container.children()[0].label(), Some("a"));
}
