use super::*;
use crate::node::{child_identity, root_identity};
use crate::ColumnSpec;

#[test]
fn scale_is_one_for_equal_sizes() {
    let size = Some(Size::new(40.0, 20.0));
    assert_eq!(matched_scale(size, size), 1.0);
}

#[test]
fn scale_averages_the_axis_ratios() {
    let scale = matched_scale(Some(Size::new(40.0, 20.0)), Some(Size::new(80.0, 20.0)));
    assert_eq!(scale, 1.5);
}

#[test]
fn zero_intrinsic_dimension_divides_by_one() {
    let scale = matched_scale(Some(Size::new(0.0, 20.0)), Some(Size::new(50.0, 20.0)));
    assert_eq!(scale, 25.5);
    assert!(scale.is_finite());
}

#[test]
fn negative_intrinsic_dimension_divides_by_one() {
    let scale = matched_scale(Some(Size::new(-5.0, 20.0)), Some(Size::new(50.0, 20.0)));
    assert_eq!(scale, 25.5);
}

#[test]
fn scale_is_one_until_both_sizes_are_known() {
    assert_eq!(matched_scale(None, None), 1.0);
    assert_eq!(matched_scale(Some(Size::new(10.0, 10.0)), None), 1.0);
    assert_eq!(matched_scale(None, Some(Size::new(10.0, 10.0))), 1.0);
}

#[test]
fn effect_scale_tracks_its_slots() {
    let namespace = Namespace::new();
    let effect = MatchedTransformEffect::new("X", &namespace);
    assert_eq!(effect.scale(), 1.0);

    effect.intrinsic_slot().set_value(Some(Size::new(40.0, 20.0)));
    assert_eq!(effect.scale(), 1.0);
    effect.transformed_slot().set_value(Some(Size::new(80.0, 20.0)));
    assert_eq!(effect.scale(), 1.5);
}

#[test]
fn separate_effects_do_not_share_slots() {
    let namespace = Namespace::new();
    let first = MatchedTransformEffect::new("X", &namespace);
    let second = MatchedTransformEffect::new("X", &namespace);
    assert_eq!(first.key(), second.key());

    first.intrinsic_slot().set_value(Some(Size::new(1.0, 1.0)));
    assert_eq!(second.intrinsic_size(), None);
}

#[test]
fn apply_builds_the_pipeline_around_existing_modifiers() {
    let namespace = Namespace::new();
    let effect = MatchedTransformEffect::new("X", &namespace);
    let content = Node::leaf("text", Size::new(40.0, 20.0)).modifier(Modifier::empty().padding(2.0));

    let node = effect.apply(content);
    assert_eq!(
        node.modifiers().describe(),
        vec![
            "fixedSize",
            "sharedBounds",
            "observeSize",
            "fill",
            "fixedSize",
            "observeSize",
            "graphicsLayer",
            "padding",
        ]
    );
}

#[test]
fn free_function_defers_state_to_the_host() {
    let namespace = Namespace::new();
    let node = apply_matched_transform_effect(
        Node::leaf("a", Size::ZERO).modifier(Modifier::empty().padding(2.0)),
        "X",
        &namespace,
    );
    assert_eq!(node.modifiers().describe(), vec!["matchedTransform", "padding"]);
    assert_eq!(namespace.remembered_effects(), 0);
}

#[test]
fn binding_resolves_effects_by_structural_identity() {
    let namespace = Namespace::new();
    let holder = |label: &str| apply_matched_transform_effect(Node::leaf(label, Size::ZERO), "X", &namespace);
    let mut tree = Node::column(ColumnSpec::new(), [holder("a"), holder("b")]);
    let root = root_identity(&tree);

    bind_matched_effects(&mut tree, root);
    let mut rebuilt = Node::column(ColumnSpec::new(), [holder("a"), holder("b")]);
    bind_matched_effects(&mut rebuilt, root);

    assert_eq!(namespace.remembered_effects(), 2);
    for child in tree.children() {
        assert_eq!(child.modifiers().len(), 7);
        assert!(!child.modifiers().describe().contains(&"matchedTransform"));
    }

    let key = namespace.key("X");
    let first = namespace.remembered_effect(key.clone(), child_identity(root, 0, None));
    let second = namespace.remembered_effect(key, child_identity(root, 1, None));
    first.intrinsic_slot().set_value(Some(Size::new(4.0, 4.0)));
    assert_eq!(second.intrinsic_size(), None);
    assert_eq!(namespace.remembered_effects(), 2);
}
