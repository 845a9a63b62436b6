use super::*;
use std::cell::Cell;

#[test]
fn then_keeps_the_receiver_outside() {
    let inner = Modifier::empty().padding(4.0).scale(2.0);
    let chain = Modifier::empty().fixed_size().then(inner);
    assert_eq!(chain.describe(), vec!["fixedSize", "padding", "graphicsLayer"]);
    assert_eq!(chain.len(), 3);
}

#[test]
fn empty_modifier_has_no_elements() {
    let modifier = Modifier::empty();
    assert!(modifier.is_empty());
    assert!(modifier.elements().is_empty());
}

#[test]
fn size_helpers_only_constrain_their_axis() {
    let modifier = Modifier::empty().width(10.0).height(20.0);
    match modifier.elements() {
        [ModifierElement::Size {
            width: Some(w),
            height: None,
        }, ModifierElement::Size {
            width: None,
            height: Some(h),
        }] => {
            assert_eq!(*w, 10.0);
            assert_eq!(*h, 20.0);
        }
        other => panic!("unexpected elements {other:?}"),
    }
}

#[test]
fn fill_variants_flag_their_axes() {
    let modifier = Modifier::empty()
        .fill_max_size()
        .fill_max_width()
        .fill_max_height();
    let flags: Vec<(bool, bool)> = modifier
        .elements()
        .iter()
        .map(|element| match element {
            ModifierElement::Fill { width, height } => (*width, *height),
            other => panic!("unexpected element {other:?}"),
        })
        .collect();
    assert_eq!(flags, vec![(true, true), (true, false), (false, true)]);
}

#[test]
fn dynamic_layer_is_read_on_every_resolve() {
    let scale = Rc::new(Cell::new(1.0_f32));
    let read = Rc::clone(&scale);
    let modifier = Modifier::empty().graphics_layer_with(move || GraphicsLayer::scaled(read.get()));

    let ModifierElement::GraphicsLayer(source) = &modifier.elements()[0] else {
        panic!("expected a graphics layer");
    };
    assert_eq!(source.resolve().scale, 1.0);
    scale.set(3.0);
    assert_eq!(source.resolve().scale, 3.0);
}

#[test]
fn debug_output_hides_closures() {
    let modifier = Modifier::empty()
        .on_size_changed(|_| {})
        .padding_symmetric(2.0, 1.0);
    let text = format!("{modifier:?}");
    assert!(text.contains("OnSizeChanged(..)"));
    assert!(text.contains("Padding"));
}
