use matchform_testing::prelude::*;
use matchform_ui::{
    apply_matched_transform_effect, AnimationSpec, ColumnSpec, Color, Namespace, Node, Rect, Size,
};

const VIEWPORT: Size = Size::new(400.0, 300.0);

fn bubbles(show_first: bool, namespace: &Namespace) -> Node {
    let content = if show_first {
        Node::leaf("👋 Hello", Size::new(40.0, 20.0))
            .color(Color::BLUE)
            .key("bubble1")
    } else {
        Node::leaf("World 🎉", Size::new(80.0, 40.0))
            .color(Color::GREEN)
            .key("bubble2")
    };
    let spacer_height = if show_first { 0.0 } else { 100.0 };
    Node::column(
        ColumnSpec::new(),
        [
            Node::leaf("spacer", Size::new(10.0, spacer_height)),
            apply_matched_transform_effect(content, "bubbleTransition", namespace),
        ],
    )
}

#[test]
fn both_views_share_the_interpolated_rect_every_frame() {
    let mut test = TestHost::new(VIEWPORT);
    let namespace = test.namespace();
    test.set_content(bubbles(true, &namespace)).unwrap();
    test.pump().unwrap();

    test.animate_to(AnimationSpec::linear(300), bubbles(false, &namespace));

    let mut last_y = -1.0_f32;
    let mut last_alpha = -1.0_f32;
    let mut frames_with_both = 0;
    for _ in 0..18 {
        let scene = test.pump().unwrap().clone();
        let outgoing = scene.find("👋 Hello").expect("outgoing bubble during transition");
        if let Some(incoming) = scene.find("World 🎉") {
            assert_rect_approx_eq(incoming.rect(), outgoing.rect(), 1e-3, "shared rect");
            assert_approx_eq(incoming.alpha() + outgoing.alpha(), 1.0, 1e-4, "crossfade");
            assert!(incoming.alpha() > last_alpha);
            last_alpha = incoming.alpha();
            frames_with_both += 1;
        }
        assert!(outgoing.rect().y >= last_y);
        last_y = outgoing.rect().y;
    }
    assert_eq!(frames_with_both, 17);
    assert_eq!(test.host().active_transitions(), 1);

    test.pump().unwrap();
    assert_eq!(test.host().active_transitions(), 0);
    let scene = test.scene();
    assert!(scene.find("👋 Hello").is_none());
    let settled = scene.find("World 🎉").unwrap();
    assert_rect_approx_eq(settled.rect(), Rect::new(0.0, 100.0, 80.0, 40.0), 1e-3, "settled");
    assert_eq!(settled.alpha(), 1.0);
}

#[test]
fn host_goes_idle_after_the_transition() {
    let mut test = TestHost::new(VIEWPORT);
    let namespace = test.namespace();
    test.set_content(bubbles(true, &namespace)).unwrap();
    test.pump_until_idle(10).unwrap();
    assert!(!test.host().should_render());

    test.animate_to(AnimationSpec::linear(300).speed(0.5), bubbles(false, &namespace));
    let frames = test.pump_until_idle(200).unwrap();
    assert!(frames > 36, "only {frames} frames");
    assert!(frames < 200);
    assert!(!test.host().should_render());
    assert_eq!(test.host().active_transitions(), 0);
}

#[test]
fn toggling_back_and_forth_never_loses_a_bubble() {
    let mut test = TestHost::new(VIEWPORT);
    let namespace = test.namespace();
    test.set_content(bubbles(true, &namespace)).unwrap();
    test.pump().unwrap();

    let mut show_first = true;
    for _ in 0..3 {
        show_first = !show_first;
        test.animate_to(AnimationSpec::linear(300), bubbles(show_first, &namespace));
        for _ in 0..5 {
            let scene = test.pump().unwrap();
            assert!(!scene.is_empty());
            assert!(scene.find("👋 Hello").is_some() || scene.find("World 🎉").is_some());
        }
        assert_eq!(test.host().active_transitions(), 1);
    }

    test.pump_until_idle(100).unwrap();
    let scene = test.scene();
    assert!(scene.find("👋 Hello").is_none());
    assert_rect_approx_eq(
        scene.find("World 🎉").unwrap().rect(),
        Rect::new(0.0, 100.0, 80.0, 40.0),
        1e-3,
        "final",
    );
}
