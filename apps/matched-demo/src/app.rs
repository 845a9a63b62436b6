//! The two-bubble toggle.

use matchform_animation::AnimationSpec;
use matchform_ui::{
    apply_matched_transform_effect, Alignment, BoxSpec, Color, EdgeInsets, Modifier, Namespace,
    Node, Size,
};

pub const TRANSITION_ID: &str = "bubbleTransition";
pub const SCREEN: Size = Size::new(320.0, 480.0);

/// Rough text metrics for the leaf stand-ins: 8 units per character, 16 tall.
fn text(label: &str) -> Node {
    let width = label.chars().count() as f32 * 8.0;
    Node::leaf(label, Size::new(width, 16.0))
}

fn bubble(label: &str, color: Color, padding: EdgeInsets) -> Node {
    text(label)
        .color(color)
        .modifier(Modifier::empty().padding_insets(padding))
}

/// Root view: a compact bubble at the top or a roomier one at the bottom.
pub fn bubbles(show_first: bool, namespace: &Namespace) -> Node {
    let content = if show_first {
        bubble("👋 Hello", Color::BLUE, EdgeInsets::symmetric(5.0, 2.0)).key("bubble1")
    } else {
        bubble("World 🎉", Color::GREEN, EdgeInsets::uniform(30.0)).key("bubble2")
    };
    let content = apply_matched_transform_effect(content, TRANSITION_ID, namespace);

    let alignment = if show_first {
        Alignment::TOP_CENTER
    } else {
        Alignment::BOTTOM_CENTER
    };
    Node::boxed(BoxSpec::new().alignment(alignment), [content])
        .modifier(Modifier::empty().size(SCREEN))
}

/// Default animation slowed down by `speed`.
pub fn toggle_animation(speed: f32) -> AnimationSpec {
    AnimationSpec::default().speed(speed)
}
