//! View tree, layout and draw passes for matchform, plus the two helpers the
//! crate exists for: [`observe_size`] and [`MatchedTransformEffect`].
//!
//! A [`UiHost`] owns the current tree. Application code rebuilds the tree on
//! every state change and hands it to [`UiHost::render`] (or
//! [`UiHost::render_animated`] when the change should animate), then drives
//! frames with [`UiHost::frame`].

mod draw;
mod host;
mod key;
mod layout;
mod matched_transform;
pub mod modifier;
mod node;
mod shared_transition;
mod size_observer;

pub use draw::{DrawOp, Scene};
pub use host::{HostConfig, UiHost};
pub use key::{Namespace, SharedKey};
pub use layout::{LayoutBox, LayoutBoxKind, LayoutTree};
pub use matched_transform::{apply_matched_transform_effect, matched_scale, MatchedTransformEffect};
pub use modifier::{LayerSource, Modifier, ModifierElement};
pub use node::{BoxSpec, ColumnSpec, Node, NodeKind};
pub use shared_transition::TransitionRole;
pub use size_observer::{observe_size, size_observer_modifier, SizeSlot};

pub use matchform_animation::{AnimationSpec, Easing};
pub use matchform_core::{MutableState, NodeError, RuntimeHandle, State, Subscription};
pub use matchform_ui_graphics::{Color, EdgeInsets, GraphicsLayer, Point, Rect, Size};
pub use matchform_ui_layout::{Alignment, HorizontalAlignment, VerticalAlignment};
