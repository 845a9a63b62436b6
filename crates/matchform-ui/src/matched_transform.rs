//! Matched transform effect.
//!
//! Marks a view as one endpoint of a matched transition and scales its
//! content so it appears to morph into the other endpoint rather than
//! crossfading between two differently sized frames.
//!
//! The effect wraps the content in this chain, outermost first:
//!
//! ```text
//! fixed_size -> shared_bounds(key) -> observe(transformed) -> fill_max_size
//!            -> fixed_size -> observe(intrinsic) -> graphics_layer(scale) -> content
//! ```
//!
//! While a transition runs, the shared bounds force the filled frame to the
//! interpolated size. The frame's size lands in the transformed slot. The
//! content is always measured at its ideal size, which lands in the intrinsic
//! slot, and the layer scales it by the average of the two axis ratios.
//!
//! Callers must uphold three things for the scale to mean anything. The two
//! endpoints are distinct views: they carry different keys or sit at
//! different positions. They are never in the tree at the same time; the
//! host keeps only the first holder of a key. Each endpoint's content
//! resolves to the same non-zero size on every pass, since the scale divides
//! by it.

use matchform_core::{MutableState, RuntimeHandle};
use matchform_ui_graphics::{GraphicsLayer, Size};

use crate::modifier::{Modifier, ModifierElement};
use crate::size_observer::size_observer_modifier;
use crate::{Namespace, Node, SharedKey, SizeSlot};

/// Scale applied to content of size `intrinsic` shown in a frame of size
/// `transformed`.
///
/// `1.0` until both sizes are known. Intrinsic dimensions below one unit
/// divide by one, so zero-sized content yields a large finite scale.
pub fn matched_scale(intrinsic: Option<Size>, transformed: Option<Size>) -> f32 {
    match (intrinsic, transformed) {
        (Some(intrinsic), Some(transformed)) => {
            let horizontal = transformed.width / intrinsic.width.max(1.0);
            let vertical = transformed.height / intrinsic.height.max(1.0);
            (horizontal + vertical) / 2.0
        }
        _ => 1.0,
    }
}

/// Per-view state of the effect: the transition key and two size slots.
///
/// Each participating view needs its own instance. Clones share the slots.
///
/// Using one instance on both endpoints, mounting both endpoints at once, or
/// wrapping content whose size changes between passes or is zero leaves the
/// slots describing the wrong view, and the scale with them.
#[derive(Clone, Debug)]
pub struct MatchedTransformEffect {
    key: SharedKey,
    intrinsic: SizeSlot,
    transformed: SizeSlot,
}

impl MatchedTransformEffect {
    pub fn new<ID>(id: ID, namespace: &Namespace) -> Self
    where
        ID: std::hash::Hash + Eq + std::fmt::Debug + 'static,
    {
        Self::for_key(namespace.key(id), namespace.runtime().cloned())
    }

    pub(crate) fn for_key(key: SharedKey, runtime: Option<RuntimeHandle>) -> Self {
        let slot = || match &runtime {
            Some(runtime) => MutableState::with_runtime(None, runtime.clone()),
            None => MutableState::new(None),
        };
        Self {
            key,
            intrinsic: slot(),
            transformed: slot(),
        }
    }

    pub fn key(&self) -> &SharedKey {
        &self.key
    }

    pub fn intrinsic_size(&self) -> Option<Size> {
        self.intrinsic.get()
    }

    pub fn transformed_size(&self) -> Option<Size> {
        self.transformed.get()
    }

    pub fn intrinsic_slot(&self) -> &SizeSlot {
        &self.intrinsic
    }

    pub fn transformed_slot(&self) -> &SizeSlot {
        &self.transformed
    }

    /// Current scale, recomputed from the slots on every call.
    pub fn scale(&self) -> f32 {
        matched_scale(self.intrinsic_size(), self.transformed_size())
    }

    /// The effect chain, outermost first, to sit outside the content's own
    /// modifiers.
    pub fn modifier(&self) -> Modifier {
        let intrinsic = self.intrinsic.clone();
        let transformed = self.transformed.clone();
        Modifier::empty()
            .fixed_size()
            .shared_bounds(self.key.clone())
            .then(size_observer_modifier(&self.transformed))
            .fill_max_size()
            .fixed_size()
            .then(size_observer_modifier(&self.intrinsic))
            .graphics_layer_with(move || {
                GraphicsLayer::scaled(matched_scale(intrinsic.get(), transformed.get()))
            })
    }

    pub fn apply(&self, content: Node) -> Node {
        content.wrap(self.modifier())
    }
}

/// Applies the effect under `id` in `namespace`, with state the namespace
/// remembers for the view.
///
/// The content gets a placeholder element. When the tree is handed to a
/// [`UiHost`](crate::UiHost), the host binds it to the effect remembered for
/// `(id, identity of the view)`, where the identity is the view's explicit
/// [`Node::key`] or else its position in the tree. Rebuilding the tree every
/// update therefore keeps each view's sizes, and two unkeyed endpoints at
/// different positions get separate state.
///
/// Endpoints must not share an identity, must never be in the tree together,
/// and must resolve to a stable non-zero size. Two unkeyed endpoints that
/// occupy the same position share one state and scale against each other's
/// sizes; give them distinct keys.
pub fn apply_matched_transform_effect<ID>(content: Node, id: ID, namespace: &Namespace) -> Node
where
    ID: std::hash::Hash + Eq + std::fmt::Debug + 'static,
{
    content.wrap(Modifier::with_element(ModifierElement::MatchedTransform {
        key: namespace.key(id),
        namespace: namespace.clone(),
    }))
}

/// Replaces every unbound effect in the tree under `root` with the effect
/// remembered for its view.
pub(crate) fn bind_matched_effects(root: &mut Node, identity: u64) {
    root.visit_modifiers_mut(identity, &mut |modifier, identity| {
        let unbound = modifier
            .elements()
            .iter()
            .any(|element| matches!(element, ModifierElement::MatchedTransform { .. }));
        if !unbound {
            return;
        }
        let bound = modifier
            .elements()
            .iter()
            .fold(Modifier::empty(), |bound, element| match element {
                ModifierElement::MatchedTransform { key, namespace } => {
                    bound.then(namespace.remembered_effect(key.clone(), identity).modifier())
                }
                other => bound.then(Modifier::with_element(other.clone())),
            });
        *modifier = bound;
    });
}

impl Node {
    /// Wraps the view in `effect`. The caller owns the effect's state: use a
    /// separate effect for each endpoint, never mount both endpoints at once,
    /// and wrap content with a stable non-zero size.
    pub fn matched_transform_effect(self, effect: &MatchedTransformEffect) -> Self {
        effect.apply(self)
    }
}

#[cfg(test)]
#[path = "tests/matched_transform_tests.rs"]
mod tests;
