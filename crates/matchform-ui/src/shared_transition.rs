//! Bookkeeping for matched transitions between holders of the same key.
//!
//! The registry remembers which view held each shared key in the current
//! tree and where it was last drawn. When an animated update swaps the holder
//! for a view with a different identity, a transition starts from the old
//! holder's last visual rect; the old holder's subtree is retained as an
//! exiting copy until the transition completes.

use indexmap::IndexMap;
use matchform_animation::{Animatable, AnimationSpec};
use matchform_core::RuntimeHandle;
use matchform_ui_graphics::Rect;

use crate::node::{child_identity, exiting_identity, root_identity};
use crate::{ModifierElement, Node, SharedKey};

/// Which side of a matched transition a laid-out view is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionRole {
    /// The view present in the current tree.
    Incoming,
    /// The retained copy of the view that was replaced.
    Outgoing,
}

pub(crate) struct Holder {
    identity: u64,
    node: Node,
    visual_rect: Option<Rect>,
}

pub(crate) struct Transition {
    from_rect: Rect,
    incoming_identity: u64,
    exiting: Node,
    exiting_identity: u64,
    progress: Animatable<f32>,
}

impl Transition {
    pub(crate) fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub(crate) fn is_finished(&self) -> bool {
        !self.progress.is_running() && self.progress.value() >= 1.0
    }
}

/// Bounds override for one key during layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SharedOverride {
    pub rect: Rect,
    pub incoming_identity: u64,
    pub exiting_identity: u64,
    pub incoming_alpha: f32,
    pub outgoing_alpha: f32,
}

impl SharedOverride {
    pub(crate) fn role_of(&self, identity: u64) -> Option<(TransitionRole, f32)> {
        if identity == self.incoming_identity {
            Some((TransitionRole::Incoming, self.incoming_alpha))
        } else if identity == self.exiting_identity {
            Some((TransitionRole::Outgoing, self.outgoing_alpha))
        } else {
            None
        }
    }
}

/// Where a holder of `key` ended up after a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SharedRecord {
    pub key: SharedKey,
    pub identity: u64,
    pub role: Option<TransitionRole>,
    pub rect: Rect,
}

/// Every holder of a shared key in `root`, first holder in tree order wins.
pub(crate) fn collect_holders(root: &Node) -> IndexMap<SharedKey, (u64, Node)> {
    let mut holders = IndexMap::new();
    visit_holders(root, root_identity(root), &mut holders);
    holders
}

fn visit_holders(node: &Node, identity: u64, holders: &mut IndexMap<SharedKey, (u64, Node)>) {
    for element in node.modifiers().elements() {
        if let ModifierElement::SharedBounds(key) = element {
            if holders.contains_key(key) {
                log::warn!(
                    "{key:?} is held by more than one view at once; keeping the first holder"
                );
                continue;
            }
            holders.insert(key.clone(), (identity, node.clone()));
        }
    }
    for (index, child) in node.children().iter().enumerate() {
        visit_holders(
            child,
            child_identity(identity, index, child.view_key()),
            holders,
        );
    }
}

#[derive(Default)]
pub(crate) struct SharedTransitionRegistry {
    holders: IndexMap<SharedKey, Holder>,
    transitions: IndexMap<SharedKey, Transition>,
}

impl SharedTransitionRegistry {
    /// Replaces the holder set with the holders of a new tree, starting,
    /// retargeting or dropping transitions as needed.
    pub(crate) fn reconcile(
        &mut self,
        holders: IndexMap<SharedKey, (u64, Node)>,
        animation: Option<AnimationSpec>,
        runtime: &RuntimeHandle,
    ) {
        self.transitions.retain(|key, _| {
            let kept = holders.contains_key(key);
            if !kept {
                log::debug!("{key:?} left the tree, dropping its transition");
            }
            kept
        });

        let mut previous = std::mem::take(&mut self.holders);
        for (key, (identity, node)) in holders {
            let mut visual_rect = None;
            if let Some(old) = previous.swap_remove(&key) {
                if old.identity == identity {
                    visual_rect = old.visual_rect;
                } else {
                    self.swap_holder(&key, old, identity, animation, runtime);
                }
            }
            self.holders.insert(
                key,
                Holder {
                    identity,
                    node,
                    visual_rect,
                },
            );
        }
    }

    fn swap_holder(
        &mut self,
        key: &SharedKey,
        old: Holder,
        identity: u64,
        animation: Option<AnimationSpec>,
        runtime: &RuntimeHandle,
    ) {
        let (Some(spec), Some(from_rect)) = (animation, old.visual_rect) else {
            log::debug!("{key:?} changed holder without animation");
            self.transitions.shift_remove(key);
            return;
        };

        let progress = Animatable::new(0.0_f32, runtime.clone());
        progress.animate_to(1.0, spec);
        log::debug!(
            "{key:?} transition from {from_rect:?} over {}ms",
            spec.duration_millis
        );
        self.transitions.insert(
            key.clone(),
            Transition {
                from_rect,
                incoming_identity: identity,
                exiting_identity: exiting_identity(old.identity),
                exiting: old.node,
                progress,
            },
        );
    }

    /// Overrides for the keys whose incoming holder was laid out at
    /// `natural`, interpolated at each transition's current progress.
    pub(crate) fn overrides(
        &self,
        natural: &[SharedRecord],
        crossfade: bool,
    ) -> IndexMap<SharedKey, SharedOverride> {
        let mut overrides = IndexMap::new();
        for record in natural {
            let Some(transition) = self.transitions.get(&record.key) else {
                continue;
            };
            if record.identity != transition.incoming_identity {
                continue;
            }
            let t = transition.progress();
            let (incoming_alpha, outgoing_alpha) = if crossfade {
                (t, 1.0 - t)
            } else {
                (1.0, 0.0)
            };
            overrides.insert(
                record.key.clone(),
                SharedOverride {
                    rect: transition.from_rect.lerp(record.rect, t),
                    incoming_identity: transition.incoming_identity,
                    exiting_identity: transition.exiting_identity,
                    incoming_alpha,
                    outgoing_alpha,
                },
            );
        }
        overrides
    }

    /// Retained copies of replaced holders, with the identity to lay them out
    /// under.
    pub(crate) fn exiting(&self) -> impl Iterator<Item = (&SharedKey, &Node, u64)> {
        self.transitions
            .iter()
            .map(|(key, transition)| (key, &transition.exiting, transition.exiting_identity))
    }

    /// Remembers where the current holders were drawn.
    pub(crate) fn record_layout(&mut self, records: &[SharedRecord]) {
        for record in records {
            if record.role == Some(TransitionRole::Outgoing) {
                continue;
            }
            if let Some(holder) = self.holders.get_mut(&record.key) {
                if holder.identity == record.identity {
                    holder.visual_rect = Some(record.rect);
                }
            }
        }
    }

    /// Drops finished transitions. Returns whether anything was dropped.
    pub(crate) fn prune_finished(&mut self) -> bool {
        let before = self.transitions.len();
        self.transitions.retain(|key, transition| {
            let finished = transition.is_finished();
            if finished {
                log::debug!("{key:?} transition finished");
            }
            !finished
        });
        self.transitions.len() != before
    }

    pub(crate) fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub(crate) fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn progress(&self, key: &SharedKey) -> Option<f32> {
        self.transitions.get(key).map(Transition::progress)
    }

    pub(crate) fn visual_rect(&self, key: &SharedKey) -> Option<Rect> {
        self.holders.get(key).and_then(|holder| holder.visual_rect)
    }

    pub(crate) fn holder_count(&self) -> usize {
        self.holders.len()
    }
}

#[cfg(test)]
#[path = "tests/shared_transition_tests.rs"]
mod tests;
