//! Size observation: publish the resolved size of a view into a state slot.

use matchform_core::MutableState;
use matchform_ui_graphics::Size;

use crate::modifier::{Modifier, ModifierElement};
use crate::Node;

/// Observable slot holding a view's last resolved size, `None` until the view
/// has been laid out once.
pub type SizeSlot = MutableState<Option<Size>>;

/// Modifier writing the size of everything inside it into `slot`.
///
/// The host writes every measured size, so a slot that is new in a rebuilt
/// tree is filled on the next pass even when the view itself did not change.
/// Writes go through [`MutableState::set_if_changed`], so a layout pass that
/// resolves the same size again leaves the slot and its observers untouched.
pub fn size_observer_modifier(slot: &SizeSlot) -> Modifier {
    Modifier::with_element(ModifierElement::ObserveSize(slot.clone()))
}

/// Returns `content` unchanged in layout and appearance, with its resolved
/// size published into `slot` after every layout pass that changes it.
pub fn observe_size(content: Node, slot: &SizeSlot) -> Node {
    content.wrap(size_observer_modifier(slot))
}

impl Node {
    pub fn observe_size(self, slot: &SizeSlot) -> Self {
        observe_size(self, slot)
    }
}
