use super::{Modifier, ModifierElement};
use crate::SharedKey;

impl Modifier {
    /// Register the content as an endpoint of matched transitions under `key`.
    ///
    /// When an animated update removes one holder of `key` and inserts another
    /// with a different view identity, the host interpolates the bounds of
    /// both from the outgoing holder's rect to the incoming holder's rect and
    /// crossfades them. The element always reports its natural size to its
    /// parent, so surrounding layout is unaffected by the animation.
    ///
    /// At most one holder of a key may be present in a tree at a time.
    pub fn shared_bounds(self, key: SharedKey) -> Self {
        self.then(Self::with_element(ModifierElement::SharedBounds(key)))
    }
}
