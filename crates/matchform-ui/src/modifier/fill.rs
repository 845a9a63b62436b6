//! Fill and fixed-size modifiers.

use super::{Modifier, ModifierElement};

impl Modifier {
    /// Take all offered width and height.
    ///
    /// Unlike a tight fill, the content keeps its own size and is centered in
    /// the filled area. On an unbounded axis the element is as large as its
    /// content.
    pub fn fill_max_size(self) -> Self {
        self.then(Self::with_element(ModifierElement::Fill {
            width: true,
            height: true,
        }))
    }

    pub fn fill_max_width(self) -> Self {
        self.then(Self::with_element(ModifierElement::Fill {
            width: true,
            height: false,
        }))
    }

    pub fn fill_max_height(self) -> Self {
        self.then(Self::with_element(ModifierElement::Fill {
            width: false,
            height: true,
        }))
    }

    /// Measure the content at its ideal size, ignoring the parent's bounds.
    ///
    /// The reported size is clamped back into the incoming constraints and the
    /// content is centered, so an oversized child overflows evenly.
    pub fn fixed_size(self) -> Self {
        self.then(Self::with_element(ModifierElement::FixedSize))
    }
}
