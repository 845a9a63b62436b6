//! Size and padding modifiers.

use super::{Modifier, ModifierElement};
use matchform_ui_graphics::{EdgeInsets, Size};

impl Modifier {
    /// Declare the preferred size of the content.
    ///
    /// The incoming constraints may still force the content smaller or larger.
    ///
    /// Example: `Modifier::empty().size(Size::new(100.0, 200.0))`
    pub fn size(self, size: Size) -> Self {
        self.then(Self::with_element(ModifierElement::Size {
            width: Some(size.width),
            height: Some(size.height),
        }))
    }

    pub fn width(self, width: f32) -> Self {
        self.then(Self::with_element(ModifierElement::Size {
            width: Some(width),
            height: None,
        }))
    }

    pub fn height(self, height: f32) -> Self {
        self.then(Self::with_element(ModifierElement::Size {
            width: None,
            height: Some(height),
        }))
    }

    pub fn padding(self, all: f32) -> Self {
        self.padding_insets(EdgeInsets::uniform(all))
    }

    /// Example: `Modifier::empty().padding_symmetric(5.0, 2.0)`
    pub fn padding_symmetric(self, horizontal: f32, vertical: f32) -> Self {
        self.padding_insets(EdgeInsets::symmetric(horizontal, vertical))
    }

    pub fn padding_insets(self, insets: EdgeInsets) -> Self {
        self.then(Self::with_element(ModifierElement::Padding(insets)))
    }
}
