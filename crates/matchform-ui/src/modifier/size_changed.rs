use std::rc::Rc;

use super::{Modifier, ModifierElement};
use matchform_ui_graphics::Size;

impl Modifier {
    /// Invoke `on_size_changed` with the size of the modified content.
    ///
    /// The host calls it after a layout pass, the first time the element is
    /// measured and then only when the size differs from the last report.
    pub fn on_size_changed(self, on_size_changed: impl Fn(Size) + 'static) -> Self {
        self.then(Self::with_element(ModifierElement::OnSizeChanged(Rc::new(
            on_size_changed,
        ))))
    }
}
