use std::rc::Rc;

use super::{LayerSource, Modifier, ModifierElement};
use matchform_ui_graphics::GraphicsLayer;

impl Modifier {
    /// Apply a graphics layer with transformations and alpha.
    ///
    /// Example: `Modifier::empty().graphics_layer(GraphicsLayer { alpha: 0.5, ..Default::default() })`
    pub fn graphics_layer(self, layer: GraphicsLayer) -> Self {
        self.then(Self::with_element(ModifierElement::GraphicsLayer(
            LayerSource::Static(layer),
        )))
    }

    /// Apply a graphics layer whose values are read at draw time.
    ///
    /// Changes to whatever `read` looks at show up on the next draw without a
    /// new layout pass.
    pub fn graphics_layer_with(self, read: impl Fn() -> GraphicsLayer + 'static) -> Self {
        self.then(Self::with_element(ModifierElement::GraphicsLayer(
            LayerSource::Dynamic(Rc::new(read)),
        )))
    }

    pub fn scale(self, scale: f32) -> Self {
        self.graphics_layer(GraphicsLayer::scaled(scale))
    }
}
