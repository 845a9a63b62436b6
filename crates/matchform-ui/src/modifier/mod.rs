//! Modifier chains.
//!
//! A [`Modifier`] is an ordered list of elements. The first element is the
//! outermost: it sees the parent's constraints first and its size is the one
//! the parent places. `a.then(b)` puts every element of `a` outside `b`.

mod fill;
mod graphics_layer;
mod shared_bounds;
mod size;
mod size_changed;

use std::fmt;
use std::rc::Rc;

use matchform_ui_graphics::{EdgeInsets, GraphicsLayer, Size};
use smallvec::SmallVec;

use crate::{Namespace, SharedKey, SizeSlot};

/// Where a graphics layer gets its values from.
#[derive(Clone)]
pub enum LayerSource {
    Static(GraphicsLayer),
    /// Evaluated on every draw, never cached.
    Dynamic(Rc<dyn Fn() -> GraphicsLayer>),
}

impl LayerSource {
    pub fn resolve(&self) -> GraphicsLayer {
        match self {
            LayerSource::Static(layer) => *layer,
            LayerSource::Dynamic(read) => read(),
        }
    }
}

impl fmt::Debug for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerSource::Static(layer) => f.debug_tuple("Static").field(layer).finish(),
            LayerSource::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[derive(Clone)]
pub enum ModifierElement {
    /// Preferred size on the given axes, clamped into the incoming constraints.
    Size {
        width: Option<f32>,
        height: Option<f32>,
    },
    Padding(EdgeInsets),
    /// Takes all bounded space offered on the flagged axes and centers the
    /// content at its own size.
    Fill { width: bool, height: bool },
    /// Measures the content with no bounds so it takes its ideal size.
    FixedSize,
    GraphicsLayer(LayerSource),
    /// Receives the size of everything inside this element after layout.
    OnSizeChanged(Rc<dyn Fn(Size)>),
    /// Publishes the size of everything inside this element into the slot
    /// after every layout pass that measures it.
    ObserveSize(SizeSlot),
    /// Matched transform effect not yet bound to a view. The host replaces it
    /// with the effect remembered for `(key, identity of the carrying view)`
    /// before layout.
    MatchedTransform { key: SharedKey, namespace: Namespace },
    /// Registers the content as an endpoint of matched transitions.
    SharedBounds(SharedKey),
}

impl ModifierElement {
    pub fn name(&self) -> &'static str {
        match self {
            ModifierElement::Size { .. } => "size",
            ModifierElement::Padding(_) => "padding",
            ModifierElement::Fill { .. } => "fill",
            ModifierElement::FixedSize => "fixedSize",
            ModifierElement::GraphicsLayer(_) => "graphicsLayer",
            ModifierElement::OnSizeChanged(_) => "onSizeChanged",
            ModifierElement::ObserveSize(_) => "observeSize",
            ModifierElement::MatchedTransform { .. } => "matchedTransform",
            ModifierElement::SharedBounds(_) => "sharedBounds",
        }
    }
}

impl fmt::Debug for ModifierElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierElement::Size { width, height } => f
                .debug_struct("Size")
                .field("width", width)
                .field("height", height)
                .finish(),
            ModifierElement::Padding(insets) => f.debug_tuple("Padding").field(insets).finish(),
            ModifierElement::Fill { width, height } => f
                .debug_struct("Fill")
                .field("width", width)
                .field("height", height)
                .finish(),
            ModifierElement::FixedSize => f.write_str("FixedSize"),
            ModifierElement::GraphicsLayer(source) => {
                f.debug_tuple("GraphicsLayer").field(source).finish()
            }
            ModifierElement::OnSizeChanged(_) => f.write_str("OnSizeChanged(..)"),
            ModifierElement::ObserveSize(slot) => f.debug_tuple("ObserveSize").field(&slot.get()).finish(),
            ModifierElement::MatchedTransform { key, .. } => {
                f.debug_tuple("MatchedTransform").field(key).finish()
            }
            ModifierElement::SharedBounds(key) => f.debug_tuple("SharedBounds").field(key).finish(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Modifier {
    elements: SmallVec<[ModifierElement; 4]>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_element(element: ModifierElement) -> Self {
        let mut elements = SmallVec::new();
        elements.push(element);
        Self { elements }
    }

    /// Places every element of `self` outside every element of `next`.
    pub fn then(mut self, next: Modifier) -> Self {
        self.elements.extend(next.elements);
        self
    }

    pub fn elements(&self) -> &[ModifierElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Element names from outermost to innermost.
    pub fn describe(&self) -> Vec<&'static str> {
        self.elements.iter().map(ModifierElement::name).collect()
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

#[cfg(test)]
#[path = "../tests/modifier_tests.rs"]
mod tests;
