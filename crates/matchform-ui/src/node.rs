//! Declarative view tree.
//!
//! A [`Node`] is a plain value: application code builds a fresh tree for
//! every update and hands it to the host. Views are matched across updates
//! by identity, which is the explicit [`Node::key`] when one is set and the
//! structural path otherwise.

use std::fmt;
use std::hash::Hash;

use matchform_core::hash::hash_one;
use matchform_ui_graphics::{Color, Size};
use matchform_ui_layout::{Alignment, BoxMeasurePolicy, ColumnMeasurePolicy, HorizontalAlignment};

use crate::modifier::Modifier;

pub(crate) const ROOT_SEED: u64 = 0x6d66_5f72_6f6f_7400;
pub(crate) const EXITING_SEED: u64 = 0x6d66_5f65_7869_7400;

/// Identity of the child at `index` under `parent`.
///
/// An explicit key replaces the index, so keyed children keep their identity
/// when siblings move and two differently keyed views in the same slot are
/// distinct.
pub(crate) fn child_identity(parent: u64, index: usize, key: Option<u64>) -> u64 {
    match key {
        Some(key) => hash_one(&(parent, u8::MAX, key)),
        None => hash_one(&(parent, index as u64)),
    }
}

pub(crate) fn root_identity(node: &Node) -> u64 {
    child_identity(ROOT_SEED, 0, node.key)
}

/// Identity of a retained copy of the view whose identity was `identity`.
pub(crate) fn exiting_identity(identity: u64) -> u64 {
    hash_one(&(EXITING_SEED, identity))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec {
    pub alignment: Alignment,
}

impl BoxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub(crate) fn policy(&self) -> BoxMeasurePolicy {
        BoxMeasurePolicy::new(self.alignment)
    }
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            alignment: Alignment::TOP_START,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpec {
    pub spacing: f32,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub(crate) fn policy(&self) -> ColumnMeasurePolicy {
        ColumnMeasurePolicy::new(self.spacing, self.horizontal_alignment)
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            horizontal_alignment: HorizontalAlignment::Start,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Drawable content with an intrinsic size, standing in for text or shapes.
    Leaf {
        label: String,
        size: Size,
        color: Color,
    },
    Box(BoxSpec),
    Column(ColumnSpec),
}

#[derive(Clone)]
pub struct Node {
    kind: NodeKind,
    modifier: Modifier,
    key: Option<u64>,
    children: Vec<Node>,
}

impl Node {
    pub fn leaf(label: impl Into<String>, size: Size) -> Self {
        Self::from_kind(
            NodeKind::Leaf {
                label: label.into(),
                size,
                color: Color::WHITE,
            },
            Vec::new(),
        )
    }

    pub fn boxed(spec: BoxSpec, children: impl IntoIterator<Item = Node>) -> Self {
        Self::from_kind(NodeKind::Box(spec), children.into_iter().collect())
    }

    pub fn column(spec: ColumnSpec, children: impl IntoIterator<Item = Node>) -> Self {
        Self::from_kind(NodeKind::Column(spec), children.into_iter().collect())
    }

    fn from_kind(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            modifier: Modifier::empty(),
            key: None,
            children,
        }
    }

    /// Sets the fill color of a leaf. Containers ignore it.
    pub fn color(mut self, color: Color) -> Self {
        if let NodeKind::Leaf { color: current, .. } = &mut self.kind {
            *current = color;
        }
        self
    }

    /// Appends `modifier` inside the elements already attached.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = std::mem::take(&mut self.modifier).then(modifier);
        self
    }

    /// Attaches `outer` outside the elements already attached.
    pub fn wrap(mut self, outer: Modifier) -> Self {
        self.modifier = outer.then(std::mem::take(&mut self.modifier));
        self
    }

    /// Gives the view an explicit identity.
    pub fn key(mut self, key: impl Hash) -> Self {
        self.key = Some(hash_one(&key));
        self
    }

    pub fn view_key(&self) -> Option<u64> {
        self.key
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn modifiers(&self) -> &Modifier {
        &self.modifier
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Visits the modifier of this view and of every descendant, parents
    /// first, with the structural identity of its view.
    pub(crate) fn visit_modifiers_mut(&mut self, identity: u64, visit: &mut dyn FnMut(&mut Modifier, u64)) {
        visit(&mut self.modifier, identity);
        for (index, child) in self.children.iter_mut().enumerate() {
            let child_id = child_identity(identity, index, child.key);
            child.visit_modifiers_mut(child_id, visit);
        }
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Node");
        debug.field("kind", &self.kind);
        if let Some(key) = self.key {
            debug.field("key", &key);
        }
        if !self.modifier.is_empty() {
            debug.field("modifier", &self.modifier);
        }
        if !self.children.is_empty() {
            debug.field("children", &self.children);
        }
        debug.finish()
    }
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
