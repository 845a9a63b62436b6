//! Measure and place passes.
//!
//! Measurement walks each node's modifier chain from the outermost element
//! inward, then measures the node's content with its policy. Placement turns
//! the measured chain into [`LayoutBox`]es with absolute rects. Size reports
//! from `on_size_changed` elements and sizes for `observe_size` slots are
//! collected during measurement, keyed by view identity and element index; a
//! later measurement of the same element in the same pass replaces the
//! earlier one.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use matchform_core::{NodeError, NodeId};
use matchform_ui_graphics::{Color, Point, Rect, Size};
use matchform_ui_layout::{Alignment, Constraints, MeasurePolicy, Measurable};
use smallvec::SmallVec;

use crate::node::child_identity;
use crate::shared_transition::{SharedOverride, SharedRecord};
use crate::{LayerSource, ModifierElement, Node, NodeKind, SharedKey, SizeSlot, TransitionRole};

pub(crate) type SizeReport = (Size, Rc<dyn Fn(Size)>);
pub(crate) type SizeObservation = (Size, SizeSlot);

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutBoxKind {
    Leaf { label: String, color: Color },
    Box,
    Column,
}

/// One laid-out view.
#[derive(Clone, Debug)]
pub struct LayoutBox {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub identity: u64,
    pub kind: LayoutBoxKind,
    /// Rect of the outermost modifier element, as seen by the parent.
    pub rect: Rect,
    /// Rect of the content inside every modifier element.
    pub content_rect: Rect,
    /// Graphics layers from outermost to innermost, each with the untransformed
    /// bounds of the element that owns it.
    pub layers: SmallVec<[(LayerSource, Rect); 2]>,
    /// Opacity contributed by matched transitions.
    pub alpha: f32,
    pub role: Option<TransitionRole>,
    pub children: Vec<NodeId>,
}

impl LayoutBox {
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            LayoutBoxKind::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Result of a layout pass: the current tree followed by the retained copies
/// of views leaving through a matched transition.
#[derive(Clone, Debug)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    root: NodeId,
    exiting_roots: Vec<NodeId>,
    viewport: Size,
}

impl LayoutTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn exiting_roots(&self) -> &[NodeId] {
        &self.exiting_roots
    }

    /// Roots in paint order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.root).chain(self.exiting_roots.iter().copied())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn get(&self, id: NodeId) -> Result<&LayoutBox, NodeError> {
        self.boxes.get(id).ok_or(NodeError::Missing { id })
    }

    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// First leaf labelled `label`, current tree before exiting copies.
    pub fn find_by_label(&self, label: &str) -> Option<&LayoutBox> {
        self.boxes.iter().find(|b| b.label() == Some(label))
    }
}

struct ElementFrame {
    size: Size,
    inner_size: Size,
    inner_offset: Point,
    /// Absolute rect the inner chain is placed at, ignoring `inner_offset`.
    pinned_inner: Option<Rect>,
    layer: Option<LayerSource>,
    shared: Option<(SharedKey, Option<(TransitionRole, f32)>)>,
}

impl ElementFrame {
    fn pass_through(size: Size) -> Self {
        Self {
            size,
            inner_size: size,
            inner_offset: Point::ZERO,
            pinned_inner: None,
            layer: None,
            shared: None,
        }
    }

    fn wrapping(size: Size, inner_size: Size, inner_offset: Point) -> Self {
        Self {
            size,
            inner_size,
            inner_offset,
            ..Self::pass_through(size)
        }
    }
}

struct MeasuredChain<'n> {
    size: Size,
    /// Innermost first while the chain is being built.
    frames: Vec<ElementFrame>,
    content_size: Size,
    children: Vec<(MeasuredNode<'n>, Point)>,
}

struct MeasuredNode<'n> {
    node: &'n Node,
    identity: u64,
    size: Size,
    /// Outermost first.
    frames: Vec<ElementFrame>,
    content_size: Size,
    children: Vec<(MeasuredNode<'n>, Point)>,
}

struct ChildMeasurable<'e, 'n> {
    engine: &'e LayoutEngine<'e>,
    node: &'n Node,
    identity: u64,
    measured: Option<MeasuredNode<'n>>,
}

impl<'e, 'n> Measurable for ChildMeasurable<'e, 'n> {
    fn measure(&mut self, constraints: Constraints) -> Size {
        let measured = self.engine.measure_node(self.node, self.identity, constraints);
        let size = measured.size;
        self.measured = Some(measured);
        size
    }
}

/// Single-use measure and place pass over one or more roots.
pub(crate) struct LayoutEngine<'o> {
    overrides: &'o IndexMap<SharedKey, SharedOverride>,
    reports: RefCell<IndexMap<(u64, usize), SizeReport>>,
    observations: RefCell<IndexMap<(u64, usize), SizeObservation>>,
    shared_records: RefCell<Vec<SharedRecord>>,
    boxes: RefCell<Vec<LayoutBox>>,
}

impl<'o> LayoutEngine<'o> {
    pub(crate) fn new(overrides: &'o IndexMap<SharedKey, SharedOverride>) -> Self {
        Self {
            overrides,
            reports: RefCell::new(IndexMap::new()),
            observations: RefCell::new(IndexMap::new()),
            shared_records: RefCell::new(Vec::new()),
            boxes: RefCell::new(Vec::new()),
        }
    }

    /// Measures and places `node` as a root at the top-left of `viewport`.
    pub(crate) fn layout_root(&self, node: &Node, identity: u64, viewport: Size) -> NodeId {
        let measured = self.measure_node(
            node,
            identity,
            Constraints::loose(viewport.width, viewport.height),
        );
        self.place(&measured, Point::ZERO, None)
    }

    pub(crate) fn finish(self, root: NodeId, exiting_roots: Vec<NodeId>, viewport: Size) -> LayoutOutput {
        LayoutOutput {
            tree: LayoutTree {
                boxes: self.boxes.into_inner(),
                root,
                exiting_roots,
                viewport,
            },
            reports: self.reports.into_inner(),
            observations: self.observations.into_inner(),
            shared_records: self.shared_records.into_inner(),
        }
    }

    fn measure_node<'n>(&self, node: &'n Node, identity: u64, constraints: Constraints) -> MeasuredNode<'n> {
        let mut chain = self.measure_chain(node, identity, 0, constraints);
        chain.frames.reverse();
        MeasuredNode {
            node,
            identity,
            size: chain.size,
            frames: chain.frames,
            content_size: chain.content_size,
            children: chain.children,
        }
    }

    fn measure_chain<'n>(
        &self,
        node: &'n Node,
        identity: u64,
        index: usize,
        constraints: Constraints,
    ) -> MeasuredChain<'n> {
        let Some(element) = node.modifiers().elements().get(index) else {
            return self.measure_content(node, identity, constraints);
        };

        match element {
            ModifierElement::Size { width, height } => {
                let (min_width, max_width) = match width {
                    Some(w) => {
                        let w = w.clamp(constraints.min_width, constraints.max_width);
                        (w, w)
                    }
                    None => (constraints.min_width, constraints.max_width),
                };
                let (min_height, max_height) = match height {
                    Some(h) => {
                        let h = h.clamp(constraints.min_height, constraints.max_height);
                        (h, h)
                    }
                    None => (constraints.min_height, constraints.max_height),
                };
                let inner_constraints = Constraints {
                    min_width,
                    max_width,
                    min_height,
                    max_height,
                };
                let mut inner = self.measure_chain(node, identity, index + 1, inner_constraints);
                let size = constraints.constrain_size(inner.size);
                inner.frames.push(ElementFrame::wrapping(size, inner.size, Point::ZERO));
                inner.size = size;
                inner
            }
            ModifierElement::Padding(insets) => {
                let horizontal = insets.horizontal_sum();
                let vertical = insets.vertical_sum();
                let mut inner = self.measure_chain(
                    node,
                    identity,
                    index + 1,
                    constraints.deflate(horizontal, vertical),
                );
                let size = constraints.constrain_size(Size::new(
                    inner.size.width + horizontal,
                    inner.size.height + vertical,
                ));
                inner.frames.push(ElementFrame::wrapping(
                    size,
                    inner.size,
                    Point::new(insets.left, insets.top),
                ));
                inner.size = size;
                inner
            }
            ModifierElement::Fill { width, height } => {
                let mut inner = self.measure_chain(node, identity, index + 1, constraints.loosen());
                let natural = constraints.constrain_size(inner.size);
                let size = Size::new(
                    if *width && constraints.has_bounded_width() {
                        constraints.max_width
                    } else {
                        natural.width
                    },
                    if *height && constraints.has_bounded_height() {
                        constraints.max_height
                    } else {
                        natural.height
                    },
                );
                let offset = Alignment::CENTER.align(size, inner.size);
                inner.frames.push(ElementFrame::wrapping(size, inner.size, offset));
                inner.size = size;
                inner
            }
            ModifierElement::FixedSize => {
                let mut inner = self.measure_chain(node, identity, index + 1, Constraints::unbounded());
                let size = constraints.constrain_size(inner.size);
                let offset = Alignment::CENTER.align(size, inner.size);
                inner.frames.push(ElementFrame::wrapping(size, inner.size, offset));
                inner.size = size;
                inner
            }
            ModifierElement::GraphicsLayer(source) => {
                let mut inner = self.measure_chain(node, identity, index + 1, constraints);
                inner.frames.push(ElementFrame {
                    layer: Some(source.clone()),
                    ..ElementFrame::pass_through(inner.size)
                });
                inner
            }
            ModifierElement::OnSizeChanged(callback) => {
                let mut inner = self.measure_chain(node, identity, index + 1, constraints);
                self.reports
                    .borrow_mut()
                    .insert((identity, index), (inner.size, Rc::clone(callback)));
                inner.frames.push(ElementFrame::pass_through(inner.size));
                inner
            }
            ModifierElement::ObserveSize(slot) => {
                let mut inner = self.measure_chain(node, identity, index + 1, constraints);
                self.observations
                    .borrow_mut()
                    .insert((identity, index), (inner.size, slot.clone()));
                inner.frames.push(ElementFrame::pass_through(inner.size));
                inner
            }
            // Bound to its view by the host; a tree laid out without one skips it.
            ModifierElement::MatchedTransform { .. } => {
                let mut inner = self.measure_chain(node, identity, index + 1, constraints);
                inner.frames.push(ElementFrame::pass_through(inner.size));
                inner
            }
            ModifierElement::SharedBounds(key) => {
                let natural = self.measure_chain(node, identity, index + 1, constraints);
                let size = natural.size;
                let role = self
                    .overrides
                    .get(key)
                    .and_then(|shared| shared.role_of(identity).map(|role| (shared.rect, role)));

                match role {
                    Some((rect, role)) => {
                        let mut pinned = self.measure_chain(
                            node,
                            identity,
                            index + 1,
                            Constraints::tight(rect.width.max(0.0), rect.height.max(0.0)),
                        );
                        let pinned_rect = Rect::from_origin_size(rect.origin(), pinned.size);
                        pinned.frames.push(ElementFrame {
                            pinned_inner: Some(pinned_rect),
                            shared: Some((key.clone(), Some(role))),
                            ..ElementFrame::wrapping(size, pinned.size, Point::ZERO)
                        });
                        pinned.size = size;
                        pinned
                    }
                    None => {
                        let mut natural = natural;
                        natural.frames.push(ElementFrame {
                            shared: Some((key.clone(), None)),
                            ..ElementFrame::pass_through(size)
                        });
                        natural
                    }
                }
            }
        }
    }

    fn measure_content<'n>(&self, node: &'n Node, identity: u64, constraints: Constraints) -> MeasuredChain<'n> {
        match node.kind() {
            NodeKind::Leaf { size, .. } => {
                let size = constraints.constrain_size(*size);
                MeasuredChain {
                    size,
                    frames: Vec::new(),
                    content_size: size,
                    children: Vec::new(),
                }
            }
            NodeKind::Box(spec) => self.measure_children(node, identity, &spec.policy(), constraints),
            NodeKind::Column(spec) => self.measure_children(node, identity, &spec.policy(), constraints),
        }
    }

    fn measure_children<'n>(
        &self,
        node: &'n Node,
        identity: u64,
        policy: &dyn MeasurePolicy,
        constraints: Constraints,
    ) -> MeasuredChain<'n> {
        let mut children: Vec<ChildMeasurable<'_, 'n>> = node
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| ChildMeasurable {
                engine: self,
                node: child,
                identity: child_identity(identity, index, child.view_key()),
                measured: None,
            })
            .collect();

        let result = {
            let mut measurables: SmallVec<[&mut dyn Measurable; 4]> = children
                .iter_mut()
                .map(|child| child as &mut dyn Measurable)
                .collect();
            policy.measure(&mut measurables[..], constraints)
        };

        let children = children
            .into_iter()
            .zip(result.placements.iter().copied())
            .map(|(child, offset)| {
                let measured = match child.measured {
                    Some(measured) => measured,
                    None => self.measure_node(child.node, child.identity, Constraints::tight(0.0, 0.0)),
                };
                (measured, offset)
            })
            .collect();

        MeasuredChain {
            size: result.size,
            frames: Vec::new(),
            content_size: result.size,
            children,
        }
    }

    fn place(&self, measured: &MeasuredNode<'_>, origin: Point, parent: Option<NodeId>) -> NodeId {
        let mut cursor = origin;
        let mut layers = SmallVec::new();
        let mut alpha = 1.0;
        let mut role = None;

        for frame in &measured.frames {
            if let Some(layer) = &frame.layer {
                layers.push((layer.clone(), Rect::from_origin_size(cursor, frame.size)));
            }
            cursor = match frame.pinned_inner {
                Some(rect) => rect.origin(),
                None => cursor + frame.inner_offset,
            };
            if let Some((key, shared_role)) = &frame.shared {
                if let Some((shared_role, shared_alpha)) = shared_role {
                    role = Some(*shared_role);
                    alpha *= shared_alpha;
                }
                self.shared_records.borrow_mut().push(SharedRecord {
                    key: key.clone(),
                    identity: measured.identity,
                    role: shared_role.map(|(role, _)| role),
                    rect: Rect::from_origin_size(cursor, frame.inner_size),
                });
            }
        }

        let kind = match measured.node.kind() {
            NodeKind::Leaf { label, color, .. } => LayoutBoxKind::Leaf {
                label: label.clone(),
                color: *color,
            },
            NodeKind::Box(_) => LayoutBoxKind::Box,
            NodeKind::Column(_) => LayoutBoxKind::Column,
        };

        let id = {
            let mut boxes = self.boxes.borrow_mut();
            let id = boxes.len();
            boxes.push(LayoutBox {
                id,
                parent,
                identity: measured.identity,
                kind,
                rect: Rect::from_origin_size(origin, measured.size),
                content_rect: Rect::from_origin_size(cursor, measured.content_size),
                layers,
                alpha,
                role,
                children: Vec::with_capacity(measured.children.len()),
            });
            id
        };

        for (child, offset) in &measured.children {
            let child_id = self.place(child, cursor + *offset, Some(id));
            self.boxes.borrow_mut()[id].children.push(child_id);
        }
        id
    }
}

pub(crate) struct LayoutOutput {
    pub tree: LayoutTree,
    pub reports: IndexMap<(u64, usize), SizeReport>,
    pub observations: IndexMap<(u64, usize), SizeObservation>,
    pub shared_records: Vec<SharedRecord>,
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
