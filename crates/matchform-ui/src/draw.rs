//! Draw pass: turns a [`LayoutTree`] into a flat list of paint operations.

use matchform_ui_graphics::{Color, LayerTransform, Rect};

use crate::{LayoutBoxKind, LayoutTree};

/// One painted piece of content, in device coordinates after every layer
/// transform has been applied.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Content {
        label: String,
        rect: Rect,
        color: Color,
        alpha: f32,
    },
}

impl DrawOp {
    pub fn label(&self) -> &str {
        match self {
            DrawOp::Content { label, .. } => label,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            DrawOp::Content { rect, .. } => *rect,
        }
    }

    pub fn alpha(&self) -> f32 {
        match self {
            DrawOp::Content { alpha, .. } => *alpha,
        }
    }
}

/// Paint operations in back-to-front order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    ops: Vec<DrawOp>,
}

impl Scene {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn find(&self, label: &str) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.label() == label)
    }

    pub fn find_all<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DrawOp> {
        self.ops.iter().filter(move |op| op.label() == label)
    }
}

pub(crate) fn draw_tree(tree: &LayoutTree) -> Scene {
    let mut scene = Scene::default();
    for root in tree.roots() {
        draw_box(tree, root, LayerTransform::IDENTITY, 1.0, &mut scene);
    }
    scene
}

fn draw_box(tree: &LayoutTree, id: usize, parent: LayerTransform, parent_alpha: f32, scene: &mut Scene) {
    let Ok(layout) = tree.get(id) else {
        log::warn!("draw skipped missing layout box {id}");
        return;
    };

    let mut transform = parent;
    let mut alpha = parent_alpha * layout.alpha;
    for (source, bounds) in &layout.layers {
        let layer = source.resolve();
        transform = transform.compose(&LayerTransform::for_layer(&layer, *bounds));
        alpha *= layer.alpha;
    }
    if alpha <= 0.0 {
        return;
    }

    if let LayoutBoxKind::Leaf { label, color } = &layout.kind {
        scene.ops.push(DrawOp::Content {
            label: label.clone(),
            rect: transform.apply_rect(layout.content_rect),
            color: *color,
            alpha,
        });
    }
    for child in &layout.children {
        draw_box(tree, *child, transform, alpha, scene);
    }
}

#[cfg(test)]
#[path = "tests/draw_tests.rs"]
mod tests;
