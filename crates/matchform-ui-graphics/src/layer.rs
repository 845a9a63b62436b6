//! Graphics layers and the affine transform they resolve to.

use crate::{Point, Rect};

/// Visual-only properties applied to a subtree at draw time.
///
/// Layers never affect measurement or placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub alpha: f32,
    pub scale: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl GraphicsLayer {
    pub fn scaled(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        self.alpha == 1.0
            && self.scale == 1.0
            && self.translation_x == 0.0
            && self.translation_y == 0.0
    }
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scale: 1.0,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }
}

/// Uniform scale followed by a translation: `p -> p * scale + (dx, dy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}

impl LayerTransform {
    pub const IDENTITY: LayerTransform = LayerTransform {
        scale: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self { scale: 1.0, dx, dy }
    }

    /// Resolves `layer` against the untransformed `bounds` of the layer's owner.
    ///
    /// Scaling pivots around the center of `bounds`, then the layer translation
    /// is applied.
    pub fn for_layer(layer: &GraphicsLayer, bounds: Rect) -> Self {
        let center = bounds.center();
        let s = layer.scale;
        Self {
            scale: s,
            dx: center.x - center.x * s + layer.translation_x,
            dy: center.y - center.y * s + layer.translation_y,
        }
    }

    /// Returns the transform that applies `inner` first and `self` second.
    pub fn compose(&self, inner: &LayerTransform) -> Self {
        Self {
            scale: self.scale * inner.scale,
            dx: self.scale * inner.dx + self.dx,
            dy: self.scale * inner.dy + self.dy,
        }
    }

    pub fn apply_point(&self, point: Point) -> Point {
        Point::new(point.x * self.scale + self.dx, point.y * self.scale + self.dy)
    }

    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let origin = self.apply_point(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "tests/layer_tests.rs"]
mod tests;
