//! RGBA color in linear 0..1 components

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.478, 1.0, 1.0);
    pub const GREEN: Color = Color(0.204, 0.78, 0.349, 1.0);
}
