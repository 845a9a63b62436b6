//! Alignment utilities for positioning content

use matchform_ui_graphics::{Point, Size};

/// Alignment across both axes used for positioning content within a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alignment {
    /// Horizontal alignment component.
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment component.
    pub vertical: VerticalAlignment,
}

impl Alignment {
    /// Creates a new [`Alignment`] from explicit horizontal and vertical components.
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Top);

    pub const TOP_CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::Top,
    );

    pub const CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::CenterVertically,
    );

    pub const BOTTOM_CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::Bottom,
    );

    /// Offset of a `child` placed inside `container`.
    ///
    /// Oversized children are centered rather than pinned, so content that
    /// overflows its container spills out evenly on both sides.
    pub fn align(&self, container: Size, child: Size) -> Point {
        Point::new(
            self.horizontal.align(container.width, child.width),
            self.vertical.align(container.height, child.height),
        )
    }
}

/// Alignment along the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Start,
    CenterHorizontally,
    End,
}

impl HorizontalAlignment {
    pub fn align(&self, available: f32, child: f32) -> f32 {
        if child > available {
            return (available - child) / 2.0;
        }
        match self {
            HorizontalAlignment::Start => 0.0,
            HorizontalAlignment::CenterHorizontally => (available - child) / 2.0,
            HorizontalAlignment::End => available - child,
        }
    }
}

/// Alignment along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    CenterVertically,
    Bottom,
}

impl VerticalAlignment {
    pub fn align(&self, available: f32, child: f32) -> f32 {
        if child > available {
            return (available - child) / 2.0;
        }
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::CenterVertically => (available - child) / 2.0,
            VerticalAlignment::Bottom => available - child,
        }
    }
}
