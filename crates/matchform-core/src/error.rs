use std::fmt;

/// Failures surfaced by the host while laying out or drawing a tree.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeError {
    /// `compute_layout` was called before any tree was rendered.
    MissingRoot,
    /// The viewport handed to layout is negative or not finite.
    InvalidViewport { width: f32, height: f32 },
    /// A layout box id does not exist in the tree it was looked up in.
    Missing { id: usize },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::MissingRoot => write!(f, "no root node has been rendered"),
            NodeError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}")
            }
            NodeError::Missing { id } => write!(f, "layout box {id} missing"),
        }
    }
}

impl std::error::Error for NodeError {}
