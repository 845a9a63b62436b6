//! Runtime primitives for matchform: the frame clock that drives animations,
//! observable state cells, and the errors surfaced by the host.

pub mod collections;
mod error;
mod frame_clock;
pub mod hash;
mod runtime;
mod state;

pub use error::NodeError;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, RuntimeHandle};
pub use state::{MutableState, State, Subscription};

/// Index of a node inside a laid-out tree.
pub type NodeId = usize;
