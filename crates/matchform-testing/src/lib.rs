//! Testing utilities and harness for matchform

pub mod assertions;
mod harness;

pub use assertions::{assert_approx_eq, assert_rect_approx_eq, assert_rect_contains_point};
pub use harness::{TestHost, FRAME_NANOS};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::harness::{TestHost, FRAME_NANOS};
}
