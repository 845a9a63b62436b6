//! Time-based animations driven by the runtime's frame clock.

mod animation;

pub use animation::*;
