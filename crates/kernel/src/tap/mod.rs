//! Tap system for extension points.
//!
//! Taps are named extension points external code can hook into. When a tap
//! is applied, every registered handler runs in weight order (lower = higher
//! priority), each transforming the value produced by the one before.

mod chain;
mod registry;

pub use chain::{FilterChain, FilterFn};
pub use registry::{TAP_SUBTITLE, TAP_SUBTITLE_KEY, TapRegistry};
