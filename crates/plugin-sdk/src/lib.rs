//! Sottotitolo SDK
//!
//! Types shared between the kernel and the code that extends it: content
//! items, content type declarations, display options and metadata update
//! results.

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}
