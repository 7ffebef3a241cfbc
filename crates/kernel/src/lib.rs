//! Sottotitolo Kernel Library
//!
//! A subtitle field stored as metadata on content items: gated read/write
//! access, sanitization on write, and two taps that let external code
//! redirect the storage key or rewrite the rendered value.

pub mod config;
pub mod content;
pub mod error;
pub mod meta;
pub mod state;
pub mod subtitle;
pub mod tap;

pub use config::Config;
pub use error::{SetupError, SetupResult};
pub use state::SubtitleServices;
pub use subtitle::{DEFAULT_META_KEY, SubtitleAccessor};
