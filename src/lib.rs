//! Gem Cascade (workspace facade crate).
//!
//! Exposes `gem_cascade::{core, types}` while the implementation lives in
//! dedicated crates under `crates/`, plus the argument handling of the
//! headless autoplay binary.

pub mod autoplay;

pub use gem_cascade_core as core;
pub use gem_cascade_types as types;
