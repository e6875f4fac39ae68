//! Stackfall (workspace facade crate).
//!
//! Re-exports the rules engine as `stackfall::{core,types}`; the implementation
//! lives in dedicated crates under `crates/`.

pub use stackfall_core as core;
pub use stackfall_types as types;
