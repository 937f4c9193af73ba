//! Shared, pure vocabulary for the `dto_contract` harness and its attribute macro.
//!
//! Both sides of the harness need to agree on what an accessor or mutator *is*:
//! - the `#[introspect]` macro uses it at compile time to decide which methods to record, and
//! - the runtime field model builder uses it to pair accessors with mutators.
//!
//! ## Notes
//!
//! - No IO, no global state, no dependencies. Everything here is a deterministic function over names.

pub mod naming;
pub mod signature;

pub use naming::{AccessorKind, AccessorName, parse_accessor, parse_mutator};
