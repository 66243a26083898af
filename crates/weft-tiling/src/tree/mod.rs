//! The abstract tile tree every engine projects its model onto.

mod operations;
mod traversal;
mod types;

pub use types::*;
