//! Desktop-scoped drivers, created on first use and migrated on
//! configuration changes.

mod configs;
mod operations;
mod types;

pub use types::*;
