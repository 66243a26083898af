//! The TilingDriver keeps one engine's abstract tree in step with a host's
//! tile tree for a single desktop.

mod fit;
mod operations;
mod reconcile;
mod regenerate;
mod types;

pub use fit::fit_shares;
pub use types::*;
