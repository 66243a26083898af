//! Tiling engines and the driver that projects them onto a host's tile tree.
//!
//! An [`Engine`] arranges abstract clients in a [`TileTree`]. A
//! [`TilingDriver`] owns one engine, mirrors its tree onto a
//! [`TilingHost`], and reports which window goes in which host tile.
//! [`EngineRegistry`] keeps one driver per desktop.

pub mod bimap;
pub mod client;
pub mod driver;
pub mod engine;
pub mod guard;
pub mod host;
pub mod registry;
pub mod settle;
pub mod tree;

pub use bimap::BiMap;
pub use client::Client;
pub use driver::{fit_shares, Placements, TilingDriver};
pub use engine::{create_engine, Capabilities, Engine, EngineLayout};
pub use guard::LayoutGuard;
pub use host::{MemoryHost, TilingHost};
pub use registry::EngineRegistry;
pub use settle::SettleTimer;
pub use tree::{LayoutDirection, TileId, TileTree};
