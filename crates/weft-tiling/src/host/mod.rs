//! The collaborator contract the tiling core consumes from a window manager.
//!
//! A host owns real windows and its own mutable tile tree, one root tile per
//! desktop. The driver only talks to the host through [`TilingHost`], so any
//! window manager that can expose these operations can be driven.

use std::fmt::Debug;
use std::hash::Hash;

use weft_common::{DesktopKey, Rect, Size};

use crate::tree::LayoutDirection;

pub mod memory;

pub use memory::{MemoryHost, TileHandle, WindowHandle};

/// Window and tile capabilities of a host window manager.
///
/// Handles are cheap, copyable identities. Queries on a handle the host no
/// longer knows return an empty default rather than failing.
pub trait TilingHost {
    type Window: Copy + Eq + Hash + Debug;
    type Tile: Copy + Eq + Hash + Debug;

    /// Whether the window is still alive on the host side.
    fn window_exists(&self, window: Self::Window) -> bool;
    fn window_name(&self, window: Self::Window) -> String;
    fn window_min_size(&self, window: Self::Window) -> Size;
    /// The host tile the window currently sits in, if tiled.
    fn window_tile(&self, window: Self::Window) -> Option<Self::Tile>;

    fn root_tile(&self, desktop: &DesktopKey) -> Option<Self::Tile>;
    fn tile_children(&self, tile: Self::Tile) -> Vec<Self::Tile>;
    fn tile_parent(&self, tile: Self::Tile) -> Option<Self::Tile>;
    fn tile_layout_direction(&self, tile: Self::Tile) -> LayoutDirection;
    /// Geometry in screen pixels.
    fn tile_absolute_geometry(&self, tile: Self::Tile) -> Rect;
    /// Geometry as fractions of the desktop's root tile.
    fn tile_relative_geometry(&self, tile: Self::Tile) -> Rect;
    fn set_tile_relative_geometry(&mut self, tile: Self::Tile, geometry: Rect);

    /// Split `tile` along `direction`.
    ///
    /// A leaf whose parent already lays out along `direction` gets a new
    /// sibling inserted right after it. Any other leaf becomes a parent of
    /// two halves. Tiles with children are left alone.
    fn split_tile(&mut self, tile: Self::Tile, direction: LayoutDirection);

    /// Remove `tile` and its subtree. Windows inside become untiled.
    fn remove_tile(&mut self, tile: Self::Tile);
}
