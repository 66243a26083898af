//! Core types for the tile tree: LayoutDirection, Tile and the arena.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use weft_common::{ClientId, Size};

new_key_type! {
    /// Handle of a tile in a [`TileTree`].
    pub struct TileId;
}

/// Orientation of the split among a tile's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Children sit side by side.
    #[default]
    Horizontal,
    /// Children are stacked top to bottom.
    Vertical,
}

impl LayoutDirection {
    pub fn perpendicular(self) -> Self {
        match self {
            LayoutDirection::Horizontal => LayoutDirection::Vertical,
            LayoutDirection::Vertical => LayoutDirection::Horizontal,
        }
    }
}

/// A node of the abstract tile tree.
///
/// Only leaves hold clients. Every engine except monocle keeps at most one
/// client per tile.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub(super) parent: Option<TileId>,
    pub(super) children: Vec<TileId>,
    pub(super) clients: Vec<ClientId>,
    pub layout_direction: LayoutDirection,
    /// Pixel-size hint; absent means "no preference".
    pub requested_size: Option<Size>,
    /// Share of the parent's span along the parent's split axis; absent
    /// means an even share.
    pub relative_size: Option<f64>,
}

impl Tile {
    pub(super) fn child_of(parent: TileId, layout_direction: LayoutDirection) -> Self {
        Self {
            parent: Some(parent),
            layout_direction,
            ..Self::default()
        }
    }

    pub fn parent(&self) -> Option<TileId> {
        self.parent
    }

    pub fn children(&self) -> &[TileId] {
        &self.children
    }

    pub fn clients(&self) -> &[ClientId] {
        &self.clients
    }

    /// The tile's occupant, for engines that hold one client per tile.
    pub fn client(&self) -> Option<ClientId> {
        self.clients.first().copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed tile tree with a root that lives as long as the tree.
#[derive(Debug, Clone)]
pub struct TileTree {
    pub(super) tiles: SlotMap<TileId, Tile>,
    pub(super) root: TileId,
}

impl TileTree {
    pub fn new() -> Self {
        let mut tiles = SlotMap::with_key();
        let root = tiles.insert(Tile::default());
        Self { tiles, root }
    }

    pub fn root(&self) -> TileId {
        self.root
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(id)
    }

    /// Number of live tiles, root included.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn parent(&self, id: TileId) -> Option<TileId> {
        self.tiles.get(id).and_then(|t| t.parent)
    }

    pub fn children(&self, id: TileId) -> &[TileId] {
        self.tiles.get(id).map(|t| t.children.as_slice()).unwrap_or(&[])
    }

    pub fn clients(&self, id: TileId) -> &[ClientId] {
        self.tiles.get(id).map(|t| t.clients.as_slice()).unwrap_or(&[])
    }

    pub fn client(&self, id: TileId) -> Option<ClientId> {
        self.tiles.get(id).and_then(Tile::client)
    }

    pub fn layout_direction(&self, id: TileId) -> Option<LayoutDirection> {
        self.tiles.get(id).map(|t| t.layout_direction)
    }
}

impl Default for TileTree {
    fn default() -> Self {
        Self::new()
    }
}
