//! Structural edits on the tile tree: add, split, secede, remove, clear.
//!
//! Invalid edits (removing the root, splitting a tile that already has
//! children or holds a client) are silent no-ops.

use weft_common::ClientId;

use super::{LayoutDirection, Tile, TileId, TileTree};

impl TileTree {
    /// Append a child whose layout direction is perpendicular to `parent`'s.
    /// Returns `None` if `parent` is missing or holds clients.
    pub fn add_child(&mut self, parent: TileId) -> Option<TileId> {
        let direction = self.tiles.get(parent)?.layout_direction.perpendicular();
        self.push_child(parent, direction)
    }

    /// Append a child with the same layout direction as `parent`.
    pub fn add_child_parallel(&mut self, parent: TileId) -> Option<TileId> {
        let direction = self.tiles.get(parent)?.layout_direction;
        self.push_child(parent, direction)
    }

    fn push_child(&mut self, parent: TileId, direction: LayoutDirection) -> Option<TileId> {
        if !self.tiles.get(parent)?.clients.is_empty() {
            return None;
        }
        let child = self.tiles.insert(Tile::child_of(parent, direction));
        self.tiles[parent].children.push(child);
        Some(child)
    }

    /// Split an empty leaf into exactly two perpendicular children.
    pub fn split(&mut self, id: TileId) -> Option<(TileId, TileId)> {
        let tile = self.tiles.get(id)?;
        if !tile.children.is_empty() || !tile.clients.is_empty() {
            return None;
        }
        let first = self.add_child(id)?;
        let second = self.add_child(id)?;
        Some((first, second))
    }

    /// Make `id` take its parent's place. Former siblings are destroyed.
    ///
    /// When the parent is the root, `id`'s content is moved into the root so
    /// the root's identity never changes.
    pub fn secede(&mut self, id: TileId) {
        let Some(parent) = self.parent(id) else {
            return;
        };

        let siblings: Vec<TileId> = self.tiles[parent]
            .children
            .iter()
            .copied()
            .filter(|&c| c != id)
            .collect();
        for sibling in siblings {
            self.destroy_subtree(sibling);
        }

        if parent == self.root {
            let Some(tile) = self.tiles.remove(id) else {
                return;
            };
            for &child in &tile.children {
                self.tiles[child].parent = Some(self.root);
            }
            let root = &mut self.tiles[self.root];
            root.children = tile.children;
            root.clients = tile.clients;
            root.layout_direction = tile.layout_direction;
            root.requested_size = tile.requested_size;
            return;
        }

        let grandparent = self.tiles[parent].parent;
        let slot_size = self.tiles[parent].relative_size;
        if let Some(gp) = grandparent {
            for slot in self.tiles[gp].children.iter_mut() {
                if *slot == parent {
                    *slot = id;
                }
            }
        }
        let tile = &mut self.tiles[id];
        tile.parent = grandparent;
        tile.relative_size = slot_size;
        self.tiles.remove(parent);
    }

    /// Remove `id` and its subtree. The root cannot be removed.
    ///
    /// With `batch_remove` the tile is not detached from its parent's child
    /// list; the caller clears that list afterwards.
    pub fn remove(&mut self, id: TileId, batch_remove: bool) {
        if id == self.root || !self.tiles.contains_key(id) {
            return;
        }
        if !batch_remove {
            if let Some(parent) = self.tiles[id].parent {
                self.tiles[parent].children.retain(|&c| c != id);
            }
        }
        self.destroy_subtree(id);
    }

    /// Remove every child of `id`.
    pub fn remove_children(&mut self, id: TileId) {
        let children = match self.tiles.get(id) {
            Some(tile) => tile.children.clone(),
            None => return,
        };
        for child in children {
            self.remove(child, true);
        }
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.children.clear();
        }
    }

    fn destroy_subtree(&mut self, id: TileId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(tile) = self.tiles.remove(next) {
                stack.extend(tile.children);
            }
        }
    }

    /// Reset the root: children destroyed, clients and size hints dropped,
    /// layout direction back to horizontal.
    pub fn clear(&mut self) {
        let root = self.root;
        self.remove_children(root);
        let tile = &mut self.tiles[root];
        tile.clients.clear();
        tile.layout_direction = LayoutDirection::Horizontal;
        tile.requested_size = None;
        tile.relative_size = None;
    }

    /// Replace a leaf's occupants with `client`. Returns `false` for tiles
    /// with children.
    pub fn set_client(&mut self, id: TileId, client: ClientId) -> bool {
        match self.tiles.get_mut(id) {
            Some(tile) if tile.children.is_empty() => {
                tile.clients.clear();
                tile.clients.push(client);
                true
            }
            _ => false,
        }
    }

    /// Stack another client onto a leaf.
    pub fn push_client(&mut self, id: TileId, client: ClientId) -> bool {
        match self.tiles.get_mut(id) {
            Some(tile) if tile.children.is_empty() => {
                if !tile.clients.contains(&client) {
                    tile.clients.push(client);
                }
                true
            }
            _ => false,
        }
    }

    pub fn clear_clients(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.clients.clear();
        }
    }

    /// Drop `client` from whichever tiles hold it. Returns whether any did.
    pub fn remove_client(&mut self, client: ClientId) -> bool {
        let mut found = false;
        for (_, tile) in self.tiles.iter_mut() {
            let before = tile.clients.len();
            tile.clients.retain(|&c| c != client);
            found |= tile.clients.len() != before;
        }
        found
    }

    /// Flip every tile's layout direction.
    pub fn rotate(&mut self) {
        for (_, tile) in self.tiles.iter_mut() {
            tile.layout_direction = tile.layout_direction.perpendicular();
        }
    }
}
