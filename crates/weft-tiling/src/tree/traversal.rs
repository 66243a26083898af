//! Read-only walks over the tile tree.

use std::collections::VecDeque;

use weft_common::ClientId;

use super::{TileId, TileTree};

impl TileTree {
    /// Every tile reachable from `from`, in breadth-first order.
    pub fn bfs(&self, from: TileId) -> Vec<TileId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        if self.contains(from) {
            queue.push_back(from);
        }
        while let Some(id) = queue.pop_front() {
            out.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        out
    }

    /// Leaves in depth-first, first-child-first order (visual order).
    pub fn leaves(&self) -> Vec<TileId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let children = self.children(id);
            if children.is_empty() {
                out.push(id);
            } else {
                stack.extend(children.iter().rev().copied());
            }
        }
        out
    }

    /// The tile holding `client`, if any.
    pub fn find_client(&self, client: ClientId) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|(_, t)| t.clients.contains(&client))
            .map(|(id, _)| id)
    }

    /// Every `(client, tile)` pair in visual order.
    pub fn placements(&self) -> Vec<(ClientId, TileId)> {
        self.leaves()
            .into_iter()
            .flat_map(|id| self.clients(id).iter().map(move |&c| (c, id)))
            .collect()
    }

    /// Number of clients held anywhere in the tree.
    pub fn client_count(&self) -> usize {
        self.tiles.values().map(|t| t.clients.len()).sum()
    }

    /// Check parent/child links and that no tile both holds clients and
    /// has children.
    pub fn is_consistent(&self) -> bool {
        if self.parent(self.root).is_some() {
            return false;
        }
        let reachable = self.bfs(self.root);
        if reachable.len() != self.tiles.len() {
            return false;
        }
        reachable.into_iter().all(|id| {
            let tile = &self.tiles[id];
            let exclusive = tile.children.is_empty() || tile.clients.is_empty();
            let linked = tile
                .children
                .iter()
                .all(|&c| self.parent(c) == Some(id));
            exclusive && linked
        })
    }
}
