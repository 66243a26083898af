//! Binary space partitioning: every split holds exactly two children.
//!
//! New clients fill the first leaf found breadth first, splitting it if
//! occupied. Traversal order and the side the new client lands on follow
//! the insertion point, so repeated inserts keep growing one side.

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;
use weft_common::{ClientId, Direction, Size, TilingError};
use weft_config::InsertionPoint;

use crate::bimap::BiMap;
use crate::tree::{LayoutDirection, TileId, TileTree};

use super::EngineContext;

new_key_type! {
    struct NodeKey;
}

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<NodeKey>,
    children: Option<[NodeKey; 2]>,
    client: Option<ClientId>,
    requested_size: Option<Size>,
}

#[derive(Debug, Clone)]
pub struct BTreeLayout {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
    node_tiles: BiMap<NodeKey, TileId>,
}

impl Default for BTreeLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl BTreeLayout {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        Self {
            nodes,
            root,
            node_tiles: BiMap::new(),
        }
    }

    /// Number of clients in the model.
    pub fn client_count(&self) -> usize {
        self.nodes.values().filter(|n| n.client.is_some()).count()
    }

    fn bfs(&self, reversed: bool) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([self.root]);
        while let Some(key) = queue.pop_front() {
            out.push(key);
            if let Some([a, b]) = self.nodes[key].children {
                if reversed {
                    queue.extend([b, a]);
                } else {
                    queue.extend([a, b]);
                }
            }
        }
        out
    }

    fn nodes_holding(&self, client: ClientId) -> Vec<NodeKey> {
        self.bfs(false)
            .into_iter()
            .filter(|&k| self.nodes[k].client == Some(client))
            .collect()
    }

    fn sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.nodes.get(key)?.parent?;
        let [a, b] = self.nodes[parent].children?;
        Some(if a == key { b } else { a })
    }

    /// Layout direction `key` gets when built under a root laid out as `root`.
    fn orientation_at(&self, key: NodeKey, root: LayoutDirection) -> LayoutDirection {
        let mut direction = root;
        let mut current = key;
        while let Some(parent) = self.nodes.get(current).and_then(|n| n.parent) {
            direction = direction.perpendicular();
            current = parent;
        }
        direction
    }

    /// Put `client` into a leaf: directly if empty, otherwise by splitting
    /// it and placing the new client first or second.
    fn fill_or_split(&mut self, key: NodeKey, client: ClientId, new_first: bool) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        if node.children.is_some() {
            return false;
        }
        let Some(old) = node.client.take() else {
            node.client = Some(client);
            return true;
        };
        let (first, second) = if new_first { (client, old) } else { (old, client) };
        let a = self.nodes.insert(Node {
            parent: Some(key),
            client: Some(first),
            ..Node::default()
        });
        let b = self.nodes.insert(Node {
            parent: Some(key),
            client: Some(second),
            ..Node::default()
        });
        self.nodes[key].children = Some([a, b]);
        true
    }

    fn insert_first_leaf(&mut self, client: ClientId, insertion_point: InsertionPoint) {
        let reversed = insertion_point == InsertionPoint::Right;
        let leaf = self
            .bfs(reversed)
            .into_iter()
            .find(|&k| self.nodes[k].children.is_none());
        if let Some(leaf) = leaf {
            self.fill_or_split(leaf, client, !reversed);
        }
    }

    /// Remove a leaf and fold its sibling into their parent.
    fn remove_node(&mut self, key: NodeKey) {
        if key == self.root {
            self.nodes[key].client = None;
            return;
        }
        let Some(sibling) = self.sibling(key) else {
            debug!("node has no sibling, not removing");
            return;
        };
        let Some(parent) = self.nodes[key].parent else {
            return;
        };
        if self.nodes[key].children.is_some() {
            debug!("node has children, not removing");
            return;
        }

        match self.nodes[sibling].children {
            Some([a, b]) => {
                for child in [a, b] {
                    let node = &mut self.nodes[child];
                    node.parent = Some(parent);
                    node.requested_size = None;
                }
                self.nodes[parent].children = Some([a, b]);
            }
            None => {
                let client = self.nodes[sibling].client;
                let p = &mut self.nodes[parent];
                p.children = None;
                p.client = client;
            }
        }
        self.nodes.remove(key);
        self.nodes.remove(sibling);
    }

    pub(super) fn build(&mut self, tree: &mut TileTree) {
        tree.clear();
        self.node_tiles.clear();

        let mut queue = VecDeque::from([(self.root, tree.root())]);
        while let Some((key, tile)) = queue.pop_front() {
            self.node_tiles.insert(key, tile);
            let node = &self.nodes[key];
            if let Some(t) = tree.get_mut(tile) {
                t.requested_size = node.requested_size;
            }
            match node.children {
                Some([a, b]) => {
                    let Some((ta, tb)) = tree.split(tile) else {
                        debug!(?tile, "could not split tile");
                        continue;
                    };
                    queue.extend([(a, ta), (b, tb)]);
                }
                None => {
                    if let Some(client) = node.client {
                        tree.set_client(tile, client);
                    }
                }
            }
        }
    }

    pub(super) fn add_client(&mut self, client: ClientId, ctx: EngineContext) {
        if !self.nodes_holding(client).is_empty() {
            return;
        }
        if ctx.insertion_point == InsertionPoint::Active {
            let active = ctx
                .active_client
                .and_then(|c| self.nodes_holding(c).into_iter().next());
            if let Some(active) = active {
                self.fill_or_split(active, client, false);
                return;
            }
            self.insert_first_leaf(client, InsertionPoint::Left);
            return;
        }
        self.insert_first_leaf(client, ctx.insertion_point);
    }

    pub(super) fn remove_client(&mut self, client: ClientId) {
        let matches = self.nodes_holding(client);
        if matches.is_empty() {
            debug!(%client, "client not in tree");
        }
        for key in matches {
            self.remove_node(key);
        }
    }

    pub(super) fn put_client_in_tile(
        &mut self,
        tree: &TileTree,
        client: ClientId,
        tile: TileId,
        direction: Option<Direction>,
    ) -> Result<(), TilingError> {
        let mut target = *self
            .node_tiles
            .get_by_right(&tile)
            .ok_or_else(|| TilingError::TileNotInLayout(format!("{tile:?}")))?;
        match self.nodes.get(target) {
            Some(node) if node.client == Some(client) => return Ok(()),
            Some(_) => {}
            None => return Err(TilingError::TileNotInLayout(format!("{tile:?}"))),
        }

        for key in self.nodes_holding(client) {
            let sibling = self.sibling(key);
            let parent = self.nodes[key].parent;
            self.remove_node(key);
            if sibling == Some(target) {
                if let Some(parent) = parent {
                    target = parent;
                }
            }
        }

        // Removal may have promoted the target; its orientation is the one it
        // will be built with, not the one in the current tree.
        let orientation = tree
            .layout_direction(tree.root())
            .map(|root| self.orientation_at(target, root));
        let new_first = match (direction, orientation) {
            (Some(dir), Some(LayoutDirection::Horizontal)) => !dir.contains(Direction::RIGHT),
            (Some(dir), Some(LayoutDirection::Vertical)) => dir.contains(Direction::UP),
            _ => false,
        };
        if !self.fill_or_split(target, client, new_first) {
            debug!(%client, ?tile, "target has children, appending instead");
            self.insert_first_leaf(client, InsertionPoint::Left);
        }
        Ok(())
    }

    pub(super) fn regenerate(&mut self, tree: &TileTree) {
        for (&key, &tile) in self.node_tiles.iter() {
            let size = tree.get(tile).and_then(|t| t.requested_size);
            if let Some(node) = self.nodes.get_mut(key) {
                node.requested_size = size;
            }
        }
    }
}
