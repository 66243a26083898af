//! Two columns of stacked clients with a movable divider.

use std::collections::HashMap;

use tracing::debug;
use weft_common::{ClientId, Direction, TilingError};
use weft_config::InsertionPoint;

use crate::tree::{LayoutDirection, TileId, TileTree};

use super::columns::{self, clamp_split, ClientBox};
use super::EngineContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct HalfLayout {
    left: Vec<ClientBox>,
    right: Vec<ClientBox>,
    /// Share of the screen given to the left column.
    middle_split: f64,
    tile_clients: HashMap<TileId, ClientId>,
    group_tiles: Option<(TileId, TileId)>,
}

impl Default for HalfLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HalfLayout {
    pub fn new() -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            middle_split: 0.5,
            tile_clients: HashMap::new(),
            group_tiles: None,
        }
    }

    pub fn left(&self) -> Vec<ClientId> {
        self.left.iter().map(|b| b.client).collect()
    }

    pub fn right(&self) -> Vec<ClientId> {
        self.right.iter().map(|b| b.client).collect()
    }

    pub fn middle_split(&self) -> f64 {
        self.middle_split
    }

    fn side(&self, side: Side) -> &Vec<ClientBox> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<ClientBox> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn locate(&self, client: ClientId) -> Option<(Side, usize)> {
        if let Some(i) = columns::position_of(&self.left, client) {
            return Some((Side::Left, i));
        }
        columns::position_of(&self.right, client).map(|i| (Side::Right, i))
    }

    fn insert_at(&mut self, side: Side, index: usize, b: ClientBox) {
        let group = self.side_mut(side);
        let index = index.min(group.len());
        group.insert(index, b);
        columns::forget_sizes(group);
    }

    fn take(&mut self, client: ClientId) -> Option<ClientBox> {
        let (side, i) = self.locate(client)?;
        let group = self.side_mut(side);
        let b = group.remove(i);
        columns::forget_sizes(group);
        Some(b)
    }

    /// Never leave one column empty while the other could spare a box.
    fn rebalance(&mut self) {
        if self.left.is_empty() && self.right.len() >= 2 {
            let b = self.right.remove(0);
            self.left.push(b);
        } else if self.right.is_empty() && self.left.len() >= 2 {
            if let Some(b) = self.left.pop() {
                self.right.push(b);
            }
        } else {
            return;
        }
        columns::forget_sizes(&mut self.left);
        columns::forget_sizes(&mut self.right);
    }

    fn insert_by_policy(&mut self, b: ClientBox, side: Side) {
        let other = match side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        if self.left.is_empty() && self.right.is_empty() {
            self.side_mut(side).push(b);
        } else if self.side(other).is_empty() {
            let moved = std::mem::take(self.side_mut(side));
            *self.side_mut(other) = moved;
            columns::forget_sizes(self.side_mut(other));
            self.side_mut(side).push(b);
        } else {
            match side {
                Side::Left => self.insert_at(Side::Left, 0, b),
                Side::Right => {
                    let end = self.right.len();
                    self.insert_at(Side::Right, end, b);
                }
            }
        }
    }

    pub(super) fn build(&mut self, tree: &mut TileTree) {
        tree.clear();
        self.tile_clients.clear();
        self.group_tiles = None;
        let root = tree.root();

        match (self.left.is_empty(), self.right.is_empty()) {
            (true, true) => {}
            (false, true) | (true, false) => {
                let group = if self.left.is_empty() { &self.right } else { &self.left };
                if let Some(t) = tree.get_mut(root) {
                    t.layout_direction = LayoutDirection::Vertical;
                }
                columns::build_stack(tree, root, group, &mut self.tile_clients);
            }
            (false, false) => {
                let (Some(l), Some(r)) = (tree.add_child(root), tree.add_child(root)) else {
                    debug!("could not add column tiles");
                    return;
                };
                let split = clamp_split(self.middle_split);
                for (tile, share) in [(l, split), (r, 1.0 - split)] {
                    if let Some(t) = tree.get_mut(tile) {
                        t.relative_size = Some(share);
                    }
                }
                columns::build_stack(tree, l, &self.left, &mut self.tile_clients);
                columns::build_stack(tree, r, &self.right, &mut self.tile_clients);
                self.group_tiles = Some((l, r));
            }
        }
    }

    pub(super) fn add_client(&mut self, client: ClientId, ctx: EngineContext) {
        if self.locate(client).is_some() {
            return;
        }
        let b = ClientBox::new(client);
        match ctx.insertion_point {
            InsertionPoint::Left => self.insert_by_policy(b, Side::Left),
            InsertionPoint::Right => self.insert_by_policy(b, Side::Right),
            InsertionPoint::Active => {
                match ctx.active_client.and_then(|c| self.locate(c)) {
                    Some((side, i)) => self.insert_at(side, i + 1, b),
                    None => self.insert_by_policy(b, Side::Left),
                }
            }
        }
    }

    pub(super) fn remove_client(&mut self, client: ClientId) {
        if self.take(client).is_none() {
            debug!(%client, "client not in either column");
            return;
        }
        self.rebalance();
    }

    pub(super) fn put_client_in_tile(
        &mut self,
        client: ClientId,
        tile: TileId,
        direction: Option<Direction>,
        ctx: EngineContext,
    ) {
        let Some(&target) = self.tile_clients.get(&tile) else {
            debug!(?tile, "no box in target tile, adding normally");
            self.add_client(client, ctx);
            return;
        };
        if target == client {
            return;
        }
        let b = self.take(client).unwrap_or_else(|| ClientBox::new(client));
        let Some((side, i)) = self.locate(target) else {
            self.insert_by_policy(b, Side::Left);
            self.rebalance();
            return;
        };
        let before = direction
            .map(|d| if ctx.rotated { d.transposed() } else { d })
            .is_some_and(Direction::points_to_start);
        let index = if before { i } else { i + 1 };
        self.insert_at(side, index, b);
        self.rebalance();
    }

    pub(super) fn resize_tile(
        &mut self,
        tile: TileId,
        direction: Direction,
        amount: f64,
        ctx: EngineContext,
    ) -> Result<(), TilingError> {
        if !self.tile_clients.contains_key(&tile) {
            return Err(TilingError::TileNotInLayout(format!("{tile:?}")));
        }
        if self.left.is_empty() || self.right.is_empty() {
            debug!("single column, nothing to resize");
            return Ok(());
        }
        let direction = if ctx.rotated { direction.transposed() } else { direction };
        if direction.is_vertical() {
            debug!("resizing along the stack is left to the host");
            return Ok(());
        }
        let delta = if direction.contains(Direction::RIGHT) { amount } else { -amount };
        self.middle_split = clamp_split(self.middle_split + delta);
        Ok(())
    }

    pub(super) fn regenerate(&mut self, tree: &TileTree, ctx: EngineContext) {
        columns::remember_sizes(
            tree,
            &self.tile_clients,
            &mut [&mut self.left, &mut self.right],
        );
        let Some((l, r)) = self.group_tiles else {
            return;
        };
        let span = |tile: TileId| {
            tree.get(tile)
                .and_then(|t| t.requested_size)
                .map(|s| if ctx.rotated { s.height } else { s.width })
        };
        if let (Some(lw), Some(rw)) = (span(l), span(r)) {
            if lw + rw > 0.0 {
                self.middle_split = clamp_split(lw / (lw + rw));
            }
        }
    }
}
