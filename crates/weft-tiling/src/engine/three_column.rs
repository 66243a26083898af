//! A centre column flanked by two side columns.
//!
//! The centre fills first and is never left empty while a side holds a
//! client. Side widths are stored as shares of the screen; the centre gets
//! the remainder and never drops below the minimum split.

use std::collections::HashMap;

use tracing::debug;
use weft_common::{ClientId, Direction, TilingError};
use weft_config::InsertionPoint;

use crate::tree::{LayoutDirection, TileId, TileTree};

use super::columns::{self, ClientBox, MAX_SPLIT, MIN_SPLIT};
use super::EngineContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Left,
    Center,
    Right,
}

impl Column {
    const ALL: [Column; 3] = [Column::Left, Column::Center, Column::Right];
}

#[derive(Debug, Clone)]
pub struct ThreeColumnLayout {
    left: Vec<ClientBox>,
    center: Vec<ClientBox>,
    right: Vec<ClientBox>,
    left_split: f64,
    right_split: f64,
    tile_clients: HashMap<TileId, ClientId>,
    group_tiles: HashMap<Column, TileId>,
}

impl Default for ThreeColumnLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreeColumnLayout {
    pub fn new() -> Self {
        Self {
            left: Vec::new(),
            center: Vec::new(),
            right: Vec::new(),
            left_split: 0.25,
            right_split: 0.25,
            tile_clients: HashMap::new(),
            group_tiles: HashMap::new(),
        }
    }

    pub fn column(&self, column: Column) -> Vec<ClientId> {
        self.group(column).iter().map(|b| b.client).collect()
    }

    /// Left and right column shares.
    pub fn splits(&self) -> (f64, f64) {
        (self.left_split, self.right_split)
    }

    fn group(&self, column: Column) -> &Vec<ClientBox> {
        match column {
            Column::Left => &self.left,
            Column::Center => &self.center,
            Column::Right => &self.right,
        }
    }

    fn group_mut(&mut self, column: Column) -> &mut Vec<ClientBox> {
        match column {
            Column::Left => &mut self.left,
            Column::Center => &mut self.center,
            Column::Right => &mut self.right,
        }
    }

    fn locate(&self, client: ClientId) -> Option<(Column, usize)> {
        Column::ALL
            .into_iter()
            .find_map(|c| columns::position_of(self.group(c), client).map(|i| (c, i)))
    }

    fn insert_at(&mut self, column: Column, index: usize, b: ClientBox) {
        let group = self.group_mut(column);
        let index = index.min(group.len());
        group.insert(index, b);
        columns::forget_sizes(group);
    }

    fn take(&mut self, client: ClientId) -> Option<ClientBox> {
        let (column, i) = self.locate(client)?;
        let group = self.group_mut(column);
        let b = group.remove(i);
        columns::forget_sizes(group);
        Some(b)
    }

    fn move_box(&mut self, from: Column, take_last: bool, to: Column) {
        let source = self.group_mut(from);
        let b = if take_last {
            source.pop()
        } else if source.is_empty() {
            None
        } else {
            Some(source.remove(0))
        };
        columns::forget_sizes(source);
        if let Some(b) = b {
            let target = self.group_mut(to);
            target.push(b);
            columns::forget_sizes(target);
        }
    }

    fn rebalance(&mut self) {
        if self.center.is_empty() && !(self.left.is_empty() && self.right.is_empty()) {
            if self.left.len() >= self.right.len() {
                self.move_box(Column::Left, true, Column::Center);
            } else {
                self.move_box(Column::Right, false, Column::Center);
            }
        }
        if self.left.is_empty() && self.right.len() >= 2 {
            self.move_box(Column::Right, false, Column::Left);
        } else if self.right.is_empty() && self.left.len() >= 2 {
            self.move_box(Column::Left, true, Column::Right);
        }
    }

    fn insert_by_policy(&mut self, b: ClientBox, policy: InsertionPoint) {
        if self.center.is_empty() {
            self.insert_at(Column::Center, 0, b);
            return;
        }
        match policy {
            InsertionPoint::Right => {
                if self.right.len() > self.left.len() {
                    let end = self.left.len();
                    self.insert_at(Column::Left, end, b);
                } else {
                    let end = self.right.len();
                    self.insert_at(Column::Right, end, b);
                }
            }
            _ => {
                if self.left.len() > self.right.len() {
                    self.insert_at(Column::Right, 0, b);
                } else {
                    self.insert_at(Column::Left, 0, b);
                }
            }
        }
    }

    fn column_of_tile(&self, tile: TileId) -> Option<Column> {
        if let Some(&client) = self.tile_clients.get(&tile) {
            return self.locate(client).map(|(c, _)| c);
        }
        self.group_tiles
            .iter()
            .find(|(_, t)| **t == tile)
            .map(|(c, _)| *c)
    }

    fn present(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|&c| !self.group(c).is_empty())
            .collect()
    }

    fn share(&self, column: Column) -> f64 {
        match column {
            Column::Left => self.left_split,
            Column::Center => 1.0 - self.left_split - self.right_split,
            Column::Right => self.right_split,
        }
    }

    pub(super) fn build(&mut self, tree: &mut TileTree) {
        tree.clear();
        self.tile_clients.clear();
        self.group_tiles.clear();
        let root = tree.root();
        let present = self.present();

        match present.as_slice() {
            [] => {}
            [only] => {
                if let Some(t) = tree.get_mut(root) {
                    t.layout_direction = LayoutDirection::Vertical;
                }
                let group = match only {
                    Column::Left => &self.left,
                    Column::Center => &self.center,
                    Column::Right => &self.right,
                };
                columns::build_stack(tree, root, group, &mut self.tile_clients);
            }
            columns_present => {
                let total: f64 = columns_present.iter().map(|&c| self.share(c)).sum();
                for &column in columns_present {
                    let Some(tile) = tree.add_child(root) else {
                        debug!(?column, "could not add column tile");
                        continue;
                    };
                    if let Some(t) = tree.get_mut(tile) {
                        t.relative_size = Some(self.share(column) / total);
                    }
                    let group = match column {
                        Column::Left => &self.left,
                        Column::Center => &self.center,
                        Column::Right => &self.right,
                    };
                    columns::build_stack(tree, tile, group, &mut self.tile_clients);
                    self.group_tiles.insert(column, tile);
                }
            }
        }
    }

    pub(super) fn add_client(&mut self, client: ClientId, ctx: EngineContext) {
        if self.locate(client).is_some() {
            return;
        }
        let b = ClientBox::new(client);
        match ctx.insertion_point {
            InsertionPoint::Active => match ctx.active_client.and_then(|c| self.locate(c)) {
                Some((column, i)) => self.insert_at(column, i + 1, b),
                None => self.insert_by_policy(b, InsertionPoint::Left),
            },
            policy => self.insert_by_policy(b, policy),
        }
    }

    pub(super) fn remove_client(&mut self, client: ClientId) {
        if self.take(client).is_none() {
            debug!(%client, "client not in any column");
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
        let Some((column, i)) = self.locate(target) else {
            self.insert_by_policy(b, InsertionPoint::Left);
            self.rebalance();
            return;
        };
        let before = direction
            .map(|d| if ctx.rotated { d.transposed() } else { d })
            .is_some_and(Direction::points_to_start);
        self.insert_at(column, if before { i } else { i + 1 }, b);
        self.rebalance();
    }

    pub(super) fn resize_tile(
        &mut self,
        tile: TileId,
        direction: Direction,
        amount: f64,
        ctx: EngineContext,
    ) -> Result<(), TilingError> {
        let column = self
            .column_of_tile(tile)
            .ok_or_else(|| TilingError::TileNotInLayout(format!("{tile:?}")))?;
        if self.present().len() < 2 {
            debug!("single column, nothing to resize");
            return Ok(());
        }
        let direction = if ctx.rotated { direction.transposed() } else { direction };
        if direction.is_vertical() {
            debug!("resizing along the stack is left to the host");
            return Ok(());
        }
        let toward_end = direction.contains(Direction::RIGHT);
        let (mut left, mut right) = (self.left_split, self.right_split);
        match column {
            Column::Left => left += if toward_end { amount } else { -amount },
            Column::Right => right += if toward_end { -amount } else { amount },
            Column::Center => {
                let half = if toward_end { amount / 2.0 } else { -amount / 2.0 };
                left -= half;
                right -= half;
            }
        }
        let left = left.clamp(MIN_SPLIT, MAX_SPLIT);
        let right = right.clamp(MIN_SPLIT, MAX_SPLIT);
        if 1.0 - left - right < MIN_SPLIT || left.is_nan() || right.is_nan() {
            debug!(?column, "centre column at its minimum");
            return Ok(());
        }
        self.left_split = left;
        self.right_split = right;
        Ok(())
    }

    pub(super) fn regenerate(&mut self, tree: &TileTree, ctx: EngineContext) {
        columns::remember_sizes(
            tree,
            &self.tile_clients,
            &mut [&mut self.left, &mut self.center, &mut self.right],
        );
        let span = |column: Column| {
            let tile = self.group_tiles.get(&column)?;
            tree.get(*tile)
                .and_then(|t| t.requested_size)
                .map(|s| if ctx.rotated { s.height } else { s.width })
        };
        let present = self.present();
        let spans: Vec<(Column, f64)> = present
            .iter()
            .filter_map(|&c| span(c).map(|s| (c, s)))
            .collect();
        if spans.len() < 2 || spans.len() != present.len() {
            return;
        }
        let measured: f64 = spans.iter().map(|&(_, s)| s).sum();
        if measured <= 0.0 {
            return;
        }
        // The present columns keep the screen share they had between them;
        // an absent column's share is left alone.
        let stored: f64 = present.iter().map(|&c| self.share(c)).sum();
        let (mut left, mut right) = (self.left_split, self.right_split);
        for &(column, span) in &spans {
            let share = span / measured * stored;
            match column {
                Column::Left => left = share,
                Column::Right => right = share,
                Column::Center => {}
            }
        }
        let left = left.clamp(MIN_SPLIT, MAX_SPLIT);
        let right = right.clamp(MIN_SPLIT, MAX_SPLIT);
        if 1.0 - left - right >= MIN_SPLIT {
            self.left_split = left;
            self.right_split = right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use weft_common::Size;

    fn ctx(insertion_point: InsertionPoint) -> EngineContext {
        EngineContext {
            insertion_point,
            active_client: None,
            rotated: false,
        }
    }

    fn ids(v: &[u32]) -> Vec<ClientId> {
        v.iter().copied().map(ClientId).collect()
    }

    fn filled(n: u32, policy: InsertionPoint) -> ThreeColumnLayout {
        let mut layout = ThreeColumnLayout::new();
        for id in 1..=n {
            layout.add_client(ClientId(id), ctx(policy));
        }
        layout
    }

    #[test]
    fn left_policy_fills_center_left_right() {
        let mut layout = ThreeColumnLayout::new();
        layout.add_client(ClientId(1), ctx(InsertionPoint::Left));
        assert_eq!(layout.column(Column::Center), ids(&[1]));
        assert!(layout.column(Column::Left).is_empty());

        layout.add_client(ClientId(2), ctx(InsertionPoint::Left));
        assert_eq!(layout.column(Column::Center), ids(&[1]));
        assert_eq!(layout.column(Column::Left), ids(&[2]));
        assert!(layout.column(Column::Right).is_empty());

        layout.add_client(ClientId(3), ctx(InsertionPoint::Left));
        assert_eq!(layout.column(Column::Center), ids(&[1]));
        assert_eq!(layout.column(Column::Left), ids(&[2]));
        assert_eq!(layout.column(Column::Right), ids(&[3]));
    }

    #[test]
    fn right_policy_mirrors() {
        let layout = filled(3, InsertionPoint::Right);
        assert_eq!(layout.column(Column::Center), ids(&[1]));
        assert_eq!(layout.column(Column::Right), ids(&[2]));
        assert_eq!(layout.column(Column::Left), ids(&[3]));
    }

    #[test]
    fn emptied_center_takes_from_larger_side() {
        let mut layout = filled(5, InsertionPoint::Right);
        // center [1], right [2, 4], left [3, 5]
        assert_eq!(layout.column(Column::Right), ids(&[2, 4]));
        layout.remove_client(ClientId(1));
        assert_eq!(layout.column(Column::Center), ids(&[5]));
        assert_eq!(layout.column(Column::Left), ids(&[3]));
    }

    #[test]
    fn emptied_side_takes_from_full_side() {
        let mut layout = filled(4, InsertionPoint::Right);
        // center [1], right [2, 4], left [3]
        layout.remove_client(ClientId(3));
        assert_eq!(layout.column(Column::Left), ids(&[2]));
        assert_eq!(layout.column(Column::Right), ids(&[4]));
    }

    #[test]
    fn build_shares_follow_splits() {
        let mut layout = filled(3, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let cols = tree.children(tree.root()).to_vec();
        let shares: Vec<f64> = cols
            .iter()
            .map(|&c| tree.get(c).unwrap().relative_size.unwrap())
            .collect();
        assert_eq!(shares, vec![0.25, 0.5, 0.25]);
        assert_eq!(tree.client(cols[1]), Some(ClientId(1)));
    }

    #[test]
    fn two_columns_normalize_shares() {
        let mut layout = filled(2, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let cols = tree.children(tree.root()).to_vec();
        let left = tree.get(cols[0]).unwrap().relative_size.unwrap();
        let center = tree.get(cols[1]).unwrap().relative_size.unwrap();
        assert!((left - 1.0 / 3.0).abs() < 1e-9);
        assert!((center - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn center_resize_trades_with_both_sides() {
        let mut layout = filled(3, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let center = tree.children(tree.root())[1];
        layout
            .resize_tile(center, Direction::right(), 0.1, ctx(InsertionPoint::Left))
            .unwrap();
        let (l, r) = layout.splits();
        assert!((l - 0.2).abs() < 1e-9);
        assert!((r - 0.2).abs() < 1e-9);

        layout
            .resize_tile(center, Direction::left(), 0.2, ctx(InsertionPoint::Left))
            .unwrap();
        let (l, r) = layout.splits();
        assert!((l - 0.3).abs() < 1e-9);
        assert!((r - 0.3).abs() < 1e-9);
    }

    #[test]
    fn side_resize_moves_own_divider() {
        let mut layout = filled(3, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let cols = tree.children(tree.root()).to_vec();
        layout
            .resize_tile(cols[0], Direction::right(), 0.1, ctx(InsertionPoint::Left))
            .unwrap();
        layout
            .resize_tile(cols[2], Direction::left(), 0.05, ctx(InsertionPoint::Left))
            .unwrap();
        let (l, r) = layout.splits();
        assert!((l - 0.35).abs() < 1e-9);
        assert!((r - 0.3).abs() < 1e-9);
    }

    #[test]
    fn regenerate_reads_widths() {
        let mut layout = filled(3, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let cols = tree.children(tree.root()).to_vec();
        for (&tile, width) in cols.iter().zip([200.0, 500.0, 300.0]) {
            tree.get_mut(tile).unwrap().requested_size = Some(Size::new(width, 800.0));
        }
        layout.regenerate(&tree, ctx(InsertionPoint::Left));
        let (l, r) = layout.splits();
        assert!((l - 0.2).abs() < 1e-9);
        assert!((r - 0.3).abs() < 1e-9);
    }

    #[test]
    fn regenerate_with_two_columns_keeps_absent_share() {
        let mut layout = filled(2, InsertionPoint::Left);
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let cols = tree.children(tree.root()).to_vec();
        assert_eq!(cols.len(), 2);
        for (&tile, width) in cols.iter().zip([400.0, 600.0]) {
            tree.get_mut(tile).unwrap().requested_size = Some(Size::new(width, 800.0));
        }
        layout.regenerate(&tree, ctx(InsertionPoint::Left));
        let (l, r) = layout.splits();
        // Left and centre shared 0.75 of the screen; left now has 40% of it.
        assert!((l - 0.3).abs() < 1e-9);
        assert!((r - 0.25).abs() < 1e-9);
    }

    #[test]
    fn put_inserts_into_target_column() {
        let mut layout = filled(4, InsertionPoint::Left);
        // center [1], left [4, 2], right [3]
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        let center = tree.children(tree.root())[1];
        layout.put_client_in_tile(ClientId(2), center, Some(Direction::down()), ctx(InsertionPoint::Left));
        assert_eq!(layout.column(Column::Center), ids(&[1, 2]));
        assert_eq!(layout.column(Column::Left), ids(&[4]));
    }

    proptest! {
        #[test]
        fn resize_keeps_every_column_above_minimum(
            steps in proptest::collection::vec((0usize..3, any::<bool>(), 0.0f64..0.4), 1..40)
        ) {
            let mut layout = filled(3, InsertionPoint::Left);
            let mut tree = TileTree::new();
            layout.build(&mut tree);
            let cols = tree.children(tree.root()).to_vec();
            for (col, right, amount) in steps {
                let dir = if right { Direction::right() } else { Direction::left() };
                layout.resize_tile(cols[col], dir, amount, ctx(InsertionPoint::Left)).unwrap();
                let (l, r) = layout.splits();
                prop_assert!((MIN_SPLIT..=MAX_SPLIT).contains(&l));
                prop_assert!((MIN_SPLIT..=MAX_SPLIT).contains(&r));
                prop_assert!(1.0 - l - r >= MIN_SPLIT - 1e-12);
            }
        }
    }
}
