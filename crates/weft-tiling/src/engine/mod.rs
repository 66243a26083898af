//! Layout engines.
//!
//! An [`Engine`] owns the shared abstract tile tree and one concrete
//! layout algorithm. Algorithms keep their own model of where clients go
//! and project it into the tree on every build.

mod btree;
mod columns;
mod factory;
mod half;
mod monocle;
mod passthrough;
mod three_column;

pub use btree::BTreeLayout;
pub use columns::{clamp_split, ClientBox, MAX_SPLIT, MIN_SPLIT};
pub use factory::create_engine;
pub use half::HalfLayout;
pub use monocle::MonocleLayout;
pub use passthrough::PassthroughLayout;
pub use three_column::{Column, ThreeColumnLayout};

use tracing::{debug, error};
use weft_common::{ClientId, Direction};
use weft_config::{EngineConfig, InsertionPoint, LayoutKind};

use crate::tree::{TileId, TileTree};

/// Deviations from the default build contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Honours `rotate_layout` by flipping split orientations.
    pub translate_rotation: bool,
    /// The host owns tile identity; the tree mirrors the host's.
    pub tiles_mutable: bool,
    /// New clients stay untiled until explicitly placed.
    pub untiled_by_default: bool,
}

/// Per-call inputs the algorithms need besides the client itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EngineContext {
    pub insertion_point: InsertionPoint,
    pub active_client: Option<ClientId>,
    /// Directions arriving in screen space must be transposed.
    pub rotated: bool,
}

#[derive(Debug, Clone)]
pub enum EngineLayout {
    BTree(BTreeLayout),
    Half(HalfLayout),
    ThreeColumn(ThreeColumnLayout),
    Monocle(MonocleLayout),
    Passthrough(PassthroughLayout),
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    capabilities: Capabilities,
    tree: TileTree,
    active_client: Option<ClientId>,
    layout: EngineLayout,
}

impl Engine {
    pub(crate) fn from_parts(
        config: EngineConfig,
        capabilities: Capabilities,
        layout: EngineLayout,
    ) -> Self {
        Self {
            config,
            capabilities,
            tree: TileTree::new(),
            active_client: None,
            layout,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn kind(&self) -> LayoutKind {
        self.config.layout_kind
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn layout(&self) -> &EngineLayout {
        &self.layout
    }

    /// The shared tree as of the last build.
    pub fn tree(&self) -> &TileTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut TileTree {
        &mut self.tree
    }

    pub fn active_client(&self) -> Option<ClientId> {
        self.active_client
    }

    pub fn set_active_client(&mut self, client: Option<ClientId>) {
        self.active_client = client;
    }

    fn rotated(&self) -> bool {
        self.capabilities.translate_rotation && self.config.rotate_layout
    }

    fn context(&self) -> EngineContext {
        EngineContext {
            insertion_point: self.config.insertion_point,
            active_client: self.active_client,
            rotated: self.rotated(),
        }
    }

    /// Rebuild the shared tree from the algorithm's model.
    pub fn build_layout(&mut self) {
        match &mut self.layout {
            EngineLayout::BTree(l) => l.build(&mut self.tree),
            EngineLayout::Half(l) => l.build(&mut self.tree),
            EngineLayout::ThreeColumn(l) => l.build(&mut self.tree),
            EngineLayout::Monocle(l) => l.build(&mut self.tree),
            EngineLayout::Passthrough(_) => return,
        }
        if self.rotated() {
            self.tree.rotate();
        }
    }

    pub fn add_client(&mut self, client: ClientId) {
        let ctx = self.context();
        match &mut self.layout {
            EngineLayout::BTree(l) => l.add_client(client, ctx),
            EngineLayout::Half(l) => l.add_client(client, ctx),
            EngineLayout::ThreeColumn(l) => l.add_client(client, ctx),
            EngineLayout::Monocle(l) => l.add_client(client, ctx),
            EngineLayout::Passthrough(_) => {}
        }
    }

    pub fn remove_client(&mut self, client: ClientId) {
        if self.active_client == Some(client) {
            self.active_client = None;
        }
        match &mut self.layout {
            EngineLayout::BTree(l) => l.remove_client(client),
            EngineLayout::Half(l) => l.remove_client(client),
            EngineLayout::ThreeColumn(l) => l.remove_client(client),
            EngineLayout::Monocle(l) => l.remove_client(client),
            EngineLayout::Passthrough(l) => l.remove_client(&mut self.tree, client),
        }
    }

    /// Place `client` at `tile`, on the side of its current occupant that
    /// `direction` points to.
    pub fn put_client_in_tile(
        &mut self,
        client: ClientId,
        tile: TileId,
        direction: Option<Direction>,
    ) {
        let ctx = self.context();
        let result = match &mut self.layout {
            EngineLayout::BTree(l) => l.put_client_in_tile(&self.tree, client, tile, direction),
            EngineLayout::Half(l) => {
                l.put_client_in_tile(client, tile, direction, ctx);
                Ok(())
            }
            EngineLayout::ThreeColumn(l) => {
                l.put_client_in_tile(client, tile, direction, ctx);
                Ok(())
            }
            EngineLayout::Monocle(l) => {
                l.add_client(client, ctx);
                Ok(())
            }
            EngineLayout::Passthrough(l) => l.put_client_in_tile(&mut self.tree, client, tile),
        };
        if let Err(e) = result {
            error!(%client, error = %e, "failed to place client");
        }
    }

    /// Pull size hints the host wrote into the tree back into the model.
    pub fn regenerate_layout(&mut self) {
        let ctx = self.context();
        match &mut self.layout {
            EngineLayout::BTree(l) => l.regenerate(&self.tree),
            EngineLayout::Half(l) => l.regenerate(&self.tree, ctx),
            EngineLayout::ThreeColumn(l) => l.regenerate(&self.tree, ctx),
            EngineLayout::Monocle(_) | EngineLayout::Passthrough(_) => {}
        }
    }

    /// Nudge the split ratio owning `tile` by `amount` toward `direction`.
    pub fn resize_tile(&mut self, tile: TileId, direction: Direction, amount: f64) {
        let ctx = self.context();
        let result = match &mut self.layout {
            EngineLayout::Half(l) => l.resize_tile(tile, direction, amount, ctx),
            EngineLayout::ThreeColumn(l) => l.resize_tile(tile, direction, amount, ctx),
            _ => {
                debug!(kind = %self.config.layout_kind, "layout has no split ratios to resize");
                Ok(())
            }
        };
        if let Err(e) = result {
            error!(error = %e, "failed to resize tile");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(kind: LayoutKind) -> Engine {
        create_engine(EngineConfig::new(kind))
    }

    #[test]
    fn every_kind_places_added_clients() {
        for kind in LayoutKind::ALL {
            let mut engine = engine(kind);
            for id in 1..=4 {
                engine.add_client(ClientId(id));
            }
            engine.build_layout();
            let expected = if engine.capabilities().untiled_by_default { 0 } else { 4 };
            assert_eq!(engine.tree().client_count(), expected, "{kind}");
            assert!(engine.tree().is_consistent(), "{kind}");
        }
    }

    #[test]
    fn rotation_flips_column_layouts() {
        let config = EngineConfig::new(LayoutKind::Half).with_rotation(true);
        let mut engine = create_engine(config);
        engine.add_client(ClientId(1));
        engine.add_client(ClientId(2));
        engine.build_layout();
        let root = engine.tree().root();
        assert_eq!(
            engine.tree().layout_direction(root),
            Some(crate::tree::LayoutDirection::Vertical)
        );
    }

    #[test]
    fn rotation_is_ignored_without_capability() {
        let config = EngineConfig::new(LayoutKind::Monocle).with_rotation(true);
        let mut engine = create_engine(config);
        engine.add_client(ClientId(1));
        engine.build_layout();
        let root = engine.tree().root();
        assert_eq!(
            engine.tree().layout_direction(root),
            Some(crate::tree::LayoutDirection::Horizontal)
        );
    }

    #[test]
    fn removing_active_client_clears_it() {
        let mut engine = engine(LayoutKind::BTree);
        engine.add_client(ClientId(1));
        engine.set_active_client(Some(ClientId(1)));
        engine.remove_client(ClientId(1));
        assert_eq!(engine.active_client(), None);
    }

    #[test]
    fn build_is_idempotent() {
        for kind in [LayoutKind::BTree, LayoutKind::Half, LayoutKind::ThreeColumn, LayoutKind::Monocle] {
            let mut engine = engine(kind);
            for id in 1..=5 {
                engine.add_client(ClientId(id));
            }
            engine.build_layout();
            let first: Vec<(ClientId, usize)> = engine
                .tree()
                .placements()
                .into_iter()
                .map(|(c, t)| (c, engine.tree().children(engine.tree().parent(t).unwrap_or(t)).len()))
                .collect();
            engine.build_layout();
            let second: Vec<(ClientId, usize)> = engine
                .tree()
                .placements()
                .into_iter()
                .map(|(c, t)| (c, engine.tree().children(engine.tree().parent(t).unwrap_or(t)).len()))
                .collect();
            assert_eq!(first, second, "{kind}");
        }
    }

    #[test]
    fn passthrough_keeps_tree_across_builds() {
        let mut engine = engine(LayoutKind::Passthrough);
        let root = engine.tree().root();
        let (a, _) = engine.tree_mut().split(root).unwrap();
        engine.put_client_in_tile(ClientId(1), a, None);
        engine.build_layout();
        assert_eq!(engine.tree().client(a), Some(ClientId(1)));
        engine.remove_client(ClientId(1));
        assert_eq!(engine.tree().client(a), None);
    }

    #[test]
    fn resize_on_btree_is_a_noop() {
        let mut engine = engine(LayoutKind::BTree);
        engine.add_client(ClientId(1));
        engine.build_layout();
        let root = engine.tree().root();
        engine.resize_tile(root, Direction::right(), 0.1);
        assert_eq!(engine.tree().client(root), Some(ClientId(1)));
    }
}
