use std::collections::HashMap;

use weft_common::ClientId;

use crate::bimap::BiMap;
use crate::client::Client;
use crate::engine::Engine;
use crate::guard::LayoutGuard;
use crate::host::TilingHost;
use crate::tree::TileId;

/// `(window, tile)` pairs produced by a rebuild, in visual order.
pub type Placements<H> = Vec<(<H as TilingHost>::Window, <H as TilingHost>::Tile)>;

/// Owns an engine plus the identity maps between its abstract tree and
/// the host's tree.
pub struct TilingDriver<H: TilingHost> {
    pub(super) engine: Engine,
    pub(super) tiles: BiMap<TileId, H::Tile>,
    pub(super) clients: BiMap<ClientId, H::Window>,
    pub(super) client_info: HashMap<ClientId, Client>,
    pub(super) next_client_id: u32,
    pub(super) guard: LayoutGuard,
}

impl<H: TilingHost> TilingDriver<H> {
    pub fn new(engine: Engine, guard: LayoutGuard) -> Self {
        Self {
            engine,
            tiles: BiMap::new(),
            clients: BiMap::new(),
            client_info: HashMap::new(),
            next_client_id: 1,
            guard,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn guard(&self) -> &LayoutGuard {
        &self.guard
    }

    /// Number of registered windows, tiled or not.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn is_registered(&self, window: H::Window) -> bool {
        self.clients.contains_right(&window)
    }

    pub fn client_for(&self, window: H::Window) -> Option<&Client> {
        let id = self.clients.get_by_right(&window)?;
        self.client_info.get(id)
    }

    /// The host tile the engine last projected `tile` onto.
    pub fn host_tile(&self, tile: TileId) -> Option<H::Tile> {
        self.tiles.get_by_left(&tile).copied()
    }

    /// The abstract tile mapped to `host_tile`.
    pub fn abstract_tile(&self, host_tile: H::Tile) -> Option<TileId> {
        self.tiles.get_by_right(&host_tile).copied()
    }

    pub fn active_window(&self) -> Option<H::Window> {
        let id = self.engine.active_client()?;
        self.clients.get_by_left(&id).copied()
    }

    /// Every registered window: tiled ones in placement order, then the
    /// untiled ones in registration order.
    pub fn windows(&self) -> Vec<H::Window> {
        let placed: Vec<ClientId> = self
            .engine
            .tree()
            .placements()
            .into_iter()
            .map(|(client, _)| client)
            .collect();
        let mut untiled: Vec<ClientId> = self
            .clients
            .iter()
            .map(|(&id, _)| id)
            .filter(|id| !placed.contains(id))
            .collect();
        untiled.sort_unstable();
        placed
            .into_iter()
            .chain(untiled)
            .filter_map(|id| self.clients.get_by_left(&id).copied())
            .collect()
    }
}
