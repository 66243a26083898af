//! Client lifecycle on the driver: add, remove, place, resize, prune.

use tracing::{debug, error};
use weft_common::{ClientId, Direction, TilingError};

use crate::client::Client;
use crate::host::TilingHost;

use super::{Placements, TilingDriver};

impl<H: TilingHost> TilingDriver<H> {
    fn register(&mut self, host: &H, window: H::Window) -> ClientId {
        let id = ClientId(self.next_client_id);
        self.next_client_id += 1;
        let client = Client::new(id, host.window_name(window), host.window_min_size(window));
        debug!(client = %id, name = %client.name, "registered window");
        self.clients.insert(id, window);
        self.client_info.insert(id, client);
        id
    }

    fn unregister(&mut self, id: ClientId) {
        self.clients.remove_by_left(&id);
        self.client_info.remove(&id);
        self.engine.remove_client(id);
    }

    /// Start tiling `window`. A window that is already registered is left
    /// alone and nothing is returned.
    pub fn add_client(&mut self, host: &mut H, root: H::Tile, window: H::Window) -> Placements<H> {
        if self.clients.contains_right(&window) {
            return Vec::new();
        }
        let id = self.register(host, window);
        self.engine.add_client(id);
        self.build_layout(host, root)
    }

    /// Register several windows in order and build once.
    pub fn add_clients(
        &mut self,
        host: &mut H,
        root: H::Tile,
        windows: &[H::Window],
    ) -> Placements<H> {
        for &window in windows {
            if self.clients.contains_right(&window) || !host.window_exists(window) {
                continue;
            }
            let id = self.register(host, window);
            self.engine.add_client(id);
        }
        self.build_layout(host, root)
    }

    /// Stop tiling `window`. Unknown windows are ignored.
    pub fn remove_client(&mut self, host: &mut H, root: H::Tile, window: H::Window) -> Placements<H> {
        let Some(&id) = self.clients.get_by_right(&window) else {
            let e = TilingError::WindowNotMapped(format!("{window:?}"));
            debug!(error = %e, "nothing to remove");
            return Vec::new();
        };
        self.unregister(id);
        self.build_layout(host, root)
    }

    /// Move `window` into the host tile `tile`, next to its occupant on
    /// the side `direction` points to.
    pub fn put_client_in_tile(
        &mut self,
        host: &mut H,
        root: H::Tile,
        window: H::Window,
        tile: H::Tile,
        direction: Option<Direction>,
    ) -> Placements<H> {
        if self.engine.capabilities().tiles_mutable {
            self.regenerate_layout(host, root);
        }
        let Some(&target) = self.tiles.get_by_right(&tile) else {
            let e = TilingError::HostTileNotMapped(format!("{tile:?}"));
            error!(error = %e, "cannot place window");
            return Vec::new();
        };
        let id = match self.clients.get_by_right(&window) {
            Some(&id) => id,
            None => self.register(host, window),
        };
        self.engine.put_client_in_tile(id, target, direction);
        self.build_layout(host, root)
    }

    /// Nudge the split owning the tile that holds `tile` by `amount`.
    pub fn resize_tile(
        &mut self,
        host: &mut H,
        root: H::Tile,
        tile: H::Tile,
        direction: Direction,
        amount: f64,
    ) -> Placements<H> {
        let Some(&target) = self.tiles.get_by_right(&tile) else {
            let e = TilingError::HostTileNotMapped(format!("{tile:?}"));
            error!(error = %e, "cannot resize tile");
            return Vec::new();
        };
        self.engine.resize_tile(target, direction, amount);
        self.build_layout(host, root)
    }

    /// Remember the focused window for active-relative insertion. An
    /// unregistered window clears it.
    pub fn set_active_window(&mut self, window: Option<H::Window>) {
        let id = window.and_then(|w| {
            let id = self.clients.get_by_right(&w).copied();
            if id.is_none() {
                let e = TilingError::WindowNotMapped(format!("{w:?}"));
                debug!(error = %e, "focus left the tiled windows");
            }
            id
        });
        self.engine.set_active_client(id);
    }

    /// Drop every registered window the host no longer knows about.
    /// Returns how many were pruned.
    pub fn fix_clients(&mut self, host: &H) -> usize {
        let dead: Vec<ClientId> = self
            .clients
            .iter()
            .filter(|(_, window)| !host.window_exists(**window))
            .map(|(&id, _)| id)
            .collect();
        for &id in &dead {
            self.unregister(id);
        }
        if !dead.is_empty() {
            debug!(count = dead.len(), "pruned dead windows");
        }
        dead.len()
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.client_info.get(&id)
    }
}
