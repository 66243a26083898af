//! Reading host-side edits back into the engine.

use std::collections::VecDeque;

use tracing::debug;

use crate::host::TilingHost;

use super::{Placements, TilingDriver};

impl<H: TilingHost> TilingDriver<H> {
    /// Copy the host's current tile sizes into the abstract tree and let
    /// the engine pick them up. Engines that mirror the host first rebuild
    /// the abstract tree from the host's.
    ///
    /// Ignored while a layout build holds the guard.
    pub fn regenerate_layout(&mut self, host: &H, root: H::Tile) {
        if self.guard.is_held() {
            debug!("layout build in progress, not regenerating");
            return;
        }
        if self.engine.capabilities().tiles_mutable {
            self.mirror_host_tree(host, root);
        }

        let mut queue = VecDeque::from([root]);
        while let Some(host_tile) = queue.pop_front() {
            queue.extend(host.tile_children(host_tile));
            let Some(&tile) = self.tiles.get_by_right(&host_tile) else {
                continue;
            };
            let size = host.tile_absolute_geometry(host_tile).size();
            if let Some(t) = self.engine.tree_mut().get_mut(tile) {
                t.requested_size = Some(size);
            }
        }
        self.engine.regenerate_layout();
    }

    /// Host notification that its tree changed outside a layout build.
    /// Regenerates and rebuilds so the engine settles on the host's edit.
    pub fn handle_tiles_changed(&mut self, host: &mut H, root: H::Tile) -> Placements<H> {
        if self.guard.is_held() {
            return Vec::new();
        }
        self.regenerate_layout(host, root);
        self.build_layout(host, root)
    }

    /// Rebuild the abstract tree as a copy of the host tree under `root`,
    /// with occupants taken from where the host says each window sits.
    fn mirror_host_tree(&mut self, host: &H, root: H::Tile) {
        let tree = self.engine.tree_mut();
        let abstract_root = tree.root();
        tree.remove_children(abstract_root);
        tree.clear_clients(abstract_root);
        self.tiles.clear();
        self.tiles.insert(abstract_root, root);

        let mut queue = VecDeque::from([(abstract_root, root)]);
        while let Some((tile, host_tile)) = queue.pop_front() {
            if let Some(t) = tree.get_mut(tile) {
                t.layout_direction = host.tile_layout_direction(host_tile);
            }
            for host_child in host.tile_children(host_tile) {
                let Some(child) = tree.add_child(tile) else {
                    continue;
                };
                self.tiles.insert(child, host_child);
                queue.push_back((child, host_child));
            }
        }

        for (&client, &window) in self.clients.iter() {
            let Some(host_tile) = host.window_tile(window) else {
                continue;
            };
            if let Some(&tile) = self.tiles.get_by_right(&host_tile) {
                tree.push_client(tile, client);
            }
        }
        debug!(tiles = self.tiles.len(), "mirrored host tree");
    }
}
