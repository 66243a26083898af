//! Passthrough: the host owns the tile tree; clients sit wherever they are
//! put.
//!
//! The shared tree is never cleared here. The driver mirrors the host tree
//! into it during regeneration, and placements only record occupancy.

use tracing::debug;
use weft_common::{ClientId, TilingError};

use crate::tree::{TileId, TileTree};

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLayout;

impl PassthroughLayout {
    pub(super) fn remove_client(&self, tree: &mut TileTree, client: ClientId) {
        if !tree.remove_client(client) {
            debug!(%client, "client was not in any tile");
        }
    }

    pub(super) fn put_client_in_tile(
        &self,
        tree: &mut TileTree,
        client: ClientId,
        tile: TileId,
    ) -> Result<(), TilingError> {
        if !tree.contains(tile) {
            return Err(TilingError::TileNotInLayout(format!("{tile:?}")));
        }
        tree.remove_client(client);
        if !tree.set_client(tile, client) {
            debug!(%client, ?tile, "target tile has children, client left untiled");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_moves_client_between_tiles() {
        let mut tree = TileTree::new();
        let (a, b) = tree.split(tree.root()).unwrap();
        let layout = PassthroughLayout;
        layout.put_client_in_tile(&mut tree, ClientId(1), a).unwrap();
        layout.put_client_in_tile(&mut tree, ClientId(1), b).unwrap();
        assert_eq!(tree.client(a), None);
        assert_eq!(tree.client(b), Some(ClientId(1)));
    }

    #[test]
    fn put_on_parent_tile_leaves_client_untiled() {
        let mut tree = TileTree::new();
        let root = tree.root();
        tree.split(root).unwrap();
        let layout = PassthroughLayout;
        layout.put_client_in_tile(&mut tree, ClientId(1), root).unwrap();
        assert_eq!(tree.find_client(ClientId(1)), None);
        assert!(tree.is_consistent());
    }

    #[test]
    fn remove_clears_occupancy() {
        let mut tree = TileTree::new();
        let root = tree.root();
        let layout = PassthroughLayout;
        layout.put_client_in_tile(&mut tree, ClientId(4), root).unwrap();
        layout.remove_client(&mut tree, ClientId(4));
        assert_eq!(tree.client(root), None);
    }
}
