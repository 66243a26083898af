//! Pieces shared by the half and three-column engines: client boxes,
//! split-ratio bounds and stacking a group of boxes into a tile.

use std::collections::HashMap;

use tracing::warn;
use weft_common::{ClientId, Size};

use crate::tree::{TileId, TileTree};

/// Smallest share a column may be resized down to.
pub const MIN_SPLIT: f64 = 0.15;
/// Largest share a column may be resized up to.
pub const MAX_SPLIT: f64 = 0.85;

/// Keep a split ratio inside [`MIN_SPLIT`, `MAX_SPLIT`]. NaN falls back to
/// an even split.
pub fn clamp_split(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.5;
    }
    ratio.clamp(MIN_SPLIT, MAX_SPLIT)
}

/// A client and the size its tile last had.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientBox {
    pub client: ClientId,
    pub size: Option<Size>,
}

impl ClientBox {
    pub fn new(client: ClientId) -> Self {
        Self { client, size: None }
    }
}

pub(crate) fn position_of(group: &[ClientBox], client: ClientId) -> Option<usize> {
    group.iter().position(|b| b.client == client)
}

/// Forget remembered sizes once a group's membership changes; they no
/// longer add up to the column.
pub(crate) fn forget_sizes(group: &mut [ClientBox]) {
    for b in group.iter_mut() {
        b.size = None;
    }
}

/// Stack `group` inside `tile`. A single box occupies the tile itself and
/// its remembered size is not applied, since the group's split ratio sets
/// the tile's width; otherwise each box gets its own child.
pub(crate) fn build_stack(
    tree: &mut TileTree,
    tile: TileId,
    group: &[ClientBox],
    tile_clients: &mut HashMap<TileId, ClientId>,
) {
    if let [only] = group {
        tree.set_client(tile, only.client);
        tile_clients.insert(tile, only.client);
        return;
    }
    for b in group {
        let Some(child) = tree.add_child(tile) else {
            warn!(client = %b.client, "could not add a stack tile");
            continue;
        };
        tree.set_client(child, b.client);
        if let Some(t) = tree.get_mut(child) {
            t.requested_size = b.size;
        }
        tile_clients.insert(child, b.client);
    }
}

/// Copy the sizes of the tiles back into their boxes.
pub(crate) fn remember_sizes(
    tree: &TileTree,
    tile_clients: &HashMap<TileId, ClientId>,
    groups: &mut [&mut Vec<ClientBox>],
) {
    for (&tile, &client) in tile_clients {
        let Some(size) = tree.get(tile).and_then(|t| t.requested_size) else {
            continue;
        };
        for group in groups.iter_mut() {
            if let Some(i) = position_of(group, client) {
                group[i].size = Some(size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_ratio_in_bounds() {
        assert_eq!(clamp_split(0.0), MIN_SPLIT);
        assert_eq!(clamp_split(1.0), MAX_SPLIT);
        assert_eq!(clamp_split(0.4), 0.4);
        assert_eq!(clamp_split(f64::NAN), 0.5);
    }

    #[test]
    fn single_box_occupies_the_tile() {
        let mut tree = TileTree::new();
        let root = tree.root();
        let mut map = HashMap::new();
        build_stack(&mut tree, root, &[ClientBox::new(ClientId(1))], &mut map);
        assert_eq!(tree.client(root), Some(ClientId(1)));
        assert_eq!(map.get(&root), Some(&ClientId(1)));
    }

    #[test]
    fn boxes_stack_as_children_with_sizes() {
        let mut tree = TileTree::new();
        let root = tree.root();
        let mut map = HashMap::new();
        let group = vec![
            ClientBox {
                client: ClientId(1),
                size: Some(Size::new(100.0, 300.0)),
            },
            ClientBox::new(ClientId(2)),
        ];
        build_stack(&mut tree, root, &group, &mut map);
        let children = tree.children(root).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.client(children[0]), Some(ClientId(1)));
        assert_eq!(
            tree.get(children[0]).unwrap().requested_size,
            Some(Size::new(100.0, 300.0))
        );
        assert_eq!(tree.get(children[1]).unwrap().requested_size, None);
        assert!(tree.is_consistent());
    }
}
