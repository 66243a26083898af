//! Projecting the engine's abstract tree onto the host's tile tree.

use std::collections::VecDeque;

use tracing::{debug, error, warn};
use weft_common::{Rect, TilingError};

use crate::host::TilingHost;
use crate::tree::LayoutDirection;

use super::fit::child_shares;
use super::{Placements, TilingDriver};

impl<H: TilingHost> TilingDriver<H> {
    /// Rebuild the engine's tree and project it onto the host under `root`.
    ///
    /// Returns the `(window, tile)` pairs the host should apply. On a
    /// lookup failure the walk stops, the error is logged and the pairs
    /// gathered so far are returned.
    pub fn build_layout(&mut self, host: &mut H, root: H::Tile) -> Placements<H> {
        let Some(_token) = self.guard.hold() else {
            warn!("layout build already in progress, skipping");
            return Vec::new();
        };
        self.fix_clients(host);
        self.engine.build_layout();

        let mut placements = Vec::new();
        let result = if self.engine.capabilities().tiles_mutable {
            self.collect_placements(&mut placements)
        } else {
            self.project(host, root, &mut placements)
        };
        if let Err(e) = result {
            error!(error = %e, placed = placements.len(), "reconciliation aborted");
        }
        debug!(count = placements.len(), "layout built");
        placements
    }

    /// Pair up placements without touching the host's tree, for engines
    /// that mirror it instead of shaping it.
    fn collect_placements(&self, out: &mut Placements<H>) -> Result<(), TilingError> {
        for (client, tile) in self.engine.tree().placements() {
            let window = self
                .clients
                .get_by_left(&client)
                .ok_or_else(|| TilingError::ClientNotMapped(client.to_string()))?;
            let host_tile = self
                .tiles
                .get_by_left(&tile)
                .ok_or_else(|| TilingError::TileNotMapped(format!("{tile:?}")))?;
            out.push((*window, *host_tile));
        }
        Ok(())
    }

    fn clear_host(&mut self, host: &mut H, root: H::Tile) -> Result<(), TilingError> {
        for child in host.tile_children(root) {
            host.remove_tile(child);
        }
        let left = host.tile_children(root).len();
        if left != 0 {
            return Err(TilingError::SplitMismatch {
                expected: 0,
                actual: left,
            });
        }
        self.tiles.clear();
        Ok(())
    }

    fn project(
        &mut self,
        host: &mut H,
        root: H::Tile,
        out: &mut Placements<H>,
    ) -> Result<(), TilingError> {
        self.clear_host(host, root)?;

        let tree = self.engine.tree();
        let root_abs = host.tile_absolute_geometry(root);
        self.tiles.insert(tree.root(), root);

        let mut queue = VecDeque::from([tree.root()]);
        while let Some(tile) = queue.pop_front() {
            let host_tile = *self
                .tiles
                .get_by_left(&tile)
                .ok_or_else(|| TilingError::TileNotMapped(format!("{tile:?}")))?;

            for client in tree.clients(tile) {
                let window = self
                    .clients
                    .get_by_left(client)
                    .ok_or_else(|| TilingError::ClientNotMapped(client.to_string()))?;
                out.push((*window, host_tile));
            }

            let children = tree.children(tile);
            match children {
                [] => {}
                [only] => {
                    self.tiles.insert(*only, host_tile);
                    queue.push_back(*only);
                }
                _ => {
                    let direction = tree.layout_direction(tile).unwrap_or_default();
                    let host_children = split_host_tile(host, host_tile, direction, children.len())?;

                    let parent = host.tile_relative_geometry(host_tile);
                    let span_px = match direction {
                        LayoutDirection::Horizontal => parent.width * root_abs.width,
                        LayoutDirection::Vertical => parent.height * root_abs.height,
                    };
                    let shares = child_shares(tree, &self.client_info, tile, span_px);

                    let mut offset = 0.0;
                    for ((&child, &host_child), share) in
                        children.iter().zip(&host_children).zip(shares)
                    {
                        host.set_tile_relative_geometry(
                            host_child,
                            slice(parent, direction, offset, share),
                        );
                        self.tiles.insert(child, host_child);
                        queue.push_back(child);
                        offset += share;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Split `tile` into `count` children along `direction`. The host splits
/// pairwise, so every child after the second comes from splitting the
/// previous last child again.
fn split_host_tile<H: TilingHost>(
    host: &mut H,
    tile: H::Tile,
    direction: LayoutDirection,
    count: usize,
) -> Result<Vec<H::Tile>, TilingError> {
    host.split_tile(tile, direction);
    for i in 2..count {
        let children = host.tile_children(tile);
        let Some(&last) = children.get(i - 1) else {
            break;
        };
        host.split_tile(last, direction);
    }
    let children = host.tile_children(tile);
    if children.len() != count {
        return Err(TilingError::SplitMismatch {
            expected: count,
            actual: children.len(),
        });
    }
    Ok(children)
}

/// The part of `parent` starting at `offset` and spanning `share` of it
/// along `direction`. The other axis is taken whole.
fn slice(parent: Rect, direction: LayoutDirection, offset: f64, share: f64) -> Rect {
    match direction {
        LayoutDirection::Horizontal => Rect::new(
            parent.x + offset * parent.width,
            parent.y,
            share * parent.width,
            parent.height,
        ),
        LayoutDirection::Vertical => Rect::new(
            parent.x,
            parent.y + offset * parent.height,
            parent.width,
            share * parent.height,
        ),
    }
}
