//! Distributing a parent's span among its children.

use std::collections::HashMap;

use weft_common::{ClientId, Size};

use crate::client::Client;
use crate::tree::{LayoutDirection, TileId, TileTree};

/// Split a span of 1.0 among children.
///
/// `base` holds each child's preferred share (missing or non-positive means
/// an even share) and `floors` the smallest share each child may get.
/// Children whose floor exceeds their share are pinned at the floor and
/// the rest split what is left in proportion to their preference. When the
/// floors alone exceed the span they are scaled down to fit.
pub fn fit_shares(base: &[Option<f64>], floors: &[f64]) -> Vec<f64> {
    let n = base.len();
    if n == 0 {
        return Vec::new();
    }
    let even = 1.0 / n as f64;
    let base: Vec<f64> = base
        .iter()
        .map(|b| match b {
            Some(v) if v.is_finite() && *v > 0.0 => *v,
            _ => even,
        })
        .collect();
    let floors: Vec<f64> = (0..n)
        .map(|i| {
            let f = floors.get(i).copied().unwrap_or(0.0);
            if f.is_finite() && f > 0.0 {
                f
            } else {
                0.0
            }
        })
        .collect();

    let floor_sum: f64 = floors.iter().sum();
    if floor_sum >= 1.0 {
        return floors.iter().map(|f| f / floor_sum).collect();
    }

    let mut pinned = vec![false; n];
    loop {
        let remaining = 1.0 - (0..n).filter(|&i| pinned[i]).map(|i| floors[i]).sum::<f64>();
        let free_base: f64 = (0..n).filter(|&i| !pinned[i]).map(|i| base[i]).sum();
        let mut changed = false;
        for i in 0..n {
            if !pinned[i] && base[i] / free_base * remaining < floors[i] {
                pinned[i] = true;
                changed = true;
            }
        }
        if !changed {
            return (0..n)
                .map(|i| {
                    if pinned[i] {
                        floors[i]
                    } else {
                        base[i] / free_base * remaining
                    }
                })
                .collect();
        }
    }
}

/// Smallest size the clients under `tile` need, combined along each
/// tile's split axis.
fn content_floor(tree: &TileTree, clients: &HashMap<ClientId, Client>, tile: TileId) -> Size {
    let children = tree.children(tile);
    if children.is_empty() {
        let mut size = Size::default();
        for id in tree.clients(tile) {
            if let Some(client) = clients.get(id) {
                size.grow_to_fit(client.min_size);
            }
        }
        return size;
    }
    let direction = tree.layout_direction(tile).unwrap_or_default();
    children
        .iter()
        .map(|&c| content_floor(tree, clients, c))
        .fold(Size::default(), |acc, s| match direction {
            LayoutDirection::Horizontal => Size::new(acc.width + s.width, acc.height.max(s.height)),
            LayoutDirection::Vertical => Size::new(acc.width.max(s.width), acc.height + s.height),
        })
}

/// A tile's requested size grown to fit its content.
pub(super) fn tile_floor(tree: &TileTree, clients: &HashMap<ClientId, Client>, tile: TileId) -> Size {
    let mut size = tree
        .get(tile)
        .and_then(|t| t.requested_size)
        .unwrap_or_default();
    size.grow_to_fit(content_floor(tree, clients, tile));
    size
}

/// Shares of `parent`'s span for each of its children, given the span's
/// length in pixels.
pub(super) fn child_shares(
    tree: &TileTree,
    clients: &HashMap<ClientId, Client>,
    parent: TileId,
    span_px: f64,
) -> Vec<f64> {
    let direction = tree.layout_direction(parent).unwrap_or_default();
    let children = tree.children(parent);
    let base: Vec<Option<f64>> = children
        .iter()
        .map(|&c| tree.get(c).and_then(|t| t.relative_size))
        .collect();
    let floors: Vec<f64> = children
        .iter()
        .map(|&c| {
            if span_px <= 0.0 {
                return 0.0;
            }
            let floor = tile_floor(tree, clients, c);
            match direction {
                LayoutDirection::Horizontal => floor.width / span_px,
                LayoutDirection::Vertical => floor.height / span_px,
            }
        })
        .collect();
    fit_shares(&base, &floors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn even_split_without_hints() {
        let shares = fit_shares(&[None, None, None, None], &[0.0; 4]);
        for s in shares {
            assert!((s - 0.25).abs() < EPS);
        }
    }

    #[test]
    fn base_shares_are_normalized() {
        let shares = fit_shares(&[Some(1.0), Some(3.0)], &[0.0, 0.0]);
        assert!((shares[0] - 0.25).abs() < EPS);
        assert!((shares[1] - 0.75).abs() < EPS);
    }

    #[test]
    fn floors_grow_but_never_shrink() {
        let shares = fit_shares(&[None, None], &[0.7, 0.0]);
        assert!((shares[0] - 0.7).abs() < EPS);
        assert!((shares[1] - 0.3).abs() < EPS);

        // A floor below the share changes nothing.
        let shares = fit_shares(&[None, None], &[0.2, 0.0]);
        assert!((shares[0] - 0.5).abs() < EPS);
    }

    #[test]
    fn pinning_cascades() {
        // Pinning the first squeezes the second below its floor too.
        let shares = fit_shares(&[None, None, None], &[0.5, 0.3, 0.0]);
        assert!((shares[0] - 0.5).abs() < EPS);
        assert!((shares[1] - 0.3).abs() < EPS);
        assert!((shares[2] - 0.2).abs() < EPS);
    }

    #[test]
    fn over_constrained_floors_scale_down() {
        let shares = fit_shares(&[None, None], &[0.9, 0.6]);
        assert!((shares[0] - 0.6).abs() < EPS);
        assert!((shares[1] - 0.4).abs() < EPS);
    }

    #[test]
    fn content_floor_combines_along_axis() {
        let mut tree = TileTree::new();
        let root = tree.root();
        let (a, b) = tree.split(root).unwrap();
        tree.set_client(a, ClientId(1));
        tree.set_client(b, ClientId(2));
        let mut clients = HashMap::new();
        clients.insert(ClientId(1), Client::new(ClientId(1), "a", Size::new(300.0, 100.0)));
        clients.insert(ClientId(2), Client::new(ClientId(2), "b", Size::new(200.0, 400.0)));
        let floor = tile_floor(&tree, &clients, root);
        assert_eq!(floor, Size::new(500.0, 400.0));
    }

    #[test]
    fn requested_size_acts_as_floor() {
        let mut tree = TileTree::new();
        let root = tree.root();
        let (a, _) = tree.split(root).unwrap();
        tree.get_mut(a).unwrap().requested_size = Some(Size::new(800.0, 100.0));
        let shares = child_shares(&tree, &HashMap::new(), root, 1000.0);
        assert!((shares[0] - 0.8).abs() < EPS);
        assert!((shares[1] - 0.2).abs() < EPS);
    }

    proptest! {
        #[test]
        fn shares_sum_to_one_and_respect_feasible_floors(
            cases in proptest::collection::vec((proptest::option::of(0.01f64..5.0), 0.0f64..0.3), 1..8)
        ) {
            let base: Vec<Option<f64>> = cases.iter().map(|(b, _)| *b).collect();
            let floors: Vec<f64> = cases.iter().map(|(_, f)| *f).collect();
            let shares = fit_shares(&base, &floors);
            prop_assert_eq!(shares.len(), cases.len());
            let sum: f64 = shares.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            let floor_sum: f64 = floors.iter().sum();
            if floor_sum < 1.0 {
                for (s, f) in shares.iter().zip(&floors) {
                    prop_assert!(*s >= *f - 1e-9);
                }
            }
        }
    }
}
