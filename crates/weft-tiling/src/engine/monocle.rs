//! Monocle: every client stacked on one full-screen tile.

use tracing::debug;
use weft_common::ClientId;
use weft_config::InsertionPoint;

use crate::tree::TileTree;

use super::EngineContext;

#[derive(Debug, Clone, Default)]
pub struct MonocleLayout {
    clients: Vec<ClientId>,
}

impl MonocleLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &[ClientId] {
        &self.clients
    }

    pub(super) fn build(&self, tree: &mut TileTree) {
        tree.clear();
        let root = tree.root();
        for &client in &self.clients {
            tree.push_client(root, client);
        }
    }

    pub(super) fn add_client(&mut self, client: ClientId, ctx: EngineContext) {
        if self.clients.contains(&client) {
            return;
        }
        let after_active = match ctx.insertion_point {
            InsertionPoint::Active => ctx
                .active_client
                .and_then(|active| self.clients.iter().position(|&c| c == active)),
            _ => None,
        };
        match after_active {
            Some(i) => self.clients.insert(i + 1, client),
            None => self.clients.push(client),
        }
    }

    pub(super) fn remove_client(&mut self, client: ClientId) {
        let before = self.clients.len();
        self.clients.retain(|&c| c != client);
        if self.clients.len() == before {
            debug!(%client, "client not in monocle stack");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(insertion_point: InsertionPoint, active: Option<u32>) -> EngineContext {
        EngineContext {
            insertion_point,
            active_client: active.map(ClientId),
            rotated: false,
        }
    }

    #[test]
    fn build_stacks_everything_on_root() {
        let mut layout = MonocleLayout::new();
        for id in 1..=3 {
            layout.add_client(ClientId(id), ctx(InsertionPoint::Left, None));
        }
        let mut tree = TileTree::new();
        layout.build(&mut tree);
        assert_eq!(tree.tile_count(), 1);
        assert_eq!(
            tree.clients(tree.root()),
            &[ClientId(1), ClientId(2), ClientId(3)]
        );
    }

    #[test]
    fn active_insertion_goes_after_active() {
        let mut layout = MonocleLayout::new();
        layout.add_client(ClientId(1), ctx(InsertionPoint::Left, None));
        layout.add_client(ClientId(2), ctx(InsertionPoint::Left, None));
        layout.add_client(ClientId(3), ctx(InsertionPoint::Active, Some(1)));
        assert_eq!(layout.clients(), &[ClientId(1), ClientId(3), ClientId(2)]);
    }

    #[test]
    fn duplicate_add_and_missing_remove_are_noops() {
        let mut layout = MonocleLayout::new();
        layout.add_client(ClientId(1), ctx(InsertionPoint::Left, None));
        layout.add_client(ClientId(1), ctx(InsertionPoint::Left, None));
        layout.remove_client(ClientId(9));
        assert_eq!(layout.clients(), &[ClientId(1)]);
        layout.remove_client(ClientId(1));
        assert!(layout.clients().is_empty());
    }
}
