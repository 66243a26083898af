//! Desktop-keyed forwarding to drivers, and engine migration.

use tracing::info;
use weft_common::{DesktopKey, Direction};
use weft_config::{EngineConfig, LayoutKind};

use crate::driver::{Placements, TilingDriver};
use crate::engine::create_engine;
use crate::host::TilingHost;

use super::EngineRegistry;

impl<H: TilingHost> EngineRegistry<H> {
    /// Replace `desktop`'s configuration and move its windows onto a fresh
    /// engine. Tiled windows are re-added in placement order, then the
    /// untiled ones.
    pub fn set_engine_config(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        config: EngineConfig,
    ) -> Placements<H> {
        let mut driver = TilingDriver::new(create_engine(config), self.guard.clone());
        let Some(old) = self.drivers.remove(desktop) else {
            info!(%desktop, kind = %config.layout_kind, "configured desktop");
            self.drivers.insert(desktop.clone(), driver);
            return Vec::new();
        };

        let windows = old.windows();
        let active = old.active_window();
        info!(
            %desktop,
            from = %old.engine().kind(),
            to = %config.layout_kind,
            windows = windows.len(),
            "migrating desktop"
        );
        drop(old);

        let placements = match Self::root(host, desktop) {
            Some(root) => {
                let placements = driver.add_clients(host, root, &windows);
                driver.set_active_window(active);
                placements
            }
            None => Vec::new(),
        };
        self.drivers.insert(desktop.clone(), driver);
        placements
    }

    pub fn set_layout_kind(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        kind: LayoutKind,
    ) -> Placements<H> {
        let config = EngineConfig {
            layout_kind: kind,
            ..self.engine_config(desktop)
        };
        self.set_engine_config(host, desktop, config)
    }

    /// Switch `desktop` to the next layout kind.
    pub fn cycle_layout_kind(&mut self, host: &mut H, desktop: &DesktopKey) -> Placements<H> {
        let next = self.engine_config(desktop).layout_kind.next();
        self.set_layout_kind(host, desktop, next)
    }

    pub fn add_client(&mut self, host: &mut H, desktop: &DesktopKey, window: H::Window) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        self.get_or_create(desktop).add_client(host, root, window)
    }

    pub fn remove_client(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        window: H::Window,
    ) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        match self.drivers.get_mut(desktop) {
            Some(driver) => driver.remove_client(host, root, window),
            None => Vec::new(),
        }
    }

    /// Drop `window` from every desktop that knows it. Returns the new
    /// placements of each affected desktop.
    pub fn remove_window_everywhere(
        &mut self,
        host: &mut H,
        window: H::Window,
    ) -> Vec<(DesktopKey, Placements<H>)> {
        let mut out = Vec::new();
        for desktop in self.desktops() {
            let known = self
                .drivers
                .get(&desktop)
                .is_some_and(|d| d.is_registered(window));
            if known {
                let placements = self.remove_client(host, &desktop, window);
                out.push((desktop, placements));
            }
        }
        out
    }

    pub fn put_client_in_tile(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        window: H::Window,
        tile: H::Tile,
        direction: Option<Direction>,
    ) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        self.get_or_create(desktop)
            .put_client_in_tile(host, root, window, tile, direction)
    }

    /// Resize by the configured step.
    pub fn resize_tile(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        tile: H::Tile,
        direction: Direction,
    ) -> Placements<H> {
        let amount = self.settings.resize_amount;
        self.resize_tile_by(host, desktop, tile, direction, amount)
    }

    pub fn resize_tile_by(
        &mut self,
        host: &mut H,
        desktop: &DesktopKey,
        tile: H::Tile,
        direction: Direction,
        amount: f64,
    ) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        self.get_or_create(desktop)
            .resize_tile(host, root, tile, direction, amount)
    }

    pub fn build_layout(&mut self, host: &mut H, desktop: &DesktopKey) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        self.get_or_create(desktop).build_layout(host, root)
    }

    pub fn regenerate_layout(&mut self, host: &H, desktop: &DesktopKey) {
        let Some(root) = Self::root(host, desktop) else {
            return;
        };
        if let Some(driver) = self.drivers.get_mut(desktop) {
            driver.regenerate_layout(host, root);
        }
    }

    pub fn handle_tiles_changed(&mut self, host: &mut H, desktop: &DesktopKey) -> Placements<H> {
        let Some(root) = Self::root(host, desktop) else {
            return Vec::new();
        };
        match self.drivers.get_mut(desktop) {
            Some(driver) => driver.handle_tiles_changed(host, root),
            None => Vec::new(),
        }
    }

    /// Prune dead windows on every desktop. Returns the total pruned.
    pub fn fix_clients(&mut self, host: &H) -> usize {
        self.drivers.values_mut().map(|d| d.fix_clients(host)).sum()
    }

    pub fn set_active_window(&mut self, desktop: &DesktopKey, window: Option<H::Window>) {
        self.get_or_create(desktop).set_active_window(window);
    }
}
