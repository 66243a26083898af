use std::collections::HashMap;

use tracing::{debug, warn};
use weft_common::DesktopKey;
use weft_config::{EngineConfig, TilingSettings};

use crate::driver::TilingDriver;
use crate::engine::create_engine;
use crate::guard::LayoutGuard;
use crate::host::TilingHost;
use crate::settle::SettleTimer;

/// Maps each desktop to the driver tiling it.
///
/// All drivers share one [`LayoutGuard`], so a host holding a clone can
/// drop the notifications any of them cause.
pub struct EngineRegistry<H: TilingHost> {
    pub(super) settings: TilingSettings,
    pub(super) drivers: HashMap<DesktopKey, TilingDriver<H>>,
    pub(super) guard: LayoutGuard,
}

impl<H: TilingHost> EngineRegistry<H> {
    pub fn new(settings: TilingSettings) -> Self {
        Self::with_guard(settings, LayoutGuard::new())
    }

    pub fn with_guard(settings: TilingSettings, guard: LayoutGuard) -> Self {
        Self {
            settings,
            drivers: HashMap::new(),
            guard,
        }
    }

    pub fn settings(&self) -> &TilingSettings {
        &self.settings
    }

    /// A handle on the guard shared by every driver.
    pub fn guard(&self) -> LayoutGuard {
        self.guard.clone()
    }

    /// An idle debounce timer using the configured settle delay.
    pub fn settle_timer(&self) -> SettleTimer {
        SettleTimer::from_millis(self.settings.settle_delay_ms)
    }

    /// The driver for `desktop`, created with the default configuration on
    /// first access.
    pub fn get_or_create(&mut self, desktop: &DesktopKey) -> &mut TilingDriver<H> {
        let settings = &self.settings;
        let guard = &self.guard;
        self.drivers.entry(desktop.clone()).or_insert_with(|| {
            debug!(%desktop, "creating driver");
            TilingDriver::new(create_engine(settings.default_engine_config()), guard.clone())
        })
    }

    pub fn driver(&self, desktop: &DesktopKey) -> Option<&TilingDriver<H>> {
        self.drivers.get(desktop)
    }

    /// The configuration `desktop` uses, or would use once touched.
    pub fn engine_config(&self, desktop: &DesktopKey) -> EngineConfig {
        self.drivers
            .get(desktop)
            .map(|d| d.engine().config())
            .unwrap_or_else(|| self.settings.default_engine_config())
    }

    /// Desktops with a driver, in key order.
    pub fn desktops(&self) -> Vec<DesktopKey> {
        let mut keys: Vec<DesktopKey> = self.drivers.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub(super) fn root(host: &H, desktop: &DesktopKey) -> Option<H::Tile> {
        let root = host.root_tile(desktop);
        if root.is_none() {
            warn!(%desktop, "host has no root tile for desktop");
        }
        root
    }
}
