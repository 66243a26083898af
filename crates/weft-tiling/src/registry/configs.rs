//! Export and import of per-desktop configuration records.

use tracing::warn;
use weft_common::DesktopKey;
use weft_config::DesktopConfigs;

use crate::driver::Placements;
use crate::host::TilingHost;

use super::EngineRegistry;

impl<H: TilingHost> EngineRegistry<H> {
    /// Every known desktop's configuration, keyed by its canonical string.
    pub fn export_configs(&self) -> DesktopConfigs {
        let mut configs = DesktopConfigs::new();
        for (desktop, driver) in &self.drivers {
            configs.insert(desktop.to_string(), driver.engine().config());
        }
        configs
    }

    /// Apply stored configurations. Keys that do not parse are skipped;
    /// desktops whose configuration already matches are left untouched.
    pub fn import_configs(
        &mut self,
        host: &mut H,
        configs: &DesktopConfigs,
    ) -> Vec<(DesktopKey, Placements<H>)> {
        let mut out = Vec::new();
        for (key, config) in configs.iter() {
            let desktop = match key.parse::<DesktopKey>() {
                Ok(desktop) => desktop,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping stored desktop config");
                    continue;
                }
            };
            let unchanged = self
                .drivers
                .get(&desktop)
                .is_some_and(|d| d.engine().config() == *config);
            if unchanged {
                continue;
            }
            let placements = self.set_engine_config(host, &desktop, *config);
            out.push((desktop, placements));
        }
        out
    }
}
