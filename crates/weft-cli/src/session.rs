//! One desktop on an in-memory host, driven by script commands.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};
use weft_common::{DesktopKey, Rect};
use weft_config::TilingSettings;
use weft_tiling::host::{MemoryHost, TileHandle, WindowHandle};
use weft_tiling::{EngineRegistry, Placements, SettleTimer, TilingHost};

use crate::script::Command;

/// Where one window sits, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWindow {
    pub window: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct Session {
    host: MemoryHost,
    registry: EngineRegistry<MemoryHost>,
    desktop: DesktopKey,
    /// Debounces host-side tile edits before the tiler reads them back.
    settle: SettleTimer,
    /// Script time; only `wait` moves it.
    clock: Instant,
}

impl Session {
    pub fn new(settings: TilingSettings, screen: Rect) -> Self {
        let registry = EngineRegistry::new(settings);
        let mut host = MemoryHost::new().with_guard(registry.guard());
        let desktop = DesktopKey::new(0, "default", "1");
        host.add_desktop(desktop.clone(), screen);
        let settle = registry.settle_timer();
        Self {
            host,
            registry,
            desktop,
            settle,
            clock: Instant::now(),
        }
    }

    /// Run one command. Returns a snapshot for `show`.
    pub fn run(&mut self, cmd: Command) -> Option<Vec<PlacedWindow>> {
        let shown = self.dispatch(cmd);
        self.settle_host_edits();
        shown
    }

    /// Wait out a pending settle period so the tiler sees the last host edit.
    pub fn flush(&mut self) {
        if self.settle.is_pending() {
            self.clock += self.settle.delay();
            self.settle_host_edits();
        }
    }

    fn settle_host_edits(&mut self) {
        if self.host.take_tree_changed() {
            self.settle.poke(self.clock);
        }
        if self.settle.fire(self.clock) {
            debug!("host edits settled, reading them back");
            let placements = self.registry.handle_tiles_changed(&mut self.host, &self.desktop);
            self.apply(&placements);
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Option<Vec<PlacedWindow>> {
        debug!(?cmd, "running");
        match cmd {
            Command::Add { name, min_size } => {
                if self.host.find_window(&name).is_some() {
                    warn!(window = %name, "window already exists");
                    return None;
                }
                let window = self.host.add_window(name, min_size);
                let placements = self.registry.add_client(&mut self.host, &self.desktop, window);
                self.apply(&placements);
            }
            Command::Remove { name } => {
                let window = self.window(&name)?;
                for (_, placements) in self.registry.remove_window_everywhere(&mut self.host, window) {
                    self.apply(&placements);
                }
                self.host.close_window(window);
            }
            Command::Close { name } => {
                let window = self.window(&name)?;
                self.host.close_window(window);
            }
            Command::Focus { name } => {
                let window = self.window(&name)?;
                self.registry.set_active_window(&self.desktop, Some(window));
            }
            Command::Put {
                name,
                target,
                direction,
            } => {
                let window = self.window(&name)?;
                let tile = self.tile_of(&target)?;
                let placements = self.registry.put_client_in_tile(
                    &mut self.host,
                    &self.desktop,
                    window,
                    tile,
                    Some(direction),
                );
                self.apply(&placements);
            }
            Command::Drop { name, point } => {
                let window = self.window(&name)?;
                let Some(tile) = self.host.tile_at(&self.desktop, point) else {
                    warn!(x = point.x, y = point.y, "no tile under drop point");
                    return None;
                };
                let direction = self
                    .host
                    .tile_absolute_geometry(tile)
                    .direction_from_point(point);
                let placements = self.registry.put_client_in_tile(
                    &mut self.host,
                    &self.desktop,
                    window,
                    tile,
                    Some(direction),
                );
                self.apply(&placements);
            }
            Command::Resize {
                name,
                direction,
                amount,
            } => {
                let tile = self.tile_of(&name)?;
                let placements = self.registry.resize_tile_by(
                    &mut self.host,
                    &self.desktop,
                    tile,
                    direction,
                    amount,
                );
                self.apply(&placements);
            }
            Command::Drag { name, delta } => {
                let tile = self.tile_of(&name)?;
                if !self.host.resize_tile(tile, delta) {
                    warn!(window = %name, delta, "tile edge did not move");
                }
            }
            Command::Wait(duration) => self.clock += duration,
            Command::Layout(kind) => {
                let placements = self
                    .registry
                    .set_layout_kind(&mut self.host, &self.desktop, kind);
                self.apply(&placements);
            }
            Command::Cycle => {
                let placements = self.registry.cycle_layout_kind(&mut self.host, &self.desktop);
                self.apply(&placements);
            }
            Command::Show => return Some(self.snapshot()),
        }
        None
    }

    /// Tiled windows in placement order with their pixel geometry.
    pub fn snapshot(&self) -> Vec<PlacedWindow> {
        let Some(driver) = self.registry.driver(&self.desktop) else {
            return Vec::new();
        };
        driver
            .windows()
            .into_iter()
            .filter_map(|window| {
                let geometry = self.host.window_geometry(window)?;
                Some(PlacedWindow {
                    window: self.host.window_name(window),
                    x: geometry.x,
                    y: geometry.y,
                    width: geometry.width,
                    height: geometry.height,
                })
            })
            .collect()
    }

    fn apply(&mut self, placements: &Placements<MemoryHost>) {
        self.host.apply_placements(placements);
    }

    fn window(&self, name: &str) -> Option<WindowHandle> {
        let window = self.host.find_window(name);
        if window.is_none() {
            warn!(window = %name, "no such window");
        }
        window
    }

    fn tile_of(&self, name: &str) -> Option<TileHandle> {
        let window = self.window(name)?;
        let tile = self.host.window_tile(window);
        if tile.is_none() {
            warn!(window = %name, "window is not tiled");
        }
        tile
    }
}

#[cfg(test)]
mod tests {
    use weft_config::LayoutKind;

    use super::*;
    use crate::script::parse_script;

    fn session(kind: LayoutKind) -> Session {
        let settings = TilingSettings {
            default_layout: kind,
            ..TilingSettings::default()
        };
        Session::new(settings, Rect::new(0.0, 0.0, 1000.0, 500.0))
    }

    fn session_with_delay(kind: LayoutKind, settle_delay_ms: u64) -> Session {
        let settings = TilingSettings {
            default_layout: kind,
            settle_delay_ms,
            ..TilingSettings::default()
        };
        Session::new(settings, Rect::new(0.0, 0.0, 1000.0, 500.0))
    }

    fn width_of(placed: &[PlacedWindow], name: &str) -> f64 {
        placed.iter().find(|p| p.window == name).unwrap().width
    }

    fn run_script(session: &mut Session, script: &str) -> Vec<PlacedWindow> {
        for cmd in parse_script(script).unwrap() {
            session.run(cmd);
        }
        session.snapshot()
    }

    fn names(placed: &[PlacedWindow]) -> Vec<&str> {
        placed.iter().map(|p| p.window.as_str()).collect()
    }

    #[test]
    fn show_reports_pixel_geometry() {
        let mut s = session(LayoutKind::BTree);
        let placed = run_script(&mut s, "add a\nadd b\n");
        assert_eq!(names(&placed), vec!["b", "a"]);
        assert_eq!(placed[0].x, 0.0);
        assert_eq!(placed[0].width, 500.0);
        assert_eq!(placed[1].x, 500.0);
        assert_eq!(placed[1].height, 500.0);
    }

    #[test]
    fn show_command_returns_snapshot() {
        let mut s = session(LayoutKind::Monocle);
        run_script(&mut s, "add a\n");
        let shown = s.run(Command::Show).unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].width, 1000.0);
    }

    #[test]
    fn duplicate_names_are_refused() {
        let mut s = session(LayoutKind::BTree);
        run_script(&mut s, "add a\nadd a\n");
        assert_eq!(s.host.window_count(), 1);
    }

    #[test]
    fn remove_retiles_the_rest() {
        let mut s = session(LayoutKind::BTree);
        let placed = run_script(&mut s, "add a\nadd b\nremove b\n");
        assert_eq!(names(&placed), vec!["a"]);
        assert_eq!(placed[0].width, 1000.0);
    }

    #[test]
    fn closed_window_is_pruned_on_next_change() {
        let mut s = session(LayoutKind::ThreeColumn);
        let placed = run_script(&mut s, "add a\nadd b\nadd c\nclose b\nadd d\n");
        assert_eq!(placed.len(), 3);
        assert!(!names(&placed).contains(&"b"));
        let total: f64 = placed.iter().filter(|p| p.y == 0.0).map(|p| p.width).sum();
        assert!((total - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn drop_on_lower_half_stacks_below() {
        let mut s = session(LayoutKind::BTree);
        // c and b share the left column, a holds the right; drop c onto a's lower half.
        let placed = run_script(&mut s, "add a\nadd b\nadd c\ndrop c 750 450\n");
        let c = placed.iter().find(|p| p.window == "c").unwrap();
        let a = placed.iter().find(|p| p.window == "a").unwrap();
        assert_eq!(c.x, 500.0);
        assert_eq!(a.x, 500.0);
        assert!(c.y > a.y);
    }

    #[test]
    fn resize_moves_the_divider() {
        let mut s = session(LayoutKind::Half);
        let placed = run_script(&mut s, "add a\nadd b\nresize a right 0.1\n");
        let b = placed.iter().find(|p| p.window == "b").unwrap();
        assert!((b.width - 600.0).abs() < 1e-6);
    }

    #[test]
    fn drag_is_read_back_immediately_without_delay() {
        let mut s = session_with_delay(LayoutKind::BTree, 0);
        // [b, a]; drag b's right edge over a.
        let placed = run_script(&mut s, "add a\nadd b\ndrag b 0.2\n");
        assert!((width_of(&placed, "b") - 700.0).abs() < 1e-6);
        assert!(!s.settle.is_pending());

        let placed = run_script(&mut s, "add c\n");
        assert!((width_of(&placed, "a") - 300.0).abs() < 1e-6);
    }

    #[test]
    fn drag_waits_for_the_settle_delay() {
        let mut s = session_with_delay(LayoutKind::BTree, 50);
        run_script(&mut s, "add a\nadd b\ndrag b 0.2\nwait 20\n");
        assert!(s.settle.is_pending());

        run_script(&mut s, "wait 30\n");
        assert!(!s.settle.is_pending());
        let placed = run_script(&mut s, "add c\n");
        assert!((width_of(&placed, "a") - 300.0).abs() < 1e-6);
    }

    #[test]
    fn flush_settles_a_trailing_drag() {
        let mut s = session_with_delay(LayoutKind::Half, 50);
        run_script(&mut s, "add a\nadd b\ndrag b 0.1\n");
        assert!(s.settle.is_pending());
        s.flush();
        assert!(!s.settle.is_pending());
        s.flush();
        assert!(!s.settle.is_pending());
    }

    #[test]
    fn layout_switch_keeps_every_window() {
        let mut s = session(LayoutKind::BTree);
        let placed = run_script(&mut s, "add a\nadd b\nadd c\nlayout monocle\n");
        assert_eq!(placed.len(), 3);
        assert!(placed.iter().all(|p| p.width == 1000.0 && p.height == 500.0));

        // Passthrough leaves windows wherever the host last put them.
        let placed = run_script(&mut s, "cycle\n");
        assert_eq!(
            s.registry.engine_config(&DesktopKey::new(0, "default", "1")).layout_kind,
            LayoutKind::Passthrough
        );
        assert_eq!(placed.len(), 3);
    }

    #[test]
    fn unknown_window_is_ignored() {
        let mut s = session(LayoutKind::BTree);
        let placed = run_script(&mut s, "add a\nfocus ghost\nput ghost a up\n");
        assert_eq!(names(&placed), vec!["a"]);
    }
}
