//! A complete in-memory host: windows, per-desktop root tiles, and a tile
//! tree with KWin-style split semantics.
//!
//! Used as the fixture for driver and registry tests and by the `weft`
//! binary. Relative geometry is stored as fractions of the root tile;
//! absolute geometry is derived from the desktop's screen rectangle.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;
use weft_common::{DesktopKey, Point, Rect, Size};

use crate::guard::LayoutGuard;
use crate::tree::LayoutDirection;

use super::TilingHost;

new_key_type! {
    /// Handle of a host tile.
    pub struct TileHandle;
    /// Handle of a host window.
    pub struct WindowHandle;
}

/// Smallest span, as a fraction of the root, a user resize may leave.
const MIN_SPAN: f64 = 0.01;

#[derive(Debug, Clone)]
struct HostTile {
    parent: Option<TileHandle>,
    children: Vec<TileHandle>,
    layout_direction: LayoutDirection,
    relative: Rect,
}

impl HostTile {
    fn child(parent: TileHandle, relative: Rect, direction: LayoutDirection) -> Self {
        Self {
            parent: Some(parent),
            children: Vec::new(),
            layout_direction: direction.perpendicular(),
            relative,
        }
    }
}

#[derive(Debug, Clone)]
struct HostWindow {
    name: String,
    min_size: Size,
    tile: Option<TileHandle>,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    tiles: SlotMap<TileHandle, HostTile>,
    windows: SlotMap<WindowHandle, HostWindow>,
    roots: HashMap<DesktopKey, TileHandle>,
    screens: HashMap<TileHandle, Rect>,
    guard: Option<LayoutGuard>,
    tree_changed: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress tree-change notifications while `guard` is held.
    pub fn with_guard(mut self, guard: LayoutGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn set_guard(&mut self, guard: LayoutGuard) {
        self.guard = Some(guard);
    }

    /// Register a desktop with the given screen area, returning its root
    /// tile. An existing desktop keeps its root and gets the new area.
    pub fn add_desktop(&mut self, desktop: DesktopKey, screen: Rect) -> TileHandle {
        if let Some(&root) = self.roots.get(&desktop) {
            self.screens.insert(root, screen);
            return root;
        }
        let root = self.tiles.insert(HostTile {
            parent: None,
            children: Vec::new(),
            layout_direction: LayoutDirection::Horizontal,
            relative: Rect::unit(),
        });
        self.roots.insert(desktop, root);
        self.screens.insert(root, screen);
        root
    }

    pub fn add_window(&mut self, name: impl Into<String>, min_size: Size) -> WindowHandle {
        self.windows.insert(HostWindow {
            name: name.into(),
            min_size,
            tile: None,
        })
    }

    /// Drop a window without telling anyone, as a crashed client would.
    pub fn close_window(&mut self, window: WindowHandle) -> bool {
        self.windows.remove(window).is_some()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Find a live window by its name.
    pub fn find_window(&self, name: &str) -> Option<WindowHandle> {
        self.windows
            .iter()
            .find(|(_, w)| w.name == name)
            .map(|(handle, _)| handle)
    }

    /// Move each window into its tile, as the host does after a rebuild.
    pub fn apply_placements(&mut self, placements: &[(WindowHandle, TileHandle)]) {
        for &(window, tile) in placements {
            if !self.tiles.contains_key(tile) {
                continue;
            }
            if let Some(w) = self.windows.get_mut(window) {
                w.tile = Some(tile);
            }
        }
    }

    pub fn untile_window(&mut self, window: WindowHandle) {
        if let Some(w) = self.windows.get_mut(window) {
            w.tile = None;
        }
    }

    /// Pixel geometry of the tile a window sits in.
    pub fn window_geometry(&self, window: WindowHandle) -> Option<Rect> {
        let tile = self.windows.get(window)?.tile?;
        Some(self.tile_absolute_geometry(tile))
    }

    /// The deepest tile of `desktop` containing `point`.
    pub fn tile_at(&self, desktop: &DesktopKey, point: Point) -> Option<TileHandle> {
        let mut current = *self.roots.get(desktop)?;
        if !self.tile_absolute_geometry(current).contains(point) {
            return None;
        }
        loop {
            let next = self.tiles[current]
                .children
                .iter()
                .copied()
                .find(|&c| self.tile_absolute_geometry(c).contains(point));
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Drag the trailing edge of `tile` by `delta` (a fraction of the
    /// root), trading space with its neighbour along the parent's axis.
    /// The last child trades with the one before it instead.
    pub fn resize_tile(&mut self, tile: TileHandle, delta: f64) -> bool {
        let Some(parent) = self.tiles.get(tile).and_then(|t| t.parent) else {
            return false;
        };
        let axis = self.tiles[parent].layout_direction;
        let siblings = &self.tiles[parent].children;
        let Some(idx) = siblings.iter().position(|&c| c == tile) else {
            return false;
        };
        let (neighbor, after) = match siblings.get(idx + 1) {
            Some(&next) => (next, true),
            None if idx > 0 => (siblings[idx - 1], false),
            None => return false,
        };

        let own = self.tiles[tile].relative;
        let other = self.tiles[neighbor].relative;
        let (own_start, own_len) = span(own, axis);
        let (other_start, other_len) = span(other, axis);
        let (lo, hi) = (MIN_SPAN - own_len, other_len - MIN_SPAN);
        if lo > hi || !delta.is_finite() {
            return false;
        }
        let delta = delta.clamp(lo, hi);
        if delta == 0.0 {
            return false;
        }

        let (own_rect, other_rect) = if after {
            (
                with_span(own, axis, own_start, own_len + delta),
                with_span(other, axis, other_start + delta, other_len - delta),
            )
        } else {
            (
                with_span(own, axis, own_start - delta, own_len + delta),
                with_span(other, axis, other_start, other_len - delta),
            )
        };
        self.set_geometry(tile, own_rect);
        self.set_geometry(neighbor, other_rect);
        self.mark_changed();
        true
    }

    /// Whether the tree was edited outside a held layout guard since the
    /// last call. Clears the flag.
    pub fn take_tree_changed(&mut self) -> bool {
        std::mem::take(&mut self.tree_changed)
    }

    /// Leaves under `tile` in visual order.
    pub fn leaves(&self, tile: TileHandle) -> Vec<TileHandle> {
        let mut out = Vec::new();
        let mut stack = vec![tile];
        while let Some(id) = stack.pop() {
            let Some(t) = self.tiles.get(id) else {
                continue;
            };
            if t.children.is_empty() {
                out.push(id);
            } else {
                stack.extend(t.children.iter().rev().copied());
            }
        }
        out
    }

    fn mark_changed(&mut self) {
        let held = self.guard.as_ref().is_some_and(LayoutGuard::is_held);
        if !held {
            self.tree_changed = true;
        }
    }

    fn root_of(&self, mut tile: TileHandle) -> TileHandle {
        while let Some(parent) = self.tiles.get(tile).and_then(|t| t.parent) {
            tile = parent;
        }
        tile
    }

    fn descendants(&self, tile: TileHandle) -> Vec<TileHandle> {
        let mut out = Vec::new();
        let mut stack: Vec<TileHandle> = self.tiles[tile].children.clone();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.tiles[id].children.iter().copied());
        }
        out
    }

    /// Move `tile` to `geometry`, carrying its subtree along.
    fn set_geometry(&mut self, tile: TileHandle, geometry: Rect) {
        let Some(old) = self.tiles.get(tile).map(|t| t.relative) else {
            return;
        };
        for id in self.descendants(tile) {
            let r = self.tiles[id].relative;
            self.tiles[id].relative = remap(r, old, geometry);
        }
        self.tiles[tile].relative = geometry;
    }

    fn destroy_subtree(&mut self, tile: TileHandle) {
        let mut stack = vec![tile];
        while let Some(id) = stack.pop() {
            if let Some(t) = self.tiles.remove(id) {
                stack.extend(t.children);
            }
        }
        let tiles = &self.tiles;
        for (_, window) in self.windows.iter_mut() {
            if window.tile.is_some_and(|t| !tiles.contains_key(t)) {
                window.tile = None;
            }
        }
    }
}

impl TilingHost for MemoryHost {
    type Window = WindowHandle;
    type Tile = TileHandle;

    fn window_exists(&self, window: WindowHandle) -> bool {
        self.windows.contains_key(window)
    }

    fn window_name(&self, window: WindowHandle) -> String {
        self.windows
            .get(window)
            .map(|w| w.name.clone())
            .unwrap_or_default()
    }

    fn window_min_size(&self, window: WindowHandle) -> Size {
        self.windows
            .get(window)
            .map(|w| w.min_size)
            .unwrap_or_default()
    }

    fn window_tile(&self, window: WindowHandle) -> Option<TileHandle> {
        self.windows.get(window).and_then(|w| w.tile)
    }

    fn root_tile(&self, desktop: &DesktopKey) -> Option<TileHandle> {
        self.roots.get(desktop).copied()
    }

    fn tile_children(&self, tile: TileHandle) -> Vec<TileHandle> {
        self.tiles
            .get(tile)
            .map(|t| t.children.clone())
            .unwrap_or_default()
    }

    fn tile_parent(&self, tile: TileHandle) -> Option<TileHandle> {
        self.tiles.get(tile).and_then(|t| t.parent)
    }

    fn tile_layout_direction(&self, tile: TileHandle) -> LayoutDirection {
        self.tiles
            .get(tile)
            .map(|t| t.layout_direction)
            .unwrap_or_default()
    }

    fn tile_absolute_geometry(&self, tile: TileHandle) -> Rect {
        let Some(t) = self.tiles.get(tile) else {
            return Rect::default();
        };
        let screen = self
            .screens
            .get(&self.root_of(tile))
            .copied()
            .unwrap_or_default();
        Rect::new(
            screen.x + t.relative.x * screen.width,
            screen.y + t.relative.y * screen.height,
            t.relative.width * screen.width,
            t.relative.height * screen.height,
        )
    }

    fn tile_relative_geometry(&self, tile: TileHandle) -> Rect {
        self.tiles.get(tile).map(|t| t.relative).unwrap_or_default()
    }

    fn set_tile_relative_geometry(&mut self, tile: TileHandle, geometry: Rect) {
        if !self.tiles.contains_key(tile) {
            return;
        }
        self.set_geometry(tile, geometry);
        self.mark_changed();
    }

    fn split_tile(&mut self, tile: TileHandle, direction: LayoutDirection) {
        let Some(t) = self.tiles.get(tile) else {
            return;
        };
        if !t.children.is_empty() {
            debug!(?tile, "refusing to split a tile with children");
            return;
        }
        let (first, second) = halve(t.relative, direction);
        let parent = t
            .parent
            .filter(|&p| self.tiles[p].layout_direction == direction);

        match parent {
            Some(parent) => {
                self.tiles[tile].relative = first;
                let sibling = self.tiles.insert(HostTile::child(parent, second, direction));
                let siblings = &mut self.tiles[parent].children;
                let idx = siblings
                    .iter()
                    .position(|&c| c == tile)
                    .map_or(siblings.len(), |i| i + 1);
                siblings.insert(idx, sibling);
            }
            None => {
                let a = self.tiles.insert(HostTile::child(tile, first, direction));
                let b = self.tiles.insert(HostTile::child(tile, second, direction));
                let t = &mut self.tiles[tile];
                t.layout_direction = direction;
                t.children = vec![a, b];
                for (_, window) in self.windows.iter_mut() {
                    if window.tile == Some(tile) {
                        window.tile = Some(a);
                    }
                }
            }
        }
        self.mark_changed();
    }

    fn remove_tile(&mut self, tile: TileHandle) {
        let Some(parent) = self.tiles.get(tile).and_then(|t| t.parent) else {
            debug!(?tile, "refusing to remove a missing or root tile");
            return;
        };
        self.tiles[parent].children.retain(|&c| c != tile);
        self.destroy_subtree(tile);
        self.mark_changed();
    }
}

fn span(rect: Rect, axis: LayoutDirection) -> (f64, f64) {
    match axis {
        LayoutDirection::Horizontal => (rect.x, rect.width),
        LayoutDirection::Vertical => (rect.y, rect.height),
    }
}

fn with_span(rect: Rect, axis: LayoutDirection, start: f64, len: f64) -> Rect {
    match axis {
        LayoutDirection::Horizontal => Rect::new(start, rect.y, len, rect.height),
        LayoutDirection::Vertical => Rect::new(rect.x, start, rect.width, len),
    }
}

fn halve(rect: Rect, axis: LayoutDirection) -> (Rect, Rect) {
    let (start, len) = span(rect, axis);
    let half = len / 2.0;
    (
        with_span(rect, axis, start, half),
        with_span(rect, axis, start + half, len - half),
    )
}

/// Map `r` from the frame `from` into the frame `to`.
fn remap(r: Rect, from: Rect, to: Rect) -> Rect {
    let sx = if from.width > 0.0 { to.width / from.width } else { 0.0 };
    let sy = if from.height > 0.0 { to.height / from.height } else { 0.0 };
    Rect::new(
        to.x + (r.x - from.x) * sx,
        to.y + (r.y - from.y) * sy,
        r.width * sx,
        r.height * sy,
    )
}
