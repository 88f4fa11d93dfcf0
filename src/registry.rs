//! Window registry: the authoritative arena of open windows.
//!
//! One record per open app (singleton-per-appId), keyed in a `BTreeMap`.
//! All lifecycle transitions run through here; the taskbar, drag controller
//! and bridge sync are derived views that are told what happened, never the
//! other way around.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use ratatui::prelude::Rect;

use crate::apps::AppId;
use crate::constants::{
    CLOSE_ANIMATION, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_VISIBLE_MARGIN,
    OPEN_ANIMATION,
};
use crate::content::{ContentBody, ContentDispatcher, Notice};
use crate::decorator::{DefaultDecorator, WindowDecorator};
use crate::geometry::CellRect;
use crate::stacking::StackingAllocator;

/// Window lifecycle. `Closed` is represented by removal from the arena; a
/// record that is gone is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Entry-animation band right after opening.
    Opening { since: Instant },
    Active,
    Minimized,
    Maximized,
    /// Exit-animation band; content is already torn down.
    Closing { since: Instant },
}

pub struct WindowRecord {
    pub app: AppId,
    pub title: String,
    z: u32,
    pub geometry: CellRect,
    restore_geometry: Option<CellRect>,
    lifecycle: Lifecycle,
    pub content: ContentBody,
}

impl WindowRecord {
    pub fn z(&self) -> u32 {
        self.z
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_minimized(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Minimized)
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Closing { .. })
    }
}

/// Membership changes, drained by the shell and mirrored into the taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Opened { app: AppId, title: String },
    Closed { app: AppId },
}

pub struct WindowRegistry {
    windows: BTreeMap<AppId, WindowRecord>,
    stacking: StackingAllocator,
    decorator: Rc<dyn WindowDecorator>,
    events: Vec<WindowEvent>,
    notices: Vec<Notice>,
    managed_area: Rect,
    rng: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64 | 1)
            .unwrap_or(1);
        Self::with_seed(seed)
    }

    /// Deterministic spawn positions for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            windows: BTreeMap::new(),
            stacking: StackingAllocator::new(),
            decorator: Rc::new(DefaultDecorator),
            events: Vec::new(),
            notices: Vec::new(),
            managed_area: Rect::new(0, 0, 120, 36),
            rng: seed.max(1),
        }
    }

    pub fn decorator(&self) -> Rc<dyn WindowDecorator> {
        self.decorator.clone()
    }

    pub fn managed_area(&self) -> Rect {
        self.managed_area
    }

    /// Update the desktop area windows live in. Maximized windows track it.
    pub fn set_managed_area(&mut self, area: Rect) {
        if self.managed_area == area {
            return;
        }
        self.managed_area = area;
        let full = CellRect::from_rect(area);
        let decorator = self.decorator.clone();
        for record in self.windows.values_mut() {
            if matches!(record.lifecycle, Lifecycle::Maximized) {
                record.geometry = full;
                record.content.resized(decorator.content_area(full));
            }
        }
    }

    /// Open a window for `app`, or focus the existing one (singleton per
    /// app: a second open never creates a duplicate).
    pub fn open(&mut self, app: AppId, dispatcher: &mut ContentDispatcher) {
        if let Some(record) = self.windows.get(&app) {
            if !record.is_closing() {
                self.focus(app);
            }
            return;
        }

        let geometry = self.spawn_geometry();
        let z = self.stacking.next();
        let mut content = dispatcher.create(app);
        content.mounted(self.decorator.content_area(geometry));
        let title = app.title().to_string();
        self.windows.insert(
            app,
            WindowRecord {
                app,
                title: title.clone(),
                z,
                geometry,
                restore_geometry: None,
                lifecycle: Lifecycle::Opening {
                    since: Instant::now(),
                },
                content,
            },
        );
        self.events.push(WindowEvent::Opened { app, title });
        tracing::info!(%app, z, ?geometry, "window opened");
    }

    /// Raise a window to the top, restoring it from minimize if needed.
    /// No-op for absent or closing windows.
    pub fn focus(&mut self, app: AppId) {
        let decorator = self.decorator.clone();
        let Some(record) = self.windows.get_mut(&app) else {
            return;
        };
        if record.is_closing() {
            return;
        }
        let z = self.stacking.next();
        let bounds = decorator.content_area(record.geometry);
        if record.is_minimized() {
            record.lifecycle = Lifecycle::Active;
            record.content.restored(bounds);
        } else {
            // at-rest resync; overlay content re-reports its rectangle
            record.content.resized(bounds);
        }
        record.z = z;
        tracing::debug!(%app, z, "window focused");
    }

    pub fn minimize(&mut self, app: AppId) {
        let Some(record) = self.windows.get_mut(&app) else {
            return;
        };
        match record.lifecycle {
            Lifecycle::Minimized | Lifecycle::Closing { .. } => {}
            _ => {
                record.lifecycle = Lifecycle::Minimized;
                record.content.minimized();
                tracing::debug!(%app, "window minimized");
            }
        }
    }

    /// Flip between `Active` and `Maximized`; the pre-maximize geometry is
    /// restored on the way back.
    pub fn toggle_maximize(&mut self, app: AppId) {
        let full = CellRect::from_rect(self.managed_area);
        let decorator = self.decorator.clone();
        let Some(record) = self.windows.get_mut(&app) else {
            return;
        };
        match record.lifecycle {
            Lifecycle::Maximized => {
                if let Some(prev) = record.restore_geometry.take() {
                    record.geometry = prev;
                }
                record.lifecycle = Lifecycle::Active;
            }
            Lifecycle::Active | Lifecycle::Opening { .. } => {
                record.restore_geometry = Some(record.geometry);
                record.geometry = full;
                record.lifecycle = Lifecycle::Maximized;
            }
            Lifecycle::Minimized | Lifecycle::Closing { .. } => return,
        }
        record.z = self.stacking.next();
        let bounds = decorator.content_area(record.geometry);
        record.content.resized(bounds);
    }

    /// Idempotent close. The content handle is torn down exactly once, on
    /// the first call; the record lingers in `Closing` for the exit
    /// animation and is removed by the frame sweep.
    pub fn close(&mut self, app: AppId) {
        let Some(record) = self.windows.get_mut(&app) else {
            return;
        };
        if record.is_closing() {
            return;
        }
        if let Some(notice) = record.content.teardown() {
            self.notices.push(notice);
        }
        record.lifecycle = Lifecycle::Closing {
            since: Instant::now(),
        };
        tracing::info!(%app, "window closing");
    }

    /// Geometry write from the drag controller; clamped so enough of the
    /// window stays on screen to grab again.
    pub fn set_geometry(&mut self, app: AppId, geometry: CellRect) {
        let area = self.managed_area;
        let Some(record) = self.windows.get_mut(&app) else {
            return;
        };
        if record.is_closing() {
            return;
        }
        let min = MIN_VISIBLE_MARGIN as i32;
        let left = area.x as i32 - geometry.width as i32 + min;
        let right = (area.x + area.width) as i32 - min;
        let top = area.y as i32;
        let bottom = (area.y + area.height) as i32 - 1;
        record.geometry = CellRect {
            x: geometry.x.clamp(left, right.max(left)),
            y: geometry.y.clamp(top, bottom.max(top)),
            ..geometry
        };
    }

    /// Per-tick pump: promotes entry animations, drives content (autosave,
    /// bridge sync) and sweeps out records whose exit animation finished.
    pub fn on_frame(&mut self, now: Instant, drag_target: Option<AppId>) {
        let decorator = self.decorator.clone();
        let mut expired: Vec<AppId> = Vec::new();
        for record in self.windows.values_mut() {
            match record.lifecycle {
                Lifecycle::Opening { since } => {
                    if now.duration_since(since) >= OPEN_ANIMATION {
                        record.lifecycle = Lifecycle::Active;
                    }
                }
                Lifecycle::Closing { since } => {
                    if now.duration_since(since) >= CLOSE_ANIMATION {
                        expired.push(record.app);
                    }
                    continue;
                }
                _ => {}
            }
            let bounds = decorator.content_area(record.geometry);
            let dragging = drag_target == Some(record.app);
            if let Some(notice) = record.content.frame(now, bounds, dragging) {
                self.notices.push(notice);
            }
        }
        for app in expired {
            self.windows.remove(&app);
            self.events.push(WindowEvent::Closed { app });
            tracing::debug!(%app, "window removed");
        }
    }

    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn get(&self, app: AppId) -> Option<&WindowRecord> {
        self.windows.get(&app)
    }

    pub fn get_mut(&mut self, app: AppId) -> Option<&mut WindowRecord> {
        self.windows.get_mut(&app)
    }

    pub fn contains(&self, app: AppId) -> bool {
        self.windows.contains_key(&app)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values()
    }

    /// Non-minimized windows, back to front.
    pub fn draw_order(&self) -> Vec<AppId> {
        let mut order: Vec<(u32, AppId)> = self
            .windows
            .values()
            .filter(|r| !r.is_minimized())
            .map(|r| (r.z, r.app))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, app)| app).collect()
    }

    /// The window holding the highest z among non-minimized windows.
    pub fn topmost(&self) -> Option<AppId> {
        self.draw_order().last().copied()
    }

    /// Topmost window whose rectangle contains the given cell.
    pub fn window_at(&self, column: u16, row: u16) -> Option<AppId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|app| {
                self.windows
                    .get(app)
                    .is_some_and(|r| r.geometry.contains(column, row))
            })
    }

    pub fn content_bounds(&self, app: AppId) -> Option<CellRect> {
        self.windows
            .get(&app)
            .map(|r| self.decorator.content_area(r.geometry))
    }

    fn next_rand(&mut self) -> u64 {
        // xorshift64; spawn placement only needs to look scattered
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng = x;
        x
    }

    /// Pseudo-random initial position inside a band that keeps the whole
    /// window on screen, so freshly opened windows never stack perfectly.
    fn spawn_geometry(&mut self) -> CellRect {
        let area = self.managed_area;
        let width = DEFAULT_WINDOW_WIDTH.min(area.width.max(8));
        let height = DEFAULT_WINDOW_HEIGHT.min(area.height.max(6));
        let band_w = area.width.saturating_sub(width).max(1) as u64;
        let band_h = area.height.saturating_sub(height).max(1) as u64;
        let x = area.x as i32 + (self.next_rand() % band_w) as i32;
        let y = area.y as i32 + (self.next_rand() % band_h) as i32;
        CellRect::new(x, y, width, height)
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
