//! Pointer-driven window movement.
//!
//! Pointer-move events arrive far more often than frames are drawn, so a
//! move never writes geometry directly: it only reschedules the session's
//! single pending frame callback with the latest position. The tick flushes
//! at most one write per frame, and pointer-up applies a final write so the
//! last movement is never dropped. Input is a single pointer, so at most one
//! session exists process-wide.

use crate::apps::AppId;
use crate::frame::FrameScheduler;
use crate::geometry::CellRect;
use crate::registry::WindowRegistry;

#[derive(Debug)]
pub struct DragSession {
    target: AppId,
    /// Pointer offset from the window origin at grab time.
    grab: (i32, i32),
    /// Latest pointer position, applied on the next tick.
    pending: FrameScheduler<(u16, u16)>,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<AppId> {
        self.session.as_ref().map(|s| s.target)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session on pointer-down over a titlebar. Ignored while
    /// another session is live. Focuses the target.
    pub fn begin(
        &mut self,
        registry: &mut WindowRegistry,
        app: AppId,
        column: u16,
        row: u16,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(record) = registry.get(app) else {
            return false;
        };
        if record.is_closing() {
            return false;
        }
        let grab = (
            column as i32 - record.geometry.x,
            row as i32 - record.geometry.y,
        );
        registry.focus(app);
        self.session = Some(DragSession {
            target: app,
            grab,
            pending: FrameScheduler::new(),
        });
        tracing::debug!(%app, ?grab, "drag started");
        true
    }

    /// Record the latest pointer position; geometry is not touched until the
    /// next tick.
    pub fn pointer_move(&mut self, column: u16, row: u16) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.pending.schedule((column, row));
        true
    }

    /// Tick: apply at most one coalesced geometry write. A session whose
    /// target vanished (closed mid-drag) is torn down here without touching
    /// anything.
    pub fn on_frame(&mut self, registry: &mut WindowRegistry) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let stale = registry
            .get(session.target)
            .is_none_or(|record| record.is_closing());
        if stale {
            tracing::debug!(app = %session.target, "drag target gone, session dropped");
            self.session = None;
            return;
        }
        if let Some((column, row)) = session.pending.take() {
            apply_move(registry, session.target, session.grab, column, row);
        }
    }

    /// End the session, guaranteeing the final position is applied even if
    /// no tick ran after the last move.
    pub fn pointer_up(&mut self, registry: &mut WindowRegistry, column: u16, row: u16) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.pending.cancel();
        let live = registry
            .get(session.target)
            .is_some_and(|record| !record.is_closing());
        if live {
            apply_move(registry, session.target, session.grab, column, row);
        }
        tracing::debug!(app = %session.target, "drag finished");
    }

    /// Deterministic teardown when the target window is closed mid-drag.
    pub fn cancel_if_target(&mut self, app: AppId) {
        if self.target() == Some(app) {
            self.session = None;
        }
    }
}

fn apply_move(registry: &mut WindowRegistry, app: AppId, grab: (i32, i32), column: u16, row: u16) {
    let Some(record) = registry.get(app) else {
        return;
    };
    let geometry = CellRect {
        x: column as i32 - grab.0,
        y: row as i32 - grab.1,
        ..record.geometry
    };
    registry.set_geometry(app, geometry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentDispatcher;
    use std::path::PathBuf;
    use std::time::Instant;

    fn fixture(app: AppId) -> (WindowRegistry, DragController) {
        let mut registry = WindowRegistry::with_seed(11);
        let mut dispatcher = ContentDispatcher::new(PathBuf::from("/tmp/term-desk-drag"), None);
        registry.open(app, &mut dispatcher);
        (registry, DragController::new())
    }

    fn origin(registry: &WindowRegistry, app: AppId) -> (i32, i32) {
        let g = registry.get(app).unwrap().geometry;
        (g.x, g.y)
    }

    #[test]
    fn moves_are_coalesced_to_one_write_per_tick() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        reg.set_geometry(AppId::Files, CellRect::new(10, 5, 30, 10));
        assert!(drag.begin(&mut reg, AppId::Files, 14, 6));

        // burst of moves between ticks: geometry untouched
        drag.pointer_move(20, 8);
        drag.pointer_move(25, 9);
        drag.pointer_move(30, 11);
        assert_eq!(origin(&reg, AppId::Files), (10, 5));

        // one tick applies only the latest
        drag.on_frame(&mut reg);
        assert_eq!(origin(&reg, AppId::Files), (30 - 4, 11 - 1));
    }

    #[test]
    fn final_offset_matches_pointer_travel_exactly() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        reg.set_geometry(AppId::Files, CellRect::new(10, 5, 30, 10));
        let (px, py) = (14u16, 6u16);
        let (qx, qy) = (37u16, 19u16);
        drag.begin(&mut reg, AppId::Files, px, py);
        drag.pointer_move(18, 9);
        drag.on_frame(&mut reg);
        drag.pointer_move(33, 16);
        // pointer-up without an intervening tick still lands the last update
        drag.pointer_up(&mut reg, qx, qy);
        assert_eq!(
            origin(&reg, AppId::Files),
            (10 + (qx as i32 - px as i32), 5 + (qy as i32 - py as i32))
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn only_one_session_exists_at_a_time() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        let mut dispatcher = ContentDispatcher::new(PathBuf::from("/tmp/term-desk-drag"), None);
        reg.open(AppId::Music, &mut dispatcher);
        reg.set_geometry(AppId::Files, CellRect::new(10, 5, 30, 10));
        reg.set_geometry(AppId::Music, CellRect::new(50, 5, 30, 10));

        assert!(drag.begin(&mut reg, AppId::Files, 12, 6));
        assert!(!drag.begin(&mut reg, AppId::Music, 52, 6));
        assert_eq!(drag.target(), Some(AppId::Files));
    }

    #[test]
    fn drag_start_raises_the_window() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        let mut dispatcher = ContentDispatcher::new(PathBuf::from("/tmp/term-desk-drag"), None);
        reg.open(AppId::Music, &mut dispatcher);
        assert_eq!(reg.topmost(), Some(AppId::Music));
        reg.set_geometry(AppId::Files, CellRect::new(10, 5, 30, 10));
        drag.begin(&mut reg, AppId::Files, 12, 6);
        assert_eq!(reg.topmost(), Some(AppId::Files));
    }

    #[test]
    fn closing_the_target_mid_drag_drops_the_session() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        reg.set_geometry(AppId::Files, CellRect::new(10, 5, 30, 10));
        drag.begin(&mut reg, AppId::Files, 12, 6);
        drag.pointer_move(40, 12);

        reg.close(AppId::Files);
        drag.on_frame(&mut reg);
        assert!(!drag.is_dragging());
        // the pending move never landed on the closing window
        assert_eq!(origin(&reg, AppId::Files), (10, 5));
        reg.on_frame(Instant::now(), drag.target());
    }

    #[test]
    fn pointer_up_without_session_is_a_no_op() {
        let (mut reg, mut drag) = fixture(AppId::Files);
        drag.pointer_up(&mut reg, 3, 3);
        assert!(!drag.is_dragging());
    }
}
