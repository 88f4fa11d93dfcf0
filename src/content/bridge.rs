//! Bridge-view synchronization.
//!
//! Some window bodies are not drawn by the shell at all: an external
//! compositor paints them as an overlay and has to be told, out of band,
//! where to draw. The shell owns a placeholder area (the window's content
//! rectangle) and keeps the overlay glued to it: one `show`/`resize` call at
//! rest, one `resize` per frame tick while the window is being dragged, and
//! `hide` on minimize/close.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::geometry::CellRect;
use crate::theme;
use crate::ui::UiFrame;

/// Host channel for externally composited overlays. Calls are fire and
/// forget: no acknowledgment, no error return, and delivery must never be
/// assumed.
pub trait OverlayHost {
    fn show(&mut self, bounds: CellRect);
    fn hide(&mut self);
    fn resize(&mut self, bounds: CellRect);
}

pub type SharedHost = Rc<RefCell<dyn OverlayHost>>;

/// Host that logs every call through `tracing`; wired up with
/// `--overlay log` for diagnosing sync behavior against a real compositor.
#[derive(Debug, Default)]
pub struct LoggingHost;

impl OverlayHost for LoggingHost {
    fn show(&mut self, bounds: CellRect) {
        tracing::debug!(?bounds, "overlay show");
    }

    fn hide(&mut self) {
        tracing::debug!("overlay hide");
    }

    fn resize(&mut self, bounds: CellRect) {
        tracing::trace!(?bounds, "overlay resize");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Show(CellRect),
    Hide,
    Resize(CellRect),
}

/// In-memory host that records every call, used by tests to assert on the
/// exact call sequence.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn shared() -> Rc<RefCell<RecordingHost>> {
        Rc::new(RefCell::new(RecordingHost::default()))
    }

    pub fn count(&self, call: fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| call(c)).count()
    }
}

impl OverlayHost for RecordingHost {
    fn show(&mut self, bounds: CellRect) {
        self.calls.push(HostCall::Show(bounds));
    }

    fn hide(&mut self) {
        self.calls.push(HostCall::Hide);
    }

    fn resize(&mut self, bounds: CellRect) {
        self.calls.push(HostCall::Resize(bounds));
    }
}

/// Window body backed by an external overlay.
///
/// `shown` gates every outgoing call: once `hide` has been issued (minimize
/// or teardown), no resize can land after it until a fresh `show` recomputes
/// the bounds. That serialization is what prevents a stale-sized flash when
/// a resize and a hide race within the same tick.
pub struct BridgeView {
    host: SharedHost,
    shown: bool,
    torn_down: bool,
}

impl BridgeView {
    pub fn new(host: SharedHost) -> Self {
        Self {
            host,
            shown: false,
            torn_down: false,
        }
    }

    /// First placement, right after the window opens.
    pub fn mounted(&mut self, bounds: CellRect) {
        self.host.borrow_mut().show(bounds);
        self.shown = true;
    }

    /// Per-tick pump. While the owning window is being dragged the overlay
    /// has no way to follow on its own, so bounds are re-reported every
    /// frame; at rest this is a no-op (resyncs go through `resized`).
    pub fn frame(&mut self, bounds: CellRect, dragging: bool) {
        if dragging && self.shown {
            self.host.borrow_mut().resize(bounds);
        }
    }

    /// At-rest resync, e.g. after a window resize or maximize toggle.
    pub fn resized(&mut self, bounds: CellRect) {
        if self.shown {
            self.host.borrow_mut().resize(bounds);
        }
    }

    pub fn minimized(&mut self) {
        if self.shown {
            self.host.borrow_mut().hide();
            self.shown = false;
        }
    }

    /// Restore from minimize. Bounds are recomputed by the caller; stale
    /// bounds from before the minimize are never reused.
    pub fn restored(&mut self, bounds: CellRect) {
        if !self.torn_down {
            self.host.borrow_mut().show(bounds);
            self.shown = true;
        }
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if self.shown {
            self.host.borrow_mut().hide();
            self.shown = false;
        }
        self.torn_down = true;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// The placeholder itself renders only a dim backdrop; the real pixels
    /// come from the external compositor on top of this area.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(area, Style::default().bg(theme::window_bg()));
        let label = Paragraph::new(Line::from("overlay content"))
            .style(Style::default().fg(theme::desktop_fg()));
        let y = area.y + area.height / 2;
        frame.render_widget(label, Rect::new(area.x + 1, y, area.width.saturating_sub(2), 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(x: i32) -> CellRect {
        CellRect::new(x, 5, 30, 10)
    }

    #[test]
    fn mounted_then_teardown_issues_show_then_hide_once() {
        let host = RecordingHost::shared();
        let mut view = BridgeView::new(host.clone());
        view.mounted(bounds(0));
        view.teardown();
        view.teardown();
        assert_eq!(
            host.borrow().calls,
            vec![HostCall::Show(bounds(0)), HostCall::Hide]
        );
    }

    #[test]
    fn frame_resizes_only_while_dragging() {
        let host = RecordingHost::shared();
        let mut view = BridgeView::new(host.clone());
        view.mounted(bounds(0));
        view.frame(bounds(1), false);
        view.frame(bounds(2), true);
        view.frame(bounds(3), true);
        let recorded = host.borrow();
        assert_eq!(
            recorded.calls[1..],
            [HostCall::Resize(bounds(2)), HostCall::Resize(bounds(3))]
        );
    }

    #[test]
    fn no_resize_lands_after_hide() {
        let host = RecordingHost::shared();
        let mut view = BridgeView::new(host.clone());
        view.mounted(bounds(0));
        view.minimized();
        // A drag tick arriving in the same frame as the hide must be gated.
        view.frame(bounds(9), true);
        view.resized(bounds(9));
        assert_eq!(
            host.borrow().calls,
            vec![HostCall::Show(bounds(0)), HostCall::Hide]
        );
    }

    #[test]
    fn restore_recomputes_bounds() {
        let host = RecordingHost::shared();
        let mut view = BridgeView::new(host.clone());
        view.mounted(bounds(0));
        view.minimized();
        view.restored(bounds(7));
        assert_eq!(
            host.borrow().calls,
            vec![
                HostCall::Show(bounds(0)),
                HostCall::Hide,
                HostCall::Show(bounds(7)),
            ]
        );
    }

    #[test]
    fn minimize_then_teardown_hides_only_once() {
        let host = RecordingHost::shared();
        let mut view = BridgeView::new(host.clone());
        view.mounted(bounds(0));
        view.minimized();
        view.teardown();
        let hides = host.borrow().count(|c| matches!(c, HostCall::Hide));
        assert_eq!(hides, 1);
    }
}
