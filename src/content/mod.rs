//! Window content: the closed set of body variants plus the dispatcher that
//! materializes them.
//!
//! Every consumer matches `ContentBody` exhaustively; adding a content kind
//! is a compile-time-checked change across the crate.

pub mod bridge;
pub mod courses;
pub mod editor;
pub mod frame_view;
pub mod static_panel;

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

pub use bridge::{BridgeView, HostCall, LoggingHost, OverlayHost, RecordingHost, SharedHost};
pub use courses::CoursePlatform;
pub use editor::NotesEditor;
pub use frame_view::FrameView;
pub use static_panel::StaticPanel;

use crate::apps::{AppId, ContentKind};
use crate::geometry::CellRect;
use crate::ui::UiFrame;

/// Transient user-facing message produced by content (saves, exports). The
/// shell forwards these to the notification area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A window's body. Owned exclusively by its window record; torn down
/// exactly once when the record closes.
pub enum ContentBody {
    Static(StaticPanel),
    Frame(FrameView),
    Editor(NotesEditor),
    Bridge(BridgeView),
    /// Body deferred to a collaborator; the shell routes render and input
    /// for this window straight to it.
    Delegated,
}

impl ContentBody {
    /// Called once right after the window record is inserted, with the
    /// window's content-area bounds.
    pub fn mounted(&mut self, bounds: CellRect) {
        match self {
            ContentBody::Bridge(view) => view.mounted(bounds),
            ContentBody::Static(_)
            | ContentBody::Frame(_)
            | ContentBody::Editor(_)
            | ContentBody::Delegated => {}
        }
    }

    /// Per-tick pump. `dragging` is true while the owning window has the
    /// live drag session.
    pub fn frame(&mut self, now: Instant, bounds: CellRect, dragging: bool) -> Option<Notice> {
        match self {
            ContentBody::Editor(editor) => editor.frame(now),
            ContentBody::Bridge(view) => {
                view.frame(bounds, dragging);
                None
            }
            ContentBody::Static(_) | ContentBody::Frame(_) | ContentBody::Delegated => None,
        }
    }

    /// At-rest geometry change (resize, maximize toggle).
    pub fn resized(&mut self, bounds: CellRect) {
        match self {
            ContentBody::Bridge(view) => view.resized(bounds),
            ContentBody::Static(_)
            | ContentBody::Frame(_)
            | ContentBody::Editor(_)
            | ContentBody::Delegated => {}
        }
    }

    pub fn minimized(&mut self) {
        match self {
            ContentBody::Bridge(view) => view.minimized(),
            ContentBody::Static(_)
            | ContentBody::Frame(_)
            | ContentBody::Editor(_)
            | ContentBody::Delegated => {}
        }
    }

    /// Restored from minimize with freshly computed bounds.
    pub fn restored(&mut self, bounds: CellRect) {
        match self {
            ContentBody::Bridge(view) => view.restored(bounds),
            ContentBody::Static(_)
            | ContentBody::Frame(_)
            | ContentBody::Editor(_)
            | ContentBody::Delegated => {}
        }
    }

    /// Dispose the body's resources. Safe to call once; the registry's
    /// idempotent close guarantees it is never called twice.
    pub fn teardown(&mut self) -> Option<Notice> {
        match self {
            ContentBody::Editor(editor) => editor.teardown(),
            ContentBody::Bridge(view) => {
                view.teardown();
                None
            }
            ContentBody::Static(_) | ContentBody::Frame(_) | ContentBody::Delegated => None,
        }
    }

    /// Draw the body into the window's content area. `Delegated` is
    /// intercepted by the shell before this is reached and renders nothing
    /// here.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        match self {
            ContentBody::Static(panel) => panel.render(frame, area),
            ContentBody::Frame(view) => view.render(frame, area, focused),
            ContentBody::Editor(editor) => editor.render(frame, area, focused),
            ContentBody::Bridge(view) => view.render(frame, area),
            ContentBody::Delegated => {}
        }
    }

    /// Keyboard input for the focused window. Returns whether the event was
    /// consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> (bool, Option<Notice>) {
        match self {
            ContentBody::Frame(view) => (view.handle_key(key), None),
            ContentBody::Editor(editor) => {
                let notice = editor.handle_key(key);
                (true, notice)
            }
            ContentBody::Static(_) | ContentBody::Bridge(_) | ContentBody::Delegated => {
                (false, None)
            }
        }
    }
}

/// Materializes window bodies from an app's declared content kind.
pub struct ContentDispatcher {
    notes_dir: PathBuf,
    overlay: Option<SharedHost>,
}

impl ContentDispatcher {
    pub fn new(notes_dir: PathBuf, overlay: Option<SharedHost>) -> Self {
        Self { notes_dir, overlay }
    }

    pub fn overlay_attached(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn create(&mut self, app: AppId) -> ContentBody {
        match app.content_kind() {
            ContentKind::Static => ContentBody::Static(StaticPanel::for_app(app)),
            ContentKind::EmbeddedFrame => ContentBody::Frame(FrameView::new()),
            ContentKind::RichEditor => {
                ContentBody::Editor(NotesEditor::new(self.notes_dir.clone()))
            }
            ContentKind::BridgeView => match &self.overlay {
                Some(host) => ContentBody::Bridge(BridgeView::new(host.clone())),
                // Decided once, here; never retried per frame.
                None => {
                    tracing::debug!(%app, "no overlay host attached, using static fallback");
                    ContentBody::Static(StaticPanel::bridge_fallback(app))
                }
            },
            ContentKind::Delegated => ContentBody::Delegated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dispatcher(overlay: Option<SharedHost>) -> ContentDispatcher {
        ContentDispatcher::new(PathBuf::from("/tmp/term-desk-test-notes"), overlay)
    }

    #[test]
    fn bridge_kind_without_host_falls_back_to_static() {
        let mut d = dispatcher(None);
        assert!(matches!(d.create(AppId::Chat), ContentBody::Static(_)));
    }

    #[test]
    fn bridge_kind_with_host_creates_bridge_body() {
        let host = RecordingHost::shared();
        let mut d = dispatcher(Some(host));
        assert!(matches!(d.create(AppId::Chat), ContentBody::Bridge(_)));
    }

    #[test]
    fn delegated_kind_carries_no_body() {
        let mut d = dispatcher(None);
        assert!(matches!(d.create(AppId::Courses), ContentBody::Delegated));
    }
}
