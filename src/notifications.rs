//! Transient notification toasts, rendered in the top-right corner.

use std::collections::VecDeque;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::TOAST_LIFETIME;
use crate::content::Notice;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug)]
struct Toast {
    notice: Notice,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice, now: Instant) {
        tracing::debug!(title = %notice.title, "notification");
        self.toasts.push_back(Toast {
            notice,
            shown_at: now,
        });
        // keep the stack shallow; oldest toasts give way
        while self.toasts.len() > 4 {
            self.toasts.pop_front();
        }
    }

    /// Drop expired toasts. Called once per tick.
    pub fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.duration_since(t.shown_at) < TOAST_LIFETIME);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, desktop: Rect) {
        if self.toasts.is_empty() || desktop.width < 20 {
            return;
        }
        let width = 32u16.min(desktop.width);
        let x = desktop.x + desktop.width - width;
        let style = Style::default().bg(theme::toast_bg()).fg(theme::toast_fg());
        let mut y = desktop.y;
        for toast in &self.toasts {
            if y + 2 > desktop.y + desktop.height {
                break;
            }
            let rect = Rect {
                x,
                y,
                width,
                height: 2,
            };
            frame.fill(rect, style);
            frame.set_string(
                x + 1,
                y,
                &toast.notice.title,
                style.add_modifier(Modifier::BOLD),
            );
            frame.set_string(x + 1, y + 1, &toast.notice.body, style);
            y += 3;
        }
    }
}
