//! Taskbar: start button, one button per open window, clock and host info.
//!
//! Purely derived state. Buttons are created and destroyed only in response
//! to registry `Opened`/`Closed` events, so the entry set always mirrors the
//! set of live window records.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppId;
use crate::geometry::rect_contains;
use crate::registry::WindowEvent;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone)]
pub struct TaskbarEntry {
    pub app: AppId,
    pub title: String,
    /// Hit rectangle recorded during the last render.
    rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    Window(AppId),
}

#[derive(Debug, Default)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
    area: Rect,
    start_rect: Rect,
    hostname: Option<String>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror registry membership changes into buttons.
    pub fn apply(&mut self, events: &[WindowEvent]) {
        for event in events {
            match event {
                WindowEvent::Opened { app, title } => {
                    if !self.entries.iter().any(|e| e.app == *app) {
                        self.entries.push(TaskbarEntry {
                            app: *app,
                            title: title.clone(),
                            rect: Rect::default(),
                        });
                    }
                }
                WindowEvent::Closed { app } => {
                    self.entries.retain(|e| e.app != *app);
                }
            }
        }
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    /// Reserve the bottom row for the bar; the rest is the managed desktop.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let bar_h = 1u16.min(area.height);
        let bar = Rect {
            x: area.x,
            y: area.y + area.height - bar_h,
            width: area.width,
            height: bar_h,
        };
        let managed = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - bar_h,
        };
        self.area = bar;
        (managed, bar)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if !rect_contains(self.area, column, row) {
            return None;
        }
        if rect_contains(self.start_rect, column, row) {
            return Some(TaskbarHit::Start);
        }
        self.entries
            .iter()
            .find(|e| rect_contains(e.rect, column, row))
            .map(|e| TaskbarHit::Window(e.app))
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn render<F>(
        &mut self,
        frame: &mut UiFrame<'_>,
        focused: Option<AppId>,
        menu_open: bool,
        is_minimized: F,
    ) where
        F: Fn(AppId) -> bool,
    {
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().bg(theme::taskbar_bg()).fg(theme::taskbar_fg());
        frame.fill(area, base);

        let y = area.y;
        let max_x = area.x + area.width;
        let mut x = area.x;

        // start button
        const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
        let start_label = format!("≡ {CRATE_NAME}");
        let start_width = start_label.chars().count() as u16;
        let start_style = if menu_open {
            Style::default()
                .bg(theme::taskbar_active_bg())
                .fg(theme::taskbar_active_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            base.add_modifier(Modifier::BOLD)
        };
        frame.set_string(x, y, &start_label, start_style);
        self.start_rect = Rect {
            x,
            y,
            width: start_width,
            height: 1,
        };
        x = (x + start_width + 1).min(max_x);

        // window buttons
        let right_reserved = 22u16;
        for entry in &mut self.entries {
            let minimized = is_minimized(entry.app);
            let label = if minimized {
                format!(" {} ({}) ", entry.app.icon(), entry.title)
            } else {
                format!(" {} {} ", entry.app.icon(), entry.title)
            };
            let width = label.chars().count() as u16;
            if x + width + right_reserved > max_x {
                entry.rect = Rect::default();
                continue;
            }
            let style = if focused == Some(entry.app) && !minimized {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_active_fg())
            } else {
                base
            };
            frame.set_string(x, y, &label, style);
            entry.rect = Rect {
                x,
                y,
                width,
                height: 1,
            };
            x += width + 1;
        }

        // info segment: clock + user@host, right-aligned
        let clock = Local::now().format("%H:%M").to_string();
        let hostname = self.hostname.get_or_insert_with(|| {
            hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_string())
        });
        let user = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
        let info = format!("{clock} · {user}@{hostname}");
        let info_width = info.chars().count() as u16;
        if info_width < area.width {
            frame.set_string(max_x - info_width - 1, y, &info, base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(app: AppId) -> WindowEvent {
        WindowEvent::Opened {
            app,
            title: app.title().to_string(),
        }
    }

    #[test]
    fn entries_mirror_open_and_close_events() {
        let mut bar = Taskbar::new();
        bar.apply(&[opened(AppId::Files), opened(AppId::Notes)]);
        assert_eq!(bar.entries().len(), 2);

        bar.apply(&[WindowEvent::Closed { app: AppId::Files }]);
        let apps: Vec<AppId> = bar.entries().iter().map(|e| e.app).collect();
        assert_eq!(apps, vec![AppId::Notes]);
    }

    #[test]
    fn duplicate_open_events_do_not_duplicate_buttons() {
        let mut bar = Taskbar::new();
        bar.apply(&[opened(AppId::Files), opened(AppId::Files)]);
        assert_eq!(bar.entries().len(), 1);
    }

    #[test]
    fn split_reserves_the_bottom_row() {
        let mut bar = Taskbar::new();
        let (managed, strip) = bar.split_area(Rect::new(0, 0, 80, 24));
        assert_eq!(managed, Rect::new(0, 0, 80, 23));
        assert_eq!(strip, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn hit_test_finds_rendered_buttons() {
        use ratatui::buffer::Buffer;

        let mut bar = Taskbar::new();
        bar.apply(&[opened(AppId::Files)]);
        let area = Rect::new(0, 0, 80, 24);
        let (_, strip) = bar.split_area(area);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        bar.render(&mut frame, None, false, |_| false);

        assert_eq!(bar.hit_test(0, strip.y), Some(TaskbarHit::Start));
        let entry_rect = bar.entries()[0].rect;
        assert!(entry_rect.width > 0);
        assert_eq!(
            bar.hit_test(entry_rect.x, strip.y),
            Some(TaskbarHit::Window(AppId::Files))
        );
        assert_eq!(bar.hit_test(40, 2), None);
    }
}
