//! Desktop background and icon strip.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppId;
use crate::bus::{BusEvent, ShellBus};
use crate::geometry::rect_contains;
use crate::theme;
use crate::ui::UiFrame;

/// Apps pinned to the desktop, shown as a column along the left edge.
const PINNED: [AppId; 5] = [
    AppId::Files,
    AppId::Browser,
    AppId::Notes,
    AppId::Chat,
    AppId::Courses,
];

#[derive(Debug, Default)]
pub struct DesktopIcons {
    hits: Vec<(Rect, AppId)>,
}

impl DesktopIcons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click routing; only reached when no window covers the point.
    pub fn handle_click(&self, column: u16, row: u16, bus: &mut ShellBus) -> bool {
        if let Some((_, app)) = self
            .hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            bus.publish(BusEvent::OpenApp(*app));
            return true;
        }
        false
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, desktop: Rect) {
        self.hits.clear();
        frame.fill(
            desktop,
            Style::default().bg(theme::desktop_bg()).fg(theme::desktop_fg()),
        );
        let style = Style::default()
            .bg(theme::desktop_bg())
            .fg(theme::desktop_fg())
            .add_modifier(Modifier::BOLD);
        for (idx, app) in PINNED.into_iter().enumerate() {
            let y = desktop.y + 1 + (idx as u16) * 2;
            if y >= desktop.y + desktop.height {
                break;
            }
            let label = format!("{} {}", app.icon(), app.title());
            frame.set_string(desktop.x + 2, y, &label, style);
            self.hits.push((
                Rect {
                    x: desktop.x + 2,
                    y,
                    width: label.chars().count() as u16,
                    height: 1,
                },
                app,
            ));
        }
    }
}
