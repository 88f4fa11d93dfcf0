//! Start menu overlay: lists every app, publishes `OpenApp` on selection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppId;
use crate::bus::{BusEvent, ShellBus};
use crate::geometry::rect_contains;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Default)]
pub struct StartMenu {
    visible: bool,
    selected: usize,
    /// Row hit rectangles recorded during the last render.
    hits: Vec<(Rect, AppId)>,
    rect: Rect,
}

impl StartMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.visible && rect_contains(self.rect, column, row)
    }

    /// Keyboard navigation while open. Selection publishes to the bus and
    /// closes the menu.
    pub fn handle_key(&mut self, key: &KeyEvent, bus: &mut ShellBus) -> bool {
        if !self.visible {
            return false;
        }
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(AppId::ALL.len() - 1);
                true
            }
            KeyCode::Enter => {
                bus.publish(BusEvent::OpenApp(AppId::ALL[self.selected]));
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Mouse click while open: a row opens that app, anywhere else closes
    /// the menu.
    pub fn handle_click(&mut self, column: u16, row: u16, bus: &mut ShellBus) -> bool {
        if !self.visible {
            return false;
        }
        if let Some((_, app)) = self
            .hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            bus.publish(BusEvent::OpenApp(*app));
            self.close();
            return true;
        }
        self.close();
        // a click outside only dismisses; callers stop routing it further
        rect_contains(self.rect, column, row)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, desktop: Rect, user_name: &str) {
        self.hits.clear();
        if !self.visible || desktop.width < 24 || desktop.height < 6 {
            self.rect = Rect::default();
            return;
        }
        let height = (AppId::ALL.len() as u16 + 4).min(desktop.height);
        let width = 26u16.min(desktop.width);
        let rect = Rect {
            x: desktop.x,
            y: desktop.y + desktop.height - height,
            width,
            height,
        };
        self.rect = rect;

        let base = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        frame.fill(rect, base);
        frame.set_string(
            rect.x + 1,
            rect.y + 1,
            &format!("◉ {user_name}"),
            base.add_modifier(Modifier::BOLD),
        );

        for (idx, app) in AppId::ALL.into_iter().enumerate() {
            let y = rect.y + 3 + idx as u16;
            if y >= rect.y + rect.height {
                break;
            }
            let style = if idx == self.selected {
                Style::default()
                    .bg(theme::menu_selected_bg())
                    .fg(theme::menu_selected_fg())
            } else {
                base
            };
            let label = format!(" {} {:<18}", app.icon(), app.title());
            frame.set_string(rect.x + 1, y, &label, style);
            self.hits.push((
                Rect {
                    x: rect.x,
                    y,
                    width: rect.width,
                    height: 1,
                },
                app,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_publishes_the_selected_app_and_closes() {
        let mut menu = StartMenu::new();
        let mut bus = ShellBus::new();
        menu.toggle();
        menu.handle_key(&key(KeyCode::Down), &mut bus);
        menu.handle_key(&key(KeyCode::Enter), &mut bus);
        assert!(!menu.visible());
        assert_eq!(bus.drain(), vec![BusEvent::OpenApp(AppId::ALL[1])]);
    }

    #[test]
    fn click_on_a_row_publishes_that_app() {
        let mut menu = StartMenu::new();
        let mut bus = ShellBus::new();
        menu.toggle();

        let desktop = Rect::new(0, 0, 80, 23);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        let mut frame = UiFrame::from_parts(Rect::new(0, 0, 80, 24), &mut buf);
        menu.render(&mut frame, desktop, "someone");

        let (rect, app) = menu.hits[2];
        assert!(menu.handle_click(rect.x + 2, rect.y, &mut bus));
        assert_eq!(bus.drain(), vec![BusEvent::OpenApp(app)]);
        assert!(!menu.visible());
    }

    #[test]
    fn click_elsewhere_only_dismisses() {
        let mut menu = StartMenu::new();
        let mut bus = ShellBus::new();
        menu.toggle();

        let desktop = Rect::new(0, 0, 80, 23);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        let mut frame = UiFrame::from_parts(Rect::new(0, 0, 80, 24), &mut buf);
        menu.render(&mut frame, desktop, "someone");

        menu.handle_click(70, 2, &mut bus);
        assert!(!menu.visible());
        assert!(bus.is_empty());
    }
}
