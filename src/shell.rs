//! Desktop shell: wires the registry, drag controller, taskbar, start menu
//! and collaborators to the event loop, and routes every input event.

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::apps::AppId;
use crate::bus::{BusEvent, ShellBus};
use crate::content::{ContentBody, ContentDispatcher, CoursePlatform, SharedHost};
use crate::decorator::TitlebarHit;
use crate::desktop::DesktopIcons;
use crate::drag::DragController;
use crate::event_loop::ControlFlow;
use crate::markdown::render_markdown;
use crate::notifications::Notifications;
use crate::registry::{WindowEvent, WindowRegistry};
use crate::startmenu::StartMenu;
use crate::state::ShellState;
use crate::taskbar::{Taskbar, TaskbarHit};
use crate::theme;
use crate::tracing_sub::global_log;
use crate::ui::UiFrame;

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

pub struct ShellConfig {
    pub user_name: String,
    pub notes_dir: PathBuf,
    pub overlay: Option<SharedHost>,
    pub spawn_seed: Option<u64>,
    pub open_at_start: Vec<AppId>,
}

pub struct DesktopShell {
    registry: WindowRegistry,
    dispatcher: ContentDispatcher,
    drag: DragController,
    bus: ShellBus,
    taskbar: Taskbar,
    start_menu: StartMenu,
    icons: DesktopIcons,
    notifications: Notifications,
    platform: CoursePlatform,
    state: ShellState,
}

impl DesktopShell {
    pub fn new(config: ShellConfig) -> Self {
        let registry = match config.spawn_seed {
            Some(seed) => WindowRegistry::with_seed(seed),
            None => WindowRegistry::new(),
        };
        let mut bus = ShellBus::new();
        for app in config.open_at_start {
            bus.publish(BusEvent::OpenApp(app));
        }
        Self {
            registry,
            dispatcher: ContentDispatcher::new(config.notes_dir, config.overlay),
            drag: DragController::new(),
            bus,
            taskbar: Taskbar::new(),
            start_menu: StartMenu::new(),
            icons: DesktopIcons::new(),
            notifications: Notifications::new(),
            platform: CoursePlatform::new(),
            state: ShellState::new(config.user_name),
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn bus(&mut self) -> &mut ShellBus {
        &mut self.bus
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.state.mouse_capture_enabled()
    }

    pub fn set_mouse_capture(&mut self, enabled: bool) {
        self.state.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.state.take_mouse_capture_change()
    }

    /// Seed the desktop area before the first draw so startup opens spawn
    /// inside the real viewport instead of the default one.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        let (managed, _) = self
            .taskbar
            .split_area(Rect::new(0, 0, width, height));
        self.registry.set_managed_area(managed);
    }

    /// Per-tick pump, run once before every draw.
    pub fn tick(&mut self, now: Instant) {
        for event in self.bus.drain() {
            match event {
                BusEvent::OpenApp(app) => self.registry.open(app, &mut self.dispatcher),
                BusEvent::CloseApp(app) => self.close_app(app),
            }
        }

        self.drag.on_frame(&mut self.registry);
        self.registry.on_frame(now, self.drag.target());

        let events = self.registry.take_events();
        for event in &events {
            if let WindowEvent::Closed {
                app: AppId::Courses,
            } = event
            {
                self.platform.window_closed();
            }
        }
        self.taskbar.apply(&events);

        for notice in self.registry.take_notices() {
            self.notifications.push(notice, now);
        }
        self.notifications.prune(now);
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.state.quit_confirm_visible() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => return ControlFlow::Quit,
                KeyCode::Char('n') | KeyCode::Esc => self.state.set_quit_confirm(false),
                _ => {}
            }
            return ControlFlow::Continue;
        }

        match key.code {
            KeyCode::Char('q') if ctrl => {
                self.state.set_quit_confirm(true);
                return ControlFlow::Continue;
            }
            KeyCode::F(1) => {
                self.state.toggle_help();
                return ControlFlow::Continue;
            }
            KeyCode::F(12) => {
                self.state.toggle_log();
                return ControlFlow::Continue;
            }
            KeyCode::F(10) => {
                let enabled = self.state.mouse_capture_enabled();
                self.state.set_mouse_capture_enabled(!enabled);
                return ControlFlow::Continue;
            }
            KeyCode::Esc => {
                if self.state.help_visible() {
                    self.state.toggle_help();
                } else if self.state.log_visible() {
                    self.state.toggle_log();
                } else {
                    self.start_menu.toggle();
                }
                return ControlFlow::Continue;
            }
            _ => {}
        }

        if self.start_menu.visible() {
            self.start_menu.handle_key(key, &mut self.bus);
            return ControlFlow::Continue;
        }

        // everything else goes to the focused window's content
        if let Some(app) = self.registry.topmost() {
            if app.content_kind() == crate::apps::ContentKind::Delegated {
                self.platform.handle_key(key);
                return ControlFlow::Continue;
            }
            if let Some(record) = self.registry.get_mut(app) {
                let (_, notice) = record.content.handle_key(key);
                if let Some(notice) = notice {
                    self.notifications.push(notice, Instant::now());
                }
            }
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.pointer_move(mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag
                    .pointer_up(&mut self.registry, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        // taskbar sits above everything
        if self.taskbar.contains(column, row) {
            match self.taskbar.hit_test(column, row) {
                Some(TaskbarHit::Start) => self.start_menu.toggle(),
                Some(TaskbarHit::Window(app)) => self.registry.focus(app),
                None => {}
            }
            return;
        }

        if self.start_menu.visible() {
            let inside = self.start_menu.handle_click(column, row, &mut self.bus);
            if inside {
                return;
            }
            // menu dismissed; the click continues to whatever was under it
        }

        if let Some(app) = self.registry.window_at(column, row) {
            let Some(record) = self.registry.get(app) else {
                return;
            };
            let hit = self
                .registry
                .decorator()
                .titlebar_hit(record.geometry, column, row);
            match hit {
                TitlebarHit::Minimize => self.registry.minimize(app),
                TitlebarHit::Maximize => self.registry.toggle_maximize(app),
                TitlebarHit::Close => self.close_app(app),
                TitlebarHit::Drag => {
                    self.drag.begin(&mut self.registry, app, column, row);
                }
                TitlebarHit::None => self.registry.focus(app),
            }
            return;
        }

        self.icons.handle_click(column, row, &mut self.bus);
    }

    /// Close path shared by titlebar buttons and bus requests: the drag
    /// session dies with its window, deterministically.
    fn close_app(&mut self, app: AppId) {
        self.drag.cancel_if_target(app);
        self.registry.close(app);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let mut ui = UiFrame::new(frame);
        let (managed, _) = self.taskbar.split_area(area);
        self.registry.set_managed_area(managed);

        self.icons.render(&mut ui, managed);

        let focused = self.registry.topmost();
        let decorator = self.registry.decorator();
        for app in self.registry.draw_order() {
            let Some(record) = self.registry.get_mut(app) else {
                continue;
            };
            let geometry = record.geometry;
            let is_focused = focused == Some(app);
            decorator.render_chrome(
                &mut ui,
                geometry,
                &record.title,
                record.app.icon(),
                is_focused,
            );
            let content_rect = decorator.content_area(geometry).clamped();
            match &mut record.content {
                ContentBody::Delegated => {
                    self.platform.render(&mut ui, content_rect, is_focused)
                }
                body => body.render(&mut ui, content_rect, is_focused),
            }
        }

        let menu_open = self.start_menu.visible();
        let user = self.state.user_name().to_string();
        self.start_menu.render(&mut ui, managed, &user);
        self.notifications.render(&mut ui, managed);

        let registry = &self.registry;
        self.taskbar.render(&mut ui, focused, menu_open, |app| {
            registry.get(app).is_some_and(|r| r.is_minimized())
        });

        if self.state.log_visible() {
            render_log_overlay(&mut ui, managed);
        }
        if self.state.help_visible() {
            render_help_overlay(&mut ui, managed);
        }
        if self.state.quit_confirm_visible() {
            render_quit_confirm(&mut ui, managed);
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_help_overlay(ui: &mut UiFrame<'_>, area: Rect) {
    let rect = centered(area, 64, area.height.saturating_sub(4).max(8));
    ui.fill(rect, Style::default().bg(theme::menu_bg()).fg(theme::menu_fg()));
    let text = render_markdown(std::str::from_utf8(EMBEDDED_HELP.content).unwrap_or(""));
    let inner = rect.inner(ratatui::layout::Margin::new(2, 1));
    ui.render_widget(
        Paragraph::new(text)
            .style(Style::default().bg(theme::menu_bg()).fg(theme::menu_fg()))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_log_overlay(ui: &mut UiFrame<'_>, area: Rect) {
    let rect = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: (area.height / 3).max(4).min(area.height),
    };
    let style = Style::default().bg(theme::menu_bg()).fg(theme::desktop_fg());
    ui.fill(rect, style);
    let lines = match global_log().lock() {
        Ok(log) => log.tail(rect.height.saturating_sub(1) as usize),
        Err(_) => Vec::new(),
    };
    ui.set_string(
        rect.x + 1,
        rect.y,
        "shell log",
        style.add_modifier(Modifier::BOLD),
    );
    for (idx, line) in lines.iter().enumerate() {
        ui.set_string(rect.x + 1, rect.y + 1 + idx as u16, line, style);
    }
}

fn render_quit_confirm(ui: &mut UiFrame<'_>, area: Rect) {
    let rect = centered(area, 36, 5);
    let style = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
    ui.fill(rect, style);
    ui.set_string(
        rect.x + 2,
        rect.y + 1,
        "Quit the desktop shell?",
        style.add_modifier(Modifier::BOLD),
    );
    ui.set_string(rect.x + 2, rect.y + 3, "[y] quit    [n] stay", style);
}
