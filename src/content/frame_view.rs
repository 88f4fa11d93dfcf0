//! Address-bar-driven page frame.
//!
//! Navigation state (address, history, reload count) is wholly internal to
//! the frame; the window manager never tracks it. The frame cannot rasterize
//! remote pages inside a terminal cell grid, so the body is a placeholder
//! page card, and `Ctrl+O` hands the current address to the system browser.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use linkify::{LinkFinder, LinkKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::ui::UiFrame;

const HOME_URL: &str = "https://www.example.com";
const SEARCH_URL: &str = "https://duckduckgo.com/?q=";

#[derive(Debug)]
pub struct FrameView {
    address: String,
    input: String,
    history: Vec<String>,
    // index into history of the current address
    position: usize,
    reloads: u32,
}

impl FrameView {
    pub fn new() -> Self {
        Self {
            address: HOME_URL.to_string(),
            input: HOME_URL.to_string(),
            history: vec![HOME_URL.to_string()],
            position: 0,
            reloads: 0,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Turn raw address-bar input into a navigable URL. Anything `linkify`
    /// recognizes as a URL is kept (scheme added when missing); everything
    /// else becomes a search query.
    pub fn resolve_address(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return HOME_URL.to_string();
        }
        let mut finder = LinkFinder::new();
        finder.url_must_have_scheme(false);
        let link = finder
            .links(trimmed)
            .find(|l| matches!(l.kind(), LinkKind::Url) && l.as_str().len() == trimmed.len());
        match link {
            Some(l) => {
                let url = l.as_str();
                if url.contains("://") {
                    url.to_string()
                } else {
                    format!("https://{url}")
                }
            }
            None => {
                let mut query = String::new();
                for (i, word) in trimmed.split_whitespace().enumerate() {
                    if i > 0 {
                        query.push('+');
                    }
                    query.push_str(word);
                }
                format!("{SEARCH_URL}{query}")
            }
        }
    }

    pub fn navigate(&mut self, input: &str) {
        let url = Self::resolve_address(input);
        // forward entries are discarded like a real history stack
        self.history.truncate(self.position + 1);
        self.history.push(url.clone());
        self.position = self.history.len() - 1;
        self.address = url.clone();
        self.input = url;
        tracing::debug!(address = %self.address, "frame navigate");
    }

    pub fn back(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.address = self.history[self.position].clone();
            self.input = self.address.clone();
        }
    }

    pub fn forward(&mut self) {
        if self.position + 1 < self.history.len() {
            self.position += 1;
            self.address = self.history[self.position].clone();
            self.input = self.address.clone();
        }
    }

    pub fn reload(&mut self) {
        self.reloads = self.reloads.saturating_add(1);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter => {
                let input = self.input.clone();
                self.navigate(&input);
                true
            }
            KeyCode::Left if alt => {
                self.back();
                true
            }
            KeyCode::Right if alt => {
                self.forward();
                true
            }
            KeyCode::Char('r') if ctrl => {
                self.reload();
                true
            }
            KeyCode::Char('o') if ctrl => {
                if let Err(err) = webbrowser::open(&self.address) {
                    tracing::warn!(%err, "failed to open system browser");
                }
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                self.input.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        frame.fill(area, Style::default().bg(theme::window_bg()));

        // toolbar: nav indicators + address bar
        let can_back = self.position > 0;
        let can_fwd = self.position + 1 < self.history.len();
        let nav = format!(
            "{} {} ⟳ ",
            if can_back { "←" } else { "·" },
            if can_fwd { "→" } else { "·" }
        );
        let bar_style = if focused {
            Style::default().fg(theme::titlebar_focused_fg()).bg(theme::menu_bg())
        } else {
            Style::default().fg(theme::titlebar_fg()).bg(theme::menu_bg())
        };
        let toolbar = Line::from(vec![
            Span::styled(nav, Style::default().fg(theme::accent())),
            Span::styled(self.input.clone(), bar_style.add_modifier(Modifier::UNDERLINED)),
        ]);
        frame.render_widget(
            Paragraph::new(toolbar).style(bar_style),
            Rect::new(area.x, area.y, area.width, 1),
        );

        // placeholder page card
        let body = Text::from(vec![
            Line::default(),
            Line::from(Span::styled(
                page_title(&self.address),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(self.address.clone()),
            Line::default(),
            Line::from(format!(
                "history {} of {} · reloaded {}×",
                self.position + 1,
                self.history.len(),
                self.reloads
            )),
            Line::default(),
            Line::from("Ctrl+O opens this address in the system browser."),
        ]);
        let page = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(1),
        );
        frame.render_widget(
            Paragraph::new(body).style(Style::default().fg(theme::taskbar_fg())),
            page,
        );
    }
}

impl Default for FrameView {
    fn default() -> Self {
        Self::new()
    }
}

/// Rough page title derived from the host part of the address.
fn page_title(address: &str) -> String {
    let host = address
        .split("://")
        .nth(1)
        .unwrap_or(address)
        .split('/')
        .next()
        .unwrap_or(address);
    host.trim_start_matches("www.").to_string()
}
