//! Markdown notes editor.
//!
//! A window body that owns a text buffer plus a debounced autosave deadline.
//! Teardown flushes outstanding edits and cancels the deadline; the registry
//! guarantees it runs exactly once.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::clipboard;
use crate::constants::AUTOSAVE_DEBOUNCE;
use crate::content::Notice;
use crate::markdown::render_markdown;
use crate::theme;
use crate::ui::UiFrame;

const DEFAULT_FILE: &str = "welcome.md";

const WELCOME_DOC: &str = indoc! {"
    # Welcome to Notes

    Start writing your markdown notes here.

    ## Features

    - **Bold** and *italic* text
    - `Code` spans and fenced blocks
    - Lists and more

    Notes autosave two seconds after you stop typing.
"};

const NEW_DOC: &str = "# New Note\n\nStart writing...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Edit,
    Split,
    Preview,
}

impl ViewMode {
    fn next(self) -> Self {
        match self {
            ViewMode::Edit => ViewMode::Split,
            ViewMode::Split => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ViewMode::Edit => "edit",
            ViewMode::Split => "split",
            ViewMode::Preview => "preview",
        }
    }
}

pub struct NotesEditor {
    notes_dir: PathBuf,
    file_name: String,
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    scroll: u16,
    mode: ViewMode,
    dirty: bool,
    last_edit: Option<Instant>,
    torn_down: bool,
}

impl NotesEditor {
    pub fn new(notes_dir: PathBuf) -> Self {
        let path = notes_dir.join(DEFAULT_FILE);
        let text = fs::read_to_string(&path).unwrap_or_else(|_| WELCOME_DOC.to_string());
        let lines = split_lines(&text);
        Self {
            notes_dir,
            file_name: DEFAULT_FILE.to_string(),
            lines,
            cursor_row: 0,
            cursor_col: 0,
            scroll: 0,
            mode: ViewMode::Split,
            dirty: false,
            last_edit: None,
            torn_down: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Per-tick pump: fires the debounced autosave once the deadline passes.
    pub fn frame(&mut self, now: Instant) -> Option<Notice> {
        let due = self
            .last_edit
            .is_some_and(|at| now.duration_since(at) >= AUTOSAVE_DEBOUNCE);
        if self.dirty && due { self.save() } else { None }
    }

    /// Write the buffer to disk. IO failures are logged and absorbed; they
    /// never close the window.
    pub fn save(&mut self) -> Option<Notice> {
        self.last_edit = None;
        if let Err(err) = fs::create_dir_all(&self.notes_dir) {
            tracing::warn!(%err, "failed to create notes directory");
            return None;
        }
        let path = self.notes_dir.join(&self.file_name);
        match fs::write(&path, self.content()) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(file = %self.file_name, "note saved");
                Some(Notice::new(
                    "Note Saved",
                    format!("{} saved successfully", self.file_name),
                ))
            }
            Err(err) => {
                tracing::warn!(%err, file = %self.file_name, "failed to save note");
                None
            }
        }
    }

    /// Start a fresh timestamped note.
    pub fn new_file(&mut self) {
        self.file_name = format!("note-{}.md", Local::now().format("%Y%m%d-%H%M%S"));
        self.lines = split_lines(NEW_DOC);
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll = 0;
        self.mark_edited();
    }

    /// Flush and cancel the autosave deadline. Safe against double calls;
    /// the registry invokes it exactly once on close.
    pub fn teardown(&mut self) -> Option<Notice> {
        if self.torn_down {
            return None;
        }
        self.torn_down = true;
        let notice = if self.dirty { self.save() } else { None };
        self.last_edit = None;
        notice
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn mark_edited(&mut self) {
        self.dirty = true;
        self.last_edit = Some(Instant::now());
    }

    fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.lines.len().saturating_sub(1));
        let len = self.lines[self.cursor_row].chars().count();
        self.cursor_col = self.cursor_col.min(len);
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_row];
        let byte = byte_index(line, self.cursor_col);
        line.insert(byte, c);
        self.cursor_col += 1;
        self.mark_edited();
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let byte = byte_index(line, self.cursor_col);
        let rest = line.split_off(byte);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.mark_edited();
    }

    fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let byte = byte_index(line, self.cursor_col - 1);
            line.remove(byte);
            self.cursor_col -= 1;
            self.mark_edited();
        } else if self.cursor_row > 0 {
            let tail = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&tail);
            self.mark_edited();
        }
    }

    fn paste(&mut self) {
        let text = match clipboard::get() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "clipboard paste failed");
                return;
            }
        };
        for c in text.chars() {
            match c {
                '\n' => self.insert_newline(),
                '\r' => {}
                c => self.insert_char(c),
            }
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Notice> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return self.save(),
            KeyCode::Char('n') if ctrl => self.new_file(),
            KeyCode::Char('e') if ctrl => self.mode = self.mode.next(),
            KeyCode::Char('y') if ctrl => {
                return match clipboard::set(&self.content()) {
                    Ok(()) => Some(Notice::new(
                        "Note Exported",
                        format!("{} copied to clipboard", self.file_name),
                    )),
                    Err(err) => {
                        tracing::warn!(%err, "clipboard export failed");
                        None
                    }
                };
            }
            KeyCode::Char('v') if ctrl => self.paste(),
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = self.lines[self.cursor_row].chars().count();
                }
            }
            KeyCode::Right => {
                let len = self.lines[self.cursor_row].chars().count();
                if self.cursor_col < len {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
                self.clamp_cursor();
            }
            KeyCode::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                }
                self.clamp_cursor();
            }
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = self.lines[self.cursor_row].chars().count(),
            _ => return None,
        }
        None
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        frame.fill(area, Style::default().bg(theme::window_bg()));

        // toolbar: file name, mode, dirty marker
        let marker = if self.dirty { " *" } else { "" };
        let toolbar = Line::from(vec![
            Span::styled(
                format!(" {}{marker} ", self.file_name),
                Style::default().fg(theme::taskbar_fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}]", self.mode.label()),
                Style::default().fg(theme::accent()),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(toolbar).style(Style::default().bg(theme::menu_bg())),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let body = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
        match self.mode {
            ViewMode::Edit => self.render_editor(frame, body, focused),
            ViewMode::Preview => self.render_preview(frame, body),
            ViewMode::Split => {
                let left = Rect::new(body.x, body.y, body.width / 2, body.height);
                let right = Rect::new(
                    body.x + body.width / 2,
                    body.y,
                    body.width - body.width / 2,
                    body.height,
                );
                self.render_editor(frame, left, focused);
                self.render_preview(frame, right);
            }
        }
    }

    fn render_editor(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        // keep the cursor row inside the viewport
        let view = area.height as usize;
        if self.cursor_row < self.scroll as usize {
            self.scroll = self.cursor_row as u16;
        } else if self.cursor_row >= self.scroll as usize + view {
            self.scroll = (self.cursor_row + 1 - view) as u16;
        }

        let mut rendered: Vec<Line> = Vec::with_capacity(view);
        for (idx, line) in self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll as usize)
            .take(view)
        {
            if focused && idx == self.cursor_row {
                rendered.push(cursor_line(line, self.cursor_col));
            } else {
                rendered.push(Line::from(line.clone()));
            }
        }
        frame.render_widget(
            Paragraph::new(rendered).style(Style::default().fg(theme::taskbar_fg())),
            area,
        );
    }

    fn render_preview(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let preview = render_markdown(&self.content());
        frame.render_widget(
            Paragraph::new(preview)
                .style(Style::default().fg(theme::desktop_fg()))
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn cursor_line(line: &str, col: usize) -> Line<'static> {
    let before: String = line.chars().take(col).collect();
    let at: String = line.chars().nth(col).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
    let after: String = line.chars().skip(col + 1).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use std::time::Duration;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn starts_with_welcome_document() {
        let dir = TempDir::new().unwrap();
        let editor = NotesEditor::new(dir.path().to_path_buf());
        assert!(editor.content().contains("# Welcome to Notes"));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn editing_marks_dirty_and_autosave_fires_after_debounce() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        editor.handle_key(&key(KeyCode::Char('x')));
        assert!(editor.is_dirty());

        // before the deadline: nothing
        assert!(editor.frame(Instant::now()).is_none());
        assert!(editor.is_dirty());

        // past the deadline: save fires once
        let later = Instant::now() + AUTOSAVE_DEBOUNCE + Duration::from_millis(1);
        let notice = editor.frame(later);
        assert!(notice.is_some());
        assert!(!editor.is_dirty());
        assert!(dir.path().join(DEFAULT_FILE).exists());
        assert!(editor.frame(later + AUTOSAVE_DEBOUNCE).is_none());
    }

    #[test]
    fn manual_save_round_trips_content() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        editor.handle_key(&ctrl('s'));
        let saved = fs::read_to_string(dir.path().join(DEFAULT_FILE)).unwrap();
        assert_eq!(saved, editor.content());
    }

    #[test]
    fn teardown_flushes_dirty_buffer_exactly_once() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        editor.handle_key(&key(KeyCode::Char('z')));
        assert!(editor.teardown().is_some());
        assert!(editor.is_torn_down());
        // second call is inert
        assert!(editor.teardown().is_none());
        let saved = fs::read_to_string(dir.path().join(DEFAULT_FILE)).unwrap();
        assert!(saved.starts_with('z'));
    }

    #[test]
    fn newline_and_backspace_rejoin_lines() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        editor.new_file();
        let lines_before = editor.content().lines().count();
        editor.handle_key(&key(KeyCode::Enter));
        assert_eq!(editor.content().lines().count(), lines_before + 1);
        editor.handle_key(&key(KeyCode::Backspace));
        assert_eq!(editor.content().lines().count(), lines_before);
    }

    #[test]
    fn new_file_uses_timestamped_name() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        editor.new_file();
        assert!(editor.file_name().starts_with("note-"));
        assert!(editor.file_name().ends_with(".md"));
        assert!(editor.content().starts_with("# New Note"));
    }

    #[test]
    fn view_mode_cycles_through_all_three() {
        let dir = TempDir::new().unwrap();
        let mut editor = NotesEditor::new(dir.path().to_path_buf());
        assert_eq!(editor.mode, ViewMode::Split);
        editor.handle_key(&ctrl('e'));
        assert_eq!(editor.mode, ViewMode::Preview);
        editor.handle_key(&ctrl('e'));
        assert_eq!(editor.mode, ViewMode::Edit);
        editor.handle_key(&ctrl('e'));
        assert_eq!(editor.mode, ViewMode::Split);
    }
}
