//! Course platform collaborator.
//!
//! Self-contained subsystem the shell delegates the Courses window to. The
//! registry tracks that window like any other (taskbar entry, close, focus,
//! stacking) but never materializes its body; rendering and input go
//! straight to this platform.

use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use serde::Deserialize;
use thiserror::Error;

use crate::theme;
use crate::ui::UiFrame;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/courses.json");

#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub instructor: String,
    pub level: String,
    pub modules: Vec<Module>,
}

#[derive(Debug, Deserialize)]
pub struct Module {
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub duration: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Course list with a selected row.
    List { selected: usize },
    /// Drill-down into one course; selection runs over its flattened topics.
    Course { course: usize, selected: usize },
}

pub struct CoursePlatform {
    catalog: Result<Catalog, CatalogError>,
    completed: BTreeSet<String>,
    view: View,
}

impl CoursePlatform {
    pub fn new() -> Self {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a catalog; failures are kept and surfaced as an in-window
    /// fallback instead of propagating. The window still opens.
    pub fn from_json(raw: &str) -> Self {
        let catalog = serde_json::from_str::<Catalog>(raw).map_err(CatalogError::from);
        if let Err(err) = &catalog {
            tracing::warn!(%err, "course catalog failed to load");
        }
        Self {
            catalog,
            completed: BTreeSet::new(),
            view: View::List { selected: 0 },
        }
    }

    pub fn catalog_ok(&self) -> bool {
        self.catalog.is_ok()
    }

    pub fn is_completed(&self, topic_id: &str) -> bool {
        self.completed.contains(topic_id)
    }

    pub fn toggle_completed(&mut self, topic_id: &str) {
        if !self.completed.remove(topic_id) {
            self.completed.insert(topic_id.to_string());
        }
    }

    /// (completed, total) topics for one course.
    pub fn progress(&self, course: &Course) -> (usize, usize) {
        let mut done = 0;
        let mut total = 0;
        for module in &course.modules {
            for topic in &module.topics {
                total += 1;
                if self.completed.contains(&topic.id) {
                    done += 1;
                }
            }
        }
        (done, total)
    }

    /// Reset transient view state when the hosting window goes away; course
    /// progress survives until the shell exits.
    pub fn window_closed(&mut self) {
        self.view = View::List { selected: 0 };
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Ok(catalog) = &self.catalog else {
            return false;
        };
        match self.view {
            View::List { selected } => match key.code {
                KeyCode::Up => {
                    self.view = View::List {
                        selected: selected.saturating_sub(1),
                    };
                    true
                }
                KeyCode::Down => {
                    let last = catalog.courses.len().saturating_sub(1);
                    self.view = View::List {
                        selected: (selected + 1).min(last),
                    };
                    true
                }
                KeyCode::Enter | KeyCode::Right => {
                    if !catalog.courses.is_empty() {
                        self.view = View::Course {
                            course: selected,
                            selected: 0,
                        };
                    }
                    true
                }
                _ => false,
            },
            View::Course { course, selected } => match key.code {
                KeyCode::Up => {
                    self.view = View::Course {
                        course,
                        selected: selected.saturating_sub(1),
                    };
                    true
                }
                KeyCode::Down => {
                    let count = catalog
                        .courses
                        .get(course)
                        .map(|c| c.modules.iter().map(|m| m.topics.len()).sum::<usize>())
                        .unwrap_or(0);
                    self.view = View::Course {
                        course,
                        selected: (selected + 1).min(count.saturating_sub(1)),
                    };
                    true
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let topic_id = catalog.courses.get(course).and_then(|c| {
                        c.modules
                            .iter()
                            .flat_map(|m| m.topics.iter())
                            .nth(selected)
                            .map(|t| t.id.clone())
                    });
                    if let Some(id) = topic_id {
                        self.toggle_completed(&id);
                    }
                    true
                }
                KeyCode::Left | KeyCode::Backspace => {
                    self.view = View::List { selected: course };
                    true
                }
                _ => false,
            },
        }
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        frame.fill(area, Style::default().bg(theme::window_bg()));
        let catalog = match &self.catalog {
            Ok(catalog) => catalog,
            Err(err) => {
                let fallback = Text::from(vec![
                    Line::from(Span::styled(
                        "Courses unavailable",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from("The course catalog failed to load."),
                    Line::from(err.to_string()),
                ]);
                frame.render_widget(
                    Paragraph::new(fallback).style(Style::default().fg(theme::taskbar_fg())),
                    area.inner(ratatui::layout::Margin::new(1, 0)),
                );
                return;
            }
        };

        let text = match self.view {
            View::List { selected } => self.render_list(catalog, selected, focused),
            View::Course { course, selected } => {
                self.render_course(catalog, course, selected, focused)
            }
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(theme::taskbar_fg())),
            area.inner(ratatui::layout::Margin::new(1, 0)),
        );
    }

    fn render_list(&self, catalog: &Catalog, selected: usize, focused: bool) -> Text<'static> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Courses",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        for (idx, course) in catalog.courses.iter().enumerate() {
            let (done, total) = self.progress(course);
            let label = format!(
                "{} — {} · {} · {done}/{total}",
                course.name, course.instructor, course.level
            );
            lines.push(selectable_line(label, focused && idx == selected));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter opens a course",
            Style::default().fg(theme::desktop_fg()),
        )));
        Text::from(lines)
    }

    fn render_course(
        &self,
        catalog: &Catalog,
        course_idx: usize,
        selected: usize,
        focused: bool,
    ) -> Text<'static> {
        let Some(course) = catalog.courses.get(course_idx) else {
            return Text::from("course missing");
        };
        let (done, total) = self.progress(course);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} · {done}/{total} complete", course.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        let mut row = 0usize;
        for module in &course.modules {
            lines.push(Line::from(Span::styled(
                module.title.clone(),
                Style::default().fg(theme::accent()),
            )));
            for topic in &module.topics {
                let mark = if self.is_completed(&topic.id) { "✔" } else { "·" };
                let label = format!("  {mark} {} ({})", topic.title, topic.duration);
                lines.push(selectable_line(label, focused && row == selected));
                row += 1;
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter toggles completion · Backspace goes back",
            Style::default().fg(theme::desktop_fg()),
        )));
        Text::from(lines)
    }
}

impl Default for CoursePlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn selectable_line(label: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            label,
            Style::default()
                .bg(theme::menu_selected_bg())
                .fg(theme::menu_selected_fg()),
        ))
    } else {
        Line::from(label)
    }
}
