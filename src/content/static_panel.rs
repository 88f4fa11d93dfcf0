use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::apps::AppId;
use crate::theme;
use crate::ui::UiFrame;

/// Inert window body: a heading plus a few lines of copy. Also serves as the
/// fallback body when a richer provider is unavailable.
#[derive(Debug)]
pub struct StaticPanel {
    heading: String,
    body: String,
}

impl StaticPanel {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }

    pub fn for_app(app: AppId) -> Self {
        let body = match app {
            AppId::Files => indoc! {"
                Your files and folders will appear here.

                Nothing is indexed yet.
            "},
            AppId::Music => indoc! {"
                Play your favorite tunes.

                The library is empty; drop audio files into your music
                directory to get started.
            "},
            AppId::Photos => indoc! {"
                Browse your photo library.

                No albums found.
            "},
            AppId::Games => indoc! {"
                Fun and games coming soon!
            "},
            AppId::Settings => indoc! {"
                Configure the desktop shell.

                Colors, poll interval and the notes directory are set from
                the command line for now; run with --help for the list.
            "},
            other => {
                return Self::new(other.title(), "App content");
            }
        };
        Self::new(format!("{} {}", app.icon(), app.title()), body)
    }

    /// Substitute body used when the overlay compositor is not attached;
    /// decided once at content creation, never retried per frame.
    pub fn bridge_fallback(app: AppId) -> Self {
        Self::new(
            format!("{} {}", app.icon(), app.title()),
            indoc! {"
                This app renders through an external overlay compositor,
                and none is attached to this session.

                Start the shell with an overlay-capable host to use it.
            "},
        )
    }

    /// Fallback body shown when a content provider failed to produce its
    /// real payload. The window stays open and functional.
    pub fn provider_failure(app: AppId, detail: &str) -> Self {
        Self::new(
            format!("{} {}", app.icon(), app.title()),
            format!("Content failed to load.\n\n{detail}"),
        )
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut lines = vec![
            Line::from(Span::styled(
                self.heading.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        lines.extend(self.body.lines().map(|l| Line::from(l.to_string())));
        let panel = Paragraph::new(Text::from(lines))
            .style(Style::default().fg(theme::taskbar_fg()).bg(theme::window_bg()))
            .wrap(Wrap { trim: false });
        frame.fill(area, Style::default().bg(theme::window_bg()));
        frame.render_widget(panel, area.inner(ratatui::layout::Margin::new(1, 0)));
    }
}
