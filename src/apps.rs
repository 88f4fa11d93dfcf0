use std::fmt;

/// Every application the shell knows how to open. One window per id at most
/// (singleton policy, enforced by the registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AppId {
    Files,
    Music,
    Photos,
    Browser,
    Chat,
    Notes,
    Games,
    Settings,
    Courses,
}

/// How an app's window body is materialized. Closed set; every consumer
/// matches exhaustively so adding a kind is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Inert panel markup, no resource handle.
    Static,
    /// Address-bar-driven page frame; navigation state lives inside it.
    EmbeddedFrame,
    /// Markdown editor owning a buffer plus an autosave deadline.
    RichEditor,
    /// Externally composited overlay that must be told where to draw.
    BridgeView,
    /// Body rendered entirely by a collaborator subsystem.
    Delegated,
}

impl AppId {
    pub const ALL: [AppId; 9] = [
        AppId::Files,
        AppId::Music,
        AppId::Photos,
        AppId::Browser,
        AppId::Chat,
        AppId::Notes,
        AppId::Games,
        AppId::Settings,
        AppId::Courses,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AppId::Files => "Files",
            AppId::Music => "Music",
            AppId::Photos => "Photos",
            AppId::Browser => "Browser",
            AppId::Chat => "Chat",
            AppId::Notes => "Notes",
            AppId::Games => "Games",
            AppId::Settings => "Settings",
            AppId::Courses => "Courses",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AppId::Files => "▤",
            AppId::Music => "♪",
            AppId::Photos => "▦",
            AppId::Browser => "◎",
            AppId::Chat => "✉",
            AppId::Notes => "✎",
            AppId::Games => "▶",
            AppId::Settings => "✦",
            AppId::Courses => "✜",
        }
    }

    pub fn content_kind(self) -> ContentKind {
        match self {
            AppId::Files | AppId::Music | AppId::Photos | AppId::Games | AppId::Settings => {
                ContentKind::Static
            }
            AppId::Browser => ContentKind::EmbeddedFrame,
            AppId::Chat => ContentKind::BridgeView,
            AppId::Notes => ContentKind::RichEditor,
            AppId::Courses => ContentKind::Delegated,
        }
    }

    /// Case-insensitive lookup by display name, used by the CLI `--open`
    /// flag and anything else that addresses apps by string.
    pub fn from_name(name: &str) -> Option<AppId> {
        let needle = name.trim();
        AppId::ALL
            .into_iter()
            .find(|app| app.title().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
