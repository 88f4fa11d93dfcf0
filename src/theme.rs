use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so a future palette swap
// stays a one-file change.

pub fn desktop_bg() -> Color {
    Color::Rgb(18, 26, 42)
}

pub fn desktop_fg() -> Color {
    Color::Rgb(140, 160, 190)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn taskbar_active_bg() -> Color {
    Color::Gray
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}

// Start menu
pub fn menu_bg() -> Color {
    Color::Rgb(28, 36, 54)
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Blue
}
pub fn menu_selected_fg() -> Color {
    Color::White
}

// Window chrome
pub fn titlebar_focused_bg() -> Color {
    Color::Blue
}
pub fn titlebar_focused_fg() -> Color {
    Color::White
}
pub fn titlebar_bg() -> Color {
    Color::DarkGray
}
pub fn titlebar_fg() -> Color {
    Color::Gray
}
pub fn window_border() -> Color {
    Color::DarkGray
}
pub fn window_bg() -> Color {
    Color::Rgb(24, 30, 44)
}

// Notifications
pub fn toast_bg() -> Color {
    Color::Rgb(36, 48, 70)
}
pub fn toast_fg() -> Color {
    Color::White
}

// Accent used for highlights (progress bars, links, save indicator).
pub fn accent() -> Color {
    Color::Rgb(90, 170, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_returns_concrete_variants() {
        for color in [desktop_bg(), menu_bg(), window_bg(), toast_bg(), accent()] {
            match color {
                Color::Rgb(_, _, _) | Color::Indexed(_) => {}
                other => panic!("unexpected color variant: {other:?}"),
            }
        }
    }
}
