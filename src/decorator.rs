//! Window chrome: border, titlebar, control buttons.
//!
//! Layout inside a window rectangle:
//! row 0        top border
//! row 1        titlebar (icon + title, controls right-aligned)
//! rows 2..h-1  content
//! row h-1      bottom border

use ratatui::style::{Modifier, Style};

use crate::geometry::CellRect;
use crate::theme;
use crate::ui::UiFrame;

/// What a pointer-down on the titlebar row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlebarHit {
    /// Grabbable region: start a drag.
    Drag,
    Minimize,
    Maximize,
    Close,
    /// Outside the titlebar row entirely.
    None,
}

/// Control buttons, left to right: minimize, maximize, close, each one cell
/// wide with one cell of padding between them.
const CONTROLS: &str = "─ □ ✕";
const CONTROLS_WIDTH: u16 = 5;

pub trait WindowDecorator: std::fmt::Debug {
    /// Content area inside the chrome.
    fn content_area(&self, geometry: CellRect) -> CellRect;

    /// Classify a pointer position against the titlebar row.
    fn titlebar_hit(&self, geometry: CellRect, column: u16, row: u16) -> TitlebarHit;

    fn render_chrome(
        &self,
        frame: &mut UiFrame<'_>,
        geometry: CellRect,
        title: &str,
        icon: &str,
        focused: bool,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl WindowDecorator for DefaultDecorator {
    fn content_area(&self, geometry: CellRect) -> CellRect {
        CellRect {
            x: geometry.x + 1,
            y: geometry.y + 2,
            width: geometry.width.saturating_sub(2),
            height: geometry.height.saturating_sub(3),
        }
    }

    fn titlebar_hit(&self, geometry: CellRect, column: u16, row: u16) -> TitlebarHit {
        let titlebar_y = geometry.y + 1;
        if row as i32 != titlebar_y {
            return TitlebarHit::None;
        }
        let col = column as i32;
        let left = geometry.x + 1;
        let right = geometry.x + geometry.width as i32 - 1;
        if col < left || col >= right {
            return TitlebarHit::None;
        }
        // controls sit at the right edge of the titlebar; a window too
        // narrow to fit them is all drag region
        let controls_start = right - CONTROLS_WIDTH as i32 - 1;
        if controls_start > left && col >= controls_start && col < right - 1 {
            return match col - controls_start {
                0 => TitlebarHit::Minimize,
                2 => TitlebarHit::Maximize,
                4 => TitlebarHit::Close,
                _ => TitlebarHit::Drag,
            };
        }
        TitlebarHit::Drag
    }

    fn render_chrome(
        &self,
        frame: &mut UiFrame<'_>,
        geometry: CellRect,
        title: &str,
        icon: &str,
        focused: bool,
    ) {
        let rect = geometry.clamped();
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let border_style = Style::default().fg(theme::window_border());
        let header_style = if focused {
            Style::default()
                .bg(theme::titlebar_focused_bg())
                .fg(theme::titlebar_focused_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::titlebar_bg())
                .fg(theme::titlebar_fg())
        };

        let left = geometry.x;
        let top = geometry.y;
        let right = left + geometry.width as i32 - 1;
        let bottom = top + geometry.height as i32 - 1;

        let buffer_area = frame.area();
        let on_screen = |x: i32, y: i32| -> Option<(u16, u16)> {
            if x < buffer_area.x as i32
                || y < buffer_area.y as i32
                || x >= (buffer_area.x + buffer_area.width) as i32
                || y >= (buffer_area.y + buffer_area.height) as i32
            {
                None
            } else {
                Some((x as u16, y as u16))
            }
        };

        // borders
        for x in left..=right {
            for (y, sym_mid, sym_l, sym_r) in [(top, "─", "┌", "┐"), (bottom, "─", "└", "┘")] {
                if let Some((cx, cy)) = on_screen(x, y)
                    && let Some(cell) = frame.buffer_mut().cell_mut((cx, cy))
                {
                    let sym = if x == left {
                        sym_l
                    } else if x == right {
                        sym_r
                    } else {
                        sym_mid
                    };
                    cell.set_symbol(sym);
                    cell.set_style(border_style);
                }
            }
        }
        for y in (top + 1)..bottom {
            for x in [left, right] {
                if let Some((cx, cy)) = on_screen(x, y)
                    && let Some(cell) = frame.buffer_mut().cell_mut((cx, cy))
                {
                    cell.set_symbol("│");
                    cell.set_style(border_style);
                }
            }
        }

        // titlebar row
        let titlebar_y = top + 1;
        for x in (left + 1)..right {
            if let Some((cx, cy)) = on_screen(x, titlebar_y)
                && let Some(cell) = frame.buffer_mut().cell_mut((cx, cy))
            {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }
        let controls_start = right - CONTROLS_WIDTH as i32 - 1;
        let label_width = (controls_start - (left + 2) - 1).max(0) as usize;
        let label: String = format!("{icon} {title}")
            .chars()
            .take(label_width)
            .collect();
        if let Some((cx, cy)) = on_screen(left + 2, titlebar_y) {
            frame.set_string(cx, cy, &label, header_style);
        }
        if controls_start > left
            && let Some((cx, cy)) = on_screen(controls_start, titlebar_y)
        {
            frame.set_string(cx, cy, CONTROLS, header_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> CellRect {
        CellRect::new(10, 5, 30, 12)
    }

    #[test]
    fn content_area_sits_inside_chrome() {
        let d = DefaultDecorator;
        let inner = d.content_area(geometry());
        assert_eq!(inner, CellRect::new(11, 7, 28, 9));
    }

    #[test]
    fn titlebar_hits_classify_buttons_and_drag_region() {
        let d = DefaultDecorator;
        let g = geometry();
        let titlebar_row = (g.y + 1) as u16;
        // somewhere in the middle of the bar
        assert_eq!(d.titlebar_hit(g, 15, titlebar_row), TitlebarHit::Drag);
        // controls: right edge is x + width - 1 = 39
        let controls_start = (g.x + g.width as i32 - 1 - CONTROLS_WIDTH as i32 - 1) as u16;
        assert_eq!(
            d.titlebar_hit(g, controls_start, titlebar_row),
            TitlebarHit::Minimize
        );
        assert_eq!(
            d.titlebar_hit(g, controls_start + 2, titlebar_row),
            TitlebarHit::Maximize
        );
        assert_eq!(
            d.titlebar_hit(g, controls_start + 4, titlebar_row),
            TitlebarHit::Close
        );
        // body row is not a titlebar hit
        assert_eq!(d.titlebar_hit(g, 15, titlebar_row + 3), TitlebarHit::None);
    }
}
