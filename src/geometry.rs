use ratatui::prelude::Rect;

/// Signed window rectangle: origin may go negative while a window is dragged
/// partially past the top/left edge, size stays unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Clamp to unsigned screen space, shrinking the visible size by however
    /// much of the rectangle sits left of / above the origin.
    pub fn clamped(&self) -> Rect {
        let clip_x = (-self.x).max(0) as u16;
        let clip_y = (-self.y).max(0) as u16;
        Rect {
            x: self.x.max(0) as u16,
            y: self.y.max(0) as u16,
            width: self.width.saturating_sub(clip_x),
            height: self.height.saturating_sub(clip_y),
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let col = column as i32;
        let row = row as i32;
        col >= self.x
            && col < self.x + self.width as i32
            && row >= self.y
            && row < self.y + self.height as i32
    }

    /// Inner rectangle after removing `margin` cells from every edge.
    pub fn inset(&self, margin: u16) -> CellRect {
        CellRect {
            x: self.x + margin as i32,
            y: self.y + margin as i32,
            width: self.width.saturating_sub(margin.saturating_mul(2)),
            height: self.height.saturating_sub(margin.saturating_mul(2)),
        }
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_trims_negative_origin() {
        let r = CellRect::new(-3, -1, 10, 6);
        let c = r.clamped();
        assert_eq!((c.x, c.y), (0, 0));
        assert_eq!((c.width, c.height), (7, 5));
    }

    #[test]
    fn contains_uses_signed_origin() {
        let r = CellRect::new(-2, 0, 5, 3);
        assert!(r.contains(0, 0));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 0));
        assert!(!r.contains(0, 3));
    }

    #[test]
    fn inset_shrinks_all_edges() {
        let r = CellRect::new(4, 2, 10, 8).inset(1);
        assert_eq!(r, CellRect::new(5, 3, 8, 6));
    }
}
