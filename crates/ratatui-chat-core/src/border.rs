//! Bubble borders with per-corner ornaments.
//!
//! A bordered bubble reserves one cell on every side. Corners can be square, rounded, or a
//! "tail" pointing at the sender.
use crate::geometry::Insets;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Corner {
    Square,
    #[default]
    Rounded,
    BubbleTail,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CornerOrnaments {
    pub top_left: Corner,
    pub top_right: Corner,
    pub bottom_left: Corner,
    pub bottom_right: Corner,
}

impl CornerOrnaments {
    pub const fn uniform(corner: Corner) -> Self {
        Self {
            top_left: corner,
            top_right: corner,
            bottom_left: corner,
            bottom_right: corner,
        }
    }

    pub const fn rounded() -> Self {
        Self::uniform(Corner::Rounded)
    }

    pub const fn with_bottom_left(mut self, corner: Corner) -> Self {
        self.bottom_left = corner;
        self
    }

    pub const fn with_bottom_right(mut self, corner: Corner) -> Self {
        self.bottom_right = corner;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderKind {
    None,
    Rect,
    Ornamented(CornerOrnaments),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Border {
    pub kind: BorderKind,
    /// Applied to the whole bubble, including the edge cells.
    pub fill: Style,
    /// Style of the line glyphs. Without a stroke the edges are drawn as blank fill.
    pub stroke: Option<Style>,
}

impl Default for Border {
    fn default() -> Self {
        Self::new(BorderKind::Ornamented(CornerOrnaments::rounded()))
    }
}

impl Border {
    pub fn new(kind: BorderKind) -> Self {
        Self {
            kind,
            fill: Style::default(),
            stroke: Some(Style::default()),
        }
    }

    pub fn none() -> Self {
        Self::new(BorderKind::None)
    }

    pub fn with_fill(mut self, fill: Style) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Option<Style>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn insets(&self) -> Insets {
        match self.kind {
            BorderKind::None => Insets::ZERO,
            BorderKind::Rect | BorderKind::Ornamented(_) => Insets::uniform(1),
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.fill);

        let corners = match self.kind {
            BorderKind::None => return,
            BorderKind::Rect => CornerOrnaments::uniform(Corner::Square),
            BorderKind::Ornamented(corners) => corners,
        };

        let left = area.x;
        let top = area.y;
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        let line_style = self.fill.patch(self.stroke.unwrap_or_default());
        let (horizontal, vertical) = if self.stroke.is_some() {
            ("─", "│")
        } else {
            (" ", " ")
        };
        for x in left..=right {
            set_symbol(buf, x, top, horizontal, line_style);
            set_symbol(buf, x, bottom, horizontal, line_style);
        }
        for y in top..=bottom {
            set_symbol(buf, left, y, vertical, line_style);
            set_symbol(buf, right, y, vertical, line_style);
        }

        let positions = [
            (left, top, corners.top_left, CornerPosition::TopLeft),
            (right, top, corners.top_right, CornerPosition::TopRight),
            (left, bottom, corners.bottom_left, CornerPosition::BottomLeft),
            (right, bottom, corners.bottom_right, CornerPosition::BottomRight),
        ];
        for (x, y, corner, position) in positions {
            let (symbol, style) = self.corner_glyph(corner, position, line_style);
            set_symbol(buf, x, y, symbol, style);
        }
    }

    fn corner_glyph(
        &self,
        corner: Corner,
        position: CornerPosition,
        line_style: Style,
    ) -> (&'static str, Style) {
        use CornerPosition::*;

        if corner == Corner::BubbleTail {
            let symbol = match position {
                TopLeft => "◤",
                TopRight => "◥",
                BottomLeft => "◣",
                BottomRight => "◢",
            };
            // Without a stroke the tail takes the bubble colour so it reads as part of it.
            let style = match (self.stroke, self.fill.bg) {
                (None, Some(bg)) => Style::default().fg(bg).bg(Color::Reset),
                _ => line_style,
            };
            return (symbol, style);
        }

        if self.stroke.is_none() {
            return (" ", line_style);
        }

        let symbol = match (corner, position) {
            (Corner::Square, TopLeft) => "┌",
            (Corner::Square, TopRight) => "┐",
            (Corner::Square, BottomLeft) => "└",
            (Corner::Square, BottomRight) => "┘",
            (_, TopLeft) => "╭",
            (_, TopRight) => "╮",
            (_, BottomLeft) => "╰",
            (_, BottomRight) => "╯",
        };
        (symbol, line_style)
    }
}

#[derive(Clone, Copy, Debug)]
enum CornerPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

fn set_symbol(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn rect_border_uses_square_corners() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 3));
        Border::new(BorderKind::Rect).render(buf.area, &mut buf);
        assert_eq!(row(&buf, 0), "┌──┐");
        assert_eq!(row(&buf, 1), "│  │");
        assert_eq!(row(&buf, 2), "└──┘");
    }

    #[test]
    fn tail_replaces_its_corner() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 3));
        let corners = CornerOrnaments::rounded().with_bottom_right(Corner::BubbleTail);
        Border::new(BorderKind::Ornamented(corners)).render(buf.area, &mut buf);
        assert_eq!(row(&buf, 0), "╭──╮");
        assert_eq!(row(&buf, 2), "╰──◢");
    }

    #[test]
    fn no_border_reserves_no_space() {
        assert_eq!(Border::none().insets(), Insets::ZERO);
        assert_eq!(Border::default().insets(), Insets::uniform(1));
    }

    #[test]
    fn strokeless_border_is_blank_fill() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 3));
        let corners = CornerOrnaments::rounded().with_bottom_left(Corner::BubbleTail);
        Border::new(BorderKind::Ornamented(corners))
            .with_fill(Style::default().bg(Color::Blue))
            .with_stroke(None)
            .render(buf.area, &mut buf);
        assert_eq!(row(&buf, 0), "   ");
        assert_eq!(row(&buf, 2), "◣  ");
        assert_eq!(buf.cell((0, 2)).map(|c| c.fg), Some(Color::Blue));
    }
}
