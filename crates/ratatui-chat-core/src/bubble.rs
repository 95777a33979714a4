//! Drawing laid-out items.
//!
//! Frames come from the layout engine in content coordinates. [`render_item_clipped`] maps a
//! frame onto the screen for a given scroll offset and draws only the rows that are visible.
use crate::border::Border;
use crate::border::BorderKind;
use crate::geometry::Insets;
use crate::geometry::LayoutRect;
use crate::item::Alignment;
use crate::item::ChatItem;
use crate::item::PlaceholderItem;
use crate::item::TextItem;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Draws the whole item into `area`.
pub fn render_item(item: &ChatItem, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    match item {
        ChatItem::Placeholder(p) => render_placeholder(p, area, buf, theme),
        ChatItem::Text(t) => render_text(t, area, buf, theme),
    }
}

/// Draws the part of `item` that is visible when the content is scrolled to `scroll_y` and
/// shown in `dest`.
///
/// Items cut by the top or bottom edge are rendered off-screen at full size first, so borders
/// and bottom-aligned avatars land where they would on an unclipped draw.
pub fn render_item_clipped(
    item: &ChatItem,
    frame: LayoutRect,
    scroll_y: u32,
    dest: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    if frame.is_empty() || dest.is_empty() {
        return;
    }
    let view_bottom = scroll_y.saturating_add(dest.height as u32);
    let top = frame.y.max(scroll_y);
    let bottom = frame.max_y().min(view_bottom);
    if top >= bottom {
        return;
    }

    let skip = top - frame.y;
    let rows = (bottom - top) as u16;
    let screen_y = dest.y + (top - scroll_y) as u16;
    let screen_x = dest.x.saturating_add(frame.x);
    let cols = frame.width.min(dest.right().saturating_sub(screen_x));
    if cols == 0 {
        return;
    }

    let frame_h = frame.height.min(u16::MAX as u32) as u16;
    if skip == 0 && rows == frame_h && cols == frame.width {
        render_item(item, Rect::new(screen_x, screen_y, cols, rows), buf, theme);
        return;
    }

    let mut scratch = Buffer::empty(Rect::new(0, 0, frame.width, frame_h));
    render_item(item, scratch.area, &mut scratch, theme);
    let skip = skip.min(u16::MAX as u32) as u16;
    for dy in 0..rows {
        for dx in 0..cols {
            let Some(src) = scratch.cell((dx, skip.saturating_add(dy))) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((screen_x + dx, screen_y + dy)) {
                *dst = src.clone();
            }
        }
    }
}

fn render_placeholder(item: &PlaceholderItem, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let style = theme.placeholder_item;
    if area.width >= 3 && area.height >= 3 {
        Border::new(BorderKind::Rect)
            .with_stroke(Some(style))
            .render(area, buf);
    } else {
        buf.set_style(area, style);
    }

    let title_w = (UnicodeWidthStr::width(item.title.as_str()).min(u16::MAX as usize)) as u16;
    let x = area.x + area.width.saturating_sub(title_w) / 2;
    let y = area.y + area.height.saturating_sub(1) / 2;
    render::render_str_clipped(x, y, area.right() - x, buf, &item.title, style);
}

fn render_text(item: &TextItem, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let style = &item.style;
    let mut bubble = area;

    if let Some(avatar) = &style.avatar {
        let column = avatar.width.saturating_add(style.avatar_spacing).min(area.width);
        bubble.width = area.width - column;
        let avatar_w = avatar.width.min(column);
        let avatar_x = match style.alignment {
            Alignment::End => area.right() - avatar_w,
            Alignment::Start | Alignment::Center => area.x,
        };
        if style.alignment != Alignment::End {
            bubble.x = area.x + column;
        }
        let avatar_h = avatar.height.min(area.height as u32) as u16;
        let avatar_rect = Rect::new(avatar_x, area.bottom() - avatar_h, avatar_w, avatar_h);
        buf.set_style(avatar_rect, avatar.style);
        if avatar_h > 0 {
            render::render_str_clipped(
                avatar_rect.x,
                avatar_rect.y,
                avatar_rect.width,
                buf,
                &avatar.symbol,
                avatar.style,
            );
        }
    }

    if bubble.is_empty() {
        return;
    }
    style.border.render(bubble, buf);

    let inner = shrink(bubble, style.chrome());
    if inner.is_empty() {
        return;
    }
    let text_style = style.border.fill.patch(theme.text_primary).patch(style.text_style);
    for (row, line) in item.lines(inner.width).iter().enumerate() {
        if row >= inner.height as usize {
            break;
        }
        render::render_str_clipped(
            inner.x,
            inner.y + row as u16,
            inner.width,
            buf,
            line,
            text_style,
        );
    }
}

fn shrink(area: Rect, insets: Insets) -> Rect {
    let width = area.width.saturating_sub(insets.horizontal());
    let height = area.height.saturating_sub(insets.vertical());
    Rect::new(
        area.x.saturating_add(insets.left),
        area.y.saturating_add(insets.top),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Avatar;
    use crate::item::TextItemStyle;
    use pretty_assertions::assert_eq;
    use ratatui::style::Style;
    use std::sync::Arc;

    fn rows(buf: &Buffer) -> Vec<String> {
        (buf.area.y..buf.area.bottom())
            .map(|y| {
                (buf.area.x..buf.area.right())
                    .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect()
            })
            .collect()
    }

    fn text(text: &str) -> ChatItem {
        ChatItem::Text(TextItem::new(
            "me",
            text,
            Arc::new(TextItemStyle::default()),
        ))
    }

    #[test]
    fn text_bubble_draws_border_and_text() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 9, 3));
        render_item(&text("hello"), buf.area, &mut buf, &Theme::default());
        assert_eq!(
            rows(&buf),
            vec![
                "╭───────╮".to_string(),
                "│ hello │".to_string(),
                "╰───────╯".to_string(),
            ]
        );
    }

    #[test]
    fn avatar_sits_at_the_bottom_on_the_sender_side() {
        let style = TextItemStyle {
            alignment: Alignment::Start,
            border: Border::none(),
            text_insets: Insets::ZERO,
            avatar: Some(Avatar::new("AB", Style::default())),
            ..TextItemStyle::default()
        };
        let item = ChatItem::Text(TextItem::new("them", "hi\nyo", Arc::new(style)));
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 2));
        render_item(&item, buf.area, &mut buf, &Theme::default());
        assert_eq!(rows(&buf), vec!["   hi".to_string(), "AB yo".to_string()]);
    }

    #[test]
    fn placeholder_centres_its_title() {
        let item = ChatItem::Placeholder(PlaceholderItem::new(Alignment::End).with_title("x"));
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 3));
        render_item(&item, buf.area, &mut buf, &Theme::default());
        assert_eq!(
            rows(&buf),
            vec!["┌───┐".to_string(), "│ x │".to_string(), "└───┘".to_string()]
        );
    }

    #[test]
    fn clipped_render_shows_only_visible_rows() {
        let item = text("hello");
        let frame = LayoutRect::new(1, 10, 9, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        render_item_clipped(&item, frame, 11, buf.area, &mut buf, &Theme::default());
        assert_eq!(
            rows(&buf),
            vec![" │ hello │".to_string(), " ╰───────╯".to_string()]
        );
    }

    #[test]
    fn frames_outside_the_viewport_draw_nothing() {
        let item = text("hello");
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        render_item_clipped(
            &item,
            LayoutRect::new(0, 5, 9, 3),
            0,
            buf.area,
            &mut buf,
            &Theme::default(),
        );
        assert_eq!(rows(&buf), vec![" ".repeat(10), " ".repeat(10)]);
    }
}
