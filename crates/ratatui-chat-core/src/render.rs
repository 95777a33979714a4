use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Draws a one-column scrollbar for `state` into `area`.
///
/// The thumb is at least one row tall and reaches the bottom of the track only when the view is
/// scrolled to the end. Content that fits leaves the track blank.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    buf.set_style(area, style);

    let track = area.height as u64;
    let content = state.content_h as u64;
    let view = state.viewport_h as u64;
    let thumb = if content <= view {
        None
    } else {
        let len = (view * track).div_ceil(content).clamp(1, track);
        let travel = track - len;
        let max_y = state.max_y().max(1) as u64;
        let top = (state.y as u64 * travel + max_y / 2) / max_y;
        Some((top.min(travel) as u16, len as u16))
    };

    for dy in 0..area.height {
        let on_thumb = thumb.is_some_and(|(top, len)| dy >= top && dy < top + len);
        let symbol = if on_thumb { "█" } else { " " };
        if let Some(cell) = buf.cell_mut((area.x, area.y + dy)) {
            cell.set_symbol(symbol);
        }
    }
}

/// Writes `input` at `(x, y)`, stopping before `max_cols` display columns are exceeded.
///
/// Wide characters occupy two cells; one that would straddle the limit is dropped.
/// Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let mut dx = 0u16;
    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if dx + w > max_cols {
            break;
        }
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_symbol(ch.encode_utf8(&mut [0; 4]));
            cell.set_style(style);
        }
        if w == 2
            && let Some(cell) = buf.cell_mut((x + dx + 1, y))
        {
            cell.set_symbol("");
            cell.set_style(style);
        }
        dx += w;
    }
    dx
}
