//! Message composer that grows with its content.
//!
//! The bar is a separator row, optional accessory labels, and the wrapped draft text. Editing is
//! append-only: the cursor always sits at the end of the draft.
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::theme::Theme;
use crate::wrapping;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitRule {
    Never,
    #[default]
    EnterSubmitsShiftNewline,
    ShiftEnterSubmitsEnterNewline,
}

#[derive(Clone, Debug)]
pub struct InputBarOptions {
    /// Rows the draft area keeps even when the draft is shorter.
    pub min_rows: u16,
    /// Rows after which the draft area stops growing and shows its tail.
    pub max_rows: u16,
    pub placeholder: String,
    pub submit_rule: SubmitRule,
    pub show_separator: bool,
}

impl Default for InputBarOptions {
    fn default() -> Self {
        Self {
            min_rows: 1,
            max_rows: 5,
            placeholder: "Message".to_string(),
            submit_rule: SubmitRule::default(),
            show_separator: true,
        }
    }
}

/// A short label shown around the draft, e.g. a prompt glyph or a character count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessory {
    pub text: String,
    pub style: Style,
}

impl Accessory {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn width(&self) -> u16 {
        UnicodeWidthStr::width(self.text.as_str()).min(u16::MAX as usize) as u16
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputBarAction {
    None,
    Changed,
    /// The draft changed and the bar now wants this many rows.
    HeightChanged(u16),
    Submitted(String),
}

#[derive(Clone, Debug, Default)]
pub struct InputBar {
    text: String,
    options: InputBarOptions,
    top: Option<Accessory>,
    left: Option<Accessory>,
    right: Option<Accessory>,
    last_width: Option<u16>,
    last_height: Option<u16>,
}

impl InputBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InputBarOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &InputBarOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = normalize_newlines(&text.into());
    }

    /// Empties the draft and returns what it held.
    pub fn clear(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.options.placeholder = placeholder.into();
    }

    pub fn set_top_accessory(&mut self, accessory: Option<Accessory>) {
        self.top = accessory;
    }

    pub fn set_left_accessory(&mut self, accessory: Option<Accessory>) {
        self.left = accessory;
    }

    pub fn set_right_accessory(&mut self, accessory: Option<Accessory>) {
        self.right = accessory;
    }

    /// Rows the bar needs at `width`: separator, top accessory, and the draft clamped to
    /// `min_rows..=max_rows`.
    pub fn desired_height(&self, width: u16) -> u16 {
        let separator = u16::from(self.options.show_separator);
        let top = self.top_rows(width);
        let min = self.options.min_rows.max(1);
        let max = self.options.max_rows.max(min);
        let draft = (self.draft_lines(width).len().min(u16::MAX as usize) as u16).clamp(min, max);
        separator.saturating_add(top).saturating_add(draft)
    }

    pub fn input(&mut self, event: InputEvent) -> InputBarAction {
        let changed = match event {
            InputEvent::Paste(s) => {
                self.text.push_str(&normalize_newlines(&s));
                !s.is_empty()
            }
            InputEvent::Key(key) => match self.handle_key(&key) {
                KeyOutcome::Changed => true,
                KeyOutcome::Unchanged => false,
                KeyOutcome::Submit => return self.submit(),
            },
            InputEvent::Mouse(_) => false,
        };
        if !changed {
            return InputBarAction::None;
        }
        match self.height_change() {
            Some(h) => InputBarAction::HeightChanged(h),
            None => InputBarAction::Changed,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.last_width = Some(area.width);
        self.last_height = Some(self.desired_height(area.width));
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        buf.set_style(area, theme.input_bar);

        let mut y = area.y;
        if self.options.show_separator {
            let line = "─".repeat(area.width as usize);
            render::render_str_clipped(area.x, y, area.width, buf, &line, theme.text_muted);
            y += 1;
        }
        if let Some(top) = &self.top {
            for line in wrapping::wrap_text(&top.text, area.width) {
                if y >= area.bottom() {
                    return;
                }
                render::render_str_clipped(area.x, y, area.width, buf, &line, top.style);
                y += 1;
            }
        }
        if y >= area.bottom() {
            return;
        }

        let draft = self.draft_area(Rect::new(area.x, y, area.width, area.bottom() - y));
        if let Some(left) = &self.left {
            render::render_str_clipped(area.x, draft.y, left.width(), buf, &left.text, left.style);
        }
        if let Some(right) = &self.right {
            let x = draft.right().saturating_add(1);
            render::render_str_clipped(x, draft.y, area.right() - x, buf, &right.text, right.style);
        }
        if draft.is_empty() {
            return;
        }

        if self.text.is_empty() {
            let placeholder = self.options.placeholder.as_str();
            render::render_str_clipped(
                draft.x,
                draft.y,
                draft.width,
                buf,
                placeholder,
                theme.input_placeholder,
            );
            return;
        }

        let lines = self.draft_lines(area.width);
        let skip = lines.len().saturating_sub(draft.height as usize);
        for (row, line) in lines.iter().skip(skip).enumerate() {
            render::render_str_clipped(
                draft.x,
                draft.y + row as u16,
                draft.width,
                buf,
                line,
                theme.text_primary,
            );
        }
    }

    /// Screen position of the cursor, which follows the last character of the draft.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let separator = u16::from(self.options.show_separator);
        let top = separator.saturating_add(self.top_rows(area.width));
        if top >= area.height {
            return None;
        }
        let draft = self.draft_area(Rect::new(
            area.x,
            area.y + top,
            area.width,
            area.height - top,
        ));
        if draft.is_empty() {
            return None;
        }

        let lines = self.draft_lines(area.width);
        let visible = lines.len().min(draft.height as usize).max(1);
        let last_w = lines
            .last()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let x = draft.x + last_w.min(draft.width.saturating_sub(1));
        let y = draft.y + (visible - 1) as u16;
        Some((x, y))
    }

    fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        let mods = key.modifiers;
        match &key.code {
            KeyCode::Char(c) if !mods.ctrl && !mods.alt => {
                self.text.push(*c);
                KeyOutcome::Changed
            }
            KeyCode::Tab => {
                self.text.push('\t');
                KeyOutcome::Changed
            }
            KeyCode::Backspace => match self.text.pop() {
                Some(_) => KeyOutcome::Changed,
                None => KeyOutcome::Unchanged,
            },
            KeyCode::Enter => {
                let submits = match self.options.submit_rule {
                    SubmitRule::Never => false,
                    SubmitRule::EnterSubmitsShiftNewline => !mods.shift,
                    SubmitRule::ShiftEnterSubmitsEnterNewline => mods.shift,
                };
                if submits {
                    KeyOutcome::Submit
                } else {
                    self.text.push('\n');
                    KeyOutcome::Changed
                }
            }
            _ => KeyOutcome::Unchanged,
        }
    }

    fn submit(&mut self) -> InputBarAction {
        if self.text.trim().is_empty() {
            return InputBarAction::None;
        }
        let text = self.clear();
        if let Some(w) = self.last_width {
            self.last_height = Some(self.desired_height(w));
        }
        InputBarAction::Submitted(text)
    }

    fn height_change(&mut self) -> Option<u16> {
        let width = self.last_width?;
        let height = self.desired_height(width);
        if self.last_height == Some(height) {
            return None;
        }
        self.last_height = Some(height);
        Some(height)
    }

    fn top_rows(&self, width: u16) -> u16 {
        match &self.top {
            Some(top) => wrapping::wrap_text(&top.text, width).len().min(u16::MAX as usize) as u16,
            None => 0,
        }
    }

    fn draft_area(&self, rows: Rect) -> Rect {
        let left = self.left.as_ref().map(|a| a.width().saturating_add(1)).unwrap_or(0);
        let right = self.right.as_ref().map(|a| a.width().saturating_add(1)).unwrap_or(0);
        let width = rows.width.saturating_sub(left).saturating_sub(right);
        Rect::new(rows.x + left.min(rows.width), rows.y, width, rows.height)
    }

    fn draft_lines(&self, width: u16) -> Vec<String> {
        let draft = self.draft_area(Rect::new(0, 0, width, 1));
        wrapping::wrap_text(&self.text, draft.width.max(1))
    }
}

enum KeyOutcome {
    Changed,
    Unchanged,
    Submit,
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
