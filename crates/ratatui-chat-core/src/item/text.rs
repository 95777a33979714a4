use super::Alignment;
use super::ItemId;
use crate::border::Border;
use crate::geometry::HorizontalMargins;
use crate::geometry::Insets;
use crate::geometry::ItemSize;
use crate::wrapping;
use chrono::DateTime;
use chrono::Utc;
use ratatui::style::Style;
use std::collections::HashMap;
use std::sync::Arc;

/// Small badge drawn next to a bubble, bottom-aligned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    pub symbol: String,
    pub style: Style,
    pub width: u16,
    pub height: u32,
}

impl Avatar {
    pub fn new(symbol: impl Into<String>, style: Style) -> Self {
        Self {
            symbol: symbol.into(),
            style,
            width: 2,
            height: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextItemStyle {
    pub alignment: Alignment,
    /// Share of the available width a bubble may take, in percent.
    pub width_percent: u16,
    pub border: Border,
    pub text_style: Style,
    pub text_insets: Insets,
    pub avatar: Option<Avatar>,
    pub avatar_spacing: u16,
}

impl Default for TextItemStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::End,
            width_percent: 70,
            border: Border::default(),
            text_style: Style::default(),
            text_insets: Insets::new(1, 1, 0, 0),
            avatar: None,
            avatar_spacing: 1,
        }
    }
}

impl TextItemStyle {
    fn avatar_extent(&self) -> (u16, u32) {
        match &self.avatar {
            Some(a) => (a.width.saturating_add(self.avatar_spacing), a.height),
            None => (0, 0),
        }
    }

    /// Everything around the text inside a bubble: insets plus border.
    pub fn chrome(&self) -> Insets {
        self.text_insets + self.border.insets()
    }
}

/// Styles keyed by sender, with a fallback for senders nobody registered.
#[derive(Clone, Debug, Default)]
pub struct SenderStyles {
    styles: HashMap<String, Arc<TextItemStyle>>,
    fallback: Arc<TextItemStyle>,
}

impl SenderStyles {
    pub fn new(fallback: TextItemStyle) -> Self {
        Self {
            styles: HashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    pub fn register(&mut self, sender: impl Into<String>, style: TextItemStyle) {
        self.styles.insert(sender.into(), Arc::new(style));
    }

    pub fn with(mut self, sender: impl Into<String>, style: TextItemStyle) -> Self {
        self.register(sender, style);
        self
    }

    pub fn style_for(&self, sender: &str) -> Arc<TextItemStyle> {
        self.styles
            .get(sender)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn is_registered(&self, sender: &str) -> bool {
        self.styles.contains_key(sender)
    }

    /// Builds a text item for `sender` using its registered style.
    pub fn text_item(&self, sender: impl Into<String>, text: impl Into<String>) -> TextItem {
        let sender = sender.into();
        let style = self.style_for(&sender);
        TextItem::new(sender, text, style)
    }
}

#[derive(Clone, Debug)]
pub struct TextItem {
    pub id: ItemId,
    pub date: DateTime<Utc>,
    pub sender: String,
    pub text: String,
    pub style: Arc<TextItemStyle>,
    pub margins: HorizontalMargins,
}

impl TextItem {
    pub const IDENTIFIER: &'static str = "chat.text";

    pub fn new(
        sender: impl Into<String>,
        text: impl Into<String>,
        style: Arc<TextItemStyle>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            date: Utc::now(),
            sender: sender.into(),
            text: text.into(),
            style,
            margins: HorizontalMargins::symmetric(1),
        }
    }

    pub fn with_id(mut self, id: ItemId, date: DateTime<Utc>) -> Self {
        self.id = id;
        self.date = date;
        self
    }

    pub fn with_margins(mut self, margins: HorizontalMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Widest width the text may wrap at when `max_width` cells are available.
    pub fn max_text_width(&self, max_width: u16) -> u16 {
        let (avatar_w, _) = self.style.avatar_extent();
        self.effective_width(max_width)
            .saturating_sub(self.style.chrome().horizontal())
            .saturating_sub(avatar_w)
            .max(1)
    }

    /// Wrapped text lines for a bubble whose text area is `text_width` wide.
    pub fn lines(&self, text_width: u16) -> Vec<String> {
        wrapping::wrap_text(&self.text, text_width)
    }

    pub fn preferred_size(&self, max_width: u16) -> ItemSize {
        let (avatar_w, avatar_h) = self.style.avatar_extent();
        let chrome = self.style.chrome();
        let effective = self.effective_width(max_width);
        let (text_w, text_h) = wrapping::measure_text(&self.text, self.max_text_width(max_width));

        let width = effective
            .min(text_w)
            .saturating_add(chrome.horizontal())
            .saturating_add(avatar_w);
        let height = text_h
            .saturating_add(chrome.vertical() as u32)
            .max(avatar_h);
        ItemSize::new(width, height)
    }

    fn effective_width(&self, max_width: u16) -> u16 {
        (max_width as u32 * self.style.width_percent as u32 / 100).min(u16::MAX as u32) as u16
    }
}
