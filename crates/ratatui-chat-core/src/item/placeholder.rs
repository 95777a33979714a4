use super::Alignment;
use super::ItemId;
use crate::geometry::HorizontalMargins;
use crate::geometry::ItemSize;
use chrono::DateTime;
use chrono::Utc;

pub const DEFAULT_PLACEHOLDER_TITLE: &str = "😎";

/// A fixed-size stand-in bubble, handy while a real message is loading and for demos.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceholderItem {
    pub id: ItemId,
    pub date: DateTime<Utc>,
    pub alignment: Alignment,
    pub margins: HorizontalMargins,
    pub title: String,
    /// Share of the available width, in percent.
    pub width_percent: u16,
    pub height: u32,
}

impl PlaceholderItem {
    pub const IDENTIFIER: &'static str = "chat.placeholder";

    pub fn new(alignment: Alignment) -> Self {
        Self {
            id: ItemId::new(),
            date: Utc::now(),
            alignment,
            margins: HorizontalMargins::ZERO,
            title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
            width_percent: 20,
            height: 3,
        }
    }

    pub fn with_id(mut self, id: ItemId, date: DateTime<Utc>) -> Self {
        self.id = id;
        self.date = date;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width_percent: u16, height: u32) -> Self {
        self.width_percent = width_percent;
        self.height = height;
        self
    }

    pub fn with_margins(mut self, margins: HorizontalMargins) -> Self {
        self.margins = margins;
        self
    }

    pub fn preferred_size(&self, max_width: u16) -> ItemSize {
        let width = (max_width as u32 * self.width_percent as u32 / 100).min(u16::MAX as u32);
        ItemSize::new(width as u16, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_a_share_of_the_available_width() {
        let p = PlaceholderItem::new(Alignment::End).with_size(20, 50);
        assert_eq!(p.preferred_size(300), ItemSize::new(60, 50));
        assert_eq!(p.preferred_size(4), ItemSize::new(0, 50));
    }

    #[test]
    fn oversized_share_is_reported_unclamped() {
        let p = PlaceholderItem::new(Alignment::Start).with_size(150, 2);
        assert_eq!(p.preferred_size(100), ItemSize::new(150, 2));
    }
}
