//! The chat item model.
//!
//! The layout engine only sees items through [`LayoutItem`]. [`ChatItem`] is the closed set of
//! item kinds shipped with this crate; a new kind is a new variant plus an identifier string
//! used by persistence to pick the decoder.

mod placeholder;
mod text;

pub use placeholder::PlaceholderItem;
pub use text::Avatar;
pub use text::SenderStyles;
pub use text::TextItem;
pub use text::TextItemStyle;

use crate::geometry::HorizontalMargins;
use crate::geometry::ItemSize;
use chrono::DateTime;
use chrono::Utc;
use std::fmt;
use uuid::Uuid;

/// Horizontal placement of an item within the list width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    Start,
    Center,
    #[default]
    End,
}

/// Stable identifier of an item, assigned once at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the layout engine needs from an item.
///
/// `preferred_size` must be stable between a layout pass that caches a frame and the next
/// read of that frame; anything it depends on is part of the item's content.
pub trait LayoutItem {
    fn id(&self) -> ItemId;

    fn alignment(&self) -> Alignment;

    fn horizontal_margins(&self) -> HorizontalMargins;

    /// Size of the rendered content when at most `max_width` cells are available.
    fn preferred_size(&self, max_width: u16) -> ItemSize;
}

#[derive(Clone, Debug)]
pub enum ChatItem {
    Placeholder(PlaceholderItem),
    Text(TextItem),
}

impl ChatItem {
    /// Discriminator used when the item is persisted.
    pub fn identifier(&self) -> &'static str {
        match self {
            ChatItem::Placeholder(_) => PlaceholderItem::IDENTIFIER,
            ChatItem::Text(_) => TextItem::IDENTIFIER,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            ChatItem::Placeholder(p) => p.date,
            ChatItem::Text(t) => t.date,
        }
    }

    pub fn as_text(&self) -> Option<&TextItem> {
        match self {
            ChatItem::Text(t) => Some(t),
            ChatItem::Placeholder(_) => None,
        }
    }
}

impl LayoutItem for ChatItem {
    fn id(&self) -> ItemId {
        match self {
            ChatItem::Placeholder(p) => p.id,
            ChatItem::Text(t) => t.id,
        }
    }

    fn alignment(&self) -> Alignment {
        match self {
            ChatItem::Placeholder(p) => p.alignment,
            ChatItem::Text(t) => t.style.alignment,
        }
    }

    fn horizontal_margins(&self) -> HorizontalMargins {
        match self {
            ChatItem::Placeholder(p) => p.margins,
            ChatItem::Text(t) => t.margins,
        }
    }

    fn preferred_size(&self, max_width: u16) -> ItemSize {
        match self {
            ChatItem::Placeholder(p) => p.preferred_size(max_width),
            ChatItem::Text(t) => t.preferred_size(max_width),
        }
    }
}

impl From<PlaceholderItem> for ChatItem {
    fn from(item: PlaceholderItem) -> Self {
        ChatItem::Placeholder(item)
    }
}

impl From<TextItem> for ChatItem {
    fn from(item: TextItem) -> Self {
        ChatItem::Text(item)
    }
}
