//! JSON persistence of a chat's items.
//!
//! The file holds one object with an `items` array. Each entry carries an `identifier` naming
//! its item kind plus that kind's fields:
//!
//! ```text
//! {"items": [{"identifier": "chat.text", "id": "<uuid>", "date": "<rfc3339>", "sender": "me", "text": "hi",
//!   "margins": {"left": 1, "right": 1}}]}
//! ```
//!
//! An entry without `margins` gets its kind's default margins. Text styles are not stored; they
//! are looked up by sender when the file is read back.
use std::fs;
use std::io;
use std::path::Path;

use chrono::DateTime;
use chrono::Utc;
use ratatui_chat_core::geometry::HorizontalMargins;
use ratatui_chat_core::item::Alignment;
use ratatui_chat_core::item::ChatItem;
use ratatui_chat_core::item::ItemId;
use ratatui_chat_core::item::PlaceholderItem;
use ratatui_chat_core::item::SenderStyles;
use ratatui_chat_core::item::TextItem;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::error::HistoryError;
use crate::error::Result;

#[derive(Clone, Debug, Default)]
pub struct ChatHistory {
    items: Vec<ChatItem>,
}

impl ChatHistory {
    pub fn new(items: Vec<ChatItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ChatItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ChatItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        let file = HistoryFile {
            items: self.items.iter().map(StoredItem::from_item).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Parses a history, giving each text item the style registered for its sender.
    pub fn from_json(json: &str, styles: &SenderStyles) -> Result<Self> {
        let file: HistoryFile = serde_json::from_str(json)?;
        let items = file
            .items
            .into_iter()
            .map(|stored| stored.into_item(styles))
            .collect();
        Ok(Self { items })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| HistoryError::io(path, e))?;
        debug!(path = %path.display(), count = self.items.len(), "saved chat history");
        Ok(())
    }

    /// Reads a history from `path`. A missing file is an empty history.
    pub fn load(path: &Path, styles: &SenderStyles) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(HistoryError::io(path, e)),
        };
        Self::from_json(&json, styles)
    }

    /// Like [`ChatHistory::load`], but an unreadable or corrupt file yields an empty history.
    pub fn load_or_empty(path: &Path, styles: &SenderStyles) -> Self {
        match Self::load(path, styles) {
            Ok(history) => history,
            Err(err) => {
                warn!(path = %path.display(), %err, "discarding unreadable chat history");
                Self::default()
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    items: Vec<StoredItem>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "identifier")]
enum StoredItem {
    #[serde(rename = "chat.placeholder")]
    Placeholder {
        id: ItemId,
        date: DateTime<Utc>,
        alignment: Alignment,
        title: String,
        width_percent: u16,
        height: u32,
        #[serde(default)]
        margins: Option<HorizontalMargins>,
    },
    #[serde(rename = "chat.text")]
    Text {
        id: ItemId,
        date: DateTime<Utc>,
        sender: String,
        text: String,
        #[serde(default)]
        margins: Option<HorizontalMargins>,
    },
}

impl StoredItem {
    fn from_item(item: &ChatItem) -> Self {
        match item {
            ChatItem::Placeholder(p) => StoredItem::Placeholder {
                id: p.id,
                date: p.date,
                alignment: p.alignment,
                title: p.title.clone(),
                width_percent: p.width_percent,
                height: p.height,
                margins: Some(p.margins),
            },
            ChatItem::Text(t) => StoredItem::Text {
                id: t.id,
                date: t.date,
                sender: t.sender.clone(),
                text: t.text.clone(),
                margins: Some(t.margins),
            },
        }
    }

    fn into_item(self, styles: &SenderStyles) -> ChatItem {
        match self {
            StoredItem::Placeholder {
                id,
                date,
                alignment,
                title,
                width_percent,
                height,
                margins,
            } => {
                let mut item = PlaceholderItem::new(alignment)
                    .with_id(id, date)
                    .with_title(title)
                    .with_size(width_percent, height);
                if let Some(margins) = margins {
                    item = item.with_margins(margins);
                }
                item.into()
            }
            StoredItem::Text {
                id,
                date,
                sender,
                text,
                margins,
            } => {
                let style = styles.style_for(&sender);
                let mut item = TextItem::new(sender, text, style).with_id(id, date);
                if let Some(margins) = margins {
                    item = item.with_margins(margins);
                }
                item.into()
            }
        }
    }
}
