//! `ratatui-chat-core` provides the building blocks of a terminal chat view.
//!
//! The centre of the crate is an incremental layout engine for a vertical list of
//! variable-height items: frames are computed lazily from the top down, cached by position, and
//! discarded selectively depending on what changed.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: a list and its layout are owned by the task that renders them.
//! - Items are measured in terminal cells; vertical positions are `u32` so long histories fit.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-chat`, which adds the composite
//! `ChatView`. Use this crate directly for custom layouts.
//!
//! Useful entry points:
//! - [`collection::ChatCollection`]: ordered items plus their cached layout.
//! - [`layout::ChatLayout`]: the layout engine on its own, driven by any [`item::LayoutItem`].
//! - [`bubble::render_item_clipped`]: draws a laid-out item, partially scrolled or not.
//! - [`input_bar::InputBar`]: auto-growing input with accessories.
//!
//! ```
//! use ratatui_chat_core::collection::ChatCollection;
//! use ratatui_chat_core::item::{Alignment, ChatItem, PlaceholderItem};
//!
//! let mut chat = ChatCollection::<ChatItem>::new();
//! chat.set_viewport_size(300, 40);
//! chat.add_item(PlaceholderItem::new(Alignment::Start).into());
//! assert_eq!(chat.frame_for_item(0).x, 0);
//! ```
pub mod geometry;
pub mod item;
pub mod layout;

pub mod collection;

pub mod border;
pub mod bubble;
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod input_bar;
pub mod keymap;
pub mod render;
pub mod scroll;
pub mod viewport;
pub mod wrapping;
