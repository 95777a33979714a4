//! `ratatui-chat` is the batteries-included entry point: it re-exports the core building blocks
//! and adds [`chat_view::ChatView`], a message list with an input bar underneath.
//!
//! - Event-loop agnostic: feed [`input::InputEvent`]s in, call `render_ref` to draw.
//! - Enable `crossterm` for event conversion and `state` for history persistence and the
//!   coalescing post queue.
pub use ratatui_chat_core::border;
pub use ratatui_chat_core::bubble;
pub use ratatui_chat_core::collection;
#[cfg(feature = "crossterm")]
pub use ratatui_chat_core::crossterm_input;
pub use ratatui_chat_core::geometry;
pub use ratatui_chat_core::input;
pub use ratatui_chat_core::input_bar;
pub use ratatui_chat_core::item;
pub use ratatui_chat_core::keymap;
pub use ratatui_chat_core::layout;
pub use ratatui_chat_core::render;
pub use ratatui_chat_core::scroll;
pub use ratatui_chat_core::theme;
pub use ratatui_chat_core::viewport;
pub use ratatui_chat_core::wrapping;

#[cfg(feature = "state")]
pub use ratatui_chat_state as state;

pub mod chat_view;
