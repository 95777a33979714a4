//! `ratatui-chat-state` holds what a chat keeps outside the screen: the saved history and
//! messages waiting to be posted.
//!
//! - [`history::ChatHistory`]: JSON save/load of chat items.
//! - [`post_queue::PostQueue`]: coalesces bursts of incoming items into one batch.
pub mod error;
pub mod history;
pub mod post_queue;

pub use error::HistoryError;
pub use error::Result;
pub use history::ChatHistory;
pub use post_queue::PostQueue;
