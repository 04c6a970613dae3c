//! Clipshelf core - history store, fuzzy matching, poller and picker logic
//! for the clipshelf terminal clipboard manager.
//!
//! The binary crate wires these pieces to the real clipboard and terminal;
//! everything here is testable against the in-memory [`MemoryClipboard`].

pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod picker;
pub mod poller;
pub mod search;
pub mod store;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::Config;
pub use error::{ClipboardError, HistoryError};
pub use models::Entry;
pub use store::HistoryStore;
