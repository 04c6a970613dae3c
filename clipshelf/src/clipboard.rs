//! Clipboard capability abstraction.
//!
//! The core never talks to the OS pasteboard directly; it goes through
//! this trait so the poller and picker are testable against the in-memory
//! fake. The binary crate provides the real implementation.

use crate::error::ClipboardError;

/// Injected clipboard capability: read the current text, or replace it.
pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard for tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: text.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Simulate an external copy landing on the clipboard.
    pub fn set_contents(&mut self, text: impl Into<String>) {
        self.contents = text.into();
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = text.to_string();
        Ok(())
    }
}
