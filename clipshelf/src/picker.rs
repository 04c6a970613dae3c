//! Interactive picker: a blocking, turn-based read-eval loop over history.
//!
//! The picker works on a snapshot of the history taken once at start. Each
//! turn renders the working set (full snapshot or the last search result),
//! then interprets one input line: `q` quits, `/term` searches, an index
//! copies that entry back to the clipboard and promotes it. Every user
//! error is recovered locally with a message; the loop never exits on bad
//! input.

use std::io::{self, BufRead, Write};

use crate::clipboard::Clipboard;
use crate::models::{truncate_chars, Entry};
use crate::search;
use crate::store::HistoryStore;

/// Rows rendered per refresh.
pub const DEFAULT_DISPLAY_CAP: usize = 15;

/// Maximum characters rendered per preview line.
const PREVIEW_WIDTH: usize = 64;

/// ANSI reverse video around the active search term.
const HIGHLIGHT_OPEN: &str = "\x1b[7m";
const HIGHLIGHT_CLOSE: &str = "\x1b[0m";

pub struct Picker<'a, C: Clipboard> {
    store: &'a HistoryStore,
    clipboard: &'a mut C,
    display_cap: usize,
}

impl<'a, C: Clipboard> Picker<'a, C> {
    pub fn new(store: &'a HistoryStore, clipboard: &'a mut C) -> Self {
        Self {
            store,
            clipboard,
            display_cap: DEFAULT_DISPLAY_CAP,
        }
    }

    pub fn with_display_cap(mut self, display_cap: usize) -> Self {
        self.display_cap = display_cap;
        self
    }

    /// Drive the loop until `q`, end of input, or an I/O failure on the
    /// terminal itself. An empty history prints a notice and returns
    /// before entering the loop.
    pub fn run(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> io::Result<()> {
        let snapshot = self.store.list_history();
        if snapshot.is_empty() {
            writeln!(output, "history is empty; nothing to select")?;
            return Ok(());
        }

        let mut working = snapshot.clone();
        let mut term = String::new();

        loop {
            self.render(output, &working, &term)?;
            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();

            if line.eq_ignore_ascii_case("q") {
                break;
            }

            if let Some(raw) = line.strip_prefix('/') {
                let candidate = raw.to_lowercase();
                let filtered = search::filter_and_rank(&snapshot, &candidate);
                if filtered.is_empty() {
                    writeln!(output, "no matches for '{}'", candidate)?;
                } else {
                    working = filtered;
                    term = candidate;
                }
                continue;
            }

            if let Ok(index) = line.parse::<usize>() {
                self.select(output, &working, index)?;
                continue;
            }

            writeln!(
                output,
                "unrecognized input '{}'; enter an index, /term, or q",
                line
            )?;
        }
        Ok(())
    }

    /// Copy the chosen entry back to the clipboard and promote it. Bad
    /// indexes and clipboard failures report and leave history untouched.
    fn select(
        &mut self,
        output: &mut impl Write,
        working: &[Entry],
        index: usize,
    ) -> io::Result<()> {
        let entry = match working.get(index) {
            Some(entry) => entry,
            None => {
                return writeln!(
                    output,
                    "index {} is out of range (0..{})",
                    index,
                    working.len()
                );
            }
        };
        if entry.value.is_empty() {
            return writeln!(output, "entry {} has nothing to copy", index);
        }
        if let Err(e) = self.clipboard.write(&entry.value) {
            return writeln!(output, "{}", e);
        }
        match self.store.promote(&entry.value) {
            Ok(()) => writeln!(output, "copied entry {} to clipboard", index),
            Err(e) => writeln!(output, "copied, but history update failed: {}", e),
        }
    }

    fn render(
        &self,
        output: &mut impl Write,
        working: &[Entry],
        term: &str,
    ) -> io::Result<()> {
        for (index, entry) in working.iter().take(self.display_cap).enumerate() {
            let first = decorate(entry.first_line(), term);
            writeln!(
                output,
                "{:>3}  {}  [x{} {}]",
                index,
                first,
                entry.count,
                entry.age_label()
            )?;
            if let Some(rest) = entry.continuation() {
                writeln!(output, "     {}", decorate(&rest, term))?;
            }
        }
        if working.len() > self.display_cap {
            writeln!(output, "({} more not shown)", working.len() - self.display_cap)?;
        }
        Ok(())
    }
}

/// Truncate a preview line and highlight the active term, if any.
fn decorate(line: &str, term: &str) -> String {
    let truncated = truncate_chars(line, PREVIEW_WIDTH);
    if term.is_empty() {
        truncated
    } else {
        search::highlight(&truncated, term, HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
    }
}
