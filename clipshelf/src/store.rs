//! History store: the persisted, deduplicated list of clipboard entries.
//!
//! The backing file holds one codec line per entry in strict recency order
//! (line 0 = most recently used). Every mutation reads the full list,
//! applies the change, and rewrites the file through a temp file + rename
//! so a crash mid-write never corrupts good lines for the next read.
//!
//! There is no cross-process locking: two processes mutating the same file
//! are last-writer-wins. Acceptable for a single-user local tool.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;

use crate::codec;
use crate::error::HistoryError;
use crate::models::Entry;

/// Default cap on stored entries; exceeding it triggers a trim on write.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Entries used within this trailing window are preferred over older ones
/// when trimming, regardless of usage count.
pub const DEFAULT_RECENT_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
    recent_window_secs: i64,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, DEFAULT_MAX_ENTRIES, DEFAULT_RECENT_WINDOW_SECS)
    }

    pub fn with_limits(
        path: impl Into<PathBuf>,
        max_entries: usize,
        recent_window_secs: i64,
    ) -> Self {
        Self {
            path: path.into(),
            max_entries,
            recent_window_secs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry, newest first. A missing or unreadable file is
    /// an empty history; undecodable lines are skipped. Never errors.
    pub fn list_history(&self) -> Vec<Entry> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };
        contents.lines().filter_map(codec::decode).collect()
    }

    /// Insert-or-move `value` to the front of history: merge the usage
    /// count of any prior occurrence, refresh the timestamp, drop
    /// duplicates, and persist. Never creates duplicate values.
    pub fn promote(&self, value: &str) -> Result<(), HistoryError> {
        if value.is_empty() {
            return Err(HistoryError::EmptyValue);
        }
        let mut entries = self.list_history();
        let merged_count = entries
            .iter()
            .filter(|e| e.value == value)
            .map(|e| e.count)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        entries.retain(|e| e.value != value);
        entries.insert(0, Entry::with_count(value, merged_count));
        self.persist(entries)
    }

    /// Serialize the full list and replace the backing file in one rename.
    /// Trims first when the list exceeds the cap.
    fn persist(&self, mut entries: Vec<Entry>) -> Result<(), HistoryError> {
        if entries.len() > self.max_entries {
            let before = entries.len();
            entries = self.trim(entries, Utc::now().timestamp());
            debug!("trimmed history {} -> {}", before, entries.len());
        }

        let mut out = String::new();
        for entry in &entries {
            out.push_str(&codec::encode(entry));
            out.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, out)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Keep the top `max_entries` ranked descending by the tuple
    /// `(is_within_recent_window, count, last_used)`: recent entries beat
    /// older ones regardless of count, higher count wins within a bucket,
    /// newer timestamp breaks count ties. Survivors keep their original
    /// relative order so the recency invariant holds after the trim.
    fn trim(&self, entries: Vec<Entry>, now: i64) -> Vec<Entry> {
        let cutoff = now - self.recent_window_secs;
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            let ka = (
                entries[a].last_used >= cutoff,
                entries[a].count,
                entries[a].last_used,
            );
            let kb = (
                entries[b].last_used >= cutoff,
                entries[b].count,
                entries[b].last_used,
            );
            kb.cmp(&ka).then(a.cmp(&b))
        });
        order.truncate(self.max_entries);

        let keep: HashSet<usize> = order.into_iter().collect();
        entries
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep.contains(i))
            .map(|(_, entry)| entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history"))
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).list_history().is_empty());
    }

    #[test]
    fn test_promote_then_list() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.promote("hello").unwrap();
        let entries = store.list_history();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "hello");
        assert_eq!(entries[0].count, 1);
    }

    #[test]
    fn test_promote_rejects_empty_value() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            store_in(&dir).promote(""),
            Err(HistoryError::EmptyValue)
        ));
    }

    #[test]
    fn test_dedup_invariant() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        for value in ["a", "b", "a", "a", "c", "b"] {
            store.promote(value).unwrap();
            for probe in ["a", "b", "c"] {
                let occurrences = store
                    .list_history()
                    .iter()
                    .filter(|e| e.value == probe)
                    .count();
                assert!(occurrences <= 1, "{} appeared {} times", probe, occurrences);
            }
        }
    }

    #[test]
    fn test_promote_moves_to_front_and_merges_count() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.promote("foo").unwrap();
        store.promote("bar").unwrap();
        store.promote("foo").unwrap();

        let entries = store.list_history();
        let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["foo", "bar"]);
        assert_eq!(entries[0].count, 2);
        assert!(entries[0].last_used >= entries[1].last_used);
    }

    #[test]
    fn test_count_merge_uses_max_across_duplicate_lines() {
        // A corrupt or hand-edited file may hold duplicate values; promote
        // merges the highest count and collapses them to one entry.
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut file = fs::File::create(store.path()).unwrap();
        for count in [3u32, 5] {
            let entry = Entry {
                value: "dup".to_string(),
                last_used: 1_700_000_000,
                count,
            };
            writeln!(file, "{}", codec::encode(&entry)).unwrap();
        }
        drop(file);

        store.promote("dup").unwrap();
        let entries = store.list_history();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, 6);
    }

    #[test]
    fn test_fail_soft_decode_skips_garbage_lines() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let good = codec::encode(&Entry {
            value: "keep me".to_string(),
            last_used: 1_700_000_000,
            count: 1,
        });
        fs::write(
            store.path(),
            format!("{}\nnot|a|valid-line\ntoo|few\n", good),
        )
        .unwrap();

        let entries = store.list_history();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "keep me");
    }

    #[test]
    fn test_capacity_trim_keeps_cap_and_newest() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::with_limits(
            dir.path().join("history"),
            5,
            DEFAULT_RECENT_WINDOW_SECS,
        );
        for i in 0..10 {
            store.promote(&format!("value-{}", i)).unwrap();
            assert!(store.list_history().len() <= 5);
        }
        let entries = store.list_history();
        assert_eq!(entries[0].value, "value-9");
    }

    #[test]
    fn test_trim_prefers_recent_window_over_count() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::with_limits(dir.path().join("history"), 2, 7 * 86400);
        let now = Utc::now().timestamp();

        // Old entry with a huge count loses to anything inside the window
        let old_popular = Entry {
            value: "old popular".to_string(),
            last_used: now - 30 * 86400,
            count: 50,
        };
        let recent = Entry {
            value: "recent".to_string(),
            last_used: now - 3600,
            count: 1,
        };
        fs::write(
            store.path(),
            format!("{}\n{}\n", codec::encode(&recent), codec::encode(&old_popular)),
        )
        .unwrap();

        store.promote("fresh").unwrap();
        let values: Vec<String> = store
            .list_history()
            .into_iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(values, vec!["fresh", "recent"]);
    }

    #[test]
    fn test_trim_breaks_recency_bucket_ties_by_count() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::with_limits(dir.path().join("history"), 2, 7 * 86400);
        let now = Utc::now().timestamp();

        let lines: String = [("idle", 1u32, now - 3600), ("busy", 9, now - 7200)]
            .iter()
            .map(|(value, count, last_used)| {
                let entry = Entry {
                    value: value.to_string(),
                    last_used: *last_used,
                    count: *count,
                };
                format!("{}\n", codec::encode(&entry))
            })
            .collect();
        fs::write(store.path(), lines).unwrap();

        store.promote("fresh").unwrap();
        let values: Vec<String> = store
            .list_history()
            .into_iter()
            .map(|e| e.value)
            .collect();
        // Both old entries are in the recent bucket; higher count survives.
        // Survivors keep recency order: fresh first, then busy.
        assert_eq!(values, vec!["fresh", "busy"]);
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.promote("anything").unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }
}
