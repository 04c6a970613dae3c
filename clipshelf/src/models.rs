//! Core data model: one deduplicated clipboard value with recency and
//! usage metadata.

use chrono::Utc;

/// One clipboard snapshot. `value` is the identity key: the store holds at
/// most one entry per distinct value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw clipboard text; may contain embedded newlines, never empty once
    /// stored.
    pub value: String,
    /// Unix seconds of the most recent capture or promotion.
    pub last_used: i64,
    /// How many times this value has been captured or re-selected.
    pub count: u32,
}

impl Entry {
    /// A freshly captured entry (count 1, timestamped now).
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_count(value, 1)
    }

    /// An entry carrying a merged usage count, timestamped now.
    pub fn with_count(value: impl Into<String>, count: u32) -> Self {
        Self {
            value: value.into(),
            last_used: Utc::now().timestamp(),
            count,
        }
    }

    /// First line of the value, for single-line previews.
    pub fn first_line(&self) -> &str {
        self.value.lines().next().unwrap_or("")
    }

    /// Everything after the first line collapsed to one line, or `None`
    /// when the value has no further content.
    pub fn continuation(&self) -> Option<String> {
        let rest = self.value.splitn(2, '\n').nth(1)?;
        let joined = rest.split_whitespace().collect::<Vec<_>>().join(" ");
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Compact age label relative to now, e.g. "42s", "5m", "3h", "12d".
    pub fn age_label(&self) -> String {
        format_time_ago(self.last_used, Utc::now().timestamp())
    }
}

/// Format how long ago `timestamp` was relative to `now`.
pub fn format_time_ago(timestamp: i64, now: i64) -> String {
    let ago = (now - timestamp).max(0);
    if ago < 60 {
        format!("{}s", ago)
    } else if ago < 3600 {
        format!("{}m", ago / 60)
    } else if ago < 86400 {
        format!("{}h", ago / 3600)
    } else {
        format!("{}d", ago / 86400)
    }
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_and_continuation() {
        let entry = Entry::new("first line\nsecond\nthird");
        assert_eq!(entry.first_line(), "first line");
        assert_eq!(entry.continuation().as_deref(), Some("second third"));
    }

    #[test]
    fn test_continuation_absent_for_single_line() {
        let entry = Entry::new("only line");
        assert_eq!(entry.continuation(), None);
    }

    #[test]
    fn test_continuation_absent_for_blank_rest() {
        let entry = Entry::new("line\n   \n");
        assert_eq!(entry.continuation(), None);
    }

    #[test]
    fn test_format_time_ago_buckets() {
        let now = 1_700_000_000;
        assert_eq!(format_time_ago(now - 5, now), "5s");
        assert_eq!(format_time_ago(now - 120, now), "2m");
        assert_eq!(format_time_ago(now - 7200, now), "2h");
        assert_eq!(format_time_ago(now - 3 * 86400, now), "3d");
        // Clock skew never produces a negative label
        assert_eq!(format_time_ago(now + 100, now), "0s");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdefgh", 5), "abcd\u{2026}");
        // Char-based, so multibyte text is never split mid-character
        assert_eq!(truncate_chars("\u{4f60}\u{597d}\u{4e16}\u{754c}", 3), "\u{4f60}\u{597d}\u{2026}");
    }
}
