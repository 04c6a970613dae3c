//! On-disk line codec for history entries.
//!
//! One entry per line: `base64(value)|last_used|count`. The base64 payload
//! keeps embedded newlines and the field separator out of the line, so the
//! format survives arbitrary clipboard text. Decoding is the single point
//! of defense against corrupt or partially written files: a malformed line
//! decodes to `None` and is dropped by the reader, never an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::models::Entry;

/// Joins the encoded payload and its metadata fields on a line.
pub const FIELD_SEPARATOR: char = '|';

/// Encode an entry to its single-line on-disk form.
pub fn encode(entry: &Entry) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        STANDARD.encode(entry.value.as_bytes()),
        entry.last_used,
        entry.count,
        sep = FIELD_SEPARATOR,
    )
}

/// Decode a line back to an entry. Fails softly on wrong field count,
/// undecodable payload, non-UTF-8 text, non-integer metadata, or an empty
/// or zero-count result.
pub fn decode(line: &str) -> Option<Entry> {
    let mut fields = line.split(FIELD_SEPARATOR);
    let payload = fields.next()?;
    let last_used = fields.next()?;
    let count = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let value = String::from_utf8(STANDARD.decode(payload).ok()?).ok()?;
    if value.is_empty() {
        return None;
    }
    let last_used: i64 = last_used.parse().ok()?;
    let count: u32 = count.parse().ok()?;
    if count == 0 {
        return None;
    }

    Some(Entry {
        value,
        last_used,
        count,
    })
}
