// Mapping from the host application's JSON book records to domain models

use serde_json::{Map, Value};

use super::models::{ProgressAction, ReadingBook, WidgetRow};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const READING_STATUS: &str = "reading";
pub const PROGRESS_FIELD: &str = "progressPercent";
pub const PROGRESS_MAX: u8 = 100;

/// Read a field as text the way the host app's JSON library does: strings as-is,
/// numbers and booleans by their textual form, null or missing as empty.
pub fn opt_string(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read a field as an integer, falling back to `default` when it is neither a
/// number nor a numeric string. Fractions are truncated.
pub fn opt_int(record: &Map<String, Value>, key: &str, default: i64) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(default)
        }
        _ => default,
    }
}

pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, PROGRESS_MAX as i64) as u8
}

pub fn record_id(record: &Map<String, Value>) -> String {
    opt_string(record, "id").trim().to_string()
}

pub fn record_progress(record: &Map<String, Value>) -> u8 {
    clamp_progress(opt_int(record, PROGRESS_FIELD, 0))
}

pub fn is_reading(record: &Map<String, Value>) -> bool {
    opt_string(record, "status").trim().to_lowercase() == READING_STATUS
}

/// Map a stored record to a [`ReadingBook`]; `None` when the record is not
/// currently being read.
pub fn map_record_to_book(record: &Map<String, Value>) -> Option<ReadingBook> {
    if !is_reading(record) {
        return None;
    }
    let title = opt_string(record, "title").trim().to_string();
    Some(ReadingBook {
        id: record_id(record),
        title: if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        },
        author: opt_string(record, "author").trim().to_string(),
        progress_percent: record_progress(record),
    })
}

pub fn author_label(book: &ReadingBook) -> &str {
    if book.author.trim().is_empty() {
        UNKNOWN_AUTHOR
    } else {
        &book.author
    }
}

pub fn progress_text(progress_percent: u8) -> String {
    format!("{}%", progress_percent)
}

pub fn subtitle(reading_count: usize) -> String {
    if reading_count == 0 {
        "No books currently in Reading".to_string()
    } else {
        format!("{} currently reading", reading_count)
    }
}

/// 31-multiplier hash over UTF-16 code units, wrapping at 32 bits. Matches the
/// row identities the mobile host derives from the same ids.
pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

pub fn map_book_to_row(book: &ReadingBook, stable_id: i64, step: i32) -> WidgetRow {
    WidgetRow {
        stable_id,
        book_id: book.id.clone(),
        title: book.title.clone(),
        author_label: author_label(book).to_string(),
        progress_percent: book.progress_percent,
        progress_max: PROGRESS_MAX,
        progress_text: progress_text(book.progress_percent),
        decrement: ProgressAction {
            book_id: book.id.clone(),
            delta: -step,
        },
        increment: ProgressAction {
            book_id: book.id.clone(),
            delta: step,
        },
    }
}
