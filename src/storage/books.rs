use std::sync::Arc;

use serde_json::Value;

use super::PreferenceStore;
use crate::domain::{
    mapping::{PROGRESS_FIELD, clamp_progress, map_record_to_book, record_id, record_progress},
    models::ReadingBook,
};

pub const BOOKS_KEY_V2: &str = "flutter.book_items_v2";
pub const BOOKS_KEY_V1: &str = "flutter.book_items_v1";
/// Candidate keys in priority order; the legacy key is only consulted when the
/// preferred one is absent.
pub const BOOK_KEYS: [&str; 2] = [BOOKS_KEY_V2, BOOKS_KEY_V1];

/// Read and read-modify-write access to the book list the host app persists.
///
/// Every failure degrades to "nothing to show" or "nothing changed": a widget has
/// no channel to surface errors to the user.
#[derive(Clone)]
pub struct ReadingBooksStore {
    prefs: Arc<dyn PreferenceStore>,
}

impl ReadingBooksStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { prefs }
    }

    /// Books whose status is "reading", in stored order.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_reading_books(&self) -> Vec<ReadingBook> {
        let Some(raw) = BOOK_KEYS.iter().find_map(|key| self.prefs.get_string(key)) else {
            return Vec::new();
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match decode_records(&raw) {
            Ok(records) => records
                .iter()
                .filter_map(Value::as_object)
                .filter_map(map_record_to_book)
                .collect(),
            Err(e) => {
                tracing::debug!(error = %e, "stored book list is not a JSON array");
                Vec::new()
            }
        }
    }

    /// Move one book's progress by `delta`, clamped to 0..=100.
    ///
    /// Returns `true` only when a value was written. Records are matched by id
    /// regardless of their status.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn adjust_progress(&self, book_id: &str, delta: i32) -> bool {
        let Some(key) = BOOK_KEYS.into_iter().find(|key| self.prefs.contains(key)) else {
            return false;
        };
        let Some(raw) = self.prefs.get_string(key) else {
            return false;
        };
        let mut records = match decode_records(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!(%key, error = %e, "cannot adjust progress on malformed book list");
                return false;
            }
        };

        let Some(record) = records
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|record| record_id(record) == book_id)
        else {
            return false;
        };
        let current = record_progress(record);
        let next = clamp_progress(current as i64 + delta as i64);
        if next == current {
            return false;
        }
        record.insert(PROGRESS_FIELD.to_string(), Value::from(next));

        let encoded = match serde_json::to_string(&records) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode book list");
                return false;
            }
        };
        if let Err(e) = self.prefs.put_string(key, &encoded) {
            tracing::warn!(%key, error = %format!("{:#}", e), "failed to store adjusted progress");
            return false;
        }
        tracing::info!(%book_id, from = current, to = next, "adjusted reading progress");
        true
    }
}

fn decode_records(raw: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(raw)
}
