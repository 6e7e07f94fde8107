// Domain models shared by the store, the list adapter and the HTTP host

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A book in the "reading" state, as shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingBook {
    pub id: String,
    pub title: String,
    /// May be empty; rows substitute a placeholder
    pub author: String,
    /// Always within 0..=100
    pub progress_percent: u8,
}

/// Payload a row button carries back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressAction {
    pub book_id: String,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRow {
    pub stable_id: i64,
    pub book_id: String,
    pub title: String,
    pub author_label: String,
    pub progress_percent: u8,
    pub progress_max: u8,
    pub progress_text: String,
    pub decrement: ProgressAction,
    pub increment: ProgressAction,
}

/// One placed widget instance, fully rendered.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub id: Uuid,
    pub subtitle: String,
    pub rows: Vec<WidgetRow>,
    pub refreshed_at: DateTime<Utc>,
}
