use crate::{
    domain::{
        mapping::{map_book_to_row, string_hash},
        models::{ReadingBook, WidgetRow},
    },
    storage::ReadingBooksStore,
};

/// Bridges a point-in-time snapshot of reading books to the indexed,
/// stably-identified rows a virtualised list needs.
///
/// Pull-based: the snapshot only changes when the host calls one of the
/// lifecycle hooks.
pub struct ReadingListAdapter {
    store: ReadingBooksStore,
    books: Vec<ReadingBook>,
    step: i32,
}

impl ReadingListAdapter {
    pub fn new(store: ReadingBooksStore, step: i32) -> Self {
        Self {
            store,
            books: Vec::new(),
            step,
        }
    }

    pub fn on_create(&mut self) {
        self.refresh();
    }

    pub fn on_data_set_changed(&mut self) {
        self.refresh();
    }

    pub fn on_destroy(&mut self) {
        self.books = Vec::new();
    }

    pub fn refresh(&mut self) {
        self.books = self.store.load_reading_books();
        tracing::debug!(count = self.books.len(), "refreshed reading list snapshot");
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    pub fn row_at(&self, index: usize) -> Option<&ReadingBook> {
        self.books.get(index)
    }

    /// Identity derived from the book id, so a book keeps its identity when it
    /// moves. Out-of-range indexes fall back to the index itself.
    pub fn stable_id(&self, index: usize) -> i64 {
        self.row_at(index)
            .map(|book| string_hash(&book.id) as i64)
            .unwrap_or(index as i64)
    }

    pub fn has_stable_ids(&self) -> bool {
        true
    }

    pub fn view_type_count(&self) -> usize {
        1
    }

    pub fn render_row(&self, index: usize) -> Option<WidgetRow> {
        let book = self.row_at(index)?;
        Some(map_book_to_row(book, self.stable_id(index), self.step))
    }

    pub fn render_rows(&self) -> Vec<WidgetRow> {
        (0..self.count())
            .filter_map(|index| self.render_row(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::storage::{BOOKS_KEY_V2, MemoryPreferences};

    fn adapter_over(books: Value) -> (Arc<MemoryPreferences>, ReadingListAdapter) {
        let prefs = Arc::new(MemoryPreferences::with_string(
            BOOKS_KEY_V2,
            &books.to_string(),
        ));
        let adapter = ReadingListAdapter::new(ReadingBooksStore::new(prefs.clone()), 5);
        (prefs, adapter)
    }

    #[test]
    fn empty_until_created() {
        let (_, mut adapter) = adapter_over(json!([{"id": "b1", "status": "reading"}]));
        assert_eq!(adapter.count(), 0);
        adapter.on_create();
        assert_eq!(adapter.count(), 1);
    }

    #[test]
    fn out_of_range_rows_are_absent() {
        let (_, mut adapter) = adapter_over(json!([{"id": "b1", "status": "reading"}]));
        adapter.on_create();
        assert!(adapter.row_at(0).is_some());
        assert!(adapter.row_at(1).is_none());
        assert!(adapter.render_row(5).is_none());
        assert_eq!(adapter.stable_id(5), 5);
    }

    #[test]
    fn stable_ids_follow_books_across_reorders() {
        let (prefs, mut adapter) = adapter_over(json!([
            {"id": "b1", "status": "reading"},
            {"id": "b2", "status": "reading"}
        ]));
        adapter.on_create();
        let b2_id = adapter.stable_id(1);
        assert_eq!(b2_id, string_hash("b2") as i64);

        prefs.insert(
            BOOKS_KEY_V2,
            Value::String(
                json!([
                    {"id": "b2", "status": "reading"},
                    {"id": "b1", "status": "reading"}
                ])
                .to_string(),
            ),
        );
        adapter.on_data_set_changed();
        assert_eq!(adapter.row_at(0).unwrap().id, "b2");
        assert_eq!(adapter.stable_id(0), b2_id);
    }

    #[test]
    fn refresh_replaces_snapshot_and_destroy_clears_it() {
        let (prefs, mut adapter) = adapter_over(json!([{"id": "b1", "status": "reading", "progressPercent": 42}]));
        adapter.on_create();
        assert_eq!(adapter.row_at(0).unwrap().progress_percent, 42);

        let store = ReadingBooksStore::new(prefs.clone());
        assert!(store.adjust_progress("b1", 5));
        // the snapshot is immutable until the next refresh
        assert_eq!(adapter.row_at(0).unwrap().progress_percent, 42);
        adapter.on_data_set_changed();
        assert_eq!(adapter.row_at(0).unwrap().progress_percent, 47);

        adapter.on_destroy();
        assert_eq!(adapter.count(), 0);
        assert!(adapter.render_rows().is_empty());
    }

    #[test]
    fn renders_rows_with_actions() {
        let (_, mut adapter) = adapter_over(json!([
            {"id": "b1", "title": "Dune", "author": "", "status": "reading", "progressPercent": 42}
        ]));
        adapter.on_create();
        let rows = adapter.render_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Dune");
        assert_eq!(rows[0].author_label, "Unknown author");
        assert_eq!(rows[0].progress_text, "42%");
        assert_eq!(rows[0].decrement.delta, -5);
        assert_eq!(rows[0].increment.delta, 5);
        assert!(adapter.has_stable_ids());
        assert_eq!(adapter.view_type_count(), 1);
    }
}
