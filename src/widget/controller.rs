use std::sync::{Arc, Mutex, PoisonError};

use crate::storage::ReadingBooksStore;

/// The rendering side of the widget: whatever redraws placed instances.
pub trait WidgetHost: Send + Sync {
    /// Recompute and redraw every active widget instance.
    fn refresh_all(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// Blank book id or zero delta; the store was not consulted.
    Rejected,
    /// The store reported no change, so nothing was redrawn.
    Unchanged,
    /// Progress was written and every instance refreshed.
    Refreshed,
}

impl AdjustOutcome {
    pub fn changed(self) -> bool {
        self == AdjustOutcome::Refreshed
    }
}

/// Turns "adjust progress" events into store mutations and redraws.
pub struct WidgetController {
    store: ReadingBooksStore,
    host: Arc<dyn WidgetHost>,
    // the store's read-modify-write is not atomic; route every mutation through here
    mutation_lock: Mutex<()>,
}

impl WidgetController {
    pub fn new(store: ReadingBooksStore, host: Arc<dyn WidgetHost>) -> Self {
        Self {
            store,
            host,
            mutation_lock: Mutex::new(()),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn on_adjust_progress(&self, book_id: Option<&str>, delta: i32) -> AdjustOutcome {
        let book_id = book_id.map(str::trim).unwrap_or_default();
        if book_id.is_empty() || delta == 0 {
            tracing::debug!("ignoring adjust event without book id or delta");
            return AdjustOutcome::Rejected;
        }

        let changed = {
            let _guard = self
                .mutation_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.store.adjust_progress(book_id, delta)
        };
        if !changed {
            return AdjustOutcome::Unchanged;
        }
        self.host.refresh_all();
        AdjustOutcome::Refreshed
    }

    /// External "data changed" signal, e.g. the host app rewrote the list.
    pub fn on_data_changed(&self) {
        self.host.refresh_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::storage::{BOOKS_KEY_V2, MemoryPreferences, PreferenceStore};

    #[derive(Default)]
    struct CountingHost {
        refreshes: AtomicUsize,
    }

    impl WidgetHost for CountingHost {
        fn refresh_all(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn controller() -> (Arc<MemoryPreferences>, Arc<CountingHost>, WidgetController) {
        let raw = json!([
            {"id": "b1", "status": "reading", "progressPercent": 42},
            {"id": "done", "status": "reading", "progressPercent": 100}
        ])
        .to_string();
        let prefs = Arc::new(MemoryPreferences::with_string(BOOKS_KEY_V2, &raw));
        let host = Arc::new(CountingHost::default());
        let controller = WidgetController::new(ReadingBooksStore::new(prefs.clone()), host.clone());
        (prefs, host, controller)
    }

    #[test]
    fn rejects_blank_ids_and_zero_deltas() {
        let (prefs, host, controller) = controller();
        assert_eq!(controller.on_adjust_progress(None, 5), AdjustOutcome::Rejected);
        assert_eq!(controller.on_adjust_progress(Some("   "), 5), AdjustOutcome::Rejected);
        assert_eq!(controller.on_adjust_progress(Some("b1"), 0), AdjustOutcome::Rejected);
        assert_eq!(host.refreshes.load(Ordering::SeqCst), 0);
        assert_eq!(prefs.write_count(), 0);
    }

    #[test]
    fn refreshes_once_on_change() {
        let (prefs, host, controller) = controller();
        let outcome = controller.on_adjust_progress(Some(" b1 "), 5);
        assert_eq!(outcome, AdjustOutcome::Refreshed);
        assert!(outcome.changed());
        assert_eq!(host.refreshes.load(Ordering::SeqCst), 1);
        assert!(prefs.get_string(BOOKS_KEY_V2).unwrap().contains("\"progressPercent\":47"));
    }

    #[test]
    fn no_refresh_when_store_reports_no_change() {
        let (_, host, controller) = controller();
        assert_eq!(
            controller.on_adjust_progress(Some("done"), 5),
            AdjustOutcome::Unchanged
        );
        assert_eq!(
            controller.on_adjust_progress(Some("missing-id"), 5),
            AdjustOutcome::Unchanged
        );
        assert_eq!(host.refreshes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_adjustments_are_serialised() {
        let (prefs, host, controller) = controller();
        let controller = Arc::new(controller);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let controller = controller.clone();
                std::thread::spawn(move || controller.on_adjust_progress(Some("b1"), 1))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), AdjustOutcome::Refreshed);
        }
        assert_eq!(host.refreshes.load(Ordering::SeqCst), 8);
        assert!(prefs.get_string(BOOKS_KEY_V2).unwrap().contains("\"progressPercent\":50"));
    }
}
