use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{adapter::ReadingListAdapter, controller::WidgetHost};
use crate::{
    domain::{mapping::subtitle, models::WidgetView},
    storage::ReadingBooksStore,
};

struct WidgetInstance {
    adapter: ReadingListAdapter,
    refreshed_at: DateTime<Utc>,
}

impl WidgetInstance {
    fn view(&self, id: Uuid) -> WidgetView {
        WidgetView {
            id,
            subtitle: subtitle(self.adapter.count()),
            rows: self.adapter.render_rows(),
            refreshed_at: self.refreshed_at,
        }
    }
}

/// Placed widget instances, each owning its own list adapter.
pub struct WidgetRegistry {
    store: ReadingBooksStore,
    step: i32,
    instances: Mutex<HashMap<Uuid, WidgetInstance>>,
}

impl WidgetRegistry {
    pub fn new(store: ReadingBooksStore, step: i32) -> Self {
        Self {
            store,
            step,
            instances: Mutex::new(HashMap::new()),
        }
    }

    fn instances(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, WidgetInstance>> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn place(&self) -> WidgetView {
        let id = Uuid::new_v4();
        let mut adapter = ReadingListAdapter::new(self.store.clone(), self.step);
        adapter.on_create();
        let instance = WidgetInstance {
            adapter,
            refreshed_at: Utc::now(),
        };
        let view = instance.view(id);
        self.instances().insert(id, instance);
        tracing::info!(widget_id = %id, rows = view.rows.len(), "placed widget");
        view
    }

    pub fn render(&self, id: Uuid) -> Option<WidgetView> {
        self.instances().get(&id).map(|instance| instance.view(id))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn remove(&self, id: Uuid) -> bool {
        match self.instances().remove(&id) {
            Some(mut instance) => {
                instance.adapter.on_destroy();
                tracing::info!(widget_id = %id, "removed widget");
                true
            }
            None => false,
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances().len()
    }
}

impl WidgetHost for WidgetRegistry {
    fn refresh_all(&self) {
        let mut instances = self.instances();
        if instances.is_empty() {
            return;
        }
        let now = Utc::now();
        for instance in instances.values_mut() {
            instance.adapter.on_data_set_changed();
            instance.refreshed_at = now;
        }
        tracing::debug!(instances = instances.len(), "refreshed all widgets");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        storage::{BOOKS_KEY_V2, MemoryPreferences},
        widget::controller::{AdjustOutcome, WidgetController},
    };

    fn registry() -> (ReadingBooksStore, Arc<WidgetRegistry>) {
        let raw = json!([
            {"id": "b1", "title": "Dune", "author": "Herbert", "status": "reading", "progressPercent": 97},
            {"id": "b2", "title": "Emma", "status": "finished", "progressPercent": 100}
        ])
        .to_string();
        let store = ReadingBooksStore::new(Arc::new(MemoryPreferences::with_string(BOOKS_KEY_V2, &raw)));
        let registry = Arc::new(WidgetRegistry::new(store.clone(), 5));
        (store, registry)
    }

    #[test]
    fn place_render_and_remove() {
        let (_, registry) = registry();
        let view = registry.place();
        assert_eq!(view.subtitle, "1 currently reading");
        assert_eq!(view.rows[0].title, "Dune");
        assert_eq!(registry.instance_count(), 1);

        assert_eq!(registry.render(view.id).unwrap().rows, view.rows);
        assert!(registry.remove(view.id));
        assert!(!registry.remove(view.id));
        assert!(registry.render(view.id).is_none());
    }

    #[test]
    fn empty_list_has_placeholder_subtitle() {
        let store = ReadingBooksStore::new(Arc::new(MemoryPreferences::new()));
        let registry = WidgetRegistry::new(store, 5);
        let view = registry.place();
        assert_eq!(view.subtitle, "No books currently in Reading");
        assert!(view.rows.is_empty());
    }

    #[test]
    fn controller_changes_reach_every_instance() {
        let (store, registry) = registry();
        let first = registry.place();
        let second = registry.place();
        let controller = WidgetController::new(store, registry.clone());

        assert_eq!(
            controller.on_adjust_progress(Some("b1"), 5),
            AdjustOutcome::Refreshed
        );
        for id in [first.id, second.id] {
            let view = registry.render(id).unwrap();
            assert_eq!(view.rows[0].progress_percent, 100);
            assert_eq!(view.rows[0].progress_text, "100%");
            assert!(view.refreshed_at >= first.refreshed_at);
        }

        // saturated, so the instances keep their snapshot
        assert_eq!(
            controller.on_adjust_progress(Some("b1"), 5),
            AdjustOutcome::Unchanged
        );
    }

    #[test]
    fn refresh_without_instances_is_a_no_op() {
        let (_, registry) = registry();
        registry.refresh_all();
        assert_eq!(registry.instance_count(), 0);
    }
}
