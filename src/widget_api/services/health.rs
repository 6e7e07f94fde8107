use poem_openapi::payload::PlainText;

use crate::{config::Config, widget::WidgetRegistry};

pub struct HealthService<'a> {
    pub registry: &'a WidgetRegistry,
    pub config: &'a Config,
}

impl<'a> HealthService<'a> {
    pub fn new(registry: &'a WidgetRegistry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn status_text(&self) -> PlainText<String> {
        PlainText(format!(
            "reading widget host ok widgets={} preferences={}",
            self.registry.instance_count(),
            self.config.preferences_path.display()
        ))
    }
}
