use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::Path,
    payload::{Json, PlainText},
};
use uuid::Uuid;

use super::models::{
    AdjustProgressRequestDto, AdjustProgressResponseDto, PlaceWidgetResponseDto,
    RefreshResponseDto, RemoveWidgetResponseDto, WidgetResponseDto,
};
use super::services::{health::HealthService, progress::ProgressService, widgets::WidgetService};
use crate::{
    config::Config,
    widget::{WidgetController, WidgetRegistry},
};

pub struct ReadingWidgetApi {
    pub registry: Arc<WidgetRegistry>,
    pub controller: Arc<WidgetController>,
    pub config: Arc<Config>,
}

#[OpenApi]
impl ReadingWidgetApi {
    #[oai(path = "/health", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn health(&self) -> PlainText<String> {
        HealthService::new(&self.registry, &self.config)
            .status_text()
            .await
    }

    /// Place a new widget instance and render it
    #[oai(path = "/v1/widgets", method = "post")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn place_widget(&self) -> PlaceWidgetResponseDto {
        WidgetService::new(&self.registry).place().await
    }

    /// Current rows of a placed widget
    #[oai(path = "/v1/widgets/:widget_id", method = "get")]
    #[tracing::instrument(level = "debug", skip(self, widget_id))]
    async fn render_widget(&self, widget_id: Path<Uuid>) -> WidgetResponseDto {
        WidgetService::new(&self.registry).render(widget_id.0).await
    }

    /// Remove a placed widget
    #[oai(path = "/v1/widgets/:widget_id", method = "delete")]
    #[tracing::instrument(level = "debug", skip(self, widget_id))]
    async fn remove_widget(&self, widget_id: Path<Uuid>) -> RemoveWidgetResponseDto {
        WidgetService::new(&self.registry).remove(widget_id.0).await
    }

    /// Signal that the book list changed outside the widget
    #[oai(path = "/v1/widgets/refresh", method = "post")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn refresh_widgets(&self) -> RefreshResponseDto {
        WidgetService::new(&self.registry)
            .refresh(&self.controller)
            .await
    }

    /// Row button tap: move a book's progress by `delta`
    #[oai(path = "/v1/widgets/adjust-progress", method = "post")]
    #[tracing::instrument(level = "debug", skip(self, body))]
    async fn adjust_progress(
        &self,
        body: Json<AdjustProgressRequestDto>,
    ) -> AdjustProgressResponseDto {
        ProgressService::new(&self.controller).adjust(body.0).await
    }
}
