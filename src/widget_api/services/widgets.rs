use std::sync::Arc;

use poem_openapi::payload::Json;
use uuid::Uuid;

use super::run_blocking;
use crate::{
    widget::{WidgetController, WidgetRegistry},
    widget_api::models::{
        PlaceWidgetResponseDto, RefreshResponseDto, RefreshResultDto, RemoveWidgetResponseDto,
        WidgetResponseDto,
    },
};

pub struct WidgetService<'a> {
    pub registry: &'a Arc<WidgetRegistry>,
}

impl<'a> WidgetService<'a> {
    pub fn new(registry: &'a Arc<WidgetRegistry>) -> Self {
        Self { registry }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn place(&self) -> PlaceWidgetResponseDto {
        let registry = Arc::clone(self.registry);
        match run_blocking(move || registry.place()).await {
            Ok(view) => PlaceWidgetResponseDto::Created(Json(view.into())),
            Err(e) => PlaceWidgetResponseDto::InternalError(Json(e)),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn render(&self, widget_id: Uuid) -> WidgetResponseDto {
        match self.registry.render(widget_id) {
            Some(view) => WidgetResponseDto::Ok(Json(view.into())),
            None => WidgetResponseDto::NotFound(Json(
                format!("Widget {} is not placed", widget_id).into(),
            )),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove(&self, widget_id: Uuid) -> RemoveWidgetResponseDto {
        if self.registry.remove(widget_id) {
            RemoveWidgetResponseDto::NoContent
        } else {
            RemoveWidgetResponseDto::NotFound(Json(
                format!("Widget {} is not placed", widget_id).into(),
            ))
        }
    }

    /// The host app changed the book list behind our back
    #[tracing::instrument(level = "debug", skip(self, controller))]
    pub async fn refresh(&self, controller: &Arc<WidgetController>) -> RefreshResponseDto {
        let controller = Arc::clone(controller);
        if let Err(e) = run_blocking(move || controller.on_data_changed()).await {
            return RefreshResponseDto::InternalError(Json(e));
        }
        RefreshResponseDto::Ok(Json(RefreshResultDto {
            instances: self.registry.instance_count() as i32,
        }))
    }
}
