use std::sync::Arc;

use poem_openapi::payload::Json;

use super::run_blocking;
use crate::{
    widget::WidgetController,
    widget_api::models::{
        AdjustProgressRequestDto, AdjustProgressResponseDto, AdjustProgressResultDto,
    },
};

pub struct ProgressService<'a> {
    pub controller: &'a Arc<WidgetController>,
}

impl<'a> ProgressService<'a> {
    pub fn new(controller: &'a Arc<WidgetController>) -> Self {
        Self { controller }
    }

    #[tracing::instrument(level = "debug", skip(self, req))]
    pub async fn adjust(&self, req: AdjustProgressRequestDto) -> AdjustProgressResponseDto {
        let controller = Arc::clone(self.controller);
        let book_id = req.book_id;
        let delta = req.delta.unwrap_or(0);
        let result = run_blocking(move || {
            let outcome = controller.on_adjust_progress(book_id.as_deref(), delta);
            (outcome, book_id)
        })
        .await;
        match result {
            Ok((outcome, book_id)) => {
                tracing::debug!(
                    ?outcome,
                    book_id = book_id.as_deref().unwrap_or(""),
                    "handled adjust event"
                );
                AdjustProgressResponseDto::Ok(Json(AdjustProgressResultDto {
                    changed: outcome.changed(),
                    outcome: outcome.into(),
                }))
            }
            Err(e) => AdjustProgressResponseDto::InternalError(Json(e)),
        }
    }
}
