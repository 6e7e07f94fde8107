use chrono::{DateTime, Utc};
use poem_openapi::{ApiResponse, Enum, Object, payload::Json};
use uuid::Uuid;

use crate::{
    domain::models::{ProgressAction, WidgetRow, WidgetView},
    widget::AdjustOutcome,
};

#[derive(Debug, Clone, Object)]
pub struct ErrorDto {
    /// Human-readable error message
    pub message: String,
}

impl From<String> for ErrorDto {
    fn from(message: String) -> Self {
        ErrorDto { message }
    }
}

/// Event a row button sends back to `/v1/widgets/adjust-progress`
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProgressActionDto {
    pub book_id: String,
    pub delta: i32,
}

impl From<ProgressAction> for ProgressActionDto {
    fn from(action: ProgressAction) -> Self {
        ProgressActionDto {
            book_id: action.book_id,
            delta: action.delta,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct WidgetRowDto {
    /// Row identity derived from the book id
    pub stable_id: i64,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub progress_percent: i32,
    pub progress_max: i32,
    pub progress_text: String,
    pub decrement: ProgressActionDto,
    pub increment: ProgressActionDto,
}

impl From<WidgetRow> for WidgetRowDto {
    fn from(row: WidgetRow) -> Self {
        WidgetRowDto {
            stable_id: row.stable_id,
            book_id: row.book_id,
            title: row.title,
            author: row.author_label,
            progress_percent: row.progress_percent.into(),
            progress_max: row.progress_max.into(),
            progress_text: row.progress_text,
            decrement: row.decrement.into(),
            increment: row.increment.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct WidgetDto {
    pub id: Uuid,
    pub subtitle: String,
    pub count: i32,
    pub rows: Vec<WidgetRowDto>,
    pub refreshed_at: DateTime<Utc>,
}

impl From<WidgetView> for WidgetDto {
    fn from(view: WidgetView) -> Self {
        WidgetDto {
            id: view.id,
            subtitle: view.subtitle,
            count: view.rows.len() as i32,
            rows: view.rows.into_iter().map(Into::into).collect(),
            refreshed_at: view.refreshed_at,
        }
    }
}

/// Both fields are optional, like the extras of a broadcast; missing values are
/// treated as blank id and zero delta.
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct AdjustProgressRequestDto {
    pub book_id: Option<String>,
    pub delta: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[oai(rename_all = "snake_case")]
pub enum AdjustOutcomeDto {
    Rejected,
    Unchanged,
    Refreshed,
}

impl From<AdjustOutcome> for AdjustOutcomeDto {
    fn from(outcome: AdjustOutcome) -> Self {
        match outcome {
            AdjustOutcome::Rejected => AdjustOutcomeDto::Rejected,
            AdjustOutcome::Unchanged => AdjustOutcomeDto::Unchanged,
            AdjustOutcome::Refreshed => AdjustOutcomeDto::Refreshed,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct AdjustProgressResultDto {
    pub changed: bool,
    pub outcome: AdjustOutcomeDto,
}

#[derive(Debug, Clone, Object)]
pub struct RefreshResultDto {
    /// Number of widget instances that were redrawn
    pub instances: i32,
}

#[derive(ApiResponse)]
pub enum WidgetResponseDto {
    /// Rendered widget
    #[oai(status = 200)]
    Ok(Json<WidgetDto>),

    /// No widget with that id is placed
    #[oai(status = 404)]
    NotFound(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum PlaceWidgetResponseDto {
    /// Widget placed and rendered
    #[oai(status = 201)]
    Created(Json<WidgetDto>),

    /// The blocking store task did not complete
    #[oai(status = 500)]
    InternalError(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum RemoveWidgetResponseDto {
    /// Widget removed
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 404)]
    NotFound(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum AdjustProgressResponseDto {
    /// Adjust event handled; `changed` tells whether anything was written
    #[oai(status = 200)]
    Ok(Json<AdjustProgressResultDto>),

    /// The blocking store task did not complete
    #[oai(status = 500)]
    InternalError(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum RefreshResponseDto {
    #[oai(status = 200)]
    Ok(Json<RefreshResultDto>),

    /// The blocking store task did not complete
    #[oai(status = 500)]
    InternalError(Json<ErrorDto>),
}
