pub mod health;
pub mod progress;
pub mod widgets;

use crate::widget_api::models::ErrorDto;

/// Store and registry calls read and rewrite the preference file, so they run
/// on the blocking pool rather than on the async workers.
pub async fn run_blocking<T, F>(work: F) -> Result<T, ErrorDto>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!(error = %e, "blocking widget task failed");
        format!("Widget task failed: {}", e).into()
    })
}
