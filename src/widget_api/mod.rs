mod models;
mod routes;
mod services;

use poem::{
    Endpoint, EndpointExt, Route,
    middleware::{Cors, Tracing as PoemTracing},
};
use poem_openapi::OpenApiService;

pub use routes::ReadingWidgetApi;

/// The full HTTP surface: API routes, rapidoc UI under `/ui`, raw spec under `/spec`.
pub fn app(api: ReadingWidgetApi, server_url: &str) -> impl Endpoint + use<> {
    let version = env!("CARGO_PKG_VERSION");
    let api_service =
        OpenApiService::new(api, "Reading Books Widget API", version).server(server_url);
    let ui = api_service.rapidoc();
    let spec = api_service.spec();
    Route::new()
        .nest("/", api_service)
        .nest("/ui", ui)
        .nest("/spec", poem::endpoint::make_sync(move |_| spec.clone()))
        .with(Cors::new())
        .with(PoemTracing)
}
