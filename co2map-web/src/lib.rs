pub mod cities_handler;
mod city_json;
pub mod estimate_handler;

use std::sync::Arc;

use axum::routing::get;
use axum::{AddExtensionLayer, Router};
use tower_http::cors::{any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_log::LogTracer;

use co2map_core::cities_db::CitiesDb;

/// Register a subscriber as global default to process span data.
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

pub fn init_logging(log_level: tracing::Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_max_level(LevelFilter::from_level(log_level))
        .finish();
    init_subscriber(subscriber);
}

pub async fn landing_handler() -> &'static str {
    "CO₂ Map API is running"
}

/// Build the service router around an immutable city collection.
pub fn make_app(db: Arc<CitiesDb>) -> Router {
    // The dataset fronts a browser map UI, so stay permissive on CORS.
    let cors = CorsLayer::new().allow_origin(any()).allow_methods(any());
    Router::new()
        .route("/", get(landing_handler))
        .route("/api/cities", get(cities_handler::list_handler))
        .route("/api/city/:name", get(cities_handler::fetch_handler))
        .route("/api/city-schema", get(cities_handler::fetch_schema_handler))
        .route("/estimate", get(estimate_handler::estimate_handler))
        .route(
            "/estimate-schema",
            get(estimate_handler::estimate_schema_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(AddExtensionLayer::new(db))
}
