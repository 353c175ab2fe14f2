use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// How long browsers may cache a preflight response.
const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// CORS policy for the single frontend origin.
///
/// Requests from any other origin get no `Access-Control-Allow-Origin` header at all.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |request_origin: &HeaderValue, _| {
            *request_origin == origin
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

pub fn app(pool: SqlitePool, cors_origin: HeaderValue) -> Router {
    Router::new()
        // Health
        .route("/ping", get(routes::health::ping))

        // Player endpoints
        .route("/players", get(routes::players::get_players))
        .route("/players/{id}/at-bats", get(routes::players::get_player_at_bats))

        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}
