use axum::{http::StatusCode, response::Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct PingResponse {
    message: &'static str,
}

// GET /ping - Liveness probe, never touches the database
pub async fn ping() -> (StatusCode, Json<PingResponse>) {
    (StatusCode::OK, Json(PingResponse { message: "pong" }))
}
