use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::RowMappingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    /// The store could not be reached (closed pool, acquire timeout, I/O).
    #[error("Database unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Could not map row: {0}")]
    DataMapping(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Query(_) | ApiError::DataMapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => ApiError::Connection(err),

            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => ApiError::DataMapping(err.to_string()),

            other => ApiError::Query(other),
        }
    }
}

impl From<RowMappingError> for ApiError {
    fn from(err: RowMappingError) -> Self {
        ApiError::DataMapping(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_connection_failures() {
        assert!(matches!(ApiError::from(sqlx::Error::PoolClosed), ApiError::Connection(_)));
        assert!(matches!(ApiError::from(sqlx::Error::PoolTimedOut), ApiError::Connection(_)));
    }

    #[test]
    fn decode_errors_are_mapping_failures() {
        let err = sqlx::Error::ColumnNotFound("hits".to_string());
        assert!(matches!(ApiError::from(err), ApiError::DataMapping(_)));
    }

    #[test]
    fn row_not_found_is_a_query_failure() {
        assert!(matches!(ApiError::from(sqlx::Error::RowNotFound), ApiError::Query(_)));
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Connection(sqlx::Error::PoolClosed).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::DataMapping("bad".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
