use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use snafu::Snafu;

use crate::counter::CounterError;
use crate::model::SlugError;
use crate::Located as _;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ApiError {
    /// the requested slug cannot be used as a document key
    #[snafu(display("{source}"))]
    InvalidSlug { source: SlugError },

    /// the counter operation failed against the store
    #[snafu(display("{source}"))]
    Counter { source: CounterError },

    /// no post is currently marked as featured
    #[snafu(display("no post is currently featured"))]
    NoFeaturedPost,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSlug { .. } => StatusCode::BAD_REQUEST,
            ApiError::Counter { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoFeaturedPost => StatusCode::NOT_FOUND,
        }
    }
}

/// Error envelope the front-end expects: a flag plus the failure message.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Counter { source } = &self {
            tracing::error!(location = %source.location(), error = %source, "store access failed");
        }

        let body = Json(ErrorEnvelope {
            error: true,
            message: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}
