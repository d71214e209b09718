//! Mapping of discovery errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookblurb_core::DiscoveryError;
use serde::Serialize;
use tracing::{error, warn};

/// Error body, `{"detail": <message>}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// A discovery failure on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub DiscoveryError);

impl From<DiscoveryError> for ApiError {
    fn from(e: DiscoveryError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DiscoveryError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DiscoveryError::Catalog(_) => StatusCode::BAD_GATEWAY,
            DiscoveryError::Teaser(_) | DiscoveryError::Cache(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.0.to_string();

        match &self.0 {
            DiscoveryError::InvalidInput(_) => {}
            DiscoveryError::Catalog(_) => warn!("Upstream catalog error: {}", detail),
            DiscoveryError::Teaser(_) | DiscoveryError::Cache(_) => {
                error!("Request failed: {}", detail)
            }
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
