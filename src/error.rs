//! API error taxonomy and HTTP mapping.
//!
//! Every handler returns `ApiResult<T>`; errors serialize as
//! `{"message": "..."}` bodies. Internal failures are logged and masked.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A referenced product could not be resolved during order creation.
    /// Covers both a genuinely missing product and a catalog outage; either
    /// way the order is rejected naming the product.
    #[error("product {0} not found or unavailable")]
    ProductUnavailable(String),

    #[error("order not found")]
    OrderNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ProductUnavailable(_) | ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::OrderNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
