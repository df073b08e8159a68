//! Error responses.
//!
//! # Responsibilities
//! - Map product and decoding failures to HTTP status codes
//! - Render a JSON error body clients can act on
//!
//! # Design Decisions
//! - Client mistakes are logged at debug/info, not as server faults
//! - A malformed id is 400, kept distinct from an unknown id (404)
//! - Unparsable JSON is 400; an oversized body (413) or a missing JSON
//!   content type (415) keeps the status axum assigns

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::products::{FieldViolation, ProductError, StoreError};

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

/// Failure of an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not decode product payload: {0}")]
    Decode(#[from] JsonRejection),

    #[error("invalid product id {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    Product(#[from] ProductError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(
                rejection @ (JsonRejection::MissingJsonContentType(_)
                | JsonRejection::BytesRejection(_)),
            ) => rejection.status(),
            Self::Decode(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Product(ProductError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Product(ProductError::Store(StoreError::NotFound { .. })) => {
                StatusCode::NOT_FOUND
            }
            Self::Product(ProductError::Store(StoreError::CapacityExceeded { .. })) => {
                StatusCode::INSUFFICIENT_STORAGE
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            Self::Decode(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected undecodable payload");
                ErrorBody {
                    error: "invalid product payload",
                    message,
                    details: None,
                }
            }
            Self::InvalidId(raw) => {
                tracing::debug!(id = %raw, "Rejected malformed product id");
                ErrorBody {
                    error: "invalid product id",
                    message,
                    details: None,
                }
            }
            Self::Product(ProductError::Validation(err)) => {
                tracing::debug!(error = %err, "Rejected invalid product");
                ErrorBody {
                    error: "validation failed",
                    message,
                    details: Some(err.into_violations()),
                }
            }
            Self::Product(ProductError::Store(StoreError::NotFound { id })) => {
                tracing::info!(product_id = %id, "Product not found");
                ErrorBody {
                    error: "product not found",
                    message,
                    details: None,
                }
            }
            Self::Product(ProductError::Store(StoreError::CapacityExceeded { limit })) => {
                tracing::warn!(limit, "Product store is full");
                ErrorBody {
                    error: "store full",
                    message,
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
