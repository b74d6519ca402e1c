// --- File: crates/cardify_payment_methods/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardify_common::{external_service_error, CardifyError, HttpStatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graphql::GraphqlErrorMessage;

/// Payment method specific error types.
#[derive(Error, Debug)]
pub enum PaymentMethodError {
    /// The request asked for a payment method type other than virtualcard
    #[error("Creation of payment methods with type {0} not allowed")]
    UnsupportedType(String),

    /// The request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The API answered without a payment method payload
    #[error("No paymentMethod returned.")]
    MissingPaymentMethod,

    /// The API answered with a GraphQL `errors` array
    #[error("GraphQL API returned errors (Status: {status}): {errors:?}")]
    GraphqlErrors {
        status: u16,
        errors: Vec<GraphqlErrorMessage>,
    },

    /// The API answered with a single top-level `error` object
    #[error("GraphQL API error: {message} (Status: {status})")]
    ApiError { status: u16, message: String },

    /// The API answered with a non-success status and no recognisable error payload
    #[error("GraphQL API returned an unexpected response (Status: {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// Error occurred during the HTTP request to the API
    #[error("GraphQL API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API response body could not be parsed
    #[error("Failed to parse GraphQL API response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl PaymentMethodError {
    /// The single message shown to the caller.
    ///
    /// Only the first GraphQL error is surfaced; the remaining ones are logged
    /// where the failure is recorded.
    pub fn client_message(&self) -> String {
        match self {
            PaymentMethodError::GraphqlErrors { errors, .. } => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| self.to_string()),
            PaymentMethodError::ApiError { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Error body returned to API clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = "No paymentMethod returned."))]
    pub error: String,
}

/// Every failure of this endpoint is reported as a client error.
impl HttpStatusCode for PaymentMethodError {
    fn status_code(&self) -> u16 {
        400
    }
}

impl IntoResponse for PaymentMethodError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convert PaymentMethodError to CardifyError
impl From<PaymentMethodError> for CardifyError {
    fn from(err: PaymentMethodError) -> Self {
        match err {
            PaymentMethodError::UnsupportedType(_) | PaymentMethodError::InvalidBody(_) => {
                CardifyError::ValidationError(err.to_string())
            }
            PaymentMethodError::RequestError(e) => {
                CardifyError::HttpError(format!("GraphQL API request error: {}", e))
            }
            PaymentMethodError::ParseError(e) => {
                CardifyError::ParseError(format!("GraphQL API response parse error: {}", e))
            }
            other => external_service_error("GraphQL API", other.client_message()),
        }
    }
}
