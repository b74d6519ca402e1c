// --- File: crates/cardify_payment_methods/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    Extension,
};
use cardify_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::auth::ApiKey;
use crate::error::PaymentMethodError;
use crate::graphql::PaymentMethodsApi;
use crate::logic::{create_payment_method, CreationRequest, PaymentMethodResponse};

// --- State for Payment Method Handlers ---
#[derive(Clone)]
pub struct PaymentMethodsState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn PaymentMethodsApi>,
}

/// Axum handler to create a virtualcard payment method.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payment-methods", // Path relative to /api
    request_body = CreationRequest,
    params(
        ("Api-Key" = Option<String>, Header, description = "API key forwarded to the GraphQL API"),
        ("api_key" = Option<String>, Query, description = "Alternative to the Api-Key header")
    ),
    responses(
        (status = 200, description = "Payment method created", body = PaymentMethodResponse),
        (status = 400, description = "Validation or GraphQL API error", body = crate::error::ErrorResponse)
    ),
    tag = "Payment Methods"
))]
pub async fn create_payment_method_handler(
    State(state): State<Arc<PaymentMethodsState>>,
    Extension(ApiKey(api_key)): Extension<ApiKey>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PaymentMethodResponse>, PaymentMethodError> {
    let request = payload
        .map_err(|rejection| PaymentMethodError::InvalidBody(rejection.body_text()))
        .and_then(|Json(body)| CreationRequest::from_body(body))
        .inspect_err(|e| warn!("Rejected payment method request body: {}", e))?;

    let response = create_payment_method(
        state.api.as_ref(),
        state.config.website.base_url(),
        request,
        api_key,
    )
    .await?;

    Ok(Json(response))
}
