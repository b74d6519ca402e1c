// --- File: crates/cardify_payment_methods/src/routes.rs ---

use axum::{middleware, routing::post, Router};
use cardify_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::auth::api_key_middleware;
use crate::error::PaymentMethodError;
use crate::graphql::{GraphqlClient, PaymentMethodsApi};
use crate::handlers::{create_payment_method_handler, PaymentMethodsState};

/// Creates a router containing all routes for the payment methods feature,
/// talking to the GraphQL API configured in `config.graphql`.
///
/// # Errors
/// Fails when the outbound HTTP client cannot be built.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, PaymentMethodError> {
    let client = GraphqlClient::from_config(&config.graphql)?;
    info!(
        "💡 Payment methods: GraphQL API at {}",
        config.graphql.api_url
    );
    Ok(routes_with_api(config, Arc::new(client)))
}

/// Same as [`routes`] with a caller-supplied API implementation.
pub fn routes_with_api(config: Arc<AppConfig>, api: Arc<dyn PaymentMethodsApi>) -> Router {
    let state = Arc::new(PaymentMethodsState { config, api });

    Router::new()
        .route("/payment-methods", post(create_payment_method_handler))
        .layer(middleware::from_fn(api_key_middleware))
        .with_state(state)
}
