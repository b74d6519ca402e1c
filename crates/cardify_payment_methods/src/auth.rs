// --- File: crates/cardify_payment_methods/src/auth.rs ---

use axum::{
    body::Body as AxumBody,
    extract::Query,
    http::Request,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::trace;

pub const API_KEY_HEADER: &str = "Api-Key";

/// API key of the caller, as carried on the request.
///
/// The key is forwarded to the GraphQL API untouched; authorisation happens there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiKey(pub Option<String>);

#[derive(Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Reads the API key from the `Api-Key` header or the `api_key` query
/// parameter and stores it in the request extensions.
///
/// Never rejects a request; a missing key is stored as `ApiKey(None)`.
pub async fn api_key_middleware(mut req: Request<AxumBody>, next: Next) -> Response {
    let from_header = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let api_key = from_header
        .or_else(|| {
            Query::<ApiKeyQuery>::try_from_uri(req.uri())
                .ok()
                .and_then(|Query(q)| q.api_key)
        })
        .filter(|key| !key.is_empty());

    trace!(present = api_key.is_some(), "API key extracted");
    req.extensions_mut().insert(ApiKey(api_key));
    next.run(req).await
}
