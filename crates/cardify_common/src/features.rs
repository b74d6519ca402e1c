//! Feature flag handling for the Cardify application.
//!
//! Features are switched twice: at compile time through cargo features
//! (`payment_methods`, `openapi`) and at runtime through `use_*` flags in the
//! configuration. A feature's routes are mounted only when both agree.

#[cfg(feature = "payment_methods")]
use cardify_config::AppConfig;

/// Check if the payment methods feature is enabled at runtime.
///
/// Needs `use_payment_methods` and a GraphQL API URL to talk to.
#[cfg(feature = "payment_methods")]
pub fn is_payment_methods_enabled(config: &AppConfig) -> bool {
    config.use_payment_methods && !config.graphql.api_url.trim().is_empty()
}
