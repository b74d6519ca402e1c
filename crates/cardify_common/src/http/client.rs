// --- File: crates/cardify_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a new HTTP client for outbound API calls.
///
/// The timeout is the only one applied to outbound requests; callers do not
/// override it per request.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("cardify/", env!("CARGO_PKG_VERSION")))
        .build()
}
