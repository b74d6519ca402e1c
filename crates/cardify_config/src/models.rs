// --- File: crates/cardify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Website Config ---
// Public site that hosts the redeem page, loaded via CARDIFY__WEBSITE__URL or WEBSITE_URL
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebsiteConfig {
    pub url: String,
}

impl WebsiteConfig {
    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

// --- GraphQL API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GraphqlConfig {
    pub api_url: String, // e.g. https://api.example.com/graphql, or API_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags ---
    #[serde(default = "default_true")]
    pub use_payment_methods: bool,

    pub website: WebsiteConfig,
    pub graphql: GraphqlConfig,
}
