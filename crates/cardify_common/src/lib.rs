// --- File: crates/cardify_common/src/lib.rs ---

// Declare modules within this crate
pub mod doc;       // OpenAPI documentation
pub mod models;    // Shared response models
pub mod handlers;  // HTTP request handlers
pub mod routes;    // Route definitions
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities
pub mod features;  // Feature flag handling

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    CardifyError,
    HttpStatusCode,
    Context,
    config_error,
    not_found,
    external_service_error,
};

// Re-export HTTP utilities for easier access
pub use http::client::create_client;

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export feature flag handling utilities for easier access
#[cfg(feature = "payment_methods")]
pub use features::is_payment_methods_enabled;
