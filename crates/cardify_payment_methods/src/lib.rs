// --- File: crates/cardify_payment_methods/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod doc;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod logic;
pub mod routes;

// Re-export for main backend
pub use error::PaymentMethodError;
pub use graphql::{GraphqlClient, PaymentMethodsApi};
pub use logic::{CreationRequest, PaymentMethodResponse};
pub use routes::{routes, routes_with_api};
