// --- File: crates/cardify_payment_methods/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::logic::{CreationRequest, PaymentMethodResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::create_payment_method_handler),
    components(schemas(CreationRequest, PaymentMethodResponse, ErrorResponse)),
    tags(
        (name = "Payment Methods", description = "Virtualcard payment method creation")
    )
)]
pub struct PaymentMethodsApiDoc;
