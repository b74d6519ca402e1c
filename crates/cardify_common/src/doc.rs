// --- File: crates/cardify_common/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::health_handler),
    components(schemas(HealthResponse)),
    tags(
        (name = "Cardify", description = "Core service endpoints")
    )
)]
pub struct CommonApiDoc;
