// File: services/cardify_backend/src/main.rs
use axum::Router;
use cardify_common::{
    config_error, handlers::not_found_handler, logging, routes as common_routes, CardifyError,
    Context,
};
use cardify_config::load_config;
#[cfg(feature = "payment_methods")]
use cardify_payment_methods::routes as payment_methods_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CardifyError> {
    logging::init();

    let config = Arc::new(load_config().map_err(config_error)?);

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = common_routes();
        #[cfg(feature = "payment_methods")]
        {
            if cardify_common::is_payment_methods_enabled(&config) {
                router = router.merge(payment_methods_routes(config.clone())?);
            } else {
                info!("Payment methods disabled by configuration");
            }
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use cardify_common::doc::CommonApiDoc;
        #[cfg(feature = "payment_methods")]
        use cardify_payment_methods::doc::PaymentMethodsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Cardify API",
                version = "0.1.0",
                description = "Virtualcard payment method service",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)]
        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CommonApiDoc::openapi());
        #[cfg(feature = "payment_methods")]
        openapi_doc.merge(PaymentMethodsApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
