// src/bin/api_server.rs

use ip_registration_portal::infra::config;
use ip_registration_portal::transport;
use ip_registration_portal::{telemetry, RegistrationService, Settings};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    // --- Configuration ---
    info!("> Loading configuration...");
    let settings = Settings::from_env()?;
    info!(
        "> Form variant: {} | contract: 0x{} | pinning: {}",
        settings.form_variant,
        hex::encode(settings.contract_address.as_bytes()),
        settings.pinata_api_url
    );
    if settings.wallet_address.is_none() {
        info!("> WALLET_ADDRESS not set; the provider's first account will be used.");
    }

    // --- Service Initialization ---
    let registration = RegistrationService::from_settings(&settings);
    let app_state = transport::http::AppState { registration };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::api_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("> Registration form available at http://{}/", bind_addr);
    info!("> Swagger UI available at http://{}/swagger-ui", bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            // In-flight submissions are dropped; nothing local needs flushing.
            warn!("> Shutdown signal received (Ctrl+C), stopping.");
        }
    }

    Ok(())
}
