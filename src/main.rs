use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use crop_yield::config::ServiceConfig;
use crop_yield::{build_service, ReportBackend, YieldReportService};
use handlers::{health, predict};

/// Application state shared across handlers
pub struct AppState {
    pub service: YieldReportService<ReportBackend>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let config = ServiceConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let addr = config.bind_addr();

    let service = build_service(&config).map_err(|e| {
        error!("Failed to build report backend: {}", e);
        std::io::Error::other(e)
    })?;

    let app_state = Arc::new(AppState { service });

    info!("Starting Crop Yield API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/predict", web::post().to(predict::predict_yield))
    })
    .bind(&addr)?
    .run()
    .await
}
