use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::AppState;
use crop_yield::models::HealthResponse;
use crop_yield::ReportGenerator;

/// Health check endpoint
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let model = state.service.model();
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: model.is_trained(),
        model_backend: model.name().to_string(),
        report_backend: state.service.generator().name().to_string(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crop_yield::report::OfflineReportGenerator;
    use crop_yield::{FallbackYieldModel, ReportBackend, SoilSuitabilityTable, YieldReportService};

    #[actix_web::test]
    async fn test_health_reports_backends() {
        let state = Arc::new(AppState {
            service: YieldReportService::new(
                Box::new(FallbackYieldModel::new()),
                SoilSuitabilityTable::standard(),
                ReportBackend::Offline(OfflineReportGenerator),
            ),
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ok");
        assert!(!body.model_loaded);
        assert_eq!(body.model_backend, "fallback");
        assert_eq!(body.report_backend, "offline");
    }
}
