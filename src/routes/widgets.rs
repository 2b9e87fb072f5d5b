use actix_web::{web, HttpResponse, Responder};
use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/weather", web::get().to(weather))
        .route("/currency", web::get().to(currency));
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Current conditions for the featured cities
///
/// GET /api/weather
///
/// Always answers 200; cities whose lookup failed carry placeholder readings.
async fn weather(state: web::Data<AppState>) -> impl Responder {
    let reports = state.widgets.weather().await;
    HttpResponse::Ok().json(reports)
}

/// USD to riel exchange rate
///
/// GET /api/currency
async fn currency(state: web::Data<AppState>) -> impl Responder {
    let rate = state.widgets.exchange_rate().await;
    HttpResponse::Ok().json(rate)
}
