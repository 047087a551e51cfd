use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    sessions: usize,
    lobbies: usize,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let hub = &app_state.hub;
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        sessions: hub.sessions().len(),
        lobbies: hub.lobbies().len(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
