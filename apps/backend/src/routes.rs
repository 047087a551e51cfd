use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::connection;

/// Unstarted lobbies, ordered by id.
async fn list_lobbies(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.hub.lobbies().unstarted()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .route("/lobby/list", web::get().to(list_lobbies))
        .route("/game/websocket", web::get().to(connection::upgrade));
}
