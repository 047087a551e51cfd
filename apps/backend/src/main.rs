use actix_web::{web, App, HttpServer};
use hearts::config::server::ServerConfig;
use hearts::middleware::StructuredLogger;
use hearts::routes;
use hearts::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let (host, port) = config.bind_addr();
    info!(%host, port, "🚀 Starting Hearts server");

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
