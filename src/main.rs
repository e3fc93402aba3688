use actix_web::HttpServer;
use dotenvy::dotenv;
use log::info;
use srk_house::config::ServerConfig;
use srk_house::{build_app, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let server_cfg = ServerConfig::from_env();

    info!("Initializing application state...");
    let state = AppState::new(&server_cfg.database_url).await;

    info!(
        "Starting server at http://{}:{}",
        server_cfg.host, server_cfg.port
    );

    HttpServer::new(move || build_app(state.clone()))
        .bind((server_cfg.host.as_str(), server_cfg.port))?
        .run()
        .await
}
