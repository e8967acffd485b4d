mod chat;
mod config;
mod error;
mod model;
mod web;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{error, info};

use chat::ChatGateway;
use config::AppConfig;
use model::HfClient;
use web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting mall assistant API");

    // Missing HF_API_TOKEN is fatal: refuse to serve anything.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e:#}");
            std::process::exit(1);
        }
    };

    let client = match HfClient::new(&config) {
        Ok(client) => {
            info!("Inference client ready for model {}", config.model_id);
            client
        }
        Err(e) => {
            error!("Failed to initialize inference client: {e}");
            std::process::exit(1);
        }
    };

    let gateway = Data::new(ChatGateway::new(Arc::new(client)));
    let bind_addr = (config.host.clone(), config.port);

    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            // Open CORS; tighten per deployment.
            .wrap(Cors::permissive())
            .app_data(gateway.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
