use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::{Arc, Mutex};

use cricket_score_scraper::api::{self, AppState};
use cricket_score_scraper::ScraperConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match std::env::var("SCRAPER_CONFIG") {
        Ok(path) => match ScraperConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config from '{}': {}. Using defaults.", path, e);
                ScraperConfig::default()
            }
        },
        Err(_) => ScraperConfig::default(),
    };

    let state = web::Data::new(AppState {
        history: Arc::new(Mutex::new(Vec::new())),
    });
    let config_data = web::Data::new(config);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid number");

    log::info!("🏏 Starting Cricket Score Scraper");
    log::info!("🌐 Server running at http://{}:{}", host, port);
    log::info!("📖 Health check available at http://{}:{}/api/health", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(config_data.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(cors)
            // Score form UI
            .route("/", web::get().to(api::index))
            // API routes
            .route("/api/health", web::get().to(api::health_check))
            .route("/api/score", web::post().to(api::score_handler))
            .route("/api/history", web::get().to(api::get_history))
            .route("/api/history", web::delete().to(api::clear_history))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
