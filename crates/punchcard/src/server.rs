use crate::{app_state::AppState, config::ServeConfig, handlers};
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use migration::MigratorTrait;
use punchcard_core::rate_limit::PinRateLimiter;
use sea_orm::Database;
use std::time::Duration;

pub async fn run_server(config: ServeConfig) -> anyhow::Result<()> {
    log::info!("Starting Punchcard API Server...");

    // 1. Connect to database
    log::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    // Run migrations
    log::info!("Running database migrations...");
    migration::Migrator::up(&db, None).await?;
    log::info!("Database migrations completed");

    // 2. Create AppState
    let app_state = web::Data::new(AppState {
        db,
        rate_limiter: PinRateLimiter::new(
            config.max_pin_attempts,
            Duration::from_secs(config.pin_lockout_secs),
        ),
    });

    log::info!(
        "PIN throttle: {} attempts, {}s lockout",
        config.max_pin_attempts,
        config.pin_lockout_secs
    );

    // 3. Start HTTP server
    let bind_address = config.bind_address.clone();
    let cors_origins = config.cors_origin_list();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        // Configure CORS
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        // Add all configured origins
        for origin in &cors_origins {
            cors = cors.allowed_origin(origin);
        }

        // Define API routes
        let api_routes = web::scope("/api")
            .route("/auth/verify-pin", web::post().to(handlers::auth::verify_pin))
            .route("/auth/change-pin", web::post().to(handlers::auth::change_pin))
            .route("/admin/reset-pin", web::post().to(handlers::admin::reset_pin))
            .route("/admin/pin-status", web::get().to(handlers::admin::pin_status))
            .route("/employees", web::get().to(handlers::admin::list_employees));

        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .service(api_routes)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::ServeConfig;

    #[test]
    fn test_cors_origin_parsing() {
        let config = ServeConfig {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:8080".to_string(),
            cors_origins: "http://localhost:3000, http://example.com".to_string(),
            max_pin_attempts: 5,
            pin_lockout_secs: 300,
            log_level: "info".to_string(),
        };

        let origins = config.cors_origin_list();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
        assert_eq!(origins[1], "http://example.com");
    }
}
