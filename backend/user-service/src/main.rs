use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service::handlers::{complaints, friends, images, stats, users};
use user_service::services::MediaStore;
use user_service::Config;

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "user-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "user-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting user-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let pool = waggle_common::db::connect_pool(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("database pool: {e}")))?;

    user_service::db::ensure_schema(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("schema: {e}")))?;

    let store = MediaStore::new(&config.media.root);
    tracing::info!("Storing profile images under {}", config.media.root);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(store.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(users::list_users))
                            .route("/count", web::get().to(users::user_count))
                            .route("/search", web::get().to(users::search_users))
                            .route(
                                "/stats/registrations",
                                web::get().to(stats::registration_stats),
                            )
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(users::get_user))
                                    .route(web::put().to(users::update_user)),
                            )
                            .route("/{user_id}/exists", web::get().to(users::user_exists))
                            .route("/{user_id}/block", web::put().to(users::block_user))
                            .route("/{user_id}/unblock", web::put().to(users::unblock_user))
                            .service(
                                web::resource("/{user_id}/image")
                                    .route(web::post().to(images::upload_image))
                                    .route(web::get().to(images::get_image)),
                            )
                            .route("/{user_id}/friends/ids", web::get().to(friends::friend_ids))
                            .service(
                                web::resource("/{user_id}/friends/{friend_id}")
                                    .route(web::post().to(friends::add_friend))
                                    .route(web::delete().to(friends::remove_friend)),
                            ),
                    )
                    .service(
                        web::scope("/complaints")
                            .service(
                                web::resource("")
                                    .route(web::post().to(complaints::file_complaint))
                                    .route(web::get().to(complaints::list_complaints)),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
