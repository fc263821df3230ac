use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_service::clients::{UserDirectory, UserServiceClient};
use post_service::handlers::{comments, likes, posts};
use post_service::kafka::EventProducer;
use post_service::services::MediaStore;
use post_service::Config;

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "post-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "post-service"
        })),
    }
}

async fn readiness_summary(
    pool: web::Data<PgPool>,
    notifier: web::Data<EventProducer>,
) -> HttpResponse {
    let postgres_ok = sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await.is_ok();
    let kafka_ok = notifier.health_check().await.is_ok();
    let ready = postgres_ok && kafka_ok;

    let response = serde_json::json!({
        "ready": ready,
        "checks": {
            "postgresql": if postgres_ok { "healthy" } else { "unhealthy" },
            "kafka": if kafka_ok { "healthy" } else { "unhealthy" },
        }
    });

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
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

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let pool = waggle_common::db::connect_pool(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("database pool: {e}")))?;

    post_service::db::ensure_schema(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("schema: {e}")))?;

    let store = MediaStore::new(&config.media.root);
    tracing::info!("Storing post media under {}", config.media.root);

    let users: Arc<dyn UserDirectory> = Arc::new(
        UserServiceClient::new(
            &config.user_service.base_url,
            Duration::from_millis(config.user_service.timeout_ms),
            config.user_service.retry_attempts,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("user client: {e}")))?,
    );
    tracing::info!("Validating users against {}", config.user_service.base_url);

    let notifier = EventProducer::new(
        &config.kafka.brokers,
        config.kafka.notification_topic.clone(),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("kafka producer: {e}")))?;
    tracing::info!(
        "Publishing notifications to topic {} via {}",
        config.kafka.notification_topic,
        config.kafka.brokers
    );

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
            .app_data(web::Data::new(users.clone()))
            .app_data(web::Data::new(notifier.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::post().to(posts::create_post))
                                    .route(web::get().to(posts::list_posts)),
                            )
                            .route("/text", web::post().to(posts::create_text_post))
                            .route("/random", web::get().to(posts::random_posts))
                            .route("/count", web::get().to(posts::post_count))
                            .route("/search", web::get().to(posts::search_posts))
                            .route("/filter", web::post().to(posts::filter_posts))
                            .route("/user/{user_id}", web::get().to(posts::user_posts))
                            .route("/friends/{user_id}", web::get().to(posts::friends_posts))
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(posts::get_post))
                                    .route(web::put().to(posts::update_post))
                                    .route(web::delete().to(posts::delete_post)),
                            )
                            .route("/{post_id}/file", web::get().to(posts::get_post_file))
                            .route("/{post_id}/block", web::put().to(posts::block_post))
                            .route("/{post_id}/unblock", web::put().to(posts::unblock_post))
                            .route(
                                "/{post_id}/comments/count",
                                web::get().to(comments::comment_count),
                            )
                            .route(
                                "/{post_id}/comments",
                                web::get().to(comments::comments_for_post),
                            )
                            .route("/{post_id}/likes/count", web::get().to(likes::like_count))
                            .route("/{post_id}/likes", web::get().to(likes::likes_for_post)),
                    )
                    .service(
                        web::scope("/comments")
                            .service(
                                web::resource("").route(web::post().to(comments::create_comment)),
                            )
                            .service(
                                web::resource("/{comment_id}")
                                    .route(web::get().to(comments::get_comment))
                                    .route(web::delete().to(comments::delete_comment)),
                            )
                            .route(
                                "/{comment_id}/block",
                                web::put().to(comments::block_comment),
                            )
                            .route(
                                "/{comment_id}/unblock",
                                web::put().to(comments::unblock_comment),
                            ),
                    )
                    .service(
                        web::scope("/likes")
                            .service(
                                web::resource("")
                                    .route(web::post().to(likes::create_like))
                                    .route(web::delete().to(likes::delete_like)),
                            )
                            .route("/check", web::get().to(likes::is_user_liked))
                            .route("/{like_id}", web::get().to(likes::get_like)),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
