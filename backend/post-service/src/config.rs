/// Configuration for the post service, loaded from environment variables.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub kafka: KafkaConfig,
    pub user_service: UserServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Folder receiving uploaded post media
    pub root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    pub brokers: String,
    pub notification_topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserServiceConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("POST_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("POST_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8082),
            },
            cors: CorsConfig {
                allowed_origins: cors_origins(&app_env)?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/waggle".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            media: MediaConfig {
                root: std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media/posts".to_string()),
            },
            kafka: KafkaConfig {
                brokers: std::env::var("KAFKA_BROKERS")
                    .unwrap_or_else(|_| "localhost:9092".to_string()),
                notification_topic: std::env::var("KAFKA_NOTIFICATION_TOPIC")
                    .unwrap_or_else(|_| "notification".to_string()),
            },
            user_service: UserServiceConfig {
                base_url: std::env::var("USER_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8081".to_string()),
                timeout_ms: std::env::var("USER_CLIENT_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2_000),
                retry_attempts: std::env::var("USER_CLIENT_RETRY_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2),
            },
        })
    }
}

pub(crate) fn cors_origins(app_env: &str) -> Result<String, String> {
    let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(value) => value,
        Err(_) if app_env.eq_ignore_ascii_case("production") => {
            return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
        }
        Err(_) => "http://localhost:3000".to_string(),
    };

    if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
        return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
    }

    Ok(allowed_origins)
}
