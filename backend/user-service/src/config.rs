/// Configuration for the user service, loaded from environment variables.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
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
    /// Folder receiving uploaded profile images
    pub root: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("USER_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("USER_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8081),
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
                root: std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media/users".to_string()),
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
