use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// 세션 토큰 만료 시간 (초)
    pub jwt_expiration: i64,
    /// 기동 시 엔티티 기준 스키마 동기화 여부
    pub db_schema_update: bool,
    pub log_dir: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration)?;

        let db_schema_update = env::var("DB_SCHEMA_UPDATE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
                );
                false
            });

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            jwt_expiration,
            db_schema_update,
            log_dir,
        })
    }

    /// 테스트용 설정
    pub fn for_test(database_url: impl Into<String>) -> Self {
        Self {
            server_port: 0,
            database_url: database_url.into(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            db_schema_update: true,
            log_dir: "logs".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
}
