use std::net::SocketAddr;

use fandalart::config::{establish_connection, AppConfig};
use fandalart::domain::health::init_start_time;
use fandalart::shutdown::shutdown_signal;
use fandalart::utils::logging::init_logging;
use fandalart::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();
    init_start_time();

    // 2. 설정 및 로깅 초기화
    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config.log_dir);

    // 3. 데이터베이스 연결
    let db = establish_connection(&config).await?;

    // 4. 라우터 설정
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = create_router(AppState { db, config });

    // 5. 서버 실행
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}
