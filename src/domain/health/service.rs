use std::sync::OnceLock;
use std::time::{Duration, Instant};

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};

static START_TIME: OnceLock<Instant> = OnceLock::new();

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// 이 이상 걸리면 Degraded
const DEGRADED_THRESHOLD: Duration = Duration::from_millis(500);

/// 서버 시작 시 한 번 호출합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub async fn check_health(db: &DatabaseConnection) -> HealthStatus {
    let database = check_database(db).await;

    HealthStatus {
        status: determine_health_state(&database),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
        checks: HealthChecks { database },
    }
}

fn determine_health_state(check: &CheckResult) -> HealthState {
    if !check.status {
        return HealthState::Unhealthy;
    }

    match check.latency_ms {
        Some(latency) if latency >= DEGRADED_THRESHOLD.as_millis() as u64 => HealthState::Degraded,
        _ => HealthState::Healthy,
    }
}

/// `SELECT 1` 왕복 시간 측정
async fn check_database(db: &DatabaseConnection) -> CheckResult {
    let start = Instant::now();
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1");

    let result = timeout(DB_CHECK_TIMEOUT, db.execute(stmt)).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(_)) => CheckResult::success(latency_ms),
        Ok(Err(e)) => {
            tracing::warn!(latency_ms, error = %e, "Database health check failed");
            CheckResult::failure(latency_ms, e.to_string())
        }
        Err(_) => {
            tracing::warn!("Database health check timed out");
            CheckResult::timeout(DB_CHECK_TIMEOUT.as_millis() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_start_time_should_set_once() {
        init_start_time();
        let first = START_TIME.get().copied();

        init_start_time();

        assert_eq!(first, START_TIME.get().copied());
    }

    #[test]
    fn fast_success_should_be_healthy() {
        assert_eq!(
            determine_health_state(&CheckResult::success(499)),
            HealthState::Healthy
        );
    }

    #[test]
    fn slow_success_should_be_degraded() {
        assert_eq!(
            determine_health_state(&CheckResult::success(500)),
            HealthState::Degraded
        );
    }

    #[test]
    fn failure_or_timeout_should_be_unhealthy() {
        assert_eq!(
            determine_health_state(&CheckResult::failure(1, "down".into())),
            HealthState::Unhealthy
        );
        assert_eq!(
            determine_health_state(&CheckResult::timeout(3000)),
            HealthState::Unhealthy
        );
    }
}
