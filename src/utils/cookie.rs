use axum::http::HeaderValue;

use crate::utils::error::AppError;

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "fandalart_session";

fn build_cookie(name: &str, value: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age_seconds
    );
    HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::InternalError(format!("Invalid {} cookie value", name)))
}

/// 세션 토큰 쿠키 생성
pub fn create_session_cookie(token: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    build_cookie(SESSION_COOKIE, token, max_age_seconds)
}

/// 세션 쿠키 삭제 (만료 처리)
pub fn clear_session_cookie() -> Result<HeaderValue, AppError> {
    build_cookie(SESSION_COOKIE, "", 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_should_be_http_only() {
        let cookie = create_session_cookie("abc", 60).unwrap();
        let value = cookie.to_str().unwrap();

        assert!(value.starts_with("fandalart_session=abc;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=60"));
    }

    #[test]
    fn cleared_cookie_should_expire_immediately() {
        let cookie = clear_session_cookie().unwrap();

        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
    }
}
