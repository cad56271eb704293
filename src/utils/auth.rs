use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::state::AppState;
use crate::utils::cookie::SESSION_COOKIE;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_token, Claims, TokenType};

/// 입장 코드를 통과한 세션
///
/// 그룹 토큰과 멤버 토큰 모두 허용합니다. 프로필을 선택한 경우 `member_id`가 채워집니다.
#[derive(Debug, Clone, Copy)]
pub struct GroupSession {
    pub group_id: i64,
    pub member_id: Option<i64>,
}

/// 프로필까지 선택한 세션
#[derive(Debug, Clone, Copy)]
pub struct MemberSession {
    pub group_id: i64,
    pub member_id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for GroupSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = extract_claims(parts, state)?;

        Ok(GroupSession {
            group_id: claims.group_id,
            member_id: claims.member_id(),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MemberSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = extract_claims(parts, state)?;

        if claims.token_type != TokenType::Member {
            return Err(AppError::Unauthorized("프로필을 먼저 선택해주세요.".into()));
        }

        let member_id = claims
            .member_id()
            .ok_or_else(|| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".into()))?;

        Ok(MemberSession {
            group_id: claims.group_id,
            member_id,
        })
    }
}

fn extract_claims(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    // 1. Authorization 헤더 우선, 2. 세션 쿠키
    let token = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".into()))?;

        auth_header_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("토큰 형식이 올바르지 않습니다.".into()))?
            .to_string()
    } else {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("입장 코드를 먼저 입력해주세요.".into()))?
    };

    decode_token(&token, &state.config.jwt_secret)
}
