use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// 세션 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// 입장 코드만 통과한 상태
    Group,
    /// 프로필까지 선택한 상태
    Member,
}

/// JWT Claims 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (Member ID, 프로필 미선택 시 빈 문자열)
    pub sub: String,
    /// 입장한 그룹 ID
    pub group_id: i64,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    pub token_type: TokenType,
}

impl Claims {
    pub fn member_id(&self) -> Option<i64> {
        match self.token_type {
            TokenType::Member => self.sub.parse().ok(),
            TokenType::Group => None,
        }
    }
}

fn encode_claims(
    sub: String,
    group_id: i64,
    token_type: TokenType,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::InternalError("Invalid token expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub,
        group_id,
        iat: now.timestamp() as usize,
        exp: expiration,
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// 그룹 입장 토큰 생성
pub fn encode_group_token(
    group_id: i64,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_claims(
        String::new(),
        group_id,
        TokenType::Group,
        secret,
        expiration_seconds,
    )
}

/// 프로필 선택 토큰 생성
pub fn encode_member_token(
    group_id: i64,
    member_id: i64,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_claims(
        member_id.to_string(),
        group_id,
        TokenType::Member,
        secret,
        expiration_seconds,
    )
}

/// JWT 토큰 검증
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("세션이 만료되었습니다. 입장 코드를 다시 입력해주세요.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 토큰입니다.".into()),
    })
}
