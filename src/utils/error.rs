use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};
use validator::ValidationErrors;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("잘못된 요청 형식입니다: {0}")]
    JsonParseFailed(String),
    #[error("{0}")]
    Unauthorized(String),
    /// 입장 코드 불일치
    #[error("{0}")]
    InvalidGroupPassword(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    MemberNotFound(String),
    #[error("{0}")]
    GoalNotFound(String),
    #[error("{0}")]
    PlanNotFound(String),
    #[error("{0}")]
    CommentNotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// 같은 카테고리 슬롯에 이미 목표가 존재함
    #[error("{0}")]
    GoalSlotOccupied(String),
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::InvalidGroupPassword(_) => "GROUP4011",
            AppError::Forbidden(_) => "COMMON403",
            AppError::MemberNotFound(_) => "MEMBER4041",
            AppError::GoalNotFound(_) => "GOAL4041",
            AppError::PlanNotFound(_) => "PLAN4041",
            AppError::CommentNotFound(_) => "COMMENT4041",
            AppError::Conflict(_) => "COMMON409",
            AppError::GoalSlotOccupied(_) => "GOAL4091",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::InvalidGroupPassword(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MemberNotFound(_)
            | AppError::GoalNotFound(_)
            | AppError::PlanNotFound(_)
            | AppError::CommentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::GoalSlotOccupied(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                warn!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::InternalError(format!("DB Error: {}", err))
    }
}

/// 유니크 인덱스 위반 여부
///
/// 조회 후 삽입 사이에 다른 요청이 먼저 같은 값을 넣으면 인덱스가 삽입을 거부합니다.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// 검증 실패 시 첫 번째 필드 에러 메시지를 사용합니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "입력값이 올바르지 않습니다.".to_string());
        AppError::ValidationError(message)
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_slot_conflict_to_409() {
        let err = AppError::GoalSlotOccupied("이미 목표가 있는 칸입니다.".into());

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "GOAL4091");
    }

    #[test]
    fn should_map_wrong_password_to_401() {
        let err = AppError::InvalidGroupPassword("입장 코드가 올바르지 않습니다.".into());

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "GROUP4011");
    }

    #[test]
    fn should_prefix_json_parse_message() {
        let err = AppError::JsonParseFailed("missing field".into());

        assert_eq!(err.message(), "잘못된 요청 형식입니다: missing field");
    }

    #[test]
    fn custom_db_error_should_not_count_as_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".into())));
    }

    #[test]
    fn should_wrap_db_error_as_internal() {
        let err: AppError = DbErr::Custom("boom".into()).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("boom"));
    }
}
