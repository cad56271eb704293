use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::member;

/// 멤버 프로필
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member_id: i64,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub order_index: i32,
}

impl From<member::Model> for MemberResponse {
    fn from(model: member::Model) -> Self {
        Self {
            member_id: model.member_id,
            nickname: model.nickname,
            avatar_url: model.avatar_url,
            order_index: model.order_index,
        }
    }
}

/// 새 구성원 추가 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    /// 닉네임 (예: 아빠, 김대리)
    #[validate(length(min = 1, max = 20, message = "닉네임은 1~20자 이내로 입력해야 합니다"))]
    pub nickname: String,

    #[validate(url(message = "유효한 URL 형식이 아닙니다."))]
    pub avatar_url: Option<String>,
}

/// 프로필 선택 결과 (선택된 멤버 + 멤버 세션 토큰)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSessionResponse {
    pub member: MemberResponse,
    pub access_token: String,
}

/// 프로필 해제 결과 (그룹 세션 토큰)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupSessionResponse {
    pub group_id: i64,
    pub access_token: String,
}

// --- Swagger용 래핑 DTO ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMemberListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<MemberResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMemberResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: MemberResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProfileSessionResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: ProfileSessionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessGroupSessionResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: GroupSessionResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_nickname_over_20_chars() {
        let req = CreateMemberRequest {
            nickname: "가".repeat(21),
            avatar_url: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_accept_korean_nickname() {
        let req = CreateMemberRequest {
            nickname: "김대리".into(),
            avatar_url: None,
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn should_reject_invalid_avatar_url() {
        let req = CreateMemberRequest {
            nickname: "아빠".into(),
            avatar_url: Some("not a url".into()),
        };

        assert!(req.validate().is_err());
    }
}
