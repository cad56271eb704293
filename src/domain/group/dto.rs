use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::member::dto::MemberResponse;

/// 그룹 입장 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnterGroupRequest {
    /// 공유받은 입장 코드
    #[validate(length(min = 1, max = 20, message = "입장 코드를 입력해주세요."))]
    pub password: String,
}

/// 그룹 입장 응답
///
/// 세션 토큰은 쿠키로도 전달됩니다.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnterGroupResponse {
    pub group_id: i64,
    pub group_name: String,
    pub access_token: String,
    /// 프로필 선택 화면에 표시할 멤버 (표시 순서)
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfoResponse {
    pub group_id: i64,
    pub group_name: String,
    pub member_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnterGroupResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: EnterGroupResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessGroupInfoResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: GroupInfoResponse,
}
