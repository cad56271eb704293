use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    EnterGroupRequest, EnterGroupResponse, GroupInfoResponse, SuccessEnterGroupResponse,
    SuccessGroupInfoResponse,
};
use super::service::GroupService;
use crate::state::AppState;
use crate::utils::auth::GroupSession;
use crate::utils::cookie::create_session_cookie;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::{BaseResponse, ErrorResponse};

/// 그룹 입장 API
///
/// 입장 코드가 일치하는 그룹의 세션 토큰을 발급하고 프로필 선택용 멤버 목록을 반환합니다.
#[utoipa::path(
    post,
    path = "/api/v1/groups/enter",
    request_body = EnterGroupRequest,
    responses(
        (status = 200, description = "입장 성공", body = SuccessEnterGroupResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "입장 코드 불일치", body = ErrorResponse)
    ),
    tag = "Group"
)]
pub async fn enter_group(
    State(state): State<AppState>,
    req: Result<Json<EnterGroupRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GroupService::enter(&state, req).await?;
    let cookie = create_session_cookie(&result.access_token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))).into_response())
}

/// 현재 그룹 정보 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/groups/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessGroupInfoResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Group"
)]
pub async fn get_my_group(
    State(state): State<AppState>,
    session: GroupSession,
) -> Result<Json<BaseResponse<GroupInfoResponse>>, AppError> {
    let result = GroupService::get_info(&state, session.group_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
