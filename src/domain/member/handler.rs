use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    CreateMemberRequest, MemberResponse, SuccessGroupSessionResponse, SuccessMemberListResponse,
    SuccessMemberResponse, SuccessProfileSessionResponse,
};
use super::service::MemberService;
use crate::state::AppState;
use crate::utils::auth::{GroupSession, MemberSession};
use crate::utils::cookie::{clear_session_cookie, create_session_cookie};
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::response::SuccessEmptyResponse;
#[allow(unused_imports)]
use crate::utils::{BaseResponse, ErrorResponse};

/// 멤버 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/members",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessMemberListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: GroupSession,
) -> Result<Json<BaseResponse<Vec<MemberResponse>>>, AppError> {
    let members = MemberService::list_members(&state.db, session.group_id).await?;

    Ok(Json(BaseResponse::success(members)))
}

/// 새 구성원 추가 API
///
/// 멤버를 목록 맨 뒤에 추가하고 해당 프로필로 바로 로그인합니다.
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = CreateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "추가 성공", body = SuccessProfileSessionResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 409, description = "닉네임 중복", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn create_member(
    State(state): State<AppState>,
    session: GroupSession,
    req: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = MemberService::create_member(&state, session.group_id, req).await?;
    let cookie = create_session_cookie(&result.access_token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))).into_response())
}

/// 프로필 선택 API
#[utoipa::path(
    post,
    path = "/api/v1/members/{member_id}/select",
    params(
        ("member_id" = i64, Path, description = "선택할 멤버 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "선택 성공", body = SuccessProfileSessionResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 멤버", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn select_member(
    State(state): State<AppState>,
    session: GroupSession,
    Path(member_id): Path<i64>,
) -> Result<Response, AppError> {
    let result = MemberService::select_member(&state, session.group_id, member_id).await?;
    let cookie = create_session_cookie(&result.access_token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))).into_response())
}

/// 내 프로필 조회 API
///
/// 선택했던 멤버가 사라졌다면 404를 반환하며, 클라이언트는 프로필 선택 화면으로 돌아갑니다.
#[utoipa::path(
    get,
    path = "/api/v1/members/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessMemberResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 멤버", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn get_me(
    State(state): State<AppState>,
    session: MemberSession,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let result = MemberService::get_me(&state, session.group_id, session.member_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로필 전환 API
///
/// 선택한 프로필을 해제하고 그룹 세션만 남깁니다.
#[utoipa::path(
    delete,
    path = "/api/v1/session/profile",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "해제 성공", body = SuccessGroupSessionResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn clear_profile(
    State(state): State<AppState>,
    session: GroupSession,
) -> Result<Response, AppError> {
    let result = MemberService::clear_profile(&state, session.group_id)?;
    let cookie = create_session_cookie(&result.access_token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))).into_response())
}

/// 로그아웃 API
///
/// 세션 쿠키를 만료시킵니다. 입장 코드를 다시 입력해야 합니다.
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    responses(
        (status = 200, description = "로그아웃 성공", body = SuccessEmptyResponse)
    ),
    tag = "Member"
)]
pub async fn logout() -> Result<Response, AppError> {
    let cookie = clear_session_cookie()?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(BaseResponse::empty("로그아웃되었습니다.")),
    )
        .into_response())
}
