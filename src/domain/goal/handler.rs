use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    BoardResponse, CategoryTitleResponse, CheerResponse, CreateCommentRequest, CreateGoalRequest,
    CreatePlanRequest, GoalDetailResponse, GoalResponse, PlanMutationResponse,
    RenameCategoryRequest, SuccessBoardResponse, SuccessCategoryTitleResponse,
    SuccessCheerResponse, SuccessGoalDetailResponse, SuccessGoalResponse,
    SuccessPlanMutationResponse, UpdateGoalRequest, UpdatePlanRequest,
};
use super::entity::goal::GoalCategory;
use super::service::GoalService;
use crate::state::AppState;
use crate::utils::auth::{GroupSession, MemberSession};
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::response::SuccessEmptyResponse;
#[allow(unused_imports)]
use crate::utils::{BaseResponse, ErrorResponse};

/// 멤버 보드 조회 API
///
/// 4x4 보드의 16칸(카테고리 제목 4칸 + 목표 12칸)을 인덱스 순서로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/members/{member_id}/board",
    params(
        ("member_id" = i64, Path, description = "보드 주인 멤버 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessBoardResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 멤버", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn get_board(
    State(state): State<AppState>,
    session: GroupSession,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<BoardResponse>>, AppError> {
    let result = GoalService::get_board(&state, session, member_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 목표 상세 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/goals/{goal_id}",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessGoalDetailResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn get_goal(
    State(state): State<AppState>,
    session: GroupSession,
    Path(goal_id): Path<i64>,
) -> Result<Json<BaseResponse<GoalDetailResponse>>, AppError> {
    let result = GoalService::get_goal_detail(&state, session, goal_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 목표 추가 API
#[utoipa::path(
    post,
    path = "/api/v1/goals",
    request_body = CreateGoalRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "추가 성공", body = SuccessGoalResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 409, description = "이미 목표가 있는 칸", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn create_goal(
    State(state): State<AppState>,
    session: MemberSession,
    req: Result<Json<CreateGoalRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<GoalResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GoalService::create_goal(&state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 목표 제목 수정 API
#[utoipa::path(
    patch,
    path = "/api/v1/goals/{goal_id}",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    request_body = UpdateGoalRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "수정 성공", body = SuccessGoalResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn update_goal(
    State(state): State<AppState>,
    session: MemberSession,
    Path(goal_id): Path<i64>,
    req: Result<Json<UpdateGoalRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<GoalResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GoalService::update_goal(&state, session, goal_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 목표 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/goals/{goal_id}",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "삭제 성공", body = SuccessEmptyResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn delete_goal(
    State(state): State<AppState>,
    session: MemberSession,
    Path(goal_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    GoalService::delete_goal(&state, session, goal_id).await?;

    Ok(Json(BaseResponse::empty("목표가 삭제되었습니다.")))
}

/// 목표 열람 기록 API
///
/// 소유자가 목표를 열어본 시각을 저장해 읽지 않은 응원 표시를 해제합니다.
#[utoipa::path(
    post,
    path = "/api/v1/goals/{goal_id}/view",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "기록 성공", body = SuccessGoalResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn mark_goal_viewed(
    State(state): State<AppState>,
    session: MemberSession,
    Path(goal_id): Path<i64>,
) -> Result<Json<BaseResponse<GoalResponse>>, AppError> {
    let result = GoalService::mark_viewed(&state, session, goal_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 메인/카테고리 제목 변경 API
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category}",
    params(
        ("category" = String, Path, description = "main, cat1, cat2, cat3, cat4")
    ),
    request_body = RenameCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "변경 성공", body = SuccessCategoryTitleResponse),
        (status = 400, description = "잘못된 카테고리", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Goal"
)]
pub async fn rename_category(
    State(state): State<AppState>,
    session: MemberSession,
    Path(category): Path<String>,
    req: Result<Json<RenameCategoryRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<CategoryTitleResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let category = GoalCategory::parse(&category)
        .ok_or_else(|| AppError::bad_request("존재하지 않는 카테고리입니다."))?;

    let result = GoalService::rename_category(&state, session, category, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 세부 계획 추가 API
#[utoipa::path(
    post,
    path = "/api/v1/goals/{goal_id}/plans",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    request_body = CreatePlanRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "추가 성공", body = SuccessPlanMutationResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Plan"
)]
pub async fn add_plan(
    State(state): State<AppState>,
    session: MemberSession,
    Path(goal_id): Path<i64>,
    req: Result<Json<CreatePlanRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<PlanMutationResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GoalService::add_plan(&state, session, goal_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 세부 계획 수정 API
#[utoipa::path(
    patch,
    path = "/api/v1/plans/{plan_id}",
    params(
        ("plan_id" = i64, Path, description = "세부 계획 ID")
    ),
    request_body = UpdatePlanRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "수정 성공", body = SuccessPlanMutationResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 세부 계획", body = ErrorResponse)
    ),
    tag = "Plan"
)]
pub async fn update_plan(
    State(state): State<AppState>,
    session: MemberSession,
    Path(plan_id): Path<i64>,
    req: Result<Json<UpdatePlanRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<PlanMutationResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GoalService::update_plan(&state, session, plan_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 세부 계획 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/plans/{plan_id}",
    params(
        ("plan_id" = i64, Path, description = "세부 계획 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "삭제 성공", body = SuccessPlanMutationResponse),
        (status = 403, description = "본인 목표 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 세부 계획", body = ErrorResponse)
    ),
    tag = "Plan"
)]
pub async fn delete_plan(
    State(state): State<AppState>,
    session: MemberSession,
    Path(plan_id): Path<i64>,
) -> Result<Json<BaseResponse<PlanMutationResponse>>, AppError> {
    let result = GoalService::delete_plan(&state, session, plan_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 응원 댓글 작성 API
#[utoipa::path(
    post,
    path = "/api/v1/goals/{goal_id}/comments",
    params(
        ("goal_id" = i64, Path, description = "목표 ID")
    ),
    request_body = CreateCommentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "작성 성공", body = SuccessCheerResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 목표", body = ErrorResponse)
    ),
    tag = "Cheer"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: MemberSession,
    Path(goal_id): Path<i64>,
    req: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<CheerResponse>>, AppError> {
    let Json(req) = req?;
    req.validate()?;

    let result = GoalService::add_comment(&state, session, goal_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 응원 댓글 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "응원 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "삭제 성공", body = SuccessEmptyResponse),
        (status = 403, description = "작성자 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 응원", body = ErrorResponse)
    ),
    tag = "Cheer"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    session: MemberSession,
    Path(comment_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    GoalService::delete_comment(&state, session, comment_id).await?;

    Ok(Json(BaseResponse::empty("응원이 삭제되었습니다.")))
}
