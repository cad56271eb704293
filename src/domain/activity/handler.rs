use axum::{
    extract::{Query, State},
    Json,
};

#[allow(unused_imports)]
use super::dto::{ActivityLogQuery, ActivityLogResponse, SuccessActivityLogListResponse};
use super::service::ActivityService;
use crate::state::AppState;
use crate::utils::auth::GroupSession;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::{BaseResponse, ErrorResponse};

/// 활동 피드 조회 API
///
/// 그룹의 최근 활동을 최신순으로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/activity-logs",
    params(ActivityLogQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessActivityLogListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn list_activity_logs(
    State(state): State<AppState>,
    session: GroupSession,
    Query(query): Query<ActivityLogQuery>,
) -> Result<Json<BaseResponse<Vec<ActivityLogResponse>>>, AppError> {
    let logs = ActivityService::list_recent(&state.db, session.group_id, query.limit).await?;

    Ok(Json(BaseResponse::success(logs)))
}
