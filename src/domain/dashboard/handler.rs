use axum::{extract::State, Json};

#[allow(unused_imports)]
use super::dto::{DashboardResponse, SuccessDashboardResponse};
use super::service::DashboardService;
use crate::state::AppState;
use crate::utils::auth::GroupSession;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::{BaseResponse, ErrorResponse};

/// 대시보드 조회 API
///
/// 그룹 전체 달성률, 멤버별 달성률, 최근 활동 20건을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessDashboardResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: GroupSession,
) -> Result<Json<BaseResponse<DashboardResponse>>, AppError> {
    let result = DashboardService::get_dashboard(&state, session.group_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
