use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::activity::dto::ActivityLogResponse;

/// 멤버별 달성률
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgressResponse {
    pub member_id: i64,
    pub nickname: String,
    pub avatar_url: Option<String>,
    /// 12칸 기준 달성률
    pub progress: i32,
    pub goal_count: usize,
    /// 달성률 100%인 목표 수
    pub achieved_goal_count: usize,
}

/// 대시보드
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub group_id: i64,
    pub group_name: String,
    /// 멤버 달성률 평균, 멤버가 없으면 0
    pub global_progress: i32,
    pub members: Vec<MemberProgressResponse>,
    pub recent_activities: Vec<ActivityLogResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDashboardResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: DashboardResponse,
}
