use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::entity::activity_log::{self, ActionType};
use crate::utils::time::format_datetime;

/// 피드 아이콘 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Create,
    Cheer,
    Achievement,
    Update,
}

impl From<ActionType> for FeedType {
    fn from(action: ActionType) -> Self {
        match action {
            ActionType::Create => FeedType::Create,
            ActionType::Cheer => FeedType::Cheer,
            ActionType::Complete => FeedType::Achievement,
            ActionType::Achievement => FeedType::Update,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityLogQuery {
    /// 조회 개수 (기본 20, 최대 100)
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    pub log_id: i64,
    pub member_nickname: String,
    pub action_type: ActionType,
    #[serde(rename = "type")]
    pub feed_type: FeedType,
    pub message: String,
    pub created_at: String,
}

impl From<activity_log::Model> for ActivityLogResponse {
    fn from(model: activity_log::Model) -> Self {
        Self {
            log_id: model.log_id,
            member_nickname: model.member_nickname,
            action_type: model.action_type,
            feed_type: model.action_type.into(),
            message: model.target_title,
            created_at: format_datetime(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessActivityLogListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<ActivityLogResponse>,
}
