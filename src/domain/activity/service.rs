use sea_orm::*;
use tracing::{debug, warn};

use super::dto::ActivityLogResponse;
use super::entity::activity_log::{self, ActionType};
use crate::utils::error::AppError;
use crate::utils::time::now;

pub const DEFAULT_LOG_LIMIT: u64 = 20;
pub const MAX_LOG_LIMIT: u64 = 100;

pub struct ActivityService;

impl ActivityService {
    /// 활동 기록을 남깁니다.
    ///
    /// 기록 실패는 경고 로그만 남기고 호출한 요청을 실패시키지 않습니다.
    pub async fn record<C>(
        db: &C,
        group_id: i64,
        member_nickname: &str,
        action_type: ActionType,
        message: String,
    ) where
        C: ConnectionTrait,
    {
        let active_model = activity_log::ActiveModel {
            group_id: Set(group_id),
            member_nickname: Set(member_nickname.to_string()),
            action_type: Set(action_type),
            target_title: Set(message),
            created_at: Set(now()),
            ..Default::default()
        };

        match active_model.insert(db).await {
            Ok(log) => debug!(
                log_id = log.log_id,
                group_id = group_id,
                action = ?action_type,
                "activity recorded"
            ),
            Err(e) => warn!(
                group_id = group_id,
                action = ?action_type,
                "Failed to record activity: {}",
                e
            ),
        }
    }

    /// 그룹의 최근 활동 (최신순)
    pub async fn list_recent<C>(
        db: &C,
        group_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<ActivityLogResponse>, AppError>
    where
        C: ConnectionTrait,
    {
        let limit = clamp_limit(limit);

        let logs = activity_log::Entity::find()
            .filter(activity_log::Column::GroupId.eq(group_id))
            .order_by_desc(activity_log::Column::CreatedAt)
            .order_by_desc(activity_log::Column::LogId)
            .limit(limit)
            .all(db)
            .await?;

        Ok(logs.into_iter().map(ActivityLogResponse::from).collect())
    }
}

fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
}

/// 피드 문장
pub mod message {
    pub fn goal_created(goal_title: &str) -> String {
        format!("'{}' 목표를 추가했습니다.", goal_title)
    }

    pub fn cheered(owner_nickname: &str, goal_title: &str) -> String {
        format!(
            "{}님의 '{}' 목표에 응원 메시지를 남겼습니다.",
            owner_nickname, goal_title
        )
    }

    pub fn plan_completed(goal_title: &str, plan_content: &str) -> String {
        format!("'{}' 목표의 '{}' 를 달성했습니다!", goal_title, plan_content)
    }

    pub fn goal_achieved(goal_title: &str) -> String {
        format!("'{}' 목표를 100% 달성했습니다! 🎉", goal_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_should_default_and_clamp() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
        assert_eq!(clamp_limit(Some(5)), 5);
    }

    #[test]
    fn messages_should_quote_titles() {
        assert_eq!(
            message::goal_created("일기 쓰기"),
            "'일기 쓰기' 목표를 추가했습니다."
        );
        assert_eq!(
            message::cheered("멤버 1", "일기 쓰기"),
            "멤버 1님의 '일기 쓰기' 목표에 응원 메시지를 남겼습니다."
        );
        assert_eq!(
            message::plan_completed("독서", "1권 완독"),
            "'독서' 목표의 '1권 완독' 를 달성했습니다!"
        );
        assert!(message::goal_achieved("독서").starts_with("'독서' 목표를 100% 달성"));
    }
}
