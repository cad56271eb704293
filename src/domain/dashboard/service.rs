use std::collections::HashMap;

use sea_orm::*;

use super::dto::{DashboardResponse, MemberProgressResponse};
use crate::domain::activity::service::{ActivityService, DEFAULT_LOG_LIMIT};
use crate::domain::goal::entity::goal::{self, GoalType};
use crate::domain::goal::progress::{group_progress, member_progress};
use crate::domain::group::service::GroupService;
use crate::domain::member::entity::member;
use crate::domain::member::service::MemberService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct DashboardService;

impl DashboardService {
    pub async fn get_dashboard(
        state: &AppState,
        group_id: i64,
    ) -> Result<DashboardResponse, AppError> {
        let group = GroupService::find_group(&state.db, group_id).await?;
        let members = MemberService::find_group_members(&state.db, group_id).await?;

        let member_ids: Vec<i64> = members.iter().map(|m| m.member_id).collect();
        let goals = if member_ids.is_empty() {
            Vec::new()
        } else {
            goal::Entity::find()
                .filter(goal::Column::MemberId.is_in(member_ids))
                .filter(goal::Column::GoalType.eq(GoalType::Goal))
                .all(&state.db)
                .await?
        };

        let members = summarize_members(members, &goals);
        let progresses: Vec<i32> = members.iter().map(|m| m.progress).collect();

        let recent_activities =
            ActivityService::list_recent(&state.db, group_id, Some(DEFAULT_LOG_LIMIT)).await?;

        Ok(DashboardResponse {
            group_id: group.group_id,
            group_name: group.name,
            global_progress: group_progress(&progresses),
            members,
            recent_activities,
        })
    }
}

/// 멤버 표시 순서를 유지한 채 목표 달성률을 집계합니다.
fn summarize_members(
    members: Vec<member::Model>,
    goals: &[goal::Model],
) -> Vec<MemberProgressResponse> {
    let mut by_member: HashMap<i64, Vec<i32>> = HashMap::new();
    for g in goals.iter().filter(|g| g.category.is_slotted()) {
        by_member.entry(g.member_id).or_default().push(g.progress);
    }

    members
        .into_iter()
        .map(|m| {
            let progresses = by_member.remove(&m.member_id).unwrap_or_default();
            MemberProgressResponse {
                member_id: m.member_id,
                nickname: m.nickname,
                avatar_url: m.avatar_url,
                progress: member_progress(progresses.iter().copied()),
                goal_count: progresses.len(),
                achieved_goal_count: progresses.iter().filter(|&&p| p >= 100).count(),
            }
        })
        .collect()
}
