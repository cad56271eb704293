use std::collections::HashMap;

use sea_orm::*;
use tracing::info;

use super::board::{build_board, has_unread_cheers, BoardGoal};
use super::dto::{
    BoardResponse, CategoryTitleResponse, CategoryTitles, CheerResponse, CreateCommentRequest,
    CreateGoalRequest, CreatePlanRequest, GoalDetailResponse, GoalResponse, PlanMutationResponse,
    PlanResponse, RenameCategoryRequest, UpdateGoalRequest, UpdatePlanRequest,
};
use super::entity::goal::{self, Entity as Goal, GoalCategory, GoalType};
use super::entity::goal_comment::{self, Entity as GoalComment};
use super::entity::goal_plan::{self, Entity as GoalPlan};
use super::progress::{member_progress, plan_progress};
use crate::domain::activity::entity::activity_log::ActionType;
use crate::domain::activity::service::{message, ActivityService};
use crate::domain::member::entity::member;
use crate::domain::member::service::MemberService;
use crate::state::AppState;
use crate::utils::auth::{GroupSession, MemberSession};
use crate::utils::error::{is_unique_violation, AppError};
use crate::utils::time::now;

const UNKNOWN_NICKNAME: &str = "Unknown";

pub struct GoalService;

impl GoalService {
    // ============== 보드 / 상세 조회 ==============

    /// 멤버의 4x4 보드 조회
    pub async fn get_board(
        state: &AppState,
        session: GroupSession,
        member_id: i64,
    ) -> Result<BoardResponse, AppError> {
        let owner = MemberService::find_member_in_group(&state.db, session.group_id, member_id)
            .await?;

        let rows = Goal::find()
            .filter(goal::Column::MemberId.eq(owner.member_id))
            .order_by_asc(goal::Column::GoalId)
            .all(&state.db)
            .await?;

        let (goals, title_rows): (Vec<goal::Model>, Vec<goal::Model>) = rows
            .into_iter()
            .partition(|g| g.goal_type == GoalType::Goal);

        let mut main_title = String::new();
        let mut category_titles = CategoryTitles::default();
        for row in title_rows {
            match row.category {
                GoalCategory::Main => main_title = row.title,
                category => category_titles.set(category, row.title),
            }
        }

        let goal_ids: Vec<i64> = goals.iter().map(|g| g.goal_id).collect();
        let mut plan_counts: HashMap<i64, usize> = HashMap::new();
        let mut cheers_by_goal: HashMap<i64, Vec<goal_comment::Model>> = HashMap::new();
        if !goal_ids.is_empty() {
            let plans = GoalPlan::find()
                .filter(goal_plan::Column::GoalId.is_in(goal_ids.clone()))
                .all(&state.db)
                .await?;
            for plan in plans {
                *plan_counts.entry(plan.goal_id).or_default() += 1;
            }

            let cheers = GoalComment::find()
                .filter(goal_comment::Column::GoalId.is_in(goal_ids))
                .all(&state.db)
                .await?;
            for cheer in cheers {
                cheers_by_goal.entry(cheer.goal_id).or_default().push(cheer);
            }
        }

        let overall_progress = member_progress(goals.iter().map(|g| g.progress));

        let board_goals: Vec<BoardGoal> = goals
            .into_iter()
            .filter_map(|g| {
                let slot_index = g.slot_index?;
                let cheers = cheers_by_goal.get(&g.goal_id).map(Vec::as_slice).unwrap_or(&[]);
                Some(BoardGoal {
                    goal_id: g.goal_id,
                    category: g.category,
                    slot_index,
                    plan_count: plan_counts.get(&g.goal_id).copied().unwrap_or(0),
                    cheer_count: cheers.len(),
                    has_unread_cheers: has_unread_cheers(
                        g.member_id,
                        session.member_id,
                        g.last_viewed_at,
                        cheers.iter().map(|c| (c.member_id, &c.created_at)),
                    ),
                    title: g.title,
                    progress: g.progress,
                })
            })
            .collect();

        let cells = build_board(&board_goals, &category_titles);

        Ok(BoardResponse {
            member_id: owner.member_id,
            nickname: owner.nickname,
            main_title,
            category_titles,
            overall_progress,
            is_owner: session.member_id == Some(owner.member_id),
            cells,
        })
    }

    /// 목표 상세 (세부 계획 + 응원)
    pub async fn get_goal_detail(
        state: &AppState,
        session: GroupSession,
        goal_id: i64,
    ) -> Result<GoalDetailResponse, AppError> {
        let (goal, owner) = Self::find_goal_in_group(&state.db, session.group_id, goal_id).await?;

        let plans = GoalPlan::find()
            .filter(goal_plan::Column::GoalId.eq(goal.goal_id))
            .order_by_asc(goal_plan::Column::PlanId)
            .all(&state.db)
            .await?;

        let cheers = GoalComment::find()
            .filter(goal_comment::Column::GoalId.eq(goal.goal_id))
            .order_by_asc(goal_comment::Column::CreatedAt)
            .order_by_asc(goal_comment::Column::CommentId)
            .all(&state.db)
            .await?;

        let nicknames: HashMap<i64, String> =
            MemberService::find_group_members(&state.db, session.group_id)
                .await?
                .into_iter()
                .map(|m| (m.member_id, m.nickname))
                .collect();

        let has_unread = has_unread_cheers(
            goal.member_id,
            session.member_id,
            goal.last_viewed_at,
            cheers.iter().map(|c| (c.member_id, &c.created_at)),
        );

        let cheers = cheers
            .into_iter()
            .map(|c| {
                let nickname = nicknames
                    .get(&c.member_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NICKNAME.to_string());
                CheerResponse::from_model(c, nickname)
            })
            .collect();

        Ok(GoalDetailResponse {
            is_owner: session.member_id == Some(owner.member_id),
            has_unread_cheers: has_unread,
            owner_nickname: owner.nickname,
            goal: goal.into(),
            plans: plans.into_iter().map(PlanResponse::from).collect(),
            cheers,
        })
    }

    // ============== 목표 ==============

    /// 빈 칸에 목표 추가
    pub async fn create_goal(
        state: &AppState,
        session: MemberSession,
        req: CreateGoalRequest,
    ) -> Result<GoalResponse, AppError> {
        if !req.category.is_slotted() {
            return Err(AppError::bad_request(
                "목표는 cat1~cat4 카테고리에만 추가할 수 있습니다.",
            ));
        }
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("목표를 입력해주세요.".into()));
        }

        let author =
            MemberService::find_member_in_group(&state.db, session.group_id, session.member_id)
                .await?;

        let txn = state.db.begin().await?;

        let occupied = Goal::find()
            .filter(goal::Column::MemberId.eq(author.member_id))
            .filter(goal::Column::GoalType.eq(GoalType::Goal))
            .filter(goal::Column::Category.eq(req.category))
            .filter(goal::Column::SlotIndex.eq(req.slot_index))
            .one(&txn)
            .await?;
        if occupied.is_some() {
            return Err(AppError::GoalSlotOccupied(
                "이미 목표가 있는 칸입니다.".into(),
            ));
        }

        let timestamp = now();
        let created = goal::ActiveModel {
            member_id: Set(author.member_id),
            goal_type: Set(GoalType::Goal),
            category: Set(req.category),
            slot_index: Set(Some(req.slot_index)),
            title: Set(title),
            progress: Set(0),
            last_viewed_at: Set(None),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::GoalSlotOccupied("이미 목표가 있는 칸입니다.".into())
            } else {
                e.into()
            }
        })?;

        txn.commit().await?;

        info!(
            member_id = author.member_id,
            goal_id = created.goal_id,
            "goal created"
        );

        ActivityService::record(
            &state.db,
            session.group_id,
            &author.nickname,
            ActionType::Create,
            message::goal_created(&created.title),
        )
        .await;

        Ok(created.into())
    }

    /// 목표 제목 수정 (달성률은 세부 계획으로만 바뀜)
    pub async fn update_goal(
        state: &AppState,
        session: MemberSession,
        goal_id: i64,
        req: UpdateGoalRequest,
    ) -> Result<GoalResponse, AppError> {
        let (goal, _) = Self::find_owned_goal(&state.db, session, goal_id).await?;

        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("목표를 입력해주세요.".into()));
        }

        let mut active: goal::ActiveModel = goal.into();
        active.title = Set(title);
        active.updated_at = Set(now());
        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }

    /// 목표 삭제 (세부 계획, 응원 포함)
    pub async fn delete_goal(
        state: &AppState,
        session: MemberSession,
        goal_id: i64,
    ) -> Result<(), AppError> {
        let (goal, _) = Self::find_owned_goal(&state.db, session, goal_id).await?;

        let txn = state.db.begin().await?;

        GoalPlan::delete_many()
            .filter(goal_plan::Column::GoalId.eq(goal.goal_id))
            .exec(&txn)
            .await?;
        GoalComment::delete_many()
            .filter(goal_comment::Column::GoalId.eq(goal.goal_id))
            .exec(&txn)
            .await?;
        Goal::delete_by_id(goal.goal_id).exec(&txn).await?;

        txn.commit().await?;

        info!(goal_id = goal.goal_id, "goal deleted");
        Ok(())
    }

    /// 소유자가 목표를 열어봤음을 기록 (읽지 않은 응원 표시 해제)
    pub async fn mark_viewed(
        state: &AppState,
        session: MemberSession,
        goal_id: i64,
    ) -> Result<GoalResponse, AppError> {
        let (goal, _) = Self::find_owned_goal(&state.db, session, goal_id).await?;

        let mut active: goal::ActiveModel = goal.into();
        active.last_viewed_at = Set(Some(now()));
        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }

    /// 메인 제목 또는 카테고리 제목 변경 (없으면 생성)
    pub async fn rename_category(
        state: &AppState,
        session: MemberSession,
        category: GoalCategory,
        req: RenameCategoryRequest,
    ) -> Result<CategoryTitleResponse, AppError> {
        let owner =
            MemberService::find_member_in_group(&state.db, session.group_id, session.member_id)
                .await?;
        let title = req.title.trim().to_string();

        let txn = state.db.begin().await?;

        let existing = Goal::find()
            .filter(goal::Column::MemberId.eq(owner.member_id))
            .filter(goal::Column::GoalType.eq(GoalType::Category))
            .filter(goal::Column::Category.eq(category))
            .one(&txn)
            .await?;

        let timestamp = now();
        let saved = match existing {
            Some(row) => {
                let mut active: goal::ActiveModel = row.into();
                active.title = Set(title);
                active.updated_at = Set(timestamp);
                active.update(&txn).await?
            }
            None => {
                goal::ActiveModel {
                    member_id: Set(owner.member_id),
                    goal_type: Set(GoalType::Category),
                    category: Set(category),
                    slot_index: Set(None),
                    title: Set(title),
                    progress: Set(0),
                    last_viewed_at: Set(None),
                    created_at: Set(timestamp),
                    updated_at: Set(timestamp),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        Ok(CategoryTitleResponse {
            category: saved.category,
            title: saved.title,
        })
    }

    // ============== 세부 계획 ==============

    pub async fn add_plan(
        state: &AppState,
        session: MemberSession,
        goal_id: i64,
        req: CreatePlanRequest,
    ) -> Result<PlanMutationResponse, AppError> {
        let (goal, _) = Self::find_owned_goal(&state.db, session, goal_id).await?;
        let content = Self::normalize_plan_content(&req.content)?;

        let txn = state.db.begin().await?;

        let plan = goal_plan::ActiveModel {
            goal_id: Set(goal.goal_id),
            content: Set(content),
            is_completed: Set(false),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let progress = Self::recalculate_progress(&txn, goal).await?;

        txn.commit().await?;

        Ok(PlanMutationResponse {
            goal_id: plan.goal_id,
            plan: Some(plan.into()),
            progress: progress.current,
        })
    }

    /// 세부 계획 수정
    ///
    /// 미완료에서 완료로 바뀌면 `COMPLETE`, 목표 달성률이 100%에 도달하면 `ACHIEVEMENT`를 기록합니다.
    pub async fn update_plan(
        state: &AppState,
        session: MemberSession,
        plan_id: i64,
        req: UpdatePlanRequest,
    ) -> Result<PlanMutationResponse, AppError> {
        let plan = Self::find_plan(&state.db, plan_id).await?;
        let (goal, owner) = Self::find_owned_goal(&state.db, session, plan.goal_id).await?;
        let content = Self::normalize_plan_content(&req.content)?;

        let goal_title = goal.title.clone();
        let newly_completed = !plan.is_completed && req.is_completed;

        let txn = state.db.begin().await?;

        let mut active: goal_plan::ActiveModel = plan.into();
        active.content = Set(content);
        active.is_completed = Set(req.is_completed);
        let updated = active.update(&txn).await?;

        let progress = Self::recalculate_progress(&txn, goal).await?;

        txn.commit().await?;

        if newly_completed {
            ActivityService::record(
                &state.db,
                session.group_id,
                &owner.nickname,
                ActionType::Complete,
                message::plan_completed(&goal_title, &updated.content),
            )
            .await;
        }
        if progress.reached_full() {
            ActivityService::record(
                &state.db,
                session.group_id,
                &owner.nickname,
                ActionType::Achievement,
                message::goal_achieved(&goal_title),
            )
            .await;
        }

        Ok(PlanMutationResponse {
            goal_id: updated.goal_id,
            plan: Some(updated.into()),
            progress: progress.current,
        })
    }

    /// 세부 계획 삭제 (남은 계획이 모두 완료 상태가 되면 `ACHIEVEMENT` 기록)
    pub async fn delete_plan(
        state: &AppState,
        session: MemberSession,
        plan_id: i64,
    ) -> Result<PlanMutationResponse, AppError> {
        let plan = Self::find_plan(&state.db, plan_id).await?;
        let (goal, owner) = Self::find_owned_goal(&state.db, session, plan.goal_id).await?;
        let goal_id = goal.goal_id;
        let goal_title = goal.title.clone();

        let txn = state.db.begin().await?;

        GoalPlan::delete_by_id(plan.plan_id).exec(&txn).await?;
        let progress = Self::recalculate_progress(&txn, goal).await?;

        txn.commit().await?;

        if progress.reached_full() {
            ActivityService::record(
                &state.db,
                session.group_id,
                &owner.nickname,
                ActionType::Achievement,
                message::goal_achieved(&goal_title),
            )
            .await;
        }

        Ok(PlanMutationResponse {
            goal_id,
            plan: None,
            progress: progress.current,
        })
    }

    // ============== 응원 ==============

    /// 응원 댓글 작성 (같은 그룹 멤버 누구나)
    pub async fn add_comment(
        state: &AppState,
        session: MemberSession,
        goal_id: i64,
        req: CreateCommentRequest,
    ) -> Result<CheerResponse, AppError> {
        let (goal, owner) = Self::find_goal_in_group(&state.db, session.group_id, goal_id).await?;
        let author =
            MemberService::find_member_in_group(&state.db, session.group_id, session.member_id)
                .await?;

        let content = req.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::ValidationError("응원 메시지를 입력해주세요.".into()));
        }

        let comment = goal_comment::ActiveModel {
            goal_id: Set(goal.goal_id),
            member_id: Set(author.member_id),
            content: Set(content),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        ActivityService::record(
            &state.db,
            session.group_id,
            &author.nickname,
            ActionType::Cheer,
            message::cheered(&owner.nickname, &goal.title),
        )
        .await;

        Ok(CheerResponse::from_model(comment, author.nickname))
    }

    /// 응원 댓글 삭제 (작성자 본인만)
    pub async fn delete_comment(
        state: &AppState,
        session: MemberSession,
        comment_id: i64,
    ) -> Result<(), AppError> {
        let comment = GoalComment::find_by_id(comment_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::CommentNotFound("존재하지 않는 응원입니다.".into()))?;

        // 다른 그룹의 댓글은 존재하지 않는 것으로 취급
        Self::find_goal_in_group(&state.db, session.group_id, comment.goal_id)
            .await
            .map_err(comment_scope_error)?;

        if comment.member_id != session.member_id {
            return Err(AppError::forbidden("본인이 작성한 응원만 삭제할 수 있습니다."));
        }

        GoalComment::delete_by_id(comment.comment_id)
            .exec(&state.db)
            .await?;

        Ok(())
    }

    // ============== 내부 헬퍼 ==============

    /// 세션 그룹에 속한 GOAL 행과 그 소유자를 조회합니다.
    async fn find_goal_in_group<C>(
        db: &C,
        group_id: i64,
        goal_id: i64,
    ) -> Result<(goal::Model, member::Model), AppError>
    where
        C: ConnectionTrait,
    {
        let not_found = || AppError::GoalNotFound("존재하지 않는 목표입니다.".into());

        let goal = Goal::find_by_id(goal_id)
            .filter(goal::Column::GoalType.eq(GoalType::Goal))
            .one(db)
            .await?
            .ok_or_else(not_found)?;

        let owner = member::Entity::find_by_id(goal.member_id)
            .filter(member::Column::GroupId.eq(group_id))
            .one(db)
            .await?
            .ok_or_else(not_found)?;

        Ok((goal, owner))
    }

    /// 본인 소유 목표만 통과시킵니다.
    async fn find_owned_goal<C>(
        db: &C,
        session: MemberSession,
        goal_id: i64,
    ) -> Result<(goal::Model, member::Model), AppError>
    where
        C: ConnectionTrait,
    {
        let (goal, owner) = Self::find_goal_in_group(db, session.group_id, goal_id).await?;

        if owner.member_id != session.member_id {
            return Err(AppError::forbidden("본인의 목표만 수정할 수 있습니다."));
        }

        Ok((goal, owner))
    }

    async fn find_plan<C>(db: &C, plan_id: i64) -> Result<goal_plan::Model, AppError>
    where
        C: ConnectionTrait,
    {
        GoalPlan::find_by_id(plan_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::PlanNotFound("존재하지 않는 세부 계획입니다.".into()))
    }

    fn normalize_plan_content(content: &str) -> Result<String, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::ValidationError("세부 계획을 입력해주세요.".into()));
        }
        Ok(content.to_string())
    }

    /// 남은 세부 계획으로 달성률을 다시 계산해 목표 행에 저장합니다.
    async fn recalculate_progress<C>(db: &C, goal: goal::Model) -> Result<ProgressChange, AppError>
    where
        C: ConnectionTrait,
    {
        let plans = GoalPlan::find()
            .filter(goal_plan::Column::GoalId.eq(goal.goal_id))
            .all(db)
            .await?;
        let completed = plans.iter().filter(|p| p.is_completed).count();
        let current = plan_progress(completed, plans.len());
        let previous = goal.progress;

        let mut active: goal::ActiveModel = goal.into();
        active.progress = Set(current);
        active.updated_at = Set(now());
        active.update(db).await?;

        Ok(ProgressChange { previous, current })
    }
}

/// 댓글이 달린 목표를 찾지 못한 경우만 댓글 404로 바꾸고 나머지 에러는 그대로 전달합니다.
fn comment_scope_error(err: AppError) -> AppError {
    match err {
        AppError::GoalNotFound(_) => AppError::CommentNotFound("존재하지 않는 응원입니다.".into()),
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProgressChange {
    previous: i32,
    current: i32,
}

impl ProgressChange {
    /// 이번 변경으로 100%에 도달했는지
    fn reached_full(&self) -> bool {
        self.previous < 100 && self.current == 100
    }
}
