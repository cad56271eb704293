use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::goal::{self, GoalCategory};
use super::entity::{goal_comment, goal_plan};
use crate::utils::time::format_datetime;

// ============== 요청 DTO ==============

/// 목표 추가 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    /// 목표를 넣을 카테고리 (cat1~cat4)
    pub category: GoalCategory,

    /// 카테고리 내 칸 위치 (0~2)
    #[validate(range(min = 0, max = 2, message = "slotIndex는 0~2 사이여야 합니다."))]
    pub slot_index: i32,

    #[validate(length(min = 1, max = 50, message = "목표는 1~50자여야 합니다."))]
    pub title: String,
}

/// 목표 제목 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 50, message = "목표는 1~50자여야 합니다."))]
    pub title: String,
}

/// 카테고리/메인 제목 변경 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryRequest {
    #[validate(length(max = 30, message = "제목은 30자를 초과할 수 없습니다."))]
    pub title: String,
}

/// 세부 계획 추가 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "세부 계획은 1~100자여야 합니다."))]
    pub content: String,
}

/// 세부 계획 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "세부 계획은 1~100자여야 합니다."))]
    pub content: String,
    pub is_completed: bool,
}

/// 응원 댓글 작성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 200, message = "응원 메시지는 1~200자여야 합니다."))]
    pub content: String,
}

// ============== 응답 DTO ==============

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub goal_id: i64,
    pub member_id: i64,
    pub category: GoalCategory,
    pub slot_index: Option<i32>,
    pub title: String,
    pub progress: i32,
    pub last_viewed_at: Option<String>,
}

impl From<goal::Model> for GoalResponse {
    fn from(model: goal::Model) -> Self {
        Self {
            goal_id: model.goal_id,
            member_id: model.member_id,
            category: model.category,
            slot_index: model.slot_index,
            title: model.title,
            progress: model.progress,
            last_viewed_at: model.last_viewed_at.map(format_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan_id: i64,
    pub goal_id: i64,
    pub content: String,
    pub is_completed: bool,
}

impl From<goal_plan::Model> for PlanResponse {
    fn from(model: goal_plan::Model) -> Self {
        Self {
            plan_id: model.plan_id,
            goal_id: model.goal_id,
            content: model.content,
            is_completed: model.is_completed,
        }
    }
}

/// 세부 계획 변경 결과 (재계산된 목표 달성률 포함)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanMutationResponse {
    pub goal_id: i64,
    /// 삭제 시에는 비어 있습니다.
    pub plan: Option<PlanResponse>,
    pub progress: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheerResponse {
    pub comment_id: i64,
    pub goal_id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub content: String,
    pub created_at: String,
}

impl CheerResponse {
    pub fn from_model(model: goal_comment::Model, member_nickname: String) -> Self {
        Self {
            comment_id: model.comment_id,
            goal_id: model.goal_id,
            member_id: model.member_id,
            member_nickname,
            content: model.content,
            created_at: format_datetime(model.created_at),
        }
    }
}

/// 목표 상세 (세부 계획 + 응원)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetailResponse {
    pub goal: GoalResponse,
    pub owner_nickname: String,
    pub is_owner: bool,
    pub has_unread_cheers: bool,
    pub plans: Vec<PlanResponse>,
    pub cheers: Vec<CheerResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTitleResponse {
    pub category: GoalCategory,
    pub title: String,
}

/// 카테고리 제목 (미설정 시 빈 문자열)
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct CategoryTitles {
    pub cat1: String,
    pub cat2: String,
    pub cat3: String,
    pub cat4: String,
}

impl CategoryTitles {
    pub fn get(&self, category: GoalCategory) -> &str {
        match category {
            GoalCategory::Cat1 => &self.cat1,
            GoalCategory::Cat2 => &self.cat2,
            GoalCategory::Cat3 => &self.cat3,
            GoalCategory::Cat4 => &self.cat4,
            GoalCategory::Main => "",
        }
    }

    pub fn set(&mut self, category: GoalCategory, title: String) {
        match category {
            GoalCategory::Cat1 => self.cat1 = title,
            GoalCategory::Cat2 => self.cat2 = title,
            GoalCategory::Cat3 => self.cat3 = title,
            GoalCategory::Cat4 => self.cat4 = title,
            GoalCategory::Main => {}
        }
    }
}

/// 보드 칸 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellType {
    /// 카테고리 제목 칸 (가운데 4칸)
    Category,
    Goal,
    /// 비어 있는 목표 칸
    EmptyGoal,
}

/// 4x4 보드의 한 칸
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardCell {
    /// 0~15, 행 우선
    pub index: usize,
    pub cell_type: CellType,
    pub category: GoalCategory,
    pub slot_index: Option<i32>,
    pub goal_id: Option<i64>,
    pub title: String,
    pub progress: i32,
    pub plan_count: usize,
    pub cheer_count: usize,
    pub has_unread_cheers: bool,
}

/// 멤버 보드
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub member_id: i64,
    pub nickname: String,
    pub main_title: String,
    pub category_titles: CategoryTitles,
    pub overall_progress: i32,
    /// 조회자가 보드 주인인지 여부
    pub is_owner: bool,
    pub cells: Vec<BoardCell>,
}

// --- Swagger용 래핑 DTO ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBoardResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: BoardResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessGoalResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: GoalResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessGoalDetailResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: GoalDetailResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCategoryTitleResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CategoryTitleResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessPlanMutationResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: PlanMutationResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCheerResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CheerResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_goal_request_should_reject_slot_out_of_range() {
        let req = CreateGoalRequest {
            category: GoalCategory::Cat1,
            slot_index: 3,
            title: "아침 공복 조깅 30분".into(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn create_goal_request_should_reject_empty_title() {
        let req = CreateGoalRequest {
            category: GoalCategory::Cat2,
            slot_index: 0,
            title: String::new(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn rename_category_should_allow_clearing_title() {
        let req = RenameCategoryRequest {
            title: String::new(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn should_deserialize_category_in_lowercase() {
        let req: CreateGoalRequest =
            serde_json::from_str(r#"{"category":"cat3","slotIndex":1,"title":"일기"}"#).unwrap();

        assert_eq!(req.category, GoalCategory::Cat3);
        assert_eq!(req.slot_index, 1);
    }

    #[test]
    fn board_cell_should_serialize_type_in_screaming_case() {
        let cell = BoardCell {
            index: 0,
            cell_type: CellType::EmptyGoal,
            category: GoalCategory::Cat1,
            slot_index: Some(0),
            goal_id: None,
            title: String::new(),
            progress: 0,
            plan_count: 0,
            cheer_count: 0,
            has_unread_cheers: false,
        };

        let json = serde_json::to_value(&cell).unwrap();

        assert_eq!(json["cellType"], "EMPTY_GOAL");
        assert_eq!(json["category"], "cat1");
        assert_eq!(json["slotIndex"], 0);
        assert!(json.get("hasUnreadCheers").is_some());
    }
}
