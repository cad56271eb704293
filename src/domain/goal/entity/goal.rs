use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 목표 행 종류
///
/// `CATEGORY` 행은 메인 목표(`main`) 또는 카테고리(cat1~cat4)의 제목만 보관합니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    #[sea_orm(string_value = "GOAL")]
    Goal,
    #[sea_orm(string_value = "CATEGORY")]
    Category,
}

/// 만다라트 영역
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    #[sea_orm(string_value = "main")]
    Main,
    #[sea_orm(string_value = "cat1")]
    Cat1,
    #[sea_orm(string_value = "cat2")]
    Cat2,
    #[sea_orm(string_value = "cat3")]
    Cat3,
    #[sea_orm(string_value = "cat4")]
    Cat4,
}

impl GoalCategory {
    pub fn is_slotted(self) -> bool {
        !matches!(self, GoalCategory::Main)
    }

    /// 경로 파라미터(`main`, `cat1`~`cat4`) 파싱
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main" => Some(GoalCategory::Main),
            "cat1" => Some(GoalCategory::Cat1),
            "cat2" => Some(GoalCategory::Cat2),
            "cat3" => Some(GoalCategory::Cat3),
            "cat4" => Some(GoalCategory::Cat4),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub goal_id: i64,
    /// 소유 멤버
    pub member_id: i64,
    pub goal_type: GoalType,
    pub category: GoalCategory,
    /// 카테고리 내 위치 (0~2), CATEGORY 행은 NULL
    pub slot_index: Option<i32>,
    pub title: String,
    /// 세부 계획 달성률 (0~100), 계획 변경 시마다 재계산
    pub progress: i32,
    /// 소유자가 마지막으로 목표를 열어본 시각
    pub last_viewed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::member::entity::member::Entity",
        from = "Column::MemberId",
        to = "crate::domain::member::entity::member::Column::MemberId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Member,
    #[sea_orm(has_many = "super::goal_plan::Entity")]
    GoalPlan,
    #[sea_orm(has_many = "super::goal_comment::Entity")]
    GoalComment,
}

impl Related<crate::domain::member::entity::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::goal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalPlan.def()
    }
}

impl Related<super::goal_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
