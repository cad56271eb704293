use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 활동 기록 종류
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// 목표 추가
    #[sea_orm(string_value = "CREATE")]
    Create,
    /// 응원 댓글
    #[sea_orm(string_value = "CHEER")]
    Cheer,
    /// 세부 계획 달성
    #[sea_orm(string_value = "COMPLETE")]
    Complete,
    /// 목표 100% 달성
    #[sea_orm(string_value = "ACHIEVEMENT")]
    Achievement,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub log_id: i64,
    pub group_id: i64,
    /// 기록 시점의 닉네임 (멤버 삭제와 무관하게 유지)
    pub member_nickname: String,
    pub action_type: ActionType,
    /// 피드에 그대로 노출되는 문장
    pub target_title: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::group::entity::member_group::Entity",
        from = "Column::GroupId",
        to = "crate::domain::group::entity::member_group::Column::GroupId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MemberGroup,
}

impl Related<crate::domain::group::entity::member_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
