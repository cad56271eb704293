use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub member_id: i64,
    pub group_id: i64,
    pub nickname: String,
    pub avatar_url: Option<String>,
    /// 그룹 내 표시 순서
    pub order_index: i32,
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
    #[sea_orm(has_many = "crate::domain::goal::entity::goal::Entity")]
    Goal,
    #[sea_orm(has_many = "crate::domain::goal::entity::goal_comment::Entity")]
    GoalComment,
}

impl Related<crate::domain::group::entity::member_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberGroup.def()
    }
}

impl Related<crate::domain::goal::entity::goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goal.def()
    }
}

impl Related<crate::domain::goal::entity::goal_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
