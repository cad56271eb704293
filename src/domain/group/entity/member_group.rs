use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 입장 코드로 들어가는 공유 그룹
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub group_id: i64,
    pub name: String,
    /// 입장 코드 (평문 비교)
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::member::entity::member::Entity")]
    Member,
    #[sea_orm(has_many = "crate::domain::activity::entity::activity_log::Entity")]
    ActivityLog,
}

impl Related<crate::domain::member::entity::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<crate::domain::activity::entity::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
