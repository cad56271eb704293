use sea_orm::*;
use tracing::info;

use super::dto::{EnterGroupRequest, EnterGroupResponse, GroupInfoResponse};
use super::entity::member_group::{self, Entity as MemberGroup};
use crate::domain::member::entity::member;
use crate::domain::member::service::MemberService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_group_token;

pub struct GroupService;

impl GroupService {
    /// 입장 코드로 그룹에 입장합니다.
    ///
    /// 입장 코드는 평문 그대로 비교합니다.
    pub async fn enter(
        state: &AppState,
        req: EnterGroupRequest,
    ) -> Result<EnterGroupResponse, AppError> {
        let group = MemberGroup::find()
            .filter(member_group::Column::Password.eq(req.password.as_str()))
            .order_by_asc(member_group::Column::GroupId)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::InvalidGroupPassword("입장 코드가 올바르지 않습니다.".into())
            })?;

        let access_token = encode_group_token(
            group.group_id,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        let members = MemberService::list_members(&state.db, group.group_id).await?;

        info!(group_id = group.group_id, "group entered");

        Ok(EnterGroupResponse {
            group_id: group.group_id,
            group_name: group.name,
            access_token,
            members,
        })
    }

    pub async fn get_info(state: &AppState, group_id: i64) -> Result<GroupInfoResponse, AppError> {
        let group = Self::find_group(&state.db, group_id).await?;

        let member_count = member::Entity::find()
            .filter(member::Column::GroupId.eq(group_id))
            .count(&state.db)
            .await?;

        Ok(GroupInfoResponse {
            group_id: group.group_id,
            group_name: group.name,
            member_count,
        })
    }

    /// 세션의 그룹이 삭제된 경우 세션을 무효로 봅니다.
    pub async fn find_group<C>(db: &C, group_id: i64) -> Result<member_group::Model, AppError>
    where
        C: ConnectionTrait,
    {
        MemberGroup::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("존재하지 않는 그룹입니다. 다시 입장해주세요.".into())
            })
    }
}
