use sea_orm::*;
use tracing::info;

use super::dto::{CreateMemberRequest, GroupSessionResponse, MemberResponse, ProfileSessionResponse};
use super::entity::member::{self, Entity as Member};
use crate::state::AppState;
use crate::utils::error::{is_unique_violation, AppError};
use crate::utils::jwt::{encode_group_token, encode_member_token};
use crate::utils::time::now;

pub struct MemberService;

impl MemberService {
    /// 그룹 멤버 목록 (표시 순서)
    pub async fn list_members<C>(db: &C, group_id: i64) -> Result<Vec<MemberResponse>, AppError>
    where
        C: ConnectionTrait,
    {
        let members = Self::find_group_members(db, group_id).await?;
        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    pub async fn find_group_members<C>(db: &C, group_id: i64) -> Result<Vec<member::Model>, AppError>
    where
        C: ConnectionTrait,
    {
        Ok(Member::find()
            .filter(member::Column::GroupId.eq(group_id))
            .order_by_asc(member::Column::OrderIndex)
            .order_by_asc(member::Column::MemberId)
            .all(db)
            .await?)
    }

    /// 새 구성원을 추가하고 바로 해당 프로필로 세션을 발급합니다.
    pub async fn create_member(
        state: &AppState,
        group_id: i64,
        req: CreateMemberRequest,
    ) -> Result<ProfileSessionResponse, AppError> {
        let nickname = req.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(AppError::ValidationError("닉네임을 입력해주세요.".into()));
        }

        let txn = state.db.begin().await?;

        let duplicated = Member::find()
            .filter(member::Column::GroupId.eq(group_id))
            .filter(member::Column::Nickname.eq(nickname.as_str()))
            .one(&txn)
            .await?;
        if duplicated.is_some() {
            return Err(AppError::Conflict("이미 사용 중인 닉네임입니다.".into()));
        }

        // 새 멤버는 맨 뒤에 표시
        let order_index = Member::find()
            .filter(member::Column::GroupId.eq(group_id))
            .count(&txn)
            .await? as i32;

        let created = member::ActiveModel {
            group_id: Set(group_id),
            nickname: Set(nickname),
            avatar_url: Set(req.avatar_url),
            order_index: Set(order_index),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("이미 사용 중인 닉네임입니다.".into())
            } else {
                e.into()
            }
        })?;

        txn.commit().await?;

        info!(
            group_id = group_id,
            member_id = created.member_id,
            "member created"
        );

        Self::issue_member_session(state, created)
    }

    /// 기존 프로필 선택
    pub async fn select_member(
        state: &AppState,
        group_id: i64,
        member_id: i64,
    ) -> Result<ProfileSessionResponse, AppError> {
        let member = Self::find_member_in_group(&state.db, group_id, member_id).await?;
        Self::issue_member_session(state, member)
    }

    pub async fn get_me(
        state: &AppState,
        group_id: i64,
        member_id: i64,
    ) -> Result<MemberResponse, AppError> {
        let member = Self::find_member_in_group(&state.db, group_id, member_id).await?;
        Ok(member.into())
    }

    /// 프로필 전환: 멤버 정보를 뺀 그룹 세션으로 되돌립니다.
    pub fn clear_profile(state: &AppState, group_id: i64) -> Result<GroupSessionResponse, AppError> {
        let access_token = encode_group_token(
            group_id,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        Ok(GroupSessionResponse {
            group_id,
            access_token,
        })
    }

    /// 다른 그룹의 멤버는 존재하지 않는 것으로 취급합니다.
    pub async fn find_member_in_group<C>(
        db: &C,
        group_id: i64,
        member_id: i64,
    ) -> Result<member::Model, AppError>
    where
        C: ConnectionTrait,
    {
        Member::find_by_id(member_id)
            .filter(member::Column::GroupId.eq(group_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 멤버입니다.".into()))
    }

    fn issue_member_session(
        state: &AppState,
        member: member::Model,
    ) -> Result<ProfileSessionResponse, AppError> {
        let access_token = encode_member_token(
            member.group_id,
            member.member_id,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        Ok(ProfileSessionResponse {
            member: member.into(),
            access_token,
        })
    }
}
