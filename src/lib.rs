pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use domain::{activity, dashboard, goal, group, health, member};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        group::handler::enter_group,
        group::handler::get_my_group,
        member::handler::list_members,
        member::handler::create_member,
        member::handler::select_member,
        member::handler::get_me,
        member::handler::clear_profile,
        member::handler::logout,
        goal::handler::get_board,
        goal::handler::get_goal,
        goal::handler::create_goal,
        goal::handler::update_goal,
        goal::handler::delete_goal,
        goal::handler::mark_goal_viewed,
        goal::handler::rename_category,
        goal::handler::add_plan,
        goal::handler::update_plan,
        goal::handler::delete_plan,
        goal::handler::add_comment,
        goal::handler::delete_comment,
        activity::handler::list_activity_logs,
        dashboard::handler::get_dashboard,
    ),
    components(
        schemas(
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::HealthChecks,
            health::dto::CheckResult,
            group::dto::EnterGroupRequest,
            group::dto::EnterGroupResponse,
            group::dto::GroupInfoResponse,
            group::dto::SuccessEnterGroupResponse,
            group::dto::SuccessGroupInfoResponse,
            member::dto::MemberResponse,
            member::dto::CreateMemberRequest,
            member::dto::ProfileSessionResponse,
            member::dto::GroupSessionResponse,
            member::dto::SuccessMemberListResponse,
            member::dto::SuccessMemberResponse,
            member::dto::SuccessProfileSessionResponse,
            member::dto::SuccessGroupSessionResponse,
            goal::entity::goal::GoalCategory,
            goal::dto::CreateGoalRequest,
            goal::dto::UpdateGoalRequest,
            goal::dto::RenameCategoryRequest,
            goal::dto::CreatePlanRequest,
            goal::dto::UpdatePlanRequest,
            goal::dto::CreateCommentRequest,
            goal::dto::GoalResponse,
            goal::dto::PlanResponse,
            goal::dto::PlanMutationResponse,
            goal::dto::CheerResponse,
            goal::dto::GoalDetailResponse,
            goal::dto::CategoryTitleResponse,
            goal::dto::CategoryTitles,
            goal::dto::CellType,
            goal::dto::BoardCell,
            goal::dto::BoardResponse,
            goal::dto::SuccessBoardResponse,
            goal::dto::SuccessGoalResponse,
            goal::dto::SuccessGoalDetailResponse,
            goal::dto::SuccessCategoryTitleResponse,
            goal::dto::SuccessPlanMutationResponse,
            goal::dto::SuccessCheerResponse,
            activity::entity::activity_log::ActionType,
            activity::dto::FeedType,
            activity::dto::ActivityLogResponse,
            activity::dto::SuccessActivityLogListResponse,
            dashboard::dto::MemberProgressResponse,
            dashboard::dto::DashboardResponse,
            dashboard::dto::SuccessDashboardResponse,
            utils::response::ErrorResponse,
            utils::response::SuccessEmptyResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크"),
        (name = "Group", description = "그룹 입장 API"),
        (name = "Member", description = "프로필/세션 API"),
        (name = "Goal", description = "만다라트 보드/목표 API"),
        (name = "Plan", description = "세부 계획 API"),
        (name = "Cheer", description = "응원 댓글 API"),
        (name = "Activity", description = "활동 피드 API"),
        (name = "Dashboard", description = "대시보드 API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/groups/enter", post(group::handler::enter_group))
        .route("/groups/me", get(group::handler::get_my_group))
        .route(
            "/members",
            get(member::handler::list_members).post(member::handler::create_member),
        )
        .route("/members/me", get(member::handler::get_me))
        .route(
            "/members/:member_id/select",
            post(member::handler::select_member),
        )
        .route("/members/:member_id/board", get(goal::handler::get_board))
        .route("/session/profile", delete(member::handler::clear_profile))
        .route("/session/logout", post(member::handler::logout))
        .route("/goals", post(goal::handler::create_goal))
        .route(
            "/goals/:goal_id",
            get(goal::handler::get_goal)
                .patch(goal::handler::update_goal)
                .delete(goal::handler::delete_goal),
        )
        .route("/goals/:goal_id/view", post(goal::handler::mark_goal_viewed))
        .route("/goals/:goal_id/plans", post(goal::handler::add_plan))
        .route("/goals/:goal_id/comments", post(goal::handler::add_comment))
        .route("/categories/:category", put(goal::handler::rename_category))
        .route(
            "/plans/:plan_id",
            patch(goal::handler::update_plan).delete(goal::handler::delete_plan),
        )
        .route("/comments/:comment_id", delete(goal::handler::delete_comment))
        .route(
            "/activity-logs",
            get(activity::handler::list_activity_logs),
        )
        .route("/dashboard", get(dashboard::handler::get_dashboard));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
