/// 세부 계획 / 응원 / 활동 피드 통합 테스트
/// POST   /api/v1/goals/{goalId}/plans
/// PATCH  /api/v1/plans/{planId}
/// DELETE /api/v1/plans/{planId}
/// POST   /api/v1/goals/{goalId}/comments
/// DELETE /api/v1/comments/{commentId}
/// POST   /api/v1/goals/{goalId}/view
/// GET    /api/v1/activity-logs
mod common;

use axum::http::{Method, StatusCode};
use fandalart::domain::group::entity::member_group;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{json, Value};

async fn complete_plan(app: &common::TestApp, token: &str, plan_id: i64, content: &str) -> Value {
    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/plans/{}", plan_id),
            Some(token),
            Some(json!({ "content": content, "isCompleted": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

async fn activity_types(app: &common::TestApp, token: &str) -> Vec<String> {
    let (status, body) = app
        .request(Method::GET, "/api/v1/activity-logs", Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["actionType"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn completing_plans_should_recalculate_progress() {
    // Arrange
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat1", 0, "운동").await;
    let first = app.add_plan(&token, goal_id, "스쿼트 100개").await;
    let second = app.add_plan(&token, goal_id, "플랭크 1분").await;
    let third = app.add_plan(&token, goal_id, "줄넘기").await;

    // Act
    let one = complete_plan(&app, &token, first, "스쿼트 100개").await;
    let two = complete_plan(&app, &token, second, "플랭크 1분").await;

    // Assert
    assert_eq!(one["result"]["progress"], 33);
    assert_eq!(two["result"]["progress"], 67);
    assert_eq!(two["result"]["plan"]["isCompleted"], true);

    let three = complete_plan(&app, &token, third, "줄넘기").await;
    assert_eq!(three["result"]["progress"], 100);
}

#[tokio::test]
async fn adding_plan_should_lower_progress() {
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat2", 0, "저축").await;
    let plan_id = app.add_plan(&token, goal_id, "월 50만원").await;
    complete_plan(&app, &token, plan_id, "월 50만원").await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/plans", goal_id),
            Some(&token),
            Some(json!({ "content": "가계부 쓰기" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["progress"], 50);
    assert_eq!(body["result"]["plan"]["isCompleted"], false);
}

#[tokio::test]
async fn deleting_last_incomplete_plan_should_reach_full_progress() {
    // Arrange
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat3", 0, "독서").await;
    let done = app.add_plan(&token, goal_id, "1권").await;
    let pending = app.add_plan(&token, goal_id, "2권").await;
    complete_plan(&app, &token, done, "1권").await;

    // Act
    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/plans/{}", pending),
            Some(&token),
            None,
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["progress"], 100);
    assert!(body["result"]["plan"].is_null());
    let types = activity_types(&app, &token).await;
    assert_eq!(types[0], "ACHIEVEMENT");
}

#[tokio::test]
async fn deleting_all_plans_should_reset_progress() {
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat3", 1, "영화").await;
    let plan_id = app.add_plan(&token, goal_id, "한 편 보기").await;
    complete_plan(&app, &token, plan_id, "한 편 보기").await;

    let (_, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/plans/{}", plan_id),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(body["result"]["progress"], 0);
}

#[tokio::test]
async fn plan_changes_should_only_allow_owner() {
    let app = common::setup().await;
    let (_, owner) = app.join("민지").await;
    let (_, other) = app.join("하니").await;
    let goal_id = app.create_goal(&owner, "cat1", 0, "운동").await;
    let plan_id = app.add_plan(&owner, goal_id, "걷기").await;

    let (add_status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/plans", goal_id),
            Some(&other),
            Some(json!({ "content": "끼어들기" })),
        )
        .await;
    let (delete_status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/plans/{}", plan_id),
            Some(&other),
            None,
        )
        .await;

    assert_eq!(add_status, StatusCode::FORBIDDEN);
    assert_eq!(delete_status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn activity_feed_should_record_in_latest_first_order() {
    // Arrange
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat1", 0, "운동").await;
    let plan_id = app.add_plan(&token, goal_id, "걷기").await;

    // Act
    complete_plan(&app, &token, plan_id, "걷기").await;
    // 이미 완료된 계획을 다시 저장해도 새 기록은 없다
    complete_plan(&app, &token, plan_id, "걷기").await;

    // Assert
    let types = activity_types(&app, &token).await;
    assert_eq!(types, vec!["ACHIEVEMENT", "COMPLETE", "CREATE"]);

    let (_, body) = app
        .request(Method::GET, "/api/v1/activity-logs", Some(&token), None)
        .await;
    let latest = &body["result"][0];
    assert_eq!(latest["memberNickname"], "민지");
    assert_eq!(latest["type"], "update");
    assert_eq!(latest["message"], "'운동' 목표를 100% 달성했습니다! 🎉");
    assert_eq!(body["result"][1]["type"], "achievement");
}

#[tokio::test]
async fn activity_feed_should_honour_limit() {
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    app.create_goal(&token, "cat1", 0, "하나").await;
    app.create_goal(&token, "cat1", 1, "둘").await;
    app.create_goal(&token, "cat1", 2, "셋").await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/activity-logs?limit=2",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let logs = body["result"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["message"], "'셋' 목표를 추가했습니다.");
}

#[tokio::test]
async fn cheer_should_mark_unread_until_owner_views() {
    // Arrange
    let app = common::setup().await;
    let (owner_id, owner) = app.join("민지").await;
    let (_, friend) = app.join("하니").await;
    let goal_id = app.create_goal(&owner, "cat2", 1, "저축").await;
    let board_uri = format!("/api/v1/members/{}/board", owner_id);

    // Act
    let (status, cheer) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/comments", goal_id),
            Some(&friend),
            Some(json!({ "content": "화이팅!" })),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cheer["result"]["memberNickname"], "하니");

    let (_, owner_board) = app.request(Method::GET, &board_uri, Some(&owner), None).await;
    let (_, friend_board) = app
        .request(Method::GET, &board_uri, Some(&friend), None)
        .await;
    assert_eq!(owner_board["result"]["cells"][3]["hasUnreadCheers"], true);
    assert_eq!(owner_board["result"]["cells"][3]["cheerCount"], 1);
    assert_eq!(friend_board["result"]["cells"][3]["hasUnreadCheers"], false);

    let (view_status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/view", goal_id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(view_status, StatusCode::OK);
    let (_, owner_board) = app.request(Method::GET, &board_uri, Some(&owner), None).await;
    assert_eq!(owner_board["result"]["cells"][3]["hasUnreadCheers"], false);

    let types = activity_types(&app, &owner).await;
    assert_eq!(types[0], "CHEER");
}

#[tokio::test]
async fn own_cheer_should_not_count_as_unread() {
    let app = common::setup().await;
    let (_, owner) = app.join("민지").await;
    let goal_id = app.create_goal(&owner, "cat1", 0, "운동").await;

    app.request(
        Method::POST,
        &format!("/api/v1/goals/{}/comments", goal_id),
        Some(&owner),
        Some(json!({ "content": "나 자신 화이팅" })),
    )
    .await;
    let (_, detail) = app
        .request(
            Method::GET,
            &format!("/api/v1/goals/{}", goal_id),
            Some(&owner),
            None,
        )
        .await;

    assert_eq!(detail["result"]["hasUnreadCheers"], false);
    assert_eq!(detail["result"]["cheers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn view_should_only_allow_owner() {
    let app = common::setup().await;
    let (_, owner) = app.join("민지").await;
    let (_, friend) = app.join("하니").await;
    let goal_id = app.create_goal(&owner, "cat1", 0, "운동").await;

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/view", goal_id),
            Some(&friend),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn comment_should_only_be_deleted_by_author() {
    // Arrange
    let app = common::setup().await;
    let (_, owner) = app.join("민지").await;
    let (_, friend) = app.join("하니").await;
    let goal_id = app.create_goal(&owner, "cat1", 0, "운동").await;
    let (_, cheer) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/comments", goal_id),
            Some(&friend),
            Some(json!({ "content": "응원해요" })),
        )
        .await;
    let uri = format!(
        "/api/v1/comments/{}",
        cheer["result"]["commentId"].as_i64().unwrap()
    );

    // Act
    let (owner_status, _) = app.request(Method::DELETE, &uri, Some(&owner), None).await;
    let (author_status, _) = app.request(Method::DELETE, &uri, Some(&friend), None).await;
    let (again_status, body) = app.request(Method::DELETE, &uri, Some(&friend), None).await;

    // Assert
    assert_eq!(owner_status, StatusCode::FORBIDDEN);
    assert_eq!(author_status, StatusCode::OK);
    assert_eq!(again_status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COMMENT4041");
}

#[tokio::test]
async fn empty_cheer_should_be_rejected() {
    let app = common::setup().await;
    let (_, owner) = app.join("민지").await;
    let goal_id = app.create_goal(&owner, "cat1", 0, "운동").await;

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/comments", goal_id),
            Some(&owner),
            Some(json!({ "content": "   " })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resources_of_another_group_should_be_not_found() {
    // Arrange: 옆 그룹 멤버의 목표, 계획, 응원
    let app = common::setup().await;
    member_group::ActiveModel {
        name: Set("옆집".to_string()),
        password: Set("other".to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&app.state.db)
    .await
    .unwrap();
    let (_, body) = app
        .request(
            Method::POST,
            "/api/v1/groups/enter",
            None,
            Some(json!({ "password": "other" })),
        )
        .await;
    let other_group_token = body["result"]["accessToken"].as_str().unwrap().to_string();
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/members",
            Some(&other_group_token),
            Some(json!({ "nickname": "이웃" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let neighbour = body["result"]["accessToken"].as_str().unwrap().to_string();

    let goal_id = app.create_goal(&neighbour, "cat1", 0, "텃밭 가꾸기").await;
    let plan_id = app.add_plan(&neighbour, goal_id, "상추 심기").await;
    let (status, cheer) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/comments", goal_id),
            Some(&neighbour),
            Some(json!({ "content": "화이팅" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", cheer);
    let comment_id = cheer["result"]["commentId"].as_i64().unwrap();

    let (_, token) = app.join("민지").await;

    // Act
    let (get_status, get_body) = app
        .request(Method::GET, &format!("/api/v1/goals/{}", goal_id), Some(&token), None)
        .await;
    let (cheer_status, cheer_body) = app
        .request(
            Method::POST,
            &format!("/api/v1/goals/{}/comments", goal_id),
            Some(&token),
            Some(json!({ "content": "몰래 응원" })),
        )
        .await;
    let (plan_status, plan_body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/plans/{}", plan_id),
            Some(&token),
            Some(json!({ "content": "상추 심기", "isCompleted": true })),
        )
        .await;
    let (delete_status, delete_body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/comments/{}", comment_id),
            Some(&token),
            None,
        )
        .await;

    // Assert
    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(get_body["code"], "GOAL4041");
    assert_eq!(cheer_status, StatusCode::NOT_FOUND);
    assert_eq!(cheer_body["code"], "GOAL4041");
    assert_eq!(plan_status, StatusCode::NOT_FOUND);
    assert_eq!(plan_body["code"], "GOAL4041");
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_body["code"], "COMMENT4041");

    // 옆 그룹 데이터는 그대로
    let (_, detail) = app
        .request(
            Method::GET,
            &format!("/api/v1/goals/{}", goal_id),
            Some(&neighbour),
            None,
        )
        .await;
    assert_eq!(detail["result"]["goal"]["progress"], 0);
    assert_eq!(detail["result"]["plans"][0]["isCompleted"], false);
    assert_eq!(detail["result"]["cheers"].as_array().unwrap().len(), 1);
}
