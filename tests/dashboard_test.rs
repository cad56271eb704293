/// 대시보드 / 헬스체크 통합 테스트
/// GET /api/v1/dashboard
/// GET /health
mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn dashboard_without_members_should_be_zero() {
    let app = common::setup().await;
    let group_token = app.enter().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/dashboard", Some(&group_token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["groupName"], "우리 가족");
    assert_eq!(body["result"]["globalProgress"], 0);
    assert!(body["result"]["members"].as_array().unwrap().is_empty());
    assert!(body["result"]["recentActivities"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn dashboard_should_average_member_progress() {
    // Arrange
    let app = common::setup().await;
    let (first_id, first) = app.join("민지").await;
    let (second_id, second) = app.join("하니").await;
    for slot in 0..3 {
        let goal_id = app
            .create_goal(&first, "cat1", slot, &format!("목표 {}", slot))
            .await;
        let plan_id = app.add_plan(&first, goal_id, "완료할 일").await;
        let (status, _) = app
            .request(
                Method::PATCH,
                &format!("/api/v1/plans/{}", plan_id),
                Some(&first),
                Some(json!({ "content": "완료할 일", "isCompleted": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    app.create_goal(&second, "cat4", 0, "아직 시작 전").await;

    // Act
    let (status, body) = app
        .request(Method::GET, "/api/v1/dashboard", Some(&first), None)
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let members = body["result"]["members"].as_array().unwrap();
    assert_eq!(members[0]["memberId"], first_id);
    // 300 / 12 = 25
    assert_eq!(members[0]["progress"], 25);
    assert_eq!(members[0]["goalCount"], 3);
    assert_eq!(members[0]["achievedGoalCount"], 3);
    assert_eq!(members[1]["memberId"], second_id);
    assert_eq!(members[1]["progress"], 0);
    // (25 + 0) / 2 = 12.5 -> 13
    assert_eq!(body["result"]["globalProgress"], 13);

    let activities = body["result"]["recentActivities"].as_array().unwrap();
    assert_eq!(activities[0]["actionType"], "CREATE");
    assert_eq!(activities[0]["memberNickname"], "하니");
}

#[tokio::test]
async fn dashboard_should_cap_recent_activities_at_twenty() {
    let app = common::setup().await;
    let (_, token) = app.join("민지").await;
    let goal_id = app.create_goal(&token, "cat1", 0, "운동").await;
    for i in 0..25 {
        let (status, _) = app
            .request(
                Method::POST,
                &format!("/api/v1/goals/{}/comments", goal_id),
                Some(&token),
                Some(json!({ "content": format!("응원 {}", i) })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app
        .request(Method::GET, "/api/v1/dashboard", Some(&token), None)
        .await;

    assert_eq!(
        body["result"]["recentActivities"].as_array().unwrap().len(),
        20
    );
}

#[tokio::test]
async fn health_should_report_database_status() {
    let app = common::setup().await;

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn responses_should_carry_request_id() {
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;

    let app = common::setup().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}
