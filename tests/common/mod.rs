#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fandalart::config::{create_tables, AppConfig};
use fandalart::domain::group::entity::member_group;
use fandalart::{create_router, AppState};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub const GROUP_PASSWORD: &str = "fan1234";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub group_id: i64,
}

/// 인메모리 SQLite + 그룹 하나가 준비된 앱
///
/// 인메모리 DB는 커넥션마다 따로 생기므로 풀을 1개로 고정한다.
pub async fn setup() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    create_tables(&db).await.unwrap();

    let group = member_group::ActiveModel {
        name: Set("우리 가족".to_string()),
        password: Set(GROUP_PASSWORD.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let state = AppState {
        db,
        config: AppConfig::for_test("sqlite::memory:"),
    };

    TestApp {
        router: create_router(state.clone()),
        state,
        group_id: group.group_id,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// 입장 코드로 그룹 토큰 발급
    pub async fn enter(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/groups/enter",
                None,
                Some(json!({ "password": GROUP_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["result"]["accessToken"].as_str().unwrap().to_string()
    }

    /// 멤버를 만들고 (member_id, 멤버 토큰) 반환
    pub async fn join(&self, nickname: &str) -> (i64, String) {
        let group_token = self.enter().await;
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/members",
                Some(&group_token),
                Some(json!({ "nickname": nickname })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        (
            body["result"]["member"]["memberId"].as_i64().unwrap(),
            body["result"]["accessToken"].as_str().unwrap().to_string(),
        )
    }

    /// 목표를 만들고 goal_id 반환
    pub async fn create_goal(&self, token: &str, category: &str, slot: i32, title: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/goals",
                Some(token),
                Some(json!({ "category": category, "slotIndex": slot, "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["result"]["goalId"].as_i64().unwrap()
    }

    /// 세부 계획을 만들고 plan_id 반환
    pub async fn add_plan(&self, token: &str, goal_id: i64, content: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                &format!("/api/v1/goals/{}/plans", goal_id),
                Some(token),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["result"]["plan"]["planId"].as_i64().unwrap()
    }
}
