use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 요청 단위 추적 ID (request extensions에 저장)
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// 요청마다 ID를 부여하고 처리 결과를 한 줄로 기록합니다.
///
/// 클라이언트가 `x-request-id`를 보내면 그대로 사용하고, 없으면 UUID v4를 만듭니다.
/// 같은 값을 응답 헤더에도 실어 보냅니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    async move {
        let start = Instant::now();
        let mut response = next.run(request).await;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            status = response.status().as_u16(),
            "request completed"
        );

        let header_value = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
        response
    }
    .instrument(span)
    .await
}
