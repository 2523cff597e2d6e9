//! HTTP surface: the response envelope and the router.
//!
//! Every success body is `{ data, meta }` and every failure body is
//! `{ error: { code, message }, meta }`, with `meta` carrying the request
//! id and a timestamp.

mod jobs;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::jobs::Orchestrator;
use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    model: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "quota_exceeded" => StatusCode::TOO_MANY_REQUESTS,
            "timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(jobs::analyze))
        .route("/api/v1/generate", post(jobs::generate))
        .route("/api/v1/status/{job_id}", get(jobs::status))
        .route("/api/v1/jobs/{job_id}/cancel", post(jobs::cancel))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                model: state.orchestrator.model().to_string(),
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use adgen_completion::{CompletionClient, PollPolicy};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid brief").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::new("req-1", "not_found", "no such job").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "mystery", "??").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ---------------------------------------------------------------------
    // Router integration tests against a mocked completion backend
    // ---------------------------------------------------------------------

    fn app_for(base_url: &str) -> Router {
        let client = CompletionClient::with_base_url(base_url, 5).expect("client builds");
        let policy = PollPolicy {
            base_delay_ms: 10,
            delay_step_ms: 5,
            max_delay_ms: 30,
            jitter_ms: 0,
            deadline: Duration::from_secs(2),
        };
        build_app(AppState {
            orchestrator: Orchestrator::new(client, "test-model", policy),
        })
    }

    /// One copy-variant completion; the psychology agent fails to parse
    /// this shape and falls back to its heuristic profile.
    fn variant_completion() -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "text": "{\"headline\": \"Unlock better posture now\", \
                     \"subheadline\": \"Your back will thank you\", \
                     \"description\": \"Save 20% off on a proven desk\", \
                     \"cta\": \"Get yours\"}"
        })
    }

    fn brief_json(extra: &str) -> String {
        format!(
            "{{\"product_name\": \"GlowDesk\", \
              \"description\": \"An adjustable standing desk for remote workers\", \
              \"audience\": \"remote workers\"{extra}}}"
        )
    }

    fn brief_body(extra: &str) -> Body {
        Body::from(brief_json(extra))
    }

    /// Generate request body: the brief nested under `brief`, plus any
    /// extra top-level fields (e.g. `options`).
    fn generate_body(brief_extra: &str, extra: &str) -> Body {
        Body::from(format!("{{\"brief\": {}{extra}}}", brief_json(brief_extra)))
    }

    fn post(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn health_reports_model_and_request_id() {
        let app = app_for("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "fixed-id")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("fixed-id")
        );
        let json = body_json(response).await;
        assert_eq!(json["data"]["model"], "test-model");
        assert_eq!(json["meta"]["request_id"], "fixed-id");
    }

    #[tokio::test]
    async fn analyze_rejects_empty_product_name() {
        let app = app_for("http://127.0.0.1:1");
        let body = Body::from(
            r#"{"product_name": "  ", "description": "An adjustable desk", "audience": "everyone"}"#,
        );
        let response = app
            .oneshot(post("/api/v1/analyze", body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn analyze_is_synchronous_and_never_calls_the_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(variant_completion()))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_for(&server.uri());
        let response = app
            .oneshot(post("/api/v1/analyze", brief_body("")))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["psychology"]["source"], "heuristic");
        assert_eq!(json["data"]["brief"]["angles"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn generate_wait_returns_complete_job_with_ranked_creatives() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(variant_completion()))
            .mount(&server)
            .await;

        let app = app_for(&server.uri());
        let response = app
            .oneshot(post(
                "/api/v1/generate",
                generate_body("", ", \"options\": {\"wait\": true}"),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["phase"], "complete");
        assert_eq!(json["data"]["progress"], 100);

        let creatives = json["data"]["output"]["creatives"]
            .as_array()
            .expect("creatives array");
        assert_eq!(creatives.len(), 5);
        assert_eq!(
            json["data"]["output"]["quality_score"],
            creatives[0]["variant"]["scores"]["total"]
        );
        // Identical text for every angle, so ranking reduces to the
        // canonical angle tie-break.
        assert_eq!(creatives[0]["variant"]["angle"], "problem_agitate");
    }

    #[tokio::test]
    async fn generate_threads_industry_and_image_into_the_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(variant_completion()))
            .mount(&server)
            .await;

        let app = app_for(&server.uri());
        let response = app
            .oneshot(post(
                "/api/v1/generate",
                generate_body(
                    ", \"industry\": \"Finance\", \"image_ref\": \"upload/abc123\"",
                    ", \"options\": {\"wait\": true}",
                ),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let features = &json["data"]["output"]["creatives"][0]["performance"]["features"];
        assert_eq!(features["context"]["industry"], "finance");
        // Image flag lifts the visual baseline (45 without, 70 with).
        assert_eq!(features["visual"]["composition"], 70.0);
        assert_eq!(features["visual"]["image_text_balance"], 75.0);
    }

    #[tokio::test]
    async fn generate_without_wait_queues_and_reaches_terminal_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(variant_completion()))
            .mount(&server)
            .await;

        let app = app_for(&server.uri());
        let response = app
            .clone()
            .oneshot(post("/api/v1/generate", generate_body("", "")))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["phase"], "queued");
        let job_id = json["data"]["job_id"].as_str().expect("job id").to_string();

        let status = poll_until_terminal(&app, &job_id).await;
        assert_eq!(status["data"]["phase"], "complete");
        assert_eq!(status["data"]["output"]["creatives"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn cancelled_job_lands_in_cancelled_with_frozen_progress() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(variant_completion())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let app = app_for(&server.uri());
        let response = app
            .clone()
            .oneshot(post("/api/v1/generate", generate_body("", "")))
            .await
            .expect("response");
        let json = body_json(response).await;
        let job_id = json["data"]["job_id"].as_str().expect("job id").to_string();

        let cancel = app
            .clone()
            .oneshot(post(&format!("/api/v1/jobs/{job_id}/cancel"), Body::empty()))
            .await
            .expect("cancel response");
        assert_eq!(cancel.status(), StatusCode::ACCEPTED);

        let status = poll_until_terminal(&app, &job_id).await;
        assert_eq!(status["data"]["phase"], "cancelled");
        assert_eq!(status["data"]["error"]["code"], "cancelled");
        assert!(status["data"]["progress"].as_u64().expect("progress") < 100);
        assert!(status["data"]["output"].is_null());
    }

    #[tokio::test]
    async fn status_of_unknown_job_is_404_envelope() {
        let app = app_for("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/status/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn cancel_of_unknown_job_is_404() {
        let app = app_for("http://127.0.0.1:1");
        let response = app
            .oneshot(post(
                &format!("/api/v1/jobs/{}/cancel", uuid::Uuid::new_v4()),
                Body::empty(),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn poll_until_terminal(app: &Router, job_id: &str) -> serde_json::Value {
        for _ in 0..300 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/api/v1/status/{job_id}"))
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");
            let json = body_json(response).await;
            match json["data"]["phase"].as_str() {
                Some("complete" | "error" | "cancelled") => return json,
                _ => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
        panic!("job {job_id} never reached a terminal state");
    }
}
