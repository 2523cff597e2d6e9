//! Handlers for brief analysis and the generation job lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adgen_core::{Brief, RawBriefInput};
use adgen_psych::{ProfileOutcome, ProfileSource};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::jobs::JobPhase;
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeData {
    brief: Brief,
    psychology: ProfileOutcome,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateRequest {
    brief: RawBriefInput,
    #[serde(default)]
    options: GenerateOptions,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateOptions {
    /// When true the handler holds the request open and responds with the
    /// terminal job snapshot instead of `202` + job id.
    #[serde(default)]
    wait: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct QueuedData {
    job_id: Uuid,
    phase: JobPhase,
}

#[derive(Debug, Serialize)]
pub(super) struct CancelData {
    job_id: Uuid,
    cancel_requested: bool,
}

/// `POST /api/v1/analyze` — normalizes the brief and attaches the
/// deterministic heuristic audience profile. Synchronous and offline:
/// no job is created and the completion backend is never called.
pub(super) async fn analyze(
    Extension(req_id): Extension<RequestId>,
    Json(raw): Json<RawBriefInput>,
) -> Response {
    let brief = match Brief::from_raw(&raw) {
        Ok(brief) => brief,
        Err(err) => return validation_response(req_id.0, &err),
    };

    let psychology = ProfileOutcome {
        profile: adgen_psych::heuristic_profile(&brief),
        source: ProfileSource::Heuristic,
    };
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: AnalyzeData { brief, psychology },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}

/// `POST /api/v1/generate` — validates the brief and starts a generation
/// job. Responds `202` with the job id, or `200` with the terminal
/// snapshot when `options.wait` is set.
pub(super) async fn generate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let brief = match Brief::from_raw(&request.brief) {
        Ok(brief) => brief,
        Err(err) => return validation_response(req_id.0, &err),
    };

    if request.options.wait {
        let status = state.orchestrator.submit_and_wait(brief).await;
        return (
            StatusCode::OK,
            Json(ApiResponse {
                data: status,
                meta: ResponseMeta::new(req_id.0),
            }),
        )
            .into_response();
    }

    let job_id = state.orchestrator.submit(brief);
    (
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: QueuedData {
                job_id,
                phase: JobPhase::Queued,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}

/// `GET /api/v1/status/{job_id}` — point-in-time job snapshot.
pub(super) async fn status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(job_id): Path<Uuid>,
) -> Response {
    match state.orchestrator.registry().snapshot(job_id) {
        Some(status) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: status,
                meta: ResponseMeta::new(req_id.0),
            }),
        )
            .into_response(),
        None => ApiError::new(req_id.0, "not_found", format!("no job with id {job_id}"))
            .into_response(),
    }
}

/// `POST /api/v1/jobs/{job_id}/cancel` — requests cooperative
/// cancellation. The job reaches `cancelled` at its next check-in.
pub(super) async fn cancel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(job_id): Path<Uuid>,
) -> Response {
    if !state.orchestrator.registry().cancel(job_id) {
        return ApiError::new(req_id.0, "not_found", format!("no job with id {job_id}"))
            .into_response();
    }
    (
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: CancelData {
                job_id,
                cancel_requested: true,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}

fn validation_response(request_id: String, err: &adgen_core::GenerationError) -> Response {
    tracing::debug!(error = %err, "rejected invalid brief");
    ApiError::new(request_id, err.code(), err.to_string()).into_response()
}
