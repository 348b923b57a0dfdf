//! Handlers for the Radar API routes

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::{ApiError, ApiResponse, EvaluateRequest, HealthData, StatsData};
use crate::core::evaluator::{EvaluationReport, TokenEvaluator};

#[derive(Default)]
struct Counters {
    total: AtomicU64,
    failed: AtomicU64,
}

/// Shared by every request; the evaluator itself holds no mutable state
pub struct AppState {
    pub evaluator: Arc<TokenEvaluator>,
    started: Instant,
    counters: Counters,
}

impl AppState {
    pub fn new(evaluator: Arc<TokenEvaluator>) -> Self {
        Self {
            evaluator,
            started: Instant::now(),
            counters: Counters::default(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn record_failure(&self) {
        self.counters.failed.fetch_add(1, Ordering::Relaxed);
    }
}

type Failure = (StatusCode, Json<ApiResponse<()>>);

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let started = Instant::now();
    Json(ApiResponse::ok(
        HealthData {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.uptime_seconds(),
        },
        started,
    ))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let started = Instant::now();
    Json(ApiResponse::ok(
        StatsData {
            evaluations_total: state.counters.total.load(Ordering::Relaxed),
            evaluations_failed: state.counters.failed.load(Ordering::Relaxed),
            uptime_seconds: state.uptime_seconds(),
        },
        started,
    ))
}

/// `POST /v1/evaluate`; aborting errors map to their code's HTTP status
pub async fn evaluate_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EvaluationReport>>, Failure> {
    let started = Instant::now();
    state.counters.total.fetch_add(1, Ordering::Relaxed);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            state.record_failure();
            let error = ApiError::bad_request(rejection.body_text());
            return Err((StatusCode::BAD_REQUEST, Json(ApiResponse::failed(error, started))));
        }
    };

    match state.evaluator.evaluate(&request.url).await {
        Ok(report) => {
            info!(
                "📡 {} -> market {}/100, intelligence {}/100",
                request.url, report.market.result.score, report.summary.total
            );
            Ok(Json(ApiResponse::ok(report, started)))
        }
        Err(err) => {
            state.record_failure();
            warn!("❌ Evaluation of {} failed: {}", request.url, err);
            let status =
                StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((status, Json(ApiResponse::failed(ApiError::from(&err), started))))
        }
    }
}
