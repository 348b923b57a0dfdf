//! Wire types for the Radar API

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::models::errors::{AppError, ErrorCode};

/// Envelope around every response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    /// Handler time, measured from `started`
    pub latency_ms: f64,
    /// Unix seconds
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    fn finish(data: Option<T>, error: Option<ApiError>, started: Instant) -> Self {
        Self {
            success: error.is_none(),
            data,
            error,
            latency_ms: started.elapsed().as_secs_f64() * 1000.0,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn ok(data: T, started: Instant) -> Self {
        Self::finish(Some(data), None, started)
    }

    pub fn failed(error: ApiError, started: Instant) -> Self {
        Self::finish(None, Some(error), started)
    }
}

/// Error payload; `code` is an [`ErrorCode`] string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Request body could not be decoded
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ApiBadRequest.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: std::error::Error::source(err).map(|cause| cause.to_string()),
        }
    }
}

/// `POST /v1/evaluate` body
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsData {
    pub evaluations_total: u64,
    pub evaluations_failed: u64,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
