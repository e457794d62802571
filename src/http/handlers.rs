//! Request handlers for the simulator API.
//!
//! All state is keyed by the caller's peer IP, the same identity the rate
//! limiter uses. Domain-level rejections (blocked window, CSRF mismatch,
//! threats found) are normal responses, not errors.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::simulation::headers::{SecurityHeader, SECURITY_HEADERS};
use crate::simulation::rate_window::RateWindowSnapshot;
use crate::simulation::sanitizer::SanitizationResult;
use crate::simulation::{CsrfOutcome, Decision};

#[derive(Debug, Serialize)]
pub struct SubmitAccepted {
    pub accepted: bool,
    pub count: u32,
    pub remaining: u32,
}

#[derive(Debug, Serialize)]
pub struct SubmitRejected {
    pub accepted: bool,
    pub retry_after_secs: u32,
}

/// `POST /api/submit` — record one event against the caller's window.
pub async fn submit(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Response {
    let key = addr.ip().to_string();
    match state.limiter.record_event(&key) {
        Decision::Allowed { count, remaining } => {
            tracing::debug!(client = %key, count, remaining, "Submission accepted");
            metrics::record_submission("allowed");
            Json(SubmitAccepted {
                accepted: true,
                count,
                remaining,
            })
            .into_response()
        }
        Decision::Blocked { retry_after_secs } => {
            tracing::warn!(client = %key, retry_after_secs, "Rate limit exceeded");
            metrics::record_submission("blocked");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(SubmitRejected {
                    accepted: false,
                    retry_after_secs,
                }),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub rate_window: RateWindowSnapshot,
}

/// `GET /api/status` — read-only view of the caller's window.
pub async fn status(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Json<StatusResponse> {
    let key = addr.ip().to_string();
    Json(StatusResponse {
        rate_window: state.limiter.snapshot(&key),
    })
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// `POST /api/analyze` — run the sanitizer over free text.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<SanitizationResult> {
    let result = state.sanitizer.sanitize(&request.text);
    for threat in &result.matched_threats {
        metrics::record_threat(threat.name);
    }
    tracing::debug!(
        input_len = request.text.len(),
        threats = result.matched_threats.len(),
        "Analysis complete"
    );
    Json(result)
}

#[derive(Debug, Serialize)]
pub struct CsrfTokenResponse {
    pub token: String,
}

/// `GET /api/csrf/token` — issue a fresh single-use token for the caller.
pub async fn issue_csrf_token(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Json<CsrfTokenResponse> {
    let key = addr.ip().to_string();
    let token = state.csrf.issue(&key);
    tracing::debug!(client = %key, "CSRF token issued");
    Json(CsrfTokenResponse { token })
}

#[derive(Debug, Deserialize)]
pub struct CsrfVerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CsrfVerifyResponse {
    pub accepted: bool,
    pub outcome: CsrfOutcome,
}

/// `POST /api/csrf/verify` — single-use validation of a presented token.
pub async fn verify_csrf_token(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    Json(request): Json<CsrfVerifyRequest>,
) -> Json<CsrfVerifyResponse> {
    let key = addr.ip().to_string();
    let outcome = state.csrf.validate(&key, &request.token);
    metrics::record_csrf(match outcome {
        CsrfOutcome::Accepted => "accepted",
        CsrfOutcome::Mismatch => "mismatch",
        CsrfOutcome::NoTokenIssued => "no_token_issued",
    });
    if !outcome.is_accepted() {
        tracing::warn!(client = %key, ?outcome, "CSRF validation failed");
    }
    Json(CsrfVerifyResponse {
        accepted: outcome.is_accepted(),
        outcome,
    })
}

/// `GET /api/headers` — the security-header catalogue, for the UI.
pub async fn list_security_headers() -> Json<&'static [SecurityHeader]> {
    Json(SECURITY_HEADERS)
}
