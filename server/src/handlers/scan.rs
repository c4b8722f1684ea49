use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;
use vision_common::scan::{ScanOutcome, ScanRequest};

use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;

pub const SCAN_ID_HEADER: &str = "x-scan-id";
const CANCELLED_MESSAGE: &str = "Scan cancelled.";

/// Raw query of `GET /scan`. Everything is optional here so that missing
/// values surface as `{ error, errorOutput }` rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQuery {
    pub scan_type: Option<String>,
    pub target: Option<String>,
    pub timing: Option<String>,
    pub ports: Option<String>,
    pub scan_id: Option<String>,
    pub abort_scan: Option<String>,
}

impl ScanQuery {
    fn is_abort(&self) -> bool {
        self.abort_scan
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    fn scan_id(&self) -> ApiResult<Option<Uuid>> {
        match self.scan_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("`{raw}` is not a valid scan id."))),
        }
    }

    fn to_request(&self) -> ApiResult<ScanRequest> {
        let scan_type = required(&self.scan_type, "scanType")?;
        let timing = required(&self.timing, "timing")?;
        let target = required(&self.target, "target")?;

        // The UI encodes the target before putting it in the query string.
        let target = urlencoding::decode(target)
            .map_err(|_| ApiError::bad_request("Target is not valid percent-encoded UTF-8."))?;

        Ok(ScanRequest::parse(
            scan_type,
            &target,
            timing,
            self.ports.as_deref(),
        )?)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ApiError::bad_request(format!("Missing query parameter `{name}`.")))
}

pub async fn scan(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
) -> ApiResult<Response> {
    let scan_id = query.scan_id()?;

    if query.is_abort() {
        let scan_id =
            scan_id.ok_or_else(|| ApiError::bad_request("`abortScan` requires a `scanId`."))?;
        return abort(&state, scan_id);
    }

    let request = query.to_request()?;
    let scan_id = scan_id.unwrap_or_else(Uuid::new_v4);

    let cancel = CancellationToken::new();
    let registration = state
        .active
        .register(scan_id, cancel.clone())
        .ok_or_else(|| ApiError::bad_request(format!("Scan {scan_id} is already running.")))?;

    // Dropped with the handler future when the client disconnects.
    let guard = cancel.clone().drop_guard();

    let engine = Arc::clone(&state.engine);
    let task = tokio::spawn(async move {
        let outcome = engine.scan(registration.scan_id(), request, cancel).await;
        drop(registration);
        outcome
    });

    let joined = task.await;
    guard.disarm();

    let outcome = joined.map_err(|err| {
        error!(%scan_id, error = %err, "scan task did not complete");
        ApiError::internal("Scan task did not complete.")
    })??;

    Ok(respond(scan_id, outcome))
}

fn abort(state: &AppState, scan_id: Uuid) -> ApiResult<Response> {
    if !state.active.cancel(scan_id) {
        return Err(ApiError::not_found(format!(
            "No scan with id {scan_id} is in flight."
        )));
    }

    info!(%scan_id, "scan abort requested");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "scanId": scan_id, "aborted": true })),
    )
        .into_response())
}

fn respond(scan_id: Uuid, outcome: ScanOutcome) -> Response {
    let mut response = match outcome {
        ScanOutcome::Completed(result) => (StatusCode::OK, Json(result)).into_response(),
        ScanOutcome::Failed {
            message,
            error_output,
        } => ApiError::scan_failed(message, error_output).into_response(),
        ScanOutcome::Cancelled => ApiError::bad_request(CANCELLED_MESSAGE).into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&scan_id.to_string()) {
        response.headers_mut().insert(SCAN_ID_HEADER, value);
    }
    response
}
