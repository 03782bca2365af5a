// handlers/reset.rs - POST /reset handler
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};

use super::AppState;
use crate::auth::CallerIdentity;
use crate::error::CallableError;
use crate::reset::ResetOutcome;

/// POST /reset - run the configured reset on behalf of an admin caller.
///
/// 200 with `{success: true, message}` on success; 500 with
/// `{success: false, message}` when the reset itself failed; typed
/// errors (`permission-denied`, `failed-precondition`, `invalid-argument`)
/// for rejected calls.
pub async fn manual_reset(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<(StatusCode, Json<ResetOutcome>), CallableError> {
    let outcome = state.service.manual_run(&caller).await?;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(outcome)))
}
