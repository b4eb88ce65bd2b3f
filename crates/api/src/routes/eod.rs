//! End-of-day batch trigger routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::routes::error_response;
use crate::AppState;
use corebank_db::repositories::accrual::AccrualRepository;
use corebank_shared::AppError;

/// Creates the EOD routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/eod/accruals", post(run_accruals))
}

/// Request body for triggering the accrual batch.
#[derive(Debug, Default, Deserialize)]
pub struct RunAccrualsRequest {
    /// Business date to accrue for; defaults to today.
    pub accrual_date: Option<NaiveDate>,
}

/// POST `/eod/accruals` - Run the daily interest accrual batch.
async fn run_accruals(
    State(state): State<AppState>,
    payload: Option<Json<RunAccrualsRequest>>,
) -> impl IntoResponse {
    let accrual_date = payload
        .and_then(|Json(req)| req.accrual_date)
        .unwrap_or_else(|| Utc::now().date_naive());

    let repo = AccrualRepository::new((*state.db).clone(), state.accrual.clone());
    match repo.run_accrual_batch(accrual_date).await {
        Ok(outcome) => {
            let status = if outcome.is_complete() {
                "completed"
            } else {
                "completed_with_errors"
            };
            (
                StatusCode::OK,
                Json(json!({
                    "accrual_date": outcome.accrual_date.to_string(),
                    "status": status,
                    "processed": outcome.processed,
                    "skipped": outcome.skipped,
                    "errors": outcome.errors,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "accrual batch failed");
            error_response(&AppError::Internal("an error occurred".to_string()))
        }
    }
}
