//! Account balance routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use crate::routes::error_response;
use crate::AppState;
use corebank_db::repositories::balance::{BalanceError, BalanceRepository};
use corebank_shared::AppError;

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts/{account_no}/balance", get(get_balance))
}

/// Response for the computed balance view.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Account number.
    pub account_no: String,
    /// Account display name.
    pub acct_name: String,
    /// Stored available balance.
    pub available_balance: String,
    /// Sum of the day's posted debits.
    pub todays_debits: String,
    /// Sum of the day's posted credits.
    pub todays_credits: String,
    /// Computed available balance.
    pub computed_balance: String,
    /// The day the sums cover.
    pub as_of: String,
}

/// GET `/accounts/{account_no}/balance` - Computed balance view.
async fn get_balance(
    State(state): State<AppState>,
    Path(account_no): Path<String>,
) -> impl IntoResponse {
    let repo = BalanceRepository::new((*state.db).clone());
    let as_of = Utc::now().date_naive();

    match repo.computed_balance(&account_no, as_of).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(BalanceResponse {
                account_no: balance.account_no,
                acct_name: balance.acct_name,
                available_balance: balance.available_balance.to_string(),
                todays_debits: balance.todays_debits.to_string(),
                todays_credits: balance.todays_credits.to_string(),
                computed_balance: balance.computed_balance.to_string(),
                as_of: balance.as_of.to_string(),
            }),
        )
            .into_response(),
        Err(BalanceError::AccountNotFound(_) | BalanceError::GlNotFound(_)) => {
            error_response(&AppError::NotFound(format!("account {account_no}")))
        }
        Err(e) => {
            error!(error = %e, "failed to compute balance");
            error_response(&AppError::Internal("an error occurred".to_string()))
        }
    }
}
