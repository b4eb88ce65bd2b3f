//! Transaction posting and retrieval routes.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::routes::error_response;
use crate::AppState;
use corebank_core::ledger::{DrCr, LedgerError, LineInput, TranStatus, TransactionInput};
use corebank_db::repositories::posting::{PostedTransaction, PostingError, PostingRepository};
use corebank_shared::AppError;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(post_transaction))
        .route("/transactions/{tran_id}", get(get_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for posting a transaction.
#[derive(Debug, Deserialize)]
pub struct PostTransactionRequest {
    /// Value date (YYYY-MM-DD).
    pub value_date: NaiveDate,
    /// Free-text narration.
    pub narration: String,
    /// Ledger lines, in posting order.
    pub lines: Vec<LineRequest>,
}

/// Request body for a single ledger line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    /// Account number to post against.
    pub account_no: String,
    /// Debit/credit flag: "D" or "C".
    pub dr_cr: String,
    /// Transaction currency code.
    pub tran_ccy: String,
    /// Amount in transaction currency.
    pub fcy_amt: String,
    /// Exchange rate to local currency (default 1).
    pub exchange_rate: Option<String>,
    /// Amount in local currency.
    pub lcy_amt: String,
    /// Optional user-defined tag.
    pub udf1: Option<String>,
}

/// Response for a posted transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction id.
    pub tran_id: String,
    /// Booking date.
    pub tran_date: String,
    /// Value date.
    pub value_date: String,
    /// Narration.
    pub narration: String,
    /// Status: entry, posted or verified.
    pub status: String,
    /// Whether debits equal credits.
    pub balanced: bool,
    /// Total debit amount.
    pub total_debit: String,
    /// Total credit amount.
    pub total_credit: String,
    /// The lines, in original order.
    pub lines: Vec<LineResponse>,
}

/// Response for a single posted line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line id.
    pub line_id: String,
    /// One-based position.
    pub line_seq: i32,
    /// Account number.
    pub account_no: String,
    /// Resolved account name.
    pub account_name: String,
    /// Debit/credit flag.
    pub dr_cr: String,
    /// Transaction currency.
    pub tran_ccy: String,
    /// Amount in transaction currency.
    pub fcy_amt: String,
    /// Exchange rate.
    pub exchange_rate: String,
    /// Amount in local currency.
    pub lcy_amt: String,
    /// Optional user-defined tag.
    pub udf1: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Post a balanced multi-line transaction.
async fn post_transaction(
    State(state): State<AppState>,
    Json(payload): Json<PostTransactionRequest>,
) -> impl IntoResponse {
    let input = match parse_request(&payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = PostingRepository::new((*state.db).clone());
    match repo.post(&input).await {
        Ok(posted) => {
            info!(tran_id = %posted.tran_id, lines = posted.lines.len(), "transaction posted");
            (StatusCode::CREATED, Json(to_response(posted))).into_response()
        }
        Err(e) => posting_error_response(&e),
    }
}

/// GET `/transactions/{tran_id}` - Retrieve a posted transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(tran_id): Path<String>,
) -> impl IntoResponse {
    let repo = PostingRepository::new((*state.db).clone());
    match repo.get(&tran_id).await {
        Ok(posted) => (StatusCode::OK, Json(to_response(posted))).into_response(),
        Err(e) => posting_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_request(
    payload: &PostTransactionRequest,
) -> Result<TransactionInput, axum::response::Response> {
    let mut lines = Vec::with_capacity(payload.lines.len());
    for line in &payload.lines {
        let dr_cr = match line.dr_cr.to_uppercase().as_str() {
            "D" => DrCr::Debit,
            "C" => DrCr::Credit,
            _ => {
                return Err(bad_request("dr_cr must be 'D' or 'C'"));
            }
        };

        let fcy_amt = parse_amount(&line.fcy_amt, "fcy_amt")?;
        let lcy_amt = parse_amount(&line.lcy_amt, "lcy_amt")?;
        let exchange_rate = match &line.exchange_rate {
            Some(rate) => parse_amount(rate, "exchange_rate")?,
            None => Decimal::ONE,
        };

        lines.push(LineInput {
            account_no: line.account_no.clone(),
            dr_cr,
            tran_ccy: line.tran_ccy.clone(),
            fcy_amt,
            exchange_rate,
            lcy_amt,
            udf1: line.udf1.clone(),
        });
    }

    Ok(TransactionInput {
        value_date: payload.value_date,
        narration: payload.narration.clone(),
        lines,
    })
}

fn parse_amount(raw: &str, field: &str) -> Result<Decimal, axum::response::Response> {
    Decimal::from_str(raw).map_err(|_| {
        bad_request(&format!("{field} is not a valid decimal amount"))
    })
}

fn bad_request(message: &str) -> axum::response::Response {
    error_response(&AppError::Validation(message.to_string()))
}

/// Maps a posting failure onto the shared error taxonomy.
fn to_app_error(e: &PostingError) -> AppError {
    match e {
        PostingError::Validation(ledger_err) => match ledger_err {
            LedgerError::InsufficientLines
            | LedgerError::ZeroAmount
            | LedgerError::NegativeAmount => AppError::Validation(ledger_err.to_string()),
            LedgerError::Unbalanced { .. } => AppError::Unbalanced(ledger_err.to_string()),
            LedgerError::LiabilityOverdraw(_) | LedgerError::AssetOverdraw(_) => {
                AppError::PolicyViolation(ledger_err.to_string())
            }
            LedgerError::InsufficientBalance { .. } => {
                AppError::InsufficientBalance(ledger_err.to_string())
            }
        },
        PostingError::AccountNotFound(_)
        | PostingError::BalanceRowNotFound(_)
        | PostingError::GlBalanceNotFound(_)
        | PostingError::NotFound(_) => AppError::NotFound(e.to_string()),
        PostingError::SubProductInactive { .. } => AppError::PolicyViolation(e.to_string()),
        PostingError::TransientContention => {
            AppError::TransientContention("the posting was contended, please retry".to_string())
        }
        PostingError::SubProductNotFound(_) => AppError::Internal("an error occurred".to_string()),
        PostingError::Database(_) => AppError::Database("an error occurred".to_string()),
    }
}

fn posting_error_response(e: &PostingError) -> axum::response::Response {
    error!(error = %e, "posting operation failed");
    error_response(&to_app_error(e))
}

fn status_to_string(status: TranStatus) -> String {
    match status {
        TranStatus::Entry => "entry".to_string(),
        TranStatus::Posted => "posted".to_string(),
        TranStatus::Verified => "verified".to_string(),
    }
}

fn dr_cr_to_string(dr_cr: DrCr) -> String {
    match dr_cr {
        DrCr::Debit => "D".to_string(),
        DrCr::Credit => "C".to_string(),
    }
}

fn to_response(posted: PostedTransaction) -> TransactionResponse {
    TransactionResponse {
        tran_id: posted.tran_id,
        tran_date: posted.tran_date.to_string(),
        value_date: posted.value_date.to_string(),
        narration: posted.narration,
        status: status_to_string(posted.status),
        balanced: posted.balanced,
        total_debit: posted.total_debit.to_string(),
        total_credit: posted.total_credit.to_string(),
        lines: posted
            .lines
            .into_iter()
            .map(|line| LineResponse {
                line_id: line.line_id,
                line_seq: line.line_seq,
                account_no: line.account_no,
                account_name: line.account_name,
                dr_cr: dr_cr_to_string(line.dr_cr),
                tran_ccy: line.tran_ccy,
                fcy_amt: line.fcy_amt.to_string(),
                exchange_rate: line.exchange_rate.to_string(),
                lcy_amt: line.lcy_amt.to_string(),
                udf1: line.udf1,
            })
            .collect(),
    }
}
