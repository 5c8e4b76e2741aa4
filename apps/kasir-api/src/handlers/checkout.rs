//! Checkout.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use kasir_core::{CheckoutRequest, Transaction};

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /api/checkout`
///
/// ```text
/// {"items": [{"product_id": 1, "quantity": 2}, {"product_id": 2, "quantity": 1}]}
///     │
///     ▼
/// TransactionRepository::checkout  (one SQLite transaction)
///     │
///     ├── 200 Transaction {id, total_amount, created_at, details}
///     ├── 400 empty basket / quantity <= 0 / malformed body
///     ├── 404 unknown product_id
///     └── 409 insufficient stock
/// ```
pub async fn checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<Transaction>> {
    let Json(request) = body?;

    let transaction = state.db.transactions().checkout(&request.items).await?;
    Ok(Json(transaction))
}
