//! Sales reports.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use kasir_core::{ReportPeriod, SalesSummary};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query string of `GET /api/report`.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /api/report/hari-ini`
pub async fn today(State(state): State<AppState>) -> ApiResult<Json<SalesSummary>> {
    let summary = state.db.transactions().summarize(&ReportPeriod::Today).await?;
    Ok(Json(summary))
}

/// `GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
///
/// Both bounds are inclusive and both are required. A reversed range is
/// accepted and reports nothing.
pub async fn range(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<SalesSummary>> {
    let Query(query) = query?;

    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(ApiError::validation("start_date and end_date are required"));
    };

    let period = ReportPeriod::range_from_params(&start, &end)?;
    let summary = state.db.transactions().summarize(&period).await?;
    Ok(Json(summary))
}
