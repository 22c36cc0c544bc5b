use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use crate::db::queries::analytics;
use crate::db::queries::filter::ExpenseFilter;
use crate::error::AppResult;
use crate::models::{SpendingSummary, TrendPoint};
use crate::services::trends::{bucket_amounts, TrendPeriod};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub period: Option<String>,
}

pub async fn summary(
    State(state): State<AppState>,
    filter: Result<Query<ExpenseFilter>, QueryRejection>,
) -> AppResult<Json<SpendingSummary>> {
    let Query(filter) = filter?;
    let conn = state.db.get()?;

    let by_category = analytics::totals_by_category(&conn, &filter)?;
    let total = analytics::grand_total(&conn, &filter)?;

    Ok(Json(SpendingSummary { total, by_category }))
}

pub async fn trends(
    State(state): State<AppState>,
    params: Result<Query<TrendParams>, QueryRejection>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let Query(params) = params?;
    let period = TrendPeriod::from_param(params.period.as_deref());
    let since = period.window_start(Local::now().date_naive());
    debug!(period = period.as_str(), %since, "Computing spending trends");

    let conn = state.db.get()?;
    let rows = analytics::amounts_since(&conn, &since.format("%Y-%m-%d").to_string())?;

    Ok(Json(bucket_amounts(period, &rows)))
}
