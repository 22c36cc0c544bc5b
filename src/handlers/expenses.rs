use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::db::queries::expenses;
use crate::db::queries::filter::ExpenseFilter;
use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::models::{Expense, NewExpense};
use crate::state::AppState;

const MISSING_FIELDS: &str = "Missing required fields: amount, category, and date are required";

/// Request body for creating or replacing an expense. Every field is optional
/// at the wire level so missing values can be reported as validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensePayload {
    /// A JSON number or a numeric string.
    pub amount: Option<Value>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl ExpensePayload {
    pub fn to_new_expense(&self) -> AppResult<NewExpense> {
        let amount = self
            .amount
            .as_ref()
            .filter(|v| !is_blank(v))
            .ok_or_else(|| AppError::Validation(MISSING_FIELDS.into()))?;
        let category = required_text(&self.category)?;
        let date = required_text(&self.date)?;

        Ok(NewExpense {
            amount: parse_amount(amount)?,
            category,
            description: self.description.clone().unwrap_or_default(),
            date,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn required_text(value: &Option<String>) -> AppResult<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS.into()))
}

/// Accepts a finite, strictly positive number given as a JSON number or string.
pub fn parse_amount(value: &Value) -> AppResult<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|a| a.is_finite())
    .ok_or_else(|| AppError::Validation("Invalid amount value".into()))?;

    if amount <= 0.0 {
        return Err(AppError::Validation("Amount must be greater than 0".into()));
    }
    Ok(amount)
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub message: String,
    pub expense: Expense,
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<ExpenseFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Expense>>> {
    let Query(filter) = filter?;
    debug!(?filter, "Listing expenses");
    let conn = state.db.get()?;

    let expense_list = expenses::list_expenses(&conn, &filter)?;

    Ok(Json(expense_list))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ExpenseResponse>)> {
    let Json(payload) = payload?;
    let new_expense = payload.to_new_expense()?;

    let conn = state.db.get()?;
    let id = expenses::create_expense(&conn, &new_expense)?;
    let expense = expenses::get_expense(&conn, id)?
        .ok_or_else(|| AppError::Internal(format!("Expense {} vanished after insert", id)))?;
    info!(expense_id = id, "Expense created");

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            id,
            message: "Expense added successfully".into(),
            expense,
        }),
    ))
}

/// Replaces every mutable field, so the full payload is required. A supplied
/// amount is checked before the lookup; completeness only after it, so an
/// unknown id is always reported as not found.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> AppResult<Json<ExpenseResponse>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    if let Some(amount) = payload.amount.as_ref().filter(|v| !is_blank(v)) {
        parse_amount(amount)?;
    }

    let conn = state.db.get()?;
    if expenses::get_expense(&conn, id)?.is_none() {
        return Err(AppError::NotFound("Expense not found".into()));
    }

    let new_expense = payload.to_new_expense()?;

    expenses::update_expense(&conn, id, &new_expense)?;
    let expense = expenses::get_expense(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Expense not found".into()))?;
    info!(expense_id = id, "Expense updated");

    Ok(Json(ExpenseResponse {
        id,
        message: "Expense updated successfully".into(),
        expense,
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let conn = state.db.get()?;
    if expenses::get_expense(&conn, id)?.is_none() {
        return Err(AppError::NotFound("Expense not found".into()));
    }

    expenses::delete_expense(&conn, id)?;
    info!(expense_id = id, "Expense deleted");

    Ok(Json(MessageResponse::new("Expense deleted successfully")))
}
