use std::sync::LazyLock;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::queries::categories;
use crate::error::{is_constraint_violation, AppError, AppResult};
use crate::models::{Category, NewCategory, DEFAULT_CATEGORY_COLOR};
use crate::state::AppState;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
});

#[derive(Debug, Default, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryPayload {
    pub fn to_new_category(&self) -> AppResult<NewCategory> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("Category name is required".into()))?
            .trim();

        if name.chars().count() < 2 {
            return Err(AppError::Validation(
                "Category name must be at least 2 characters".into(),
            ));
        }

        let color = match self.color.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CATEGORY_COLOR.to_string(),
            Some(c) if HEX_COLOR.is_match(c) => c.to_string(),
            Some(c) => {
                return Err(AppError::Validation(format!(
                    "Invalid color '{}': expected a hex code like #808080",
                    c
                )))
            }
        };

        Ok(NewCategory {
            name: name.to_string(),
            color,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub message: String,
    pub category: Category,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let conn = state.db.get()?;
    Ok(Json(categories::list_categories(&conn)?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let Json(payload) = payload?;
    let new_category = payload.to_new_category()?;

    let conn = state.db.get()?;
    let id = match categories::create_category(&conn, &new_category) {
        Ok(id) => id,
        Err(e) if is_constraint_violation(&e) => {
            return Err(AppError::Conflict("Category already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };
    info!(category_id = id, name = %new_category.name, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            id,
            message: "Category added successfully".into(),
            category: Category {
                id,
                name: new_category.name,
                color: new_category.color,
            },
        }),
    ))
}
