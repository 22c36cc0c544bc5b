use crate::models::category::{Category, NewCategory};
use rusqlite::{params, Connection, Row};
use tracing::debug;

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
    })
}

pub fn list_categories(conn: &Connection) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, color FROM categories ORDER BY name")?;

    let categories = stmt
        .query_map([], category_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = categories.len(), "Listed categories");
    Ok(categories)
}

/// Fails with a constraint violation when `name` is already taken.
pub fn create_category(conn: &Connection, category: &NewCategory) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO categories (name, color) VALUES (?, ?)",
        params![category.name, category.color],
    )?;
    let id = conn.last_insert_rowid();
    debug!(category_id = id, name = %category.name, "Created category");
    Ok(id)
}
