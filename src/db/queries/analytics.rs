use crate::db::queries::filter::ExpenseFilter;
use crate::models::analytics::CategoryTotal;
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

/// Per-category count and sum over the filtered rows, largest total first.
pub fn totals_by_category(
    conn: &Connection,
    filter: &ExpenseFilter,
) -> rusqlite::Result<Vec<CategoryTotal>> {
    let clause = filter.where_clause();
    let sql = format!(
        "SELECT category, SUM(amount) AS total, COUNT(*) AS count
         FROM expenses {}
         GROUP BY category
         ORDER BY total DESC, category",
        clause.sql
    );

    let mut stmt = conn.prepare(&sql)?;
    let totals = stmt
        .query_map(params_from_iter(clause.params.iter()), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(categories = totals.len(), "Computed category totals");
    Ok(totals)
}

/// Sum of all filtered amounts; zero when nothing matches.
pub fn grand_total(conn: &Connection, filter: &ExpenseFilter) -> rusqlite::Result<f64> {
    let clause = filter.where_clause();
    let sql = format!(
        "SELECT COALESCE(SUM(amount), 0.0) FROM expenses {}",
        clause.sql
    );
    conn.query_row(&sql, params_from_iter(clause.params.iter()), |row| {
        row.get(0)
    })
}

/// `(date, amount)` for every expense dated on or after `since`.
pub fn amounts_since(conn: &Connection, since: &str) -> rusqlite::Result<Vec<(String, f64)>> {
    let mut stmt =
        conn.prepare("SELECT date, amount FROM expenses WHERE date >= ? ORDER BY date")?;
    let rows = stmt
        .query_map([since], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(since, count = rows.len(), "Loaded expenses for trends");
    Ok(rows)
}
