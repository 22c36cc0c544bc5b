use crate::db::queries::filter::ExpenseFilter;
use crate::models::expense::{Expense, NewExpense};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::{debug, trace};

const EXPENSE_COLUMNS: &str = "id, amount, category, description, date, created_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Matching expenses, newest date first. Rows sharing a date come back
/// newest insert first.
pub fn list_expenses(conn: &Connection, filter: &ExpenseFilter) -> rusqlite::Result<Vec<Expense>> {
    let clause = filter.where_clause();
    let sql = format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses {} ORDER BY date DESC, id DESC",
        clause.sql
    );

    let mut stmt = conn.prepare(&sql)?;
    let expenses = stmt
        .query_map(params_from_iter(clause.params.iter()), expense_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = expenses.len(), "Listed expenses");
    Ok(expenses)
}

pub fn get_expense(conn: &Connection, id: i64) -> rusqlite::Result<Option<Expense>> {
    trace!(expense_id = id, "Fetching expense");
    conn.query_row(
        &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"),
        [id],
        expense_from_row,
    )
    .optional()
}

pub fn create_expense(conn: &Connection, expense: &NewExpense) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (amount, category, description, date) VALUES (?, ?, ?, ?)",
        params![
            expense.amount,
            expense.category,
            expense.description,
            expense.date
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(expense_id = id, amount = expense.amount, category = %expense.category, "Created expense");
    Ok(id)
}

/// Overwrites all four mutable fields. Returns false when no row has `id`.
pub fn update_expense(conn: &Connection, id: i64, expense: &NewExpense) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE expenses SET amount = ?, category = ?, description = ?, date = ? WHERE id = ?",
        params![
            expense.amount,
            expense.category,
            expense.description,
            expense.date,
            id
        ],
    )?;
    if rows > 0 {
        debug!(expense_id = id, "Updated expense");
    }
    Ok(rows > 0)
}

pub fn delete_expense(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM expenses WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(expense_id = id, "Deleted expense");
    }
    Ok(rows > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use std::path::Path;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();
        conn
    }

    fn new_expense(amount: f64, category: &str, date: &str) -> NewExpense {
        NewExpense {
            amount,
            category: category.into(),
            description: String::new(),
            date: date.into(),
        }
    }

    #[test]
    fn test_create_and_get_expense() {
        let conn = setup();
        let id = create_expense(&conn, &new_expense(42.5, "Food", "2024-01-15")).unwrap();

        let expense = get_expense(&conn, id).unwrap().expect("expense should exist");
        assert_eq!(expense.id, id);
        assert_eq!(expense.amount, 42.5);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.description, "");
        assert_eq!(expense.date, "2024-01-15");
        assert!(!expense.created_at.is_empty());
    }

    #[test]
    fn test_list_orders_by_date_descending() {
        let conn = setup();
        create_expense(&conn, &new_expense(1.0, "Food", "2024-01-01")).unwrap();
        create_expense(&conn, &new_expense(2.0, "Food", "2024-03-01")).unwrap();
        create_expense(&conn, &new_expense(3.0, "Food", "2024-02-01")).unwrap();

        let dates: Vec<String> = list_expenses(&conn, &ExpenseFilter::default())
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_list_applies_date_bounds_inclusively() {
        let conn = setup();
        create_expense(&conn, &new_expense(1.0, "Food", "2024-01-01")).unwrap();
        create_expense(&conn, &new_expense(2.0, "Food", "2024-01-31")).unwrap();
        create_expense(&conn, &new_expense(3.0, "Food", "2024-02-01")).unwrap();

        let filter = ExpenseFilter {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            category: None,
        };
        let amounts: Vec<f64> = list_expenses(&conn, &filter)
            .unwrap()
            .into_iter()
            .map(|e| e.amount)
            .collect();
        assert_eq!(amounts, vec![2.0, 1.0]);
    }

    #[test]
    fn test_list_by_category() {
        let conn = setup();
        create_expense(&conn, &new_expense(1.0, "Food", "2024-01-01")).unwrap();
        create_expense(&conn, &new_expense(2.0, "Bills", "2024-01-02")).unwrap();

        let filter = ExpenseFilter {
            category: Some("Bills".into()),
            ..Default::default()
        };
        let found = list_expenses(&conn, &filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Bills");
    }

    #[test]
    fn test_update_and_delete_report_missing_rows() {
        let conn = setup();
        let id = create_expense(&conn, &new_expense(1.0, "Food", "2024-01-01")).unwrap();

        assert!(update_expense(&conn, id, &new_expense(9.0, "Other", "2024-02-02")).unwrap());
        let updated = get_expense(&conn, id).unwrap().unwrap();
        assert_eq!(updated.amount, 9.0);
        assert_eq!(updated.category, "Other");

        assert!(!update_expense(&conn, id + 100, &new_expense(1.0, "x", "y")).unwrap());
        assert!(delete_expense(&conn, id).unwrap());
        assert!(!delete_expense(&conn, id).unwrap());
        assert!(get_expense(&conn, id).unwrap().is_none());
    }
}
