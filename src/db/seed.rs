use crate::db::queries::categories::create_category;
use crate::error::is_constraint_violation;
use crate::models::{NewCategory, DEFAULT_CATEGORIES};
use rusqlite::Connection;

/// Inserts the built-in categories. Safe to run on every start: names that
/// already exist are left untouched. Returns how many were inserted.
pub fn seed_default_categories(conn: &Connection) -> rusqlite::Result<usize> {
    let mut inserted = 0;

    for (name, color) in DEFAULT_CATEGORIES {
        let category = NewCategory {
            name: (*name).to_string(),
            color: (*color).to_string(),
        };
        match create_category(conn, &category) {
            Ok(_) => inserted += 1,
            Err(e) if is_constraint_violation(&e) => {
                tracing::trace!(name = %name, "Default category already present");
            }
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        tracing::info!(count = inserted, "Seeded default categories");
    }
    Ok(inserted)
}
