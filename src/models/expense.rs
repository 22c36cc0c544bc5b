use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    /// Free-form name; not checked against the categories table.
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: String,
}

/// A fully validated expense ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}
