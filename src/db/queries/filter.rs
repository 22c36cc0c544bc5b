//! Optional-predicate filtering shared by expense listing and the summary
//! aggregates, so both always see the same row set for the same criteria.

use serde::Deserialize;

/// Category filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ExpenseFilter {
    /// Inclusive lower bound, compared lexically against the stored ISO date.
    pub start_date: Option<String>,
    /// Inclusive upper bound.
    pub end_date: Option<String>,
    pub category: Option<String>,
}

/// A SQL predicate with its positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<String>,
}

impl ExpenseFilter {
    /// Predicate/value pairs for every criterion that is present, in the fixed
    /// order start date, end date, category. Empty strings count as absent.
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        let mut predicates = Vec::new();

        if let Some(start) = non_empty(&self.start_date) {
            predicates.push(("date >= ?", start));
        }
        if let Some(end) = non_empty(&self.end_date) {
            predicates.push(("date <= ?", end));
        }
        if let Some(category) = non_empty(&self.category) {
            if category != ALL_CATEGORIES {
                predicates.push(("category = ?", category));
            }
        }

        predicates
    }

    pub fn where_clause(&self) -> WhereClause {
        let predicates = self.predicates();

        let mut sql = String::from("WHERE 1=1");
        let mut params = Vec::with_capacity(predicates.len());
        for (predicate, value) in predicates {
            sql.push_str(" AND ");
            sql.push_str(predicate);
            params.push(value.to_string());
        }

        WhereClause { sql, params }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
