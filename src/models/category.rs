use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY_COLOR: &str = "#808080";

/// Categories created on first start, with their chart colors.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Food", "#FF6384"),
    ("Transport", "#36A2EB"),
    ("Entertainment", "#FFCE56"),
    ("Shopping", "#4BC0C0"),
    ("Bills", "#9966FF"),
    ("Health", "#FF9F40"),
    ("Other", "#C9CBCF"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}
