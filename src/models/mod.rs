pub mod analytics;
pub mod category;
pub mod expense;

pub use analytics::{CategoryTotal, SpendingSummary, TrendPoint};
pub use category::{Category, NewCategory, DEFAULT_CATEGORIES, DEFAULT_CATEGORY_COLOR};
pub use expense::{Expense, NewExpense};
