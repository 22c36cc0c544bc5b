pub mod analytics;
pub mod categories;
pub mod expenses;
pub mod filter;
