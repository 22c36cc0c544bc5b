//! Spending trends: expenses bucketed by day, week or month over a trailing
//! window ending today.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::models::TrendPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendPeriod {
    Day,
    Week,
    #[default]
    Month,
}

impl TrendPeriod {
    /// Anything other than `day` or `week`, including no value at all, means monthly.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("day") => Self::Day,
            Some("week") => Self::Week,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// `strftime` pattern for bucket labels. `%W` is the Monday-based week of
    /// the year, so week labels only sort chronologically within one year.
    pub fn label_format(&self) -> &'static str {
        match self {
            Self::Day => "%Y-%m-%d",
            Self::Week => "%Y-%W",
            Self::Month => "%Y-%m",
        }
    }

    pub fn lookback_days(&self) -> u64 {
        match self {
            Self::Day => 30,
            Self::Week => 90,
            Self::Month => 365,
        }
    }

    /// First date included in the window that ends on `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.lookback_days()))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn label(&self, date: NaiveDate) -> String {
        date.format(self.label_format()).to_string()
    }
}

/// Groups `(date, amount)` rows into labelled buckets in ascending label order.
/// Rows whose date is not an ISO `YYYY-MM-DD` prefix are skipped.
pub fn bucket_amounts(period: TrendPeriod, rows: &[(String, f64)]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<String, (f64, i64)> = BTreeMap::new();

    for (date, amount) in rows {
        let Some(parsed) = parse_iso_date(date) else {
            tracing::warn!(date = %date, "Skipping expense with unparseable date");
            continue;
        };
        let entry = buckets.entry(period.label(parsed)).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(period, (total, count))| TrendPoint {
            period,
            total,
            count,
        })
        .collect()
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rows(data: &[(&str, f64)]) -> Vec<(String, f64)> {
        data.iter().map(|(d, a)| (d.to_string(), *a)).collect()
    }

    #[test]
    fn test_unknown_periods_fall_back_to_month() {
        assert_eq!(TrendPeriod::from_param(None), TrendPeriod::Month);
        assert_eq!(TrendPeriod::from_param(Some("year")), TrendPeriod::Month);
        assert_eq!(TrendPeriod::from_param(Some("DAY")), TrendPeriod::Month);
        assert_eq!(TrendPeriod::from_param(Some("day")), TrendPeriod::Day);
        assert_eq!(TrendPeriod::from_param(Some("week")), TrendPeriod::Week);
    }

    #[test]
    fn test_window_start_uses_lookback() {
        let today = date("2024-03-31");
        assert_eq!(TrendPeriod::Day.window_start(today), date("2024-03-01"));
        assert_eq!(TrendPeriod::Week.window_start(today), date("2024-01-01"));
        assert_eq!(TrendPeriod::Month.window_start(today), date("2023-04-02"));
    }

    #[test]
    fn test_labels_per_period() {
        let d = date("2024-01-15");
        assert_eq!(TrendPeriod::Day.label(d), "2024-01-15");
        assert_eq!(TrendPeriod::Week.label(d), "2024-03");
        assert_eq!(TrendPeriod::Month.label(d), "2024-01");
        // Days before the first Monday land in week 00.
        assert_eq!(TrendPeriod::Week.label(date("2023-01-01")), "2023-00");
    }

    #[test]
    fn test_bucket_amounts_groups_and_sorts() {
        let data = rows(&[
            ("2024-02-10", 5.0),
            ("2024-01-03", 1.5),
            ("2024-01-28", 2.0),
        ]);
        let points = bucket_amounts(TrendPeriod::Month, &data);
        assert_eq!(
            points,
            vec![
                TrendPoint {
                    period: "2024-01".into(),
                    total: 3.5,
                    count: 2
                },
                TrendPoint {
                    period: "2024-02".into(),
                    total: 5.0,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_single_expense_today_gives_single_day_bucket() {
        let today = date("2024-06-01");
        let data = rows(&[("2024-06-01", 12.25)]);
        let points = bucket_amounts(TrendPeriod::Day, &data);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].period, TrendPeriod::Day.label(today));
        assert_eq!(points[0].total, 12.25);
        assert_eq!(points[0].count, 1);
    }

    #[test]
    fn test_week_labels_carry_year_prefix() {
        let data = rows(&[("2023-12-28", 1.0), ("2024-01-02", 1.0)]);
        let labels: Vec<String> = bucket_amounts(TrendPeriod::Week, &data)
            .into_iter()
            .map(|p| p.period)
            .collect();
        assert_eq!(labels, vec!["2023-52", "2024-01"]);
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let data = rows(&[("yesterday", 3.0), ("2024-01-01", 1.0)]);
        let points = bucket_amounts(TrendPeriod::Day, &data);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total, 1.0);
    }
}
