use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted monthly budget. Only planned values are stored: actual spend
/// is always re-derived from the journal at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyBudget {
    pub id: Uuid,
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    #[serde(default)]
    pub planned: Vec<PlannedCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedCategory {
    pub category_id: Uuid,
    pub planned: f64,
}

/// One row of a budget overview: a category's planned cap against its live
/// spend for the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub category_id: Uuid,
    pub planned: f64,
    pub spent: f64,
}

impl CategoryBudget {
    pub fn remaining(&self) -> f64 {
        self.planned - self.spent
    }
}

/// Planned-versus-actual summary for one month. When no budget is persisted
/// for the month the overview is synthesized from category defaults and
/// flagged `is_virtual` (id stays `None` until the user saves it).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetOverview {
    pub id: Option<Uuid>,
    pub month: String,
    pub total_planned_expenses: f64,
    pub total_actual_expenses: f64,
    pub category_budgets: Vec<CategoryBudget>,
    pub is_virtual: bool,
}

/// Formats a date as a `YYYY-MM` month key.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Validates a `YYYY-MM` month key.
pub fn is_valid_month_key(month: &str) -> bool {
    let Some((year, month_part)) = month.split_once('-') else {
        return false;
    };
    year.len() == 4
        && year.chars().all(|ch| ch.is_ascii_digit())
        && month_part.len() == 2
        && matches!(month_part.parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_pads_single_digit_months() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(month_key(date), "2025-03");
    }

    #[test]
    fn month_key_validation() {
        assert!(is_valid_month_key("2025-01"));
        assert!(is_valid_month_key("1999-12"));
        assert!(!is_valid_month_key("2025-13"));
        assert!(!is_valid_month_key("2025-1"));
        assert!(!is_valid_month_key("25-01"));
        assert!(!is_valid_month_key("2025/01"));
        assert!(!is_valid_month_key("garbage"));
    }
}
