use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Recurrence cadence shared by scheduled transactions and installment plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Returns the next occurrence after `from`, clamping to the end of
    /// shorter months (Jan 31 + monthly = Feb 28/29).
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::weeks(1),
            Frequency::Biweekly => from + Duration::weeks(2),
            Frequency::Monthly => shift_month(from, 1),
            Frequency::Quarterly => shift_month(from, 3),
            Frequency::Yearly => shift_year(from, 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Every 2 Weeks",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_clamps_to_end_of_february() {
        assert_eq!(Frequency::Monthly.next_date(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(Frequency::Monthly.next_date(date(2024, 1, 31)), date(2024, 2, 29));
    }

    #[test]
    fn quarterly_crosses_year_boundary() {
        assert_eq!(Frequency::Quarterly.next_date(date(2025, 11, 15)), date(2026, 2, 15));
    }

    #[test]
    fn weekly_and_biweekly_advance_by_days() {
        assert_eq!(Frequency::Weekly.next_date(date(2025, 3, 1)), date(2025, 3, 8));
        assert_eq!(Frequency::Biweekly.next_date(date(2025, 3, 1)), date(2025, 3, 15));
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(Frequency::Yearly.next_date(date(2024, 2, 29)), date(2025, 2, 28));
    }
}
