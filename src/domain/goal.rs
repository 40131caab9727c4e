use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target with an incrementally maintained running total and an
/// append-only contribution sub-ledger.
///
/// `current_amount` is authoritative and kept in lock-step with the
/// contribution log: every mutation of one appends exactly one record to the
/// other. It is deliberately not re-derived by summing at read time, so the
/// total survives even if old contribution records are ever pruned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

impl FinancialGoal {
    pub fn new(title: impl Into<String>, target_amount: f64, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target_amount,
            current_amount: 0.0,
            currency: currency.into(),
            category: String::from("General"),
            priority: GoalPriority::Medium,
            deadline: None,
            status: GoalStatus::Active,
            contributions: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Progress towards the target as a percentage, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

/// One signed adjustment in a goal's audit trail. Negative amounts are
/// withdrawals. Records are never mutated or removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    pub id: Uuid,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Contribution {
    pub fn new(amount: f64, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date: Utc::now(),
            notes,
        }
    }
}

/// Goal completion is monotonic: once completed, never back to active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}
