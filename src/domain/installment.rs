use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::Frequency;

/// A debt paid off in periodic slices, with a running paid total and an
/// append-only payment sub-ledger (negative records are refunds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Installment {
    pub id: Uuid,
    pub title: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    /// Expected per-period amount. `paid_amount` tracking allows partial
    /// payments, so `paid_installments * installment_amount` is a target
    /// rather than an identity.
    pub installment_amount: f64,
    pub total_installments: u32,
    pub paid_installments: u32,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_account_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub next_payment_date: NaiveDate,
    #[serde(default)]
    pub status: InstallmentStatus,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

impl Installment {
    pub fn remaining_amount(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_amount <= 0.0 {
            return 0.0;
        }
        (self.paid_amount / self.total_amount * 100.0).clamp(0.0, 100.0)
    }

    /// Re-derives `status` from current state. Order matters: completion
    /// wins over overdue, overdue over active.
    pub fn recompute_status(&mut self, today: NaiveDate) {
        self.status = if self.paid_amount >= self.total_amount {
            InstallmentStatus::Completed
        } else if self.next_payment_date < today {
            InstallmentStatus::Overdue
        } else {
            InstallmentStatus::Active
        };
    }
}

/// One signed entry in an installment's audit trail. Never mutated or
/// removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    #[default]
    Active,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Refunded,
}
