use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::Frequency;

/// Money entering an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
}

/// Money leaving an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
}

/// Money moved between two accounts. Has no category; it cancels out in
/// net-worth terms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountTransfer {
    pub id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
}
