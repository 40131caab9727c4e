use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A money holder tracked by the ledger. The balance is never stored here;
/// it is always derived from the journal plus `initial_balance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub initial_balance: f64,
    /// Archived accounts stay in the book for history but are hidden from
    /// selection and excluded from net worth.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    /// Display ordering only.
    #[serde(default)]
    pub order: u32,
}

fn default_true() -> bool {
    true
}

impl Account {
    pub fn new(name: impl Into<String>, kind: AccountKind, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            currency: currency.into(),
            color: None,
            icon: None,
            initial_balance: 0.0,
            is_active: true,
            is_default: false,
            order: 0,
        }
    }

    pub fn with_initial_balance(mut self, initial_balance: f64) -> Self {
        self.initial_balance = initial_balance;
        self
    }
}

/// Supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Cash,
    Bank,
    MobileWallet,
    CreditCard,
    Savings,
    Investment,
}
