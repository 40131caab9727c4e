//! Stateless services that own the engine's mutation and read contracts.

pub mod account_service;
pub mod budget_service;
pub mod category_service;
pub mod goal_service;
pub mod installment_service;
pub mod journal_service;
pub mod ledger_service;

pub use account_service::{AccountPatch, AccountRemoval, AccountService};
pub use budget_service::BudgetService;
pub use category_service::{CategoryPatch, CategoryService};
pub use goal_service::{ContributionOutcome, GoalPatch, GoalService};
pub use installment_service::{
    InstallmentPatch, InstallmentService, NewInstallment, PaymentInput, PaymentMeta,
};
pub use journal_service::{
    CategoryLabel, FeedDetail, FeedItem, JournalService, NewExpense, NewIncome, NewTransfer,
};
pub use ledger_service::LedgerService;

use crate::errors::{EngineError, EngineResult};

/// Rejects non-finite or non-positive amounts.
pub(crate) fn ensure_amount(amount: f64) -> EngineResult<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(EngineError::InvalidAmount(amount))
    }
}
