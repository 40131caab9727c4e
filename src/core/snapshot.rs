//! Bulk export/import/reset. Import validates the whole document before a
//! single atomic state swap: a rejected document never partially applies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::book::{FinanceBook, CURRENT_SCHEMA_VERSION};
use crate::errors::{EngineError, EngineResult};

/// Complete serializable state document. Whatever transport the host picks
/// must round-trip this losslessly; `to_json`/`from_json` cover the common
/// case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub version: u8,
    pub data: FinanceBook,
}

/// Produces a full snapshot of the current state.
pub fn export(book: &FinanceBook) -> Snapshot {
    Snapshot {
        version: CURRENT_SCHEMA_VERSION,
        data: book.clone(),
    }
}

/// Replaces all state from a snapshot, all-or-nothing.
pub fn import(book: &mut FinanceBook, snapshot: Snapshot) -> EngineResult<()> {
    validate(&snapshot)?;
    tracing::info!(
        accounts = snapshot.data.accounts.len(),
        transactions = snapshot.data.incomes.len()
            + snapshot.data.expenses.len()
            + snapshot.data.transfers.len(),
        "importing snapshot"
    );
    *book = snapshot.data;
    Ok(())
}

/// Clears all state back to the seeded defaults.
pub fn reset(book: &mut FinanceBook) {
    tracing::info!("resetting all financial data");
    *book = FinanceBook::new();
}

pub fn to_json(snapshot: &Snapshot) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(raw: &str) -> EngineResult<Snapshot> {
    serde_json::from_str(raw)
        .map_err(|err| EngineError::ImportMalformed(format!("not a valid snapshot: {err}")))
}

fn validate(snapshot: &Snapshot) -> EngineResult<()> {
    if snapshot.version > CURRENT_SCHEMA_VERSION {
        return Err(EngineError::ImportMalformed(format!(
            "unsupported schema version {}",
            snapshot.version
        )));
    }
    let data = &snapshot.data;

    let mut account_ids = BTreeSet::new();
    for account in &data.accounts {
        if !account.initial_balance.is_finite() {
            return Err(EngineError::ImportMalformed(format!(
                "account `{}` has a non-finite initial balance",
                account.name
            )));
        }
        if !account_ids.insert(account.id) {
            return Err(EngineError::ImportMalformed(format!(
                "duplicate account id {}",
                account.id
            )));
        }
    }
    if !data.accounts.is_empty() {
        let defaults = data.accounts.iter().filter(|a| a.is_default).count();
        if defaults != 1 {
            return Err(EngineError::ImportMalformed(format!(
                "expected exactly one default account, found {defaults}"
            )));
        }
    }

    for amount in data
        .incomes
        .iter()
        .map(|income| income.amount)
        .chain(data.expenses.iter().map(|expense| expense.amount))
        .chain(data.transfers.iter().map(|transfer| transfer.amount))
    {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::ImportMalformed(format!(
                "journal contains a non-positive amount: {amount}"
            )));
        }
    }
    if data
        .transfers
        .iter()
        .any(|transfer| transfer.from_account_id == transfer.to_account_id)
    {
        return Err(EngineError::ImportMalformed(
            "transfer with identical source and destination".into(),
        ));
    }

    for goal in &data.goals {
        if !goal.target_amount.is_finite()
            || goal.target_amount <= 0.0
            || !goal.current_amount.is_finite()
        {
            return Err(EngineError::ImportMalformed(format!(
                "goal `{}` has invalid amounts",
                goal.title
            )));
        }
    }
    for plan in &data.installments {
        if !plan.total_amount.is_finite()
            || plan.total_amount <= 0.0
            || !plan.paid_amount.is_finite()
            || plan.paid_amount < 0.0
        {
            return Err(EngineError::ImportMalformed(format!(
                "installment `{}` has invalid amounts",
                plan.title
            )));
        }
    }

    let mut months = BTreeSet::new();
    for budget in &data.budgets {
        if !months.insert(budget.month.as_str()) {
            return Err(EngineError::ImportMalformed(format!(
                "duplicate budget for month {}",
                budget.month
            )));
        }
    }

    Ok(())
}
