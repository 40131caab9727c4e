use uuid::Uuid;

use crate::domain::account::{Account, AccountKind};
use crate::domain::book::FinanceBook;
use crate::errors::{EngineError, EngineResult};

/// Validated CRUD and archival rules for accounts.
pub struct AccountService;

/// What `remove` actually did: accounts with journal history are archived
/// instead of deleted so the history keeps resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRemoval {
    Deleted,
    Archived,
}

/// Partial update for an account. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub currency: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub initial_balance: Option<f64>,
    pub order: Option<u32>,
}

impl AccountService {
    pub fn add(book: &mut FinanceBook, mut account: Account) -> EngineResult<Uuid> {
        Self::validate_name(book, None, &account.name)?;
        if book.accounts.is_empty() {
            account.is_default = true;
        } else if account.is_default {
            Self::clear_default(book);
        }
        let id = account.id;
        book.accounts.push(account);
        book.touch();
        Ok(id)
    }

    pub fn update(book: &mut FinanceBook, id: Uuid, patch: AccountPatch) -> EngineResult<()> {
        if let Some(name) = patch.name.as_deref() {
            Self::validate_name(book, Some(id), name)?;
        }
        let account = book
            .account_mut(id)
            .ok_or(EngineError::unknown("account", id))?;
        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
        }
        if let Some(currency) = patch.currency {
            account.currency = currency;
        }
        if let Some(color) = patch.color {
            account.color = Some(color);
        }
        if let Some(icon) = patch.icon {
            account.icon = Some(icon);
        }
        if let Some(initial_balance) = patch.initial_balance {
            account.initial_balance = initial_balance;
        }
        if let Some(order) = patch.order {
            account.order = order;
        }
        book.touch();
        Ok(())
    }

    /// Moves the default flag to `id`. There is always exactly one default.
    pub fn set_default(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        if book.account(id).is_none() {
            return Err(EngineError::unknown("account", id));
        }
        Self::clear_default(book);
        if let Some(account) = book.account_mut(id) {
            account.is_default = true;
        }
        book.touch();
        Ok(())
    }

    /// Hides the account from selection while keeping its history.
    pub fn archive(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let account = book
            .account_mut(id)
            .ok_or(EngineError::unknown("account", id))?;
        account.is_active = false;
        book.touch();
        Ok(())
    }

    pub fn unarchive(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let account = book
            .account_mut(id)
            .ok_or(EngineError::unknown("account", id))?;
        account.is_active = true;
        book.touch();
        Ok(())
    }

    /// Removes an account. The default account and the last remaining
    /// account are protected; an account with journal references is archived
    /// instead of hard-deleted.
    pub fn remove(book: &mut FinanceBook, id: Uuid) -> EngineResult<AccountRemoval> {
        let account = book.account(id).ok_or(EngineError::unknown("account", id))?;
        if account.is_default || book.accounts.len() == 1 {
            return Err(EngineError::DefaultAccountProtected);
        }
        if book.account_is_referenced(id) {
            Self::archive(book, id)?;
            tracing::debug!(account = %id, "account has journal references, archived");
            return Ok(AccountRemoval::Archived);
        }
        book.accounts.retain(|account| account.id != id);
        book.touch();
        Ok(AccountRemoval::Deleted)
    }

    /// Accounts available for selection in forms, in display order.
    pub fn active(book: &FinanceBook) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = book
            .accounts
            .iter()
            .filter(|account| account.is_active)
            .collect();
        accounts.sort_by_key(|account| account.order);
        accounts
    }

    fn clear_default(book: &mut FinanceBook) {
        for account in &mut book.accounts {
            account.is_default = false;
        }
    }

    fn validate_name(book: &FinanceBook, exclude: Option<Uuid>, candidate: &str) -> EngineResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.accounts.iter().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(EngineError::DuplicateName(candidate.to_string()))
        } else {
            Ok(())
        }
    }
}
