use uuid::Uuid;

use crate::domain::book::FinanceBook;

/// Pure read-side projection over the journal. Balances are never cached:
/// every call rescans the current journal state, so any mutation is visible
/// to the next read.
pub struct LedgerService;

impl LedgerService {
    /// Derived balance of one account: initial balance, plus incomes, minus
    /// expenses, minus outgoing transfers, plus incoming transfers. An
    /// unknown account contributes nothing and yields 0.
    pub fn balance_of(book: &FinanceBook, account_id: Uuid) -> f64 {
        let initial = book
            .account(account_id)
            .map(|account| account.initial_balance)
            .unwrap_or(0.0);
        let incomes: f64 = book
            .incomes
            .iter()
            .filter(|income| income.account_id == account_id)
            .map(|income| income.amount)
            .sum();
        let expenses: f64 = book
            .expenses
            .iter()
            .filter(|expense| expense.account_id == account_id)
            .map(|expense| expense.amount)
            .sum();
        let outgoing: f64 = book
            .transfers
            .iter()
            .filter(|transfer| transfer.from_account_id == account_id)
            .map(|transfer| transfer.amount)
            .sum();
        let incoming: f64 = book
            .transfers
            .iter()
            .filter(|transfer| transfer.to_account_id == account_id)
            .map(|transfer| transfer.amount)
            .sum();
        initial + incomes - expenses - outgoing + incoming
    }

    /// Sum of derived balances over active accounts. Transfers cancel out
    /// across the whole ledger, so this equals initial balances plus incomes
    /// minus expenses when every account is active.
    pub fn net_worth(book: &FinanceBook) -> f64 {
        book.accounts
            .iter()
            .filter(|account| account.is_active)
            .map(|account| Self::balance_of(book, account.id))
            .sum()
    }
}
