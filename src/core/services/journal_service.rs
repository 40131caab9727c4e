use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::book::FinanceBook;
use crate::domain::frequency::Frequency;
use crate::domain::transaction::{AccountTransfer, Expense, Income, TransactionStatus};
use crate::errors::{EngineError, EngineResult};

use super::ensure_amount;

/// Labels substituted when a display join no longer resolves. A deleted
/// category or account must never make the feed fail.
const FALLBACK_CATEGORY: &str = "Uncategorized";
const FALLBACK_ACCOUNT: &str = "Unknown account";

/// Append/delete operations for the three journal record kinds, plus the
/// merged chronological feed. The journal is the source of truth the ledger
/// projections read from; no balance is updated here.
pub struct JournalService;

#[derive(Debug, Default, Clone)]
pub struct NewIncome {
    pub title: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct NewTransfer {
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl JournalService {
    pub fn add_income(book: &mut FinanceBook, input: NewIncome) -> EngineResult<Uuid> {
        let amount = ensure_amount(input.amount)?;
        Self::ensure_account(book, input.account_id)?;
        if book.income_category(input.category_id).is_none() {
            return Err(EngineError::unknown("income category", input.category_id));
        }
        let income = Income {
            id: Uuid::new_v4(),
            title: input.title,
            amount,
            currency: input
                .currency
                .unwrap_or_else(|| book.settings.default_currency.clone()),
            category_id: input.category_id,
            account_id: input.account_id,
            date: input.date,
            is_recurring: input.is_recurring,
            frequency: input.frequency,
            tags: input.tags,
            notes: input.notes,
            status: TransactionStatus::Completed,
        };
        let id = income.id;
        book.incomes.push(income);
        book.touch();
        Ok(id)
    }

    pub fn add_expense(book: &mut FinanceBook, input: NewExpense) -> EngineResult<Uuid> {
        let amount = ensure_amount(input.amount)?;
        Self::ensure_account(book, input.account_id)?;
        if book.expense_category(input.category_id).is_none() {
            return Err(EngineError::unknown("expense category", input.category_id));
        }
        let expense = Expense {
            id: Uuid::new_v4(),
            title: input.title,
            amount,
            currency: input
                .currency
                .unwrap_or_else(|| book.settings.default_currency.clone()),
            category_id: input.category_id,
            account_id: input.account_id,
            date: input.date,
            is_recurring: input.is_recurring,
            frequency: input.frequency,
            tags: input.tags,
            notes: input.notes,
            location: input.location,
            status: TransactionStatus::Completed,
        };
        let id = expense.id;
        book.expenses.push(expense);
        book.touch();
        Ok(id)
    }

    pub fn add_transfer(book: &mut FinanceBook, input: NewTransfer) -> EngineResult<Uuid> {
        let amount = ensure_amount(input.amount)?;
        if input.from_account_id == input.to_account_id {
            return Err(EngineError::SameAccountTransfer);
        }
        Self::ensure_account(book, input.from_account_id)?;
        Self::ensure_account(book, input.to_account_id)?;
        let transfer = AccountTransfer {
            id: Uuid::new_v4(),
            from_account_id: input.from_account_id,
            to_account_id: input.to_account_id,
            amount,
            date: input.date,
            notes: input.notes,
        };
        let id = transfer.id;
        book.transfers.push(transfer);
        book.touch();
        Ok(id)
    }

    pub fn delete_income(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.incomes.len();
        book.incomes.retain(|income| income.id != id);
        if book.incomes.len() == before {
            return Err(EngineError::unknown("income", id));
        }
        book.touch();
        Ok(())
    }

    pub fn delete_expense(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.expenses.len();
        book.expenses.retain(|expense| expense.id != id);
        if book.expenses.len() == before {
            return Err(EngineError::unknown("expense", id));
        }
        book.touch();
        Ok(())
    }

    pub fn delete_transfer(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.transfers.len();
        book.transfers.retain(|transfer| transfer.id != id);
        if book.transfers.len() == before {
            return Err(EngineError::unknown("transfer", id));
        }
        book.touch();
        Ok(())
    }

    /// Read-only merge of incomes, expenses, and transfers into one feed,
    /// newest first, with display fields joined against the live category
    /// and account tables. Missing foreign keys degrade to fallback labels.
    pub fn all_transactions(book: &FinanceBook) -> Vec<FeedItem> {
        let mut feed: Vec<FeedItem> = Vec::with_capacity(
            book.incomes.len() + book.expenses.len() + book.transfers.len(),
        );

        for income in &book.incomes {
            let category = book
                .income_category(income.category_id)
                .map(|cat| CategoryLabel {
                    name: cat.name.clone(),
                    icon: cat.icon.clone(),
                    color: cat.color.clone(),
                })
                .unwrap_or_default();
            feed.push(FeedItem {
                id: income.id,
                date: income.date,
                title: income.title.clone(),
                amount: income.amount,
                detail: FeedDetail::Income {
                    category,
                    account: Self::account_label(book, income.account_id),
                },
            });
        }

        for expense in &book.expenses {
            let category = book
                .expense_category(expense.category_id)
                .map(|cat| CategoryLabel {
                    name: cat.name.clone(),
                    icon: cat.icon.clone(),
                    color: cat.color.clone(),
                })
                .unwrap_or_default();
            feed.push(FeedItem {
                id: expense.id,
                date: expense.date,
                title: expense.title.clone(),
                amount: expense.amount,
                detail: FeedDetail::Expense {
                    category,
                    account: Self::account_label(book, expense.account_id),
                    location: expense.location.clone(),
                },
            });
        }

        for transfer in &book.transfers {
            feed.push(FeedItem {
                id: transfer.id,
                date: transfer.date,
                title: String::from("Transfer"),
                amount: transfer.amount,
                detail: FeedDetail::Transfer {
                    from_account: Self::account_label(book, transfer.from_account_id),
                    to_account: Self::account_label(book, transfer.to_account_id),
                    notes: transfer.notes.clone(),
                },
            });
        }

        feed.sort_by(|a, b| b.date.cmp(&a.date));
        feed
    }

    fn account_label(book: &FinanceBook, id: Uuid) -> String {
        book.account(id)
            .map(|account| account.name.clone())
            .unwrap_or_else(|| FALLBACK_ACCOUNT.to_string())
    }

    fn ensure_account(book: &FinanceBook, id: Uuid) -> EngineResult<()> {
        if book.account(id).is_some() {
            Ok(())
        } else {
            Err(EngineError::unknown("account", id))
        }
    }
}

/// One row of the merged transaction feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub amount: f64,
    pub detail: FeedDetail,
}

/// Kind discriminator plus the display fields each kind resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedDetail {
    Income {
        category: CategoryLabel,
        account: String,
    },
    Expense {
        category: CategoryLabel,
        account: String,
        location: Option<String>,
    },
    Transfer {
        from_account: String,
        to_account: String,
        notes: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl Default for CategoryLabel {
    fn default() -> Self {
        Self {
            name: FALLBACK_CATEGORY.to_string(),
            icon: String::from("tag"),
            color: String::from("#9e9e9e"),
        }
    }
}
