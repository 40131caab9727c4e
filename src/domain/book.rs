use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::{Account, AccountKind},
    budget::MonthlyBudget,
    category::{ExpenseCategory, IncomeCategory},
    goal::FinancialGoal,
    installment::Installment,
    transaction::{AccountTransfer, Expense, Income},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Root aggregate for the whole engine: every entity lives in exactly one of
/// these collections, and all services mutate through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceBook {
    pub id: Uuid,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    #[serde(default)]
    pub income_categories: Vec<IncomeCategory>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub transfers: Vec<AccountTransfer>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    #[serde(default)]
    pub installments: Vec<Installment>,
    #[serde(default)]
    pub budgets: Vec<MonthlyBudget>,
    /// Goal ids whose completion has already been celebrated. Persisted so
    /// the one-time completion signal survives reloads.
    #[serde(default)]
    pub celebrated_goals: BTreeSet<Uuid>,
    #[serde(default)]
    pub settings: Settings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "FinanceBook::schema_version_default")]
    pub schema_version: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub default_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: String::from("USD"),
        }
    }
}

impl FinanceBook {
    /// Creates a book seeded with the default categories and a default Cash
    /// account. This is also the state `reset` returns to.
    pub fn new() -> Self {
        let now = Utc::now();
        let mut cash = Account::new("Cash", AccountKind::Cash, "USD");
        cash.is_default = true;
        Self {
            id: Uuid::new_v4(),
            accounts: vec![cash],
            expense_categories: ExpenseCategory::defaults(),
            income_categories: IncomeCategory::defaults(),
            incomes: Vec::new(),
            expenses: Vec::new(),
            transfers: Vec::new(),
            goals: Vec::new(),
            installments: Vec::new(),
            budgets: Vec::new(),
            celebrated_goals: BTreeSet::new(),
            settings: Settings::default(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn expense_category(&self, id: Uuid) -> Option<&ExpenseCategory> {
        self.expense_categories.iter().find(|cat| cat.id == id)
    }

    pub fn income_category(&self, id: Uuid) -> Option<&IncomeCategory> {
        self.income_categories.iter().find(|cat| cat.id == id)
    }

    pub fn goal(&self, id: Uuid) -> Option<&FinancialGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut FinancialGoal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn installment(&self, id: Uuid) -> Option<&Installment> {
        self.installments.iter().find(|plan| plan.id == id)
    }

    pub fn installment_mut(&mut self, id: Uuid) -> Option<&mut Installment> {
        self.installments.iter_mut().find(|plan| plan.id == id)
    }

    pub fn budget(&self, id: Uuid) -> Option<&MonthlyBudget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_for_month(&self, month: &str) -> Option<&MonthlyBudget> {
        self.budgets.iter().find(|budget| budget.month == month)
    }

    /// True when any journal record references the account.
    pub fn account_is_referenced(&self, id: Uuid) -> bool {
        self.incomes.iter().any(|income| income.account_id == id)
            || self.expenses.iter().any(|expense| expense.account_id == id)
            || self
                .transfers
                .iter()
                .any(|transfer| transfer.from_account_id == id || transfer.to_account_id == id)
    }

    pub fn expense_category_is_referenced(&self, id: Uuid) -> bool {
        self.expenses.iter().any(|expense| expense.category_id == id)
    }

    pub fn income_category_is_referenced(&self, id: Uuid) -> bool {
        self.incomes.iter().any(|income| income.category_id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for FinanceBook {
    fn default() -> Self {
        Self::new()
    }
}
