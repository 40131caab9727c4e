//! Domain models shared by every service in the engine.

pub mod account;
pub mod book;
pub mod budget;
pub mod category;
pub mod frequency;
pub mod goal;
pub mod installment;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use book::{FinanceBook, Settings, CURRENT_SCHEMA_VERSION};
pub use budget::{BudgetOverview, CategoryBudget, MonthlyBudget, PlannedCategory};
pub use category::{ExpenseCategory, IncomeCategory};
pub use frequency::Frequency;
pub use goal::{Contribution, FinancialGoal, GoalPriority, GoalStatus};
pub use installment::{Installment, InstallmentStatus, PaymentRecord, PaymentStatus};
pub use transaction::{AccountTransfer, Expense, Income, TransactionStatus};
