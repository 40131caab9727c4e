use uuid::Uuid;

use crate::domain::book::FinanceBook;
use crate::domain::budget::{
    is_valid_month_key, month_key, BudgetOverview, CategoryBudget, MonthlyBudget, PlannedCategory,
};
use crate::errors::{EngineError, EngineResult};

/// Planned-versus-actual budget aggregation for calendar months.
///
/// Planned values are the only persisted input; spent figures are always
/// summed live from the expense journal, so an overview can never go stale.
pub struct BudgetService;

impl BudgetService {
    /// Builds the overview for `month` (`YYYY-MM`). A persisted budget
    /// supplies the planned values; otherwise a virtual overview is
    /// synthesized from category `monthly_budget` defaults and flagged as
    /// such. Rows with nothing planned and nothing spent are omitted from
    /// the result (they stay in storage).
    pub fn overview(book: &FinanceBook, month: &str) -> BudgetOverview {
        let persisted = book.budget_for_month(month);
        let mut rows: Vec<CategoryBudget> = Vec::new();

        match persisted {
            Some(budget) => {
                for entry in &budget.planned {
                    rows.push(CategoryBudget {
                        category_id: entry.category_id,
                        planned: entry.planned,
                        spent: Self::spent_in_month(book, entry.category_id, month),
                    });
                }
                // Categories added after the budget was saved still show
                // their live spend.
                for category in &book.expense_categories {
                    if budget
                        .planned
                        .iter()
                        .all(|entry| entry.category_id != category.id)
                    {
                        rows.push(CategoryBudget {
                            category_id: category.id,
                            planned: 0.0,
                            spent: Self::spent_in_month(book, category.id, month),
                        });
                    }
                }
            }
            None => {
                for category in &book.expense_categories {
                    rows.push(CategoryBudget {
                        category_id: category.id,
                        planned: category.monthly_budget.unwrap_or(0.0),
                        spent: Self::spent_in_month(book, category.id, month),
                    });
                }
            }
        }

        rows.retain(|row| row.planned != 0.0 || row.spent != 0.0);
        let total_planned_expenses = rows.iter().map(|row| row.planned).sum();
        let total_actual_expenses = rows.iter().map(|row| row.spent).sum();
        BudgetOverview {
            id: persisted.map(|budget| budget.id),
            month: month.to_string(),
            total_planned_expenses,
            total_actual_expenses,
            category_budgets: rows,
            is_virtual: persisted.is_none(),
        }
    }

    /// Persists a budget for `month`, seeding planned values from each
    /// expense category's `monthly_budget` default.
    pub fn create_budget(book: &mut FinanceBook, month: &str) -> EngineResult<Uuid> {
        if !is_valid_month_key(month) {
            return Err(EngineError::InvalidMonth(month.to_string()));
        }
        if book.budget_for_month(month).is_some() {
            return Err(EngineError::BudgetExists(month.to_string()));
        }
        let planned = book
            .expense_categories
            .iter()
            .map(|category| PlannedCategory {
                category_id: category.id,
                planned: category.monthly_budget.unwrap_or(0.0),
            })
            .collect();
        let budget = MonthlyBudget {
            id: Uuid::new_v4(),
            month: month.to_string(),
            planned,
        };
        let id = budget.id;
        book.budgets.push(budget);
        book.touch();
        Ok(id)
    }

    /// Overwrites a persisted budget's planned values. Spent is never
    /// stored, so there is nothing else to update.
    pub fn update_budget(
        book: &mut FinanceBook,
        id: Uuid,
        planned: Vec<PlannedCategory>,
    ) -> EngineResult<()> {
        for entry in &planned {
            if !entry.planned.is_finite() || entry.planned < 0.0 {
                return Err(EngineError::InvalidAmount(entry.planned));
            }
        }
        let budget = book
            .budgets
            .iter_mut()
            .find(|budget| budget.id == id)
            .ok_or(EngineError::unknown("budget", id))?;
        budget.planned = planned;
        book.touch();
        Ok(())
    }

    pub fn remove_budget(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.budgets.len();
        book.budgets.retain(|budget| budget.id != id);
        if book.budgets.len() == before {
            return Err(EngineError::unknown("budget", id));
        }
        book.touch();
        Ok(())
    }

    fn spent_in_month(book: &FinanceBook, category_id: Uuid, month: &str) -> f64 {
        book.expenses
            .iter()
            .filter(|expense| expense.category_id == category_id && month_key(expense.date) == month)
            .map(|expense| expense.amount)
            .sum()
    }
}
