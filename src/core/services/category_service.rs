use uuid::Uuid;

use crate::domain::book::FinanceBook;
use crate::domain::category::{ExpenseCategory, IncomeCategory};
use crate::errors::{EngineError, EngineResult};

/// CRUD for expense and income categories. Seeded defaults can be edited
/// but never deleted; a category still referenced by the journal cannot be
/// hard-deleted.
pub struct CategoryService;

/// Partial update shared by both category kinds. `None` fields are left
/// untouched; the expense-only fields are ignored for income categories.
#[derive(Debug, Default, Clone)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub order: Option<u32>,
    pub is_essential: Option<bool>,
    pub monthly_budget: Option<Option<f64>>,
}

impl CategoryService {
    pub fn add_expense_category(
        book: &mut FinanceBook,
        category: ExpenseCategory,
    ) -> EngineResult<Uuid> {
        Self::validate_expense_name(book, None, &category.name)?;
        let id = category.id;
        book.expense_categories.push(category);
        book.touch();
        Ok(id)
    }

    pub fn add_income_category(
        book: &mut FinanceBook,
        category: IncomeCategory,
    ) -> EngineResult<Uuid> {
        Self::validate_income_name(book, None, &category.name)?;
        let id = category.id;
        book.income_categories.push(category);
        book.touch();
        Ok(id)
    }

    pub fn update_expense_category(
        book: &mut FinanceBook,
        id: Uuid,
        patch: CategoryPatch,
    ) -> EngineResult<()> {
        if let Some(name) = patch.name.as_deref() {
            Self::validate_expense_name(book, Some(id), name)?;
        }
        if let Some(Some(budget)) = patch.monthly_budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(EngineError::InvalidAmount(budget));
            }
        }
        let category = book
            .expense_categories
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or(EngineError::unknown("expense category", id))?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(order) = patch.order {
            category.order = order;
        }
        if let Some(essential) = patch.is_essential {
            category.is_essential = essential;
        }
        if let Some(budget) = patch.monthly_budget {
            category.monthly_budget = budget;
        }
        book.touch();
        Ok(())
    }

    pub fn update_income_category(
        book: &mut FinanceBook,
        id: Uuid,
        patch: CategoryPatch,
    ) -> EngineResult<()> {
        if let Some(name) = patch.name.as_deref() {
            Self::validate_income_name(book, Some(id), name)?;
        }
        let category = book
            .income_categories
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or(EngineError::unknown("income category", id))?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(order) = patch.order {
            category.order = order;
        }
        book.touch();
        Ok(())
    }

    pub fn remove_expense_category(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let category = book
            .expense_category(id)
            .ok_or(EngineError::unknown("expense category", id))?;
        if category.is_default {
            return Err(EngineError::DefaultCategoryProtected);
        }
        if book.expense_category_is_referenced(id) {
            return Err(EngineError::DanglingReference {
                kind: "expense category",
                id,
            });
        }
        book.expense_categories.retain(|cat| cat.id != id);
        book.touch();
        Ok(())
    }

    pub fn remove_income_category(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let category = book
            .income_category(id)
            .ok_or(EngineError::unknown("income category", id))?;
        if category.is_default {
            return Err(EngineError::DefaultCategoryProtected);
        }
        if book.income_category_is_referenced(id) {
            return Err(EngineError::DanglingReference {
                kind: "income category",
                id,
            });
        }
        book.income_categories.retain(|cat| cat.id != id);
        book.touch();
        Ok(())
    }

    fn validate_expense_name(
        book: &FinanceBook,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> EngineResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.expense_categories.iter().any(|cat| {
            let name = cat.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| cat.id != id)
        });
        if duplicate {
            Err(EngineError::DuplicateName(candidate.to_string()))
        } else {
            Ok(())
        }
    }

    fn validate_income_name(
        book: &FinanceBook,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> EngineResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.income_categories.iter().any(|cat| {
            let name = cat.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| cat.id != id)
        });
        if duplicate {
            Err(EngineError::DuplicateName(candidate.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::journal_service::{JournalService, NewExpense};
    use chrono::NaiveDate;

    #[test]
    fn default_categories_cannot_be_deleted() {
        let mut book = FinanceBook::new();
        let id = book.expense_categories[0].id;
        let err = CategoryService::remove_expense_category(&mut book, id)
            .expect_err("defaults are protected");
        assert!(matches!(err, EngineError::DefaultCategoryProtected));
    }

    #[test]
    fn referenced_category_cannot_be_hard_deleted() {
        let mut book = FinanceBook::new();
        let custom = ExpenseCategory::new("Hobby", "palette", "#00bcd4");
        let category_id = CategoryService::add_expense_category(&mut book, custom).unwrap();
        let account_id = book.accounts[0].id;
        JournalService::add_expense(
            &mut book,
            NewExpense {
                title: "Paint".into(),
                amount: 9.0,
                category_id,
                account_id,
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                ..NewExpense::default()
            },
        )
        .unwrap();

        let err = CategoryService::remove_expense_category(&mut book, category_id)
            .expect_err("referenced category");
        assert!(matches!(err, EngineError::DanglingReference { .. }));
        assert!(book.expense_category(category_id).is_some());
    }

    #[test]
    fn unreferenced_custom_category_is_deleted() {
        let mut book = FinanceBook::new();
        let custom = IncomeCategory::new("Dividends", "chart", "#3f51b5");
        let id = CategoryService::add_income_category(&mut book, custom).unwrap();
        CategoryService::remove_income_category(&mut book, id).unwrap();
        assert!(book.income_category(id).is_none());
    }

    #[test]
    fn monthly_budget_edit_rejects_negative_values() {
        let mut book = FinanceBook::new();
        let id = book.expense_categories[0].id;
        let err = CategoryService::update_expense_category(
            &mut book,
            id,
            CategoryPatch {
                monthly_budget: Some(Some(-5.0)),
                ..CategoryPatch::default()
            },
        )
        .expect_err("negative budget");
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
}
