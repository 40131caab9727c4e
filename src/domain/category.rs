use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending classification. Expense categories additionally carry budgeting
/// hints (`is_essential`, `monthly_budget`) that income categories do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub order: u32,
    /// Seeded categories cannot be deleted, only edited.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_essential: bool,
    /// Optional per-category monthly cap used to seed budget overviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
}

impl ExpenseCategory {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            order: 0,
            is_default: false,
            is_essential: false,
            monthly_budget: None,
        }
    }

    /// The category set a fresh (or reset) book starts with.
    pub fn defaults() -> Vec<ExpenseCategory> {
        const SEED: &[(&str, &str, &str, bool)] = &[
            ("Groceries", "shopping-cart", "#4caf50", true),
            ("Housing", "home", "#795548", true),
            ("Transport", "bus", "#2196f3", true),
            ("Utilities", "bolt", "#ff9800", true),
            ("Health", "heart", "#e91e63", true),
            ("Entertainment", "film", "#9c27b0", false),
            ("Dining Out", "utensils", "#ff5722", false),
            ("Other", "tag", "#607d8b", false),
        ];
        SEED.iter()
            .enumerate()
            .map(|(index, (name, icon, color, essential))| {
                let mut category = ExpenseCategory::new(*name, *icon, *color);
                category.order = index as u32;
                category.is_default = true;
                category.is_essential = *essential;
                category
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeCategory {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_default: bool,
}

impl IncomeCategory {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            order: 0,
            is_default: false,
        }
    }

    pub fn defaults() -> Vec<IncomeCategory> {
        const SEED: &[(&str, &str, &str)] = &[
            ("Salary", "briefcase", "#4caf50"),
            ("Freelance", "laptop", "#2196f3"),
            ("Gifts", "gift", "#e91e63"),
            ("Other", "tag", "#607d8b"),
        ];
        SEED.iter()
            .enumerate()
            .map(|(index, (name, icon, color))| {
                let mut category = IncomeCategory::new(*name, *icon, *color);
                category.order = index as u32;
                category.is_default = true;
                category
            })
            .collect()
    }
}
