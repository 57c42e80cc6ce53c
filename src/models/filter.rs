use chrono::Month;

use super::Expense;

/// Optional month and category constraints shared by list, summary and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub month: Option<Month>,
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn new(month: Option<Month>, category: Option<String>) -> Self {
        // An empty category on the command line means "any category".
        let category = category.filter(|c| !c.is_empty());
        Self { month, category }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let month_ok = self
            .month
            .is_none_or(|m| expense.created_month() == m.number_from_month());
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| expense.category == c);
        month_ok && category_ok
    }

    /// Keep the matching expenses, preserving their order.
    pub fn apply(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        expenses.into_iter().filter(|e| self.matches(e)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.category.is_none()
    }
}
