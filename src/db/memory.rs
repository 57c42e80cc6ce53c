use anyhow::Result;

use super::Storage;
use crate::models::Expense;

/// In-memory backend that counts how often the collection was written.
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) saves: usize,
}

impl MemoryStorage {
    pub(crate) fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses, saves: 0 }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn save(&mut self, expenses: &[Expense]) -> Result<()> {
        self.expenses = expenses.to_vec();
        self.saves += 1;
        Ok(())
    }
}
