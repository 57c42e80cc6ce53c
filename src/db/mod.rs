mod json;
#[cfg(test)]
mod memory;

use anyhow::{Context, Result};
use log::debug;
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::*;

pub(crate) use json::JsonFile;
#[cfg(test)]
pub(crate) use memory::MemoryStorage;

/// Backing store for the full expense collection. Every operation reads the
/// whole collection and, when it changes, writes the whole collection back.
pub(crate) trait Storage {
    fn load(&self) -> Result<Vec<Expense>>;
    fn save(&mut self, expenses: &[Expense]) -> Result<()>;
}

pub(crate) struct Database<S: Storage> {
    storage: S,
}

impl Database<JsonFile> {
    pub(crate) fn open(path: &Path) -> Self {
        Self::new(JsonFile::new(path))
    }
}

#[cfg(test)]
impl Database<MemoryStorage> {
    pub(crate) fn open_in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }
}

impl<S: Storage> Database<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn add_expense(
        &mut self,
        description: &str,
        amount: Decimal,
        category: &str,
    ) -> Result<Expense> {
        check_amount(amount)?;

        let mut expenses = self.storage.load()?;
        let expense = Expense::new(
            next_id(&expenses),
            description.to_string(),
            amount,
            category.to_string(),
        );
        expenses.push(expense.clone());
        self.storage.save(&expenses)?;
        debug!("Added expense {} ({} total)", expense.id, expenses.len());
        Ok(expense)
    }

    /// Remove the expense with `id`. The store is only rewritten when a
    /// record was actually removed.
    pub(crate) fn delete_expense(&mut self, id: u64) -> Result<Option<Expense>> {
        let mut expenses = self.storage.load()?;
        let Some(index) = expenses.iter().position(|e| e.id == id) else {
            debug!("Delete: no expense with id {id}");
            return Ok(None);
        };
        let removed = expenses.remove(index);
        self.storage.save(&expenses)?;
        debug!("Deleted expense {id}");
        Ok(Some(removed))
    }

    /// Apply `update` to the expense with `id` and refresh its `updated_at`,
    /// even when `update` carries no field changes.
    pub(crate) fn update_expense(
        &mut self,
        id: u64,
        update: &ExpenseUpdate,
    ) -> Result<Option<Expense>> {
        if let Some(amount) = update.amount {
            check_amount(amount)?;
        }

        let mut expenses = self.storage.load()?;
        let Some(expense) = expenses.iter_mut().find(|e| e.id == id) else {
            debug!("Update: no expense with id {id}");
            return Ok(None);
        };
        expense.apply(update);
        let updated = expense.clone();
        self.storage.save(&expenses)?;
        if update.is_empty() {
            debug!("Touched expense {id} without field changes");
        } else {
            debug!("Updated expense {id}");
        }
        Ok(Some(updated))
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn get_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let expenses = self.storage.load()?;
        if filter.is_empty() {
            return Ok(expenses);
        }
        debug!("Filtering {} expenses by {filter:?}", expenses.len());
        Ok(filter.apply(expenses))
    }

    pub(crate) fn get_total(&self, filter: &ExpenseFilter) -> Result<Decimal> {
        self.get_expenses(filter)?
            .iter()
            .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.amount))
            .ok_or_else(|| anyhow::anyhow!("Total of the selected expenses is too large."))
    }

    /// Write the filtered expenses to `path` as a semicolon-delimited CSV,
    /// replacing any existing file. Returns the number of rows written.
    pub(crate) fn export_to_csv(&self, path: &Path, filter: &ExpenseFilter) -> Result<usize> {
        let expenses = self.get_expenses(filter)?;
        crate::export::write_csv_file(path, &expenses)
            .with_context(|| format!("Failed to export expenses to {}", path.display()))?;
        Ok(expenses.len())
    }
}

/// One more than the highest id present, or 1 for an empty collection.
pub(crate) fn next_id(expenses: &[Expense]) -> u64 {
    expenses.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
}
