mod expense;
mod filter;

pub use expense::{check_amount, Expense, ExpenseUpdate, DEFAULT_CATEGORY};
pub use filter::ExpenseFilter;
