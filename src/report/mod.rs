mod util;

use rust_decimal::Decimal;
use std::io::{self, Write};

use crate::models::{Expense, ExpenseFilter};

pub(crate) use util::{format_amount, format_timestamp, group_thousands, truncate};

const ID_WIDTH: usize = 5;
const DESCRIPTION_WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 12;
const CATEGORY_WIDTH: usize = 20;
const CREATED_WIDTH: usize = 19;
const TABLE_WIDTH: usize =
    ID_WIDTH + DESCRIPTION_WIDTH + AMOUNT_WIDTH + CATEGORY_WIDTH + CREATED_WIDTH + 4;

pub(crate) fn list_heading(filter: &ExpenseFilter) -> String {
    match (filter.category.as_deref(), filter.month) {
        (Some(category), Some(month)) => {
            format!("Expense list for {category} in {}:", month.name())
        }
        (None, Some(month)) => format!("Expense list in {}:", month.name()),
        (Some(category), None) => format!("Expense list for {category}:"),
        (None, None) => "Total expense list:".to_string(),
    }
}

pub(crate) fn summary_line(filter: &ExpenseFilter, total: Decimal) -> String {
    let total = group_thousands(total);
    match (filter.category.as_deref(), filter.month) {
        (Some(category), Some(month)) => {
            format!("Total expenses for {category} in {}: {total}$", month.name())
        }
        (None, Some(month)) => format!("Total expenses in {}: {total}$", month.name()),
        (Some(category), None) => format!("Total expenses for {category}: {total}$"),
        (None, None) => format!("Total expenses: {total}$"),
    }
}

/// Heading plus a fixed-width table of the expenses, in the order given.
pub(crate) fn write_list<W: Write>(
    out: &mut W,
    filter: &ExpenseFilter,
    expenses: &[Expense],
) -> io::Result<()> {
    writeln!(out, "{}", list_heading(filter))?;
    writeln!(out, "{}", "═".repeat(TABLE_WIDTH))?;
    writeln!(
        out,
        "{:<ID_WIDTH$} {:<DESCRIPTION_WIDTH$} {:>AMOUNT_WIDTH$} {:<CATEGORY_WIDTH$} {:<CREATED_WIDTH$}",
        "ID", "Description", "Amount", "Category", "Created At"
    )?;
    writeln!(out, "{}", "─".repeat(TABLE_WIDTH))?;

    if expenses.is_empty() {
        writeln!(out, "No expenses found")?;
        return Ok(());
    }

    for expense in expenses {
        writeln!(
            out,
            "{:<ID_WIDTH$} {:<DESCRIPTION_WIDTH$} {:>AMOUNT_WIDTH$} {:<CATEGORY_WIDTH$} {}",
            expense.id,
            truncate(&expense.description, DESCRIPTION_WIDTH),
            format_amount(expense.amount),
            truncate(&expense.category, CATEGORY_WIDTH),
            format_timestamp(&expense.created_at),
        )?;
    }
    Ok(())
}
