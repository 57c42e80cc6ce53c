use anyhow::Result;
use chrono::Month;
use clap::{Args, CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::{Database, Storage};
use crate::models::{check_amount, ExpenseFilter, ExpenseUpdate, DEFAULT_CATEGORY};

pub(crate) const DEFAULT_DATA_FILE: &str = "expenses.json";
const DEFAULT_EXPORT_FILE: &str = "expenses.csv";

/// Expense Tracker - record, summarize and export personal expenses
#[derive(Debug, Parser)]
#[command(name = "expense-tracker", version)]
pub(crate) struct Cli {
    /// JSON file holding the expense records
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub(crate) data_file: PathBuf,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Add a new expense
    Add {
        /// Description of the expense
        description: String,
        /// Amount of the expense
        #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Decimal,
        /// Category of the expense
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
    /// Delete an expense using its ID
    Delete {
        /// ID of the expense
        id: u64,
    },
    /// Update an existing expense using its ID
    Update {
        /// ID of the expense
        id: u64,
        /// New description for the expense
        #[arg(long)]
        description: Option<String>,
        /// New amount for the expense
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Option<Decimal>,
        /// New category for the expense
        #[arg(long)]
        category: Option<String>,
    },
    /// List expenses (optionally filtered)
    List(FilterArgs),
    /// Print the total of the expenses (optionally filtered)
    Summary(FilterArgs),
    /// Export expenses to a semicolon-delimited CSV file (optionally filtered)
    Export {
        /// Output file; ".csv" is appended when missing
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        filename: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub(crate) struct FilterArgs {
    /// Only expenses in this category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Only expenses created in this month (1-12)
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: Option<Month>,
}

impl From<FilterArgs> for ExpenseFilter {
    fn from(args: FilterArgs) -> Self {
        ExpenseFilter::new(args.month, args.category)
    }
}

/// Accept only strictly positive amounts that the data file can hold exactly.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| anyhow::anyhow!("Amount must be a number."))?;
    check_amount(amount)
}

pub(crate) fn parse_month(s: &str) -> Result<Month> {
    let number: u8 = s
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Month must be a number from 1 to 12."))?;
    Month::try_from(number).map_err(|_| anyhow::anyhow!("Month must be a number from 1 to 12."))
}

pub(crate) fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}

pub(crate) fn as_cli<S: Storage, W: Write>(
    command: Command,
    db: &mut Database<S>,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Add {
            description,
            amount,
            category,
        } => cli_add(db, out, &description, amount, &category),
        Command::Delete { id } => cli_delete(db, out, id),
        Command::Update {
            id,
            description,
            amount,
            category,
        } => {
            let update = ExpenseUpdate {
                description,
                amount,
                category,
            };
            cli_update(db, out, id, &update)
        }
        Command::List(filter) => cli_list(db, out, &ExpenseFilter::from(filter)),
        Command::Summary(filter) => cli_summary(db, out, &ExpenseFilter::from(filter)),
        Command::Export { filename, filter } => {
            cli_export(db, out, &filename, &ExpenseFilter::from(filter))
        }
    }
}

fn cli_add<S: Storage, W: Write>(
    db: &mut Database<S>,
    out: &mut W,
    description: &str,
    amount: Decimal,
    category: &str,
) -> Result<()> {
    let expense = db.add_expense(description, amount, category)?;
    writeln!(out, "Expense added successfully (ID: {})", expense.id)?;
    Ok(())
}

fn cli_delete<S: Storage, W: Write>(db: &mut Database<S>, out: &mut W, id: u64) -> Result<()> {
    match db.delete_expense(id)? {
        Some(expense) => writeln!(
            out,
            "Expense deleted: {} (ID: {}) (Amount: {})",
            expense.description, expense.id, expense.amount
        )?,
        None => writeln!(out, "Expense with ID: {id} not found.")?,
    }
    Ok(())
}

fn cli_update<S: Storage, W: Write>(
    db: &mut Database<S>,
    out: &mut W,
    id: u64,
    update: &ExpenseUpdate,
) -> Result<()> {
    match db.update_expense(id, update)? {
        Some(expense) => writeln!(
            out,
            "Expense updated: {} (ID: {}) (Amount: {}) (Category: {})",
            expense.description, expense.id, expense.amount, expense.category
        )?,
        None => writeln!(out, "Expense with ID: {id} not found.")?,
    }
    Ok(())
}

fn cli_list<S: Storage, W: Write>(
    db: &Database<S>,
    out: &mut W,
    filter: &ExpenseFilter,
) -> Result<()> {
    let expenses = db.get_expenses(filter)?;
    crate::report::write_list(out, filter, &expenses)?;
    Ok(())
}

fn cli_summary<S: Storage, W: Write>(
    db: &Database<S>,
    out: &mut W,
    filter: &ExpenseFilter,
) -> Result<()> {
    let total = db.get_total(filter)?;
    writeln!(out, "{}", crate::report::summary_line(filter, total))?;
    Ok(())
}

fn cli_export<S: Storage, W: Write>(
    db: &Database<S>,
    out: &mut W,
    filename: &str,
    filter: &ExpenseFilter,
) -> Result<()> {
    let output_path = crate::export::csv_file_name(&shellexpand(filename));
    let count = db.export_to_csv(Path::new(&output_path), filter)?;
    writeln!(out, "Exported {count} expenses to {output_path}")?;
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
