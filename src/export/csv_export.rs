use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::models::Expense;
use crate::report::format_timestamp;

pub(crate) const HEADERS: [&str; 6] = [
    "Id",
    "Description",
    "Amount",
    "Category",
    "Created At",
    "Updated At",
];

/// Append `.csv` unless the name already ends with it.
pub(crate) fn csv_file_name(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

/// Write a header row plus one `;`-delimited row per expense.
pub(crate) fn write_csv<W: io::Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    wtr.write_record(HEADERS)?;
    for expense in expenses {
        wtr.write_record([
            expense.id.to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
            expense.category.clone(),
            format_timestamp(&expense.created_at),
            format_timestamp(&expense.updated_at),
        ])
        .with_context(|| format!("Failed to write expense {}", expense.id))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the expenses to it.
pub(crate) fn write_csv_file(path: &Path, expenses: &[Expense]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(io::BufWriter::new(file), expenses)
}
