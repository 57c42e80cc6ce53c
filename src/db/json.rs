use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::Storage;
use crate::models::Expense;

/// Expense collection stored as a pretty-printed JSON array in one file.
pub(crate) struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl Storage for JsonFile {
    fn load(&self) -> Result<Vec<Expense>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_slice::<Vec<Expense>>(&bytes) {
            Ok(expenses) => {
                debug!("Loaded {} expenses from {}", expenses.len(), self.path.display());
                Ok(expenses)
            }
            Err(e) => {
                // The next save overwrites the unreadable file.
                warn!(
                    "Could not decode {} ({e}). Starting fresh.",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, expenses: &[Expense]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        expenses
            .serialize(&mut ser)
            .with_context(|| format!("Failed to serialize expenses to {}", self.path.display()))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        debug!("Saved {} expenses to {}", expenses.len(), self.path.display());
        Ok(())
    }
}
