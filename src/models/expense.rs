use anyhow::Result;
use chrono::{DateTime, Datelike, Local, SubsecRound, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    #[serde(with = "epoch_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "epoch_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(id: u64, description: String, amount: Decimal, category: String) -> Self {
        let now = now();
        Self {
            id,
            description,
            amount,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Calendar month (1-12) of the creation time, in the local time zone.
    pub fn created_month(&self) -> u32 {
        self.created_at.with_timezone(&Local).month()
    }

    /// Overwrite every field present in `update` and refresh `updated_at`.
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        self.updated_at = now().max(self.created_at);
    }
}

/// Fields to change on an existing expense. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.category.is_none()
    }
}

/// Accept an amount only if it is positive and reads back unchanged from the
/// data file, which stores amounts as JSON floating-point numbers.
pub fn check_amount(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        anyhow::bail!("Amount must be a positive number.");
    }
    let reloaded = amount
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok());
    if reloaded != Some(amount) {
        anyhow::bail!("Amount {amount} has too many digits to be stored exactly.");
    }
    Ok(amount)
}

/// Current time truncated to whole seconds, the precision the data file keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Timestamps are stored as seconds since the Unix epoch. Fractional seconds
/// are accepted on read.
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(ts.timestamp())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let secs = f64::deserialize(d)?;
        if !secs.is_finite() {
            return Err(de::Error::custom(format!("invalid timestamp: {secs}")));
        }
        let whole = secs.floor();
        let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {secs}")))
    }
}
