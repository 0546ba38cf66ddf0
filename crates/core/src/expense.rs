use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// A recorded expense, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub vendor: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub payment_mode: String,
    /// Where the record came from (`receipt` or `manual`).
    pub source: String,
    pub raw_text: String,
}

/// Values a user typed alongside an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseOverrides {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl ExpenseOverrides {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.vendor.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

impl Expense {
    /// A manually entered expense with no receipt behind it.
    pub fn manual(amount: Money, date: NaiveDate, overrides: ExpenseOverrides) -> Self {
        Expense {
            description: overrides.description.unwrap_or_default(),
            vendor: overrides.vendor.unwrap_or_default(),
            amount,
            category: overrides
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            date,
            payment_mode: "Unknown".to_string(),
            source: "manual".to_string(),
            raw_text: String::new(),
        }
    }

    pub fn receipt_description(vendor: &str) -> String {
        format!("Receipt: {vendor}").trim().to_string()
    }
}
