use chrono::NaiveDate;
use rasid_core::{Expense, ExpenseOverrides, Money, UNCATEGORIZED, UNKNOWN_VENDOR};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a field fell back to its default value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    /// The extractor found no usable signal in the text.
    NoSignal,
    /// The only amount candidates looked like calendar years.
    YearGuard,
    /// The text could not be acquired from the uploaded file.
    AcquisitionFailed,
}

/// A field that always carries a value, tagged with whether it was found in
/// the text or filled in with a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolved<T> {
    Found { value: T },
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> Resolved<T> {
    pub fn found(value: T) -> Self {
        Resolved::Found { value }
    }

    pub fn defaulted(value: T, reason: DefaultReason) -> Self {
        Resolved::Defaulted { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Resolved::Found { value } | Resolved::Defaulted { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Resolved::Found { value } | Resolved::Defaulted { value, .. } => value,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found { .. })
    }

    pub fn default_reason(&self) -> Option<DefaultReason> {
        match self {
            Resolved::Found { .. } => None,
            Resolved::Defaulted { reason, .. } => Some(*reason),
        }
    }
}

/// Where the chosen total came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AmountSource {
    /// A line carrying a total keyword also carried the number.
    TotalLine,
    /// The number sat on the line after the total keyword.
    TotalNextLine,
    /// No keyword matched; the bottom-most plausible number was taken.
    LastLine,
    None,
    Error,
}

impl std::fmt::Display for AmountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountSource::TotalLine => write!(f, "total-line"),
            AmountSource::TotalNextLine => write!(f, "total-next-line"),
            AmountSource::LastLine => write!(f, "last-line"),
            AmountSource::None => write!(f, "none"),
            AmountSource::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountCandidate {
    pub value: Decimal,
    pub source: AmountSource,
    pub line_index: usize,
}

/// The structured interpretation of one receipt's text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedReceipt {
    pub amount: Resolved<Money>,
    pub amount_source: AmountSource,
    pub date: Resolved<NaiveDate>,
    pub vendor: Resolved<String>,
    pub category: Resolved<String>,
    /// Verbatim input text, kept for audit.
    pub raw_text: String,
}

impl ParsedReceipt {
    /// The all-default result used when no text could be obtained.
    pub fn acquisition_failed(today: NaiveDate) -> Self {
        let reason = DefaultReason::AcquisitionFailed;
        ParsedReceipt {
            amount: Resolved::defaulted(Money::zero(), reason),
            amount_source: AmountSource::Error,
            date: Resolved::defaulted(today, reason),
            vendor: Resolved::defaulted(UNKNOWN_VENDOR.to_string(), reason),
            category: Resolved::defaulted(UNCATEGORIZED.to_string(), reason),
            raw_text: String::new(),
        }
    }

    pub fn amount(&self) -> Money {
        *self.amount.value()
    }

    pub fn date(&self) -> NaiveDate {
        *self.date.value()
    }

    pub fn vendor(&self) -> &str {
        self.vendor.value()
    }

    pub fn category(&self) -> &str {
        self.category.value()
    }

    /// Merge user-entered values into an expense record. A value found in the
    /// receipt text wins; overrides fill the fields that were defaulted.
    pub fn into_expense(self, overrides: ExpenseOverrides) -> Expense {
        let ExpenseOverrides { amount, date, vendor, category, description } = overrides;

        let amount = pick(self.amount, amount);
        let date = pick(self.date, date);
        let vendor = pick(self.vendor, vendor.filter(|v| !v.trim().is_empty()));
        let category = pick(self.category, category.filter(|c| !c.trim().is_empty()));
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Expense::receipt_description(&vendor));

        Expense {
            description,
            vendor,
            amount,
            category,
            date,
            payment_mode: "Unknown".to_string(),
            source: "receipt".to_string(),
            raw_text: self.raw_text,
        }
    }
}

fn pick<T>(parsed: Resolved<T>, user: Option<T>) -> T {
    match (parsed, user) {
        (Resolved::Found { value }, _) => value,
        (Resolved::Defaulted { .. }, Some(value)) => value,
        (Resolved::Defaulted { value, .. }, None) => value,
    }
}
