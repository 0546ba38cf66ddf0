use chrono::{NaiveDate, Utc};
use rasid_core::{Money, UNCATEGORIZED, UNKNOWN_VENDOR};
use tracing::debug;

use crate::amount::AmountExtractor;
use crate::category::CategoryClassifier;
use crate::config::InterpreterConfig;
use crate::date::DateExtractor;
use crate::normalize::{normalize, RawDocument};
use crate::types::{AmountSource, DefaultReason, ParsedReceipt, Resolved};
use crate::vendor::VendorExtractor;

/// Turns raw receipt text into a [`ParsedReceipt`]. Holds only compiled,
/// read-only configuration, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ReceiptInterpreter {
    amounts: AmountExtractor,
    dates: DateExtractor,
    vendors: VendorExtractor,
    categories: CategoryClassifier,
}

impl Default for ReceiptInterpreter {
    fn default() -> Self {
        Self::new(&InterpreterConfig::default())
    }
}

impl ReceiptInterpreter {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            amounts: AmountExtractor::new(config),
            dates: DateExtractor,
            vendors: VendorExtractor::new(config),
            categories: CategoryClassifier::new(config),
        }
    }

    /// Interpret `raw_text`, defaulting the date to today (UTC).
    pub fn interpret(&self, raw_text: &str) -> ParsedReceipt {
        self.interpret_at(raw_text, Utc::now().date_naive())
    }

    /// Interpret `raw_text` with an explicit processing date, used when no
    /// date can be read from the text.
    pub fn interpret_at(&self, raw_text: &str, today: NaiveDate) -> ParsedReceipt {
        let doc = normalize(raw_text);

        let (amount, amount_source) = self.resolve_amount(&doc);

        let date = match self.dates.extract(&doc) {
            Some((d, pattern)) => {
                debug!(date = %d, ?pattern, "receipt date found");
                Resolved::found(d)
            }
            None => Resolved::defaulted(today, DefaultReason::NoSignal),
        };

        let vendor = match self.vendors.extract(doc.lines()) {
            Some(v) => Resolved::found(v.to_string()),
            None => Resolved::defaulted(UNKNOWN_VENDOR.to_string(), DefaultReason::NoSignal),
        };

        let category = match self.categories.classify(vendor.value(), None, raw_text) {
            Some(c) => Resolved::found(c.to_string()),
            None => Resolved::defaulted(UNCATEGORIZED.to_string(), DefaultReason::NoSignal),
        };

        ParsedReceipt {
            amount,
            amount_source,
            date,
            vendor,
            category,
            raw_text: raw_text.to_string(),
        }
    }

    /// Amount extraction followed by the year guard: a total that looks like
    /// a calendar year is replaced by the best non-year candidate, or zeroed.
    fn resolve_amount(&self, doc: &RawDocument) -> (Resolved<Money>, AmountSource) {
        let lines = doc.lines();
        let Some(first) = self.amounts.extract(lines) else {
            return (Resolved::defaulted(Money::zero(), DefaultReason::NoSignal), AmountSource::None);
        };

        let chosen = if self.amounts.is_likely_year(first.value) {
            let retry = self.amounts.extract_excluding_years(lines);
            debug!(
                rejected = %first.value,
                replacement = ?retry.map(|c| c.value),
                "amount looked like a year"
            );
            match retry {
                Some(c) => c,
                None => {
                    return (
                        Resolved::defaulted(Money::zero(), DefaultReason::YearGuard),
                        AmountSource::None,
                    )
                }
            }
        } else {
            first
        };

        debug!(
            amount = %chosen.value,
            source = %chosen.source,
            line = chosen.line_index,
            "receipt total selected"
        );
        (Resolved::found(Money::from_decimal(chosen.value)), chosen.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn interpret(text: &str) -> ParsedReceipt {
        ReceiptInterpreter::default().interpret_at(text, today())
    }

    #[test]
    fn full_receipt() {
        let r = interpret("ABC CAFE\nGSTIN: 123\n15/08/2024\nItem 100\nGrand Total: Rs. 450.00");
        assert_eq!(r.amount(), Money::from_paise(45000));
        assert_eq!(r.amount_source, AmountSource::TotalLine);
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2024, 8, 15).unwrap());
        assert_eq!(r.vendor(), "ABC CAFE");
        assert_eq!(r.category(), "Food");
        assert!(r.amount.is_found() && r.date.is_found() && r.vendor.is_found());
    }

    #[test]
    fn year_only_total_is_zeroed() {
        let r = interpret("Amount 2023");
        assert_eq!(r.amount(), Money::zero());
        assert_eq!(r.amount_source, AmountSource::None);
        assert_eq!(r.amount.default_reason(), Some(DefaultReason::YearGuard));
    }

    #[test]
    fn year_guard_uses_alternative() {
        let r = interpret("SHOP\nItem 450\nAmount 2023");
        assert_eq!(r.amount(), Money::from_paise(45000));
        assert_eq!(r.amount_source, AmountSource::LastLine);
    }

    #[test]
    fn missing_signals_default() {
        let r = interpret("   \n  ");
        assert_eq!(r.amount.default_reason(), Some(DefaultReason::NoSignal));
        assert_eq!(r.date(), today());
        assert_eq!(r.vendor(), "Unknown");
        assert_eq!(r.category(), "Uncategorized");
        assert_eq!(r.raw_text, "   \n  ");
    }

    #[test]
    fn custom_config_is_applied() {
        let cfg = InterpreterConfig {
            total_keywords: vec!["total".into()],
            ..Default::default()
        };
        let r = ReceiptInterpreter::new(&cfg).interpret_at("SHOP\nTotal 99\nChange 1", today());
        assert_eq!(r.amount(), Money::from_paise(9900));
        assert_eq!(r.amount_source, AmountSource::TotalLine);
    }
}
