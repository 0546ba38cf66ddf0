use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::InterpreterConfig;
use crate::types::{AmountCandidate, AmountSource};

/// Picks the transaction total out of the numbers printed on a receipt.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    number: Regex,
    keywords: Vec<String>,
    ceiling: Decimal,
    years: (Decimal, Decimal),
}

impl AmountExtractor {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            number: amount_regex(&config.currency_markers),
            keywords: config.total_keywords.iter().map(|k| k.to_lowercase()).collect(),
            ceiling: config.amount_ceiling,
            years: (
                Decimal::from(config.year_range.0),
                Decimal::from(config.year_range.1),
            ),
        }
    }

    /// The last number printed on `line`, separators removed. A run of digits
    /// too long for `Decimal` saturates to `Decimal::MAX`, which no ceiling admits.
    pub fn amount_in_line(&self, line: &str) -> Option<Decimal> {
        self.number
            .captures_iter(line)
            .filter_map(|c| {
                let digits = c.get(1)?.as_str().replace(',', "");
                Some(Decimal::from_str(&digits).unwrap_or(Decimal::MAX))
            })
            .last()
    }

    pub fn is_likely_year(&self, value: Decimal) -> bool {
        value >= self.years.0 && value <= self.years.1
    }

    /// Keyword pass from the bottom up, then the last plausible number.
    pub fn extract(&self, lines: &[String]) -> Option<AmountCandidate> {
        self.scan(lines, false)
    }

    /// Same as [`extract`](Self::extract) but year-like values are never accepted.
    pub fn extract_excluding_years(&self, lines: &[String]) -> Option<AmountCandidate> {
        self.scan(lines, true)
    }

    fn scan(&self, lines: &[String], skip_years: bool) -> Option<AmountCandidate> {
        let usable = |v: &Decimal| *v < self.ceiling && !(skip_years && self.is_likely_year(*v));

        for (i, line) in lines.iter().enumerate().rev() {
            if !self.has_total_keyword(line) {
                continue;
            }
            if let Some(value) = self.amount_in_line(line).filter(usable) {
                return Some(AmountCandidate { value, source: AmountSource::TotalLine, line_index: i });
            }
            let next = lines.get(i + 1).and_then(|l| self.amount_in_line(l)).filter(usable);
            if let Some(value) = next {
                return Some(AmountCandidate {
                    value,
                    source: AmountSource::TotalNextLine,
                    line_index: i + 1,
                });
            }
        }

        lines.iter().enumerate().rev().find_map(|(i, line)| {
            let value = self
                .amount_in_line(line)
                .filter(|v| usable(v) && !self.is_likely_year(*v))?;
            Some(AmountCandidate { value, source: AmountSource::LastLine, line_index: i })
        })
    }

    fn has_total_keyword(&self, line: &str) -> bool {
        let folded: String = line
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
            .collect();
        self.keywords.iter().any(|k| folded.contains(k.as_str()))
    }
}

/// Optional currency marker, then either a comma-grouped number (western or
/// lakh grouping) or a plain run of digits, each with at most two decimals.
fn amount_regex(markers: &[String]) -> Regex {
    let mut markers: Vec<&str> = markers.iter().map(String::as_str).collect();
    // Longest first so `Rs.` wins over `Rs`.
    markers.sort_by_key(|m| std::cmp::Reverse(m.chars().count()));
    let prefix = if markers.is_empty() {
        String::new()
    } else {
        let alts: Vec<String> = markers.iter().map(|m| regex::escape(m)).collect();
        format!(r"(?:{})?\s*", alts.join("|"))
    };
    let pattern =
        format!(r"{prefix}([0-9]{{1,3}}(?:,[0-9]{{2,3}})*,[0-9]{{3}}(?:\.[0-9]{{1,2}})?|[0-9]+(?:\.[0-9]{{1,2}})?)");
    Regex::new(&pattern).expect("escaped amount pattern is valid")
}
