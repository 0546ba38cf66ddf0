use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::normalize::RawDocument;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_day_first,
    r"\b([0-3]?[0-9])[/.\-]([0-1]?[0-9])[/.\-]((?:20|19)?[0-9]{2})\b");
re!(re_iso,
    r"\b([0-9]{4})[/\-]([0-9]{1,2})[/\-]([0-9]{1,2})\b");
re!(re_month_day_year,
    r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+([0-3]?[0-9])(?:st|nd|rd|th)?(?:,\s*|\s+)((?:20|19)?[0-9]{2})\b");
re!(re_day_month_year,
    r"(?i)\b([0-3]?[0-9])(?:st|nd|rd|th)?(?:\s+|-)(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?(?:\s+|-)((?:20|19)?[0-9]{2})\b");

/// The date shapes understood on receipts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `15/08/2024`, `15-08-24`, `15.08.2024`. Always read day first.
    DayFirstNumeric,
    /// `2024-08-15`, `2024/8/15`.
    IsoNumeric,
    /// `August 15, 2024`, `Aug 15th 2024`.
    MonthDayYear,
    /// `15 August 2024`, `15th Aug 2024`, `15-Aug-24`.
    DayMonthYear,
}

impl DatePattern {
    pub const ALL: [DatePattern; 4] = [
        DatePattern::DayFirstNumeric,
        DatePattern::IsoNumeric,
        DatePattern::MonthDayYear,
        DatePattern::DayMonthYear,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            DatePattern::DayFirstNumeric => re_day_first(),
            DatePattern::IsoNumeric => re_iso(),
            DatePattern::MonthDayYear => re_month_day_year(),
            DatePattern::DayMonthYear => re_day_month_year(),
        }
    }

    /// Build a calendar date from the capture groups. Out-of-range days or
    /// months (including 30 Feb) yield `None`.
    fn build(self, c: &Captures) -> Option<NaiveDate> {
        let num = |i: usize| c.get(i)?.as_str().parse::<u32>().ok();
        let (year, month, day) = match self {
            DatePattern::DayFirstNumeric => (expand_year(c.get(3)?.as_str())?, num(2)?, num(1)?),
            DatePattern::IsoNumeric => (expand_year(c.get(1)?.as_str())?, num(2)?, num(3)?),
            DatePattern::MonthDayYear => {
                (expand_year(c.get(3)?.as_str())?, month_from_name(c.get(1)?.as_str())?, num(2)?)
            }
            DatePattern::DayMonthYear => {
                (expand_year(c.get(3)?.as_str())?, month_from_name(c.get(2)?.as_str())?, num(1)?)
            }
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Only the first match of this pattern in `text` is considered.
    fn parse_first(self, text: &str) -> Option<NaiveDate> {
        let caps = self.regex().captures(text)?;
        self.build(&caps)
    }
}

/// Finds the transaction date in receipt text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    /// Try each pattern against the whole text, then line by line from the top.
    pub fn extract(&self, doc: &RawDocument) -> Option<(NaiveDate, DatePattern)> {
        if let Some(hit) = first_date(doc.text()) {
            return Some(hit);
        }
        doc.lines().iter().find_map(|line| first_date(line))
    }
}

fn first_date(text: &str) -> Option<(NaiveDate, DatePattern)> {
    DatePattern::ALL
        .iter()
        .find_map(|p| p.parse_first(text).map(|d| (d, *p)))
}

/// Two-digit years always land in the 2000s, so `99` becomes 2099.
fn expand_year(s: &str) -> Option<i32> {
    let y: i32 = s.parse().ok()?;
    Some(if s.len() <= 2 { 2000 + y } else { y })
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
