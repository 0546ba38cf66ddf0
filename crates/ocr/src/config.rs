use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// One row of the category table: a name and its substring triggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryKeywords {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryKeywords {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Tunables for the receipt interpreter. Every field has a built-in default,
/// so a TOML file only needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Currency markers that may prefix an amount.
    pub currency_markers: Vec<String>,
    /// Total keywords, matched against lowercased alphanumeric line text.
    pub total_keywords: Vec<String>,
    /// Amounts at or above this are treated as OCR noise.
    pub amount_ceiling: Decimal,
    /// Inclusive range of values that look like calendar years.
    pub year_range: (u32, u32),
    /// How many lines from the top are searched for the vendor.
    pub vendor_scan_lines: usize,
    pub vendor_ignore: Vec<String>,
    /// Checked in order; the first category with a keyword hit wins.
    pub categories: Vec<CategoryKeywords>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            currency_markers: ["₹", "Rs.", "Rs", "INR"].map(String::from).to_vec(),
            total_keywords: [
                "grand total",
                "grandtotal",
                "total amount",
                "amount due",
                "amount",
                "net amount",
                "net payable",
                "balance due",
                "payable",
            ]
            .map(String::from)
            .to_vec(),
            amount_ceiling: Decimal::from(1_000_000),
            year_range: (1900, 2100),
            vendor_scan_lines: 6,
            vendor_ignore: [
                "invoice", "receipt", "gstin", "gst", "phone", "tel:", "address", "tax",
                "invoice no", "date", "bill", "cashier",
            ]
            .map(String::from)
            .to_vec(),
            categories: default_categories(),
        }
    }
}

// The short Fuel brands "io", "hp" and "bp" are left out: as bare substrings
// they hit words like "ratio" and "station" long before any fuel receipt.
fn default_categories() -> Vec<CategoryKeywords> {
    vec![
        CategoryKeywords::new(
            "Food",
            &[
                "restaurant", "cafe", "pizza", "burger", "dominos", "zomato", "swiggy",
                "mcdonald", "starbucks", "kfc", "hut", "café", "coffee", "bakery", "biryani",
                "dhaba", "canteen", "food", "dining",
            ],
        ),
        CategoryKeywords::new(
            "Travel",
            &[
                "uber", "ola", "taxi", "bus", "metro", "flight", "airlines", "rail", "rapido",
                "irctc", "airways", "indigo", "makemytrip", "redbus", "boarding pass", "travel",
            ],
        ),
        CategoryKeywords::new(
            "Grocery",
            &[
                "grocery", "supermarket", "big bazaar", "dmart", "nature", "reliance fresh",
                "reliance", "groceries", "bigbasket", "blinkit", "zepto", "kirana", "vegetable",
                "fruits",
            ],
        ),
        CategoryKeywords::new(
            "Shopping",
            &[
                "amazon", "flipkart", "myntra", "ajio", "shop", "store", "nykaa", "croma",
                "fashion", "apparel", "clothing", "footwear", "electronics", "lifestyle",
            ],
        ),
        CategoryKeywords::new(
            "Fuel",
            &[
                "petrol", "diesel", "bharat petroleum", "indian oil", "fuel", "iocl", "bpcl",
                "hpcl", "filling station", "service station",
            ],
        ),
        CategoryKeywords::new(
            "Bills",
            &[
                "electricity", "water", "internet", "phone", "broadband", "bill", "recharge",
                "postpaid", "prepaid", "airtel", "jio", "vodafone", "bsnl", "bescom", "utility",
            ],
        ),
        CategoryKeywords::new(
            "Entertainment",
            &[
                "movie", "cinema", "bookmyshow", "netflix", "spotify", "pvr", "inox", "hotstar",
                "concert", "theatre", "amusement",
            ],
        ),
    ]
}

impl InterpreterConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: InterpreterConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.year_range.0 > self.year_range.1 {
            return Err(ConfigError::Invalid(format!(
                "year_range start {} is after end {}",
                self.year_range.0, self.year_range.1
            )));
        }
        if self.amount_ceiling <= Decimal::ZERO {
            return Err(ConfigError::Invalid("amount_ceiling must be positive".into()));
        }
        if let Some(c) = self.categories.iter().find(|c| c.name.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "category with keywords {:?} has no name",
                c.keywords
            )));
        }
        if self.currency_markers.iter().any(|m| m.is_empty())
            || self.total_keywords.iter().any(|k| k.trim().is_empty())
        {
            return Err(ConfigError::Invalid("empty currency marker or total keyword".into()));
        }
        Ok(())
    }
}
