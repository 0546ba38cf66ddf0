use crate::config::{CategoryKeywords, InterpreterConfig};

/// Keyword-table categorizer. Categories are checked in table order, so a
/// text matching several categories gets the one declared first.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    table: Vec<CategoryKeywords>,
}

impl CategoryClassifier {
    pub fn new(config: &InterpreterConfig) -> Self {
        let table = config
            .categories
            .iter()
            .map(|c| CategoryKeywords {
                name: c.name.clone(),
                keywords: c
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { table }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|c| c.name.as_str())
    }

    /// `None` means no keyword of any category occurs in the text.
    pub fn classify(&self, vendor: &str, description: Option<&str>, raw_text: &str) -> Option<&str> {
        let haystack = format!("{vendor} {} {raw_text}", description.unwrap_or_default()).to_lowercase();
        self.table
            .iter()
            .find(|c| c.keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::new(&InterpreterConfig::default())
    }

    #[test]
    fn vendor_keyword_matches() {
        assert_eq!(classifier().classify("ABC CAFE", None, ""), Some("Food"));
        assert_eq!(classifier().classify("Indian Oil Petrol Pump", None, ""), Some("Fuel"));
    }

    #[test]
    fn short_merchant_words_match() {
        let c = classifier();
        assert_eq!(c.classify("Corner Store", None, "Corner Store\nSoap 40"), Some("Shopping"));
        assert_eq!(c.classify("OLA", None, "OLA\nRide fare 250"), Some("Travel"));
        assert_eq!(c.classify("City Metro Rail", None, ""), Some("Travel"));
        assert_eq!(c.classify("Unknown", None, "Water charges Q2"), Some("Bills"));
    }

    #[test]
    fn two_letter_fuel_brands_are_not_triggers() {
        assert_eq!(classifier().classify("Unknown", None, "Price ratio 1:2"), None);
    }

    #[test]
    fn raw_text_and_description_are_searched() {
        let c = classifier();
        assert_eq!(c.classify("Unknown", None, "PVR Cinemas\nAudi 3"), Some("Entertainment"));
        assert_eq!(c.classify("Unknown", Some("airtel postpaid"), ""), Some("Bills"));
    }

    #[test]
    fn table_order_breaks_ties() {
        // "coffee" is Food, "amazon" is Shopping; Food is declared first.
        let c = classifier();
        assert_eq!(c.classify("Amazon Pantry", None, "Coffee beans 1kg"), Some("Food"));
    }

    #[test]
    fn reordered_table_changes_winner() {
        let cfg = InterpreterConfig {
            categories: vec![
                CategoryKeywords { name: "Shopping".into(), keywords: vec!["amazon".into()] },
                CategoryKeywords { name: "Food".into(), keywords: vec!["coffee".into()] },
            ],
            ..Default::default()
        };
        let c = CategoryClassifier::new(&cfg);
        assert_eq!(c.classify("Amazon Pantry", None, "Coffee beans 1kg"), Some("Shopping"));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let cfg = InterpreterConfig {
            categories: vec![CategoryKeywords { name: "Office".into(), keywords: vec!["STAPLES".into()] }],
            ..Default::default()
        };
        assert_eq!(CategoryClassifier::new(&cfg).classify("staples inc", None, ""), Some("Office"));
    }

    #[test]
    fn no_match() {
        assert_eq!(classifier().classify("Unknown", None, ""), None);
        assert_eq!(classifier().classify("XYZ Traders", None, "Item 1 20.00"), None);
    }

    #[test]
    fn categories_in_declaration_order() {
        let c = classifier();
        let names: Vec<_> = c.categories().collect();
        assert_eq!(names.first(), Some(&"Food"));
        assert_eq!(names.last(), Some(&"Entertainment"));
    }
}
