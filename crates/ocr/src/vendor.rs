use crate::config::InterpreterConfig;

/// Picks the merchant name from the header of a receipt.
#[derive(Debug, Clone)]
pub struct VendorExtractor {
    scan_lines: usize,
    ignore: Vec<String>,
}

impl VendorExtractor {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            scan_lines: config.vendor_scan_lines,
            ignore: config.vendor_ignore.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// The first header line that survives the noise filters, else the first
    /// non-empty line. `None` only for a document with no lines at all.
    pub fn extract<'a>(&self, lines: &'a [String]) -> Option<&'a str> {
        lines
            .iter()
            .take(self.scan_lines)
            .map(|l| l.trim())
            .find(|l| self.is_candidate(l))
            .or_else(|| lines.iter().map(|l| l.trim()).find(|l| !l.is_empty()))
    }

    fn is_candidate(&self, line: &str) -> bool {
        if line.is_empty() || latin_letters(line) < 3 {
            return false;
        }
        let lower = line.to_lowercase();
        if self.ignore.iter().any(|p| lower.contains(p.as_str())) {
            return false;
        }
        !line
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_punctuation() || c.is_whitespace())
    }
}

/// Letters from the Latin and Latin-1/Extended-A/B blocks.
fn latin_letters(line: &str) -> usize {
    line.chars()
        .filter(|c| c.is_ascii_alphabetic() || (('\u{00C0}'..='\u{024F}').contains(c) && c.is_alphabetic()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> VendorExtractor {
        VendorExtractor::new(&InterpreterConfig::default())
    }

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_clean_line_wins() {
        let doc = lines(&["ABC CAFE", "GSTIN: 123", "Item 100"]);
        assert_eq!(extractor().extract(&doc), Some("ABC CAFE"));
    }

    #[test]
    fn gstin_line_never_chosen() {
        let doc = lines(&["GSTIN: 29ABCDE1234F1Z5", "Sharma Sweets", "Total 120"]);
        assert_eq!(extractor().extract(&doc), Some("Sharma Sweets"));
    }

    #[test]
    fn skips_noise_lines() {
        let doc = lines(&[
            "TAX INVOICE",
            "12/08/2024",
            "Ph: 98",
            "Tel: 080-2345678",
            "Café Müller",
        ]);
        assert_eq!(extractor().extract(&doc), Some("Café Müller"));
    }

    #[test]
    fn ignore_patterns_are_case_insensitive() {
        let doc = lines(&["Cashier: Ravi", "Bill No 42", "RECEIPT", "Green Leaf"]);
        assert_eq!(extractor().extract(&doc), Some("Green Leaf"));
    }

    #[test]
    fn only_first_lines_are_scanned() {
        let doc = lines(&["Invoice", "Invoice", "Invoice", "Invoice", "Invoice", "Invoice", "Real Shop"]);
        // Nothing survives within the window, so the first line is used.
        assert_eq!(extractor().extract(&doc), Some("Invoice"));
    }

    #[test]
    fn wider_window_from_config() {
        let cfg = InterpreterConfig { vendor_scan_lines: 8, ..Default::default() };
        let doc = lines(&["Invoice", "Invoice", "Invoice", "Invoice", "Invoice", "Invoice", "Real Shop"]);
        assert_eq!(VendorExtractor::new(&cfg).extract(&doc), Some("Real Shop"));
    }

    #[test]
    fn fallback_to_first_line() {
        let doc = lines(&["12 34", "56.00"]);
        assert_eq!(extractor().extract(&doc), Some("12 34"));
    }

    #[test]
    fn empty_document() {
        assert_eq!(extractor().extract(&[]), None);
    }

    #[test]
    fn counts_latin_extended_letters() {
        assert_eq!(latin_letters("Ñoño 12"), 4);
        assert_eq!(latin_letters("×÷"), 0);
    }
}
