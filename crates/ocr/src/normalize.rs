/// Raw receipt text together with its cleaned, non-empty lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    text: String,
    lines: Vec<String>,
}

impl RawDocument {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Strip carriage returns, split into lines, trim them and drop the empty
/// ones. Top-to-bottom order is kept.
pub fn normalize(raw: &str) -> RawDocument {
    let text = raw.replace('\r', "");
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    RawDocument { text, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_carriage_returns_and_blank_lines() {
        let doc = normalize("ABC CAFE\r\n\r\n  Item 100  \r\n\t\nTotal 450\r\n");
        assert_eq!(doc.lines(), ["ABC CAFE", "Item 100", "Total 450"]);
        assert!(!doc.text().contains('\r'));
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(normalize("").is_blank());
        assert!(normalize("   \n\t\r\n  ").is_blank());
    }

    #[test]
    fn lone_carriage_returns_do_not_split() {
        // `\r` is removed rather than treated as a break.
        let doc = normalize("AB\rCD\nEF");
        assert_eq!(doc.lines(), ["ABCD", "EF"]);
    }
}
