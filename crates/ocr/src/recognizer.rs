use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
    #[error("Unsupported content type: '{0}'")]
    Unsupported(String),
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
    #[error("Tesseract not available; build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over whatever turns an uploaded file into raw text: an OCR
/// engine for images, a text-layer reader for PDFs.
pub trait TextSource: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, AcquireError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string, so the interpretation pipeline can be tested
/// without an OCR engine installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for MockRecognizer {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, AcquireError> {
        Ok(self.text.clone())
    }
}

/// Placeholder image backend for builds without Tesseract.
pub struct UnavailableRecognizer;

impl TextSource for UnavailableRecognizer {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, AcquireError> {
        Err(AcquireError::NotAvailable)
    }
}

/// Uploads that already are text (`text/plain`).
pub struct PlainText;

impl TextSource for PlainText {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        // Binary junk decodes to replacement characters and yields no signals.
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{AcquireError, TextSource};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl TextSource for TesseractRecognizer {
        fn extract_text(&self, bytes: &[u8]) -> Result<String, AcquireError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| AcquireError::Engine(e.to_string()))?;
            lt.set_image_from_mem(bytes)
                .map_err(|e| AcquireError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| AcquireError::Engine(e.to_string()))
        }
    }
}
