use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::recognizer::{AcquireError, TextSource};

/// Reads the embedded text layer of a PDF receipt. Scanned PDFs without a
/// text layer come back as empty text and interpret to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextSource for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        // pdf-extract can panic on malformed object streams.
        let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| AcquireError::Pdf("extractor panicked on malformed PDF".into()))?;
        let text = result.map_err(|e| AcquireError::Pdf(e.to_string()))?;
        debug!(chars = text.len(), "pdf text layer extracted");
        Ok(text)
    }
}
