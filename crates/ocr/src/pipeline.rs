use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::interpreter::ReceiptInterpreter;
use crate::pdf::PdfTextExtractor;
use crate::recognizer::{AcquireError, PlainText, TextSource};
use crate::types::ParsedReceipt;

/// Uploads above this size are refused before any OCR work.
pub const MAX_UPLOAD_BYTES: usize = 12 * 1024 * 1024;

/// Which acquisition path produces the raw text for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Pdf,
    Text,
    Unsupported,
}

impl ContentKind {
    /// From a MIME type such as `image/png` or `application/pdf; charset=binary`.
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if mime.starts_with("image/") {
            ContentKind::Image
        } else if mime == "application/pdf" {
            ContentKind::Pdf
        } else if mime.starts_with("text/") {
            ContentKind::Text
        } else {
            ContentKind::Unsupported
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => ContentKind::Image,
            "pdf" => ContentKind::Pdf,
            "txt" => ContentKind::Text,
            _ => ContentKind::Unsupported,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(ContentKind::Unsupported)
    }
}

/// Orchestrates: size check → pick text source → acquire text → interpret.
/// Acquisition failures never escape; they become an all-default receipt.
pub struct ReceiptPipeline<R: TextSource> {
    recognizer: R,
    pdf: PdfTextExtractor,
    interpreter: ReceiptInterpreter,
}

impl<R: TextSource> ReceiptPipeline<R> {
    pub fn new(recognizer: R, interpreter: ReceiptInterpreter) -> Self {
        Self { recognizer, pdf: PdfTextExtractor, interpreter }
    }

    pub fn interpreter(&self) -> &ReceiptInterpreter {
        &self.interpreter
    }

    /// Obtain raw text for `data`. This is the only fallible step.
    pub fn acquire(&self, data: &[u8], kind: ContentKind) -> Result<String, AcquireError> {
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AcquireError::TooLarge { size: data.len(), limit: MAX_UPLOAD_BYTES });
        }
        match kind {
            ContentKind::Image => self.recognizer.extract_text(data),
            ContentKind::Pdf => self.pdf.extract_text(data),
            ContentKind::Text => PlainText.extract_text(data),
            ContentKind::Unsupported => Err(AcquireError::Unsupported(format!("{kind:?}"))),
        }
    }

    /// Process raw bytes (from an upload) given the uploader's content type.
    pub fn process_bytes(&self, data: &[u8], content_type: &str) -> ParsedReceipt {
        let kind = ContentKind::from_content_type(content_type);
        if kind == ContentKind::Unsupported {
            warn!(content_type, "receipt upload has unsupported content type");
            return ParsedReceipt::acquisition_failed(today());
        }
        self.process_kind_at(data, kind, today())
    }

    /// Process bytes whose kind is already known, with an explicit processing date.
    pub fn process_kind_at(&self, data: &[u8], kind: ContentKind, today: NaiveDate) -> ParsedReceipt {
        match self.acquire(data, kind) {
            Ok(text) => self.interpreter.interpret_at(&text, today),
            Err(e) => {
                warn!(error = %e, ?kind, "receipt text acquisition failed");
                ParsedReceipt::acquisition_failed(today)
            }
        }
    }

    /// Process a file on disk; the content kind comes from its extension.
    pub async fn process_file(&self, path: &Path) -> ParsedReceipt {
        self.process_file_as(path, ContentKind::from_path(path)).await
    }

    pub async fn process_file_as(&self, path: &Path, kind: ContentKind) -> ParsedReceipt {
        info!("Processing receipt: {}", path.display());
        if kind == ContentKind::Unsupported {
            warn!("Unsupported receipt file type: {}", path.display());
            return ParsedReceipt::acquisition_failed(today());
        }
        match read_receipt(path).await {
            Ok(bytes) => self.process_kind_at(&bytes, kind, today()),
            Err(e) => {
                warn!(error = %e, "Could not read receipt file {}", path.display());
                ParsedReceipt::acquisition_failed(today())
            }
        }
    }
}

/// Reads a receipt from disk, refusing oversized files before loading them.
async fn read_receipt(path: &Path) -> Result<Vec<u8>, AcquireError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_UPLOAD_BYTES as u64 {
        return Err(AcquireError::TooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(tokio::fs::read(path).await?)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
