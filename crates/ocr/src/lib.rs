pub mod amount;
pub mod category;
pub mod config;
pub mod date;
pub mod interpreter;
pub mod normalize;
pub mod pdf;
pub mod pipeline;
pub mod recognizer;
pub mod types;
pub mod vendor;

pub use amount::AmountExtractor;
pub use category::CategoryClassifier;
pub use config::{CategoryKeywords, ConfigError, InterpreterConfig};
pub use date::{DateExtractor, DatePattern};
pub use interpreter::ReceiptInterpreter;
pub use normalize::{normalize, RawDocument};
pub use pdf::PdfTextExtractor;
pub use pipeline::{ContentKind, ReceiptPipeline, MAX_UPLOAD_BYTES};
pub use recognizer::{AcquireError, MockRecognizer, PlainText, TextSource, UnavailableRecognizer};
pub use types::{AmountCandidate, AmountSource, DefaultReason, ParsedReceipt, Resolved};
pub use vendor::VendorExtractor;
