pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;

pub use extract::{extract_total, parse_receipt_text};
pub use pipeline::{ReceiptOutcome, ReceiptPipeline};
pub use preprocess::{prepare_for_ocr, prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{FailingRecognizer, MockRecognizer, OcrBackend, OcrError};
pub use tally_core::{extract_date, ParsedReceipt};
