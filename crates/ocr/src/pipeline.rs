use std::path::Path;

use crate::extract::parse_receipt_text;
use crate::preprocess;
use crate::recognizer::OcrBackend;
use tally_core::ParsedReceipt;

/// The result of one receipt processing run. Always structurally valid: a
/// collaborator failure anywhere in the chain degrades to empty text and an
/// all-absent record.
#[derive(Debug)]
pub struct ReceiptOutcome {
    /// Normalized OCR text: trimmed, blank lines dropped. Persisted by the
    /// caller next to the parsed record.
    pub ocr_text: String,
    pub receipt: ParsedReceipt,
}

impl ReceiptOutcome {
    fn empty() -> Self {
        Self {
            ocr_text: String::new(),
            receipt: ParsedReceipt::empty(),
        }
    }
}

/// Orchestrates read → preprocess → OCR → field extraction for one image.
///
/// Stateless between calls; any number of invocations may run concurrently.
/// Deadlines and retries are the caller's concern.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process an image file on disk. An unreadable file yields the empty
    /// outcome, not an error.
    pub async fn process_file(&self, path: &Path) -> ReceiptOutcome {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.process_bytes(&bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read receipt image");
                ReceiptOutcome::empty()
            }
        }
    }

    /// Process raw image bytes (camera capture or upload body).
    pub fn process_bytes(&self, data: &[u8]) -> ReceiptOutcome {
        let raw = match preprocess::prepare_for_ocr_from_bytes(data) {
            Ok(png) => match self.recognizer.recognize(&png) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "OCR recognition failed");
                    String::new()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "image preprocessing failed");
                String::new()
            }
        };

        let ocr_text = normalize_ocr_text(&raw);
        let receipt = parse_receipt_text(&ocr_text);
        ReceiptOutcome { ocr_text, receipt }
    }
}

/// Trim trailing whitespace per line and drop blank lines, preserving
/// top-to-bottom reading order.
fn normalize_ocr_text(raw: &str) -> String {
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{FailingRecognizer, MockRecognizer};
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
    use rust_decimal::Decimal;
    use std::io::Cursor;
    use std::str::FromStr;

    fn tiny_png() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |x, y| Luma([(x * 40 + y) as u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn process_bytes_extracts_fields() {
        let pipeline =
            ReceiptPipeline::new(MockRecognizer::new("JOE'S CAFE\n2025-10-07\nTotal 12.30\n"));
        let out = pipeline.process_bytes(&tiny_png());
        assert_eq!(out.receipt.merchant.as_deref(), Some("JOE'S CAFE"));
        assert_eq!(out.receipt.total, Some(Decimal::from_str("12.30").unwrap()));
        assert_eq!(out.ocr_text, "JOE'S CAFE\n2025-10-07\nTotal 12.30");
    }

    #[test]
    fn ocr_failure_degrades_to_empty_outcome() {
        let pipeline = ReceiptPipeline::new(FailingRecognizer);
        let out = pipeline.process_bytes(&tiny_png());
        assert_eq!(out.ocr_text, "");
        assert_eq!(out.receipt, ParsedReceipt::empty());
    }

    #[test]
    fn undecodable_image_degrades_to_empty_outcome() {
        let pipeline = ReceiptPipeline::new(MockRecognizer::new("never reached"));
        let out = pipeline.process_bytes(b"not an image at all");
        assert_eq!(out.receipt, ParsedReceipt::empty());
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty_outcome() {
        let pipeline = ReceiptPipeline::new(MockRecognizer::new("unused"));
        let out = pipeline.process_file(Path::new("/no/such/receipt.png")).await;
        assert_eq!(out.receipt, ParsedReceipt::empty());
    }

    #[tokio::test]
    async fn process_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let pipeline = ReceiptPipeline::new(MockRecognizer::new("ACME\nTotal 3.00"));
        let out = pipeline.process_file(&path).await;
        assert_eq!(out.receipt.merchant.as_deref(), Some("ACME"));
    }

    #[test]
    fn blank_lines_removed_from_ocr_text() {
        let pipeline = ReceiptPipeline::new(MockRecognizer::new("A  \n\n   \nB\n"));
        let out = pipeline.process_bytes(&tiny_png());
        assert_eq!(out.ocr_text, "A\nB");
    }
}
