use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Mock backends (always available, used for tests) ──────────────────────────

/// Returns a pre-set string — lets the extraction pipeline be unit-tested
/// without a Tesseract install.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Always fails — models a missing OCR runtime for degrade-path tests.
pub struct FailingRecognizer;

impl OcrBackend for FailingRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// Environment override for the tessdata directory, applied by
    /// [`TesseractRecognizer::from_env`].
    pub const TESSDATA_ENV: &str = "TESSERACT_DATA";

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        /// The data path and language are fixed at construction; there is no
        /// process-wide default to mutate afterwards.
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        /// English-language recognizer honoring the `TESSERACT_DATA`
        /// environment variable when set.
        pub fn from_env() -> Self {
            Self::new(std::env::var(TESSDATA_ENV).ok(), "eng")
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("JOE'S CAFE\n12.30");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "JOE'S CAFE\n12.30");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn failing_recognizer_always_errors() {
        assert!(matches!(
            FailingRecognizer.recognize(b"img"),
            Err(OcrError::NotAvailable)
        ));
    }
}
