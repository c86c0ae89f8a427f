use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound on the raw lines retained per receipt.
pub const MAX_RAW_LINES: usize = 200;

/// Best-effort structured view of one OCR'd receipt. Every field degrades
/// independently to `None`; callers persist the whole record as a JSON blob
/// next to the raw OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub total: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub merchant: Option<String>,
    /// Trimmed non-empty source lines in reading order, at most
    /// [`MAX_RAW_LINES`] of them.
    pub raw_lines: Vec<String>,
}

impl ParsedReceipt {
    /// The all-absent record — what a failed extraction degrades to.
    pub fn empty() -> Self {
        Self {
            total: None,
            date: None,
            merchant: None,
            raw_lines: Vec::new(),
        }
    }
}

/// One accepted statement-table row. Rows without an amount are never
/// constructed; date and description stay best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatementRow {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: Decimal,
}
