use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// One extracted table row: ordered cells, possibly containing empty strings.
pub type TableRow = Vec<String>;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to extract PDF text: {0}")]
    Extract(String),
    #[error("Table source unavailable")]
    Unavailable,
}

/// Abstraction over a PDF table-extraction backend. Returns the tables of a
/// document in order, each as an ordered row sequence.
pub trait TableSource: Send + Sync {
    fn tables_from_pdf(&self, path: &Path) -> Result<Vec<Vec<TableRow>>, TableError>;
}

// ── Text-layer backend ────────────────────────────────────────────────────────

fn re_cell_gap() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"\t+| {2,}").expect("invalid regex"))
}

/// Best-effort grid recovery from the PDF text layer: the document text is
/// split into lines and each line into cells on tab runs or 2+ spaces.
/// Vendor PDFs with a real text layer keep their column gaps this way;
/// scanned PDFs simply yield nothing.
pub struct PdfTextTables;

impl TableSource for PdfTextTables {
    fn tables_from_pdf(&self, path: &Path) -> Result<Vec<Vec<TableRow>>, TableError> {
        let text = pdf_extract::extract_text(path).map_err(|e| TableError::Extract(e.to_string()))?;
        let rows: Vec<TableRow> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .map(split_cells)
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![rows])
    }
}

fn split_cells(line: &str) -> TableRow {
    re_cell_gap()
        .split(line.trim_start())
        .map(|c| c.to_string())
        .collect()
}

// ── Mock backend ──────────────────────────────────────────────────────────────

/// Serves pre-set tables, or fails — lets the row pipeline be unit-tested
/// without real PDF fixtures.
pub struct MockTableSource {
    tables: Option<Vec<Vec<TableRow>>>,
}

impl MockTableSource {
    pub fn new(tables: Vec<Vec<TableRow>>) -> Self {
        Self { tables: Some(tables) }
    }

    pub fn failing() -> Self {
        Self { tables: None }
    }
}

impl TableSource for MockTableSource {
    fn tables_from_pdf(&self, _path: &Path) -> Result<Vec<Vec<TableRow>>, TableError> {
        self.tables.clone().ok_or(TableError::Unavailable)
    }
}
