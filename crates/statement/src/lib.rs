pub mod classify;
pub mod import;
pub mod tables;

use std::path::Path;

pub use classify::classify_row;
pub use import::{drafts_from_rows, TransactionDraft, TransactionKind};
pub use tables::{MockTableSource, PdfTextTables, TableError, TableRow, TableSource};
pub use tally_core::ParsedStatementRow;

/// Extract transaction rows from a statement PDF on disk using the default
/// text-layer backend. Swallows all internal errors: an unreadable or
/// table-less PDF yields an empty vector, never an `Err` or a panic.
pub fn parse_transactions_from_pdf(path: &Path) -> Vec<ParsedStatementRow> {
    parse_transactions_with(&PdfTextTables, path)
}

/// Same as [`parse_transactions_from_pdf`] with an explicit table source.
pub fn parse_transactions_with<S: TableSource>(source: &S, path: &Path) -> Vec<ParsedStatementRow> {
    let tables = match source.tables_from_pdf(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "pdf table extraction failed");
            return Vec::new();
        }
    };

    tables
        .iter()
        .flat_map(|table| table.iter())
        .filter_map(|row| classify_row(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn row(cells: &[&str]) -> TableRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn rows_collected_across_tables_in_order() {
        let source = MockTableSource::new(vec![
            vec![
                row(&["Date", "Description", "Amount"]),
                row(&["2025-01-05", "Grocery Store", "45.20"]),
            ],
            vec![row(&["2025-01-06", "Coffee", "4.50"])],
        ]);
        let rows = parse_transactions_with(&source, Path::new("statement.pdf"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Grocery Store");
        assert_eq!(rows[0].amount, Decimal::from_str("45.20").unwrap());
        assert_eq!(rows[1].description, "Coffee");
    }

    #[test]
    fn extraction_failure_yields_empty_vec() {
        let rows = parse_transactions_with(&MockTableSource::failing(), Path::new("bad.pdf"));
        assert!(rows.is_empty());
    }

    #[test]
    fn unreadable_pdf_yields_empty_vec() {
        // Real backend pointed at a file that is not a PDF.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not.pdf");
        std::fs::write(&path, b"plain text, no pdf header").unwrap();
        assert!(parse_transactions_from_pdf(&path).is_empty());
    }

    #[test]
    fn missing_file_yields_empty_vec() {
        assert!(parse_transactions_from_pdf(Path::new("/no/such/file.pdf")).is_empty());
    }
}
