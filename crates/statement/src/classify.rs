use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::tables::TableRow;
use tally_core::ParsedStatementRow;

/// Strict formats tried against a date-candidate cell, in priority order.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Classify one table row into a statement record.
///
/// Blank rows and header rows are discarded. Each cell is tested
/// independently: the first cell that parses as a date sets the row date
/// (later date-like cells never overwrite it), the last cell that parses as
/// an amount sets the row amount, and cells failing both candidate tests
/// join the description. A row is emitted only when an amount was found.
pub fn classify_row(row: &TableRow) -> Option<ParsedStatementRow> {
    let cells: Vec<&str> = row.iter().map(|c| c.trim()).collect();
    if cells.iter().all(|c| c.is_empty()) {
        return None;
    }
    if is_header_row(&cells) {
        return None;
    }

    let mut date: Option<NaiveDate> = None;
    let mut amount: Option<Decimal> = None;
    let mut desc_parts: Vec<&str> = Vec::new();

    for &cell in &cells {
        let date_candidate = looks_like_date(cell);
        let amount_candidate = looks_like_amount(cell);

        if date_candidate && date.is_none() {
            date = parse_date_strict(cell);
        }
        if amount_candidate {
            if let Some(v) = parse_amount(cell) {
                amount = Some(v);
            }
        } else if !date_candidate && !cell.is_empty() {
            desc_parts.push(cell);
        }
    }

    let amount = amount?;
    Some(ParsedStatementRow {
        date,
        description: desc_parts.join(" "),
        amount,
    })
}

/// Header heuristic: `date` together with any of `amount`, `price`,
/// `description` in the joined lower-cased row text.
fn is_header_row(cells: &[&str]) -> bool {
    let joined = cells.join(" ").to_lowercase();
    joined.contains("date")
        && (joined.contains("amount")
            || joined.contains("price")
            || joined.contains("description"))
}

fn looks_like_date(cell: &str) -> bool {
    cell.chars().any(|c| c.is_ascii_digit())
        && (cell.contains('/') || cell.contains('-') || cell.len() >= 6)
}

fn looks_like_amount(cell: &str) -> bool {
    cell.chars().any(|c| c.is_ascii_digit()) && (cell.contains('.') || cell.contains(','))
}

fn parse_date_strict(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

/// Strip thousands separators and currency symbols, then parse as decimal.
fn parse_amount(cell: &str) -> Option<Decimal> {
    let clean: String = cell
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£' | '¥'))
        .collect();
    Decimal::from_str(clean.trim()).ok()
}
