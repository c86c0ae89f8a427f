use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use tally_core::extract_date;
use tally_core::numeric::{find_numeric_tokens, first_numeric_token, normalize_numeric};
use tally_core::record::{ParsedReceipt, MAX_RAW_LINES};

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_total_keyword,
    r"(?i)\b(total|amount|balance|grand total|amount due|total due|net)\b");

// ── Public extraction API ─────────────────────────────────────────────────────

/// Parse raw OCR text into a [`ParsedReceipt`]. Pure and total: malformed or
/// empty input yields an all-absent record, never a panic.
pub fn parse_receipt_text(text: &str) -> ParsedReceipt {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    ParsedReceipt {
        total: extract_total(text),
        date: extract_date(text),
        merchant: extract_merchant(&lines),
        raw_lines: lines
            .iter()
            .take(MAX_RAW_LINES)
            .map(|l| l.to_string())
            .collect(),
    }
}

/// Two-phase total heuristic. Phase one scans lines bottom-to-top for a
/// keyword (`total`, `amount`, `balance`, …) and takes the first numeric
/// token on the first such line that carries one; if that token fails to
/// normalize the keyword scan ends there rather than trying other keyword
/// lines. Phase two falls back to the maximum normalized token anywhere in
/// the text.
pub fn extract_total(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    for line in lines.into_iter().rev() {
        if !re_total_keyword().is_match(line) {
            continue;
        }
        if let Some(token) = first_numeric_token(line) {
            match normalize_numeric(token) {
                Some(v) => return Some(v),
                None => {
                    tracing::debug!(token, line, "total candidate failed to normalize");
                    break;
                }
            }
        }
    }

    find_numeric_tokens(text)
        .filter_map(normalize_numeric)
        .max()
}

/// The first non-empty line is taken as the merchant unless it carries no
/// alphabetic character at all (likely an amount or a scan artifact).
fn extract_merchant(lines: &[&str]) -> Option<String> {
    let first = lines.first()?;
    if first.chars().any(|c| c.is_alphabetic()) {
        Some((*first).to_string())
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
