use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::ParsedStatementRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("Unknown transaction kind: '{other}'")),
        }
    }
}

/// A transaction ready for bulk insertion by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
}

/// Turn classified statement rows into insertable drafts.
///
/// Every row defaults to [`TransactionKind::Expense`] unless `kind` says
/// otherwise; a row without a date gets `today` (the processing date), never
/// an error. Amounts are rounded to two decimal places.
pub fn drafts_from_rows(
    rows: &[ParsedStatementRow],
    kind: Option<TransactionKind>,
    today: NaiveDate,
) -> Vec<TransactionDraft> {
    rows.iter()
        .map(|row| TransactionDraft {
            date: row.date.unwrap_or(today),
            description: row.description.clone(),
            amount: row.amount.round_dp(2),
            kind: kind.unwrap_or(TransactionKind::Expense),
        })
        .collect()
}

/// [`drafts_from_rows`] against the current UTC date.
pub fn drafts_for_today(
    rows: &[ParsedStatementRow],
    kind: Option<TransactionKind>,
) -> Vec<TransactionDraft> {
    drafts_from_rows(rows, kind, Utc::now().date_naive())
}
