pub mod date;
pub mod numeric;
pub mod record;

pub use date::{extract_date, extract_date_with, DateParser};
pub use numeric::{find_numeric_tokens, first_numeric_token, normalize_numeric};
pub use record::{ParsedReceipt, ParsedStatementRow, MAX_RAW_LINES};
