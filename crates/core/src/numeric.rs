use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Currency-like tokens: `1,234.56`, `1 234,56`, `1234.56` — a two-digit
// decimal part is required so that years and item counts are not picked up
// during scans. Bare integers are still accepted by `normalize_numeric`
// when handed a token directly.
re!(re_numeric_token,
    r"(?:^|[^0-9A-Za-z_])(?:[£$€¥]\s*)?([0-9]{1,3}(?:[ ,][0-9]{3})*[.,][0-9]{2}|[0-9]+[.,][0-9]{2})");

re!(re_comma_decimal, r"^[0-9]+,[0-9]{2}$");

// ── Token search ─────────────────────────────────────────────────────────────

/// All currency-like tokens in `text`, in order of appearance.
pub fn find_numeric_tokens(text: &str) -> impl Iterator<Item = &str> {
    re_numeric_token()
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// The first currency-like token in `text`, if any.
pub fn first_numeric_token(text: &str) -> Option<&str> {
    find_numeric_tokens(text).next()
}

// ── Normalization ────────────────────────────────────────────────────────────

/// Resolve an ambiguous-separator numeric token into a canonical decimal.
///
/// When both `,` and `.` are present, the separator occurring later in the
/// string is the decimal point and the other is stripped as a thousands
/// separator. A lone comma followed by exactly two trailing digits is a
/// decimal point; any other lone comma is a thousands separator. A lone dot
/// is always the decimal point. Returns `None` for anything that does not
/// parse after cleanup.
pub fn normalize_numeric(token: &str) -> Option<Decimal> {
    if token.is_empty() {
        return None;
    }

    // Ordinary spaces and NBSP may appear as thousands separators.
    let mut s: String = token
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .collect();

    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) => {
            if dot > comma {
                s.retain(|c| c != ',');
            } else {
                s.retain(|c| c != '.');
                s = s.replace(',', ".");
            }
        }
        (Some(_), None) => {
            if re_comma_decimal().is_match(&s) {
                s = s.replace(',', ".");
            } else {
                s.retain(|c| c != ',');
            }
        }
        _ => {}
    }

    Decimal::from_str(&s).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ── normalize_numeric ─────────────────────────────────────────────────────

    #[test]
    fn us_style_thousands() {
        assert_eq!(normalize_numeric("1,234.56"), Some(dec("1234.56")));
        assert_eq!(normalize_numeric("12,345,678.90"), Some(dec("12345678.90")));
    }

    #[test]
    fn european_style_thousands() {
        assert_eq!(normalize_numeric("1.234,56"), Some(dec("1234.56")));
    }

    #[test]
    fn space_thousands_comma_decimal() {
        assert_eq!(normalize_numeric("1 234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_numeric("1\u{a0}234,56"), Some(dec("1234.56")));
    }

    #[test]
    fn lone_comma_two_trailing_digits_is_decimal() {
        assert_eq!(normalize_numeric("12,34"), Some(dec("12.34")));
    }

    #[test]
    fn lone_comma_otherwise_is_thousands() {
        assert_eq!(normalize_numeric("1,234"), Some(dec("1234")));
        assert_eq!(normalize_numeric("12,3456"), Some(dec("123456")));
    }

    #[test]
    fn lone_dot_is_always_decimal() {
        assert_eq!(normalize_numeric("1234.56"), Some(dec("1234.56")));
        // Ambiguous for some locales, accepted as decimal here.
        assert_eq!(normalize_numeric("1.234"), Some(dec("1.234")));
    }

    #[test]
    fn bare_integer_parses() {
        assert_eq!(normalize_numeric("1234"), Some(dec("1234")));
    }

    #[test]
    fn malformed_tokens_yield_none() {
        assert_eq!(normalize_numeric(""), None);
        assert_eq!(normalize_numeric("abc"), None);
        assert_eq!(normalize_numeric("no,12"), None);
        assert_eq!(normalize_numeric("£"), None);
    }

    // ── find_numeric_tokens ───────────────────────────────────────────────────

    #[test]
    fn finds_tokens_in_line() {
        let toks: Vec<&str> = find_numeric_tokens("Total: $12.30 (was 15.00)").collect();
        assert_eq!(toks, vec!["12.30", "15.00"]);
    }

    #[test]
    fn token_at_start_of_string() {
        assert_eq!(first_numeric_token("4.50 coffee"), Some("4.50"));
    }

    #[test]
    fn grouped_thousands_matched_whole() {
        assert_eq!(first_numeric_token("due 1,234.56 today"), Some("1,234.56"));
        assert_eq!(first_numeric_token("saldo 1 234,56"), Some("1 234,56"));
    }

    #[test]
    fn bare_integers_not_matched_during_scan() {
        // Years and quantities must not look like amounts.
        assert!(first_numeric_token("Order 2024 item 3").is_none());
    }

    #[test]
    fn currency_symbol_excluded_from_token() {
        assert_eq!(first_numeric_token("€ 99.99"), Some("99.99"));
    }
}
