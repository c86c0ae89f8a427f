use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Three candidate shapes: ISO-ish `YYYY-M-D`, delimited `D-M-YY[YY]`, and
// `D Mon[th] YYYY` with an English month-name prefix.
re!(re_date_candidate,
    r"(?i)(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{2,4}|\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4})");

/// An optional general-purpose date-parsing collaborator. When one is
/// supplied its fuzzy parse is preferred over the built-in heuristics.
pub trait DateParser: Send + Sync {
    fn parse_fuzzy(&self, text: &str) -> Option<NaiveDate>;
}

/// Find and normalize the first date-like substring of `text` using the
/// built-in heuristics only.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    extract_date_with(text, None)
}

/// Find and normalize the first date-like substring of `text`, delegating
/// the matched candidate to `parser` when one is available. When no
/// candidate pattern matches and a parser is available, the full text is
/// handed to it as a last resort.
pub fn extract_date_with(text: &str, parser: Option<&dyn DateParser>) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    if let Some(c) = re_date_candidate().captures(text) {
        let candidate = c.get(1).map(|m| m.as_str())?;
        match parser {
            Some(p) => {
                if let Some(d) = p.parse_fuzzy(candidate) {
                    return Some(d);
                }
                tracing::debug!(candidate, "fuzzy date parser rejected candidate");
            }
            None => {
                if let Some(d) = normalize_candidate(candidate) {
                    return Some(d);
                }
                tracing::debug!(candidate, "date candidate failed to normalize");
            }
        }
    }

    parser.and_then(|p| p.parse_fuzzy(text))
}

/// `2025-10-07` stays year-first; `07/10/2025` is read day-first (the
/// day-first convention wins for delimited dates); 2-digit years are
/// expanded with a `20` prefix; month names map through their 3-letter
/// English abbreviation.
fn normalize_candidate(candidate: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = candidate
        .split(['-', '/', ' '])
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }

    if parts[0].len() == 4 {
        let y: i32 = parts[0].parse().ok()?;
        let m: u32 = parts[1].parse().ok()?;
        let d: u32 = parts[2].parse().ok()?;
        NaiveDate::from_ymd_opt(y, m, d)
    } else {
        let d: u32 = parts[0].parse().ok()?;
        let m: u32 = parts[1]
            .parse()
            .ok()
            .or_else(|| month_prefix_to_num(parts[1]))?;
        let y: i32 = match parts[2].len() {
            2 => format!("20{}", parts[2]).parse().ok()?,
            _ => parts[2].parse().ok()?,
        };
        NaiveDate::from_ymd_opt(y, m, d)
    }
}

fn month_prefix_to_num(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    match prefix {
        "jan" => Some(1), "feb" => Some(2), "mar" => Some(3), "apr" => Some(4),
        "may" => Some(5), "jun" => Some(6), "jul" => Some(7), "aug" => Some(8),
        "sep" => Some(9), "oct" => Some(10), "nov" => Some(11), "dec" => Some(12),
        _ => None,
    }
}
