//! pt-BR value parsers: money, percentages and dates.
//!
//! The TD exports use `.` as the thousands separator and `,` as the decimal
//! separator (`R$ 1.234,56`), dates as `dd/mm/yyyy`, and yields embedded in
//! free text (`IPCA + 7,80%`).

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Leaf error for money-like values. Callers decide the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("empty numeric value")]
    Empty,
    #[error("invalid pt-BR number '{0}'")]
    InvalidNumber(String),
}

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:[.,][0-9]+)?)\s*%").expect("static regex"));

/// Parse a pt-BR money string (`"R$ 1.234,56"`, `"10,00"`) into a float.
///
/// Only unsigned plain decimals are accepted: signs, exponents and
/// `inf`/`nan` are rejected even though `f64::from_str` would take them.
pub fn parse_brl(raw: &str) -> Result<f64, LocaleError> {
    parse_pt_decimal(raw, false)
}

/// Like [`parse_brl`], but a leading `-`/`+` is allowed.
///
/// The history export carries rates (`"-0,01"`) that can go negative.
pub fn parse_pt_number(raw: &str) -> Result<f64, LocaleError> {
    parse_pt_decimal(raw, true)
}

fn parse_pt_decimal(raw: &str, signed: bool) -> Result<f64, LocaleError> {
    let invalid = || LocaleError::InvalidNumber(raw.trim().to_string());

    let cleaned = raw.trim().replace("R$", "");
    let mut cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(LocaleError::Empty);
    }

    let mut sign = 1.0;
    if signed {
        if let Some(rest) = cleaned.strip_prefix('-') {
            sign = -1.0;
            cleaned = rest;
        } else if let Some(rest) = cleaned.strip_prefix('+') {
            cleaned = rest;
        }
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    let valid_shape = normalized.chars().all(|c| c.is_ascii_digit() || c == '.')
        && normalized.chars().any(|c| c.is_ascii_digit())
        && normalized.matches('.').count() <= 1;
    if !valid_shape {
        return Err(invalid());
    }

    normalized.parse::<f64>().map(|v| sign * v).map_err(|_| invalid())
}

/// Extract the first percentage found in `raw`.
///
/// Returns the number as written (`"3,53%"` -> `3.53`), not divided by 100.
/// The realtime JSON consumers read the yield in percent points. Anything
/// without a recognizable `<number>%` yields `0.0`.
pub fn parse_yield_percent(raw: &str) -> f64 {
    let Some(caps) = PERCENT_RE.captures(raw.trim()) else {
        return 0.0;
    };
    caps[1].replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Reformat a maturity date into `yyyy-mm-dd`.
///
/// Accepts `dd/mm/yyyy` and an already-ISO `yyyy-mm-dd`. Any other shape
/// returns an empty string, which callers treat as "drop the row".
pub fn reformat_date(raw: &str) -> String {
    let s = raw.trim();

    let slash: Vec<&str> = s.split('/').collect();
    if let [dd, mm, yyyy] = slash.as_slice() {
        if is_digits(dd, 2) && is_digits(mm, 2) && is_digits(yyyy, 4) {
            return format!("{yyyy}-{mm}-{dd}");
        }
    }

    let dash: Vec<&str> = s.split('-').collect();
    if let [yyyy, mm, dd] = dash.as_slice() {
        if is_digits(yyyy, 4) && is_digits(mm, 2) && is_digits(dd, 2) {
            return s.to_string();
        }
    }

    String::new()
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brl_with_symbol_and_thousands() {
        assert!((parse_brl("R$ 1.234,56").unwrap() - 1234.56).abs() < 1e-9);
        assert!((parse_brl("10,00").unwrap() - 10.0).abs() < 1e-9);
        assert!((parse_brl("  R$15.032,71 ").unwrap() - 15032.71).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_money() {
        assert_eq!(parse_brl(""), Err(LocaleError::Empty));
        assert_eq!(parse_brl("R$"), Err(LocaleError::Empty));
        assert!(parse_brl("abc").is_err());
        assert!(parse_brl("-10,00").is_err());
        assert!(parse_brl("1e5").is_err());
        assert!(parse_brl("1,2,3").is_err());
    }

    #[test]
    fn signed_numbers_keep_their_sign() {
        assert!((parse_pt_number("-0,01").unwrap() + 0.01).abs() < 1e-12);
        assert!((parse_pt_number("+7,92").unwrap() - 7.92).abs() < 1e-12);
        assert!((parse_pt_number("10.850,12").unwrap() - 10850.12).abs() < 1e-9);
        assert_eq!(parse_pt_number(""), Err(LocaleError::Empty));
        assert!(parse_pt_number("-").is_err());
        assert!(parse_pt_number("--1").is_err());
        assert!(parse_pt_number("1e5").is_err());
    }

    #[test]
    fn percentage_is_not_divided() {
        assert!((parse_yield_percent("3,53%") - 3.53).abs() < 1e-12);
        assert!((parse_yield_percent("IPCA + 7,80%") - 7.80).abs() < 1e-12);
        assert!((parse_yield_percent("SELIC + 0,0711%") - 0.0711).abs() < 1e-12);
        assert!((parse_yield_percent("12.5 %") - 12.5).abs() < 1e-12);
    }

    #[test]
    fn percentage_without_sign_is_zero() {
        assert_eq!(parse_yield_percent("3,53"), 0.0);
        assert_eq!(parse_yield_percent(""), 0.0);
        assert_eq!(parse_yield_percent("SELIC"), 0.0);
    }

    #[test]
    fn reformats_dates() {
        assert_eq!(reformat_date("28/01/2026"), "2026-01-28");
        assert_eq!(reformat_date(" 2026-01-28 "), "2026-01-28");
        assert_eq!(reformat_date("28-01-2026"), "");
        assert_eq!(reformat_date("1/1/2026"), "");
        assert_eq!(reformat_date("ab/cd/efgh"), "");
        assert_eq!(reformat_date("2029-03-01T00:00"), "");
        assert_eq!(reformat_date("2029-ab-cd"), "");
        assert_eq!(reformat_date("2029-3-1"), "");
        assert_eq!(reformat_date(""), "");
    }
}
