use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::models::{MonthKey, TransactionType};
use crate::query::{TransactionFilter, ALL};

/// Value following `--name`, if present.
pub(crate) fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither a `--flag` nor a flag's value.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Accepts `1234.5`, `$1,234.50` and similar.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let cleaned = s.replace(['$', ','], "");
    Decimal::from_str(cleaned.trim()).map_err(|_| ValidationError::InvalidAmount(s.to_string()))
}

pub(crate) fn parse_type(s: &str) -> Result<TransactionType, ValidationError> {
    TransactionType::parse(s).ok_or_else(|| ValidationError::InvalidType(s.to_string()))
}

/// `All` means no type filter.
pub(crate) fn parse_type_filter(s: &str) -> Result<Option<TransactionType>, ValidationError> {
    if s.trim().eq_ignore_ascii_case(ALL) {
        Ok(None)
    } else {
        parse_type(s).map(Some)
    }
}

/// Parse `s` as a month, or use the current month when absent.
pub(crate) fn month_or_current(s: Option<&str>) -> Result<MonthKey, ValidationError> {
    match s {
        Some(m) => m.parse(),
        None => Ok(MonthKey::current()),
    }
}

/// Build a filter from `--from`, `--to`, `--category` and `--type`.
pub(crate) fn filter_from_args(args: &[String]) -> Result<TransactionFilter, ValidationError> {
    let mut filter = TransactionFilter::new();
    if let Some(from) = flag_value(args, "--from") {
        filter = filter.since(parse_date(from)?);
    }
    if let Some(to) = flag_value(args, "--to") {
        filter = filter.until(parse_date(to)?);
    }
    if let Some(category) = flag_value(args, "--category") {
        filter = filter.category(category);
    }
    if let Some(kind) = flag_value(args, "--type") {
        filter = filter.kind(parse_type_filter(kind)?);
    }
    Ok(filter)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
