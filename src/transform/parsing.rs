use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

const YEAR_ONLY: &str = "%Y";

fn try_parse<T, F>(date_str: &str, formats: &[&str], parser: F) -> Option<T>
where
    F: Fn(&str, &str) -> Option<T>,
{
    for format in formats {
        match parser(date_str, format) {
            Some(value) => {
                return Some(value);
            }
            _ => {
                debug!("Failed to cast {date_str} to {format:?}");
                continue;
            }
        }
    }
    None
}

pub fn try_parse_string_date(date_str: &str) -> Option<NaiveDate> {
    try_parse(date_str, DATE_FORMATS, naive_date_from_str)
}

pub fn try_parse_string_datetime(datetime_str: &str) -> Option<NaiveDateTime> {
    try_parse(datetime_str, DATETIME_FORMATS, naive_datetime_from_str)
}

/// Reads a calendar day from a report date field.
///
/// Plain dates are tried first, then timestamps whose time of day is dropped.
pub fn parse_report_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    try_parse_string_date(value)
        .or_else(|| try_parse_string_datetime(value).map(|datetime| datetime.date()))
}

fn naive_date_from_str(date_str: &str, fmt: &str) -> Option<NaiveDate> {
    if fmt == YEAR_ONLY {
        date_str
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    } else {
        NaiveDate::parse_from_str(date_str, fmt).ok()
    }
}

fn naive_datetime_from_str(date_str: &str, fmt: &str) -> Option<NaiveDateTime> {
    if fmt == YEAR_ONLY {
        naive_date_from_str(date_str, fmt).and_then(|date| date.and_hms_opt(0, 0, 0))
    } else {
        NaiveDateTime::parse_from_str(date_str, fmt).ok()
    }
}
