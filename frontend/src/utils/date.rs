//! Conversions between the two textual date encodings used by the app.
//!
//! The API speaks `YYYY-MM-DD`; screens show `DD/MM/YYYY`. Text conversions
//! are structural only: `2024-13-40` converts to `40/13/2024`. Only
//! [`parse_display_date`] checks that the result is a real calendar day.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use thiserror::Error;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEncoding {
    /// `YYYY-MM-DD`, used on the wire.
    Api,
    /// `DD/MM/YYYY`, used on screen.
    Display,
}

impl DateEncoding {
    fn separator(self) -> char {
        match self {
            DateEncoding::Api => '-',
            DateEncoding::Display => '/',
        }
    }
}

impl fmt::Display for DateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateEncoding::Api => f.write_str("YYYY-MM-DD"),
            DateEncoding::Display => f.write_str("DD/MM/YYYY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("date string is empty")]
    Empty,
    #[error("`{input}` is not a {encoding} date")]
    Shape {
        input: String,
        encoding: DateEncoding,
    },
    #[error("`{0}` is not a calendar date")]
    OutOfRange(String),
}

/// Year, month and day as written, without calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

fn numeric(field: &str, max_len: usize) -> Option<u32> {
    if field.is_empty() || field.len() > max_len || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Strict parse of `input` in the stated encoding. Day and month may be one
/// or two digits; the year must be four.
pub fn parse_parts(input: &str, encoding: DateEncoding) -> Result<DateParts, DateFormatError> {
    if input.is_empty() {
        return Err(DateFormatError::Empty);
    }
    let shape_error = || DateFormatError::Shape {
        input: input.to_string(),
        encoding,
    };

    let fields: Vec<&str> = input.split(encoding.separator()).collect();
    let [first, second, third] = fields.as_slice() else {
        return Err(shape_error());
    };
    let (year, month, day) = match encoding {
        DateEncoding::Api => (first, second, third),
        DateEncoding::Display => (third, second, first),
    };
    if year.len() != 4 {
        return Err(shape_error());
    }

    Ok(DateParts {
        year: numeric(year, 4).ok_or_else(shape_error)?,
        month: numeric(month, 2).ok_or_else(shape_error)?,
        day: numeric(day, 2).ok_or_else(shape_error)?,
    })
}

pub fn render(parts: DateParts, encoding: DateEncoding) -> String {
    match encoding {
        DateEncoding::Api => format!("{:04}-{:02}-{:02}", parts.year, parts.month, parts.day),
        DateEncoding::Display => format!("{:02}/{:02}/{:04}", parts.day, parts.month, parts.year),
    }
}

pub fn convert(input: &str, from: DateEncoding, to: DateEncoding) -> Result<String, DateFormatError> {
    parse_parts(input, from).map(|parts| render(parts, to))
}

fn convert_or_keep(input: &str, from: DateEncoding, to: DateEncoding) -> String {
    if input.is_empty() {
        return String::new();
    }
    convert(input, from, to).unwrap_or_else(|err| {
        log::debug!("Date format error: {}", err);
        input.to_string()
    })
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`. Anything else comes back unchanged.
pub fn format_date_for_display(input: &str) -> String {
    convert_or_keep(input, DateEncoding::Api, DateEncoding::Display)
}

/// `DD/MM/YYYY` to `YYYY-MM-DD`. Anything else comes back unchanged.
pub fn format_date_for_api(input: &str) -> String {
    convert_or_keep(input, DateEncoding::Display, DateEncoding::Api)
}

/// Formats a value that already carries its calendar day, such as a
/// `NaiveDate` or a zoned `DateTime`.
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// The calendar day of `instant` in the configured application time zone.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    format_date(&instant.with_timezone(&config::current_time_zone()))
}

pub fn today_formatted() -> String {
    format_instant(&Utc::now())
}

pub fn parse_display_date(input: &str) -> Result<NaiveDate, DateFormatError> {
    let parts = parse_parts(input, DateEncoding::Display)?;
    NaiveDate::from_ymd_opt(parts.year as i32, parts.month, parts.day)
        .ok_or_else(|| DateFormatError::OutOfRange(input.to_string()))
}
