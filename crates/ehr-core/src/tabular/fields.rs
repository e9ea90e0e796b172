//! Typed interpretation of individual cells.

use chrono::NaiveDate;

use super::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the date portion of a `YYYY-MM-DD[ time]` cell.
///
/// Anything after the first whitespace (usually a time of day) is ignored
/// and never validated.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let date = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::InvalidDate(text.to_string()))?;
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}

/// Parse a numeric lab value.
pub fn parse_value(text: &str) -> Result<f64, ParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}
