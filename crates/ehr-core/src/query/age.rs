//! Calendar age arithmetic.

use chrono::{Datelike, NaiveDate};

/// Whole calendar years from `start` to `end`.
///
/// `end.year - start.year`, minus one when `end`'s (month, day) comes before
/// `start`'s. Negative when `end` precedes `start`'s anniversary in an
/// earlier year.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years - 1
    } else {
        years
    }
}
