// Calendar date helpers for the stored date fields

use chrono::NaiveDate;

use crate::{
    config::{DATE_FORMAT, DATE_LEN},
    kyc::{KycError, KycResult},
};

// Check the YYYY-MM-DD shape: zero padded digits and two dashes
fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == DATE_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a stored date in `YYYY-MM-DD` form
///
/// Only zero padded, real calendar dates are accepted: `2021-6-1`,
/// `2021-02-30` or `2021-06-01T00:00:00` are all rejected.
pub fn parse_date(s: &str) -> KycResult<NaiveDate> {
    if !has_date_shape(s) {
        return Err(KycError::InvalidDate(s.to_owned()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| KycError::InvalidDate(s.to_owned()))
}

/// Format a date the way it is stored
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Check if `date` is strictly later than `now`
/// Day granularity: the same calendar day is not in the future
#[inline]
pub fn is_future(date: &NaiveDate, now: &NaiveDate) -> bool {
    date > now
}
