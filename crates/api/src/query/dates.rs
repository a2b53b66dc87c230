use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use super::QueryError;

/// `YYYY-MM-DD`
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a caller-supplied calendar date.
///
/// Only the exact `YYYY-MM-DD` shape is accepted: no signs, no short
/// fields, no trailing time component.
pub fn parse_date(raw: &str) -> Result<Date, QueryError> {
    let invalid = || QueryError::InvalidDateFormat(raw.to_owned());

    let bytes = raw.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }

    Date::parse(raw, ISO_DATE).map_err(|_| invalid())
}
