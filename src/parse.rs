//! Parser for date and time strings like `YYYY-MM-DD hh:mm:ss.ffffff+hh:mm`.

use thiserror::Error;

use crate::calendar::days_per_month;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("year field missing or malformed")]
    MalformedYear,
    #[error("month field missing or malformed")]
    MalformedMonth,
    #[error("month value out of range")]
    MonthOutOfRange,
    #[error("day of month field missing or malformed")]
    MalformedDay,
    #[error("day of month value out of range")]
    DayOutOfRange,
    #[error("hours field missing or malformed")]
    MalformedHours,
    #[error("hours value out of range")]
    HoursOutOfRange,
    #[error("minutes field missing or malformed")]
    MalformedMinutes,
    #[error("minutes value out of range")]
    MinutesOutOfRange,
    #[error("seconds field missing or malformed")]
    MalformedSeconds,
    #[error("seconds value out of range")]
    SecondsOutOfRange,
    #[error("seconds fraction must be 3 or 6 digits")]
    MalformedFraction,
    #[error("time zone offset malformed")]
    MalformedTimeZoneOffset,
    #[error("time zone offset out of range")]
    TimeZoneOffsetOutOfRange,
    #[error("unexpected input at end of date and time string")]
    TrailingInput,
}

/// The named field values of a parsed date and time string.
///
/// Missing time-of-day fields default to zero, a missing time zone offset
/// means UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFields {
    pub year: u16,
    /// 1 = January
    pub month: u8,
    pub day_of_month: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub microseconds: u32,
    pub utc_offset_minutes: i32,
}

/// Parse a fixed-width unsigned decimal field.
fn parse_num<const N: usize>(bytes: &[u8], err: ParseError) -> Result<(&[u8], u32), ParseError> {
    // Largest field is the 6 digit fraction, which fits a u32 comfortably
    const { assert!(N <= 9) };

    let Some(digits) = bytes.get(..N) else {
        return Err(err);
    };

    let mut value: u32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(err);
        }
        value = value * 10 + (b - b'0') as u32;
    }

    Ok((&bytes[N..], value))
}

fn expect_byte(bytes: &[u8], want: u8, err: ParseError) -> Result<&[u8], ParseError> {
    match bytes.split_first() {
        Some((&b, rest)) if b == want => Ok(rest),
        _ => Err(err),
    }
}

/// Parse a date and time string into its named field values.
///
/// Accepted formats:
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DD hh:mm:ss`
/// - Either of the above followed by a seconds fraction of exactly 3 or 6
///   digits (`.fff` / `.ffffff`), a time zone offset (`+hh:mm` / `-hh:mm`),
///   or both.
///
/// The fraction is only valid after a time of day.
pub fn parse_datetime_string(text: &str) -> Result<DateTimeFields, ParseError> {
    let bytes = text.as_bytes();

    let (bytes, year) = parse_num::<4>(bytes, ParseError::MalformedYear)?;
    let bytes = expect_byte(bytes, b'-', ParseError::MalformedMonth)?;
    let (bytes, month) = parse_num::<2>(bytes, ParseError::MalformedMonth)?;
    if month == 0 || month > 12 {
        return Err(ParseError::MonthOutOfRange);
    }
    let bytes = expect_byte(bytes, b'-', ParseError::MalformedDay)?;
    let (bytes, day) = parse_num::<2>(bytes, ParseError::MalformedDay)?;
    let days_in_month =
        days_per_month(year as u16, month as u8).map_err(|_| ParseError::MonthOutOfRange)?;
    if day == 0 || day > days_in_month as u32 {
        return Err(ParseError::DayOutOfRange);
    }

    let mut fields = DateTimeFields {
        year: year as u16,
        month: month as u8,
        day_of_month: day as u8,
        hours: 0,
        minutes: 0,
        seconds: 0,
        microseconds: 0,
        utc_offset_minutes: 0,
    };
    if bytes.is_empty() {
        return Ok(fields);
    }

    // Time of day
    let bytes = expect_byte(bytes, b' ', ParseError::TrailingInput)?;
    let (bytes, hours) = parse_num::<2>(bytes, ParseError::MalformedHours)?;
    if hours > 23 {
        return Err(ParseError::HoursOutOfRange);
    }
    let bytes = expect_byte(bytes, b':', ParseError::MalformedMinutes)?;
    let (bytes, minutes) = parse_num::<2>(bytes, ParseError::MalformedMinutes)?;
    if minutes > 59 {
        return Err(ParseError::MinutesOutOfRange);
    }
    let bytes = expect_byte(bytes, b':', ParseError::MalformedSeconds)?;
    let (bytes, seconds) = parse_num::<2>(bytes, ParseError::MalformedSeconds)?;
    if seconds > 59 {
        return Err(ParseError::SecondsOutOfRange);
    }
    fields.hours = hours as u8;
    fields.minutes = minutes as u8;
    fields.seconds = seconds as u8;
    if bytes.is_empty() {
        return Ok(fields);
    }

    // Optional seconds fraction
    let bytes = match bytes.split_first() {
        Some((b'.', rest)) => {
            let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            match digits {
                3 => {
                    let (rest, millis) = parse_num::<3>(rest, ParseError::MalformedFraction)?;
                    fields.microseconds = millis * 1000;
                    rest
                }
                6 => {
                    let (rest, micros) = parse_num::<6>(rest, ParseError::MalformedFraction)?;
                    fields.microseconds = micros;
                    rest
                }
                _ => return Err(ParseError::MalformedFraction),
            }
        }
        _ => bytes,
    };
    if bytes.is_empty() {
        return Ok(fields);
    }

    // Optional time zone offset
    let (sign, bytes) = match bytes.split_first() {
        Some((b'+', rest)) => (1i32, rest),
        Some((b'-', rest)) => (-1i32, rest),
        _ => return Err(ParseError::TrailingInput),
    };
    let (bytes, offset_hours) = parse_num::<2>(bytes, ParseError::MalformedTimeZoneOffset)?;
    if offset_hours > 23 {
        return Err(ParseError::TimeZoneOffsetOutOfRange);
    }
    let bytes = expect_byte(bytes, b':', ParseError::MalformedTimeZoneOffset)?;
    let (bytes, offset_minutes) = parse_num::<2>(bytes, ParseError::MalformedTimeZoneOffset)?;
    if offset_minutes > 59 {
        return Err(ParseError::TimeZoneOffsetOutOfRange);
    }
    fields.utc_offset_minutes = sign * (offset_hours as i32 * 60 + offset_minutes as i32);

    if bytes.is_empty() {
        Ok(fields)
    } else {
        Err(ParseError::TrailingInput)
    }
}
