use thiserror::Error;

use crate::parse::ParseError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("the month value is out of bounds")]
    MonthOutOfBounds,
    #[error("the day of month value is out of bounds")]
    DayOfMonthOutOfBounds,
    #[error("the hours value is out of bounds")]
    HoursOutOfBounds,
    #[error("the minutes value is out of bounds")]
    MinutesOutOfBounds,
    #[error("the seconds value is out of bounds")]
    SecondsOutOfBounds,
    #[error("the year value is not representable")]
    YearOutOfBounds,
    #[error("the day count does not map to a calendar date")]
    DayCountOutOfBounds,
    #[error("the date and time string is malformed")]
    InvalidDateTimeString(#[from] ParseError),
}
