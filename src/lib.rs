pub mod calendar;
pub mod datetime;
pub mod error;
pub mod parse;

pub use calendar::{Epoch, FAT_EPOCH};
pub use datetime::{FatDateTime, RawFatDateTime};
pub use error::Error;
pub use parse::{DateTimeFields, ParseError};
