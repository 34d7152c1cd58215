use zerocopy::byteorder::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::calendar::{self, FAT_EPOCH, SECONDS_PER_DAY};
use crate::error::Error;
use crate::parse::parse_datetime_string;

/// Seconds between the POSIX epoch (1970-01-01) and the FAT epoch
/// (1980-01-01).
const FAT_TO_POSIX_BASE: i64 = 315_532_800;

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;

/// The date time field as it appears on disk in a FAT directory entry:
/// the time word followed by the date word, both little-endian.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
#[repr(C, packed)]
pub struct RawFatDateTime {
    pub time: U16,
    pub date: U16,
}

impl RawFatDateTime {
    /// The combined 32-bit value, date word in the low 16 bits.
    pub fn packed(&self) -> u32 {
        let time: u16 = self.time.into();
        let date: u16 = self.date.into();
        (time as u32) << 16 | date as u32
    }

    pub fn from_packed(value: u32) -> Self {
        Self {
            time: ((value >> 16) as u16).into(),
            date: (value as u16).into(),
        }
    }
}

/// A FAT date time, normalized to seconds elapsed since the FAT epoch.
///
/// The FAT date time is a 32-bit value containing two 16-bit values:
///   * The date (lower 16 bits).
///     * bits 0 - 4: day of month, where 1 represents the first day
///     * bits 5 - 8: month of year, where 1 represents January
///     * bits 9 - 15: year since 1980
///   * The time of day (upper 16 bits).
///     * bits 0 - 4: seconds (in 2 second intervals)
///     * bits 5 - 10: minutes
///     * bits 11 - 15: hours
///
/// The format carries no time zone information and is typically stored in
/// the local time of the machine that wrote it.
///
/// A value is either unset or holds a concrete elapsed-seconds count; it is
/// write-once and never changes state after construction. Readouts never
/// fail, an unset or unmappable value reads out as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatDateTime {
    seconds: Option<i64>,
    is_local_time: bool,
}

impl FatDateTime {
    /// Native resolution of the format: the packed seconds field counts
    /// 2-second intervals.
    pub const PRECISION_SECONDS: u8 = 2;

    /// A value representing "no timestamp".
    pub fn unset() -> Self {
        Self {
            seconds: None,
            is_local_time: false,
        }
    }

    /// Decodes a packed 32-bit FAT date time, date word in the low 16 bits.
    pub fn from_packed(value: u32) -> Result<Self, Error> {
        Ok(Self {
            seconds: Some(seconds_from_packed(value)?),
            is_local_time: false,
        })
    }

    /// Decodes the two 16-bit words as they appear in a directory entry.
    pub fn from_parts(date: u16, time: u16) -> Result<Self, Error> {
        Self::from_packed((time as u32) << 16 | date as u32)
    }

    /// Decodes the on-disk byte representation.
    pub fn from_raw(raw: &RawFatDateTime) -> Result<Self, Error> {
        Self::from_packed(raw.packed())
    }

    /// Builds a value from a `YYYY-MM-DD hh:mm:ss.ffffff+hh:mm` style
    /// string; the time of day, seconds fraction and time zone offset are
    /// optional and a missing time zone means UTC.
    ///
    /// The year must fall inside the format's representable window,
    /// 1980 through 2107.
    pub fn from_datetime_string(text: &str) -> Result<Self, Error> {
        let fields = parse_datetime_string(text)?;

        if fields.year < FAT_EPOCH.year || fields.year > FAT_EPOCH.year + 0x7f {
            return Err(Error::YearOutOfBounds);
        }

        let posix_seconds = calendar::seconds_from_elements(
            fields.year,
            fields.month,
            fields.day_of_month,
            fields.hours,
            fields.minutes,
            fields.seconds,
        )?;

        Ok(Self {
            seconds: Some(posix_seconds - FAT_TO_POSIX_BASE),
            is_local_time: false,
        })
    }

    pub fn is_set(&self) -> bool {
        self.seconds.is_some()
    }

    pub fn is_local_time(&self) -> bool {
        self.is_local_time
    }

    /// Seconds elapsed since the FAT epoch, or `None` when unset.
    pub fn elapsed_seconds(&self) -> Option<i64> {
        self.seconds
    }

    /// A POSIX timestamp in seconds and the remainder in 100 nanosecond
    /// units, or `None` when unset or before the POSIX epoch. The format
    /// cannot represent sub-second values, so the remainder is always 0.
    pub fn to_stat_tuple(&self) -> Option<(i64, u32)> {
        match self.seconds {
            Some(seconds) if seconds >= 0 => Some((seconds + FAT_TO_POSIX_BASE, 0)),
            _ => None,
        }
    }

    /// The value formatted as `YYYY-MM-DD hh:mm:ss`, or `None` when unset.
    pub fn to_datetime_string(&self) -> Option<String> {
        let seconds = self.seconds?;
        let (days, hours, minutes, seconds) = split_time_values(seconds);
        let (year, month, day) = calendar::date_from_day_of_year(&FAT_EPOCH, days).ok()?;
        Some(format!(
            "{year:04}-{month:02}-{day:02} {hours:02}:{minutes:02}:{seconds:02}"
        ))
    }

    /// The calendar `(year, month, day_of_month)` date, or `None` when
    /// unset or when the internal state does not map back to a date.
    pub fn date(&self) -> Option<(u16, u8, u8)> {
        let seconds = self.seconds?;
        let (days, _, _, _) = split_time_values(seconds);
        match calendar::date_from_day_of_year(&FAT_EPOCH, days) {
            Ok(date) => Some(date),
            Err(err) => {
                log::debug!("cannot map {days} elapsed days to a date: {err}");
                None
            }
        }
    }

    /// A POSIX timestamp in microseconds, or `None` when unset or before
    /// the POSIX epoch.
    pub fn to_micros(&self) -> Option<i64> {
        match self.seconds {
            Some(seconds) if seconds >= 0 => {
                Some((seconds + FAT_TO_POSIX_BASE) * MICROSECONDS_PER_SECOND)
            }
            _ => None,
        }
    }

    /// Re-encodes the value into the packed 32-bit form, truncating odd
    /// seconds to the format's 2-second resolution. `None` when unset or
    /// outside the representable window.
    pub fn to_packed(&self) -> Option<u32> {
        let seconds = self.seconds?;
        if seconds < 0 {
            return None;
        }
        let (days, hours, minutes, seconds) = split_time_values(seconds);
        let (year, month, day) = calendar::date_from_day_of_year(&FAT_EPOCH, days).ok()?;
        if year > FAT_EPOCH.year + 0x7f {
            return None;
        }

        let year_offset = (year - FAT_EPOCH.year) as u32;
        let date = year_offset << 9 | (month as u32) << 5 | day as u32;
        let time = (hours as u32) << 11 | (minutes as u32) << 5 | (seconds as u32) / 2;
        Some(time << 16 | date)
    }

    /// Re-encodes the value into the on-disk byte representation.
    pub fn to_raw(&self) -> Option<RawFatDateTime> {
        self.to_packed().map(RawFatDateTime::from_packed)
    }
}

/// Number of seconds since the FAT epoch encoded in a packed value.
fn seconds_from_packed(value: u32) -> Result<i64, Error> {
    let day_of_month = (value & 0x1f) as u8;
    let month = ((value >> 5) & 0x0f) as u8;
    let year_offset = ((value >> 9) & 0x7f) as u16;
    let year = FAT_EPOCH.year + year_offset;

    // Range-checks month before it indexes the days-per-month table; the
    // packed input may come from a corrupt directory entry.
    let days_per_month = calendar::days_per_month(year, month)?;
    if day_of_month < 1 || day_of_month > days_per_month {
        return Err(Error::DayOfMonthOutOfBounds);
    }

    let mut days = calendar::day_of_year(year, month, day_of_month)? as i64 - 1;
    for past_year in FAT_EPOCH.year..year {
        days += calendar::days_in_year(past_year) as i64;
    }

    let time = value >> 16;
    let seconds = (time & 0x1f) * 2;
    let minutes = (time >> 5) & 0x3f;
    let hours = (time >> 11) & 0x1f;

    if hours > 23 {
        return Err(Error::HoursOutOfBounds);
    }
    if minutes > 59 {
        return Err(Error::MinutesOutOfBounds);
    }
    if seconds > 59 {
        return Err(Error::SecondsOutOfBounds);
    }

    let time_of_day = ((hours as i64 * 60) + minutes as i64) * 60 + seconds as i64;
    Ok(time_of_day + days * SECONDS_PER_DAY)
}

/// Splits elapsed seconds into whole days and the time of day.
fn split_time_values(elapsed: i64) -> (i64, u8, u8, u8) {
    let days = elapsed.div_euclid(SECONDS_PER_DAY);
    let rem = elapsed.rem_euclid(SECONDS_PER_DAY);
    (
        days,
        (rem / 3600) as u8,
        (rem % 3600 / 60) as u8,
        (rem % 60) as u8,
    )
}
