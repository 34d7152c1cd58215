use crate::error::Error;

/// A fixed calendar reference point from which day counts are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch {
    pub year: u16,
    /// 1 = January
    pub month: u8,
    pub day: u8,
}

/// The FAT date time epoch, 1980-01-01.
pub const FAT_EPOCH: Epoch = Epoch {
    year: 1980,
    month: 1,
    day: 1,
};

pub(crate) const POSIX_EPOCH_YEAR: u16 = 1970;
pub(crate) const SECONDS_PER_DAY: i64 = 86400;

const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in `month` (1 = January) of `year`.
pub fn days_per_month(year: u16, month: u8) -> Result<u8, Error> {
    if month < 1 || month > 12 {
        return Err(Error::MonthOutOfBounds);
    }
    let mut days = DAYS_PER_MONTH[month as usize - 1];
    if month == 2 && is_leap_year(year) {
        days += 1;
    }
    Ok(days)
}

/// One-based ordinal of `day` of `month` within `year`.
pub fn day_of_year(year: u16, month: u8, day: u8) -> Result<u16, Error> {
    if day < 1 || day > days_per_month(year, month)? {
        return Err(Error::DayOfMonthOutOfBounds);
    }
    let mut ordinal = day as u16;
    for past_month in 1..month {
        ordinal += days_per_month(year, past_month)? as u16;
    }
    Ok(ordinal)
}

/// Maps a zero-based count of whole days since `epoch` back to a calendar
/// `(year, month, day_of_month)` date.
pub fn date_from_day_of_year(epoch: &Epoch, total_days: i64) -> Result<(u16, u8, u8), Error> {
    if total_days < 0 {
        return Err(Error::DayCountOutOfBounds);
    }

    let mut remaining = total_days + day_of_year(epoch.year, epoch.month, epoch.day)? as i64 - 1;
    let mut year = epoch.year;
    while remaining >= days_in_year(year) as i64 {
        remaining -= days_in_year(year) as i64;
        year = year.checked_add(1).ok_or(Error::DayCountOutOfBounds)?;
    }

    let mut month = 1u8;
    loop {
        let days = days_per_month(year, month)? as i64;
        if remaining < days {
            break;
        }
        remaining -= days;
        month += 1;
    }

    Ok((year, month, remaining as u8 + 1))
}

/// Seconds elapsed since the POSIX epoch for the given calendar elements.
pub fn seconds_from_elements(
    year: u16,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
) -> Result<i64, Error> {
    if year < POSIX_EPOCH_YEAR {
        return Err(Error::YearOutOfBounds);
    }
    if hours > 23 {
        return Err(Error::HoursOutOfBounds);
    }
    if minutes > 59 {
        return Err(Error::MinutesOutOfBounds);
    }
    if seconds > 59 {
        return Err(Error::SecondsOutOfBounds);
    }

    let mut days = day_of_year(year, month, day)? as i64 - 1;
    for past_year in POSIX_EPOCH_YEAR..year {
        days += days_in_year(past_year) as i64;
    }

    Ok(days * SECONDS_PER_DAY + ((hours as i64 * 60) + minutes as i64) * 60 + seconds as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(1980));
        assert!(!is_leap_year(1981));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2100));
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1981), 365);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_per_month(1981, 1), Ok(31));
        assert_eq!(days_per_month(1981, 2), Ok(28));
        assert_eq!(days_per_month(2000, 2), Ok(29));
        assert_eq!(days_per_month(1981, 4), Ok(30));
        assert_eq!(days_per_month(1981, 12), Ok(31));
        assert_eq!(days_per_month(1981, 0), Err(Error::MonthOutOfBounds));
        assert_eq!(days_per_month(1981, 13), Err(Error::MonthOutOfBounds));
    }

    #[test]
    fn day_ordinals() {
        assert_eq!(day_of_year(1980, 1, 1), Ok(1));
        assert_eq!(day_of_year(1980, 3, 1), Ok(61));
        assert_eq!(day_of_year(1981, 3, 1), Ok(60));
        assert_eq!(day_of_year(1980, 12, 31), Ok(366));
        assert_eq!(day_of_year(1980, 2, 30), Err(Error::DayOfMonthOutOfBounds));
        assert_eq!(day_of_year(1980, 1, 0), Err(Error::DayOfMonthOutOfBounds));
    }

    #[test]
    fn date_from_days_since_epoch() {
        assert_eq!(date_from_day_of_year(&FAT_EPOCH, 0), Ok((1980, 1, 1)));
        assert_eq!(date_from_day_of_year(&FAT_EPOCH, 31), Ok((1980, 2, 1)));
        // 1980 is a leap year
        assert_eq!(date_from_day_of_year(&FAT_EPOCH, 59), Ok((1980, 2, 29)));
        assert_eq!(date_from_day_of_year(&FAT_EPOCH, 60), Ok((1980, 3, 1)));
        assert_eq!(date_from_day_of_year(&FAT_EPOCH, 366), Ok((1981, 1, 1)));
        assert_eq!(
            date_from_day_of_year(&FAT_EPOCH, -1),
            Err(Error::DayCountOutOfBounds)
        );
    }

    #[test]
    fn posix_seconds_from_elements() {
        assert_eq!(seconds_from_elements(1970, 1, 1, 0, 0, 0), Ok(0));
        assert_eq!(seconds_from_elements(1980, 1, 1, 0, 0, 0), Ok(315532800));
        assert_eq!(
            seconds_from_elements(2010, 6, 15, 12, 30, 45),
            Ok(1276605045)
        );
        assert_eq!(
            seconds_from_elements(2010, 6, 15, 24, 0, 0),
            Err(Error::HoursOutOfBounds)
        );
        assert_eq!(
            seconds_from_elements(2010, 6, 15, 0, 60, 0),
            Err(Error::MinutesOutOfBounds)
        );
        assert_eq!(
            seconds_from_elements(2010, 6, 15, 0, 0, 60),
            Err(Error::SecondsOutOfBounds)
        );
        assert_eq!(
            seconds_from_elements(2010, 2, 29, 0, 0, 0),
            Err(Error::DayOfMonthOutOfBounds)
        );
        assert_eq!(
            seconds_from_elements(1969, 12, 31, 0, 0, 0),
            Err(Error::YearOutOfBounds)
        );
    }
}
