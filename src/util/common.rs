/*!
A collection of calendrical utility functions.

Everything here works on primitive integers and is `const` where it can be,
so that the public types can offer `const` constructors. The public types
validate their inputs before calling into these routines, so the functions
here assume their inputs are in range unless documented otherwise.

# Algorithms

Epoch-day conversion uses the well known "shifted year" approach, where the
year is considered to start in March so that the leap day falls at the very
end of it. Negative epoch days are moved into positive territory by whole
400-year cycles first, which keeps every division in this module operating on
non-negative values.
*/

/// The smallest supported year.
pub(crate) const YEAR_MIN: i32 = -999_999_999;
/// The largest supported year.
pub(crate) const YEAR_MAX: i32 = 999_999_999;

/// The number of days in a 400 year cycle.
pub(crate) const DAYS_PER_CYCLE: i64 = 146_097;
/// The number of days from `0000-01-01` to `1970-01-01`.
pub(crate) const DAYS_0000_TO_1970: i64 = (DAYS_PER_CYCLE * 5) - (30 * 365 + 7);

/// The epoch day of `-999999999-01-01`.
pub(crate) const EPOCH_DAY_MIN: i64 = to_epoch_day(YEAR_MIN, 1, 1);
/// The epoch day of `999999999-12-31`.
pub(crate) const EPOCH_DAY_MAX: i64 = to_epoch_day(YEAR_MAX, 12, 31);

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub(crate) const NANOS_PER_MICRO: i64 = 1_000;
pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub(crate) const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Return the number of days in the given month.
///
/// When the given month is invalid, this returns `0`.
#[inline]
pub(crate) const fn days_in_month(year: i32, month: i8) -> i8 {
    if month < 1 || month > 12 {
        return 0;
    }
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}

/// Returns the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i32) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Saturates the given day in the month.
///
/// That is, if the day exceeds the maximum number of days in the given year
/// and month, then this returns the maximum. Otherwise, it returns the day
/// given.
#[inline]
pub(crate) const fn saturate_day_in_month(year: i32, month: i8, day: i8) -> i8 {
    let max = days_in_month(year, month);
    if day > max {
        max
    } else {
        day
    }
}

/// Converts a proleptic Gregorian date to the number of days since
/// `1970-01-01`.
pub(crate) const fn to_epoch_day(year: i32, month: i8, day: i8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Converts a number of days since `1970-01-01` to a proleptic Gregorian
/// year, month and day.
///
/// Callers must ensure the epoch day is in `EPOCH_DAY_MIN..=EPOCH_DAY_MAX`.
pub(crate) const fn from_epoch_day(epoch_day: i64) -> (i32, i8, i8) {
    // Shift the epoch to `0000-03-01`.
    let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy = zero_day - days_before_shifted_year(year);
    if doy < 0 {
        year -= 1;
        doy = zero_day - days_before_shifted_year(year);
    }
    year += adjust;
    // Month index where March is zero.
    let march_month = (doy * 5 + 2) / 153;
    let month = (march_month + 2) % 12 + 1;
    let day = doy - (march_month * 306 + 5) / 10 + 1;
    year += march_month / 10;
    (year as i32, month as i8, day as i8)
}

const fn days_before_shifted_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}

/// Returns the one-based day of the year for the given date.
pub(crate) const fn day_of_year(year: i32, month: i8, day: i8) -> i16 {
    const BEFORE: [i16; 12] =
        [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let mut doy = BEFORE[(month - 1) as usize] + day as i16;
    if month > 2 && is_leap_year(year) {
        doy += 1;
    }
    doy
}

/// Returns the month and day for the given one-based day of the year.
///
/// Callers must ensure `doy` is valid for the year.
pub(crate) const fn month_day_from_day_of_year(
    year: i32,
    doy: i16,
) -> (i8, i8) {
    let mut month = 1;
    let mut remaining = doy;
    loop {
        let len = days_in_month(year, month) as i16;
        if remaining <= len {
            return (month, remaining as i8);
        }
        remaining -= len;
        month += 1;
    }
}

/// Returns the ISO weekday (Monday is `1`, Sunday is `7`) of an epoch day.
#[inline]
pub(crate) const fn weekday_from_epoch_day(epoch_day: i64) -> i8 {
    ((epoch_day + 3).rem_euclid(7) + 1) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_is_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1800));
        assert!(!is_leap_year(1700));
        assert!(is_leap_year(1600));
        assert!(is_leap_year(0));
        assert!(!is_leap_year(-1));
        assert!(!is_leap_year(-2));
        assert!(!is_leap_year(-3));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(!is_leap_year(-200));
        assert!(!is_leap_year(-300));
        assert!(is_leap_year(-400));
        assert!(is_leap_year(400));
        assert!(!is_leap_year(9999));
        assert!(!is_leap_year(YEAR_MAX));
        assert!(!is_leap_year(YEAR_MIN));
    }

    #[test]
    fn t_days_in_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, &days) in expected.iter().enumerate() {
            assert_eq!(days, days_in_month(2023, i as i8 + 1));
        }
        assert_eq!(29, days_in_month(2024, 2));
        assert_eq!(28, days_in_month(-9999, 2));
        assert_eq!(0, days_in_month(2024, 13));
        assert_eq!(0, days_in_month(2024, 0));
    }

    #[test]
    fn t_epoch_day_known() {
        assert_eq!(0, to_epoch_day(1970, 1, 1));
        assert_eq!(-1, to_epoch_day(1969, 12, 31));
        assert_eq!(19_723, to_epoch_day(2024, 1, 1));
        assert_eq!(10_957, to_epoch_day(2000, 1, 1));
        assert_eq!(-719_528, to_epoch_day(0, 1, 1));
        assert_eq!(-365_243_219_162, EPOCH_DAY_MIN);
        assert_eq!(365_241_780_471, EPOCH_DAY_MAX);

        assert_eq!((1970, 1, 1), from_epoch_day(0));
        assert_eq!((1969, 12, 31), from_epoch_day(-1));
        assert_eq!((2024, 1, 1), from_epoch_day(19_723));
        assert_eq!((0, 1, 1), from_epoch_day(-719_528));
        assert_eq!((YEAR_MIN, 1, 1), from_epoch_day(EPOCH_DAY_MIN));
        assert_eq!((YEAR_MAX, 12, 31), from_epoch_day(EPOCH_DAY_MAX));
    }

    #[test]
    fn t_epoch_day_roundtrip_around_zero() {
        for epoch_day in -800_000..800_000 {
            let (y, m, d) = from_epoch_day(epoch_day);
            assert_eq!(epoch_day, to_epoch_day(y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn t_day_of_year() {
        assert_eq!(1, day_of_year(2023, 1, 1));
        assert_eq!(60, day_of_year(2023, 3, 1));
        assert_eq!(61, day_of_year(2024, 3, 1));
        assert_eq!(365, day_of_year(2023, 12, 31));
        assert_eq!(366, day_of_year(2024, 12, 31));
        assert_eq!((2, 29), month_day_from_day_of_year(2024, 60));
        assert_eq!((3, 1), month_day_from_day_of_year(2023, 60));
        assert_eq!((12, 31), month_day_from_day_of_year(2024, 366));
    }

    #[test]
    fn t_weekday() {
        // 1970-01-01 was a Thursday.
        assert_eq!(4, weekday_from_epoch_day(0));
        assert_eq!(3, weekday_from_epoch_day(-1));
        assert_eq!(1, weekday_from_epoch_day(4));
        assert_eq!(7, weekday_from_epoch_day(3));
    }

    quickcheck::quickcheck! {
        fn prop_epoch_day_roundtrip(epoch_day: i64) -> bool {
            let epoch_day =
                epoch_day.rem_euclid(EPOCH_DAY_MAX - EPOCH_DAY_MIN + 1)
                    + EPOCH_DAY_MIN;
            let (y, m, d) = from_epoch_day(epoch_day);
            to_epoch_day(y, m, d) == epoch_day
        }
    }
}
