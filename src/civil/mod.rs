/*!
Civil date and time values with no time zone.

The types in this module describe dates and times as they appear on a
calendar and a wall clock: [`Date`], [`Time`] and [`DateTime`], along with
partial values like [`Year`], [`YearMonth`] and [`MonthDay`]. None of them
are tied to a time zone, so none of them correspond to a precise instant.
Days are always 24 hours long on the civil timeline.

To go from a civil datetime to an instant, pair it with a time zone via
[`DateTime::to_zoned`] or with an offset via
[`DateTime::to_offset_datetime`].

# Example

```
use calends::civil::{date, time, Weekday};

let d = date(2024, 3, 5);
assert_eq!(d.weekday(), Weekday::Tuesday);
assert_eq!(d.at(time(10, 15, 30, 0)).to_string(), "2024-03-05T10:15:30");
```
*/

pub use self::{
    date::Date,
    datetime::DateTime,
    iso_week_date::ISOWeekDate,
    month_day::MonthDay,
    time::Time,
    weekday::Weekday,
    year::Year,
    year_month::YearMonth,
};

mod date;
mod datetime;
mod iso_week_date;
mod month_day;
mod time;
mod weekday;
mod year;
mod year_month;

/// The era corresponding to a particular year in the ISO calendar.
///
/// The BCE era corresponds to years less than or equal to `0`, while the CE
/// era corresponds to years greater than `0`. That is, the year `1 BCE` is
/// year `0` in this crate, and `2 BCE` is `-1`.
///
/// To get the year in its era format, use [`Date::era_year`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Era {
    /// The "before common era" era, with the field value `0`.
    BCE,
    /// The "common era" era, with the field value `1`.
    CE,
}

impl Era {
    pub(crate) fn of_year(year: i32) -> Era {
        if year >= 1 {
            Era::CE
        } else {
            Era::BCE
        }
    }

    pub(crate) fn to_field_value(self) -> i64 {
        match self {
            Era::BCE => 0,
            Era::CE => 1,
        }
    }
}

/// Returns true if and only if the given year is a leap year in the
/// proleptic Gregorian calendar.
///
/// A year is a leap year when it is divisible by 4, except for years
/// divisible by 100 but not by 400.
///
/// # Example
///
/// ```
/// use calends::civil::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// ```
pub const fn is_leap_year(year: i32) -> bool {
    crate::util::common::is_leap_year(year)
}

/// Creates a new `Date` value in a `const` context.
///
/// This is a convenience free function for [`Date::constant`]. It is
/// intended to provide a terse syntax for constructing `Date` values from
/// parameters that are known to be valid.
///
/// # Panics
///
/// This panics if the given values do not form a valid date.
#[inline]
pub const fn date(year: i32, month: i8, day: i8) -> Date {
    Date::constant(year, month, day)
}

/// Creates a new `Time` value in a `const` context.
///
/// # Panics
///
/// This panics if any of the values are out of range.
#[inline]
pub const fn time(hour: i8, minute: i8, second: i8, nanosecond: i32) -> Time {
    Time::constant(hour, minute, second, nanosecond)
}

/// Creates a new `DateTime` value in a `const` context.
///
/// # Panics
///
/// This panics if the given values do not form a valid datetime.
#[inline]
pub const fn datetime(
    year: i32,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
) -> DateTime {
    DateTime::from_parts(
        Date::constant(year, month, day),
        Time::constant(hour, minute, second, nanosecond),
    )
}

/// Returns the English name of a month, or `"invalid month"`.
pub(crate) fn month_name(month: i8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "invalid month",
    }
}
