use crate::{
    civil::Date,
    error::{civil::Error as E, Error},
    temporal::{unsupported_field, Field, FieldAccess, FieldAdjust, ValueRange},
    util::common::{self, saturate_day_in_month},
    Clock,
};

/// A month and day of the month, such as `--12-25`.
///
/// A `MonthDay` is validated as if in a leap year, so `--02-29` is a valid
/// value. When such a value is combined with a year that is not a leap
/// year, the day is clamped to February 28.
///
/// # Example
///
/// ```
/// use calends::civil::{date, MonthDay};
///
/// let md: MonthDay = "--02-29".parse()?;
/// assert!(md.is_valid_year(2024));
/// assert!(!md.is_valid_year(2023));
/// assert_eq!(md.at_year(2023)?, date(2023, 2, 28));
/// assert_eq!(md.with_month(4)?.to_string(), "--04-29");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct MonthDay {
    month: i8,
    day: i8,
}

impl MonthDay {
    /// Creates a new month-day.
    ///
    /// # Errors
    ///
    /// This returns an error when the month is not in `1..=12`, or when the
    /// day does not exist in the month in a leap year.
    pub fn new(month: i8, day: i8) -> Result<MonthDay, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::range("day", day, 1, 31));
        }
        if day > max_day(month) {
            return Err(Error::from(E::InvalidMonthDay { month, day }));
        }
        Ok(MonthDay { month, day })
    }

    /// Returns the current month-day according to the given clock.
    pub fn now_with(clock: &Clock) -> MonthDay {
        MonthDay::from(Date::now_with(clock))
    }

    /// Returns the month.
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day of the month.
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns true when this month-day exists in the given year.
    pub fn is_valid_year(self, year: i32) -> bool {
        !(self.month == 2 && self.day == 29 && !common::is_leap_year(year))
    }

    /// Returns the date for this month-day in the given year.
    ///
    /// February 29 becomes February 28 when the year isn't a leap year.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range.
    pub fn at_year(self, year: i32) -> Result<Date, Error> {
        Date::new(year, self.month, saturate_day_in_month(year, self.month, self.day))
    }

    pub(crate) fn at_year_clamped(self, year: i32) -> Date {
        Date::constant(
            year,
            self.month,
            saturate_day_in_month(year, self.month, self.day),
        )
    }

    /// Returns this month-day with the month changed, clamping the day to
    /// the end of the month (in a leap year).
    pub fn with_month(self, month: i8) -> Result<MonthDay, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        Ok(MonthDay { month, day: self.day.min(max_day(month)) })
    }

    /// Returns this month-day with the day changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the day does not exist in the month.
    pub fn with_day(self, day: i8) -> Result<MonthDay, Error> {
        MonthDay::new(self.month, day)
    }
}

/// The maximum day of a month in a leap year.
fn max_day(month: i8) -> i8 {
    common::days_in_month(2000, month)
}

impl FieldAccess for MonthDay {
    fn is_supported(&self, field: Field) -> bool {
        matches!(field, Field::MonthOfYear | Field::DayOfMonth)
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::MonthOfYear => Ok(field.range()),
            Field::DayOfMonth => {
                let max = i64::from(max_day(self.month));
                let min_max = i64::from(common::days_in_month(2001, self.month));
                ValueRange::variable(1, min_max, max)
            }
            _ => Err(unsupported_field(field, "MonthDay")),
        }
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::MonthOfYear => Ok(i64::from(self.month)),
            Field::DayOfMonth => Ok(i64::from(self.day)),
            _ => Err(unsupported_field(field, "MonthDay")),
        }
    }
}

impl FieldAdjust for MonthDay {
    fn with_field(&self, field: Field, value: i64) -> Result<MonthDay, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "MonthDay"));
        }
        let value = field.check_valid_value(value)? as i8;
        match field {
            Field::MonthOfYear => self.with_month(value),
            _ => self.with_day(value),
        }
    }
}

impl From<Date> for MonthDay {
    fn from(date: Date) -> MonthDay {
        MonthDay { month: date.month(), day: date.day() }
    }
}

impl core::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_month_day(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for MonthDay {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for MonthDay {
    type Err = Error;

    fn from_str(string: &str) -> Result<MonthDay, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_month_day(string)
    }
}
