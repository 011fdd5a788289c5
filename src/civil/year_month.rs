use crate::{
    civil::{date::check_year, Date},
    error::Error,
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    util::common,
    Clock,
};

/// A year and month in the proleptic Gregorian calendar, such as
/// `2024-03`.
///
/// # Example
///
/// ```
/// use calends::{civil::{date, YearMonth}, temporal::Unit};
///
/// let ym: YearMonth = "2024-02".parse()?;
/// assert_eq!(ym.days_in_month(), 29);
/// assert_eq!(ym.at_end_of_month(), date(2024, 2, 29));
/// assert_eq!(ym.checked_add((11, Unit::Month))?.to_string(), "2025-01");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: i8,
}

impl YearMonth {
    /// Creates a new year-month.
    ///
    /// # Errors
    ///
    /// This returns an error when the year or month is out of range.
    pub fn new(year: i32, month: i8) -> Result<YearMonth, Error> {
        check_year(i64::from(year))?;
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        Ok(YearMonth { year, month })
    }

    /// Returns the current year-month according to the given clock.
    pub fn now_with(clock: &Clock) -> YearMonth {
        YearMonth::from(Date::now_with(clock))
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month.
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns true when the year is a leap year.
    pub fn is_leap_year(self) -> bool {
        common::is_leap_year(self.year)
    }

    /// Returns the number of days in this month.
    pub fn days_in_month(self) -> i8 {
        common::days_in_month(self.year, self.month)
    }

    /// Returns the number of days in the year.
    pub fn days_in_year(self) -> i16 {
        common::days_in_year(self.year)
    }

    /// Returns true when the day exists in this month.
    pub fn is_valid_day(self, day: i8) -> bool {
        1 <= day && day <= self.days_in_month()
    }

    /// Returns the date at the given day of this month.
    ///
    /// # Errors
    ///
    /// This returns an error when the day doesn't exist in this month.
    pub fn at_day(self, day: i8) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Returns the last date of this month.
    pub fn at_end_of_month(self) -> Date {
        self.first().last_of_month()
    }

    /// Returns this year-month with the year changed.
    pub fn with_year(self, year: i32) -> Result<YearMonth, Error> {
        YearMonth::new(year, self.month)
    }

    /// Returns this year-month with the month changed.
    pub fn with_month(self, month: i8) -> Result<YearMonth, Error> {
        YearMonth::new(self.year, month)
    }

    /// Adds the given number of months.
    pub fn checked_add_months(self, months: i64) -> Result<YearMonth, Error> {
        Ok(YearMonth::from(self.first().checked_add_months(months)?))
    }

    /// Adds the given number of years.
    pub fn checked_add_years(self, years: i64) -> Result<YearMonth, Error> {
        Ok(YearMonth::from(self.first().checked_add_years(years)?))
    }

    /// Adds an amount of time. Month based units, and periods without days,
    /// are supported.
    pub fn checked_add<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<YearMonth, Error> {
        match amount.into() {
            Amount::Period(period) => {
                if period.days() != 0 {
                    return Err(unsupported_unit(Unit::Day, "YearMonth"));
                }
                Ok(YearMonth::from(period.add_to(self.first())?))
            }
            Amount::Duration(duration) if duration.is_zero() => Ok(self),
            Amount::Duration(_) => {
                Err(unsupported_unit(Unit::Second, "YearMonth"))
            }
            Amount::Units(amount, unit) => {
                if unit < Unit::Month || unit == Unit::Forever {
                    return Err(unsupported_unit(unit, "YearMonth"));
                }
                Ok(YearMonth::from(self.first().checked_add((amount, unit))?))
            }
        }
    }

    /// Subtracts an amount of time.
    pub fn checked_sub<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<YearMonth, Error> {
        self.checked_add(amount.into().checked_neg()?)
    }

    /// Returns the number of whole units from this year-month until
    /// `other`.
    pub fn until(self, other: YearMonth, unit: Unit) -> Result<i64, Error> {
        if unit < Unit::Month || unit == Unit::Forever {
            return Err(unsupported_unit(unit, "YearMonth"));
        }
        self.first().until(other.first(), unit)
    }

    fn first(self) -> Date {
        Date::constant(self.year, self.month, 1)
    }
}

impl FieldAccess for YearMonth {
    fn is_supported(&self, field: Field) -> bool {
        matches!(
            field,
            Field::MonthOfYear
                | Field::ProlepticMonth
                | Field::YearOfEra
                | Field::Year
                | Field::Era
        )
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "YearMonth"));
        }
        self.first().range(field)
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "YearMonth"));
        }
        self.first().get(field)
    }
}

impl FieldAdjust for YearMonth {
    fn with_field(&self, field: Field, value: i64) -> Result<YearMonth, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "YearMonth"));
        }
        Ok(YearMonth::from(self.first().with_field(field, value)?))
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> YearMonth {
        YearMonth { year: date.year(), month: date.month() }
    }
}

impl core::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_year_month(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for YearMonth {
    type Err = Error;

    fn from_str(string: &str) -> Result<YearMonth, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_year_month(string)
    }
}

crate::temporal::impl_amount_ops!(YearMonth);
