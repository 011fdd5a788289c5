use crate::{
    civil::{date::check_year, Date, Era, MonthDay, YearMonth},
    error::Error,
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    util::common::{self, YEAR_MAX, YEAR_MIN},
    Clock,
};

/// A year in the proleptic Gregorian calendar, such as `2024`.
///
/// # Example
///
/// ```
/// use calends::civil::{date, MonthDay, Year};
///
/// let y = Year::new(2024)?;
/// assert!(y.is_leap());
/// assert_eq!(y.length(), 366);
/// assert_eq!(y.at_day(60)?, date(2024, 2, 29));
/// assert_eq!(Year::new(2023)?.at_month_day(MonthDay::new(2, 29)?), date(2023, 2, 28));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Year {
    year: i32,
}

impl Year {
    /// The minimum supported year, `-999999999`.
    pub const MIN: Year = Year { year: YEAR_MIN };

    /// The maximum supported year, `999999999`.
    pub const MAX: Year = Year { year: YEAR_MAX };

    /// Creates a new year.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range.
    pub fn new(year: i32) -> Result<Year, Error> {
        check_year(i64::from(year))?;
        Ok(Year { year })
    }

    /// Returns the current year according to the given clock.
    pub fn now_with(clock: &Clock) -> Year {
        Year { year: Date::now_with(clock).year() }
    }

    /// Returns the year as an integer.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns true if this is a leap year.
    pub fn is_leap(self) -> bool {
        common::is_leap_year(self.year)
    }

    /// Returns the number of days in this year.
    pub fn length(self) -> i16 {
        common::days_in_year(self.year)
    }

    /// Returns true when the month-day exists in this year. This is only
    /// false for February 29 in non-leap years.
    pub fn is_valid_month_day(self, month_day: MonthDay) -> bool {
        month_day.is_valid_year(self.year)
    }

    /// Returns the date at the given day of this year.
    pub fn at_day(self, day_of_year: i16) -> Result<Date, Error> {
        Date::from_day_of_year(self.year, day_of_year)
    }

    /// Returns the year-month at the given month of this year.
    pub fn at_month(self, month: i8) -> Result<YearMonth, Error> {
        YearMonth::new(self.year, month)
    }

    /// Returns the date at the given month-day of this year.
    ///
    /// February 29 becomes February 28 in non-leap years.
    pub fn at_month_day(self, month_day: MonthDay) -> Date {
        month_day.at_year_clamped(self.year)
    }

    /// Adds the given number of years.
    pub fn checked_add_years(self, years: i64) -> Result<Year, Error> {
        let year = i64::from(self.year)
            .checked_add(years)
            .filter(|&y| check_year(y).is_ok())
            .ok_or_else(|| Error::overflow("years"))?;
        Ok(Year { year: year as i32 })
    }

    /// Adds an amount of time. Only year based units (and periods with
    /// only years) are supported.
    pub fn checked_add<A: Into<Amount>>(self, amount: A) -> Result<Year, Error> {
        match amount.into() {
            Amount::Period(period) => {
                if period.months() != 0 || period.days() != 0 {
                    return Err(unsupported_unit(Unit::Month, "Year"));
                }
                self.checked_add_years(i64::from(period.years()))
            }
            Amount::Duration(duration) if duration.is_zero() => Ok(self),
            Amount::Duration(_) => Err(unsupported_unit(Unit::Second, "Year")),
            Amount::Units(amount, unit) => {
                let date = Date::constant(self.year, 1, 1);
                match unit {
                    Unit::Year
                    | Unit::Decade
                    | Unit::Century
                    | Unit::Millennium
                    | Unit::Era => Ok(Year {
                        year: date.checked_add((amount, unit))?.year(),
                    }),
                    _ => Err(unsupported_unit(unit, "Year")),
                }
            }
        }
    }

    /// Subtracts an amount of time.
    pub fn checked_sub<A: Into<Amount>>(self, amount: A) -> Result<Year, Error> {
        self.checked_add(amount.into().checked_neg()?)
    }

    /// Returns the number of whole units from this year until `other`.
    pub fn until(self, other: Year, unit: Unit) -> Result<i64, Error> {
        match unit {
            Unit::Year
            | Unit::Decade
            | Unit::Century
            | Unit::Millennium
            | Unit::Era => Date::constant(self.year, 1, 1)
                .until(Date::constant(other.year, 1, 1), unit),
            _ => Err(unsupported_unit(unit, "Year")),
        }
    }
}

impl FieldAccess for Year {
    fn is_supported(&self, field: Field) -> bool {
        matches!(field, Field::YearOfEra | Field::Year | Field::Era)
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Year"));
        }
        Date::constant(self.year, 1, 1).range(field)
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Year"));
        }
        Date::constant(self.year, 1, 1).get(field)
    }
}

impl FieldAdjust for Year {
    fn with_field(&self, field: Field, value: i64) -> Result<Year, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Year"));
        }
        let date = Date::constant(self.year, 1, 1).with_field(field, value)?;
        Ok(Year { year: date.year() })
    }
}

impl core::fmt::Display for Year {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_year(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Year {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Year {
    type Err = Error;

    fn from_str(string: &str) -> Result<Year, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_year(string)
    }
}

impl From<Year> for Era {
    fn from(year: Year) -> Era {
        Era::of_year(year.year)
    }
}

crate::temporal::impl_amount_ops!(Year);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        let y = Year::new(1900).unwrap();
        assert!(!y.is_leap());
        assert_eq!(y.length(), 365);
        assert!(!y.is_valid_month_day(MonthDay::new(2, 29).unwrap()));
        assert!(y.at_day(366).unwrap_err().is_invalid_date());
        assert_eq!(y.at_month(2).unwrap().days_in_month(), 28);
        assert!(Year::new(1_000_000_000).unwrap_err().is_range());
        assert!(Year::MAX.checked_add_years(1).unwrap_err().is_overflow());
    }

    #[test]
    fn arithmetic_and_fields() {
        let y = Year::new(2024).unwrap();
        assert_eq!(y.checked_add((2, Unit::Decade)).unwrap().year(), 2044);
        assert_eq!(y.checked_sub(crate::Period::from_years(24)).unwrap().year(), 2000);
        assert!(y.checked_add((1, Unit::Month)).unwrap_err().is_unsupported());
        assert!(y.checked_add(crate::Period::from_months(1)).is_err());
        assert_eq!(y.until(Year::new(1900).unwrap(), Unit::Century).unwrap(), -1);
        assert_eq!(y.get(Field::YearOfEra).unwrap(), 2024);
        assert_eq!(y.with_field(Field::Era, 0).unwrap().year(), -2023);
        assert!(y.get(Field::MonthOfYear).unwrap_err().is_unsupported());
        assert_eq!(y.to_string(), "2024");
        assert_eq!(Year::new(-5).unwrap().to_string(), "-0005");
        assert_eq!("+10000".parse::<Year>().unwrap().year(), 10_000);
    }
}
