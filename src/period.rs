use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::{civil::Date, error::Error, temporal::Unit};

/// A calendar based amount of time in years, months and days.
///
/// Unlike a [`Duration`](crate::Duration), a period has no fixed length. One
/// month is 28 days in some contexts and 31 in others. A period only becomes
/// concrete once it is applied to a [`Date`].
///
/// Each component is stored separately and signed independently. A period
/// is never normalized implicitly, so `P1Y` and `P12M` are different values
/// (see [`Period::normalized`]).
///
/// # Example
///
/// ```
/// use calends::{civil::date, Period};
///
/// let p = Period::new(1, 2, 3);
/// assert_eq!(p.to_string(), "P1Y2M3D");
/// assert_eq!(p.add_to(date(2024, 1, 31))?, date(2025, 4, 3));
///
/// let p: Period = "P2W".parse()?;
/// assert_eq!(p, Period::from_days(14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    /// A period of zero length.
    pub const ZERO: Period = Period { years: 0, months: 0, days: 0 };

    /// Creates a period from its components.
    #[inline]
    pub const fn new(years: i32, months: i32, days: i32) -> Period {
        Period { years, months, days }
    }

    /// Creates a period of the given number of years.
    #[inline]
    pub const fn from_years(years: i32) -> Period {
        Period::new(years, 0, 0)
    }

    /// Creates a period of the given number of months.
    #[inline]
    pub const fn from_months(months: i32) -> Period {
        Period::new(0, months, 0)
    }

    /// Creates a period of the given number of weeks, stored as days.
    ///
    /// # Panics
    ///
    /// This panics when the number of days overflows an `i32`.
    #[inline]
    pub const fn from_weeks(weeks: i32) -> Period {
        Period::new(0, 0, weeks * 7)
    }

    /// Creates a period of the given number of days.
    #[inline]
    pub const fn from_days(days: i32) -> Period {
        Period::new(0, 0, days)
    }

    /// Returns the period between two dates.
    ///
    /// The result is such that adding it to `start` gives `end`. Months are
    /// counted first, and the remaining days are always smaller than a
    /// month. When `end` is before `start`, every component is negative or
    /// zero.
    ///
    /// ```
    /// use calends::{civil::date, Period};
    ///
    /// let p = Period::between(date(2024, 1, 31), date(2024, 3, 1));
    /// assert_eq!(p, Period::new(0, 1, 1));
    /// let p = Period::between(date(2024, 3, 1), date(2024, 1, 31));
    /// assert_eq!(p, Period::new(0, -1, -1));
    /// ```
    pub fn between(start: Date, end: Date) -> Period {
        // Shifts `start` the same way `add_to` does: whole years first and
        // then the remaining months, clamping the day after each step.
        //
        // OK because every date strictly between `start` and `end` (and
        // `end` itself) is in range.
        let shifted = |months: i64| {
            start
                .checked_add_years(months / 12)
                .and_then(|d| d.checked_add_months(months % 12))
                .expect("date between start and end is in range")
        };
        let mut total_months = end.proleptic_month() - start.proleptic_month();
        let mut days = i64::from(end.day()) - i64::from(start.day());
        if total_months > 0 {
            if days < 0 {
                total_months -= 1;
            }
            days = end.to_epoch_day() - shifted(total_months).to_epoch_day();
        } else if total_months < 0 {
            days = end.to_epoch_day() - shifted(total_months).to_epoch_day();
            if days > 0 {
                total_months += 1;
                days =
                    end.to_epoch_day() - shifted(total_months).to_epoch_day();
            }
        }
        // The year range guarantees these fit.
        Period {
            years: (total_months / 12) as i32,
            months: (total_months % 12) as i32,
            days: days as i32,
        }
    }

    /// Returns the years.
    #[inline]
    pub fn years(self) -> i32 {
        self.years
    }

    /// Returns the months.
    #[inline]
    pub fn months(self) -> i32 {
        self.months
    }

    /// Returns the days.
    #[inline]
    pub fn days(self) -> i32 {
        self.days
    }

    /// Returns this period with the years replaced.
    pub fn with_years(self, years: i32) -> Period {
        Period { years, ..self }
    }

    /// Returns this period with the months replaced.
    pub fn with_months(self, months: i32) -> Period {
        Period { months, ..self }
    }

    /// Returns this period with the days replaced.
    pub fn with_days(self, days: i32) -> Period {
        Period { days, ..self }
    }

    /// Returns true when every component is zero.
    pub fn is_zero(self) -> bool {
        self == Period::ZERO
    }

    /// Returns true when any component is negative.
    pub fn is_negative(self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Returns the years and months as a total number of months.
    pub fn to_total_months(self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }

    /// Returns the component for a date based unit. Only `Year`, `Month`
    /// and `Day` are supported.
    pub fn get(self, unit: Unit) -> Result<i64, Error> {
        match unit {
            Unit::Year => Ok(i64::from(self.years)),
            Unit::Month => Ok(i64::from(self.months)),
            Unit::Day => Ok(i64::from(self.days)),
            _ => Err(crate::temporal::unsupported_unit(unit, "Period")),
        }
    }

    /// Adds two periods component-wise.
    ///
    /// # Errors
    ///
    /// This returns an error when any component overflows an `i32`.
    pub fn checked_add(self, rhs: Period) -> Result<Period, Error> {
        Ok(Period {
            years: add(self.years, rhs.years, "period years")?,
            months: add(self.months, rhs.months, "period months")?,
            days: add(self.days, rhs.days, "period days")?,
        })
    }

    /// Subtracts `rhs` from this period component-wise.
    pub fn checked_sub(self, rhs: Period) -> Result<Period, Error> {
        self.checked_add(rhs.checked_neg()?)
    }

    /// Multiplies every component by a scalar.
    pub fn checked_mul(self, scalar: i32) -> Result<Period, Error> {
        let mul = |v: i32, what| {
            v.checked_mul(scalar).ok_or_else(|| Error::overflow(what))
        };
        Ok(Period {
            years: mul(self.years, "period years")?,
            months: mul(self.months, "period months")?,
            days: mul(self.days, "period days")?,
        })
    }

    /// Negates every component.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is `i32::MIN`.
    pub fn checked_neg(self) -> Result<Period, Error> {
        self.checked_mul(-1)
    }

    /// Folds months into years so that the months are in `-11..=11`. Days
    /// are left alone.
    ///
    /// ```
    /// use calends::Period;
    ///
    /// assert_eq!(Period::new(1, 15, 40).normalized()?, Period::new(2, 3, 40));
    /// assert_eq!(Period::new(1, -25, 0).normalized()?, Period::new(-1, -1, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn normalized(self) -> Result<Period, Error> {
        let total = self.to_total_months();
        let years = i32::try_from(total / 12)
            .map_err(|_| Error::overflow("period years"))?;
        Ok(Period { years, months: (total % 12) as i32, days: self.days })
    }

    /// Adds this period to a date.
    ///
    /// Years are added first, then months, then days. After adding years
    /// and again after adding months, the day of month is clamped to the
    /// end of the month. So `2024-02-29` plus `P1Y1M` is `2025-03-28`,
    /// by way of `2025-02-28`.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn add_to(self, date: Date) -> Result<Date, Error> {
        let mut date = date;
        if self.years != 0 {
            date = date.checked_add_years(i64::from(self.years))?;
        }
        if self.months != 0 {
            date = date.checked_add_months(i64::from(self.months))?;
        }
        if self.days != 0 {
            date = date.checked_add_days(i64::from(self.days))?;
        }
        Ok(date)
    }

    /// Subtracts this period from a date, in the same order as
    /// [`Period::add_to`].
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn subtract_from(self, date: Date) -> Result<Date, Error> {
        let mut date = date;
        if self.years != 0 {
            date = date.checked_sub_years(i64::from(self.years))?;
        }
        if self.months != 0 {
            date = date.checked_sub_months(i64::from(self.months))?;
        }
        if self.days != 0 {
            date = date.checked_sub_days(i64::from(self.days))?;
        }
        Ok(date)
    }
}

fn add(a: i32, b: i32, what: &'static str) -> Result<i32, Error> {
    a.checked_add(b).ok_or_else(|| Error::overflow(what))
}

impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        self.checked_neg().expect("negating period overflowed")
    }
}

impl Add for Period {
    type Output = Period;

    fn add(self, rhs: Period) -> Period {
        self.checked_add(rhs).expect("adding periods overflowed")
    }
}

impl AddAssign for Period {
    fn add_assign(&mut self, rhs: Period) {
        *self = *self + rhs;
    }
}

impl Sub for Period {
    type Output = Period;

    fn sub(self, rhs: Period) -> Period {
        self.checked_sub(rhs).expect("subtracting periods overflowed")
    }
}

impl SubAssign for Period {
    fn sub_assign(&mut self, rhs: Period) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Period {
    type Output = Period;

    fn mul(self, rhs: i32) -> Period {
        self.checked_mul(rhs).expect("multiplying period overflowed")
    }
}

impl core::fmt::Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{duration::DEFAULT_PRINTER, StdFmtWrite};

        DEFAULT_PRINTER
            .print_period(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Period {
    type Err = Error;

    fn from_str(string: &str) -> Result<Period, Error> {
        crate::fmt::duration::DEFAULT_PARSER.parse_period(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Period {
    fn arbitrary(g: &mut quickcheck::Gen) -> Period {
        let small = |g: &mut quickcheck::Gen| i32::from(i16::arbitrary(g));
        Period { years: small(g), months: small(g), days: small(g) }
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn add_to_clamps_month_end() {
        let d = date(2024, 1, 31);
        assert_eq!(Period::from_months(1).add_to(d).unwrap(), date(2024, 2, 29));
        assert_eq!(Period::from_years(1).add_to(date(2024, 2, 29)).unwrap(), date(2025, 2, 28));
        assert_eq!(Period::new(0, 1, 1).add_to(d).unwrap(), date(2024, 3, 1));
        assert_eq!(Period::new(1, 1, 0).add_to(d).unwrap(), date(2025, 2, 28));
        // The day is clamped after the years, and that clamp sticks.
        let leap = date(2024, 2, 29);
        assert_eq!(Period::new(1, 1, 0).add_to(leap).unwrap(), date(2025, 3, 28));
        assert_eq!(Period::from_months(13).add_to(leap).unwrap(), date(2025, 3, 29));
        assert_eq!(Period::new(1, 1, 0).subtract_from(date(2025, 3, 29)).unwrap(), date(2024, 2, 29));
        assert_eq!(Period::new(1, 0, 0).subtract_from(leap).unwrap(), date(2023, 2, 28));
        assert_eq!(Period::new(0, 1, 1).subtract_from(date(2024, 3, 31)).unwrap(), date(2024, 2, 28));
        assert!(Period::from_years(1).add_to(Date::MAX).is_err());
    }

    #[test]
    fn between() {
        let p = Period::between(date(2010, 1, 15), date(2011, 3, 18));
        assert_eq!(p, Period::new(1, 2, 3));
        let p = Period::between(date(2011, 3, 18), date(2010, 1, 15));
        assert_eq!(p, Period::new(-1, -2, -3));
        let p = Period::between(date(2024, 1, 31), date(2024, 2, 29));
        assert_eq!(p, Period::new(0, 0, 29));
        // Going backwards never leaves a clamped day behind.
        let p = Period::between(date(2024, 3, 31), date(2024, 2, 29));
        assert_eq!(p, Period::new(0, -1, 0));
        assert_eq!(Period::between(date(2024, 5, 5), date(2024, 5, 5)), Period::ZERO);
        // The extra day makes up for the clamp to 2025-02-28.
        let p = Period::between(date(2024, 2, 29), date(2025, 3, 29));
        assert_eq!(p, Period::new(1, 1, 1));
        assert_eq!(p.add_to(date(2024, 2, 29)).unwrap(), date(2025, 3, 29));
    }

    #[test]
    fn arithmetic() {
        let p = Period::new(1, 2, 3);
        assert_eq!(p + Period::new(1, 1, 1), Period::new(2, 3, 4));
        assert_eq!(p - Period::new(2, 2, 2), Period::new(-1, 0, 1));
        assert_eq!(p * 3, Period::new(3, 6, 9));
        assert_eq!(-p, Period::new(-1, -2, -3));
        assert!(Period::from_days(i32::MIN).checked_neg().unwrap_err().is_overflow());
        assert_eq!(p.to_total_months(), 14);
        assert!(Period::new(0, -1, 0).is_negative());
        assert_eq!(p.get(Unit::Day).unwrap(), 3);
        assert!(p.get(Unit::Week).unwrap_err().is_unsupported());
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Period::ZERO, @"P0D");
        insta::assert_snapshot!(Period::new(1, 0, -5), @"P1Y-5D");
        insta::assert_snapshot!(Period::from_months(-14), @"P-14M");
    }

    quickcheck::quickcheck! {
        fn prop_between_then_add(a: Date, b: Date) -> bool {
            Period::between(a, b).add_to(a).unwrap() == b
        }

        fn prop_display_parse_roundtrip(p: Period) -> bool {
            p.to_string().parse::<Period>().unwrap() == p
        }
    }
}
