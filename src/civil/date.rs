use crate::{
    civil::{DateTime, Era, ISOWeekDate, Time, Weekday},
    error::{civil::Error as E, Error},
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    tz::TimeZone,
    util::common::{
        self, days_in_month, is_leap_year, saturate_day_in_month,
        EPOCH_DAY_MAX, EPOCH_DAY_MIN, YEAR_MAX, YEAR_MIN,
    },
    Clock, Period, Zoned,
};

/// A representation of a civil date in the proleptic Gregorian calendar.
///
/// A `Date` value corresponds to a triple of year, month and day. Every
/// `Date` value is guaranteed to be a valid date. For example, both
/// `2023-02-29` and `2023-11-31` are invalid and cannot be represented by a
/// `Date`. Years range from `-999,999,999` to `999,999,999`.
///
/// # Civil dates
///
/// A `Date` value behaves without regard to daylight saving time or time
/// zones in general. A date is not an instant. To find the instant at which
/// a date begins in a time zone, use [`Date::at_start_of_day_in`].
///
/// # Parsing and printing
///
/// The `Date` type provides `Display` and `FromStr` implementations using
/// the ISO 8601 `uuuu-MM-dd` format. Years outside of `0..=9999` have a sign
/// and at least four digits.
///
/// ```
/// use calends::civil::Date;
///
/// let d: Date = "2024-03-05".parse()?;
/// assert_eq!(d.to_string(), "2024-03-05");
/// let d: Date = "+12345-01-01".parse()?;
/// assert_eq!(d.year(), 12345);
/// let d: Date = "-0001-12-31".parse()?;
/// assert_eq!(d.to_string(), "-0001-12-31");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Arithmetic
///
/// Dates can be moved by a [`Period`], or by a number of date based
/// [`Unit`]s via [`Date::checked_add`]. Adding months or years clamps the
/// day to the end of the resulting month when needed:
///
/// ```
/// use calends::{civil::date, temporal::Unit, Period};
///
/// let d = date(2024, 1, 31);
/// assert_eq!(d.checked_add(Period::from_months(1))?, date(2024, 2, 29));
/// assert_eq!(d.checked_add((1, Unit::Year))?, date(2025, 1, 31));
/// assert_eq!(d + Period::from_days(1), date(2024, 2, 1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Comparisons
///
/// `Date` values are totally ordered in chronological order.
///
/// ```
/// use calends::civil::date;
///
/// assert!(date(2024, 3, 11) < date(2025, 1, 31));
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Date {
    year: i32,
    month: i8,
    day: i8,
}

impl Date {
    /// The minimum representable date, `-999999999-01-01`.
    pub const MIN: Date = Date::constant(YEAR_MIN, 1, 1);

    /// The maximum representable date, `+999999999-12-31`.
    pub const MAX: Date = Date::constant(YEAR_MAX, 12, 31);

    /// The first day of the zeroth year.
    ///
    /// This is guaranteed to be equivalent to `Date::default()`.
    pub const ZERO: Date = Date::constant(0, 1, 1);

    /// The Unix epoch, `1970-01-01`.
    pub const UNIX_EPOCH: Date = Date::constant(1970, 1, 1);

    /// Creates a new `Date` value from its component year, month and day
    /// values.
    ///
    /// # Errors
    ///
    /// This returns a range error when the year is outside of
    /// `-999_999_999..=999_999_999`, the month is outside of `1..=12` or
    /// the day is outside of `1..=31`. When all three are in range but the
    /// day does not exist in the month, an invalid date error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// let d = Date::new(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// assert!(Date::new(2023, 2, 29).unwrap_err().is_invalid_date());
    /// assert!(Date::new(2023, 0, 1).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(year: i32, month: i8, day: i8) -> Result<Date, Error> {
        check_year(i64::from(year))?;
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::range("day", day, 1, 31));
        }
        if day > days_in_month(year, month) {
            return Err(Error::from(E::InvalidDayOfMonth { year, month, day }));
        }
        Ok(Date { year, month, day })
    }

    /// Creates a new `Date` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This routine panics when [`Date::new`] would return an error.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// const LEAP: Date = Date::constant(2024, 2, 29);
    /// assert_eq!(LEAP.day(), 29);
    /// ```
    #[inline]
    pub const fn constant(year: i32, month: i8, day: i8) -> Date {
        if year < YEAR_MIN || year > YEAR_MAX {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        if day < 1 || day > days_in_month(year, month) {
            panic!("invalid day");
        }
        Date { year, month, day }
    }

    /// Returns the current date in the system time zone.
    ///
    /// # Panics
    ///
    /// This panics if the system clock reports a time outside of the range
    /// supported by [`Instant`](crate::Instant).
    pub fn now() -> Date {
        Zoned::now().date()
    }

    /// Returns the current date according to the given clock.
    ///
    /// ```
    /// use calends::{civil::date, tz::TimeZone, Clock, Instant};
    ///
    /// let instant = Instant::from_second(1_700_000_000)?;
    /// let clock = Clock::fixed(instant, TimeZone::UTC);
    /// assert_eq!(calends::civil::Date::now_with(&clock), date(2023, 11, 14));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn now_with(clock: &Clock) -> Date {
        Zoned::now_with(clock).date()
    }

    /// Returns the date corresponding to the number of days since
    /// `1970-01-01`.
    ///
    /// # Errors
    ///
    /// This returns an error when the day is outside the supported range.
    ///
    /// ```
    /// use calends::civil::{date, Date};
    ///
    /// assert_eq!(Date::from_epoch_day(0)?, date(1970, 1, 1));
    /// assert_eq!(Date::from_epoch_day(-1)?, date(1969, 12, 31));
    /// assert_eq!(date(2024, 1, 1).to_epoch_day(), 19_723);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_epoch_day(epoch_day: i64) -> Result<Date, Error> {
        if !(EPOCH_DAY_MIN..=EPOCH_DAY_MAX).contains(&epoch_day) {
            return Err(Error::range(
                "epoch day",
                epoch_day,
                EPOCH_DAY_MIN,
                EPOCH_DAY_MAX,
            ));
        }
        let (year, month, day) = common::from_epoch_day(epoch_day);
        Ok(Date { year, month, day })
    }

    /// Returns the date for the given one-based day of the year.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range, or when the day
    /// is not in `1..=366`, or when the day is `366` and the year is not a
    /// leap year.
    pub fn from_day_of_year(year: i32, day: i16) -> Result<Date, Error> {
        check_year(i64::from(year))?;
        if !(1..=366).contains(&day) {
            return Err(Error::range("day-of-year", day, 1, 366));
        }
        if day == 366 && !is_leap_year(year) {
            return Err(Error::from(E::InvalidDayOfYear { year, day }));
        }
        let (month, day) = common::month_day_from_day_of_year(year, day);
        Ok(Date { year, month, day })
    }

    /// Returns the date corresponding to the given ISO 8601 week date.
    ///
    /// This is infallible since every `ISOWeekDate` is guaranteed to map to
    /// a supported `Date`.
    pub fn from_iso_week_date(weekdate: ISOWeekDate) -> Date {
        weekdate.date()
    }

    /// Returns this date with the year changed, clamping the day to the end
    /// of the month when needed (e.g., February 29 becomes February 28).
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range.
    pub fn with_year(self, year: i32) -> Result<Date, Error> {
        check_year(i64::from(year))?;
        let day = saturate_day_in_month(year, self.month, self.day);
        Ok(Date { year, month: self.month, day })
    }

    /// Returns this date with the year set from a year of era.
    ///
    /// ```
    /// use calends::civil::{date, Era};
    ///
    /// let d = date(2024, 3, 5).with_era_year(44, Era::BCE)?;
    /// assert_eq!(d, date(-43, 3, 5));
    /// assert_eq!(d.era_year(), (44, Era::BCE));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_era_year(self, year: i32, era: Era) -> Result<Date, Error> {
        let max = match era {
            Era::CE => YEAR_MAX,
            Era::BCE => YEAR_MAX + 1,
        };
        if !(1..=max).contains(&year) {
            return Err(Error::range("year-of-era", year, 1, max));
        }
        match era {
            Era::CE => self.with_year(year),
            Era::BCE => self.with_year(1 - year),
        }
    }

    /// Returns this date with the month changed, clamping the day to the end
    /// of the month when needed.
    ///
    /// # Errors
    ///
    /// This returns an error when the month is not in `1..=12`.
    ///
    /// ```
    /// use calends::civil::date;
    ///
    /// assert_eq!(date(2023, 3, 31).with_month(2)?, date(2023, 2, 28));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_month(self, month: i8) -> Result<Date, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let day = saturate_day_in_month(self.year, month, self.day);
        Ok(Date { year: self.year, month, day })
    }

    /// Returns this date with the day of the month changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the day does not exist in this month.
    pub fn with_day(self, day: i8) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Returns this date with the day of the year changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the day does not exist in this year.
    pub fn with_day_of_year(self, day: i16) -> Result<Date, Error> {
        Date::from_day_of_year(self.year, day)
    }

    /// Returns the year for this date.
    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the year and its era.
    ///
    /// Years greater than `0` are in the CE era. Year `0` is `1 BCE`.
    pub fn era_year(self) -> (i32, Era) {
        match self.era() {
            Era::CE => (self.year, Era::CE),
            Era::BCE => (1 - self.year, Era::BCE),
        }
    }

    /// Returns the era of this date.
    pub fn era(self) -> Era {
        Era::of_year(self.year)
    }

    /// Returns the month for this date, from `1` to `12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day of the month for this date.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the day of the week for this date.
    ///
    /// ```
    /// use calends::civil::{date, Weekday};
    ///
    /// assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
    /// assert_eq!(date(2024, 3, 5).weekday(), Weekday::Tuesday);
    /// ```
    pub fn weekday(self) -> Weekday {
        let offset = common::weekday_from_epoch_day(self.to_epoch_day());
        Weekday::from_monday_one_offset_unchecked(offset)
    }

    /// Returns the one-based day of the year for this date.
    pub fn day_of_year(self) -> i16 {
        common::day_of_year(self.year, self.month, self.day)
    }

    /// Returns true if this date is in a leap year.
    pub fn in_leap_year(self) -> bool {
        is_leap_year(self.year)
    }

    /// Returns the number of days in the month of this date.
    pub fn days_in_month(self) -> i8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the number of days in the year of this date.
    pub fn days_in_year(self) -> i16 {
        common::days_in_year(self.year)
    }

    /// Returns the first day of the month of this date.
    pub fn first_of_month(self) -> Date {
        Date { day: 1, ..self }
    }

    /// Returns the last day of the month of this date.
    pub fn last_of_month(self) -> Date {
        Date { day: self.days_in_month(), ..self }
    }

    /// Returns the first day of the year of this date.
    pub fn first_of_year(self) -> Date {
        Date { month: 1, day: 1, ..self }
    }

    /// Returns the last day of the year of this date.
    pub fn last_of_year(self) -> Date {
        Date { month: 12, day: 31, ..self }
    }

    /// Returns the number of days since `1970-01-01`.
    #[inline]
    pub fn to_epoch_day(self) -> i64 {
        common::to_epoch_day(self.year, self.month, self.day)
    }

    /// Returns the next day.
    ///
    /// # Errors
    ///
    /// This returns an error when this date is [`Date::MAX`].
    pub fn tomorrow(self) -> Result<Date, Error> {
        self.checked_add_days(1)
    }

    /// Returns the previous day.
    ///
    /// # Errors
    ///
    /// This returns an error when this date is [`Date::MIN`].
    pub fn yesterday(self) -> Result<Date, Error> {
        self.checked_sub_days(1)
    }

    /// Returns the ISO 8601 week date for this date.
    ///
    /// ```
    /// use calends::civil::{date, Weekday};
    ///
    /// let wd = date(2021, 1, 3).to_iso_week_date();
    /// assert_eq!((wd.year(), wd.week(), wd.weekday()), (2020, 53, Weekday::Sunday));
    /// ```
    pub fn to_iso_week_date(self) -> ISOWeekDate {
        ISOWeekDate::from_date(self)
    }

    /// Combines this date with a time to form a civil datetime.
    #[inline]
    pub const fn at(self, time: Time) -> DateTime {
        DateTime::from_parts(self, time)
    }

    /// Returns the civil datetime at midnight at the start of this date.
    pub const fn at_start_of_day(self) -> DateTime {
        DateTime::from_parts(self, Time::MIDNIGHT)
    }

    /// Returns the earliest valid instant on this date in the given time
    /// zone.
    ///
    /// This is usually midnight, but when a time zone transition creates a
    /// gap at midnight, the first instant after the gap is used instead.
    ///
    /// # Errors
    ///
    /// This returns an error when the result overflows the supported range.
    pub fn at_start_of_day_in(self, tz: &TimeZone) -> Result<Zoned, Error> {
        Zoned::start_of_day(self, tz.clone())
    }

    /// Adds the given number of days.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the result is out of range.
    pub fn checked_add_days(self, days: i64) -> Result<Date, Error> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .filter(|d| (EPOCH_DAY_MIN..=EPOCH_DAY_MAX).contains(d))
            .ok_or_else(|| Error::overflow("days"))?;
        Date::from_epoch_day(epoch_day)
    }

    /// Subtracts the given number of days.
    pub fn checked_sub_days(self, days: i64) -> Result<Date, Error> {
        self.checked_add_days(
            days.checked_neg().ok_or_else(|| Error::overflow("days"))?,
        )
    }

    /// Adds the given number of weeks.
    pub fn checked_add_weeks(self, weeks: i64) -> Result<Date, Error> {
        self.checked_add_days(
            weeks.checked_mul(7).ok_or_else(|| Error::overflow("weeks"))?,
        )
    }

    /// Subtracts the given number of weeks.
    pub fn checked_sub_weeks(self, weeks: i64) -> Result<Date, Error> {
        self.checked_add_weeks(
            weeks.checked_neg().ok_or_else(|| Error::overflow("weeks"))?,
        )
    }

    /// Adds the given number of months, clamping the day to the end of the
    /// resulting month when needed.
    ///
    /// ```
    /// use calends::civil::date;
    ///
    /// assert_eq!(date(2024, 3, 31).checked_add_months(-1)?, date(2024, 2, 29));
    /// assert_eq!(date(2024, 11, 30).checked_add_months(3)?, date(2025, 2, 28));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add_months(self, months: i64) -> Result<Date, Error> {
        if months == 0 {
            return Ok(self);
        }
        let total = self
            .proleptic_month()
            .checked_add(months)
            .ok_or_else(|| Error::overflow("months"))?;
        let year = total.div_euclid(12);
        check_year(year).map_err(|_| Error::overflow("months"))?;
        let year = year as i32;
        let month = (total.rem_euclid(12) + 1) as i8;
        let day = saturate_day_in_month(year, month, self.day);
        Ok(Date { year, month, day })
    }

    /// Subtracts the given number of months.
    pub fn checked_sub_months(self, months: i64) -> Result<Date, Error> {
        self.checked_add_months(
            months.checked_neg().ok_or_else(|| Error::overflow("months"))?,
        )
    }

    /// Adds the given number of years, clamping February 29 to February 28
    /// when the resulting year is not a leap year.
    pub fn checked_add_years(self, years: i64) -> Result<Date, Error> {
        if years == 0 {
            return Ok(self);
        }
        let year = i64::from(self.year)
            .checked_add(years)
            .filter(|&y| check_year(y).is_ok())
            .ok_or_else(|| Error::overflow("years"))?;
        self.with_year(year as i32)
    }

    /// Subtracts the given number of years.
    pub fn checked_sub_years(self, years: i64) -> Result<Date, Error> {
        self.checked_add_years(
            years.checked_neg().ok_or_else(|| Error::overflow("years"))?,
        )
    }

    /// Adds an amount of time to this date.
    ///
    /// The amount may be a [`Period`], or a number of date based [`Unit`]s.
    /// A [`Duration`](crate::Duration) is only accepted when it is zero,
    /// since a date has no time component.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range, or when the
    /// amount uses a time based unit.
    pub fn checked_add<A: Into<Amount>>(self, amount: A) -> Result<Date, Error> {
        match amount.into() {
            Amount::Duration(duration) => {
                if duration.is_zero() {
                    Ok(self)
                } else {
                    Err(unsupported_unit(Unit::Second, "Date"))
                }
            }
            Amount::Period(period) => period.add_to(self),
            Amount::Units(amount, unit) => self.checked_add_units(amount, unit),
        }
    }

    /// Subtracts an amount of time from this date.
    ///
    /// See [`Date::checked_add`] for details.
    pub fn checked_sub<A: Into<Amount>>(self, amount: A) -> Result<Date, Error> {
        match amount.into() {
            Amount::Period(period) => period.subtract_from(self),
            amount => self.checked_add(amount.checked_neg()?),
        }
    }

    fn checked_add_units(self, amount: i64, unit: Unit) -> Result<Date, Error> {
        let scaled = |factor: i64| {
            amount.checked_mul(factor).ok_or_else(|| Error::overflow("years"))
        };
        match unit {
            Unit::Day => self.checked_add_days(amount),
            Unit::Week => self.checked_add_weeks(amount),
            Unit::Month => self.checked_add_months(amount),
            Unit::Year => self.checked_add_years(amount),
            Unit::Decade => self.checked_add_years(scaled(10)?),
            Unit::Century => self.checked_add_years(scaled(100)?),
            Unit::Millennium => self.checked_add_years(scaled(1_000)?),
            Unit::Era => {
                let era = self
                    .era()
                    .to_field_value()
                    .checked_add(amount)
                    .ok_or_else(|| Error::overflow("eras"))?;
                self.with_field(Field::Era, era)
            }
            _ => Err(unsupported_unit(unit, "Date")),
        }
    }

    /// Returns the number of whole units from this date until `other`.
    ///
    /// The result is negative when `other` is before this date, and is
    /// truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error for time based units and `Forever`.
    ///
    /// ```
    /// use calends::{civil::date, temporal::Unit};
    ///
    /// let start = date(2024, 1, 31);
    /// assert_eq!(start.until(date(2024, 2, 29), Unit::Month)?, 0);
    /// assert_eq!(start.until(date(2024, 3, 1), Unit::Month)?, 1);
    /// assert_eq!(start.until(date(2023, 1, 31), Unit::Year)?, -1);
    /// assert_eq!(start.until(date(2024, 3, 1), Unit::Day)?, 30);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: Date, unit: Unit) -> Result<i64, Error> {
        let days = || other.to_epoch_day() - self.to_epoch_day();
        Ok(match unit {
            Unit::Day => days(),
            Unit::Week => days() / 7,
            Unit::Era => {
                other.era().to_field_value() - self.era().to_field_value()
            }
            _ => match unit.months() {
                Some(per) => self.months_until(other) / per,
                None => return Err(unsupported_unit(unit, "Date")),
            },
        })
    }

    /// Returns the period between this date and `other`.
    ///
    /// This is equivalent to `Period::between(self, other)`.
    pub fn until_period(self, other: Date) -> Period {
        Period::between(self, other)
    }

    /// Returns true when this date is before `other`.
    pub fn is_before(self, other: Date) -> bool {
        self < other
    }

    /// Returns true when this date is after `other`.
    pub fn is_after(self, other: Date) -> bool {
        self > other
    }

    /// Returns true when this date is the same as `other`.
    pub fn is_equal(self, other: Date) -> bool {
        self == other
    }

    /// Returns the number of whole months from this date to `other`.
    pub(crate) fn months_until(self, other: Date) -> i64 {
        let packed1 = self.proleptic_month() * 32 + i64::from(self.day);
        let packed2 = other.proleptic_month() * 32 + i64::from(other.day);
        (packed2 - packed1) / 32
    }

    /// Returns `year * 12 + month - 1`.
    pub(crate) fn proleptic_month(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn aligned_week_of_month_range(self) -> ValueRange {
        let max = if self.month == 2 && !self.in_leap_year() { 4 } else { 5 };
        ValueRange::constant(1, 1, max, max)
    }
}

/// Returns a range error when the year is outside the supported range.
pub(crate) fn check_year(year: i64) -> Result<(), Error> {
    if !(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX)).contains(&year) {
        return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
    }
    Ok(())
}

impl FieldAccess for Date {
    fn is_supported(&self, field: Field) -> bool {
        field.is_date_based()
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        let fixed = |max| ValueRange::constant(1, 1, max, max);
        Ok(match field {
            Field::DayOfMonth => fixed(i64::from(self.days_in_month())),
            Field::DayOfYear => fixed(i64::from(self.days_in_year())),
            Field::AlignedWeekOfMonth => self.aligned_week_of_month_range(),
            Field::YearOfEra => match self.era() {
                Era::BCE => fixed(i64::from(YEAR_MAX) + 1),
                Era::CE => fixed(i64::from(YEAR_MAX)),
            },
            _ if field.is_date_based() => field.range(),
            _ => return Err(unsupported_field(field, "Date")),
        })
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        let day = i64::from(self.day);
        let doy = i64::from(self.day_of_year());
        Ok(match field {
            Field::DayOfWeek => i64::from(self.weekday().to_monday_one_offset()),
            Field::AlignedDayOfWeekInMonth => (day - 1) % 7 + 1,
            Field::AlignedDayOfWeekInYear => (doy - 1) % 7 + 1,
            Field::DayOfMonth => day,
            Field::DayOfYear => doy,
            Field::EpochDay => self.to_epoch_day(),
            Field::AlignedWeekOfMonth => (day - 1) / 7 + 1,
            Field::AlignedWeekOfYear => (doy - 1) / 7 + 1,
            Field::MonthOfYear => i64::from(self.month),
            Field::ProlepticMonth => self.proleptic_month(),
            Field::YearOfEra => i64::from(self.era_year().0),
            Field::Year => i64::from(self.year),
            Field::Era => self.era().to_field_value(),
            _ => return Err(unsupported_field(field, "Date")),
        })
    }
}

impl FieldAdjust for Date {
    fn with_field(&self, field: Field, value: i64) -> Result<Date, Error> {
        if !field.is_date_based() {
            return Err(unsupported_field(field, "Date"));
        }
        field.check_valid_value(value)?;
        let date = *self;
        match field {
            Field::DayOfWeek
            | Field::AlignedDayOfWeekInMonth
            | Field::AlignedDayOfWeekInYear => {
                date.checked_add_days(value - date.get(field)?)
            }
            Field::DayOfMonth => date.with_day(value as i8),
            Field::DayOfYear => date.with_day_of_year(value as i16),
            Field::EpochDay => Date::from_epoch_day(value),
            Field::AlignedWeekOfMonth | Field::AlignedWeekOfYear => {
                date.checked_add_weeks(value - date.get(field)?)
            }
            Field::MonthOfYear => date.with_month(value as i8),
            Field::ProlepticMonth => {
                date.checked_add_months(value - date.proleptic_month())
            }
            Field::YearOfEra => match date.era() {
                Era::CE => date.with_era_year(value as i32, Era::CE),
                Era::BCE => date.with_era_year(value as i32, Era::BCE),
            },
            Field::Year => date.with_year(value as i32),
            Field::Era => {
                if date.era().to_field_value() == value {
                    Ok(date)
                } else {
                    date.with_year(1 - date.year)
                }
            }
            _ => Err(unsupported_field(field, "Date")),
        }
    }
}

impl Default for Date {
    fn default() -> Date {
        Date::ZERO
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_date(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Date {
    type Err = Error;

    fn from_str(string: &str) -> Result<Date, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_date(string)
    }
}

impl From<ISOWeekDate> for Date {
    #[inline]
    fn from(weekdate: ISOWeekDate) -> Date {
        Date::from_iso_week_date(weekdate)
    }
}

crate::temporal::impl_amount_ops!(Date);

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        // Mostly stay in a range where arithmetic in tests doesn't overflow,
        // but sometimes produce dates near the boundaries.
        let year = if bool::arbitrary(g) {
            i32::arbitrary(g).rem_euclid(20_000) - 10_000
        } else {
            i32::arbitrary(g).clamp(YEAR_MIN, YEAR_MAX)
        };
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day = i8::arbitrary(g).rem_euclid(31) + 1;
        Date { year, month, day: saturate_day_in_month(year, month, day) }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Date>> {
        let (month, day) = (self.month, self.day);
        Box::new(self.year.shrink().map(move |year| Date {
            year,
            month,
            day: saturate_day_in_month(year, month, day),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn new_errors() {
        insta::assert_snapshot!(
            Date::new(2023, 2, 29).unwrap_err(),
            @"invalid date 'February 29' as '2023' is not a leap year",
        );
        insta::assert_snapshot!(
            Date::new(2024, 4, 31).unwrap_err(),
            @"invalid date 'April 31'",
        );
        insta::assert_snapshot!(
            Date::new(2024, 13, 1).unwrap_err(),
            @"parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            Date::new(1_000_000_000, 1, 1).unwrap_err(),
            @"parameter 'year' with value 1000000000 is not in the required range of -999999999..=999999999",
        );
        assert!(Date::new(2024, 4, 31).unwrap_err().is_invalid_date());
        assert!(Date::new(2024, 1, 0).unwrap_err().is_range());
    }

    #[test]
    fn boundaries() {
        assert_eq!(Date::MIN.to_epoch_day(), EPOCH_DAY_MIN);
        assert_eq!(Date::MAX.to_epoch_day(), EPOCH_DAY_MAX);
        assert!(Date::MAX.tomorrow().unwrap_err().is_overflow());
        assert!(Date::MIN.yesterday().unwrap_err().is_overflow());
        assert!(Date::MAX.checked_add_months(1).unwrap_err().is_overflow());
        assert!(Date::MIN.checked_add_years(-1).is_err());
        assert!(Date::MAX.checked_add_days(i64::MAX).is_err());
        assert!(Date::from_epoch_day(EPOCH_DAY_MAX + 1).unwrap_err().is_range());
    }

    #[test]
    fn month_and_year_clamping() {
        assert_eq!(date(2024, 1, 31).checked_add_months(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).checked_add_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 2, 29).checked_add_years(1).unwrap(), date(2025, 2, 28));
        assert_eq!(date(2024, 2, 29).checked_add_years(4).unwrap(), date(2028, 2, 29));
        assert_eq!(date(2024, 5, 31).checked_sub_months(3).unwrap(), date(2024, 2, 29));
        assert_eq!(date(0, 1, 15).checked_sub_months(1).unwrap(), date(-1, 12, 15));
    }

    #[test]
    fn units() {
        let d = date(2024, 3, 5);
        assert_eq!(d.checked_add((3, Unit::Decade)).unwrap(), date(2054, 3, 5));
        assert_eq!(d.checked_add((1, Unit::Millennium)).unwrap(), date(3024, 3, 5));
        assert_eq!(d.checked_sub((1, Unit::Era)).unwrap(), date(-2023, 3, 5));
        assert!(d.checked_add((1, Unit::Hour)).unwrap_err().is_unsupported());
        assert!(d.checked_add((1, Unit::Forever)).unwrap_err().is_unsupported());
        assert!(d.checked_add(crate::Duration::from_secs(1)).is_err());
        assert_eq!(d.checked_add(crate::Duration::ZERO).unwrap(), d);

        assert_eq!(d.until(date(2025, 3, 4), Unit::Year).unwrap(), 0);
        assert_eq!(d.until(date(2025, 3, 5), Unit::Year).unwrap(), 1);
        assert_eq!(d.until(date(2024, 3, 19), Unit::Week).unwrap(), 2);
        assert_eq!(d.until(date(2024, 3, 1), Unit::Week).unwrap(), 0);
        assert_eq!(d.until(date(1924, 3, 5), Unit::Century).unwrap(), -1);
        assert_eq!(d.until(date(-5, 3, 5), Unit::Era).unwrap(), -1);
        assert!(d.until(d, Unit::Minute).unwrap_err().is_unsupported());
    }

    #[test]
    fn fields() {
        let d = date(2024, 3, 5);
        assert_eq!(d.get(Field::DayOfWeek).unwrap(), 2);
        assert_eq!(d.get(Field::AlignedDayOfWeekInMonth).unwrap(), 5);
        assert_eq!(d.get(Field::AlignedDayOfWeekInYear).unwrap(), 2);
        assert_eq!(d.get(Field::AlignedWeekOfYear).unwrap(), 10);
        assert_eq!(d.get(Field::YearOfEra).unwrap(), 2024);
        assert_eq!(d.get(Field::Era).unwrap(), 1);
        assert!(d.get(Field::HourOfDay).unwrap_err().is_unsupported());

        insta::assert_snapshot!(
            date(2023, 2, 1).range(Field::AlignedWeekOfMonth).unwrap(),
            @"1 - 4",
        );
        insta::assert_snapshot!(
            date(2024, 2, 1).range(Field::DayOfMonth).unwrap(),
            @"1 - 29",
        );
        insta::assert_snapshot!(
            date(0, 1, 1).range(Field::YearOfEra).unwrap(),
            @"1 - 1000000000",
        );

        assert_eq!(d.with_field(Field::DayOfWeek, 7).unwrap(), date(2024, 3, 10));
        assert_eq!(d.with_field(Field::AlignedWeekOfMonth, 2).unwrap(), date(2024, 3, 12));
        assert_eq!(d.with_field(Field::ProlepticMonth, 0).unwrap(), date(0, 1, 5));
        assert_eq!(d.with_field(Field::Era, 0).unwrap(), date(-2023, 3, 5));
        assert_eq!(d.with_field(Field::YearOfEra, 1).unwrap(), date(1, 3, 5));
        assert_eq!(d.with_field(Field::EpochDay, 0).unwrap(), date(1970, 1, 1));
        assert!(d.with_field(Field::DayOfMonth, 32).unwrap_err().is_range());
        assert!(date(2023, 2, 1).with_field(Field::DayOfMonth, 29).is_err());
    }

    #[test]
    fn iso_week_date() {
        let wd = date(2024, 12, 30).to_iso_week_date();
        assert_eq!((wd.year(), wd.week()), (2025, 1));
        assert_eq!(Date::from(wd), date(2024, 12, 30));
    }

    quickcheck::quickcheck! {
        fn prop_add_sub_days_inverse(d: Date, days: i32) -> quickcheck::TestResult {
            let days = i64::from(days);
            let Ok(added) = d.checked_add_days(days) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(
                added.checked_sub_days(days).unwrap() == d,
            )
        }

        fn prop_epoch_day_roundtrip(d: Date) -> bool {
            Date::from_epoch_day(d.to_epoch_day()).unwrap() == d
        }

        fn prop_display_parse_roundtrip(d: Date) -> bool {
            d.to_string().parse::<Date>().unwrap() == d
        }
    }
}
