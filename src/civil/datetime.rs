use crate::{
    civil::{Date, Time},
    error::Error,
    temporal::{
        unsupported_field, Amount, Field, FieldAccess, FieldAdjust, Unit,
        ValueRange,
    },
    tz::{Disambiguation, Offset, TimeZone},
    util::common::NANOS_PER_DAY,
    Clock, OffsetDateTime, Zoned,
};

/// A representation of a civil datetime in the proleptic Gregorian
/// calendar.
///
/// A `DateTime` value corresponds to a pair of a [`Date`] and a [`Time`].
/// That is, a datetime contains a year, month, day, hour, minute, second and
/// the fractional number of nanoseconds.
///
/// # Civil datetimes
///
/// A `DateTime` value behaves without regard to daylight saving time or time
/// zones in general. When doing arithmetic on datetimes with time based
/// units, days are considered to always be precisely `86,400` seconds long.
///
/// To attach a time zone, use [`DateTime::to_zoned`]. To attach a fixed
/// offset, use [`DateTime::to_offset_datetime`].
///
/// # Example
///
/// ```
/// use calends::{civil::{datetime, DateTime}, temporal::Unit, Duration};
///
/// let dt: DateTime = "2024-03-31T23:30".parse()?;
/// let later = dt.checked_add(Duration::from_hours(1)?)?;
/// assert_eq!(later, datetime(2024, 4, 1, 0, 30, 0, 0));
/// assert_eq!(later.to_string(), "2024-04-01T00:30");
/// assert_eq!(dt.until(later, Unit::Minute)?, 60);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The minimum representable datetime, `-999999999-01-01T00:00`.
    pub const MIN: DateTime = DateTime::from_parts(Date::MIN, Time::MIN);

    /// The maximum representable datetime,
    /// `+999999999-12-31T23:59:59.999999999`.
    pub const MAX: DateTime = DateTime::from_parts(Date::MAX, Time::MAX);

    /// Creates a new `DateTime` from its components.
    ///
    /// # Errors
    ///
    /// This returns an error when [`Date::new`] or [`Time::new`] would.
    pub fn new(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Result<DateTime, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new(hour, minute, second, nanosecond)?;
        Ok(DateTime { date, time })
    }

    /// Creates a new `DateTime` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`DateTime::new`] would return an error.
    pub const fn constant(
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

    /// Creates a `DateTime` from its date and time parts.
    #[inline]
    pub const fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Returns the current datetime in the system time zone.
    pub fn now() -> DateTime {
        Zoned::now().datetime()
    }

    /// Returns the current datetime according to the given clock.
    pub fn now_with(clock: &Clock) -> DateTime {
        Zoned::now_with(clock).datetime()
    }

    /// Returns the datetime for a number of seconds since the Unix epoch
    /// in the given offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the datetime would be out of range.
    pub fn from_epoch_second(
        second: i64,
        nanosecond: i32,
        offset: Offset,
    ) -> Result<DateTime, Error> {
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range("nanosecond", nanosecond, 0, 999_999_999));
        }
        let local = second
            .checked_add(i64::from(offset.seconds()))
            .ok_or_else(|| Error::overflow("seconds"))?;
        let date = Date::from_epoch_day(local.div_euclid(86_400))?;
        let time = Time::from_nanosecond_of_day_unchecked(
            local.rem_euclid(86_400) * 1_000_000_000 + i64::from(nanosecond),
        );
        Ok(DateTime { date, time })
    }

    /// Returns the number of seconds since the Unix epoch for this datetime
    /// interpreted in the given offset.
    pub fn to_epoch_second(self, offset: Offset) -> i64 {
        self.date.to_epoch_day() * 86_400
            + i64::from(self.time.to_second_of_day())
            - i64::from(offset.seconds())
    }

    /// Returns the date part.
    #[inline]
    pub fn date(self) -> Date {
        self.date
    }

    /// Returns the time part.
    #[inline]
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the year.
    #[inline]
    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Returns the month.
    #[inline]
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day of the month.
    #[inline]
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the hour.
    #[inline]
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute.
    #[inline]
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second.
    #[inline]
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional second in nanoseconds.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.time.subsec_nanosecond()
    }

    /// Returns this datetime with the date replaced.
    pub fn with_date(self, date: Date) -> DateTime {
        DateTime { date, ..self }
    }

    /// Returns this datetime with the time replaced.
    pub fn with_time(self, time: Time) -> DateTime {
        DateTime { time, ..self }
    }

    /// Returns this datetime with the year changed, clamping the day.
    pub fn with_year(self, year: i32) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date.with_year(year)?))
    }

    /// Returns this datetime with the month changed, clamping the day.
    pub fn with_month(self, month: i8) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date.with_month(month)?))
    }

    /// Returns this datetime with the day of the month changed.
    pub fn with_day(self, day: i8) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date.with_day(day)?))
    }

    /// Returns this datetime with the hour changed.
    pub fn with_hour(self, hour: i8) -> Result<DateTime, Error> {
        Ok(self.with_time(self.time.with_hour(hour)?))
    }

    /// Returns this datetime with the minute changed.
    pub fn with_minute(self, minute: i8) -> Result<DateTime, Error> {
        Ok(self.with_time(self.time.with_minute(minute)?))
    }

    /// Returns this datetime with the second changed.
    pub fn with_second(self, second: i8) -> Result<DateTime, Error> {
        Ok(self.with_time(self.time.with_second(second)?))
    }

    /// Returns this datetime with the fractional second changed.
    pub fn with_subsec_nanosecond(
        self,
        nanosecond: i32,
    ) -> Result<DateTime, Error> {
        Ok(self.with_time(self.time.with_subsec_nanosecond(nanosecond)?))
    }

    /// Resolves this datetime in the given time zone with the default
    /// [`Disambiguation::Compatible`] policy.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::TimeZone};
    ///
    /// let tz = TimeZone::get("Europe/London")?;
    /// // 01:30 doesn't exist on this day, so it's shifted forward by the
    /// // length of the gap.
    /// let zdt = datetime(2024, 3, 31, 1, 30, 0, 0).to_zoned(tz)?;
    /// assert_eq!(zdt.to_string(), "2024-03-31T02:30+01:00[Europe/London]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_zoned(self, tz: TimeZone) -> Result<Zoned, Error> {
        Zoned::from_local(self, tz)
    }

    /// Resolves this datetime in the given time zone with an explicit gap
    /// and fold policy.
    pub fn to_zoned_with(
        self,
        tz: TimeZone,
        disambiguation: Disambiguation,
    ) -> Result<Zoned, Error> {
        Zoned::from_local_with(self, tz, disambiguation)
    }

    /// Pairs this datetime with a fixed offset.
    pub fn to_offset_datetime(self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::new(self, offset)
    }

    /// Adds nanoseconds, carrying into the date.
    pub(crate) fn checked_add_nanos(self, nanos: i128) -> Result<DateTime, Error> {
        if nanos == 0 {
            return Ok(self);
        }
        let (time, days) = self.time.overflowing_add_nanos(nanos);
        let days = i64::try_from(days).map_err(|_| Error::overflow("days"))?;
        Ok(DateTime { date: self.date.checked_add_days(days)?, time })
    }

    /// Adds an amount of time.
    ///
    /// Date based units and periods change the date and keep the time.
    /// Durations and time based units carry over into the date.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range or the unit is
    /// `Forever`.
    pub fn checked_add<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<DateTime, Error> {
        match amount.into() {
            Amount::Duration(duration) => {
                self.checked_add_nanos(duration.as_nanos_i128())
            }
            Amount::Period(period) => {
                Ok(self.with_date(period.add_to(self.date)?))
            }
            Amount::Units(amount, unit) => {
                if unit.is_time_based() {
                    let per = unit.nanos().unwrap_or(1);
                    self.checked_add_nanos(i128::from(amount) * i128::from(per))
                } else {
                    Ok(self.with_date(self.date.checked_add((amount, unit))?))
                }
            }
        }
    }

    /// Subtracts an amount of time.
    pub fn checked_sub<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<DateTime, Error> {
        match amount.into() {
            Amount::Period(period) => {
                Ok(self.with_date(period.subtract_from(self.date)?))
            }
            amount => self.checked_add(amount.checked_neg()?),
        }
    }

    /// Returns the number of whole units from this datetime until `other`,
    /// truncated toward zero.
    ///
    /// For date based units, the end date is moved back (or forward) one day
    /// when its time of day hasn't yet been reached, so that only complete
    /// units are counted.
    ///
    /// ```
    /// use calends::{civil::datetime, temporal::Unit};
    ///
    /// let start = datetime(2024, 1, 1, 12, 0, 0, 0);
    /// assert_eq!(start.until(datetime(2024, 1, 2, 11, 59, 0, 0), Unit::Day)?, 0);
    /// assert_eq!(start.until(datetime(2024, 1, 2, 12, 0, 0, 0), Unit::Day)?, 1);
    /// assert_eq!(start.until(datetime(2024, 1, 2, 11, 59, 0, 0), Unit::Hour)?, 23);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: DateTime, unit: Unit) -> Result<i64, Error> {
        if unit.is_time_based() {
            let per = i128::from(unit.nanos().unwrap_or(1));
            let diff = other.to_nanos_since_epoch() - self.to_nanos_since_epoch();
            return i64::try_from(diff / per)
                .map_err(|_| Error::overflow("units"));
        }
        let mut end = other.date;
        if end > self.date && other.time < self.time {
            end = end.yesterday()?;
        } else if end < self.date && other.time > self.time {
            end = end.tomorrow()?;
        }
        self.date.until(end, unit)
    }

    /// Truncates the time of this datetime to the given unit.
    pub fn truncated_to(self, unit: Unit) -> Result<DateTime, Error> {
        Ok(self.with_time(self.time.truncated_to(unit)?))
    }

    /// Returns true when this datetime is before `other`.
    pub fn is_before(self, other: DateTime) -> bool {
        self < other
    }

    /// Returns true when this datetime is after `other`.
    pub fn is_after(self, other: DateTime) -> bool {
        self > other
    }

    fn to_nanos_since_epoch(self) -> i128 {
        i128::from(self.date.to_epoch_day()) * i128::from(NANOS_PER_DAY)
            + i128::from(self.time.to_nanosecond_of_day())
    }
}

impl FieldAccess for DateTime {
    fn is_supported(&self, field: Field) -> bool {
        field.is_date_based() || field.is_time_based()
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if field.is_time_based() {
            self.time.range(field)
        } else if field.is_date_based() {
            self.date.range(field)
        } else {
            Err(unsupported_field(field, "DateTime"))
        }
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        if field.is_time_based() {
            self.time.get(field)
        } else if field.is_date_based() {
            self.date.get(field)
        } else {
            Err(unsupported_field(field, "DateTime"))
        }
    }
}

impl FieldAdjust for DateTime {
    fn with_field(&self, field: Field, value: i64) -> Result<DateTime, Error> {
        if field.is_time_based() {
            Ok(self.with_time(self.time.with_field(field, value)?))
        } else if field.is_date_based() {
            Ok(self.with_date(self.date.with_field(field, value)?))
        } else {
            Err(unsupported_field(field, "DateTime"))
        }
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_datetime(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<DateTime, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_datetime(string)
    }
}

impl From<DateTime> for Date {
    fn from(dt: DateTime) -> Date {
        dt.date()
    }
}

impl From<DateTime> for Time {
    fn from(dt: DateTime) -> Time {
        dt.time()
    }
}

crate::temporal::impl_amount_ops!(DateTime);

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        DateTime::from_parts(Date::arbitrary(g), Time::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, datetime, time},
        Duration, Period,
    };

    use super::*;

    #[test]
    fn carry_into_date() {
        let dt = datetime(2024, 2, 28, 23, 0, 0, 0);
        assert_eq!(
            dt.checked_add((2, Unit::Hour)).unwrap(),
            datetime(2024, 2, 29, 1, 0, 0, 0),
        );
        assert_eq!(
            dt.checked_sub(Duration::from_secs(86_400 * 59)).unwrap(),
            datetime(2023, 12, 31, 23, 0, 0, 0),
        );
        assert_eq!(
            dt.checked_add(Period::new(0, 1, 1)).unwrap(),
            datetime(2024, 3, 29, 23, 0, 0, 0),
        );
        assert!(DateTime::MAX.checked_add((1, Unit::Nanosecond)).unwrap_err().is_overflow());
        assert!(dt.checked_add((1, Unit::Forever)).unwrap_err().is_unsupported());
    }

    #[test]
    fn until_units() {
        let a = datetime(2024, 1, 31, 10, 0, 0, 0);
        let b = datetime(2024, 2, 29, 9, 0, 0, 0);
        assert_eq!(a.until(b, Unit::Month).unwrap(), 0);
        assert_eq!(a.until(b, Unit::Day).unwrap(), 28);
        assert_eq!(b.until(a, Unit::Day).unwrap(), -28);
        assert_eq!(a.until(b, Unit::HalfDay).unwrap(), 57);
        assert_eq!(
            DateTime::MIN.until(DateTime::MAX, Unit::Nanosecond).unwrap_err().is_overflow(),
            true,
        );
        assert!(DateTime::MIN.until(DateTime::MAX, Unit::Second).is_ok());
    }

    #[test]
    fn epoch_seconds() {
        let offset = Offset::constant(1);
        let dt = datetime(1970, 1, 1, 1, 0, 0, 0);
        assert_eq!(dt.to_epoch_second(offset), 0);
        assert_eq!(DateTime::from_epoch_second(0, 0, offset).unwrap(), dt);
        assert_eq!(
            DateTime::from_epoch_second(-1, 5, Offset::UTC).unwrap(),
            datetime(1969, 12, 31, 23, 59, 59, 5),
        );
    }

    #[test]
    fn fields() {
        let dt = datetime(2024, 3, 5, 13, 45, 0, 0);
        assert_eq!(dt.get(Field::AmPmOfDay).unwrap(), 1);
        assert_eq!(dt.get(Field::DayOfYear).unwrap(), 65);
        assert!(dt.get(Field::InstantSeconds).unwrap_err().is_unsupported());
        assert_eq!(
            dt.with_field(Field::DayOfMonth, 1).unwrap(),
            date(2024, 3, 1).at(time(13, 45, 0, 0)),
        );
        assert_eq!(
            dt.truncated_to(Unit::Hour).unwrap(),
            datetime(2024, 3, 5, 13, 0, 0, 0),
        );
    }

    quickcheck::quickcheck! {
        fn prop_display_parse_roundtrip(dt: DateTime) -> bool {
            dt.to_string().parse::<DateTime>().unwrap() == dt
        }
    }
}
