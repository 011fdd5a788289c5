use crate::{
    civil::{Date, DateTime},
    error::Error,
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    util::common::{
        NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI,
        NANOS_PER_MINUTE, NANOS_PER_SECOND,
    },
    Clock, Duration, Zoned,
};

/// A representation of civil "wall clock" time.
///
/// Conceptually, a `Time` value corresponds to the typical hours and minutes
/// that you might see on a clock. This type also contains the second and
/// fractional subsecond (to nanosecond precision) associated with a time.
///
/// # Civil time
///
/// A `Time` value behaves as if it corresponds precisely to a single
/// nanosecond within a day, where all days have `86,400` seconds. A `Time`
/// has no date, so arithmetic on it wraps around midnight:
///
/// ```
/// use calends::{civil::time, Duration};
///
/// let t = time(23, 30, 0, 0);
/// assert_eq!(t.wrapping_add(Duration::from_minutes(45)?), time(0, 15, 0, 0));
/// assert_eq!(t.wrapping_add_hours(-24), t);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Parsing and printing
///
/// `Display` prints `HH:mm`, followed by `:ss` when the seconds or
/// nanoseconds are non-zero, followed by a fraction of 3, 6 or 9 digits
/// when the nanoseconds are non-zero.
///
/// ```
/// use calends::civil::{time, Time};
///
/// assert_eq!(time(10, 15, 0, 0).to_string(), "10:15");
/// assert_eq!(time(10, 15, 30, 0).to_string(), "10:15:30");
/// assert_eq!(time(10, 15, 30, 500_000_000).to_string(), "10:15:30.500");
/// assert_eq!(time(10, 15, 0, 1_000).to_string(), "10:15:00.000001");
///
/// let t: Time = "10:15:30.5".parse()?;
/// assert_eq!(t, time(10, 15, 30, 500_000_000));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
}

impl Time {
    /// The minimum representable time, `00:00`.
    pub const MIN: Time = Time::MIDNIGHT;

    /// The maximum representable time, `23:59:59.999999999`.
    pub const MAX: Time = Time::constant(23, 59, 59, 999_999_999);

    /// The first moment of the day.
    pub const MIDNIGHT: Time = Time::constant(0, 0, 0, 0);

    /// Twelve o'clock in the afternoon.
    pub const NOON: Time = Time::constant(12, 0, 0, 0);

    /// Creates a new `Time` value from its components.
    ///
    /// # Errors
    ///
    /// This returns a range error when the hour is not in `0..=23`, the
    /// minute is not in `0..=59`, the second is not in `0..=59` or the
    /// nanosecond is not in `0..=999_999_999`.
    pub fn new(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range("nanosecond", nanosecond, 0, 999_999_999));
        }
        Ok(Time { hour, minute, second, nanosecond })
    }

    /// Creates a new `Time` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Time::new`] would return an error.
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Time {
        if hour < 0 || hour > 23 {
            panic!("invalid hour");
        }
        if minute < 0 || minute > 59 {
            panic!("invalid minute");
        }
        if second < 0 || second > 59 {
            panic!("invalid second");
        }
        if nanosecond < 0 || nanosecond > 999_999_999 {
            panic!("invalid nanosecond");
        }
        Time { hour, minute, second, nanosecond }
    }

    /// Returns the current time of day in the system time zone.
    pub fn now() -> Time {
        Zoned::now().time()
    }

    /// Returns the current time of day according to the given clock.
    pub fn now_with(clock: &Clock) -> Time {
        Zoned::now_with(clock).time()
    }

    /// Creates a time from the number of seconds since midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the value is not in `0..86_400`.
    pub fn from_second_of_day(second: i64) -> Result<Time, Error> {
        Field::SecondOfDay.check_valid_value(second)?;
        Ok(Time::from_nanosecond_of_day_unchecked(second * NANOS_PER_SECOND))
    }

    /// Creates a time from the number of nanoseconds since midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the value is not less than the number of
    /// nanoseconds in a day, or is negative.
    ///
    /// ```
    /// use calends::civil::{time, Time};
    ///
    /// let t = Time::from_nanosecond_of_day(3_600_000_000_001)?;
    /// assert_eq!(t, time(1, 0, 0, 1));
    /// assert_eq!(t.to_nanosecond_of_day(), 3_600_000_000_001);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_nanosecond_of_day(nanosecond: i64) -> Result<Time, Error> {
        Field::NanoOfDay.check_valid_value(nanosecond)?;
        Ok(Time::from_nanosecond_of_day_unchecked(nanosecond))
    }

    pub(crate) const fn from_nanosecond_of_day_unchecked(nod: i64) -> Time {
        let hour = (nod / NANOS_PER_HOUR) as i8;
        let minute = ((nod / NANOS_PER_MINUTE) % 60) as i8;
        let second = ((nod / NANOS_PER_SECOND) % 60) as i8;
        let nanosecond = (nod % NANOS_PER_SECOND) as i32;
        Time { hour, minute, second, nanosecond }
    }

    /// Returns the hour of the day, from `0` to `23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute of the hour, from `0` to `59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second of the minute, from `0` to `59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the fractional part of the second in nanoseconds, from `0`
    /// to `999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.nanosecond
    }

    /// Returns the number of whole seconds since midnight.
    pub fn to_second_of_day(self) -> i32 {
        i32::from(self.hour) * 3_600
            + i32::from(self.minute) * 60
            + i32::from(self.second)
    }

    /// Returns the number of nanoseconds since midnight.
    pub const fn to_nanosecond_of_day(self) -> i64 {
        self.hour as i64 * NANOS_PER_HOUR
            + self.minute as i64 * NANOS_PER_MINUTE
            + self.second as i64 * NANOS_PER_SECOND
            + self.nanosecond as i64
    }

    /// Returns this time with the hour changed.
    pub fn with_hour(self, hour: i8) -> Result<Time, Error> {
        Time::new(hour, self.minute, self.second, self.nanosecond)
    }

    /// Returns this time with the minute changed.
    pub fn with_minute(self, minute: i8) -> Result<Time, Error> {
        Time::new(self.hour, minute, self.second, self.nanosecond)
    }

    /// Returns this time with the second changed.
    pub fn with_second(self, second: i8) -> Result<Time, Error> {
        Time::new(self.hour, self.minute, second, self.nanosecond)
    }

    /// Returns this time with the fractional second changed.
    pub fn with_subsec_nanosecond(self, nanosecond: i32) -> Result<Time, Error> {
        Time::new(self.hour, self.minute, self.second, nanosecond)
    }

    /// Combines this time with a date to form a civil datetime.
    pub const fn on(self, date: Date) -> DateTime {
        DateTime::from_parts(date, self)
    }

    /// Adds the given number of hours, wrapping around midnight.
    pub fn wrapping_add_hours(self, hours: i64) -> Time {
        self.wrapping_add_nanos_i128(i128::from(hours) * i128::from(NANOS_PER_HOUR))
    }

    /// Adds the given number of minutes, wrapping around midnight.
    pub fn wrapping_add_minutes(self, minutes: i64) -> Time {
        self.wrapping_add_nanos_i128(
            i128::from(minutes) * i128::from(NANOS_PER_MINUTE),
        )
    }

    /// Adds the given number of seconds, wrapping around midnight.
    pub fn wrapping_add_seconds(self, seconds: i64) -> Time {
        self.wrapping_add_nanos_i128(
            i128::from(seconds) * i128::from(NANOS_PER_SECOND),
        )
    }

    /// Adds the given number of nanoseconds, wrapping around midnight.
    pub fn wrapping_add_nanos(self, nanos: i64) -> Time {
        self.wrapping_add_nanos_i128(i128::from(nanos))
    }

    /// Adds a duration, wrapping around midnight.
    pub fn wrapping_add(self, duration: Duration) -> Time {
        self.wrapping_add_nanos_i128(duration.as_nanos_i128())
    }

    /// Subtracts a duration, wrapping around midnight.
    pub fn wrapping_sub(self, duration: Duration) -> Time {
        self.wrapping_add_nanos_i128(-duration.as_nanos_i128())
    }

    /// Adds nanoseconds and also returns the number of days that the
    /// addition carried over, which may be negative.
    pub(crate) fn overflowing_add_nanos(self, nanos: i128) -> (Time, i128) {
        let total = i128::from(self.to_nanosecond_of_day()) + nanos;
        let days = total.div_euclid(i128::from(NANOS_PER_DAY));
        let nod = total.rem_euclid(i128::from(NANOS_PER_DAY)) as i64;
        (Time::from_nanosecond_of_day_unchecked(nod), days)
    }

    fn wrapping_add_nanos_i128(self, nanos: i128) -> Time {
        self.overflowing_add_nanos(nanos).0
    }

    /// Adds an amount of time, wrapping around midnight.
    ///
    /// A [`Period`](crate::Period) is accepted only when it is zero, since a
    /// time has no date.
    ///
    /// # Errors
    ///
    /// This returns an error when the amount uses a date based unit.
    pub fn checked_add<A: Into<Amount>>(self, amount: A) -> Result<Time, Error> {
        match amount.into() {
            Amount::Duration(duration) => Ok(self.wrapping_add(duration)),
            Amount::Period(period) => {
                if period.is_zero() {
                    Ok(self)
                } else {
                    Err(unsupported_unit(Unit::Day, "Time"))
                }
            }
            Amount::Units(amount, unit) => match unit.nanos() {
                Some(per) if unit.is_time_based() => Ok(self
                    .wrapping_add_nanos_i128(
                        i128::from(amount) * i128::from(per),
                    )),
                _ => Err(unsupported_unit(unit, "Time")),
            },
        }
    }

    /// Subtracts an amount of time, wrapping around midnight.
    pub fn checked_sub<A: Into<Amount>>(self, amount: A) -> Result<Time, Error> {
        self.checked_add(amount.into().checked_neg()?)
    }

    /// Returns the number of whole units from this time until `other`,
    /// truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error for date based units.
    ///
    /// ```
    /// use calends::{civil::time, temporal::Unit};
    ///
    /// let t = time(10, 30, 0, 0);
    /// assert_eq!(t.until(time(12, 29, 0, 0), Unit::Hour)?, 1);
    /// assert_eq!(t.until(time(8, 0, 0, 0), Unit::Minute)?, -150);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: Time, unit: Unit) -> Result<i64, Error> {
        match unit.nanos() {
            Some(per) if unit.is_time_based() => {
                let diff =
                    other.to_nanosecond_of_day() - self.to_nanosecond_of_day();
                Ok(diff / per)
            }
            _ => Err(unsupported_unit(unit, "Time")),
        }
    }

    /// Truncates this time to the given unit.
    ///
    /// Truncating to `Day` returns midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the unit is larger than a day.
    ///
    /// ```
    /// use calends::{civil::time, temporal::Unit};
    ///
    /// let t = time(10, 15, 30, 123_456_789);
    /// assert_eq!(t.truncated_to(Unit::Millisecond)?, time(10, 15, 30, 123_000_000));
    /// assert_eq!(t.truncated_to(Unit::HalfDay)?, time(0, 0, 0, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn truncated_to(self, unit: Unit) -> Result<Time, Error> {
        let per = unit
            .nanos()
            .ok_or_else(|| unsupported_unit(unit, "truncation"))?;
        let nod = self.to_nanosecond_of_day();
        Ok(Time::from_nanosecond_of_day_unchecked(nod / per * per))
    }

    /// Returns true when this time is before `other`.
    pub fn is_before(self, other: Time) -> bool {
        self < other
    }

    /// Returns true when this time is after `other`.
    pub fn is_after(self, other: Time) -> bool {
        self > other
    }

    fn minute_of_day(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

impl FieldAccess for Time {
    fn is_supported(&self, field: Field) -> bool {
        field.is_time_based()
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if !field.is_time_based() {
            return Err(unsupported_field(field, "Time"));
        }
        Ok(field.range())
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        let nanos = i64::from(self.nanosecond);
        let nod = self.to_nanosecond_of_day();
        let hour = i64::from(self.hour);
        Ok(match field {
            Field::NanoOfSecond => nanos,
            Field::NanoOfDay => nod,
            Field::MicroOfSecond => nanos / NANOS_PER_MICRO,
            Field::MicroOfDay => nod / NANOS_PER_MICRO,
            Field::MilliOfSecond => nanos / NANOS_PER_MILLI,
            Field::MilliOfDay => nod / NANOS_PER_MILLI,
            Field::SecondOfMinute => i64::from(self.second),
            Field::SecondOfDay => i64::from(self.to_second_of_day()),
            Field::MinuteOfHour => i64::from(self.minute),
            Field::MinuteOfDay => self.minute_of_day(),
            Field::HourOfAmPm => hour % 12,
            Field::ClockHourOfAmPm => {
                if hour % 12 == 0 {
                    12
                } else {
                    hour % 12
                }
            }
            Field::HourOfDay => hour,
            Field::ClockHourOfDay => {
                if hour == 0 {
                    24
                } else {
                    hour
                }
            }
            Field::AmPmOfDay => hour / 12,
            _ => return Err(unsupported_field(field, "Time")),
        })
    }
}

impl FieldAdjust for Time {
    fn with_field(&self, field: Field, value: i64) -> Result<Time, Error> {
        if !field.is_time_based() {
            return Err(unsupported_field(field, "Time"));
        }
        field.check_valid_value(value)?;
        let t = *self;
        let hour = i64::from(t.hour);
        Ok(match field {
            Field::NanoOfSecond => t.with_subsec_nanosecond(value as i32)?,
            Field::NanoOfDay => Time::from_nanosecond_of_day_unchecked(value),
            Field::MicroOfSecond => {
                t.with_subsec_nanosecond((value * NANOS_PER_MICRO) as i32)?
            }
            Field::MicroOfDay => {
                Time::from_nanosecond_of_day_unchecked(value * NANOS_PER_MICRO)
            }
            Field::MilliOfSecond => {
                t.with_subsec_nanosecond((value * NANOS_PER_MILLI) as i32)?
            }
            Field::MilliOfDay => {
                Time::from_nanosecond_of_day_unchecked(value * NANOS_PER_MILLI)
            }
            Field::SecondOfMinute => t.with_second(value as i8)?,
            Field::SecondOfDay => t.wrapping_add_seconds(
                value - i64::from(t.to_second_of_day()),
            ),
            Field::MinuteOfHour => t.with_minute(value as i8)?,
            Field::MinuteOfDay => {
                t.wrapping_add_minutes(value - t.minute_of_day())
            }
            Field::HourOfAmPm => t.wrapping_add_hours(value - hour % 12),
            Field::ClockHourOfAmPm => {
                let value = if value == 12 { 0 } else { value };
                t.wrapping_add_hours(value - hour % 12)
            }
            Field::HourOfDay => t.with_hour(value as i8)?,
            Field::ClockHourOfDay => {
                t.with_hour(if value == 24 { 0 } else { value as i8 })?
            }
            Field::AmPmOfDay => t.wrapping_add_hours((value - hour / 12) * 12),
            _ => return Err(unsupported_field(field, "Time")),
        })
    }
}

impl Default for Time {
    fn default() -> Time {
        Time::MIDNIGHT
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_time(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Time {
    type Err = Error;

    fn from_str(string: &str) -> Result<Time, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_time(string)
    }
}

crate::temporal::impl_amount_ops!(Time);

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        let nod = i64::arbitrary(g).rem_euclid(NANOS_PER_DAY);
        // Favor "round" times now and then so that printing without seconds
        // or fractions gets exercised.
        let nod = match u8::arbitrary(g) % 4 {
            0 => nod / NANOS_PER_MINUTE * NANOS_PER_MINUTE,
            1 => nod / NANOS_PER_SECOND * NANOS_PER_SECOND,
            _ => nod,
        };
        Time::from_nanosecond_of_day_unchecked(nod)
    }
}
