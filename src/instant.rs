use crate::{
    civil::DateTime,
    error::{err, Error},
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    tz::{Offset, TimeZone},
    util::common::{
        EPOCH_DAY_MAX, EPOCH_DAY_MIN, NANOS_PER_MILLI, NANOS_PER_SECOND,
        SECONDS_PER_DAY,
    },
    Duration, OffsetDateTime, Zoned,
};

/// The smallest number of seconds an `Instant` can represent.
///
/// The instant range is the civil datetime range shrunk by the largest
/// possible offset on both ends. This guarantees that converting any instant
/// to a civil datetime, in any offset, always succeeds.
pub(crate) const UNIX_SECONDS_MIN: i64 =
    EPOCH_DAY_MIN * SECONDS_PER_DAY + Offset::MAX_SECONDS as i64;
/// The largest number of seconds an `Instant` can represent.
pub(crate) const UNIX_SECONDS_MAX: i64 = EPOCH_DAY_MAX * SECONDS_PER_DAY
    + (SECONDS_PER_DAY - 1)
    - Offset::MAX_SECONDS as i64;

/// An instantaneous point on the time-line, with nanosecond precision.
///
/// An instant is a number of seconds since the Unix epoch
/// (`1970-01-01T00:00:00Z`) plus a fractional number of nanoseconds that is
/// always positive. It has no notion of a calendar or time zone. To get
/// human readable fields, convert it to a [`Zoned`] with
/// [`Instant::to_zoned`] or to an [`OffsetDateTime`] with
/// [`Instant::to_offset_datetime`].
///
/// Every day is treated as exactly 86,400 seconds long. Leap seconds are
/// not supported.
///
/// # Example
///
/// ```
/// use calends::{tz::TimeZone, Duration, Instant};
///
/// let instant: Instant = "2024-03-10T07:00:00Z".parse()?;
/// assert_eq!(instant.as_second(), 1_710_054_000);
///
/// let later = instant.checked_add(Duration::from_secs(90))?;
/// assert_eq!(later.to_string(), "2024-03-10T07:01:30Z");
///
/// let zdt = later.to_zoned(TimeZone::get("America/New_York")?);
/// assert_eq!(zdt.to_string(), "2024-03-10T03:01:30-04:00[America/New_York]");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    second: i64,
    nanosecond: i32,
}

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { second: 0, nanosecond: 0 };

    /// The smallest supported instant.
    pub const MIN: Instant = Instant { second: UNIX_SECONDS_MIN, nanosecond: 0 };

    /// The largest supported instant.
    pub const MAX: Instant =
        Instant { second: UNIX_SECONDS_MAX, nanosecond: 999_999_999 };

    /// Returns the current instant from the system clock.
    ///
    /// # Panics
    ///
    /// This panics when the system clock reports a time outside of the
    /// supported range, which no sane system clock does.
    pub fn now() -> Instant {
        Instant::try_from(std::time::SystemTime::now())
            .expect("system time is in the supported range")
    }

    /// Creates an instant from a number of seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// This returns an error when the seconds are out of range.
    pub fn from_second(second: i64) -> Result<Instant, Error> {
        Instant::from_second_and_nanos(second, 0)
    }

    /// Creates an instant from seconds since the Unix epoch plus a
    /// nanosecond adjustment, which may be negative or larger than a second.
    ///
    /// ```
    /// use calends::Instant;
    ///
    /// let instant = Instant::from_second_and_nanos(3, -1)?;
    /// assert_eq!(instant.as_second(), 2);
    /// assert_eq!(instant.subsec_nanosecond(), 999_999_999);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_second_and_nanos(
        second: i64,
        nanos_adjustment: i64,
    ) -> Result<Instant, Error> {
        let d = Duration::new(second, nanos_adjustment)?;
        Instant::from_duration_since_epoch(d)
    }

    /// Creates an instant from a number of milliseconds since the Unix
    /// epoch.
    pub fn from_millisecond(millisecond: i64) -> Result<Instant, Error> {
        Instant::from_duration_since_epoch(Duration::from_millis(millisecond))
    }

    /// Creates an instant from a number of nanoseconds since the Unix epoch.
    pub fn from_nanosecond(nanosecond: i128) -> Result<Instant, Error> {
        Instant::from_duration_since_epoch(Duration::from_nanos_i128(
            nanosecond,
        )?)
    }

    fn from_duration_since_epoch(d: Duration) -> Result<Instant, Error> {
        let (second, nanosecond) = (d.seconds(), d.subsec_nanos());
        if !(UNIX_SECONDS_MIN..=UNIX_SECONDS_MAX).contains(&second) {
            return Err(Error::range(
                "Unix seconds",
                second,
                UNIX_SECONDS_MIN,
                UNIX_SECONDS_MAX,
            ));
        }
        Ok(Instant { second, nanosecond })
    }

    /// Returns the whole number of seconds since the Unix epoch, rounded
    /// toward negative infinity.
    #[inline]
    pub fn as_second(self) -> i64 {
        self.second
    }

    /// Returns the nanoseconds past the second, in `0..1_000_000_000`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.nanosecond
    }

    /// Returns the number of milliseconds since the Unix epoch, rounded
    /// toward negative infinity.
    pub fn as_millisecond(self) -> i64 {
        // The instant range keeps this far away from overflowing.
        self.second * 1_000 + i64::from(self.nanosecond) / NANOS_PER_MILLI
    }

    /// Returns the number of nanoseconds since the Unix epoch.
    pub fn as_nanosecond(self) -> i128 {
        self.as_nanos_i128()
    }

    pub(crate) fn as_nanos_i128(self) -> i128 {
        i128::from(self.second) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanosecond)
    }

    /// Returns the duration since the Unix epoch.
    pub fn duration_since_epoch(self) -> Duration {
        Duration::from_secs(self.second)
            .with_nanos(self.nanosecond)
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the civil datetime of this instant in the given offset.
    pub(crate) fn to_datetime(self, offset: Offset) -> DateTime {
        // OK because the instant range is shrunk by the largest offset.
        DateTime::from_epoch_second(self.second, self.nanosecond, offset)
            .expect("instant is always representable as a civil datetime")
    }

    /// Returns the instant of a civil datetime in the given offset.
    pub(crate) fn from_datetime(
        dt: DateTime,
        offset: Offset,
    ) -> Result<Instant, Error> {
        Instant::from_second_and_nanos(
            dt.to_epoch_second(offset),
            i64::from(dt.subsec_nanosecond()),
        )
    }

    /// Converts this instant to a zoned datetime in the given time zone.
    pub fn to_zoned(self, tz: TimeZone) -> Zoned {
        Zoned::new(self, tz)
    }

    /// Converts this instant to a datetime with a fixed offset.
    pub fn to_offset_datetime(self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::from_instant(self, offset)
    }

    /// Adds an amount of time.
    ///
    /// Durations and units up to `Day` are supported, where a day is always
    /// 86,400 seconds. A [`Period`](crate::Period) is supported only when
    /// it has no years or months.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range or the amount
    /// isn't supported.
    pub fn checked_add<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<Instant, Error> {
        let nanos = match amount.into() {
            Amount::Duration(d) => d.as_nanos_i128(),
            Amount::Period(p) => {
                if p.years() != 0 || p.months() != 0 {
                    return Err(unsupported_unit(Unit::Month, "Instant"));
                }
                i128::from(p.days()) * i128::from(SECONDS_PER_DAY)
                    * i128::from(NANOS_PER_SECOND)
            }
            Amount::Units(amount, unit) => {
                let per = unit
                    .nanos()
                    .ok_or_else(|| unsupported_unit(unit, "Instant"))?;
                i128::from(amount) * i128::from(per)
            }
        };
        if nanos == 0 {
            return Ok(self);
        }
        let total = self
            .as_nanos_i128()
            .checked_add(nanos)
            .ok_or_else(|| Error::overflow("instant"))?;
        Instant::from_nanosecond(total)
            .map_err(|_| Error::overflow("instant"))
    }

    /// Subtracts an amount of time.
    pub fn checked_sub<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<Instant, Error> {
        self.checked_add(amount.into().checked_neg()?)
    }

    /// Returns the number of whole units from this instant until `other`,
    /// truncated toward zero. Units larger than a day are not supported.
    ///
    /// ```
    /// use calends::{temporal::Unit, Instant};
    ///
    /// let a = Instant::from_second(0)?;
    /// let b = Instant::from_second(-7_199)?;
    /// assert_eq!(a.until(b, Unit::Hour)?, -1);
    /// assert_eq!(a.until(b, Unit::Millisecond)?, -7_199_000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: Instant, unit: Unit) -> Result<i64, Error> {
        let per =
            unit.nanos().ok_or_else(|| unsupported_unit(unit, "Instant"))?;
        let diff = other.as_nanos_i128() - self.as_nanos_i128();
        i64::try_from(diff / i128::from(per))
            .map_err(|_| Error::overflow("instant difference"))
    }

    /// Truncates this instant to a multiple of the given unit since the
    /// start of its UTC day.
    ///
    /// ```
    /// use calends::{temporal::Unit, Instant};
    ///
    /// let instant: Instant = "1969-12-31T23:59:59.5Z".parse()?;
    /// assert_eq!(
    ///     instant.truncated_to(Unit::Minute)?.to_string(),
    ///     "1969-12-31T23:59:00Z",
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn truncated_to(self, unit: Unit) -> Result<Instant, Error> {
        let per =
            unit.nanos().ok_or_else(|| unsupported_unit(unit, "truncation"))?;
        let per = i128::from(per);
        let nanos = self.as_nanos_i128();
        Instant::from_nanosecond(nanos - nanos.rem_euclid(per))
    }

    /// Returns true when this instant is before `other`.
    pub fn is_before(self, other: Instant) -> bool {
        self < other
    }

    /// Returns true when this instant is after `other`.
    pub fn is_after(self, other: Instant) -> bool {
        self > other
    }
}

impl FieldAccess for Instant {
    fn is_supported(&self, field: Field) -> bool {
        matches!(
            field,
            Field::NanoOfSecond
                | Field::MicroOfSecond
                | Field::MilliOfSecond
                | Field::InstantSeconds
        )
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Instant"));
        }
        Ok(field.range())
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        let nanos = i64::from(self.nanosecond);
        Ok(match field {
            Field::NanoOfSecond => nanos,
            Field::MicroOfSecond => nanos / 1_000,
            Field::MilliOfSecond => nanos / NANOS_PER_MILLI,
            Field::InstantSeconds => self.second,
            _ => return Err(unsupported_field(field, "Instant")),
        })
    }
}

impl FieldAdjust for Instant {
    fn with_field(&self, field: Field, value: i64) -> Result<Instant, Error> {
        let nanos = match field {
            Field::NanoOfSecond => field.check_valid_value(value)?,
            Field::MicroOfSecond => field.check_valid_value(value)? * 1_000,
            Field::MilliOfSecond => {
                field.check_valid_value(value)? * NANOS_PER_MILLI
            }
            Field::InstantSeconds => {
                return Instant::from_second_and_nanos(
                    value,
                    i64::from(self.nanosecond),
                )
            }
            _ => return Err(unsupported_field(field, "Instant")),
        };
        Instant::from_second_and_nanos(self.second, nanos)
    }
}

impl TryFrom<std::time::SystemTime> for Instant {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant, Error> {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let nanos = match system_time.duration_since(unix_epoch) {
            Ok(duration) => i128::try_from(duration.as_nanos()),
            Err(err) => i128::try_from(err.duration().as_nanos()).map(|n| -n),
        }
        .map_err(|_| err!("system time is out of range"))?;
        Instant::from_nanosecond(nanos)
    }
}

impl From<Instant> for std::time::SystemTime {
    fn from(instant: Instant) -> std::time::SystemTime {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let abs = instant.as_nanos_i128().unsigned_abs();
        let duration = std::time::Duration::new(
            (abs / 1_000_000_000) as u64,
            (abs % 1_000_000_000) as u32,
        );
        // These are guaranteed to succeed because we assume that SystemTime
        // uses at least 64 bits for the time.
        if instant.second >= 0 {
            unix_epoch.checked_add(duration).expect("duration too big (positive)")
        } else {
            unix_epoch
                .checked_sub(duration)
                .expect("duration too big (negative)")
        }
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_instant(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Instant {
    type Err = Error;

    fn from_str(string: &str) -> Result<Instant, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_instant(string)
    }
}

crate::temporal::impl_amount_ops!(Instant);

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        let second = i64::arbitrary(g)
            .rem_euclid(UNIX_SECONDS_MAX - UNIX_SECONDS_MIN)
            + UNIX_SECONDS_MIN;
        let nanosecond = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Instant { second, nanosecond }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range() {
        assert!(Instant::from_second(UNIX_SECONDS_MAX).is_ok());
        assert!(Instant::from_second(UNIX_SECONDS_MAX + 1).unwrap_err().is_range());
        assert!(Instant::MAX.checked_add(Duration::from_nanos(1)).unwrap_err().is_overflow());
        assert!(Instant::MIN.checked_sub(Duration::from_nanos(1)).is_err());
        // The extremes are convertible in any offset.
        let _ = Instant::MIN.to_datetime(Offset::MIN);
        let _ = Instant::MAX.to_datetime(Offset::MAX);
    }

    #[test]
    fn millis() {
        let i = Instant::from_millisecond(-1).unwrap();
        assert_eq!((i.as_second(), i.subsec_nanosecond()), (-1, 999_000_000));
        assert_eq!(i.as_millisecond(), -1);
        assert_eq!(i.as_nanosecond(), -1_000_000);
    }

    #[test]
    fn arithmetic() {
        let i = Instant::from_second(1_000).unwrap();
        assert_eq!(i + Duration::from_secs(5), Instant::from_second(1_005).unwrap());
        assert_eq!(i.checked_add((1, Unit::Day)).unwrap().as_second(), 87_400);
        assert_eq!(i - crate::Period::from_days(1), Instant::from_second(1_000 - 86_400).unwrap());
        assert!(i.checked_add((1, Unit::Week)).unwrap_err().is_unsupported());
        assert!(i.checked_add(crate::Period::from_months(1)).unwrap_err().is_unsupported());
        let j = Instant::from_second_and_nanos(1_000, 1).unwrap();
        assert_eq!(i.until(j, Unit::Nanosecond).unwrap(), 1);
        assert_eq!(Duration::between(j, i), Duration::from_nanos(-1));
    }

    #[test]
    fn fields() {
        let i = Instant::from_second_and_nanos(5, 123_456_789).unwrap();
        assert_eq!(i.get(Field::MilliOfSecond).unwrap(), 123);
        assert_eq!(i.get(Field::MicroOfSecond).unwrap(), 123_456);
        assert_eq!(i.get(Field::InstantSeconds).unwrap(), 5);
        assert!(i.get(Field::HourOfDay).unwrap_err().is_unsupported());
        let i = i.with_field(Field::MilliOfSecond, 7).unwrap();
        assert_eq!(i.subsec_nanosecond(), 7_000_000);
        assert!(i.with_field(Field::MilliOfSecond, 1_000).unwrap_err().is_range());
    }

    #[test]
    fn system_time() {
        let i = Instant::from_second_and_nanos(-5, 1).unwrap();
        let st = std::time::SystemTime::from(i);
        assert_eq!(Instant::try_from(st).unwrap(), i);
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Instant::UNIX_EPOCH, @"1970-01-01T00:00:00Z");
        let i = Instant::from_second_and_nanos(-1, 500_000_000).unwrap();
        insta::assert_snapshot!(i, @"1969-12-31T23:59:59.500Z");
    }

    quickcheck::quickcheck! {
        fn prop_datetime_roundtrip(i: Instant) -> bool {
            let dt = i.to_datetime(Offset::constant(-5));
            Instant::from_datetime(dt, Offset::constant(-5)).unwrap() == i
        }
    }
}
