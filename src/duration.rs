use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::{
    error::{util::ArithmeticError, Error},
    temporal::{unsupported_unit, Unit},
    util::common::{
        NANOS_PER_MILLI, NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR,
        SECONDS_PER_MINUTE,
    },
    Instant,
};

/// An exact amount of time, stored as seconds and nanoseconds.
///
/// A `Duration` can be positive, negative or zero. It is stored as a number
/// of whole seconds plus a nanosecond adjustment that is always in the range
/// `0..1_000_000_000`. That means the seconds are the floor of the exact
/// value, so `-0.5` seconds is stored as `-1` seconds plus `500,000,000`
/// nanoseconds.
///
/// Durations are exact. A duration of one day is always `86,400` seconds.
/// For calendar based amounts like "one month", use [`Period`](crate::Period)
/// instead.
///
/// # Example
///
/// ```
/// use calends::Duration;
///
/// let d = Duration::new(-1, 500_000_000)?;
/// assert_eq!(d.seconds(), -1);
/// assert_eq!(d.subsec_nanos(), 500_000_000);
/// assert_eq!(d.to_string(), "PT-0.5S");
///
/// let d = Duration::new(0, -1)?;
/// assert_eq!((d.seconds(), d.subsec_nanos()), (-1, 999_999_999));
///
/// let d: Duration = "PT1H30M".parse()?;
/// assert_eq!(d.to_minutes(), 90);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration {
    secs: i64,
    nanos: i32,
}

impl Duration {
    /// A duration of zero.
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };

    /// The smallest representable duration.
    pub const MIN: Duration = Duration { secs: i64::MIN, nanos: 0 };

    /// The largest representable duration.
    pub const MAX: Duration = Duration { secs: i64::MAX, nanos: 999_999_999 };

    /// Creates a duration from seconds and a nanosecond adjustment.
    ///
    /// The adjustment may be any value, including negative values and values
    /// of one second or more. It is carried into the seconds.
    ///
    /// # Errors
    ///
    /// This returns an error when the carry overflows the seconds.
    pub fn new(secs: i64, nanos_adjustment: i64) -> Result<Duration, Error> {
        let carry = nanos_adjustment.div_euclid(NANOS_PER_SECOND);
        let nanos = nanos_adjustment.rem_euclid(NANOS_PER_SECOND) as i32;
        let secs = secs
            .checked_add(carry)
            .ok_or_else(|| Error::overflow("duration seconds"))?;
        Ok(Duration { secs, nanos })
    }

    /// Creates a duration from whole seconds.
    #[inline]
    pub const fn from_secs(secs: i64) -> Duration {
        Duration { secs, nanos: 0 }
    }

    /// Creates a duration from milliseconds.
    pub const fn from_millis(millis: i64) -> Duration {
        Duration {
            secs: millis.div_euclid(1_000),
            nanos: (millis.rem_euclid(1_000) * NANOS_PER_MILLI) as i32,
        }
    }

    /// Creates a duration from microseconds.
    pub const fn from_micros(micros: i64) -> Duration {
        Duration {
            secs: micros.div_euclid(1_000_000),
            nanos: (micros.rem_euclid(1_000_000) * 1_000) as i32,
        }
    }

    /// Creates a duration from nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Duration {
        Duration {
            secs: nanos.div_euclid(NANOS_PER_SECOND),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        }
    }

    /// Creates a duration from minutes.
    ///
    /// # Errors
    ///
    /// This returns an error when the number of seconds overflows.
    pub fn from_minutes(minutes: i64) -> Result<Duration, Error> {
        Duration::from_scaled_secs(minutes, SECONDS_PER_MINUTE, "minutes")
    }

    /// Creates a duration from hours.
    pub fn from_hours(hours: i64) -> Result<Duration, Error> {
        Duration::from_scaled_secs(hours, SECONDS_PER_HOUR, "hours")
    }

    /// Creates a duration from days of exactly 24 hours.
    pub fn from_days(days: i64) -> Result<Duration, Error> {
        Duration::from_scaled_secs(days, SECONDS_PER_DAY, "days")
    }

    fn from_scaled_secs(
        amount: i64,
        per: i64,
        what: &'static str,
    ) -> Result<Duration, Error> {
        let secs =
            amount.checked_mul(per).ok_or_else(|| Error::overflow(what))?;
        Ok(Duration::from_secs(secs))
    }

    /// Creates a duration from an amount of the given unit.
    ///
    /// # Errors
    ///
    /// This returns an error when the unit has an estimated length (other
    /// than `Day`, which is treated as exactly 24 hours), or on overflow.
    ///
    /// ```
    /// use calends::{temporal::Unit, Duration};
    ///
    /// assert_eq!(Duration::of(3, Unit::HalfDay)?, Duration::from_hours(36)?);
    /// assert!(Duration::of(1, Unit::Month).unwrap_err().is_unsupported());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of(amount: i64, unit: Unit) -> Result<Duration, Error> {
        let per = unit
            .nanos()
            .ok_or_else(|| unsupported_unit(unit, "Duration"))?;
        Duration::from_nanos_i128(i128::from(amount) * i128::from(per))
    }

    /// Returns the duration from `start` to `end`. It is negative when `end`
    /// is before `start`.
    pub fn between(start: Instant, end: Instant) -> Duration {
        // OK because the difference between any two instants fits.
        Duration::from_nanos_i128(end.as_nanos_i128() - start.as_nanos_i128())
            .unwrap_or(Duration::MAX)
    }

    pub(crate) fn from_nanos_i128(nanos: i128) -> Result<Duration, Error> {
        let secs = nanos.div_euclid(i128::from(NANOS_PER_SECOND));
        let nanos = nanos.rem_euclid(i128::from(NANOS_PER_SECOND)) as i32;
        let secs = i64::try_from(secs)
            .map_err(|_| Error::overflow("duration seconds"))?;
        Ok(Duration { secs, nanos })
    }

    pub(crate) fn as_nanos_i128(self) -> i128 {
        i128::from(self.secs) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanos)
    }

    /// Returns the whole seconds, rounded toward negative infinity.
    #[inline]
    pub fn seconds(self) -> i64 {
        self.secs
    }

    /// Returns the nanosecond adjustment, always in `0..1_000_000_000`.
    #[inline]
    pub fn subsec_nanos(self) -> i32 {
        self.nanos
    }

    /// Returns true for a zero length duration.
    pub fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Returns true for a duration less than zero.
    pub fn is_negative(self) -> bool {
        self.secs < 0
    }

    /// Returns true for a duration greater than zero.
    pub fn is_positive(self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// Returns this duration with the seconds replaced.
    pub fn with_seconds(self, secs: i64) -> Duration {
        Duration { secs, ..self }
    }

    /// Returns this duration with the nanosecond adjustment replaced.
    ///
    /// # Errors
    ///
    /// This returns an error when `nanos` is not in `0..1_000_000_000`.
    pub fn with_nanos(self, nanos: i32) -> Result<Duration, Error> {
        if !(0..=999_999_999).contains(&nanos) {
            return Err(Error::range("nanos", nanos, 0, 999_999_999));
        }
        Ok(Duration { nanos, ..self })
    }

    /// Returns the number of whole days in [`Duration::seconds`], truncated
    /// toward zero. The nanosecond adjustment is not included.
    pub fn to_days(self) -> i64 {
        self.secs / SECONDS_PER_DAY
    }

    /// Returns the number of whole hours in the seconds, truncated toward
    /// zero.
    pub fn to_hours(self) -> i64 {
        self.secs / SECONDS_PER_HOUR
    }

    /// Returns the number of whole minutes in the seconds, truncated toward
    /// zero.
    pub fn to_minutes(self) -> i64 {
        self.secs / SECONDS_PER_MINUTE
    }

    /// Returns the seconds. This is the same as [`Duration::seconds`].
    pub fn to_secs(self) -> i64 {
        self.secs
    }

    /// Returns the total number of milliseconds, truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error when the result doesn't fit in an `i64`.
    pub fn to_millis(self) -> Result<i64, Error> {
        i64::try_from(self.as_nanos_i128() / i128::from(NANOS_PER_MILLI))
            .map_err(|_| Error::overflow("milliseconds"))
    }

    /// Returns the total number of nanoseconds.
    ///
    /// # Errors
    ///
    /// This returns an error when the result doesn't fit in an `i64`.
    pub fn to_nanos(self) -> Result<i64, Error> {
        i64::try_from(self.as_nanos_i128())
            .map_err(|_| Error::overflow("nanoseconds"))
    }

    /// Returns the number of whole days, the same as
    /// [`Duration::to_days`].
    pub fn to_days_part(self) -> i64 {
        self.to_days()
    }

    /// Returns the hours within the day, from `-23` to `23`.
    pub fn to_hours_part(self) -> i64 {
        self.to_hours() % 24
    }

    /// Returns the minutes within the hour, from `-59` to `59`.
    pub fn to_minutes_part(self) -> i64 {
        self.to_minutes() % 60
    }

    /// Returns the seconds within the minute, from `-59` to `59`.
    pub fn to_seconds_part(self) -> i64 {
        self.secs % 60
    }

    /// Returns the milliseconds within the second, from `0` to `999`.
    pub fn to_millis_part(self) -> i32 {
        self.nanos / NANOS_PER_MILLI as i32
    }

    /// Returns the nanoseconds within the second, from `0` to
    /// `999_999_999`.
    pub fn to_nanos_part(self) -> i32 {
        self.nanos
    }

    /// Adds two durations.
    ///
    /// # Errors
    ///
    /// This returns an error on overflow.
    pub fn checked_add(self, rhs: Duration) -> Result<Duration, Error> {
        let mut secs = self
            .secs
            .checked_add(rhs.secs)
            .ok_or_else(|| Error::overflow("duration"))?;
        let mut nanos = self.nanos + rhs.nanos;
        if nanos >= NANOS_PER_SECOND as i32 {
            nanos -= NANOS_PER_SECOND as i32;
            secs = secs
                .checked_add(1)
                .ok_or_else(|| Error::overflow("duration"))?;
        }
        Ok(Duration { secs, nanos })
    }

    /// Subtracts `rhs` from this duration.
    pub fn checked_sub(self, rhs: Duration) -> Result<Duration, Error> {
        Duration::from_nanos_i128(self.as_nanos_i128() - rhs.as_nanos_i128())
    }

    /// Multiplies this duration by a scalar.
    pub fn checked_mul(self, rhs: i64) -> Result<Duration, Error> {
        let nanos = self
            .as_nanos_i128()
            .checked_mul(i128::from(rhs))
            .ok_or_else(|| Error::overflow("duration"))?;
        Duration::from_nanos_i128(nanos)
    }

    /// Divides this duration by a scalar, truncating toward zero at
    /// nanosecond precision.
    ///
    /// # Errors
    ///
    /// This returns an error when dividing by zero or on overflow.
    ///
    /// ```
    /// use calends::Duration;
    ///
    /// let d = Duration::from_secs(-1).checked_div(3)?;
    /// assert_eq!(d.to_nanos()?, -333_333_333);
    /// assert!(Duration::ZERO.checked_div(0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_div(self, rhs: i64) -> Result<Duration, Error> {
        if rhs == 0 {
            return Err(Error::from(ArithmeticError::DivideByZero {
                what: "duration",
            }));
        }
        Duration::from_nanos_i128(self.as_nanos_i128() / i128::from(rhs))
    }

    /// Negates this duration.
    ///
    /// # Errors
    ///
    /// This returns an error when negating [`Duration::MIN`].
    pub fn checked_neg(self) -> Result<Duration, Error> {
        Duration::from_nanos_i128(-self.as_nanos_i128())
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Errors
    ///
    /// This returns an error for [`Duration::MIN`].
    pub fn checked_abs(self) -> Result<Duration, Error> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Panics
    ///
    /// This panics for [`Duration::MIN`].
    pub fn abs(self) -> Duration {
        self.checked_abs().expect("absolute value of duration overflowed")
    }

    /// Truncates this duration toward zero to a multiple of the unit.
    ///
    /// # Errors
    ///
    /// This returns an error for units larger than a day.
    ///
    /// ```
    /// use calends::{temporal::Unit, Duration};
    ///
    /// let d: Duration = "PT-1H-30M-15.5S".parse()?;
    /// assert_eq!(d.truncated_to(Unit::Minute)?.to_string(), "PT-1H-30M");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn truncated_to(self, unit: Unit) -> Result<Duration, Error> {
        let per = unit
            .nanos()
            .ok_or_else(|| unsupported_unit(unit, "truncation"))?;
        let per = i128::from(per);
        Duration::from_nanos_i128(self.as_nanos_i128() / per * per)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.checked_neg().expect("negating duration overflowed")
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).expect("adding durations overflowed")
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).expect("subtracting durations overflowed")
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Duration {
        self.checked_mul(rhs).expect("multiplying duration overflowed")
    }
}

impl Div<i64> for Duration {
    type Output = Duration;

    fn div(self, rhs: i64) -> Duration {
        self.checked_div(rhs).expect("dividing duration failed")
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(d: std::time::Duration) -> Result<Duration, Error> {
        let secs = i64::try_from(d.as_secs())
            .map_err(|_| Error::overflow("duration seconds"))?;
        Ok(Duration { secs, nanos: d.subsec_nanos() as i32 })
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = Error;

    fn try_from(d: Duration) -> Result<std::time::Duration, Error> {
        let secs = u64::try_from(d.secs).map_err(|_| {
            crate::error::err!("cannot convert negative duration {d} to std::time::Duration")
        })?;
        Ok(std::time::Duration::new(secs, d.nanos as u32))
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{duration::DEFAULT_PRINTER, StdFmtWrite};

        DEFAULT_PRINTER
            .print_duration(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        crate::fmt::duration::DEFAULT_PARSER.parse_duration(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        let secs = match u8::arbitrary(g) % 3 {
            0 => i64::arbitrary(g),
            _ => i64::from(i32::arbitrary(g)),
        };
        let nanos = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Duration { secs, nanos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        let d = Duration::new(-1, 500_000_000).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (-1, 500_000_000));
        let d = Duration::new(1, -1).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (0, 999_999_999));
        let d = Duration::new(3, 2_500_000_000).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (5, 500_000_000));
        assert!(Duration::new(i64::MAX, 1_000_000_000).unwrap_err().is_overflow());
        assert_eq!(Duration::from_millis(-1).subsec_nanos(), 999_000_000);
        assert_eq!(Duration::from_millis(-1).seconds(), -1);
    }

    #[test]
    fn conversions() {
        let d = Duration::new(-90_061, 1).unwrap();
        assert_eq!(d.to_days(), -1);
        assert_eq!(d.to_hours_part(), -1);
        assert_eq!(d.to_minutes_part(), -1);
        assert_eq!(d.to_seconds_part(), -1);
        assert_eq!(d.to_nanos().unwrap(), -90_060_999_999_999);
        assert_eq!(d.to_millis().unwrap(), -90_060_999);
        assert!(Duration::MAX.to_nanos().unwrap_err().is_overflow());
        assert_eq!(Duration::from_hours(2).unwrap().to_minutes(), 120);
        assert!(Duration::from_days(i64::MAX).is_err());
    }

    #[test]
    fn arithmetic() {
        let a = Duration::new(1, 600_000_000).unwrap();
        let b = Duration::new(0, 700_000_000).unwrap();
        assert_eq!(a + b, Duration::new(2, 300_000_000).unwrap());
        assert_eq!(b - a, Duration::new(-1, 100_000_000).unwrap());
        assert_eq!(a * -2, Duration::new(-4, 800_000_000).unwrap());
        assert_eq!(a / 2, Duration::new(0, 800_000_000).unwrap());
        assert!(Duration::MAX.checked_add(b).unwrap_err().is_overflow());
        assert!(Duration::MIN.checked_neg().is_err());
        assert!(Duration::ZERO.checked_div(0).unwrap_err().is_invalid_parameter());
        assert_eq!(Duration::from_secs(-5).abs(), Duration::from_secs(5));
        assert!(-Duration::from_secs(1) < Duration::ZERO);
    }

    #[test]
    fn truncation() {
        let d = Duration::new(-1, 500_000_000).unwrap();
        assert_eq!(d.truncated_to(Unit::Second).unwrap(), Duration::ZERO);
        let d = Duration::from_nanos(3_723_000_000_001);
        assert_eq!(d.truncated_to(Unit::Hour).unwrap(), Duration::from_secs(3_600));
        assert_eq!(d.truncated_to(Unit::Day).unwrap(), Duration::ZERO);
        assert!(d.truncated_to(Unit::Week).unwrap_err().is_unsupported());

        // Each component carries its own sign.
        let d: Duration = "PT-1H-30M-15.5S".parse().unwrap();
        insta::assert_snapshot!(d.truncated_to(Unit::Minute).unwrap(), @"PT-1H-30M");
        let d: Duration = "PT-1H30M15.5S".parse().unwrap();
        assert_eq!(d, Duration::new(-1_785, 500_000_000).unwrap());
        insta::assert_snapshot!(d.truncated_to(Unit::Minute).unwrap(), @"PT-29M");
    }

    #[test]
    fn std_duration() {
        let std = std::time::Duration::new(5, 7);
        let d = Duration::try_from(std).unwrap();
        assert_eq!(std::time::Duration::try_from(d).unwrap(), std);
        assert!(std::time::Duration::try_from(Duration::from_secs(-1)).is_err());
    }

    quickcheck::quickcheck! {
        fn prop_nanos_always_normalized(secs: i64, adjustment: i64) -> bool {
            match Duration::new(secs, adjustment) {
                Ok(d) => (0..1_000_000_000).contains(&d.subsec_nanos()),
                Err(_) => true,
            }
        }

        fn prop_display_parse_roundtrip(d: Duration) -> bool {
            d.to_string().parse::<Duration>().unwrap() == d
        }

        fn prop_neg_is_sub_from_zero(d: Duration) -> bool {
            match d.checked_neg() {
                Ok(neg) => Duration::ZERO.checked_sub(d).unwrap() == neg,
                Err(_) => d == Duration::MIN,
            }
        }
    }
}
