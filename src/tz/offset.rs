use core::ops::Neg;

use crate::{
    civil::DateTime,
    error::{tz::Error as TzError, Error},
    temporal::{unsupported_field, Field, FieldAccess, ValueRange},
    Duration, Instant,
};

/// A fixed time zone offset from UTC, in seconds.
///
/// Negative offsets correspond to time zones west of the prime meridian,
/// while positive offsets correspond to time zones east of the prime
/// meridian. Equivalently, in all cases, `civil-time - offset = UTC`.
///
/// Offsets are limited to `-18:00..=+18:00`.
///
/// # Display format
///
/// A zero offset prints as `Z`. Other offsets print as `±HH:MM`, with a
/// `:SS` suffix only when the seconds are non-zero.
///
/// ```
/// use calends::tz::Offset;
///
/// assert_eq!(Offset::UTC.to_string(), "Z");
/// assert_eq!(Offset::constant(-5).to_string(), "-05:00");
/// assert_eq!(Offset::constant_seconds(-18_062).to_string(), "-05:01:02");
/// assert_eq!(Offset::from_hms(5, 30, 0)?.to_string(), "+05:30");
///
/// let o: Offset = "+0130".parse()?;
/// assert_eq!(o.seconds(), 5_400);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    pub(crate) const MAX_SECONDS: i32 = 18 * 60 * 60;

    /// The smallest possible offset, `-18:00`.
    pub const MIN: Offset = Offset { seconds: -Offset::MAX_SECONDS };

    /// The largest possible offset, `+18:00`.
    pub const MAX: Offset = Offset { seconds: Offset::MAX_SECONDS };

    /// The offset of UTC.
    pub const UTC: Offset = Offset::ZERO;

    /// The zero offset. This is the same value as [`Offset::UTC`].
    pub const ZERO: Offset = Offset { seconds: 0 };

    /// Creates an offset from a number of hours in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when `hours` is not in `-18..=18`.
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        if hours < -18 || hours > 18 {
            panic!("invalid time zone offset hours")
        }
        Offset { seconds: hours as i32 * 60 * 60 }
    }

    /// Creates an offset from a number of seconds in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when `seconds` is not in `-64_800..=64_800`.
    #[inline]
    pub const fn constant_seconds(seconds: i32) -> Offset {
        if seconds < -Offset::MAX_SECONDS || seconds > Offset::MAX_SECONDS {
            panic!("invalid time zone offset seconds")
        }
        Offset { seconds }
    }

    /// Creates an offset from a number of hours.
    ///
    /// # Errors
    ///
    /// This returns an error when `hours` is not in `-18..=18`.
    pub fn new(hours: i8) -> Result<Offset, Error> {
        if !(-18..=18).contains(&hours) {
            return Err(Error::range("offset hours", hours, -18, 18));
        }
        Ok(Offset::constant(hours))
    }

    /// Creates an offset from a number of seconds.
    ///
    /// # Errors
    ///
    /// This returns an error when `seconds` is not in `-64_800..=64_800`.
    pub fn new_seconds(seconds: i32) -> Result<Offset, Error> {
        let max = Offset::MAX_SECONDS;
        if !(-max..=max).contains(&seconds) {
            return Err(Error::range("offset seconds", seconds, -max, max));
        }
        Ok(Offset { seconds })
    }

    /// Creates an offset from hours, minutes and seconds.
    ///
    /// All non-zero components must have the same sign.
    ///
    /// ```
    /// use calends::tz::Offset;
    ///
    /// assert_eq!(Offset::from_hms(-5, -30, 0)?.seconds(), -19_800);
    /// assert!(Offset::from_hms(-5, 30, 0).is_err());
    /// assert!(Offset::from_hms(18, 0, 1).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_hms(
        hours: i8,
        minutes: i8,
        seconds: i8,
    ) -> Result<Offset, Error> {
        if !(-59..=59).contains(&minutes) {
            return Err(Error::range("offset minutes", minutes, -59, 59));
        }
        if !(-59..=59).contains(&seconds) {
            return Err(Error::range("offset seconds", seconds, -59, 59));
        }
        let signs = [hours.signum(), minutes.signum(), seconds.signum()];
        if signs.contains(&1) && signs.contains(&-1) {
            return Err(Error::from(TzError::InvalidOffsetSigns {
                hours,
                minutes,
                seconds,
            }));
        }
        Offset::new_seconds(
            i32::from(hours) * 3_600
                + i32::from(minutes) * 60
                + i32::from(seconds),
        )
    }

    /// Returns the total number of seconds in this offset.
    #[inline]
    pub fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the hours component, truncated toward zero.
    pub fn hours_part(self) -> i8 {
        (self.seconds / 3_600) as i8
    }

    /// Returns the minutes component, from `-59` to `59`.
    pub fn minutes_part(self) -> i8 {
        (self.seconds / 60 % 60) as i8
    }

    /// Returns the seconds component, from `-59` to `59`.
    pub fn seconds_part(self) -> i8 {
        (self.seconds % 60) as i8
    }

    /// Returns the negation of this offset.
    pub fn negate(self) -> Offset {
        Offset { seconds: -self.seconds }
    }

    /// Returns true when this offset is west of UTC.
    pub fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Returns the exact duration of this offset.
    pub fn to_duration(self) -> Duration {
        Duration::from_secs(i64::from(self.seconds))
    }

    /// Returns the duration from `other` to this offset. It is positive
    /// when this offset is further east.
    pub fn duration_since(self, other: Offset) -> Duration {
        Duration::from_secs(i64::from(self.seconds - other.seconds))
    }

    /// Converts an instant to a civil datetime in this offset.
    ///
    /// ```
    /// use calends::{civil::DateTime, tz::Offset, Instant};
    ///
    /// assert_eq!(
    ///     Offset::constant(-8).to_datetime(Instant::UNIX_EPOCH),
    ///     DateTime::constant(1969, 12, 31, 16, 0, 0, 0),
    /// );
    /// ```
    #[inline]
    pub fn to_datetime(self, instant: Instant) -> DateTime {
        instant.to_datetime(self)
    }

    /// Converts a civil datetime in this offset to an instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the datetime is too close to the limits of
    /// the supported range to be represented as an instant.
    #[inline]
    pub fn to_instant(self, dt: DateTime) -> Result<Instant, Error> {
        Instant::from_datetime(dt, self)
    }
}

impl FieldAccess for Offset {
    fn is_supported(&self, field: Field) -> bool {
        field == Field::OffsetSeconds
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Offset"));
        }
        Ok(field.range())
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        if !self.is_supported(field) {
            return Err(unsupported_field(field, "Offset"));
        }
        Ok(i64::from(self.seconds))
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "" };
        write!(
            f,
            "Offset({sign}{:02}:{:02}:{:02})",
            self.hours_part().unsigned_abs(),
            self.minutes_part().unsigned_abs(),
            self.seconds_part().unsigned_abs(),
        )
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{offset::DEFAULT_PRINTER, StdFmtWrite};

        DEFAULT_PRINTER
            .print_offset(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Offset {
    type Err = Error;

    fn from_str(string: &str) -> Result<Offset, Error> {
        crate::fmt::offset::DEFAULT_PARSER.parse_offset(string)
    }
}

/// Negate this offset.
///
/// This never panics.
impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        self.negate()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Offset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Offset {
        let seconds = i32::arbitrary(g)
            .rem_euclid(2 * Offset::MAX_SECONDS + 1)
            - Offset::MAX_SECONDS;
        Offset { seconds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let o = Offset::constant_seconds(-18_062);
        assert_eq!((o.hours_part(), o.minutes_part(), o.seconds_part()), (-5, -1, -2));
        insta::assert_snapshot!(format!("{o:?}"), @"Offset(-05:01:02)");
        insta::assert_snapshot!(format!("{:?}", Offset::constant(9)), @"Offset(09:00:00)");
    }

    #[test]
    fn bounds() {
        assert!(Offset::new(19).unwrap_err().is_range());
        assert!(Offset::new_seconds(64_801).unwrap_err().is_range());
        assert_eq!(Offset::new_seconds(-64_800).unwrap(), Offset::MIN);
        insta::assert_snapshot!(
            Offset::from_hms(1, -1, 0).unwrap_err(),
            @"zone offset parts 1h -1m 0s must all have the same sign",
        );
    }

    #[test]
    fn fields() {
        let o = Offset::constant(2);
        assert_eq!(o.get(Field::OffsetSeconds).unwrap(), 7_200);
        assert!(o.get(Field::HourOfDay).unwrap_err().is_unsupported());
        assert_eq!(o.range(Field::OffsetSeconds).unwrap().maximum(), 64_800);
    }

    #[test]
    fn ordering() {
        assert!(Offset::constant(-1) < Offset::UTC);
        assert_eq!(-Offset::constant(3), Offset::constant(-3));
        assert_eq!(
            Offset::constant(2).duration_since(Offset::constant(1)),
            Duration::from_secs(3_600),
        );
    }
}
