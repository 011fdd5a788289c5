use crate::{
    civil::{Date, DateTime, Time},
    error::Error,
    temporal::{
        unsupported_field, Amount, Field, FieldAccess, FieldAdjust, Unit,
        ValueRange,
    },
    tz::{Offset, TimeZone},
    Clock, Instant, OffsetTime, Zoned,
};

/// A civil datetime with a fixed offset from UTC.
///
/// Unlike [`Zoned`], an `OffsetDateTime` has no time zone rules, so
/// arithmetic always keeps the offset. It is the natural representation of
/// timestamps like `2024-03-05T10:15:30+01:00`.
///
/// # Ordering
///
/// The `Ord` impl compares the instants first and then the civil
/// datetimes, so two values for the same instant in different offsets are
/// ordered but not equal. Use [`OffsetDateTime::is_equal`] to compare
/// instants only.
///
/// # Example
///
/// ```
/// use calends::{civil::datetime, tz::Offset, OffsetDateTime};
///
/// let odt = OffsetDateTime::new(datetime(2024, 3, 5, 10, 15, 30, 0), Offset::constant(1));
/// assert_eq!(odt.to_string(), "2024-03-05T10:15:30+01:00");
///
/// let utc = odt.with_offset_same_instant(Offset::UTC)?;
/// assert_eq!(utc.to_string(), "2024-03-05T09:15:30Z");
/// assert!(utc.is_equal(odt));
/// assert_ne!(utc, odt);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct OffsetDateTime {
    dt: DateTime,
    offset: Offset,
}

impl OffsetDateTime {
    /// The earliest supported value, the minimum civil datetime in the
    /// largest offset.
    pub const MIN: OffsetDateTime =
        OffsetDateTime { dt: DateTime::MIN, offset: Offset::MAX };

    /// The latest supported value, the maximum civil datetime in the
    /// smallest offset.
    pub const MAX: OffsetDateTime =
        OffsetDateTime { dt: DateTime::MAX, offset: Offset::MIN };

    /// Pairs a civil datetime with an offset.
    pub const fn new(dt: DateTime, offset: Offset) -> OffsetDateTime {
        OffsetDateTime { dt, offset }
    }

    /// Returns the civil datetime of an instant in the given offset.
    pub fn from_instant(instant: Instant, offset: Offset) -> OffsetDateTime {
        OffsetDateTime { dt: instant.to_datetime(offset), offset }
    }

    /// Returns the current time in the system time zone's current offset.
    pub fn now() -> OffsetDateTime {
        OffsetDateTime::now_with(&Clock::system_default())
    }

    /// Returns the current time according to the given clock.
    pub fn now_with(clock: &Clock) -> OffsetDateTime {
        let instant = clock.instant();
        OffsetDateTime::from_instant(instant, clock.time_zone().to_offset(instant))
    }

    /// Returns the civil datetime.
    pub fn datetime(self) -> DateTime {
        self.dt
    }

    /// Returns the civil date.
    pub fn date(self) -> Date {
        self.dt.date()
    }

    /// Returns the civil time.
    pub fn time(self) -> Time {
        self.dt.time()
    }

    /// Returns the offset.
    pub fn offset(self) -> Offset {
        self.offset
    }

    /// Returns the number of seconds since the Unix epoch.
    pub fn to_epoch_second(self) -> i64 {
        self.dt.to_epoch_second(self.offset)
    }

    /// Returns the instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is outside the range
    /// supported by [`Instant`]. That can only happen within a day of
    /// [`OffsetDateTime::MIN`] or [`OffsetDateTime::MAX`].
    pub fn to_instant(self) -> Result<Instant, Error> {
        Instant::from_datetime(self.dt, self.offset)
    }

    /// Returns the same instant with another offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn with_offset_same_instant(
        self,
        offset: Offset,
    ) -> Result<OffsetDateTime, Error> {
        if offset == self.offset {
            return Ok(self);
        }
        let diff = i128::from(offset.seconds()) - i128::from(self.offset.seconds());
        let dt = self.dt.checked_add_nanos(diff * 1_000_000_000)?;
        Ok(OffsetDateTime { dt, offset })
    }

    /// Returns the same civil datetime with another offset.
    pub fn with_offset_same_local(self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime { dt: self.dt, offset }
    }

    /// Returns the same instant in the given time zone.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is out of range.
    pub fn to_zoned_same_instant(self, tz: TimeZone) -> Result<Zoned, Error> {
        Ok(Zoned::new(self.to_instant()?, tz))
    }

    /// Returns the same civil datetime in the given time zone, keeping the
    /// offset if it is valid there.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn to_zoned_same_local(self, tz: TimeZone) -> Result<Zoned, Error> {
        Zoned::from_local_preferring(self.dt, tz, self.offset)
    }

    /// Returns the time and offset without the date.
    pub fn to_offset_time(self) -> OffsetTime {
        OffsetTime::new(self.dt.time(), self.offset)
    }

    /// Adds an amount of time to the civil datetime, keeping the offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range or the unit is
    /// `Forever`.
    pub fn checked_add<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { dt: self.dt.checked_add(amount)?, ..self })
    }

    /// Subtracts an amount of time from the civil datetime, keeping the
    /// offset.
    pub fn checked_sub<A: Into<Amount>>(
        self,
        amount: A,
    ) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { dt: self.dt.checked_sub(amount)?, ..self })
    }

    /// Returns the number of whole units from this until `other`, truncated
    /// toward zero. `other` is first converted to this offset.
    ///
    /// ```
    /// use calends::{temporal::Unit, OffsetDateTime};
    ///
    /// let a: OffsetDateTime = "2024-03-05T10:00+01:00".parse()?;
    /// let b: OffsetDateTime = "2024-03-06T09:59Z".parse()?;
    /// assert_eq!(a.until(b, Unit::Day)?, 1);
    /// assert_eq!(a.until(b, Unit::Hour)?, 24);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: OffsetDateTime, unit: Unit) -> Result<i64, Error> {
        let end = other.with_offset_same_instant(self.offset)?;
        self.dt.until(end.dt, unit)
    }

    /// Truncates the time to the given unit.
    pub fn truncated_to(self, unit: Unit) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { dt: self.dt.truncated_to(unit)?, ..self })
    }

    /// Returns true when this is before `other` on the instant timeline.
    pub fn is_before(self, other: OffsetDateTime) -> bool {
        self.instant_key() < other.instant_key()
    }

    /// Returns true when this is after `other` on the instant timeline.
    pub fn is_after(self, other: OffsetDateTime) -> bool {
        self.instant_key() > other.instant_key()
    }

    /// Returns true when this is the same instant as `other`.
    pub fn is_equal(self, other: OffsetDateTime) -> bool {
        self.instant_key() == other.instant_key()
    }

    fn instant_key(self) -> (i64, i32) {
        (self.to_epoch_second(), self.dt.subsec_nanosecond())
    }
}

impl FieldAccess for OffsetDateTime {
    fn is_supported(&self, field: Field) -> bool {
        matches!(field, Field::InstantSeconds | Field::OffsetSeconds)
            || self.dt.is_supported(field)
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::InstantSeconds | Field::OffsetSeconds => Ok(field.range()),
            _ => self.dt.range(field),
        }
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::InstantSeconds => Ok(self.to_epoch_second()),
            Field::OffsetSeconds => Ok(i64::from(self.offset.seconds())),
            _ if self.dt.is_supported(field) => self.dt.get(field),
            _ => Err(unsupported_field(field, "OffsetDateTime")),
        }
    }
}

impl FieldAdjust for OffsetDateTime {
    fn with_field(&self, field: Field, value: i64) -> Result<OffsetDateTime, Error> {
        match field {
            Field::InstantSeconds => {
                let dt = DateTime::from_epoch_second(
                    value,
                    self.dt.subsec_nanosecond(),
                    self.offset,
                )?;
                Ok(OffsetDateTime { dt, ..*self })
            }
            Field::OffsetSeconds => {
                let seconds = field.check_valid_int_value(value)?;
                Ok(self.with_offset_same_local(Offset::new_seconds(seconds)?))
            }
            _ => Ok(OffsetDateTime { dt: self.dt.with_field(field, value)?, ..*self }),
        }
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, rhs: &OffsetDateTime) -> core::cmp::Ordering {
        self.instant_key()
            .cmp(&rhs.instant_key())
            .then_with(|| self.dt.cmp(&rhs.dt))
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, rhs: &OffsetDateTime) -> Option<core::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

impl core::fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_offset_datetime(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<OffsetDateTime, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER
            .parse_offset_datetime(string)
    }
}

impl From<Zoned> for OffsetDateTime {
    fn from(zdt: Zoned) -> OffsetDateTime {
        zdt.to_offset_datetime()
    }
}

crate::temporal::impl_amount_ops!(OffsetDateTime);

#[cfg(test)]
impl quickcheck::Arbitrary for OffsetDateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> OffsetDateTime {
        OffsetDateTime::new(DateTime::arbitrary(g), Offset::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, datetime},
        Duration, Period,
    };

    use super::*;

    #[test]
    fn ordering() {
        let a = OffsetDateTime::new(datetime(2024, 1, 1, 10, 0, 0, 0), Offset::constant(1));
        let b = OffsetDateTime::new(datetime(2024, 1, 1, 9, 0, 0, 0), Offset::UTC);
        assert!(a.is_equal(b));
        assert_ne!(a, b);
        // Same instant, so the civil datetime breaks the tie.
        assert!(b < a);
        let c = OffsetDateTime::new(datetime(2024, 1, 1, 9, 30, 0, 0), Offset::constant(1));
        assert!(c.is_before(b));
        assert!(c < b);
        let mut all = vec![a, b, c];
        all.sort();
        assert_eq!(all, vec![c, b, a]);
    }

    #[test]
    fn offsets() {
        let odt = OffsetDateTime::new(datetime(2024, 1, 1, 0, 30, 0, 0), Offset::constant(1));
        let shifted = odt.with_offset_same_instant(Offset::constant(-5)).unwrap();
        insta::assert_snapshot!(shifted, @"2023-12-31T18:30-05:00");
        let same = odt.with_offset_same_local(Offset::constant(-5));
        insta::assert_snapshot!(same, @"2024-01-01T00:30-05:00");
        assert_eq!(odt.to_instant().unwrap(), "2023-12-31T23:30:00Z".parse().unwrap());
        assert!(OffsetDateTime::MIN.to_instant().is_err());
        assert!(OffsetDateTime::MAX.to_instant().is_err());
        assert_eq!(
            OffsetDateTime::from_instant(Instant::UNIX_EPOCH, Offset::constant(-1)).datetime(),
            datetime(1969, 12, 31, 23, 0, 0, 0),
        );
    }

    #[test]
    fn zones() {
        let tz = TimeZone::get("Europe/London").unwrap();
        let odt = OffsetDateTime::new(datetime(2024, 7, 1, 12, 0, 0, 0), Offset::UTC);
        insta::assert_snapshot!(
            odt.to_zoned_same_instant(tz.clone()).unwrap(),
            @"2024-07-01T13:00+01:00[Europe/London]",
        );
        insta::assert_snapshot!(
            odt.to_zoned_same_local(tz).unwrap(),
            @"2024-07-01T12:00+01:00[Europe/London]",
        );
        assert_eq!(odt.to_offset_time().to_string(), "12:00Z");
    }

    #[test]
    fn arithmetic() {
        let odt = OffsetDateTime::new(datetime(2024, 1, 31, 23, 0, 0, 0), Offset::constant(2));
        assert_eq!(
            odt + Period::from_months(1),
            OffsetDateTime::new(datetime(2024, 2, 29, 23, 0, 0, 0), Offset::constant(2)),
        );
        assert_eq!(
            (odt + Duration::from_secs(3_600)).date(),
            date(2024, 2, 1),
        );
        assert_eq!(odt.truncated_to(Unit::Hour).unwrap(), odt);
    }

    #[test]
    fn fields() {
        let odt: OffsetDateTime = "1970-01-01T01:00:00.5+01:00".parse().unwrap();
        assert_eq!(odt.get(Field::InstantSeconds).unwrap(), 0);
        assert_eq!(odt.get(Field::OffsetSeconds).unwrap(), 3_600);
        assert_eq!(odt.get(Field::MilliOfSecond).unwrap(), 500);
        let odt = odt.with_field(Field::InstantSeconds, 60).unwrap();
        insta::assert_snapshot!(odt, @"1970-01-01T01:01:00.500+01:00");
        let odt = odt.with_field(Field::OffsetSeconds, -3_600).unwrap();
        insta::assert_snapshot!(odt, @"1970-01-01T01:01:00.500-01:00");
        assert!(odt.with_field(Field::OffsetSeconds, 100_000).unwrap_err().is_range());
    }

    quickcheck::quickcheck! {
        fn prop_display_parse_roundtrip(odt: OffsetDateTime) -> bool {
            odt.to_string().parse::<OffsetDateTime>().unwrap() == odt
        }

        fn prop_order_consistent_with_instants(a: OffsetDateTime, b: OffsetDateTime) -> bool {
            if a.is_before(b) { a < b } else { true }
        }
    }
}
