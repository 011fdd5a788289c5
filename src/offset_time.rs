use crate::{
    civil::{Date, Time},
    error::Error,
    temporal::{
        unsupported_field, unsupported_unit, Amount, Field, FieldAccess,
        FieldAdjust, Unit, ValueRange,
    },
    tz::Offset,
    util::common::NANOS_PER_SECOND,
    Clock, OffsetDateTime,
};

/// A civil time with a fixed offset from UTC, like `10:15:30+01:00`.
///
/// Arithmetic wraps around midnight and keeps the offset. The `Ord` impl
/// compares the times normalized to UTC first, and then the civil times.
/// Normalizing to UTC doesn't wrap, so a time whose offset change crosses
/// midnight is no longer equal to the original.
///
/// ```
/// use calends::{civil::time, tz::Offset, OffsetTime};
///
/// let t = OffsetTime::new(time(10, 0, 0, 0), Offset::constant(2));
/// let utc = t.with_offset_same_instant(Offset::UTC);
/// assert_eq!(utc.to_string(), "08:00Z");
/// assert!(utc.is_equal(t));
///
/// let t = OffsetTime::new(time(1, 0, 0, 0), Offset::constant(2));
/// let utc = t.with_offset_same_instant(Offset::UTC);
/// assert_eq!(utc.to_string(), "23:00Z");
/// assert!(utc.is_after(t));
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct OffsetTime {
    time: Time,
    offset: Offset,
}

impl OffsetTime {
    /// The earliest time of day in the largest offset.
    pub const MIN: OffsetTime = OffsetTime { time: Time::MIN, offset: Offset::MAX };

    /// The latest time of day in the smallest offset.
    pub const MAX: OffsetTime = OffsetTime { time: Time::MAX, offset: Offset::MIN };

    /// Pairs a civil time with an offset.
    pub const fn new(time: Time, offset: Offset) -> OffsetTime {
        OffsetTime { time, offset }
    }

    /// Returns the current time according to the given clock.
    pub fn now_with(clock: &Clock) -> OffsetTime {
        OffsetDateTime::now_with(clock).to_offset_time()
    }

    /// Returns the civil time.
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the offset.
    pub fn offset(self) -> Offset {
        self.offset
    }

    /// Returns the hour.
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute.
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second.
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional second in nanoseconds.
    pub fn subsec_nanosecond(self) -> i32 {
        self.time.subsec_nanosecond()
    }

    /// Returns the same instant with another offset, shifting the civil
    /// time and wrapping around midnight.
    pub fn with_offset_same_instant(self, offset: Offset) -> OffsetTime {
        let diff = i64::from(offset.seconds()) - i64::from(self.offset.seconds());
        OffsetTime { time: self.time.wrapping_add_seconds(diff), offset }
    }

    /// Returns the same civil time with another offset.
    pub fn with_offset_same_local(self, offset: Offset) -> OffsetTime {
        OffsetTime { offset, ..self }
    }

    /// Combines this with a date.
    pub fn at_date(self, date: Date) -> OffsetDateTime {
        OffsetDateTime::new(date.at(self.time), self.offset)
    }

    /// Adds an amount of time, wrapping around midnight.
    ///
    /// # Errors
    ///
    /// This returns an error for date based units and non-zero periods.
    pub fn checked_add<A: Into<Amount>>(self, amount: A) -> Result<OffsetTime, Error> {
        Ok(OffsetTime { time: self.time.checked_add(amount)?, ..self })
    }

    /// Subtracts an amount of time, wrapping around midnight.
    pub fn checked_sub<A: Into<Amount>>(self, amount: A) -> Result<OffsetTime, Error> {
        Ok(OffsetTime { time: self.time.checked_sub(amount)?, ..self })
    }

    /// Returns the number of whole units from this until `other`, truncated
    /// toward zero, after normalizing both to UTC.
    ///
    /// ```
    /// use calends::{temporal::Unit, OffsetTime};
    ///
    /// let a: OffsetTime = "10:00+01:00".parse()?;
    /// let b: OffsetTime = "10:00Z".parse()?;
    /// assert_eq!(a.until(b, Unit::Minute)?, 60);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(self, other: OffsetTime, unit: Unit) -> Result<i64, Error> {
        match unit.nanos() {
            Some(per) if unit.is_time_based() => {
                Ok((other.utc_nanos() - self.utc_nanos()) / per)
            }
            _ => Err(unsupported_unit(unit, "OffsetTime")),
        }
    }

    /// Truncates the time to the given unit.
    pub fn truncated_to(self, unit: Unit) -> Result<OffsetTime, Error> {
        Ok(OffsetTime { time: self.time.truncated_to(unit)?, ..self })
    }

    /// Returns true when this is before `other` after normalizing both to
    /// UTC.
    pub fn is_before(self, other: OffsetTime) -> bool {
        self.utc_nanos() < other.utc_nanos()
    }

    /// Returns true when this is after `other` after normalizing both to
    /// UTC.
    pub fn is_after(self, other: OffsetTime) -> bool {
        self.utc_nanos() > other.utc_nanos()
    }

    /// Returns true when both are the same time after normalizing to UTC.
    pub fn is_equal(self, other: OffsetTime) -> bool {
        self.utc_nanos() == other.utc_nanos()
    }

    /// Returns the nanosecond of the day minus the offset. This isn't
    /// wrapped, so it may be outside of a single day.
    fn utc_nanos(self) -> i64 {
        self.time.to_nanosecond_of_day()
            - i64::from(self.offset.seconds()) * NANOS_PER_SECOND
    }
}

impl FieldAccess for OffsetTime {
    fn is_supported(&self, field: Field) -> bool {
        field == Field::OffsetSeconds || self.time.is_supported(field)
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::OffsetSeconds => Ok(field.range()),
            _ => self.time.range(field),
        }
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::OffsetSeconds => Ok(i64::from(self.offset.seconds())),
            _ if self.time.is_supported(field) => self.time.get(field),
            _ => Err(unsupported_field(field, "OffsetTime")),
        }
    }
}

impl FieldAdjust for OffsetTime {
    fn with_field(&self, field: Field, value: i64) -> Result<OffsetTime, Error> {
        match field {
            Field::OffsetSeconds => {
                let seconds = field.check_valid_int_value(value)?;
                Ok(self.with_offset_same_local(Offset::new_seconds(seconds)?))
            }
            _ => Ok(OffsetTime { time: self.time.with_field(field, value)?, ..*self }),
        }
    }
}

impl Ord for OffsetTime {
    fn cmp(&self, rhs: &OffsetTime) -> core::cmp::Ordering {
        self.utc_nanos()
            .cmp(&rhs.utc_nanos())
            .then_with(|| self.time.cmp(&rhs.time))
    }
}

impl PartialOrd for OffsetTime {
    fn partial_cmp(&self, rhs: &OffsetTime) -> Option<core::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

impl core::fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_offset_time(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for OffsetTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for OffsetTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<OffsetTime, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_offset_time(string)
    }
}

crate::temporal::impl_amount_ops!(OffsetTime);

#[cfg(test)]
impl quickcheck::Arbitrary for OffsetTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> OffsetTime {
        OffsetTime::new(Time::arbitrary(g), Offset::arbitrary(g))
    }
}
