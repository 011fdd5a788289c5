use crate::{
    civil::{Date, DateTime, Time, Weekday},
    error::{
        tz::{AmbiguousError, Error as TzError},
        Error,
    },
    temporal::{
        unsupported_field, Amount, Field, FieldAccess, FieldAdjust, Unit,
        ValueRange,
    },
    tz::{AmbiguousOffset, Disambiguation, Offset, TimeZone},
    Clock, Instant, OffsetDateTime,
};

/// A precise instant in a particular time zone.
///
/// A `Zoned` is an [`Instant`] together with a [`TimeZone`], along with the
/// civil datetime and offset that the instant corresponds to in that time
/// zone. The offset is always valid for the time zone at that civil
/// datetime.
///
/// # Arithmetic
///
/// Adding a [`Period`](crate::Period) or a date based unit (days and
/// larger) operates on the civil datetime, and the result is resolved in
/// the time zone while keeping the current offset if it is still valid.
/// So adding one day across a daylight saving time transition keeps the
/// wall clock time. Adding a [`Duration`](crate::Duration) or a time based
/// unit operates on the instant, so 24 hours across the same transition
/// changes the wall clock time.
///
/// ```
/// use calends::{civil::datetime, temporal::Unit, tz::TimeZone, Duration};
///
/// let tz = TimeZone::get("America/New_York")?;
/// let zdt = datetime(2024, 3, 9, 12, 0, 0, 0).to_zoned(tz)?;
/// assert_eq!(
///     zdt.checked_add((1, Unit::Day))?.to_string(),
///     "2024-03-10T12:00-04:00[America/New_York]",
/// );
/// assert_eq!(
///     zdt.checked_add(Duration::from_hours(24)?)?.to_string(),
///     "2024-03-10T13:00-04:00[America/New_York]",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Comparisons
///
/// The `Ord` impl compares instants first, then civil datetimes, then time
/// zone identifiers. Use [`Zoned::is_equal`] to compare instants only.
#[derive(Clone)]
pub struct Zoned {
    instant: Instant,
    datetime: DateTime,
    offset: Offset,
    tz: TimeZone,
}

impl Zoned {
    /// Creates a zoned datetime from an instant and a time zone.
    ///
    /// This never fails, since every instant has a civil datetime in every
    /// offset.
    pub fn new(instant: Instant, tz: TimeZone) -> Zoned {
        let offset = tz.to_offset(instant);
        let datetime = instant.to_datetime(offset);
        Zoned { instant, datetime, offset, tz }
    }

    /// Returns the current time in the system time zone.
    ///
    /// # Panics
    ///
    /// This panics when the system clock is out of range.
    pub fn now() -> Zoned {
        Zoned::now_with(&Clock::system_default())
    }

    /// Returns the current time according to the given clock.
    pub fn now_with(clock: &Clock) -> Zoned {
        Zoned::new(clock.instant(), clock.time_zone().clone())
    }

    /// Resolves a civil datetime in a time zone with
    /// [`Disambiguation::Compatible`].
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn from_local(dt: DateTime, tz: TimeZone) -> Result<Zoned, Error> {
        Zoned::from_local_with(dt, tz, Disambiguation::Compatible)
    }

    /// Resolves a civil datetime in a time zone with the given policy.
    ///
    /// # Errors
    ///
    /// This returns an error when the policy rejects the civil datetime or
    /// when the result is out of range.
    pub fn from_local_with(
        dt: DateTime,
        tz: TimeZone,
        disambiguation: Disambiguation,
    ) -> Result<Zoned, Error> {
        tz.to_ambiguous_zoned(dt).disambiguate(disambiguation)
    }

    /// Resolves a civil datetime in a time zone, using `preferred` when it
    /// is one of the two valid offsets of a fold.
    ///
    /// Otherwise this behaves like [`Zoned::from_local`]: a fold without
    /// the preferred offset picks the earlier instant and a gap shifts the
    /// civil datetime forward.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::{Offset, TimeZone}, Zoned};
    ///
    /// let tz = TimeZone::get("America/New_York")?;
    /// let dt = datetime(2024, 11, 3, 1, 30, 0, 0);
    /// let zdt = Zoned::from_local_preferring(dt, tz.clone(), Offset::constant(-5))?;
    /// assert_eq!(zdt.offset(), Offset::constant(-5));
    /// let zdt = Zoned::from_local_preferring(dt, tz, Offset::constant(3))?;
    /// assert_eq!(zdt.offset(), Offset::constant(-4));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_local_preferring(
        dt: DateTime,
        tz: TimeZone,
        preferred: Offset,
    ) -> Result<Zoned, Error> {
        let offset = match tz.to_ambiguous_offset(dt) {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Fold { after, .. } if after == preferred => after,
            AmbiguousOffset::Fold { before, .. } => before,
            AmbiguousOffset::Gap { before, .. } => before,
        };
        let instant = Instant::from_datetime(dt, offset)?;
        Ok(Zoned::new(instant, tz))
    }

    /// Creates a zoned datetime from all of its parts, checking that the
    /// offset is valid for the civil datetime in the time zone.
    ///
    /// # Errors
    ///
    /// This returns an error when the civil datetime is in a gap, when the
    /// offset isn't valid, or when the result is out of range.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::{Offset, TimeZone}, Zoned};
    ///
    /// let tz = TimeZone::get("Europe/Paris")?;
    /// let dt = datetime(2024, 7, 1, 12, 0, 0, 0);
    /// assert!(Zoned::from_strict(dt, Offset::constant(2), tz.clone()).is_ok());
    /// assert!(Zoned::from_strict(dt, Offset::constant(1), tz).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_strict(
        dt: DateTime,
        offset: Offset,
        tz: TimeZone,
    ) -> Result<Zoned, Error> {
        match tz.to_ambiguous_offset(dt) {
            AmbiguousOffset::Gap { before, after } => {
                return Err(Error::from(AmbiguousError::BecauseGap {
                    dt,
                    before,
                    after,
                    zone: tz.id().into(),
                }));
            }
            ambiguous if !ambiguous.is_valid(offset) => {
                return Err(Error::from(TzError::InvalidOffsetForZone {
                    dt,
                    offset,
                    zone: tz.id().into(),
                }));
            }
            _ => {}
        }
        let instant = Instant::from_datetime(dt, offset)?;
        Ok(Zoned { instant, datetime: dt, offset, tz })
    }

    /// Returns the first instant of the given date in the time zone.
    ///
    /// This is usually midnight. When midnight falls into a gap, it is the
    /// first civil datetime after the gap.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn start_of_day(date: Date, tz: TimeZone) -> Result<Zoned, Error> {
        let dt = date.at_start_of_day();
        let rules = tz.rules();
        let offset = match rules.offset_for_local(dt) {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Fold { before, .. } => before,
            AmbiguousOffset::Gap { before, .. } => {
                match rules.transition(dt) {
                    Some(trans) => return Ok(Zoned::new(trans.instant(), tz)),
                    None => before,
                }
            }
        };
        let instant = Instant::from_datetime(dt, offset)?;
        Ok(Zoned::new(instant, tz))
    }

    /// Returns the instant.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns the civil datetime.
    pub fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// Returns the civil date.
    pub fn date(&self) -> Date {
        self.datetime.date()
    }

    /// Returns the civil time.
    pub fn time(&self) -> Time {
        self.datetime.time()
    }

    /// Returns the offset from UTC.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns the time zone.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    /// Returns the month.
    pub fn month(&self) -> i8 {
        self.datetime.month()
    }

    /// Returns the day of the month.
    pub fn day(&self) -> i8 {
        self.datetime.day()
    }

    /// Returns the hour.
    pub fn hour(&self) -> i8 {
        self.datetime.hour()
    }

    /// Returns the minute.
    pub fn minute(&self) -> i8 {
        self.datetime.minute()
    }

    /// Returns the second.
    pub fn second(&self) -> i8 {
        self.datetime.second()
    }

    /// Returns the fractional second in nanoseconds.
    pub fn subsec_nanosecond(&self) -> i32 {
        self.datetime.subsec_nanosecond()
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.date().weekday()
    }

    /// Returns the day of the year.
    pub fn day_of_year(&self) -> i16 {
        self.date().day_of_year()
    }

    /// When this is in a fold, returns the same civil datetime with the
    /// earlier of its two offsets. Otherwise returns a copy.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::{Disambiguation, TimeZone}};
    ///
    /// let tz = TimeZone::get("Europe/London")?;
    /// let dt = datetime(2024, 10, 27, 1, 30, 0, 0);
    /// let later = dt.to_zoned_with(tz, Disambiguation::Later)?;
    /// assert_eq!(later.to_string(), "2024-10-27T01:30Z[Europe/London]");
    /// let earlier = later.with_earlier_offset_at_overlap();
    /// assert_eq!(earlier.to_string(), "2024-10-27T01:30+01:00[Europe/London]");
    /// assert_eq!(earlier.with_later_offset_at_overlap(), later);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_earlier_offset_at_overlap(&self) -> Zoned {
        match self.tz.to_ambiguous_offset(self.datetime) {
            AmbiguousOffset::Fold { before, .. } => self.with_offset(before),
            _ => self.clone(),
        }
    }

    /// When this is in a fold, returns the same civil datetime with the
    /// later of its two offsets. Otherwise returns a copy.
    pub fn with_later_offset_at_overlap(&self) -> Zoned {
        match self.tz.to_ambiguous_offset(self.datetime) {
            AmbiguousOffset::Fold { after, .. } => self.with_offset(after),
            _ => self.clone(),
        }
    }

    /// Returns the same instant in another time zone.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::TimeZone};
    ///
    /// let zdt = datetime(2024, 7, 15, 21, 27, 0, 0)
    ///     .to_zoned(TimeZone::get("America/New_York")?)?;
    /// let zdt = zdt.with_time_zone_same_instant(TimeZone::get("Asia/Tokyo")?);
    /// assert_eq!(zdt.to_string(), "2024-07-16T10:27+09:00[Asia/Tokyo]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_time_zone_same_instant(&self, tz: TimeZone) -> Zoned {
        Zoned::new(self.instant, tz)
    }

    /// Returns the same civil datetime in another time zone, keeping the
    /// current offset if it is valid there.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn with_time_zone_same_local(&self, tz: TimeZone) -> Result<Zoned, Error> {
        Zoned::from_local_preferring(self.datetime, tz, self.offset)
    }

    /// Returns the same instant in a fixed offset time zone with the
    /// current offset.
    pub fn with_fixed_offset_zone(&self) -> Zoned {
        Zoned {
            instant: self.instant,
            datetime: self.datetime,
            offset: self.offset,
            tz: TimeZone::fixed(self.offset),
        }
    }

    /// Returns this with the date changed, resolved in the time zone while
    /// keeping the offset if possible.
    pub fn with_date(&self, date: Date) -> Result<Zoned, Error> {
        self.resolve_local(self.datetime.with_date(date))
    }

    /// Returns this with the time changed, resolved in the time zone while
    /// keeping the offset if possible.
    pub fn with_time(&self, time: Time) -> Result<Zoned, Error> {
        self.resolve_local(self.datetime.with_time(time))
    }

    /// Returns the civil datetime and offset without the time zone.
    pub fn to_offset_datetime(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.datetime, self.offset)
    }

    /// Adds an amount of time. See the [type docs](Zoned#arithmetic) for
    /// how date and time based amounts differ.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range or the unit is
    /// `Forever`.
    pub fn checked_add<A: Into<Amount>>(&self, amount: A) -> Result<Zoned, Error> {
        match amount.into() {
            Amount::Duration(duration) => self.on_instant(duration.into()),
            Amount::Units(n, unit) if unit.is_time_based() => {
                self.on_instant(Amount::Units(n, unit))
            }
            amount => self.resolve_local(self.datetime.checked_add(amount)?),
        }
    }

    /// Subtracts an amount of time.
    pub fn checked_sub<A: Into<Amount>>(&self, amount: A) -> Result<Zoned, Error> {
        match amount.into() {
            Amount::Period(period) => {
                self.resolve_local(self.datetime.checked_sub(period)?)
            }
            amount => self.checked_add(amount.checked_neg()?),
        }
    }

    /// Returns the number of whole units from this until `other`, truncated
    /// toward zero.
    ///
    /// `other` is first converted to this time zone. Date based units are
    /// then counted on the civil timeline and time based units on the
    /// instant timeline.
    ///
    /// ```
    /// use calends::{civil::datetime, temporal::Unit, tz::TimeZone};
    ///
    /// let tz = TimeZone::get("America/New_York")?;
    /// let a = datetime(2024, 3, 9, 12, 0, 0, 0).to_zoned(tz.clone())?;
    /// let b = datetime(2024, 3, 10, 12, 0, 0, 0).to_zoned(tz)?;
    /// assert_eq!(a.until(&b, Unit::Day)?, 1);
    /// assert_eq!(a.until(&b, Unit::Hour)?, 23);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until(&self, other: &Zoned, unit: Unit) -> Result<i64, Error> {
        if unit.is_time_based() {
            return self.instant.until(other.instant, unit);
        }
        let end = other.instant.to_datetime(self.tz.to_offset(other.instant));
        self.datetime.until(end, unit)
    }

    /// Truncates the civil time to the given unit, resolved in the time zone
    /// while keeping the offset if possible.
    pub fn truncated_to(&self, unit: Unit) -> Result<Zoned, Error> {
        self.resolve_local(self.datetime.truncated_to(unit)?)
    }

    /// Returns true when this is before `other` on the instant timeline.
    pub fn is_before(&self, other: &Zoned) -> bool {
        self.instant < other.instant
    }

    /// Returns true when this is after `other` on the instant timeline.
    pub fn is_after(&self, other: &Zoned) -> bool {
        self.instant > other.instant
    }

    /// Returns true when this is the same instant as `other`, regardless of
    /// time zone.
    pub fn is_equal(&self, other: &Zoned) -> bool {
        self.instant == other.instant
    }

    fn on_instant(&self, amount: Amount) -> Result<Zoned, Error> {
        Ok(Zoned::new(self.instant.checked_add(amount)?, self.tz.clone()))
    }

    fn resolve_local(&self, dt: DateTime) -> Result<Zoned, Error> {
        Zoned::from_local_preferring(dt, self.tz.clone(), self.offset)
    }

    /// Returns the same civil datetime with another valid offset.
    fn with_offset(&self, offset: Offset) -> Zoned {
        if offset == self.offset {
            return self.clone();
        }
        // The civil datetime is unchanged, so the instant shifts by the
        // difference in offsets. A fold is never at the limits of the
        // supported range, but fall back to a copy if it somehow were.
        match Instant::from_datetime(self.datetime, offset) {
            Ok(instant) => Zoned {
                instant,
                datetime: self.datetime,
                offset,
                tz: self.tz.clone(),
            },
            Err(_) => self.clone(),
        }
    }
}

impl FieldAccess for Zoned {
    fn is_supported(&self, field: Field) -> bool {
        matches!(field, Field::InstantSeconds | Field::OffsetSeconds)
            || self.datetime.is_supported(field)
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::InstantSeconds | Field::OffsetSeconds => Ok(field.range()),
            _ => self.datetime.range(field),
        }
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::InstantSeconds => Ok(self.instant.as_second()),
            Field::OffsetSeconds => Ok(i64::from(self.offset.seconds())),
            _ if self.datetime.is_supported(field) => self.datetime.get(field),
            _ => Err(unsupported_field(field, "Zoned")),
        }
    }
}

impl FieldAdjust for Zoned {
    /// Sets a field.
    ///
    /// Setting `InstantSeconds` keeps the time zone. Setting
    /// `OffsetSeconds` only has an effect when the new offset is valid for
    /// the civil datetime (that is, in a fold). Every other field is set on
    /// the civil datetime, which is then resolved while keeping the offset
    /// if possible.
    fn with_field(&self, field: Field, value: i64) -> Result<Zoned, Error> {
        match field {
            Field::InstantSeconds => {
                let instant = self.instant.with_field(field, value)?;
                Ok(Zoned::new(instant, self.tz.clone()))
            }
            Field::OffsetSeconds => {
                let seconds = field.check_valid_int_value(value)?;
                let offset = Offset::new_seconds(seconds)?;
                if self.tz.to_ambiguous_offset(self.datetime).is_valid(offset) {
                    Ok(self.with_offset(offset))
                } else {
                    Ok(self.clone())
                }
            }
            _ => self.resolve_local(self.datetime.with_field(field, value)?),
        }
    }
}

impl Default for Zoned {
    fn default() -> Zoned {
        Zoned::new(Instant::UNIX_EPOCH, TimeZone::UTC)
    }
}

impl Eq for Zoned {}

impl PartialEq for Zoned {
    fn eq(&self, rhs: &Zoned) -> bool {
        self.instant == rhs.instant && self.tz == rhs.tz
    }
}

impl core::hash::Hash for Zoned {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
        self.tz.hash(state);
    }
}

impl Ord for Zoned {
    fn cmp(&self, rhs: &Zoned) -> core::cmp::Ordering {
        self.instant
            .cmp(&rhs.instant)
            .then_with(|| self.datetime.cmp(&rhs.datetime))
            .then_with(|| self.tz.id().cmp(rhs.tz.id()))
    }
}

impl PartialOrd for Zoned {
    fn partial_cmp(&self, rhs: &Zoned) -> Option<core::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

impl core::fmt::Display for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{temporal::DEFAULT_DATETIME_PRINTER, StdFmtWrite};

        DEFAULT_DATETIME_PRINTER
            .print_zoned(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Zoned {
    type Err = Error;

    fn from_str(string: &str) -> Result<Zoned, Error> {
        crate::fmt::temporal::DEFAULT_DATETIME_PARSER.parse_zoned(string)
    }
}

impl From<Zoned> for Instant {
    fn from(zdt: Zoned) -> Instant {
        zdt.instant()
    }
}

impl From<Zoned> for DateTime {
    fn from(zdt: Zoned) -> DateTime {
        zdt.datetime()
    }
}

crate::temporal::impl_amount_ops!(Zoned);

#[cfg(test)]
impl quickcheck::Arbitrary for Zoned {
    fn arbitrary(g: &mut quickcheck::Gen) -> Zoned {
        let ids = [
            "Z",
            "-03:30",
            "America/New_York",
            "Australia/Sydney",
            "Europe/London",
        ];
        let tz = TimeZone::get(g.choose(&ids).unwrap()).unwrap();
        // Keep away from the range limits so arithmetic in tests has room.
        let second = i64::arbitrary(g).rem_euclid(20_000_000_000) - 10_000_000_000;
        let nanos = i64::from(u32::arbitrary(g) % 1_000_000_000);
        Zoned::new(Instant::from_second_and_nanos(second, nanos).unwrap(), tz)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, datetime, time},
        Duration, Period,
    };

    use super::*;

    fn new_york() -> TimeZone {
        TimeZone::get("America/New_York").unwrap()
    }

    #[test]
    fn gap_and_fold() {
        let tz = new_york();
        let gap = datetime(2024, 3, 10, 2, 30, 0, 0);
        let zdt = Zoned::from_local(gap, tz.clone()).unwrap();
        insta::assert_snapshot!(zdt, @"2024-03-10T03:30-04:00[America/New_York]");
        let zdt = Zoned::from_local_with(gap, tz.clone(), Disambiguation::Earlier).unwrap();
        insta::assert_snapshot!(zdt, @"2024-03-10T01:30-05:00[America/New_York]");
        let err = Zoned::from_local_with(gap, tz.clone(), Disambiguation::Reject).unwrap_err();
        assert!(err.is_unresolved());

        let fold = datetime(2024, 11, 3, 1, 30, 0, 0);
        let zdt = Zoned::from_local(fold, tz.clone()).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-4));
        let zdt = Zoned::from_local_with(fold, tz.clone(), Disambiguation::Later).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-5));
        let err = Zoned::from_local_with(fold, tz, Disambiguation::Reject).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"datetime 2024-11-03T01:30 is ambiguous in time zone America/New_York since it falls into a fold between offsets -04:00 and -05:00",
        );
    }

    #[test]
    fn strict() {
        let tz = new_york();
        let err = Zoned::from_strict(
            datetime(2024, 3, 10, 2, 30, 0, 0),
            Offset::constant(-5),
            tz.clone(),
        )
        .unwrap_err();
        assert!(err.is_unresolved());
        let err = Zoned::from_strict(
            datetime(2024, 7, 1, 0, 0, 0, 0),
            Offset::constant(-5),
            tz.clone(),
        )
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"offset -05:00 is not valid for local datetime 2024-07-01T00:00 in time zone America/New_York",
        );
        let zdt = Zoned::from_strict(
            datetime(2024, 11, 3, 1, 30, 0, 0),
            Offset::constant(-5),
            tz,
        )
        .unwrap();
        assert_eq!(zdt.instant(), "2024-11-03T06:30:00Z".parse().unwrap());
    }

    #[test]
    fn start_of_day() {
        let tz = TimeZone::region(
            "Test/Midnight_Gap",
            crate::tz::ZoneRules::new(
                Offset::constant(-3),
                Offset::constant(-3),
                vec![],
                vec![crate::tz::Transition::new(
                    "2024-10-06T03:00:00Z".parse().unwrap(),
                    Offset::constant(-3),
                    Offset::constant(-2),
                )
                .unwrap()],
                vec![],
            )
            .unwrap(),
        )
        .unwrap();
        let zdt = Zoned::start_of_day(date(2024, 10, 6), tz.clone()).unwrap();
        assert_eq!(zdt.datetime(), datetime(2024, 10, 6, 1, 0, 0, 0));
        let zdt = Zoned::start_of_day(date(2024, 10, 7), tz).unwrap();
        assert_eq!(zdt.time(), Time::MIDNIGHT);
        let zdt = date(2024, 3, 10).at_start_of_day_in(&new_york()).unwrap();
        insta::assert_snapshot!(zdt, @"2024-03-10T00:00-05:00[America/New_York]");
    }

    #[test]
    fn arithmetic_across_transitions() {
        let zdt = Zoned::from_local(datetime(2024, 11, 2, 12, 0, 0, 0), new_york()).unwrap();
        insta::assert_snapshot!(
            zdt.checked_add(Period::from_days(1)).unwrap(),
            @"2024-11-03T12:00-05:00[America/New_York]",
        );
        insta::assert_snapshot!(
            zdt.checked_add(Duration::from_hours(24).unwrap()).unwrap(),
            @"2024-11-03T11:00-05:00[America/New_York]",
        );
        insta::assert_snapshot!(
            zdt.clone() - (Period::from_months(1)),
            @"2024-10-02T12:00-04:00[America/New_York]",
        );
        // Keeps the offset when landing in a fold.
        let zdt = Zoned::from_local_with(
            datetime(2024, 11, 3, 1, 30, 0, 0),
            new_york(),
            Disambiguation::Later,
        )
        .unwrap();
        let zdt = zdt.checked_add((10, Unit::Minute)).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-5));
        let zdt = zdt.checked_sub((0, Unit::Day)).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-5));
        assert!(zdt.checked_add((1, Unit::Forever)).unwrap_err().is_unsupported());
    }

    #[test]
    fn zones() {
        let zdt = Zoned::from_local(datetime(2024, 7, 1, 9, 0, 0, 0), new_york()).unwrap();
        let fixed = zdt.with_fixed_offset_zone();
        insta::assert_snapshot!(fixed, @"2024-07-01T09:00-04:00");
        assert!(fixed.is_equal(&zdt));
        assert_ne!(fixed, zdt);
        let london = zdt
            .with_time_zone_same_local(TimeZone::get("Europe/London").unwrap())
            .unwrap();
        insta::assert_snapshot!(london, @"2024-07-01T09:00+01:00[Europe/London]");
        assert!(london.is_before(&zdt));
        assert!(london < zdt);
        let odt = zdt.to_offset_datetime();
        assert_eq!(odt.offset(), Offset::constant(-4));
        let zdt = zdt.with_time(time(23, 0, 0, 0)).unwrap();
        assert_eq!(zdt.hour(), 23);
        assert_eq!(zdt.truncated_to(Unit::Day).unwrap().hour(), 0);
    }

    #[test]
    fn fields() {
        let zdt = Zoned::from_local_with(
            datetime(2024, 11, 3, 1, 30, 0, 0),
            new_york(),
            Disambiguation::Earlier,
        )
        .unwrap();
        assert_eq!(zdt.get(Field::OffsetSeconds).unwrap(), -4 * 3_600);
        assert_eq!(zdt.get(Field::InstantSeconds).unwrap(), zdt.instant().as_second());
        assert_eq!(zdt.get(Field::DayOfMonth).unwrap(), 3);
        let later = zdt.with_field(Field::OffsetSeconds, -5 * 3_600).unwrap();
        assert_eq!(later.offset(), Offset::constant(-5));
        let same = zdt.with_field(Field::OffsetSeconds, 3_600).unwrap();
        assert_eq!(same, zdt);
        let moved = zdt.with_field(Field::HourOfDay, 12).unwrap();
        assert_eq!(moved.offset(), Offset::constant(-5));
        assert!(zdt.range(Field::DayOfMonth).unwrap().maximum() == 30);
    }

    quickcheck::quickcheck! {
        fn prop_display_parse_roundtrip(zdt: Zoned) -> bool {
            let parsed: Zoned = zdt.to_string().parse().unwrap();
            parsed == zdt && parsed.offset() == zdt.offset()
        }

        fn prop_local_roundtrip(zdt: Zoned) -> bool {
            Zoned::from_local_preferring(
                zdt.datetime(),
                zdt.time_zone().clone(),
                zdt.offset(),
            )
            .unwrap()
                == zdt
        }
    }
}
