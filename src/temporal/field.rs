use crate::{
    error::Error,
    temporal::{Unit, ValueRange},
    util::common::{
        EPOCH_DAY_MAX, EPOCH_DAY_MIN, NANOS_PER_DAY, SECONDS_PER_DAY, YEAR_MAX,
        YEAR_MIN,
    },
};

/// A standard field of date and time values.
///
/// Fields name the individual components that temporal values can be read
/// and adjusted by, through the [`FieldAccess`](crate::temporal::FieldAccess)
/// and [`FieldAdjust`](crate::temporal::FieldAdjust) traits. Each field
/// measures some number of its [base unit](Field::base_unit) within its
/// [range unit](Field::range_unit). For example, `DayOfMonth` counts days
/// within a month.
///
/// Fields are ordered from the smallest to the largest base unit, with the
/// time based fields first.
///
/// # Example
///
/// ```
/// use calends::{civil::date, temporal::{Field, FieldAccess, Unit}};
///
/// let d = date(2024, 3, 5);
/// assert_eq!(d.get(Field::DayOfYear)?, 65);
/// assert_eq!(d.get(Field::ProlepticMonth)?, 2024 * 12 + 2);
/// assert_eq!(Field::DayOfYear.base_unit(), Unit::Day);
/// assert_eq!(Field::DayOfYear.range_unit(), Unit::Year);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Field {
    /// The nanosecond within the second, from `0` to `999,999,999`.
    NanoOfSecond,
    /// The nanosecond within the day.
    NanoOfDay,
    /// The microsecond within the second, from `0` to `999,999`.
    MicroOfSecond,
    /// The microsecond within the day.
    MicroOfDay,
    /// The millisecond within the second, from `0` to `999`.
    MilliOfSecond,
    /// The millisecond within the day.
    MilliOfDay,
    /// The second within the minute, from `0` to `59`.
    SecondOfMinute,
    /// The second within the day, from `0` to `86,399`.
    SecondOfDay,
    /// The minute within the hour, from `0` to `59`.
    MinuteOfHour,
    /// The minute within the day, from `0` to `1,439`.
    MinuteOfDay,
    /// The hour within the AM or PM half of the day, from `0` to `11`.
    HourOfAmPm,
    /// The clock hour within the AM or PM, from `1` to `12`.
    ClockHourOfAmPm,
    /// The hour of the day, from `0` to `23`.
    HourOfDay,
    /// The clock hour of the day, from `1` to `24`.
    ClockHourOfDay,
    /// `0` for AM and `1` for PM.
    AmPmOfDay,
    /// The day of the week, from Monday (`1`) to Sunday (`7`).
    DayOfWeek,
    /// The day of the week in weeks aligned to the first of the month.
    AlignedDayOfWeekInMonth,
    /// The day of the week in weeks aligned to the first of the year.
    AlignedDayOfWeekInYear,
    /// The day of the month, from `1` to `28`-`31`.
    DayOfMonth,
    /// The day of the year, from `1` to `365`-`366`.
    DayOfYear,
    /// The number of days since `1970-01-01`.
    EpochDay,
    /// The week of the month in weeks aligned to the first of the month.
    AlignedWeekOfMonth,
    /// The week of the year in weeks aligned to the first of the year.
    AlignedWeekOfYear,
    /// The month of the year, from `1` to `12`.
    MonthOfYear,
    /// The number of months since year `0`, e.g., `year * 12 + month - 1`.
    ProlepticMonth,
    /// The year within the era.
    YearOfEra,
    /// The proleptic year, which may be zero or negative.
    Year,
    /// The era, `0` for BCE and `1` for CE.
    Era,
    /// The number of seconds since the Unix epoch.
    InstantSeconds,
    /// The offset from UTC in seconds.
    OffsetSeconds,
}

impl Field {
    /// Every field, in order.
    pub const ALL: [Field; 30] = [
        Field::NanoOfSecond,
        Field::NanoOfDay,
        Field::MicroOfSecond,
        Field::MicroOfDay,
        Field::MilliOfSecond,
        Field::MilliOfDay,
        Field::SecondOfMinute,
        Field::SecondOfDay,
        Field::MinuteOfHour,
        Field::MinuteOfDay,
        Field::HourOfAmPm,
        Field::ClockHourOfAmPm,
        Field::HourOfDay,
        Field::ClockHourOfDay,
        Field::AmPmOfDay,
        Field::DayOfWeek,
        Field::AlignedDayOfWeekInMonth,
        Field::AlignedDayOfWeekInYear,
        Field::DayOfMonth,
        Field::DayOfYear,
        Field::EpochDay,
        Field::AlignedWeekOfMonth,
        Field::AlignedWeekOfYear,
        Field::MonthOfYear,
        Field::ProlepticMonth,
        Field::YearOfEra,
        Field::Year,
        Field::Era,
        Field::InstantSeconds,
        Field::OffsetSeconds,
    ];

    /// Returns the unit this field is measured in.
    pub fn base_unit(self) -> Unit {
        use self::Field::*;

        match self {
            NanoOfSecond | NanoOfDay => Unit::Nanosecond,
            MicroOfSecond | MicroOfDay => Unit::Microsecond,
            MilliOfSecond | MilliOfDay => Unit::Millisecond,
            SecondOfMinute | SecondOfDay => Unit::Second,
            MinuteOfHour | MinuteOfDay => Unit::Minute,
            HourOfAmPm | ClockHourOfAmPm | HourOfDay | ClockHourOfDay => {
                Unit::Hour
            }
            AmPmOfDay => Unit::HalfDay,
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear
            | DayOfMonth | DayOfYear | EpochDay => Unit::Day,
            AlignedWeekOfMonth | AlignedWeekOfYear => Unit::Week,
            MonthOfYear | ProlepticMonth => Unit::Month,
            YearOfEra | Year => Unit::Year,
            Era => Unit::Era,
            InstantSeconds | OffsetSeconds => Unit::Second,
        }
    }

    /// Returns the unit that bounds this field.
    pub fn range_unit(self) -> Unit {
        use self::Field::*;

        match self {
            NanoOfSecond | MicroOfSecond | MilliOfSecond => Unit::Second,
            SecondOfMinute => Unit::Minute,
            MinuteOfHour => Unit::Hour,
            HourOfAmPm | ClockHourOfAmPm => Unit::HalfDay,
            NanoOfDay | MicroOfDay | MilliOfDay | SecondOfDay
            | MinuteOfDay | HourOfDay | ClockHourOfDay | AmPmOfDay => {
                Unit::Day
            }
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear => {
                Unit::Week
            }
            DayOfMonth | AlignedWeekOfMonth => Unit::Month,
            DayOfYear | AlignedWeekOfYear | MonthOfYear => Unit::Year,
            YearOfEra => Unit::Era,
            EpochDay | ProlepticMonth | Year | Era | InstantSeconds
            | OffsetSeconds => Unit::Forever,
        }
    }

    /// Returns the outer range of valid values for this field in the ISO
    /// calendar.
    ///
    /// Temporal values may report a narrower range for a field. For
    /// example, a date in February reports a fixed day of month range.
    pub fn range(self) -> ValueRange {
        use self::Field::*;

        const NANOS_DAY: i64 = NANOS_PER_DAY - 1;
        const MICROS_DAY: i64 = SECONDS_PER_DAY * 1_000_000 - 1;
        const MILLIS_DAY: i64 = SECONDS_PER_DAY * 1_000 - 1;
        const YEAR_MIN64: i64 = YEAR_MIN as i64;
        const YEAR_MAX64: i64 = YEAR_MAX as i64;

        let fixed = |min, max| ValueRange::constant(min, min, max, max);
        match self {
            NanoOfSecond => fixed(0, 999_999_999),
            NanoOfDay => fixed(0, NANOS_DAY),
            MicroOfSecond => fixed(0, 999_999),
            MicroOfDay => fixed(0, MICROS_DAY),
            MilliOfSecond => fixed(0, 999),
            MilliOfDay => fixed(0, MILLIS_DAY),
            SecondOfMinute => fixed(0, 59),
            SecondOfDay => fixed(0, SECONDS_PER_DAY - 1),
            MinuteOfHour => fixed(0, 59),
            MinuteOfDay => fixed(0, 24 * 60 - 1),
            HourOfAmPm => fixed(0, 11),
            ClockHourOfAmPm => fixed(1, 12),
            HourOfDay => fixed(0, 23),
            ClockHourOfDay => fixed(1, 24),
            AmPmOfDay => fixed(0, 1),
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear => {
                fixed(1, 7)
            }
            DayOfMonth => ValueRange::constant(1, 1, 28, 31),
            DayOfYear => ValueRange::constant(1, 1, 365, 366),
            EpochDay => fixed(EPOCH_DAY_MIN, EPOCH_DAY_MAX),
            AlignedWeekOfMonth => ValueRange::constant(1, 1, 4, 5),
            AlignedWeekOfYear => fixed(1, 53),
            MonthOfYear => fixed(1, 12),
            ProlepticMonth => fixed(YEAR_MIN64 * 12, YEAR_MAX64 * 12 + 11),
            YearOfEra => ValueRange::constant(1, 1, YEAR_MAX64, YEAR_MAX64 + 1),
            Year => fixed(YEAR_MIN64, YEAR_MAX64),
            Era => fixed(0, 1),
            InstantSeconds => fixed(i64::MIN, i64::MAX),
            OffsetSeconds => fixed(-64_800, 64_800),
        }
    }

    /// Returns true for fields that are components of a date.
    pub fn is_date_based(self) -> bool {
        Field::DayOfWeek <= self && self <= Field::Era
    }

    /// Returns true for fields that are components of a time of day.
    pub fn is_time_based(self) -> bool {
        self <= Field::AmPmOfDay
    }

    /// Checks that the value is within the outer range of this field.
    ///
    /// # Errors
    ///
    /// This returns a range error when the value is out of bounds.
    pub fn check_valid_value(self, value: i64) -> Result<i64, Error> {
        self.range().check_valid_value(value, self)
    }

    /// Like [`Field::check_valid_value`], but returns the value as an `i32`.
    pub fn check_valid_int_value(self, value: i64) -> Result<i32, Error> {
        self.range().check_valid_int_value(value, self)
    }

    pub(crate) fn name(self) -> &'static str {
        use self::Field::*;

        match self {
            NanoOfSecond => "NanoOfSecond",
            NanoOfDay => "NanoOfDay",
            MicroOfSecond => "MicroOfSecond",
            MicroOfDay => "MicroOfDay",
            MilliOfSecond => "MilliOfSecond",
            MilliOfDay => "MilliOfDay",
            SecondOfMinute => "SecondOfMinute",
            SecondOfDay => "SecondOfDay",
            MinuteOfHour => "MinuteOfHour",
            MinuteOfDay => "MinuteOfDay",
            HourOfAmPm => "HourOfAmPm",
            ClockHourOfAmPm => "ClockHourOfAmPm",
            HourOfDay => "HourOfDay",
            ClockHourOfDay => "ClockHourOfDay",
            AmPmOfDay => "AmPmOfDay",
            DayOfWeek => "DayOfWeek",
            AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            DayOfMonth => "DayOfMonth",
            DayOfYear => "DayOfYear",
            EpochDay => "EpochDay",
            AlignedWeekOfMonth => "AlignedWeekOfMonth",
            AlignedWeekOfYear => "AlignedWeekOfYear",
            MonthOfYear => "MonthOfYear",
            ProlepticMonth => "ProlepticMonth",
            YearOfEra => "YearOfEra",
            Year => "Year",
            Era => "Era",
            InstantSeconds => "InstantSeconds",
            OffsetSeconds => "OffsetSeconds",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions() {
        let time: Vec<Field> =
            Field::ALL.into_iter().filter(|f| f.is_time_based()).collect();
        let date: Vec<Field> =
            Field::ALL.into_iter().filter(|f| f.is_date_based()).collect();
        assert_eq!(15, time.len());
        assert_eq!(13, date.len());
        assert!(!Field::InstantSeconds.is_date_based());
        assert!(!Field::OffsetSeconds.is_time_based());
        for field in Field::ALL {
            if field.is_time_based() {
                assert!(field.base_unit().is_time_based(), "{field}");
            }
        }
    }

    #[test]
    fn ranges() {
        insta::assert_snapshot!(Field::DayOfMonth.range(), @"1 - 28/31");
        insta::assert_snapshot!(Field::DayOfYear.range(), @"1 - 365/366");
        insta::assert_snapshot!(Field::ClockHourOfDay.range(), @"1 - 24");
        insta::assert_snapshot!(
            Field::YearOfEra.range(),
            @"1 - 999999999/1000000000",
        );
        insta::assert_snapshot!(
            Field::NanoOfDay.range(),
            @"0 - 86399999999999",
        );
    }

    #[test]
    fn check_values() {
        assert_eq!(23, Field::HourOfDay.check_valid_value(23).unwrap());
        assert!(Field::HourOfDay.check_valid_value(24).unwrap_err().is_range());
        assert!(Field::OffsetSeconds.check_valid_int_value(64_801).is_err());
        assert_eq!(
            -64_800,
            Field::OffsetSeconds.check_valid_int_value(-64_800).unwrap(),
        );
    }
}
