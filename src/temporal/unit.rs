use crate::{
    util::common::{
        NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND, SECONDS_PER_DAY,
        SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    },
    Duration,
};

/// The average number of seconds in a Gregorian year.
///
/// A 400 year cycle has 146,097 days, so the average year is 365.2425 days.
const SECONDS_PER_AVERAGE_YEAR: i64 = 31_556_952;

/// A unit of time used to measure or step through temporal values.
///
/// Units are ordered from smallest to largest. Units from `Nanosecond` up to
/// `HalfDay` are "time based" and have an exact length. Units from `Day` up
/// to `Era` are "date based" and their length is only an estimate, since it
/// depends on the calendar, and for days in a time zone, on daylight saving
/// transitions. `Forever` is neither.
///
/// # Example
///
/// ```
/// use calends::temporal::Unit;
///
/// assert!(Unit::Hour < Unit::Day);
/// assert!(Unit::Month.is_date_based());
/// assert!(Unit::Month.is_duration_estimated());
/// assert_eq!(Unit::Week.duration().seconds(), 7 * 86_400);
/// assert_eq!(Unit::Century.to_string(), "Centuries");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    /// A nanosecond.
    Nanosecond,
    /// A microsecond, equivalent to 1,000 nanoseconds.
    Microsecond,
    /// A millisecond, equivalent to 1,000 microseconds.
    Millisecond,
    /// A second, equivalent to 1,000 milliseconds.
    Second,
    /// A minute, equivalent to 60 seconds.
    Minute,
    /// An hour, equivalent to 60 minutes.
    Hour,
    /// Half a day, as in the AM and PM split, equivalent to 12 hours.
    HalfDay,
    /// A day. On the civil timeline this is always 24 hours.
    Day,
    /// A week, equivalent to 7 days.
    Week,
    /// A month. Its length in days depends on the month and year.
    Month,
    /// A year. Its length in days depends on whether it is a leap year.
    Year,
    /// A decade, equivalent to 10 years.
    Decade,
    /// A century, equivalent to 100 years.
    Century,
    /// A millennium, equivalent to 1,000 years.
    Millennium,
    /// An era. ISO has two eras, and the estimated length of one era is
    /// 1,000,000,000 years.
    Era,
    /// A unit representing the concept of forever.
    Forever,
}

impl Unit {
    /// Returns the (possibly estimated) length of this unit.
    ///
    /// For time based units, this is exact. Date based units use the average
    /// Gregorian year of 365.2425 days, so one month is 1/12 of that.
    /// `Forever` returns the largest representable duration.
    pub fn duration(self) -> Duration {
        match self.nanos() {
            Some(nanos) => Duration::from_nanos(nanos),
            None => match self {
                Unit::Week => Duration::from_secs(7 * SECONDS_PER_DAY),
                Unit::Month => {
                    Duration::from_secs(SECONDS_PER_AVERAGE_YEAR / 12)
                }
                Unit::Year => Duration::from_secs(SECONDS_PER_AVERAGE_YEAR),
                Unit::Decade => {
                    Duration::from_secs(SECONDS_PER_AVERAGE_YEAR * 10)
                }
                Unit::Century => {
                    Duration::from_secs(SECONDS_PER_AVERAGE_YEAR * 100)
                }
                Unit::Millennium => {
                    Duration::from_secs(SECONDS_PER_AVERAGE_YEAR * 1_000)
                }
                Unit::Era => Duration::from_secs(
                    SECONDS_PER_AVERAGE_YEAR * 1_000_000_000,
                ),
                _ => Duration::MAX,
            },
        }
    }

    /// Returns true when the length returned by [`Unit::duration`] is an
    /// estimate. This is true for `Day` and every unit above it.
    pub fn is_duration_estimated(self) -> bool {
        self >= Unit::Day
    }

    /// Returns true for units that are measured in days or larger, except
    /// for `Forever`.
    pub fn is_date_based(self) -> bool {
        self >= Unit::Day && self != Unit::Forever
    }

    /// Returns true for units smaller than a day.
    pub fn is_time_based(self) -> bool {
        self < Unit::Day
    }

    /// Returns the exact number of nanoseconds in this unit for units up to
    /// and including `Day`.
    pub(crate) fn nanos(self) -> Option<i64> {
        Some(match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => NANOS_PER_MICRO,
            Unit::Millisecond => NANOS_PER_MILLI,
            Unit::Second => NANOS_PER_SECOND,
            Unit::Minute => SECONDS_PER_MINUTE * NANOS_PER_SECOND,
            Unit::Hour => SECONDS_PER_HOUR * NANOS_PER_SECOND,
            Unit::HalfDay => 12 * SECONDS_PER_HOUR * NANOS_PER_SECOND,
            Unit::Day => SECONDS_PER_DAY * NANOS_PER_SECOND,
            _ => return None,
        })
    }

    /// Returns the number of months in this unit for units from `Month` up
    /// to `Millennium`.
    pub(crate) fn months(self) -> Option<i64> {
        Some(match self {
            Unit::Month => 1,
            Unit::Year => 12,
            Unit::Decade => 120,
            Unit::Century => 1_200,
            Unit::Millennium => 12_000,
            _ => return None,
        })
    }

    fn plural(self) -> &'static str {
        match self {
            Unit::Nanosecond => "Nanos",
            Unit::Microsecond => "Micros",
            Unit::Millisecond => "Millis",
            Unit::Second => "Seconds",
            Unit::Minute => "Minutes",
            Unit::Hour => "Hours",
            Unit::HalfDay => "HalfDays",
            Unit::Day => "Days",
            Unit::Week => "Weeks",
            Unit::Month => "Months",
            Unit::Year => "Years",
            Unit::Decade => "Decades",
            Unit::Century => "Centuries",
            Unit::Millennium => "Millennia",
            Unit::Era => "Eras",
            Unit::Forever => "Forever",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.plural())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(Unit::Nanosecond.duration(), Duration::new(0, 1).unwrap());
        assert_eq!(Unit::HalfDay.duration().seconds(), 43_200);
        assert_eq!(Unit::Month.duration().seconds(), 2_629_746);
        assert_eq!(Unit::Year.duration().seconds(), 31_556_952);
        assert_eq!(Unit::Forever.duration(), Duration::MAX);
    }

    #[test]
    fn classification() {
        for unit in [Unit::Nanosecond, Unit::Second, Unit::HalfDay] {
            assert!(unit.is_time_based(), "{unit}");
            assert!(!unit.is_date_based(), "{unit}");
            assert!(!unit.is_duration_estimated(), "{unit}");
        }
        for unit in [Unit::Day, Unit::Week, Unit::Month, Unit::Era] {
            assert!(!unit.is_time_based(), "{unit}");
            assert!(unit.is_date_based(), "{unit}");
            assert!(unit.is_duration_estimated(), "{unit}");
        }
        assert!(!Unit::Forever.is_time_based());
        assert!(!Unit::Forever.is_date_based());
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Unit::HalfDay, @"HalfDays");
        insta::assert_snapshot!(Unit::Millennium, @"Millennia");
        insta::assert_snapshot!(Unit::Forever, @"Forever");
    }
}
