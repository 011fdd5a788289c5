use crate::{
    civil::{Date, Weekday},
    error::{civil::Error as E, Error},
    util::common::{self, YEAR_MAX, YEAR_MIN},
};

/// A type representing an [ISO 8601 week date].
///
/// The ISO 8601 week date scheme devises a calendar where days are
/// identified by their year, week number and weekday. All years have either
/// precisely 52 or 53 weeks. The first week of a year is the week that
/// contains the first Thursday of the year, so some days at the start or end
/// of a Gregorian year belong to a week of the neighboring week-based year.
///
/// Every `ISOWeekDate` corresponds to a supported [`Date`]. Because of that,
/// the week-based year of a date near [`Date::MIN`] or [`Date::MAX`] may be
/// one beyond the supported year range.
///
/// [ISO 8601 week date]: https://en.wikipedia.org/wiki/ISO_week_date
///
/// # Example
///
/// ```
/// use calends::civil::{date, ISOWeekDate, Weekday};
///
/// let wd = ISOWeekDate::new(2020, 53, Weekday::Friday)?;
/// assert_eq!(wd.date(), date(2021, 1, 1));
/// assert_eq!(wd.to_string(), "2020-W53-5");
///
/// // 2021 only has 52 weeks.
/// assert!(ISOWeekDate::new(2021, 53, Weekday::Friday).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ISOWeekDate {
    year: i32,
    week: i8,
    weekday: Weekday,
}

impl ISOWeekDate {
    /// Creates a new ISO week date.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range, when the week
    /// is not in `1..=53`, when the week is `53` and the year has only 52
    /// weeks, or when the resulting date is out of range.
    pub fn new(
        year: i32,
        week: i8,
        weekday: Weekday,
    ) -> Result<ISOWeekDate, Error> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(Error::range("week-based year", year, YEAR_MIN, YEAR_MAX));
        }
        if !(1..=53).contains(&week) {
            return Err(Error::range("week", week, 1, 53));
        }
        if week == 53 && weeks_in_year(year) == 52 {
            return Err(Error::from(E::InvalidWeekOfYear { year, week }));
        }
        let wd = ISOWeekDate { year, week, weekday };
        // The first or last weeks of the year range may spill outside of
        // the supported dates.
        Date::from_epoch_day(wd.to_epoch_day())?;
        Ok(wd)
    }

    pub(crate) fn from_date(date: Date) -> ISOWeekDate {
        let weekday = date.weekday();
        let doy = i32::from(date.day_of_year());
        let mut year = date.year();
        let mut week = (doy - i32::from(weekday.to_monday_one_offset()) + 10) / 7;
        if week < 1 {
            year -= 1;
            week = i32::from(weeks_in_year(year));
        } else if week > i32::from(weeks_in_year(year)) {
            year += 1;
            week = 1;
        }
        ISOWeekDate { year, week: week as i8, weekday }
    }

    /// Returns the week-based year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the week number, from `1` to `53`.
    pub fn week(self) -> i8 {
        self.week
    }

    /// Returns the day of the week.
    pub fn weekday(self) -> Weekday {
        self.weekday
    }

    /// Returns the number of weeks in this week date's year.
    pub fn weeks_in_year(self) -> i8 {
        weeks_in_year(self.year)
    }

    /// Returns the Gregorian date for this week date.
    pub fn date(self) -> Date {
        // OK because construction guarantees the date is in range.
        Date::from_epoch_day(self.to_epoch_day())
            .expect("ISO week date is always in range")
    }

    fn to_epoch_day(self) -> i64 {
        week_one_monday(self.year)
            + i64::from(self.week - 1) * 7
            + i64::from(self.weekday.to_monday_zero_offset())
    }
}

impl core::fmt::Display for ISOWeekDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if (0..=9999).contains(&self.year) {
            write!(f, "{:04}", self.year)?;
        } else {
            write!(f, "{:+05}", self.year)?;
        }
        write!(f, "-W{:02}-{}", self.week, self.weekday.to_monday_one_offset())
    }
}

impl From<Date> for ISOWeekDate {
    fn from(date: Date) -> ISOWeekDate {
        ISOWeekDate::from_date(date)
    }
}

/// Returns the epoch day of the Monday starting week 1 of the given
/// week-based year.
fn week_one_monday(year: i32) -> i64 {
    let jan4 = common::to_epoch_day(year, 1, 4);
    jan4 - i64::from(common::weekday_from_epoch_day(jan4) - 1)
}

/// Returns `53` for years starting on a Thursday, and for leap years
/// starting on a Wednesday. Otherwise `52`.
fn weeks_in_year(year: i32) -> i8 {
    let jan1 = common::weekday_from_epoch_day(common::to_epoch_day(year, 1, 1));
    if jan1 == 4 || (jan1 == 3 && common::is_leap_year(year)) {
        53
    } else {
        52
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn known() {
        let wd = date(2008, 12, 29).to_iso_week_date();
        assert_eq!((wd.year(), wd.week(), wd.weekday()), (2009, 1, Weekday::Monday));
        let wd = date(2010, 1, 3).to_iso_week_date();
        assert_eq!((wd.year(), wd.week(), wd.weekday()), (2009, 53, Weekday::Sunday));
        assert_eq!(wd.weeks_in_year(), 53);
        insta::assert_snapshot!(wd, @"2009-W53-7");
        insta::assert_snapshot!(
            ISOWeekDate::new(2021, 53, Weekday::Monday).unwrap_err(),
            @"week 53 is not valid for week-based-year 2021",
        );
    }

    #[test]
    fn boundaries() {
        let wd = Date::MIN.to_iso_week_date();
        assert_eq!(wd.date(), Date::MIN);
        let wd = Date::MAX.to_iso_week_date();
        assert_eq!(wd.date(), Date::MAX);
    }

    quickcheck::quickcheck! {
        fn prop_roundtrip(d: Date) -> bool {
            let wd = d.to_iso_week_date();
            wd.date() == d && (1..=wd.weeks_in_year()).contains(&wd.week())
        }
    }
}
