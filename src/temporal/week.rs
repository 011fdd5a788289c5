use crate::{
    civil::{Date, Weekday},
    error::Error,
    temporal::ValueRange,
    util::common::{days_in_month, days_in_year},
};

/// A week numbering scheme.
///
/// A scheme is defined by the day weeks start on and the minimal number of
/// days that the first week of a month or year must have. Days before the
/// first week belong to week `0` when counting weeks of the month or year,
/// and to the last week of the previous year when counting weeks of the
/// week based year.
///
/// [`WeekFields::ISO`] gives the ISO 8601 scheme, which agrees with
/// [`ISOWeekDate`](crate::civil::ISOWeekDate).
///
/// # Example
///
/// ```
/// use calends::{civil::{date, Weekday}, temporal::WeekFields};
///
/// // Sunday 2023-12-31 starts the first week of 2024 in the US...
/// let d = date(2023, 12, 31);
/// let us = WeekFields::SUNDAY_START;
/// assert_eq!(us.week_based_year(d), 2024);
/// assert_eq!(us.week_of_week_based_year(d), 1);
/// assert_eq!(us.day_of_week(d), 1);
///
/// // ... but it is the last day of week 52 of 2023 in ISO 8601.
/// assert_eq!(WeekFields::ISO.week_based_year(d), 2023);
/// assert_eq!(WeekFields::ISO.week_of_week_based_year(d), 52);
/// assert_eq!(WeekFields::ISO.day_of_week(d), 7);
///
/// let wf = WeekFields::new(Weekday::Saturday, 7)?;
/// assert_eq!(wf.week_of_year(date(2024, 1, 5)), 0);
/// assert_eq!(wf.week_of_year(date(2024, 1, 6)), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekFields {
    first_day: Weekday,
    minimal_days: u8,
}

impl WeekFields {
    /// Weeks start on Monday and the first week has at least 4 days.
    pub const ISO: WeekFields =
        WeekFields { first_day: Weekday::Monday, minimal_days: 4 };

    /// Weeks start on Sunday and the first week has at least 1 day.
    pub const SUNDAY_START: WeekFields =
        WeekFields { first_day: Weekday::Sunday, minimal_days: 1 };

    /// Creates a new week numbering scheme.
    ///
    /// # Errors
    ///
    /// This returns an error when `minimal_days` is not in the range
    /// `1..=7`.
    pub fn new(
        first_day: Weekday,
        minimal_days: u8,
    ) -> Result<WeekFields, Error> {
        if !(1..=7).contains(&minimal_days) {
            return Err(Error::from(
                crate::error::temporal::Error::InvalidWeekFields {
                    minimal_days,
                },
            ));
        }
        Ok(WeekFields { first_day, minimal_days })
    }

    /// Returns the first day of the week.
    pub fn first_day_of_week(self) -> Weekday {
        self.first_day
    }

    /// Returns the minimal number of days in the first week.
    pub fn minimal_days_in_first_week(self) -> u8 {
        self.minimal_days
    }

    /// Returns the day of the week counted from the first day of the week,
    /// from `1` to `7`.
    pub fn day_of_week(self, date: Date) -> i8 {
        self.first_day.days_until(date.weekday()) + 1
    }

    /// Returns the week of the month, from `0` to `6`.
    pub fn week_of_month(self, date: Date) -> i8 {
        let dom = i64::from(date.day());
        let offset = self.start_of_week_offset(dom, self.dow(date));
        week_number(compute_week(offset, dom))
    }

    /// Returns the week of the year, from `0` to `54`.
    pub fn week_of_year(self, date: Date) -> i8 {
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, self.dow(date));
        week_number(compute_week(offset, doy))
    }

    /// Returns the week of the week based year, from `1` to `53`.
    pub fn week_of_week_based_year(self, date: Date) -> i8 {
        let year = date.year();
        let week = self.week_of_week_based_year_impl(
            self.dow(date),
            i64::from(date.day_of_year()),
            i64::from(days_in_year(year)),
            i64::from(days_in_year(year.saturating_sub(1))),
        );
        week_number(week)
    }

    /// Returns the week based year.
    ///
    /// This is the year of the date, except for days at the start or end of
    /// the year that fall into a week belonging to the neighboring year.
    pub fn week_based_year(self, date: Date) -> i32 {
        let year = date.year();
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, self.dow(date));
        let week = compute_week(offset, doy);
        if week == 0 {
            return year - 1;
        }
        let len = i64::from(days_in_year(year));
        if week >= compute_week(offset, len + i64::from(self.minimal_days)) {
            return year + 1;
        }
        year
    }

    /// Returns the range of weeks in the month of the given date.
    pub fn range_week_of_month(self, date: Date) -> ValueRange {
        let dom = i64::from(date.day());
        let offset = self.start_of_week_offset(dom, self.dow(date));
        let len = i64::from(days_in_month(date.year(), date.month()));
        ValueRange::constant(
            compute_week(offset, 1),
            compute_week(offset, 1),
            compute_week(offset, len),
            compute_week(offset, len),
        )
    }

    /// Returns the range of weeks in the year of the given date.
    pub fn range_week_of_year(self, date: Date) -> ValueRange {
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, self.dow(date));
        let len = i64::from(date.days_in_year());
        ValueRange::constant(
            compute_week(offset, 1),
            compute_week(offset, 1),
            compute_week(offset, len),
            compute_week(offset, len),
        )
    }

    /// Returns the range of weeks in the week based year of the given
    /// date, which is `1` to either `52` or `53`.
    pub fn range_week_of_week_based_year(self, date: Date) -> ValueRange {
        let year = date.year();
        let dow = self.dow(date);
        let doy = i64::from(date.day_of_year());
        let len = i64::from(days_in_year(year));
        let offset = self.start_of_week_offset(doy, dow);
        let week = compute_week(offset, doy);
        let max = if week == 0 {
            // The day of week of December 31 in the previous year.
            let prev_dow = (dow - 1 - doy).rem_euclid(7) + 1;
            let prev_len = i64::from(days_in_year(year.saturating_sub(1)));
            self.weeks_in_year(prev_len, prev_dow)
        } else {
            let weeks = self.weeks_in_year(len, dow - doy + 1);
            if week > weeks {
                // The day of week of January 1 in the next year.
                let next_dow = (dow + len - doy).rem_euclid(7) + 1;
                let next_len =
                    i64::from(days_in_year(year.saturating_add(1)));
                self.weeks_in_year(next_len, next_dow)
            } else {
                weeks
            }
        };
        ValueRange::constant(1, 1, max, max)
    }

    /// Returns the date for a week based year, a week of that year and a
    /// day of the week.
    ///
    /// A week past the last week of the year is clamped to the last week.
    ///
    /// # Errors
    ///
    /// This returns an error when the week is not in the range `1..=53`
    /// or the resulting date is out of range.
    pub fn date_from_week_based(
        self,
        year: i32,
        week: i8,
        weekday: Weekday,
    ) -> Result<Date, Error> {
        if !(1..=53).contains(&week) {
            return Err(Error::range("week-of-week-based-year", week, 1, 53));
        }
        let first = Date::new(year, 1, 1)?;
        let offset = self.start_of_week_offset(1, self.dow(first));
        let len = i64::from(first.days_in_year());
        let last = compute_week(offset, len + i64::from(self.minimal_days)) - 1;
        let week = i64::from(week).min(last);
        let dow = i64::from(self.first_day.days_until(weekday));
        first.checked_add_days(-offset + dow + (week - 1) * 7)
    }

    fn dow(self, date: Date) -> i64 {
        i64::from(self.day_of_week(date))
    }

    /// Returns the offset to the first day of week 1, relative to the first
    /// day of the month or year containing `day`, whose localized day of
    /// week is `dow`.
    fn start_of_week_offset(self, day: i64, dow: i64) -> i64 {
        let week_start = (day - dow).rem_euclid(7);
        if week_start + 1 > i64::from(self.minimal_days) {
            7 - week_start
        } else {
            -week_start
        }
    }

    /// Returns the number of weeks in a week based year that has `len` days
    /// and starts on the localized day of week `jan1_dow`.
    fn weeks_in_year(self, len: i64, jan1_dow: i64) -> i64 {
        let jan1_dow = (jan1_dow - 1).rem_euclid(7) + 1;
        let offset = self.start_of_week_offset(1, jan1_dow);
        compute_week(offset, len + i64::from(self.minimal_days)) - 1
    }

    fn week_of_week_based_year_impl(
        self,
        dow: i64,
        doy: i64,
        len: i64,
        prev_len: i64,
    ) -> i64 {
        let offset = self.start_of_week_offset(doy, dow);
        let week = compute_week(offset, doy);
        if week == 0 {
            // Count from December 31 of the previous year. Its week never
            // comes out as zero, so this recurses at most once.
            let prev_dow = (dow - 1 - doy).rem_euclid(7) + 1;
            return self.week_of_week_based_year_impl(
                prev_dow, prev_len, prev_len, prev_len,
            );
        }
        if week > 50 {
            let new_year =
                compute_week(offset, len + i64::from(self.minimal_days));
            if week >= new_year {
                return week - new_year + 1;
            }
        }
        week
    }
}

impl Default for WeekFields {
    fn default() -> WeekFields {
        WeekFields::ISO
    }
}

impl core::fmt::Display for WeekFields {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "WeekFields[{:?},{}]", self.first_day, self.minimal_days)
    }
}

fn compute_week(offset: i64, day: i64) -> i64 {
    (7 + offset + (day - 1)).div_euclid(7)
}

fn week_number(week: i64) -> i8 {
    // OK because week numbers are always in 0..=54.
    i8::try_from(week).unwrap()
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use crate::civil::{date, Date};

    use super::*;

    #[test]
    fn validation() {
        assert!(WeekFields::new(Weekday::Monday, 0).is_err());
        assert!(WeekFields::new(Weekday::Monday, 8).is_err());
        let err = WeekFields::new(Weekday::Monday, 0).unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(
            err,
            @"minimal number of days in the first week must be in the range 1..=7, but got 0",
        );
        let wf = WeekFields::new(Weekday::Friday, 7).unwrap();
        assert_eq!(wf.first_day_of_week(), Weekday::Friday);
        assert_eq!(wf.minimal_days_in_first_week(), 7);
        insta::assert_snapshot!(wf, @"WeekFields[Friday,7]");
    }

    #[test]
    fn iso_year_boundaries() {
        let iso = WeekFields::ISO;
        let d = date(2024, 12, 30);
        assert_eq!(iso.week_based_year(d), 2025);
        assert_eq!(iso.week_of_week_based_year(d), 1);
        assert_eq!(iso.week_of_year(d), 53);

        let d = date(2021, 1, 3);
        assert_eq!(iso.week_based_year(d), 2020);
        assert_eq!(iso.week_of_week_based_year(d), 53);
        assert_eq!(iso.week_of_year(d), 0);
        assert_eq!(iso.range_week_of_week_based_year(d).maximum(), 53);
        assert_eq!(
            iso.range_week_of_week_based_year(date(2021, 6, 1)).maximum(),
            52,
        );
    }

    #[test]
    fn sunday_start() {
        let us = WeekFields::SUNDAY_START;
        let d = date(2024, 1, 1);
        assert_eq!(us.day_of_week(d), 2);
        assert_eq!(us.week_of_year(d), 1);
        assert_eq!(us.week_of_month(d), 1);
        assert_eq!(us.week_of_month(date(2024, 1, 7)), 2);

        let d = date(2023, 12, 31);
        assert_eq!(us.week_of_year(d), 53);
        assert_eq!(us.week_based_year(d), 2024);
        assert_eq!(us.week_of_week_based_year(d), 1);
        // 2024-12-29 is a Sunday whose week contains 2025-01-01.
        assert_eq!(us.week_based_year(date(2024, 12, 29)), 2025);
        assert_eq!(us.week_of_week_based_year(date(2024, 12, 28)), 52);
    }

    #[test]
    fn ranges() {
        let us = WeekFields::SUNDAY_START;
        // March 2024 starts on a Friday and ends on a Sunday.
        let r = us.range_week_of_month(date(2024, 3, 15));
        assert_eq!((r.minimum(), r.maximum()), (1, 6));
        let r = WeekFields::ISO.range_week_of_month(date(2024, 3, 15));
        assert_eq!((r.minimum(), r.maximum()), (0, 4));
        let r = WeekFields::ISO.range_week_of_year(date(2024, 3, 15));
        assert_eq!((r.minimum(), r.maximum()), (1, 53));
    }

    #[test]
    fn from_week_based() {
        let iso = WeekFields::ISO;
        let got = iso.date_from_week_based(2025, 1, Weekday::Monday).unwrap();
        assert_eq!(got, date(2024, 12, 30));
        let got = iso.date_from_week_based(2020, 53, Weekday::Sunday).unwrap();
        assert_eq!(got, date(2021, 1, 3));
        // 2021 only has 52 weeks.
        let got = iso.date_from_week_based(2021, 53, Weekday::Monday).unwrap();
        assert_eq!(got, date(2021, 12, 27));

        let us = WeekFields::SUNDAY_START;
        let got = us.date_from_week_based(2024, 1, Weekday::Sunday).unwrap();
        assert_eq!(got, date(2023, 12, 31));

        assert!(iso.date_from_week_based(2024, 0, Weekday::Monday).is_err());
    }

    quickcheck! {
        fn prop_iso_agrees_with_iso_week_date(d: Date) -> bool {
            if d.year().abs() > 100_000 {
                return true;
            }
            let wd = d.to_iso_week_date();
            let iso = WeekFields::ISO;
            iso.week_based_year(d) == wd.year()
                && iso.week_of_week_based_year(d) == wd.week()
                && iso.day_of_week(d) == wd.weekday().to_monday_one_offset()
        }

        fn prop_week_based_round_trip(d: Date) -> bool {
            if d.year().abs() > 100_000 {
                return true;
            }
            let us = WeekFields::SUNDAY_START;
            let got = us.date_from_week_based(
                us.week_based_year(d),
                us.week_of_week_based_year(d),
                d.weekday(),
            );
            got.ok() == Some(d)
        }
    }
}
