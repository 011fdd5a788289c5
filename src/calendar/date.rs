use core::cmp::Ordering;

use crate::{
    calendar::{ChronoEra, Chronology},
    civil::{Date, Weekday},
    error::Error,
    temporal::{unsupported_field, Field, FieldAccess, FieldAdjust, ValueRange},
    Period,
};

/// A date in an arbitrary [`Chronology`].
///
/// A `ChronoDate` stores its proleptic year, month and day as the
/// chronology defines them. All chronologies agree on what a day is, so
/// dates compare by their position on the time line via
/// [`ChronoDate::to_epoch_day`], regardless of the calendar they are in.
///
/// # Example
///
/// ```
/// use calends::{calendar::{ChronoDate, Chronology}, civil::date};
///
/// let roc = Chronology::Minguo.date(113, 2, 29)?;
/// assert_eq!(roc.to_iso_date(), date(2024, 2, 29));
/// assert_eq!(roc.checked_add_years(1)?.to_string(), "Minguo ROC 114-02-28");
///
/// let iso = ChronoDate::from(date(2024, 2, 29));
/// assert_eq!(iso.to_string(), "2024-02-29");
/// assert!(roc.is_equal(&iso));
/// assert_ne!(roc, iso);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ChronoDate {
    chronology: Chronology,
    year: i32,
    month: i8,
    day: i8,
}

impl ChronoDate {
    /// The fields must form a valid date in the chronology.
    pub(crate) fn new_unchecked(
        chronology: Chronology,
        year: i32,
        month: i8,
        day: i8,
    ) -> ChronoDate {
        ChronoDate { chronology, year, month, day }
    }

    /// Returns the chronology of this date.
    pub fn chronology(&self) -> Chronology {
        self.chronology
    }

    /// Returns the proleptic year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month, from `1` to `12`.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the day of the month.
    pub fn day(&self) -> i8 {
        self.day
    }

    /// Returns the era.
    pub fn era(&self) -> ChronoEra {
        self.chronology.era_of(i64::from(self.year))
    }

    /// Returns the year within the era, which is always positive.
    pub fn year_of_era(&self) -> i64 {
        let year = i64::from(self.year);
        if year >= 1 {
            year
        } else {
            1 - year
        }
    }

    /// Returns the day of the year, starting at `1`.
    pub fn day_of_year(&self) -> i16 {
        let first = self.chronology.to_epoch_day(self.year, 1, 1);
        // OK because a year has at most 366 days.
        i16::try_from(self.to_epoch_day() - first + 1).unwrap()
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.to_iso_date().weekday()
    }

    /// Returns true when this date is in a leap year of its chronology.
    pub fn is_leap_year(&self) -> bool {
        self.chronology.is_leap_year(i64::from(self.year))
    }

    /// Returns the number of days in the month of this date.
    pub fn days_in_month(&self) -> i8 {
        // OK because the month of a valid date is in range.
        self.chronology.days_in_month(i64::from(self.year), self.month).unwrap()
    }

    /// Returns the number of days in the year of this date.
    pub fn days_in_year(&self) -> i16 {
        self.chronology.days_in_year(i64::from(self.year))
    }

    /// Returns the number of days since `1970-01-01`.
    pub fn to_epoch_day(&self) -> i64 {
        self.chronology.to_epoch_day(self.year, self.month, self.day)
    }

    /// Returns the ISO date of the same day.
    pub fn to_iso_date(&self) -> Date {
        // OK because every valid date in a chronology maps to an epoch day
        // in range.
        Date::from_epoch_day(self.to_epoch_day()).unwrap()
    }

    /// Returns the same day in another chronology.
    ///
    /// # Errors
    ///
    /// This returns an error when the day can't be represented in the
    /// other chronology.
    pub fn with_chronology(
        &self,
        chronology: Chronology,
    ) -> Result<ChronoDate, Error> {
        if chronology == self.chronology {
            return Ok(*self);
        }
        chronology.date_from_epoch_day(self.to_epoch_day())
    }

    /// Adds a number of days.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn checked_add_days(&self, days: i64) -> Result<ChronoDate, Error> {
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or_else(|| Error::overflow("days"))?;
        self.chronology.date_from_epoch_day(epoch_day)
    }

    /// Adds a number of months, clamping the day to the end of the month.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn checked_add_months(
        &self,
        months: i64,
    ) -> Result<ChronoDate, Error> {
        let pm = self
            .proleptic_month()
            .checked_add(months)
            .ok_or_else(|| Error::overflow("months"))?;
        // OK because `rem_euclid(12) + 1` is in 1..=12.
        let month = i8::try_from(pm.rem_euclid(12) + 1).unwrap();
        self.resolve_previous_valid(pm.div_euclid(12), month)
    }

    /// Adds a number of years, clamping the day to the end of the month.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn checked_add_years(&self, years: i64) -> Result<ChronoDate, Error> {
        let year = i64::from(self.year)
            .checked_add(years)
            .ok_or_else(|| Error::overflow("years"))?;
        self.resolve_previous_valid(year, self.month)
    }

    /// Returns the calendar based amount from this date to `other`, counted
    /// in this date's chronology.
    ///
    /// # Errors
    ///
    /// This returns an error when `other` can't be represented in this
    /// date's chronology.
    pub fn until_period(&self, other: &ChronoDate) -> Result<Period, Error> {
        let end = other.with_chronology(self.chronology)?;
        let mut total_months = end.proleptic_month() - self.proleptic_month();
        let mut days = i64::from(end.day) - i64::from(self.day);
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let shifted = self.checked_add_months(total_months)?;
            days = end.to_epoch_day() - shifted.to_epoch_day();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i64::from(end.days_in_month());
        }
        let period = |value: i64| {
            i32::try_from(value).map_err(|_| Error::overflow("period"))
        };
        Ok(Period::new(
            period(total_months / 12)?,
            period(total_months % 12)?,
            period(days)?,
        ))
    }

    /// Returns true when this date is before `other` on the time line.
    pub fn is_before(&self, other: &ChronoDate) -> bool {
        self.to_epoch_day() < other.to_epoch_day()
    }

    /// Returns true when this date is after `other` on the time line.
    pub fn is_after(&self, other: &ChronoDate) -> bool {
        self.to_epoch_day() > other.to_epoch_day()
    }

    /// Returns true when this date is the same day as `other`, in any
    /// chronology.
    pub fn is_equal(&self, other: &ChronoDate) -> bool {
        self.to_epoch_day() == other.to_epoch_day()
    }

    fn proleptic_month(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn resolve_previous_valid(
        &self,
        year: i64,
        month: i8,
    ) -> Result<ChronoDate, Error> {
        let max = self.chronology.days_in_month(year, month)?;
        self.chronology.date(year, month, self.day.min(max))
    }
}

impl Ord for ChronoDate {
    fn cmp(&self, other: &ChronoDate) -> Ordering {
        self.to_epoch_day()
            .cmp(&other.to_epoch_day())
            .then_with(|| self.chronology.cmp(&other.chronology))
    }
}

impl PartialOrd for ChronoDate {
    fn partial_cmp(&self, other: &ChronoDate) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Date> for ChronoDate {
    fn from(date: Date) -> ChronoDate {
        ChronoDate::new_unchecked(
            Chronology::Iso,
            date.year(),
            date.month(),
            date.day(),
        )
    }
}

impl FieldAccess for ChronoDate {
    fn is_supported(&self, field: Field) -> bool {
        field.is_date_based()
    }

    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        let fixed = |max| ValueRange::constant(1, 1, max, max);
        Ok(match field {
            Field::DayOfMonth => fixed(i64::from(self.days_in_month())),
            Field::DayOfYear => fixed(i64::from(self.days_in_year())),
            Field::AlignedWeekOfMonth => {
                fixed((i64::from(self.days_in_month()) - 1) / 7 + 1)
            }
            _ => self.chronology.range(field)?,
        })
    }

    fn get(&self, field: Field) -> Result<i64, Error> {
        let day = i64::from(self.day);
        let doy = i64::from(self.day_of_year());
        Ok(match field {
            Field::DayOfWeek => i64::from(self.weekday().to_monday_one_offset()),
            Field::AlignedDayOfWeekInMonth => (day - 1) % 7 + 1,
            Field::AlignedDayOfWeekInYear => (doy - 1) % 7 + 1,
            Field::DayOfMonth => day,
            Field::DayOfYear => doy,
            Field::EpochDay => self.to_epoch_day(),
            Field::AlignedWeekOfMonth => (day - 1) / 7 + 1,
            Field::AlignedWeekOfYear => (doy - 1) / 7 + 1,
            Field::MonthOfYear => i64::from(self.month),
            Field::ProlepticMonth => self.proleptic_month(),
            Field::YearOfEra => self.year_of_era(),
            Field::Year => i64::from(self.year),
            Field::Era => i64::from(self.era().value()),
            _ => return Err(unsupported_field(field, "ChronoDate")),
        })
    }
}

impl FieldAdjust for ChronoDate {
    fn with_field(&self, field: Field, value: i64) -> Result<ChronoDate, Error> {
        let value = self.range(field)?.check_valid_value(value, field)?;
        let current = self.get(field)?;
        let c = self.chronology;
        match field {
            Field::DayOfWeek
            | Field::AlignedDayOfWeekInMonth
            | Field::AlignedDayOfWeekInYear => {
                self.checked_add_days(value - current)
            }
            Field::AlignedWeekOfMonth | Field::AlignedWeekOfYear => {
                self.checked_add_days((value - current) * 7)
            }
            Field::DayOfMonth | Field::DayOfYear | Field::EpochDay => {
                self.checked_add_days(value - current)
            }
            Field::MonthOfYear => {
                // OK because the value was checked against 1..=12.
                let month = i8::try_from(value).unwrap();
                self.resolve_previous_valid(i64::from(self.year), month)
            }
            Field::ProlepticMonth => self.checked_add_months(value - current),
            Field::Year => self.resolve_previous_valid(value, self.month),
            Field::YearOfEra => {
                let year = c.proleptic_year(self.era(), value)?;
                self.resolve_previous_valid(year, self.month)
            }
            Field::Era => {
                if value == current {
                    return Ok(*self);
                }
                let year = 1 - i64::from(self.year);
                self.resolve_previous_valid(year, self.month)
            }
            _ => Err(unsupported_field(field, "ChronoDate")),
        }
    }
}

impl core::fmt::Display for ChronoDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.chronology == Chronology::Iso {
            return core::fmt::Display::fmt(&self.to_iso_date(), f);
        }
        write!(
            f,
            "{} {} {}-{:02}-{:02}",
            self.chronology,
            self.era(),
            self.year_of_era(),
            self.month,
            self.day,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn display() {
        let d = date(2024, 3, 5);
        let show = |c: Chronology| c.date_from(d).unwrap().to_string();
        insta::assert_snapshot!(show(Chronology::Iso), @"2024-03-05");
        insta::assert_snapshot!(show(Chronology::Julian), @"Julian AD 2024-02-21");
        insta::assert_snapshot!(show(Chronology::Minguo), @"Minguo ROC 113-03-05");
        insta::assert_snapshot!(
            show(Chronology::ThaiBuddhist),
            @"ThaiBuddhist BE 2567-03-05",
        );
        let before = Chronology::Minguo.date_from(date(1900, 1, 9)).unwrap();
        insta::assert_snapshot!(before, @"Minguo BEFORE_ROC 12-01-09");
    }

    #[test]
    fn accessors() {
        let d = Chronology::Minguo.date(113, 3, 5).unwrap();
        assert_eq!(d.year(), 113);
        assert_eq!(d.year_of_era(), 113);
        assert_eq!(d.day_of_year(), 65);
        assert_eq!(d.weekday(), Weekday::Tuesday);
        assert!(d.is_leap_year());
        assert_eq!(d.days_in_month(), 31);
        assert_eq!(d.days_in_year(), 366);
        assert_eq!(d.to_epoch_day(), date(2024, 3, 5).to_epoch_day());

        let j = Chronology::Julian.date(2024, 3, 1).unwrap();
        assert_eq!(j.day_of_year(), 61);
    }

    #[test]
    fn arithmetic() {
        let d = Chronology::ThaiBuddhist.date(2567, 1, 31).unwrap();
        let got = d.checked_add_months(1).unwrap();
        assert_eq!((got.month(), got.day()), (2, 29));
        let got = d.checked_add_months(-13).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2565, 12, 31));
        let got = d.checked_add_days(30).unwrap();
        assert_eq!(got.to_iso_date(), date(2024, 3, 1));

        let j = Chronology::Julian.date(2100, 2, 29).unwrap();
        let got = j.checked_add_years(1).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2101, 2, 28));

        assert!(d.checked_add_days(i64::MAX).is_err());
    }

    #[test]
    fn comparisons() {
        let iso = ChronoDate::from(date(2024, 3, 5));
        let roc = iso.with_chronology(Chronology::Minguo).unwrap();
        let julian = iso.with_chronology(Chronology::Julian).unwrap();
        assert!(iso.is_equal(&roc) && roc.is_equal(&julian));
        assert_ne!(iso, roc);
        assert!(iso < julian && julian < roc);

        let later = roc.checked_add_days(1).unwrap();
        assert!(later.is_after(&julian));
        assert!(julian.is_before(&later));
    }

    #[test]
    fn until_period() {
        let start = Chronology::Minguo.date(113, 1, 31).unwrap();
        let end = ChronoDate::from(date(2025, 3, 1));
        let p = start.until_period(&end).unwrap();
        assert_eq!(p, Period::new(1, 1, 1));
        let p = ChronoDate::from(date(2025, 3, 1))
            .until_period(&ChronoDate::from(date(2024, 1, 31)))
            .unwrap();
        assert_eq!(p, Period::new(-1, -1, -1));
        assert_eq!(p, date(2025, 3, 1).until_period(date(2024, 1, 31)));
    }

    #[test]
    fn fields() {
        let d = Chronology::Minguo.date(113, 3, 5).unwrap();
        assert_eq!(d.get(Field::Year).unwrap(), 113);
        assert_eq!(d.get(Field::Era).unwrap(), 1);
        assert_eq!(d.get(Field::ProlepticMonth).unwrap(), 113 * 12 + 2);
        assert_eq!(d.get(Field::DayOfWeek).unwrap(), 2);
        assert!(d.get(Field::HourOfDay).unwrap_err().is_unsupported());

        let got = d.with_field(Field::DayOfMonth, 31).unwrap();
        assert_eq!(got.day(), 31);
        assert!(d.with_field(Field::DayOfMonth, 32).unwrap_err().is_range());
        let got = d.with_field(Field::DayOfWeek, 7).unwrap();
        assert_eq!(got.day(), 10);
        let got = d.with_field(Field::Era, 0).unwrap();
        assert_eq!((got.year(), got.year_of_era()), (-112, 113));
        let got = d.with_field(Field::YearOfEra, 1).unwrap();
        assert_eq!(got.to_string(), "Minguo ROC 1-03-05");

        let leap = Chronology::Minguo.date(113, 2, 29).unwrap();
        let got = leap.with_field(Field::Year, 112).unwrap();
        assert_eq!(got.day(), 28);
    }
}
