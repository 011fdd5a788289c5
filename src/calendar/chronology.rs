use crate::{
    calendar::ChronoDate,
    civil::Date,
    error::{err, Error},
    temporal::{unsupported_field, Field, ValueRange},
    util::common::{self, EPOCH_DAY_MAX, EPOCH_DAY_MIN, YEAR_MAX, YEAR_MIN},
};

/// Days from `0000-03-01` to `1970-01-01`, both in the Julian calendar.
/// (The latter is `1969-12-19` in the Julian calendar.)
const JULIAN_DAYS_0000_TO_1970: i64 = 719_470;

/// The Julian year range is narrower than the ISO one so that every Julian
/// date maps to a supported epoch day.
const JULIAN_YEAR_MIN: i32 = YEAR_MIN + 1_000_000;
const JULIAN_YEAR_MAX: i32 = YEAR_MAX - 1_000_000;

/// A calendar system.
///
/// Every chronology counts days the same way, so a date in any of them
/// converts to and from an epoch day exactly. They differ in how days are
/// grouped into months and years, and in how years are grouped into eras.
///
/// # Example
///
/// ```
/// use calends::{calendar::Chronology, civil::date};
///
/// let d = Chronology::Minguo.date_from(date(2024, 3, 5))?;
/// assert_eq!(d.to_string(), "Minguo ROC 113-03-05");
///
/// let d = Chronology::ThaiBuddhist.date(2567, 3, 5)?;
/// assert_eq!(d.to_iso_date(), date(2024, 3, 5));
///
/// let julian = Chronology::by_id("julian")?;
/// assert_eq!(julian, Chronology::Julian);
/// assert!(julian.is_leap_year(1900));
/// assert!(!Chronology::Iso.is_leap_year(1900));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Chronology {
    /// The proleptic Gregorian calendar of ISO 8601.
    #[default]
    Iso,
    /// The proleptic Julian calendar, with a leap year every four years.
    Julian,
    /// The calendar of the Republic of China, where year `1` is ISO year
    /// `1912`.
    Minguo,
    /// The Thai solar calendar, where year `2567` is ISO year `2024`.
    ThaiBuddhist,
}

impl Chronology {
    /// Every supported chronology.
    pub const ALL: [Chronology; 4] = [
        Chronology::Iso,
        Chronology::Julian,
        Chronology::Minguo,
        Chronology::ThaiBuddhist,
    ];

    /// Finds a chronology by its [id](Chronology::id) or its
    /// [calendar type](Chronology::calendar_type). Case is ignored.
    ///
    /// # Errors
    ///
    /// This returns an error when no chronology matches.
    pub fn by_id(id: &str) -> Result<Chronology, Error> {
        Chronology::ALL
            .into_iter()
            .find(|c| {
                c.id().eq_ignore_ascii_case(id)
                    || c.calendar_type().eq_ignore_ascii_case(id)
            })
            .ok_or_else(|| err!("unknown calendar system '{id}'"))
    }

    /// Returns the name of this chronology, e.g., `Minguo`.
    pub fn id(self) -> &'static str {
        match self {
            Chronology::Iso => "ISO",
            Chronology::Julian => "Julian",
            Chronology::Minguo => "Minguo",
            Chronology::ThaiBuddhist => "ThaiBuddhist",
        }
    }

    /// Returns the identifier of the calendar system as defined by the
    /// Unicode Locale Data Markup Language, e.g., `roc`.
    pub fn calendar_type(self) -> &'static str {
        match self {
            Chronology::Iso => "iso8601",
            Chronology::Julian => "julian",
            Chronology::Minguo => "roc",
            Chronology::ThaiBuddhist => "buddhist",
        }
    }

    /// Returns true when the proleptic year is a leap year in this
    /// calendar.
    pub fn is_leap_year(self, year: i64) -> bool {
        match self {
            Chronology::Julian => year.rem_euclid(4) == 0,
            _ => {
                let iso = i128::from(year) + i128::from(self.year_offset());
                iso.rem_euclid(4) == 0
                    && (iso.rem_euclid(100) != 0 || iso.rem_euclid(400) == 0)
            }
        }
    }

    /// Returns the number of days in the month of the proleptic year.
    ///
    /// # Errors
    ///
    /// This returns an error when the month is not in `1..=12`.
    pub fn days_in_month(self, year: i64, month: i8) -> Result<i8, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        Ok(match month {
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        })
    }

    /// Returns the number of days in the proleptic year.
    pub fn days_in_year(self, year: i64) -> i16 {
        if self.is_leap_year(year) {
            366
        } else {
            365
        }
    }

    /// Returns the eras of this calendar, earliest first.
    pub fn eras(self) -> [ChronoEra; 2] {
        let era = |value| ChronoEra { chronology: self, value };
        [era(0), era(1)]
    }

    /// Returns the era that the proleptic year falls in.
    pub fn era_of(self, year: i64) -> ChronoEra {
        ChronoEra { chronology: self, value: if year >= 1 { 1 } else { 0 } }
    }

    /// Returns the era with the given field value.
    ///
    /// # Errors
    ///
    /// This returns an error when the value is not `0` or `1`.
    pub fn era(self, value: i64) -> Result<ChronoEra, Error> {
        let value = Field::Era.check_valid_value(value)?;
        Ok(self.eras()[usize::from(value == 1)])
    }

    /// Converts a year of an era to a proleptic year.
    ///
    /// Year `1` of the earlier era is proleptic year `0`, year `2` is `-1`
    /// and so on.
    ///
    /// # Errors
    ///
    /// This returns an error when the era belongs to another chronology or
    /// the year of era is less than `1`.
    pub fn proleptic_year(
        self,
        era: ChronoEra,
        year_of_era: i64,
    ) -> Result<i64, Error> {
        if era.chronology != self {
            return Err(err!(
                "era {era} of the {} calendar can't be used with the {} \
                 calendar",
                era.chronology.id(),
                self.id(),
            ));
        }
        if year_of_era < 1 {
            return Err(Error::range("year-of-era", year_of_era, 1, i64::MAX));
        }
        Ok(if era.value == 1 { year_of_era } else { 1 - year_of_era })
    }

    /// Returns the range of a date field in this calendar.
    ///
    /// # Errors
    ///
    /// This returns an error when the field is not date based.
    pub fn range(self, field: Field) -> Result<ValueRange, Error> {
        let (min, max) = self.year_range();
        let (min, max) = (i64::from(min), i64::from(max));
        let fixed = |min, max| ValueRange::constant(min, min, max, max);
        Ok(match field {
            Field::Year => fixed(min, max),
            Field::YearOfEra => {
                let (before, after) = (1 - min, max);
                ValueRange::constant(1, 1, before.min(after), before.max(after))
            }
            Field::ProlepticMonth => fixed(min * 12, max * 12 + 11),
            _ if field.is_date_based() => field.range(),
            _ => return Err(unsupported_field(field, "Chronology")),
        })
    }

    /// Creates a date from a proleptic year, month and day.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range, or when
    /// the day doesn't exist in the month.
    pub fn date(
        self,
        year: i64,
        month: i8,
        day: i8,
    ) -> Result<ChronoDate, Error> {
        let year = self.check_year(year)?;
        let max = self.days_in_month(i64::from(year), month)?;
        if !(1..=max).contains(&day) {
            return Err(Error::range("day", day, 1, max));
        }
        Ok(ChronoDate::new_unchecked(self, year, month, day))
    }

    /// Creates a date from an era, a year of that era, a month and a day.
    ///
    /// # Errors
    ///
    /// This returns an error when the era belongs to another chronology or
    /// when [`Chronology::date`] would.
    pub fn date_from_era(
        self,
        era: ChronoEra,
        year_of_era: i64,
        month: i8,
        day: i8,
    ) -> Result<ChronoDate, Error> {
        self.date(self.proleptic_year(era, year_of_era)?, month, day)
    }

    /// Creates a date from a proleptic year and a day of that year.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is out of range or the day of
    /// year does not exist in it.
    pub fn date_from_day_of_year(
        self,
        year: i64,
        day: i16,
    ) -> Result<ChronoDate, Error> {
        let checked = self.check_year(year)?;
        let max = self.days_in_year(year);
        if !(1..=max).contains(&day) {
            return Err(Error::range("day-of-year", day, 1, max));
        }
        let leap = i16::from(self.is_leap_year(year));
        let mut remaining = day;
        for month in 1..=12 {
            let len = i16::from(common::days_in_month(1, month))
                + if month == 2 { leap } else { 0 };
            if remaining <= len {
                // OK because `remaining` is at most 31 here.
                let d = i8::try_from(remaining).unwrap();
                return Ok(ChronoDate::new_unchecked(self, checked, month, d));
            }
            remaining -= len;
        }
        unreachable!("day of year {day} is within the year")
    }

    /// Creates a date from a count of days since `1970-01-01`.
    ///
    /// # Errors
    ///
    /// This returns an error when the epoch day is out of range.
    pub fn date_from_epoch_day(
        self,
        epoch_day: i64,
    ) -> Result<ChronoDate, Error> {
        if !(EPOCH_DAY_MIN..=EPOCH_DAY_MAX).contains(&epoch_day) {
            return Err(Error::range(
                "epoch-day",
                epoch_day,
                EPOCH_DAY_MIN,
                EPOCH_DAY_MAX,
            ));
        }
        let (year, month, day) = match self {
            Chronology::Julian => {
                let (year, month, day) = julian_from_epoch_day(epoch_day);
                (self.check_year(year)?, month, day)
            }
            _ => {
                let (year, month, day) = common::from_epoch_day(epoch_day);
                // OK because the offset keeps the year in `i32` range.
                let year = i32::try_from(
                    i64::from(year) - self.year_offset(),
                )
                .unwrap();
                (year, month, day)
            }
        };
        Ok(ChronoDate::new_unchecked(self, year, month, day))
    }

    /// Returns the date in this calendar that falls on the same day as the
    /// given ISO date.
    ///
    /// # Errors
    ///
    /// This returns an error when the day can't be represented in this
    /// calendar.
    pub fn date_from(self, date: Date) -> Result<ChronoDate, Error> {
        self.date_from_epoch_day(date.to_epoch_day())
    }

    /// Returns the number of years to add to a proleptic year in this
    /// calendar to get the ISO year. Not meaningful for `Julian`.
    pub(crate) fn year_offset(self) -> i64 {
        match self {
            Chronology::Iso | Chronology::Julian => 0,
            Chronology::Minguo => 1_911,
            Chronology::ThaiBuddhist => -543,
        }
    }

    fn year_range(self) -> (i32, i32) {
        match self {
            Chronology::Iso => (YEAR_MIN, YEAR_MAX),
            Chronology::Julian => (JULIAN_YEAR_MIN, JULIAN_YEAR_MAX),
            Chronology::Minguo => (YEAR_MIN - 1_911, YEAR_MAX - 1_911),
            Chronology::ThaiBuddhist => (YEAR_MIN + 543, YEAR_MAX + 543),
        }
    }

    pub(crate) fn check_year(self, year: i64) -> Result<i32, Error> {
        let (min, max) = self.year_range();
        if !(i64::from(min)..=i64::from(max)).contains(&year) {
            return Err(Error::range("year", year, min, max));
        }
        // OK because the range is within `i32`.
        Ok(i32::try_from(year).unwrap())
    }

    /// Returns the epoch day of a valid date in this calendar.
    pub(crate) fn to_epoch_day(self, year: i32, month: i8, day: i8) -> i64 {
        match self {
            Chronology::Julian => julian_to_epoch_day(year, month, day),
            _ => {
                // OK because the year range maps onto the ISO one.
                let iso = i32::try_from(i64::from(year) + self.year_offset())
                    .unwrap();
                common::to_epoch_day(iso, month, day)
            }
        }
    }
}

impl core::fmt::Display for Chronology {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// An era of a [`Chronology`].
///
/// Every supported calendar has two eras. The later one, with field value
/// `1`, starts at proleptic year `1`.
///
/// # Example
///
/// ```
/// use calends::calendar::Chronology;
///
/// let [before, roc] = Chronology::Minguo.eras();
/// assert_eq!(before.to_string(), "BEFORE_ROC");
/// assert_eq!(roc.to_string(), "ROC");
/// assert_eq!(Chronology::Minguo.proleptic_year(before, 1)?, 0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ChronoEra {
    chronology: Chronology,
    value: i8,
}

impl ChronoEra {
    /// Returns the chronology this era belongs to.
    pub fn chronology(self) -> Chronology {
        self.chronology
    }

    /// Returns the field value of this era, `0` or `1`.
    pub fn value(self) -> i8 {
        self.value
    }

    /// Returns the short name of this era, e.g., `ROC`.
    pub fn name(self) -> &'static str {
        match (self.chronology, self.value) {
            (Chronology::Iso, 0) => "BCE",
            (Chronology::Iso, _) => "CE",
            (Chronology::Julian, 0) => "BC",
            (Chronology::Julian, _) => "AD",
            (Chronology::Minguo, 0) => "BEFORE_ROC",
            (Chronology::Minguo, _) => "ROC",
            (Chronology::ThaiBuddhist, 0) => "BEFORE_BE",
            (Chronology::ThaiBuddhist, _) => "BE",
        }
    }
}

impl core::fmt::Display for ChronoEra {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a Julian calendar date to an epoch day. Years are counted from
/// March so that the leap day falls at the end.
fn julian_to_epoch_day(year: i32, month: i8, day: i8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let year = i64::from(year) - i64::from(month <= 2);
    let shifted = (month + 9) % 12;
    let day_of_year = (153 * shifted + 2) / 5 + day - 1;
    365 * year + year.div_euclid(4) + day_of_year - JULIAN_DAYS_0000_TO_1970
}

/// The inverse of `julian_to_epoch_day`. The year returned may be out of
/// range for the Julian chronology.
fn julian_from_epoch_day(epoch_day: i64) -> (i64, i8, i8) {
    let days = epoch_day + JULIAN_DAYS_0000_TO_1970;
    let year = (4 * days + 3).div_euclid(1_461);
    let day_of_year = days - (365 * year + year.div_euclid(4));
    let shifted = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted + 2) / 5 + 1;
    let month = if shifted < 10 { shifted + 3 } else { shifted - 9 };
    let year = year + i64::from(month <= 2);
    // OK because month and day are in 1..=12 and 1..=31.
    (year, i8::try_from(month).unwrap(), i8::try_from(day).unwrap())
}
