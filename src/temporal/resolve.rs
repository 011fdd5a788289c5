use std::collections::BTreeMap;

use crate::{
    civil::{Date, DateTime, Time, Weekday},
    error::{temporal::Error as E, Error},
    temporal::{Field, FieldAccess},
    util::common::{
        days_in_month, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE,
        NANOS_PER_SECOND,
    },
};

/// How strictly field values are resolved into a date or time.
///
/// # Example
///
/// ```
/// use calends::{civil::date, temporal::{Field, Fields, ResolverStyle}};
///
/// let fields = Fields::new()
///     .with(Field::Year, 2011)?
///     .with(Field::MonthOfYear, 2)?
///     .with(Field::DayOfMonth, 30)?;
/// assert!(fields.resolve_date(ResolverStyle::Strict).is_err());
/// assert_eq!(fields.resolve_date(ResolverStyle::Smart)?, date(2011, 2, 28));
/// assert_eq!(fields.resolve_date(ResolverStyle::Lenient)?, date(2011, 3, 2));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ResolverStyle {
    /// Every field must be in range and the combination must be valid.
    Strict,
    /// Fields must be in range, but a day of the month past the end of the
    /// month is clamped to the last day. `24:00` is accepted as midnight at
    /// the start of the next day.
    #[default]
    Smart,
    /// Values out of range roll over into the next larger unit.
    Lenient,
}

/// A collection of field values to resolve into a date or a time.
///
/// This is how loosely structured input, like the fields picked out of a
/// custom text format, becomes a [`Date`], [`Time`] or [`DateTime`]. Fields
/// are combined according to a fixed set of rules. For dates these are, in
/// order of preference:
///
/// * `EpochDay`
/// * `Year` + `MonthOfYear` + `DayOfMonth`
/// * `Year` + `MonthOfYear` + `AlignedWeekOfMonth` +
///   `AlignedDayOfWeekInMonth` (or `DayOfWeek`)
/// * `Year` + `DayOfYear`
/// * `Year` + `AlignedWeekOfYear` + `AlignedDayOfWeekInYear` (or
///   `DayOfWeek`)
///
/// `ProlepticMonth` stands in for `Year` + `MonthOfYear`, and `YearOfEra`
/// with an optional `Era` stands in for `Year`.
///
/// Times are built from `HourOfDay` with optional `MinuteOfHour`,
/// `SecondOfMinute` and sub-second fields. `NanoOfDay`, `SecondOfDay`,
/// `MinuteOfDay`, `ClockHourOfDay`, `ClockHourOfAmPm` and `AmPmOfDay` +
/// `HourOfAmPm` are first broken down into those.
///
/// Fields that are not consumed by a rule are checked against the resolved
/// value. For example, a `DayOfWeek` that disagrees with the resolved date
/// is an error.
///
/// # Example
///
/// ```
/// use calends::{civil::{date, time}, temporal::{Field, Fields, ResolverStyle}};
///
/// let fields = Fields::new()
///     .with(Field::Year, 2024)?
///     .with(Field::DayOfYear, 65)?
///     .with(Field::DayOfWeek, 2)?
///     .with(Field::ClockHourOfAmPm, 3)?
///     .with(Field::AmPmOfDay, 1)?;
/// let dt = fields.resolve_datetime(ResolverStyle::Strict)?;
/// assert_eq!(dt, date(2024, 3, 5).at(time(15, 0, 0, 0)));
///
/// // Tuesday is day 2, so day 3 disagrees.
/// let fields = Fields::new()
///     .with(Field::EpochDay, 19_787)?
///     .with(Field::DayOfWeek, 3)?;
/// assert!(fields.resolve_date(ResolverStyle::Smart).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fields {
    values: BTreeMap<Field, i64>,
}

impl Fields {
    /// Creates an empty collection of fields.
    pub fn new() -> Fields {
        Fields::default()
    }

    /// Returns this collection with the field set.
    ///
    /// # Errors
    ///
    /// This returns an error when the field already has a different value.
    pub fn with(mut self, field: Field, value: i64) -> Result<Fields, Error> {
        self.insert(field, value)?;
        Ok(self)
    }

    /// Sets the field.
    ///
    /// Setting a field to the value it already has is allowed.
    ///
    /// # Errors
    ///
    /// This returns an error when the field already has a different value.
    pub fn insert(&mut self, field: Field, value: i64) -> Result<(), Error> {
        insert_checked(&mut self.values, field, value)
    }

    /// Returns the value of the field, if set.
    pub fn get(&self, field: Field) -> Option<i64> {
        self.values.get(&field).copied()
    }

    /// Removes the field, returning its value if it was set.
    pub fn remove(&mut self, field: Field) -> Option<i64> {
        self.values.remove(&field)
    }

    /// Returns the number of fields set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the fields set, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.values.iter().map(|(&field, &value)| (field, value))
    }

    /// Resolves the date fields into a date. Time fields are ignored.
    ///
    /// # Errors
    ///
    /// This returns an error when the date fields are insufficient,
    /// conflict with one another or are invalid for the style given.
    pub fn resolve_date(&self, style: ResolverStyle) -> Result<Date, Error> {
        let mut r = Resolver::new(self, style);
        let date = r.date()?;
        r.cross_check(&date, Field::is_date_based)?;
        Ok(date)
    }

    /// Resolves the time fields into a time. Date fields are ignored, as
    /// is any overflow into the next day.
    ///
    /// # Errors
    ///
    /// This returns an error when the time fields are insufficient,
    /// conflict with one another or are invalid for the style given.
    pub fn resolve_time(&self, style: ResolverStyle) -> Result<Time, Error> {
        let mut r = Resolver::new(self, style);
        let (time, _) = r.time()?;
        r.cross_check(&time, Field::is_time_based)?;
        Ok(time)
    }

    /// Resolves both date and time fields into a datetime.
    ///
    /// When the time overflows, as it may with `24:00` in the smart style
    /// or with any out of range value in the lenient style, the excess
    /// days are added to the date.
    ///
    /// # Errors
    ///
    /// This returns an error when either the date or the time can't be
    /// resolved, or when adding the excess days overflows.
    pub fn resolve_datetime(
        &self,
        style: ResolverStyle,
    ) -> Result<DateTime, Error> {
        let mut r = Resolver::new(self, style);
        let date = r.date()?;
        let (time, days) = r.time()?;
        r.cross_check(&date, Field::is_date_based)?;
        r.cross_check(&time, Field::is_time_based)?;
        Ok(date.checked_add_days(days)?.at(time))
    }
}

impl FromIterator<(Field, i64)> for Fields {
    /// Collects fields, with later values replacing earlier ones.
    fn from_iter<I: IntoIterator<Item = (Field, i64)>>(it: I) -> Fields {
        Fields { values: it.into_iter().collect() }
    }
}

/// Resolution state. Fields are removed from the map as rules consume
/// them, and rules may add the finer fields they derive.
struct Resolver {
    values: BTreeMap<Field, i64>,
    style: ResolverStyle,
}

impl Resolver {
    fn new(fields: &Fields, style: ResolverStyle) -> Resolver {
        Resolver { values: fields.values.clone(), style }
    }

    fn has(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    fn take(&mut self, field: Field) -> Option<i64> {
        self.values.remove(&field)
    }

    /// Like `take`, but the field must be set since a rule was selected
    /// because of it.
    fn must(&mut self, field: Field) -> Result<i64, Error> {
        self.take(field).ok_or_else(|| incomplete(field.name()))
    }

    fn add(&mut self, field: Field, value: i64) -> Result<(), Error> {
        insert_checked(&mut self.values, field, value)
    }

    fn lenient(&self) -> bool {
        self.style == ResolverStyle::Lenient
    }

    fn strict(&self) -> bool {
        self.style == ResolverStyle::Strict
    }

    /// Checks the range of a value unless resolving leniently.
    fn check(&self, field: Field, value: i64) -> Result<i64, Error> {
        if self.lenient() {
            return Ok(value);
        }
        field.check_valid_value(value)
    }

    fn date(&mut self) -> Result<Date, Error> {
        if let Some(epoch_day) = self.take(Field::EpochDay) {
            return Date::from_epoch_day(epoch_day);
        }
        if let Some(pm) = self.take(Field::ProlepticMonth) {
            let pm = self.check(Field::ProlepticMonth, pm)?;
            self.add(Field::Year, pm.div_euclid(12))?;
            self.add(Field::MonthOfYear, pm.rem_euclid(12) + 1)?;
        }
        self.year_of_era()?;

        if !self.has(Field::Year) {
            return Err(incomplete("date"));
        }
        if self.has(Field::MonthOfYear) {
            if self.has(Field::DayOfMonth) {
                return self.year_month_day();
            }
            if self.has(Field::AlignedWeekOfMonth) {
                if self.has(Field::AlignedDayOfWeekInMonth) {
                    return self.year_month_aligned();
                }
                if self.has(Field::DayOfWeek) {
                    return self.year_month_aligned_weekday();
                }
            }
        }
        if self.has(Field::DayOfYear) {
            return self.year_day();
        }
        if self.has(Field::AlignedWeekOfYear) {
            if self.has(Field::AlignedDayOfWeekInYear) {
                return self.year_aligned();
            }
            if self.has(Field::DayOfWeek) {
                return self.year_aligned_weekday();
            }
        }
        Err(incomplete("date"))
    }

    fn year_of_era(&mut self) -> Result<(), Error> {
        let Some(yoe) = self.take(Field::YearOfEra) else {
            if let Some(&era) = self.values.get(&Field::Era) {
                Field::Era.check_valid_value(era)?;
            }
            return Ok(());
        };
        let yoe = self.check(Field::YearOfEra, yoe)?;
        let bce = |yoe: i64| {
            1i64.checked_sub(yoe).ok_or_else(|| Error::overflow("year"))
        };
        if let Some(era) = self.take(Field::Era) {
            let year = match Field::Era.check_valid_value(era)? {
                1 => yoe,
                _ => bce(yoe)?,
            };
            return self.add(Field::Year, year);
        }
        match self.values.get(&Field::Year).copied() {
            Some(year) if year > 0 => self.add(Field::Year, yoe),
            Some(_) => self.add(Field::Year, bce(yoe)?),
            // Without an era, the year of era is left to be cross checked
            // against a date resolved by other means.
            None if self.strict() => {
                self.values.insert(Field::YearOfEra, yoe);
                Ok(())
            }
            None => self.add(Field::Year, yoe),
        }
    }

    fn year(&mut self) -> Result<i32, Error> {
        let year = self.must(Field::Year)?;
        Field::Year.check_valid_int_value(year)
    }

    fn year_month_day(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let month = self.must(Field::MonthOfYear)?;
        let day = self.must(Field::DayOfMonth)?;
        if self.lenient() {
            return Date::new(year, 1, 1)?
                .checked_add_months(minus_one(month)?)?
                .checked_add_days(minus_one(day)?);
        }
        let month = check_i8(Field::MonthOfYear, month)?;
        let mut day = check_i8(Field::DayOfMonth, day)?;
        if self.style == ResolverStyle::Smart {
            day = day.min(days_in_month(year, month));
        }
        Date::new(year, month, day)
    }

    fn year_day(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let day = self.must(Field::DayOfYear)?;
        if self.lenient() {
            return Date::new(year, 1, 1)?.checked_add_days(minus_one(day)?);
        }
        let day = Field::DayOfYear.check_valid_value(day)?;
        // OK because day of year is in 1..=366.
        Date::from_day_of_year(year, i16::try_from(day).unwrap())
    }

    fn year_month_aligned(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let month = self.must(Field::MonthOfYear)?;
        let week = self.must(Field::AlignedWeekOfMonth)?;
        let day = self.must(Field::AlignedDayOfWeekInMonth)?;
        if self.lenient() {
            return Date::new(year, 1, 1)?
                .checked_add_months(minus_one(month)?)?
                .checked_add_weeks(minus_one(week)?)?
                .checked_add_days(minus_one(day)?);
        }
        let month = check_i8(Field::MonthOfYear, month)?;
        let week = Field::AlignedWeekOfMonth.check_valid_value(week)?;
        let day = Field::AlignedDayOfWeekInMonth.check_valid_value(day)?;
        let date = Date::new(year, month, 1)?
            .checked_add_days((week - 1) * 7 + (day - 1))?;
        self.check_same_month(date, month)
    }

    fn year_month_aligned_weekday(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let month = self.must(Field::MonthOfYear)?;
        let week = self.must(Field::AlignedWeekOfMonth)?;
        let weekday = self.must(Field::DayOfWeek)?;
        if self.lenient() {
            let date = Date::new(year, 1, 1)?
                .checked_add_months(minus_one(month)?)?
                .checked_add_weeks(minus_one(week)?)?;
            return next_or_same_lenient(date, weekday);
        }
        let month = check_i8(Field::MonthOfYear, month)?;
        let week = Field::AlignedWeekOfMonth.check_valid_value(week)?;
        let weekday = check_weekday(weekday)?;
        let date = Date::new(year, month, 1)?.checked_add_weeks(week - 1)?;
        let date = next_or_same(date, weekday)?;
        self.check_same_month(date, month)
    }

    fn year_aligned(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let week = self.must(Field::AlignedWeekOfYear)?;
        let day = self.must(Field::AlignedDayOfWeekInYear)?;
        if self.lenient() {
            return Date::new(year, 1, 1)?
                .checked_add_weeks(minus_one(week)?)?
                .checked_add_days(minus_one(day)?);
        }
        let week = Field::AlignedWeekOfYear.check_valid_value(week)?;
        let day = Field::AlignedDayOfWeekInYear.check_valid_value(day)?;
        let date = Date::new(year, 1, 1)?
            .checked_add_days((week - 1) * 7 + (day - 1))?;
        self.check_same_year(date, year)
    }

    fn year_aligned_weekday(&mut self) -> Result<Date, Error> {
        let year = self.year()?;
        let week = self.must(Field::AlignedWeekOfYear)?;
        let weekday = self.must(Field::DayOfWeek)?;
        if self.lenient() {
            let date =
                Date::new(year, 1, 1)?.checked_add_weeks(minus_one(week)?)?;
            return next_or_same_lenient(date, weekday);
        }
        let week = Field::AlignedWeekOfYear.check_valid_value(week)?;
        let weekday = check_weekday(weekday)?;
        let date = Date::new(year, 1, 1)?.checked_add_weeks(week - 1)?;
        let date = next_or_same(date, weekday)?;
        self.check_same_year(date, year)
    }

    fn check_same_month(&self, date: Date, month: i8) -> Result<Date, Error> {
        if self.strict() && date.month() != month {
            return Err(Error::from(E::CrossCheck {
                field: Field::MonthOfYear,
                value: i64::from(month),
                resolved: i64::from(date.month()),
            }));
        }
        Ok(date)
    }

    fn check_same_year(&self, date: Date, year: i32) -> Result<Date, Error> {
        if self.strict() && date.year() != year {
            return Err(Error::from(E::CrossCheck {
                field: Field::Year,
                value: i64::from(year),
                resolved: i64::from(date.year()),
            }));
        }
        Ok(date)
    }

    /// Resolves the time fields, returning the time and the number of days
    /// it overflowed by.
    fn time(&mut self) -> Result<(Time, i64), Error> {
        self.break_down_time()?;

        let Some(hour) = self.take(Field::HourOfDay) else {
            return Err(incomplete("time"));
        };
        let minute = self.take(Field::MinuteOfHour);
        let second = self.take(Field::SecondOfMinute);
        let nano = self.take(Field::NanoOfSecond);
        // Zeros are only inferred for trailing fields, so `10:__:30` is
        // incomplete.
        let gap = (minute.is_none() && (second.is_some() || nano.is_some()))
            || (second.is_none() && nano.is_some());
        if gap {
            return Err(incomplete("time"));
        }
        let (minute, second, nano) =
            (minute.unwrap_or(0), second.unwrap_or(0), nano.unwrap_or(0));

        match self.style {
            ResolverStyle::Lenient => {
                let total = i128::from(hour) * i128::from(NANOS_PER_HOUR)
                    + i128::from(minute) * i128::from(NANOS_PER_MINUTE)
                    + i128::from(second) * i128::from(NANOS_PER_SECOND)
                    + i128::from(nano);
                let days = total.div_euclid(i128::from(NANOS_PER_DAY));
                let days = i64::try_from(days)
                    .map_err(|_| Error::overflow("days"))?;
                // OK because the remainder is less than a day of nanos.
                let nod = i64::try_from(
                    total.rem_euclid(i128::from(NANOS_PER_DAY)),
                )
                .unwrap();
                Ok((Time::from_nanosecond_of_day(nod)?, days))
            }
            ResolverStyle::Smart
                if hour == 24 && minute == 0 && second == 0 && nano == 0 =>
            {
                Ok((Time::MIDNIGHT, 1))
            }
            _ => {
                let time = Time::new(
                    check_i8(Field::HourOfDay, hour)?,
                    check_i8(Field::MinuteOfHour, minute)?,
                    check_i8(Field::SecondOfMinute, second)?,
                    Field::NanoOfSecond.check_valid_int_value(nano)?,
                )?;
                Ok((time, 0))
            }
        }
    }

    /// Rewrites the compound time fields in terms of hour, minute, second
    /// and nanosecond.
    fn break_down_time(&mut self) -> Result<(), Error> {
        if let Some(hour) = self.take(Field::ClockHourOfDay) {
            if self.strict() || (!self.lenient() && hour != 0) {
                Field::ClockHourOfDay.check_valid_value(hour)?;
            }
            self.add(Field::HourOfDay, if hour == 24 { 0 } else { hour })?;
        }
        if let Some(hour) = self.take(Field::ClockHourOfAmPm) {
            if self.strict() || (!self.lenient() && hour != 0) {
                Field::ClockHourOfAmPm.check_valid_value(hour)?;
            }
            self.add(Field::HourOfAmPm, if hour == 12 { 0 } else { hour })?;
        }
        if self.has(Field::AmPmOfDay) && self.has(Field::HourOfAmPm) {
            let ampm = self.must(Field::AmPmOfDay)?;
            let hour = self.must(Field::HourOfAmPm)?;
            let ampm = self.check(Field::AmPmOfDay, ampm)?;
            let hour = self.check(Field::HourOfAmPm, hour)?;
            let hour = ampm
                .checked_mul(12)
                .and_then(|h| h.checked_add(hour))
                .ok_or_else(|| Error::overflow("hour"))?;
            self.add(Field::HourOfDay, hour)?;
        }
        if let Some(nod) = self.take(Field::NanoOfDay) {
            let nod = self.check(Field::NanoOfDay, nod)?;
            self.add(Field::HourOfDay, nod.div_euclid(NANOS_PER_HOUR))?;
            self.add(
                Field::MinuteOfHour,
                nod.div_euclid(NANOS_PER_MINUTE).rem_euclid(60),
            )?;
            self.add(
                Field::SecondOfMinute,
                nod.div_euclid(NANOS_PER_SECOND).rem_euclid(60),
            )?;
            self.add(Field::NanoOfSecond, nod.rem_euclid(NANOS_PER_SECOND))?;
        }
        if let Some(micros) = self.take(Field::MicroOfDay) {
            let micros = self.check(Field::MicroOfDay, micros)?;
            self.add(Field::SecondOfDay, micros.div_euclid(1_000_000))?;
            self.add(Field::MicroOfSecond, micros.rem_euclid(1_000_000))?;
        }
        if let Some(millis) = self.take(Field::MilliOfDay) {
            let millis = self.check(Field::MilliOfDay, millis)?;
            self.add(Field::SecondOfDay, millis.div_euclid(1_000))?;
            self.add(Field::MilliOfSecond, millis.rem_euclid(1_000))?;
        }
        if let Some(sod) = self.take(Field::SecondOfDay) {
            let sod = self.check(Field::SecondOfDay, sod)?;
            self.add(Field::HourOfDay, sod.div_euclid(3_600))?;
            self.add(Field::MinuteOfHour, sod.div_euclid(60).rem_euclid(60))?;
            self.add(Field::SecondOfMinute, sod.rem_euclid(60))?;
        }
        if let Some(mod_) = self.take(Field::MinuteOfDay) {
            let mod_ = self.check(Field::MinuteOfDay, mod_)?;
            self.add(Field::HourOfDay, mod_.div_euclid(60))?;
            self.add(Field::MinuteOfHour, mod_.rem_euclid(60))?;
        }
        // A coarser sub-second field next to a finer one is left behind to
        // be cross checked.
        if !self.has(Field::NanoOfSecond) {
            let sub = [
                (Field::MicroOfSecond, 1_000),
                (Field::MilliOfSecond, 1_000_000),
            ];
            for (field, nanos) in sub {
                if let Some(value) = self.take(field) {
                    let value = self.check(field, value)?;
                    let nano = value
                        .checked_mul(nanos)
                        .ok_or_else(|| Error::overflow("nanosecond"))?;
                    self.add(Field::NanoOfSecond, nano)?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Checks that every remaining field selected by `which` agrees with the
    /// resolved value.
    fn cross_check<T: FieldAccess>(
        &self,
        resolved: &T,
        which: fn(Field) -> bool,
    ) -> Result<(), Error> {
        for (&field, &value) in self.values.iter() {
            if !which(field) {
                continue;
            }
            let got = resolved.get(field)?;
            if got != value {
                return Err(Error::from(E::CrossCheck {
                    field,
                    value,
                    resolved: got,
                }));
            }
        }
        Ok(())
    }
}

fn insert_checked(
    values: &mut BTreeMap<Field, i64>,
    field: Field,
    value: i64,
) -> Result<(), Error> {
    match values.insert(field, value) {
        Some(existing) if existing != value => {
            values.insert(field, existing);
            Err(Error::from(E::Conflict { field, existing, new: value }))
        }
        _ => Ok(()),
    }
}

/// Moves forward to the given weekday, staying put if the date already
/// falls on it.
fn next_or_same(date: Date, weekday: Weekday) -> Result<Date, Error> {
    date.checked_add_days(i64::from(date.weekday().days_until(weekday)))
}

/// Like `next_or_same`, but a day of the week outside `1..=7` first moves
/// the date by whole weeks.
fn next_or_same_lenient(date: Date, weekday: i64) -> Result<Date, Error> {
    let zero = minus_one(weekday)?;
    let date = date.checked_add_weeks(zero.div_euclid(7))?;
    // OK because the remainder is in 0..=6.
    let offset = i8::try_from(zero.rem_euclid(7)).unwrap();
    let weekday = Weekday::from_monday_one_offset(offset + 1)?;
    next_or_same(date, weekday)
}

fn check_weekday(value: i64) -> Result<Weekday, Error> {
    Weekday::from_monday_one_offset(check_i8(Field::DayOfWeek, value)?)
}

fn check_i8(field: Field, value: i64) -> Result<i8, Error> {
    let value = field.check_valid_value(value)?;
    i8::try_from(value)
        .map_err(|_| Error::range(field.name(), value, i8::MIN, i8::MAX))
}

fn minus_one(value: i64) -> Result<i64, Error> {
    value.checked_sub(1).ok_or_else(|| Error::overflow("field value"))
}

#[cold]
#[inline(never)]
fn incomplete(what: &'static str) -> Error {
    Error::from(E::Incomplete { what })
}

#[cfg(test)]
mod tests {
    use crate::civil::{date, time};

    use super::*;

    use self::{Field::*, ResolverStyle::*};

    fn fields(values: &[(Field, i64)]) -> Fields {
        let mut fields = Fields::new();
        for &(field, value) in values {
            fields.insert(field, value).unwrap();
        }
        fields
    }

    #[test]
    fn year_month_day() {
        let f = fields(&[(Year, 2011), (MonthOfYear, 2), (DayOfMonth, 30)]);
        let err = f.resolve_date(Strict).unwrap_err();
        assert!(err.is_invalid_date());
        assert_eq!(f.resolve_date(Smart).unwrap(), date(2011, 2, 28));
        assert_eq!(f.resolve_date(Lenient).unwrap(), date(2011, 3, 2));

        let f = fields(&[(Year, 2011), (MonthOfYear, 4), (DayOfMonth, 31)]);
        assert_eq!(f.resolve_date(Smart).unwrap(), date(2011, 4, 30));

        let f = fields(&[(Year, 2011), (MonthOfYear, 2), (DayOfMonth, 32)]);
        assert!(f.resolve_date(Smart).unwrap_err().is_range());
        assert_eq!(f.resolve_date(Lenient).unwrap(), date(2011, 3, 4));

        let f = fields(&[(Year, 2012), (MonthOfYear, 2), (DayOfMonth, 29)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2012, 2, 29));

        let f = fields(&[(Year, 2011), (MonthOfYear, 14), (DayOfMonth, 0)]);
        assert_eq!(f.resolve_date(Lenient).unwrap(), date(2012, 1, 31));
    }

    #[test]
    fn epoch_day_and_cross_check() {
        let f = fields(&[(EpochDay, 0), (DayOfWeek, 4)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(1970, 1, 1));

        let f = fields(&[(EpochDay, 0), (DayOfWeek, 5)]);
        insta::assert_snapshot!(
            f.resolve_date(Smart).unwrap_err(),
            @"conflict found: field DayOfWeek 5 differs from DayOfWeek 4 derived from the resolved value",
        );
    }

    #[test]
    fn proleptic_month_and_eras() {
        let f = fields(&[(ProlepticMonth, 2024 * 12 + 2), (DayOfMonth, 5)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 3, 5));

        let f = fields(&[
            (ProlepticMonth, 2024 * 12 + 2),
            (Year, 2023),
            (DayOfMonth, 5),
        ]);
        insta::assert_snapshot!(
            f.resolve_date(Smart).unwrap_err(),
            @"conflict found: Year 2023 differs from Year 2024",
        );

        let f = fields(&[
            (YearOfEra, 1),
            (Era, 0),
            (MonthOfYear, 1),
            (DayOfMonth, 1),
        ]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(0, 1, 1));

        let f =
            fields(&[(YearOfEra, 2024), (MonthOfYear, 1), (DayOfMonth, 1)]);
        assert_eq!(f.resolve_date(Smart).unwrap(), date(2024, 1, 1));
        insta::assert_snapshot!(
            f.resolve_date(Strict).unwrap_err(),
            @"not enough fields were given to resolve a date",
        );

        let f = fields(&[(YearOfEra, 2024), (EpochDay, 19_787)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 3, 5));
    }

    #[test]
    fn year_day() {
        let f = fields(&[(Year, 2023), (DayOfYear, 366)]);
        assert!(f.resolve_date(Smart).unwrap_err().is_invalid_date());
        assert_eq!(f.resolve_date(Lenient).unwrap(), date(2024, 1, 1));
        let f = fields(&[(Year, 2024), (DayOfYear, 60)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn aligned_weeks() {
        let f = fields(&[
            (Year, 2024),
            (MonthOfYear, 3),
            (AlignedWeekOfMonth, 2),
            (AlignedDayOfWeekInMonth, 3),
        ]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 3, 10));

        let f = fields(&[
            (Year, 2024),
            (MonthOfYear, 3),
            (AlignedWeekOfMonth, 2),
            (DayOfWeek, 1),
        ]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 3, 11));

        let f = fields(&[
            (Year, 2023),
            (MonthOfYear, 2),
            (AlignedWeekOfMonth, 5),
            (AlignedDayOfWeekInMonth, 1),
        ]);
        assert_eq!(f.resolve_date(Smart).unwrap(), date(2023, 3, 1));
        insta::assert_snapshot!(
            f.resolve_date(Strict).unwrap_err(),
            @"conflict found: field MonthOfYear 2 differs from MonthOfYear 3 derived from the resolved value",
        );

        let f = fields(&[
            (Year, 2024),
            (AlignedWeekOfYear, 10),
            (AlignedDayOfWeekInYear, 1),
        ]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 3, 4));

        let f =
            fields(&[(Year, 2024), (AlignedWeekOfYear, 1), (DayOfWeek, 7)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 1, 7));
        let f =
            fields(&[(Year, 2024), (AlignedWeekOfYear, 1), (DayOfWeek, 8)]);
        assert!(f.resolve_date(Smart).is_err());
        assert_eq!(f.resolve_date(Lenient).unwrap(), date(2024, 1, 8));
    }

    #[test]
    fn conflicts() {
        let mut f = Fields::new();
        f.insert(Year, 2024).unwrap();
        f.insert(Year, 2024).unwrap();
        let err = f.insert(Year, 2023).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"conflict found: Year 2024 differs from Year 2023",
        );
        assert_eq!(f.get(Year), Some(2024));
        assert_eq!(f.len(), 1);

        let f = fields(&[(Year, 2024)]);
        insta::assert_snapshot!(
            f.resolve_date(Smart).unwrap_err(),
            @"not enough fields were given to resolve a date",
        );
    }

    #[test]
    fn times() {
        let f = fields(&[(SecondOfDay, 3_661)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(1, 1, 1, 0));

        let f = fields(&[(NanoOfDay, 3_661_000_000_123)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(1, 1, 1, 123));

        let f = fields(&[(SecondOfDay, 3_661), (MilliOfSecond, 5)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(1, 1, 1, 5_000_000));
        let f = fields(&[(MinuteOfDay, 61), (MicroOfSecond, 5)]);
        assert!(f.resolve_time(Strict).is_err());

        let f = fields(&[(ClockHourOfDay, 24)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(0, 0, 0, 0));

        let f = fields(&[(AmPmOfDay, 1), (HourOfAmPm, 3), (MinuteOfHour, 30)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(15, 30, 0, 0));

        let f = fields(&[(AmPmOfDay, 0), (ClockHourOfAmPm, 12)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(0, 0, 0, 0));

        let f = fields(&[(HourOfDay, 15), (AmPmOfDay, 0)]);
        assert!(f.resolve_time(Strict).is_err());
        let f = fields(&[(HourOfDay, 15), (AmPmOfDay, 1)]);
        assert_eq!(f.resolve_time(Strict).unwrap(), time(15, 0, 0, 0));

        let f = fields(&[(HourOfDay, 10), (SecondOfMinute, 30)]);
        insta::assert_snapshot!(
            f.resolve_time(Smart).unwrap_err(),
            @"not enough fields were given to resolve a time",
        );

        let f = fields(&[
            (HourOfDay, 10),
            (MinuteOfHour, 0),
            (SecondOfMinute, 0),
            (NanoOfSecond, 5_000_000),
            (MilliOfSecond, 6),
        ]);
        assert!(f.resolve_time(Smart).is_err());
    }

    #[test]
    fn overflowing_times() {
        let day = [(Year, 2024), (MonthOfYear, 2), (DayOfMonth, 29)];

        let f = fields(&day).with(HourOfDay, 24).unwrap();
        let f = f.with(MinuteOfHour, 0).unwrap();
        assert!(f.resolve_datetime(Strict).unwrap_err().is_range());
        assert_eq!(
            f.resolve_datetime(Smart).unwrap(),
            date(2024, 3, 1).at(time(0, 0, 0, 0)),
        );
        assert_eq!(f.resolve_time(Smart).unwrap(), time(0, 0, 0, 0));

        let f = fields(&day).with(HourOfDay, 25).unwrap();
        let f = f.with(MinuteOfHour, 61).unwrap();
        assert_eq!(
            f.resolve_datetime(Lenient).unwrap(),
            date(2024, 3, 1).at(time(2, 1, 0, 0)),
        );

        let f = fields(&day).with(HourOfDay, -1).unwrap();
        assert_eq!(
            f.resolve_datetime(Lenient).unwrap(),
            date(2024, 2, 28).at(time(23, 0, 0, 0)),
        );
    }

    #[test]
    fn collect() {
        let f: Fields = [(Year, 2024), (DayOfYear, 1)].into_iter().collect();
        let got: Vec<_> = f.iter().collect();
        assert_eq!(got, vec![(DayOfYear, 1), (Year, 2024)]);
        assert_eq!(f.resolve_date(Strict).unwrap(), date(2024, 1, 1));
    }
}
