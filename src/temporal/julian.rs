use crate::{
    civil::Date,
    error::Error,
    temporal::{Unit, ValueRange},
    util::common::{EPOCH_DAY_MAX, EPOCH_DAY_MIN},
};

/// A continuous count of days used by astronomers and chronologists.
///
/// Each variant is a fixed offset from the epoch day, so converting a
/// [`Date`] to any of them (and back) is exact. Days start at midnight,
/// which means the Julian day here is the value at noon of the given date.
///
/// # Example
///
/// ```
/// use calends::{civil::date, temporal::JulianField};
///
/// let d = date(1970, 1, 1);
/// assert_eq!(JulianField::JulianDay.get(d), 2_440_588);
/// assert_eq!(JulianField::ModifiedJulianDay.get(d), 40_587);
/// assert_eq!(JulianField::RataDie.get(d), 719_163);
///
/// let d = JulianField::ModifiedJulianDay.adjust(d, 0)?;
/// assert_eq!(d, date(1858, 11, 17));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JulianField {
    /// The number of days since noon on `-4713-11-24`, the start of the
    /// Julian period.
    JulianDay,
    /// The Julian day minus `2,400,000.5`. Day zero is `1858-11-17`.
    ModifiedJulianDay,
    /// The number of days where `0001-01-01` is day one.
    RataDie,
}

impl JulianField {
    fn offset(self) -> i64 {
        match self {
            JulianField::JulianDay => 2_440_588,
            JulianField::ModifiedJulianDay => 40_587,
            JulianField::RataDie => 719_163,
        }
    }

    /// Returns the day count for the given date.
    pub fn get(self, date: Date) -> i64 {
        date.to_epoch_day() + self.offset()
    }

    /// Returns the date with the given day count.
    ///
    /// # Errors
    ///
    /// This returns a range error when the day count is outside
    /// [`JulianField::range`].
    pub fn adjust(self, _date: Date, value: i64) -> Result<Date, Error> {
        let range = self.range();
        if !range.is_valid_value(value) {
            return Err(Error::range(
                self.name(),
                value,
                range.minimum(),
                range.maximum(),
            ));
        }
        Date::from_epoch_day(value - self.offset())
    }

    /// Returns the range of valid day counts.
    pub fn range(self) -> ValueRange {
        let offset = self.offset();
        ValueRange::constant(
            EPOCH_DAY_MIN + offset,
            EPOCH_DAY_MIN + offset,
            EPOCH_DAY_MAX + offset,
            EPOCH_DAY_MAX + offset,
        )
    }

    /// Returns the unit counted by this field, which is always
    /// [`Unit::Day`].
    pub fn base_unit(self) -> Unit {
        Unit::Day
    }

    /// Returns the unit bounding this field, which is always
    /// [`Unit::Forever`].
    pub fn range_unit(self) -> Unit {
        Unit::Forever
    }

    fn name(self) -> &'static str {
        match self {
            JulianField::JulianDay => "JulianDay",
            JulianField::ModifiedJulianDay => "ModifiedJulianDay",
            JulianField::RataDie => "RataDie",
        }
    }
}

impl core::fmt::Display for JulianField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn counts() {
        let d = date(2000, 1, 1);
        assert_eq!(JulianField::JulianDay.get(d), 2_451_545);
        assert_eq!(JulianField::ModifiedJulianDay.get(d), 51_544);
        assert_eq!(JulianField::RataDie.get(d), 730_120);
        assert_eq!(JulianField::RataDie.get(date(1, 1, 1)), 1);
    }

    #[test]
    fn adjust() {
        let d = date(2024, 6, 1);
        let got = JulianField::JulianDay.adjust(d, 2_451_545).unwrap();
        assert_eq!(got, date(2000, 1, 1));
        let got = JulianField::RataDie.adjust(d, 1).unwrap();
        assert_eq!(got, date(1, 1, 1));

        let max = JulianField::RataDie.range().maximum();
        assert!(JulianField::RataDie.adjust(d, max).is_ok());
        let err = JulianField::RataDie.adjust(d, max + 1).unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(
            JulianField::ModifiedJulianDay,
            @"ModifiedJulianDay",
        );
    }
}
