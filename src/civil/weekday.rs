use crate::error::Error;

/// A representation for the day of the week.
///
/// The default representation follows ISO 8601. That is, the week starts
/// with Monday and numbering starts at `1`. Other representations are
/// available through the `to_*_offset` and `from_*_offset` routines.
///
/// # Example
///
/// ```
/// use calends::civil::Weekday;
///
/// let wd = Weekday::Saturday;
/// assert_eq!(wd.to_monday_one_offset(), 6);
/// assert_eq!(wd.to_sunday_zero_offset(), 6);
/// assert_eq!(wd.next(), Weekday::Sunday);
/// assert_eq!(wd.wrapping_add(-6), Weekday::Sunday);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Convert an offset to a weekday, where Monday is `1` and Sunday is
    /// `7`.
    ///
    /// # Errors
    ///
    /// This returns an error when the offset is not in `1..=7`.
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        if !(1..=7).contains(&offset) {
            return Err(Error::range("weekday", offset, 1, 7));
        }
        Ok(Weekday::from_monday_one_offset_unchecked(offset))
    }

    /// Convert an offset to a weekday, where Sunday is `0` and Saturday is
    /// `6`.
    ///
    /// # Errors
    ///
    /// This returns an error when the offset is not in `0..=6`.
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0..=6).contains(&offset) {
            return Err(Error::range("weekday", offset, 0, 6));
        }
        Ok(Weekday::from_monday_one_offset_unchecked(if offset == 0 {
            7
        } else {
            offset
        }))
    }

    /// Returns this weekday as an offset where Monday is `1`.
    pub const fn to_monday_one_offset(self) -> i8 {
        self as i8 + 1
    }

    /// Returns this weekday as an offset where Monday is `0`.
    pub const fn to_monday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Returns this weekday as an offset where Sunday is `0`.
    pub const fn to_sunday_zero_offset(self) -> i8 {
        (self as i8 + 1) % 7
    }

    /// Returns the next weekday, wrapping around from Sunday to Monday.
    pub fn next(self) -> Weekday {
        self.wrapping_add(1)
    }

    /// Returns the previous weekday, wrapping around from Monday to Sunday.
    pub fn previous(self) -> Weekday {
        self.wrapping_add(-1)
    }

    /// Adds the given number of days to this weekday, wrapping around.
    pub fn wrapping_add(self, days: i64) -> Weekday {
        let offset = (i64::from(self.to_monday_zero_offset())
            + days.rem_euclid(7))
        .rem_euclid(7);
        Weekday::from_monday_one_offset_unchecked(offset as i8 + 1)
    }

    /// Subtracts the given number of days from this weekday, wrapping
    /// around.
    pub fn wrapping_sub(self, days: i64) -> Weekday {
        let offset = (i64::from(self.to_monday_zero_offset())
            - days.rem_euclid(7))
        .rem_euclid(7);
        Weekday::from_monday_one_offset_unchecked(offset as i8 + 1)
    }

    /// Returns the number of days from this weekday to `other`, going
    /// forward. The result is in `0..=6`.
    ///
    /// ```
    /// use calends::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Friday.days_until(Weekday::Monday), 3);
    /// assert_eq!(Weekday::Monday.days_until(Weekday::Monday), 0);
    /// ```
    pub fn days_until(self, other: Weekday) -> i8 {
        (other.to_monday_zero_offset() - self.to_monday_zero_offset())
            .rem_euclid(7)
    }

    pub(crate) const fn from_monday_one_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl core::fmt::Display for Weekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Weekday {
    fn arbitrary(g: &mut quickcheck::Gen) -> Weekday {
        let offset = i8::arbitrary(g).rem_euclid(7) + 1;
        Weekday::from_monday_one_offset_unchecked(offset)
    }
}
