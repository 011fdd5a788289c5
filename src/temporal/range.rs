use crate::{error::Error, temporal::Field};

/// The range of valid values for a [`Field`].
///
/// Most fields have a fixed range. For example, the hour of the day is
/// always between `0` and `23`. Others have a maximum that varies. The day
/// of the month always starts at `1`, but its maximum is anywhere from `28`
/// to `31` depending on the month and year. A `ValueRange` captures both
/// cases with four bounds: the smallest and largest minimum, and the
/// smallest and largest maximum.
///
/// When a range is requested from a specific value, for example via
/// [`FieldAccess::range`](crate::temporal::FieldAccess::range) on a date in
/// February 2024, the range returned is fixed to the bounds for that value.
///
/// # Example
///
/// ```
/// use calends::temporal::{Field, ValueRange};
///
/// let range = Field::DayOfMonth.range();
/// assert_eq!(range.to_string(), "1 - 28/31");
/// assert!(!range.is_fixed());
/// assert!(range.is_valid_value(31));
/// assert!(!range.is_valid_value(32));
///
/// let feb = ValueRange::new(1, 29)?;
/// assert!(feb.is_fixed());
/// assert_eq!(feb.to_string(), "1 - 29");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// Creates a fixed range where the minimum and maximum never vary.
    ///
    /// # Errors
    ///
    /// This returns an error when `min > max`.
    pub fn new(min: i64, max: i64) -> Result<ValueRange, Error> {
        ValueRange::full(min, min, max, max)
    }

    /// Creates a range with a fixed minimum and a variable maximum.
    ///
    /// # Errors
    ///
    /// This returns an error when `min > max_smallest` or when
    /// `max_smallest > max_largest`.
    pub fn variable(
        min: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> Result<ValueRange, Error> {
        ValueRange::full(min, min, max_smallest, max_largest)
    }

    /// Creates a range where both the minimum and maximum vary.
    ///
    /// # Errors
    ///
    /// This returns an error when the bounds are not ordered, that is, when
    /// any of the following is true: `min_smallest > min_largest`,
    /// `max_smallest > max_largest` or `min_largest > max_largest`.
    pub fn full(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> Result<ValueRange, Error> {
        use crate::error::temporal::Error as E;

        if min_smallest > min_largest {
            return Err(Error::from(E::InvalidRange {
                min: min_smallest,
                max: min_largest,
            }));
        }
        if max_smallest > max_largest {
            return Err(Error::from(E::InvalidRange {
                min: max_smallest,
                max: max_largest,
            }));
        }
        if min_largest > max_largest {
            return Err(Error::from(E::InvalidRange {
                min: min_largest,
                max: max_largest,
            }));
        }
        Ok(ValueRange { min_smallest, min_largest, max_smallest, max_largest })
    }

    /// Creates a range in a `const` context. The bounds must be ordered.
    pub(crate) const fn constant(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> ValueRange {
        assert!(min_smallest <= min_largest);
        assert!(max_smallest <= max_largest);
        assert!(min_largest <= max_largest);
        ValueRange { min_smallest, min_largest, max_smallest, max_largest }
    }

    /// Returns the smallest possible minimum.
    pub fn minimum(&self) -> i64 {
        self.min_smallest
    }

    /// Returns the largest possible minimum.
    pub fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    /// Returns the smallest possible maximum.
    pub fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    /// Returns the largest possible maximum.
    pub fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// Returns true when neither the minimum nor the maximum vary.
    pub fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest
            && self.max_smallest == self.max_largest
    }

    /// Returns true when every value in this range fits in an `i32`.
    pub fn is_int_value(&self) -> bool {
        self.minimum() >= i64::from(i32::MIN)
            && self.maximum() <= i64::from(i32::MAX)
    }

    /// Returns true when the value is within the outer bounds of this range.
    pub fn is_valid_value(&self, value: i64) -> bool {
        self.minimum() <= value && value <= self.maximum()
    }

    /// Returns true when every value fits in an `i32` and the value given is
    /// within the outer bounds of this range.
    pub fn is_valid_int_value(&self, value: i64) -> bool {
        self.is_int_value() && self.is_valid_value(value)
    }

    /// Checks that the value is valid for the given field.
    ///
    /// # Errors
    ///
    /// This returns a range error naming the field when the value is out of
    /// bounds.
    pub fn check_valid_value(
        &self,
        value: i64,
        field: Field,
    ) -> Result<i64, Error> {
        if !self.is_valid_value(value) {
            return Err(Error::range(
                field.name(),
                value,
                self.minimum(),
                self.maximum(),
            ));
        }
        Ok(value)
    }

    /// Like [`ValueRange::check_valid_value`], but also requires the value
    /// to fit in an `i32`.
    pub fn check_valid_int_value(
        &self,
        value: i64,
        field: Field,
    ) -> Result<i32, Error> {
        let value = self.check_valid_value(value, field)?;
        i32::try_from(value).map_err(|_| {
            Error::range(field.name(), value, i32::MIN, i32::MAX)
        })
    }
}

impl core::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.min_smallest)?;
        if self.min_smallest != self.min_largest {
            write!(f, "/{}", self.min_largest)?;
        }
        write!(f, " - {}", self.max_smallest)?;
        if self.max_smallest != self.max_largest {
            write!(f, "/{}", self.max_largest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let r = ValueRange::full(1, 2, 28, 31).unwrap();
        assert_eq!(1, r.minimum());
        assert_eq!(2, r.largest_minimum());
        assert_eq!(28, r.smallest_maximum());
        assert_eq!(31, r.maximum());
        assert!(!r.is_fixed());
        insta::assert_snapshot!(r, @"1/2 - 28/31");

        assert!(ValueRange::new(5, 4).unwrap_err().is_invalid_parameter());
        assert!(ValueRange::variable(1, 31, 28).is_err());
        assert!(ValueRange::full(1, 40, 28, 31).is_err());
        assert!(ValueRange::new(3, 3).unwrap().is_fixed());
    }

    #[test]
    fn validity() {
        let r = ValueRange::new(1, 12).unwrap();
        assert!(r.is_int_value());
        assert!(r.is_valid_int_value(12));
        assert!(!r.is_valid_value(0));
        assert_eq!(12, r.check_valid_value(12, Field::MonthOfYear).unwrap());
        let err = r.check_valid_value(13, Field::MonthOfYear).unwrap_err();
        assert!(err.is_range());
        insta::assert_snapshot!(
            err,
            @"parameter 'MonthOfYear' with value 13 is not in the required range of 1..=12",
        );

        let big = ValueRange::new(0, i64::MAX).unwrap();
        assert!(!big.is_int_value());
        assert!(!big.is_valid_int_value(5));
        assert!(big.check_valid_int_value(i64::from(i32::MAX) + 1, Field::Year).is_err());
    }
}
