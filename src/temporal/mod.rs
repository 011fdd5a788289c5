/*!
The vocabulary shared by all temporal values: fields, units and ranges.

The types in this module let callers read and adjust values generically.
[`Field`] names a component (like the day of the year), [`Unit`] names a
measure of time (like a month) and [`ValueRange`] describes the values a
field may take. The [`FieldAccess`] and [`FieldAdjust`] traits are
implemented by every value type in this crate that has fields.

This module also provides [`WeekFields`] for week numbering schemes,
[`JulianField`] for the astronomical day counts, and [`Fields`], a resolver
that turns a loose collection of field values into a date or time.

# Example

```
use calends::{civil::date, temporal::{Field, FieldAccess, FieldAdjust}};

let d = date(2024, 1, 31);
assert!(d.is_supported(Field::AlignedWeekOfYear));
assert!(!d.is_supported(Field::HourOfDay));
assert_eq!(d.range(Field::DayOfMonth)?.maximum(), 31);

let d = d.with_field(Field::MonthOfYear, 2)?;
assert_eq!(d, date(2024, 2, 29));

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    field::Field,
    julian::JulianField,
    range::ValueRange,
    resolve::{Fields, ResolverStyle},
    unit::Unit,
    week::WeekFields,
};

use crate::{error::Error, Duration, Period};

mod field;
mod julian;
mod range;
mod resolve;
mod unit;
mod week;

/// Read access to the fields of a temporal value.
pub trait FieldAccess {
    /// Returns true if the field can be read from this value.
    fn is_supported(&self, field: Field) -> bool;

    /// Returns the range of valid values for the field, refined by this
    /// value where that makes sense.
    ///
    /// # Errors
    ///
    /// This returns an error when the field is not supported.
    fn range(&self, field: Field) -> Result<ValueRange, Error>;

    /// Returns the value of the field.
    ///
    /// # Errors
    ///
    /// This returns an error when the field is not supported.
    fn get(&self, field: Field) -> Result<i64, Error>;
}

/// Adjusts temporal values by field.
pub trait FieldAdjust: FieldAccess + Sized {
    /// Returns a copy of this value with the given field set.
    ///
    /// Other fields are adjusted as needed to keep the result valid. For
    /// example, setting the month of `2024-01-31` to February gives
    /// `2024-02-29`.
    ///
    /// # Errors
    ///
    /// This returns an error when the field is not supported or the value is
    /// out of the field's range.
    fn with_field(&self, field: Field, value: i64) -> Result<Self, Error>;
}

/// An amount of time that can be added to or subtracted from a temporal
/// value.
///
/// This is the argument type of `checked_add` and `checked_sub` on all value
/// types. Values are usually created via one of its `From` impls, so a
/// [`Duration`], a [`Period`] or an `(amount, Unit)` tuple can be passed
/// directly.
///
/// # Example
///
/// ```
/// use calends::{civil::date, temporal::Unit, Period};
///
/// let d = date(2024, 1, 31);
/// assert_eq!(d.checked_add(Period::from_months(1))?, date(2024, 2, 29));
/// assert_eq!(d.checked_add((2, Unit::Week))?, date(2024, 2, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Amount {
    /// An exact amount of time.
    Duration(Duration),
    /// A calendar based amount of years, months and days.
    Period(Period),
    /// A number of a single unit.
    Units(i64, Unit),
}

impl Amount {
    /// Returns the negation of this amount.
    pub(crate) fn checked_neg(self) -> Result<Amount, Error> {
        Ok(match self {
            Amount::Duration(d) => Amount::Duration(d.checked_neg()?),
            Amount::Period(p) => Amount::Period(p.checked_neg()?),
            Amount::Units(n, unit) => Amount::Units(
                n.checked_neg().ok_or_else(|| Error::overflow("units"))?,
                unit,
            ),
        })
    }
}

impl From<Duration> for Amount {
    fn from(duration: Duration) -> Amount {
        Amount::Duration(duration)
    }
}

impl From<Period> for Amount {
    fn from(period: Period) -> Amount {
        Amount::Period(period)
    }
}

impl From<(i64, Unit)> for Amount {
    fn from((amount, unit): (i64, Unit)) -> Amount {
        Amount::Units(amount, unit)
    }
}

/// Implements the `Add`, `Sub`, `AddAssign` and `SubAssign` operators for a
/// value type with `checked_add` and `checked_sub` methods, for both
/// `Duration` and `Period` right hand sides. The operators panic on error.
macro_rules! impl_amount_ops {
    ($ty:ty) => {
        crate::temporal::impl_amount_ops!($ty, crate::Duration);
        crate::temporal::impl_amount_ops!($ty, crate::Period);
    };
    ($ty:ty, $amount:ty) => {
        /// Adds an amount of time.
        ///
        /// This panics on overflow or when the amount is not supported. Use
        /// `checked_add` to handle errors.
        impl core::ops::Add<$amount> for $ty {
            type Output = $ty;

            #[inline]
            fn add(self, rhs: $amount) -> $ty {
                self.checked_add(rhs)
                    .expect(concat!("adding to ", stringify!($ty), " failed"))
            }
        }

        impl core::ops::AddAssign<$amount> for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: $amount) {
                *self = self
                    .checked_add(rhs)
                    .expect(concat!("adding to ", stringify!($ty), " failed"));
            }
        }

        /// Subtracts an amount of time.
        ///
        /// This panics on overflow or when the amount is not supported. Use
        /// `checked_sub` to handle errors.
        impl core::ops::Sub<$amount> for $ty {
            type Output = $ty;

            #[inline]
            fn sub(self, rhs: $amount) -> $ty {
                self.checked_sub(rhs).expect(concat!(
                    "subtracting from ",
                    stringify!($ty),
                    " failed"
                ))
            }
        }

        impl core::ops::SubAssign<$amount> for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: $amount) {
                *self = self.checked_sub(rhs).expect(concat!(
                    "subtracting from ",
                    stringify!($ty),
                    " failed"
                ));
            }
        }
    };
}

pub(crate) use impl_amount_ops;

/// Returns an error for a field that isn't supported by a value type.
#[cold]
#[inline(never)]
pub(crate) fn unsupported_field(field: Field, on: &'static str) -> Error {
    Error::from(crate::error::temporal::Error::UnsupportedField { field, on })
}

/// Returns an error for a unit that isn't supported by a value type.
#[cold]
#[inline(never)]
pub(crate) fn unsupported_unit(unit: Unit, on: &'static str) -> Error {
    Error::from(crate::error::temporal::Error::UnsupportedUnit { unit, on })
}
