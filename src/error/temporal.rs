use crate::{
    error,
    temporal::{Field, Unit},
};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Conflict { field: Field, existing: i64, new: i64 },
    CrossCheck { field: Field, value: i64, resolved: i64 },
    InvalidRange { min: i64, max: i64 },
    InvalidWeekFields { minimal_days: u8 },
    Incomplete { what: &'static str },
    UnsupportedField { field: Field, on: &'static str },
    UnsupportedUnit { unit: Unit, on: &'static str },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Temporal(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Conflict { field, existing, new } => write!(
                f,
                "conflict found: {field} {existing} \
                 differs from {field} {new}",
            ),
            CrossCheck { field, value, resolved } => write!(
                f,
                "conflict found: field {field} {value} differs from \
                 {field} {resolved} derived from the resolved value",
            ),
            InvalidRange { min, max } => write!(
                f,
                "invalid value range: minimum {min} \
                 must not exceed maximum {max}",
            ),
            InvalidWeekFields { minimal_days } => write!(
                f,
                "minimal number of days in the first week must be \
                 in the range 1..=7, but got {minimal_days}",
            ),
            Incomplete { what } => write!(
                f,
                "not enough fields were given to resolve a {what}",
            ),
            UnsupportedField { field, on } => {
                write!(f, "unsupported field {field} for {on}")
            }
            UnsupportedUnit { unit, on } => {
                write!(f, "unsupported unit {unit} for {on}")
            }
        }
    }
}
