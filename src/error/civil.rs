use crate::{civil::month_name, error};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidDayOfMonth { year: i32, month: i8, day: i8 },
    InvalidDayOfYear { year: i32, day: i16 },
    InvalidMonthDay { month: i8, day: i8 },
    InvalidWeekOfYear { year: i32, week: i8 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            InvalidDayOfMonth { year, month: 2, day: 29 } => write!(
                f,
                "invalid date 'February 29' as '{year}' is not a leap year",
            ),
            InvalidDayOfMonth { month, day, .. } => write!(
                f,
                "invalid date '{month} {day}'",
                month = month_name(month),
            ),
            InvalidDayOfYear { year, day } => write!(
                f,
                "invalid date 'day-of-year {day}' as '{year}' \
                 is not a leap year",
            ),
            InvalidMonthDay { month, day } => write!(
                f,
                "day-of-month {day} is not valid for {month}",
                month = month_name(month),
            ),
            InvalidWeekOfYear { year, week } => write!(
                f,
                "week {week} is not valid for week-based-year {year}",
            ),
        }
    }
}
