use crate::{civil::DateTime, error, tz::Offset};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidOffsetForZone { dt: DateTime, offset: Offset, zone: Box<str> },
    InvalidOffsetSigns { hours: i8, minutes: i8, seconds: i8 },
    NoOffsetChange { offset: Offset },
    NotFound { id: Box<str> },
    Unsorted,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Tz(err).into()
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
            InvalidOffsetForZone { dt, offset, ref zone } => write!(
                f,
                "offset {offset} is not valid for local datetime {dt} \
                 in time zone {zone}",
            ),
            InvalidOffsetSigns { hours, minutes, seconds } => write!(
                f,
                "zone offset parts {hours}h {minutes}m {seconds}s \
                 must all have the same sign",
            ),
            NoOffsetChange { offset } => write!(
                f,
                "a transition must change the offset, \
                 but both sides are {offset}",
            ),
            NotFound { ref id } => {
                write!(f, "unknown time zone identifier '{id}'")
            }
            Unsorted => f.write_str(
                "zone rule transitions must be in strictly ascending order",
            ),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum AmbiguousError {
    BecauseFold { dt: DateTime, before: Offset, after: Offset, zone: Box<str> },
    BecauseGap { dt: DateTime, before: Offset, after: Offset, zone: Box<str> },
}

impl From<AmbiguousError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: AmbiguousError) -> error::Error {
        error::ErrorKind::TzAmbiguous(err).into()
    }
}

impl error::IntoError for AmbiguousError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for AmbiguousError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::AmbiguousError::*;

        match *self {
            BecauseFold { dt, before, after, ref zone } => write!(
                f,
                "datetime {dt} is ambiguous in time zone {zone} since it \
                 falls into a fold between offsets {before} and {after}",
            ),
            BecauseGap { dt, before, after, ref zone } => write!(
                f,
                "datetime {dt} does not exist in time zone {zone} since it \
                 falls into a gap between offsets {before} and {after}",
            ),
        }
    }
}
