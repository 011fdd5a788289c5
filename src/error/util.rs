use crate::{error, util::escape::Byte};

#[derive(Clone, Debug)]
pub(crate) enum ArithmeticError {
    DivideByZero { what: &'static str },
    Overflow { what: &'static str },
}

impl From<ArithmeticError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ArithmeticError) -> error::Error {
        error::ErrorKind::Arithmetic(err).into()
    }
}

impl error::IntoError for ArithmeticError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ArithmeticError::*;

        match *self {
            DivideByZero { what } => write!(f, "cannot divide {what} by zero"),
            Overflow { what } => write!(f, "arithmetic on {what} overflowed"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum ParseIntError {
    NoDigitsFound,
    InvalidDigit(u8),
    TooBig,
}

impl From<ParseIntError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseIntError) -> error::Error {
        error::ErrorKind::ParseInt(err).into()
    }
}

impl error::IntoError for ParseIntError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseIntError::*;

        match *self {
            NoDigitsFound => write!(f, "invalid number, no digits found"),
            InvalidDigit(got) => {
                write!(f, "invalid digit, expected 0-9 but got {}", Byte(got))
            }
            TooBig => {
                write!(f, "number too big to parse into 64-bit integer")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum ParseFractionError {
    NoDigitsFound,
    TooManyDigits,
    InvalidDigit(u8),
}

impl ParseFractionError {
    pub(crate) const MAX_PRECISION: usize = 9;
}

impl From<ParseFractionError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseFractionError) -> error::Error {
        error::ErrorKind::ParseFraction(err).into()
    }
}

impl error::IntoError for ParseFractionError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseFractionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseFractionError::*;

        match *self {
            NoDigitsFound => write!(f, "invalid fraction, no digits found"),
            TooManyDigits => write!(
                f,
                "invalid fraction, too many digits \
                 (at most {max} are allowed)",
                max = ParseFractionError::MAX_PRECISION,
            ),
            InvalidDigit(got) => {
                write!(
                    f,
                    "invalid fractional digit, expected 0-9 but got {}",
                    Byte(got)
                )
            }
        }
    }
}
