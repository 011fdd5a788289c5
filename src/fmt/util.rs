use crate::{
    error::{parse_err, Error, ErrorContext},
    fmt::Parsed,
    util::{escape, parse},
};

/// A simple formatter for converting `i64` values to ASCII byte strings.
///
/// This avoids going through the formatting machinery which seems to
/// substantially slow things down.
///
/// By default, this only includes the sign if it's negative. To always include
/// the sign, set `force_sign` to `true`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    force_sign: bool,
    minimum_digits: u8,
}

impl DecimalFormatter {
    /// Creates a new decimal formatter using the default configuration.
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { force_sign: false, minimum_digits: 0 }
    }

    /// Format the given value using this configuration as a decimal ASCII
    /// number.
    pub(crate) const fn format(&self, value: i64) -> Decimal {
        Decimal::new(self, value)
    }

    /// Forces the sign to be rendered, even if it's positive. Zero is
    /// rendered with a `+`.
    pub(crate) const fn force_sign(self, yes: bool) -> DecimalFormatter {
        DecimalFormatter { force_sign: yes, ..self }
    }

    /// The minimum number of digits that this number should be formatted
    /// with. If the number would have fewer digits than this, then it is
    /// padded out with zeros until the minimum is reached.
    ///
    /// The minimum number of digits is capped at the maximum number of digits
    /// for an i64 value (which is 19).
    pub(crate) const fn padding(self, mut digits: u8) -> DecimalFormatter {
        if digits > Decimal::MAX_I64_DIGITS {
            digits = Decimal::MAX_I64_DIGITS;
        }
        DecimalFormatter { minimum_digits: digits, ..self }
    }
}

impl Default for DecimalFormatter {
    fn default() -> DecimalFormatter {
        DecimalFormatter::new()
    }
}

/// A formatted decimal number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Self::MAX_I64_LEN as usize],
    start: u8,
    end: u8,
}

impl Decimal {
    /// Discovered via `i64::MIN.to_string().len()`.
    const MAX_I64_LEN: u8 = 20;
    /// Discovered via `i64::MAX.to_string().len()`.
    const MAX_I64_DIGITS: u8 = 19;

    /// Using the given formatter, turn the value given into a decimal
    /// representation using ASCII bytes.
    const fn new(formatter: &DecimalFormatter, value: i64) -> Decimal {
        let negative = value < 0;
        // Working with the unsigned absolute value sidesteps `i64::MIN`.
        let mut value = value.unsigned_abs();
        let mut decimal = Decimal {
            buf: [0; Self::MAX_I64_LEN as usize],
            start: Self::MAX_I64_LEN,
            end: Self::MAX_I64_LEN,
        };
        loop {
            decimal.start -= 1;

            let digit = (value % 10) as u8;
            value /= 10;
            decimal.buf[decimal.start as usize] = b'0' + digit;
            if value == 0 {
                break;
            }
        }
        while decimal.len() < formatter.minimum_digits {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'0';
        }
        if negative {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'-';
        } else if formatter.force_sign {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'+';
        }
        decimal
    }

    /// Returns the total number of ASCII bytes (including the sign) that are
    /// used to represent this decimal number.
    const fn len(&self) -> u8 {
        self.end - self.start
    }

    /// Returns the ASCII representation of this decimal as a byte slice.
    ///
    /// The slice returned is guaranteed to be valid ASCII.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[usize::from(self.start)..usize::from(self.end)]
    }

    /// Returns the ASCII representation of this decimal as a string slice.
    pub(crate) fn as_str(&self) -> &str {
        // OK because all bytes written to `self.buf` are ASCII digits or
        // signs.
        core::str::from_utf8(self.as_bytes()).unwrap()
    }
}

/// A formatter for the fractional part of a second.
///
/// Trailing zeros are always trimmed. When `grouped` is enabled, the
/// number of digits is then rounded back up to a multiple of three, which
/// gives milli, micro or nanosecond precision.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractionalFormatter {
    grouped: bool,
}

impl FractionalFormatter {
    /// Creates a new fractional formatter that trims all trailing zeros.
    pub(crate) const fn new() -> FractionalFormatter {
        FractionalFormatter { grouped: false }
    }

    /// Pad the digits out to a multiple of three.
    pub(crate) const fn grouped(self, yes: bool) -> FractionalFormatter {
        FractionalFormatter { grouped: yes }
    }

    /// Format the given number of nanoseconds.
    ///
    /// This panics if the value given isn't in the range `0..=999_999_999`.
    pub(crate) const fn format(&self, value: i32) -> Fractional {
        Fractional::new(self, value)
    }
}

/// A formatted fractional number that can be converted to a sequence of
/// bytes.
#[derive(Debug)]
pub(crate) struct Fractional {
    buf: [u8; Self::MAX_LEN as usize],
    end: u8,
}

impl Fractional {
    /// Since we don't support precision bigger than this.
    const MAX_LEN: u8 = 9;

    /// Note that the fractional number returned expands to an empty slice of
    /// bytes when the value is `0`.
    const fn new(formatter: &FractionalFormatter, value: i32) -> Fractional {
        assert!(0 <= value && value <= 999_999_999);
        let mut fractional =
            Fractional { buf: [b'0'; Self::MAX_LEN as usize], end: 0 };
        let mut value = value as u32;
        let mut i = Self::MAX_LEN as usize;
        while value > 0 {
            i -= 1;
            fractional.buf[i] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        let mut end = Self::MAX_LEN;
        while end > 0 && fractional.buf[end as usize - 1] == b'0' {
            end -= 1;
        }
        if formatter.grouped {
            end = (end + 2) / 3 * 3;
        }
        fractional.end = end;
        fractional
    }

    /// Returns true when there are no digits to print.
    pub(crate) fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// Returns the ASCII representation of this fractional number as a string
    /// slice. The slice returned may be empty.
    pub(crate) fn as_str(&self) -> &str {
        // OK because every byte in the buffer is an ASCII digit.
        core::str::from_utf8(&self.buf[..usize::from(self.end)]).unwrap()
    }
}

/// Parses an optional fractional number from the start of `input`.
///
/// If `input` does not begin with a `.` (or a `,`), then this returns `None`
/// and no input is consumed. Otherwise, one to nine ASCII digits are parsed
/// after the decimal separator and returned as a number of nanoseconds.
pub(crate) fn parse_fraction<'i>(
    input: &'i [u8],
) -> Result<Parsed<'i, Option<i32>>, Error> {
    let Some((&first, rest)) = input.split_first() else {
        return Ok(Parsed { value: None, input });
    };
    if first != b'.' && first != b',' {
        return Ok(Parsed { value: None, input });
    }
    let (digits, input) = parse::digits(rest);
    let nanos = parse::fraction(digits).with_context(|| {
        parse_err!("failed to parse digits after decimal separator")
    })?;
    Ok(Parsed { value: Some(nanos), input })
}

/// Describes the start of `input` for error messages, e.g., `"T"` or
/// `end of input`.
pub(crate) fn found(input: &[u8]) -> String {
    match input.first() {
        None => "end of input".into(),
        Some(&b) => format!("{:?}", escape::Byte(b)),
    }
}
