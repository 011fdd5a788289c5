/*!
Parsing and printing of the ISO 8601 text formats.

Every value type in this crate implements `Display` and `FromStr` in terms
of the printers and parsers in this module. The output of a printer is
always accepted by the corresponding parser, and parsing it back gives an
equal value.

Most callers never need this module directly. It is useful when the
defaults aren't quite right, e.g., when a space is preferred over `T` as
the separator between a date and a time:

```
use calends::{civil::datetime, fmt::temporal::DateTimePrinter};

const PRINTER: DateTimePrinter = DateTimePrinter::new().separator(b' ');

let dt = datetime(2024, 3, 5, 10, 15, 30, 0);
let mut buf = String::new();
PRINTER.print_datetime(&dt, &mut buf)?;
assert_eq!(buf, "2024-03-05 10:15:30");

# Ok::<(), Box<dyn std::error::Error>>(())
```

The formats themselves are:

| Type | Example |
|------|---------|
| [`Date`](crate::civil::Date) | `2024-03-05`, `+12345-01-01`, `-0001-12-31` |
| [`Time`](crate::civil::Time) | `10:15`, `10:15:30`, `10:15:30.250` |
| [`DateTime`](crate::civil::DateTime) | `2024-03-05T10:15` |
| [`Instant`](crate::Instant) | `2024-03-05T09:15:00Z` |
| [`Offset`](crate::tz::Offset) | `Z`, `+05:30`, `-05:01:02` |
| [`OffsetDateTime`](crate::OffsetDateTime) | `2024-03-05T10:15+01:00` |
| [`OffsetTime`](crate::OffsetTime) | `10:15+01:00` |
| [`Zoned`](crate::Zoned) | `2024-03-05T10:15+01:00[Europe/Paris]` |
| [`Year`](crate::civil::Year) | `2024` |
| [`YearMonth`](crate::civil::YearMonth) | `2024-03` |
| [`MonthDay`](crate::civil::MonthDay) | `--03-05` |
| [`Duration`](crate::Duration) | `PT1H30M`, `PT-0.5S` |
| [`Period`](crate::Period) | `P1Y2M3D`, `P2W` |
*/

use crate::{
    error::{err, Error},
    fmt::util::{Decimal, DecimalFormatter},
};

pub(crate) mod duration;
pub(crate) mod offset;
#[cfg(feature = "serde")]
pub mod serde;
pub mod temporal;
mod util;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the offset at which the value
/// ended in the input given. This makes it possible to parse, for example, a
/// datetime value as a prefix of some larger string without knowing ahead of
/// time where it ends.
#[derive(Clone)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    value: V,
    /// The remaining unparsed input.
    input: &'i [u8],
}

impl<'i, V: core::fmt::Display> Parsed<'i, V> {
    /// Ensures that the parsed value represents the entire input. This occurs
    /// when `self.input.is_empty()`.
    ///
    /// If the value doesn't represent the entire input, then an error is
    /// returned.
    fn into_full(self) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(crate::error::parse_err!(
            "parsed value '{value}', but unparsed input {unparsed:?} \
             remains (expected no unparsed input)",
            value = self.value,
            unparsed = crate::util::escape::Bytes(self.input),
        ))
    }
}

impl<'i, V: core::fmt::Debug> core::fmt::Debug for Parsed<'i, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Parsed")
            .field("value", &self.value)
            .field("input", &crate::util::escape::Bytes(self.input))
            .finish()
    }
}

/// A trait for printing datetimes or spans into Unicode-accepting buffers or
/// streams.
///
/// The most useful aspect of this trait is that it's implemented for
/// `String`, so printing into a fresh buffer needs no ceremony. To print
/// into something that implements `core::fmt::Write` (like a
/// `core::fmt::Formatter`), wrap it in a [`StdFmtWrite`].
///
/// # Example
///
/// ```
/// use calends::{civil::date, fmt::temporal::DateTimePrinter};
///
/// let mut buf = String::new();
/// DateTimePrinter::new().print_date(&date(2024, 6, 15), &mut buf)?;
/// assert_eq!(buf, "2024-06-15");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Write {
    /// Write the given string to this writer, returning whether the write
    /// succeeded or not.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer, returning whether the write
    /// succeeded or not.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl<W: ?Sized + Write> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `core::fmt::Write` implementations with
/// [`Write`].
///
/// The `Display` impls of every value type in this crate are implemented
/// with this adapter around a `core::fmt::Formatter`.
#[derive(Clone, Debug)]
pub struct StdFmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for StdFmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_str(string)
            .map_err(|_| err!("an error occurred when formatting an argument"))
    }
}

/// An extension trait to `Write` that provides crate internal routines.
///
/// These routines aren't exposed because they make use of crate internal
/// types. Those types could perhaps be exposed if there was strong demand,
/// but I'm skeptical.
trait WriteExt: Write {
    /// Write the given number as a decimal using ASCII digits to this buffer.
    /// The given formatter controls how the decimal is formatted.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        self.write_decimal(&formatter.format(n.into()))
    }

    /// Write the given decimal number to this buffer.
    #[inline]
    fn write_decimal(&mut self, decimal: &Decimal) -> Result<(), Error> {
        self.write_str(decimal.as_str())
    }
}

impl<W: Write> WriteExt for W {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_into_full() {
        let p = Parsed { value: 5, input: b"" };
        assert_eq!(p.into_full().unwrap(), 5);

        let p = Parsed { value: 5, input: b"abc" };
        let err = p.into_full().unwrap_err();
        assert!(err.is_parse());
        insta::assert_snapshot!(
            err,
            @r#"parsed value '5', but unparsed input "abc" remains (expected no unparsed input)"#,
        );
    }

    #[test]
    fn std_fmt_write() {
        let mut buf = String::new();
        let mut wtr = StdFmtWrite(&mut buf);
        wtr.write_str("ab").unwrap();
        wtr.write_char('☃').unwrap();
        wtr.write_int(&DecimalFormatter::new().padding(3), 7).unwrap();
        assert_eq!(buf, "ab☃007");
    }
}
