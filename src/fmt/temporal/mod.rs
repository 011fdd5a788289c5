/*!
A parser and printer for the ISO 8601 formats of every value type.

[`DateTimePrinter`] and [`DateTimeParser`] are what the `Display` and
`FromStr` impls in this crate use. They are exposed for the cases where
the defaults need tweaking, or where printing into an existing buffer
without going through `core::fmt` is desirable.

# Example

This shows how to print a datetime with a space as the separator and
parse it back. The parser always accepts `T`, `t` or a space.

```
use calends::{
    civil::datetime,
    fmt::temporal::{DateTimeParser, DateTimePrinter},
};

static PRINTER: DateTimePrinter = DateTimePrinter::new().separator(b' ');
static PARSER: DateTimeParser = DateTimeParser::new();

let dt = datetime(2024, 6, 15, 7, 0, 0, 0);
let mut buf = String::new();
PRINTER.print_datetime(&dt, &mut buf)?;
assert_eq!(buf, "2024-06-15 07:00");
assert_eq!(PARSER.parse_datetime(&buf)?, dt);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    civil::{Date, DateTime, MonthDay, Time, Year, YearMonth},
    error::{parse_err, Error, ErrorContext},
    fmt::{Parsed, Write},
    util::escape,
    Instant, OffsetDateTime, OffsetTime, Zoned,
};

mod parser;
mod printer;

/// The printer used by the `Display` impls in this crate.
pub(crate) static DEFAULT_DATETIME_PRINTER: DateTimePrinter =
    DateTimePrinter::new();

/// The parser used by the `FromStr` impls in this crate.
pub(crate) static DEFAULT_DATETIME_PARSER: DateTimeParser =
    DateTimeParser::new();

/// A parser for the ISO 8601 formats of every value type.
///
/// Each `parse_*` routine requires the entire input to be consumed. Errors
/// name the input and the component that failed to parse.
///
/// # Zoned datetimes
///
/// A zoned datetime is a datetime followed by an offset, a bracketed time
/// zone identifier, or both. When both are present and the offset is valid
/// for the datetime in that time zone, the offset picks the instant. This
/// is what makes a datetime in a fold round trip. When the offset isn't
/// valid (e.g., the time zone rules changed since the string was written),
/// the offset is ignored and the datetime is resolved with
/// [`Disambiguation::Compatible`](crate::tz::Disambiguation::Compatible).
///
/// ```
/// use calends::{fmt::temporal::DateTimeParser, tz::Offset};
///
/// let parser = DateTimeParser::new();
/// let zdt = parser.parse_zoned("2024-11-03T01:30-05:00[America/New_York]")?;
/// assert_eq!(zdt.offset(), Offset::constant(-5));
/// let zdt = parser.parse_zoned("2024-11-03T01:30-07:00[America/New_York]")?;
/// assert_eq!(zdt.offset(), Offset::constant(-4));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DateTimeParser {
    p: parser::DateTimeParser,
}

impl DateTimeParser {
    /// Create a new parser.
    pub const fn new() -> DateTimeParser {
        DateTimeParser { p: parser::DateTimeParser::new() }
    }

    /// Parse a zoned datetime, e.g., `2024-03-05T10:15+01:00[Europe/Paris]`.
    pub fn parse_zoned<I: AsRef<[u8]>>(&self, input: I) -> Result<Zoned, Error> {
        full(input.as_ref(), "zoned datetime", |i| self.p.parse_zoned_spec(i))
    }

    /// Parse an instant, e.g., `2024-03-05T09:15:00Z`.
    ///
    /// Any offset is accepted.
    pub fn parse_instant<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Instant, Error> {
        full(input.as_ref(), "instant", |i| self.p.parse_instant_spec(i))
    }

    /// Parse a datetime with an offset, e.g., `2024-03-05T10:15+01:00`.
    pub fn parse_offset_datetime<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<OffsetDateTime, Error> {
        full(input.as_ref(), "offset datetime", |i| {
            self.p.parse_offset_datetime_spec(i)
        })
    }

    /// Parse a time with an offset, e.g., `10:15+01:00`.
    pub fn parse_offset_time<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<OffsetTime, Error> {
        full(input.as_ref(), "offset time", |i| {
            self.p.parse_offset_time_spec(i)
        })
    }

    /// Parse a civil datetime, e.g., `2024-03-05T10:15:30`.
    pub fn parse_datetime<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<DateTime, Error> {
        full(input.as_ref(), "datetime", |i| self.p.parse_datetime_spec(i))
    }

    /// Parse a civil date, e.g., `2024-03-05`.
    ///
    /// ```
    /// use calends::{civil::date, fmt::temporal::DateTimeParser};
    ///
    /// let parser = DateTimeParser::new();
    /// assert_eq!(parser.parse_date("+12345-01-01")?, date(12_345, 1, 1));
    /// assert_eq!(
    ///     parser.parse_date("2023-02-29").unwrap_err().to_string(),
    ///     "failed to parse \"2023-02-29\" as date: parsed date is not valid: \
    ///      invalid date 'February 29' as '2023' is not a leap year",
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_date<I: AsRef<[u8]>>(&self, input: I) -> Result<Date, Error> {
        full(input.as_ref(), "date", |i| self.p.parse_date_spec(i))
    }

    /// Parse a civil time, e.g., `10:15`, `10:15:30` or `10:15:30.5`.
    pub fn parse_time<I: AsRef<[u8]>>(&self, input: I) -> Result<Time, Error> {
        full(input.as_ref(), "time", |i| self.p.parse_time_spec(i))
    }

    /// Parse a year, e.g., `2024` or `-0044`.
    pub fn parse_year<I: AsRef<[u8]>>(&self, input: I) -> Result<Year, Error> {
        full(input.as_ref(), "year", |i| self.p.parse_year_spec(i))
    }

    /// Parse a year and month, e.g., `2024-03`.
    pub fn parse_year_month<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<YearMonth, Error> {
        full(input.as_ref(), "year-month", |i| {
            self.p.parse_year_month_spec(i)
        })
    }

    /// Parse a month and day, e.g., `--03-05`.
    pub fn parse_month_day<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<MonthDay, Error> {
        full(input.as_ref(), "month-day", |i| {
            self.p.parse_month_day_spec(i)
        })
    }
}

/// Runs `parse` on all of `input` and names the input in any error.
fn full<'i, V: core::fmt::Display>(
    input: &'i [u8],
    what: &'static str,
    parse: impl FnOnce(&'i [u8]) -> Result<Parsed<'i, V>, Error>,
) -> Result<V, Error> {
    parse(input).and_then(|parsed| parsed.into_full()).with_context(|| {
        parse_err!(
            "failed to parse {input:?} as {what}",
            input = escape::Bytes(input),
        )
    })
}

/// A printer for the ISO 8601 formats of every value type.
///
/// Printing never fails unless the writer given does.
///
/// # Example
///
/// ```
/// use calends::{civil::time, fmt::temporal::DateTimePrinter};
///
/// let printer = DateTimePrinter::new();
/// let mut buf = String::new();
/// printer.print_time(&time(9, 5, 0, 0), &mut buf)?;
/// buf.push(' ');
/// printer.print_time(&time(9, 5, 0, 1_000), &mut buf)?;
/// assert_eq!(buf, "09:05 09:05:00.000001");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DateTimePrinter {
    p: printer::DateTimePrinter,
}

impl DateTimePrinter {
    /// Create a new printer with `T` as the separator and upper case
    /// designators.
    pub const fn new() -> DateTimePrinter {
        DateTimePrinter { p: printer::DateTimePrinter::new() }
    }

    /// Use lower case for the separator and the `Z` designator.
    ///
    /// ```
    /// use calends::{fmt::temporal::DateTimePrinter, Instant};
    ///
    /// let printer = DateTimePrinter::new().lowercase(true);
    /// let mut buf = String::new();
    /// printer.print_instant(&Instant::UNIX_EPOCH, &mut buf)?;
    /// assert_eq!(buf, "1970-01-01t00:00:00z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub const fn lowercase(self, yes: bool) -> DateTimePrinter {
        DateTimePrinter { p: self.p.lowercase(yes) }
    }

    /// Use the given ASCII character between the date and the time.
    ///
    /// # Panics
    ///
    /// This panics if the byte given isn't ASCII.
    pub const fn separator(self, ascii_char: u8) -> DateTimePrinter {
        DateTimePrinter { p: self.p.separator(ascii_char) }
    }

    /// Print a zoned datetime. The bracketed time zone identifier is left
    /// out for a fixed offset time zone, since the offset says it all.
    pub fn print_zoned<W: Write>(&self, zdt: &Zoned, wtr: W) -> Result<(), Error> {
        self.p.print_zoned(zdt, wtr)
    }

    /// Print an instant in UTC, always with seconds.
    pub fn print_instant<W: Write>(
        &self,
        instant: &Instant,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_instant(instant, wtr)
    }

    pub fn print_offset_datetime<W: Write>(
        &self,
        odt: &OffsetDateTime,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_offset_datetime(odt, wtr)
    }

    pub fn print_offset_time<W: Write>(
        &self,
        ot: &OffsetTime,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_offset_time(ot, wtr)
    }

    pub fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_datetime(dt, wtr)
    }

    pub fn print_date<W: Write>(&self, date: &Date, wtr: W) -> Result<(), Error> {
        self.p.print_date(date, wtr)
    }

    /// Print a time. Seconds are only printed when they or the fraction
    /// are non-zero, and the fraction is printed with 3, 6 or 9 digits.
    pub fn print_time<W: Write>(&self, time: &Time, wtr: W) -> Result<(), Error> {
        self.p.print_time(time, wtr)
    }

    pub fn print_year<W: Write>(&self, year: &Year, wtr: W) -> Result<(), Error> {
        self.p.print_year(year, wtr)
    }

    pub fn print_year_month<W: Write>(
        &self,
        ym: &YearMonth,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_year_month(ym, wtr)
    }

    pub fn print_month_day<W: Write>(
        &self,
        md: &MonthDay,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_month_day(md, wtr)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, datetime},
        tz::TimeZone,
    };

    use super::*;

    #[test]
    fn errors_name_the_input() {
        let parser = DateTimeParser::new();
        insta::assert_snapshot!(
            parser.parse_date("2024-03-05T").unwrap_err(),
            @r#"failed to parse "2024-03-05T" as date: parsed value '2024-03-05', but unparsed input "T" remains (expected no unparsed input)"#,
        );
        insta::assert_snapshot!(
            parser.parse_year_month("2024-3").unwrap_err(),
            @r#"failed to parse "2024-3" as year-month: expected two digit month, but found end of input"#,
        );
        insta::assert_snapshot!(
            parser.parse_instant("2024-03-05T10:15").unwrap_err(),
            @r#"failed to parse "2024-03-05T10:15" as instant: expected offset (`Z` or a `+`/`-` sign), but found end of input"#,
        );
        let err = parser.parse_zoned("2024-03-05T10:15[Nowhere/Special]").unwrap_err();
        assert!(err.is_parse());
        assert!(err.is_zone_lookup());
    }

    #[test]
    fn roundtrips() {
        let parser = DateTimeParser::new();
        let printer = DateTimePrinter::new();

        let d = date(-12_345, 6, 7);
        let mut buf = String::new();
        printer.print_date(&d, &mut buf).unwrap();
        assert_eq!(parser.parse_date(&buf).unwrap(), d);

        let tz = TimeZone::get("Europe/London").unwrap();
        let zdt = datetime(2024, 10, 27, 1, 30, 0, 0)
            .to_zoned_with(tz, crate::tz::Disambiguation::Later)
            .unwrap();
        let mut buf = String::new();
        printer.print_zoned(&zdt, &mut buf).unwrap();
        assert_eq!(buf, "2024-10-27T01:30Z[Europe/London]");
        let parsed = parser.parse_zoned(&buf).unwrap();
        assert_eq!(parsed, zdt);
        assert_eq!(parsed.offset(), zdt.offset());
    }
}
