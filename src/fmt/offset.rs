/*!
Parsing and printing of UTC offsets.

The printer always emits the extended format: `Z` for a zero offset,
otherwise `±HH:MM`, with `:SS` appended when the offset has a seconds
component.

The parser is more liberal and accepts any of the following:

* `Z` (or `z`)
* `±H` and `±HH`
* `±HH:MM` and `±HHMM`
* `±HH:MM:SS` and `±HHMMSS`

Mixing the basic and extended formats (e.g., `+01:3045`) isn't allowed.
*/

use crate::{
    error::{parse_err, Error, ErrorContext},
    fmt::{
        util::{found, DecimalFormatter},
        Parsed, Write, WriteExt,
    },
    tz::Offset,
    util::{escape, parse},
};

/// The default offset printer used by `Offset`'s `Display` impl.
pub(crate) static DEFAULT_PRINTER: Printer = Printer::new();

/// The default offset parser used by `Offset`'s `FromStr` impl.
pub(crate) static DEFAULT_PARSER: Parser = Parser::new();

/// A printer for UTC offsets.
#[derive(Clone, Debug)]
pub(crate) struct Printer {
    lowercase: bool,
}

impl Printer {
    pub(crate) const fn new() -> Printer {
        Printer { lowercase: false }
    }

    /// When enabled, a zero offset is printed as `z` instead of `Z`.
    pub(crate) const fn lowercase(self, yes: bool) -> Printer {
        Printer { lowercase: yes }
    }

    pub(crate) fn print_offset<W: Write>(
        &self,
        offset: &Offset,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        if offset.seconds() == 0 {
            return wtr.write_str(if self.lowercase { "z" } else { "Z" });
        }
        wtr.write_str(if offset.is_negative() { "-" } else { "+" })?;
        wtr.write_int(&FMT_TWO, offset.hours_part().unsigned_abs())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, offset.minutes_part().unsigned_abs())?;
        let seconds = offset.seconds_part().unsigned_abs();
        if seconds != 0 {
            wtr.write_str(":")?;
            wtr.write_int(&FMT_TWO, seconds)?;
        }
        Ok(())
    }
}

/// A parser for UTC offsets.
#[derive(Clone, Debug)]
pub(crate) struct Parser {
    _priv: (),
}

impl Parser {
    pub(crate) const fn new() -> Parser {
        Parser { _priv: () }
    }

    /// Parses an offset that makes up the entirety of `input`.
    pub(crate) fn parse_offset<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Offset, Error> {
        let input = input.as_ref();
        self.parse(input).and_then(|parsed| parsed.into_full()).with_context(
            || {
                parse_err!(
                    "failed to parse {input:?} as offset",
                    input = escape::Bytes(input),
                )
            },
        )
    }

    /// Parses an offset from the beginning of `input`, returning whatever
    /// input remains.
    pub(crate) fn parse<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        let Some((&first, input)) = input.split_first() else {
            return Err(parse_err!(
                "expected offset (`Z` or a `+`/`-` sign), \
                 but found end of input",
            ));
        };
        let sign: i8 = match first {
            b'Z' | b'z' => {
                return Ok(Parsed { value: Offset::UTC, input });
            }
            b'+' => 1,
            b'-' => -1,
            byte => {
                return Err(parse_err!(
                    "expected offset (`Z` or a `+`/`-` sign), \
                     but found {byte:?}",
                    byte = escape::Byte(byte),
                ));
            }
        };

        let Parsed { value: hours, input } = self.parse_hours(input)?;
        let extended = input.starts_with(b":");
        let Parsed { value: minutes, input } =
            self.parse_optional_part(input, extended, "minutes")?;
        let (seconds, input) = match minutes {
            None => (None, input),
            Some(_) => {
                let Parsed { value, input } =
                    self.parse_optional_part(input, extended, "seconds")?;
                (value, input)
            }
        };
        let offset = Offset::from_hms(
            sign * hours,
            sign * minutes.unwrap_or(0),
            sign * seconds.unwrap_or(0),
        )?;
        Ok(Parsed { value: offset, input })
    }

    /// Parses one or two hour digits.
    fn parse_hours<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, i8>, Error> {
        let (digits, _) = parse::digits(input);
        let len = match digits.len() {
            0 => {
                return Err(parse_err!(
                    "expected one or two digit hours after offset sign, \
                     but found {found}",
                    found = found(input),
                ));
            }
            1 => 1,
            _ => 2,
        };
        let (hours, input) = input.split_at(len);
        let hours = parse::i64(hours)
            .with_context(|| parse_err!("failed to parse offset hours"))?;
        if hours > 18 {
            return Err(Error::range("offset hours", hours, 0, 18));
        }
        // OK because of the check above.
        Ok(Parsed { value: i8::try_from(hours).unwrap(), input })
    }

    /// Parses a `:MM` (or `MM` in basic format) component when present.
    ///
    /// In the extended format, a component is present exactly when a `:`
    /// follows. In the basic format, it is present when the next byte is an
    /// ASCII digit.
    fn parse_optional_part<'i>(
        &self,
        input: &'i [u8],
        extended: bool,
        what: &'static str,
    ) -> Result<Parsed<'i, Option<i8>>, Error> {
        let input = if extended {
            match input.strip_prefix(b":") {
                None => return Ok(Parsed { value: None, input }),
                Some(input) => input,
            }
        } else {
            if !input.first().map_or(false, |b| b.is_ascii_digit()) {
                return Ok(Parsed { value: None, input });
            }
            input
        };
        let (digits, input) = parse::split(input, 2).ok_or_else(|| {
            parse_err!(
                "expected two digit offset {what}, but found end of input"
            )
        })?;
        let n = parse::i64(digits)
            .with_context(|| parse_err!("failed to parse offset {what}"))?;
        if n > 59 {
            return Err(Error::range(what, n, 0, 59)
                .context(parse_err!("invalid offset {what}")));
        }
        // OK because of the check above.
        Ok(Parsed { value: Some(i8::try_from(n).unwrap()), input })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(offset: Offset) -> String {
        let mut buf = String::new();
        Printer::new().print_offset(&offset, &mut buf).unwrap();
        buf
    }

    fn parse(input: &str) -> Offset {
        Parser::new().parse_offset(input).unwrap()
    }

    fn parse_err(input: &str) -> Error {
        Parser::new().parse_offset(input).unwrap_err()
    }

    #[test]
    fn ok_print() {
        insta::assert_snapshot!(print(Offset::UTC), @"Z");
        insta::assert_snapshot!(print(Offset::constant(1)), @"+01:00");
        insta::assert_snapshot!(print(Offset::constant(-18)), @"-18:00");
        insta::assert_snapshot!(print(Offset::constant_seconds(19_800)), @"+05:30");
        insta::assert_snapshot!(print(Offset::constant_seconds(-18_062)), @"-05:01:02");
        insta::assert_snapshot!(print(Offset::constant_seconds(1)), @"+00:00:01");

        let mut buf = String::new();
        Printer::new().lowercase(true).print_offset(&Offset::UTC, &mut buf).unwrap();
        assert_eq!(buf, "z");
    }

    #[test]
    fn ok_parse() {
        assert_eq!(parse("Z"), Offset::UTC);
        assert_eq!(parse("z"), Offset::UTC);
        assert_eq!(parse("+1"), Offset::constant(1));
        assert_eq!(parse("-01"), Offset::constant(-1));
        assert_eq!(parse("+05:30"), Offset::constant_seconds(19_800));
        assert_eq!(parse("+0530"), Offset::constant_seconds(19_800));
        assert_eq!(parse("-05:01:02"), Offset::constant_seconds(-18_062));
        assert_eq!(parse("-050102"), Offset::constant_seconds(-18_062));
        assert_eq!(parse("+18:00"), Offset::MAX);
        assert_eq!(parse("-00:00"), Offset::UTC);
    }

    #[test]
    fn ok_parse_prefix() {
        let Parsed { value, input } = Parser::new().parse(b"+01:00[Europe/Paris]").unwrap();
        assert_eq!(value, Offset::constant(1));
        assert_eq!(input, b"[Europe/Paris]");

        let Parsed { value, input } = Parser::new().parse(b"-0830T").unwrap();
        assert_eq!(value, Offset::constant_seconds(-30_600));
        assert_eq!(input, b"T");
    }

    #[test]
    fn err_parse() {
        insta::assert_snapshot!(
            parse_err(""),
            @r#"failed to parse "" as offset: expected offset (`Z` or a `+`/`-` sign), but found end of input"#,
        );
        insta::assert_snapshot!(
            parse_err("01:00"),
            @r#"failed to parse "01:00" as offset: expected offset (`Z` or a `+`/`-` sign), but found "0""#,
        );
        insta::assert_snapshot!(
            parse_err("+"),
            @r#"failed to parse "+" as offset: expected one or two digit hours after offset sign, but found end of input"#,
        );
        insta::assert_snapshot!(
            parse_err("+01:6"),
            @r#"failed to parse "+01:6" as offset: expected two digit offset minutes, but found end of input"#,
        );
        insta::assert_snapshot!(
            parse_err("+01:00:00x"),
            @r#"failed to parse "+01:00:00x" as offset: parsed value '+01:00', but unparsed input "x" remains (expected no unparsed input)"#,
        );
        insta::assert_snapshot!(
            parse_err("+01:60"),
            @r#"failed to parse "+01:60" as offset: invalid offset minutes: parameter 'minutes' with value 60 is not in the required range of 0..=59"#,
        );
        assert!(parse_err("+01:60").is_range());

        let err = parse_err("+19:00");
        assert!(err.is_range());
        assert!(err.is_parse());
        insta::assert_snapshot!(
            err,
            @r#"failed to parse "+19:00" as offset: parameter 'offset hours' with value 19 is not in the required range of 0..=18"#,
        );
        assert!(parse_err("+18:00:01").is_range());
    }

    quickcheck::quickcheck! {
        fn prop_roundtrip(offset: Offset) -> bool {
            parse(&print(offset)) == offset
        }
    }
}
