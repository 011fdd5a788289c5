/*!
Parsing and printing of ISO 8601 durations and periods.

A [`Duration`] is printed with hours, minutes and seconds only, e.g.,
`PT36H` for a day and a half. Days are accepted when parsing and are
always exactly 24 hours. A negative duration carries a sign on every
component, e.g., `PT-1H-30M`. Both parsers accept an optional leading sign
that negates the whole value, and designators in either case.

A [`Period`] is printed with years, months and days, e.g., `P1Y2M3D`.
Weeks are accepted when parsing and are converted to days.

# Example

```
use calends::{Duration, Period};

let d: Duration = "-PT1H-30M".parse()?;
assert_eq!(d, Duration::from_secs(-1_800));
assert_eq!(d.to_string(), "PT-30M");

let p: Period = "p1y2w".parse()?;
assert_eq!(p, Period::new(1, 0, 14));
assert_eq!(p.to_string(), "P1Y14D");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    error::{parse_err, Error, ErrorContext},
    fmt::{
        util::{found, parse_fraction, DecimalFormatter, FractionalFormatter},
        Parsed, Write, WriteExt,
    },
    util::{
        common::{
            NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND,
        },
        escape, parse,
    },
    Duration, Period,
};

/// The printer used by the `Display` impls of `Duration` and `Period`.
pub(crate) static DEFAULT_PRINTER: Printer = Printer::new();

/// The parser used by the `FromStr` impls of `Duration` and `Period`.
pub(crate) static DEFAULT_PARSER: Parser = Parser::new();

static FMT_INT: DecimalFormatter = DecimalFormatter::new();

#[derive(Clone, Debug)]
pub(crate) struct Printer {
    _priv: (),
}

impl Printer {
    pub(crate) const fn new() -> Printer {
        Printer { _priv: () }
    }

    pub(crate) fn print_duration<W: Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_FRACTION: FractionalFormatter = FractionalFormatter::new();

        if duration.is_zero() {
            return wtr.write_str("PT0S");
        }
        let (secs, nanos) = (duration.seconds(), duration.subsec_nanos());
        // Negative durations with a fraction are stored as a negative
        // number of seconds plus a positive fraction, so the whole part
        // is one second too far from zero.
        let whole = if secs < 0 && nanos > 0 { secs + 1 } else { secs };
        let hours = whole / 3_600;
        let minutes = (whole % 3_600) / 60;
        let seconds = whole % 60;

        wtr.write_str("PT")?;
        if hours != 0 {
            wtr.write_int(&FMT_INT, hours)?;
            wtr.write_str("H")?;
        }
        if minutes != 0 {
            wtr.write_int(&FMT_INT, minutes)?;
            wtr.write_str("M")?;
        }
        if seconds == 0 && nanos == 0 {
            return Ok(());
        }
        if secs < 0 && nanos > 0 && seconds == 0 {
            wtr.write_str("-0")?;
        } else {
            wtr.write_int(&FMT_INT, seconds)?;
        }
        if nanos > 0 {
            let fraction = if secs < 0 { 1_000_000_000 - nanos } else { nanos };
            wtr.write_str(".")?;
            wtr.write_str(FMT_FRACTION.format(fraction).as_str())?;
        }
        wtr.write_str("S")
    }

    pub(crate) fn print_period<W: Write>(
        &self,
        period: &Period,
        mut wtr: W,
    ) -> Result<(), Error> {
        if period.is_zero() {
            return wtr.write_str("P0D");
        }
        wtr.write_str("P")?;
        let parts =
            [(period.years(), "Y"), (period.months(), "M"), (period.days(), "D")];
        for (value, designator) in parts {
            if value != 0 {
                wtr.write_int(&FMT_INT, value)?;
                wtr.write_str(designator)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Parser {
    _priv: (),
}

impl Parser {
    pub(crate) const fn new() -> Parser {
        Parser { _priv: () }
    }

    pub(crate) fn parse_duration<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration, Error> {
        let input = input.as_ref();
        self.parse_duration_spec(input)
            .and_then(|parsed| parsed.into_full())
            .with_context(|| {
                parse_err!(
                    "failed to parse {input:?} as duration",
                    input = escape::Bytes(input),
                )
            })
    }

    pub(crate) fn parse_period<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Period, Error> {
        let input = input.as_ref();
        self.parse_period_spec(input)
            .and_then(|parsed| parsed.into_full())
            .with_context(|| {
                parse_err!(
                    "failed to parse {input:?} as period",
                    input = escape::Bytes(input),
                )
            })
    }

    // [Sign] "P" [Value "D"] ["T" [Value "H"] [Value "M"] [Value[Fraction] "S"]]
    fn parse_duration_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Duration>, Error> {
        let Parsed { value: negate, input } = self.parse_sign(input);
        let mut input = self.parse_period_designator(input)?;
        let mut nanos: i128 = 0;
        let mut any = false;

        if !input.is_empty() && !input.starts_with(b"T") && !input.starts_with(b"t")
        {
            let Parsed { value, input: rest } = self.parse_unit_value(input)?;
            let Parsed { input: rest, .. } =
                self.parse_unit_designator(rest, &[b'D'])?;
            nanos += value.to_nanos(NANOS_PER_DAY);
            input = rest;
            any = true;
        }
        if let Some((b'T' | b't', rest)) = input.split_first() {
            input = rest;
            let mut allowed: &[u8] = b"HMS";
            while !input.is_empty() {
                let Parsed { value, input: rest } =
                    self.parse_unit_value(input)?;
                let Parsed { value: fraction, input: rest } =
                    parse_fraction(rest)?;
                let Parsed { value: designator, input: rest } =
                    self.parse_unit_designator(rest, allowed)?;
                let unit = match designator {
                    b'H' => NANOS_PER_HOUR,
                    b'M' => NANOS_PER_MINUTE,
                    _ => NANOS_PER_SECOND,
                };
                if let Some(fraction) = fraction {
                    if designator != b'S' {
                        return Err(parse_err!(
                            "fractional values are only allowed for \
                             seconds, but found one for {unit:?}",
                            unit = escape::Byte(designator),
                        ));
                    }
                    let fraction = i128::from(fraction);
                    nanos += if value.negative { -fraction } else { fraction };
                }
                nanos += value.to_nanos(unit);
                // OK because `parse_unit_designator` only returns a member
                // of `allowed`.
                let at = allowed.iter().position(|&b| b == designator).unwrap();
                allowed = &allowed[at + 1..];
                input = rest;
                any = true;
            }
            if allowed.len() == 3 {
                return Err(parse_err!(
                    "expected at least one time unit after `T`, \
                     but found end of input",
                ));
            }
        }
        if !any {
            return Err(parse_err!(
                "expected at least one unit in duration, \
                 but found end of input",
            ));
        }
        if negate {
            nanos = -nanos;
        }
        let duration = Duration::from_nanos_i128(nanos)?;
        Ok(Parsed { value: duration, input })
    }

    // [Sign] "P" [Value "Y"] [Value "M"] [Value "W"] [Value "D"]
    fn parse_period_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Period>, Error> {
        let Parsed { value: negate, input } = self.parse_sign(input);
        let mut input = self.parse_period_designator(input)?;
        let (mut years, mut months, mut weeks, mut days) = (0, 0, 0, 0);
        let mut allowed: &[u8] = b"YMWD";
        while !input.is_empty() {
            let Parsed { value, input: rest } = self.parse_unit_value(input)?;
            let Parsed { value: designator, input: rest } =
                self.parse_unit_designator(rest, allowed)?;
            let value = value.to_i32()?;
            match designator {
                b'Y' => years = value,
                b'M' => months = value,
                b'W' => weeks = value,
                _ => days = value,
            }
            // OK because `parse_unit_designator` only returns a member of
            // `allowed`.
            let at = allowed.iter().position(|&b| b == designator).unwrap();
            allowed = &allowed[at + 1..];
            input = rest;
        }
        if allowed.len() == 4 {
            return Err(parse_err!(
                "expected at least one unit in period, but found end of input",
            ));
        }
        let days = weeks
            .checked_mul(7)
            .and_then(|weeks| weeks.checked_add(days))
            .ok_or_else(|| Error::overflow("period days"))?;
        let mut period = Period::new(years, months, days);
        if negate {
            period = period.checked_neg()?;
        }
        Ok(Parsed { value: period, input })
    }

    fn parse_sign<'i>(&self, input: &'i [u8]) -> Parsed<'i, bool> {
        match input.split_first() {
            Some((b'-', tail)) => Parsed { value: true, input: tail },
            Some((b'+', tail)) => Parsed { value: false, input: tail },
            _ => Parsed { value: false, input },
        }
    }

    fn parse_period_designator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<&'i [u8], Error> {
        match input.split_first() {
            Some((b'P' | b'p', tail)) => Ok(tail),
            _ => Err(parse_err!(
                "expected `P` designator, but found {found}",
                found = found(input),
            )),
        }
    }

    /// Parses an optionally signed integer.
    fn parse_unit_value<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, UnitValue>, Error> {
        let Parsed { value: negative, input } = self.parse_sign(input);
        let (digits, input) = parse::digits(input);
        if digits.is_empty() {
            return Err(parse_err!(
                "expected integer before unit designator, but found {found}",
                found = found(input),
            ));
        }
        let magnitude = parse::i64(digits)
            .with_context(|| parse_err!("failed to parse unit value"))?;
        Ok(Parsed { value: UnitValue { negative, magnitude }, input })
    }

    /// Parses a designator (case insensitively) that must be in `allowed`.
    /// The designator returned is always upper case.
    fn parse_unit_designator<'i>(
        &self,
        input: &'i [u8],
        allowed: &[u8],
    ) -> Result<Parsed<'i, u8>, Error> {
        let Some((&first, tail)) = input.split_first() else {
            return Err(parse_err!(
                "expected unit designator after integer, \
                 but found end of input",
            ));
        };
        let designator = first.to_ascii_uppercase();
        if allowed.is_empty() {
            return Err(parse_err!(
                "expected end of input after the smallest unit, \
                 but found {found:?}",
                found = escape::Byte(first),
            ));
        }
        if !allowed.contains(&designator) {
            return Err(parse_err!(
                "expected one of the unit designators {allowed}, \
                 but found {found:?}",
                allowed = escape::Bytes(allowed),
                found = escape::Byte(first),
            ));
        }
        Ok(Parsed { value: designator, input: tail })
    }
}

/// An integer in front of a unit designator.
///
/// The sign is kept separately so that `-0.5S` keeps its sign.
#[derive(Clone, Copy, Debug)]
struct UnitValue {
    negative: bool,
    magnitude: i64,
}

impl UnitValue {
    fn to_nanos(self, unit: i64) -> i128 {
        let nanos = i128::from(self.magnitude) * i128::from(unit);
        if self.negative {
            -nanos
        } else {
            nanos
        }
    }

    fn to_i32(self) -> Result<i32, Error> {
        let value = if self.negative { -self.magnitude } else { self.magnitude };
        i32::try_from(value).map_err(|_| {
            Error::range("period unit", value, i32::MIN, i32::MAX)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print_duration(d: Duration) -> String {
        let mut buf = String::new();
        Printer::new().print_duration(&d, &mut buf).unwrap();
        buf
    }

    fn print_period(p: Period) -> String {
        let mut buf = String::new();
        Printer::new().print_period(&p, &mut buf).unwrap();
        buf
    }

    fn duration(input: &str) -> Duration {
        Parser::new().parse_duration(input).unwrap()
    }

    fn period(input: &str) -> Period {
        Parser::new().parse_period(input).unwrap()
    }

    #[test]
    fn ok_print_duration() {
        let d = |secs, nanos| Duration::new(secs, nanos).unwrap();

        insta::assert_snapshot!(print_duration(Duration::ZERO), @"PT0S");
        insta::assert_snapshot!(print_duration(d(1, 0)), @"PT1S");
        insta::assert_snapshot!(print_duration(d(60, 0)), @"PT1M");
        insta::assert_snapshot!(print_duration(d(90_061, 0)), @"PT25H1M1S");
        insta::assert_snapshot!(print_duration(d(-90_061, 0)), @"PT-25H-1M-1S");
        insta::assert_snapshot!(print_duration(d(0, 500_000_000)), @"PT0.5S");
        insta::assert_snapshot!(print_duration(d(0, -500_000_000)), @"PT-0.5S");
        insta::assert_snapshot!(print_duration(d(-3_600, -500_000_000)), @"PT-1H-0.5S");
        insta::assert_snapshot!(print_duration(d(-61, -1)), @"PT-1M-1.000000001S");
        insta::assert_snapshot!(print_duration(d(0, 1)), @"PT0.000000001S");
        insta::assert_snapshot!(
            print_duration(Duration::MIN),
            @"PT-2562047788015215H-30M-8S",
        );
        insta::assert_snapshot!(
            print_duration(Duration::MAX),
            @"PT2562047788015215H30M7.999999999S",
        );
    }

    #[test]
    fn ok_parse_duration() {
        assert_eq!(duration("PT0S"), Duration::ZERO);
        assert_eq!(duration("PT1H30M"), Duration::from_secs(5_400));
        assert_eq!(duration("pt1h30m"), Duration::from_secs(5_400));
        assert_eq!(duration("P2D"), Duration::from_secs(172_800));
        assert_eq!(duration("P1DT1S"), Duration::from_secs(86_401));
        assert_eq!(duration("PT-0.5S"), Duration::from_millis(-500));
        assert_eq!(duration("PT0,25S"), Duration::from_millis(250));
        assert_eq!(duration("-PT1H-30M"), Duration::from_secs(-1_800));
        assert_eq!(duration("+PT1M"), Duration::from_secs(60));
        assert_eq!(duration("PT-1H-0.5S"), Duration::new(-3_600, -500_000_000).unwrap());
        assert_eq!(duration("PT90M"), Duration::from_secs(5_400));
        assert_eq!(duration("PT-2562047788015215H-30M-8S"), Duration::MIN);
    }

    #[test]
    fn err_parse_duration() {
        let p = |input: &str| Parser::new().parse_duration(input).unwrap_err();

        insta::assert_snapshot!(
            p(""),
            @r#"failed to parse "" as duration: expected `P` designator, but found end of input"#,
        );
        insta::assert_snapshot!(
            p("P"),
            @r#"failed to parse "P" as duration: expected at least one unit in duration, but found end of input"#,
        );
        insta::assert_snapshot!(
            p("PT"),
            @r#"failed to parse "PT" as duration: expected at least one time unit after `T`, but found end of input"#,
        );
        insta::assert_snapshot!(
            p("P1H"),
            @r#"failed to parse "P1H" as duration: expected one of the unit designators D, but found "H""#,
        );
        insta::assert_snapshot!(
            p("PT1S1M"),
            @r#"failed to parse "PT1S1M" as duration: expected end of input after the smallest unit, but found "M""#,
        );
        insta::assert_snapshot!(
            p("PT1.5M"),
            @r#"failed to parse "PT1.5M" as duration: fractional values are only allowed for seconds, but found one for "M""#,
        );
        insta::assert_snapshot!(
            p("PTS"),
            @r#"failed to parse "PTS" as duration: expected integer before unit designator, but found "S""#,
        );
        let err = p("PT9223372036854775807H");
        assert!(err.is_parse());
        assert!(err.is_overflow());
    }

    #[test]
    fn ok_print_period() {
        insta::assert_snapshot!(print_period(Period::ZERO), @"P0D");
        insta::assert_snapshot!(print_period(Period::new(1, 2, 3)), @"P1Y2M3D");
        insta::assert_snapshot!(print_period(Period::new(0, -14, 0)), @"P-14M");
        insta::assert_snapshot!(print_period(Period::new(-1, 0, 5)), @"P-1Y5D");
    }

    #[test]
    fn ok_parse_period() {
        assert_eq!(period("P0D"), Period::ZERO);
        assert_eq!(period("P1Y2M3D"), Period::new(1, 2, 3));
        assert_eq!(period("p1y2m3d"), Period::new(1, 2, 3));
        assert_eq!(period("P2W"), Period::new(0, 0, 14));
        assert_eq!(period("P1W-1D"), Period::new(0, 0, 6));
        assert_eq!(period("-P1Y-2M"), Period::new(-1, 2, 0));
        assert_eq!(period("P-2147483648D"), Period::new(0, 0, i32::MIN));
    }

    #[test]
    fn err_parse_period() {
        let p = |input: &str| Parser::new().parse_period(input).unwrap_err();

        insta::assert_snapshot!(
            p("P"),
            @r#"failed to parse "P" as period: expected at least one unit in period, but found end of input"#,
        );
        insta::assert_snapshot!(
            p("P1D1Y"),
            @r#"failed to parse "P1D1Y" as period: expected end of input after the smallest unit, but found "Y""#,
        );
        insta::assert_snapshot!(
            p("PT1H"),
            @r#"failed to parse "PT1H" as period: expected integer before unit designator, but found "T""#,
        );
        let err = p("P2147483648Y");
        assert!(err.is_parse());
        assert!(err.is_range());
        let err = p("P306783379W");
        assert!(err.is_parse());
        assert!(err.is_overflow());
        let err = p("-P-2147483648D");
        assert!(err.is_parse());
        assert!(err.is_overflow());
    }

    quickcheck::quickcheck! {
        fn prop_duration_roundtrip(d: Duration) -> bool {
            duration(&print_duration(d)) == d
        }

        fn prop_period_roundtrip(p: Period) -> bool {
            period(&print_period(p)) == p
        }
    }
}
