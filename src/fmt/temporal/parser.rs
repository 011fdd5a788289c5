use crate::{
    civil::{Date, DateTime, MonthDay, Time, Year, YearMonth},
    error::{parse_err, Error, ErrorContext},
    fmt::{
        offset,
        util::{found, parse_fraction},
        Parsed,
    },
    tz::{AmbiguousOffset, Offset, TimeZone},
    util::{
        common::{YEAR_MAX, YEAR_MIN},
        escape, parse,
    },
    Instant, OffsetDateTime, OffsetTime, Zoned,
};

#[derive(Clone, Debug)]
pub(super) struct DateTimeParser {
    _priv: (),
}

impl DateTimeParser {
    pub(super) const fn new() -> DateTimeParser {
        DateTimeParser { _priv: () }
    }

    // DateTime [Offset] [ "[" ZoneId "]" ]
    //
    // At least one of the offset or the zone must be present. Without a
    // zone, the offset becomes a fixed offset zone.
    pub(super) fn parse_zoned_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Zoned>, Error> {
        let Parsed { value: dt, input } = self.parse_datetime_spec(input)?;
        let Parsed { value: offset, input } =
            self.parse_optional_offset(input)?;
        let Parsed { value: id, input } = self.parse_zone_annotation(input)?;
        let tz = match (id, offset) {
            (Some(id), _) => TimeZone::get(id)?,
            (None, Some(offset)) => TimeZone::fixed(offset),
            (None, None) => {
                return Err(parse_err!(
                    "expected offset or time zone annotation after \
                     datetime, but found {found}",
                    found = found(input),
                ));
            }
        };
        let zdt = match offset {
            Some(offset) if self.is_usable_offset(&tz, dt, offset) => {
                Zoned::from_strict(dt, offset, tz)?
            }
            _ => {
                log!(if let Some(offset) = offset {
                    trace!(
                        "offset {offset} is not valid for {dt} in {id}, \
                         resolving with compatible disambiguation",
                        id = tz.id(),
                    );
                });
                Zoned::from_local(dt, tz)?
            }
        };
        Ok(Parsed { value: zdt, input })
    }

    // DateTime Offset
    pub(super) fn parse_instant_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Instant>, Error> {
        let Parsed { value: dt, input } = self.parse_datetime_spec(input)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;
        let instant = Instant::from_datetime(dt, offset)?;
        Ok(Parsed { value: instant, input })
    }

    // DateTime Offset
    pub(super) fn parse_offset_datetime_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, OffsetDateTime>, Error> {
        let Parsed { value: dt, input } = self.parse_datetime_spec(input)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;
        Ok(Parsed { value: OffsetDateTime::new(dt, offset), input })
    }

    // Time Offset
    pub(super) fn parse_offset_time_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, OffsetTime>, Error> {
        let Parsed { value: time, input } = self.parse_time_spec(input)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;
        Ok(Parsed { value: OffsetTime::new(time, offset), input })
    }

    // Date ( "T" | "t" | " " ) Time
    pub(super) fn parse_datetime_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, DateTime>, Error> {
        let Parsed { value: date, input } = self.parse_date_spec(input)?;
        let input = match input.split_first() {
            Some((b'T' | b't' | b' ', tail)) => tail,
            _ => {
                return Err(parse_err!(
                    "expected `T` separator after date, but found {found}",
                    found = found(input),
                ));
            }
        };
        let Parsed { value: time, input } = self.parse_time_spec(input)?;
        Ok(Parsed { value: DateTime::from_parts(date, time), input })
    }

    // Year "-" Month "-" Day
    pub(super) fn parse_date_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Date>, Error> {
        let Parsed { value: year, input } = self.parse_year_number(input)?;
        let input = self.parse_separator(input, b'-', "year")?;
        let Parsed { value: month, input } =
            self.parse_two_digits(input, "month")?;
        let input = self.parse_separator(input, b'-', "month")?;
        let Parsed { value: day, input } =
            self.parse_two_digits(input, "day")?;
        let date = Date::new(year, month, day)
            .with_context(|| parse_err!("parsed date is not valid"))?;
        Ok(Parsed { value: date, input })
    }

    // Hour ":" Minute [ ":" Second [ Fraction ] ]
    pub(super) fn parse_time_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Time>, Error> {
        let Parsed { value: hour, input } =
            self.parse_two_digits(input, "hour")?;
        let input = self.parse_separator(input, b':', "hour")?;
        let Parsed { value: minute, input } =
            self.parse_two_digits(input, "minute")?;

        let (second, nanosecond, input) = match input.strip_prefix(b":") {
            None => (0, 0, input),
            Some(input) => {
                let Parsed { value: second, input } =
                    self.parse_two_digits(input, "second")?;
                let Parsed { value: nanosecond, input } =
                    parse_fraction(input)?;
                (second, nanosecond.unwrap_or(0), input)
            }
        };
        let time = Time::new(hour, minute, second, nanosecond)
            .with_context(|| parse_err!("parsed time is not valid"))?;
        Ok(Parsed { value: time, input })
    }

    pub(super) fn parse_year_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Year>, Error> {
        let Parsed { value: year, input } = self.parse_year_number(input)?;
        Ok(Parsed { value: Year::new(year)?, input })
    }

    // Year "-" Month
    pub(super) fn parse_year_month_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, YearMonth>, Error> {
        let Parsed { value: year, input } = self.parse_year_number(input)?;
        let input = self.parse_separator(input, b'-', "year")?;
        let Parsed { value: month, input } =
            self.parse_two_digits(input, "month")?;
        let ym = YearMonth::new(year, month)
            .with_context(|| parse_err!("parsed year-month is not valid"))?;
        Ok(Parsed { value: ym, input })
    }

    // "--" Month "-" Day
    pub(super) fn parse_month_day_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, MonthDay>, Error> {
        let Some(input) = input.strip_prefix(b"--") else {
            return Err(parse_err!(
                "expected `--` before month-day, but found {found}",
                found = found(input),
            ));
        };
        let Parsed { value: month, input } =
            self.parse_two_digits(input, "month")?;
        let input = self.parse_separator(input, b'-', "month")?;
        let Parsed { value: day, input } =
            self.parse_two_digits(input, "day")?;
        let md = MonthDay::new(month, day)
            .with_context(|| parse_err!("parsed month-day is not valid"))?;
        Ok(Parsed { value: md, input })
    }

    /// Parses a year with exactly four digits, or with a sign and four to
    /// ten digits.
    fn parse_year_number<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, i32>, Error> {
        let (sign, input) = match input.split_first() {
            Some((b'+', tail)) => (Some(1), tail),
            Some((b'-', tail)) => (Some(-1), tail),
            _ => (None, input),
        };
        let (digits, rest) = parse::digits(input);
        match sign {
            None if digits.is_empty() => {
                return Err(parse_err!(
                    "expected four digit year, but found {found}",
                    found = found(input),
                ));
            }
            None if digits.len() > 4 => {
                return Err(parse_err!(
                    "expected four digit year, but found {len} digits \
                     (a year with more than four digits must start with \
                     a `+` or `-` sign)",
                    len = digits.len(),
                ));
            }
            None if digits.len() < 4 => {
                return Err(parse_err!(
                    "expected four digit year, but found {len} digits",
                    len = digits.len(),
                ));
            }
            Some(_) if !(4..=10).contains(&digits.len()) => {
                return Err(parse_err!(
                    "expected four to ten digit year after sign, \
                     but found {len} digits",
                    len = digits.len(),
                ));
            }
            _ => {}
        }
        let year = parse::i64(digits)
            .with_context(|| parse_err!("failed to parse year"))?;
        if sign == Some(-1) && year == 0 {
            return Err(parse_err!("negative year zero is not allowed"));
        }
        let year = year * sign.unwrap_or(1);
        if !(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX)).contains(&year) {
            return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
        }
        // OK because of the range check above.
        Ok(Parsed { value: i32::try_from(year).unwrap(), input: rest })
    }

    fn parse_two_digits<'i>(
        &self,
        input: &'i [u8],
        what: &'static str,
    ) -> Result<Parsed<'i, i8>, Error> {
        let (digits, input) = parse::split(input, 2).ok_or_else(|| {
            parse_err!("expected two digit {what}, but found end of input")
        })?;
        let n = parse::i64(digits).with_context(|| {
            parse_err!("failed to parse two digit {what}")
        })?;
        // OK because two ASCII digits always fit in an `i8`.
        Ok(Parsed { value: i8::try_from(n).unwrap(), input })
    }

    fn parse_separator<'i>(
        &self,
        input: &'i [u8],
        separator: u8,
        after: &'static str,
    ) -> Result<&'i [u8], Error> {
        match input.split_first() {
            Some((&b, tail)) if b == separator => Ok(tail),
            _ => Err(parse_err!(
                "expected {sep:?} after {after}, but found {found}",
                sep = escape::Byte(separator),
                found = found(input),
            )),
        }
    }

    fn parse_offset<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        offset::DEFAULT_PARSER.parse(input)
    }

    fn parse_optional_offset<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<Offset>>, Error> {
        match input.first() {
            Some(b'+' | b'-' | b'Z' | b'z') => {
                let Parsed { value, input } = self.parse_offset(input)?;
                Ok(Parsed { value: Some(value), input })
            }
            _ => Ok(Parsed { value: None, input }),
        }
    }

    // "[" ZoneId "]"
    fn parse_zone_annotation<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<&'i str>>, Error> {
        let Some(input) = input.strip_prefix(b"[") else {
            return Ok(Parsed { value: None, input });
        };
        let Some(end) = input.iter().position(|&b| b == b']') else {
            return Err(parse_err!(
                "expected `]` to close time zone annotation, \
                 but found end of input",
            ));
        };
        let (id, input) = (&input[..end], &input[end + 1..]);
        if id.is_empty() {
            return Err(parse_err!("time zone annotation is empty"));
        }
        let id = core::str::from_utf8(id).map_err(|_| {
            parse_err!(
                "time zone annotation {id:?} is not valid UTF-8",
                id = escape::Bytes(id),
            )
        })?;
        Ok(Parsed { value: Some(id), input })
    }

    /// Returns true when `offset` picks out a single instant for `dt` in
    /// `tz`. An offset never does in a gap.
    fn is_usable_offset(
        &self,
        tz: &TimeZone,
        dt: DateTime,
        offset: Offset,
    ) -> bool {
        match tz.to_ambiguous_offset(dt) {
            AmbiguousOffset::Gap { .. } => false,
            ambiguous => ambiguous.is_valid(offset),
        }
    }
}

impl Default for DateTimeParser {
    fn default() -> DateTimeParser {
        DateTimeParser::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::{date, datetime, time};

    use super::*;

    fn full<'i, V: core::fmt::Display>(
        result: Result<Parsed<'i, V>, Error>,
    ) -> V {
        result.and_then(|p| p.into_full()).unwrap()
    }

    #[test]
    fn ok_date() {
        let p = |input: &str| full(DateTimeParser::new().parse_date_spec(input.as_bytes()));

        assert_eq!(p("2024-03-05"), date(2024, 3, 5));
        assert_eq!(p("0000-01-01"), date(0, 1, 1));
        assert_eq!(p("-0001-12-31"), date(-1, 12, 31));
        assert_eq!(p("+2024-03-05"), date(2024, 3, 5));
        assert_eq!(p("+12345-01-01"), date(12_345, 1, 1));
        assert_eq!(p("+999999999-12-31"), Date::MAX);
        assert_eq!(p("-999999999-01-01"), Date::MIN);
    }

    #[test]
    fn err_date() {
        let p = |input: &str| {
            DateTimeParser::new().parse_date_spec(input.as_bytes()).unwrap_err()
        };

        insta::assert_snapshot!(p(""), @"expected four digit year, but found end of input");
        insta::assert_snapshot!(p("x"), @r#"expected four digit year, but found "x""#);
        insta::assert_snapshot!(p("202-01-01"), @"expected four digit year, but found 3 digits");
        insta::assert_snapshot!(
            p("20240-01-01"),
            @"expected four digit year, but found 5 digits (a year with more than four digits must start with a `+` or `-` sign)",
        );
        insta::assert_snapshot!(
            p("+123-01-01"),
            @"expected four to ten digit year after sign, but found 3 digits",
        );
        insta::assert_snapshot!(p("-0000-01-01"), @"negative year zero is not allowed");
        insta::assert_snapshot!(
            p("+1000000000-01-01"),
            @"parameter 'year' with value 1000000000 is not in the required range of -999999999..=999999999",
        );
        insta::assert_snapshot!(p("2024/03/05"), @r#"expected "-" after year, but found "/""#);
        insta::assert_snapshot!(p("2024-3-05"), @r#"failed to parse two digit month: invalid digit, expected 0-9 but got -"#);
        insta::assert_snapshot!(p("2024-03-"), @"expected two digit day, but found end of input");
        insta::assert_snapshot!(
            p("2024-13-01"),
            @"parsed date is not valid: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            p("2023-02-29"),
            @"parsed date is not valid: invalid date 'February 29' as '2023' is not a leap year",
        );
        assert!(p("2023-02-29").is_invalid_date());
        assert!(p("2023-02-29").is_parse());
    }

    #[test]
    fn ok_time() {
        let p = |input: &str| full(DateTimeParser::new().parse_time_spec(input.as_bytes()));

        assert_eq!(p("10:15"), time(10, 15, 0, 0));
        assert_eq!(p("10:15:30"), time(10, 15, 30, 0));
        assert_eq!(p("10:15:30.5"), time(10, 15, 30, 500_000_000));
        assert_eq!(p("10:15:30,000000001"), time(10, 15, 30, 1));
        assert_eq!(p("23:59:59.999999999"), Time::MAX);
    }

    #[test]
    fn err_time() {
        let p = |input: &str| {
            DateTimeParser::new().parse_time_spec(input.as_bytes()).unwrap_err()
        };

        insta::assert_snapshot!(p("1"), @"expected two digit hour, but found end of input");
        insta::assert_snapshot!(p("1015"), @r#"expected ":" after hour, but found "1""#);
        insta::assert_snapshot!(
            p("24:00"),
            @"parsed time is not valid: parameter 'hour' with value 24 is not in the required range of 0..=23",
        );
        insta::assert_snapshot!(
            p("10:15:30."),
            @"failed to parse digits after decimal separator: invalid fraction, no digits found",
        );
        insta::assert_snapshot!(
            p("10:15:60"),
            @"parsed time is not valid: parameter 'second' with value 60 is not in the required range of 0..=59",
        );
    }

    #[test]
    fn ok_datetime() {
        let p = |input: &str| full(DateTimeParser::new().parse_datetime_spec(input.as_bytes()));

        let expected = datetime(2024, 3, 5, 10, 15, 0, 0);
        assert_eq!(p("2024-03-05T10:15"), expected);
        assert_eq!(p("2024-03-05t10:15"), expected);
        assert_eq!(p("2024-03-05 10:15:00"), expected);

        insta::assert_snapshot!(
            DateTimeParser::new().parse_datetime_spec(b"2024-03-05").unwrap_err(),
            @"expected `T` separator after date, but found end of input",
        );
    }

    #[test]
    fn ok_offsets() {
        let parser = DateTimeParser::new();

        let odt = full(parser.parse_offset_datetime_spec(b"2024-03-05T10:15+0130"));
        assert_eq!(odt.offset(), Offset::constant_seconds(5_400));
        assert_eq!(odt.datetime(), datetime(2024, 3, 5, 10, 15, 0, 0));

        let ot = full(parser.parse_offset_time_spec(b"10:15:30.25-03:00"));
        assert_eq!(ot.time(), time(10, 15, 30, 250_000_000));
        assert_eq!(ot.offset(), Offset::constant(-3));

        let instant = full(parser.parse_instant_spec(b"1970-01-01T01:00:00.5+01:00"));
        assert_eq!(instant, Instant::from_second_and_nanos(0, 500_000_000).unwrap());

        insta::assert_snapshot!(
            parser.parse_instant_spec(b"1970-01-01T00:00").unwrap_err(),
            @"expected offset (`Z` or a `+`/`-` sign), but found end of input",
        );
    }

    #[test]
    fn ok_zoned() {
        let parser = DateTimeParser::new();
        let p = |input: &str| full(parser.parse_zoned_spec(input.as_bytes()));

        let zdt = p("2024-07-01T09:00-04:00[America/New_York]");
        assert_eq!(zdt.time_zone().id(), "America/New_York");
        assert_eq!(zdt.offset(), Offset::constant(-4));

        // Without an offset, compatible disambiguation applies.
        let zdt = p("2024-07-01T09:00[America/New_York]");
        assert_eq!(zdt.offset(), Offset::constant(-4));

        // Without a zone, the offset is the zone.
        let zdt = p("2024-07-01T09:00+02:00");
        assert_eq!(zdt.time_zone(), &TimeZone::fixed(Offset::constant(2)));

        // In a fold, the offset picks the instant.
        let earlier = p("2024-11-03T01:30-04:00[America/New_York]");
        let later = p("2024-11-03T01:30-05:00[America/New_York]");
        assert_eq!(later.instant().as_second() - earlier.instant().as_second(), 3_600);

        // An offset that is wrong for the zone is ignored.
        let zdt = p("2024-07-01T09:00+09:00[America/New_York]");
        assert_eq!(zdt.offset(), Offset::constant(-4));
        assert_eq!(zdt.datetime(), datetime(2024, 7, 1, 9, 0, 0, 0));

        // In a gap, the datetime is shifted forward.
        let zdt = p("2024-03-10T02:30-05:00[America/New_York]");
        assert_eq!(zdt.datetime(), datetime(2024, 3, 10, 3, 30, 0, 0));
    }

    #[test]
    fn err_zoned() {
        let p = |input: &str| {
            DateTimeParser::new().parse_zoned_spec(input.as_bytes()).unwrap_err()
        };

        insta::assert_snapshot!(
            p("2024-07-01T09:00"),
            @"expected offset or time zone annotation after datetime, but found end of input",
        );
        insta::assert_snapshot!(
            p("2024-07-01T09:00Z[America/New_York"),
            @"expected `]` to close time zone annotation, but found end of input",
        );
        insta::assert_snapshot!(p("2024-07-01T09:00Z[]"), @"time zone annotation is empty");
        assert!(p("2024-07-01T09:00Z[Mars/Olympus_Mons]").is_zone_lookup());
    }

    #[test]
    fn partial_dates() {
        let parser = DateTimeParser::new();

        assert_eq!(full(parser.parse_year_spec(b"-0005")).year(), -5);
        assert_eq!(
            full(parser.parse_year_month_spec(b"2024-02")),
            YearMonth::new(2024, 2).unwrap(),
        );
        assert_eq!(
            full(parser.parse_month_day_spec(b"--02-29")),
            MonthDay::new(2, 29).unwrap(),
        );
        insta::assert_snapshot!(
            parser.parse_month_day_spec(b"02-29").unwrap_err(),
            @r#"expected `--` before month-day, but found "0""#,
        );
        insta::assert_snapshot!(
            parser.parse_month_day_spec(b"--02-30").unwrap_err(),
            @"parsed month-day is not valid: day-of-month 30 is not valid for February",
        );
        assert!(parser.parse_year_month_spec(b"2024-3").is_err());
    }
}
