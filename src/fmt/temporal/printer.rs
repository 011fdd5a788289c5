use crate::{
    civil::{Date, DateTime, MonthDay, Time, Year, YearMonth},
    error::Error,
    fmt::{
        offset,
        util::{DecimalFormatter, FractionalFormatter},
        Write, WriteExt,
    },
    tz::Offset,
    Instant, OffsetDateTime, OffsetTime, Zoned,
};

static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
static FMT_FRACTION: FractionalFormatter =
    FractionalFormatter::new().grouped(true);

#[derive(Clone, Debug)]
pub(super) struct DateTimePrinter {
    lowercase: bool,
    separator: u8,
}

impl DateTimePrinter {
    pub(super) const fn new() -> DateTimePrinter {
        DateTimePrinter { lowercase: false, separator: b'T' }
    }

    pub(super) const fn lowercase(self, yes: bool) -> DateTimePrinter {
        DateTimePrinter { lowercase: yes, ..self }
    }

    pub(super) const fn separator(self, ascii_char: u8) -> DateTimePrinter {
        assert!(ascii_char.is_ascii(), "datetime separator must be ASCII");
        DateTimePrinter { separator: ascii_char, ..self }
    }

    pub(super) fn print_zoned<W: Write>(
        &self,
        zdt: &Zoned,
        mut wtr: W,
    ) -> Result<(), Error> {
        let offset = zdt.offset();
        self.print_datetime(&zdt.datetime(), &mut wtr)?;
        self.print_offset(&offset, &mut wtr)?;
        let tz = zdt.time_zone();
        if tz.is_fixed_offset_zone() && tz.to_fixed_offset() == Some(offset) {
            return Ok(());
        }
        wtr.write_str("[")?;
        wtr.write_str(tz.id())?;
        wtr.write_str("]")?;
        Ok(())
    }

    pub(super) fn print_instant<W: Write>(
        &self,
        instant: &Instant,
        mut wtr: W,
    ) -> Result<(), Error> {
        let dt = instant.to_datetime(Offset::UTC);
        self.print_date(&dt.date(), &mut wtr)?;
        self.print_separator(&mut wtr)?;
        self.print_time_impl(&dt.time(), true, &mut wtr)?;
        self.print_offset(&Offset::UTC, &mut wtr)?;
        Ok(())
    }

    pub(super) fn print_offset_datetime<W: Write>(
        &self,
        odt: &OffsetDateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_datetime(&odt.datetime(), &mut wtr)?;
        self.print_offset(&odt.offset(), &mut wtr)?;
        Ok(())
    }

    pub(super) fn print_offset_time<W: Write>(
        &self,
        ot: &OffsetTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_time(&ot.time(), &mut wtr)?;
        self.print_offset(&ot.offset(), &mut wtr)?;
        Ok(())
    }

    pub(super) fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_date(&dt.date(), &mut wtr)?;
        self.print_separator(&mut wtr)?;
        self.print_time(&dt.time(), &mut wtr)?;
        Ok(())
    }

    pub(super) fn print_date<W: Write>(
        &self,
        date: &Date,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_year_number(date.year(), &mut wtr)?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, date.month())?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, date.day())?;
        Ok(())
    }

    pub(super) fn print_time<W: Write>(
        &self,
        time: &Time,
        wtr: W,
    ) -> Result<(), Error> {
        self.print_time_impl(time, false, wtr)
    }

    pub(super) fn print_year<W: Write>(
        &self,
        year: &Year,
        wtr: W,
    ) -> Result<(), Error> {
        self.print_year_number(year.year(), wtr)
    }

    pub(super) fn print_year_month<W: Write>(
        &self,
        ym: &YearMonth,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_year_number(ym.year(), &mut wtr)?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, ym.month())?;
        Ok(())
    }

    pub(super) fn print_month_day<W: Write>(
        &self,
        md: &MonthDay,
        mut wtr: W,
    ) -> Result<(), Error> {
        wtr.write_str("--")?;
        wtr.write_int(&FMT_TWO, md.month())?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, md.day())?;
        Ok(())
    }

    /// Years in `0..=9999` get exactly four digits. Negative years get at
    /// least four digits after the sign, and years after 9999 always carry a
    /// `+` so that they can be told apart from a four digit year followed
    /// by more digits.
    fn print_year_number<W: Write>(
        &self,
        year: i32,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_YEAR: DecimalFormatter = DecimalFormatter::new().padding(4);
        static FMT_YEAR_EXPANDED: DecimalFormatter =
            DecimalFormatter::new().padding(4).force_sign(true);

        if year > 9999 {
            wtr.write_int(&FMT_YEAR_EXPANDED, year)
        } else {
            wtr.write_int(&FMT_YEAR, year)
        }
    }

    /// Seconds are omitted when both they and the fraction are zero, unless
    /// `always_seconds` is set.
    fn print_time_impl<W: Write>(
        &self,
        time: &Time,
        always_seconds: bool,
        mut wtr: W,
    ) -> Result<(), Error> {
        wtr.write_int(&FMT_TWO, time.hour())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, time.minute())?;
        let nanosecond = time.subsec_nanosecond();
        if !always_seconds && time.second() == 0 && nanosecond == 0 {
            return Ok(());
        }
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, time.second())?;
        let fraction = FMT_FRACTION.format(nanosecond);
        if !fraction.is_empty() {
            wtr.write_str(".")?;
            wtr.write_str(fraction.as_str())?;
        }
        Ok(())
    }

    fn print_separator<W: Write>(&self, mut wtr: W) -> Result<(), Error> {
        let separator = if self.lowercase {
            self.separator.to_ascii_lowercase()
        } else {
            self.separator
        };
        wtr.write_char(char::from(separator))
    }

    fn print_offset<W: Write>(
        &self,
        offset: &Offset,
        wtr: W,
    ) -> Result<(), Error> {
        offset::Printer::new()
            .lowercase(self.lowercase)
            .print_offset(offset, wtr)
    }
}

impl Default for DateTimePrinter {
    fn default() -> DateTimePrinter {
        DateTimePrinter::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, datetime, time},
        tz::TimeZone,
    };

    use super::*;

    fn print<T>(
        value: &T,
        f: impl Fn(&DateTimePrinter, &T, &mut String) -> Result<(), Error>,
    ) -> String {
        let mut buf = String::new();
        f(&DateTimePrinter::new(), value, &mut buf).unwrap();
        buf
    }

    #[test]
    fn print_date() {
        let p = |d: Date| print(&d, |p, d, buf| p.print_date(d, buf));

        insta::assert_snapshot!(p(date(2024, 3, 5)), @"2024-03-05");
        insta::assert_snapshot!(p(date(0, 1, 1)), @"0000-01-01");
        insta::assert_snapshot!(p(date(-1, 12, 31)), @"-0001-12-31");
        insta::assert_snapshot!(p(date(9999, 12, 31)), @"9999-12-31");
        insta::assert_snapshot!(p(date(10_000, 1, 1)), @"+10000-01-01");
        insta::assert_snapshot!(p(date(-12_345, 1, 1)), @"-12345-01-01");
        insta::assert_snapshot!(p(Date::MAX), @"+999999999-12-31");
        insta::assert_snapshot!(p(Date::MIN), @"-999999999-01-01");
    }

    #[test]
    fn print_time() {
        let p = |t: Time| print(&t, |p, t, buf| p.print_time(t, buf));

        insta::assert_snapshot!(p(time(0, 0, 0, 0)), @"00:00");
        insta::assert_snapshot!(p(time(10, 15, 30, 0)), @"10:15:30");
        insta::assert_snapshot!(p(time(10, 15, 0, 1)), @"10:15:00.000000001");
        insta::assert_snapshot!(p(time(10, 15, 0, 120_000_000)), @"10:15:00.120");
        insta::assert_snapshot!(p(time(10, 15, 0, 123_400_000)), @"10:15:00.123400");
        insta::assert_snapshot!(p(Time::MAX), @"23:59:59.999999999");
    }

    #[test]
    fn print_partial_dates() {
        let y = |y: i32| {
            print(&Year::new(y).unwrap(), |p, y, buf| p.print_year(y, buf))
        };
        insta::assert_snapshot!(y(2024), @"2024");
        insta::assert_snapshot!(y(-5), @"-0005");
        insta::assert_snapshot!(y(123_456), @"+123456");

        let ym = YearMonth::new(-44, 3).unwrap();
        insta::assert_snapshot!(
            print(&ym, |p, ym, buf| p.print_year_month(ym, buf)),
            @"-0044-03",
        );
        let md = MonthDay::new(2, 29).unwrap();
        insta::assert_snapshot!(
            print(&md, |p, md, buf| p.print_month_day(md, buf)),
            @"--02-29",
        );
    }

    #[test]
    fn print_with_offsets() {
        let dt = datetime(2024, 3, 5, 10, 15, 30, 250_000_000);
        let odt = dt.to_offset_datetime(Offset::constant(-3));
        insta::assert_snapshot!(
            print(&odt, |p, odt, buf| p.print_offset_datetime(odt, buf)),
            @"2024-03-05T10:15:30.250-03:00",
        );
        let ot = OffsetTime::new(time(10, 0, 0, 0), Offset::UTC);
        insta::assert_snapshot!(
            print(&ot, |p, ot, buf| p.print_offset_time(ot, buf)),
            @"10:00Z",
        );

        let instant = Instant::UNIX_EPOCH;
        insta::assert_snapshot!(
            print(&instant, |p, i, buf| p.print_instant(i, buf)),
            @"1970-01-01T00:00:00Z",
        );
        let instant = Instant::from_second_and_nanos(-1, 500_000_000).unwrap();
        insta::assert_snapshot!(
            print(&instant, |p, i, buf| p.print_instant(i, buf)),
            @"1969-12-31T23:59:59.500Z",
        );
    }

    #[test]
    fn print_zoned() {
        let p = |zdt: &Zoned| print(zdt, |p, zdt, buf| p.print_zoned(zdt, buf));

        let dt = datetime(2024, 7, 1, 9, 0, 0, 0);
        let tz = TimeZone::get("America/New_York").unwrap();
        let zdt = dt.to_zoned(tz).unwrap();
        insta::assert_snapshot!(p(&zdt), @"2024-07-01T09:00-04:00[America/New_York]");

        let zdt = dt.to_zoned(TimeZone::fixed(Offset::constant(2))).unwrap();
        insta::assert_snapshot!(p(&zdt), @"2024-07-01T09:00+02:00");

        let zdt = dt.to_zoned(TimeZone::UTC).unwrap();
        insta::assert_snapshot!(p(&zdt), @"2024-07-01T09:00Z");

        let zdt = dt.to_zoned(TimeZone::get("UTC").unwrap()).unwrap();
        insta::assert_snapshot!(p(&zdt), @"2024-07-01T09:00Z[UTC]");
    }

    #[test]
    fn print_options() {
        let dt = datetime(2024, 3, 5, 10, 15, 0, 0);
        let mut buf = String::new();
        DateTimePrinter::new().separator(b' ').print_datetime(&dt, &mut buf).unwrap();
        assert_eq!(buf, "2024-03-05 10:15");

        let mut buf = String::new();
        DateTimePrinter::new()
            .lowercase(true)
            .print_instant(&Instant::UNIX_EPOCH, &mut buf)
            .unwrap();
        assert_eq!(buf, "1970-01-01t00:00:00z");
    }
}
