use calends::{
    civil::{date, time, Date, Year},
    temporal::{Field, Fields, ResolverStyle},
    Duration, Period,
};

use crate::Result;

#[test]
fn leap_years() -> Result {
    assert!(Year::new(2000)?.is_leap());
    assert!(!Year::new(1900)?.is_leap());
    assert!(Year::new(2024)?.is_leap());
    assert!(!Year::new(2023)?.is_leap());
    assert!(Year::new(-4)?.is_leap());
    assert!(date(2024, 6, 1).in_leap_year());
    Ok(())
}

#[test]
fn month_addition_clamps() -> Result {
    let d = date(2024, 1, 31);
    assert_eq!(d.checked_add(Period::from_months(1))?, date(2024, 2, 29));
    assert_eq!(d.checked_add(Period::from_months(2))?, date(2024, 3, 31));
    assert_eq!(date(2023, 1, 31).checked_add_months(1)?, date(2023, 2, 28));
    assert_eq!(date(2024, 2, 29).checked_add_years(1)?, date(2025, 2, 28));
    Ok(())
}

#[test]
fn invalid_dates() {
    let err = Date::new(2023, 2, 29).unwrap_err();
    assert!(err.is_invalid_date(), "{err}");
    let err = Date::new(2023, 13, 1).unwrap_err();
    assert!(err.is_range(), "{err}");
    let err = "2023-02-30".parse::<Date>().unwrap_err();
    assert!(err.is_parse(), "{err}");
    assert!(date(9999, 1, 1).checked_add_years(1_000_000_000).unwrap_err().is_overflow());
}

#[test]
fn duration_normalization() -> Result {
    let d = Duration::new(-1, 500_000_000)?;
    assert_eq!(d.seconds(), -1);
    assert_eq!(d.subsec_nanos(), 500_000_000);
    assert_eq!(d.to_string(), "PT-0.5S");
    Ok(())
}

#[test]
fn field_resolution_styles() -> Result {
    let fields = Fields::new()
        .with(Field::Year, 2011)?
        .with(Field::MonthOfYear, 2)?
        .with(Field::DayOfMonth, 30)?;
    assert_eq!(fields.resolve_date(ResolverStyle::Smart)?, date(2011, 2, 28));
    assert_eq!(fields.resolve_date(ResolverStyle::Lenient)?, date(2011, 3, 2));
    assert!(fields.resolve_date(ResolverStyle::Strict).is_err());
    Ok(())
}

#[test]
fn datetime_composition() -> Result {
    let dt = date(2024, 3, 5).at(time(10, 15, 30, 0));
    assert_eq!(dt.to_string(), "2024-03-05T10:15:30");
    assert_eq!(dt.date(), date(2024, 3, 5));
    assert_eq!(dt.time(), time(10, 15, 30, 0));
    assert_eq!("2024-03-05T10:15:30".parse::<calends::civil::DateTime>()?, dt);
    Ok(())
}

quickcheck::quickcheck! {
    fn prop_add_then_sub_days(epoch_day: i32, days: i32) -> bool {
        let d = Date::from_epoch_day(i64::from(epoch_day)).unwrap();
        let days = i64::from(days);
        d.checked_add_days(days).unwrap().checked_sub_days(days).unwrap() == d
    }

    fn prop_epoch_day_roundtrip(epoch_day: i32) -> bool {
        let d = Date::from_epoch_day(i64::from(epoch_day)).unwrap();
        d.to_epoch_day() == i64::from(epoch_day)
    }

    fn prop_print_parse_print(epoch_day: i32) -> bool {
        let d = Date::from_epoch_day(i64::from(epoch_day)).unwrap();
        let printed = d.to_string();
        let parsed: Date = printed.parse().unwrap();
        parsed == d && parsed.to_string() == printed
    }

    fn prop_period_between(a: i32, b: i32) -> bool {
        let (a, b) = (i64::from(a / 4), i64::from(b / 4));
        let start = Date::from_epoch_day(a).unwrap();
        let end = Date::from_epoch_day(b).unwrap();
        Period::between(start, end).add_to(start).unwrap() == end
    }
}
