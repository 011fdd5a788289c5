use calends::{
    calendar::Chronology,
    civil::{date, Date},
};

use crate::Result;

#[test]
fn julian_epoch() -> Result {
    let d = Chronology::Julian.date(1969, 12, 19)?;
    assert_eq!(d.to_iso_date(), date(1970, 1, 1));
    assert_eq!(d.to_epoch_day(), 0);
    // 1900 is a leap year in the Julian calendar only.
    assert!(Chronology::Julian.is_leap_year(1900));
    assert!(!Chronology::Iso.is_leap_year(1900));
    Ok(())
}

#[test]
fn offset_year_calendars() -> Result {
    let d = date(2024, 3, 5);
    let minguo = Chronology::Minguo.date_from(d)?;
    assert_eq!((minguo.year(), minguo.month(), minguo.day()), (113, 3, 5));
    let thai = Chronology::ThaiBuddhist.date_from(d)?;
    assert_eq!(thai.year(), 2567);
    assert!(minguo.is_equal(&thai));
    Ok(())
}

quickcheck::quickcheck! {
    fn prop_conversions_preserve_epoch_day(epoch_day: i32) -> bool {
        let iso = Date::from_epoch_day(i64::from(epoch_day)).unwrap();
        Chronology::ALL.iter().all(|&chrono| {
            let d = chrono.date_from(iso).unwrap();
            Chronology::ALL.iter().all(|&other| {
                let converted = d.with_chronology(other).unwrap();
                converted.to_epoch_day() == i64::from(epoch_day)
                    && converted.to_iso_date() == iso
            })
        })
    }
}
