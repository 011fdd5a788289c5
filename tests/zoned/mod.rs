use calends::{
    civil::{date, datetime, time},
    tz::{AmbiguousOffset, Disambiguation, Offset, TimeZone, ZoneRules},
    Clock, Duration, Instant, Period, Zoned,
};

use crate::Result;

#[test]
fn gap_shifts_forward_by_gap_length() -> Result {
    let _ = crate::Logger::init();

    let tz = TimeZone::get("Europe/Paris")?;
    let dt = datetime(2024, 3, 31, 2, 30, 0, 0);
    assert!(matches!(tz.to_ambiguous_offset(dt), AmbiguousOffset::Gap { .. }));

    let zdt = dt.to_zoned(tz.clone())?;
    assert_eq!(zdt.to_string(), "2024-03-31T03:30+02:00[Europe/Paris]");
    // The instant is the civil datetime read with the offset before the gap.
    let before = dt.to_offset_datetime(Offset::constant(1)).to_instant()?;
    assert_eq!(zdt.instant(), before);

    let earlier = dt.to_zoned_with(tz.clone(), Disambiguation::Earlier)?;
    assert_eq!(earlier.to_string(), "2024-03-31T01:30+01:00[Europe/Paris]");
    let err = dt.to_zoned_with(tz, Disambiguation::Reject).unwrap_err();
    assert!(err.is_unresolved(), "{err}");
    Ok(())
}

#[test]
fn fold_picks_offsets() -> Result {
    let _ = crate::Logger::init();

    let tz = TimeZone::get("America/New_York")?;
    let dt = datetime(2024, 11, 3, 1, 30, 0, 0);

    let compatible = dt.to_zoned(tz.clone())?;
    assert_eq!(compatible.offset(), Offset::constant(-4));
    let earlier = dt.to_zoned_with(tz.clone(), Disambiguation::Earlier)?;
    assert_eq!(earlier.offset(), Offset::constant(-4));
    let later = dt.to_zoned_with(tz.clone(), Disambiguation::Later)?;
    assert_eq!(later.offset(), Offset::constant(-5));
    assert_eq!(
        Duration::between(earlier.instant(), later.instant()),
        Duration::from_secs(3_600),
    );
    let err = dt.to_zoned_with(tz, Disambiguation::Reject).unwrap_err();
    assert!(err.is_unresolved(), "{err}");
    Ok(())
}

#[test]
fn period_arithmetic_keeps_wall_clock() -> Result {
    let zdt: Zoned = "2024-03-30T12:00+01:00[Europe/Paris]".parse()?;
    let next = zdt.checked_add(Period::from_days(1))?;
    assert_eq!(next.to_string(), "2024-03-31T12:00+02:00[Europe/Paris]");
    let exact = zdt.checked_add(Duration::from_hours(24)?)?;
    assert_eq!(exact.to_string(), "2024-03-31T13:00+02:00[Europe/Paris]");
    Ok(())
}

#[test]
fn fixed_rules() -> Result {
    let offset = Offset::constant_seconds(19_800);
    let rules = ZoneRules::fixed(offset);
    let instant = Instant::from_second(1_700_000_000)?;
    assert!(rules.is_fixed_offset());
    assert!(rules.transitions().is_empty());
    assert_eq!(rules.offset(instant), offset);
    assert_eq!(rules.offset(Instant::MIN), offset);
    assert_eq!(rules.next_transition(instant), None);
    assert_eq!(rules.previous_transition(instant), None);

    let tz = TimeZone::fixed(offset);
    assert_eq!(tz.id(), "+05:30");
    let zdt = date(2024, 3, 31).at(time(2, 30, 0, 0)).to_zoned(tz)?;
    assert_eq!(zdt.to_string(), "2024-03-31T02:30+05:30");
    Ok(())
}

#[test]
fn fixed_clock() -> Result {
    let instant = Instant::from_second(1_517_644_800)?;
    let clock = Clock::fixed(instant, TimeZone::get("Asia/Tokyo")?);
    assert_eq!(clock.instant(), instant);
    assert_eq!(clock.instant(), instant);
    assert_eq!(clock.time_zone().id(), "Asia/Tokyo");

    let zdt = Zoned::now_with(&clock);
    assert_eq!(zdt.to_string(), "2018-02-03T17:00+09:00[Asia/Tokyo]");

    let later = Clock::offset(clock, Duration::from_secs(90));
    assert_eq!(later.instant(), Instant::from_second(1_517_644_890)?);
    Ok(())
}
