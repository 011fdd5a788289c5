// The rules here describe each zone as it has been since the most recent
// change to its daylight saving rules, applied to every year.

use crate::{
    civil::{time, Weekday},
    error::Error,
    tz::{
        Offset, TimeDefinition, TimeZoneDatabase, TransitionRule, ZoneRules,
    },
};

pub(crate) fn database() -> Result<TimeZoneDatabase, Error> {
    Ok(TimeZoneDatabase::builder()
        .zone("America/Los_Angeles", north_america(-8)?)
        .zone("America/New_York", north_america(-5)?)
        .zone("Asia/Kolkata", ZoneRules::fixed(Offset::from_hms(5, 30, 0)?))
        .zone("Asia/Tokyo", ZoneRules::fixed(Offset::constant(9)))
        .zone("Australia/Sydney", sydney()?)
        .zone("Europe/Berlin", european_union(1)?)
        .zone("Europe/London", european_union(0)?)
        .zone("Europe/Paris", european_union(1)?)
        .build()?)
}

/// Daylight saving time from the last Sunday of March to the last Sunday
/// of October, switching at 01:00 UTC.
fn european_union(standard: i8) -> Result<ZoneRules, Error> {
    let std = Offset::new(standard)?;
    let dst = Offset::new(standard + 1)?;
    let at = time(1, 0, 0, 0);
    let sunday = Some(Weekday::Sunday);
    let utc = TimeDefinition::Utc;
    let rules = vec![
        TransitionRule::new(3, -1, sunday, at, false, utc, std, std, dst)?,
        TransitionRule::new(10, -1, sunday, at, false, utc, std, dst, std)?,
    ];
    ZoneRules::new(std, std, vec![], vec![], rules)
}

/// Daylight saving time from the second Sunday of March to the first
/// Sunday of November, switching at 02:00 local time.
fn north_america(standard: i8) -> Result<ZoneRules, Error> {
    let std = Offset::new(standard)?;
    let dst = Offset::new(standard + 1)?;
    let at = time(2, 0, 0, 0);
    let sunday = Some(Weekday::Sunday);
    let wall = TimeDefinition::Wall;
    let rules = vec![
        TransitionRule::new(3, 8, sunday, at, false, wall, std, std, dst)?,
        TransitionRule::new(11, 1, sunday, at, false, wall, std, dst, std)?,
    ];
    ZoneRules::new(std, std, vec![], vec![], rules)
}

/// Daylight saving time from the first Sunday of October to the first
/// Sunday of April, switching at 02:00 standard time.
fn sydney() -> Result<ZoneRules, Error> {
    let std = Offset::constant(10);
    let dst = Offset::constant(11);
    let at = time(2, 0, 0, 0);
    let sunday = Some(Weekday::Sunday);
    let standard = TimeDefinition::Standard;
    let rules = vec![
        TransitionRule::new(4, 1, sunday, at, false, standard, std, dst, std)?,
        TransitionRule::new(10, 1, sunday, at, false, standard, std, std, dst)?,
    ];
    ZoneRules::new(std, dst, vec![], vec![], rules)
}
