/*!
Routines for interacting with time zones and the rules that govern them.

The main type in this module is [`TimeZone`]. It pairs an identifier with
[`ZoneRules`], which determine the [`Offset`] from UTC at every instant.
Rules are either a fixed offset or a table of [`Transition`]s, optionally
followed by annually recurring [`TransitionRule`]s.

Converting an instant to a civil datetime in a time zone is always
unambiguous. Going the other way is not: a civil datetime may fall into a
gap (it never appeared on the clock) or a fold (it appeared twice). This is
described by [`AmbiguousOffset`], and resolved with a [`Disambiguation`]
policy.

Time zones are looked up by identifier in a [`TimeZoneDatabase`]. The
default database, [`db`], has a small bundled set of zones.

# Example

```
use calends::{civil::datetime, tz::{Disambiguation, TimeZone}};

let tz = TimeZone::get("Europe/London")?;
// Clocks went forward from 01:00 to 02:00 on this day.
let dt = datetime(2024, 3, 31, 1, 30, 0, 0);
assert!(tz.to_ambiguous_zoned(dt).is_ambiguous());

let zdt = tz.to_ambiguous_zoned(dt).disambiguate(Disambiguation::Compatible)?;
assert_eq!(zdt.to_string(), "2024-03-31T02:30+01:00[Europe/London]");
let zdt = tz.to_ambiguous_zoned(dt).disambiguate(Disambiguation::Earlier)?;
assert_eq!(zdt.to_string(), "2024-03-31T00:30Z[Europe/London]");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    ambiguous::{AmbiguousOffset, AmbiguousZoned, Disambiguation},
    db::{db, TimeZoneDatabase, TimeZoneDatabaseBuilder},
    offset::Offset,
    rules::{TimeDefinition, Transition, TransitionRule, ZoneRules},
    timezone::TimeZone,
};

mod ambiguous;
mod bundled;
mod db;
mod offset;
mod rules;
mod timezone;

/// Returns the time zone named by the `TZ` environment variable.
///
/// The identifier is looked up in the default database [`db`]. A leading
/// `:` is ignored. When `TZ` is unset or not a known identifier, this
/// returns [`TimeZone::UTC`] and logs a warning.
pub fn system() -> TimeZone {
    let Some(value) = std::env::var_os("TZ") else {
        warn!("TZ environment variable is not set, using UTC");
        return TimeZone::UTC;
    };
    let Some(value) = value.to_str() else {
        warn!("TZ environment variable is not valid UTF-8, using UTC");
        return TimeZone::UTC;
    };
    let id = value.strip_prefix(':').unwrap_or(value);
    match TimeZone::get(id) {
        Ok(tz) => tz,
        Err(_err) => {
            warn!("failed to use TZ={value:?} as a time zone, using UTC: {_err}");
            TimeZone::UTC
        }
    }
}
