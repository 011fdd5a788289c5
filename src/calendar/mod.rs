/*!
Calendar systems other than ISO 8601.

The rest of this crate works exclusively with the proleptic Gregorian
calendar. This module provides [`Chronology`], a small closed set of
alternative calendar systems, and [`ChronoDate`], a date in any of them.
Every chronology counts days identically, which makes conversions between
them exact and lets dates from different calendars be compared.

# Example

```
use calends::{calendar::Chronology, civil::date};

let d = date(2024, 3, 5);
let thai = Chronology::ThaiBuddhist.date_from(d)?;
assert_eq!(thai.year(), 2567);
assert_eq!(thai.to_string(), "ThaiBuddhist BE 2567-03-05");

let julian = thai.with_chronology(Chronology::Julian)?;
assert_eq!((julian.month(), julian.day()), (2, 21));
assert!(julian.is_equal(&thai));
assert_eq!(julian.to_iso_date(), d);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    chronology::{ChronoEra, Chronology},
    date::ChronoDate,
};

mod chronology;
mod date;
