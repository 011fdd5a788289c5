/*!
Calends is a calendrical computation library for Rust.

It provides immutable value types for points in time (with and without a
time zone), amounts of time, ISO 8601 text formats, time zone rules with
explicit handling of gaps and folds, and pluggable calendar systems.

# Overview

The primary types are:

* [`civil::Date`], [`civil::Time`] and [`civil::DateTime`] are "civil" (or
  "local") values with no time zone. They describe what a wall clock and
  calendar show.
* [`Instant`] is a precise point on the UTC timeline, with nanosecond
  precision.
* [`OffsetDateTime`] and [`OffsetTime`] pair a civil value with a fixed
  UTC offset.
* [`Zoned`] is an instant in a particular [`tz::TimeZone`]. It is the type
  to use when the calendar arithmetic needs to follow daylight saving
  time.
* [`Duration`] is an exact amount of time in seconds and nanoseconds, while
  [`Period`] is a calendar amount in years, months and days.
* [`civil::Year`], [`civil::YearMonth`] and [`civil::MonthDay`] are partial
  dates.
* [`Clock`] is a source of the current instant and time zone.

Lower level pieces live in their own modules. [`temporal`] defines the
field and unit vocabulary shared by every type along with the field
resolver, [`tz`] has time zone rules, [`calendar`] has calendar systems
other than ISO 8601 and [`fmt`] has configurable parsers and printers.

# Example

```
use calends::{civil::{date, time}, tz::TimeZone, Period, Zoned};

// Daylight saving time started in New York on 2024-03-10 at 02:00. Adding
// a day keeps the wall clock time even though the day was 23 hours long.
let zdt: Zoned = "2024-03-09T12:00-05:00[America/New_York]".parse()?;
let next = zdt.checked_add(Period::from_days(1))?;
assert_eq!(next.to_string(), "2024-03-10T12:00-04:00[America/New_York]");

// Civil arithmetic clamps to the end of the month.
let d = date(2024, 1, 31).checked_add(Period::from_months(1))?;
assert_eq!(d, date(2024, 2, 29));

// Resolving a local time in a gap moves it forward by the gap length.
let tz = TimeZone::get("America/New_York")?;
let zdt = date(2024, 3, 10).at(time(2, 30, 0, 0)).to_zoned(tz)?;
assert_eq!(zdt.to_string(), "2024-03-10T03:30-04:00[America/New_York]");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Errors

Every fallible operation returns a [`Result`] with this crate's single
[`Error`] type. Its predicates (like [`Error::is_range`] and
[`Error::is_parse`]) classify the failure. The operator impls (`+`, `-`,
and so on) panic where the corresponding `checked_*` method would return an
error.

# Crate features

* **logging** - Emits log messages through the [`log`] crate. This is
  mostly useful for seeing how local times in gaps and folds were
  resolved, and which time zone the system reports.
* **serde** - Implements `Serialize` and `Deserialize` for every value
  type. See [`fmt::serde`] for details.

[`log`]: https://docs.rs/log
*/

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

pub use crate::{
    clock::Clock,
    duration::Duration,
    error::Error,
    instant::Instant,
    offset_datetime::OffsetDateTime,
    offset_time::OffsetTime,
    period::Period,
    zoned::Zoned,
};

#[macro_use]
mod logging;

pub mod calendar;
pub mod civil;
mod clock;
mod duration;
mod error;
pub mod fmt;
mod instant;
mod offset_datetime;
mod offset_time;
mod period;
pub mod temporal;
pub mod tz;
mod util;
mod zoned;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Clock>();
        assert_send_sync::<Duration>();
        assert_send_sync::<Error>();
        assert_send_sync::<Instant>();
        assert_send_sync::<OffsetDateTime>();
        assert_send_sync::<OffsetTime>();
        assert_send_sync::<Period>();
        assert_send_sync::<Zoned>();
        assert_send_sync::<tz::TimeZone>();
        assert_send_sync::<calendar::ChronoDate>();
    }

    #[test]
    fn value_sizes() {
        assert_eq!(core::mem::size_of::<civil::Date>(), 8);
        assert_eq!(core::mem::size_of::<Duration>(), 16);
        assert_eq!(core::mem::size_of::<Period>(), 12);
    }
}
