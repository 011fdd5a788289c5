use crate::{tz::TimeZone, Duration, Instant};

/// A source of the current instant and time zone.
///
/// Every `now` style constructor in this crate has a `now_with` variant
/// that takes a clock. Passing a fixed clock makes code that asks for the
/// current time deterministic.
///
/// # Example
///
/// ```
/// use calends::{civil::{date, Date}, tz::TimeZone, Clock, Instant};
///
/// let instant: Instant = "2024-03-05T23:30:00Z".parse()?;
/// let clock = Clock::fixed(instant, TimeZone::get("Asia/Tokyo")?);
/// assert_eq!(Date::now_with(&clock), date(2024, 3, 6));
/// assert_eq!(clock.instant(), instant);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Clock {
    /// The system clock, in the given time zone.
    System(TimeZone),
    /// Always the same instant, in the given time zone.
    Fixed(Instant, TimeZone),
    /// Another clock shifted by a duration.
    Offset(Box<Clock>, Duration),
}

impl Clock {
    /// Returns the system clock in the given time zone.
    pub fn system(tz: TimeZone) -> Clock {
        Clock::System(tz)
    }

    /// Returns the system clock in the time zone from
    /// [`tz::system`](crate::tz::system).
    pub fn system_default() -> Clock {
        Clock::System(crate::tz::system())
    }

    /// Returns the system clock in UTC.
    pub fn system_utc() -> Clock {
        Clock::System(TimeZone::UTC)
    }

    /// Returns a clock that always reports the same instant.
    pub fn fixed(instant: Instant, tz: TimeZone) -> Clock {
        Clock::Fixed(instant, tz)
    }

    /// Returns a clock that reports the instants of `base` shifted by
    /// `duration`.
    pub fn offset(base: Clock, duration: Duration) -> Clock {
        if duration.is_zero() {
            return base;
        }
        Clock::Offset(Box::new(base), duration)
    }

    /// Returns the current instant.
    ///
    /// For an offset clock whose shifted instant is out of range, this
    /// saturates at [`Instant::MIN`] or [`Instant::MAX`].
    ///
    /// # Panics
    ///
    /// This panics when the system clock is out of the supported range.
    pub fn instant(&self) -> Instant {
        match *self {
            Clock::System(_) => Instant::now(),
            Clock::Fixed(instant, _) => instant,
            Clock::Offset(ref base, duration) => {
                base.instant().checked_add(duration).unwrap_or_else(|_| {
                    if duration.is_negative() {
                        Instant::MIN
                    } else {
                        Instant::MAX
                    }
                })
            }
        }
    }

    /// Returns the time zone.
    pub fn time_zone(&self) -> &TimeZone {
        match *self {
            Clock::System(ref tz) | Clock::Fixed(_, ref tz) => tz,
            Clock::Offset(ref base, _) => base.time_zone(),
        }
    }

    /// Returns the same clock in another time zone.
    pub fn with_time_zone(&self, tz: TimeZone) -> Clock {
        match *self {
            Clock::System(_) => Clock::System(tz),
            Clock::Fixed(instant, _) => Clock::Fixed(instant, tz),
            Clock::Offset(ref base, duration) => {
                Clock::Offset(Box::new(base.with_time_zone(tz)), duration)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{civil::time, Zoned};

    use super::*;

    #[test]
    fn fixed() {
        let instant = Instant::from_second(1_000_000_000).unwrap();
        let clock = Clock::fixed(instant, TimeZone::UTC);
        assert_eq!(clock.instant(), instant);
        assert_eq!(clock.instant(), clock.instant());
        insta::assert_snapshot!(Zoned::now_with(&clock), @"2001-09-09T01:46:40Z");
        assert_eq!(crate::civil::Time::now_with(&clock), time(1, 46, 40, 0));
    }

    #[test]
    fn offset() {
        let instant = Instant::from_second(0).unwrap();
        let base = Clock::fixed(instant, TimeZone::UTC);
        let clock = Clock::offset(base.clone(), Duration::from_secs(-60));
        assert_eq!(clock.instant().as_second(), -60);
        assert_eq!(Clock::offset(base.clone(), Duration::ZERO), base);
        let clock = Clock::offset(Clock::fixed(Instant::MAX, TimeZone::UTC), Duration::MAX);
        assert_eq!(clock.instant(), Instant::MAX);
        let clock = Clock::offset(Clock::fixed(Instant::MIN, TimeZone::UTC), Duration::MIN);
        assert_eq!(clock.instant(), Instant::MIN);
    }

    #[test]
    fn time_zones() {
        let tokyo = TimeZone::get("Asia/Tokyo").unwrap();
        let clock = Clock::offset(Clock::system_utc(), Duration::from_secs(1));
        assert_eq!(clock.time_zone(), &TimeZone::UTC);
        let clock = clock.with_time_zone(tokyo.clone());
        assert_eq!(clock.time_zone(), &tokyo);
        assert!(matches!(clock, Clock::Offset(ref base, _) if **base == Clock::System(tokyo.clone())));
    }
}
