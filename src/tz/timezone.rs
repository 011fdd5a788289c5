use std::sync::Arc;

use crate::{
    civil::DateTime,
    error::{err, Error, ErrorContext},
    tz::{db, AmbiguousOffset, AmbiguousZoned, Offset, ZoneRules},
    Instant, Zoned,
};

/// A representation of a time zone.
///
/// A time zone is an identifier plus the [`ZoneRules`] that determine the
/// offset from UTC at every instant. There are two kinds:
///
/// * A fixed offset zone, whose identifier is the offset itself (like
/// `+05:30`, or `Z` for UTC). These never have transitions.
/// * A region, whose identifier is a name like `Europe/London` or
/// `UTC+01:00`, and whose rules may have transitions.
///
/// Regions are usually found in a [`TimeZoneDatabase`](crate::tz::TimeZoneDatabase)
/// via [`TimeZone::get`], which also recognizes offset style identifiers.
///
/// # A `TimeZone` is cheap to clone
///
/// The rules are shared through reference counting. [`TimeZone::UTC`] does
/// not allocate at all.
///
/// # Equality
///
/// Two time zones are equal when their identifiers are equal. In
/// particular, `+01:00` and `UTC+01:00` are not equal even though their
/// rules are the same. Use [`TimeZone::normalized`] to compare by rules
/// where that makes sense.
///
/// # Example
///
/// ```
/// use calends::{civil::datetime, tz::{Offset, TimeZone}};
///
/// let tz = TimeZone::get("Europe/Paris")?;
/// let zdt = tz.to_zoned(datetime(2024, 7, 15, 21, 27, 0, 0))?;
/// assert_eq!(zdt.offset(), Offset::constant(2));
/// assert_eq!(zdt.to_string(), "2024-07-15T21:27+02:00[Europe/Paris]");
///
/// let tz = TimeZone::get("UTC+01:00")?;
/// assert_eq!(tz.normalized(), TimeZone::fixed(Offset::constant(1)));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TimeZone {
    kind: Option<Arc<TimeZoneKind>>,
}

enum TimeZoneKind {
    Fixed { offset: Offset, id: Box<str> },
    Region { id: Box<str>, rules: ZoneRules },
}

impl TimeZone {
    /// The UTC time zone, with identifier `Z`.
    pub const UTC: TimeZone = TimeZone { kind: None };

    /// Returns a time zone from the default database for the given
    /// identifier.
    ///
    /// Besides region names, this recognizes `Z`, offsets like `+05:30`,
    /// and the prefixes `UTC`, `GMT` and `UT` on their own or followed by
    /// an offset (like `UTC+01:00`). A prefixed identifier is a region with
    /// fixed rules whose identifier is normalized, so `GMT+1` becomes
    /// `GMT+01:00` and `UTC+00:00` becomes `UTC`.
    ///
    /// # Errors
    ///
    /// This returns an error when the identifier is not known or when an
    /// offset in it is not valid.
    ///
    /// ```
    /// use calends::tz::TimeZone;
    ///
    /// assert_eq!(TimeZone::get("GMT+1")?.id(), "GMT+01:00");
    /// assert_eq!(TimeZone::get("-08:00")?.id(), "-08:00");
    /// assert!(TimeZone::get("Mars/Olympus_Mons").unwrap_err().is_zone_lookup());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(id: &str) -> Result<TimeZone, Error> {
        db().get(id)
    }

    /// Returns a time zone that always has the given offset.
    ///
    /// The identifier is the offset as printed, so a zero offset gives a
    /// time zone equal to [`TimeZone::UTC`].
    pub fn fixed(offset: Offset) -> TimeZone {
        if offset == Offset::UTC {
            return TimeZone::UTC;
        }
        let id = offset.to_string().into_boxed_str();
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Fixed { offset, id })) }
    }

    /// Returns a region time zone with the given identifier and rules.
    ///
    /// # Errors
    ///
    /// This returns an error when the identifier is not of the form
    /// `[A-Za-z][A-Za-z0-9~/._+-]+`.
    pub fn region(id: &str, rules: ZoneRules) -> Result<TimeZone, Error> {
        check_region_id(id)?;
        Ok(TimeZone::region_unchecked(id, rules))
    }

    pub(crate) fn region_unchecked(id: &str, rules: ZoneRules) -> TimeZone {
        let kind = TimeZoneKind::Region { id: id.into(), rules };
        TimeZone { kind: Some(Arc::new(kind)) }
    }

    /// Parses the offset style identifiers recognized by [`TimeZone::get`].
    ///
    /// This returns `None` when the identifier isn't offset style.
    pub(crate) fn from_offset_id(id: &str) -> Option<Result<TimeZone, Error>> {
        if id == "Z" {
            return Some(Ok(TimeZone::UTC));
        }
        if id.starts_with(['+', '-']) {
            return Some(
                parse_offset(id).map(TimeZone::fixed).with_context(|| {
                    err!("invalid time zone identifier '{id}'")
                }),
            );
        }
        for prefix in ["UTC", "GMT", "UT"] {
            let Some(rest) = id.strip_prefix(prefix) else { continue };
            if rest.is_empty() {
                return Some(Ok(TimeZone::region_unchecked(
                    prefix,
                    ZoneRules::fixed(Offset::UTC),
                )));
            }
            if !rest.starts_with(['+', '-']) {
                return None;
            }
            let tz = parse_offset(rest)
                .with_context(|| err!("invalid time zone identifier '{id}'"))
                .map(|offset| {
                    let rules = ZoneRules::fixed(offset);
                    if offset == Offset::UTC {
                        TimeZone::region_unchecked(prefix, rules)
                    } else {
                        let id = format!("{prefix}{offset}");
                        TimeZone::region_unchecked(&id, rules)
                    }
                });
            return Some(tz);
        }
        None
    }

    /// Returns the identifier of this time zone.
    pub fn id(&self) -> &str {
        match self.kind.as_deref() {
            None => "Z",
            Some(TimeZoneKind::Fixed { id, .. }) => &**id,
            Some(TimeZoneKind::Region { id, .. }) => &**id,
        }
    }

    /// Returns the rules of this time zone.
    ///
    /// This is cheap. Table rules are shared with the time zone.
    pub fn rules(&self) -> ZoneRules {
        match self.kind.as_deref() {
            None => ZoneRules::fixed(Offset::UTC),
            Some(TimeZoneKind::Fixed { offset, .. }) => ZoneRules::fixed(*offset),
            Some(TimeZoneKind::Region { rules, .. }) => rules.clone(),
        }
    }

    /// Returns the offset when this time zone's offset never changes.
    pub fn to_fixed_offset(&self) -> Option<Offset> {
        match self.kind.as_deref() {
            None => Some(Offset::UTC),
            Some(TimeZoneKind::Fixed { offset, .. }) => Some(*offset),
            Some(TimeZoneKind::Region { rules, .. }) => {
                rules.to_fixed_offset()
            }
        }
    }

    /// Returns true for a fixed offset zone (including UTC). A region is
    /// never a fixed offset zone, even with fixed rules.
    pub fn is_fixed_offset_zone(&self) -> bool {
        !matches!(self.kind.as_deref(), Some(TimeZoneKind::Region { .. }))
    }

    /// Returns a fixed offset zone for a region whose rules never change,
    /// and this time zone otherwise.
    pub fn normalized(&self) -> TimeZone {
        match self.kind.as_deref() {
            Some(TimeZoneKind::Region { rules, .. }) => {
                match rules.to_fixed_offset() {
                    Some(offset) => TimeZone::fixed(offset),
                    None => self.clone(),
                }
            }
            _ => self.clone(),
        }
    }

    /// Returns the offset in effect at the given instant.
    pub fn to_offset(&self, instant: Instant) -> Offset {
        match self.kind.as_deref() {
            None => Offset::UTC,
            Some(TimeZoneKind::Fixed { offset, .. }) => *offset,
            Some(TimeZoneKind::Region { rules, .. }) => rules.offset(instant),
        }
    }

    /// Returns the possible offsets of a civil datetime in this time zone.
    pub fn to_ambiguous_offset(&self, dt: DateTime) -> AmbiguousOffset {
        match self.kind.as_deref() {
            None => AmbiguousOffset::Unambiguous { offset: Offset::UTC },
            Some(TimeZoneKind::Fixed { offset, .. }) => {
                AmbiguousOffset::Unambiguous { offset: *offset }
            }
            Some(TimeZoneKind::Region { rules, .. }) => {
                rules.offset_for_local(dt)
            }
        }
    }

    /// Returns the civil datetime of the given instant in this time zone.
    ///
    /// ```
    /// use calends::{tz::TimeZone, Instant};
    ///
    /// let tz = TimeZone::get("Asia/Kolkata")?;
    /// let dt = tz.to_datetime(Instant::UNIX_EPOCH);
    /// assert_eq!(dt.to_string(), "1970-01-01T05:30");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_datetime(&self, instant: Instant) -> DateTime {
        instant.to_datetime(self.to_offset(instant))
    }

    /// Returns a zoned datetime for the civil datetime in this time zone,
    /// resolving gaps and folds with
    /// [`Disambiguation::Compatible`](crate::tz::Disambiguation::Compatible).
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn to_zoned(&self, dt: DateTime) -> Result<Zoned, Error> {
        self.to_ambiguous_zoned(dt).compatible()
    }

    /// Returns the civil datetime in this time zone along with its possible
    /// offsets, leaving the choice of a policy to the caller.
    pub fn to_ambiguous_zoned(&self, dt: DateTime) -> AmbiguousZoned {
        AmbiguousZoned::new(self.clone(), dt, self.to_ambiguous_offset(dt))
    }
}

impl Default for TimeZone {
    fn default() -> TimeZone {
        TimeZone::UTC
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let kind = match self.kind.as_deref() {
            None => "UTC",
            Some(TimeZoneKind::Fixed { .. }) => "Fixed",
            Some(TimeZoneKind::Region { .. }) => "Region",
        };
        f.debug_tuple("TimeZone").field(&kind).field(&self.id()).finish()
    }
}

impl Eq for TimeZone {}

impl PartialEq for TimeZone {
    fn eq(&self, rhs: &TimeZone) -> bool {
        self.id() == rhs.id()
    }
}

impl core::hash::Hash for TimeZone {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

fn parse_offset(input: &str) -> Result<Offset, Error> {
    crate::fmt::offset::DEFAULT_PARSER.parse_offset(input)
}

pub(crate) fn check_region_id(id: &str) -> Result<(), Error> {
    let bytes = id.as_bytes();
    let valid_rest = |b: &u8| {
        b.is_ascii_alphanumeric() || matches!(*b, b'~' | b'/' | b'.' | b'_' | b'+' | b'-')
    };
    match bytes.split_first() {
        Some((first, rest))
            if first.is_ascii_alphabetic()
                && !rest.is_empty()
                && rest.iter().all(valid_rest) =>
        {
            Ok(())
        }
        _ => Err(err!("invalid region time zone identifier '{id}'")),
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::datetime;

    use super::*;

    #[test]
    fn offset_ids() {
        assert_eq!(TimeZone::get("Z").unwrap(), TimeZone::UTC);
        assert_eq!(
            TimeZone::get("+05:30").unwrap().to_fixed_offset(),
            Some(Offset::from_hms(5, 30, 0).unwrap()),
        );
        let tz = TimeZone::get("UTC").unwrap();
        assert_eq!(tz.id(), "UTC");
        assert!(!tz.is_fixed_offset_zone());
        assert_eq!(tz.normalized(), TimeZone::UTC);
        assert_eq!(TimeZone::get("UT").unwrap().id(), "UT");
        assert_eq!(TimeZone::get("UTC+00:00").unwrap().id(), "UTC");
        assert_eq!(TimeZone::get("GMT-0230").unwrap().id(), "GMT-02:30");
        assert!(TimeZone::get("UTC+19").unwrap_err().is_range());
        assert!(TimeZone::get("+5:").is_err());
        assert!(TimeZone::get("UTCX").unwrap_err().is_zone_lookup());
    }

    #[test]
    fn fixed_zones() {
        let tz = TimeZone::fixed(Offset::constant(-5));
        assert_eq!(tz.id(), "-05:00");
        assert!(tz.is_fixed_offset_zone());
        assert_eq!(tz.to_offset(Instant::MAX), Offset::constant(-5));
        assert_eq!(TimeZone::fixed(Offset::UTC), TimeZone::UTC);
        assert!(tz.rules().is_fixed_offset());
        assert_eq!(
            tz.to_datetime(Instant::UNIX_EPOCH),
            datetime(1969, 12, 31, 19, 0, 0, 0),
        );
    }

    #[test]
    fn regions() {
        let rules = ZoneRules::fixed(Offset::constant(3));
        let tz = TimeZone::region("Custom/Zone-3", rules.clone()).unwrap();
        assert_eq!(tz.id(), "Custom/Zone-3");
        assert_eq!(tz.rules(), rules);
        assert_eq!(tz.normalized().id(), "+03:00");
        assert!(TimeZone::region("3Zone", rules.clone()).is_err());
        assert!(TimeZone::region("Z", rules.clone()).is_err());
        assert!(TimeZone::region("Bad Zone", rules).is_err());
    }

    #[test]
    fn debug() {
        insta::assert_snapshot!(
            format!("{:?}", TimeZone::UTC),
            @r#"TimeZone("UTC", "Z")"#,
        );
        insta::assert_snapshot!(
            format!("{:?}", TimeZone::get("Europe/London").unwrap()),
            @r#"TimeZone("Region", "Europe/London")"#,
        );
    }

    #[test]
    fn region_resolution() {
        let tz = TimeZone::get("America/Los_Angeles").unwrap();
        let gap = tz.to_ambiguous_offset(datetime(2024, 3, 10, 2, 30, 0, 0));
        assert_eq!(
            gap,
            AmbiguousOffset::Gap {
                before: Offset::constant(-8),
                after: Offset::constant(-7),
            },
        );
        let zdt = tz.to_zoned(datetime(2024, 3, 10, 2, 30, 0, 0)).unwrap();
        assert_eq!(zdt.datetime(), datetime(2024, 3, 10, 3, 30, 0, 0));
        assert_eq!(zdt.offset(), Offset::constant(-7));
    }
}
