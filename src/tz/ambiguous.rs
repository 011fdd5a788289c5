use crate::{
    civil::DateTime,
    error::{tz::AmbiguousError, Error},
    tz::{Offset, TimeZone},
    Instant, Zoned,
};

/// The possible offsets of a civil datetime in a particular time zone.
///
/// Most of the time a civil datetime has exactly one offset. Around a
/// transition, a civil datetime may instead fall into a gap (it never
/// happened on the wall clock) or a fold (it happened twice).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AmbiguousOffset {
    /// The civil datetime has exactly one offset.
    Unambiguous {
        /// The offset from UTC for the civil datetime.
        offset: Offset,
    },
    /// The civil datetime was skipped, typically by a jump into daylight
    /// saving time.
    Gap {
        /// The offset in effect just before the gap.
        ///
        /// For `America/Los_Angeles`, the offset before the gap at
        /// `2024-03-10T02:00` is `-08:00`.
        before: Offset,
        /// The offset in effect just after the gap, `-07:00` in the example
        /// above.
        after: Offset,
    },
    /// The civil datetime was repeated, typically by a jump out of daylight
    /// saving time.
    Fold {
        /// The offset of the first occurrence.
        ///
        /// For `America/Los_Angeles`, the offset of the first
        /// `2024-11-03T01:30` is `-07:00`.
        before: Offset,
        /// The offset of the second occurrence, `-08:00` in the example
        /// above.
        after: Offset,
    },
}

impl AmbiguousOffset {
    /// Returns true unless this is [`AmbiguousOffset::Unambiguous`].
    pub fn is_ambiguous(self) -> bool {
        !matches!(self, AmbiguousOffset::Unambiguous { .. })
    }

    /// Returns true when `offset` is one of the valid offsets. No offset is
    /// valid in a gap.
    pub fn is_valid(self, offset: Offset) -> bool {
        match self {
            AmbiguousOffset::Unambiguous { offset: o } => o == offset,
            AmbiguousOffset::Gap { .. } => false,
            AmbiguousOffset::Fold { before, after } => {
                before == offset || after == offset
            }
        }
    }
}

/// A policy for resolving a civil datetime in a gap or a fold to a single
/// instant.
///
/// The default is [`Disambiguation::Compatible`].
///
/// # Example
///
/// ```
/// use calends::{civil::datetime, tz::{Disambiguation, TimeZone}};
///
/// let tz = TimeZone::get("America/New_York")?;
/// // 01:30 happens twice on this day.
/// let dt = datetime(2024, 11, 3, 1, 30, 0, 0);
///
/// let zdt = dt.to_zoned_with(tz.clone(), Disambiguation::Earlier)?;
/// assert_eq!(zdt.offset().to_string(), "-04:00");
/// let zdt = dt.to_zoned_with(tz.clone(), Disambiguation::Later)?;
/// assert_eq!(zdt.offset().to_string(), "-05:00");
/// assert!(dt.to_zoned_with(tz, Disambiguation::Reject).unwrap_err().is_unresolved());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Disambiguation {
    /// In a gap, the civil datetime is shifted forward by the length of the
    /// gap, by interpreting it with the offset before the gap. In a fold,
    /// the earlier of the two instants is used.
    #[default]
    Compatible,
    /// Picks the earlier instant. In a gap, this interprets the civil
    /// datetime with the offset after the gap, which moves it backwards.
    Earlier,
    /// Picks the later instant. In a gap, this is the same as
    /// `Compatible`.
    Later,
    /// Returns an error for any civil datetime in a gap or a fold.
    Reject,
}

/// A civil datetime in a time zone along with its possible offsets.
///
/// This is the intermediate step between a civil datetime and a [`Zoned`].
/// Use [`TimeZone::to_ambiguous_zoned`] to get one, and then pick a policy
/// with [`AmbiguousZoned::disambiguate`].
#[derive(Clone, Debug)]
pub struct AmbiguousZoned {
    tz: TimeZone,
    dt: DateTime,
    offset: AmbiguousOffset,
}

impl AmbiguousZoned {
    pub(crate) fn new(
        tz: TimeZone,
        dt: DateTime,
        offset: AmbiguousOffset,
    ) -> AmbiguousZoned {
        AmbiguousZoned { tz, dt, offset }
    }

    /// Returns the time zone.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Returns the civil datetime.
    pub fn datetime(&self) -> DateTime {
        self.dt
    }

    /// Returns the possible offsets.
    pub fn offset(&self) -> AmbiguousOffset {
        self.offset
    }

    /// Returns true when the civil datetime is in a gap or a fold.
    pub fn is_ambiguous(&self) -> bool {
        self.offset.is_ambiguous()
    }

    /// Resolves to a single zoned datetime with the given policy.
    ///
    /// # Errors
    ///
    /// This returns an error for an ambiguous civil datetime with
    /// [`Disambiguation::Reject`], or when the result is out of range.
    pub fn disambiguate(
        self,
        policy: Disambiguation,
    ) -> Result<Zoned, Error> {
        let offset = match (self.offset, policy) {
            (AmbiguousOffset::Unambiguous { offset }, _) => offset,
            (AmbiguousOffset::Gap { before, after }, policy) => {
                trace!(
                    "civil datetime {} is in a gap between {} and {} \
                     in time zone {}, resolving with {:?}",
                    self.dt,
                    before,
                    after,
                    self.tz.id(),
                    policy,
                );
                match policy {
                    Disambiguation::Compatible | Disambiguation::Later => {
                        before
                    }
                    Disambiguation::Earlier => after,
                    Disambiguation::Reject => {
                        return Err(Error::from(AmbiguousError::BecauseGap {
                            dt: self.dt,
                            before,
                            after,
                            zone: self.tz.id().into(),
                        }))
                    }
                }
            }
            (AmbiguousOffset::Fold { before, after }, policy) => {
                trace!(
                    "civil datetime {} is in a fold between {} and {} \
                     in time zone {}, resolving with {:?}",
                    self.dt,
                    before,
                    after,
                    self.tz.id(),
                    policy,
                );
                match policy {
                    Disambiguation::Compatible | Disambiguation::Earlier => {
                        before
                    }
                    Disambiguation::Later => after,
                    Disambiguation::Reject => {
                        return Err(Error::from(AmbiguousError::BecauseFold {
                            dt: self.dt,
                            before,
                            after,
                            zone: self.tz.id().into(),
                        }))
                    }
                }
            }
        };
        let instant = Instant::from_datetime(self.dt, offset)?;
        Ok(Zoned::new(instant, self.tz))
    }

    /// Resolves with [`Disambiguation::Compatible`].
    pub fn compatible(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Compatible)
    }

    /// Resolves with [`Disambiguation::Earlier`].
    pub fn earlier(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Earlier)
    }

    /// Resolves with [`Disambiguation::Later`].
    pub fn later(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Later)
    }

    /// Resolves with [`Disambiguation::Reject`].
    pub fn unambiguous(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Reject)
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::datetime;

    use super::*;

    #[test]
    fn gap_policies() {
        let tz = TimeZone::get("Europe/London").unwrap();
        let dt = datetime(2024, 3, 31, 1, 30, 0, 0);
        let amb = tz.to_ambiguous_zoned(dt);
        assert_eq!(
            amb.offset(),
            AmbiguousOffset::Gap {
                before: Offset::constant(0),
                after: Offset::constant(1),
            },
        );
        let zdt = amb.clone().compatible().unwrap();
        assert_eq!(zdt.datetime(), datetime(2024, 3, 31, 2, 30, 0, 0));
        let zdt = amb.clone().earlier().unwrap();
        assert_eq!(zdt.datetime(), datetime(2024, 3, 31, 0, 30, 0, 0));
        let zdt = amb.clone().later().unwrap();
        assert_eq!(zdt.datetime(), datetime(2024, 3, 31, 2, 30, 0, 0));
        insta::assert_snapshot!(
            amb.unambiguous().unwrap_err(),
            @"datetime 2024-03-31T01:30 does not exist in time zone Europe/London since it falls into a gap between offsets Z and +01:00",
        );
    }

    #[test]
    fn fold_policies() {
        let tz = TimeZone::get("Europe/London").unwrap();
        let dt = datetime(2024, 10, 27, 1, 30, 0, 0);
        let amb = tz.to_ambiguous_zoned(dt);
        assert!(amb.is_ambiguous());
        assert_eq!(amb.clone().compatible().unwrap().offset(), Offset::constant(1));
        assert_eq!(amb.clone().earlier().unwrap().offset(), Offset::constant(1));
        assert_eq!(amb.clone().later().unwrap().offset(), Offset::constant(0));
        assert!(amb.unambiguous().unwrap_err().is_unresolved());
    }

    #[test]
    fn validity() {
        let fold = AmbiguousOffset::Fold {
            before: Offset::constant(1),
            after: Offset::constant(0),
        };
        assert!(fold.is_valid(Offset::constant(0)));
        assert!(!fold.is_valid(Offset::constant(2)));
        let gap = AmbiguousOffset::Gap {
            before: Offset::constant(0),
            after: Offset::constant(1),
        };
        assert!(!gap.is_valid(Offset::constant(0)));
        assert!(!AmbiguousOffset::Unambiguous { offset: Offset::UTC }.is_ambiguous());
    }
}
