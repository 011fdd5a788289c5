use std::sync::Arc;

use crate::{
    civil::{Date, DateTime, Time, Weekday},
    error::{err, tz::Error as TzError, Error},
    tz::{AmbiguousOffset, Offset},
    Duration, Instant,
};

/// A single change of offset at a specific instant.
///
/// A transition is a gap when the offset increases (clocks jump forward)
/// and an overlap when it decreases (clocks jump back).
///
/// ```
/// use calends::{tz::{Offset, Transition}, Instant};
///
/// let instant: Instant = "2024-03-31T01:00:00Z".parse()?;
/// let t = Transition::new(instant, Offset::constant(0), Offset::constant(1))?;
/// assert!(t.is_gap());
/// assert_eq!(t.datetime_before().to_string(), "2024-03-31T01:00");
/// assert_eq!(t.datetime_after().to_string(), "2024-03-31T02:00");
/// assert_eq!(t.duration().to_minutes(), 60);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Transition {
    instant: Instant,
    before: Offset,
    after: Offset,
}

impl Transition {
    /// Creates a transition from `before` to `after` at `instant`.
    ///
    /// # Errors
    ///
    /// This returns an error when both offsets are equal.
    pub fn new(
        instant: Instant,
        before: Offset,
        after: Offset,
    ) -> Result<Transition, Error> {
        if before == after {
            return Err(Error::from(TzError::NoOffsetChange { offset: before }));
        }
        Ok(Transition { instant, before, after })
    }

    /// Returns the instant of the transition.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns the offset before the transition.
    pub fn offset_before(&self) -> Offset {
        self.before
    }

    /// Returns the offset after the transition.
    pub fn offset_after(&self) -> Offset {
        self.after
    }

    /// Returns true when civil datetimes are skipped.
    pub fn is_gap(&self) -> bool {
        self.after > self.before
    }

    /// Returns true when civil datetimes are repeated.
    pub fn is_overlap(&self) -> bool {
        self.after < self.before
    }

    /// Returns the change in offset. It is negative for an overlap.
    pub fn duration(&self) -> Duration {
        self.after.duration_since(self.before)
    }

    /// Returns the civil datetime of the transition in the offset before.
    pub fn datetime_before(&self) -> DateTime {
        self.instant.to_datetime(self.before)
    }

    /// Returns the civil datetime of the transition in the offset after.
    pub fn datetime_after(&self) -> DateTime {
        self.instant.to_datetime(self.after)
    }

    /// Returns true when `offset` is valid for civil datetimes within this
    /// transition. That is never the case for a gap, and is the case for
    /// both offsets of an overlap.
    pub fn is_valid_offset(&self, offset: Offset) -> bool {
        !self.is_gap() && (offset == self.before || offset == self.after)
    }

    /// Returns how a civil datetime relates to this transition.
    fn classify(&self, dt: DateTime) -> LocalInfo {
        let (local_before, local_after) =
            (self.datetime_before(), self.datetime_after());
        if self.is_gap() {
            if dt < local_before {
                LocalInfo::Offset(self.before)
            } else if dt < local_after {
                LocalInfo::Transition(*self)
            } else {
                LocalInfo::Offset(self.after)
            }
        } else if dt < local_after {
            LocalInfo::Offset(self.before)
        } else if dt < local_before {
            LocalInfo::Transition(*self)
        } else {
            LocalInfo::Offset(self.after)
        }
    }

    fn ambiguous_offset(&self) -> AmbiguousOffset {
        let (before, after) = (self.before, self.after);
        if self.is_gap() {
            AmbiguousOffset::Gap { before, after }
        } else {
            AmbiguousOffset::Fold { before, after }
        }
    }
}

/// How the local time of a [`TransitionRule`] is to be interpreted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeDefinition {
    /// The time is in UTC.
    Utc,
    /// The time is in the standard offset.
    Standard,
    /// The time is in the wall offset in effect before the transition.
    Wall,
}

impl TimeDefinition {
    /// Converts a civil datetime in this definition to wall time in the
    /// `wall` offset.
    fn to_wall(
        self,
        dt: DateTime,
        standard: Offset,
        wall: Offset,
    ) -> Result<DateTime, Error> {
        let diff = match self {
            TimeDefinition::Utc => wall.seconds(),
            TimeDefinition::Standard => wall.seconds() - standard.seconds(),
            TimeDefinition::Wall => return Ok(dt),
        };
        dt.checked_add(Duration::from_secs(i64::from(diff)))
    }
}

/// An annually recurring transition, such as "the last Sunday of March at
/// 01:00 UTC".
///
/// The day is chosen by a day-of-month indicator and an optional weekday.
/// A positive indicator is a day of the month, and with a weekday the
/// transition is on the first such weekday on or after that day. A negative
/// indicator counts back from the end of the month (`-1` is the last day),
/// and with a weekday the transition is on the last such weekday on or
/// before that day.
///
/// ```
/// use calends::{
///     civil::{time, Weekday},
///     tz::{Offset, TimeDefinition, TransitionRule},
/// };
///
/// let rule = TransitionRule::new(
///     3, -1, Some(Weekday::Sunday), time(1, 0, 0, 0), false,
///     TimeDefinition::Utc,
///     Offset::constant(1), Offset::constant(1), Offset::constant(2),
/// )?;
/// let t = rule.to_transition(2024)?;
/// assert_eq!(t.instant().to_string(), "2024-03-31T01:00:00Z");
/// assert_eq!(t.datetime_before().to_string(), "2024-03-31T02:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TransitionRule {
    month: i8,
    day_indicator: i8,
    weekday: Option<Weekday>,
    time: Time,
    end_of_day: bool,
    definition: TimeDefinition,
    standard: Offset,
    before: Offset,
    after: Offset,
}

impl TransitionRule {
    /// Creates a new transition rule.
    ///
    /// When `end_of_day` is true, `time` must be midnight and the transition
    /// happens at the midnight that ends the selected day.
    ///
    /// # Errors
    ///
    /// This returns an error when the month is invalid, the day indicator
    /// is not in `-28..=31` or is zero, `end_of_day` is used with a time
    /// other than midnight, or `before` equals `after`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        month: i8,
        day_indicator: i8,
        weekday: Option<Weekday>,
        time: Time,
        end_of_day: bool,
        definition: TimeDefinition,
        standard: Offset,
        before: Offset,
        after: Offset,
    ) -> Result<TransitionRule, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        if day_indicator == 0 || !(-28..=31).contains(&day_indicator) {
            return Err(err!(
                "day-of-month indicator must be in -28..=31 and non-zero, \
                 but got {day_indicator}",
            ));
        }
        if end_of_day && time != Time::MIDNIGHT {
            return Err(err!(
                "time must be midnight when the rule ends the day, \
                 but got {time}",
            ));
        }
        if before == after {
            return Err(Error::from(TzError::NoOffsetChange { offset: before }));
        }
        Ok(TransitionRule {
            month,
            day_indicator,
            weekday,
            time,
            end_of_day,
            definition,
            standard,
            before,
            after,
        })
    }

    /// Returns the month of the transition.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the day-of-month indicator.
    pub fn day_indicator(&self) -> i8 {
        self.day_indicator
    }

    /// Returns the weekday adjustment, if any.
    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    /// Returns the local time of the transition.
    pub fn time(&self) -> Time {
        self.time
    }

    /// Returns true when the transition is at the midnight ending the day.
    pub fn is_midnight_end_of_day(&self) -> bool {
        self.end_of_day
    }

    /// Returns how the local time is interpreted.
    pub fn time_definition(&self) -> TimeDefinition {
        self.definition
    }

    /// Returns the standard offset in effect at the transition.
    pub fn standard_offset(&self) -> Offset {
        self.standard
    }

    /// Returns the wall offset before the transition.
    pub fn offset_before(&self) -> Offset {
        self.before
    }

    /// Returns the wall offset after the transition.
    pub fn offset_after(&self) -> Offset {
        self.after
    }

    /// Returns the transition this rule produces in the given year.
    ///
    /// # Errors
    ///
    /// This returns an error when the day doesn't exist in that year (for
    /// example the 29th of February) or when the transition is out of range.
    pub fn to_transition(&self, year: i32) -> Result<Transition, Error> {
        let mut date = if self.day_indicator < 0 {
            let last = Date::new(year, self.month, 1)?.days_in_month();
            let date = Date::new(year, self.month, last + 1 + self.day_indicator)?;
            match self.weekday {
                None => date,
                Some(wd) => date.checked_sub_days(i64::from(
                    wd.days_until(date.weekday()),
                ))?,
            }
        } else {
            let date = Date::new(year, self.month, self.day_indicator)?;
            match self.weekday {
                None => date,
                Some(wd) => date.checked_add_days(i64::from(
                    date.weekday().days_until(wd),
                ))?,
            }
        };
        if self.end_of_day {
            date = date.tomorrow()?;
        }
        let wall =
            self.definition.to_wall(date.at(self.time), self.standard, self.before)?;
        let instant = Instant::from_datetime(wall, self.before)?;
        Transition::new(instant, self.before, self.after)
    }
}

/// Where a civil datetime falls with respect to the transitions of a zone.
#[derive(Clone, Copy, Debug)]
enum LocalInfo {
    Offset(Offset),
    Transition(Transition),
}

/// The rules that determine the offset of a time zone at every instant.
///
/// Rules are either a single fixed offset, or a table. A table has a base
/// standard and wall offset, an ordered list of standard offset
/// transitions, an ordered list of wall offset transitions, and a list of
/// [`TransitionRule`]s that apply every year after the last wall
/// transition (or always, when there are no wall transitions).
///
/// Rules are cheap to clone.
///
/// ```
/// use calends::{tz::{Offset, ZoneRules}, Instant};
///
/// let rules = ZoneRules::fixed(Offset::constant(9));
/// assert!(rules.is_fixed_offset());
/// assert_eq!(rules.offset(Instant::UNIX_EPOCH), Offset::constant(9));
/// assert!(rules.next_transition(Instant::UNIX_EPOCH).is_none());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZoneRules {
    kind: ZoneRulesKind,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum ZoneRulesKind {
    Fixed(Offset),
    Table(Arc<Table>),
}

#[derive(Debug, Eq, PartialEq)]
struct Table {
    base_standard: Offset,
    base_wall: Offset,
    standard_transitions: Vec<Transition>,
    transitions: Vec<Transition>,
    rules: Vec<TransitionRule>,
}

impl ZoneRules {
    /// Creates rules with a single offset and no transitions.
    pub fn fixed(offset: Offset) -> ZoneRules {
        ZoneRules { kind: ZoneRulesKind::Fixed(offset) }
    }

    /// Creates a table of rules.
    ///
    /// The recurring `rules` should be given in the order they occur within
    /// a year.
    ///
    /// # Errors
    ///
    /// This returns an error when either list of transitions is not in
    /// strictly ascending order by instant.
    pub fn new(
        base_standard: Offset,
        base_wall: Offset,
        standard_transitions: Vec<Transition>,
        transitions: Vec<Transition>,
        rules: Vec<TransitionRule>,
    ) -> Result<ZoneRules, Error> {
        let ascending = |ts: &[Transition]| {
            ts.windows(2).all(|w| w[0].instant < w[1].instant)
        };
        if !ascending(&standard_transitions) || !ascending(&transitions) {
            return Err(Error::from(TzError::Unsorted));
        }
        let table = Table {
            base_standard,
            base_wall,
            standard_transitions,
            transitions,
            rules,
        };
        Ok(ZoneRules { kind: ZoneRulesKind::Table(Arc::new(table)) })
    }

    /// Returns true when these rules always produce the same offset.
    pub fn is_fixed_offset(&self) -> bool {
        match self.kind {
            ZoneRulesKind::Fixed(_) => true,
            ZoneRulesKind::Table(ref t) => {
                t.transitions.is_empty()
                    && t.rules.is_empty()
                    && t.standard_transitions.is_empty()
            }
        }
    }

    /// Returns the offset when these rules are fixed.
    pub(crate) fn to_fixed_offset(&self) -> Option<Offset> {
        match self.kind {
            ZoneRulesKind::Fixed(offset) => Some(offset),
            ZoneRulesKind::Table(ref t) if self.is_fixed_offset() => {
                Some(t.base_wall)
            }
            ZoneRulesKind::Table(_) => None,
        }
    }

    /// Returns the wall offset in effect at the given instant.
    pub fn offset(&self, instant: Instant) -> Offset {
        let t = match self.kind {
            ZoneRulesKind::Fixed(offset) => return offset,
            ZoneRulesKind::Table(ref t) => t,
        };
        if t.uses_rules_at(instant) {
            let year = instant.to_datetime(t.last_wall()).year();
            let year_transitions = t.year_transitions(year);
            let mut offset = t.last_wall();
            for trans in year_transitions.iter() {
                if instant < trans.instant {
                    return trans.before;
                }
                offset = trans.after;
            }
            return offset;
        }
        let i = t.transitions.partition_point(|tr| tr.instant <= instant);
        match i.checked_sub(1) {
            None => t.base_wall,
            Some(i) => t.transitions[i].after,
        }
    }

    /// Returns the standard offset in effect at the given instant.
    ///
    /// This is the offset without any daylight saving time.
    pub fn standard_offset(&self, instant: Instant) -> Offset {
        let t = match self.kind {
            ZoneRulesKind::Fixed(offset) => return offset,
            ZoneRulesKind::Table(ref t) => t,
        };
        let i =
            t.standard_transitions.partition_point(|tr| tr.instant <= instant);
        match i.checked_sub(1) {
            None => t.base_standard,
            Some(i) => t.standard_transitions[i].after,
        }
    }

    /// Returns the amount of daylight saving time in effect at the given
    /// instant, the difference between the wall and standard offsets.
    pub fn daylight_savings(&self, instant: Instant) -> Duration {
        self.offset(instant).duration_since(self.standard_offset(instant))
    }

    /// Returns true when the wall offset differs from the standard offset
    /// at the given instant.
    pub fn is_daylight_savings(&self, instant: Instant) -> bool {
        self.offset(instant) != self.standard_offset(instant)
    }

    /// Returns the possible offsets of a civil datetime.
    ///
    /// ```
    /// use calends::{civil::datetime, tz::{AmbiguousOffset, Offset, TimeZone}};
    ///
    /// let rules = TimeZone::get("America/New_York")?.rules();
    /// let dt = datetime(2024, 3, 10, 2, 30, 0, 0);
    /// assert_eq!(
    ///     rules.offset_for_local(dt),
    ///     AmbiguousOffset::Gap {
    ///         before: Offset::constant(-5),
    ///         after: Offset::constant(-4),
    ///     },
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn offset_for_local(&self, dt: DateTime) -> AmbiguousOffset {
        match self.local_info(dt) {
            LocalInfo::Offset(offset) => AmbiguousOffset::Unambiguous { offset },
            LocalInfo::Transition(trans) => trans.ambiguous_offset(),
        }
    }

    /// Returns the transition that makes the civil datetime a gap or a
    /// fold, if there is one.
    pub fn transition(&self, dt: DateTime) -> Option<Transition> {
        match self.local_info(dt) {
            LocalInfo::Offset(_) => None,
            LocalInfo::Transition(trans) => Some(trans),
        }
    }

    /// Returns true when `offset` is valid for the civil datetime.
    pub fn is_valid_offset(&self, dt: DateTime, offset: Offset) -> bool {
        self.offset_for_local(dt).is_valid(offset)
    }

    /// Returns the first transition strictly after the given instant.
    pub fn next_transition(&self, instant: Instant) -> Option<Transition> {
        let t = match self.kind {
            ZoneRulesKind::Fixed(_) => return None,
            ZoneRulesKind::Table(ref t) => t,
        };
        let i = t.transitions.partition_point(|tr| tr.instant <= instant);
        if let Some(trans) = t.transitions.get(i) {
            return Some(*trans);
        }
        if t.rules.is_empty() {
            return None;
        }
        let mut year = instant.to_datetime(t.last_wall()).year();
        // Every year has at least one transition, so looking at two years
        // is always enough.
        for _ in 0..2 {
            let found = t
                .year_transitions(year)
                .into_iter()
                .find(|tr| tr.instant > instant && t.after_table(tr.instant));
            if found.is_some() {
                return found;
            }
            year = year.checked_add(1)?;
        }
        None
    }

    /// Returns the last transition strictly before the given instant.
    pub fn previous_transition(&self, instant: Instant) -> Option<Transition> {
        let t = match self.kind {
            ZoneRulesKind::Fixed(_) => return None,
            ZoneRulesKind::Table(ref t) => t,
        };
        if !t.rules.is_empty() && t.uses_rules_at(instant) {
            let mut year = instant.to_datetime(t.last_wall()).year();
            for _ in 0..2 {
                let found = t
                    .year_transitions(year)
                    .into_iter()
                    .rev()
                    .find(|tr| {
                        tr.instant < instant && t.after_table(tr.instant)
                    });
                if found.is_some() {
                    return found;
                }
                year = year.checked_sub(1)?;
            }
        }
        let i = t.transitions.partition_point(|tr| tr.instant < instant);
        i.checked_sub(1).map(|i| t.transitions[i])
    }

    /// Returns the explicit wall transitions.
    pub fn transitions(&self) -> &[Transition] {
        match self.kind {
            ZoneRulesKind::Fixed(_) => &[],
            ZoneRulesKind::Table(ref t) => &t.transitions,
        }
    }

    /// Returns the recurring rules used after the explicit transitions.
    pub fn transition_rules(&self) -> &[TransitionRule] {
        match self.kind {
            ZoneRulesKind::Fixed(_) => &[],
            ZoneRulesKind::Table(ref t) => &t.rules,
        }
    }

    fn local_info(&self, dt: DateTime) -> LocalInfo {
        let t = match self.kind {
            ZoneRulesKind::Fixed(offset) => return LocalInfo::Offset(offset),
            ZoneRulesKind::Table(ref t) => t,
        };
        let past_table = match t.transitions.last() {
            None => true,
            Some(last) => {
                dt >= last.datetime_before().max(last.datetime_after())
            }
        };
        if !t.rules.is_empty() && past_table {
            let mut info = LocalInfo::Offset(t.last_wall());
            for trans in t.year_transitions(dt.year()).iter() {
                info = trans.classify(dt);
                match info {
                    LocalInfo::Transition(_) => return info,
                    LocalInfo::Offset(o) if o == trans.before => return info,
                    LocalInfo::Offset(_) => {}
                }
            }
            return info;
        }
        let i = t.transitions.partition_point(|tr| {
            tr.datetime_before().min(tr.datetime_after()) <= dt
        });
        match i.checked_sub(1) {
            None => LocalInfo::Offset(t.base_wall),
            Some(i) => t.transitions[i].classify(dt),
        }
    }
}

impl Table {
    /// Returns the wall offset after the last explicit transition.
    fn last_wall(&self) -> Offset {
        self.transitions.last().map_or(self.base_wall, |t| t.after)
    }

    /// Returns true when the given instant is after every explicit
    /// transition.
    fn after_table(&self, instant: Instant) -> bool {
        self.transitions.last().map_or(true, |t| instant > t.instant)
    }

    /// Returns true when the recurring rules determine the offset at the
    /// given instant.
    fn uses_rules_at(&self, instant: Instant) -> bool {
        !self.rules.is_empty() && self.after_table(instant)
    }

    /// Returns the transitions produced by the recurring rules in a year.
    ///
    /// Years so close to the limits of the supported range that a rule
    /// can't produce a transition simply have fewer transitions.
    fn year_transitions(&self, year: i32) -> Vec<Transition> {
        self.rules
            .iter()
            .filter_map(|rule| rule.to_transition(year).ok())
            .collect()
    }
}
