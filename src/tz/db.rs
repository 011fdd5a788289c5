use std::{collections::BTreeMap, sync::OnceLock};

use crate::{
    error::{tz::Error as TzError, Error},
    tz::{bundled, timezone::check_region_id, TimeZone, ZoneRules},
};

/// Returns the process wide default time zone database.
///
/// It is built once, on first use, from a small bundled set of rule based
/// zones and is read-only afterwards. [`TimeZone::get`] looks up
/// identifiers here.
///
/// ```
/// use calends::tz;
///
/// let ids: Vec<&str> = tz::db().available().collect();
/// assert!(ids.contains(&"Europe/London"));
/// assert!(ids.contains(&"Asia/Tokyo"));
/// ```
pub fn db() -> &'static TimeZoneDatabase {
    static DB: OnceLock<TimeZoneDatabase> = OnceLock::new();
    DB.get_or_init(|| {
        let db = match bundled::database() {
            Ok(db) => db,
            Err(_err) => {
                error!("failed to build bundled time zone database: {_err}");
                TimeZoneDatabase::empty()
            }
        };
        debug!(
            "initialized default time zone database with {} zones",
            db.zones.len(),
        );
        db
    })
}

/// An immutable table from time zone identifiers to their rules.
///
/// Use [`TimeZoneDatabase::builder`] to make one with your own zones, or
/// [`db`] for the default database.
///
/// # Example
///
/// ```
/// use calends::tz::{Offset, TimeZoneDatabase, ZoneRules};
///
/// let db = TimeZoneDatabase::builder()
///     .zone("Antarctica/Troll-ish", ZoneRules::fixed(Offset::constant(2)))
///     .build()?;
/// let tz = db.get("Antarctica/Troll-ish")?;
/// assert_eq!(tz.to_fixed_offset(), Some(Offset::constant(2)));
/// // Offset style identifiers never need the table.
/// assert_eq!(db.get("+03:00")?.id(), "+03:00");
/// assert!(db.get("Europe/London").unwrap_err().is_zone_lookup());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct TimeZoneDatabase {
    zones: BTreeMap<Box<str>, TimeZone>,
}

impl TimeZoneDatabase {
    /// Returns a builder for a database.
    pub fn builder() -> TimeZoneDatabaseBuilder {
        TimeZoneDatabaseBuilder { zones: vec![] }
    }

    /// Returns a database without any regions.
    pub fn empty() -> TimeZoneDatabase {
        TimeZoneDatabase { zones: BTreeMap::new() }
    }

    /// Returns the time zone for the given identifier.
    ///
    /// Offset style identifiers (see [`TimeZone::get`]) are recognized
    /// without consulting the table.
    ///
    /// # Errors
    ///
    /// This returns an error when the identifier is not in this database.
    pub fn get(&self, id: &str) -> Result<TimeZone, Error> {
        if let Some(result) = TimeZone::from_offset_id(id) {
            return result;
        }
        match self.zones.get(id) {
            Some(tz) => Ok(tz.clone()),
            None => {
                debug!("time zone lookup for '{id}' failed");
                Err(Error::from(TzError::NotFound { id: id.into() }))
            }
        }
    }

    /// Returns the region identifiers in this database, in sorted order.
    pub fn available(&self) -> impl Iterator<Item = &str> + '_ {
        self.zones.keys().map(|id| &**id)
    }

    /// Returns true when this database has no regions.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// A builder for a [`TimeZoneDatabase`].
#[derive(Clone, Debug)]
pub struct TimeZoneDatabaseBuilder {
    zones: Vec<(Box<str>, ZoneRules)>,
}

impl TimeZoneDatabaseBuilder {
    /// Adds a region. A later region with the same identifier replaces an
    /// earlier one.
    pub fn zone(mut self, id: &str, rules: ZoneRules) -> TimeZoneDatabaseBuilder {
        self.zones.push((id.into(), rules));
        self
    }

    /// Builds the database.
    ///
    /// # Errors
    ///
    /// This returns an error when any identifier is not a valid region
    /// identifier.
    pub fn build(self) -> Result<TimeZoneDatabase, Error> {
        let mut zones = BTreeMap::new();
        for (id, rules) in self.zones {
            check_region_id(&id)?;
            let tz = TimeZone::region_unchecked(&id, rules);
            zones.insert(id, tz);
        }
        Ok(TimeZoneDatabase { zones })
    }
}

#[cfg(test)]
mod tests {
    use crate::tz::Offset;

    use super::*;

    #[test]
    fn default_db() {
        let db = db();
        assert!(!db.is_empty());
        let ids: Vec<&str> = db.available().collect();
        insta::assert_snapshot!(ids.join(" "), @"America/Los_Angeles America/New_York Asia/Kolkata Asia/Tokyo Australia/Sydney Europe/Berlin Europe/London Europe/Paris");
        let err = db.get("Europe/Atlantis").unwrap_err();
        assert!(err.is_zone_lookup());
        insta::assert_snapshot!(err, @"unknown time zone identifier 'Europe/Atlantis'");
    }

    #[test]
    fn builder() {
        let db = TimeZoneDatabase::builder()
            .zone("A/B", ZoneRules::fixed(Offset::constant(1)))
            .zone("A/B", ZoneRules::fixed(Offset::constant(2)))
            .build()
            .unwrap();
        assert_eq!(db.available().count(), 1);
        assert_eq!(db.get("A/B").unwrap().to_fixed_offset(), Some(Offset::constant(2)));
        assert!(TimeZoneDatabase::builder()
            .zone("not valid", ZoneRules::fixed(Offset::UTC))
            .build()
            .is_err());
        assert!(TimeZoneDatabase::empty().is_empty());
    }
}
