/*!
This module provides Serde support.

Every value type in this crate implements `Serialize` and `Deserialize`
when the `serde` feature is enabled. Values are serialized as the strings
printed by their `Display` impls and deserialized with their `FromStr`
impls, so the wire format is the ISO 8601 format documented in
[`crate::fmt`]. A [`TimeZone`](crate::tz::TimeZone) is serialized as its
identifier and deserialized with [`TimeZone::get`](crate::tz::TimeZone::get).

Besides those impls, this module provides helpers for Serde's [`with`
attribute] that (de)serialize an [`Instant`](crate::Instant) as an integer
number of seconds or milliseconds from the Unix epoch. Only the leaves of
this tree are usable with the `with` attribute:

* [`calends::fmt::serde::instant::second::required`](self::instant::second::required)
* [`calends::fmt::serde::instant::second::optional`](self::instant::second::optional)
* [`calends::fmt::serde::instant::millisecond::required`](self::instant::millisecond::required)
* [`calends::fmt::serde::instant::millisecond::optional`](self::instant::millisecond::optional)

These helpers exist to talk to APIs that send integers. Prefer the string
format otherwise.

# Example

```
use calends::Instant;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "calends::fmt::serde::instant::second::required")]
    at: Instant,
}

let json = r#"{"at":1517644800}"#;
let got: Record = serde_json::from_str(&json)?;
assert_eq!(got.at, Instant::from_second(1517644800)?);
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[`with` attribute]: https://serde.rs/field-attrs.html#with
*/

use serde::de;

use crate::tz::{Offset, TimeZone};

macro_rules! serde_string {
    ($ty:ty, $expecting:literal) => {
        impl serde::Serialize for $ty {
            #[inline]
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            #[inline]
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$ty, D::Error> {
                struct StringVisitor;

                impl<'de> de::Visitor<'de> for StringVisitor {
                    type Value = $ty;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        f.write_str($expecting)
                    }

                    #[inline]
                    fn visit_bytes<E: de::Error>(
                        self,
                        value: &[u8],
                    ) -> Result<$ty, E> {
                        let value = core::str::from_utf8(value)
                            .map_err(de::Error::custom)?;
                        self.visit_str(value)
                    }

                    #[inline]
                    fn visit_str<E: de::Error>(
                        self,
                        value: &str,
                    ) -> Result<$ty, E> {
                        value.parse().map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(StringVisitor)
            }
        }
    };
}

serde_string!(crate::civil::Date, "a date string");
serde_string!(crate::civil::Time, "a time string");
serde_string!(crate::civil::DateTime, "a datetime string");
serde_string!(crate::civil::Year, "a year string");
serde_string!(crate::civil::YearMonth, "a year-month string");
serde_string!(crate::civil::MonthDay, "a month-day string");
serde_string!(crate::Instant, "an instant string");
serde_string!(crate::OffsetDateTime, "a datetime with offset string");
serde_string!(crate::OffsetTime, "a time with offset string");
serde_string!(crate::Zoned, "a zoned datetime string");
serde_string!(Offset, "an offset string");
serde_string!(crate::Duration, "a duration string");
serde_string!(crate::Period, "a period string");

impl serde::Serialize for TimeZone {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> serde::Deserialize<'de> for TimeZone {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimeZone, D::Error> {
        struct TimeZoneVisitor;

        impl<'de> de::Visitor<'de> for TimeZoneVisitor {
            type Value = TimeZone;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a time zone identifier")
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<TimeZone, E> {
                TimeZone::get(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(TimeZoneVisitor)
    }
}

/// Convenience routines for (de)serializing [`Instant`](crate::Instant) as
/// an integer number of seconds or milliseconds from the Unix epoch.
pub mod instant {
    use serde::de;

    use crate::{Error, Instant};

    /// Accepts any integer that fits in an `i64` and converts it with
    /// `convert`.
    struct IntegerVisitor {
        expecting: &'static str,
        convert: fn(i64) -> Result<Instant, Error>,
    }

    impl<'de> de::Visitor<'de> for IntegerVisitor {
        type Value = Instant;

        fn expecting(
            &self,
            f: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
            f.write_str(self.expecting)
        }

        #[inline]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Instant, E> {
            (self.convert)(v).map_err(de::Error::custom)
        }

        #[inline]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Instant, E> {
            let v = i64::try_from(v).map_err(|_| {
                de::Error::custom(format_args!(
                    "got unsigned integer {v}, which is too big \
                     to fit in an i64",
                ))
            })?;
            self.visit_i64(v)
        }
    }

    struct OptionalVisitor(IntegerVisitor);

    impl<'de> de::Visitor<'de> for OptionalVisitor {
        type Value = Option<Instant>;

        fn expecting(
            &self,
            f: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
            write!(f, "{} or `None`", self.0.expecting)
        }

        #[inline]
        fn visit_some<D: de::Deserializer<'de>>(
            self,
            de: D,
        ) -> Result<Option<Instant>, D::Error> {
            de.deserialize_i64(self.0).map(Some)
        }

        #[inline]
        fn visit_none<E: de::Error>(self) -> Result<Option<Instant>, E> {
            Ok(None)
        }
    }

    /// (De)serialize an integer number of seconds from the Unix epoch.
    pub mod second {
        use crate::Instant;

        fn visitor() -> super::IntegerVisitor {
            super::IntegerVisitor {
                expecting: "an integer number of seconds from the Unix epoch",
                convert: Instant::from_second,
            }
        }

        /// (De)serialize a required integer number of seconds from the Unix
        /// epoch.
        pub mod required {
            use crate::Instant;

            /// Serialize a required integer number of seconds since the Unix
            /// epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Instant,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                se.serialize_i64(instant.as_second())
            }

            /// Deserialize a required integer number of seconds since the
            /// Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Instant, D::Error> {
                de.deserialize_i64(super::visitor())
            }
        }

        /// (De)serialize an optional integer number of seconds from the Unix
        /// epoch.
        pub mod optional {
            use crate::Instant;

            /// Serialize an optional integer number of seconds since the Unix
            /// epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Option<Instant>,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                match *instant {
                    None => se.serialize_none(),
                    Some(instant) => se.serialize_i64(instant.as_second()),
                }
            }

            /// Deserialize an optional integer number of seconds since the
            /// Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Option<Instant>, D::Error> {
                de.deserialize_option(super::super::OptionalVisitor(
                    super::visitor(),
                ))
            }
        }
    }

    /// (De)serialize an integer number of milliseconds from the Unix epoch.
    pub mod millisecond {
        use crate::Instant;

        fn visitor() -> super::IntegerVisitor {
            super::IntegerVisitor {
                expecting:
                    "an integer number of milliseconds from the Unix epoch",
                convert: Instant::from_millisecond,
            }
        }

        /// (De)serialize a required integer number of milliseconds from the
        /// Unix epoch.
        pub mod required {
            use crate::Instant;

            /// Serialize a required integer number of milliseconds since the
            /// Unix epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Instant,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                se.serialize_i64(instant.as_millisecond())
            }

            /// Deserialize a required integer number of milliseconds since
            /// the Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Instant, D::Error> {
                de.deserialize_i64(super::visitor())
            }
        }

        /// (De)serialize an optional integer number of milliseconds from the
        /// Unix epoch.
        pub mod optional {
            use crate::Instant;

            /// Serialize an optional integer number of milliseconds since the
            /// Unix epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Option<Instant>,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                match *instant {
                    None => se.serialize_none(),
                    Some(instant) => {
                        se.serialize_i64(instant.as_millisecond())
                    }
                }
            }

            /// Deserialize an optional integer number of milliseconds since
            /// the Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Option<Instant>, D::Error> {
                de.deserialize_option(super::super::OptionalVisitor(
                    super::visitor(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, time, DateTime, MonthDay, YearMonth},
        tz::{Offset, TimeZone},
        Duration, Instant, Period, Zoned,
    };

    #[test]
    fn strings() {
        let dt = DateTime::from_parts(date(2024, 3, 5), time(14, 30, 0, 5));
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, r#""2024-03-05T14:30:00.000000005""#);
        assert_eq!(serde_json::from_str::<DateTime>(&json).unwrap(), dt);

        let md: MonthDay = serde_json::from_str(r#""--02-29""#).unwrap();
        assert_eq!(md, MonthDay::new(2, 29).unwrap());
        let ym: YearMonth = serde_json::from_str(r#""2024-02""#).unwrap();
        assert_eq!(ym, YearMonth::new(2024, 2).unwrap());

        let d: Duration = serde_json::from_str(r#""PT1H30M""#).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""PT1H30M""#);
        let p: Period = serde_json::from_str(r#""P2W""#).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""P14D""#);
        let o: Offset = serde_json::from_str(r#""-0530""#).unwrap();
        assert_eq!(serde_json::to_string(&o).unwrap(), r#""-05:30""#);
    }

    #[test]
    fn zoned_and_time_zone() {
        let json = r#""2024-03-10T03:30-04:00[America/New_York]""#;
        let zdt: Zoned = serde_json::from_str(json).unwrap();
        assert_eq!(zdt.time_zone().id(), "America/New_York");
        assert_eq!(serde_json::to_string(&zdt).unwrap(), json);

        let tz: TimeZone = serde_json::from_str(r#""Europe/Paris""#).unwrap();
        assert_eq!(serde_json::to_string(&tz).unwrap(), r#""Europe/Paris""#);
        assert!(serde_json::from_str::<TimeZone>(r#""Mars/Base""#).is_err());
    }

    #[test]
    fn errors() {
        let err = serde_json::from_str::<Instant>(r#""2024-03-05""#)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with(r#"failed to parse "2024-03-05" as instant"#));
        assert!(serde_json::from_str::<Duration>("5").is_err());
    }

    #[test]
    fn instant_second_required() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::instant::second::required")]
            at: Instant,
        }

        let json = r#"{"at":1517644800}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.at, Instant::from_second(1517644800).unwrap());
        assert_eq!(serde_json::to_string(&got).unwrap(), json);

        let json = r#"{"at":-1}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.at, Instant::from_second(-1).unwrap());
    }

    #[test]
    fn instant_second_optional() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::instant::second::optional")]
            at: Option<Instant>,
        }

        let json = r#"{"at":1517644800}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.at, Some(Instant::from_second(1517644800).unwrap()));
        assert_eq!(serde_json::to_string(&got).unwrap(), json);

        let json = r#"{"at":null}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.at, None);
        assert_eq!(serde_json::to_string(&got).unwrap(), json);
    }

    #[test]
    fn instant_millisecond() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(
                with = "crate::fmt::serde::instant::millisecond::required"
            )]
            at: Instant,
            #[serde(
                with = "crate::fmt::serde::instant::millisecond::optional"
            )]
            maybe: Option<Instant>,
        }

        let json = r#"{"at":1517644800123,"maybe":null}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.at, Instant::from_millisecond(1517644800_123).unwrap());
        assert_eq!(got.maybe, None);
        assert_eq!(serde_json::to_string(&got).unwrap(), json);

        let json = r#"{"at":18446744073709551615,"maybe":null}"#;
        assert!(serde_json::from_str::<Data>(&json).is_err());
    }
}
