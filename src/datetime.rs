//! TOML date and time values.
//!
//! TOML distinguishes four temporal kinds: local dates, local times, local
//! date-times and offset date-times. [`Date`] and [`Time`] cover the first
//! two; [`DateTime`] covers the last two with an optional [`Offset`].
//!
//! All three types print in their TOML literal form, parse from it, and pass
//! through the serde bridge unchanged. When used with other serde formats they
//! appear as their literal string.
//!
//! ```rust
//! use tomlkit::{Date, DateTime, Offset, Time};
//!
//! let dt = DateTime::new(Date::new(2021, 5, 20), Time::new(4, 27, 5, 294))
//!     .with_offset(Offset::Z);
//! assert_eq!(dt.to_string(), "2021-05-20T04:27:05.000000294Z");
//! assert_eq!(dt, "2021-05-20T04:27:05.000000294Z".parse().unwrap());
//! ```

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub(crate) const DATE_NAME: &str = "$__tomlkit_private_date";
pub(crate) const TIME_NAME: &str = "$__tomlkit_private_time";
pub(crate) const DATETIME_NAME: &str = "$__tomlkit_private_datetime";

/// Field name used when a temporal node is handed to a self-describing
/// visitor such as [`Value`](crate::Value)'s.
pub(crate) const TEMPORAL_FIELD: &str = "$__tomlkit_private_temporal";

/// Error produced when a string is not a TOML date/time literal, or when a
/// value does not fit the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected} `{input}`")]
pub struct DatetimeError {
    expected: &'static str,
    input: String,
}

impl DatetimeError {
    fn new(expected: &'static str, input: impl fmt::Display) -> Self {
        DatetimeError {
            expected,
            input: input.to_string(),
        }
    }
}

/// A calendar date (`2021-05-20`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Creates a date without checking its components.
    ///
    /// Rendered text only parses back when the date is a real calendar day
    /// with a four-digit year; use [`Date::try_new`] to enforce that.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Date { year, month, day }
    }

    /// Creates a date, rejecting years past 9999 and days that do not exist.
    ///
    /// ```rust
    /// use tomlkit::Date;
    ///
    /// assert!(Date::try_new(2024, 2, 29).is_ok());
    /// assert!(Date::try_new(2023, 2, 29).is_err());
    /// assert!(Date::try_new(10000, 1, 1).is_err());
    /// ```
    pub fn try_new(year: u16, month: u8, day: u8) -> Result<Self, DatetimeError> {
        let date = Date::new(year, month, day);
        if year > 9999 {
            return Err(DatetimeError::new("date", date));
        }
        NaiveDate::try_from(date)?;
        Ok(date)
    }
}

/// A wall-clock time (`04:27:05.000000294`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

impl Time {
    /// Creates a time without checking its components.
    ///
    /// Rendered text only parses back for hours below 24, minutes below 60,
    /// seconds up to 60 and nanoseconds below one second; use
    /// [`Time::try_new`] to enforce that.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Time {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a time, rejecting out-of-range components. A second of 60
    /// (leap second) is accepted.
    pub fn try_new(
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<Self, DatetimeError> {
        let time = Time::new(hour, minute, second, nanosecond);
        if hour < 24 && minute < 60 && second <= 60 && nanosecond < 1_000_000_000 {
            Ok(time)
        } else {
            Err(DatetimeError::new("time", time))
        }
    }
}

/// A UTC offset attached to a [`DateTime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Offset {
    /// `Z`
    Z,
    /// `+hh:mm` / `-hh:mm`, stored as signed minutes east of UTC.
    Custom { minutes: i16 },
}

impl Offset {
    #[must_use]
    pub const fn minutes(&self) -> i16 {
        match self {
            Offset::Z => 0,
            Offset::Custom { minutes } => *minutes,
        }
    }
}

/// A date and time, optionally anchored to a UTC offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
    pub offset: Option<Offset>,
}

impl DateTime {
    /// Creates a local date-time (no offset).
    #[must_use]
    pub const fn new(date: Date, time: Time) -> Self {
        DateTime {
            date,
            time,
            offset: None,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond != 0 {
            write!(f, ".{:09}", self.nanosecond)?;
        }
        Ok(())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Z => f.write_str("Z"),
            Offset::Custom { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        if let Some(offset) = &self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

/// Any of the three temporal node kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Temporal {
    Date(Date),
    Time(Time),
    DateTime(DateTime),
}

impl Temporal {
    pub(crate) fn parse(s: &str) -> Result<Self, DatetimeError> {
        let parsed: toml::value::Datetime = s
            .parse()
            .map_err(|_| DatetimeError::new("date/time", s))?;
        Temporal::try_from(parsed).map_err(|_| DatetimeError::new("date/time", s))
    }
}

impl TryFrom<toml::value::Datetime> for Temporal {
    type Error = DatetimeError;

    fn try_from(value: toml::value::Datetime) -> Result<Self, Self::Error> {
        let date = value
            .date
            .map(|d| Date::new(d.year, d.month, d.day));
        let time = value
            .time
            .map(|t| Time::new(t.hour, t.minute, t.second, t.nanosecond));
        let offset = value.offset.map(|o| match o {
            toml::value::Offset::Z => Offset::Z,
            toml::value::Offset::Custom { minutes } => Offset::Custom { minutes },
        });
        match (date, time, offset) {
            (Some(date), None, None) => Ok(Temporal::Date(date)),
            (None, Some(time), None) => Ok(Temporal::Time(time)),
            (Some(date), Some(time), offset) => Ok(Temporal::DateTime(DateTime {
                date,
                time,
                offset,
            })),
            _ => Err(DatetimeError::new("date/time", value)),
        }
    }
}

impl FromStr for Date {
    type Err = DatetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Temporal::parse(s) {
            Ok(Temporal::Date(date)) => Ok(date),
            _ => Err(DatetimeError::new("date", s)),
        }
    }
}

impl FromStr for Time {
    type Err = DatetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Temporal::parse(s) {
            Ok(Temporal::Time(time)) => Ok(time),
            _ => Err(DatetimeError::new("time", s)),
        }
    }
}

impl FromStr for DateTime {
    type Err = DatetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Temporal::parse(s) {
            Ok(Temporal::DateTime(dt)) => Ok(dt),
            _ => Err(DatetimeError::new("date-time", s)),
        }
    }
}

macro_rules! temporal_serde {
    ($ty:ident, $name:expr, $expecting:expr) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_newtype_struct($name, &self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_newtype_struct(
                    $name,
                    LiteralVisitor::<$ty>::new($expecting),
                )
            }
        }
    };
}

temporal_serde!(Date, DATE_NAME, "a TOML local date");
temporal_serde!(Time, TIME_NAME, "a TOML local time");
temporal_serde!(DateTime, DATETIME_NAME, "a TOML date-time");

/// Accepts the literal form of `T`, either directly or wrapped in a newtype.
struct LiteralVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<T> LiteralVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        LiteralVisitor {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, T> de::Visitor<'de> for LiteralVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, value: &str) -> Result<T, E>
    where
        E: de::Error,
    {
        value.parse().map_err(E::custom)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    /// Buffered temporal nodes (flatten, untagged) arrive as a map with one
    /// private field holding the literal.
    fn visit_map<A>(self, mut map: A) -> Result<T, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        match map.next_key::<String>()? {
            Some(key) if key == TEMPORAL_FIELD => {
                let literal: String = map.next_value()?;
                literal.parse().map_err(de::Error::custom)
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = DatetimeError;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
            .ok_or_else(|| DatetimeError::new("date", date))
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = DatetimeError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year())
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| DatetimeError::new("date", date))?;
        // month and day are always < 32 for a valid NaiveDate
        Ok(Date::new(year, date.month() as u8, date.day() as u8))
    }
}

impl TryFrom<Time> for NaiveTime {
    type Error = DatetimeError;

    fn try_from(time: Time) -> Result<Self, Self::Error> {
        NaiveTime::from_hms_nano_opt(
            time.hour.into(),
            time.minute.into(),
            time.second.into(),
            time.nanosecond,
        )
        .ok_or_else(|| DatetimeError::new("time", time))
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        // chrono encodes a leap second as nanosecond >= 1_000_000_000
        let (second, nanosecond) = if time.nanosecond() >= 1_000_000_000 {
            (60, time.nanosecond() - 1_000_000_000)
        } else {
            (time.second() as u8, time.nanosecond())
        };
        Time::new(time.hour() as u8, time.minute() as u8, second, nanosecond)
    }
}

impl TryFrom<DateTime> for NaiveDateTime {
    type Error = DatetimeError;

    /// Drops the offset, if any.
    fn try_from(dt: DateTime) -> Result<Self, Self::Error> {
        Ok(NaiveDateTime::new(dt.date.try_into()?, dt.time.try_into()?))
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = DatetimeError;

    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        Ok(DateTime::new(dt.date().try_into()?, dt.time().into()))
    }
}

impl TryFrom<DateTime> for chrono::DateTime<FixedOffset> {
    type Error = DatetimeError;

    /// Fails for local date-times, which have no offset to anchor them.
    fn try_from(dt: DateTime) -> Result<Self, Self::Error> {
        let offset = dt
            .offset
            .and_then(|o| FixedOffset::east_opt(i32::from(o.minutes()) * 60))
            .ok_or_else(|| DatetimeError::new("offset date-time", dt))?;
        let naive = NaiveDateTime::try_from(dt)?;
        naive
            .and_local_timezone(offset)
            .single()
            .ok_or_else(|| DatetimeError::new("offset date-time", dt))
    }
}

impl TryFrom<chrono::DateTime<FixedOffset>> for DateTime {
    type Error = DatetimeError;

    fn try_from(dt: chrono::DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        let seconds = dt.offset().local_minus_utc();
        let offset = if seconds == 0 {
            Offset::Z
        } else {
            let minutes = i16::try_from(seconds / 60)
                .map_err(|_| DatetimeError::new("offset", dt.offset()))?;
            Offset::Custom { minutes }
        };
        Ok(DateTime::try_from(dt.naive_local())?.with_offset(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_toml_literals() {
        assert_eq!(Date::new(2021, 5, 20).to_string(), "2021-05-20");
        assert_eq!(Time::new(4, 27, 5, 294).to_string(), "04:27:05.000000294");
        assert_eq!(Time::new(23, 0, 0, 0).to_string(), "23:00:00");
        assert_eq!(Offset::Custom { minutes: -330 }.to_string(), "-05:30");
        let dt = DateTime::new(Date::new(2021, 5, 20), Time::new(4, 27, 5, 294));
        assert_eq!(dt.to_string(), "2021-05-20T04:27:05.000000294");
    }

    #[test]
    fn test_parse_each_kind() {
        assert_eq!("2021-05-20".parse::<Date>().unwrap(), Date::new(2021, 5, 20));
        assert_eq!(
            "04:27:05.000000294".parse::<Time>().unwrap(),
            Time::new(4, 27, 5, 294)
        );
        let dt: DateTime = "1979-05-27T07:32:00+01:30".parse().unwrap();
        assert_eq!(dt.offset, Some(Offset::Custom { minutes: 90 }));
    }

    #[test]
    fn test_checked_constructors() {
        assert_eq!(Date::try_new(2021, 5, 20), Ok(Date::new(2021, 5, 20)));
        assert!(Date::try_new(10000, 1, 1).is_err());
        assert!(Date::try_new(2021, 13, 1).is_err());
        assert!(Date::try_new(2021, 4, 31).is_err());

        assert_eq!(Time::try_new(23, 59, 60, 0), Ok(Time::new(23, 59, 60, 0)));
        assert!(Time::try_new(24, 0, 0, 0).is_err());
        assert!(Time::try_new(4, 27, 5, 1_500_000_000).is_err());
    }

    #[test]
    fn test_checked_values_parse_back() {
        let date = Date::try_new(9999, 12, 31).unwrap();
        let time = Time::try_new(23, 59, 59, 999_999_999).unwrap();
        assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
        assert_eq!(time.to_string().parse::<Time>().unwrap(), time);
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        assert!("04:27:05".parse::<Date>().is_err());
        assert!("2021-05-20".parse::<DateTime>().is_err());
        assert!("not a date".parse::<Time>().is_err());
    }

    #[test]
    fn test_chrono_conversions() {
        let date = Date::new(2024, 2, 29);
        let naive = NaiveDate::try_from(date).unwrap();
        assert_eq!(Date::try_from(naive).unwrap(), date);
        assert!(NaiveDate::try_from(Date::new(2023, 2, 29)).is_err());

        let dt = DateTime::new(date, Time::new(12, 0, 0, 0)).with_offset(Offset::Z);
        let fixed = chrono::DateTime::<FixedOffset>::try_from(dt).unwrap();
        assert_eq!(DateTime::try_from(fixed).unwrap(), dt);

        let local = DateTime::new(date, Time::new(12, 0, 0, 0));
        assert!(chrono::DateTime::<FixedOffset>::try_from(local).is_err());
    }

    #[test]
    fn test_json_uses_literal_strings() {
        let date = Date::new(2021, 5, 20);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2021-05-20\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);
    }
}
