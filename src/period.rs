//! Rotation period handling
//!
//! Computes the calendar-derived suffix that selects the target CSV file for
//! the current period. A suffix depends on three things:
//!
//! - the [`Granularity`] (`daily`, `monthly`, `yearly`)
//! - the current instant, supplied by a [`Clock`]
//! - the [`ReferenceZone`] the instant is viewed in
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use csv_recorder::period::{resolve_time_zone, Granularity};
//!
//! let zone = resolve_time_zone("Asia/Jakarta").unwrap();
//! let instant = Utc.with_ymd_and_hms(2025, 8, 26, 3, 0, 0).unwrap();
//! assert_eq!(zone.suffix_at(instant, Granularity::Daily), "2025_08_26");
//! assert_eq!(zone.suffix_at(instant, Granularity::Monthly), "2025_08");
//! assert_eq!(zone.suffix_at(instant, Granularity::Yearly), "2025");
//! ```

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::RecorderError;

/// Reference time zone used when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Jakarta";

/// How often the target file rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One file per calendar day, suffix `YYYY_MM_DD`.
    Daily,
    /// One file per calendar month, suffix `YYYY_MM`.
    Monthly,
    /// One file per calendar year, suffix `YYYY`.
    Yearly,
}

impl Granularity {
    /// The configuration string for this granularity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Granularity::Daily => "%Y_%m_%d",
            Granularity::Monthly => "%Y_%m",
            Granularity::Yearly => "%Y",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = RecorderError;

    /// Parses the exact lowercase names `daily`, `monthly` and `yearly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Granularity::Daily),
            "monthly" => Ok(Granularity::Monthly),
            "yearly" => Ok(Granularity::Yearly),
            other => Err(RecorderError::UnsupportedRecordType(other.to_string())),
        }
    }
}

/// Source of the current instant.
///
/// The recorder asks its clock for the time on every call, so tests can pin
/// the period with [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats the period suffix of `instant` for the given granularity.
///
/// The suffix is taken from the instant's own calendar date, so convert it to
/// the reference zone first.
#[must_use]
pub fn period_suffix<Zone>(instant: &DateTime<Zone>, granularity: Granularity) -> String
where
    Zone: TimeZone,
    Zone::Offset: fmt::Display,
{
    instant.format(granularity.pattern()).to_string()
}

/// A resolved reference time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceZone {
    /// An IANA zone from the tz database, daylight saving included.
    Named(Tz),
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl ReferenceZone {
    /// Formats the period suffix of `instant` as seen in this zone.
    #[must_use]
    pub fn suffix_at(&self, instant: DateTime<Utc>, granularity: Granularity) -> String {
        match self {
            ReferenceZone::Named(tz) => period_suffix(&instant.with_timezone(tz), granularity),
            ReferenceZone::Fixed(offset) => {
                period_suffix(&instant.with_timezone(offset), granularity)
            }
        }
    }
}

/// Resolves a time zone setting.
///
/// Accepted forms, all matched without regard to ASCII case:
///
/// - an IANA name from the tz database: `Asia/Jakarta`, `Europe/Berlin`, `UTC`, ...
/// - `Z` for UTC
/// - an offset: `+07:00`, `+0700`, `+07`, `-03:30`
/// - a prefixed offset: `UTC+7`, `gmt-03:30`
///
/// # Errors
///
/// Returns [`RecorderError::TimeZone`] when the setting matches none of the
/// above or the offset is out of range.
pub fn resolve_time_zone(zone: &str) -> Result<ReferenceZone, RecorderError> {
    let trimmed = zone.trim();

    if let Ok(tz) = Tz::from_str_insensitive(trimmed) {
        return Ok(ReferenceZone::Named(tz));
    }
    if trimmed.eq_ignore_ascii_case("Z") {
        return Ok(ReferenceZone::Named(chrono_tz::UTC));
    }

    let offset = match trimmed.get(..3) {
        Some(prefix) if is_utc_prefix(prefix) => &trimmed[3..],
        _ => trimmed,
    };

    parse_offset(offset)
        .map(ReferenceZone::Fixed)
        .ok_or_else(|| RecorderError::TimeZone(zone.to_string()))
}

fn is_utc_prefix(prefix: &str) -> bool {
    prefix.eq_ignore_ascii_case("UTC") || prefix.eq_ignore_ascii_case("GMT")
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, rest) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((hours, minutes)) => (hours, Some(minutes)),
        None if rest.len() == 4 => (&rest[..2], Some(&rest[2..])),
        None => (rest, None),
    };

    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;

    let minutes: i32 = match minutes {
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
