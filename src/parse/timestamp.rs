//! Timestamp normalization for values scraped from the TD pages.
//!
//! The portal publishes local São Paulo wall-clock times without an offset
//! (`2026-01-28T13:02:01.613`). Values that do carry an offset are parsed as-is.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("unrecognized timestamp '{0}'")]
    Unrecognized(String),
    #[error("timestamp '{0}' does not exist in America/Sao_Paulo")]
    NonexistentLocal(String),
}

/// Local patterns tried in order when the input has no usable offset.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.3f", "%Y-%m-%dT%H:%M:%S"];

/// Parse `raw`, assuming America/Sao_Paulo when no offset is present.
pub fn parse_portal_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let s = raw.trim();

    if has_offset_designator(s) && s.matches(':').count() >= 2 {
        // RFC 3339 covers both the fractional and the whole-second variants.
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt);
        }
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Sao_Paulo
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| TimestampError::NonexistentLocal(s.to_string()));
        }
    }

    Err(TimestampError::Unrecognized(s.to_string()))
}

/// Render with as many sub-second digits as the value carries.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Current instant in America/Sao_Paulo, whole seconds, RFC 3339 with offset.
pub fn now_sao_paulo() -> String {
    run_timestamp(Utc::now())
}

pub(crate) fn run_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Sao_Paulo)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn has_offset_designator(s: &str) -> bool {
    let Some((_, time)) = s.split_once('T') else {
        return false;
    };
    time.contains(['Z', 'z', '+', '-'])
}
