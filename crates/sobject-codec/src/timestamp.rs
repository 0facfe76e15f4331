//! Fixed ISO-8601 profile for timestamp fields.
//!
//! Output is always `YYYY-MM-DDTHH:MM:SS+00:00`: UTC, second precision,
//! explicit offset. Input additionally accepts the Salesforce REST form
//! `2018-09-13T14:03:00.000+0000` (milliseconds, offset without a colon).

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};

/// Salesforce REST timestamps: fractional seconds, `+hhmm` offset.
const SALESFORCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Render `ts` in UTC with second precision.
pub fn format_utc<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    ts.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse an ISO-8601 timestamp, keeping the offset it was written with.
pub fn parse(input: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, SALESFORCE_FORMAT))
}
