//! Export window derivation.
//!
//! A package covers one reporting day: the calendar day of the batch's
//! reference instant, in that instant's own timezone. Truncation to
//! midnight keeps windows aligned with the authority's reporting day no
//! matter when the build runs.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone};

/// Exact window length in seconds.
pub const EXPORT_WINDOW_SECONDS: i64 = 86_400;

/// Day-aligned `[start, end)` interval, seconds since epoch.
///
/// Derived once per package build; never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportWindow {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

/// Compute the export window for a reference instant.
///
/// `start` is midnight of the instant's calendar day in the instant's
/// timezone; `end` is exactly [`EXPORT_WINDOW_SECONDS`] later. Total over
/// all valid instants: timezone transitions that swallow local midnight
/// resolve to the earliest instant that exists on that day.
pub fn export_window<Tz: TimeZone>(reference: &DateTime<Tz>) -> ExportWindow {
    let naive_midnight = NaiveDateTime::new(reference.date_naive(), NaiveTime::MIN);
    let start = resolve_local(&reference.timezone(), naive_midnight).timestamp();
    ExportWindow {
        start_timestamp: start,
        end_timestamp: start + EXPORT_WINDOW_SECONDS,
    }
}

/// Map a naive local time to an instant, probing forward across any
/// forward-transition gap (offset changes are at most a few hours).
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut probe = naive;
    for _ in 0..=8 {
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt;
        }
        probe += Duration::minutes(30);
    }
    // No real timezone has a gap this wide; read the naive time as UTC.
    tz.from_utc_datetime(&naive)
}
