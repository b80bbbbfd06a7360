// src/cache/freshness.rs

use std::{fs, path::Path};

use chrono::{DateTime, Duration, Local, TimeZone};
use tracing::debug;

use crate::error::{Error, Result};

/// True when `last_modified` is at or before `now - max_age_days`.
///
/// A cutoff earlier than the oldest representable time means nothing is stale.
pub fn is_outdated_at<Tz: TimeZone>(
    last_modified: &DateTime<Tz>,
    max_age_days: u32,
    now: &DateTime<Tz>,
) -> bool {
    Duration::try_days(i64::from(max_age_days))
        .and_then(|age| now.clone().checked_sub_signed(age))
        .map(|cutoff| *last_modified <= cutoff)
        .unwrap_or(false)
}

/// [`is_outdated_at`] against the current local time.
pub fn is_outdated(last_modified: &DateTime<Local>, max_age_days: u32) -> bool {
    is_outdated_at(last_modified, max_age_days, &Local::now())
}

/// Check a file's mtime. The file must exist; a missing file is an error, not "outdated".
pub fn file_is_outdated(path: &Path, max_age_days: u32) -> Result<bool> {
    debug!(path = %path.display(), days = max_age_days, "checking recency");
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| Error::fs(path, e))?;
    Ok(is_outdated(&DateTime::<Local>::from(modified), max_age_days))
}
