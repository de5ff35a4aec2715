// ABOUTME: Injectable clock and reference time zone used by all date math
// ABOUTME: SystemClock for production, FixedClock for deterministic tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Time sources.
//!
//! Streak continuity and date bucketing never call the wall clock directly:
//! they receive `now` from a [`Clock`] and convert timestamps to calendar
//! dates through the server's [`ReferenceTimeZone`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually controlled clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Move the clock to `instant`
    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut guard) = self.instant.write() {
            *guard = instant;
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.instant.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
            .read()
            .map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
    }
}

/// The single time zone in which calendar dates are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTimeZone {
    offset_seconds: i32,
}

impl ReferenceTimeZone {
    /// UTC reference zone
    pub const UTC: Self = Self { offset_seconds: 0 };

    /// Build from an offset east of UTC, in minutes
    ///
    /// Returns `None` when the offset is not within +/- 24h.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let offset_seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(offset_seconds)?;
        Some(Self { offset_seconds })
    }

    /// Offset east of UTC in minutes
    #[must_use]
    pub const fn offset_minutes(&self) -> i32 {
        self.offset_seconds / 60
    }

    fn offset(self) -> FixedOffset {
        // Validated at construction
        FixedOffset::east_opt(self.offset_seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Calendar date of `instant` in this zone
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    /// First instant of `date` in this zone, as UTC
    ///
    /// Saturates at the earliest representable instant.
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::default());
        local
            .checked_sub_signed(Duration::seconds(i64::from(self.offset_seconds)))
            .map_or(DateTime::<Utc>::MIN_UTC, |naive| naive.and_utc())
    }

    /// Inclusive UTC bounds covering the whole of `date` in this zone
    #[must_use]
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start_of_day(date);
        let end = date
            .succ_opt()
            .map(|next| self.start_of_day(next))
            .and_then(|next| next.checked_sub_signed(Duration::nanoseconds(1)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (start, end)
    }
}

impl Default for ReferenceTimeZone {
    fn default() -> Self {
        Self::UTC
    }
}
