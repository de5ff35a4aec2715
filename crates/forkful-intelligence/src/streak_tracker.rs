// ABOUTME: Daily activity streak as an explicit state machine
// ABOUTME: StreakState, StreakOutcome and the on_activity transition function
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Streak Tracker
//!
//! A streak counts consecutive calendar days with at least one logged meal.
//! The transition takes the prior state and the activity's calendar date and
//! returns the next state; callers persist the result. Once any activity has
//! been seen the state never returns to `NoActivity`.

use chrono::NaiveDate;
use forkful_core::models::GamificationState;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Streak state of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StreakState {
    /// Nothing logged yet
    NoActivity,
    /// `count >= 1` consecutive days ending at `last_activity`
    Active {
        /// Consecutive days
        count: u32,
        /// Date of the most recent activity
        last_activity: NaiveDate,
    },
}

/// How a transition changed the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// First activity ever
    Started,
    /// Activity on the day after the last one
    Continued,
    /// Another activity on the same day
    Unchanged,
    /// Gap of more than one day; counting restarts at 1
    Reset,
}

impl StreakState {
    /// State from the persisted `(streak_count, last_activity_date)` pair
    ///
    /// A stored date with a zero count is read as a one-day streak.
    #[must_use]
    pub const fn from_persisted(streak_count: u32, last_activity: Option<NaiveDate>) -> Self {
        match last_activity {
            None => Self::NoActivity,
            Some(last_activity) => Self::Active {
                count: if streak_count == 0 { 1 } else { streak_count },
                last_activity,
            },
        }
    }

    /// State stored in a profile's gamification block
    #[must_use]
    pub const fn from_gamification(state: &GamificationState) -> Self {
        Self::from_persisted(state.streak_count, state.last_activity_date)
    }

    /// Persisted `(streak_count, last_activity_date)` pair
    #[must_use]
    pub const fn to_persisted(self) -> (u32, Option<NaiveDate>) {
        match self {
            Self::NoActivity => (0, None),
            Self::Active {
                count,
                last_activity,
            } => (count, Some(last_activity)),
        }
    }

    /// Stored count, regardless of how old the last activity is
    #[must_use]
    pub const fn count(self) -> u32 {
        match self {
            Self::NoActivity => 0,
            Self::Active { count, .. } => count,
        }
    }

    /// Streak as displayed on `today`: 0 once more than a day has passed
    #[must_use]
    pub fn current_count(self, today: NaiveDate) -> u32 {
        match self {
            Self::NoActivity => 0,
            Self::Active {
                count,
                last_activity,
            } => {
                if (today - last_activity).num_days() <= 1 {
                    count
                } else {
                    0
                }
            }
        }
    }

    /// Apply one activity on `today`
    ///
    /// Same-day activity is idempotent. An activity dated before the last
    /// one (a late write or clock skew) leaves the state untouched.
    #[must_use]
    pub fn on_activity(self, today: NaiveDate) -> (Self, StreakOutcome) {
        match self {
            Self::NoActivity => (
                Self::Active {
                    count: 1,
                    last_activity: today,
                },
                StreakOutcome::Started,
            ),
            Self::Active {
                count,
                last_activity,
            } => {
                let gap = (today - last_activity).num_days();
                let (count, outcome) = match gap {
                    ..=-1 => {
                        warn!(
                            %today,
                            %last_activity,
                            "Activity dated before last activity, keeping streak"
                        );
                        return (self, StreakOutcome::Unchanged);
                    }
                    0 => return (self, StreakOutcome::Unchanged),
                    1 => (count.saturating_add(1), StreakOutcome::Continued),
                    _ => (1, StreakOutcome::Reset),
                };
                (
                    Self::Active {
                        count,
                        last_activity: today,
                    },
                    outcome,
                )
            }
        }
    }
}

/// Apply one activity to a profile's gamification block in place
pub fn record_activity(state: &mut GamificationState, today: NaiveDate) -> StreakOutcome {
    let (next, outcome) = StreakState::from_gamification(state).on_activity(today);
    let (count, last) = next.to_persisted();
    state.streak_count = count;
    state.last_activity_date = last;
    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn test_persisted_round_trip() {
        let state = StreakState::Active {
            count: 4,
            last_activity: day(10),
        };
        let (count, last) = state.to_persisted();
        assert_eq!(StreakState::from_persisted(count, last), state);
        assert_eq!(StreakState::from_persisted(9, None), StreakState::NoActivity);
    }

    #[test]
    fn test_displayed_count_lapses_after_gap() {
        let state = StreakState::Active {
            count: 5,
            last_activity: day(10),
        };
        assert_eq!(state.current_count(day(10)), 5);
        assert_eq!(state.current_count(day(11)), 5);
        assert_eq!(state.current_count(day(12)), 0);
    }

    #[test]
    fn test_record_activity_updates_block() {
        let mut block = GamificationState::default();
        assert_eq!(record_activity(&mut block, day(1)), StreakOutcome::Started);
        assert_eq!(record_activity(&mut block, day(2)), StreakOutcome::Continued);
        assert_eq!(block.streak_count, 2);
        assert_eq!(block.last_activity_date, Some(day(2)));
    }

    #[test]
    fn test_late_write_keeps_block() {
        let mut block = GamificationState::default();
        for d in 1..=6 {
            let _ = record_activity(&mut block, day(d));
        }
        assert_eq!(record_activity(&mut block, day(5)), StreakOutcome::Unchanged);
        assert_eq!(block.streak_count, 6);
        assert_eq!(block.last_activity_date, Some(day(6)));
        assert_eq!(record_activity(&mut block, day(7)), StreakOutcome::Continued);
        assert_eq!(block.streak_count, 7);
    }
}
