// ABOUTME: Badge threshold configuration
// ABOUTME: Meal-count and streak-length thresholds for each badge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use super::error::ConfigError;
use forkful_core::models::BadgeId;
use serde::{Deserialize, Serialize};

/// Counter a badge threshold applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCounter {
    /// Total meals logged
    Meals,
    /// Current streak length in days
    StreakDays,
}

/// Badge threshold table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GamificationConfig {
    /// Meals for `first_meal` (1)
    pub first_meal_count: u64,
    /// Meals for `ten_meals` (10)
    pub ten_meals_count: u64,
    /// Meals for `fifty_meals` (50)
    pub fifty_meals_count: u64,
    /// Streak days for `week_streak` (7)
    pub week_streak_days: u64,
    /// Streak days for `month_streak` (30)
    pub month_streak_days: u64,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            first_meal_count: 1,
            ten_meals_count: 10,
            fifty_meals_count: 50,
            week_streak_days: 7,
            month_streak_days: 30,
        }
    }
}

impl GamificationConfig {
    /// Which counter `badge` is checked against and its threshold
    #[must_use]
    pub const fn threshold(&self, badge: BadgeId) -> (BadgeCounter, u64) {
        match badge {
            BadgeId::FirstMeal => (BadgeCounter::Meals, self.first_meal_count),
            BadgeId::TenMeals => (BadgeCounter::Meals, self.ten_meals_count),
            BadgeId::FiftyMeals => (BadgeCounter::Meals, self.fifty_meals_count),
            BadgeId::WeekStreak => (BadgeCounter::StreakDays, self.week_streak_days),
            BadgeId::MonthStreak => (BadgeCounter::StreakDays, self.month_streak_days),
        }
    }

    /// Validate that thresholds are positive and ascending
    ///
    /// # Errors
    ///
    /// Returns an error for zero or unordered thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_meal_count == 0 || self.week_streak_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Badge thresholds must be at least 1",
            ));
        }
        if self.first_meal_count >= self.ten_meals_count
            || self.ten_meals_count >= self.fifty_meals_count
        {
            return Err(ConfigError::InvalidRange(
                "Meal badge thresholds must be ascending",
            ));
        }
        if self.week_streak_days >= self.month_streak_days {
            return Err(ConfigError::InvalidRange(
                "week_streak_days must be < month_streak_days",
            ));
        }
        Ok(())
    }
}
