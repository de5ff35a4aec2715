// ABOUTME: Meal plan generation configuration
// ABOUTME: Configures plan length, per-slot draw sizes and informational calorie shares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use super::error::ConfigError;
use forkful_core::constants::tracking::MEAL_PLAN_DAYS;
use serde::{Deserialize, Serialize};

/// Meal plan generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlanConfig {
    /// Number of days per plan (always one week)
    pub days: u32,
    /// Items drawn per slot
    pub draws: SlotDraws,
    /// Percentage of the daily target assigned to each slot
    pub shares: SlotShares,
    /// Prefix of day labels ("Dia 1")
    pub day_label_prefix: String,
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            days: MEAL_PLAN_DAYS,
            draws: SlotDraws::default(),
            shares: SlotShares::default(),
            day_label_prefix: "Dia".to_owned(),
        }
    }
}

/// Draw sizes without replacement per slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotDraws {
    /// Breakfast items (3)
    pub breakfast: usize,
    /// Lunch items (4)
    pub lunch: usize,
    /// Dinner items (3)
    pub dinner: usize,
    /// Snack items (2)
    pub snack: usize,
}

impl Default for SlotDraws {
    fn default() -> Self {
        Self {
            breakfast: 3,
            lunch: 4,
            dinner: 3,
            snack: 2,
        }
    }
}

/// Slot calorie shares in percent; must sum to 100
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotShares {
    /// Breakfast share (30%)
    pub breakfast_pct: u8,
    /// Lunch share (35%)
    pub lunch_pct: u8,
    /// Dinner share (25%)
    pub dinner_pct: u8,
    /// Snack share (10%)
    pub snack_pct: u8,
}

impl Default for SlotShares {
    fn default() -> Self {
        Self {
            breakfast_pct: 30,
            lunch_pct: 35,
            dinner_pct: 25,
            snack_pct: 10,
        }
    }
}

impl SlotShares {
    /// Validate that the four shares sum to 100%
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` when they don't
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = u32::from(self.breakfast_pct)
            + u32::from(self.lunch_pct)
            + u32::from(self.dinner_pct)
            + u32::from(self.snack_pct);
        if sum != 100 {
            return Err(ConfigError::InvalidWeights(
                "Meal slot shares must sum to 100%",
            ));
        }
        Ok(())
    }
}

impl MealPlanConfig {
    /// Validate plan length and shares
    ///
    /// # Errors
    ///
    /// Returns an error when the plan is not one week long or the shares are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days != MEAL_PLAN_DAYS {
            return Err(ConfigError::ValueOutOfRange("Meal plans always span 7 days"));
        }
        self.shares.validate()
    }
}
