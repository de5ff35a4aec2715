// ABOUTME: Nutrition tracking models for logged meals and water intake
// ABOUTME: MealType, NewMeal, MealRecord, MacroTotals and WaterLog definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::ReferenceTimeZone;
use crate::errors::{AppError, AppResult};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Case-insensitive parse
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" => Some(Self::Snack),
            _ => None,
        }
    }
}

/// Inbound "meal logged" event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeal {
    /// Meal slot
    pub meal_type: MealType,
    /// Food description
    pub food_name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs_g: Option<f64>,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: Option<f64>,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: Option<f64>,
    /// Free-form portion ("1 prato", "200g")
    #[serde(default)]
    pub portion_label: String,
}

impl NewMeal {
    /// Validate the payload before it reaches the core
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or negative/non-finite amounts
    pub fn validate(&self) -> AppResult<()> {
        if self.food_name.trim().is_empty() {
            return Err(AppError::missing_field("food_name"));
        }
        if !self.calories.is_finite() || self.calories < 0.0 {
            return Err(AppError::out_of_range(
                "Calories must be a non-negative number",
            ));
        }
        for (field, value) in [
            ("carbs_g", self.carbs_g),
            ("protein_g", self.protein_g),
            ("fat_g", self.fat_g),
        ] {
            if let Some(grams) = value {
                if !grams.is_finite() || grams < 0.0 {
                    return Err(AppError::out_of_range(format!(
                        "{field} must be a non-negative number"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A persisted meal; immutable once created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecord {
    /// Meal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Meal slot
    pub meal_type: MealType,
    /// Food description
    pub food_name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Free-form portion label
    pub portion_label: String,
    /// Instant the meal was logged
    pub logged_at: DateTime<Utc>,
    /// Calendar date of `logged_at` in the reference zone
    pub log_date: NaiveDate,
}

impl MealRecord {
    /// Build the record for a meal event observed at `logged_at`
    #[must_use]
    pub fn from_new_meal(
        id: Uuid,
        user_id: Uuid,
        meal: NewMeal,
        logged_at: DateTime<Utc>,
        tz: ReferenceTimeZone,
    ) -> Self {
        Self {
            id,
            user_id,
            meal_type: meal.meal_type,
            food_name: meal.food_name,
            calories: meal.calories,
            carbs_g: meal.carbs_g,
            protein_g: meal.protein_g,
            fat_g: meal.fat_g,
            portion_label: meal.portion_label,
            logged_at,
            log_date: tz.local_date(logged_at),
        }
    }

    /// Macro contribution of this meal; missing fields count as zero
    #[must_use]
    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            carbs_g: self.carbs_g.unwrap_or(0.0),
            protein_g: self.protein_g.unwrap_or(0.0),
            fat_g: self.fat_g.unwrap_or(0.0),
        }
    }
}

/// Calories and macro grams
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroTotals {
    /// Energy in kcal
    pub calories: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

impl MacroTotals {
    /// Accumulate `other` into `self`
    pub fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.carbs_g += other.carbs_g;
        self.protein_g += other.protein_g;
        self.fat_g += other.fat_g;
    }

    /// Copy with each value rounded to `decimals` places
    #[must_use]
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            calories: round_to(self.calories, decimals),
            carbs_g: round_to(self.carbs_g, decimals),
            protein_g: round_to(self.protein_g, decimals),
            fat_g: round_to(self.fat_g, decimals),
        }
    }
}

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Per-day water counter; one row per (user, date)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterLog {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date in the reference zone
    pub date: NaiveDate,
    /// Glasses drunk so far; only ever incremented
    pub glasses_count: u32,
    /// Optimistic concurrency version
    pub version: u64,
    /// Last increment timestamp
    pub updated_at: DateTime<Utc>,
}

impl WaterLog {
    /// First log of the day
    #[must_use]
    pub const fn first(user_id: Uuid, date: NaiveDate, glasses: u32, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            date,
            glasses_count: glasses,
            version: 0,
            updated_at: now,
        }
    }

    /// Copy with `glasses` more glasses
    #[must_use]
    pub fn incremented(&self, glasses: u32, now: DateTime<Utc>) -> Self {
        Self {
            glasses_count: self.glasses_count.saturating_add(glasses),
            updated_at: now,
            ..self.clone()
        }
    }
}
