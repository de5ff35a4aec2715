// ABOUTME: User physiological profile with embedded gamification state
// ABOUTME: Gender, ActivityLevel, NutritionGoal, BadgeId, Profile and ProfileUpdate definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Gender used by the BMR formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (+5 kcal constant)
    Male,
    /// Female (-161 kcal constant)
    Female,
    /// Other / undisclosed; takes the non-male branch
    Other,
}

impl Gender {
    /// Case-insensitive parse; anything unrecognized is `Other`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    Light,
    /// 3-5 days/week
    Moderate,
    /// 6-7 days/week
    Active,
    /// Hard training or physical job
    VeryActive,
}

impl ActivityLevel {
    /// Case-insensitive parse; `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Some(Self::Sedentary),
            "light" => Some(Self::Light),
            "moderate" => Some(Self::Moderate),
            "active" => Some(Self::Active),
            "very_active" => Some(Self::VeryActive),
            _ => None,
        }
    }
}

/// Dietary goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NutritionGoal {
    /// Caloric deficit
    LoseWeight,
    /// Caloric surplus
    GainWeight,
    /// Maintenance
    #[default]
    HealthyEating,
}

impl NutritionGoal {
    /// Case-insensitive parse; anything unrecognized is `HealthyEating`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lose_weight" => Self::LoseWeight,
            "gain_weight" => Self::GainWeight,
            _ => Self::HealthyEating,
        }
    }
}

/// Achievement identifiers
///
/// Variant order is the order of the threshold table and of the badge board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    /// First meal logged
    FirstMeal,
    /// Ten meals logged
    TenMeals,
    /// Fifty meals logged
    FiftyMeals,
    /// Seven consecutive days
    WeekStreak,
    /// Thirty consecutive days
    MonthStreak,
}

impl BadgeId {
    /// Every badge, in table order
    pub const ALL: [Self; 5] = [
        Self::FirstMeal,
        Self::TenMeals,
        Self::FiftyMeals,
        Self::WeekStreak,
        Self::MonthStreak,
    ];

    /// Stable string identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstMeal => "first_meal",
            Self::TenMeals => "ten_meals",
            Self::FiftyMeals => "fifty_meals",
            Self::WeekStreak => "week_streak",
            Self::MonthStreak => "month_streak",
        }
    }
}

/// Streak counter, last activity date and earned badges
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GamificationState {
    /// Consecutive active days as of `last_activity_date`
    pub streak_count: u32,
    /// Calendar date (reference zone) of the most recent activity
    pub last_activity_date: Option<NaiveDate>,
    /// Earned badges in earn order; append-only
    pub badges: Vec<BadgeId>,
}

/// A user's physiological profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Age in years
    pub age_years: Option<u32>,
    /// Gender for BMR
    pub gender: Option<Gender>,
    /// Activity level; `None` uses the fallback multiplier
    pub activity_level: Option<ActivityLevel>,
    /// Dietary goal
    pub goal: NutritionGoal,
    /// Derived target; `None` until weight, height, age and gender are all set
    pub daily_calorie_target: Option<f64>,
    /// Embedded gamification counters
    pub gamification: GamificationState,
    /// Optimistic concurrency version, bumped on every successful save
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// New empty profile; activity level defaults to moderate
    #[must_use]
    pub fn new(user_id: Uuid, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name: name.into(),
            weight_kg: None,
            height_cm: None,
            age_years: None,
            gender: None,
            activity_level: Some(ActivityLevel::Moderate),
            goal: NutritionGoal::HealthyEating,
            daily_calorie_target: None,
            gamification: GamificationState::default(),
            version: 0,
            created_at: now,
        }
    }

    /// True when every input the calorie formula needs is present
    #[must_use]
    pub const fn has_physiological_inputs(&self) -> bool {
        self.weight_kg.is_some()
            && self.height_cm.is_some()
            && self.age_years.is_some()
            && self.gender.is_some()
    }
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New weight (kg)
    pub weight_kg: Option<f64>,
    /// New height (cm)
    pub height_cm: Option<f64>,
    /// New age (years)
    pub age_years: Option<u32>,
    /// New gender
    pub gender: Option<Gender>,
    /// New activity level
    pub activity_level: Option<ActivityLevel>,
    /// New goal
    pub goal: Option<NutritionGoal>,
}

impl ProfileUpdate {
    /// Reject physiologically meaningless values before they reach the calculator
    ///
    /// # Errors
    ///
    /// Returns a validation error when weight, height or age is out of range
    pub fn validate(&self) -> AppResult<()> {
        if let Some(weight) = self.weight_kg {
            if !weight.is_finite() || weight <= 0.0 || weight > 300.0 {
                return Err(AppError::out_of_range(
                    "Weight must be between 0 and 300 kg",
                ));
            }
        }
        if let Some(height) = self.height_cm {
            if !height.is_finite() || height <= 0.0 || height > 300.0 {
                return Err(AppError::out_of_range(
                    "Height must be between 0 and 300 cm",
                ));
            }
        }
        if let Some(age) = self.age_years {
            if !(1..=120).contains(&age) {
                return Err(AppError::out_of_range(
                    "Age must be between 1 and 120 years",
                ));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_input("Name cannot be empty"));
            }
        }
        Ok(())
    }

    /// True when the update touches an input of the calorie formula
    #[must_use]
    pub const fn touches_target_inputs(&self) -> bool {
        self.weight_kg.is_some()
            || self.height_cm.is_some()
            || self.age_years.is_some()
            || self.gender.is_some()
            || self.activity_level.is_some()
            || self.goal.is_some()
    }

    /// Copy the present fields onto `profile`
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name.clone_from(name);
        }
        if self.weight_kg.is_some() {
            profile.weight_kg = self.weight_kg;
        }
        if self.height_cm.is_some() {
            profile.height_cm = self.height_cm;
        }
        if self.age_years.is_some() {
            profile.age_years = self.age_years;
        }
        if self.gender.is_some() {
            profile.gender = self.gender;
        }
        if self.activity_level.is_some() {
            profile.activity_level = self.activity_level;
        }
        if let Some(goal) = self.goal {
            profile.goal = goal;
        }
    }
}
