// ABOUTME: Algorithm configuration container with environment overrides
// ABOUTME: Global IntelligenceConfig singleton, validation and env var parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Intelligence Configuration
//!
//! Every constant used by the calculator, plan generator and badge evaluator
//! lives here. Defaults reproduce the reference behavior; `FORKFUL_*`
//! environment variables may override individual values at startup.

/// Configuration error types
pub mod error;
/// Badge thresholds
pub mod gamification;
/// Meal plan generation
pub mod meal_plan;
/// Calorie target calculation
pub mod nutrition;

pub use error::ConfigError;
pub use gamification::{BadgeCounter, GamificationConfig};
pub use meal_plan::{MealPlanConfig, SlotDraws, SlotShares};
pub use nutrition::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, NutritionConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntelligenceConfig {
    /// Calorie target calculation
    pub nutrition: NutritionConfig,
    /// Meal plan generation
    pub meal_plan: MealPlanConfig,
    /// Badge thresholds
    pub gamification: GamificationConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_nutrition()?;
        self.meal_plan.validate()?;
        self.gamification.validate()
    }

    fn validate_nutrition(&self) -> Result<(), ConfigError> {
        let nutr = &self.nutrition;

        if nutr.bmr.msj_weight_coef <= 0.0 || nutr.bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let factors = &nutr.activity_factors;
        if factors.sedentary < 1.0 || factors.very_active > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.light
            || factors.light >= factors.moderate
            || factors.moderate >= factors.active
            || factors.active >= factors.very_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }
        if factors.fallback < factors.sedentary || factors.fallback > factors.very_active {
            return Err(ConfigError::ValueOutOfRange(
                "Fallback activity factor must lie within the activity factor range",
            ));
        }

        if nutr.goal_adjustment.lose_weight_deficit < 0.0
            || nutr.goal_adjustment.gain_weight_surplus < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Goal adjustments must be non-negative",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply `FORKFUL_*` environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when a set variable doesn't parse
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Calorie target overrides
        Self::apply_env_var(
            "FORKFUL_ACTIVITY_FALLBACK_FACTOR",
            &mut self.nutrition.activity_factors.fallback,
        )?;
        Self::apply_env_var(
            "FORKFUL_LOSE_WEIGHT_DEFICIT",
            &mut self.nutrition.goal_adjustment.lose_weight_deficit,
        )?;
        Self::apply_env_var(
            "FORKFUL_GAIN_WEIGHT_SURPLUS",
            &mut self.nutrition.goal_adjustment.gain_weight_surplus,
        )?;

        // Slot share overrides
        Self::apply_env_var(
            "FORKFUL_MEAL_PLAN_BREAKFAST_PCT",
            &mut self.meal_plan.shares.breakfast_pct,
        )?;
        Self::apply_env_var(
            "FORKFUL_MEAL_PLAN_LUNCH_PCT",
            &mut self.meal_plan.shares.lunch_pct,
        )?;
        Self::apply_env_var(
            "FORKFUL_MEAL_PLAN_DINNER_PCT",
            &mut self.meal_plan.shares.dinner_pct,
        )?;
        Self::apply_env_var(
            "FORKFUL_MEAL_PLAN_SNACK_PCT",
            &mut self.meal_plan.shares.snack_pct,
        )?;

        Ok(self)
    }
}
