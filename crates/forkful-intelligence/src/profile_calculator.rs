// ABOUTME: Daily calorie target from physiological inputs (Mifflin-St Jeor)
// ABOUTME: BMR, TDEE and goal adjustment as pure, always-succeeding functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Profile Calculator
//!
//! `bmr = 10*w + 6.25*h - 5*age + (5 | -161)`, scaled by the activity
//! multiplier and shifted by the goal offset. Inputs are validated upstream
//! (see `ProfileUpdate::validate`); nothing here fails or clamps.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, NutritionConfig};
use forkful_core::models::{ActivityLevel, Gender, NutritionGoal, Profile};
use serde::{Deserialize, Serialize};

/// Complete set of inputs for a daily target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTargetInputs {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: u32,
    /// Gender
    pub gender: Gender,
    /// Activity level; `None` uses the fallback multiplier
    pub activity_level: Option<ActivityLevel>,
    /// Dietary goal
    pub goal: NutritionGoal,
}

impl DailyTargetInputs {
    /// Extract inputs from a profile; `None` while any physiological field is unset
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Option<Self> {
        Some(Self {
            weight_kg: profile.weight_kg?,
            height_cm: profile.height_cm?,
            age_years: profile.age_years?,
            gender: profile.gender?,
            activity_level: profile.activity_level,
            goal: profile.goal,
        })
    }
}

/// Intermediate values of a target computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalorieBreakdown {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Activity multiplier applied
    pub activity_multiplier: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Goal-adjusted target (kcal/day)
    pub target: f64,
}

/// Mifflin-St Jeor basal metabolic rate
///
/// Every gender other than `Male` takes the female constant.
#[must_use]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age_years);

    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female | Gender::Other => config.msj_female_constant,
    };

    weight_component + height_component + age_component + gender_constant
}

/// BMR scaled by the activity multiplier
#[must_use]
pub fn calculate_tdee(
    bmr: f64,
    activity_level: Option<ActivityLevel>,
    config: &ActivityFactorsConfig,
) -> f64 {
    bmr * config.multiplier(activity_level)
}

/// TDEE shifted by the goal's deficit or surplus
#[must_use]
pub fn apply_goal_adjustment(tdee: f64, goal: NutritionGoal, config: &GoalAdjustmentConfig) -> f64 {
    match goal {
        NutritionGoal::LoseWeight => tdee - config.lose_weight_deficit,
        NutritionGoal::GainWeight => tdee + config.gain_weight_surplus,
        NutritionGoal::HealthyEating => tdee,
    }
}

/// BMR, TDEE and target for a complete input set
#[must_use]
pub fn compute_breakdown(inputs: &DailyTargetInputs, config: &NutritionConfig) -> CalorieBreakdown {
    let bmr = calculate_bmr(
        inputs.weight_kg,
        inputs.height_cm,
        inputs.age_years,
        inputs.gender,
        &config.bmr,
    );
    let activity_multiplier = config.activity_factors.multiplier(inputs.activity_level);
    let tdee = calculate_tdee(bmr, inputs.activity_level, &config.activity_factors);
    let target = apply_goal_adjustment(tdee, inputs.goal, &config.goal_adjustment);

    CalorieBreakdown {
        bmr,
        activity_multiplier,
        tdee,
        target,
    }
}

/// Daily calorie target for a complete input set
#[must_use]
pub fn compute_daily_target(inputs: &DailyTargetInputs, config: &NutritionConfig) -> f64 {
    compute_breakdown(inputs, config).target
}

/// Daily calorie target for a profile, `None` while the target is undefined
#[must_use]
pub fn target_for_profile(profile: &Profile, config: &NutritionConfig) -> Option<f64> {
    DailyTargetInputs::from_profile(profile).map(|inputs| compute_daily_target(&inputs, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_undefined_until_all_inputs_present() {
        let config = NutritionConfig::default();
        let mut profile = Profile::new(Uuid::new_v4(), "Ana", Utc::now());
        profile.weight_kg = Some(60.0);
        profile.height_cm = Some(165.0);
        profile.age_years = Some(30);
        assert_eq!(target_for_profile(&profile, &config), None);

        profile.gender = Some(Gender::Female);
        assert!(target_for_profile(&profile, &config).is_some());
    }

    #[test]
    fn test_other_gender_takes_female_constant() {
        let config = BmrConfig::default();
        let female = calculate_bmr(60.0, 165.0, 30, Gender::Female, &config);
        let other = calculate_bmr(60.0, 165.0, 30, Gender::Other, &config);
        assert!((female - other).abs() < f64::EPSILON);
    }
}
