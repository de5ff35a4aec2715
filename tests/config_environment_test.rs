// ABOUTME: Unit tests for environment-driven server and algorithm configuration
// ABOUTME: Defaults, FORKFUL_* overrides, parse failures and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use forkful_server::clock::ReferenceTimeZone;
use forkful_server::config::{ConfigError, IntelligenceConfig, ServerConfig};
use serial_test::serial;

fn clear(keys: &[&str]) {
    for key in keys {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_server_defaults() {
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.tracking.reference_tz(), ReferenceTimeZone::UTC);
    assert_eq!(config.tracking.water_target_glasses, 8);
    assert_eq!(config.tracking.history_days, 7);
    assert_eq!(config.tracking.max_update_retries, 5);
    assert!(config.barcode.cache_capacity > 0);
}

#[test]
#[serial]
fn test_server_overrides() {
    env::set_var("FORKFUL_TZ_OFFSET_MINUTES", "-180");
    env::set_var("FORKFUL_WATER_TARGET_GLASSES", "10");
    env::set_var("FORKFUL_BARCODE_EXTERNAL_ENABLED", "false");
    env::set_var("VISION_API_KEY", "sk-test");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.tracking.tz_offset_minutes, -180);
    assert_eq!(
        config.tracking.reference_tz(),
        ReferenceTimeZone::from_offset_minutes(-180).unwrap()
    );
    assert_eq!(config.tracking.water_target_glasses, 10);
    assert!(!config.barcode.external_enabled);
    assert_eq!(config.food_recognition.api_key.as_deref(), Some("sk-test"));

    clear(&[
        "FORKFUL_TZ_OFFSET_MINUTES",
        "FORKFUL_WATER_TARGET_GLASSES",
        "FORKFUL_BARCODE_EXTERNAL_ENABLED",
        "VISION_API_KEY",
    ]);
}

#[test]
#[serial]
fn test_server_rejects_bad_values() {
    env::set_var("FORKFUL_TZ_OFFSET_MINUTES", "2000");
    assert!(ServerConfig::from_env().is_err());
    clear(&["FORKFUL_TZ_OFFSET_MINUTES"]);

    env::set_var("FORKFUL_HISTORY_DAYS", "a week");
    assert!(ServerConfig::from_env().is_err());
    clear(&["FORKFUL_HISTORY_DAYS"]);

    env::set_var("FORKFUL_MAX_UPDATE_RETRIES", "0");
    assert!(ServerConfig::from_env().is_err());
    clear(&["FORKFUL_MAX_UPDATE_RETRIES"]);
}

#[test]
#[serial]
fn test_intelligence_overrides() {
    env::set_var("FORKFUL_LOSE_WEIGHT_DEFICIT", "300");
    env::set_var("FORKFUL_MEAL_PLAN_LUNCH_PCT", "30");
    env::set_var("FORKFUL_MEAL_PLAN_SNACK_PCT", "15");

    let config = IntelligenceConfig::load().unwrap();

    assert!((config.nutrition.goal_adjustment.lose_weight_deficit - 300.0).abs() < f64::EPSILON);
    assert_eq!(config.meal_plan.shares.lunch_pct, 30);
    assert_eq!(config.meal_plan.shares.snack_pct, 15);

    clear(&[
        "FORKFUL_LOSE_WEIGHT_DEFICIT",
        "FORKFUL_MEAL_PLAN_LUNCH_PCT",
        "FORKFUL_MEAL_PLAN_SNACK_PCT",
    ]);
}

#[test]
#[serial]
fn test_plan_length_and_badge_table_ignore_environment() {
    env::set_var("FORKFUL_MEAL_PLAN_DAYS", "5");
    env::set_var("FORKFUL_BADGE_WEEK_STREAK_DAYS", "3");
    env::set_var("FORKFUL_BADGE_MONTH_STREAK_DAYS", "10");

    let config = IntelligenceConfig::load().unwrap();

    assert_eq!(config.meal_plan.days, 7);
    assert_eq!(config.gamification.week_streak_days, 7);
    assert_eq!(config.gamification.month_streak_days, 30);

    clear(&[
        "FORKFUL_MEAL_PLAN_DAYS",
        "FORKFUL_BADGE_WEEK_STREAK_DAYS",
        "FORKFUL_BADGE_MONTH_STREAK_DAYS",
    ]);
}

#[test]
#[serial]
fn test_intelligence_rejects_unparsable_override() {
    env::set_var("FORKFUL_MEAL_PLAN_LUNCH_PCT", "seven");
    assert!(matches!(IntelligenceConfig::load(), Err(ConfigError::Parse(_))));
    clear(&["FORKFUL_MEAL_PLAN_LUNCH_PCT"]);
}

#[test]
#[serial]
fn test_intelligence_rejects_shares_not_summing_to_hundred() {
    env::set_var("FORKFUL_MEAL_PLAN_SNACK_PCT", "25");
    assert!(matches!(
        IntelligenceConfig::load(),
        Err(ConfigError::InvalidWeights(_))
    ));
    clear(&["FORKFUL_MEAL_PLAN_SNACK_PCT"]);
}

#[test]
fn test_intelligence_defaults_match_reference_constants() {
    let config = IntelligenceConfig::default();

    assert!((config.nutrition.bmr.msj_weight_coef - 10.0).abs() < f64::EPSILON);
    assert!((config.nutrition.bmr.msj_height_coef - 6.25).abs() < f64::EPSILON);
    assert!((config.nutrition.activity_factors.fallback - 1.55).abs() < f64::EPSILON);
    assert_eq!(config.meal_plan.days, 7);
    assert_eq!(
        (
            config.meal_plan.shares.breakfast_pct,
            config.meal_plan.shares.lunch_pct,
            config.meal_plan.shares.dinner_pct,
            config.meal_plan.shares.snack_pct,
        ),
        (30, 35, 25, 10)
    );
    assert_eq!(config.gamification.month_streak_days, 30);
}
