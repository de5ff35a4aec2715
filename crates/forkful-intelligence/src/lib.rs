// ABOUTME: Nutrition intelligence algorithms for the Forkful tracker
// ABOUTME: Calorie targets, aggregation, streaks, badges and meal plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![deny(unsafe_code)]

//! # Forkful Intelligence
//!
//! The pure computation layer. Nothing in this crate performs I/O or reads
//! the wall clock: callers pass in fetched records, the reference date and,
//! for plan generation, a random source.
//!
//! ## Modules
//!
//! - **`profile_calculator`**: Mifflin-St Jeor daily calorie target
//! - **`nutrition_aggregator`**: totals and day/ISO-week buckets
//! - **`streak_tracker`**: consecutive-day streak state machine
//! - **`badge_evaluator`**: threshold table for achievement badges
//! - **`meal_plan_generator`**: weekly plan sampling from the catalog
//! - **config**: tunable constants with environment overrides

/// Algorithm configuration
pub mod config;

/// Built-in food catalog
pub mod catalog;

/// Daily calorie target calculation
pub mod profile_calculator;

/// Meal record aggregation
pub mod nutrition_aggregator;

/// Activity streak state machine
pub mod streak_tracker;

/// Badge evaluation
pub mod badge_evaluator;

/// Meal plan generation
pub mod meal_plan_generator;

pub use badge_evaluator::{
    badge_board, badge_catalog, badge_info, evaluate, merge_badges, BadgeInfo, BadgeStatus,
};
pub use catalog::{default_catalog, search_catalog};
pub use config::IntelligenceConfig;
pub use meal_plan_generator::generate;
pub use nutrition_aggregator::{
    aggregate, daily_summary, history_by_day, monthly_summary, weekly_summary, DailySummary,
    DateRange, DayBucket, HistoryDay, MonthlySummary, NutritionAggregate, WeekBucket,
    WeeklySummary,
};
pub use profile_calculator::{
    compute_breakdown, compute_daily_target, target_for_profile, CalorieBreakdown,
    DailyTargetInputs,
};
pub use streak_tracker::{record_activity, StreakOutcome, StreakState};
