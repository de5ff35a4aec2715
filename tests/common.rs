// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, fixed clock, in-memory store and profile/meal fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `forkful_server`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use forkful_server::clock::{FixedClock, ReferenceTimeZone};
use forkful_server::config::{IntelligenceConfig, ServerConfig};
use forkful_server::database_plugins::InMemoryStore;
use forkful_server::models::{
    ActivityLevel, Gender, MealRecord, MealType, NewMeal, NutritionGoal, ProfileUpdate,
};
use forkful_server::services::{ProfileService, ServiceContext};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Tuesday 2025-06-10 12:00 UTC
pub fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Everything a service test needs, wired to a controllable clock
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        init_test_logging();
        let clock = Arc::new(FixedClock::new(base_instant()));
        let store = Arc::new(InMemoryStore::new());
        let ctx = ServiceContext::new(
            store.clone(),
            clock.clone(),
            config,
            IntelligenceConfig::default(),
        );
        Self { ctx, clock, store }
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.clock.advance(Duration::days(days));
    }

    /// Register a user whose profile has every input of the calorie formula
    pub async fn register_complete_user(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        ProfileService::new(self.ctx.clone())
            .register_profile(user_id, "Ana", complete_profile_update())
            .await
            .unwrap();
        user_id
    }

    /// Register a user with only a name
    pub async fn register_bare_user(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        ProfileService::new(self.ctx.clone())
            .register_profile(user_id, "Bruno", ProfileUpdate::default())
            .await
            .unwrap();
        user_id
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// 70.5 kg, 175 cm, 22 years, male, moderate, healthy eating
pub fn complete_profile_update() -> ProfileUpdate {
    ProfileUpdate {
        name: None,
        weight_kg: Some(70.5),
        height_cm: Some(175.0),
        age_years: Some(22),
        gender: Some(Gender::Male),
        activity_level: Some(ActivityLevel::Moderate),
        goal: Some(NutritionGoal::HealthyEating),
    }
}

pub fn new_meal(food_name: &str, calories: f64) -> NewMeal {
    NewMeal {
        meal_type: MealType::Lunch,
        food_name: food_name.to_owned(),
        calories,
        carbs_g: Some(10.0),
        protein_g: Some(5.0),
        fat_g: Some(2.0),
        portion_label: "1 prato".to_owned(),
    }
}

/// A meal record logged at `logged_at` (UTC reference zone)
pub fn record_at(user_id: Uuid, logged_at: DateTime<Utc>, calories: f64) -> MealRecord {
    MealRecord::from_new_meal(
        Uuid::new_v4(),
        user_id,
        new_meal("Arroz com feijão", calories),
        logged_at,
        ReferenceTimeZone::UTC,
    )
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
