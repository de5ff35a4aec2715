// ABOUTME: Persistence abstraction for profiles, meals, water logs, goals and plans
// ABOUTME: NutritionStore trait with conditional writes plus the in-memory backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Persistence collaborator.
//!
//! Every per-user counter is updated through a conditional write keyed on
//! the record's `version`: a write whose expected version no longer matches
//! fails with `ErrorCode::ConcurrencyConflict` and the caller re-reads and
//! retries. Writes to different users never contend.

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use forkful_core::models::{FoodCatalogEntry, Goal, MealPlan, MealRecord, Profile, WaterLog};
use forkful_intelligence::DateRange;
use uuid::Uuid;

pub mod memory;

pub use memory::InMemoryStore;

/// Storage operations the services depend on
///
/// Implementations must be strongly consistent per user.
#[async_trait]
pub trait NutritionStore: Send + Sync {
    // ================================
    // Profiles
    // ================================

    /// Load a user's profile
    async fn load_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Insert a new profile; fails with `ResourceAlreadyExists` if one exists
    async fn create_profile(&self, profile: &Profile) -> AppResult<()>;

    /// Replace a profile if its stored version equals `expected_version`
    ///
    /// Returns the stored profile with its version bumped.
    async fn save_profile(&self, profile: &Profile, expected_version: u64) -> AppResult<Profile>;

    // ================================
    // Meals
    // ================================

    /// Append an immutable meal record
    async fn append_meal(&self, meal: &MealRecord) -> AppResult<()>;

    /// Meals of a user logged within `range`, oldest first
    async fn query_meals(&self, user_id: Uuid, range: &DateRange) -> AppResult<Vec<MealRecord>>;

    /// Total meals ever logged by a user
    async fn count_meals(&self, user_id: Uuid) -> AppResult<u64>;

    // ================================
    // Water
    // ================================

    /// Water log of one user and day
    async fn load_water_log(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WaterLog>>;

    /// Insert (`expected_version = None`) or conditionally replace a water log
    ///
    /// Returns the stored log.
    async fn upsert_water_log(
        &self,
        log: &WaterLog,
        expected_version: Option<u64>,
    ) -> AppResult<WaterLog>;

    // ================================
    // Goals
    // ================================

    /// All goals of a user, oldest first
    async fn load_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>>;

    /// One goal of a user
    async fn load_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<Option<Goal>>;

    /// Insert a new goal
    async fn insert_goal(&self, goal: &Goal) -> AppResult<()>;

    /// Complete a goal that is still open
    ///
    /// The open check and the write are one atomic step. Returns the stored
    /// goal and whether this call completed it, or `None` for an unknown goal.
    async fn complete_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Option<(Goal, bool)>>;

    // ================================
    // Catalog and meal plans
    // ================================

    /// Reference food catalog
    async fn load_catalog(&self) -> AppResult<Vec<FoodCatalogEntry>>;

    /// Store a plan and deactivate the user's previous plans
    async fn save_meal_plan(&self, plan: &MealPlan) -> AppResult<()>;

    /// Plans of a user, newest first
    async fn load_meal_plans(&self, user_id: Uuid) -> AppResult<Vec<MealPlan>>;
}
