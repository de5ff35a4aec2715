// ABOUTME: In-memory NutritionStore backed by sharded concurrent maps
// ABOUTME: Per-key compare-and-set for profiles and water logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use super::NutritionStore;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use forkful_core::models::{FoodCatalogEntry, Goal, MealPlan, MealRecord, Profile, WaterLog};
use forkful_intelligence::{default_catalog, DateRange};
use tracing::debug;
use uuid::Uuid;

/// Volatile store for tests, the CLI and single-process deployments
#[derive(Debug)]
pub struct InMemoryStore {
    profiles: DashMap<Uuid, Profile>,
    meals: DashMap<Uuid, Vec<MealRecord>>,
    water_logs: DashMap<(Uuid, NaiveDate), WaterLog>,
    goals: DashMap<Uuid, Vec<Goal>>,
    meal_plans: DashMap<Uuid, Vec<MealPlan>>,
    catalog: Vec<FoodCatalogEntry>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Empty store with the built-in food catalog
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Empty store with a custom catalog
    #[must_use]
    pub fn with_catalog(catalog: Vec<FoodCatalogEntry>) -> Self {
        Self {
            profiles: DashMap::new(),
            meals: DashMap::new(),
            water_logs: DashMap::new(),
            goals: DashMap::new(),
            meal_plans: DashMap::new(),
            catalog,
        }
    }
}

#[async_trait]
impl NutritionStore for InMemoryStore {
    async fn load_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().clone()))
    }

    async fn create_profile(&self, profile: &Profile) -> AppResult<()> {
        match self.profiles.entry(profile.user_id) {
            Entry::Occupied(_) => Err(AppError::already_exists("Profile")
                .with_user_id(profile.user_id)),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(())
            }
        }
    }

    async fn save_profile(&self, profile: &Profile, expected_version: u64) -> AppResult<Profile> {
        let mut stored = self
            .profiles
            .get_mut(&profile.user_id)
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(profile.user_id))?;

        if stored.version != expected_version {
            debug!(
                user_id = %profile.user_id,
                expected_version,
                actual_version = stored.version,
                "Profile version mismatch"
            );
            return Err(
                AppError::concurrency_conflict("Profile", expected_version, stored.version)
                    .with_user_id(profile.user_id),
            );
        }

        let mut next = profile.clone();
        next.version = expected_version + 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn append_meal(&self, meal: &MealRecord) -> AppResult<()> {
        let mut meals = self.meals.entry(meal.user_id).or_default();
        if meals.iter().any(|m| m.id == meal.id) {
            return Err(AppError::already_exists("Meal").with_resource_id(meal.id.to_string()));
        }
        meals.push(meal.clone());
        Ok(())
    }

    async fn query_meals(&self, user_id: Uuid, range: &DateRange) -> AppResult<Vec<MealRecord>> {
        let mut found: Vec<MealRecord> = self
            .meals
            .get(&user_id)
            .map(|meals| {
                meals
                    .iter()
                    .filter(|m| range.contains(m.logged_at))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        found.sort_by_key(|m| m.logged_at);
        Ok(found)
    }

    async fn count_meals(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .meals
            .get(&user_id)
            .map_or(0, |meals| meals.len() as u64))
    }

    async fn load_water_log(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WaterLog>> {
        Ok(self
            .water_logs
            .get(&(user_id, date))
            .map(|log| log.value().clone()))
    }

    async fn upsert_water_log(
        &self,
        log: &WaterLog,
        expected_version: Option<u64>,
    ) -> AppResult<WaterLog> {
        match (self.water_logs.entry((log.user_id, log.date)), expected_version) {
            (Entry::Vacant(slot), None) => {
                slot.insert(log.clone());
                Ok(log.clone())
            }
            (Entry::Vacant(_), Some(_)) => Err(AppError::not_found("Water log")
                .with_user_id(log.user_id)
                .with_resource_id(log.date.to_string())),
            (Entry::Occupied(slot), None) => Err(AppError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Water log for {} was created concurrently", log.date),
            )
            .with_user_id(log.user_id)
            .with_details(serde_json::json!({ "actual_version": slot.get().version }))),
            (Entry::Occupied(mut slot), Some(expected)) => {
                let actual = slot.get().version;
                if actual != expected {
                    return Err(AppError::concurrency_conflict("Water log", expected, actual)
                        .with_user_id(log.user_id));
                }
                let mut next = log.clone();
                next.version = expected + 1;
                slot.insert(next.clone());
                Ok(next)
            }
        }
    }

    async fn load_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        Ok(self
            .goals
            .get(&user_id)
            .map(|goals| goals.value().clone())
            .unwrap_or_default())
    }

    async fn load_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<Option<Goal>> {
        Ok(self
            .goals
            .get(&user_id)
            .and_then(|goals| goals.iter().find(|g| g.id == goal_id).cloned()))
    }

    async fn insert_goal(&self, goal: &Goal) -> AppResult<()> {
        let mut goals = self.goals.entry(goal.user_id).or_default();
        if goals.iter().any(|g| g.id == goal.id) {
            return Err(AppError::already_exists("Goal").with_resource_id(goal.id.to_string()));
        }
        goals.push(goal.clone());
        Ok(())
    }

    async fn complete_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Option<(Goal, bool)>> {
        let Some(mut goals) = self.goals.get_mut(&user_id) else {
            return Ok(None);
        };
        Ok(goals.iter_mut().find(|g| g.id == goal_id).map(|goal| {
            let completed_now = goal.complete(completed_at);
            (goal.clone(), completed_now)
        }))
    }

    async fn load_catalog(&self) -> AppResult<Vec<FoodCatalogEntry>> {
        Ok(self.catalog.clone())
    }

    async fn save_meal_plan(&self, plan: &MealPlan) -> AppResult<()> {
        let mut plans = self.meal_plans.entry(plan.user_id).or_default();
        for previous in plans.iter_mut() {
            previous.active = false;
        }
        plans.push(plan.clone());
        Ok(())
    }

    async fn load_meal_plans(&self, user_id: Uuid) -> AppResult<Vec<MealPlan>> {
        let mut plans = self
            .meal_plans
            .get(&user_id)
            .map(|plans| plans.value().clone())
            .unwrap_or_default();
        plans.reverse();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }
}
