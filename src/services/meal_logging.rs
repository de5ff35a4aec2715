// ABOUTME: Meal logging event flow: persist the record, then advance streak and badges
// ABOUTME: Gamification changes applied as one versioned read-modify-write on the profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use std::collections::BTreeSet;

use chrono::NaiveDate;
use forkful_core::models::{BadgeId, MealRecord, NewMeal};
use forkful_intelligence::{evaluate, merge_badges, record_activity, StreakOutcome};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::AppResult;

/// Result of a meal logging event
#[derive(Debug, Clone, Serialize)]
pub struct MealLogged {
    /// The stored record
    pub meal: MealRecord,
    /// Streak after the event
    pub streak: u32,
    /// How the streak moved
    pub outcome: StreakOutcome,
    /// Badges earned by this event, in table order
    pub new_badges: Vec<BadgeId>,
}

struct GamificationUpdate {
    streak: u32,
    outcome: StreakOutcome,
    new_badges: Vec<BadgeId>,
}

/// Meal logging
#[derive(Clone)]
pub struct MealLoggingService {
    ctx: ServiceContext,
}

impl MealLoggingService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a meal and update the user's streak and badges
    ///
    /// The record is appended exactly once; only the gamification update is retried.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload, `ResourceNotFound` when
    /// the user has no profile, or `ConcurrencyConflict` once retries are exhausted
    pub async fn log_meal(&self, user_id: Uuid, meal: NewMeal) -> AppResult<MealLogged> {
        meal.validate()?;
        self.ctx.require_profile(user_id).await?;

        let now = self.ctx.clock.now();
        let record = MealRecord::from_new_meal(Uuid::new_v4(), user_id, meal, now, self.ctx.tz());
        self.ctx.store.append_meal(&record).await?;

        let today = record.log_date;
        let update = self
            .ctx
            .retry_on_conflict(user_id, "log_meal", || self.apply_gamification(user_id, today))
            .await?;

        info!(
            %user_id,
            meal_id = %record.id,
            meal_type = ?record.meal_type,
            calories = record.calories,
            streak = update.streak,
            outcome = ?update.outcome,
            new_badges = ?update.new_badges,
            "Meal logged"
        );

        Ok(MealLogged {
            meal: record,
            streak: update.streak,
            outcome: update.outcome,
            new_badges: update.new_badges,
        })
    }

    async fn apply_gamification(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<GamificationUpdate> {
        let current = self.ctx.require_profile(user_id).await?;
        let expected_version = current.version;
        let meal_count = self.ctx.store.count_meals(user_id).await?;

        let mut next = current;
        let outcome = record_activity(&mut next.gamification, today);
        let streak = next.gamification.streak_count;

        let earned: BTreeSet<BadgeId> = next.gamification.badges.iter().copied().collect();
        let newly_earned = evaluate(
            meal_count,
            streak,
            &earned,
            &self.ctx.intelligence.gamification,
        );
        let new_badges = merge_badges(&mut next.gamification.badges, &newly_earned);

        self.ctx.store.save_profile(&next, expected_version).await?;

        Ok(GamificationUpdate {
            streak,
            outcome,
            new_badges,
        })
    }
}
