// ABOUTME: Profile registration and partial updates with calorie target recalculation
// ABOUTME: Conditional saves keyed on the profile version with bounded retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use forkful_core::models::{Profile, ProfileUpdate};
use forkful_intelligence::target_for_profile;
use tracing::info;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::{AppError, AppResult};

/// Profile lifecycle
#[derive(Clone)]
pub struct ProfileService {
    ctx: ServiceContext,
}

impl ProfileService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a profile, optionally with initial physiological data
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad initial values or
    /// `ResourceAlreadyExists` if the user already has a profile
    pub async fn register_profile(
        &self,
        user_id: Uuid,
        name: &str,
        initial: ProfileUpdate,
    ) -> AppResult<Profile> {
        if name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        initial.validate()?;

        let mut profile = Profile::new(user_id, name.trim(), self.ctx.clock.now());
        initial.apply_to(&mut profile);
        profile.daily_calorie_target =
            target_for_profile(&profile, &self.ctx.intelligence.nutrition);

        self.ctx.store.create_profile(&profile).await?;
        info!(%user_id, target = ?profile.daily_calorie_target, "Profile registered");
        Ok(profile)
    }

    /// Load a profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.ctx.require_profile(user_id).await
    }

    /// Apply a partial update and recalculate the daily target
    ///
    /// # Errors
    ///
    /// Returns a validation error, `ResourceNotFound`, or `ConcurrencyConflict`
    /// when the retries are exhausted
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> AppResult<Profile> {
        update.validate()?;

        let saved = self
            .ctx
            .retry_on_conflict(user_id, "update_profile", || self.try_update(user_id, &update))
            .await?;

        info!(
            %user_id,
            version = saved.version,
            target = ?saved.daily_calorie_target,
            "Profile updated"
        );
        Ok(saved)
    }

    async fn try_update(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<Profile> {
        let current = self.ctx.require_profile(user_id).await?;
        let expected_version = current.version;

        let mut next = current;
        update.apply_to(&mut next);
        next.daily_calorie_target = target_for_profile(&next, &self.ctx.intelligence.nutrition);

        self.ctx.store.save_profile(&next, expected_version).await
    }

    /// Current daily target; `None` while the profile is incomplete
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    pub async fn daily_target(&self, user_id: Uuid) -> AppResult<Option<f64>> {
        Ok(self.ctx.require_profile(user_id).await?.daily_calorie_target)
    }
}
