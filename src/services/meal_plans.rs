// ABOUTME: On-demand weekly meal plan generation from the profile target and food catalog
// ABOUTME: Injectable random source; production wiring uses thread-local entropy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use forkful_core::models::MealPlan;
use forkful_intelligence::generate;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::{AppError, AppResult};

/// Meal plans
#[derive(Clone)]
pub struct MealPlanService {
    ctx: ServiceContext,
}

impl MealPlanService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate and store a new active plan using thread-local entropy
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` while the profile has no calorie target
    pub async fn generate_plan(&self, user_id: Uuid) -> AppResult<MealPlan> {
        // ThreadRng is !Send; draw a seed up front so the future stays Send
        let seed: u64 = thread_rng().gen();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_plan_with(user_id, &mut rng).await
    }

    /// Generate and store a new active plan from `rng`
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` while the profile has no calorie target
    pub async fn generate_plan_with<R: Rng + Send + ?Sized>(
        &self,
        user_id: Uuid,
        rng: &mut R,
    ) -> AppResult<MealPlan> {
        let profile = self.ctx.require_profile(user_id).await?;
        let target = profile.daily_calorie_target.ok_or_else(|| {
            AppError::missing_field("daily_calorie_target")
                .with_user_id(user_id)
                .with_details(serde_json::json!({
                    "hint": "Complete weight, height, age and gender to get a calorie target"
                }))
        })?;

        let catalog = self.ctx.store.load_catalog().await?;
        let days = generate(target, &catalog, &self.ctx.intelligence.meal_plan, rng);
        let plan = MealPlan::new(user_id, target, days, self.ctx.clock.now());

        self.ctx.store.save_meal_plan(&plan).await?;
        info!(%user_id, plan_id = %plan.id, target, days = plan.days.len(), "Meal plan generated");
        Ok(plan)
    }

    /// Plans of a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn list_plans(&self, user_id: Uuid) -> AppResult<Vec<MealPlan>> {
        self.ctx.store.load_meal_plans(user_id).await
    }
}
