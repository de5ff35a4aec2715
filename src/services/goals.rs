// ABOUTME: Personal goal creation, listing and one-way completion
// ABOUTME: Completion is irreversible and keeps the first completion timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use forkful_core::models::{Goal, NewGoal};
use tracing::info;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::{AppError, AppResult};

/// Goal management
#[derive(Clone)]
pub struct GoalService {
    ctx: ServiceContext,
}

impl GoalService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a new open goal
    ///
    /// # Errors
    ///
    /// Returns a validation error or a store error
    pub async fn create_goal(&self, user_id: Uuid, goal: NewGoal) -> AppResult<Goal> {
        goal.validate()?;
        let goal = Goal::new(Uuid::new_v4(), user_id, goal, self.ctx.clock.now());
        self.ctx.store.insert_goal(&goal).await?;
        info!(%user_id, goal_id = %goal.id, goal_type = %goal.goal_type, "Goal created");
        Ok(goal)
    }

    /// Goals of a user, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        self.ctx.store.load_goals(user_id).await
    }

    /// Mark a goal completed; completing it again keeps the first timestamp
    ///
    /// Concurrent completions race on the store's atomic open check, so
    /// exactly one of them sets `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no such goal
    pub async fn complete_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<Goal> {
        let (goal, completed_now) = self
            .ctx
            .store
            .complete_goal(user_id, goal_id, self.ctx.clock.now())
            .await?
            .ok_or_else(|| {
                AppError::not_found("Goal")
                    .with_user_id(user_id)
                    .with_resource_id(goal_id.to_string())
            })?;

        if completed_now {
            info!(%user_id, %goal_id, "Goal completed");
        }
        Ok(goal)
    }
}
