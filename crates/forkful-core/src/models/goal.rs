// ABOUTME: User-defined goals with a one-way completion transition
// ABOUTME: Goal and NewGoal definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Inbound goal creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    /// Free-form goal type ("water", "fruits", "weight")
    pub goal_type: String,
    /// Value to reach
    pub target_value: f64,
    /// Starting value
    #[serde(default)]
    pub current_value: f64,
    /// Optional description
    #[serde(default)]
    pub description: String,
}

impl NewGoal {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty type or non-finite values
    pub fn validate(&self) -> AppResult<()> {
        if self.goal_type.trim().is_empty() {
            return Err(AppError::missing_field("goal_type"));
        }
        if !self.target_value.is_finite() || !self.current_value.is_finite() {
            return Err(AppError::invalid_input("Goal values must be finite numbers"));
        }
        Ok(())
    }
}

/// A goal owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Goal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Free-form goal type
    pub goal_type: String,
    /// Value to reach
    pub target_value: f64,
    /// Current value
    pub current_value: f64,
    /// Description
    pub description: String,
    /// Completion flag; false -> true once
    pub completed: bool,
    /// When the goal was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Build a goal from a validated payload
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid, goal: NewGoal, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            goal_type: goal.goal_type,
            target_value: goal.target_value,
            current_value: goal.current_value,
            description: goal.description,
            completed: false,
            completed_at: None,
            created_at: now,
        }
    }

    /// Mark the goal completed
    ///
    /// Returns `false` (and keeps the original timestamp) when it already was.
    pub fn complete(&mut self, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(now);
        true
    }
}
