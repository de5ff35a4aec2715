// ABOUTME: Read side of the gamification state: badge board and displayed streak
// ABOUTME: The displayed streak drops to zero once the user has missed a full day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::NaiveDate;
use forkful_intelligence::{badge_board, BadgeStatus, StreakState};
use serde::Serialize;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::AppResult;

/// Badge listing for one user
#[derive(Debug, Clone, Serialize)]
pub struct BadgeOverview {
    /// Every badge with its earned flag
    pub badges: Vec<BadgeStatus>,
    /// Streak as of today; 0 when lapsed
    pub streak_count: u32,
    /// Most recent activity date
    pub last_activity_date: Option<NaiveDate>,
}

/// Gamification read model
#[derive(Clone)]
pub struct GamificationService {
    ctx: ServiceContext,
}

impl GamificationService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Badge board and displayed streak
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    pub async fn badges(&self, user_id: Uuid) -> AppResult<BadgeOverview> {
        let profile = self.ctx.require_profile(user_id).await?;
        let state = &profile.gamification;

        Ok(BadgeOverview {
            badges: badge_board(&state.badges),
            streak_count: StreakState::from_gamification(state).current_count(self.ctx.today()),
            last_activity_date: state.last_activity_date,
        })
    }
}
