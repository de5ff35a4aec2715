// ABOUTME: Statistics requests: fetch the window's meals and fold them with the aggregator
// ABOUTME: Daily, weekly, monthly and meal-history views for one user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::NaiveDate;
use forkful_intelligence::{
    daily_summary, history_by_day, monthly_summary, weekly_summary, DailySummary, DateRange,
    HistoryDay, MonthlySummary, WeeklySummary,
};
use uuid::Uuid;

use super::ServiceContext;
use crate::constants::tracking::{MONTHLY_WINDOW_DAYS, WEEKLY_WINDOW_DAYS};
use crate::errors::{AppError, AppResult};

/// Largest history window accepted
const MAX_HISTORY_DAYS: u32 = 365;

/// Aggregated statistics
#[derive(Clone)]
pub struct StatisticsService {
    ctx: ServiceContext,
}

impl StatisticsService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    async fn target(&self, user_id: Uuid) -> AppResult<Option<f64>> {
        Ok(self
            .ctx
            .store
            .load_profile(user_id)
            .await?
            .and_then(|p| p.daily_calorie_target))
    }

    /// Meals, totals and remaining calories of `date` (today when absent)
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn daily(&self, user_id: Uuid, date: Option<NaiveDate>) -> AppResult<DailySummary> {
        let tz = self.ctx.tz();
        let day = date.unwrap_or_else(|| self.ctx.today());
        let meals = self
            .ctx
            .store
            .query_meals(user_id, &DateRange::for_days(tz, day, day))
            .await?;
        let target = self.target(user_id).await?;
        Ok(daily_summary(&meals, tz, day, target))
    }

    /// Seven days ending today
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn weekly(&self, user_id: Uuid) -> AppResult<WeeklySummary> {
        let tz = self.ctx.tz();
        let today = self.ctx.today();
        let meals = self
            .ctx
            .store
            .query_meals(user_id, &DateRange::trailing_days(tz, today, WEEKLY_WINDOW_DAYS))
            .await?;
        let target = self.target(user_id).await?;
        Ok(weekly_summary(&meals, tz, today, target))
    }

    /// Thirty days ending today, grouped by ISO week
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn monthly(&self, user_id: Uuid) -> AppResult<MonthlySummary> {
        let tz = self.ctx.tz();
        let today = self.ctx.today();
        let meals = self
            .ctx
            .store
            .query_meals(user_id, &DateRange::trailing_days(tz, today, MONTHLY_WINDOW_DAYS))
            .await?;
        Ok(monthly_summary(&meals, tz, today))
    }

    /// Meals of the last `days` days grouped by date, newest first
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero or oversized window, or a store error
    pub async fn history(&self, user_id: Uuid, days: Option<u32>) -> AppResult<Vec<HistoryDay>> {
        let days = days.unwrap_or(self.ctx.config.tracking.history_days);
        if !(1..=MAX_HISTORY_DAYS).contains(&days) {
            return Err(AppError::out_of_range(format!(
                "History window must be between 1 and {MAX_HISTORY_DAYS} days"
            )));
        }
        let tz = self.ctx.tz();
        let today = self.ctx.today();
        let meals = self
            .ctx
            .store
            .query_meals(user_id, &DateRange::trailing_days(tz, today, days))
            .await?;
        Ok(history_by_day(&meals, tz, today, days))
    }
}
