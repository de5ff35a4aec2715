// ABOUTME: Daily water intake counter with conditional upserts
// ABOUTME: log_water increments today's glasses, water_status reports count against target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::NaiveDate;
use forkful_core::models::WaterLog;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::{AppError, AppResult};

/// Water intake of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterStatus {
    /// Calendar date
    pub date: NaiveDate,
    /// Glasses drunk
    pub glasses_count: u32,
    /// Daily target
    pub target: u32,
}

/// Water tracking
#[derive(Clone)]
pub struct WaterService {
    ctx: ServiceContext,
}

impl WaterService {
    /// Create the service
    #[must_use]
    pub const fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add `glasses` to today's counter
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for zero glasses, or `ConcurrencyConflict`
    /// once retries are exhausted
    pub async fn log_water(&self, user_id: Uuid, glasses: u32) -> AppResult<WaterStatus> {
        if glasses == 0 {
            return Err(AppError::out_of_range("Glasses must be at least 1"));
        }
        let today = self.ctx.today();

        let stored = self
            .ctx
            .retry_on_conflict(user_id, "log_water", || {
                self.try_increment(user_id, today, glasses)
            })
            .await?;

        info!(%user_id, date = %today, glasses, total = stored.glasses_count, "Water logged");
        Ok(self.status(today, stored.glasses_count))
    }

    async fn try_increment(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        glasses: u32,
    ) -> AppResult<WaterLog> {
        let now = self.ctx.clock.now();
        match self.ctx.store.load_water_log(user_id, date).await? {
            Some(existing) => {
                let next = existing.incremented(glasses, now);
                self.ctx
                    .store
                    .upsert_water_log(&next, Some(existing.version))
                    .await
            }
            None => {
                let first = WaterLog::first(user_id, date, glasses, now);
                self.ctx.store.upsert_water_log(&first, None).await
            }
        }
    }

    /// Glasses logged on `date` (today when absent)
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn water_status(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> AppResult<WaterStatus> {
        let date = date.unwrap_or_else(|| self.ctx.today());
        let count = self
            .ctx
            .store
            .load_water_log(user_id, date)
            .await?
            .map_or(0, |log| log.glasses_count);
        Ok(self.status(date, count))
    }

    fn status(&self, date: NaiveDate, glasses_count: u32) -> WaterStatus {
        WaterStatus {
            date,
            glasses_count,
            target: self.ctx.config.tracking.water_target_glasses,
        }
    }
}
