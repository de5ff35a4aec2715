// ABOUTME: Domain service layer orchestrating the meal, water, profile and plan event flows
// ABOUTME: Shared ServiceContext plus the bounded retry loop for per-user conditional writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Domain service layer
//!
//! Services glue the pure intelligence components to the persistence,
//! clock and external collaborators. They are protocol-agnostic: a REST
//! handler, a CLI or a test drives them the same way.
//!
//! Per-user counters (the profile's gamification block and the daily water
//! log) are updated with read-modify-write cycles guarded by a version
//! check. A lost race surfaces as `ConcurrencyConflict` from the store and
//! the service re-runs the whole cycle, up to `max_update_retries` times.

use std::future::Future;
use std::sync::Arc;

use forkful_core::clock::{Clock, ReferenceTimeZone, SystemClock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{IntelligenceConfig, ServerConfig};
use crate::database_plugins::NutritionStore;
use crate::errors::{AppError, AppResult};

/// Food photo analysis, barcode scanning and catalog search
pub mod food_lookup;
/// Badge board and displayed streak
pub mod gamification;
/// Personal goals
pub mod goals;
/// Meal logging with streak and badge updates
pub mod meal_logging;
/// Meal plan generation and listing
pub mod meal_plans;
/// Profile registration and updates
pub mod profile;
/// Daily, weekly, monthly and history statistics
pub mod statistics;
/// Water intake tracking
pub mod water;

pub use food_lookup::FoodLookupService;
pub use gamification::{BadgeOverview, GamificationService};
pub use goals::GoalService;
pub use meal_logging::{MealLogged, MealLoggingService};
pub use meal_plans::MealPlanService;
pub use profile::ProfileService;
pub use statistics::StatisticsService;
pub use water::{WaterService, WaterStatus};

/// Collaborators shared by every service
#[derive(Clone)]
pub struct ServiceContext {
    /// Persistence collaborator
    pub store: Arc<dyn NutritionStore>,
    /// Time source
    pub clock: Arc<dyn Clock>,
    /// Environment configuration
    pub config: Arc<ServerConfig>,
    /// Algorithm constants
    pub intelligence: Arc<IntelligenceConfig>,
}

impl ServiceContext {
    /// Context with explicit collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn NutritionStore>,
        clock: Arc<dyn Clock>,
        config: ServerConfig,
        intelligence: IntelligenceConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config: Arc::new(config),
            intelligence: Arc::new(intelligence),
        }
    }

    /// Context on the wall clock with the process-global algorithm constants
    #[must_use]
    pub fn with_system_clock(store: Arc<dyn NutritionStore>, config: ServerConfig) -> Self {
        Self::new(
            store,
            Arc::new(SystemClock),
            config,
            IntelligenceConfig::global().clone(),
        )
    }

    /// Reference time zone for calendar dates
    #[must_use]
    pub fn tz(&self) -> ReferenceTimeZone {
        self.config.tracking.reference_tz()
    }

    /// Today's date in the reference zone
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.tz().local_date(self.clock.now())
    }

    pub(crate) async fn require_profile(
        &self,
        user_id: Uuid,
    ) -> AppResult<forkful_core::models::Profile> {
        self.store
            .load_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))
    }

    pub(crate) async fn retry_on_conflict<T, F, Fut>(
        &self,
        user_id: Uuid,
        operation: &'static str,
        mut attempt: F,
    ) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let max_attempts = self.config.tracking.max_update_retries.max(1);
        let mut tried = 0;
        loop {
            tried += 1;
            match attempt().await {
                Err(e) if e.code.is_retryable() && tried < max_attempts => {
                    debug!(%user_id, operation, attempt = tried, "Conflicting update, retrying");
                    tokio::task::yield_now().await;
                }
                Err(e) if e.code.is_retryable() => {
                    warn!(%user_id, operation, attempts = tried, "Giving up after repeated conflicts");
                    return Err(e);
                }
                other => return other,
            }
        }
    }
}
