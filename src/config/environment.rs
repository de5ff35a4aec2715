// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Tracking defaults, barcode lookup and food recognition settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Environment-based configuration

use crate::constants::{external, tracking};
use anyhow::{bail, Context, Result};
use forkful_core::clock::ReferenceTimeZone;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Meal, water and streak tracking
    pub tracking: TrackingConfig,
    /// Barcode product lookup
    pub barcode: BarcodeConfig,
    /// Photo-based food recognition
    pub food_recognition: FoodRecognitionConfig,
}

/// Tracking behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackingConfig {
    /// Offset of the reference time zone east of UTC, in minutes
    pub tz_offset_minutes: i32,
    /// Daily water target in glasses
    pub water_target_glasses: u32,
    /// Attempts of a per-user read-modify-write before surfacing a conflict
    pub max_update_retries: u32,
    /// Default meal history window in days
    pub history_days: u32,
}

impl TrackingConfig {
    /// Reference time zone for calendar dates
    ///
    /// Falls back to UTC when the offset is out of range; `from_env` rejects such values.
    #[must_use]
    pub fn reference_tz(&self) -> ReferenceTimeZone {
        ReferenceTimeZone::from_offset_minutes(self.tz_offset_minutes).unwrap_or_default()
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tz_offset_minutes: 0,
            water_target_glasses: tracking::DEFAULT_WATER_TARGET_GLASSES,
            max_update_retries: tracking::DEFAULT_MAX_UPDATE_RETRIES,
            history_days: tracking::DEFAULT_HISTORY_DAYS,
        }
    }
}

/// Barcode lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarcodeConfig {
    /// Query Open Food Facts when the local table misses
    pub external_enabled: bool,
    /// Open Food Facts base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Cache entry lifetime in seconds
    pub cache_ttl_secs: u64,
    /// Maximum cached products
    pub cache_capacity: usize,
}

impl BarcodeConfig {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache entry lifetime
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            external_enabled: cfg!(feature = "barcode-external"),
            base_url: external::OPEN_FOOD_FACTS_BASE_URL.to_owned(),
            timeout_secs: external::DEFAULT_TIMEOUT_SECS,
            cache_ttl_secs: external::BARCODE_CACHE_TTL_SECS,
            cache_capacity: external::BARCODE_CACHE_CAPACITY,
        }
    }
}

/// Vision model settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodRecognitionConfig {
    /// OpenAI-compatible API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// API key; recognition is unavailable without it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FoodRecognitionConfig {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FoodRecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: external::VISION_API_BASE_URL.to_owned(),
            model: external::VISION_MODEL.to_owned(),
            api_key: None,
            timeout_secs: external::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable or out-of-range value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let defaults = Self::default();

        let tz_offset_minutes: i32 = env_var_or(
            "FORKFUL_TZ_OFFSET_MINUTES",
            &defaults.tracking.tz_offset_minutes.to_string(),
        )?
        .parse()
        .context("Invalid FORKFUL_TZ_OFFSET_MINUTES value")?;
        if ReferenceTimeZone::from_offset_minutes(tz_offset_minutes).is_none() {
            bail!("FORKFUL_TZ_OFFSET_MINUTES must be within +/- 1439 minutes");
        }

        let config = Self {
            tracking: TrackingConfig {
                tz_offset_minutes,
                water_target_glasses: env_var_or(
                    "FORKFUL_WATER_TARGET_GLASSES",
                    &defaults.tracking.water_target_glasses.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_WATER_TARGET_GLASSES value")?,
                max_update_retries: env_var_or(
                    "FORKFUL_MAX_UPDATE_RETRIES",
                    &defaults.tracking.max_update_retries.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_MAX_UPDATE_RETRIES value")?,
                history_days: env_var_or(
                    "FORKFUL_HISTORY_DAYS",
                    &defaults.tracking.history_days.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_HISTORY_DAYS value")?,
            },
            barcode: BarcodeConfig {
                external_enabled: env_var_or(
                    "FORKFUL_BARCODE_EXTERNAL_ENABLED",
                    &defaults.barcode.external_enabled.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_BARCODE_EXTERNAL_ENABLED value")?,
                base_url: env_var_or("OPEN_FOOD_FACTS_BASE_URL", &defaults.barcode.base_url)?,
                timeout_secs: env_var_or(
                    "FORKFUL_BARCODE_TIMEOUT_SECS",
                    &defaults.barcode.timeout_secs.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_BARCODE_TIMEOUT_SECS value")?,
                cache_ttl_secs: env_var_or(
                    "FORKFUL_BARCODE_CACHE_TTL_SECS",
                    &defaults.barcode.cache_ttl_secs.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_BARCODE_CACHE_TTL_SECS value")?,
                cache_capacity: env_var_or(
                    "FORKFUL_BARCODE_CACHE_CAPACITY",
                    &defaults.barcode.cache_capacity.to_string(),
                )?
                .parse()
                .context("Invalid FORKFUL_BARCODE_CACHE_CAPACITY value")?,
            },
            food_recognition: FoodRecognitionConfig {
                base_url: env_var_or("VISION_API_BASE_URL", &defaults.food_recognition.base_url)?,
                model: env_var_or("VISION_MODEL", &defaults.food_recognition.model)?,
                api_key: env::var("VISION_API_KEY")
                    .or_else(|_| env::var("OPENAI_API_KEY"))
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                timeout_secs: env_var_or(
                    "VISION_TIMEOUT_SECS",
                    &defaults.food_recognition.timeout_secs.to_string(),
                )?
                .parse()
                .context("Invalid VISION_TIMEOUT_SECS value")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.tracking.max_update_retries == 0 {
            bail!("FORKFUL_MAX_UPDATE_RETRIES must be at least 1");
        }
        if self.tracking.water_target_glasses == 0 {
            bail!("FORKFUL_WATER_TARGET_GLASSES must be at least 1");
        }
        if self.tracking.history_days == 0 {
            bail!("FORKFUL_HISTORY_DAYS must be at least 1");
        }
        if self.barcode.cache_capacity == 0 {
            bail!("FORKFUL_BARCODE_CACHE_CAPACITY must be at least 1");
        }
        Ok(())
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_owned()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {key}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tracking.reference_tz(), ReferenceTimeZone::UTC);
        assert_eq!(config.tracking.water_target_glasses, 8);
    }
}
