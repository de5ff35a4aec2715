// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service identity, tracking defaults and external collaborator defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Constants grouped by domain.

/// Service identity
pub mod service {
    /// Service name used in logs
    pub const SERVICE_NAME: &str = "forkful";
    /// Crate version
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Tracking defaults
pub mod tracking {
    /// Daily water target in glasses
    pub const DEFAULT_WATER_TARGET_GLASSES: u32 = 8;
    /// Default meal history window in days
    pub const DEFAULT_HISTORY_DAYS: u32 = 7;
    /// Days in the weekly statistics window
    pub const WEEKLY_WINDOW_DAYS: u32 = 7;
    /// Days in the monthly statistics window
    pub const MONTHLY_WINDOW_DAYS: u32 = 30;
    /// Days in a generated meal plan
    pub const MEAL_PLAN_DAYS: u32 = 7;
    /// Retries of a per-user read-modify-write before giving up
    pub const DEFAULT_MAX_UPDATE_RETRIES: u32 = 5;
    /// Decimal places of aggregated output
    pub const OUTPUT_DECIMALS: i32 = 2;
}

/// External collaborator defaults
pub mod external {
    /// Open Food Facts API base URL
    pub const OPEN_FOOD_FACTS_BASE_URL: &str = "https://world.openfoodfacts.org";
    /// OpenAI-compatible API base URL
    pub const VISION_API_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default vision model
    pub const VISION_MODEL: &str = "gpt-4o";
    /// HTTP timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Barcode cache TTL in seconds
    pub const BARCODE_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
    /// Barcode cache capacity
    pub const BARCODE_CACHE_CAPACITY: usize = 1000;
    /// Minimum barcode length (EAN-8)
    pub const MIN_BARCODE_DIGITS: usize = 8;
    /// Maximum barcode length (GTIN-14)
    pub const MAX_BARCODE_DIGITS: usize = 14;
}
