// ABOUTME: Main library entry point for the Forkful nutrition tracking service
// ABOUTME: Wires configuration, logging, persistence, external collaborators and domain services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![deny(unsafe_code)]

//! # Forkful Server
//!
//! Personal nutrition tracking: users register a physiological profile, log
//! meals (typed in, recognized from a photo, or scanned from a barcode) and
//! water, and receive daily/weekly/monthly statistics, activity streaks,
//! achievement badges and generated weekly meal plans.
//!
//! ## Architecture
//!
//! - **`forkful-core`**: errors, domain models, clock and reference time zone
//! - **`forkful-intelligence`**: the pure computations (calorie target,
//!   aggregation, streaks, badges, meal plans)
//! - **this crate**: environment configuration, structured logging, the
//!   persistence trait with an in-memory store, HTTP clients for the
//!   external collaborators, and the services orchestrating each event flow
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use forkful_server::config::ServerConfig;
//! use forkful_server::database_plugins::InMemoryStore;
//! use forkful_server::services::{ProfileService, ServiceContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let ctx = ServiceContext::with_system_clock(Arc::new(InMemoryStore::new()), config);
//!     let profiles = ProfileService::new(ctx);
//!     let _ = profiles.daily_target(uuid::Uuid::new_v4()).await;
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Persistence collaborator and backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// External API clients
pub mod external;

/// Nutrition intelligence (re-exported from `forkful-intelligence`)
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain models (re-exported from `forkful-core`)
pub mod models;

/// Domain services
pub mod services;

pub use forkful_core::clock;
