// ABOUTME: Core types and constants for the Forkful nutrition tracker
// ABOUTME: Foundation crate with error handling, domain models, clock and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![deny(unsafe_code)]

//! # Forkful Core
//!
//! Foundation crate providing shared types for the Forkful nutrition tracker.
//! It changes infrequently, so the algorithm and service crates can build on
//! it incrementally.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Profiles, meals, water logs, goals, catalog and plans
//! - **clock**: Injectable time source and the reference time zone
//! - **constants**: Defaults organized by domain

/// Unified error handling system with standard error codes and HTTP statuses
pub mod errors;

/// Core data models
pub mod models;

/// Injectable clock and reference time zone
pub mod clock;

/// Application constants organized by domain
pub mod constants;
