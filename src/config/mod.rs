// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment configuration and algorithm configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Configuration module
//!
//! - **Environment**: tracking, barcode and food recognition settings from env vars
//! - **Intelligence**: algorithm constants (re-exported from `forkful-intelligence`)

/// Environment and server configuration
pub mod environment;

pub use environment::{BarcodeConfig, FoodRecognitionConfig, ServerConfig, TrackingConfig};
pub use forkful_intelligence::config::{ConfigError, IntelligenceConfig};
