// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError, ErrorCode and AppResult used across services and collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! # Unified Error Handling System
//!
//! Error types live in `forkful-core` so the algorithm crate and the service
//! layer share one error model.

pub use forkful_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
    RAW_PAYLOAD_LIMIT,
};
