// ABOUTME: System-wide constants for the Forkful service
// ABOUTME: Re-exports the core constant groups by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! # Constants Module

pub use forkful_core::constants::{external, service, tracking};
