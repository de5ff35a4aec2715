// ABOUTME: Domain model re-exports from forkful-core
// ABOUTME: Profiles, meals, water logs, goals, catalog entries and meal plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Domain models shared by every layer.

pub use forkful_core::models::*;
