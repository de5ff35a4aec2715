// ABOUTME: Intelligence module re-exports from forkful-intelligence crate
// ABOUTME: Keeps crate::intelligence paths stable for binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! # Intelligence Module
//!
//! Pure nutrition computations. Nothing here performs I/O; the services
//! feed fetched records, the reference date and a random source in.

pub use forkful_intelligence::*;

pub use forkful_intelligence::{
    badge_evaluator, catalog, config, meal_plan_generator, nutrition_aggregator,
    profile_calculator, streak_tracker,
};
