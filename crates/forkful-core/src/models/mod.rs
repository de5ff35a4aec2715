// ABOUTME: Core data models for the Forkful nutrition tracker
// ABOUTME: Re-exports profile, meal, water, goal, catalog and meal plan structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! # Data Models
//!
//! Logical records exchanged with the persistence collaborator. Events
//! (`NewMeal`, `NewGoal`, `ProfileUpdate`) are validated here, before any
//! derived value is computed from them.
//!
//! ## Core Models
//!
//! - `Profile`: physiological inputs, derived calorie target, gamification state
//! - `MealRecord`: an immutable logged meal
//! - `WaterLog`: per-day glass counter
//! - `Goal`: user goal with one-way completion
//! - `FoodCatalogEntry` / `MealPlan`: reference foods and generated plans

mod catalog;
mod goal;
mod nutrition;
mod profile;

// Profile domain
pub use profile::{
    ActivityLevel, BadgeId, GamificationState, Gender, NutritionGoal, Profile, ProfileUpdate,
};

// Meal and water domain
pub use nutrition::{round_to, MacroTotals, MealRecord, MealType, NewMeal, WaterLog};

// Goal domain
pub use goal::{Goal, NewGoal};

// Catalog and plans
pub use catalog::{
    FoodCatalogEntry, FoodCategory, MealPlan, MealPlanDay, MealSlots, ProductRecord, SlotCalories,
};
