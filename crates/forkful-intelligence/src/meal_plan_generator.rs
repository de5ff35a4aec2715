// ABOUTME: Weekly meal plan composition by sampling the food catalog
// ABOUTME: Category pools per slot, draws without replacement, reproducible per-day seeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Meal Plan Generator
//!
//! Each day is sampled independently from three pools:
//!
//! - breakfast: carbs, fruit, dairy
//! - lunch and dinner: carbs, protein
//! - snack: fruit, snack, beverage
//!
//! The per-slot calorie shares are reported next to the sampled calories but
//! do not constrain the draw. A pool smaller than its draw size is taken whole.
//!
//! The caller's rng only produces one seed per day; days are then sampled in
//! parallel with their own `ChaCha8Rng`, so a seeded caller gets the same plan
//! regardless of thread scheduling.

use crate::config::{MealPlanConfig, SlotShares};
use forkful_core::models::{
    FoodCatalogEntry, FoodCategory, MealPlanDay, MealSlots, SlotCalories,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

/// Catalog entries partitioned into the slot pools
#[derive(Debug, Clone, Default)]
pub struct CandidatePools<'a> {
    /// Carbs, fruit and dairy
    pub breakfast: Vec<&'a FoodCatalogEntry>,
    /// Carbs and protein (lunch and dinner)
    pub main: Vec<&'a FoodCatalogEntry>,
    /// Fruit, snack and beverage
    pub snack: Vec<&'a FoodCatalogEntry>,
}

impl<'a> CandidatePools<'a> {
    /// Partition `catalog` by category
    #[must_use]
    pub fn from_catalog(catalog: &'a [FoodCatalogEntry]) -> Self {
        let mut pools = Self::default();
        for entry in catalog {
            match entry.category {
                FoodCategory::Carbs => {
                    pools.breakfast.push(entry);
                    pools.main.push(entry);
                }
                FoodCategory::Fruit => {
                    pools.breakfast.push(entry);
                    pools.snack.push(entry);
                }
                FoodCategory::Dairy => pools.breakfast.push(entry),
                FoodCategory::Protein => pools.main.push(entry),
                FoodCategory::Snack | FoodCategory::Beverage => pools.snack.push(entry),
            }
        }
        pools
    }
}

/// Informational calorie target of each slot
#[must_use]
pub fn slot_targets(target_calories: f64, shares: &SlotShares) -> SlotCalories {
    let share = |pct: u8| target_calories * f64::from(pct) / 100.0;
    SlotCalories {
        breakfast: share(shares.breakfast_pct),
        lunch: share(shares.lunch_pct),
        dinner: share(shares.dinner_pct),
        snack: share(shares.snack_pct),
    }
}

fn draw<R: Rng + ?Sized>(pool: &[&FoodCatalogEntry], count: usize, rng: &mut R) -> Vec<FoodCatalogEntry> {
    pool.choose_multiple(rng, count)
        .map(|entry| (*entry).clone())
        .collect()
}

fn calories_of(items: &[FoodCatalogEntry]) -> f64 {
    items.iter().map(|item| item.calories).sum()
}

fn sample_day(
    day: u32,
    seed: u64,
    pools: &CandidatePools<'_>,
    targets: SlotCalories,
    config: &MealPlanConfig,
) -> MealPlanDay {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let meals = MealSlots {
        breakfast: draw(&pools.breakfast, config.draws.breakfast, &mut rng),
        lunch: draw(&pools.main, config.draws.lunch, &mut rng),
        dinner: draw(&pools.main, config.draws.dinner, &mut rng),
        snack: draw(&pools.snack, config.draws.snack, &mut rng),
    };
    let slot_calories = SlotCalories {
        breakfast: calories_of(&meals.breakfast),
        lunch: calories_of(&meals.lunch),
        dinner: calories_of(&meals.dinner),
        snack: calories_of(&meals.snack),
    };

    MealPlanDay {
        day,
        day_label: format!("{} {day}", config.day_label_prefix),
        meals,
        slot_targets: targets,
        slot_calories,
    }
}

/// Generate `config.days` independently sampled days
///
/// Never fails; an empty catalog yields days whose slots are all empty.
#[must_use]
pub fn generate<R: Rng + ?Sized>(
    target_calories: f64,
    catalog: &[FoodCatalogEntry],
    config: &MealPlanConfig,
    rng: &mut R,
) -> Vec<MealPlanDay> {
    let pools = CandidatePools::from_catalog(catalog);
    let targets = slot_targets(target_calories, &config.shares);
    let seeds: Vec<u64> = (0..config.days).map(|_| rng.gen()).collect();

    debug!(
        target_calories,
        days = config.days,
        breakfast_pool = pools.breakfast.len(),
        main_pool = pools.main.len(),
        snack_pool = pools.snack.len(),
        "Generating meal plan"
    );

    seeds
        .into_par_iter()
        .enumerate()
        .map(|(index, seed)| sample_day(index as u32 + 1, seed, &pools, targets, config))
        .collect()
}
