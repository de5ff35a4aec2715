// ABOUTME: Tests for weekly meal plan sampling from the food catalog
// ABOUTME: Slot pools, draw sizes, small and empty catalogs, seeded reproducibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashSet;

use forkful_server::config::IntelligenceConfig;
use forkful_server::intelligence::{default_catalog, generate};
use forkful_server::models::{FoodCatalogEntry, FoodCategory};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn plan_config() -> forkful_server::intelligence::config::MealPlanConfig {
    IntelligenceConfig::default().meal_plan
}

#[test]
fn test_default_catalog_plan_shape() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let days = generate(2000.0, &default_catalog(), &plan_config(), &mut rng);

    assert_eq!(days.len(), 7);
    for (index, day) in days.iter().enumerate() {
        assert_eq!(day.day as usize, index + 1);
        assert_eq!(day.day_label, format!("Dia {}", index + 1));
        assert_eq!(day.meals.breakfast.len(), 3);
        assert_eq!(day.meals.lunch.len(), 4);
        assert_eq!(day.meals.dinner.len(), 3);
        // Snack pool holds only Banana, Maçã and Açaí
        assert_eq!(day.meals.snack.len(), 2);

        assert!(day.meals.breakfast.iter().all(|f| matches!(
            f.category,
            FoodCategory::Carbs | FoodCategory::Fruit | FoodCategory::Dairy
        )));
        assert!(day
            .meals
            .lunch
            .iter()
            .chain(&day.meals.dinner)
            .all(|f| matches!(f.category, FoodCategory::Carbs | FoodCategory::Protein)));
        assert!(day.meals.snack.iter().all(|f| matches!(
            f.category,
            FoodCategory::Fruit | FoodCategory::Snack | FoodCategory::Beverage
        )));

        let lunch: HashSet<&str> = day.meals.lunch.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(lunch.len(), 4, "draws are without replacement");

        assert!((day.slot_targets.breakfast - 600.0).abs() < 1e-9);
        assert!((day.slot_targets.total() - 2000.0).abs() < 1e-9);
        let sampled: f64 = day.meals.snack.iter().map(|f| f.calories).sum();
        assert!((day.slot_calories.snack - sampled).abs() < 1e-9);
    }
}

#[test]
fn test_same_seed_same_plan() {
    let catalog = default_catalog();
    let first = generate(1800.0, &catalog, &plan_config(), &mut ChaCha8Rng::seed_from_u64(42));
    let second = generate(1800.0, &catalog, &plan_config(), &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn test_small_catalog_takes_whole_pool() {
    let catalog = vec![
        FoodCatalogEntry::new("Pão francês", FoodCategory::Carbs, 300.0, 58.0, 9.0, 3.5, "unidade"),
        FoodCatalogEntry::new("Leite integral", FoodCategory::Dairy, 61.0, 4.7, 3.2, 3.3, "200ml"),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let days = generate(2000.0, &catalog, &plan_config(), &mut rng);

    assert_eq!(days.len(), 7);
    for day in &days {
        assert_eq!(day.meals.breakfast.len(), 2);
        assert_eq!(day.meals.lunch.len(), 1);
        assert_eq!(day.meals.dinner.len(), 1);
        assert!(day.meals.snack.is_empty());
    }
}

#[test]
fn test_empty_catalog_yields_empty_slots() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let days = generate(2000.0, &[], &plan_config(), &mut rng);

    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d.meals.breakfast.is_empty()
        && d.meals.lunch.is_empty()
        && d.meals.dinner.is_empty()
        && d.meals.snack.is_empty()
        && d.slot_calories.total().abs() < f64::EPSILON));
}
