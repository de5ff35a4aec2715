// ABOUTME: Food catalog, scanned products and generated meal plan models
// ABOUTME: FoodCategory, FoodCatalogEntry, ProductRecord, MealSlots, MealPlanDay and MealPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog category used to build the meal-plan pools
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Rice, bread, pasta, tubers
    Carbs,
    /// Meat, eggs, legumes
    Protein,
    /// Fresh fruit
    Fruit,
    /// Milk, yogurt, cheese
    Dairy,
    /// Drinks
    Beverage,
    /// Snack foods
    Snack,
}

impl FoodCategory {
    /// Case-insensitive parse
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "carbs" => Some(Self::Carbs),
            "protein" => Some(Self::Protein),
            "fruit" => Some(Self::Fruit),
            "dairy" => Some(Self::Dairy),
            "beverage" => Some(Self::Beverage),
            "snack" => Some(Self::Snack),
            _ => None,
        }
    }
}

/// Static reference food with per-portion nutrition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodCatalogEntry {
    /// Food name
    pub name: String,
    /// Pool category
    pub category: FoodCategory,
    /// Energy per portion (kcal)
    pub calories: f64,
    /// Carbohydrates per portion (g)
    pub carbs_g: f64,
    /// Protein per portion (g)
    pub protein_g: f64,
    /// Fat per portion (g)
    pub fat_g: f64,
    /// Portion the values refer to ("100g", "unidade")
    pub portion_label: String,
}

impl FoodCatalogEntry {
    /// Build an entry
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: FoodCategory,
        calories: f64,
        carbs_g: f64,
        protein_g: f64,
        fat_g: f64,
        portion_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            calories,
            carbs_g,
            protein_g,
            fat_g,
            portion_label: portion_label.into(),
        }
    }
}

/// Product resolved from a barcode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Scanned barcode
    pub barcode: String,
    /// Product name
    pub name: String,
    /// Energy per portion (kcal)
    pub calories: f64,
    /// Carbohydrates per portion (g)
    pub carbs_g: f64,
    /// Protein per portion (g)
    pub protein_g: f64,
    /// Fat per portion (g)
    pub fat_g: f64,
    /// Portion the values refer to
    pub portion_label: String,
    /// Where the record came from ("local", "open_food_facts")
    pub source: String,
}

/// The four food lists of one day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealSlots {
    /// Breakfast items
    pub breakfast: Vec<FoodCatalogEntry>,
    /// Lunch items
    pub lunch: Vec<FoodCatalogEntry>,
    /// Dinner items
    pub dinner: Vec<FoodCatalogEntry>,
    /// Snack items
    pub snack: Vec<FoodCatalogEntry>,
}

/// Calorie figure for each slot
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotCalories {
    /// Breakfast kcal
    pub breakfast: f64,
    /// Lunch kcal
    pub lunch: f64,
    /// Dinner kcal
    pub dinner: f64,
    /// Snack kcal
    pub snack: f64,
}

impl SlotCalories {
    /// Sum over the four slots
    #[must_use]
    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// One day of a generated plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlanDay {
    /// Day number, starting at 1
    pub day: u32,
    /// Human label ("Dia 1")
    pub day_label: String,
    /// Sampled foods per slot
    pub meals: MealSlots,
    /// Informational share of the plan target per slot
    pub slot_targets: SlotCalories,
    /// Calories actually sampled per slot
    pub slot_calories: SlotCalories,
}

/// A stored week of meal suggestions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Daily target the plan was generated for
    pub target_calories: f64,
    /// Ordered day entries
    pub days: Vec<MealPlanDay>,
    /// Only the latest plan of a user is active
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    /// Wrap generated days into a new active plan
    #[must_use]
    pub fn new(
        user_id: Uuid,
        target_calories: f64,
        days: Vec<MealPlanDay>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: format!("Plano Semanal - {}", now.format("%d/%m/%Y")),
            target_calories,
            days,
            active: true,
            created_at: now,
        }
    }
}
