// ABOUTME: Built-in Brazilian food catalog used for search and meal plans
// ABOUTME: Default entries with category assignments and case-insensitive search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use forkful_core::models::{FoodCatalogEntry, FoodCategory};

/// The default reference catalog (15 foods)
#[must_use]
pub fn default_catalog() -> Vec<FoodCatalogEntry> {
    use FoodCategory::{Carbs, Dairy, Fruit, Protein, Snack};

    vec![
        FoodCatalogEntry::new("Arroz branco", Carbs, 130.0, 28.0, 2.5, 0.3, "100g"),
        FoodCatalogEntry::new("Feijão preto", Protein, 77.0, 14.0, 4.5, 0.5, "100g"),
        FoodCatalogEntry::new("Frango grelhado", Protein, 165.0, 0.0, 31.0, 3.6, "100g"),
        FoodCatalogEntry::new("Carne bovina", Protein, 250.0, 0.0, 26.0, 17.0, "100g"),
        FoodCatalogEntry::new("Ovo cozido", Protein, 155.0, 1.1, 13.0, 11.0, "unidade"),
        FoodCatalogEntry::new("Banana", Fruit, 89.0, 23.0, 1.1, 0.3, "unidade"),
        FoodCatalogEntry::new("Maçã", Fruit, 52.0, 14.0, 0.3, 0.2, "unidade"),
        FoodCatalogEntry::new("Pão francês", Carbs, 300.0, 58.0, 9.0, 3.5, "unidade"),
        FoodCatalogEntry::new("Batata doce", Carbs, 86.0, 20.0, 1.6, 0.1, "100g"),
        FoodCatalogEntry::new("Macarrão", Carbs, 131.0, 25.0, 5.0, 1.1, "100g"),
        FoodCatalogEntry::new("Leite integral", Dairy, 61.0, 4.7, 3.2, 3.3, "200ml"),
        FoodCatalogEntry::new("Iogurte natural", Dairy, 61.0, 4.7, 3.5, 3.3, "100g"),
        FoodCatalogEntry::new("Queijo minas", Dairy, 264.0, 3.5, 17.0, 21.0, "100g"),
        FoodCatalogEntry::new("Tapioca", Carbs, 152.0, 37.0, 0.2, 0.1, "unidade"),
        FoodCatalogEntry::new("Açaí", Snack, 70.0, 6.2, 1.5, 5.0, "100g"),
    ]
}

/// Entries whose name contains `query`, ignoring case; an empty query matches all
#[must_use]
pub fn search_catalog(catalog: &[FoodCatalogEntry], query: &str) -> Vec<FoodCatalogEntry> {
    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
