// ABOUTME: Badge eligibility against a fixed threshold table
// ABOUTME: Pure evaluation, append-only merge and display metadata for the badge board
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Badge Evaluator
//!
//! | Badge | Condition |
//! |---|---|
//! | `first_meal` | meals >= 1 |
//! | `ten_meals` | meals >= 10 |
//! | `fifty_meals` | meals >= 50 |
//! | `week_streak` | streak >= 7 |
//! | `month_streak` | streak >= 30 |

use crate::config::{BadgeCounter, GamificationConfig};
use forkful_core::models::BadgeId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Display metadata of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeInfo {
    /// Identifier
    pub id: BadgeId,
    /// Display name
    pub name: &'static str,
    /// How to earn it
    pub description: &'static str,
    /// Emoji icon
    pub icon: &'static str,
}

const BADGE_CATALOG: [BadgeInfo; 5] = [
    BadgeInfo {
        id: BadgeId::FirstMeal,
        name: "Primeira Refeição",
        description: "Registrou sua primeira refeição!",
        icon: "🍽️",
    },
    BadgeInfo {
        id: BadgeId::TenMeals,
        name: "10 Refeições",
        description: "Registrou 10 refeições!",
        icon: "📊",
    },
    BadgeInfo {
        id: BadgeId::FiftyMeals,
        name: "50 Refeições",
        description: "Registrou 50 refeições! Você é dedicado!",
        icon: "🏆",
    },
    BadgeInfo {
        id: BadgeId::WeekStreak,
        name: "Semana Completa",
        description: "7 dias consecutivos registrando refeições!",
        icon: "🔥",
    },
    BadgeInfo {
        id: BadgeId::MonthStreak,
        name: "Mês Dedicado",
        description: "30 dias consecutivos! Incrível!",
        icon: "⭐",
    },
];

/// Metadata of every badge, in table order
#[must_use]
pub const fn badge_catalog() -> &'static [BadgeInfo] {
    &BADGE_CATALOG
}

/// Metadata of one badge
#[must_use]
pub fn badge_info(id: BadgeId) -> BadgeInfo {
    BADGE_CATALOG
        .iter()
        .copied()
        .find(|info| info.id == id)
        .unwrap_or(BadgeInfo {
            id,
            name: id.as_str(),
            description: "",
            icon: "",
        })
}

/// Badges whose threshold is met and which are not in `already_earned`
#[must_use]
pub fn evaluate(
    meal_count: u64,
    streak_count: u32,
    already_earned: &BTreeSet<BadgeId>,
    config: &GamificationConfig,
) -> BTreeSet<BadgeId> {
    BadgeId::ALL
        .into_iter()
        .filter(|badge| !already_earned.contains(badge))
        .filter(|badge| {
            let (counter, threshold) = config.threshold(*badge);
            let value = match counter {
                BadgeCounter::Meals => meal_count,
                BadgeCounter::StreakDays => u64::from(streak_count),
            };
            value >= threshold
        })
        .collect()
}

/// Append `newly_earned` to `existing`, skipping duplicates; returns what was added
///
/// Existing order is kept and additions go in table order.
pub fn merge_badges(existing: &mut Vec<BadgeId>, newly_earned: &BTreeSet<BadgeId>) -> Vec<BadgeId> {
    let mut added = Vec::new();
    for badge in newly_earned {
        if !existing.contains(badge) {
            existing.push(*badge);
            added.push(*badge);
        }
    }
    added
}

/// One row of the badge board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStatus {
    /// Badge metadata
    #[serde(flatten)]
    pub info: BadgeInfo,
    /// Whether the user holds it
    pub earned: bool,
}

/// Every badge with its earned flag
#[must_use]
pub fn badge_board(earned: &[BadgeId]) -> Vec<BadgeStatus> {
    BADGE_CATALOG
        .iter()
        .map(|info| BadgeStatus {
            info: *info,
            earned: earned.contains(&info.id),
        })
        .collect()
}
