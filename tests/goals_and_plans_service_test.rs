// ABOUTME: Integration tests for goals, meal plans and the badge overview
// ABOUTME: Goal completion, active plan rotation, missing targets and streak display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::Duration;
use common::{base_instant, date, new_meal, TestHarness};
use forkful_server::clock::FixedClock;
use forkful_server::config::{IntelligenceConfig, ServerConfig};
use forkful_server::database_plugins::{InMemoryStore, NutritionStore};
use forkful_server::errors::ErrorCode;
use forkful_server::models::{BadgeId, FoodCatalogEntry, FoodCategory, NewGoal};
use forkful_server::services::{
    GamificationService, GoalService, MealLoggingService, MealPlanService, ProfileService,
    ServiceContext,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn water_goal() -> NewGoal {
    NewGoal {
        goal_type: "water".to_owned(),
        target_value: 8.0,
        current_value: 0.0,
        description: "Beber 8 copos por dia".to_owned(),
    }
}

#[tokio::test]
async fn test_create_and_list_goals() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let goals = GoalService::new(harness.ctx.clone());

    let created = goals.create_goal(user_id, water_goal()).await.unwrap();
    assert!(!created.completed);
    assert_eq!(created.completed_at, None);
    assert_eq!(created.created_at, base_instant());

    let listed = goals.list_goals(user_id).await.unwrap();
    assert_eq!(listed, vec![created]);
    assert!(goals.list_goals(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_completing_twice_keeps_first_timestamp() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let goals = GoalService::new(harness.ctx.clone());
    let goal = goals.create_goal(user_id, water_goal()).await.unwrap();

    harness.clock.advance(Duration::hours(2));
    let first = goals.complete_goal(user_id, goal.id).await.unwrap();
    assert!(first.completed);
    let completed_at = first.completed_at.unwrap();

    harness.advance_days(1);
    let second = goals.complete_goal(user_id, goal.id).await.unwrap();
    assert_eq!(second.completed_at, Some(completed_at));
    assert_eq!(
        goals.list_goals(user_id).await.unwrap()[0].completed_at,
        Some(completed_at)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_completions_set_one_timestamp() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let goal_id = GoalService::new(harness.ctx.clone())
        .create_goal(user_id, water_goal())
        .await
        .unwrap()
        .id;

    let handles: Vec<_> = (1..=8)
        .map(|minutes| {
            let store = harness.store.clone();
            let at = base_instant() + Duration::minutes(minutes);
            tokio::spawn(async move { store.complete_goal(user_id, goal_id, at).await })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        let (stored, completed_now) = handle.await.unwrap().unwrap().unwrap();
        assert!(stored.completed);
        if completed_now {
            winners.push(stored.completed_at);
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = harness.store.load_goal(user_id, goal_id).await.unwrap().unwrap();
    assert_eq!(stored.completed_at, winners[0]);
    assert!(harness
        .store
        .complete_goal(Uuid::new_v4(), goal_id, base_instant())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_goal_validation_and_ownership() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let goals = GoalService::new(harness.ctx.clone());

    let err = goals
        .create_goal(
            user_id,
            NewGoal {
                goal_type: " ".to_owned(),
                ..water_goal()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let goal = goals.create_goal(user_id, water_goal()).await.unwrap();
    let err = goals.complete_goal(Uuid::new_v4(), goal.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.context.resource_id, Some(goal.id.to_string()));
}

#[tokio::test]
async fn test_plan_requires_calorie_target() {
    let harness = TestHarness::new();
    let plans = MealPlanService::new(harness.ctx.clone());

    let bare = harness.register_bare_user().await;
    let err = plans.generate_plan(bare).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(plans.list_plans(bare).await.unwrap().is_empty());

    let err = plans.generate_plan(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_only_latest_plan_is_active() {
    let harness = TestHarness::new();
    let user_id = harness.register_complete_user().await;
    let plans = MealPlanService::new(harness.ctx.clone());

    let first = plans.generate_plan(user_id).await.unwrap();
    harness.advance_days(1);
    let second = plans.generate_plan(user_id).await.unwrap();

    assert_eq!(second.days.len(), 7);
    assert!((second.target_calories - 2625.3125).abs() < 1e-9);
    assert_eq!(second.name, "Plano Semanal - 11/06/2025");

    let listed = plans.list_plans(user_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert!(listed[0].active);
    assert_eq!(listed[1].id, first.id);
    assert!(!listed[1].active);
}

#[tokio::test]
async fn test_seeded_plans_are_reproducible() {
    let harness = TestHarness::new();
    let user_id = harness.register_complete_user().await;
    let plans = MealPlanService::new(harness.ctx.clone());

    let a = plans
        .generate_plan_with(user_id, &mut ChaCha8Rng::seed_from_u64(11))
        .await
        .unwrap();
    let b = plans
        .generate_plan_with(user_id, &mut ChaCha8Rng::seed_from_u64(11))
        .await
        .unwrap();
    assert_eq!(a.days, b.days);
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_plan_uses_the_stored_catalog() {
    common::init_test_logging();
    let store = Arc::new(InMemoryStore::with_catalog(vec![FoodCatalogEntry::new(
        "Frango grelhado",
        FoodCategory::Protein,
        165.0,
        0.0,
        31.0,
        3.6,
        "100g",
    )]));
    let ctx = ServiceContext::new(
        store,
        Arc::new(FixedClock::new(base_instant())),
        ServerConfig::default(),
        IntelligenceConfig::default(),
    );
    let user_id = Uuid::new_v4();
    ProfileService::new(ctx.clone())
        .register_profile(user_id, "Eva", common::complete_profile_update())
        .await
        .unwrap();

    let plan = MealPlanService::new(ctx).generate_plan(user_id).await.unwrap();
    for day in &plan.days {
        assert!(day.meals.breakfast.is_empty());
        assert_eq!(day.meals.lunch.len(), 1);
        assert_eq!(day.meals.dinner.len(), 1);
        assert!(day.meals.snack.is_empty());
    }
}

#[tokio::test]
async fn test_badge_overview_reflects_activity() {
    let harness = TestHarness::new();
    let user_id = harness.register_complete_user().await;
    let gamification = GamificationService::new(harness.ctx.clone());

    let empty = gamification.badges(user_id).await.unwrap();
    assert_eq!(empty.streak_count, 0);
    assert_eq!(empty.last_activity_date, None);
    assert!(empty.badges.iter().all(|b| !b.earned));

    MealLoggingService::new(harness.ctx.clone())
        .log_meal(user_id, new_meal("Cuscuz", 350.0))
        .await
        .unwrap();

    let overview = gamification.badges(user_id).await.unwrap();
    assert_eq!(overview.streak_count, 1);
    assert_eq!(overview.last_activity_date, Some(date(2025, 6, 10)));
    let earned: Vec<BadgeId> = overview
        .badges
        .iter()
        .filter(|b| b.earned)
        .map(|b| b.info.id)
        .collect();
    assert_eq!(earned, vec![BadgeId::FirstMeal]);

    // A missed day lapses the displayed streak without touching stored badges
    harness.advance_days(2);
    let lapsed = gamification.badges(user_id).await.unwrap();
    assert_eq!(lapsed.streak_count, 0);
    assert!(lapsed.badges[0].earned);
}

#[tokio::test]
async fn test_badge_overview_requires_profile() {
    let harness = TestHarness::new();
    let err = GamificationService::new(harness.ctx.clone())
        .badges(Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
