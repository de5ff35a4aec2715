// ABOUTME: Forkful CLI - run the nutrition computations from the command line
// ABOUTME: Daily calorie target, weekly meal plan generation and badge evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors
//!
//! Usage:
//! ```bash
//! # Daily calorie target
//! forkful-cli target --weight 70.5 --height 175 --age 22 --gender male --activity moderate
//!
//! # Reproducible weekly plan for 2000 kcal
//! forkful-cli plan --calories 2000 --seed 42
//!
//! # Badges for 12 meals and a 7 day streak, first_meal already earned
//! forkful-cli badges --meals 12 --streak 7 --earned first_meal
//! ```

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use forkful_server::config::IntelligenceConfig;
use forkful_server::intelligence::{
    badge_info, compute_breakdown, default_catalog, evaluate, generate, DailyTargetInputs,
};
use forkful_server::logging::{LogFormat, LoggingConfig};
use forkful_server::models::{ActivityLevel, BadgeId, Gender, MealPlan, NutritionGoal};
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "forkful-cli",
    about = "Forkful nutrition calculations",
    long_about = "Compute calorie targets, generate weekly meal plans and evaluate badges without a running server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute the daily calorie target (Mifflin-St Jeor)
    Target {
        /// Body weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// male, female or other
        #[arg(long)]
        gender: String,

        /// sedentary, light, moderate, active or very_active
        #[arg(long, default_value = "moderate")]
        activity: String,

        /// lose_weight, gain_weight or healthy_eating
        #[arg(long, default_value = "healthy_eating")]
        goal: String,
    },

    /// Generate a weekly meal plan from the built-in catalog
    Plan {
        /// Daily calorie target
        #[arg(long)]
        calories: f64,

        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate which badges the given counters earn
    Badges {
        /// Total meals logged
        #[arg(long)]
        meals: u64,

        /// Current streak in days
        #[arg(long, default_value = "0")]
        streak: u32,

        /// Badges already earned (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        earned: Vec<String>,
    },
}

fn parse_badge(id: &str) -> Result<BadgeId> {
    BadgeId::ALL
        .into_iter()
        .find(|badge| badge.as_str() == id.trim())
        .with_context(|| format!("Unknown badge id: {id}"))
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    logging.format = LogFormat::Compact;
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = IntelligenceConfig::global();
    debug!(?config, "Intelligence configuration loaded");

    let output = match cli.command {
        Command::Target {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
        } => {
            let inputs = DailyTargetInputs {
                weight_kg: weight,
                height_cm: height,
                age_years: age,
                gender: Gender::from_str_lossy(&gender),
                activity_level: ActivityLevel::from_str_lossy(&activity),
                goal: NutritionGoal::from_str_lossy(&goal),
            };
            let breakdown = compute_breakdown(&inputs, &config.nutrition);
            info!(target = breakdown.target, "Daily target computed");
            json!({ "inputs": inputs, "breakdown": breakdown })
        }
        Command::Plan { calories, seed } => {
            let seed = seed.unwrap_or_else(|| thread_rng().gen());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let days = generate(calories, &default_catalog(), &config.meal_plan, &mut rng);
            let plan = MealPlan::new(Uuid::nil(), calories, days, Utc::now());
            info!(seed, days = plan.days.len(), "Meal plan generated");
            json!({ "seed": seed, "plan": plan })
        }
        Command::Badges {
            meals,
            streak,
            earned,
        } => {
            let already: BTreeSet<BadgeId> = earned
                .iter()
                .filter(|id| !id.trim().is_empty())
                .map(|id| parse_badge(id))
                .collect::<Result<_>>()?;
            let newly = evaluate(meals, streak, &already, &config.gamification);
            let details: Vec<_> = newly.iter().map(|id| badge_info(*id)).collect();
            json!({ "newly_earned": newly, "badges": details })
        }
    };

    print_json(&output, cli.pretty)
}
