// ABOUTME: Folds meal records into totals and calendar-bucketed series
// ABOUTME: Daily, weekly (gap-free days) and monthly (ISO weeks with data) summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! Nutrition Aggregator
//!
//! All functions work on an already-fetched snapshot of records. Sums are
//! accumulated unrounded; the summary types round to two decimals when they
//! are built.
//!
//! The weekly view emits one bucket per calendar day, including empty days.
//! The monthly view emits one bucket per ISO week that has at least one
//! record, so empty weeks are absent.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use forkful_core::clock::ReferenceTimeZone;
use forkful_core::constants::tracking::{MONTHLY_WINDOW_DAYS, OUTPUT_DECIMALS, WEEKLY_WINDOW_DAYS};
use forkful_core::models::{round_to, MacroTotals, MealRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive instant window with the zone used to derive its calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant (inclusive)
    pub start: DateTime<Utc>,
    /// Last instant (inclusive)
    pub end: DateTime<Utc>,
    /// Zone for calendar-day bucketing
    pub tz: ReferenceTimeZone,
}

impl DateRange {
    /// Window between two instants
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>, tz: ReferenceTimeZone) -> Self {
        Self { start, end, tz }
    }

    /// Window covering whole calendar days `first..=last`
    #[must_use]
    pub fn for_days(tz: ReferenceTimeZone, first: NaiveDate, last: NaiveDate) -> Self {
        let (start, _) = tz.day_bounds(first);
        let (_, end) = tz.day_bounds(last);
        Self { start, end, tz }
    }

    /// The `days` calendar days ending with `today` (at least one)
    ///
    /// A window reaching past the earliest representable date starts there.
    #[must_use]
    pub fn trailing_days(tz: ReferenceTimeZone, today: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.max(1) - 1);
        let first = today
            .checked_sub_days(Days::new(span))
            .unwrap_or(NaiveDate::MIN);
        Self::for_days(tz, first, today)
    }

    /// True when `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Calendar days of the window in chronological order
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.tz.local_date(self.start);
        let last = self.tz.local_date(self.end);
        first.iter_days().take_while(|day| *day <= last).collect()
    }
}

/// Totals of one calendar day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DayBucket {
    /// Calendar date
    pub date: NaiveDate,
    /// Summed calories and macros
    pub totals: MacroTotals,
    /// Meals on that day
    pub meal_count: u32,
}

impl DayBucket {
    const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            totals: MacroTotals {
                calories: 0.0,
                carbs_g: 0.0,
                protein_g: 0.0,
                fat_g: 0.0,
            },
            meal_count: 0,
        }
    }

    fn rounded(&self) -> Self {
        Self {
            totals: self.totals.rounded(OUTPUT_DECIMALS),
            ..*self
        }
    }
}

/// Result of folding records over a window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionAggregate {
    /// Sum across every record in the window
    pub totals: MacroTotals,
    /// One bucket per calendar day of the window, gap-free
    pub per_day: Vec<DayBucket>,
    /// Records in the window
    pub meal_count: u32,
}

impl NutritionAggregate {
    /// Copy rounded to the output precision
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            totals: self.totals.rounded(OUTPUT_DECIMALS),
            per_day: self.per_day.iter().map(DayBucket::rounded).collect(),
            meal_count: self.meal_count,
        }
    }
}

/// Sum records whose `logged_at` is inside `window`, bucketed per calendar day
#[must_use]
pub fn aggregate(records: &[MealRecord], window: &DateRange) -> NutritionAggregate {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = window
        .days()
        .into_iter()
        .map(|day| (day, DayBucket::empty(day)))
        .collect();
    let mut totals = MacroTotals::default();
    let mut meal_count = 0_u32;

    for record in records.iter().filter(|r| window.contains(r.logged_at)) {
        let macros = record.macros();
        totals.add(&macros);
        meal_count += 1;

        let day = window.tz.local_date(record.logged_at);
        let bucket = buckets.entry(day).or_insert_with(|| DayBucket::empty(day));
        bucket.totals.add(&macros);
        bucket.meal_count += 1;
    }

    NutritionAggregate {
        totals,
        per_day: buckets.into_values().collect(),
        meal_count,
    }
}

/// Seven-day view ending today
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// First day of the window
    pub start_date: NaiveDate,
    /// Last day of the window (today)
    pub end_date: NaiveDate,
    /// Totals over the window
    pub totals: MacroTotals,
    /// Gap-free per-day series
    pub per_day: Vec<DayBucket>,
    /// Total calories divided by the window length
    pub average_daily_calories: f64,
    /// Daily target when defined
    pub target_calories: Option<f64>,
    /// Meals in the window
    pub meal_count: u32,
}

/// Seven-day totals, per-day series and average ending with `today`
#[must_use]
pub fn weekly_summary(
    records: &[MealRecord],
    tz: ReferenceTimeZone,
    today: NaiveDate,
    target: Option<f64>,
) -> WeeklySummary {
    let window = DateRange::trailing_days(tz, today, WEEKLY_WINDOW_DAYS);
    let agg = aggregate(records, &window);
    let average = agg.totals.calories / f64::from(WEEKLY_WINDOW_DAYS);
    let rounded = agg.rounded();

    WeeklySummary {
        start_date: tz.local_date(window.start),
        end_date: today,
        totals: rounded.totals,
        per_day: rounded.per_day,
        average_daily_calories: round_to(average, OUTPUT_DECIMALS),
        target_calories: target.map(|t| round_to(t, OUTPUT_DECIMALS)),
        meal_count: agg.meal_count,
    }
}

/// Totals of one ISO week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekBucket {
    /// Label `YYYY-Www`
    pub week: String,
    /// ISO week-numbering year
    pub iso_year: i32,
    /// ISO week number (1-53)
    pub iso_week: u32,
    /// Summed calories and macros
    pub totals: MacroTotals,
    /// Meals in the week
    pub meal_count: u32,
}

/// Thirty-day view grouped by ISO week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    /// First day of the window
    pub start_date: NaiveDate,
    /// Last day of the window (today)
    pub end_date: NaiveDate,
    /// Meals in the window
    pub total_meals: u32,
    /// Totals over the window
    pub totals: MacroTotals,
    /// Weeks that have data, chronological
    pub weeks: Vec<WeekBucket>,
}

/// Thirty-day totals grouped by ISO week, omitting weeks without records
#[must_use]
pub fn monthly_summary(
    records: &[MealRecord],
    tz: ReferenceTimeZone,
    today: NaiveDate,
) -> MonthlySummary {
    let window = DateRange::trailing_days(tz, today, MONTHLY_WINDOW_DAYS);
    let agg = aggregate(records, &window);

    let mut weeks: BTreeMap<(i32, u32), (MacroTotals, u32)> = BTreeMap::new();
    for bucket in agg.per_day.iter().filter(|b| b.meal_count > 0) {
        let iso = bucket.date.iso_week();
        let entry = weeks.entry((iso.year(), iso.week())).or_default();
        entry.0.add(&bucket.totals);
        entry.1 += bucket.meal_count;
    }

    MonthlySummary {
        start_date: tz.local_date(window.start),
        end_date: today,
        total_meals: agg.meal_count,
        totals: agg.totals.rounded(OUTPUT_DECIMALS),
        weeks: weeks
            .into_iter()
            .map(|((iso_year, iso_week), (totals, meal_count))| WeekBucket {
                week: format!("{iso_year}-W{iso_week:02}"),
                iso_year,
                iso_week,
                totals: totals.rounded(OUTPUT_DECIMALS),
                meal_count,
            })
            .collect(),
    }
}

/// One day's meals and progress against the target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    /// Calendar date
    pub date: NaiveDate,
    /// Meals of the day, oldest first
    pub meals: Vec<MealRecord>,
    /// Totals of the day
    pub totals: MacroTotals,
    /// Daily target when defined
    pub target_calories: Option<f64>,
    /// Target minus consumed calories; negative when over
    pub remaining_calories: Option<f64>,
}

/// Meals and totals of `day`
#[must_use]
pub fn daily_summary(
    records: &[MealRecord],
    tz: ReferenceTimeZone,
    day: NaiveDate,
    target: Option<f64>,
) -> DailySummary {
    let window = DateRange::for_days(tz, day, day);
    let agg = aggregate(records, &window);

    let mut meals: Vec<MealRecord> = records
        .iter()
        .filter(|r| window.contains(r.logged_at))
        .cloned()
        .collect();
    meals.sort_by_key(|m| m.logged_at);

    DailySummary {
        date: day,
        meals,
        totals: agg.totals.rounded(OUTPUT_DECIMALS),
        target_calories: target.map(|t| round_to(t, OUTPUT_DECIMALS)),
        remaining_calories: target.map(|t| round_to(t - agg.totals.calories, OUTPUT_DECIMALS)),
    }
}

/// Meals of one day in the history view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Meals of the day, newest first
    pub meals: Vec<MealRecord>,
    /// Summed calories
    pub total_calories: f64,
}

/// Meals of the last `days` days grouped by date, newest day first
///
/// Only days with at least one meal appear.
#[must_use]
pub fn history_by_day(
    records: &[MealRecord],
    tz: ReferenceTimeZone,
    today: NaiveDate,
    days: u32,
) -> Vec<HistoryDay> {
    let window = DateRange::trailing_days(tz, today, days);
    let mut grouped: BTreeMap<NaiveDate, Vec<MealRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| window.contains(r.logged_at)) {
        grouped
            .entry(tz.local_date(record.logged_at))
            .or_default()
            .push(record.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, mut meals)| {
            meals.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
            let total: f64 = meals.iter().map(|m| m.calories).sum();
            HistoryDay {
                date,
                meals,
                total_calories: round_to(total, OUTPUT_DECIMALS),
            }
        })
        .collect()
}
