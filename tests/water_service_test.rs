// ABOUTME: Integration tests for the per-day water counter
// ABOUTME: Increments, validation, day rollover and concurrent increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{date, TestHarness};
use forkful_server::config::ServerConfig;
use forkful_server::errors::ErrorCode;
use forkful_server::services::WaterService;
use uuid::Uuid;

#[tokio::test]
async fn test_increments_accumulate() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let service = WaterService::new(harness.ctx.clone());

    let first = service.log_water(user_id, 2).await.unwrap();
    assert_eq!(first.glasses_count, 2);
    assert_eq!(first.target, 8);
    assert_eq!(first.date, date(2025, 6, 10));

    let second = service.log_water(user_id, 3).await.unwrap();
    assert_eq!(second.glasses_count, 5);

    let status = service.water_status(user_id, None).await.unwrap();
    assert_eq!(status.glasses_count, 5);
}

#[tokio::test]
async fn test_zero_glasses_rejected() {
    let harness = TestHarness::new();
    let err = WaterService::new(harness.ctx.clone())
        .log_water(Uuid::new_v4(), 0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test]
async fn test_counter_is_per_day() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let service = WaterService::new(harness.ctx.clone());

    service.log_water(user_id, 4).await.unwrap();
    harness.advance_days(1);

    let today = service.water_status(user_id, None).await.unwrap();
    assert_eq!(today.date, date(2025, 6, 11));
    assert_eq!(today.glasses_count, 0);

    let yesterday = service
        .water_status(user_id, Some(date(2025, 6, 10)))
        .await
        .unwrap();
    assert_eq!(yesterday.glasses_count, 4);

    assert_eq!(service.log_water(user_id, 1).await.unwrap().glasses_count, 1);
}

#[tokio::test]
async fn test_target_comes_from_config() {
    let mut config = ServerConfig::default();
    config.tracking.water_target_glasses = 10;
    let harness = TestHarness::with_config(config);

    let status = WaterService::new(harness.ctx.clone())
        .water_status(Uuid::new_v4(), None)
        .await
        .unwrap();
    assert_eq!(status.target, 10);
    assert_eq!(status.glasses_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_sum_exactly() {
    let mut config = ServerConfig::default();
    config.tracking.max_update_retries = 100;
    let harness = TestHarness::with_config(config);
    let user_id = Uuid::new_v4();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = WaterService::new(harness.ctx.clone());
            tokio::spawn(async move { service.log_water(user_id, 1).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let status = WaterService::new(harness.ctx.clone())
        .water_status(user_id, None)
        .await
        .unwrap();
    assert_eq!(status.glasses_count, 16);
}
