// ABOUTME: Tests for barcode resolution against a mocked Open Food Facts API
// ABOUTME: Local table priority, product mapping, misses, caching and upstream failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::TestHarness;
use forkful_server::config::BarcodeConfig;
use forkful_server::errors::ErrorCode;
use forkful_server::external::{
    BarcodeLookup, BarcodeResolver, OpenFoodFactsClient, UnavailableRecognizer,
};
use forkful_server::services::FoodLookupService;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GUARANA: &str = "7891991000833";

fn config_for(server: &MockServer) -> BarcodeConfig {
    BarcodeConfig {
        external_enabled: true,
        base_url: server.uri(),
        timeout_secs: 5,
        cache_ttl_secs: 3600,
        cache_capacity: 16,
    }
}

fn resolver_for(server: &MockServer) -> BarcodeResolver {
    BarcodeResolver::new(Some(Arc::new(OpenFoodFactsClient::new(config_for(server)))))
}

#[tokio::test]
async fn test_found_product_is_mapped_per_100g() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v0/product/{GUARANA}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "product": {
                "product_name": "Guaraná Antarctica",
                "nutriments": {
                    "energy-kcal_100g": 41,
                    "carbohydrates_100g": "10.3",
                    "proteins_100g": 0
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = resolver_for(&server).resolve(GUARANA).await.unwrap().unwrap();

    assert_eq!(product.name, "Guaraná Antarctica");
    assert_eq!(product.source, "open_food_facts");
    assert_eq!(product.portion_label, "100g");
    assert!((product.calories - 41.0).abs() < f64::EPSILON);
    assert!((product.carbs_g - 10.3).abs() < 1e-9);
    assert!(product.fat_g.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_local_table_answers_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let product = resolver_for(&server)
        .resolve("7891000100103")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.name, "Nescau");
    assert_eq!(product.source, "local");
}

#[tokio::test]
async fn test_unknown_product_and_misses_are_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/0000000000000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "status_verbose": "product not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenFoodFactsClient::new(config_for(&server));
    assert_eq!(client.lookup("0000000000000").await.unwrap(), None);
    assert_eq!(client.lookup("0000000000000").await.unwrap(), None);
}

#[tokio::test]
async fn test_not_found_status_is_a_miss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert_eq!(resolver_for(&server).resolve("12345678").await.unwrap(), None);
}

#[tokio::test]
async fn test_upstream_failures_are_structured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/11111111.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/22222222.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/33333333.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "product": { "product_name": "Sem energia", "nutriments": {} }
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    assert_eq!(
        resolver.resolve("11111111").await.unwrap_err().code,
        ErrorCode::ExternalServiceError
    );

    let err = resolver.resolve("22222222").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
    assert_eq!(err.raw_response(), Some("<html>maintenance</html>"));

    assert_eq!(
        resolver.resolve("33333333").await.unwrap_err().code,
        ErrorCode::ExternalResponseInvalid
    );
}

#[tokio::test]
async fn test_scan_rejects_malformed_codes_before_lookup() {
    let harness = TestHarness::new();
    let service = FoodLookupService::new(
        harness.ctx.clone(),
        Arc::new(UnavailableRecognizer),
        Arc::new(BarcodeResolver::local_only()),
    );

    for bad in ["", "1234", "78910001001AB", "123456789012345"] {
        assert_eq!(
            service.scan_barcode(bad).await.unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }
    assert!(service.scan_barcode("7896004707532").await.unwrap().is_some());
    assert!(service.scan_barcode("7896004707549").await.unwrap().is_none());
}

#[tokio::test]
async fn test_catalog_search_is_case_insensitive() {
    let harness = TestHarness::new();
    let service = FoodLookupService::new(
        harness.ctx.clone(),
        Arc::new(UnavailableRecognizer),
        Arc::new(BarcodeResolver::local_only()),
    );

    let found = service.search_catalog("ARROZ").await.unwrap();
    assert!(!found.is_empty());
    assert!(found.iter().all(|f| f.name.to_lowercase().contains("arroz")));
    assert!(service.search_catalog("pizza").await.unwrap().is_empty());
}
