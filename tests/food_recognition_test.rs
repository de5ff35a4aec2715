// ABOUTME: Tests for photo analysis against a mocked chat-completions endpoint
// ABOUTME: Fenced JSON answers, unparsable answers, upstream errors and missing keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::TestHarness;
use forkful_server::config::FoodRecognitionConfig;
use forkful_server::errors::ErrorCode;
use forkful_server::external::{
    BarcodeResolver, FoodRecognizer, UnavailableRecognizer, VisionChatRecognizer,
};
use forkful_server::models::MealType;
use forkful_server::services::FoodLookupService;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

fn config_for(server: &MockServer, api_key: Option<&str>) -> FoodRecognitionConfig {
    FoodRecognitionConfig {
        base_url: server.uri(),
        model: "vision-test".to_owned(),
        api_key: api_key.map(str::to_owned),
        timeout_secs: 5,
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

async fn mount_answer(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fenced_json_answer_is_parsed() {
    let server = MockServer::start().await;
    let answer = "```json\n{\"foods\":[{\"name\":\"Arroz\",\"portion_size\":\"1 xícara\",\
                  \"calories\":200,\"carbs\":44,\"protein\":4,\"fat\":0.5}],\
                  \"total_calories\":200,\"total_carbs\":44,\"total_protein\":4,\
                  \"total_fat\":0.5,\"meal_type_suggestion\":\"lunch\"}\n```";
    mount_answer(&server, ResponseTemplate::new(200).set_body_json(completion(answer))).await;

    let recognizer = VisionChatRecognizer::new(config_for(&server, Some("test-key")));
    let analysis = recognizer.analyze_image(FAKE_JPEG).await.unwrap();

    assert_eq!(analysis.foods.len(), 1);
    assert_eq!(analysis.foods[0].name, "Arroz");
    assert_eq!(analysis.foods[0].portion_size, "1 xícara");
    assert!((analysis.total_calories - 200.0).abs() < f64::EPSILON);
    assert_eq!(analysis.suggested_meal_type(), Some(MealType::Lunch));
}

#[tokio::test]
async fn test_unparsable_answer_keeps_raw_text() {
    let server = MockServer::start().await;
    let answer = "Parece um prato de arroz com feijão, cerca de 500 calorias.";
    mount_answer(&server, ResponseTemplate::new(200).set_body_json(completion(answer))).await;

    let err = VisionChatRecognizer::new(config_for(&server, Some("test-key")))
        .analyze_image(FAKE_JPEG)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
    assert_eq!(err.raw_response(), Some(answer));
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    mount_answer(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
    )
    .await;

    let err = VisionChatRecognizer::new(config_for(&server, Some("test-key")))
        .analyze_image(FAKE_JPEG)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    mount_answer(
        &server,
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
    )
    .await;

    let err = VisionChatRecognizer::new(config_for(&server, Some("test-key")))
        .analyze_image(FAKE_JPEG)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.raw_response(), Some("upstream exploded"));
}

#[tokio::test]
async fn test_missing_api_key_is_unavailable_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = VisionChatRecognizer::new(config_for(&server, None))
        .analyze_image(FAKE_JPEG)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_photo_service_decodes_data_urls() {
    let server = MockServer::start().await;
    let answer = r#"{"foods":[],"total_calories":0,"total_carbs":0,"total_protein":0,"total_fat":0}"#;
    mount_answer(&server, ResponseTemplate::new(200).set_body_json(completion(answer))).await;

    let harness = TestHarness::new();
    let service = FoodLookupService::new(
        harness.ctx.clone(),
        Arc::new(VisionChatRecognizer::new(config_for(&server, Some("test-key")))),
        Arc::new(BarcodeResolver::local_only()),
    );

    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(FAKE_JPEG));
    let analysis = service.analyze_photo(Uuid::new_v4(), &data_url).await.unwrap();
    assert!(analysis.foods.is_empty());
    assert_eq!(analysis.suggested_meal_type(), None);
}

#[tokio::test]
async fn test_photo_service_input_errors() {
    let harness = TestHarness::new();
    let user_id = Uuid::new_v4();
    let service = FoodLookupService::new(
        harness.ctx.clone(),
        Arc::new(UnavailableRecognizer),
        Arc::new(BarcodeResolver::local_only()),
    );

    let err = service.analyze_photo(user_id, "  ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let err = service.analyze_photo(user_id, "not base64 at all!").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    let err = service
        .analyze_photo(user_id, &STANDARD.encode(FAKE_JPEG))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(err.context.user_id, Some(user_id));
}
