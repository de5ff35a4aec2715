// ABOUTME: Photo food recognition through an OpenAI-compatible vision chat endpoint
// ABOUTME: FoodRecognizer trait, VisionChatRecognizer client and tolerant response parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use forkful_core::models::MealType;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::FoodRecognitionConfig;
use crate::errors::{AppError, AppResult, RAW_PAYLOAD_LIMIT};

const SERVICE: &str = "Food recognition";

const SYSTEM_PROMPT: &str =
    "You are a nutrition expert. Analyze food images and provide detailed nutritional information.";

const ANALYSIS_PROMPT: &str = r#"Analyze this food image and provide a detailed nutritional breakdown in JSON format.

Please identify all foods visible and return ONLY a valid JSON object (no markdown, no extra text) with this exact structure:
{
    "foods": [
        {
            "name": "food name in Portuguese",
            "portion_size": "estimated portion (e.g., '1 prato', '200g')",
            "calories": number,
            "carbs": number in grams,
            "protein": number in grams,
            "fat": number in grams
        }
    ],
    "total_calories": number,
    "total_carbs": number,
    "total_protein": number,
    "total_fat": number,
    "meal_type_suggestion": "breakfast, lunch, dinner, or snack"
}

Be accurate with Brazilian food portions and names."#;

/// One food identified in a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFood {
    /// Food name (Portuguese)
    pub name: String,
    /// Estimated portion, free text
    #[serde(default)]
    pub portion_size: String,
    /// Estimated energy (kcal)
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Protein (g)
    pub protein: f64,
    /// Fat (g)
    pub fat: f64,
}

/// Structured result of a photo analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    /// Foods visible in the photo
    pub foods: Vec<RecognizedFood>,
    /// Energy of the whole plate (kcal)
    pub total_calories: f64,
    /// Carbohydrates of the whole plate (g)
    pub total_carbs: f64,
    /// Protein of the whole plate (g)
    pub total_protein: f64,
    /// Fat of the whole plate (g)
    pub total_fat: f64,
    /// Model's guess of the meal slot
    #[serde(default)]
    pub meal_type_suggestion: Option<String>,
}

impl FoodAnalysis {
    /// Suggested meal slot, when the model named a known one
    #[must_use]
    pub fn suggested_meal_type(&self) -> Option<MealType> {
        self.meal_type_suggestion
            .as_deref()
            .and_then(MealType::from_str_lossy)
    }
}

/// Opaque photo analysis collaborator
#[async_trait]
pub trait FoodRecognizer: Send + Sync {
    /// Identify foods and estimate macros from raw image bytes
    async fn analyze_image(&self, image: &[u8]) -> AppResult<FoodAnalysis>;
}

/// Parse the model's text answer into a [`FoodAnalysis`]
///
/// Markdown code fences around the JSON are tolerated.
///
/// # Errors
///
/// Returns `ExternalResponseInvalid` with the raw text attached when the
/// answer is not the expected JSON object
pub fn parse_food_analysis(raw: &str) -> AppResult<FoodAnalysis> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, "Food analysis response is not valid JSON");
        AppError::external_invalid(SERVICE, "Failed to parse nutrition data", raw).with_source(e)
    })
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    // Drop the opening fence line (```json) and the closing fence
    let body = trimmed.split_once('\n').map_or("", |(_, rest)| rest);
    body.trim_end().trim_end_matches("```").trim()
}

// Chat completion envelope, only the fields we read
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Vision model client speaking the chat-completions protocol
pub struct VisionChatRecognizer {
    config: FoodRecognitionConfig,
    http_client: reqwest::Client,
}

impl VisionChatRecognizer {
    /// Create a client; a missing API key is reported on first use
    #[must_use]
    pub fn new(config: FoodRecognitionConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
        }
    }

    fn request_body(&self, image: &[u8]) -> serde_json::Value {
        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(image));
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": ANALYSIS_PROMPT },
                        { "type": "image_url", "image_url": { "url": data_url } }
                    ]
                }
            ]
        })
    }
}

#[async_trait]
impl FoodRecognizer for VisionChatRecognizer {
    async fn analyze_image(&self, image: &[u8]) -> AppResult<FoodAnalysis> {
        if image.is_empty() {
            return Err(AppError::invalid_input("Image cannot be empty"));
        }
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(AppError::external_unavailable(
                SERVICE,
                "Vision API key not configured",
            ));
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(model = %self.config.model, image_bytes = image.len(), "Requesting food analysis");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(image))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AppError::external_unavailable(SERVICE, e.to_string())
                } else {
                    AppError::external_service(SERVICE, e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        if !status.is_success() {
            let raw: String = body.chars().take(RAW_PAYLOAD_LIMIT).collect();
            return Err(AppError::external_service(SERVICE, format!("HTTP {status}"))
                .with_details(json!({ "raw_response": raw })));
        }

        let envelope: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_invalid(SERVICE, format!("Unexpected response shape: {e}"), &body)
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::external_invalid(SERVICE, "Response contained no message", &body)
            })?;

        parse_food_analysis(&content)
    }
}

/// Recognizer used when photo analysis is compiled out
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRecognizer;

#[async_trait]
impl FoodRecognizer for UnavailableRecognizer {
    async fn analyze_image(&self, _image: &[u8]) -> AppResult<FoodAnalysis> {
        Err(AppError::external_unavailable(
            SERVICE,
            "Food recognition is disabled in this build",
        ))
    }
}
