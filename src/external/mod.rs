// ABOUTME: External collaborator clients for photo food recognition and barcode lookup
// ABOUTME: Narrow async traits with HTTP implementations and offline fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

//! External API Clients
//!
//! Both collaborators are opaque: they may be slow, unavailable or answer
//! with data we cannot interpret. Every such failure is surfaced as a
//! structured [`AppError`](crate::errors::AppError) rather than a zeroed result.

pub mod barcode;
pub mod food_recognition;

use std::sync::Arc;

use crate::config::{BarcodeConfig, FoodRecognitionConfig};

pub use barcode::{
    validate_barcode, BarcodeLookup, BarcodeResolver, LocalBarcodeTable, OpenFoodFactsClient,
};
pub use food_recognition::{
    parse_food_analysis, FoodAnalysis, FoodRecognizer, RecognizedFood, UnavailableRecognizer,
    VisionChatRecognizer,
};

/// Recognizer selected by the enabled features
#[must_use]
pub fn build_recognizer(config: &FoodRecognitionConfig) -> Arc<dyn FoodRecognizer> {
    if cfg!(feature = "food-recognition") {
        Arc::new(VisionChatRecognizer::new(config.clone()))
    } else {
        Arc::new(UnavailableRecognizer)
    }
}

/// Local table, backed by Open Food Facts when the feature and config both allow it
#[must_use]
pub fn build_barcode_resolver(config: &BarcodeConfig) -> BarcodeResolver {
    if config.external_enabled && cfg!(feature = "barcode-external") {
        BarcodeResolver::new(Some(Arc::new(OpenFoodFactsClient::new(config.clone()))))
    } else {
        BarcodeResolver::local_only()
    }
}
