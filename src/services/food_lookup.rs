// ABOUTME: Food identification entry points: photo analysis, barcode scan and catalog search
// ABOUTME: Wraps the external collaborators and turns their failures into structured errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use forkful_core::models::{FoodCatalogEntry, ProductRecord};
use forkful_intelligence::search_catalog;
use tracing::{info, warn};
use uuid::Uuid;

use super::ServiceContext;
use crate::errors::{AppError, AppResult};
use crate::external::{BarcodeLookup, FoodAnalysis, FoodRecognizer};

/// Photo, barcode and catalog lookups
#[derive(Clone)]
pub struct FoodLookupService {
    ctx: ServiceContext,
    recognizer: Arc<dyn FoodRecognizer>,
    barcodes: Arc<dyn BarcodeLookup>,
}

impl FoodLookupService {
    /// Create the service
    #[must_use]
    pub fn new(
        ctx: ServiceContext,
        recognizer: Arc<dyn FoodRecognizer>,
        barcodes: Arc<dyn BarcodeLookup>,
    ) -> Self {
        Self {
            ctx,
            recognizer,
            barcodes,
        }
    }

    /// Analyze a base64-encoded food photo
    ///
    /// A `data:` URL prefix is accepted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for bad base64, or the recognizer's structured
    /// failure (`ExternalServiceUnavailable`, `ExternalResponseInvalid`, ...)
    pub async fn analyze_photo(&self, user_id: Uuid, image_base64: &str) -> AppResult<FoodAnalysis> {
        let encoded = image_base64
            .split_once(";base64,")
            .map_or(image_base64, |(_, data)| data)
            .trim();
        if encoded.is_empty() {
            return Err(AppError::missing_field("image_base64"));
        }
        let image = STANDARD
            .decode(encoded)
            .map_err(|e| AppError::invalid_format(format!("Image is not valid base64: {e}")))?;

        match self.recognizer.analyze_image(&image).await {
            Ok(analysis) => {
                info!(
                    %user_id,
                    foods = analysis.foods.len(),
                    total_calories = analysis.total_calories,
                    "Food photo analyzed"
                );
                Ok(analysis)
            }
            Err(e) => {
                warn!(%user_id, code = ?e.code, error = %e, "Food photo analysis failed");
                Err(e.with_user_id(user_id))
            }
        }
    }

    /// Look up a scanned product; `Ok(None)` when no source knows it
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a malformed code or the external lookup's failure
    pub async fn scan_barcode(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        let code = crate::external::validate_barcode(barcode)?;
        self.barcodes.lookup(code).await
    }

    /// Catalog entries whose name contains `query`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn search_catalog(&self, query: &str) -> AppResult<Vec<FoodCatalogEntry>> {
        let catalog = self.ctx.store.load_catalog().await?;
        Ok(search_catalog(&catalog, query))
    }
}
