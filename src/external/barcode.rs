// ABOUTME: Barcode product lookup against a static local table and Open Food Facts
// ABOUTME: BarcodeLookup trait, LRU+TTL cached network client and local-first resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkful Contributors

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use forkful_core::models::ProductRecord;
use lru::LruCache;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::BarcodeConfig;
use crate::constants::external::{MAX_BARCODE_DIGITS, MIN_BARCODE_DIGITS};
use crate::errors::{AppError, AppResult};

const SERVICE: &str = "Open Food Facts";

/// Source tag of products served from the static table
pub const LOCAL_SOURCE: &str = "local";
/// Source tag of products fetched from Open Food Facts
pub const OPEN_FOOD_FACTS_SOURCE: &str = "open_food_facts";

/// Normalize and check a scanned barcode (8 to 14 digits)
///
/// # Errors
///
/// Returns `InvalidFormat` when the code has non-digit characters or a bad length
pub fn validate_barcode(barcode: &str) -> AppResult<&str> {
    let code = barcode.trim();
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_format("Barcode must contain only digits"));
    }
    if !(MIN_BARCODE_DIGITS..=MAX_BARCODE_DIGITS).contains(&code.len()) {
        return Err(AppError::invalid_format(format!(
            "Barcode must have between {MIN_BARCODE_DIGITS} and {MAX_BARCODE_DIGITS} digits"
        )));
    }
    Ok(code)
}

/// Product lookup collaborator
#[async_trait]
pub trait BarcodeLookup: Send + Sync {
    /// Find the product for an already validated barcode
    async fn lookup(&self, barcode: &str) -> AppResult<Option<ProductRecord>>;
}

/// Common Brazilian products known without a network call
#[derive(Debug, Clone)]
pub struct LocalBarcodeTable {
    products: Vec<ProductRecord>,
}

impl Default for LocalBarcodeTable {
    fn default() -> Self {
        let product = |barcode: &str, name: &str, macros: [f64; 4], portion: &str| ProductRecord {
            barcode: barcode.to_owned(),
            name: name.to_owned(),
            calories: macros[0],
            carbs_g: macros[1],
            protein_g: macros[2],
            fat_g: macros[3],
            portion_label: portion.to_owned(),
            source: LOCAL_SOURCE.to_owned(),
        };

        Self {
            products: vec![
                product("7891000100103", "Nescau", [90.0, 18.0, 3.0, 1.5], "200ml"),
                product("7891000244753", "Leite Ninho", [150.0, 12.0, 8.0, 8.0], "200ml"),
                product("7891000253595", "Neston", [130.0, 23.0, 4.0, 2.0], "30g"),
                product("7896004707532", "Arroz Tio João", [130.0, 28.0, 2.5, 0.5], "100g"),
                product("7891000100004", "Chocolate Bis", [110.0, 14.0, 1.5, 5.5], "unidade"),
            ],
        }
    }
}

impl LocalBarcodeTable {
    /// Synchronous lookup in the static table
    #[must_use]
    pub fn get(&self, barcode: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// Number of known products
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl BarcodeLookup for LocalBarcodeTable {
    async fn lookup(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        Ok(self.get(barcode).cloned())
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    status: i64,
    #[serde(default)]
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Map<String, Value>,
}

/// Open Food Facts product API client
///
/// Hits and misses are both cached for the configured TTL.
pub struct OpenFoodFactsClient {
    config: BarcodeConfig,
    http_client: reqwest::Client,
    cache: Mutex<LruCache<String, CacheEntry<Option<ProductRecord>>>>,
}

impl OpenFoodFactsClient {
    /// Create a new client
    #[must_use]
    pub fn new(config: BarcodeConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("forkful/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            config,
            http_client,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    async fn cached(&self, barcode: &str) -> Option<Option<ProductRecord>> {
        let mut cache = self.cache.lock().await;
        match cache.get(barcode) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.data.clone()),
            Some(_) => {
                cache.pop(barcode);
                None
            }
            None => None,
        }
    }

    async fn store(&self, barcode: &str, product: Option<ProductRecord>) {
        let mut cache = self.cache.lock().await;
        cache.put(
            barcode.to_owned(),
            CacheEntry {
                data: product,
                expires_at: Instant::now() + self.config.cache_ttl(),
            },
        );
    }

    async fn fetch(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        let url = format!(
            "{}/api/v0/product/{barcode}.json",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                AppError::external_unavailable(SERVICE, e.to_string())
            } else {
                AppError::external_service(SERVICE, e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;
        if !status.is_success() {
            return Err(AppError::external_service(SERVICE, format!("HTTP {status}")));
        }

        let parsed: ProductResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_invalid(SERVICE, format!("JSON parse error: {e}"), &body)
        })?;
        if parsed.status != 1 {
            return Ok(None);
        }
        let Some(product) = parsed.product else {
            return Ok(None);
        };

        product_from_off(barcode, product, &body).map(Some)
    }
}

fn nutriment(nutriments: &Map<String, Value>, key: &str) -> Option<f64> {
    match nutriments.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn product_from_off(barcode: &str, product: OffProduct, raw: &str) -> AppResult<ProductRecord> {
    let name = product
        .product_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::external_invalid(SERVICE, "Product has no name", raw))?;
    let calories = nutriment(&product.nutriments, "energy-kcal_100g")
        .ok_or_else(|| AppError::external_invalid(SERVICE, "Product has no energy value", raw))?;

    Ok(ProductRecord {
        barcode: barcode.to_owned(),
        name,
        calories,
        carbs_g: nutriment(&product.nutriments, "carbohydrates_100g").unwrap_or(0.0),
        protein_g: nutriment(&product.nutriments, "proteins_100g").unwrap_or(0.0),
        fat_g: nutriment(&product.nutriments, "fat_100g").unwrap_or(0.0),
        portion_label: "100g".to_owned(),
        source: OPEN_FOOD_FACTS_SOURCE.to_owned(),
    })
}

#[async_trait]
impl BarcodeLookup for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        if let Some(hit) = self.cached(barcode).await {
            debug!(barcode, found = hit.is_some(), "Barcode cache hit");
            return Ok(hit);
        }

        let product = self.fetch(barcode).await?;
        self.store(barcode, product.clone()).await;
        Ok(product)
    }
}

/// Local table first, then the network collaborator if configured
pub struct BarcodeResolver {
    local: LocalBarcodeTable,
    external: Option<Arc<dyn BarcodeLookup>>,
}

impl BarcodeResolver {
    /// Resolver with an optional external lookup
    #[must_use]
    pub fn new(external: Option<Arc<dyn BarcodeLookup>>) -> Self {
        Self {
            local: LocalBarcodeTable::default(),
            external,
        }
    }

    /// Resolver that never leaves the process
    #[must_use]
    pub fn local_only() -> Self {
        Self::new(None)
    }

    /// Validate the code and resolve it
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed codes, or the external lookup's
    /// failure when the local table misses
    pub async fn resolve(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        let code = validate_barcode(barcode)?;
        if let Some(product) = self.local.get(code) {
            return Ok(Some(product.clone()));
        }
        let Some(external) = &self.external else {
            return Ok(None);
        };
        external.lookup(code).await.inspect_err(|e| {
            warn!(barcode = code, error = %e, "External barcode lookup failed");
        })
    }
}

#[async_trait]
impl BarcodeLookup for BarcodeResolver {
    async fn lookup(&self, barcode: &str) -> AppResult<Option<ProductRecord>> {
        self.resolve(barcode).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode(" 7891000100103 ").unwrap(), "7891000100103");
        assert_eq!(
            validate_barcode("1234567").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
        assert!(validate_barcode("789100010010X").is_err());
        assert!(validate_barcode("123456789012345").is_err());
    }

    #[test]
    fn test_local_table_has_five_products() {
        let table = LocalBarcodeTable::default();
        assert_eq!(table.len(), 5);
        let bis = table.get("7891000100004").unwrap();
        assert_eq!(bis.name, "Chocolate Bis");
        assert_eq!(bis.portion_label, "unidade");
    }

    #[test]
    fn test_nutriment_accepts_strings() {
        let mut map = Map::new();
        map.insert("fat_100g".to_owned(), Value::String("3.5".to_owned()));
        map.insert("proteins_100g".to_owned(), serde_json::json!(12));
        assert_eq!(nutriment(&map, "fat_100g"), Some(3.5));
        assert_eq!(nutriment(&map, "proteins_100g"), Some(12.0));
        assert_eq!(nutriment(&map, "sugars_100g"), None);
    }

    #[tokio::test]
    async fn test_local_only_resolver_misses_unknown_code() {
        let resolver = BarcodeResolver::local_only();
        assert!(resolver.resolve("00000000").await.unwrap().is_none());
        assert!(resolver.resolve("7891000253595").await.unwrap().is_some());
    }
}
