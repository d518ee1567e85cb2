//! In-Memory Catalog and Checkout
//!
//! For tests and running the shop without Stripe credentials. Both mocks
//! count their calls so callers can assert how often the provider was hit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::checkout::{CheckoutProvider, CheckoutSession};
use crate::error::{PaymentError, Result};
use crate::product::{CatalogRecord, PriceRecord};

/// Mock catalog backed by a map of records
#[derive(Default)]
pub struct MockCatalog {
    records: RwLock<HashMap<String, CatalogRecord>>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with one complete BRL product
    pub fn with_product(id: &str, name: &str, unit_amount: i64) -> Self {
        let catalog = Self::new();
        catalog.insert(sample_record(id, name, unit_amount));
        catalog
    }

    /// Add or replace a record
    pub fn insert(&self, record: CatalogRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.id.clone(), record);
    }

    /// Drop a record, as if the product was deleted upstream
    pub fn remove(&self, id: &str) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    /// Make every lookup fail with a provider error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn fetch_record(&self, product_id: &str) -> Result<CatalogRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PaymentError::Stripe("mock catalog unavailable".into()));
        }

        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .cloned()
            .ok_or_else(|| PaymentError::ProductNotFound(product_id.to_string()))
    }

    fn name(&self) -> &str {
        "MockCatalog"
    }
}

/// Build a complete catalog record priced in BRL
pub fn sample_record(id: &str, name: &str, unit_amount: i64) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: Some(name.to_string()),
        description: Some(format!("{name} em algodão orgânico.")),
        url: None,
        images: vec![format!("https://files.stripe.com/links/{id}.png")],
        default_price: Some(PriceRecord {
            id: format!("price_{}", id.trim_start_matches("prod_")),
            unit_amount: Some(unit_amount),
            currency: Some("brl".into()),
        }),
    }
}

/// Mock checkout that hands out predictable URLs
#[derive(Default)]
pub struct MockCheckout {
    requests: RwLock<Vec<String>>,
    failing: AtomicBool,
}

impl MockCheckout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every session request fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Price ids received, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckout {
    async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession> {
        let mut requests = self
            .requests
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        requests.push(price_id.to_string());

        if self.failing.load(Ordering::SeqCst) {
            return Err(PaymentError::Stripe("mock checkout failure".into()));
        }

        let id = format!("cs_test_{}", requests.len());
        Ok(CheckoutSession {
            checkout_url: format!("https://checkout.stripe.com/c/pay/{id}"),
            id,
            price_id: price_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_product() {
        let catalog = MockCatalog::with_product("prod_1", "Camiseta Explorer", 7990);

        let product = catalog.fetch_product("prod_1").await.unwrap();
        assert_eq!(product.name(), "Camiseta Explorer");
        assert_eq!(product.price(), "R$\u{a0}79,90");
        assert_eq!(product.default_price_id(), "price_1");
        assert!(!product.description().is_empty());
        assert!(!product.image_url().is_empty());
        assert_eq!(catalog.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let catalog = MockCatalog::new();
        let err = catalog.fetch_product("prod_missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_id_skips_catalog() {
        let catalog = MockCatalog::new();
        let err = catalog.fetch_product("  ").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_catalog() {
        let catalog = MockCatalog::with_product("prod_1", "Camiseta", 100);
        catalog.set_unavailable(true);

        let err = catalog.fetch_product("prod_1").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_checkout_records_requests() {
        let checkout = MockCheckout::new();
        let session = checkout.create_checkout_session("price_1").await.unwrap();
        assert_eq!(session.price_id, "price_1");
        assert!(session.checkout_url.starts_with("https://checkout.stripe.com/"));

        checkout.set_failing(true);
        assert!(checkout.create_checkout_session("price_2").await.is_err());
        assert_eq!(checkout.requests(), vec!["price_1", "price_2"]);
    }
}
