//! Catalog Lookup
//!
//! Reads a single product, with its default price expanded, from the Stripe
//! catalog and maps it into a display-ready [`Product`].

use async_trait::async_trait;
use stripe::{Expandable, Price, Product as StripeProduct, ProductId, StripeError};

use crate::checkout::StripeClient;
use crate::error::{PaymentError, Result};
use crate::product::{CatalogRecord, PriceRecord, Product};

/// Product catalog (Strategy pattern)
///
/// Implemented by [`StripeClient`] for production and by
/// [`MockCatalog`](crate::MockCatalog) for tests and local runs.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the raw catalog record for `product_id`
    async fn fetch_record(&self, product_id: &str) -> Result<CatalogRecord>;

    /// Fetch a product and map it for display
    async fn fetch_product(&self, product_id: &str) -> Result<Product> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(PaymentError::ProductNotFound("empty product id".into()));
        }

        let record = self.fetch_record(product_id).await?;
        Product::from_record(record)
    }

    /// Catalog name
    fn name(&self) -> &str;
}

#[async_trait]
impl Catalog for StripeClient {
    async fn fetch_record(&self, product_id: &str) -> Result<CatalogRecord> {
        let id: ProductId = product_id
            .parse()
            .map_err(|_| PaymentError::ProductNotFound(product_id.to_string()))?;

        let product = StripeProduct::retrieve(self.inner(), &id, &["default_price"])
            .await
            .map_err(|e| map_stripe_error(product_id, e))?;

        if product.deleted {
            return Err(PaymentError::ProductNotFound(product_id.to_string()));
        }

        tracing::debug!(product_id, "Fetched product from Stripe catalog");

        Ok(CatalogRecord {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            url: product.url,
            images: product.images.unwrap_or_default(),
            default_price: product.default_price.map(price_record),
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

fn price_record(price: Expandable<Price>) -> PriceRecord {
    match price {
        Expandable::Object(price) => PriceRecord {
            id: price.id.to_string(),
            unit_amount: price.unit_amount,
            currency: price.currency.map(|c| c.to_string()),
        },
        // Expansion was requested, so a bare id means Stripe had no price body
        Expandable::Id(id) => PriceRecord {
            id: id.to_string(),
            unit_amount: None,
            currency: None,
        },
    }
}

fn map_stripe_error(product_id: &str, err: StripeError) -> PaymentError {
    match err {
        StripeError::Stripe(ref request) if request.http_status == 404 => {
            PaymentError::ProductNotFound(product_id.to_string())
        }
        other => {
            tracing::warn!(product_id, error = %other, "Stripe catalog request failed");
            PaymentError::Stripe(other.to_string())
        }
    }
}
